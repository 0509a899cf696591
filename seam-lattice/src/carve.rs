// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam orientation
//!
//! A vertical seam runs top to bottom and removing it makes the image
//! one pixel narrower; a horizontal seam runs left to right and costs
//! a row.  Every walk the search and the surgery make is phrased in
//! terms of four sides relative to the seam, so that both orientations
//! share one implementation:
//!
//! ```text
//!                 vertical        horizontal
//!   back          Top             Left        toward the seam's origin
//!   ahead         Bottom          Right       toward the seam's terminus
//!   low           Left            Top         the lateral "first" side
//!   high          Right           Bottom      the lateral "last" side
//! ```

use crate::node::Side;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Carve {
    /// Remove a top-to-bottom seam; the lattice loses one column.
    Vertical,
    /// Remove a left-to-right seam; the lattice loses one row.
    Horizontal,
}

impl Carve {
    /// The other orientation.  Used by carvers that alternate.
    pub fn turn(self) -> Self {
        match self {
            Carve::Vertical => Carve::Horizontal,
            Carve::Horizontal => Carve::Vertical,
        }
    }

    pub fn back(self) -> Side {
        match self {
            Carve::Vertical => Side::Top,
            Carve::Horizontal => Side::Left,
        }
    }

    pub fn ahead(self) -> Side {
        self.back().opposite()
    }

    pub fn low(self) -> Side {
        match self {
            Carve::Vertical => Side::Left,
            Carve::Horizontal => Side::Top,
        }
    }

    pub fn high(self) -> Side {
        self.low().opposite()
    }
}

impl fmt::Display for Carve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Carve::Vertical => "vertical",
            Carve::Horizontal => "horizontal",
        })
    }
}
