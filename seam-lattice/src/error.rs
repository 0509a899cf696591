// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Things that can go wrong while building or carving a lattice.

use crate::carve::Carve;
use failure::Fail;

/// Every failure the lattice engine reports.  Only `NotWellFormed` is
/// raised after the lattice has been touched; the others are detected
/// up front and leave the lattice exactly as it was.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum SeamError {
    /// The color buffer handed to the builder is not a non-empty
    /// rectangle.
    #[fail(display = "invalid lattice shape: {}", reason)]
    InvalidShape { reason: String },

    /// The lattice is already one pixel across in the carve direction.
    #[fail(display = "no {} seam can be removed from a lattice one pixel across", carve)]
    NothingToRemove { carve: Carve },

    /// The neighbour links no longer close around every 2×2 block.
    /// This is a bug in the surgery, not a recoverable condition.
    #[fail(display = "lattice is not well formed")]
    NotWellFormed,

    /// Undo was requested with nothing left to undo.
    #[fail(display = "no removed seam left to reinsert")]
    EmptyHistory,
}

impl SeamError {
    pub(crate) fn shape<S: Into<String>>(reason: S) -> Self {
        SeamError::InvalidShape {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SeamError>;
