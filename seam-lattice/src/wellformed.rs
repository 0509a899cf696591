// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Well-formedness of the lattice
//!
//! A lattice is well formed when, around every node, the four links
//! close into 2×2 squares: going left then up lands on the same node
//! as going up then left, and likewise for the other three corners.
//! Along the edges the squares close through the border, which links
//! to itself.  Every surgery is checked against this before it is
//! allowed to stand.

use crate::lattice::Lattice;
use crate::node::{NodeId, Side};
use tracing::warn;

// The four corners of the 2×2 blocks around `id`.
fn closes(lattice: &Lattice, id: NodeId) -> bool {
    let go = |from: NodeId, side: Side| lattice.link(from, side);
    [
        (Side::Left, Side::Top),
        (Side::Right, Side::Top),
        (Side::Left, Side::Bottom),
        (Side::Right, Side::Bottom),
    ]
    .iter()
    .all(|&(across, up)| go(go(id, across), up) == go(go(id, up), across))
}

// Every live neighbour links straight back.
fn reciprocal(lattice: &Lattice, id: NodeId) -> bool {
    Side::ALL.iter().all(|&side| {
        let neighbour = lattice.link(id, side);
        lattice.is_border(neighbour) || lattice.link(neighbour, side.opposite()) == id
    })
}

/// Check every row reachable from the start of the lattice.  Besides
/// the 2×2 closure this also insists that links are reciprocal and
/// that the rows form a rectangle of the recorded width and height.
pub fn is_well_formed(lattice: &Lattice) -> bool {
    let start = lattice.start();
    if lattice.is_border(start)
        || !lattice.is_border(lattice.link(start, Side::Left))
        || !lattice.is_border(lattice.link(start, Side::Top))
    {
        warn!(start, "lattice start is not its top-left corner");
        return false;
    }

    let mut rows = 0;
    for row in lattice.rows() {
        let mut length = 0;
        for id in row {
            if !closes(lattice, id) || !reciprocal(lattice, id) {
                warn!(node = id, row = rows, column = length, "lattice links do not close");
                return false;
            }
            length += 1;
        }
        if length != lattice.width() {
            warn!(row = rows, length, width = lattice.width(), "ragged lattice row");
            return false;
        }
        rows += 1;
    }
    if rows != lattice.height() {
        warn!(rows, height = lattice.height(), "lattice lost track of its rows");
        return false;
    }
    true
}
