// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a lattice
//!
//! The energy of a pixel is the magnitude of a Sobel gradient over the
//! brightness of its 3×3 neighbourhood, read through the lattice links
//! rather than image coordinates, so it stays correct however many
//! seams have been carved away.  Off the edge of the lattice the
//! neighbourhood reads the border, which is black:
//!
//! ```text
//! Gx = (br(l.t) + 2·br(l) + br(l.b)) − (br(r.t) + 2·br(r) + br(r.b))
//! Gy = (br(l.t) + 2·br(t) + br(t.r)) − (br(l.b) + 2·br(b) + br(b.r))
//! e  = √(Gx² + Gy²)
//! ```

use crate::lattice::Lattice;
use crate::node::{NodeId, Side, BORDER_WEIGHT};

/// The energy of a single node.  The border has an energy of -1.
pub fn energy_at(lattice: &Lattice, id: NodeId) -> f64 {
    if lattice.is_border(id) {
        return BORDER_WEIGHT;
    }
    let go = |from: NodeId, side: Side| lattice.link(from, side);
    let br = |of: NodeId| lattice.brightness(of);

    let (left, right) = (go(id, Side::Left), go(id, Side::Right));
    let (top, bottom) = (go(id, Side::Top), go(id, Side::Bottom));

    let gx = (br(go(left, Side::Top)) + 2.0 * br(left) + br(go(left, Side::Bottom)))
        - (br(go(right, Side::Top)) + 2.0 * br(right) + br(go(right, Side::Bottom)));
    let gy = (br(go(left, Side::Top)) + 2.0 * br(top) + br(go(top, Side::Right)))
        - (br(go(left, Side::Bottom)) + 2.0 * br(bottom) + br(go(bottom, Side::Right)));
    (gx * gx + gy * gy).sqrt()
}

// This is the whole-lattice recalculation, every time.  Only the nodes
// along a carved seam and their immediate neighbours actually change,
// but tracking that band costs more clarity than it saves time.

/// Recompute the energy of every live node.
pub fn refresh_energy(lattice: &mut Lattice) {
    // Energy reads brightness only, so updating in place is safe.
    let live: Vec<NodeId> = lattice.nodes().collect();
    for id in live {
        let energy = energy_at(lattice, id);
        lattice.set_energy(id, energy);
    }
}
