// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam surgery
//!
//! Removing a seam splices one node out of every line it crosses.  On
//! its own line a node is easy to drop: its low and high neighbours are
//! linked to each other.  The hard part is the line behind it.  Where
//! the seam runs straight, the two lines shift together and nothing
//! else changes; where it jogs, the two lines shift by different
//! amounts between the two seam nodes, and the node straight back must
//! be re-linked to whichever neighbour now sits in front of it.
//!
//! A vertical seam, with `*` marking removed nodes:
//!
//! ```text
//!   straight       jog low          jog high
//!   a * b          a * b c          a b * c
//!   a * b          a d * c          a d * c
//!                  b ↔ d            b ↔ c
//! ```
//!
//! Removed nodes keep the links they had.  Because every link that
//! changes during a removal used to point at a removed node, putting
//! the seam back is a matter of pointing each removed node's old
//! neighbours back at it.

use crate::carve::Carve;
use crate::cq;
use crate::energy::refresh_energy;
use crate::error::{Result, SeamError};
use crate::lattice::Lattice;
use crate::node::{Links, NodeId, Side, HIGHLIGHT};
use crate::wellformed::is_well_formed;
use itertools::Itertools;
use tracing::{debug, error};

/// Where a seam node's predecessor sits, one line back.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Jog {
    /// Directly behind it.
    Straight,
    /// Behind it and toward the low side: up-left for a vertical
    /// seam, left-up for a horizontal one.
    Low,
    /// Behind it and toward the high side.
    High,
}

/// One entry of the undo log: a removed node and the links it had
/// when it was removed.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Splice {
    pub node: NodeId,
    pub links: Links,
}

/// A removed seam, kept so that it can be put back.
#[derive(Debug, Clone, PartialEq)]
pub struct Seam {
    pub carve: Carve,
    /// The cumulative weight the seam was chosen for.
    pub weight: f64,
    /// Terminus first, origin last.
    pub splices: Vec<Splice>,
}

impl Seam {
    /// The removed nodes, terminus first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.splices.iter().map(|splice| splice.node)
    }

    pub fn len(&self) -> usize {
        self.splices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splices.is_empty()
    }
}

// Classify `node` against `predecessor` by where the predecessor's
// forward link lands.  Anything else is not a connected seam.
fn jog(lattice: &Lattice, carve: Carve, node: NodeId, predecessor: NodeId) -> Option<Jog> {
    let landing = lattice.link(predecessor, carve.ahead());
    if lattice.is_border(landing) {
        None
    } else if landing == node {
        Some(Jog::Straight)
    } else if landing == lattice.link(node, carve.low()) {
        Some(Jog::Low)
    } else if landing == lattice.link(node, carve.high()) {
        Some(Jog::High)
    } else {
        None
    }
}

/// Remove the seam ending at `terminus`, as traced by the most recent
/// search in the same orientation.
///
/// The chain is checked in full before anything is touched: it must
/// cross every line exactly once, start on the first line, and never
/// step more than one node sideways.  A lattice already one node
/// across cannot lose a seam.  After the splice the lattice is
/// verified and its energies recomputed.
pub fn remove_seam(lattice: &mut Lattice, carve: Carve, terminus: NodeId) -> Result<Seam> {
    if lattice.extent(carve) <= 1 {
        return Err(SeamError::NothingToRemove { carve });
    }

    let chain = lattice.chain(terminus);
    let origin = match chain.last() {
        Some(&origin) => origin,
        None => return Err(SeamError::NotWellFormed),
    };
    if chain.len() != lattice.span(carve) || !lattice.is_border(lattice.link(origin, carve.back())) {
        error!(length = chain.len(), span = lattice.span(carve), "seam does not cross the lattice");
        return Err(SeamError::NotWellFormed);
    }
    let jogs: Vec<Jog> = chain
        .iter()
        .tuple_windows()
        .map(|(&node, &predecessor)| jog(lattice, carve, node, predecessor))
        .collect::<Option<Vec<Jog>>>()
        .ok_or(SeamError::NotWellFormed)?;

    let weight = lattice.weight(terminus);
    let (back, ahead, low, high) = (carve.back(), carve.ahead(), carve.low(), carve.high());
    let mut splices = Vec::with_capacity(chain.len());
    for (i, &node) in chain.iter().enumerate() {
        let links = lattice.links(node);
        splices.push(Splice { node, links });

        let (lower, higher) = (links.get(low), links.get(high));
        lattice.set_link(lower, high, higher);
        lattice.set_link(higher, low, lower);

        // The origin has no predecessor, and so no line behind it to mend.
        let behind = links.get(back);
        match jogs.get(i) {
            Some(Jog::Low) => {
                lattice.set_link(behind, ahead, lower);
                lattice.set_link(lower, back, behind);
            }
            Some(Jog::High) => {
                lattice.set_link(behind, ahead, higher);
                lattice.set_link(higher, back, behind);
            }
            Some(Jog::Straight) | None => {}
        }

        lattice.set_color(node, HIGHLIGHT);
    }

    // Find the corner again from whichever neighbour of the origin survived.
    let beside = cq!(
        lattice.is_border(lattice.link(origin, high)),
        lattice.link(origin, low),
        lattice.link(origin, high)
    );
    let corner = lattice.topmost(lattice.leftmost(beside));
    lattice.set_start(corner);
    lattice.resize(carve, false);

    if !is_well_formed(lattice) {
        error!(orientation = %carve, terminus, "seam removal corrupted the lattice");
        return Err(SeamError::NotWellFormed);
    }
    refresh_energy(lattice);
    lattice.reset_paths();
    debug!(
        orientation = %carve,
        weight,
        width = lattice.width(),
        height = lattice.height(),
        "removed seam"
    );

    Ok(Seam {
        carve,
        weight,
        splices,
    })
}

/// Put a removed seam back, exactly where it was.  Seams must come
/// back in the reverse of the order they left.  Reinserted nodes keep
/// whatever color they have; restoring it is up to the caller.
pub fn reinsert_seam(lattice: &mut Lattice, seam: &Seam) -> Result<()> {
    for splice in seam.splices.iter().rev() {
        lattice.set_links(splice.node, splice.links);
        for &side in Side::ALL.iter() {
            lattice.set_link(splice.links.get(side), side.opposite(), splice.node);
        }
    }

    if let Some(origin) = seam.splices.last() {
        let corner = lattice.topmost(lattice.leftmost(origin.node));
        lattice.set_start(corner);
    }
    lattice.resize(seam.carve, true);

    if !is_well_formed(lattice) {
        error!(orientation = %seam.carve, "seam reinsertion corrupted the lattice");
        return Err(SeamError::NotWellFormed);
    }
    refresh_energy(lattice);
    lattice.reset_paths();
    debug!(
        orientation = %seam.carve,
        weight = seam.weight,
        width = lattice.width(),
        height = lattice.height(),
        "reinserted seam"
    );
    Ok(())
}
