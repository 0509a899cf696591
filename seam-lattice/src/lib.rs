// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A seam-carving engine built on a mutable pixel lattice.
//!
//! Pixels live in an arena and know their four neighbours by index.
//! Seams are found with the usual dynamic-programming sweep, and removed
//! by rewiring links rather than by copying pixels, which makes every
//! removal exactly reversible.

// #![deny(missing_docs)]

mod ternary;

pub mod carve;
pub mod energy;
pub mod error;
pub mod grid;
pub mod lattice;
pub mod node;
pub mod render;
pub mod seamfinder;
pub mod surgery;
pub mod wellformed;

pub use carve::Carve;
pub use error::{Result, SeamError};
pub use grid::Grid;
pub use lattice::Lattice;
pub use node::{NodeId, Path, Side, BORDER, HIGHLIGHT};
pub use seamfinder::{minimum_terminus, SeamFinder};
pub use surgery::{Jog, Seam, Splice};
