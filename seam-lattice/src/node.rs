// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lattice nodes
//!
//! Every pixel of the source image becomes one `Node` in an arena, and
//! its four neighbours are arena indices rather than pointers.  Index
//! zero is reserved for the border: a single shared cell standing in
//! for "no neighbour" on every edge of the lattice.  The border is
//! black, has an energy and a path weight of -1, and every one of its
//! own links points back at itself, so a walk that steps off the
//! lattice stays on the border and a lookup through it keeps yielding
//! it.

use image::Rgb;

/// Index of a cell in the lattice arena.
pub type NodeId = usize;

/// The shared border cell.
pub const BORDER: NodeId = 0;

/// Energy and cumulative weight reported for the border.
pub const BORDER_WEIGHT: f64 = -1.0;

/// The color the border pretends to have.
pub const BORDER_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// The color used to mark a seam that is about to be removed, or one
/// that has just been put back.
pub const HIGHLIGHT: Rgb<u8> = Rgb([255, 0, 0]);

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

/// The four neighbour relations of a node.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Links {
    pub left: NodeId,
    pub right: NodeId,
    pub top: NodeId,
    pub bottom: NodeId,
}

impl Links {
    /// Links that lead nowhere but the border.
    pub fn border() -> Self {
        Links {
            left: BORDER,
            right: BORDER,
            top: BORDER,
            bottom: BORDER,
        }
    }

    pub fn get(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, side: Side, to: NodeId) {
        match side {
            Side::Left => self.left = to,
            Side::Right => self.right = to,
            Side::Top => self.top = to,
            Side::Bottom => self.bottom = to,
        }
    }
}

/// Mean channel value, normalized to [0, 1].
pub fn brightness(color: Rgb<u8>) -> f64 {
    let Rgb([r, g, b]) = color;
    (f64::from(r) + f64::from(g) + f64::from(b)) / 3.0 / 255.0
}

/// One pixel of the lattice.
#[derive(Debug, Clone)]
pub struct Node {
    /// What the pixel currently shows; differs from `base_color` only
    /// while the node is highlighted.
    pub color: Rgb<u8>,
    pub base_color: Rgb<u8>,
    pub brightness: f64,
    pub energy: f64,
    pub links: Links,
}

impl Node {
    pub fn new(color: Rgb<u8>) -> Self {
        Node {
            color,
            base_color: color,
            brightness: brightness(color),
            energy: 0.0,
            links: Links::border(),
        }
    }
}

/// A slot in the lattice arena.
#[derive(Debug, Clone)]
pub enum Cell {
    Border,
    Pixel(Node),
}

/// The best seam found so far ending at `node`: its cumulative weight
/// and the node it came from.  Following `predecessor` back through
/// the path arena walks the seam to its origin.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Path {
    pub node: NodeId,
    pub weight: f64,
    pub predecessor: Option<NodeId>,
}

impl Path {
    /// A seam that starts and ends at `node`.
    pub fn origin(node: NodeId, weight: f64) -> Self {
        Path {
            node,
            weight,
            predecessor: None,
        }
    }
}
