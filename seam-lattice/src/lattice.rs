// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel lattice
//!
//! An arena of cells, addressed by `NodeId`, in which every pixel knows
//! its four neighbours.  Nothing here ever moves or frees a node:
//! carving only rewires links, so a node spliced out of the lattice
//! keeps its id, its color, and the links it had at the moment it was
//! removed, which is what makes reinsertion exact.
//!
//! The lattice is reached through `start`, the top-left-most live node.
//! Rows are walked rightward from the left column, columns downward
//! from the top row; both walks end at the border.

use crate::carve::Carve;
use crate::cq;
use crate::energy::refresh_energy;
use crate::error::{Result, SeamError};
use crate::node::{Cell, Links, Node, NodeId, Path, Side, BORDER, BORDER_COLOR, BORDER_WEIGHT};
use crate::wellformed::is_well_formed;
use image::Rgb;
use itertools::iproduct;

#[derive(Debug, Clone)]
pub struct Lattice {
    cells: Vec<Cell>,
    paths: Vec<Path>,
    start: NodeId,
    width: usize,
    height: usize,
}

impl Lattice {
    /// Build a lattice from a row-major buffer of `width * height`
    /// colors.  Energies are computed and every path is reset, so the
    /// lattice is ready to be searched.
    pub fn new(width: usize, height: usize, colors: Vec<Rgb<u8>>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SeamError::shape(format!(
                "{}x{} lattice has no pixels",
                width, height
            )));
        }
        if colors.len() != width * height {
            return Err(SeamError::shape(format!(
                "{} colors cannot fill a {}x{} lattice",
                colors.len(),
                width,
                height
            )));
        }

        // The border lives at index 0, so pixel (x, y) lives at 1 + y * width + x.
        let id = |x: usize, y: usize| 1 + y * width + x;
        let mut cells = Vec::with_capacity(colors.len() + 1);
        cells.push(Cell::Border);
        cells.extend(colors.into_iter().map(|color| Cell::Pixel(Node::new(color))));

        for (y, x) in iproduct!(0..height, 0..width) {
            let links = Links {
                left: cq!(x == 0, BORDER, id(x - 1, y)),
                right: cq!(x + 1 == width, BORDER, id(x + 1, y)),
                top: cq!(y == 0, BORDER, id(x, y - 1)),
                bottom: cq!(y + 1 == height, BORDER, id(x, y + 1)),
            };
            if let Cell::Pixel(node) = &mut cells[id(x, y)] {
                node.links = links;
            }
        }

        let paths = (0..cells.len())
            .map(|node| Path::origin(node, BORDER_WEIGHT))
            .collect();
        let mut lattice = Lattice {
            cells,
            paths,
            start: id(0, 0),
            width,
            height,
        };
        if !is_well_formed(&lattice) {
            return Err(SeamError::NotWellFormed);
        }
        refresh_energy(&mut lattice);
        lattice.reset_paths();
        Ok(lattice)
    }

    /// Build a lattice from rows of colors, which must all be the same
    /// non-zero length.
    pub fn from_rows(rows: Vec<Vec<Rgb<u8>>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(SeamError::shape(format!(
                "row {} has {} pixels, expected {}",
                y,
                row.len(),
                width
            )));
        }
        Lattice::new(width, height, rows.into_iter().flatten().collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The top-left-most live node.
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// How many seams of this orientation the lattice currently has,
    /// one per terminus: its width for vertical seams, its height for
    /// horizontal ones.
    pub fn extent(&self, carve: Carve) -> usize {
        match carve {
            Carve::Vertical => self.width,
            Carve::Horizontal => self.height,
        }
    }

    /// How many nodes one seam of this orientation passes through.
    pub fn span(&self, carve: Carve) -> usize {
        self.extent(carve.turn())
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        match self.cells.get(id) {
            Some(Cell::Pixel(node)) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        match self.cells.get_mut(id) {
            Some(Cell::Pixel(node)) => Some(node),
            _ => None,
        }
    }

    pub fn is_border(&self, id: NodeId) -> bool {
        self.node(id).is_none()
    }

    /// The neighbour on `side`.  The border is its own neighbour on
    /// every side.
    pub fn link(&self, id: NodeId, side: Side) -> NodeId {
        self.node(id).map_or(BORDER, |node| node.links.get(side))
    }

    pub fn links(&self, id: NodeId) -> Links {
        self.node(id).map_or_else(Links::border, |node| node.links)
    }

    /// Point `id`'s `side` link at `to`.  Writes to the border are
    /// dropped; its links are fixed.
    pub(crate) fn set_link(&mut self, id: NodeId, side: Side, to: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.links.set(side, to);
        }
    }

    pub(crate) fn set_links(&mut self, id: NodeId, links: Links) {
        if let Some(node) = self.node_mut(id) {
            node.links = links;
        }
    }

    pub fn color(&self, id: NodeId) -> Rgb<u8> {
        self.node(id).map_or(BORDER_COLOR, |node| node.color)
    }

    pub fn base_color(&self, id: NodeId) -> Rgb<u8> {
        self.node(id).map_or(BORDER_COLOR, |node| node.base_color)
    }

    pub(crate) fn set_color(&mut self, id: NodeId, color: Rgb<u8>) {
        if let Some(node) = self.node_mut(id) {
            node.color = color;
        }
    }

    /// Put the node's original color back.
    pub(crate) fn restore_color(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.color = node.base_color;
        }
    }

    pub fn brightness(&self, id: NodeId) -> f64 {
        self.node(id).map_or(0.0, |node| node.brightness)
    }

    pub fn energy(&self, id: NodeId) -> f64 {
        self.node(id).map_or(BORDER_WEIGHT, |node| node.energy)
    }

    pub(crate) fn set_energy(&mut self, id: NodeId, energy: f64) {
        if let Some(node) = self.node_mut(id) {
            node.energy = energy;
        }
    }

    /// The path record of a live or removed node.  The border has
    /// none: no seam may end on it.
    pub fn path(&self, id: NodeId) -> Option<&Path> {
        self.node(id).and(self.paths.get(id))
    }

    /// Cumulative seam weight at `id`; -1 for the border.
    pub fn weight(&self, id: NodeId) -> f64 {
        self.path(id).map_or(BORDER_WEIGHT, |path| path.weight)
    }

    pub(crate) fn set_path(&mut self, path: Path) {
        if self.node(path.node).is_some() {
            self.paths[path.node] = path;
        }
    }

    /// Reset every live node's path to a one-node seam weighted by
    /// the node's own energy.
    pub(crate) fn reset_paths(&mut self) {
        let live: Vec<NodeId> = self.nodes().collect();
        for id in live {
            let energy = self.energy(id);
            self.set_path(Path::origin(id, energy));
        }
    }

    pub(crate) fn set_start(&mut self, id: NodeId) {
        self.start = id;
    }

    /// Account for one seam leaving (`grow == false`) or rejoining the
    /// lattice.
    pub(crate) fn resize(&mut self, carve: Carve, grow: bool) {
        let dimension = match carve {
            Carve::Vertical => &mut self.width,
            Carve::Horizontal => &mut self.height,
        };
        *dimension = cq!(grow, *dimension + 1, *dimension - 1);
    }

    /// Walk from `from` toward `side`, yielding live nodes until the
    /// border is reached.  `from` itself comes first.
    pub fn walk(&self, from: NodeId, side: Side) -> Walk<'_> {
        Walk {
            lattice: self,
            next: from,
            side,
            remaining: self.cells.len(),
        }
    }

    /// The lines a seam of this orientation crosses, in the order the
    /// search visits them: rows top to bottom for vertical seams,
    /// columns left to right for horizontal ones.  Each line is walked
    /// from its low end.
    pub fn lines(&self, carve: Carve) -> impl Iterator<Item = Walk<'_>> + '_ {
        self.walk(self.start, carve.ahead())
            .map(move |first| self.walk(first, carve.high()))
    }

    /// Rows, top to bottom, each walked left to right.
    pub fn rows(&self) -> impl Iterator<Item = Walk<'_>> + '_ {
        self.lines(Carve::Vertical)
    }

    /// Every live node, in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rows().flatten()
    }

    /// The first node of `id`'s row.
    pub fn leftmost(&self, id: NodeId) -> NodeId {
        self.walk(id, Side::Left).last().unwrap_or(id)
    }

    /// The first node of `id`'s column.
    pub fn topmost(&self, id: NodeId) -> NodeId {
        self.walk(id, Side::Top).last().unwrap_or(id)
    }

    /// The largest energy in the lattice, or 0 if none is positive.
    pub fn max_energy(&self) -> f64 {
        self.nodes().map(|id| self.energy(id)).fold(0.0, f64::max)
    }

    /// The largest cumulative seam weight in the lattice, or 0 if none
    /// is positive.
    pub fn max_weight(&self) -> f64 {
        self.nodes().map(|id| self.weight(id)).fold(0.0, f64::max)
    }
}

/// A straight walk across the lattice.  It gives up after visiting as
/// many nodes as the arena holds, so that a corrupted lattice with a
/// cycle in it can still be inspected.
pub struct Walk<'a> {
    lattice: &'a Lattice,
    next: NodeId,
    side: Side,
    remaining: usize,
}

impl<'a> Iterator for Walk<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.remaining == 0 || self.lattice.is_border(self.next) {
            return None;
        }
        self.remaining -= 1;
        let here = self.next;
        self.next = self.lattice.link(here, self.side);
        Some(here)
    }
}
