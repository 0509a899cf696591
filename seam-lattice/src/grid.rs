// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The public face of the engine
//!
//! A `Grid` owns a lattice together with its undo history.  Whatever
//! drives it, a batch carver or an interactive display, does so one
//! call at a time: find, highlight, remove, reinsert, restore.  Undo is
//! two calls because a reinserted seam is worth showing highlighted for
//! a moment before its colors come back.

use crate::carve::Carve;
use crate::error::{Result, SeamError};
use crate::lattice::Lattice;
use crate::node::{NodeId, Path, HIGHLIGHT};
use crate::render;
use crate::seamfinder::{minimum_terminus, SeamFinder};
use crate::surgery::{self, Seam};
use crate::wellformed;
use image::{GenericImageView, GrayImage, Pixel, Rgb, RgbImage};
use itertools::iproduct;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Grid {
    lattice: Lattice,
    history: Vec<Seam>,
    reinserted: Vec<Seam>,
    preview: Vec<NodeId>,
}

impl Grid {
    pub fn new(width: usize, height: usize, colors: Vec<Rgb<u8>>) -> Result<Self> {
        Ok(Grid::from_lattice(Lattice::new(width, height, colors)?))
    }

    pub fn from_rows(rows: Vec<Vec<Rgb<u8>>>) -> Result<Self> {
        Ok(Grid::from_lattice(Lattice::from_rows(rows)?))
    }

    /// Take the colors of any eight-bit image.
    pub fn from_image<I, P>(image: &I) -> Result<Self>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = u8>,
    {
        let (width, height) = image.dimensions();
        let colors = iproduct!(0..height, 0..width)
            .map(|(y, x)| image.get_pixel(x, y).to_rgb())
            .collect();
        Grid::new(width as usize, height as usize, colors)
    }

    fn from_lattice(lattice: Lattice) -> Self {
        Grid {
            lattice,
            history: Vec::new(),
            reinserted: Vec::new(),
            preview: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.lattice.width()
    }

    pub fn height(&self) -> usize {
        self.lattice.height()
    }

    /// How many removed seams are waiting to be reinserted.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn is_well_formed(&self) -> bool {
        wellformed::is_well_formed(&self.lattice)
    }

    /// The current colors, row by row.
    pub fn colors(&self) -> Vec<Vec<Rgb<u8>>> {
        self.lattice
            .rows()
            .map(|row| row.map(|id| self.lattice.color(id)).collect())
            .collect()
    }

    /// Run a fresh search and return its termini.
    pub fn find_seams(&mut self, carve: Carve) -> Vec<Path> {
        self.lattice.find_seams(carve)
    }

    /// Run a fresh search and return the terminus of the lightest seam.
    pub fn minimum_seam(&mut self, carve: Carve) -> Result<Path> {
        minimum_terminus(&self.lattice.find_seams(carve)).ok_or(SeamError::NotWellFormed)
    }

    pub fn remove_vertical_seam(&mut self) -> Result<()> {
        self.remove_seam(Carve::Vertical)
    }

    pub fn remove_horizontal_seam(&mut self) -> Result<()> {
        self.remove_seam(Carve::Horizontal)
    }

    /// Remove the lightest seam of the given orientation and push it
    /// onto the undo history.
    pub fn remove_seam(&mut self, carve: Carve) -> Result<()> {
        if self.lattice.extent(carve) <= 1 {
            return Err(SeamError::NothingToRemove { carve });
        }
        self.clear_preview();
        let terminus = self.minimum_seam(carve)?;
        let seam = surgery::remove_seam(&mut self.lattice, carve, terminus.node)?;
        self.history.push(seam);
        Ok(())
    }

    /// Paint the lightest seam of the given orientation without
    /// removing it, and return its weight.  Only one preview shows at
    /// a time; the next preview or removal takes this one down.
    pub fn highlight_minimum_seam(&mut self, carve: Carve) -> Result<f64> {
        self.clear_preview();
        let terminus = self.minimum_seam(carve)?;
        self.preview = self.lattice.chain(terminus.node);
        for &id in &self.preview {
            self.lattice.set_color(id, HIGHLIGHT);
        }
        Ok(terminus.weight)
    }

    // Reinserted seams waiting for their colors are left alone.
    fn clear_preview(&mut self) {
        for id in self.preview.drain(..) {
            self.lattice.restore_color(id);
        }
    }

    /// Give every live node its own color back.
    pub fn clear_highlight(&mut self) {
        self.preview.clear();
        let ids: Vec<_> = self.lattice.nodes().collect();
        for id in ids {
            self.lattice.restore_color(id);
        }
    }

    /// First half of undo: put the most recently removed seam back.
    /// Its nodes stay highlighted until `restore_seam_colors`.
    pub fn reinsert_last_seam(&mut self) -> Result<()> {
        let seam = self.history.pop().ok_or(SeamError::EmptyHistory)?;
        surgery::reinsert_seam(&mut self.lattice, &seam)?;
        self.reinserted.push(seam);
        Ok(())
    }

    /// Second half of undo: recolor every seam reinserted since the
    /// last call.  Returns how many seams were restored.
    pub fn restore_seam_colors(&mut self) -> usize {
        let restored = self.reinserted.len();
        for seam in self.reinserted.drain(..) {
            for id in seam.nodes() {
                self.lattice.restore_color(id);
            }
        }
        if restored > 0 {
            debug!(seams = restored, "restored seam colors");
        }
        restored
    }

    pub fn undo_last_removal(&mut self) -> Result<()> {
        self.reinsert_last_seam()?;
        self.restore_seam_colors();
        Ok(())
    }

    pub fn render(&self) -> RgbImage {
        render::render_colors(&self.lattice)
    }

    pub fn render_energy(&self) -> GrayImage {
        render::render_energy(&self.lattice)
    }

    /// Weights of whichever search ran last.  Surgery resets the
    /// paths, after which each node weighs only its own energy.
    pub fn render_seams(&self) -> GrayImage {
        render::render_seams(&self.lattice)
    }
}
