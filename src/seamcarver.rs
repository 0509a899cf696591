// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! Load an image into a lattice and carve it down to size, alternating
//! between columns and rows while both are too large, then finishing
//! whichever is left.  The carved lattice is handed back whole, so the
//! caller can render whichever projection it wants, or undo.

use failure::Fail;
use image::{GenericImageView, Pixel, RgbImage};
use seam_lattice::{Carve, Grid, SeamError};
use tracing::{debug, info};

#[derive(Debug, Fail)]
pub enum CarveError {
    #[fail(
        display = "seamcarve cannot upscale a {}x{} image to {}x{}",
        width, height, newwidth, newheight
    )]
    Upscale {
        width: u32,
        height: u32,
        newwidth: u32,
        newheight: u32,
    },

    #[fail(display = "{}", _0)]
    Seam(#[cause] SeamError),

    #[fail(display = "{}", _0)]
    Image(#[cause] image::ImageError),
}

impl From<SeamError> for CarveError {
    fn from(err: SeamError) -> Self {
        CarveError::Seam(err)
    }
}

impl From<image::ImageError> for CarveError {
    fn from(err: image::ImageError) -> Self {
        CarveError::Image(err)
    }
}

/// A struct for holding the image to be carved.
pub struct SeamCarver<'a, I> {
    image: &'a I,
}

impl<'a, I, P> SeamCarver<'a, I>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: &'a I) -> Self {
        Self { image }
    }

    // Every removal recomputes the energy of the whole lattice.  Only
    // the nodes beside the seam can have changed, so refreshing those
    // alone would make long carves much cheaper.

    /// Given a desired new width and height, repeatedly carve seams
    /// out of the image.
    pub fn carve(&self, newwidth: u32, newheight: u32) -> Result<Grid, CarveError> {
        let (width, height) = self.image.dimensions();
        if width < newwidth || height < newheight {
            return Err(CarveError::Upscale {
                width,
                height,
                newwidth,
                newheight,
            });
        }
        if newwidth == 0 || newheight == 0 {
            return Err(SeamError::InvalidShape {
                reason: format!("cannot carve down to {}x{}", newwidth, newheight),
            }
            .into());
        }
        let (newwidth, newheight) = (newwidth as usize, newheight as usize);
        let mut grid = Grid::from_image(self.image)?;
        let mut direction = Carve::Vertical;

        while grid.width() > newwidth && grid.height() > newheight {
            grid.remove_seam(direction)?;
            direction = direction.turn();
            debug!(width = grid.width(), height = grid.height(), "carved both ways");
        }
        while grid.width() > newwidth {
            grid.remove_vertical_seam()?;
            debug!(width = grid.width(), height = grid.height(), "carved width");
        }
        while grid.height() > newheight {
            grid.remove_horizontal_seam()?;
            debug!(width = grid.width(), height = grid.height(), "carved height");
        }

        info!(
            from_width = width,
            from_height = height,
            width = grid.width(),
            height = grid.height(),
            seams = grid.history_len(),
            "carved image"
        );
        Ok(grid)
    }
}

/// Carve an image to the given size and return the result's colors.
pub fn seamcarve<I, P>(image: &I, newwidth: u32, newheight: u32) -> Result<RgbImage, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    Ok(SeamCarver::new(image).carve(newwidth, newheight)?.render())
}
