// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Read-only pictures of a lattice
//!
//! What a display wants to show: the lattice in its current colors,
//! its energy as a grey scale, and the cumulative seam weights of the
//! most recent search.  Nothing here changes the lattice.

use crate::lattice::Lattice;
use crate::node::NodeId;
use image::{GrayImage, ImageBuffer, Luma, Pixel, RgbImage};
use num_traits::{cast, clamp};

// Lay one pixel per live node out in row-major order.
fn project<P, F>(lattice: &Lattice, shade: F) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
    F: Fn(NodeId) -> P,
{
    let mut out = ImageBuffer::new(lattice.width() as u32, lattice.height() as u32);
    for (y, row) in lattice.rows().enumerate() {
        for (x, id) in row.enumerate() {
            out.put_pixel(x as u32, y as u32, shade(id));
        }
    }
    out
}

// Scale to a channel value; NaN and anything out of range end up
// black or white.
fn channel(value: f64) -> u8 {
    cast::<f64, u8>(clamp(value, 0.0, 255.0)).unwrap_or(0)
}

/// The lattice as it currently looks, highlights and all.
pub fn render_colors(lattice: &Lattice) -> RgbImage {
    project(lattice, |id| lattice.color(id))
}

/// Energy as a grey scale, the most energetic node white.  A lattice
/// with no energy at all renders black.
pub fn render_energy(lattice: &Lattice) -> GrayImage {
    let max = lattice.max_energy();
    project(lattice, |id| {
        let level = if max > 0.0 { lattice.energy(id) / max } else { 0.0 };
        Luma([channel((level * 255.0 + 0.5).floor())])
    })
}

/// Cumulative seam weights as a grey scale, the heaviest seam end
/// white.  Shows whichever orientation was searched last.
pub fn render_seams(lattice: &Lattice) -> GrayImage {
    let max = lattice.max_weight();
    let scale = if max > 0.0 { 255.0 / max } else { 0.0 };
    project(lattice, |id| Luma([channel((scale * lattice.weight(id)).trunc())]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seamfinder::SeamFinder;
    use image::Rgb;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
    const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
    const ORANGE: Rgb<u8> = Rgb([255, 200, 0]);
    const MAGENTA: Rgb<u8> = Rgb([255, 0, 255]);
    const GRAY: Rgb<u8> = Rgb([128, 128, 128]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn two_by_two() -> Lattice {
        Lattice::from_rows(vec![vec![RED, BLUE], vec![BLACK, YELLOW]]).unwrap()
    }

    fn three_by_three() -> Lattice {
        Lattice::from_rows(vec![
            vec![RED, BLUE, BLACK],
            vec![YELLOW, GREEN, ORANGE],
            vec![MAGENTA, GRAY, WHITE],
        ])
        .unwrap()
    }

    fn grey(image: &GrayImage) -> Vec<u8> {
        image.pixels().map(|p| p[0]).collect()
    }

    #[test]
    fn colors_come_out_in_place() {
        let lattice = two_by_two();
        let image = render_colors(&lattice);
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(*image.get_pixel(0, 0), RED);
        assert_eq!(*image.get_pixel(1, 0), BLUE);
        assert_eq!(*image.get_pixel(0, 1), BLACK);
        assert_eq!(*image.get_pixel(1, 1), YELLOW);
    }

    #[test]
    fn energy_is_scaled_to_the_brightest() {
        assert_eq!(grey(&render_energy(&two_by_two())), vec![196, 196, 255, 138]);
        assert_eq!(
            grey(&render_energy(&three_by_three())),
            vec![188, 200, 176, 166, 162, 255, 207, 195, 196]
        );
    }

    #[test]
    fn seam_weights_are_scaled_to_the_heaviest() {
        let mut lattice = two_by_two();
        lattice.find_vertical_seams();
        assert_eq!(grey(&render_seams(&lattice)), vec![110, 110, 255, 188]);

        let mut lattice = three_by_three();
        lattice.find_vertical_seams();
        assert_eq!(
            grey(&render_seams(&lattice)),
            vec![87, 93, 82, 165, 158, 201, 255, 249, 250]
        );
    }

    #[test]
    fn flat_lattices_render_black() {
        let lattice = Lattice::new(2, 3, vec![BLACK; 6]).unwrap();
        assert!(grey(&render_energy(&lattice)).iter().all(|&v| v == 0));
        assert!(grey(&render_seams(&lattice)).iter().all(|&v| v == 0));
    }
}
