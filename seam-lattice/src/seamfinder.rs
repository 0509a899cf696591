// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the seams of a lattice
//!
//! The classic dynamic-programming sweep.  Every node of the first line
//! starts a seam weighted by its own energy; every node of each later
//! line extends the cheapest of the (up to) three seams ending beside
//! it on the line before:
//!
//! ```text
//!           ⎧ M(back.low)
//! M(n) = min⎨ M(back)         + e(n)
//!           ⎩ M(back.high)
//! ```
//!
//! Candidates on the border are skipped, and among equal weights the
//! first candidate in the order above wins.  The weights and the
//! back-pointers live in the lattice's path arena, so the chain of any
//! terminus can be walked back to its origin after the sweep.

use crate::carve::Carve;
use crate::lattice::Lattice;
use crate::node::{NodeId, Path};
use tracing::trace;

/// This trait defines how seams are requested from a lattice.  Every
/// call starts over from the current energies.
pub trait SeamFinder {
    /// The seams ending on the bottom row, one per column, left to
    /// right.
    fn find_vertical_seams(&mut self) -> Vec<Path>;

    /// The seams ending on the right column, one per row, top to
    /// bottom.
    fn find_horizontal_seams(&mut self) -> Vec<Path>;

    fn find_seams(&mut self, carve: Carve) -> Vec<Path> {
        match carve {
            Carve::Vertical => self.find_vertical_seams(),
            Carve::Horizontal => self.find_horizontal_seams(),
        }
    }
}

impl SeamFinder for Lattice {
    fn find_vertical_seams(&mut self) -> Vec<Path> {
        sweep(self, Carve::Vertical)
    }

    fn find_horizontal_seams(&mut self) -> Vec<Path> {
        sweep(self, Carve::Horizontal)
    }
}

// Of the three nodes a seam through `id` may have come from, the one
// with the lightest seam.  None on the first line.
fn cheapest_parent(lattice: &Lattice, id: NodeId, carve: Carve) -> Option<NodeId> {
    let back = lattice.link(id, carve.back());
    let candidates = [
        lattice.link(back, carve.low()),
        back,
        lattice.link(back, carve.high()),
    ];
    candidates
        .iter()
        .copied()
        .filter(|&candidate| !lattice.is_border(candidate))
        .fold(None, |best, candidate| match best {
            Some(best) if lattice.weight(best) <= lattice.weight(candidate) => Some(best),
            _ => Some(candidate),
        })
}

fn sweep(lattice: &mut Lattice, carve: Carve) -> Vec<Path> {
    lattice.reset_paths();
    let lines: Vec<Vec<NodeId>> = lattice.lines(carve).map(|line| line.collect()).collect();

    // The first line keeps the paths the reset gave it.
    for line in lines.iter().skip(1) {
        for &id in line {
            if let Some(parent) = cheapest_parent(lattice, id, carve) {
                let weight = lattice.weight(parent) + lattice.energy(id);
                lattice.set_path(Path {
                    node: id,
                    weight,
                    predecessor: Some(parent),
                });
            }
        }
    }

    let termini: Vec<Path> = lines
        .last()
        .map(|line| {
            line.iter()
                .filter_map(|&id| lattice.path(id).copied())
                .collect()
        })
        .unwrap_or_default();
    trace!(
        orientation = %carve,
        lines = lines.len(),
        termini = termini.len(),
        "swept lattice for seams"
    );
    termini
}

/// The lightest seam among `termini`; the first one wins a tie.
pub fn minimum_terminus(termini: &[Path]) -> Option<Path> {
    termini.iter().copied().fold(None, |best, path| match best {
        Some(best) if best.weight <= path.weight => Some(best),
        _ => Some(path),
    })
}

impl Lattice {
    /// The nodes of the seam ending at `terminus`, terminus first,
    /// following the back-pointers of the most recent search.
    pub fn chain(&self, terminus: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut cursor = self.path(terminus);
        while let Some(path) = cursor {
            // A cycle means a corrupted path arena; stop rather than spin.
            if chain.len() > self.width() * self.height() {
                break;
            }
            chain.push(path.node);
            cursor = path.predecessor.and_then(|previous| self.path(previous));
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn three_by_three() -> Lattice {
        Lattice::from_rows(vec![
            vec![RED, BLUE, BLACK],
            vec![YELLOW, GREEN, ORANGE],
            vec![MAGENTA, GRAY, WHITE],
        ])
        .unwrap()
    }

    fn weights(paths: &[Path]) -> Vec<f64> {
        paths.iter().map(|path| path.weight).collect()
    }

    fn close(actual: &[f64], expected: &[f64]) -> bool {
        actual.len() == expected.len()
            && actual
                .iter()
                .zip(expected.iter())
                .all(|(a, e)| (a - e).abs() < 0.001)
    }

    #[test]
    fn vertical_sweep_of_a_small_lattice() {
        let mut lattice = three_by_three();
        let seams = lattice.find_vertical_seams();
        assert!(close(&weights(&seams), &[5.635, 5.516, 5.525]));
        assert_eq!(seams.iter().map(|p| p.node).collect::<Vec<_>>(), vec![7, 8, 9]);
        let least = minimum_terminus(&seams).unwrap();
        assert_eq!(least.node, 8);
    }

    #[test]
    fn horizontal_sweep_of_a_small_lattice() {
        let mut lattice = three_by_three();
        let seams = lattice.find_horizontal_seams();
        assert!(close(&weights(&seams), &[5.217, 6.033, 5.422]));
        assert_eq!(seams.iter().map(|p| p.node).collect::<Vec<_>>(), vec![3, 6, 9]);
        assert_eq!(minimum_terminus(&seams).unwrap().node, 3);
    }

    #[test]
    fn green_follows_the_cheapest_seam_above() {
        let mut lattice = three_by_three();
        lattice.find_vertical_seams();
        // Blue (2.065) is straight above, but black (1.822) up and to
        // the right is lighter than red (1.944) up and to the left.
        assert_eq!(lattice.path(5).unwrap().predecessor, Some(3));
    }

    #[test]
    fn chains_reach_back_to_the_first_line() {
        let mut lattice = three_by_three();
        let seams = lattice.find_vertical_seams();
        for seam in seams {
            let chain = lattice.chain(seam.node);
            assert_eq!(chain.len(), 3);
            assert_eq!(chain[0], seam.node);
            assert!(lattice.is_border(lattice.link(chain[2], Carve::Vertical.back())));
            let total: f64 = chain.iter().map(|&id| lattice.energy(id)).sum();
            assert!((total - seam.weight).abs() < 1e-9);
        }
    }

    #[test]
    fn each_sweep_starts_from_scratch() {
        let mut lattice = three_by_three();
        let first = lattice.find_vertical_seams();
        lattice.find_horizontal_seams();
        assert_eq!(lattice.find_vertical_seams(), first);
    }

    #[test]
    fn ties_go_to_the_low_side() {
        // Red and blue carry exactly the same energy, so yellow's seam
        // could come from either; up and to the left wins.
        let mut lattice =
            Lattice::from_rows(vec![vec![RED, BLUE], vec![BLACK, YELLOW]]).unwrap();
        let seams = lattice.find_vertical_seams();
        assert_eq!(lattice.energy(1), lattice.energy(2));
        assert_eq!(seams[0].predecessor, Some(1));
        assert_eq!(seams[1].predecessor, Some(1));
        assert!(close(&weights(&seams), &[3.434, 2.545]));
    }

    #[test]
    fn horizontal_ties_go_to_the_low_side() {
        // Transposed: red and black tie as the seams enter the second
        // column, and the one up and to the left wins.
        let mut lattice =
            Lattice::from_rows(vec![vec![RED, BLACK], vec![BLUE, YELLOW]]).unwrap();
        let seams = lattice.find_horizontal_seams();
        assert_eq!(lattice.energy(1), lattice.energy(3));
        assert_eq!(seams[1].predecessor, Some(1));
    }

    #[test]
    fn thin_lattices_have_one_trivial_seam() {
        let mut column = Lattice::new(1, 3, vec![RED, GREEN, BLUE]).unwrap();
        let seams = column.find_vertical_seams();
        assert_eq!(seams.len(), 1);
        assert_eq!(column.chain(seams[0].node), vec![3, 2, 1]);

        let mut row = Lattice::new(3, 1, vec![RED, GREEN, BLUE]).unwrap();
        let seams = row.find_horizontal_seams();
        assert_eq!(seams.len(), 1);
        assert_eq!(row.chain(seams[0].node), vec![3, 2, 1]);
    }

    #[test]
    fn no_termini_means_no_minimum() {
        assert_eq!(minimum_terminus(&[]), None);
    }
}
