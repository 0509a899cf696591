//! Property-based invariant tests for the pixel lattice.
//!
//! For any rectangle of colors and any sequence of carves:
//!
//! 1. A freshly built lattice is well formed.
//! 2. Every removal that succeeds leaves it well formed and one seam smaller.
//! 3. Removals fail only on a lattice one pixel across, and change nothing.
//! 4. Undoing every removal restores colors and links exactly.
//! 5. The removed seam is never heavier than any other terminus.
//! 6. The border keeps energy and weight -1 and is never a terminus.
//! 7. Stored energies always match a fresh calculation.

use image::Rgb;
use proptest::prelude::*;
use seam_lattice::energy::energy_at;
use seam_lattice::surgery::remove_seam;
use seam_lattice::{minimum_terminus, Carve, Grid, Lattice, SeamError, SeamFinder, BORDER};

// ── Helpers ─────────────────────────────────────────────────────────────

fn color() -> impl Strategy<Value = Rgb<u8>> {
    any::<[u8; 3]>().prop_map(Rgb)
}

fn picture() -> impl Strategy<Value = (usize, usize, Vec<Rgb<u8>>)> {
    (1usize..8, 1usize..8).prop_flat_map(|(width, height)| {
        proptest::collection::vec(color(), width * height)
            .prop_map(move |colors| (width, height, colors))
    })
}

fn carves() -> impl Strategy<Value = Vec<Carve>> {
    proptest::collection::vec(
        prop_oneof![Just(Carve::Vertical), Just(Carve::Horizontal)],
        0..12,
    )
}

fn snapshot(lattice: &Lattice) -> Vec<(usize, Rgb<u8>, seam_lattice::node::Links)> {
    lattice
        .nodes()
        .map(|id| (id, lattice.color(id), lattice.links(id)))
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Construction
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn built_lattices_are_well_formed((width, height, colors) in picture()) {
        let grid = Grid::new(width, height, colors.clone()).unwrap();
        prop_assert!(grid.is_well_formed());
        prop_assert_eq!((grid.width(), grid.height()), (width, height));
        let flat: Vec<Rgb<u8>> = grid.colors().into_iter().flatten().collect();
        prop_assert_eq!(flat, colors);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2 & 3. Removal keeps the lattice whole and shrinks it by one
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn removals_shrink_and_stay_well_formed(
        (width, height, colors) in picture(),
        carves in carves(),
    ) {
        let mut grid = Grid::new(width, height, colors).unwrap();
        for carve in carves {
            let (w, h) = (grid.width(), grid.height());
            let before = grid.colors();
            match grid.remove_seam(carve) {
                Ok(()) => {
                    prop_assert!(grid.is_well_formed());
                    match carve {
                        Carve::Vertical => {
                            prop_assert_eq!((grid.width(), grid.height()), (w - 1, h));
                        }
                        Carve::Horizontal => {
                            prop_assert_eq!((grid.width(), grid.height()), (w, h - 1));
                        }
                    }
                }
                Err(err) => {
                    prop_assert_eq!(err, SeamError::NothingToRemove { carve });
                    prop_assert_eq!(grid.lattice().extent(carve), 1);
                    prop_assert_eq!(grid.colors(), before);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn undo_restores_colors_and_links(
        (width, height, colors) in picture(),
        carves in carves(),
    ) {
        let mut grid = Grid::new(width, height, colors).unwrap();
        let original = snapshot(grid.lattice());
        let start = grid.lattice().start();

        let mut removed = 0;
        for carve in carves {
            if grid.remove_seam(carve).is_ok() {
                removed += 1;
            }
        }
        prop_assert_eq!(grid.history_len(), removed);

        for _ in 0..removed {
            grid.undo_last_removal().unwrap();
            prop_assert!(grid.is_well_formed());
        }
        prop_assert_eq!(grid.undo_last_removal(), Err(SeamError::EmptyHistory));
        prop_assert_eq!(grid.lattice().start(), start);
        prop_assert_eq!((grid.width(), grid.height()), (width, height));
        prop_assert_eq!(snapshot(grid.lattice()), original);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Minimality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn removed_seam_is_the_lightest(
        (width, height, colors) in picture(),
        vertical in any::<bool>(),
    ) {
        let carve = if vertical { Carve::Vertical } else { Carve::Horizontal };
        let mut lattice = Lattice::new(width, height, colors).unwrap();
        prop_assume!(lattice.extent(carve) > 1);

        let termini = lattice.find_seams(carve);
        prop_assert_eq!(termini.len(), lattice.extent(carve));
        let lightest = minimum_terminus(&termini).unwrap();
        let seam = remove_seam(&mut lattice, carve, lightest.node).unwrap();

        prop_assert_eq!(seam.len(), lattice.span(carve));
        for path in &termini {
            prop_assert!(seam.weight <= path.weight);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6 & 7. Border and energies
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn border_stays_out_of_every_search(
        (width, height, colors) in picture(),
        carves in carves(),
    ) {
        let mut grid = Grid::new(width, height, colors).unwrap();
        for carve in carves {
            let _ = grid.remove_seam(carve);
            for path in grid.find_seams(carve.turn()) {
                prop_assert_ne!(path.node, BORDER);
                prop_assert!(path.weight >= 0.0);
            }
            let lattice = grid.lattice();
            prop_assert_eq!(lattice.energy(BORDER), -1.0);
            prop_assert_eq!(lattice.weight(BORDER), -1.0);
        }
    }
}

proptest! {
    #[test]
    fn stored_energy_matches_a_fresh_calculation(
        (width, height, colors) in picture(),
        carves in carves(),
    ) {
        let mut grid = Grid::new(width, height, colors).unwrap();
        for carve in carves {
            let _ = grid.remove_seam(carve);
        }
        let lattice = grid.lattice();
        for id in lattice.nodes() {
            prop_assert_eq!(lattice.energy(id), energy_at(lattice, id));
        }
    }
}
