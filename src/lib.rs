// #![deny(missing_docs)]

extern crate image;

pub mod seamcarver;
pub use seamcarver::{seamcarve, CarveError, SeamCarver};

pub use seam_lattice::{Carve, Grid, SeamError};
