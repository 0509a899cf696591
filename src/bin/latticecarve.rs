// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate image;

use clap::{value_t, App, Arg, ArgMatches};
use image::GenericImageView;
use latticecarve::{Carve, SeamCarver};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, PartialEq, Copy, Clone)]
enum Render {
    Color,
    Energy,
    Seams(Carve),
}

#[derive(Debug)]
struct Settings {
    input: String,
    output: String,
    width: Option<u32>,
    height: Option<u32>,
    render: Render,
    reinsert: usize,
    highlight: bool,
}

impl Settings {
    fn from_matches(matches: &ArgMatches) -> Result<Self, failure::Error> {
        let dimension = |name: &str| -> Result<Option<u32>, clap::Error> {
            match matches.value_of(name) {
                Some(_) => value_t!(matches, name, u32).map(Some),
                None => Ok(None),
            }
        };
        let orientation = match matches.value_of("orientation") {
            Some("horizontal") => Carve::Horizontal,
            _ => Carve::Vertical,
        };
        let render = match matches.value_of("render") {
            Some("energy") => Render::Energy,
            Some("seams") => Render::Seams(orientation),
            _ => Render::Color,
        };
        Ok(Settings {
            input: matches.value_of("input").unwrap_or_default().to_string(),
            output: matches.value_of("output").unwrap_or_default().to_string(),
            width: dimension("width")?,
            height: dimension("height")?,
            render,
            reinsert: match matches.value_of("reinsert") {
                Some(_) => value_t!(matches, "reinsert", usize)?,
                None => 0,
            },
            highlight: matches.is_present("highlight"),
        })
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("latticecarve: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), failure::Error> {
    let matches = App::new("latticecarve")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Seam carving on a pixel lattice")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .help("Target width (default: unchanged)"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .help("Target height (default: unchanged)"),
        )
        .arg(
            Arg::with_name("render")
                .long("render")
                .short("r")
                .takes_value(true)
                .possible_values(&["color", "energy", "seams"])
                .default_value("color")
                .help("Which picture of the carved lattice to write"),
        )
        .arg(
            Arg::with_name("orientation")
                .long("orientation")
                .takes_value(true)
                .possible_values(&["vertical", "horizontal"])
                .default_value("vertical")
                .help("Seam orientation shown by --render seams"),
        )
        .arg(
            Arg::with_name("reinsert")
                .long("reinsert")
                .takes_value(true)
                .help("Put the last N carved seams back"),
        )
        .arg(
            Arg::with_name("highlight")
                .long("highlight")
                .help("Leave reinserted seams painted red"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more; repeat for more still"),
        )
        .get_matches();

    let filter = match matches.occurrences_of("verbose") {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let settings = Settings::from_matches(&matches)?;
    let image = image::open(&settings.input)?;
    let (width, height) = image.dimensions();
    info!(input = %settings.input, width, height, "loaded image");

    let mut grid = SeamCarver::new(&image).carve(
        settings.width.unwrap_or(width),
        settings.height.unwrap_or(height),
    )?;

    let reinsert = settings.reinsert.min(grid.history_len());
    for _ in 0..reinsert {
        grid.reinsert_last_seam()?;
    }
    if !settings.highlight {
        grid.restore_seam_colors();
    }
    if reinsert > 0 {
        info!(seams = reinsert, width = grid.width(), height = grid.height(), "reinserted seams");
    }

    match settings.render {
        Render::Color => grid.render().save(&settings.output)?,
        Render::Energy => grid.render_energy().save(&settings.output)?,
        Render::Seams(carve) => {
            grid.find_seams(carve);
            grid.render_seams().save(&settings.output)?
        }
    }
    info!(output = %settings.output, render = ?settings.render, "saved image");
    Ok(())
}
