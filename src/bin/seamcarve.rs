// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use image::Rgb;
use log::{info, LevelFilter};
use pnmseam::{mask_from_image, RgbWeights, SeamCarver};

// Pixels of a mask image brighter than this are protected.
const MASK_THRESHOLD: u32 = 127;

fn parse_color(hex: &str) -> Result<Rgb<u8>, Error> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format_err!("seam color must be RRGGBB, got {:?}", hex));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| format_err!("seam color must be RRGGBB, got {:?}", hex))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();
    let width: u32 = matches
        .value_of("width")
        .unwrap_or_default()
        .parse()
        .map_err(|_| format_err!("--width must be a positive integer"))?;
    let weights = match matches.value_of("weights") {
        Some(w) => w.parse::<RgbWeights>()?,
        None => RgbWeights::default(),
    };

    let image = image::open(input)?.to_rgb();
    info!("loaded {} ({}x{})", input, image.width(), image.height());

    let mask = match matches.value_of("mask") {
        Some(path) => Some(mask_from_image(&image::open(path)?.to_rgb(), MASK_THRESHOLD)),
        None => None,
    };

    let carver = SeamCarver::new(&image, width, &weights, mask)?;
    let carving = carver.carve();

    carving.image().save(output)?;
    info!("wrote {}", output);

    if let Some(path) = matches.value_of("seams") {
        let color = parse_color(matches.value_of("seam-color").unwrap_or("ff0000"))?;
        carving.seams_image(color).save(path)?;
        info!("wrote {}", path);
    }

    if let Some(path) = matches.value_of("mask-out") {
        let mask = carving.mask();
        let img = image::GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
            image::Luma([if mask[(x, y)] { 255 } else { 0 }])
        });
        img.save(path)?;
        info!("wrote {}", path);
    }
    Ok(())
}

fn main() {
    let matches = App::new("seamcarve")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware width resizing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to resize")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the resized image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .takes_value(true)
                .required(true)
                .help("The width of the output image"),
        )
        .arg(
            Arg::with_name("mask")
                .short("m")
                .long("mask")
                .takes_value(true)
                .help("An image of the same size; bright pixels are protected"),
        )
        .arg(
            Arg::with_name("mask-out")
                .long("mask-out")
                .takes_value(true)
                .help("Write the protection mask as it lands in the output"),
        )
        .arg(
            Arg::with_name("seams")
                .short("s")
                .long("seams")
                .takes_value(true)
                .help("Write a copy of the input with the removed seams painted"),
        )
        .arg(
            Arg::with_name("seam-color")
                .long("seam-color")
                .takes_value(true)
                .help("RRGGBB color for --seams (default ff0000)"),
        )
        .arg(
            Arg::with_name("weights")
                .long("weights")
                .takes_value(true)
                .help("Greyscale channel weights, as r,g,b or r,g,b/divisor"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Log more; repeat for more detail"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("seamcarve: {}", err);
        std::process::exit(1);
    }
}
