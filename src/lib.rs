// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware width resizing.
//!
//! Narrows or widens an image by repeatedly finding the vertical seam
//! of least forward energy and removing it, optionally steering around
//! pixels a protection mask marks as important.  Widening duplicates
//! the seams a narrowing of the same size would have removed.
//!
//! ```no_run
//! use image::Rgb;
//! use pnmseam::{RgbWeights, SeamCarver};
//!
//! let img = image::open("in.png").unwrap().to_rgb();
//! let carver = SeamCarver::new(&img, img.width() - 40, &RgbWeights::default(), None).unwrap();
//! let carving = carver.carve();
//! carving.image().save("out.png").unwrap();
//! carving.seams_image(Rgb([255, 0, 0])).save("seams.png").unwrap();
//! ```

// #![deny(missing_docs)]

mod ternary;

pub mod cost;
pub mod energy;
pub mod error;
pub mod indexmap;
pub mod luma;
pub mod mask;
mod parallel;
pub mod replay;
pub mod seam;
pub mod seamcarver;
pub mod twodmap;
pub mod weights;

pub use error::CarveError;
pub use indexmap::IndexMap;
pub use mask::{empty_mask, mask_from_image, Mask};
pub use replay::Resize;
pub use seam::Seam;
pub use seamcarver::{Carved, Carving, SeamCarver};
pub use twodmap::TwoDimensionalMap;
pub use weights::RgbWeights;
