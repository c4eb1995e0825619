// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Protection masks, and carrying them through a resize.

use crate::luma::pixel_luma;
use crate::replay::ColumnPlan;
use crate::twodmap::TwoDimensionalMap;
use crate::weights::RgbWeights;
use image::{GenericImageView, Pixel};

/// `true` marks a pixel no seam should be allowed to pass through.
pub type Mask = TwoDimensionalMap<bool>;

/// A mask that protects nothing.
pub fn empty_mask(width: u32, height: u32) -> Mask {
    Mask::new(width, height)
}

/// Read a mask out of an image: every pixel brighter than `threshold`
/// is protected.
pub fn mask_from_image<I>(image: &I, threshold: u32) -> Mask
where
    I: GenericImageView,
    I::Pixel: 'static,
    <I::Pixel as Pixel>::Subpixel: 'static,
{
    let weights = RgbWeights::default();
    let (width, height) = image.dimensions();
    Mask::from_fn(width, height, |x, y| {
        pixel_luma(&image.get_pixel(x, y), &weights) > threshold
    })
}

/// Carry the mask through the same column decisions as the pixels: a
/// surviving column keeps its bit, a duplicated column duplicates it.
pub fn project_mask(plan: &ColumnPlan, source: &Mask) -> Mask {
    assert_eq!(plan.height(), source.height(), "mask and plan disagree in height");
    Mask::from_fn(plan.width(), plan.height(), |x, y| {
        source[(plan.source_column(x, y), y)]
    })
}
