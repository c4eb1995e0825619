// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Greyscale maps.
//!
//! The source image is reduced to a single intensity channel exactly
//! once per job.  After that, every iteration of the carver builds its
//! working luma map by looking columns up through the index map, so the
//! image itself is never rewritten.

use crate::cq;
use crate::indexmap::IndexMap;
use crate::mask::Mask;
use crate::parallel::fill_rows;
use crate::twodmap::TwoDimensionalMap;
use crate::weights::RgbWeights;
use image::{GenericImageView, Pixel, Primitive};

/// The intensity written into protected cells: the largest value the
/// map can hold, so the gradient into and out of a protected region is
/// a cliff no cheap seam will cross.
pub const PROTECTED_LUMA: u32 = u32::MAX;

#[inline]
fn channel<S: Primitive>(c: S) -> u32 {
    num_traits::cast::<S, u32>(c).unwrap_or(0)
}

/// (Pixel) -> Luma
#[inline]
pub fn pixel_luma<P>(pixel: &P, weights: &RgbWeights) -> u32
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    let rgb = pixel.to_rgb();
    let c = rgb.channels();
    weights.luma(channel(c[0]), channel(c[1]), channel(c[2]))
}

/// Compute the weighted greyscale of every pixel of an image.  The
/// weights must already have been validated.
pub fn greyscale<I>(image: &I, weights: &RgbWeights) -> TwoDimensionalMap<u32>
where
    I: GenericImageView,
    I::Pixel: 'static,
    <I::Pixel as Pixel>::Subpixel: 'static,
{
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| {
        pixel_luma(&image.get_pixel(x, y), weights)
    })
}

/// Project the source greyscale through the index map, giving the luma
/// of the current working image.  Columns the mask protects read as
/// [`PROTECTED_LUMA`].
///
/// Panics if the index map names a column outside the source.
pub fn build_luma(
    indices: &IndexMap,
    source: &TwoDimensionalMap<u32>,
    mask: &Mask,
) -> TwoDimensionalMap<u32> {
    let mut luma = TwoDimensionalMap::new(indices.width(), indices.height());
    fill_rows(&mut luma, |y, row| {
        let (source_row, mask_row) = (source.row(y), mask.row(y));
        for (cell, &x) in row.iter_mut().zip(indices.row(y)) {
            let x = x as usize;
            *cell = cq!(mask_row[x], PROTECTED_LUMA, source_row[x]);
        }
    });
    luma
}
