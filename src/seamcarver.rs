// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main engine
//!
//! A `SeamCarver` holds one resize job: the source image, its greyscale
//! and protection mask, and the requested width.  `carve()` runs the
//! reduction loop to completion and hands back a `Carving`, from which
//! the shrunk or grown image, the projected mask and the seam overlay
//! are all produced.  Growing replays the seams found while shrinking,
//! so there is no way to ask for output before the loop has finished.

use crate::cost::calculate_cost;
use crate::energy::calculate_energy;
use crate::error::CarveError;
use crate::indexmap::IndexMap;
use crate::luma::{build_luma, greyscale};
use crate::mask::{empty_mask, project_mask, Mask};
use crate::replay::{replay_image, ColumnPlan, Resize};
use crate::seam::{trace_seam, Seam};
use crate::twodmap::TwoDimensionalMap;
use crate::weights::RgbWeights;
use image::{GenericImageView, ImageBuffer, Pixel};
use log::{debug, info, trace};

/// The image type every output of the carver comes back as.
pub type Carved<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// A struct for holding the image to be carved.
pub struct SeamCarver<'a, I>
where
    I: GenericImageView,
{
    image: &'a I,
    greyscale: TwoDimensionalMap<u32>,
    mask: Mask,
    target_width: u32,
    num_seams: u32,
    mode: Resize,
}

impl<'a, I> SeamCarver<'a, I>
where
    I: GenericImageView,
    I::Pixel: 'static,
    <I::Pixel as Pixel>::Subpixel: 'static,
{
    /// Prepare to resize `image` to `target_width` columns.
    ///
    /// Fails if the image is smaller than 2x2, if the width would change
    /// by more than half, if the weights have no divisor, or if a mask
    /// is given that does not match the image.  Nothing is computed
    /// until those checks pass.
    pub fn new(
        image: &'a I,
        target_width: u32,
        weights: &RgbWeights,
        mask: Option<Mask>,
    ) -> Result<Self, CarveError> {
        let (width, height) = image.dimensions();
        if width < 2 || height < 2 {
            return Err(CarveError::TooSmall { width, height });
        }

        let num_seams = if target_width > width {
            target_width - width
        } else {
            width - target_width
        };
        if num_seams > width / 2 {
            return Err(CarveError::TooManySeams {
                requested: num_seams,
                allowed: width / 2,
            });
        }

        weights.validate()?;

        if let Some(ref mask) = mask {
            if mask.dimensions() != (width, height) {
                return Err(CarveError::MaskMismatch {
                    mask_width: mask.width(),
                    mask_height: mask.height(),
                    width,
                    height,
                });
            }
        }

        let mode = Resize::between(width, target_width);
        info!(
            "seam carving: {}x{} -> {}x{} ({:?}, {} seams)",
            width, height, target_width, height, mode, num_seams
        );

        Ok(SeamCarver {
            image,
            greyscale: greyscale(image, weights),
            mask: mask.unwrap_or_else(|| empty_mask(width, height)),
            target_width,
            num_seams,
            mode,
        })
    }

    pub fn num_seams(&self) -> u32 {
        self.num_seams
    }

    pub fn mode(&self) -> Resize {
        self.mode
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    // Each pass rebuilds every grid from the index map at the current
    // working width.  Only half the image can ever be removed, so the
    // working width never drops below one column.

    /// Run the reduction loop to completion: remove `num_seams` seams,
    /// recording each one.
    pub fn carve(&self) -> Carving<'_, 'a, I> {
        let (width, height) = self.image.dimensions();
        let final_width = width - self.num_seams;

        let mut indices = IndexMap::new(width, height);
        let mut seams = Vec::with_capacity(self.num_seams as usize);
        let mut removed_columns = Vec::with_capacity(self.num_seams as usize);

        while indices.width() > final_width {
            let luma = build_luma(&indices, &self.greyscale, &self.mask);
            trace!("luma map rebuilt at width {}", luma.width());
            let energy = calculate_energy(&luma);
            let cost = calculate_cost(&energy, &luma);
            let seam = trace_seam(&cost);
            debug!(
                "seam {}/{}: bottom column {}",
                seams.len() + 1,
                self.num_seams,
                seam.last().cloned().unwrap_or(0)
            );

            removed_columns.push(indices.original_columns(&seam));
            indices.remove_seam(&seam);
            seams.push(seam);
        }
        debug_assert!(indices.is_consistent(width));

        info!("seam carving: removed {} seams", seams.len());
        Carving {
            carver: self,
            indices,
            seams,
            removed_columns,
        }
    }

    /// Produce the resized image.
    pub fn resize(&self) -> Carved<I::Pixel> {
        self.carve().image()
    }

    /// Produce the protection mask as it lands in the resized image.
    pub fn carve_mask(&self) -> Mask {
        self.carve().mask()
    }

    /// Produce a copy of the original with the `num_seams` cheapest
    /// seams painted over it in `color`.
    pub fn show_seams(&self, color: I::Pixel) -> Carved<I::Pixel> {
        self.carve().seams_image(color)
    }
}

/// The outcome of a completed reduction loop.
pub struct Carving<'c, 'a, I>
where
    I: GenericImageView,
{
    carver: &'c SeamCarver<'a, I>,
    indices: IndexMap,
    seams: Vec<Seam>,
    removed_columns: Vec<Seam>,
}

impl<'c, 'a, I> Carving<'c, 'a, I>
where
    I: GenericImageView,
    I::Pixel: 'static,
    <I::Pixel as Pixel>::Subpixel: 'static,
{
    /// The final index map: for every row, the source columns that
    /// survived the reduction.
    pub fn indices(&self) -> &IndexMap {
        &self.indices
    }

    /// Every removed seam in removal order, in the working coordinates
    /// it was traced in.
    pub fn seams(&self) -> &[Seam] {
        &self.seams
    }

    /// The same seams, translated to source columns.
    pub fn removed_columns(&self) -> &[Seam] {
        &self.removed_columns
    }

    fn plan(&self) -> ColumnPlan {
        ColumnPlan::new(&self.indices, self.carver.image.width(), self.carver.mode)
    }

    /// The resized image: exactly `target_width` columns wide and as
    /// tall as the source.
    pub fn image(&self) -> Carved<I::Pixel> {
        let out = replay_image(self.carver.image, &self.plan());
        debug_assert_eq!(out.width(), self.carver.target_width);
        out
    }

    /// The protection mask, carried through the same column decisions
    /// as [`image`](Carving::image).
    pub fn mask(&self) -> Mask {
        project_mask(&self.plan(), &self.carver.mask)
    }

    fn paint(&self, seams: &[Seam], color: I::Pixel) -> Carved<I::Pixel> {
        let image = self.carver.image;
        let mut out = ImageBuffer::new(image.width(), image.height());
        for (x, y, pixel) in image.pixels() {
            out.put_pixel(x, y, pixel);
        }
        for seam in seams {
            for (y, &x) in seam.iter().enumerate() {
                out.put_pixel(x, y as u32, color);
            }
        }
        out
    }

    /// A copy of the original image with every seam of the history
    /// painted in `color`, at the positions it was traced at.
    pub fn seams_image(&self, color: I::Pixel) -> Carved<I::Pixel> {
        self.paint(&self.seams, color)
    }

    /// A copy of the original image with the pixels each seam actually
    /// removed painted in `color`.
    pub fn removed_columns_image(&self, color: I::Pixel) -> Carved<I::Pixel> {
        self.paint(&self.removed_columns, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seam::is_connected;
    use image::{Rgb, RgbImage};

    fn uniform(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |_, _| Rgb([100, 100, 100]))
    }

    // Distinct, non-uniform columns so that every column in the output
    // can be traced back to its source.
    fn ramp(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = ((x * 37 + y * 11) % 251) as u8;
            Rgb([v, v.wrapping_mul(3), 255 - v])
        })
    }

    fn carver_for(img: &RgbImage, target: u32) -> SeamCarver<'_, RgbImage> {
        SeamCarver::new(img, target, &RgbWeights::default(), None).unwrap()
    }

    #[test]
    fn uniform_image_loses_one_seam() {
        let img = uniform(4, 3);
        let carver = carver_for(&img, 3);
        assert_eq!(carver.num_seams(), 1);
        assert_eq!(carver.mode(), Resize::Shrink);

        let carving = carver.carve();
        assert_eq!(carving.seams(), &[vec![3, 2, 1]]);
        let out = carving.image();
        assert_eq!(out.dimensions(), (3, 3));
        assert!(out.pixels().all(|p| *p == Rgb([100, 100, 100])));
    }

    #[test]
    fn the_first_seam_avoids_a_bright_column() {
        let img = RgbImage::from_fn(6, 2, |x, _| {
            if x == 3 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let carver = carver_for(&img, 5);
        let carving = carver.carve();
        assert_eq!(carving.seams().len(), 1);
        assert!(carving.removed_columns()[0].iter().all(|&x| x != 3));
        let out = carving.image();
        assert_eq!(out.width(), 5);
        for y in 0..2 {
            let bright = (0..5).filter(|&x| out.get_pixel(x, y)[0] == 255).count();
            assert_eq!(bright, 1);
        }
    }

    #[test]
    fn growing_duplicates_the_seams_a_shrink_would_remove() {
        let img = ramp(4, 3);
        let grow = carver_for(&img, 6);
        assert_eq!(grow.mode(), Resize::Grow);
        let shrink = carver_for(&img, 2);

        let grown = grow.carve();
        let shrunk = shrink.carve();
        assert_eq!(grown.indices(), shrunk.indices());
        assert_eq!(grown.seams(), shrunk.seams());

        let out = grown.image();
        assert_eq!(out.dimensions(), (6, 3));
        for y in 0..3u32 {
            let survivors = shrunk.indices().row(y);
            let mut expected = Vec::new();
            for x in 0..4 {
                expected.push(*img.get_pixel(x, y));
                if !survivors.contains(&x) {
                    expected.push(*img.get_pixel(x, y));
                }
            }
            let actual: Vec<_> = (0..6).map(|x| *out.get_pixel(x, y)).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn unchanged_width_returns_a_copy() {
        let img = ramp(5, 4);
        let carver = carver_for(&img, 5);
        assert_eq!(carver.mode(), Resize::Unchanged);
        let carving = carver.carve();
        assert!(carving.seams().is_empty());
        let out = carving.image();
        assert_eq!(out.dimensions(), img.dimensions());
        assert_eq!(out.as_raw(), img.as_raw());
        let painted = carver.show_seams(Rgb([255, 0, 0]));
        assert_eq!(painted.as_raw(), img.as_raw());
    }

    #[test]
    fn too_many_seams_is_refused() {
        let img = uniform(4, 3);
        let err = SeamCarver::new(&img, 1, &RgbWeights::default(), None).err();
        assert_eq!(
            err,
            Some(CarveError::TooManySeams {
                requested: 3,
                allowed: 2
            })
        );
        assert!(SeamCarver::new(&img, 7, &RgbWeights::default(), None).is_err());
    }

    #[test]
    fn tiny_images_are_refused() {
        let img = uniform(1, 5);
        assert_eq!(
            SeamCarver::new(&img, 1, &RgbWeights::default(), None).err(),
            Some(CarveError::TooSmall {
                width: 1,
                height: 5
            })
        );
        let img = uniform(5, 1);
        assert!(SeamCarver::new(&img, 4, &RgbWeights::default(), None).is_err());
    }

    #[test]
    fn bad_configuration_is_refused() {
        let img = uniform(4, 3);
        let zero = RgbWeights::with_divisor(1, 1, 1, 0);
        assert_eq!(
            SeamCarver::new(&img, 3, &zero, None).err(),
            Some(CarveError::ZeroDivisor)
        );
        let mask = empty_mask(3, 3);
        assert!(match SeamCarver::new(&img, 3, &RgbWeights::default(), Some(mask)) {
            Err(CarveError::MaskMismatch { mask_width: 3, .. }) => true,
            _ => false,
        });
    }

    #[test]
    fn every_removal_keeps_the_index_map_sound() {
        let img = ramp(12, 7);
        let carver = carver_for(&img, 6);
        let carving = carver.carve();
        assert_eq!(carving.seams().len(), 6);
        assert_eq!(carving.indices().width(), 6);
        assert!(carving.indices().is_consistent(12));

        let mut replay = IndexMap::new(12, 7);
        for (n, seam) in carving.seams().iter().enumerate() {
            assert_eq!(seam.len(), 7);
            assert!(is_connected(seam));
            assert!(seam.iter().all(|&x| x < 12 - n as u32));
            assert_eq!(&replay.original_columns(seam), &carving.removed_columns()[n]);
            replay.remove_seam(seam);
            assert!(replay.is_consistent(12));
            assert_eq!(replay.width(), 12 - n as u32 - 1);
        }
        assert_eq!(&replay, carving.indices());
    }

    #[test]
    fn protected_columns_are_never_carved() {
        let img = ramp(10, 6);
        let mask = Mask::from_fn(10, 6, |x, _| x == 4 || x == 5);
        let carver = SeamCarver::new(&img, 7, &RgbWeights::default(), Some(mask.clone())).unwrap();
        let carving = carver.carve();
        for seam in carving.removed_columns() {
            for (y, &x) in seam.iter().enumerate() {
                assert!(!mask[(x, y as u32)], "seam crossed a protected pixel");
            }
        }

        let projected = carving.mask();
        assert_eq!(projected.dimensions(), (7, 6));
        for y in 0..6 {
            assert_eq!(projected.row(y).iter().filter(|&&b| b).count(), 2);
        }
    }

    #[test]
    fn projected_mask_matches_the_source_column() {
        let img = ramp(8, 4);
        let mask = Mask::from_fn(8, 4, |x, y| (x + y) % 3 == 0);
        for &target in &[5, 8, 12] {
            let carver =
                SeamCarver::new(&img, target, &RgbWeights::default(), Some(mask.clone())).unwrap();
            let carving = carver.carve();
            let projected = carving.mask();
            let plan = carving.plan();
            assert_eq!(projected.dimensions(), (target, 4));
            for y in 0..4 {
                for x in 0..target {
                    assert_eq!(projected[(x, y)], mask[(plan.source_column(x, y), y)]);
                }
            }
        }
    }

    #[test]
    fn seams_are_painted_on_the_original() {
        let img = ramp(6, 4);
        let red = Rgb([255, 0, 0]);
        let carver = carver_for(&img, 4);
        let carving = carver.carve();
        let painted = carving.seams_image(red);
        assert_eq!(painted.dimensions(), (6, 4));
        for y in 0..4u32 {
            for x in 0..6u32 {
                let on_seam = carving.seams().iter().any(|seam| seam[y as usize] == x);
                let expected = if on_seam { red } else { *img.get_pixel(x, y) };
                assert_eq!(*painted.get_pixel(x, y), expected);
            }
        }
    }

    #[test]
    fn overlay_paints_traced_positions_not_source_columns() {
        // Two seams on a uniform 4x3 image: traced at [3,2,1] and
        // [2,1,1], which remove source columns [3,2,1] and [2,1,2].
        let img = uniform(4, 3);
        let red = Rgb([255, 0, 0]);
        let carver = carver_for(&img, 2);
        let carving = carver.carve();
        assert_eq!(carving.seams(), &[vec![3, 2, 1], vec![2, 1, 1]][..]);
        assert_eq!(carving.removed_columns(), &[vec![3, 2, 1], vec![2, 1, 2]][..]);

        let traced = carving.seams_image(red);
        assert_eq!(*traced.get_pixel(1, 2), red);
        assert_eq!(*traced.get_pixel(2, 2), *img.get_pixel(2, 2));

        let removed = carving.removed_columns_image(red);
        assert_eq!(*removed.get_pixel(1, 2), red);
        assert_eq!(*removed.get_pixel(2, 2), red);
    }

    #[test]
    fn show_seams_matches_the_traced_overlay() {
        let img = ramp(6, 4);
        let red = Rgb([255, 0, 0]);
        let carver = carver_for(&img, 3);
        let carving = carver.carve();
        assert_eq!(
            carver.show_seams(red).as_raw(),
            carving.seams_image(red).as_raw()
        );
    }

    #[test]
    fn widths_are_conserved() {
        let img = ramp(10, 3);
        for &target in &[5, 7, 10, 13, 15] {
            let carver = carver_for(&img, target);
            assert_eq!(carver.resize().dimensions(), (target, 3));
            assert_eq!(carver.carve_mask().dimensions(), (target, 3));
        }
    }
}
