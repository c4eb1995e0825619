// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Producing output from a finished reduction.
//!
//! Once the carver has narrowed the index map to its final width, both
//! the shrunk and the grown image fall out of a single per-row list of
//! source columns.  Pixels and mask bits are read through the same
//! list, so the two can never drift out of registration.

use crate::indexmap::IndexMap;
use image::{GenericImageView, ImageBuffer, Pixel};
use itertools::iproduct;

/// What a job does to the width of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    Shrink,
    Grow,
    Unchanged,
}

impl Resize {
    pub fn between(source_width: u32, target_width: u32) -> Self {
        if target_width < source_width {
            Resize::Shrink
        } else if target_width > source_width {
            Resize::Grow
        } else {
            Resize::Unchanged
        }
    }
}

/// The source column behind every output column of one row.
///
/// When growing, every source column missing from `surviving` (that
/// is, every column a seam removed) is emitted twice in its place.
pub fn output_columns(surviving: &[u32], source_width: u32, mode: Resize) -> Vec<u32> {
    match mode {
        Resize::Shrink => surviving.to_vec(),
        Resize::Unchanged => (0..source_width).collect(),
        Resize::Grow => {
            let removed = source_width as usize - surviving.len();
            let mut kept = surviving.iter().peekable();
            let mut columns = Vec::with_capacity(source_width as usize + removed);
            for x in 0..source_width {
                if kept.peek() == Some(&&x) {
                    kept.next();
                } else {
                    columns.push(x);
                }
                columns.push(x);
            }
            columns
        }
    }
}

/// The per-row output columns for a whole image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    width: u32,
    rows: Vec<Vec<u32>>,
}

impl ColumnPlan {
    pub fn new(indices: &IndexMap, source_width: u32, mode: Resize) -> Self {
        let rows: Vec<Vec<u32>> = indices
            .rows()
            .map(|row| output_columns(row, source_width, mode))
            .collect();
        let width = rows.first().map_or(0, |r| r.len() as u32);
        debug_assert!(rows.iter().all(|r| r.len() as u32 == width));
        ColumnPlan { width, rows }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    #[inline]
    pub fn source_column(&self, x: u32, y: u32) -> u32 {
        self.rows[y as usize][x as usize]
    }

    pub fn row(&self, y: u32) -> &[u32] {
        &self.rows[y as usize]
    }
}

/// Sample the source image through the plan.
pub fn replay_image<I>(
    image: &I,
    plan: &ColumnPlan,
) -> ImageBuffer<I::Pixel, Vec<<I::Pixel as Pixel>::Subpixel>>
where
    I: GenericImageView,
    I::Pixel: 'static,
    <I::Pixel as Pixel>::Subpixel: 'static,
{
    let mut out = ImageBuffer::new(plan.width(), plan.height());
    for (y, x) in iproduct!(0..plan.height(), 0..plan.width()) {
        out.put_pixel(x, y, image.get_pixel(plan.source_column(x, y), y));
    }
    out
}
