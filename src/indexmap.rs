// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The index map: for every row, which original column each column of
//! the shrinking working image came from.
//!
//! The carver never copies pixels while it works.  It only narrows
//! these rows, and every grid of the next iteration is rebuilt by
//! looking columns up through them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMap {
    rows: Vec<Vec<u32>>,
    width: u32,
}

impl IndexMap {
    /// The identity map of a `width × height` image.
    pub fn new(width: u32, height: u32) -> Self {
        IndexMap {
            rows: (0..height).map(|_| (0..width).collect()).collect(),
            width,
        }
    }

    /// The current working width.
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn row(&self, y: u32) -> &[u32] {
        &self.rows[y as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// The original column under each cell of `seam`.
    pub fn original_columns(&self, seam: &[u32]) -> Vec<u32> {
        assert_eq!(seam.len(), self.rows.len(), "seam does not span the image");
        self.rows
            .iter()
            .zip(seam)
            .map(|(row, &x)| row[x as usize])
            .collect()
    }

    /// Drop the column under the seam from every row, shifting the rest
    /// of the row one slot left.
    pub fn remove_seam(&mut self, seam: &[u32]) {
        assert_eq!(seam.len(), self.rows.len(), "seam does not span the image");
        for (row, &x) in self.rows.iter_mut().zip(seam.iter()) {
            assert!(
                (x as usize) < row.len(),
                "seam column {} outside working width {}",
                x,
                row.len()
            );
            row.remove(x as usize);
        }
        self.width -= 1;
        debug_assert!(self.rows.iter().all(|r| strictly_increasing(r)));
    }

    /// True when every row is a strictly increasing, in-range
    /// subsequence of `0..source_width` of the current working width.
    pub fn is_consistent(&self, source_width: u32) -> bool {
        self.rows.iter().all(|row| {
            row.len() == self.width as usize
                && strictly_increasing(row)
                && row.last().map_or(true, |&last| last < source_width)
        })
    }
}

fn strictly_increasing(row: &[u32]) -> bool {
    row.windows(2).all(|w| w[0] < w[1])
}
