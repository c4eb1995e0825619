// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a luma map
//!
//! The energy of a pixel is the sum of the absolute backward
//! differences to its left and upper neighbours.  Pixels on the first
//! row or column have no such neighbour and take their own intensity
//! as the difference, which makes the border look "busy" to the carver.

use crate::cq;
use crate::parallel::fill_rows;
use crate::twodmap::TwoDimensionalMap;

/// Luma -> Energy Map
pub fn calculate_energy(luma: &TwoDimensionalMap<u32>) -> TwoDimensionalMap<u64> {
    let mut emap = TwoDimensionalMap::new(luma.width(), luma.height());
    fill_rows(&mut emap, |y, row| {
        let here = luma.row(y);
        let above = cq!(y == 0, None, Some(luma.row(y - 1)));
        for (x, cell) in row.iter_mut().enumerate() {
            let l = i64::from(here[x]);
            let dx = cq!(x == 0, l, l - i64::from(here[x - 1]));
            let dy = match above {
                Some(above) => l - i64::from(above[x]),
                None => l,
            };
            *cell = (dx.abs() + dy.abs()) as u64;
        }
    });
    emap
}
