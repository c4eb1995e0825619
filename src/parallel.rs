// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Row-at-a-time filling of a scratch grid.
//!
//! Only stages whose cells depend solely on already-finished grids may
//! go through here (the luma remap and the gradient energy).  The cost
//! table reads the row above the one it is writing and must never be
//! filled this way.
//!
//! With the `threaded` feature the target is broken into contiguous
//! bands of rows with `chunks_mut`, and each band is handed to its own
//! scoped thread, so nothing unsafe is needed to share the output.

use crate::twodmap::TwoDimensionalMap;

/// Call `f(y, row)` for every row of `map`.
#[cfg(not(feature = "threaded"))]
pub(crate) fn fill_rows<T, F>(map: &mut TwoDimensionalMap<T>, f: F)
where
    T: Default + Copy + Send,
    F: Fn(u32, &mut [T]) + Sync,
{
    if map.width() == 0 {
        return;
    }
    for (y, row) in map.rows_mut().enumerate() {
        f(y as u32, row);
    }
}

/// Call `f(y, row)` for every row of `map`, one band of rows per CPU.
#[cfg(feature = "threaded")]
pub(crate) fn fill_rows<T, F>(map: &mut TwoDimensionalMap<T>, f: F)
where
    T: Default + Copy + Send,
    F: Fn(u32, &mut [T]) + Sync,
{
    let (width, height) = map.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let bands = num_cpus::get().max(1) as u32;
    let rows_per_band = ((height + bands - 1) / bands).max(1);
    let f = &f;

    let result = crossbeam::scope(|scope| {
        let band_len = (rows_per_band * width) as usize;
        for (band, chunk) in map.as_mut_slice().chunks_mut(band_len).enumerate() {
            scope.spawn(move |_| {
                let first = band as u32 * rows_per_band;
                for (offset, row) in chunk.chunks_mut(width as usize).enumerate() {
                    f(first + offset as u32, row);
                }
            });
        }
    });

    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_is_visited_once_with_its_index() {
        let mut map: TwoDimensionalMap<u32> = TwoDimensionalMap::new(4, 37);
        fill_rows(&mut map, |y, row| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell += y * 100 + x as u32;
            }
        });
        assert_eq!(map, TwoDimensionalMap::from_fn(4, 37, |x, y| y * 100 + x));
    }

    #[test]
    fn short_and_ragged_heights_are_covered() {
        for &height in &[1u32, 2, 3, 5, 8, 13] {
            let mut map: TwoDimensionalMap<u32> = TwoDimensionalMap::new(3, height);
            fill_rows(&mut map, |y, row| {
                for cell in row.iter_mut() {
                    *cell += y + 1;
                }
            });
            assert_eq!(map, TwoDimensionalMap::from_fn(3, height, |_, y| y + 1));
        }
    }

    #[cfg(feature = "threaded")]
    #[test]
    fn bands_split_unevenly_across_cpus() {
        let height = num_cpus::get() as u32 * 3 + 1;
        let mut map: TwoDimensionalMap<u64> = TwoDimensionalMap::new(5, height);
        fill_rows(&mut map, |y, row| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = u64::from(y) * 7 + x as u64;
            }
        });
        let mut serial: TwoDimensionalMap<u64> = TwoDimensionalMap::new(5, height);
        for (y, row) in serial.rows_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = y as u64 * 7 + x as u64;
            }
        }
        assert_eq!(map, serial);
    }

    #[cfg(feature = "threaded")]
    #[test]
    #[should_panic]
    fn a_panicking_band_reaches_the_caller() {
        let mut map: TwoDimensionalMap<u32> = TwoDimensionalMap::new(2, 4);
        fill_rows(&mut map, |y, _| {
            if y == 2 {
                panic!("row 2");
            }
        });
    }
}
