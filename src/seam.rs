// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Backtracking a seam out of a finished cost table.

use crate::cq;
use crate::twodmap::TwoDimensionalMap;

/// One column position per row, top to bottom.  Positions are relative
/// to the working width at the moment the seam was traced.
pub type Seam = Vec<u32>;

// Which of the (up to) three cells above `below` the seam climbs to.
//
// The interior rule is asymmetric: straight up only wins outright, then
// up-left only wins outright, and every remaining case (including all
// ties) goes up-right.  Existing outputs depend on this ordering.
fn step_up(row: &[u64], below: u32) -> u32 {
    let mw = row.len() as u32 - 1;
    let c = |x: u32| row[x as usize];

    if mw == 0 {
        0
    } else if below == mw {
        cq!(c(mw - 1) < c(mw), mw - 1, mw)
    } else if below == 0 {
        cq!(c(1) < c(0), 1, 0)
    } else {
        let (left, up, right) = (c(below - 1), c(below), c(below + 1));
        if up < left && up < right {
            below
        } else if left < up && left < right {
            below - 1
        } else {
            below + 1
        }
    }
}

/// Given a cost table, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the cheapest seam.
pub fn trace_seam(cost: &TwoDimensionalMap<u64>) -> Seam {
    let (width, height) = cost.dimensions();
    let mut seam = vec![0; height as usize];
    if width == 0 || height == 0 {
        return seam;
    }

    // The bottom row's cheapest cell; ties go to the leftmost.
    let bottom = cost.row(height - 1);
    let mut seam_col = (0..width)
        .min_by_key(|x| bottom[*x as usize])
        .unwrap_or(0);
    seam[height as usize - 1] = seam_col;

    // Working backwards, climb one row at a time.
    for y in (0..height - 1).rev() {
        seam_col = step_up(cost.row(y), seam_col);
        seam[y as usize] = seam_col;
    }
    seam
}

/// True when adjacent rows of the seam are at most one column apart.
pub fn is_connected(seam: &[u32]) -> bool {
    seam.windows(2)
        .all(|w| (i64::from(w[0]) - i64::from(w[1])).abs() <= 1)
}
