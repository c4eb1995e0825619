// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Avidan & Rubinstein "forward energy" cost table.
//!
//! Each cell holds the cheapest cumulative cost of any seam that ends
//! there.  On top of the energy of the pixel itself, every step pays
//! for the new edges that removing the pixel would create between the
//! neighbours left behind.

use crate::twodmap::TwoDimensionalMap;

// Standard differences, with D the absolute luma difference:
//
//  CU(x,y) = D[(x+1,y),(x−1,y)]
//  CL(x,y) = CU(x,y) + D[(x,y−1),(x−1,y)]
//  CR(x,y) = CU(x,y) + D[(x,y−1),(x+1,y)]
//
// At the near edge there is no (x−1) neighbour, and it contributes
// nothing; only the up and up-right parents exist:
//
//  CU(0,y) = |L(1,y)|
//  CR(0,y) = |L(1,y)| + D[(0,y−1),(1,y)]
//
// The far edge is handled by analogy, with only up and up-left.
//
//           ⎧ M(x−1,y−1)+CL(x,y)
// M(x,y)=min⎨ M(x,y−1)+CU(x,y)
//           ⎩ M(x+1,y−1)+CR(x,y)

#[inline]
fn diff(a: u32, b: u32) -> u64 {
    u64::from(a.max(b) - a.min(b))
}

// The cheapest way into (x, y) from the row above, including the
// forward-energy penalty of the step.
fn cheapest_parent(
    cost: &TwoDimensionalMap<u64>,
    luma: &TwoDimensionalMap<u32>,
    (x, y): (u32, u32),
) -> u64 {
    let above = y - 1;
    let mw = cost.width() - 1;
    let l = |x, y| luma[(x, y)];
    let m = |x| cost[(x, above)];

    if mw == 0 {
        return m(0);
    }

    if x == 0 {
        let cost_up = u64::from(l(1, y));
        let cost_right = cost_up + diff(l(0, above), l(1, y));
        (m(0) + cost_up).min(m(1) + cost_right)
    } else if x == mw {
        let cost_up = u64::from(l(mw - 1, y));
        let cost_left = cost_up + diff(l(mw, above), l(mw - 1, y));
        (m(mw) + cost_up).min(m(mw - 1) + cost_left)
    } else {
        let cost_up = diff(l(x + 1, y), l(x - 1, y));
        let cost_left = cost_up + diff(l(x, above), l(x - 1, y));
        let cost_right = cost_up + diff(l(x, above), l(x + 1, y));
        (m(x) + cost_up)
            .min(m(x - 1) + cost_left)
            .min(m(x + 1) + cost_right)
    }
}

/// Build the cumulative cost table for an energy map and the luma map
/// it was derived from.
///
/// Row `y` reads the finished row `y - 1`, so this is strictly
/// row-major and is never split across threads.
pub fn calculate_cost(
    energy: &TwoDimensionalMap<u64>,
    luma: &TwoDimensionalMap<u32>,
) -> TwoDimensionalMap<u64> {
    let (width, height) = energy.dimensions();
    assert_eq!(
        luma.dimensions(),
        (width, height),
        "energy and luma maps disagree in size"
    );

    let mut cost = TwoDimensionalMap::new(width, height);
    if width == 0 || height == 0 {
        return cost;
    }

    // The first row is the energy itself.
    cost.as_mut_slice()[..width as usize].copy_from_slice(energy.row(0));

    for y in 1..height {
        for x in 0..width {
            let step = cheapest_parent(&cost, luma, (x, y));
            cost[(x, y)] = energy[(x, y)] + step;
        }
    }
    cost
}
