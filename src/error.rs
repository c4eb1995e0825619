// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Configuration errors.  All of them are raised while the carver is
//! being built, before any scratch grid exists.

use failure::Fail;

#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum CarveError {
    #[fail(
        display = "cannot apply seam carving: image is too small ({}x{}, need at least 2x2)",
        width, height
    )]
    TooSmall { width: u32, height: u32 },

    #[fail(
        display = "cannot apply seam carving: {} seams requested, at most {} allowed",
        requested, allowed
    )]
    TooManySeams { requested: u32, allowed: u32 },

    #[fail(
        display = "protection mask is {}x{} but the image is {}x{}",
        mask_width, mask_height, width, height
    )]
    MaskMismatch {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },

    #[fail(display = "channel weights need a non-zero divisor")]
    ZeroDivisor,

    #[fail(display = "could not parse channel weights: {}", _0)]
    BadWeights(String),
}
