// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Channel weights for the greyscale conversion.

use crate::error::CarveError;
use std::cmp;
use std::str::FromStr;

/// The largest channel value any supported image can carry.
const MAX_CHANNEL: u64 = u16::MAX as u64;

/// How much each of the red, green and blue channels contributes to
/// the luma of a pixel.  The weighted sum is divided by `divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbWeights {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub divisor: u32,
}

impl RgbWeights {
    /// Weights normalized by their own sum.  A sum past `u32::MAX`
    /// saturates.
    pub fn new(red: u32, green: u32, blue: u32) -> Self {
        let divisor = red.saturating_add(green).saturating_add(blue);
        RgbWeights::with_divisor(red, green, blue, divisor)
    }

    pub fn with_divisor(red: u32, green: u32, blue: u32, divisor: u32) -> Self {
        RgbWeights {
            red,
            green,
            blue,
            divisor,
        }
    }

    /// Rejects a zero divisor, and weights that could push the luma of
    /// a full-scale pixel to `u32::MAX`, which is reserved for
    /// protected cells.
    pub fn validate(&self) -> Result<(), CarveError> {
        if self.divisor == 0 {
            return Err(CarveError::ZeroDivisor);
        }
        let total = u64::from(self.red) + u64::from(self.green) + u64::from(self.blue);
        if total * MAX_CHANNEL / u64::from(self.divisor) >= u64::from(u32::MAX) {
            return Err(CarveError::BadWeights(format!(
                "{},{},{}/{} overflows the luma range",
                self.red, self.green, self.blue, self.divisor
            )));
        }
        Ok(())
    }

    /// The luma of one `(r, g, b)` triple.
    #[inline]
    pub fn luma(&self, r: u32, g: u32, b: u32) -> u32 {
        let sum = u64::from(r) * u64::from(self.red)
            + u64::from(g) * u64::from(self.green)
            + u64::from(b) * u64::from(self.blue);
        cmp::min(sum / u64::from(self.divisor), u64::from(u32::MAX - 1)) as u32
    }
}

impl Default for RgbWeights {
    fn default() -> Self {
        RgbWeights::new(1, 1, 1)
    }
}

/// Parses `"r,g,b"` or `"r,g,b/divisor"`.
impl FromStr for RgbWeights {
    type Err = CarveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CarveError::BadWeights(s.to_string());
        let (triple, divisor) = match s.find('/') {
            Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
            None => (s, None),
        };
        let channels = triple
            .split(',')
            .map(|c| c.trim().parse::<u32>().map_err(|_| bad()))
            .collect::<Result<Vec<u32>, CarveError>>()?;
        if channels.len() != 3 {
            return Err(bad());
        }
        let weights = match divisor {
            Some(d) => {
                let d = d.trim().parse::<u32>().map_err(|_| bad())?;
                RgbWeights::with_divisor(channels[0], channels[1], channels[2], d)
            }
            None => {
                let divisor = channels[0]
                    .checked_add(channels[1])
                    .and_then(|d| d.checked_add(channels[2]))
                    .ok_or_else(bad)?;
                RgbWeights::with_divisor(channels[0], channels[1], channels[2], divisor)
            }
        };
        weights.validate()?;
        Ok(weights)
    }
}
