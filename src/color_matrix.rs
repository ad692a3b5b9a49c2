// Copyright 2019 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

// Permission is hereby granted, free of charge, to any person obtaining a copy of this
// software and associated documentation files (the "Software"), to deal in the Software
// without restriction, including without limitation the rights to use, copy, modify,
// merge, publish, distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED,
// INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT
// HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Fixed point ITU-R BT.601 coefficients used to go from limited range
//! ycbcr to gamma-corrected R'G'B'.
//!
//! Every coefficient is the real valued one scaled by `1 << SHIFT`:
//! ```text
//! r = 1.164 * (y - 16) + 1.596 * (cr - 128)
//! g = 1.164 * (y - 16) - 0.813 * (cr - 128) - 0.391 * (cb - 128)
//! b = 1.164 * (y - 16) + 2.018 * (cb - 128)
//! ```

/// Number of fractional bits of every coefficient
pub const SHIFT: i32 = 20;

/// Rounding term added before the final shift (0.5 in fixed point)
pub const ROUND_HALF: i32 = 1 << (SHIFT - 1);

/// Luma gain, 255 / 219
pub const CY: i32 = 1_220_542;
/// Blue difference contribution to blue
pub const CUB: i32 = 2_116_026;
/// Blue difference contribution to green
pub const CUG: i32 = -409_993;
/// Red difference contribution to green
pub const CVG: i32 = -852_492;
/// Red difference contribution to red
pub const CVR: i32 = 1_673_527;

/// Luma footroom for standard range
pub const Y_MIN: i32 = 16;
/// Chroma zero point
pub const C_HALF: i32 = 128;
/// Alpha of every output pixel (opaque)
pub const DEFAULT_ALPHA: u8 = 255;

/// Chroma contribution to each output channel, shared by a 2x2 luma block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChromaTerms {
    pub ruv: i32,
    pub guv: i32,
    pub buv: i32,
}

impl ChromaTerms {
    #[inline(always)]
    pub fn new(cb: u8, cr: u8) -> Self {
        let u = i32::from(cb) - C_HALF;
        let v = i32::from(cr) - C_HALF;

        ChromaTerms {
            ruv: ROUND_HALF + CVR * v,
            guv: ROUND_HALF + CVG * v + CUG * u,
            buv: ROUND_HALF + CUB * u,
        }
    }

    /// Returns the saturated (r, g, b) triplet for one luma sample
    #[inline(always)]
    pub fn apply(&self, luma: u8) -> (u8, u8, u8) {
        let y = scaled_luma(luma);
        (
            fix_to_u8_sat(y + self.ruv),
            fix_to_u8_sat(y + self.guv),
            fix_to_u8_sat(y + self.buv),
        )
    }
}

/// Luma with footroom removed, clamped at zero, multiplied by `CY`
#[inline(always)]
pub fn scaled_luma(luma: u8) -> i32 {
    (i32::from(luma) - Y_MIN).max(0) * CY
}

/// Convert fixed point number with `SHIFT` fractional bits to uchar, using saturation
///
/// Sums of `scaled_luma` and a chroma term always fit in an i32:
/// the largest is 239 * CY + 127 * CUB + `ROUND_HALF` < 2^31.
///
/// If the integer part fits 8 bits it is returned as is, otherwise the sign bit selects
/// between 0 (underflow) and 255 (overflow): fix[31] + 255 is 256 for negative numbers,
/// which wraps to 0, and 255 for positive ones.
#[inline(always)]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn fix_to_u8_sat(fix: i32) -> u8 {
    if (fix & !((256 << SHIFT) - 1)) == 0 {
        ((fix as u32) >> SHIFT) as u8
    } else {
        ((((fix as u32) >> 31) + 255) & 255) as u8
    }
}
