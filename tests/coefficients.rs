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
#![warn(unused)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unsafe_code)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]
#![allow(clippy::cast_possible_truncation)]

use yfc::{CUB, CUG, CVG, CVR, CY, ROUND_HALF, SHIFT};
use yuv_frame_convert as yfc;

const FIX_MULT_F64: f64 = (1 << SHIFT) as f64;

// Kr, Kb of ITU-R BT.601
const KR: f64 = 0.299;
const KB: f64 = 0.114;
const KG: f64 = 1.0 - KR - KB;

fn to_fix(x: f64) -> i32 {
    (FIX_MULT_F64 * x).round() as i32
}

#[test]
fn rounded_textbook_weights() {
    assert_eq!(CY, to_fix(1.164));
    assert_eq!(CUB, to_fix(2.018));
    assert_eq!(CUG, to_fix(-0.391));
    assert_eq!(CVG, to_fix(-0.813));
    assert_eq!(CVR, to_fix(1.596));
    assert_eq!(ROUND_HALF, 1 << (SHIFT - 1));
}

#[test]
fn derived_from_luma_weights() {
    // Standard range: 219 luma steps, 224 chroma steps
    let y_scale = 255.0 / 219.0;
    let c_scale = 255.0 / 224.0;

    let weights = [
        (CY, y_scale),
        (CVR, c_scale * 2.0 * (1.0 - KR)),
        (CVG, -c_scale * 2.0 * (1.0 - KR) * KR / KG),
        (CUG, -c_scale * 2.0 * (1.0 - KB) * KB / KG),
        (CUB, c_scale * 2.0 * (1.0 - KB)),
    ];

    for (fixed, real) in weights {
        let error = (f64::from(fixed) / FIX_MULT_F64 - real).abs();
        assert!(error < 1e-3, "{fixed} vs {real}: {error}");
    }
}

#[test]
fn accumulators_fit_i32() {
    let max_luma = i64::from(255 - 16) * i64::from(CY);
    let bias = i64::from(ROUND_HALF);

    for (u, v) in [(-128_i64, -128_i64), (-128, 127), (127, -128), (127, 127)] {
        let terms = [
            i64::from(CVR) * v,
            i64::from(CVG) * v + i64::from(CUG) * u,
            i64::from(CUB) * u,
        ];

        for term in terms {
            for luma in [0, max_luma] {
                let sum = luma + bias + term;
                assert!(sum <= i64::from(i32::MAX) && sum >= i64::from(i32::MIN));
            }
        }
    }
}
