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
#![allow(dead_code)]

use rand::Rng;
use yuv_frame_convert::{HostFrame, SourcePlane, CUB, CUG, CVG, CVR, CY, SHIFT, YUV_420_888};

/// Value written in row and sample padding; conversions must never read it
pub const PAD_BYTE: u8 = 0xA5;

/// Logical content of a 4:2:0 frame, one byte per sample.
pub struct Samples {
    pub width: usize,
    pub height: usize,
    pub y: Vec<u8>,
    pub u: Vec<u8>,
    pub v: Vec<u8>,
}

impl Samples {
    pub fn uniform(width: usize, height: usize, y: u8, u: u8, v: u8) -> Self {
        let chroma = (width / 2) * (height / 2);
        Samples {
            width,
            height,
            y: vec![y; width * height],
            u: vec![u; chroma],
            v: vec![v; chroma],
        }
    }

    pub fn random<R: Rng>(width: usize, height: usize, rng: &mut R) -> Self {
        let chroma = (width / 2) * (height / 2);
        Samples {
            width,
            height,
            y: (0..width * height).map(|_| rng.gen()).collect(),
            u: (0..chroma).map(|_| rng.gen()).collect(),
            v: (0..chroma).map(|_| rng.gen()).collect(),
        }
    }

    pub fn luma(&self, x: usize, y: usize) -> u8 {
        self.y[y * self.width + x]
    }

    /// (u, v) covering pixel (x, y)
    pub fn chroma(&self, x: usize, y: usize) -> (u8, u8) {
        let index = (y / 2) * (self.width / 2) + x / 2;
        (self.u[index], self.v[index])
    }

    /// Lays the samples out in host buffers.
    ///
    /// Rows get `y_pad` / `chroma_pad` extra bytes. With `interleaved`, U and V share one
    /// buffer (u, v, u, v, ...) with a pixel stride of 2, as NV12 exposed through
    /// three planes. Buffers end right after their last sample, like camera buffers do.
    pub fn layout(&self, y_pad: usize, chroma_pad: usize, interleaved: bool) -> Layout {
        let (chroma_width, chroma_height) = (self.width / 2, self.height / 2);
        let y_stride = self.width + y_pad;
        let mut y = vec![PAD_BYTE; (self.height - 1) * y_stride + self.width];
        for (row, src) in self.y.chunks_exact(self.width).enumerate() {
            y[row * y_stride..row * y_stride + self.width].copy_from_slice(src);
        }

        let chroma = if interleaved {
            let stride = 2 * chroma_width + chroma_pad;
            let mut uv = vec![PAD_BYTE; (chroma_height - 1) * stride + 2 * chroma_width];
            for row in 0..chroma_height {
                for col in 0..chroma_width {
                    uv[row * stride + 2 * col] = self.u[row * chroma_width + col];
                    uv[row * stride + 2 * col + 1] = self.v[row * chroma_width + col];
                }
            }

            Chroma::Interleaved { uv, stride }
        } else {
            let stride = chroma_width + chroma_pad;
            let spread = |src: &[u8]| {
                let mut plane = vec![PAD_BYTE; (chroma_height - 1) * stride + chroma_width];
                for (row, samples) in src.chunks_exact(chroma_width).enumerate() {
                    plane[row * stride..row * stride + chroma_width].copy_from_slice(samples);
                }

                plane
            };

            Chroma::Planar {
                u: spread(&self.u),
                v: spread(&self.v),
                stride,
            }
        };

        Layout {
            width: self.width,
            height: self.height,
            y,
            y_stride,
            chroma,
        }
    }

    pub fn packed(&self) -> Layout {
        self.layout(0, 0, false)
    }
}

pub enum Chroma {
    Planar { u: Vec<u8>, v: Vec<u8>, stride: usize },
    Interleaved { uv: Vec<u8>, stride: usize },
}

/// Host buffers of a frame.
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub y: Vec<u8>,
    pub y_stride: usize,
    pub chroma: Chroma,
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap()
}

impl Layout {
    pub fn planes(&self) -> [SourcePlane<'_>; 3] {
        let y = SourcePlane {
            data: &self.y,
            pixel_stride: 1,
            row_stride: to_i32(self.y_stride),
        };

        match &self.chroma {
            Chroma::Planar { u, v, stride } => [
                y,
                SourcePlane {
                    data: u,
                    pixel_stride: 1,
                    row_stride: to_i32(*stride),
                },
                SourcePlane {
                    data: v,
                    pixel_stride: 1,
                    row_stride: to_i32(*stride),
                },
            ],
            Chroma::Interleaved { uv, stride } => [
                y,
                SourcePlane {
                    data: uv,
                    pixel_stride: 2,
                    row_stride: to_i32(*stride),
                },
                SourcePlane {
                    data: &uv[1..],
                    pixel_stride: 2,
                    row_stride: to_i32(*stride),
                },
            ],
        }
    }

    pub fn frame(&self) -> HostFrame<'_> {
        HostFrame {
            width: to_i32(self.width),
            height: to_i32(self.height),
            format_code: YUV_420_888,
            planes: self.planes(),
        }
    }
}

fn saturate(value: i64) -> u8 {
    u8::try_from(value.clamp(0, 255)).unwrap()
}

/// Integer BT.601 reference, evaluated in 64 bits
pub fn fixed_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let bias = 1_i64 << (SHIFT - 1);
    let u = i64::from(u) - 128;
    let v = i64::from(v) - 128;
    let l = (i64::from(y) - 16).max(0) * i64::from(CY);

    [
        saturate((l + bias + i64::from(CVR) * v) >> SHIFT),
        saturate((l + bias + i64::from(CVG) * v + i64::from(CUG) * u) >> SHIFT),
        saturate((l + bias + i64::from(CUB) * u) >> SHIFT),
    ]
}

/// Floating point BT.601 reference
pub fn float_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let l = 1.164 * f64::from((i32::from(y) - 16).max(0));
    let u = f64::from(u) - 128.0;
    let v = f64::from(v) - 128.0;
    let round = |x: f64| saturate(x.round() as i64);

    [
        round(l + 1.596 * v),
        round(l - 0.813 * v - 0.391 * u),
        round(l + 2.018 * u),
    ]
}
