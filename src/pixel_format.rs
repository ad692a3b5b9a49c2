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
use crate::ErrorKind;
use core::fmt;

/// Format code the camera host uses for flexible planar/semi-planar 4:2:0 frames
pub const YUV_420_888: i32 = 0x23;

/// Number of planes of a 4:2:0 frame: Y, U and V
pub const NUMBER_OF_PLANES: usize = 3;

/// An enumeration of the source frame layouts known to the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum FrameFormat {
    /// Anything the host can deliver that is not handled.
    Unsupported,
    /// YUV with one luma plane Y then U chroma plane and last the V chroma plane.
    /// The two chroma planes are sub-sampled in both the horizontal and vertical
    /// dimensions by a factor of 2. Each plane carries its own pixel and row strides,
    /// so interleaved chroma (NV12, NV21) is described as well.
    ///
    /// 12 bits per pixel
    Planar420,
}

impl From<i32> for FrameFormat {
    fn from(format_code: i32) -> Self {
        match format_code {
            YUV_420_888 => FrameFormat::Planar420,
            _ => FrameFormat::Unsupported,
        }
    }
}

impl fmt::Display for FrameFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FrameFormat::Unsupported => write!(f, "unsupported"),
            FrameFormat::Planar420 => write!(f, "yuv-420"),
        }
    }
}

/// An enumeration of supported output pixel formats.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub enum PixelFormat {
    /// RGB with alpha channel last.
    ///
    /// 32 bits per pixel
    #[default]
    Rgba,
    /// Reverse RGB with alpha channel last.
    ///
    /// 32 bits per pixel
    Bgra,
}

impl PixelFormat {
    pub(crate) const DEPTH: usize = 4;

    pub(crate) const fn reversed(self) -> bool {
        matches!(self, PixelFormat::Bgra)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PixelFormat::Rgba => write!(f, "rgba"),
            PixelFormat::Bgra => write!(f, "bgra"),
        }
    }
}

impl TryFrom<i32> for PixelFormat {
    type Error = ErrorKind;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PixelFormat::Rgba),
            1 => Ok(PixelFormat::Bgra),
            _ => Err(ErrorKind::InvalidValue),
        }
    }
}

/// Bytes spanned by `count` samples spaced `pixel_stride` bytes apart.
///
/// The last sample only needs one byte, so interleaved planes whose buffer ends
/// right after the final sample are accepted.
pub fn sample_span(count: usize, pixel_stride: usize) -> Option<usize> {
    count
        .checked_sub(1)?
        .checked_mul(pixel_stride)?
        .checked_add(1)
}

/// Minimum number of bytes a plane must hold for `lines` rows of `count` samples.
pub fn plane_len(
    count: usize,
    lines: usize,
    pixel_stride: usize,
    row_stride: usize,
) -> Option<usize> {
    lines
        .checked_sub(1)?
        .checked_mul(row_stride)?
        .checked_add(sample_span(count, pixel_stride)?)
}

/// Bytes needed by a tightly packed output image.
pub fn output_len(width: usize, height: usize) -> Option<usize> {
    width
        .checked_mul(PixelFormat::DEPTH)?
        .checked_mul(height)
}
