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
use crate::pixel_format::PixelFormat;

/// A tightly packed 4 channel image, 8 bits per channel.
///
/// Rows are contiguous and `4 * width` bytes long. An image produced by a conversion
/// always has an opaque alpha channel. The empty image (0x0) stands for "no image".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    pixel_format: PixelFormat,
    data: Vec<u8>,
}

impl RgbaImage {
    /// The "no image" result
    pub fn empty() -> Self {
        RgbaImage::default()
    }

    pub(crate) fn from_raw(
        width: u32,
        height: u32,
        pixel_format: PixelFormat,
        data: Vec<u8>,
    ) -> Self {
        RgbaImage {
            width,
            height,
            pixel_format,
            data,
        }
    }

    /// Width of the image in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the image in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel order of the pixels
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Distance in bytes between the starts of two consecutive rows
    pub fn stride(&self) -> usize {
        PixelFormat::DEPTH * self.width as usize
    }

    /// True for the "no image" result
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The 4 bytes of pixel (`x`, `y`), in the image channel order
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = y as usize * self.stride() + PixelFormat::DEPTH * x as usize;
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&self.data[offset..offset + PixelFormat::DEPTH]);
        Some(pixel)
    }

    /// Row `y` of the image
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }

        let start = (y as usize).checked_mul(self.stride())?;
        self.data.get(start..start + self.stride())
    }

    /// Pixel data, row after row
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Takes ownership of the pixel data
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}
