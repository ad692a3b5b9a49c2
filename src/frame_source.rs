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
use crate::pixel_format::NUMBER_OF_PLANES;

/// One color plane as exposed by the host: a readable byte buffer and its strides.
///
/// Strides are signed because that is how camera hosts report them; the engine
/// rejects non-positive values during validation.
#[derive(Copy, Clone, Debug)]
pub struct SourcePlane<'a> {
    /// Sample bytes, starting at the first sample of the first row
    pub data: &'a [u8],
    /// Distance in bytes between two consecutive samples of a row
    pub pixel_stride: i32,
    /// Distance in bytes between the starts of two consecutive rows
    pub row_stride: i32,
}

/// The narrow view of a host camera image the converter needs.
///
/// Implement this for whatever object the host hands out (a JNI `android.media.Image`
/// wrapper, a V4L2 buffer, a test fixture). The engine calls nothing else on it, and
/// borrows plane data only for the duration of one conversion.
pub trait FrameSource {
    /// Width of the image in pixels
    fn width(&self) -> i32;

    /// Height of the image in pixels
    fn height(&self) -> i32;

    /// Host format code; only [`YUV_420_888`] is accepted
    ///
    /// [`YUV_420_888`]: ./constant.YUV_420_888.html
    fn format_code(&self) -> i32;

    /// Plane `index`, in Y, U, V order. `None` if the host does not provide it.
    fn plane(&self, index: usize) -> Option<SourcePlane<'_>>;
}

/// A host frame made of borrowed plane buffers.
///
/// This is the simplest [`FrameSource`]: useful when plane pointers and strides
/// were already extracted from the host object, and in tests.
#[derive(Copy, Clone, Debug)]
pub struct HostFrame<'a> {
    /// Width of the image in pixels
    pub width: i32,
    /// Height of the image in pixels
    pub height: i32,
    /// Host format code
    pub format_code: i32,
    /// Y, U and V planes
    pub planes: [SourcePlane<'a>; NUMBER_OF_PLANES],
}

impl FrameSource for HostFrame<'_> {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn format_code(&self) -> i32 {
        self.format_code
    }

    fn plane(&self, index: usize) -> Option<SourcePlane<'_>> {
        self.planes.get(index).copied()
    }
}
