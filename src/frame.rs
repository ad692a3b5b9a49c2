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
use crate::frame_source::{FrameSource, SourcePlane};
use crate::pixel_format::{plane_len, sample_span, FrameFormat, NUMBER_OF_PLANES};
use crate::ErrorKind;

/// Memory layout of one validated color plane.
#[derive(Copy, Clone, Debug)]
pub struct PlaneDescriptor<'a> {
    data: &'a [u8],
    pixel_stride: usize,
    row_stride: usize,
}

impl<'a> PlaneDescriptor<'a> {
    /// Sample bytes of the plane
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Distance in bytes between two consecutive samples of a row
    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }

    /// Distance in bytes between the starts of two consecutive rows
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Bytes of row `line` covering `count` samples, if the plane holds them
    pub(crate) fn row(&self, line: usize, count: usize) -> Option<&'a [u8]> {
        let start = line.checked_mul(self.row_stride)?;
        let end = start.checked_add(sample_span(count, self.pixel_stride)?)?;
        self.data.get(start..end)
    }

    fn validate(
        plane: SourcePlane<'a>,
        count: usize,
        lines: usize,
    ) -> Result<PlaneDescriptor<'a>, ErrorKind> {
        let pixel_stride = positive(plane.pixel_stride).ok_or(ErrorKind::InvalidValue)?;
        let row_stride = positive(plane.row_stride).ok_or(ErrorKind::InvalidValue)?;

        // A row must fit before the next one starts
        let span = sample_span(count, pixel_stride).ok_or(ErrorKind::InvalidValue)?;
        if row_stride < span {
            return Err(ErrorKind::InvalidValue);
        }

        let required =
            plane_len(count, lines, pixel_stride, row_stride).ok_or(ErrorKind::NotEnoughData)?;
        if plane.data.len() < required {
            return Err(ErrorKind::NotEnoughData);
        }

        Ok(PlaneDescriptor {
            data: plane.data,
            pixel_stride,
            row_stride,
        })
    }
}

/// A validated 4:2:0 frame: geometry, format and the Y, U, V planes.
///
/// A `FrameDescriptor` can only be built through validation, so holding one
/// guarantees that:
/// * width and height are positive and even
/// * every stride is positive and no row overlaps the next
/// * every plane buffer covers the last sample the conversion reads, that is
///   `row_stride * (lines - 1) + pixel_stride * (samples - 1)` from its origin, with
///   `width x height` luma samples and `width / 2 x height / 2` chroma samples
#[derive(Copy, Clone, Debug)]
pub struct FrameDescriptor<'a> {
    format: FrameFormat,
    width: usize,
    height: usize,
    planes: [PlaneDescriptor<'a>; NUMBER_OF_PLANES],
}

impl<'a> FrameDescriptor<'a> {
    /// Validates host provided geometry, format code and planes.
    ///
    /// # Errors
    ///
    /// * [`InvalidGeometry`] if `width` or `height` are not positive, or are odd
    ///
    /// * [`UnsupportedFormat`] if `format_code` is not [`YUV_420_888`]
    ///
    /// * [`InvalidValue`] if a plane has a non-positive stride, or a row stride smaller
    ///   than the bytes spanned by one row of samples
    ///
    /// * [`NotEnoughData`] if a plane buffer is shorter than its strides require
    ///
    /// [`InvalidGeometry`]: ./enum.ErrorKind.html#variant.InvalidGeometry
    /// [`UnsupportedFormat`]: ./enum.ErrorKind.html#variant.UnsupportedFormat
    /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
    /// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
    /// [`YUV_420_888`]: ./constant.YUV_420_888.html
    pub fn new(
        width: i32,
        height: i32,
        format_code: i32,
        planes: [SourcePlane<'a>; NUMBER_OF_PLANES],
    ) -> Result<Self, ErrorKind> {
        let (width, height) = check_geometry(width, height, format_code)?;
        let [y_plane, u_plane, v_plane] = planes;
        let (chroma_width, chroma_height) = (width / 2, height / 2);

        Ok(FrameDescriptor {
            format: FrameFormat::Planar420,
            width,
            height,
            planes: [
                PlaneDescriptor::validate(y_plane, width, height)?,
                PlaneDescriptor::validate(u_plane, chroma_width, chroma_height)?,
                PlaneDescriptor::validate(v_plane, chroma_width, chroma_height)?,
            ],
        })
    }

    /// Reads geometry, format and planes through the host bridge, then validates them.
    ///
    /// Geometry and format are checked before any plane is requested.
    ///
    /// # Errors
    ///
    /// Same as [`new`], plus [`NotEnoughData`] if the source does not provide all
    /// three planes.
    ///
    /// [`new`]: #method.new
    /// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
    pub fn from_source<S: FrameSource + ?Sized>(source: &'a S) -> Result<Self, ErrorKind> {
        let (width, height, format_code) =
            (source.width(), source.height(), source.format_code());
        check_geometry(width, height, format_code)?;

        let plane = move |index: usize| source.plane(index).ok_or(ErrorKind::NotEnoughData);
        Self::new(width, height, format_code, [plane(0)?, plane(1)?, plane(2)?])
    }

    /// Always [`FrameFormat::Planar420`] once validated
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Width of the frame in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the frame in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Planes in Y, U, V order
    pub fn planes(&self) -> &[PlaneDescriptor<'a>; NUMBER_OF_PLANES] {
        &self.planes
    }
}

fn positive(value: i32) -> Option<usize> {
    if value > 0 {
        usize::try_from(value).ok()
    } else {
        None
    }
}

/// Checks dimensions then format code, returning the dimensions as `usize`.
pub(crate) fn check_geometry(
    width: i32,
    height: i32,
    format_code: i32,
) -> Result<(usize, usize), ErrorKind> {
    let (width, height) = match (positive(width), positive(height)) {
        (Some(width), Some(height)) => (width, height),
        _ => return Err(ErrorKind::InvalidGeometry),
    };

    if FrameFormat::from(format_code) != FrameFormat::Planar420 {
        return Err(ErrorKind::UnsupportedFormat);
    }

    // Each chroma sample covers a 2x2 luma block
    if (width & 1) == 1 || (height & 1) == 1 {
        return Err(ErrorKind::InvalidGeometry);
    }

    Ok((width, height))
}
