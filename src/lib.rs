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
#![warn(missing_docs)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]
#![allow(
    clippy::too_many_arguments, // API design
    clippy::missing_safety_doc, // Until we add them...
    clippy::module_name_repetitions,
    // Kernel helpers must be inlined in the specialized loops
    clippy::inline_always,
    // Yield false positives
    clippy::must_use_candidate,
)]

//! YUV frame convert is a library to turn camera frames into packed RGBA images.
//!
//! It converts YUV 4:2:0 frames, as delivered by camera pipelines, to:
//!
//! | Source frame format            | Destination pixel formats  |
//! | ------------------------------ | -------------------------- |
//! | YUV 4:2:0 (`YUV_420_888`)      | RGBA, BGRA                 |
//!
//! Each plane carries its own pixel and row stride, so padded rows and interleaved
//! chroma (NV12, NV21) are handled without copies.
//!
//! The supported color model is ycbcr, ITU-R Recommendation BT.601 (standard range),
//! evaluated in fixed point:
//! ```text
//! r = 1.164 * (y - 16) + 1.596 * (cr - 128)
//! g = 1.164 * (y - 16) - 0.813 * (cr - 128) - 0.391 * (cb - 128)
//! b = 1.164 * (y - 16) + 2.018 * (cb - 128)
//! ```
//!
//! Rows are converted in parallel: the image is split in bands of row pairs, one per
//! worker, and the result does not depend on the number of workers.
//!
//! # Examples
//!
//! Convert a frame whose planes were already extracted from the host image:
//! ```
//! use yuv_frame_convert as yfc;
//! use yfc::{convert, HostFrame, SourcePlane, YUV_420_888};
//! use std::error;
//!
//! fn convert_frame() -> Result<(), Box<dyn error::Error>> {
//!     const WIDTH: usize = 640;
//!     const HEIGHT: usize = 480;
//!
//!     let y = vec![16u8; WIDTH * HEIGHT];
//!     let u = vec![128u8; WIDTH * HEIGHT / 4];
//!     let v = vec![128u8; WIDTH * HEIGHT / 4];
//!
//!     let frame = HostFrame {
//!         width: WIDTH as i32,
//!         height: HEIGHT as i32,
//!         format_code: YUV_420_888,
//!         planes: [
//!             SourcePlane { data: &y, pixel_stride: 1, row_stride: WIDTH as i32 },
//!             SourcePlane { data: &u, pixel_stride: 1, row_stride: (WIDTH / 2) as i32 },
//!             SourcePlane { data: &v, pixel_stride: 1, row_stride: (WIDTH / 2) as i32 },
//!         ],
//!     };
//!
//!     let image = convert(&frame)?;
//!     assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 255]));
//!
//!     Ok(())
//! }
//! # convert_frame().unwrap();
//! ```
//!
//! Convert an NV21 frame exposed as three planes with interleaved chroma, choosing the
//! channel order and the number of workers:
//! ```
//! use yuv_frame_convert as yfc;
//! use yfc::{convert_with_options, ConvertOptions, HostFrame, PixelFormat, SourcePlane};
//! use std::error;
//!
//! fn convert_nv21() -> Result<(), Box<dyn error::Error>> {
//!     const WIDTH: usize = 64;
//!     const HEIGHT: usize = 32;
//!
//!     let y = vec![128u8; WIDTH * HEIGHT];
//!     // v, u, v, u, ...
//!     let vu = vec![128u8; WIDTH * HEIGHT / 2];
//!
//!     let frame = HostFrame {
//!         width: WIDTH as i32,
//!         height: HEIGHT as i32,
//!         format_code: yfc::YUV_420_888,
//!         planes: [
//!             SourcePlane { data: &y, pixel_stride: 1, row_stride: WIDTH as i32 },
//!             SourcePlane { data: &vu[1..], pixel_stride: 2, row_stride: WIDTH as i32 },
//!             SourcePlane { data: &vu, pixel_stride: 2, row_stride: WIDTH as i32 },
//!         ],
//!     };
//!
//!     let options = ConvertOptions {
//!         pixel_format: PixelFormat::Bgra,
//!         workers: 4,
//!     };
//!
//!     let image = convert_with_options(&frame, &options)?;
//!     assert_eq!(image.as_bytes().len(), 4 * WIDTH * HEIGHT);
//!
//!     Ok(())
//! }
//! # convert_nv21().unwrap();
//! ```
mod color_matrix;
mod convert_image;
mod frame;
mod frame_source;
mod pixel_format;
mod rgba_image;

use convert_image::executor;
use std::error;
use std::fmt;

pub use color_matrix::{CUB, CUG, CVG, CVR, CY, ROUND_HALF, SHIFT};
pub use frame::{FrameDescriptor, PlaneDescriptor};
pub use frame_source::{FrameSource, HostFrame, SourcePlane};
pub use pixel_format::{FrameFormat, PixelFormat, YUV_420_888};
pub use rgba_image::RgbaImage;

/// An enumeration of errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum ErrorKind {
    /// The frame format is not YUV 4:2:0
    UnsupportedFormat,
    /// Width or height are not positive, or are not multiples of two
    InvalidGeometry,
    /// One or more parameters have invalid values for the called function
    InvalidValue,
    /// Not enough data was provided to the called function. Typically, a plane or
    /// the destination buffer is not correctly sized
    NotEnoughData,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::UnsupportedFormat => write!(f, "The frame format is not supported"),
            ErrorKind::InvalidGeometry => write!(f, "The frame dimensions are not legal"),
            ErrorKind::InvalidValue => write!(
                f,
                "One or more parameters have not legal values for the command"
            ),
            ErrorKind::NotEnoughData => write!(f, "Not enough data provided"),
        }
    }
}

impl error::Error for ErrorKind {}

/// If the worker count is assigned to this constant, one worker per thread of the
/// global pool is used
pub const WORKERS_AUTO: usize = 0;

/// Tunables of a conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Channel order of the output image
    pub pixel_format: PixelFormat,
    /// Number of bands converted concurrently, or [`WORKERS_AUTO`].
    /// One means the frame is converted on the calling thread.
    ///
    /// Threads are never more than the global rayon pool holds. A count between two
    /// and the global pool size creates and joins a dedicated pool on every call, so
    /// callers converting a stream of frames should prefer [`WORKERS_AUTO`].
    ///
    /// [`WORKERS_AUTO`]: ./constant.WORKERS_AUTO.html
    pub workers: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            pixel_format: PixelFormat::Rgba,
            workers: WORKERS_AUTO,
        }
    }
}

/// Compute number of bytes required to store the converted image of a frame
///
/// # Errors
///
/// * [`InvalidGeometry`] if `width` or `height` are not positive or not even, or the
///   size does not fit in memory
///
/// [`InvalidGeometry`]: ./enum.ErrorKind.html#variant.InvalidGeometry
pub fn get_output_size(width: i32, height: i32) -> Result<usize, ErrorKind> {
    let (width, height) = frame::check_geometry(width, height, YUV_420_888)?;
    pixel_format::output_len(width, height).ok_or(ErrorKind::InvalidGeometry)
}

/// Converts a validated frame into a caller provided buffer.
///
/// Only the first `4 * width * height` bytes of `dst` are written; the buffer can be
/// reused across frames of the same size.
///
/// # Errors
///
/// * [`NotEnoughData`] if `dst` is shorter than [`get_output_size`] bytes
///
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
/// [`get_output_size`]: ./fn.get_output_size.html
pub fn convert_frame_into(
    frame: &FrameDescriptor,
    options: &ConvertOptions,
    dst: &mut [u8],
) -> Result<(), ErrorKind> {
    let size =
        pixel_format::output_len(frame.width(), frame.height()).ok_or(ErrorKind::NotEnoughData)?;
    let dst = dst.get_mut(..size).ok_or(ErrorKind::NotEnoughData)?;

    executor::convert_bands(frame, options.pixel_format, options.workers, dst)
}

/// Converts a host frame to a newly allocated image, with the given options.
///
/// The output is allocated only once the frame is validated, and handed back only if
/// every band converted; no partial image is ever returned.
///
/// # Errors
///
/// * [`InvalidGeometry`] if the frame width or height are not positive or not even
///
/// * [`UnsupportedFormat`] if the frame format code is not [`YUV_420_888`]
///
/// * [`InvalidValue`] if a plane has non-positive strides, or rows that overlap
///
/// * [`NotEnoughData`] if a plane is missing or is shorter than its strides require
///
/// # Algorithm
/// Each chroma sample is shared by a 2x2 luma block (nearest neighbour upsampling).
/// For every block:
/// ```text
/// u = cb - 128
/// v = cr - 128
/// ruv = (1 << (SHIFT - 1)) + CVR * v
/// guv = (1 << (SHIFT - 1)) + CVG * v + CUG * u
/// buv = (1 << (SHIFT - 1)) + CUB * u
/// ```
/// and for every luma sample of the block:
/// ```text
/// l = max(0, y - 16) * CY
/// r = saturate((l + ruv) >> SHIFT)
/// g = saturate((l + guv) >> SHIFT)
/// b = saturate((l + buv) >> SHIFT)
/// a = 255
/// ```
///
/// [`InvalidGeometry`]: ./enum.ErrorKind.html#variant.InvalidGeometry
/// [`UnsupportedFormat`]: ./enum.ErrorKind.html#variant.UnsupportedFormat
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
/// [`YUV_420_888`]: ./constant.YUV_420_888.html
pub fn convert_with_options<S: FrameSource + ?Sized>(
    source: &S,
    options: &ConvertOptions,
) -> Result<RgbaImage, ErrorKind> {
    let frame = FrameDescriptor::from_source(source)?;
    let width = u32::try_from(frame.width()).map_err(|_| ErrorKind::InvalidGeometry)?;
    let height = u32::try_from(frame.height()).map_err(|_| ErrorKind::InvalidGeometry)?;
    let size =
        pixel_format::output_len(frame.width(), frame.height()).ok_or(ErrorKind::InvalidGeometry)?;

    let mut data = vec![0u8; size];
    executor::convert_bands(&frame, options.pixel_format, options.workers, &mut data)?;

    Ok(RgbaImage::from_raw(
        width,
        height,
        options.pixel_format,
        data,
    ))
}

/// Converts a host frame to a newly allocated RGBA image, using every worker of the
/// global pool.
///
/// # Errors
///
/// See [`convert_with_options`].
///
/// [`convert_with_options`]: ./fn.convert_with_options.html
pub fn convert<S: FrameSource + ?Sized>(source: &S) -> Result<RgbaImage, ErrorKind> {
    convert_with_options(source, &ConvertOptions::default())
}

/// Converts a host frame, mapping any rejection to the empty image.
///
/// Frames that cannot be converted are expected (for instance while the camera is
/// reconfigured), so the reason is only logged.
pub fn convert_or_empty<S: FrameSource + ?Sized>(source: &S) -> RgbaImage {
    log::debug!("converting frame");
    match convert(source) {
        Ok(image) => {
            log::debug!("converted image {} {}", image.width(), image.height());
            image
        }
        Err(err) => {
            log::debug!("frame dropped: {err}");
            RgbaImage::empty()
        }
    }
}

#[doc(hidden)]
pub mod c_api {
    #![allow(clippy::wildcard_imports)]
    use super::*; // We are importing everything
    use super::pixel_format::NUMBER_OF_PLANES;
    use std::slice;

    #[repr(C)]
    pub enum Result {
        Ok,
        Err,
    }

    /// One plane of a frame, as seen from C
    #[repr(C)]
    pub struct PlaneRecord {
        pub data: *const u8,
        pub len: usize,
        pub pixel_stride: i32,
        pub row_stride: i32,
    }

    unsafe fn set_error(error: *mut ErrorKind, value: ErrorKind) -> self::Result {
        if !error.is_null() {
            *error = value;
        }

        self::Result::Err
    }

    #[no_mangle]
    pub unsafe extern "C" fn yfc_get_output_size(
        width: i32,
        height: i32,
        size: *mut usize,
        error: *mut ErrorKind,
    ) -> self::Result {
        if size.is_null() {
            return set_error(error, ErrorKind::InvalidValue);
        }

        match get_output_size(width, height) {
            Ok(value) => {
                *size = value;
                self::Result::Ok
            }
            Err(error_kind) => set_error(error, error_kind),
        }
    }

    #[no_mangle]
    pub unsafe extern "C" fn yfc_convert_frame(
        width: i32,
        height: i32,
        format_code: i32,
        planes: *const PlaneRecord,
        pixel_format: i32,
        workers: usize,
        dst: *mut u8,
        dst_len: usize,
        error: *mut ErrorKind,
    ) -> self::Result {
        // Protect from C null pointers
        if planes.is_null() || dst.is_null() {
            return set_error(error, ErrorKind::InvalidValue);
        }

        // C enums are untrusted in the sense you can cast any value to an enum type
        let pixel_format = match PixelFormat::try_from(pixel_format) {
            Ok(pixel_format) => pixel_format,
            Err(error_kind) => return set_error(error, error_kind),
        };

        let records = slice::from_raw_parts(planes, NUMBER_OF_PLANES);
        if records.iter().any(|record| record.data.is_null()) {
            return set_error(error, ErrorKind::InvalidValue);
        }

        let plane = |record: &PlaneRecord| SourcePlane {
            data: slice::from_raw_parts(record.data, record.len),
            pixel_stride: record.pixel_stride,
            row_stride: record.row_stride,
        };

        let source = HostFrame {
            width,
            height,
            format_code,
            planes: [plane(&records[0]), plane(&records[1]), plane(&records[2])],
        };

        let options = ConvertOptions {
            pixel_format,
            workers,
        };

        let dst = slice::from_raw_parts_mut(dst, dst_len);
        let result = FrameDescriptor::from_source(&source)
            .and_then(|frame| convert_frame_into(&frame, &options, dst));

        match result {
            Ok(()) => self::Result::Ok,
            Err(error_kind) => set_error(error, error_kind),
        }
    }
}
