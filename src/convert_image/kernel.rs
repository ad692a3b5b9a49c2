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
use crate::color_matrix::{ChromaTerms, DEFAULT_ALPHA};
use crate::frame::FrameDescriptor;
use crate::pixel_format::PixelFormat;
use crate::ErrorKind;

const DEPTH: usize = PixelFormat::DEPTH;

/// Store 3 channels and an opaque alpha into a 4 byte pixel
///
/// REVERSED=false: r, g, b, a
/// REVERSED=true:  b, g, r, a
#[inline(always)]
fn pack_ui8x3<const REVERSED: bool>(pixel: &mut [u8], (r, g, b): (u8, u8, u8)) {
    if REVERSED {
        pixel[0] = b;
        pixel[2] = r;
    } else {
        pixel[0] = r;
        pixel[2] = b;
    }

    pixel[1] = g;
    pixel[3] = DEFAULT_ALPHA;
}

#[inline(always)]
fn yuv420_to_rgbx<const REVERSED: bool>(
    frame: &FrameDescriptor,
    first_pair: usize,
    dst: &mut [u8],
) -> Result<(), ErrorKind> {
    let col_count = frame.width();
    let wg_width = col_count / 2;
    let rgb_stride = DEPTH * col_count;
    let wg_stride = 2 * rgb_stride;

    if wg_stride == 0 || dst.len() % wg_stride != 0 {
        return Err(ErrorKind::NotEnoughData);
    }

    let wg_height = dst.len() / wg_stride;
    if first_pair + wg_height > frame.height() / 2 {
        return Err(ErrorKind::NotEnoughData);
    }

    let [y_plane, u_plane, v_plane] = frame.planes();
    let y_pixel_stride = y_plane.pixel_stride();
    let u_pixel_stride = u_plane.pixel_stride();
    let v_pixel_stride = v_plane.pixel_stride();

    for (pair, rgb_pair) in dst.chunks_exact_mut(wg_stride).enumerate() {
        let y = first_pair + pair;
        let y_row0 = y_plane.row(2 * y, col_count).ok_or(ErrorKind::NotEnoughData)?;
        let y_row1 = y_plane
            .row(2 * y + 1, col_count)
            .ok_or(ErrorKind::NotEnoughData)?;
        let u_row = u_plane.row(y, wg_width).ok_or(ErrorKind::NotEnoughData)?;
        let v_row = v_plane.row(y, wg_width).ok_or(ErrorKind::NotEnoughData)?;

        let (rgb_row0, rgb_row1) = rgb_pair.split_at_mut(rgb_stride);
        let groups = rgb_row0
            .chunks_exact_mut(2 * DEPTH)
            .zip(rgb_row1.chunks_exact_mut(2 * DEPTH));

        // Rows were sliced to span exactly wg_width chroma and col_count luma samples
        for (x, (rgb0, rgb1)) in groups.enumerate() {
            let terms = ChromaTerms::new(u_row[x * u_pixel_stride], v_row[x * v_pixel_stride]);
            let y0 = 2 * x * y_pixel_stride;
            let y1 = y0 + y_pixel_stride;

            pack_ui8x3::<REVERSED>(&mut rgb0[..DEPTH], terms.apply(y_row0[y0]));
            pack_ui8x3::<REVERSED>(&mut rgb0[DEPTH..], terms.apply(y_row0[y1]));
            pack_ui8x3::<REVERSED>(&mut rgb1[..DEPTH], terms.apply(y_row1[y0]));
            pack_ui8x3::<REVERSED>(&mut rgb1[DEPTH..], terms.apply(y_row1[y1]));
        }
    }

    Ok(())
}

/// Converts the row pairs starting at `first_pair` into `dst`.
///
/// `dst` holds whole output row pairs, tightly packed, and its length selects how many
/// pairs are converted. Each chroma sample is reused for the 2x2 luma block it covers.
///
/// Fails with `NotEnoughData` if `dst` is not a whole number of row pairs or reaches
/// past the bottom of the frame.
pub fn yuv420_to_rgba_band(
    frame: &FrameDescriptor,
    first_pair: usize,
    dst: &mut [u8],
    pixel_format: PixelFormat,
) -> Result<(), ErrorKind> {
    if pixel_format.reversed() {
        yuv420_to_rgbx::<true>(frame, first_pair, dst)
    } else {
        yuv420_to_rgbx::<false>(frame, first_pair, dst)
    }
}
