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
use super::kernel::yuv420_to_rgba_band;
use crate::frame::FrameDescriptor;
use crate::pixel_format::PixelFormat;
use crate::{ErrorKind, WORKERS_AUTO};

#[cfg(feature = "rayon")]
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};

/// Number of row pairs in each band when `row_pairs` are split in at most `bands` bands.
///
/// Every band but the last holds exactly this many pairs, so bands are disjoint and,
/// taken in order, cover `[0, row_pairs)`.
pub fn pairs_per_band(row_pairs: usize, bands: usize) -> usize {
    row_pairs.div_ceil(bands.clamp(1, row_pairs.max(1))).max(1)
}

/// Worker count a conversion will use for a given `workers` option
pub fn resolve_workers(workers: usize) -> usize {
    if workers != WORKERS_AUTO {
        return workers;
    }

    #[cfg(feature = "rayon")]
    {
        rayon::current_num_threads()
    }

    #[cfg(not(feature = "rayon"))]
    {
        1
    }
}

/// Threads of the pool running `workers` bands, capped at the global pool size
#[cfg(feature = "rayon")]
pub fn pool_threads(workers: usize) -> usize {
    workers.clamp(1, rayon::current_num_threads().max(1))
}

fn run_sequential(
    frame: &FrameDescriptor,
    pixel_format: PixelFormat,
    band_bytes: usize,
    band_pairs: usize,
    dst: &mut [u8],
) -> Result<(), ErrorKind> {
    dst.chunks_mut(band_bytes)
        .enumerate()
        .try_for_each(|(band, chunk)| {
            yuv420_to_rgba_band(frame, band * band_pairs, chunk, pixel_format)
        })
}

#[cfg(feature = "rayon")]
fn run_parallel(
    frame: &FrameDescriptor,
    pixel_format: PixelFormat,
    band_bytes: usize,
    band_pairs: usize,
    dst: &mut [u8],
) -> Result<(), ErrorKind> {
    dst.par_chunks_mut(band_bytes)
        .enumerate()
        .try_for_each(|(band, chunk)| {
            yuv420_to_rgba_band(frame, band * band_pairs, chunk, pixel_format)
        })
}

/// Converts the whole frame into `dst`, one band of row pairs per worker.
///
/// `dst` must be exactly `4 * width * height` bytes. Bands write disjoint rows of `dst`
/// and only read the frame, so the result does not depend on `workers`. The first band
/// error aborts the conversion and is returned as is.
///
/// With `WORKERS_AUTO`, or a count at least as large as the global rayon pool, the
/// global pool is used. A smaller count greater than one runs on a dedicated pool of
/// that size, built for the call; if that pool cannot be built the frame is converted
/// on the calling thread.
pub fn convert_bands(
    frame: &FrameDescriptor,
    pixel_format: PixelFormat,
    workers: usize,
    dst: &mut [u8],
) -> Result<(), ErrorKind> {
    let row_pairs = frame.height() / 2;
    let pair_bytes = 2 * PixelFormat::DEPTH * frame.width();
    if dst.len() != row_pairs * pair_bytes {
        return Err(ErrorKind::NotEnoughData);
    }

    let workers = resolve_workers(workers).max(1);
    let band_pairs = pairs_per_band(row_pairs, workers);
    let band_bytes = band_pairs * pair_bytes;
    log::trace!(
        "converting {}x{} frame: {} workers, {} row pairs per band",
        frame.width(),
        frame.height(),
        workers,
        band_pairs
    );

    #[cfg(feature = "rayon")]
    {
        if workers == 1 || band_pairs == row_pairs {
            return run_sequential(frame, pixel_format, band_bytes, band_pairs, dst);
        }

        // Band count follows `workers`, threads never exceed the global pool
        let threads = pool_threads(workers);
        if threads == rayon::current_num_threads() {
            return run_parallel(frame, pixel_format, band_bytes, band_pairs, dst);
        }

        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => {
                pool.install(|| run_parallel(frame, pixel_format, band_bytes, band_pairs, dst))
            }
            Err(err) => {
                log::warn!(
                    "unable to build a pool of {threads} threads ({err}), converting sequentially"
                );
                run_sequential(frame, pixel_format, band_bytes, band_pairs, dst)
            }
        }
    }

    #[cfg(not(feature = "rayon"))]
    run_sequential(frame, pixel_format, band_bytes, band_pairs, dst)
}
