//! Square sliding-window maximum filter.
//!
//! Separable: a horizontal pass over rows, then the same pass over the
//! transposed intermediate. Each 1D pass uses a monotonic deque, so cost is
//! O(n) per pixel regardless of window size. Windows are truncated at the
//! border, which for a maximum is the same as reflective padding.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::raster::Plane;

/// Maximum over the `(2 * radius + 1)²` window centered on each pixel.
pub fn maximum_filter(input: &Plane<f32>, radius: usize) -> Plane<f32> {
    let width = input.width();
    let height = input.height();
    if width == 0 || height == 0 {
        return input.clone();
    }

    let rows = filter_rows(input.pixels(), width, radius);
    let transposed = transpose(&rows, width, height);
    let cols = filter_rows(&transposed, height, radius);

    Plane::new(width, height, transpose(&cols, height, width))
}

fn filter_rows(input: &[f32], width: usize, radius: usize) -> Vec<f32> {
    let mut output = vec![0.0f32; input.len()];

    output
        .par_chunks_mut(width)
        .zip(input.par_chunks(width))
        .for_each_init(
            || VecDeque::with_capacity(2 * radius + 1),
            |deque, (out_row, in_row)| sliding_max(in_row, radius, out_row, deque),
        );

    output
}

/// 1D sliding maximum with a centered window of `2 * radius + 1` samples.
fn sliding_max(input: &[f32], radius: usize, output: &mut [f32], deque: &mut VecDeque<usize>) {
    debug_assert_eq!(input.len(), output.len());
    let len = input.len();
    deque.clear();

    let mut next = 0;
    for (i, out) in output.iter_mut().enumerate() {
        let hi = (i + radius).min(len - 1);
        while next <= hi {
            while let Some(&back) = deque.back() {
                if input[back] <= input[next] {
                    deque.pop_back();
                } else {
                    break;
                }
            }
            deque.push_back(next);
            next += 1;
        }

        let lo = i.saturating_sub(radius);
        while let Some(&front) = deque.front() {
            if front < lo {
                deque.pop_front();
            } else {
                break;
            }
        }

        // The window always contains `i`, so the deque is never empty here.
        *out = deque.front().map_or(input[i], |&front| input[front]);
    }
}

/// Transposes a `width x height` row-major buffer into `height x width`.
fn transpose(input: &[f32], width: usize, height: usize) -> Vec<f32> {
    let mut output = vec![0.0f32; input.len()];

    output
        .par_chunks_mut(height)
        .enumerate()
        .for_each(|(x, out_row)| {
            for (y, out) in out_row.iter_mut().enumerate() {
                *out = input[y * width + x];
            }
        });

    output
}
