//! SoA box arena consumed by the prune kernel.
//!
//! Six coordinate streams of equal length `NP`, indexed by sorted slot:
//! encoded `min_x`/`max_x` (signed keys, see [`crate::fp`]) and raw
//! `min_y`/`max_y`/`min_z`/`max_z` floats. `NP` rounds the box count up to a
//! multiple of 8 with at least 8 slots to spare, so a lane-wide load
//! starting at any real slot stays in bounds. Padding slots hold sentinels
//! that sort after every real box and fail every overlap test.

use std::simd::Simd;

use crate::fp::{ordered_key, ordered_key_x4};
use crate::types::Aabb;

/// Padding sentinel for the encoded `min_x` stream: above every real key.
pub(crate) const PAD_MIN_X: i32 = i32::MAX;
/// Padding sentinel for the encoded `max_x` stream: below every real key.
pub(crate) const PAD_MAX_X: i32 = i32::MIN;

pub(crate) struct BoxArena {
    pub min_x: Vec<i32>,
    pub max_x: Vec<i32>,
    pub min_y: Vec<f32>,
    pub max_y: Vec<f32>,
    pub min_z: Vec<f32>,
    pub max_z: Vec<f32>,
    /// Number of real boxes; slots `len..` are padding.
    pub len: usize,
}

impl BoxArena {
    /// Stream length for `n` boxes: round up to 8, plus an extra 8 of padding.
    #[inline]
    pub fn padded_len(n: usize) -> usize {
        (n + 15) & !7
    }

    /// Fill the streams in sorted order: slot `i` holds `boxes[remap[i]]`.
    pub fn build(boxes: &[Aabb], remap: &[u32]) -> Self {
        let n = boxes.len();
        debug_assert!(remap.len() >= n);
        let np = Self::padded_len(n);

        let mut arena = Self {
            min_x: vec![PAD_MIN_X; np],
            max_x: vec![PAD_MAX_X; np],
            min_y: vec![f32::INFINITY; np],
            max_y: vec![f32::NEG_INFINITY; np],
            min_z: vec![f32::INFINITY; np],
            max_z: vec![f32::NEG_INFINITY; np],
            len: n,
        };

        // Four boxes at a time through the vector encoder, then a scalar tail.
        let mut i = 0;
        while i + 4 <= n {
            let group = [
                &boxes[remap[i] as usize],
                &boxes[remap[i + 1] as usize],
                &boxes[remap[i + 2] as usize],
                &boxes[remap[i + 3] as usize],
            ];

            let min_x_v = Simd::from_array(group.map(|b| b.min[0]));
            let max_x_v = Simd::from_array(group.map(|b| b.max[0]));
            ordered_key_x4(min_x_v).copy_to_slice(&mut arena.min_x[i..i + 4]);
            ordered_key_x4(max_x_v).copy_to_slice(&mut arena.max_x[i..i + 4]);

            for (lane, b) in group.into_iter().enumerate() {
                arena.min_y[i + lane] = b.min[1];
                arena.max_y[i + lane] = b.max[1];
                arena.min_z[i + lane] = b.min[2];
                arena.max_z[i + lane] = b.max[2];
            }
            i += 4;
        }
        while i < n {
            let b = &boxes[remap[i] as usize];
            arena.min_x[i] = ordered_key(b.min[0]);
            arena.max_x[i] = ordered_key(b.max[0]);
            arena.min_y[i] = b.min[1];
            arena.max_y[i] = b.max[1];
            arena.min_z[i] = b.min[2];
            arena.max_z[i] = b.max[2];
            i += 1;
        }

        arena
    }
}
