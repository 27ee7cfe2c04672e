//! The sweep kernel: for each box, scan forward through X-overlapping
//! neighbors and test Y/Z a whole SIMD group at a time.
//!
//! Sorting on `min_x` makes the candidate set for each box a contiguous
//! forward window. A running lower bound `r` advances monotonically, so the
//! total advancement work is O(N); the arena's padding sentinels terminate
//! every scan without separate length checks.

use std::simd::cmp::SimdPartialOrd;
use std::simd::Simd;

use crate::arena::BoxArena;
use crate::pairs::PairBuffer;

/// Run the widest kernel the host supports (8 lanes with AVX2, else 4).
pub(crate) fn prune(arena: &BoxArena, remap: &[u32], out: &mut PairBuffer) {
    // Not worth broadcasting and masking for a handful of boxes.
    if arena.len < 16 {
        return prune_scalar(arena, remap, out);
    }
    #[cfg(target_arch = "x86_64")]
    if is_x86_feature_detected!("avx2") {
        return prune_simd::<8>(arena, remap, out);
    }
    prune_simd::<4>(arena, remap, out)
}

pub(crate) fn prune_simd<const LANES: usize>(
    arena: &BoxArena,
    remap: &[u32],
    out: &mut PairBuffer,
) {
    let n = arena.len;
    let min_x = arena.min_x.as_slice();
    let max_x = arena.max_x.as_slice();
    let min_y = arena.min_y.as_slice();
    let max_y = arena.max_y.as_slice();
    let min_z = arena.min_z.as_slice();
    let max_z = arena.max_z.as_slice();

    let mut r = 0usize;
    for i in 0..n {
        let min_limit = min_x[i];
        // Advance past everything strictly left of the window, then step one
        // further: the stepped slot is the first unconsumed member of box
        // i's min_x tie group (usually i itself). That one extra step is
        // what makes tie groups emit each pair exactly once and never pairs
        // a box with itself.
        while min_x[r] < min_limit {
            r += 1;
        }
        r += 1;
        if r >= n {
            // No slot right of r can start inside this or any later window.
            return;
        }

        let max_limit = max_x[i];
        let id0 = remap[i];

        let min_y_i = Simd::<f32, LANES>::splat(min_y[i]);
        let max_y_i = Simd::<f32, LANES>::splat(max_y[i]);
        let min_z_i = Simd::<f32, LANES>::splat(min_z[i]);
        let max_z_i = Simd::<f32, LANES>::splat(max_z[i]);

        // Main loop: the whole group starts inside the X window.
        let mut j = r;
        while min_x[j + LANES - 1] <= max_limit {
            let hits = Simd::<f32, LANES>::from_slice(&max_y[j..]).simd_ge(min_y_i)
                & Simd::<f32, LANES>::from_slice(&min_y[j..]).simd_le(max_y_i)
                & Simd::<f32, LANES>::from_slice(&max_z[j..]).simd_ge(min_z_i)
                & Simd::<f32, LANES>::from_slice(&min_z[j..]).simd_le(max_z_i);
            j += LANES;

            let mask = hits.to_bitmask() as u32;
            if mask != 0 {
                out.reserve_slack();
                out.emit_batch(id0, remap, j - LANES, mask);
            }
        }

        // Tail group: starts inside the window but runs past it (or into the
        // padding). The encoded keys compare as signed integers, so one
        // packed compare builds the out-of-window mask for any sign mix.
        if min_x[j] <= max_limit {
            let outside =
                Simd::<i32, LANES>::from_slice(&min_x[j..]).simd_gt(Simd::splat(max_limit));
            let hits = Simd::<f32, LANES>::from_slice(&max_y[j..]).simd_ge(min_y_i)
                & Simd::<f32, LANES>::from_slice(&min_y[j..]).simd_le(max_y_i)
                & Simd::<f32, LANES>::from_slice(&max_z[j..]).simd_ge(min_z_i)
                & Simd::<f32, LANES>::from_slice(&min_z[j..]).simd_le(max_z_i)
                & !outside;

            let mask = hits.to_bitmask() as u32;
            if mask != 0 {
                out.reserve_slack();
                out.emit_batch(id0, remap, j, mask);
            }
        }
    }
}

/// One-candidate-at-a-time reference kernel. Same pair set as the SIMD
/// kernels; used as the equivalence baseline and for inputs too small to
/// amortize the broadcast setup.
pub(crate) fn prune_scalar(arena: &BoxArena, remap: &[u32], out: &mut PairBuffer) {
    let n = arena.len;
    let min_x = arena.min_x.as_slice();
    let max_x = arena.max_x.as_slice();
    let min_y = arena.min_y.as_slice();
    let max_y = arena.max_y.as_slice();
    let min_z = arena.min_z.as_slice();
    let max_z = arena.max_z.as_slice();

    let mut r = 0usize;
    for i in 0..n {
        let min_limit = min_x[i];
        while min_x[r] < min_limit {
            r += 1;
        }
        r += 1;
        if r >= n {
            return;
        }

        let max_limit = max_x[i];
        let id0 = remap[i];
        let (min_y_i, max_y_i) = (min_y[i], max_y[i]);
        let (min_z_i, max_z_i) = (min_z[i], max_z[i]);

        let mut j = r;
        while min_x[j] <= max_limit {
            if max_y[j] >= min_y_i
                && min_y[j] <= max_y_i
                && max_z[j] >= min_z_i
                && min_z[j] <= max_z_i
            {
                out.push_pair(id0, remap[j]);
            }
            j += 1;
        }
    }
}
