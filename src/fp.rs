//! Order-preserving float key encoding.
//!
//! The X-axis streams of the box arena store `min.x`/`max.x` as signed
//! integers so the kernel's tail group can compare them with a packed
//! integer compare regardless of sign. The encoding must satisfy
//! `ordered_key(a) <= ordered_key(b)` (as `i32`) iff `a <= b`, for all
//! non-NaN inputs, with `-0.0` and `+0.0` mapping to the same key.

use std::simd::num::{SimdFloat, SimdUint};
use std::simd::{i32x4, Simd};

/// Map a float to a signed integer key preserving `<=`.
///
/// The `+ 0.0` is not a no-op: under the IEEE-754 round-to-nearest default
/// it canonicalizes `-0.0` to `+0.0`, so both zeros share one key. (rustc
/// does not emit fast-math flags, so the addition cannot be folded away.)
/// For negative inputs the low 31 bits are flipped, which reverses the
/// magnitude order while keeping the sign bit, so a plain signed compare
/// orders the keys like the floats they came from.
#[inline(always)]
pub(crate) fn ordered_key(f: f32) -> i32 {
    let s = (f + 0.0).to_bits() as i32;
    s ^ ((s >> 31) & 0x7fff_ffff)
}

/// Four-lane form of [`ordered_key`]; element-wise identical to the scalar.
#[inline(always)]
pub(crate) fn ordered_key_x4(f: Simd<f32, 4>) -> i32x4 {
    let s: i32x4 = (f + Simd::splat(0.0)).to_bits().cast();
    s ^ ((s >> Simd::splat(31)) & Simd::splat(0x7fff_ffff))
}
