#![feature(portable_simd)]

//! SIMD sweep-and-prune broad-phase collision pruning.
//!
//! Given one set (or two sets) of axis-aligned bounding boxes, this crate
//! produces the complete list of overlapping pairs. Boxes are sorted along
//! X, re-laid-out into structure-of-arrays coordinate streams, and swept
//! with a SIMD kernel that tests 4 or 8 candidates per iteration on Y/Z,
//! decoding hit bitmasks straight into a flat pair buffer.
//!
//! The overlap predicate is inclusive: boxes touching at a face, edge or
//! corner are reported.
//!
//! # Example
//!
//! ```
//! use sweep_prune::{complete_prune, Aabb};
//!
//! let boxes = vec![
//!     Aabb::new([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]),
//!     Aabb::new([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]),
//!     Aabb::new([10.0, 10.0, 10.0], [11.0, 11.0, 11.0]),
//! ];
//!
//! let pairs = complete_prune(&boxes);
//! assert_eq!(pairs.len(), 1);
//! let (a, b) = pairs.get(0);
//! assert_eq!((a.min(b), a.max(b)), (0, 1));
//! ```

mod arena;
mod bipartite;
mod fp;
mod kernel;
mod pairs;
mod sort;
mod types;
pub mod validation;

pub use pairs::PairList;
pub use sort::RadixSorter;
pub use types::{Aabb, AabbLike};

use arena::BoxArena;
use pairs::PairBuffer;

/// Reusable per-thread scratch for the prune entry points.
///
/// Holds the sorters' rank buffers and the key staging vector, so a
/// simulation loop pruning every frame does not reallocate. Purely an
/// optimization: a fresh scratch gives identical results.
#[derive(Debug, Default)]
pub struct PruneScratch {
    sorter_a: RadixSorter,
    sorter_b: RadixSorter,
    keys: Vec<f32>,
}

impl PruneScratch {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Find all overlapping pairs within one set of boxes.
///
/// Returns each unordered pair exactly once (in caller indices, orientation
/// unspecified); a box is never paired with itself. Coordinate-identical
/// boxes count as overlapping. `N = 0` yields an empty list.
pub fn complete_prune<B: AabbLike>(boxes: &[B]) -> PairList {
    complete_prune_with(boxes, &mut PruneScratch::new())
}

/// [`complete_prune`] reusing caller-owned scratch buffers.
pub fn complete_prune_with<B: AabbLike>(boxes: &[B], scratch: &mut PruneScratch) -> PairList {
    let n = boxes.len();
    if n == 0 {
        return PairList::default();
    }
    let list: Vec<Aabb> = boxes.iter().map(Aabb::from_like).collect();

    let PruneScratch { sorter_a, keys, .. } = scratch;
    keys.clear();
    keys.extend(list.iter().map(|b| b.min[0]));
    keys.push(f32::INFINITY);
    let remap = sorter_a.sort(keys);

    let arena = BoxArena::build(&list, remap);
    let mut out = PairBuffer::with_capacity(2 * n);
    kernel::prune(&arena, remap, &mut out);
    out.finish()
}

/// Find all overlapping pairs across two sets of boxes.
///
/// Every overlapping combination is reported exactly once, as
/// (caller-A-index, caller-B-index). The sets are independent: if the same
/// box appears in both, the pair is still reported. Either set being empty
/// yields an empty list.
pub fn bipartite_prune<A: AabbLike, B: AabbLike>(a: &[A], b: &[B]) -> PairList {
    bipartite_prune_with(a, b, &mut PruneScratch::new())
}

/// [`bipartite_prune`] reusing caller-owned scratch buffers.
pub fn bipartite_prune_with<A: AabbLike, B: AabbLike>(
    a: &[A],
    b: &[B],
    scratch: &mut PruneScratch,
) -> PairList {
    if a.is_empty() || b.is_empty() {
        return PairList::default();
    }
    let list_a: Vec<Aabb> = a.iter().map(Aabb::from_like).collect();
    let list_b: Vec<Aabb> = b.iter().map(Aabb::from_like).collect();

    let PruneScratch {
        sorter_a,
        sorter_b,
        keys,
    } = scratch;

    keys.clear();
    keys.extend(list_a.iter().map(|x| x.min[0]));
    keys.push(f32::INFINITY);
    let remap_a = sorter_a.sort(keys);
    let a_sorted: Vec<Aabb> = remap_a[..list_a.len()]
        .iter()
        .map(|&r| list_a[r as usize])
        .collect();

    keys.clear();
    keys.extend(list_b.iter().map(|x| x.min[0]));
    keys.push(f32::INFINITY);
    let remap_b = sorter_b.sort(keys);
    let b_sorted: Vec<Aabb> = remap_b[..list_b.len()]
        .iter()
        .map(|&r| list_b[r as usize])
        .collect();

    let mut out = PairBuffer::with_capacity(2 * (list_a.len() + list_b.len()));
    bipartite::sweep(&a_sorted, remap_a, &b_sorted, remap_b, &mut out);
    out.finish()
}
