//! Bipartite sweeps: overlaps between two independently sorted sets.
//!
//! Two right-scans, one per set. The running pointers use asymmetric
//! predicates — strict `<` when scanning B against A, `<=` when scanning A
//! against B — so pairs with coincident `min_x` are reported by the first
//! pass only and every A-B pair surfaces exactly once.

use crate::pairs::PairBuffer;
use crate::types::Aabb;

/// Inclusive Y/Z overlap; the X test is implicit in the sorted window.
#[inline(always)]
fn intersects_yz(a: &Aabb, b: &Aabb) -> bool {
    b.max[1] >= a.min[1] && b.min[1] <= a.max[1] && b.max[2] >= a.min[2] && b.min[2] <= a.max[2]
}

/// Sweep two sorted box lists against each other.
///
/// `a_sorted[i]` must be `a[remap_a[i]]` in ascending `min_x` order (same
/// for B). Pairs are emitted as (caller-A-index, caller-B-index) in both
/// passes.
pub(crate) fn sweep(
    a_sorted: &[Aabb],
    remap_a: &[u32],
    b_sorted: &[Aabb],
    remap_b: &[u32],
    out: &mut PairBuffer,
) {
    let na = a_sorted.len();
    let nb = b_sorted.len();

    // Pass 1: for each box of A, boxes of B whose min_x starts inside A's
    // window (coincident min_x included).
    let mut rb = 0usize;
    for i in 0..na {
        let box_a = &a_sorted[i];
        let min_limit = box_a.min[0];
        while rb < nb && b_sorted[rb].min[0] < min_limit {
            rb += 1;
        }
        if rb >= nb {
            break;
        }

        let id_a = remap_a[i];
        let max_limit = box_a.max[0];
        let mut j = rb;
        while j < nb && b_sorted[j].min[0] <= max_limit {
            if intersects_yz(box_a, &b_sorted[j]) {
                out.push_pair(id_a, remap_b[j]);
            }
            j += 1;
        }
    }

    // Pass 2: for each box of B, boxes of A whose min_x lies strictly above
    // B's (the `<=` advance skips the coincident ones pass 1 already took).
    let mut ra = 0usize;
    for i in 0..nb {
        let box_b = &b_sorted[i];
        let min_limit = box_b.min[0];
        while ra < na && a_sorted[ra].min[0] <= min_limit {
            ra += 1;
        }
        if ra >= na {
            break;
        }

        let id_b = remap_b[i];
        let max_limit = box_b.max[0];
        let mut j = ra;
        while j < na && a_sorted[j].min[0] <= max_limit {
            if intersects_yz(&a_sorted[j], box_b) {
                out.push_pair(remap_a[j], id_b);
            }
            j += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::RadixSorter;

    fn run_sweep(a: &[Aabb], b: &[Aabb]) -> Vec<(u32, u32)> {
        let mut sorter_a = RadixSorter::new();
        let mut sorter_b = RadixSorter::new();

        let mut keys_a: Vec<f32> = a.iter().map(|x| x.min[0]).collect();
        keys_a.push(f32::INFINITY);
        let remap_a = sorter_a.sort(&keys_a);
        let a_sorted: Vec<Aabb> = remap_a[..a.len()].iter().map(|&r| a[r as usize]).collect();

        let mut keys_b: Vec<f32> = b.iter().map(|x| x.min[0]).collect();
        keys_b.push(f32::INFINITY);
        let remap_b = sorter_b.sort(&keys_b);
        let b_sorted: Vec<Aabb> = remap_b[..b.len()].iter().map(|&r| b[r as usize]).collect();

        let mut out = PairBuffer::with_capacity(PairBuffer::SLACK);
        sweep(&a_sorted, remap_a, &b_sorted, remap_b, &mut out);
        let mut pairs: Vec<(u32, u32)> = out.finish().iter().collect();
        pairs.sort_unstable();
        pairs
    }

    fn brute_force(a: &[Aabb], b: &[Aabb]) -> Vec<(u32, u32)> {
        let mut pairs = Vec::new();
        for (i, box_a) in a.iter().enumerate() {
            for (j, box_b) in b.iter().enumerate() {
                if box_a.overlaps(box_b) {
                    pairs.push((i as u32, j as u32));
                }
            }
        }
        pairs
    }

    fn lcg_boxes(n: usize, mut seed: u64, world: f32, edge: f32) -> Vec<Aabb> {
        let mut unit = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 40) as f32 / (1u64 << 24) as f32
        };
        (0..n)
            .map(|_| {
                let min = [unit() * world, unit() * world, unit() * world];
                let max = [
                    min[0] + unit() * edge,
                    min[1] + unit() * edge,
                    min[2] + unit() * edge,
                ];
                Aabb::new(min, max)
            })
            .collect()
    }

    #[test]
    fn test_sweep_matches_brute_force() {
        for (na, nb) in [(0, 0), (1, 0), (0, 1), (1, 1), (10, 3), (50, 50), (200, 130)] {
            for seed in 0..4u64 {
                let a = lcg_boxes(na, seed * 11 + 1, 10.0, 2.0);
                let b = lcg_boxes(nb, seed * 13 + 5, 10.0, 2.0);
                assert_eq!(
                    run_sweep(&a, &b),
                    brute_force(&a, &b),
                    "na={na} nb={nb} seed={seed}"
                );
            }
        }
    }

    #[test]
    fn test_coincident_min_x_reported_once() {
        // Same min_x in both sets: the `<` / `<=` asymmetry must not
        // double-report or drop these.
        let a = vec![
            Aabb::new([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]),
            Aabb::new([1.0, 0.5, 0.0], [3.0, 1.5, 1.0]),
        ];
        let b = vec![
            Aabb::new([1.0, 0.2, 0.0], [2.5, 1.2, 1.0]),
            Aabb::new([1.0, 9.0, 9.0], [2.0, 10.0, 10.0]),
        ];
        let pairs = run_sweep(&a, &b);
        assert_eq!(pairs, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn test_pair_order_is_a_then_b() {
        let a = vec![Aabb::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])];
        let b = vec![
            Aabb::new([2.0, 2.0, 2.0], [3.0, 3.0, 3.0]),
            Aabb::new([0.5, 0.5, 0.5], [1.5, 1.5, 1.5]),
        ];
        let pairs = run_sweep(&a, &b);
        assert_eq!(pairs, vec![(0, 1)]);
    }

    #[test]
    fn test_identical_sets() {
        let a = lcg_boxes(40, 77, 5.0, 1.5);
        let pairs = run_sweep(&a, &a);
        // Every box pairs with itself, and each cross pair shows up in both
        // orientations (bipartite sets are independent).
        assert_eq!(pairs, brute_force(&a, &a));
        for (i, _) in a.iter().enumerate() {
            assert!(pairs.binary_search(&(i as u32, i as u32)).is_ok());
        }
    }
}
