#![allow(dead_code)]

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sweep_prune::Aabb;

/// Random boxes with corners in `[0, world)^3` and edges up to `edge`.
pub fn uniform_cloud(n: usize, world: f32, edge: f32, seed: u64) -> Vec<Aabb> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    uniform_cloud_with_rng(n, world, edge, &mut rng)
}

pub fn uniform_cloud_with_rng<R: Rng + ?Sized>(
    n: usize,
    world: f32,
    edge: f32,
    rng: &mut R,
) -> Vec<Aabb> {
    (0..n)
        .map(|_| {
            let min = Vec3::new(
                rng.gen_range(0.0..world),
                rng.gen_range(0.0..world),
                rng.gen_range(0.0..world),
            );
            let extent = Vec3::new(
                rng.gen_range(0.0..edge),
                rng.gen_range(0.0..edge),
                rng.gen_range(0.0..edge),
            );
            Aabb::from_corners(min, min + extent)
        })
        .collect()
}

/// Dense clusters plus sparse background: stresses long overlap runs while
/// keeping most of the sweep sparse.
pub fn clustered_cloud(
    n: usize,
    clusters: usize,
    cluster_radius: f32,
    edge: f32,
    seed: u64,
) -> Vec<Aabb> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let world = 100.0f32;

    let centers: Vec<Vec3> = (0..clusters.max(1))
        .map(|_| {
            Vec3::new(
                rng.gen_range(0.0..world),
                rng.gen_range(0.0..world),
                rng.gen_range(0.0..world),
            )
        })
        .collect();

    (0..n)
        .map(|i| {
            let c = centers[i % centers.len()];
            let offset = Vec3::new(
                rng.gen_range(-cluster_radius..cluster_radius),
                rng.gen_range(-cluster_radius..cluster_radius),
                rng.gen_range(-cluster_radius..cluster_radius),
            );
            let half = Vec3::splat(rng.gen_range(0.1..1.0) * edge * 0.5);
            Aabb::from_center_half_extent(c + offset, half)
        })
        .collect()
}

/// `dim^3` unit cubes tiling a grid with one-cell gaps, so nothing overlaps.
pub fn sparse_grid_cubes(dim: usize) -> Vec<Aabb> {
    let mut boxes = Vec::with_capacity(dim * dim * dim);
    for x in 0..dim {
        for y in 0..dim {
            for z in 0..dim {
                let min = Vec3::new(2.0 * x as f32, 2.0 * y as f32, 2.0 * z as f32);
                boxes.push(Aabb::from_corners(min, min + Vec3::ONE));
            }
        }
    }
    boxes
}

/// Boxes all sharing the same `min.x`, stacked along Y with overlap depth
/// `reach` (each box overlaps the next `reach` boxes above it).
pub fn tie_column(n: usize, reach: usize) -> Vec<Aabb> {
    (0..n)
        .map(|i| {
            let y = i as f32;
            Aabb::new([5.0, y, 0.0], [6.0, y + reach as f32, 1.0])
        })
        .collect()
}

/// A chain of unit cubes along X, each sharing a face with the next.
pub fn touching_chain(n: usize) -> Vec<Aabb> {
    (0..n)
        .map(|i| {
            let x = i as f32;
            Aabb::new([x, 0.0, 0.0], [x + 1.0, 1.0, 1.0])
        })
        .collect()
}
