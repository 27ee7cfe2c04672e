//! Benchmark sweep-prune at large scales.
//!
//! Run with: cargo run --release --bin bench_prune
//!
//! Usage:
//!   bench_prune               Run default size (100k)
//!   bench_prune 10k 100k 1m   Run multiple sizes
//!   bench_prune --validate    Compare pair counts against the O(N^2) oracle
//!   bench_prune -n 50         Run 50 timed repeats (for profiling)
//!
//! For a parallel oracle, build with: cargo run --release --features parallel --bin bench_prune

use clap::Parser;
use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use std::time::Instant;
use sweep_prune::{bipartite_prune_with, complete_prune_with, Aabb, PruneScratch};

fn parse_count(s: &str) -> Result<usize, String> {
    let s = s.to_lowercase();
    let (num_str, multiplier) = if s.ends_with('m') {
        (&s[..s.len() - 1], 1_000_000)
    } else if s.ends_with('k') {
        (&s[..s.len() - 1], 1_000)
    } else {
        (s.as_str(), 1)
    };

    num_str
        .parse::<f64>()
        .map(|n| (n * multiplier as f64) as usize)
        .map_err(|e| format!("Invalid number '{}': {}", s, e))
}

#[derive(Parser)]
#[command(name = "bench_prune")]
#[command(about = "Benchmark sweep-prune at various scales")]
struct Args {
    /// Box counts to benchmark (e.g., 10k, 100k, 1m)
    #[arg(value_parser = parse_count)]
    sizes: Vec<usize>,

    /// Random seed
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Box edge length as a multiple of the mean spacing (higher = denser)
    #[arg(long, default_value_t = 1.0)]
    edge_scale: f32,

    /// Number of timed repeats per size
    #[arg(short = 'n', long, default_value_t = 9)]
    repeats: usize,

    /// Also benchmark the bipartite prune (input split in half)
    #[arg(long)]
    bipartite: bool,

    /// Compare pair counts against the O(N^2) oracle (slow above ~50k)
    #[arg(long)]
    validate: bool,
}

/// Spacing at which n boxes tile the unit cube: boxes with edges around this
/// length give O(1) overlaps per box, the physics broad-phase regime.
fn mean_spacing(n: usize) -> f32 {
    if n == 0 {
        return 0.0;
    }
    (1.0 / n as f32).cbrt()
}

fn generate_boxes(n: usize, seed: u64, edge_scale: f32) -> Vec<Aabb> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let edge = mean_spacing(n) * edge_scale;

    (0..n)
        .map(|_| {
            let center = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
            let half = Vec3::new(
                rng.gen_range(0.25..1.0) * edge * 0.5,
                rng.gen_range(0.25..1.0) * edge * 0.5,
                rng.gen_range(0.25..1.0) * edge * 0.5,
            );
            Aabb::from_center_half_extent(center, half)
        })
        .collect()
}

fn median(mut xs: Vec<f64>) -> f64 {
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = xs.len() / 2;
    if xs.len() % 2 == 0 {
        0.5 * (xs[mid - 1] + xs[mid])
    } else {
        xs[mid]
    }
}

fn format_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}k", n / 1_000)
    } else {
        format!("{}", n)
    }
}

fn format_rate(count: usize, ms: f64) -> String {
    if ms <= 0.0 {
        return "N/A".to_string();
    }
    let per_sec = count as f64 / (ms / 1000.0);
    if per_sec >= 1_000_000.0 {
        format!("{:.2}M/s", per_sec / 1_000_000.0)
    } else if per_sec >= 1_000.0 {
        format!("{:.1}k/s", per_sec / 1000.0)
    } else {
        format!("{:.0}/s", per_sec)
    }
}

fn brute_force_pair_count(boxes: &[Aabb]) -> usize {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..boxes.len())
            .into_par_iter()
            .map(|i| {
                let bi = &boxes[i];
                boxes[i + 1..].iter().filter(|bj| bi.overlaps(bj)).count()
            })
            .sum()
    }
    #[cfg(not(feature = "parallel"))]
    {
        sweep_prune::validation::brute_force_pairs(boxes).len()
    }
}

fn bench_complete(boxes: &[Aabb], repeats: usize, validate: bool) {
    let n = boxes.len();
    let mut scratch = PruneScratch::new();

    // Warmup also gives us the pair count.
    let pairs = complete_prune_with(boxes, &mut scratch);
    let num_pairs = pairs.len();
    black_box(&pairs);

    let mut samples = Vec::with_capacity(repeats);
    for _ in 0..repeats {
        let t0 = Instant::now();
        let pairs = complete_prune_with(boxes, &mut scratch);
        samples.push(t0.elapsed().as_secs_f64() * 1000.0);
        black_box(&pairs);
    }
    let med = median(samples);

    println!(
        "complete  {:>7} boxes  {:>10} pairs  {:>9.3} ms  {:>10} boxes  {:>10} pairs",
        format_num(n),
        format_num(num_pairs),
        med,
        format_rate(n, med),
        format_rate(num_pairs, med),
    );

    if validate {
        let expected = brute_force_pair_count(boxes);
        if expected == num_pairs {
            println!("          oracle agrees: {} pairs", format_num(expected));
        } else {
            println!(
                "          MISMATCH: oracle {} vs engine {}",
                expected, num_pairs
            );
        }
    }
}

fn bench_bipartite(boxes: &[Aabb], repeats: usize) {
    let mid = boxes.len() / 2;
    let (a, b) = boxes.split_at(mid);
    let mut scratch = PruneScratch::new();

    let pairs = bipartite_prune_with(a, b, &mut scratch);
    let num_pairs = pairs.len();
    black_box(&pairs);

    let mut samples = Vec::with_capacity(repeats);
    for _ in 0..repeats {
        let t0 = Instant::now();
        let pairs = bipartite_prune_with(a, b, &mut scratch);
        samples.push(t0.elapsed().as_secs_f64() * 1000.0);
        black_box(&pairs);
    }
    let med = median(samples);

    println!(
        "bipartite {:>7} boxes  {:>10} pairs  {:>9.3} ms  {:>10} boxes  {:>10} pairs",
        format_num(boxes.len()),
        format_num(num_pairs),
        med,
        format_rate(boxes.len(), med),
        format_rate(num_pairs, med),
    );
}

fn main() {
    let args = Args::parse();

    let sizes = if args.sizes.is_empty() {
        vec![100_000]
    } else {
        args.sizes.clone()
    };

    println!(
        "seed={} edge_scale={} repeats={}",
        args.seed, args.edge_scale, args.repeats
    );
    println!(
        "{:>9} {:>13} {:>17} {:>12} {:>17} {:>17}",
        "mode", "n", "pairs", "median", "boxes/s", "pairs/s"
    );

    for &n in &sizes {
        let boxes = generate_boxes(n, args.seed, args.edge_scale);
        bench_complete(&boxes, args.repeats.max(1), args.validate);
        if args.bipartite {
            bench_bipartite(&boxes, args.repeats.max(1));
        }
    }
}
