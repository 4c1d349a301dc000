#![allow(dead_code)]

use owl_core::{EntryData, WindowData};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug)]
pub struct BenchmarkTier {
    pub name: &'static str,
    pub entry_count: usize,
    pub program_count: usize,
}

/// About one working day sampled every second.
pub const TIER_S: BenchmarkTier = BenchmarkTier {
    name: "S",
    entry_count: 30_000,
    program_count: 40,
};

/// About one working week.
pub const TIER_M: BenchmarkTier = BenchmarkTier {
    name: "M",
    entry_count: 150_000,
    program_count: 120,
};

pub const TIERS: [BenchmarkTier; 2] = [TIER_S, TIER_M];

#[derive(Debug)]
pub struct SyntheticLog {
    pub tier: BenchmarkTier,
    pub seed: u64,
    pub entries: Vec<EntryData>,
}

#[derive(Clone, Copy, Debug)]
pub struct LatencySummary {
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

#[derive(Clone, Copy, Debug)]
struct Prng(u64);

impl Prng {
    const fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // 64-bit LCG constants from Numerical Recipes.
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0
    }

    fn next_index(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u64() as usize) % upper_exclusive
    }

    fn chance(&mut self, numerator: u64, denominator: u64) -> bool {
        debug_assert!(numerator <= denominator);
        self.next_u64() % denominator < numerator
    }
}

/// Generate a tracker log where a handful of programs dominate, as they do
/// on a real desktop.
pub fn generate_log(tier: BenchmarkTier, seed: u64) -> SyntheticLog {
    let mut prng = Prng::new(seed);
    let mut entries = Vec::with_capacity(tier.entry_count);
    let mut timestamp = 1_700_000_000_000_i64;

    for _ in 0..tier.entry_count {
        timestamp += 1_000;
        let mut entry = EntryData::new(timestamp);

        if prng.chance(1, 50) {
            entry = entry.with_idle(prng.next_index(3_600) as i64);
        }

        let window_count = 1 + prng.next_index(6);
        let active = prng.next_index(window_count);
        for slot in 0..window_count {
            // Skew towards low program numbers.
            let program = prng.next_index(1 + prng.next_index(tier.program_count));
            let tab = prng.next_index(8);
            let window = WindowData::new(
                format!("/usr/bin/program-{program}"),
                format!("Program {program} - tab {tab}"),
            );
            entry = entry.with_window(if slot == active { window.active() } else { window });
        }

        entries.push(entry);
    }

    SyntheticLog {
        tier,
        seed,
        entries,
    }
}

pub fn sample_latencies(iterations: usize, mut op: impl FnMut()) -> Vec<Duration> {
    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        op();
        samples.push(start.elapsed());
    }
    samples
}

pub fn summarize_latencies(samples: &[Duration]) -> LatencySummary {
    assert!(!samples.is_empty(), "at least one sample is required");

    let mut sorted = samples.to_vec();
    sorted.sort_unstable();

    LatencySummary {
        p50: percentile(&sorted, 50),
        p95: percentile(&sorted, 95),
        p99: percentile(&sorted, 99),
    }
}

fn percentile(sorted: &[Duration], percentile: usize) -> Duration {
    let idx = ((sorted.len() - 1) * percentile) / 100;
    sorted[idx]
}
