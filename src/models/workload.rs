//! Random workload generation.
//!
//! Produces batch-known process sets for benchmarking the policies
//! against each other and for property tests.

use std::ops::RangeInclusive;

use rand::Rng;

use super::Process;

/// Generator of random process sets.
///
/// Ids are `P0..P{count-1}`. Bursts are clamped to at least 1 and
/// arrivals to at least 0 so every generated workload is valid. Reversed
/// ranges such as `10..=5` are read as `5..=10`.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    /// Number of processes to generate.
    pub count: usize,
    /// Arrival time range (inclusive).
    pub arrival_range: RangeInclusive<i64>,
    /// Burst time range (inclusive).
    pub burst_range: RangeInclusive<i64>,
}

impl WorkloadGenerator {
    /// Creates a generator of `count` processes, all arriving at 0 with bursts in `1..=10`.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            arrival_range: 0..=0,
            burst_range: 1..=10,
        }
    }

    /// Sets the arrival time range.
    pub fn with_arrivals(mut self, range: RangeInclusive<i64>) -> Self {
        self.arrival_range = range;
        self
    }

    /// Sets the burst time range.
    pub fn with_bursts(mut self, range: RangeInclusive<i64>) -> Self {
        self.burst_range = range;
        self
    }

    /// Generates a fresh workload.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Process> {
        let arrivals = normalized(&self.arrival_range, 0);
        let bursts = normalized(&self.burst_range, 1);

        (0..self.count)
            .map(|i| {
                let arrival = sample(rng, &arrivals);
                let burst = sample(rng, &bursts);
                Process::new(format!("P{i}"), arrival, burst)
            })
            .collect()
    }
}

/// Orders the bounds and clamps both to `floor`.
fn normalized(range: &RangeInclusive<i64>, floor: i64) -> RangeInclusive<i64> {
    let (a, b) = (*range.start(), *range.end());
    a.min(b).max(floor)..=a.max(b).max(floor)
}

fn sample<R: Rng>(rng: &mut R, range: &RangeInclusive<i64>) -> i64 {
    if range.start() >= range.end() {
        *range.start()
    } else {
        rng.random_range(range.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let procs = WorkloadGenerator::new(50)
            .with_arrivals(0..=20)
            .with_bursts(1..=30)
            .generate(&mut rng);

        assert_eq!(procs.len(), 50);
        for (i, p) in procs.iter().enumerate() {
            assert_eq!(p.id, format!("P{i}"));
            assert!((0..=20).contains(&p.arrival_time));
            assert!((1..=30).contains(&p.burst_time));
            assert!(p.is_fresh());
        }
    }

    #[test]
    fn test_generate_clamps_invalid_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        let procs = WorkloadGenerator::new(10)
            .with_arrivals(-5..=-1)
            .with_bursts(-3..=0)
            .generate(&mut rng);

        assert!(procs.iter().all(|p| p.arrival_time == 0 && p.burst_time == 1));
    }

    #[test]
    fn test_generate_reversed_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        let procs = WorkloadGenerator::new(40)
            .with_arrivals(8..=2)
            .with_bursts(10..=5)
            .generate(&mut rng);

        assert!(procs.iter().all(|p| (2..=8).contains(&p.arrival_time)));
        assert!(procs.iter().all(|p| (5..=10).contains(&p.burst_time)));
        assert!(procs.iter().any(|p| p.burst_time != 10));
    }

    #[test]
    fn test_generate_is_seed_deterministic() {
        let generator = WorkloadGenerator::new(8).with_arrivals(0..=10);
        let a = generator.generate(&mut StdRng::seed_from_u64(99));
        let b = generator.generate(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
