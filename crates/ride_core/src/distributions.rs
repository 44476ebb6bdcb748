//! Probability distributions for visitor inter-arrival times.
//!
//! Every distribution draws from the run's single seeded [StdRng]; none of them
//! keeps random state of its own, so a run is reproducible from its seed alone.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};

use crate::scenario::{ArrivalDistributionKind, ScenarioConfig};

/// Lower bound applied to every sampled interval (seconds).
pub const MIN_INTERARRIVAL_SECS: f64 = 1.0;

/// Trait for sampling inter-arrival times (in seconds).
pub trait InterArrivalDistribution: Send + Sync + std::fmt::Debug {
    /// Sample the next raw inter-arrival time in seconds. May be non-positive;
    /// callers clamp with [clamp_interval_secs].
    fn sample_secs(&self, rng: &mut StdRng) -> f64;

    /// Expected interval in seconds (before clamping).
    fn mean_secs(&self) -> f64;
}

/// Clamp a raw sample to the strictly positive minimum interval.
pub fn clamp_interval_secs(secs: f64) -> f64 {
    if secs.is_finite() {
        secs.max(MIN_INTERARRIVAL_SECS)
    } else {
        MIN_INTERARRIVAL_SECS
    }
}

/// Uniform on `[mean - spread, mean + spread]`.
#[derive(Debug, Clone)]
pub struct UniformJitterInterArrival {
    pub mean_secs: f64,
    pub spread_secs: f64,
}

impl UniformJitterInterArrival {
    pub fn new(mean_secs: f64, spread_secs: f64) -> Self {
        Self {
            mean_secs,
            spread_secs: spread_secs.abs(),
        }
    }
}

impl InterArrivalDistribution for UniformJitterInterArrival {
    fn sample_secs(&self, rng: &mut StdRng) -> f64 {
        if self.spread_secs == 0.0 {
            return self.mean_secs;
        }
        rng.gen_range((self.mean_secs - self.spread_secs)..=(self.mean_secs + self.spread_secs))
    }

    fn mean_secs(&self) -> f64 {
        self.mean_secs
    }
}

/// Normal with the given mean and standard deviation.
#[derive(Debug, Clone)]
pub struct NormalInterArrival {
    normal: Normal<f64>,
}

impl NormalInterArrival {
    /// Returns `None` when the standard deviation is negative or not finite.
    pub fn new(mean_secs: f64, std_dev_secs: f64) -> Option<Self> {
        Normal::new(mean_secs, std_dev_secs)
            .ok()
            .map(|normal| Self { normal })
    }
}

impl InterArrivalDistribution for NormalInterArrival {
    fn sample_secs(&self, rng: &mut StdRng) -> f64 {
        self.normal.sample(rng)
    }

    fn mean_secs(&self) -> f64 {
        self.normal.mean()
    }
}

/// Exponential (Poisson arrivals) with the given mean interval.
#[derive(Debug, Clone)]
pub struct ExponentialInterArrival {
    mean_secs: f64,
    exp: Exp<f64>,
}

impl ExponentialInterArrival {
    /// Returns `None` unless the mean is positive and finite.
    pub fn new(mean_secs: f64) -> Option<Self> {
        if !mean_secs.is_finite() || mean_secs <= 0.0 {
            return None;
        }
        Exp::new(1.0 / mean_secs)
            .ok()
            .map(|exp| Self { mean_secs, exp })
    }
}

impl InterArrivalDistribution for ExponentialInterArrival {
    fn sample_secs(&self, rng: &mut StdRng) -> f64 {
        self.exp.sample(rng)
    }

    fn mean_secs(&self) -> f64 {
        self.mean_secs
    }
}

/// Build the distribution named by `config.distribution`.
///
/// `config` is expected to be validated; a parameter set the underlying
/// distribution rejects falls back to uniform jitter with the same mean.
pub fn build_distribution(config: &ScenarioConfig) -> Box<dyn InterArrivalDistribution> {
    let mean = config.mean_interarrival_secs;
    let spread = config.interarrival_spread_secs;
    let fallback = || -> Box<dyn InterArrivalDistribution> {
        Box::new(UniformJitterInterArrival::new(mean, spread))
    };
    match config.distribution {
        ArrivalDistributionKind::UniformJitter => fallback(),
        ArrivalDistributionKind::Normal => match NormalInterArrival::new(mean, spread) {
            Some(dist) => Box::new(dist),
            None => fallback(),
        },
        ArrivalDistributionKind::Exponential => match ExponentialInterArrival::new(mean) {
            Some(dist) => Box::new(dist),
            None => fallback(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn uniform_jitter_stays_within_bounds() {
        let dist = UniformJitterInterArrival::new(120.0, 30.0);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let sample = dist.sample_secs(&mut rng);
            assert!((90.0..=150.0).contains(&sample), "sample {sample} out of range");
        }
    }

    #[test]
    fn uniform_jitter_mean_is_close_to_configured_mean() {
        let dist = UniformJitterInterArrival::new(30.0, 10.0);
        let mut rng = StdRng::seed_from_u64(7);
        let n = 10_000;
        let total: f64 = (0..n).map(|_| dist.sample_secs(&mut rng)).sum();
        let mean = total / n as f64;
        assert!((mean - 30.0).abs() < 0.5, "mean {mean}");
    }

    #[test]
    fn same_seed_gives_same_samples() {
        let dist = NormalInterArrival::new(120.0, 30.0).expect("normal");
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(dist.sample_secs(&mut a), dist.sample_secs(&mut b));
        }
    }

    #[test]
    fn exponential_rejects_non_positive_mean() {
        assert!(ExponentialInterArrival::new(0.0).is_none());
        assert!(ExponentialInterArrival::new(-1.0).is_none());
        let dist = ExponentialInterArrival::new(60.0).expect("exp");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(dist.sample_secs(&mut rng) >= 0.0);
    }

    #[test]
    fn clamp_keeps_intervals_strictly_positive() {
        assert_eq!(clamp_interval_secs(-5.0), MIN_INTERARRIVAL_SECS);
        assert_eq!(clamp_interval_secs(0.2), MIN_INTERARRIVAL_SECS);
        assert_eq!(clamp_interval_secs(f64::NAN), MIN_INTERARRIVAL_SECS);
        assert_eq!(clamp_interval_secs(42.5), 42.5);
    }

    #[test]
    fn build_distribution_follows_config_kind() {
        let config = ScenarioConfig::default()
            .with_interarrival(30.0, 10.0)
            .with_distribution(ArrivalDistributionKind::Exponential);
        let dist = build_distribution(&config);
        assert_eq!(dist.mean_secs(), 30.0);
        assert!(format!("{dist:?}").contains("Exponential"));
    }
}
