//! Probability distributions behind customer behavior.
//!
//! Three samplers drive the model: which service a customer picks next
//! (fixed categorical weights), how long a viewing session lasts (uniform
//! over a bounded range), and when a customer re-engages after leaving a
//! service (piecewise uniform conditioned on the time of day they left).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{day_start, time_of_day, MINUTES_PER_HOUR, NOON};

/// Categorical distribution over service indices using cumulative weights.
///
/// A uniform [0,1) draw is mapped through the running cumulative sum with
/// first-match semantics; the last bucket is a catch-all so a valid index is
/// always returned even when the weights do not sum to exactly 1.
#[derive(Debug, Clone)]
pub struct ServiceChoiceDistribution {
    cumulative: Vec<f64>,
}

impl ServiceChoiceDistribution {
    pub fn new(weights: &[f64]) -> Self {
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut running = 0.0;
        for w in weights {
            running += w;
            cumulative.push(running);
        }
        Self { cumulative }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        let u: f64 = rng.gen();
        self.index_for(u)
    }

    /// Pure mapping from a uniform draw to a service index.
    pub fn index_for(&self, u: f64) -> usize {
        for (i, boundary) in self.cumulative.iter().enumerate() {
            if u < *boundary {
                return i;
            }
        }
        self.cumulative.len() - 1
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}

/// Uniform session length in whole minutes over a closed range.
#[derive(Debug, Clone, Copy)]
pub struct ServiceDurationDistribution {
    pub min_minutes: u64,
    pub max_minutes: u64,
}

impl ServiceDurationDistribution {
    pub fn new(min_minutes: u64, max_minutes: u64) -> Self {
        Self {
            min_minutes,
            max_minutes: max_minutes.max(min_minutes),
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> u64 {
        let u: f64 = rng.gen();
        let span = (self.max_minutes - self.min_minutes) as f64;
        self.min_minutes + (u * span) as u64
    }
}

/// Default viewing session: between half an hour and three hours.
impl Default for ServiceDurationDistribution {
    fn default() -> Self {
        Self::new(30, 180)
    }
}

/// When a customer re-engages after leaving a service, conditioned on the
/// time of day they left. Models evening binge-watching and next-day
/// catch-up: someone leaving in the morning most likely returns that
/// afternoon or evening; someone leaving in the afternoon or at night most
/// likely returns before 1 AM or the next morning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReengagementDistribution;

/// An inclusive window of minutes relative to the start of the current day.
/// The upper bound may run past midnight into the next day.
pub type ReengagementWindow = (u64, u64);

impl ReengagementDistribution {
    /// Select the re-engagement window for a departure at `time_of_day`
    /// given a uniform draw `u`. Pure so branch boundaries are testable.
    ///
    /// Before noon (inclusive): 10% up to 1 PM the same day, 50% 1 PM-9 PM,
    /// 40% 9 PM-1 AM. After noon: 40% up to 1 AM, 10% 1 AM-9 AM next day,
    /// 50% 9 AM-1 PM next day. Both window endpoints are inclusive.
    pub fn window(time_of_day: u64, u: f64) -> ReengagementWindow {
        let h = MINUTES_PER_HOUR;
        if time_of_day <= NOON {
            if u < 0.10 {
                (time_of_day, 13 * h)
            } else if u < 0.60 {
                (13 * h, 21 * h)
            } else {
                (21 * h, 25 * h)
            }
        } else if u < 0.40 {
            (time_of_day, 25 * h)
        } else if u < 0.50 {
            (25 * h, 33 * h)
        } else {
            (33 * h, 37 * h)
        }
    }

    /// Sample an absolute re-engagement minute for a customer leaving at
    /// `now`, at integer-minute granularity.
    pub fn sample<R: Rng>(&self, rng: &mut R, now: u64) -> u64 {
        let tod = time_of_day(now);
        let u: f64 = rng.gen();
        let (lo, hi) = Self::window(tod, u);
        day_start(now) + rng.gen_range(lo..=hi)
    }
}

/// The bundle of samplers a simulation run draws from, with a single seeded
/// RNG for reproducibility.
#[derive(Debug)]
pub struct VariateProvider {
    choice: ServiceChoiceDistribution,
    duration: ServiceDurationDistribution,
    reengagement: ReengagementDistribution,
    rng: StdRng,
}

impl VariateProvider {
    /// Build a provider from catalog choice weights. `seed` fixes the run;
    /// `None` draws a seed from entropy.
    pub fn new(weights: &[f64], duration: ServiceDurationDistribution, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            choice: ServiceChoiceDistribution::new(weights),
            duration,
            reengagement: ReengagementDistribution,
            rng,
        }
    }

    /// Pick the next service for a customer.
    pub fn choose_service(&mut self) -> usize {
        self.choice.sample(&mut self.rng)
    }

    /// Sample a viewing session length in minutes.
    pub fn service_duration(&mut self) -> u64 {
        self.duration.sample(&mut self.rng)
    }

    /// Sample the absolute minute at which a customer leaving at `now`
    /// re-engages.
    pub fn arrival_after(&mut self, now: u64) -> u64 {
        self.reengagement.sample(&mut self.rng, now)
    }
}
