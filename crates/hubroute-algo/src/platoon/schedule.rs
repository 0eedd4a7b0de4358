//! Synthetic departure offsets drawn from a triangular distribution

use super::Trip;
use hubroute_core::{HubRouteError, HubRouteResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Triangular distribution over departure offsets (minutes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangularSchedule {
    pub left: f64,
    pub mode: f64,
    pub right: f64,
    /// Seed for reproducible draws; `None` seeds from entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for TriangularSchedule {
    fn default() -> Self {
        Self {
            left: 240.0,
            mode: 360.0,
            right: 600.0,
            seed: None,
        }
    }
}

impl TriangularSchedule {
    pub fn new(left: f64, mode: f64, right: f64) -> HubRouteResult<Self> {
        let schedule = Self {
            left,
            mode,
            right,
            seed: None,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> HubRouteResult<()> {
        let finite = self.left.is_finite() && self.mode.is_finite() && self.right.is_finite();
        if !finite || self.left > self.mode || self.mode > self.right || self.left >= self.right {
            return Err(HubRouteError::Config(format!(
                "triangular schedule needs left <= mode <= right and left < right, got ({}, {}, {})",
                self.left, self.mode, self.right
            )));
        }
        Ok(())
    }

    /// Random source for this schedule.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Draw one offset by inverting the triangular CDF.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.gen();
        let width = self.right - self.left;
        let split = (self.mode - self.left) / width;
        if u < split {
            self.left + (u * width * (self.mode - self.left)).sqrt()
        } else {
            self.right - ((1.0 - u) * width * (self.right - self.mode)).sqrt()
        }
    }

    /// Give every trip an offset. Trips with zero network distance keep a
    /// zero offset, but a value is still drawn for them so the stream of
    /// draws does not depend on which trips are zero.
    pub fn assign<R: Rng + ?Sized>(&self, trips: &mut [Trip], rng: &mut R) {
        for trip in trips {
            let offset = self.sample(rng);
            trip.schedule_offset = if trip.network_distance == 0.0 {
                0.0
            } else {
                offset
            };
        }
    }
}
