// pulse - bitdrift's observability proxy
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./gauge_test.rs"]
mod gauge_test;

use crate::config::Config;
use crate::lossy::LossyIntToFloat;
use crate::reservoir::{DEFAULT_SAMPLE_SIZE, ReservoirSampler};
use crate::snapshot::{Metric, Snapshot};
use parking_lot::Mutex;
use rand::Rng;
use rand_xoshiro::Xoshiro128StarStar;

#[derive(Debug)]
struct LockedData<R> {
  last: f64,
  reservoir: ReservoirSampler<R>,
}

//
// Gauge
//

// A single value that moves over time, like queue depth or connected clients. Every recorded
// value is sampled, and the most recent one is tracked separately as the "last" value. Unlike a
// Counter, add() is relative to the gauge's last value.
#[derive(Debug)]
pub struct Gauge<R = Xoshiro128StarStar> {
  percentiles: Vec<f64>,
  locked_data: Mutex<LockedData<R>>,
}

impl Gauge {
  #[must_use]
  pub fn new(config: &Config) -> Self {
    Self::from_reservoir(config, ReservoirSampler::new(DEFAULT_SAMPLE_SIZE))
  }
}

impl<R: Rng> Gauge<R> {
  pub fn with_rng(config: &Config, rng: R) -> Self {
    Self::from_reservoir(config, ReservoirSampler::with_rng(DEFAULT_SAMPLE_SIZE, rng))
  }

  fn from_reservoir(config: &Config, reservoir: ReservoirSampler<R>) -> Self {
    Self {
      percentiles: config.percentiles().to_vec(),
      locked_data: Mutex::new(LockedData {
        last: 0.0,
        reservoir,
      }),
    }
  }

  pub fn record(&self, value: f64) {
    let mut locked_data = self.locked_data.lock();
    locked_data.last = value;
    locked_data.reservoir.record(value);
  }

  pub fn add(&self, delta: i64) {
    let mut locked_data = self.locked_data.lock();
    locked_data.last += delta.lossy_to_f64();
    let last = locked_data.last;
    locked_data.reservoir.record(last);
  }

  pub fn last(&self) -> f64 {
    self.locked_data.lock().last
  }
}

impl<R: Rng + Send> Metric for Gauge<R> {
  fn snapshot(&self, reset: bool) -> Snapshot {
    let mut locked_data = self.locked_data.lock();
    let mut snapshot = locked_data.reservoir.finalize(&self.percentiles, reset);
    snapshot.last = locked_data.last;
    if reset {
      locked_data.last = 0.0;
    }
    snapshot
  }
}
