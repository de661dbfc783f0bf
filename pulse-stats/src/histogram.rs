// pulse - bitdrift's observability proxy
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./histogram_test.rs"]
mod histogram_test;

use crate::config::Config;
use crate::reservoir::{DEFAULT_SAMPLE_SIZE, ReservoirSampler};
use crate::snapshot::{Metric, Snapshot};
use parking_lot::Mutex;
use rand::Rng;
use rand_xoshiro::Xoshiro128StarStar;

//
// Histogram
//

// Summarizes a sample of many values, like request latencies. Snapshots never carry a last value.
#[derive(Debug)]
pub struct Histogram<R = Xoshiro128StarStar> {
  percentiles: Vec<f64>,
  reservoir: Mutex<ReservoirSampler<R>>,
}

impl Histogram {
  #[must_use]
  pub fn new(config: &Config) -> Self {
    Self {
      percentiles: config.percentiles().to_vec(),
      reservoir: Mutex::new(ReservoirSampler::new(DEFAULT_SAMPLE_SIZE)),
    }
  }
}

impl<R: Rng> Histogram<R> {
  pub fn with_rng(config: &Config, rng: R) -> Self {
    Self {
      percentiles: config.percentiles().to_vec(),
      reservoir: Mutex::new(ReservoirSampler::with_rng(DEFAULT_SAMPLE_SIZE, rng)),
    }
  }

  pub fn record(&self, value: f64) {
    self.reservoir.lock().record(value);
  }
}

impl<R: Rng + Send> Metric for Histogram<R> {
  fn snapshot(&self, reset: bool) -> Snapshot {
    self.reservoir.lock().finalize(&self.percentiles, reset)
  }
}
