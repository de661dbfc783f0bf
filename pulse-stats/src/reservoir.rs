// pulse - bitdrift's observability proxy
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./reservoir_test.rs"]
mod reservoir_test;

use crate::quantile;
use crate::snapshot::Snapshot;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

// Reservoir size used by gauges and histograms. Testing against real world latency data showed
// that both smaller and larger reservoirs yield no benefit or reduce P99.9 accuracy.
pub const DEFAULT_SAMPLE_SIZE: usize = 2000;

//
// ReservoirSampler
//

// Vitter's Algorithm R (http://www.cs.umd.edu/~samir/498/vitter.pdf). The first `capacity` values
// fill the reservoir. After that, value n replaces a random slot with probability capacity / n,
// so every value seen has the same chance of being in the sample.
//
// Count, sum, and max are tracked exactly and are never affected by sampling. Keeping the true max
// is not part of Algorithm R but latency spikes must be reported even when they are evicted.
#[derive(Debug)]
pub struct ReservoirSampler<R = Xoshiro128StarStar> {
  values: Vec<f64>,
  capacity: usize,
  count: u64,
  sum: f64,
  max: f64,
  rng: R,
}

impl ReservoirSampler {
  // Create a sampler backed by a fast non crypto rng seeded from the thread rng.
  #[must_use]
  pub fn new(capacity: usize) -> Self {
    Self::with_rng(capacity, Xoshiro128StarStar::from_rng(&mut rand::rng()))
  }
}

impl<R: Rng> ReservoirSampler<R> {
  // Create a sampler with a caller supplied rng, typically a seeded one for reproducible tests.
  //
  // # Panics
  //
  // Panics if capacity is 0.
  pub fn with_rng(capacity: usize, rng: R) -> Self {
    assert!(capacity > 0, "reservoir capacity must be positive");
    Self {
      values: Vec::with_capacity(capacity),
      capacity,
      count: 0,
      sum: 0.0,
      max: 0.0,
      rng,
    }
  }

  pub fn record(&mut self, value: f64) {
    if self.count == 0 || value > self.max {
      self.max = value;
    }
    self.count += 1;
    self.sum += value;

    // Do an initial fill if we haven't filled the full reservoir.
    if self.values.len() < self.capacity {
      self.values.push(value);
      return;
    }

    if let Some(idx) = usize::try_from(self.rng.random_range(0 .. self.count))
      .ok()
      .filter(|idx| *idx < self.capacity)
    {
      self.values[idx] = value;
    }
  }

  // Start a new epoch. The buffer allocation is kept for the next interval.
  pub fn reset(&mut self) {
    self.values.clear();
    self.count = 0;
    self.sum = 0.0;
    self.max = 0.0;
  }

  // Summarize the current state and optionally reset it. When resetting, the live buffer is sorted
  // in place since it is about to be discarded. Otherwise a copy is sorted so the sample contents
  // are untouched for later snapshots.
  pub fn finalize(&mut self, percentiles: &[f64], reset: bool) -> Snapshot {
    // Never recorded, or reset without any new values since.
    if self.values.is_empty() {
      return Snapshot::default();
    }

    let mut snapshot = Snapshot {
      count: self.count,
      sum: self.sum,
      max: self.max,
      ..Default::default()
    };

    if reset {
      self.values.sort_unstable_by(f64::total_cmp);
      Self::fill_from_sorted(&mut snapshot, percentiles, &self.values, self.capacity);
      log::debug!(
        "reset reservoir after {} values ({} sampled)",
        self.count,
        self.values.len()
      );
      self.reset();
    } else {
      let mut values = self.values.clone();
      values.sort_unstable_by(f64::total_cmp);
      Self::fill_from_sorted(&mut snapshot, percentiles, &values, self.capacity);
    }

    snapshot
  }

  fn fill_from_sorted(
    snapshot: &mut Snapshot,
    percentiles: &[f64],
    sorted: &[f64],
    capacity: usize,
  ) {
    snapshot.min = sorted[0];
    snapshot.percentiles = quantile::estimate(percentiles, sorted, capacity);
  }

  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.values.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  #[must_use]
  pub fn is_full(&self) -> bool {
    self.values.len() >= self.capacity
  }

  #[must_use]
  pub const fn count(&self) -> u64 {
    self.count
  }

  #[must_use]
  pub const fn sum(&self) -> f64 {
    self.sum
  }

  #[must_use]
  pub const fn max(&self) -> f64 {
    self.max
  }

  // The sampled values, in no particular order.
  #[must_use]
  pub fn values(&self) -> &[f64] {
    &self.values
  }
}
