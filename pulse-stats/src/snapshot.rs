// pulse - bitdrift's observability proxy
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./snapshot_test.rs"]
mod snapshot_test;

use crate::lossy::LossyIntToFloat;
use serde::Serialize;

//
// PercentileValue
//

// The estimated value for a single requested percentile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PercentileValue {
  pub percentile: f64,
  pub value: f64,
}

//
// Snapshot
//

// Metric values at one point in time. The default snapshot (all zero, no percentiles) is what an
// idle metric reports.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Snapshot {
  // Number of values. For a Counter this is the number of Add() calls.
  pub count: u64,

  // Exact sum of all values. For a Counter this is the value returned by Counter::count().
  pub sum: f64,

  // Minimum value in the sample. This may not be the true minimum if it was evicted from the
  // reservoir. Always zero for a Counter.
  pub min: f64,

  // True maximum value recorded, whether or not it is still present in the sample. Always zero for
  // a Counter.
  pub max: f64,

  // One entry per configured percentile, in configured order. Empty for a Counter or when no
  // percentiles are configured.
  pub percentiles: Vec<PercentileValue>,

  // Last value recorded or added. Only populated by a Gauge.
  pub last: f64,
}

impl Snapshot {
  // The true average of all recorded values.
  #[must_use]
  pub fn mean(&self) -> f64 {
    if self.count == 0 {
      0.0
    } else {
      self.sum / self.count.lossy_to_f64()
    }
  }

  #[must_use]
  pub fn percentile(&self, percentile: f64) -> Option<f64> {
    self
      .percentiles
      .iter()
      .find(|p| p.percentile == percentile)
      .map(|p| p.value)
  }

  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.count == 0
  }
}

//
// Metric
//

// A metric that can produce a snapshot of its current values. If reset is true, the values are
// cleared atomically with the read so nothing recorded concurrently is lost.
pub trait Metric: Send + Sync {
  fn snapshot(&self, reset: bool) -> Snapshot;
}
