// pulse - bitdrift's observability proxy
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./counter_test.rs"]
mod counter_test;

use crate::lossy::LossyIntToFloat;
use crate::snapshot::{Metric, Snapshot};
use parking_lot::Mutex;

#[derive(Default, Debug)]
struct LockedData {
  count: u64,
  sum: i64,
}

//
// Counter
//

// Counts events and things, like queries and connected clients. Deltas may be negative, in which
// case the running sum can go below zero. Count and sum are updated under a single lock so a
// resetting snapshot can never split an Add() across two intervals.
#[derive(Default, Debug)]
pub struct Counter {
  locked_data: Mutex<LockedData>,
}

impl Counter {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&self, delta: i64) {
    let mut locked_data = self.locked_data.lock();
    locked_data.count += 1;
    locked_data.sum = locked_data.sum.wrapping_add(delta);
  }

  // The running sum since the last reset.
  pub fn count(&self) -> i64 {
    self.locked_data.lock().sum
  }
}

impl Metric for Counter {
  fn snapshot(&self, reset: bool) -> Snapshot {
    let mut locked_data = self.locked_data.lock();
    let snapshot = Snapshot {
      count: locked_data.count,
      sum: locked_data.sum.lossy_to_f64(),
      ..Default::default()
    };
    if reset {
      *locked_data = LockedData::default();
    }
    snapshot
  }
}
