// pulse - bitdrift's observability proxy
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./quantile_test.rs"]
mod quantile_test;

use crate::lossy::{LossyFloatToInt, LossyIntToFloat};
use crate::snapshot::PercentileValue;

// Sample quantile definitions are from Hyndman and Fan, "Sample Quantiles in Statistical
// Packages": https://www.amherst.edu/media/view/129116/original/Sample+Quantiles.pdf
//
// Once the sample is as large as the reservoir, nearest rank is used. Below that, definition 8
// ("R8") interpolates between order statistics, which is more accurate for extreme percentiles
// like P99.9 on small samples.

// Estimate each requested percentile from a sample that has already been sorted ascending.
// Returns one entry per percentile in the order requested, or nothing if either input is empty.
#[must_use]
pub fn estimate(percentiles: &[f64], sorted: &[f64], capacity: usize) -> Vec<PercentileValue> {
  if sorted.is_empty() || percentiles.is_empty() {
    return Vec::new();
  }

  let estimator = if sorted.len() >= capacity {
    nearest_rank
  } else {
    r8
  };
  percentiles
    .iter()
    .map(|&percentile| PercentileValue {
      percentile,
      value: estimator(percentile, sorted),
    })
    .collect()
}

// 1-based rank ceil(p * n). A rank of 0 (p == 0) maps to the minimum.
fn nearest_rank(percentile: f64, sorted: &[f64]) -> f64 {
  let rank = (percentile * sorted.len().lossy_to_f64()).ceil().lossy_to_usize();
  sorted[rank.saturating_sub(1).min(sorted.len() - 1)]
}

fn r8(percentile: f64, sorted: &[f64]) -> f64 {
  let n = sorted.len().lossy_to_f64();
  let position = percentile * (n + 1.0 / 3.0) + 1.0 / 3.0;
  if position < 1.0 {
    return sorted[0];
  }
  if position >= n {
    return sorted[sorted.len() - 1];
  }

  // 1 <= k < n so both k - 1 and k are valid 0-based indexes.
  let k = position.floor();
  let fraction = position - k;
  let k = k.lossy_to_usize();
  let lower = sorted[k - 1];
  let upper = sorted[k];
  lower + fraction * (upper - lower)
}
