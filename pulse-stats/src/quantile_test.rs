// pulse - bitdrift's observability proxy
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use super::*;
use crate::reservoir::DEFAULT_SAMPLE_SIZE;
use pretty_assertions::assert_eq;

// P90 reference: https://www.itl.nist.gov/div898/handbook/prc/section2/prc262.htm
const CONTROL: &[f64] = &[
  95.1772, 95.1567, 95.1937, 95.1959, 95.1442, 95.0610, 95.1591, 95.1195, 95.1065, 95.0925,
  95.1990, 95.1682,
];

fn sorted(values: &[f64]) -> Vec<f64> {
  let mut values = values.to_vec();
  values.sort_unstable_by(f64::total_cmp);
  values
}

fn sequence(n: u32) -> Vec<f64> {
  (1 ..= n).map(f64::from).collect()
}

fn values(percentiles: &[f64], sorted: &[f64]) -> Vec<f64> {
  estimate(percentiles, sorted, DEFAULT_SAMPLE_SIZE)
    .into_iter()
    .map(|p| p.value)
    .collect()
}

fn assert_near(expected: f64, actual: f64, tolerance: f64) {
  assert!(
    (expected - actual).abs() <= tolerance,
    "expected {expected}, actual {actual}"
  );
}

#[test]
fn empty_inputs() {
  assert!(estimate(&[0.5], &[], DEFAULT_SAMPLE_SIZE).is_empty());
  assert!(estimate(&[], &[1.0, 2.0], DEFAULT_SAMPLE_SIZE).is_empty());
}

#[test]
fn single_value() {
  assert_eq!(
    vec![
      PercentileValue {
        percentile: 0.0,
        value: 1.201,
      },
      PercentileValue {
        percentile: 0.5,
        value: 1.201,
      },
      PercentileValue {
        percentile: 0.999,
        value: 1.201,
      },
      PercentileValue {
        percentile: 1.0,
        value: 1.201,
      },
    ],
    estimate(&[0.0, 0.5, 0.999, 1.0], &[1.201], DEFAULT_SAMPLE_SIZE)
  );
}

#[test]
fn keeps_requested_order() {
  let estimated = estimate(&[0.99, 0.5], &sequence(10), DEFAULT_SAMPLE_SIZE);
  assert_eq!(
    vec![0.99, 0.5],
    estimated.iter().map(|p| p.percentile).collect::<Vec<_>>()
  );
}

#[test]
fn interpolated_control() {
  let control = sorted(CONTROL);
  assert_near(95.1972, values(&[0.9], &control)[0], 1e-4);

  let mut with_new_max = CONTROL.to_vec();
  with_new_max.push(96.1990);
  assert_near(95.5323, values(&[0.9], &sorted(&with_new_max))[0], 1e-4);
}

#[test]
fn interpolated_low_percentiles_are_min() {
  let control = sorted(CONTROL);
  assert_eq!(
    vec![95.0610, 95.0610, 95.0610],
    values(&[0.01, 0.001, 0.0], &control)
  );
}

#[test]
fn interpolated_sequence() {
  let sample = sequence(1000);
  let estimated = values(&[0.5, 0.99, 0.999, 1.0], &sample);
  assert_near(500.5, estimated[0], 1e-9);
  assert_near(990.663_333_333_333_4, estimated[1], 1e-9);
  assert_near(999.666_333_333_333_5, estimated[2], 1e-9);
  assert_eq!(1000.0, estimated[3]);
}

#[test]
fn interpolated_small_sample_p999_is_max() {
  let sample: Vec<f64> = (1 ..= 300).map(|i| f64::from(i) / 1000.0).collect();
  assert_eq!(vec![0.3], values(&[0.999], &sample));
}

#[test]
fn nearest_rank_at_capacity() {
  let sample = sequence(2000);
  assert_eq!(
    vec![1.0, 500.0, 1000.0, 1800.0, 1980.0, 1998.0, 2000.0],
    values(&[0.0, 0.25, 0.5, 0.9, 0.99, 0.999, 1.0], &sample)
  );
}

#[test]
fn nearest_rank_above_capacity() {
  let sample = sequence(4000);
  assert_eq!(
    vec![1.0, 2000.0, 3600.0, 3960.0, 3996.0, 4000.0],
    values(&[0.0, 0.5, 0.9, 0.99, 0.999, 1.0], &sample)
  );
}

#[test]
fn regime_boundary() {
  // One short of capacity interpolates.
  let below = sequence(1999);
  assert_near(500.166_666_666_666_6, values(&[0.25], &below)[0], 1e-9);

  // At capacity the nearest rank is used.
  let at = sequence(2000);
  assert_eq!(vec![500.0], values(&[0.25], &at));
}

#[test]
fn capacity_selects_regime() {
  let sample = sequence(10);
  assert_eq!(3.0, estimate(&[0.25], &sample, 10)[0].value);
  assert_near(2.916_666_666_666_667, estimate(&[0.25], &sample, 11)[0].value, 1e-9);
}
