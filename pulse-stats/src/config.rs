// pulse - bitdrift's observability proxy
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

use serde::Deserialize;

//
// ConfigError
//

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
  #[error("percentile {0} is outside of [0, 1]")]
  PercentileOutOfRange(f64),
}

//
// Config
//

// Configuration for a Gauge or Histogram. Percentiles are expressed as fractions, so the 99th
// percentile is 0.99. An empty list disables percentile calculation entirely.
//
// A Config can only be built through validation, so every Config held by a metric has all
// percentiles within [0, 1].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct Config {
  percentiles: Vec<f64>,
}

impl Config {
  pub fn new(percentiles: impl IntoIterator<Item = f64>) -> Result<Self, ConfigError> {
    let mut validated: Vec<f64> = Vec::new();
    for percentile in percentiles {
      // NaN also fails the range check.
      if !(0.0 ..= 1.0).contains(&percentile) {
        log::warn!("rejecting metric config: percentile {percentile} is outside of [0, 1]");
        return Err(ConfigError::PercentileOutOfRange(percentile));
      }

      // Snapshots carry a single value per requested rank.
      if !validated.contains(&percentile) {
        validated.push(percentile);
      }
    }

    Ok(Self {
      percentiles: validated,
    })
  }

  #[must_use]
  pub fn percentiles(&self) -> &[f64] {
    &self.percentiles
  }
}

// Wire shape of a Config before validation. A missing or null list means no percentiles.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
  #[serde(default)]
  percentiles: Option<Vec<f64>>,
}

impl TryFrom<RawConfig> for Config {
  type Error = ConfigError;

  fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
    Self::new(raw.percentiles.unwrap_or_default())
  }
}
