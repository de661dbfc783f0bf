// pulse - bitdrift's observability proxy
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

// In-process base metrics (counter, gauge, histogram) that are periodically snapshotted and
// optionally reset by an exporter. Gauges and histograms keep a fixed size uniform sample of the
// interval's values along with the exact count, sum, and max.

pub mod config;
pub mod counter;
pub mod gauge;
pub mod histogram;
pub mod lossy;
pub mod quantile;
pub mod reservoir;
pub mod snapshot;

pub use config::{Config, ConfigError};
pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::Histogram;
pub use reservoir::{DEFAULT_SAMPLE_SIZE, ReservoirSampler};
pub use snapshot::{Metric, PercentileValue, Snapshot};
