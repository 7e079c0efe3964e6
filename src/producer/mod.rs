//! # Generation Producers
//!
//! A `GenerationProducer` drives one population through its generations and
//! publishes a `Snapshot` of every generation on a bounded channel. Producers
//! share nothing but the channel and, optionally, a `CancellationToken`, so any
//! number of them can run side by side: `ProducerLauncher` starts one thread per
//! population and `ParameterSweep` fans headless runs out over a thread pool.
pub mod cancellation;
pub mod channel;
pub mod launcher;
pub mod options;
pub mod producer;
pub mod snapshot;
pub mod sweep;

pub use cancellation::CancellationToken;
pub use channel::{snapshot_channel, SnapshotReceiver, SnapshotSender};
pub use launcher::{ProducerLauncher, RunningProducers};
pub use options::{Backpressure, ProducerOptions, ProducerOptionsBuilder};
pub use producer::{GenerationProducer, ProducerReport, ProducerState, StopReason};
pub use snapshot::Snapshot;
pub use sweep::{ParameterSweep, SweepOptions, SweepPoint};
