//! Bounded snapshot channel.
//!
//! A thin layer over `crossbeam_channel::bounded` that maps the channel's
//! outcomes onto `GeneticError::ChannelFull` and `GeneticError::ChannelClosed`.
//! A capacity of zero gives a rendezvous channel where every publish waits
//! for a receiver.
//!
//! ```rust
//! use genetic_engine::producer::snapshot_channel;
//! # use genetic_engine::chromosome::Chromosome;
//! # use genetic_engine::producer::Snapshot;
//! # #[derive(Clone, Debug)]
//! # struct Unit;
//! # impl Chromosome for Unit {
//! #     type Gene = u8;
//! #     fn genes(&self) -> &[u8] { &[] }
//! #     fn fitness(&self) -> f64 { 0.0 }
//! #     fn create_child(&self, _: Vec<u8>) -> genetic_engine::error::Result<Self> { Ok(Unit) }
//! # }
//! # let snapshot = |generation| Snapshot {
//! #     population_id: "demo".to_string(), generation,
//! #     min_fitness: 0.0, max_fitness: 0.0, average_fitness: 0.0,
//! #     fittest: Unit, least_fit: Unit, chromosomes: None,
//! # };
//!
//! let (sender, receiver) = snapshot_channel::<Unit>(1);
//! sender.try_publish(snapshot(0)).unwrap();
//! assert!(sender.try_publish(snapshot(1)).is_err());
//! assert_eq!(receiver.recv().unwrap().generation, 0);
//! ```

use std::time::Duration;

use crossbeam_channel::{select, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};

use crate::error::{GeneticError, Result};

use super::cancellation::CancellationToken;
use super::snapshot::Snapshot;

/// Creates a bounded snapshot channel holding at most `capacity` snapshots.
pub fn snapshot_channel<C>(capacity: usize) -> (SnapshotSender<C>, SnapshotReceiver<C>) {
    let (sender, receiver) = crossbeam_channel::bounded(capacity);
    (
        SnapshotSender { inner: sender },
        SnapshotReceiver { inner: receiver },
    )
}

/// Publishing half of a snapshot channel. Clone it to fan several producers in.
#[derive(Debug)]
pub struct SnapshotSender<C> {
    inner: Sender<Snapshot<C>>,
}

impl<C> Clone for SnapshotSender<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C> SnapshotSender<C> {
    /// Offers a snapshot without blocking.
    ///
    /// # Errors
    ///
    /// `ChannelFull` if the channel is at capacity, `ChannelClosed` if the
    /// receiver is gone. The snapshot is discarded in both cases.
    pub fn try_publish(&self, snapshot: Snapshot<C>) -> Result<()> {
        self.inner.try_send(snapshot).map_err(|e| match e {
            TrySendError::Full(_) => GeneticError::ChannelFull,
            TrySendError::Disconnected(_) => GeneticError::ChannelClosed,
        })
    }

    /// Publishes a snapshot, blocking until there is room.
    ///
    /// # Errors
    ///
    /// `ChannelClosed` if the receiver is gone.
    pub fn publish(&self, snapshot: Snapshot<C>) -> Result<()> {
        self.inner
            .send(snapshot)
            .map_err(|_| GeneticError::ChannelClosed)
    }

    /// Publishes a snapshot, waiting for room until `token` is cancelled.
    ///
    /// A snapshot that fits right away is always accepted. Otherwise the
    /// send races the token's signal and returns `Ok(false)` if cancellation
    /// wins.
    ///
    /// # Errors
    ///
    /// `ChannelClosed` if the receiver is gone.
    pub fn publish_unless_cancelled(
        &self,
        snapshot: Snapshot<C>,
        token: &CancellationToken,
    ) -> Result<bool> {
        let snapshot = match self.inner.try_send(snapshot) {
            Ok(()) => return Ok(true),
            Err(TrySendError::Disconnected(_)) => return Err(GeneticError::ChannelClosed),
            Err(TrySendError::Full(rejected)) => rejected,
        };
        if token.is_cancelled() {
            return Ok(false);
        }

        select! {
            send(self.inner, snapshot) -> sent => {
                sent.map(|()| true).map_err(|_| GeneticError::ChannelClosed)
            }
            recv(token.signal()) -> _ => Ok(false),
        }
    }
}

/// Consuming half of a snapshot channel.
#[derive(Debug)]
pub struct SnapshotReceiver<C> {
    inner: Receiver<Snapshot<C>>,
}

impl<C> SnapshotReceiver<C> {
    /// Blocks for the next snapshot. Returns `None` once every sender is gone
    /// and the channel is drained.
    pub fn recv(&self) -> Option<Snapshot<C>> {
        self.inner.recv().ok()
    }

    /// Waits up to `timeout` for the next snapshot; `Ok(None)` on timeout.
    ///
    /// # Errors
    ///
    /// `ChannelClosed` once every sender is gone and the channel is drained.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Snapshot<C>>> {
        match self.inner.recv_timeout(timeout) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(GeneticError::ChannelClosed),
        }
    }

    /// Takes a snapshot if one is waiting; `Ok(None)` if the channel is empty.
    ///
    /// # Errors
    ///
    /// `ChannelClosed` once every sender is gone and the channel is drained.
    pub fn try_recv(&self) -> Result<Option<Snapshot<C>>> {
        match self.inner.try_recv() {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(GeneticError::ChannelClosed),
        }
    }

    /// Blocking iterator over snapshots that ends when every sender is gone.
    pub fn iter(&self) -> impl Iterator<Item = Snapshot<C>> + '_ {
        self.inner.iter()
    }
}
