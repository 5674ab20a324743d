//! # Live Order Tracking
//!
//! After an order is placed with live tracking on, an [`OrderTracker`] walks it
//! through `Brewing`, `Quality Check` and `Ready for Pickup` on a fixed
//! schedule. It never issues `Completed`.
//!
//! Every tracked order gets its own task and a child of the tracker's
//! shutdown token. The caller receives a [`TrackingHandle`] that can cancel
//! that one order (e.g. the customer navigated away) while
//! [`OrderTracker::shutdown`] stops all of them.
//!
//! Pending steps live only in the task. If the process stops, the order keeps
//! the last status that was written to the store.

use crate::clients::OrderClient;
use crate::model::{OrderId, OrderStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// One scheduled transition, relative to when tracking started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingStep {
    pub after: Duration,
    pub status: OrderStatus,
}

/// The transitions issued for every tracked order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSchedule {
    steps: Vec<TrackingStep>,
}

impl TrackingSchedule {
    pub const DEFAULT_STEP: Duration = Duration::from_secs(2);

    /// Brewing after one `step`, Quality Check after two, Ready after three.
    pub fn every(step: Duration) -> Self {
        let statuses = [OrderStatus::Brewing, OrderStatus::QualityCheck, OrderStatus::ReadyForPickup];
        let steps = statuses
            .into_iter()
            .zip(1u32..)
            .map(|(status, n)| TrackingStep { after: step * n, status })
            .collect();
        Self { steps }
    }

    pub fn steps(&self) -> &[TrackingStep] {
        &self.steps
    }
}

impl Default for TrackingSchedule {
    fn default() -> Self {
        Self::every(Self::DEFAULT_STEP)
    }
}

/// How a tracking task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingOutcome {
    /// Every step ran.
    Completed,
    /// Cancelled through the handle or by tracker shutdown.
    Cancelled { applied: usize },
    /// The order store stopped answering.
    Failed { applied: usize, reason: String },
}

/// Cancellable handle to one order's tracking task.
///
/// Dropping the handle does not stop tracking; call [`cancel`](Self::cancel).
#[derive(Debug)]
pub struct TrackingHandle {
    order_id: OrderId,
    token: CancellationToken,
    task: JoinHandle<TrackingOutcome>,
}

impl TrackingHandle {
    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// Stops further transitions. Steps already applied stay applied.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the task to end.
    pub async fn join(self) -> TrackingOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => TrackingOutcome::Failed {
                applied: 0,
                reason: e.to_string(),
            },
        }
    }
}

/// Spawns and owns the per-order tracking tasks.
pub struct OrderTracker {
    orders: OrderClient,
    schedule: Arc<TrackingSchedule>,
    shutdown: CancellationToken,
    tasks: TaskTracker,
}

impl OrderTracker {
    pub fn new(orders: OrderClient, schedule: TrackingSchedule) -> Self {
        Self {
            orders,
            schedule: Arc::new(schedule),
            shutdown: CancellationToken::new(),
            tasks: TaskTracker::new(),
        }
    }

    pub fn schedule(&self) -> &TrackingSchedule {
        &self.schedule
    }

    /// Starts walking `order_id` through the schedule.
    pub fn track(&self, order_id: OrderId) -> TrackingHandle {
        let token = self.shutdown.child_token();
        info!(%order_id, steps = self.schedule.steps().len(), "Tracking started");
        let task = self.tasks.spawn(run_schedule(
            self.orders.clone(),
            order_id.clone(),
            Arc::clone(&self.schedule),
            token.clone(),
        ));
        TrackingHandle { order_id, token, task }
    }

    /// Cancels every tracking task and waits for them to finish.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.tasks.close();
        self.tasks.wait().await;
        debug!("Tracker stopped");
    }
}

async fn run_schedule(
    orders: OrderClient,
    order_id: OrderId,
    schedule: Arc<TrackingSchedule>,
    token: CancellationToken,
) -> TrackingOutcome {
    let start = Instant::now();
    let mut applied = 0;

    for step in schedule.steps() {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                info!(%order_id, applied, "Tracking cancelled");
                return TrackingOutcome::Cancelled { applied };
            }
            _ = sleep_until(start + step.after) => {}
        }

        match orders.advance(order_id.clone(), step.status).await {
            Ok(Some(order)) => {
                applied += 1;
                info!(%order_id, status = %order.status, "Order advanced");
            }
            Ok(None) => debug!(%order_id, status = %step.status, "Step skipped"),
            Err(e) => {
                warn!(%order_id, error = %e, "Tracking stopped");
                return TrackingOutcome::Failed {
                    applied,
                    reason: e.to_string(),
                };
            }
        }
    }

    TrackingOutcome::Completed
}
