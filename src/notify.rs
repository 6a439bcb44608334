//! Deferred appointment-confirmation dispatch.
//!
//! A bounded channel feeds one background worker task. Submission never
//! blocks a request and nothing awaits the outcome: a full or closed queue
//! logs a warning and drops the task. Delivery is a timed placeholder; an
//! info log stands in for the real outbound message.

use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Queue slots before submissions start dropping.
pub const QUEUE_CAPACITY: usize = 64;

/// Simulated delivery time for one confirmation.
pub const DELIVERY_DELAY: Duration = Duration::from_millis(200);

/// What the worker needs to announce a created appointment.
#[derive(Debug, Clone)]
pub struct ConfirmationTask {
    pub appointment_id: Uuid,
    pub patient_id: Uuid,
    pub scheduled_for: NaiveDateTime,
}

/// Cloneable producer handle for the confirmation worker.
///
/// Must be created from within a Tokio runtime; the worker stops once every
/// handle is dropped and the queue drains.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::Sender<ConfirmationTask>,
}

impl Notifier {
    /// Spawn the worker with the default queue capacity.
    pub fn spawn() -> Self {
        Self::with_capacity(QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        tokio::spawn(confirmation_worker(rx));
        Self { tx }
    }

    /// Fire-and-forget: hand the task to the worker and return immediately.
    /// A rejected task is logged and dropped, never retried.
    pub fn submit(&self, task: ConfirmationTask) {
        let appointment_id = task.appointment_id;
        if let Err(err) = self.tx.try_send(task) {
            tracing::warn!(
                %appointment_id,
                error = %err,
                "confirmation queue rejected task; dropping"
            );
        }
    }
}

async fn confirmation_worker(mut rx: mpsc::Receiver<ConfirmationTask>) {
    while let Some(task) = rx.recv().await {
        deliver(task).await;
    }
    tracing::debug!("confirmation worker stopped");
}

/// Placeholder delivery: wait out the simulated send, then record it.
async fn deliver(task: ConfirmationTask) {
    tokio::time::sleep(DELIVERY_DELAY).await;
    tracing::info!(
        appointment_id = %task.appointment_id,
        patient_id = %task.patient_id,
        scheduled_for = %task.scheduled_for,
        "appointment confirmation sent"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn task() -> ConfirmationTask {
        ConfirmationTask {
            appointment_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            scheduled_for: NaiveDateTime::parse_from_str(
                "2026-03-01 10:30:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
        }
    }

    #[tokio::test]
    async fn submit_returns_before_delivery_completes() {
        let notifier = Notifier::spawn();
        let started = Instant::now();
        notifier.submit(task());
        assert!(started.elapsed() < DELIVERY_DELAY);
    }

    #[tokio::test]
    async fn full_queue_drops_without_panicking() {
        let notifier = Notifier::with_capacity(1);
        for _ in 0..16 {
            notifier.submit(task());
        }
    }

    #[tokio::test]
    async fn worker_takes_tasks_off_the_queue() {
        let notifier = Notifier::with_capacity(1);
        notifier.submit(task());
        // The worker pulls the task promptly even though delivery itself is
        // still sleeping, so the single slot frees up again.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(notifier.tx.capacity(), 1);
    }

    #[tokio::test]
    async fn clones_share_the_same_queue() {
        let notifier = Notifier::with_capacity(8);
        let clone = notifier.clone();
        clone.submit(task());
        notifier.submit(task());
        assert!(notifier.tx.capacity() < 8);
    }
}
