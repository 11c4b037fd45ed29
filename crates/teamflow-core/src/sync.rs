//! Contract for persisting a status change remotely.

use async_trait::async_trait;
use tracing::debug;

use crate::store::MoveTicket;
use crate::{TaskId, TaskStatus};

/// Outcome of one persistence attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResult {
    /// The backend accepted the new status.
    Synced,
    /// The backend rejected it or could not be reached.
    Failed {
        /// Human-readable reason, shown to the user.
        reason: String,
    },
}

impl SyncResult {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Synced)
    }
}

/// Persists task status changes.
///
/// One call is one round trip. Implementations never retry and never
/// return errors: every failure is reported as [`SyncResult::Failed`].
#[async_trait]
pub trait SyncGateway: Send + Sync {
    async fn persist(&self, task_id: &TaskId, status: TaskStatus) -> SyncResult;
}

/// A ticket paired with the gateway's answer, ready to reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCompletion {
    pub ticket: MoveTicket,
    pub result: SyncResult,
}

impl MoveTicket {
    /// Persist this move through `gateway`.
    ///
    /// The ticket owns everything the call needs, so the store stays free for
    /// further moves while this is awaited.
    pub async fn send<G: SyncGateway + ?Sized>(self, gateway: &G) -> SyncCompletion {
        debug!(
            task_id = %self.task_id,
            move_id = %self.move_id,
            status = %self.target,
            "Persisting status change"
        );
        let result = gateway.persist(&self.task_id, self.target).await;
        SyncCompletion {
            ticket: self,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<(TaskId, TaskStatus)>>,
    }

    #[async_trait]
    impl SyncGateway for RecordingGateway {
        async fn persist(&self, task_id: &TaskId, status: TaskStatus) -> SyncResult {
            self.calls.lock().unwrap().push((task_id.clone(), status));
            SyncResult::failed("offline")
        }
    }

    #[tokio::test]
    async fn test_send_pairs_ticket_with_result() {
        let gateway = RecordingGateway::default();
        let ticket = MoveTicket::for_test("t1", TaskStatus::Done);

        let completion = ticket.clone().send(&gateway).await;

        assert_eq!(completion.ticket, ticket);
        assert_eq!(completion.result, SyncResult::failed("offline"));
        assert_eq!(
            *gateway.calls.lock().unwrap(),
            vec![(TaskId::new("t1"), TaskStatus::Done)]
        );
    }
}
