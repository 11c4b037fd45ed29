//! [`SyncGateway`] backed by the task API.

use async_trait::async_trait;
use tracing::warn;

use teamflow_core::{SyncGateway, SyncResult, TaskId, TaskStatus};

use crate::http::HttpClient;

/// Persists board moves with `PUT /tasks/{id}`.
#[derive(Debug, Clone)]
pub struct HttpSyncGateway {
    client: HttpClient,
}

impl HttpSyncGateway {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SyncGateway for HttpSyncGateway {
    async fn persist(&self, task_id: &TaskId, status: TaskStatus) -> SyncResult {
        match self.client.update_task_status(task_id, status).await {
            Ok(()) => SyncResult::Synced,
            Err(e) => {
                warn!(task_id = %task_id, status = %status, error = %e, "Failed to persist task status");
                SyncResult::failed(format!("Failed to update task status: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use mockito::Server;
    use teamflow_core::{
        BoardBinding, BoardStateStore, ColumnBoard, ColumnDrop, DropLocation, Placement,
        ProjectId, Reconciliation, Task,
    };

    fn board() -> BoardStateStore {
        let p = ProjectId::new("p1");
        BoardStateStore::new(vec![
            Task::new("one", p.clone()).with_id("t1"),
            Task::new("two", p.clone()).with_id("t2"),
            Task::new("three", p).with_id("t3"),
        ])
    }

    fn drag_t2_to_done() -> ColumnDrop {
        ColumnDrop {
            draggable_id: "t2".into(),
            source: DropLocation::new("todo", 1),
            destination: Some(DropLocation::new("done", 0)),
        }
    }

    fn gateway(server: &Server) -> HttpSyncGateway {
        HttpSyncGateway::new(HttpClient::new(&server.url(), Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_accepted_move_is_confirmed() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/tasks/t2")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        let gateway = gateway(&server);
        let mut store = board();

        let effect = ColumnBoard.drop_task(&mut store, &drag_t2_to_done()).unwrap();
        let completion = effect.ticket.unwrap().send(&gateway).await;

        assert_eq!(store.reconcile(&completion), Reconciliation::Confirmed);
        assert_eq!(
            store.placement(&TaskId::new("t2")),
            Some(Placement::new(TaskStatus::Done, 0))
        );
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_move_is_rolled_back() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PUT", "/tasks/t2")
            .with_status(500)
            .with_body("db down")
            .create_async()
            .await;
        let gateway = gateway(&server);
        let mut store = board();

        let effect = ColumnBoard.drop_task(&mut store, &drag_t2_to_done()).unwrap();
        let completion = effect.ticket.unwrap().send(&gateway).await;
        assert!(!completion.result.is_success());

        let outcome = store.reconcile(&completion);
        assert!(matches!(outcome, Reconciliation::RolledBack { .. }));
        assert_eq!(
            store.placement(&TaskId::new("t2")),
            Some(Placement::new(TaskStatus::Todo, 1))
        );
        assert!(store.last_error().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_failure() {
        let client = HttpClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let gateway = HttpSyncGateway::new(client);

        let result = gateway.persist(&TaskId::new("t1"), TaskStatus::Done).await;
        assert!(matches!(result, SyncResult::Failed { .. }));
    }
}
