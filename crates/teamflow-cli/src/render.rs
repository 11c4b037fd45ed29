//! Plain-text board output.

use teamflow_core::{BoardStateStore, Task, TaskId};

pub fn print_board(store: &BoardStateStore) {
    for (status, tasks) in store.columns().iter() {
        println!();
        println!("{} ({})", status.title(), tasks.len());
        println!("{}", "-".repeat(60));

        if tasks.is_empty() {
            println!("  (empty)");
            continue;
        }
        for (index, task) in tasks.iter().enumerate() {
            println!("{}", format_card(index, task, store.sync_state(&task.id).is_pending()));
        }
    }
}

/// Message for a drop the board did not turn into a gesture.
pub fn ignored_drop(task_id: &TaskId) -> String {
    format!(
        "Nothing to do: drop of task {} ignored (dropped onto itself or from an unknown column)",
        task_id
    )
}

fn format_card(index: usize, task: &Task, pending: bool) -> String {
    let assignee = task
        .assigned_to
        .as_ref()
        .map(|u| format!("  @{}", u))
        .unwrap_or_default();
    let marker = if pending { "  (saving)" } else { "" };
    format!("{:>3}. {:<24}  {:<40}{}{}", index, task.id.as_str(), task.title, assignee, marker)
}
