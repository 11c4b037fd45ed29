//! TeamFlow CLI - Command line board for TeamFlow projects.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use teamflow_client::{HttpClient, HttpSyncGateway};
use teamflow_core::{
    BoardBinding, BoardStateStore, ColumnBoard, ColumnDrop, DropLocation, DropOutcome, ProjectId,
    Reconciliation, SortableBoard, SortableDrop, TaskId,
};

mod config;
mod render;

use config::{Config, ConfigArgs};

/// TeamFlow CLI - Project board tool
#[derive(Parser)]
#[command(name = "teamflow")]
#[command(about = "CLI for TeamFlow project boards", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a project's board
    Board {
        /// Project ID
        #[arg(short, long)]
        project: String,
    },

    /// Move a task, as if dragged on the board
    Move {
        /// Project ID
        #[arg(short, long)]
        project: String,

        /// Task ID to move
        task: String,

        /// Column key (todo, in-progress, done) or the ID of a task to drop onto
        #[arg(long)]
        to: String,

        /// Position within the target column; appends when omitted
        #[arg(long)]
        index: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut client = HttpClient::new(&config.api_url, config.timeout)?;
    if let Some(token) = &config.token {
        client = client.with_token(token.clone());
    }
    info!(api = %client.base_url(), "Using task API");

    match cli.command {
        Commands::Board { project } => {
            show_board(&client, ProjectId::new(project)).await?;
        }
        Commands::Move {
            project,
            task,
            to,
            index,
        } => {
            move_task(client, ProjectId::new(project), TaskId::new(task), to, index).await?;
        }
    }

    Ok(())
}

async fn show_board(
    client: &HttpClient,
    project: ProjectId,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = client.tasks_by_project(&project).await?;
    let store = BoardStateStore::new(tasks);

    println!("Project {}:", project);
    render::print_board(&store);

    Ok(())
}

async fn move_task(
    client: HttpClient,
    project: ProjectId,
    task_id: TaskId,
    to: String,
    index: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = client.tasks_by_project(&project).await?;
    let mut store = BoardStateStore::new(tasks);

    let Some((status, position)) = store.columns().locate(&task_id) else {
        return Err(format!("task {} is not on project {}", task_id, project).into());
    };

    // An explicit index is what the column board reports; without one the
    // drop looks like the sortable board's.
    let effect = match index {
        Some(index) => ColumnBoard.drop_task(
            &mut store,
            &ColumnDrop {
                draggable_id: task_id.to_string(),
                source: DropLocation::new(status.key(), position),
                destination: Some(DropLocation::new(to.as_str(), index)),
            },
        ),
        None => SortableBoard.drop_task(
            &mut store,
            &SortableDrop {
                active_id: task_id.to_string(),
                over_id: Some(to.clone()),
            },
        ),
    };

    let Some(effect) = effect else {
        println!("{}", render::ignored_drop(&task_id));
        return Ok(());
    };

    match effect.outcome {
        DropOutcome::Unresolved => {
            println!("Ignored: '{}' is neither a column nor a task on this board", to);
            return Ok(());
        }
        DropOutcome::Unchanged => {
            println!("Task {} is already there", task_id);
            return Ok(());
        }
        DropOutcome::Move(placement) => {
            println!(
                "Moving {} to {} #{}",
                task_id,
                placement.status.title(),
                placement.index
            );
        }
    }

    if let Some(ticket) = effect.ticket {
        let gateway = HttpSyncGateway::new(client);
        let completion = ticket.send(&gateway).await;
        match store.reconcile(&completion) {
            Reconciliation::Confirmed => println!("Saved."),
            Reconciliation::RolledBack { restored, reason } => {
                println!(
                    "Reverted to {} #{}: {}",
                    restored.status.title(),
                    restored.index,
                    reason
                );
            }
            Reconciliation::Stale => {}
        }
    } else {
        println!("Reordered locally (column order is not saved).");
    }

    render::print_board(&store);

    Ok(())
}
