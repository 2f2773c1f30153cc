//! TaskRank CLI - rank a bulk JSON file of tasks.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

use taskrank_client::HttpClient;
use taskrank_core::{
    suggest, DependencyGraph, ScoredTask, Scorer, SystemClock, Task, DEFAULT_SUGGESTION_LIMIT,
};

/// TaskRank CLI - Task prioritization tool
#[derive(Parser)]
#[command(name = "taskrank")]
#[command(about = "Rank tasks by priority and detect dependency cycles", long_about = None)]
struct Cli {
    /// Server address; tasks are ranked locally when omitted
    #[arg(short, long)]
    addr: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every task in a file
    Analyze {
        /// JSON file holding an array of tasks
        file: PathBuf,
    },

    /// Show the best tasks to work on next
    Suggest {
        /// JSON file holding an array of tasks
        file: PathBuf,

        /// Maximum number of suggestions; the server's own limit still applies
        #[arg(short, long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },

    /// Check a file for circular dependencies
    Check {
        /// JSON file holding an array of tasks
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { file } => {
            let payload = read_payload(&file)?;
            let ranked = match &cli.addr {
                Some(addr) => HttpClient::new(addr).analyze(&payload).await?,
                None => Scorer::new(SystemClock).rank_payload(&payload)?,
            };
            print_ranked(&ranked, cli.json)?;
        }
        Commands::Suggest { file, limit } => {
            let payload = read_payload(&file)?;
            let top = suggest_tasks(cli.addr.as_deref(), &payload, limit).await?;
            print_ranked(&top, cli.json)?;
        }
        Commands::Check { file } => {
            check_cycles(&read_payload(&file)?)?;
        }
    }

    Ok(())
}

fn read_payload(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let payload = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid JSON in '{}': {}", path.display(), e))?;
    Ok(payload)
}

/// Best `limit` tasks, ranked by the server at `addr` or locally.
async fn suggest_tasks(
    addr: Option<&str>,
    payload: &Value,
    limit: usize,
) -> Result<Vec<ScoredTask>, Box<dyn std::error::Error>> {
    let ranked = match addr {
        Some(addr) => HttpClient::new(addr).suggest(payload).await?,
        None => Scorer::new(SystemClock).rank_payload(payload)?,
    };
    Ok(suggest(ranked, limit))
}

fn check_cycles(payload: &Value) -> Result<(), Box<dyn std::error::Error>> {
    let tasks: Vec<Task> = serde_json::from_value(payload.clone())?;
    let graph = DependencyGraph::from_tasks(&tasks);

    println!(
        "{} tasks, {} dependency edges within the batch",
        graph.node_count(),
        graph.edge_count()
    );
    match graph.find_cycle() {
        Some(cycle) => Err(format!("Circular dependency detected: {}", cycle.join(" -> ")).into()),
        None => {
            println!("No circular dependencies.");
            Ok(())
        }
    }
}

fn print_ranked(tasks: &[ScoredTask], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    println!(
        "{:>6}  {:<32}  {:<10}  {:>5}  {:>3}  {}",
        "SCORE", "TITLE", "DUE", "HOURS", "IMP", "EXPLANATION"
    );
    println!("{}", "-".repeat(110));

    for task in tasks {
        println!(
            "{:>6.2}  {:<32}  {:<10}  {:>5}  {:>3}  {}",
            task.score,
            truncate(task.title(), 32),
            task.field_str("due_date").unwrap_or("N/A"),
            display_field(task.fields.get("estimated_hours")),
            display_field(task.fields.get("importance")),
            task.explanation
        );
    }

    Ok(())
}

fn display_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    }
}
