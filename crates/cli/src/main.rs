//! FieldPlan CLI - adaptive field-work scheduling.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};

use fieldplan_core::{
    SectionOrigin, SectionPatch, SectionSpec, SectionStatus, TaskKind, TaskPatch, TaskPriority,
    TaskSpec, TaskStatus, Weather,
};
use fieldplan_engine::optimize_schedule;
use fieldplan_store::ProjectStore;

#[derive(Parser)]
#[command(name = "fieldplan")]
#[command(about = "Adaptive construction-site scheduling", long_about = None)]
struct Cli {
    /// Snapshot file holding the project state
    #[arg(long, default_value = ".fieldplan/project.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage sections
    Section {
        #[command(subcommand)]
        command: SectionCommands,
    },
    /// Set the weather signal (sunny/rain/storm)
    Weather { value: String },
    /// Set the available headcount signal
    Personnel { count: u32 },
    /// Re-derive task status and priority from the current signals
    Optimize,
    /// Print the activity feed, newest first
    Feed,
    /// Print a project summary
    Status,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Site location
        location: String,
        /// Outdoor work (defaults to indoor)
        #[arg(long)]
        outdoor: bool,
        /// Priority (low/medium/high/critical)
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Owning section id
        #[arg(long)]
        section: Option<String>,
        /// Assigned worker
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Update an existing task
    Update {
        /// Task ID
        id: String,
        /// New status (pending/in-progress/completed/blocked/delayed)
        #[arg(long)]
        status: Option<String>,
        /// New priority (low/medium/high/critical)
        #[arg(long)]
        priority: Option<String>,
        /// New progress percentage (clamped to 0-100)
        #[arg(long)]
        progress: Option<u8>,
        /// Move to this section
        #[arg(long, conflicts_with = "unassign")]
        section: Option<String>,
        /// Detach from its section
        #[arg(long)]
        unassign: bool,
    },
    /// List tasks in canonical order
    List,
}

#[derive(Subcommand)]
enum SectionCommands {
    /// Add a new section, ranked last
    Add {
        /// Section name
        name: String,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Created by a manager (defaults to engineer)
        #[arg(long)]
        manager: bool,
    },
    /// Update a section
    Update {
        /// Section ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New status (pending/in-progress/completed)
        #[arg(long)]
        status: Option<String>,
        /// New headcount
        #[arg(long)]
        operators: Option<u32>,
    },
    /// Delete a section (its tasks survive, detached)
    Delete {
        /// Section ID
        id: String,
    },
    /// Reorder sections: listed ids take the top ranks, the rest follow
    Reorder {
        /// Section IDs in the desired order
        ids: Vec<String>,
    },
    /// Link a plan document to a section
    Link {
        /// Section ID
        id: String,
        /// Opaque plan id
        plan: String,
    },
    /// Unlink a plan document from a section
    Unlink {
        /// Section ID
        id: String,
        /// Opaque plan id
        plan: String,
    },
    /// List sections by rank
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let mut store = ProjectStore::load(&cli.state)?;

    match cli.command {
        Commands::Task { command } => run_task(&mut store, command)?,
        Commands::Section { command } => run_section(&mut store, command)?,
        Commands::Weather { value } => {
            let weather = parse_weather(&value)?;
            store.set_weather(weather);
            println!("Weather set to {weather}");
        }
        Commands::Personnel { count } => {
            store.set_personnel_count(count);
            println!("Personnel count set to {count}");
        }
        Commands::Optimize => {
            let outcome = optimize_schedule(&mut store);
            info!(?outcome, "schedule optimized");
            if let Some(entry) = store.feed().entries().next() {
                println!("{}", entry.message);
            }
        }
        Commands::Feed => {
            for entry in store.feed().entries() {
                println!("{} [{:?}] {}", entry.time, entry.kind, entry.message);
            }
        }
        Commands::Status => {
            println!("FieldPlan status");
            println!("  Weather: {}", store.weather());
            println!("  Personnel: {}", store.personnel_count());
            println!("  Sections: {}", store.sections().len());
            println!("  Tasks: {}", store.tasks().len());
            let funds = store.funds();
            println!(
                "  Funds: budget {} / spent {} / projected {}",
                funds.budget, funds.spent, funds.projected
            );
        }
    }

    store.save(&cli.state)?;
    Ok(())
}

fn run_task(store: &mut ProjectStore, command: TaskCommands) -> Result<()> {
    match command {
        TaskCommands::Add { title, location, outdoor, priority, section, assignee } => {
            let kind = if outdoor { TaskKind::Outdoor } else { TaskKind::Indoor };
            let mut spec = TaskSpec::new(title, location, kind)
                .with_priority(parse_priority(&priority)?);
            spec.assignee = assignee;
            if let Some(section) = section {
                spec.section_id = Some(section.parse().map_err(|_| anyhow::anyhow!("Invalid section ID"))?);
            }
            let task = store.create_task(spec)?;
            println!("Added task: {} - {}", task.id, task.title);
        }
        TaskCommands::Update { id, status, priority, progress, section, unassign } => {
            let task_id = id.parse().map_err(|_| anyhow::anyhow!("Invalid task ID"))?;
            let section_id = match (section, unassign) {
                (Some(s), _) => Some(Some(
                    s.parse().map_err(|_| anyhow::anyhow!("Invalid section ID"))?,
                )),
                (None, true) => Some(None),
                (None, false) => None,
            };
            let patch = TaskPatch {
                status: status.as_deref().map(parse_status).transpose()?,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                progress,
                section_id,
                ..Default::default()
            };
            store.update_task(task_id, patch)?;
            println!("Updated task {id}");
        }
        TaskCommands::List => {
            println!("Tasks ({})", store.tasks().len());
            for task in store.tasks() {
                println!(
                    "  {} | {} | {} | {:>3}% - {} @ {}",
                    task.id, task.status, task.priority, task.progress, task.title, task.location,
                );
            }
        }
    }
    Ok(())
}

fn run_section(store: &mut ProjectStore, command: SectionCommands) -> Result<()> {
    match command {
        SectionCommands::Add { name, description, manager } => {
            let mut spec = SectionSpec::new(name);
            spec.description = description;
            if manager {
                spec = spec.created_by(SectionOrigin::Manager);
            }
            let section = store.create_section(spec);
            println!("Added section: {} - {} (rank {})", section.id, section.name, section.priority);
        }
        SectionCommands::Update { id, name, status, operators } => {
            let section_id = parse_section_id(&id)?;
            let patch = SectionPatch {
                name,
                status: status.as_deref().map(parse_section_status).transpose()?,
                assigned_operators: operators,
                ..Default::default()
            };
            store.update_section(section_id, patch)?;
            println!("Updated section {id}");
        }
        SectionCommands::Delete { id } => {
            store.delete_section(parse_section_id(&id)?)?;
            println!("Deleted section {id}");
        }
        SectionCommands::Reorder { ids } => {
            let ids = ids
                .iter()
                .map(|s| parse_section_id(s))
                .collect::<Result<Vec<_>>>()?;
            store.reorder_sections(&ids)?;
            println!("Reordered {} sections", store.sections().len());
        }
        SectionCommands::Link { id, plan } => {
            store.link_plan(parse_section_id(&id)?, fieldplan_core::PlanId::new(&plan))?;
            println!("Linked plan {plan}");
        }
        SectionCommands::Unlink { id, plan } => {
            store.unlink_plan(parse_section_id(&id)?, &fieldplan_core::PlanId::new(&plan))?;
            println!("Unlinked plan {plan}");
        }
        SectionCommands::List => {
            println!("Sections ({})", store.sections().len());
            for section in store.sections() {
                println!(
                    "  {:>2}. {} | {:?} | {} operators | {} plans - {}",
                    section.priority,
                    section.id,
                    section.status,
                    section.assigned_operators,
                    section.linked_plans.len(),
                    section.name,
                );
            }
        }
    }
    Ok(())
}

fn parse_section_id(s: &str) -> Result<fieldplan_core::SectionId> {
    s.parse().map_err(|_| anyhow::anyhow!("Invalid section ID"))
}

fn parse_weather(s: &str) -> Result<Weather> {
    match s {
        "sunny" => Ok(Weather::Sunny),
        "rain" => Ok(Weather::Rain),
        "storm" => Ok(Weather::Storm),
        _ => Err(anyhow::anyhow!("Unknown weather: {s}")),
    }
}

fn parse_status(s: &str) -> Result<TaskStatus> {
    match s {
        "pending" => Ok(TaskStatus::Pending),
        "in-progress" => Ok(TaskStatus::InProgress),
        "completed" => Ok(TaskStatus::Completed),
        "blocked" => Ok(TaskStatus::Blocked),
        "delayed" => Ok(TaskStatus::Delayed),
        _ => Err(anyhow::anyhow!("Unknown status: {s}")),
    }
}

fn parse_section_status(s: &str) -> Result<SectionStatus> {
    match s {
        "pending" => Ok(SectionStatus::Pending),
        "in-progress" => Ok(SectionStatus::InProgress),
        "completed" => Ok(SectionStatus::Completed),
        _ => Err(anyhow::anyhow!("Unknown section status: {s}")),
    }
}

fn parse_priority(s: &str) -> Result<TaskPriority> {
    match s {
        "low" => Ok(TaskPriority::Low),
        "medium" => Ok(TaskPriority::Medium),
        "high" => Ok(TaskPriority::High),
        "critical" => Ok(TaskPriority::Critical),
        _ => Err(anyhow::anyhow!("Unknown priority: {s}")),
    }
}
