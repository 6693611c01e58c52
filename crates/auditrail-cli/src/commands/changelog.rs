//! Change log commands

use super::print_json;
use auditrail_engine::commands::change_log::{change_log_for_entity, change_log_recent};
use auditrail_engine::parse_entity_id;
use auditrail_store::StoredChange;
use clap::{Args, Subcommand};
use rusqlite::Connection;
use serde_json::Value;

#[derive(Debug, Args)]
pub struct ChangelogArgs {
    #[command(subcommand)]
    pub command: ChangelogCommand,
}

#[derive(Debug, Subcommand)]
pub enum ChangelogCommand {
    /// Audit trail of one entity, oldest first
    Show(ShowArgs),
    /// Most recent changes across all entities, newest first
    Recent(RecentArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub entity_id: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RecentArgs {
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ChangelogArgs, conn: &Connection) -> Result<(), Box<dyn std::error::Error>> {
    let (changes, json) = match args.command {
        ChangelogCommand::Show(show) => {
            let id = parse_entity_id(&show.entity_id)?;
            (change_log_for_entity(&id, conn)?, show.json)
        }
        ChangelogCommand::Recent(recent) => (change_log_recent(recent.limit, conn)?, recent.json),
    };

    if json {
        return print_json(&changes);
    }
    if changes.is_empty() {
        println!("No changes recorded");
    }
    for change in &changes {
        println!("{}", format_change(change));
    }
    Ok(())
}

fn format_change(change: &StoredChange) -> String {
    let mut line = format!(
        "{}  {}  {} {}.{}: {} -> {}",
        change.changed_at.format("%Y-%m-%d %H:%M:%S"),
        change.changed_by,
        change.entity_id,
        change.entity_type,
        change.field_name,
        format_value(change.old_value.as_ref()),
        format_value(change.new_value.as_ref()),
    );
    if let Some(comment) = &change.comment {
        line.push_str(&format!("  ({})", comment));
    }
    line
}

fn format_value(value: Option<&Value>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) => v.to_string(),
    }
}
