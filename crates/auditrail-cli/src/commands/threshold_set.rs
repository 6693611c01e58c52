//! Threshold set commands

use super::{or_dash, overlay, print_json, AttributionArgs};
use auditrail_core::model::ThresholdSetInput;
use auditrail_engine::commands::threshold_set::{
    threshold_set_create, threshold_set_get, threshold_set_list, threshold_set_modify,
};
use auditrail_engine::parse_entity_id;
use clap::{ArgAction, Args, Subcommand};
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct ThresholdSetArgs {
    #[command(subcommand)]
    pub command: ThresholdSetCommand,
}

#[derive(Debug, Subcommand)]
pub enum ThresholdSetCommand {
    /// Create a threshold set
    Add(AddArgs),
    /// Change fields of a threshold set; omitted flags keep their value
    Modify(ModifyArgs),
    /// Show one threshold set
    Show(ShowArgs),
    /// List threshold sets by name
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub group: Option<String>,

    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub active: bool,

    #[command(flatten)]
    pub attribution: AttributionArgs,
}

#[derive(Debug, Args)]
pub struct ModifyArgs {
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, conflicts_with = "description")]
    pub clear_description: bool,

    #[arg(long)]
    pub group: Option<String>,

    #[arg(long, conflicts_with = "group")]
    pub clear_group: bool,

    #[arg(long, action = ArgAction::Set)]
    pub active: Option<bool>,

    #[command(flatten)]
    pub attribution: AttributionArgs,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub amount: Option<usize>,

    #[arg(long)]
    pub json: bool,
}

pub fn execute(
    args: ThresholdSetArgs,
    conn: &Connection,
) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ThresholdSetCommand::Add(add) => {
            let input = ThresholdSetInput {
                name: add.name,
                description: add.description,
                group: add.group,
                active: add.active,
            };
            let id = threshold_set_create(input, &add.attribution.into(), conn)?;
            println!("Threshold set created: {}", id);
        }
        ThresholdSetCommand::Modify(modify) => {
            let id = parse_entity_id(&modify.id)?;
            let current = threshold_set_get(&id, conn)?
                .ok_or_else(|| format!("Threshold set not found: {}", id))?;
            let input = ThresholdSetInput {
                name: modify.name.unwrap_or(current.name),
                description: overlay(
                    modify.description,
                    modify.clear_description,
                    current.description,
                ),
                group: overlay(modify.group, modify.clear_group, current.group),
                active: modify.active.unwrap_or(current.active),
            };
            let set = threshold_set_modify(&id, input, &modify.attribution.into(), conn)?;
            println!("Threshold set modified: {}", set.id);
        }
        ThresholdSetCommand::Show(show) => {
            let id = parse_entity_id(&show.id)?;
            let set = threshold_set_get(&id, conn)?
                .ok_or_else(|| format!("Threshold set not found: {}", id))?;
            if show.json {
                return print_json(&set);
            }
            println!("id:          {}", set.id);
            println!("name:        {}", set.name);
            println!("description: {}", or_dash(set.description.as_deref()));
            println!("group:       {}", or_dash(set.group.as_deref()));
            println!("active:      {}", set.active);
        }
        ThresholdSetCommand::List(list) => {
            let sets = threshold_set_list(list.amount, conn)?;
            if list.json {
                return print_json(&sets);
            }
            for set in &sets {
                println!("{}  {}  active={}", set.id, set.name, set.active);
            }
        }
    }
    Ok(())
}
