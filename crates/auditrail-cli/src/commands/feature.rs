//! Feature commands

use super::{or_dash, overlay, print_json, AttributionArgs};
use auditrail_core::model::{Feature, FeatureInput};
use auditrail_engine::commands::feature::{
    feature_create, feature_get, feature_list, feature_modify,
};
use auditrail_engine::parse_entity_id;
use clap::{ArgAction, Args, Subcommand};
use rusqlite::Connection;

#[derive(Debug, Args)]
pub struct FeatureArgs {
    #[command(subcommand)]
    pub command: FeatureCommand,
}

#[derive(Debug, Subcommand)]
pub enum FeatureCommand {
    /// Create a feature
    Add(AddArgs),
    /// Change fields of a feature; omitted flags keep their value, `--clear-*` empties one
    Modify(ModifyArgs),
    /// Show one feature
    Show(ShowArgs),
    /// List features by name
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long = "type")]
    pub feature_type: Option<String>,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub default_threshold: Option<f64>,

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

    #[arg(long = "type")]
    pub feature_type: Option<String>,

    #[arg(long, conflicts_with = "feature_type")]
    pub clear_type: bool,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long, conflicts_with = "priority")]
    pub clear_priority: bool,

    #[arg(long)]
    pub default_threshold: Option<f64>,

    #[arg(long, conflicts_with = "default_threshold")]
    pub clear_default_threshold: bool,

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
    /// Maximum number of features
    #[arg(long)]
    pub amount: Option<usize>,

    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: FeatureArgs, conn: &Connection) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        FeatureCommand::Add(add) => execute_add(add, conn),
        FeatureCommand::Modify(modify) => execute_modify(modify, conn),
        FeatureCommand::Show(show) => execute_show(show, conn),
        FeatureCommand::List(list) => execute_list(list, conn),
    }
}

fn execute_add(args: AddArgs, conn: &Connection) -> Result<(), Box<dyn std::error::Error>> {
    let input = FeatureInput {
        name: args.name,
        description: args.description,
        feature_type: args.feature_type,
        priority: args.priority,
        default_threshold: args.default_threshold,
        active: args.active,
    };

    let id = feature_create(input, &args.attribution.into(), conn)?;
    println!("Feature created: {}", id);
    Ok(())
}

fn execute_modify(args: ModifyArgs, conn: &Connection) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_entity_id(&args.id)?;
    let current = feature_get(&id, conn)?.ok_or_else(|| format!("Feature not found: {}", id))?;

    let input = FeatureInput {
        name: args.name.unwrap_or(current.name),
        description: overlay(
            args.description,
            args.clear_description,
            current.description,
        ),
        feature_type: overlay(args.feature_type, args.clear_type, current.feature_type),
        priority: overlay(args.priority, args.clear_priority, current.priority),
        default_threshold: overlay(
            args.default_threshold,
            args.clear_default_threshold,
            current.default_threshold,
        ),
        active: args.active.unwrap_or(current.active),
    };

    let feature = feature_modify(&id, input, &args.attribution.into(), conn)?;
    println!("Feature modified: {}", feature.id);
    Ok(())
}

fn execute_show(args: ShowArgs, conn: &Connection) -> Result<(), Box<dyn std::error::Error>> {
    let id = parse_entity_id(&args.id)?;
    let feature = feature_get(&id, conn)?.ok_or_else(|| format!("Feature not found: {}", id))?;

    if args.json {
        return print_json(&feature);
    }
    print_feature(&feature);
    Ok(())
}

fn execute_list(args: ListArgs, conn: &Connection) -> Result<(), Box<dyn std::error::Error>> {
    let features = feature_list(args.amount, conn)?;

    if args.json {
        return print_json(&features);
    }
    for feature in &features {
        println!(
            "{}  {}  active={}",
            feature.id, feature.name, feature.active
        );
    }
    Ok(())
}

fn print_feature(feature: &Feature) {
    println!("id:                {}", feature.id);
    println!("name:              {}", feature.name);
    println!("description:       {}", or_dash(feature.description.as_deref()));
    println!("type:              {}", or_dash(feature.feature_type.as_deref()));
    println!("priority:          {}", or_dash(feature.priority.as_deref()));
    match feature.default_threshold {
        Some(threshold) => println!("default_threshold: {}", threshold),
        None => println!("default_threshold: -"),
    }
    println!("active:            {}", feature.active);
}
