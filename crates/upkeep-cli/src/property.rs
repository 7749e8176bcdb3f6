//! `upkeep property` subcommands.

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::json;
use upkeep_core::{PropertyId, PropertyStatus};
use upkeep_store::PropertyQuery;

use crate::context::Context;
use crate::output::print_json;
use crate::payload::{parse_token, PayloadArgs};

#[derive(Args, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// Register a property.
    Add(PayloadArgs),

    /// List properties, optionally filtered by address, city or state.
    List {
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one property.
    Show { id: PropertyId },

    /// Merge fields into a property.
    Update {
        id: PropertyId,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Set a property's status (`active` or `inactive`).
    Status {
        id: PropertyId,
        #[arg(value_parser = parse_token::<PropertyStatus>)]
        status: PropertyStatus,
    },

    /// Delete a property.
    Rm { id: PropertyId },

    /// Append a maintenance record to a property's history.
    Record {
        id: PropertyId,
        #[command(flatten)]
        payload: PayloadArgs,
    },
}

pub fn run_property(args: &PropertyArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let workspace = ctx.workspace()?;
    let store = workspace.properties();
    match &args.command {
        PropertyCommand::Add(payload) => print_json(out, &store.create(&payload.read()?)?),
        PropertyCommand::List { search } => {
            let query = PropertyQuery {
                search: search.clone(),
            };
            print_json(out, &query.apply(&store.list_all()))
        }
        PropertyCommand::Show { id } => print_json(out, &store.get_by_id(id)?),
        PropertyCommand::Update { id, payload } => {
            print_json(out, &store.update(id, &payload.read()?)?)
        }
        PropertyCommand::Status { id, status } => {
            print_json(out, &store.update_status(id, *status)?)
        }
        PropertyCommand::Rm { id } => {
            store.delete(id)?;
            print_json(out, &json!({ "deleted": id }))
        }
        PropertyCommand::Record { id, payload } => {
            print_json(out, &store.add_maintenance_record(id, &payload.read()?)?)
        }
    }
}
