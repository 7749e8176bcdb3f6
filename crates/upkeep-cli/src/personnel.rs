//! `upkeep personnel` subcommands.

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::json;
use upkeep_core::{PersonnelId, PersonnelRole, PersonnelStatus};
use upkeep_store::PersonnelQuery;

use crate::context::Context;
use crate::output::print_json;
use crate::payload::{parse_token, PayloadArgs};

#[derive(Args, Debug)]
pub struct PersonnelArgs {
    #[command(subcommand)]
    pub command: PersonnelCommand,
}

#[derive(Subcommand, Debug)]
pub enum PersonnelCommand {
    /// Add an employee or contractor.
    Add(PayloadArgs),

    /// List personnel by role and name, email or specialty.
    List {
        #[arg(long, value_parser = parse_token::<PersonnelRole>)]
        role: Option<PersonnelRole>,
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one person.
    Show { id: PersonnelId },

    /// Merge fields into a personnel record.
    Update {
        id: PersonnelId,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Set a person's status (`active`, `inactive` or `on-leave`).
    Status {
        id: PersonnelId,
        #[arg(value_parser = parse_token::<PersonnelStatus>)]
        status: PersonnelStatus,
    },

    /// Delete a personnel record.
    Rm { id: PersonnelId },
}

pub fn run_personnel(args: &PersonnelArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let workspace = ctx.workspace()?;
    let store = workspace.personnel();
    match &args.command {
        PersonnelCommand::Add(payload) => print_json(out, &store.create(&payload.read()?)?),
        PersonnelCommand::List { role, search } => {
            let query = PersonnelQuery {
                role: *role,
                search: search.clone(),
            };
            print_json(out, &query.apply(&store.list_all()))
        }
        PersonnelCommand::Show { id } => print_json(out, &store.get_by_id(id)?),
        PersonnelCommand::Update { id, payload } => {
            print_json(out, &store.update(id, &payload.read()?)?)
        }
        PersonnelCommand::Status { id, status } => {
            print_json(out, &store.update_status(id, *status)?)
        }
        PersonnelCommand::Rm { id } => {
            store.delete(id)?;
            print_json(out, &json!({ "deleted": id }))
        }
    }
}
