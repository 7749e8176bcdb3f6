//! `upkeep work-order` subcommands.
//!
//! Creation, updates and assignment go through the [`Workspace`] so that an
//! `assigneeId` is checked against personnel and `assignedTo` is filled in.
//!
//! [`Workspace`]: upkeep_store::Workspace

use std::io::Write;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::json;
use upkeep_core::{PersonnelId, WorkOrderId, WorkOrderStatus};
use upkeep_store::{group_by_status, WorkOrderQuery};

use crate::context::Context;
use crate::output::print_json;
use crate::payload::PayloadArgs;

#[derive(Args, Debug)]
pub struct WorkOrderArgs {
    #[command(subcommand)]
    pub command: WorkOrderCommand,
}

#[derive(Subcommand, Debug)]
pub enum WorkOrderCommand {
    /// Open a work order.
    Add(PayloadArgs),

    /// List work orders by status and title or description.
    List {
        #[arg(long)]
        status: Option<WorkOrderStatus>,
        #[arg(long)]
        search: Option<String>,
        /// Bucket the results by status.
        #[arg(long)]
        group: bool,
    },

    /// Show one work order with its notes and attachments.
    Show { id: WorkOrderId },

    /// Merge fields into a work order (status, costs, assignment, ...).
    Update {
        id: WorkOrderId,
        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Add a note to the front of a work order's history.
    Note {
        id: WorkOrderId,
        #[arg(long)]
        content: String,
        #[arg(long = "by")]
        created_by: String,
    },

    /// Attach a document link.
    Attach {
        id: WorkOrderId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        #[arg(long = "type")]
        kind: String,
    },

    /// Assign a work order to a member of personnel.
    Assign {
        id: WorkOrderId,
        #[arg(long)]
        personnel: PersonnelId,
    },

    /// Delete a work order.
    Rm { id: WorkOrderId },
}

pub fn run_work_order(args: &WorkOrderArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let workspace = ctx.workspace()?;
    let store = workspace.work_orders();
    match &args.command {
        WorkOrderCommand::Add(payload) => {
            print_json(out, &workspace.create_work_order(&payload.read()?)?)
        }
        WorkOrderCommand::List {
            status,
            search,
            group,
        } => {
            let query = WorkOrderQuery {
                status: *status,
                search: search.clone(),
            };
            let orders = query.apply(&store.list_all());
            if *group {
                print_json(out, &group_by_status(&orders))
            } else {
                print_json(out, &orders)
            }
        }
        WorkOrderCommand::Show { id } => print_json(out, &store.get_by_id(id)?),
        WorkOrderCommand::Update { id, payload } => {
            print_json(out, &workspace.update_work_order(id, &payload.read()?)?)
        }
        WorkOrderCommand::Note {
            id,
            content,
            created_by,
        } => {
            let body = json!({ "content": content, "createdBy": created_by });
            print_json(out, &store.add_note(id, &body)?)
        }
        WorkOrderCommand::Attach { id, name, url, kind } => {
            let body = json!({ "name": name, "url": url, "type": kind });
            print_json(out, &store.add_attachment(id, &body)?)
        }
        WorkOrderCommand::Assign { id, personnel } => {
            print_json(out, &workspace.assign_work_order(id, personnel)?)
        }
        WorkOrderCommand::Rm { id } => {
            store.delete(id)?;
            print_json(out, &json!({ "deleted": id }))
        }
    }
}
