//! # upkeep-cli — The `upkeep` Command
//!
//! A command-line front end over a local data directory, one JSON file per
//! collection.
//!
//! ## Subcommands
//!
//! - `upkeep property`: add, list, show, update, status, rm, record.
//! - `upkeep personnel`: add, list, show, update, status, rm.
//! - `upkeep work-order`: add, list, show, update, note, attach, assign, rm.
//! - `upkeep analytics`: trend, contractor leaderboard, key metrics.
//! - `upkeep dashboard`: headline counts.
//! - `upkeep report`: CSV export of one report view.
//!
//! ```bash
//! upkeep property add --json '{"address":"12 Elm St","city":"Springfield","state":"IL","zipCode":"62704"}'
//! upkeep work-order list --status pending --search leak
//! upkeep report --kind financial --range 90d --out ./exports
//! ```
//!
//! Handlers take a [`Context`](context::Context) and a writer, so tests can
//! drive them against an in-memory backend and a fixed clock.

pub mod config;
pub mod context;
pub mod output;
pub mod payload;
pub mod personnel;
pub mod property;
pub mod reporting;
pub mod work_order;
