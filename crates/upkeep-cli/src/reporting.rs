//! # Read-only Views
//!
//! `upkeep analytics`, `upkeep dashboard` and `upkeep report`. These read
//! a tolerant snapshot of the data directory and never write to it; a
//! report only writes its CSV when `--out` names a directory.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;
use upkeep_analytics::{analytics, build_reports, dashboard, export, DateRange, ReportKind, TimeWindow};

use crate::context::Context;
use crate::output::print_json;

#[derive(Args, Debug, Default)]
pub struct AnalyticsArgs {
    /// Time window: 7d, 30d, 90d, 6m, 1y or all. Defaults to the configured range.
    #[arg(long)]
    pub range: Option<DateRange>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Report to export: maintenance, property, personnel or financial.
    #[arg(long)]
    pub kind: ReportKind,

    /// Time window: 7d, 30d, 90d, 6m, 1y or all. Defaults to the configured range.
    #[arg(long)]
    pub range: Option<DateRange>,

    /// Write `<kind>-report-<range>.csv` into this directory instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn window(ctx: &Context, range: Option<DateRange>) -> TimeWindow {
    TimeWindow::resolve(range.unwrap_or(ctx.config().default_range), ctx.now())
}

pub fn run_analytics(args: &AnalyticsArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let view = analytics(&ctx.snapshot(), &window(ctx, args.range));
    print_json(out, &view)
}

pub fn run_dashboard(ctx: &Context, out: &mut dyn Write) -> Result<()> {
    print_json(out, &dashboard(&ctx.snapshot(), ctx.now()))
}

pub fn run_report(args: &ReportArgs, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    let data = build_reports(&ctx.snapshot(), &window(ctx, args.range));
    let document = export(args.kind, &data);
    match &args.out {
        None => {
            writeln!(out, "{}", document.content)?;
        }
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output directory {}", dir.display()))?;
            let path = dir.join(&document.filename);
            fs::write(&path, &document.content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(kind = %args.kind, path = %path.display(), "report exported");
            writeln!(out, "{}", path.display())?;
        }
    }
    Ok(())
}
