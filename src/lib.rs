// src/lib.rs

pub mod cache;
pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod path;
pub mod types;

use std::fmt::{self, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{Plan, TrackerConfig, load_or_default, load_plan};
use crate::dag::{Computation, DependencyMap, TrackedGraph};
use crate::errors::TrackdagError;
use crate::path::GlobalPath;

/// High-level entry point used by `main.rs`.
///
/// Loads config and plan, validates the plan as a computation and prints
/// its tracked checkpoints. Nothing is executed.
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(&args.config)
        .with_context(|| format!("loading config {}", args.config))?;
    let plan = load_plan(&args.plan).with_context(|| format!("loading plan {}", args.plan))?;

    let report = inspect(&plan, &cfg)?;
    print!("{report}");

    debug!("inspection complete (no execution)");
    Ok(())
}

/// Validate `plan` and render a human-readable report of its tracked
/// checkpoints, output and request order.
pub fn inspect(plan: &Plan, cfg: &TrackerConfig) -> errors::Result<String> {
    if plan.items.len() > cfg.limits.max_items {
        return Err(TrackdagError::TooManyItems {
            count: plan.items.len(),
            limit: cfg.limits.max_items,
        });
    }

    let computation = Computation::create(plan.computation.clone(), plan.items.clone())?;
    let tracked = computation.tracked_paths();
    let closures = computation.tracked_dependencies();
    let graph = TrackedGraph::new(&tracked, &closures);
    let output = computation.output()?;

    info!(
        session = %plan.session,
        computation = %plan.computation,
        items = computation.items().len(),
        tracked = tracked.len(),
        "plan is valid"
    );

    let order = graph.request_order()?;
    let report = Report {
        plan,
        cfg,
        computation: &computation,
        output: &output.path,
        closures: &closures,
        tracked: &tracked,
        order: &order,
    };

    let mut out = String::new();
    report.render(&mut out).map_err(anyhow::Error::from)?;
    Ok(out)
}

/// Everything `inspect` prints, borrowed from the validated plan.
struct Report<'a> {
    plan: &'a Plan,
    cfg: &'a TrackerConfig,
    computation: &'a Computation,
    output: &'a GlobalPath,
    closures: &'a DependencyMap,
    tracked: &'a [GlobalPath],
    order: &'a [&'a GlobalPath],
}

impl Report<'_> {
    fn render(&self, out: &mut impl Write) -> fmt::Result {
        writeln!(out, "trackdag inspect")?;
        writeln!(out, "  session     = {}", self.plan.session)?;
        writeln!(out, "  computation = {}", self.plan.computation)?;
        writeln!(out, "  update_policy = {:?}", self.cfg.cache.update_policy)?;
        writeln!(out, "  event_buffer = {}", self.cfg.runtime.event_buffer)?;
        writeln!(out, "  exit_when_settled = {}", self.cfg.runtime.exit_when_settled)?;
        writeln!(out, "  output      = {}", self.output)?;
        writeln!(out)?;

        writeln!(out, "items ({}):", self.computation.items().len())?;
        for item in self.computation.items() {
            writeln!(out, "  - {} [{}]", item.path, item.locality)?;
            if !item.deps.is_empty() {
                writeln!(out, "      deps: {}", join(&item.deps))?;
            }
            if !item.logical_deps.is_empty() {
                writeln!(out, "      logical_deps: {}", join(&item.logical_deps))?;
            }
        }
        writeln!(out)?;

        writeln!(out, "tracked dependencies ({}):", self.tracked.len())?;
        for path in self.tracked {
            let deps = self.closures.get(path).map(Vec::as_slice).unwrap_or(&[]);
            writeln!(out, "  - {path} <- [{}]", join(deps))?;
        }
        writeln!(out)?;

        writeln!(out, "request order:")?;
        for (n, path) in self.order.iter().enumerate() {
            writeln!(out, "  {}. {path}", n + 1)?;
        }
        Ok(())
    }
}

fn join<T: std::fmt::Display>(paths: &[T]) -> String {
    paths
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
