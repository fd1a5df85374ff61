// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller Dispatcher
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One resolve → compute → emit pass.
//!
//! Every check that needs no computation (config file, parameter domain,
//! dataset extension, output directories) runs in `Resolving`, so a bad
//! invocation fails before any file is written. Outputs are renamed into
//! place atomically; two runs racing on the same path leave whichever
//! finished last.

use crate::cli::Plan;
use miller_core::geometry::{flux_surface, log_summary};
use miller_output::atomic::ensure_parent_dir;
use miller_output::export::{write_dataset, DatasetFormat, SurfaceDataset};
use miller_output::render::plot_surface;
use miller_types::config::resolve;
use miller_types::error::MillerResult;
use miller_types::params::ShapingParameters;
use miller_types::state::AngularGrid;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolving,
    Computing,
    Emitting,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Resolving => "RESOLVING",
            Stage::Computing => "COMPUTING",
            Stage::Emitting => "EMITTING",
            Stage::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub params: ShapingParameters,
    pub points: usize,
    /// In write order: image first, then dataset.
    pub written: Vec<PathBuf>,
}

struct Tracker {
    stage: Stage,
}

impl Tracker {
    fn new() -> Self {
        log::debug!("Stage {}", Stage::Resolving);
        Tracker {
            stage: Stage::Resolving,
        }
    }

    fn advance(&mut self, next: Stage) {
        log::debug!("Stage {} -> {}", self.stage, next);
        self.stage = next;
    }
}

/// Run `plan` starting from `defaults`.
pub fn run(plan: &Plan, defaults: &ShapingParameters) -> MillerResult<RunReport> {
    let mut tracker = Tracker::new();
    let result = run_stages(plan, defaults, &mut tracker);
    if let Err(e) = &result {
        log::debug!("Aborted during {}: {e}", tracker.stage);
    }
    result
}

fn run_stages(
    plan: &Plan,
    defaults: &ShapingParameters,
    tracker: &mut Tracker,
) -> MillerResult<RunReport> {
    let params = resolve(defaults, plan.config.as_deref(), &plan.overrides)?;
    let grid = AngularGrid::closed(plan.points)?;
    if let Some(path) = &plan.dataset {
        DatasetFormat::from_path(path)?;
    }
    for path in plan.image.iter().chain(plan.dataset.iter()) {
        ensure_parent_dir(path)?;
    }
    if plan.image.is_none() && plan.dataset.is_none() {
        log::warn!("Image suppressed and no dataset requested; nothing will be written");
    }

    tracker.advance(Stage::Computing);
    let coords = flux_surface(&params, &grid)?;
    log_summary(&params, &coords);

    tracker.advance(Stage::Emitting);
    let mut written = Vec::new();
    if let Some(path) = &plan.image {
        plot_surface(&coords.r, &coords.z, path)?;
        written.push(path.clone());
    }
    if let Some(path) = &plan.dataset {
        write_dataset(&SurfaceDataset::from_coordinates(&coords, &params), path)?;
        written.push(path.clone());
    }

    tracker.advance(Stage::Done);
    Ok(RunReport {
        params,
        points: grid.len(),
        written,
    })
}
