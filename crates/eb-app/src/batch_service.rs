//! Variant and batch execution service.

use std::fs;
use std::path::Path;
use std::time::Instant;

use eb_core::Domain;
use eb_engine::{EngineLauncher, EngineRun, Invocation, run_engine};
use eb_project::{BatchDef, PurgeModeDef, ResolvedVariant, WorkspaceModeDef};
use eb_results::{
    MissingArtifact, PurgeMode, RelocationReport, RunManifest, VariantWorkspace, WorkspaceMode,
    check_expected_artifacts, gather_from, purge_stale_results, relocate, save_manifest,
    script_digest,
};
use eb_script::{
    EditPlan, ModelEdit, Script, assemble_qa_report_script, assemble_simulation_script,
    describe_results, rewrite_climate_line,
};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::geometry::count_geometry_matches;
use crate::progress::{RunProgressEvent, RunStage};

/// Scratch operation name of the simulation call.
const SIMULATION_OPERATION: &str = "bps";
/// Scratch operation name of the QA report call.
const QA_OPERATION: &str = "qa";

/// Caller overrides for a run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides the batch file's `workspace_mode`.
    pub workspace_mode: Option<WorkspaceMode>,
    /// Treat a missing result library as a failure instead of a warning.
    pub require_results: bool,
}

/// What applying one model edit did.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Engine(EngineRun),
    ClimateRewritten { lines: usize },
}

#[derive(Debug, Clone)]
pub struct VariantOutcome {
    pub variant: String,
    pub domain: Domain,
    pub qa_report: Option<EngineRun>,
    pub edits: Vec<EditOutcome>,
    pub simulation: EngineRun,
    pub gathered: usize,
    pub relocation: RelocationReport,
    pub missing: Vec<MissingArtifact>,
    pub manifest: RunManifest,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub variants: Vec<VariantOutcome>,
}

impl BatchOutcome {
    /// Labels of the variants that ran with at least one result missing.
    pub fn incomplete(&self) -> Vec<&str> {
        self.variants
            .iter()
            .filter(|v| !v.missing.is_empty())
            .map(|v| v.variant.as_str())
            .collect()
    }
}

fn workspace_mode(def: WorkspaceModeDef) -> WorkspaceMode {
    match def {
        WorkspaceModeDef::Rebuild => WorkspaceMode::Rebuild,
        WorkspaceModeDef::Append => WorkspaceMode::Append,
    }
}

fn purge_mode(def: PurgeModeDef) -> PurgeMode {
    match def {
        PurgeModeDef::Full => PurgeMode::Full,
        PurgeModeDef::PreserveContents => PurgeMode::PreserveContents,
    }
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    variant: &str,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            variant,
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

fn resolve(batch: &BatchDef, label: &str) -> AppResult<ResolvedVariant> {
    let variant = batch
        .find_variant(label)
        .ok_or_else(|| AppError::VariantNotFound(label.to_string()))?;
    Ok(batch.resolve(variant)?)
}

/// The simulation script `run_variant` would feed the simulator.
pub fn preview_script(batch: &BatchDef, label: &str) -> AppResult<Script> {
    let resolved = resolve(batch, label)?;
    Ok(assemble_simulation_script(resolved.domain, &resolved.params))
}

/// Apply one model edit to the batch's model.
///
/// Engine edits run the project manager with a scratch file prefixed by the
/// configuration name; a climate edit rewrites `<config>.cfg` directly.
pub fn apply_edit<L: EngineLauncher + ?Sized>(
    launcher: &L,
    batch: &BatchDef,
    edit: &ModelEdit,
) -> AppResult<EditOutcome> {
    let work_dir = &batch.model.work_dir;
    let config = &batch.model.config;

    let matches = match edit.geometry_search_term() {
        Some(term) => count_geometry_matches(work_dir, term)?,
        None => 0,
    };
    info!(config = %config, "applying {}", edit.summary());

    match edit.plan(config, matches) {
        EditPlan::Engine { operation, script } => {
            let invocation = Invocation::new(
                &batch.engine.project_manager,
                config,
                work_dir,
                config,
                operation,
                &script,
            );
            Ok(EditOutcome::Engine(run_engine(launcher, &invocation)?))
        }
        EditPlan::RewriteClimate { file } => {
            let path = work_dir.join(format!("{}.cfg", config));
            let text = fs::read_to_string(&path).map_err(AppError::model_file("read", &path))?;
            let (rewritten, lines) = rewrite_climate_line(&text, &file);
            if lines == 0 {
                return Err(AppError::ClimateLineMissing { path });
            }
            fs::write(&path, rewritten).map_err(AppError::model_file("write", &path))?;
            Ok(EditOutcome::ClimateRewritten { lines })
        }
    }
}

/// Run one variant of a batch.
pub fn run_variant<L: EngineLauncher + ?Sized>(
    launcher: &L,
    batch: &BatchDef,
    label: &str,
    options: &RunOptions,
) -> AppResult<VariantOutcome> {
    run_variant_with_progress(launcher, batch, label, options, None)
}

/// Run one variant and stream progress events.
///
/// The variant is resolved before anything touches the working directory,
/// so an unsupported domain key fails with no process launched and no file
/// changed.
pub fn run_variant_with_progress<L: EngineLauncher + ?Sized>(
    launcher: &L,
    batch: &BatchDef,
    label: &str,
    options: &RunOptions,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<VariantOutcome> {
    execute_variant(launcher, batch, label, options, &mut progress_cb)
}

fn execute_variant<L: EngineLauncher + ?Sized>(
    launcher: &L,
    batch: &BatchDef,
    label: &str,
    options: &RunOptions,
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<VariantOutcome> {
    let started = Instant::now();
    let ResolvedVariant {
        domain,
        params,
        edits,
    } = resolve(batch, label)?;
    let work_dir: &Path = &batch.model.work_dir;
    let variant = params.variant.as_str();

    let period = format!("{} - {}", params.start, params.end);
    info!(
        variant,
        config = %params.config,
        domain = %domain,
        period = %period,
        "running variant"
    );

    let mode = options
        .workspace_mode
        .unwrap_or_else(|| workspace_mode(batch.workspace_mode));

    emit_progress(progress_cb, variant, RunStage::Purging, started, None);
    let workspace = VariantWorkspace::for_variant(work_dir, variant)?;
    workspace.prepare(mode)?;
    let purged = purge_stale_results(work_dir, variant, purge_mode(batch.purge_mode))?;
    if !purged.is_empty() {
        info!(variant, count = purged.len(), "purged stale results");
    }

    let qa_report = if batch.qa_report {
        emit_progress(
            progress_cb,
            variant,
            RunStage::WritingQaReport,
            started,
            Some(format!("{}.contents", variant)),
        );
        let script = assemble_qa_report_script(&params.config, variant);
        let invocation = Invocation::new(
            &batch.engine.project_manager,
            &params.config,
            work_dir,
            variant,
            QA_OPERATION,
            &script,
        );
        Some(run_engine(launcher, &invocation)?)
    } else {
        None
    };

    let mut edit_outcomes = Vec::with_capacity(edits.len());
    for (index, edit) in edits.iter().enumerate() {
        emit_progress(
            progress_cb,
            variant,
            RunStage::ApplyingEdit {
                index,
                total: edits.len(),
            },
            started,
            Some(edit.summary()),
        );
        edit_outcomes.push(apply_edit(launcher, batch, edit)?);
    }

    emit_progress(
        progress_cb,
        variant,
        RunStage::Simulating,
        started,
        Some(describe_results(domain, variant)),
    );
    info!("{}", describe_results(domain, variant));
    let script = assemble_simulation_script(domain, &params);
    let input = script.to_bytes();
    let invocation = Invocation::new(
        &batch.engine.simulator,
        &params.config,
        work_dir,
        variant,
        SIMULATION_OPERATION,
        &script,
    );
    let simulation = run_engine(launcher, &invocation)?;

    let gathered = match &batch.model.tmp_dir {
        Some(tmp_dir) => {
            emit_progress(progress_cb, variant, RunStage::Gathering, started, None);
            gather_from(tmp_dir, work_dir, variant)?
        }
        None => 0,
    };

    // Checked before relocation: in append mode the results directory still
    // holds libraries from earlier runs.
    emit_progress(
        progress_cb,
        variant,
        RunStage::CheckingResults,
        started,
        None,
    );
    let missing = check_expected_artifacts(work_dir, variant, domain);

    emit_progress(progress_cb, variant, RunStage::Relocating, started, None);
    let relocation = relocate(work_dir, variant, mode)?;
    let results_dir = &workspace.results_dir;

    emit_progress(
        progress_cb,
        variant,
        RunStage::WritingManifest,
        started,
        None,
    );
    let manifest = RunManifest {
        variant: variant.to_string(),
        config: params.config.clone(),
        domain,
        parameters: params.clone(),
        timestamp: RunManifest::now_timestamp(),
        script_sha256: script_digest(&input),
        cpu_time: simulation.cpu_time.clone(),
        moved: relocation.moved(),
        archived: relocation.archived(),
        deleted: relocation.deleted(),
        missing: missing.clone(),
    };
    save_manifest(results_dir, &manifest)?;

    if options.require_results && !missing.is_empty() {
        return Err(AppError::MissingResults {
            variant: variant.to_string(),
            files: missing.iter().map(|m| m.file_name.clone()).collect(),
        });
    }

    emit_progress(progress_cb, variant, RunStage::Completed, started, None);

    Ok(VariantOutcome {
        variant: variant.to_string(),
        domain,
        qa_report,
        edits: edit_outcomes,
        simulation,
        gathered,
        relocation,
        missing,
        manifest,
    })
}

/// Run every variant of a batch in file order.
pub fn run_batch<L: EngineLauncher + ?Sized>(
    launcher: &L,
    batch: &BatchDef,
    options: &RunOptions,
) -> AppResult<BatchOutcome> {
    run_batch_with_progress(launcher, batch, options, None)
}

/// Run every variant in file order, one after the other, and stream
/// progress events.
///
/// The whole batch is validated first. The first failing variant stops the
/// batch; variants already run keep their results.
pub fn run_batch_with_progress<L: EngineLauncher + ?Sized>(
    launcher: &L,
    batch: &BatchDef,
    options: &RunOptions,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<BatchOutcome> {
    eb_project::validate_batch(batch)?;
    info!(batch = %batch.name, variants = batch.variants.len(), "running batch");

    let mut outcome = BatchOutcome::default();
    for variant in &batch.variants {
        let result = execute_variant(launcher, batch, &variant.label, options, &mut progress_cb)?;
        outcome.variants.push(result);
    }

    let incomplete = outcome.incomplete();
    if !incomplete.is_empty() {
        warn!(variants = ?incomplete, "variants with missing results");
    }
    Ok(outcome)
}
