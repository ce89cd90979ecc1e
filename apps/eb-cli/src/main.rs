use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use eb_app::{AppResult, RunOptions, RunProgressEvent, RunStage, batch_service};
use eb_core::Domain;
use eb_engine::SystemLauncher;
use eb_results::WorkspaceMode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eb-cli")]
#[command(about = "Batch driver for text-mode building simulations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a batch file
    Validate {
        /// Path to the batch YAML or JSON file
        batch_path: PathBuf,
    },
    /// Print the simulation script of one variant without running it
    Script {
        /// Path to the batch YAML or JSON file
        batch_path: PathBuf,
        /// Variant label
        variant: String,
    },
    /// Run a batch, or a single variant of it
    Run {
        /// Path to the batch YAML or JSON file
        batch_path: PathBuf,
        /// Run only this variant
        #[arg(long)]
        variant: Option<String>,
        /// Add to existing variant workspaces instead of rebuilding them
        #[arg(long)]
        append: bool,
        /// Fail when an expected result library is missing
        #[arg(long)]
        require_results: bool,
    },
    /// Sort the files of a model directory into a variant workspace
    Relocate {
        /// The model's cfg directory
        work_dir: PathBuf,
        /// Variant label
        variant: String,
        /// Add to existing variant workspaces instead of rebuilding them
        #[arg(long)]
        append: bool,
    },
    /// Move climate evaluation files `<clm>_*` into `<clm>_eval/`
    ArchiveClimate {
        /// The model's cfg directory
        work_dir: PathBuf,
        /// Climate file stem
        clm: String,
    },
    /// List the supported domain keys and their result libraries
    Domains,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { batch_path } => cmd_validate(&batch_path),
        Commands::Script {
            batch_path,
            variant,
        } => cmd_script(&batch_path, &variant),
        Commands::Run {
            batch_path,
            variant,
            append,
            require_results,
        } => cmd_run(&batch_path, variant.as_deref(), append, require_results),
        Commands::Relocate {
            work_dir,
            variant,
            append,
        } => cmd_relocate(&work_dir, &variant, append),
        Commands::ArchiveClimate { work_dir, clm } => cmd_archive_climate(&work_dir, &clm),
        Commands::Domains => {
            cmd_domains();
            Ok(())
        }
    }
}

fn workspace_mode(append: bool) -> Option<WorkspaceMode> {
    append.then_some(WorkspaceMode::Append)
}

fn cmd_validate(batch_path: &Path) -> AppResult<()> {
    println!("Validating batch: {}", batch_path.display());
    let batch = eb_project::load_batch(batch_path)?;
    println!("✓ Batch is valid");
    for variant in &batch.variants {
        let resolved = batch.resolve(variant)?;
        println!(
            "  {} - {} ({} - {}, {} edit(s))",
            variant.label,
            resolved.domain,
            resolved.params.start,
            resolved.params.end,
            resolved.edits.len()
        );
    }
    Ok(())
}

fn cmd_script(batch_path: &Path, variant: &str) -> AppResult<()> {
    let batch = eb_project::load_batch(batch_path)?;
    let script = batch_service::preview_script(&batch, variant)?;
    for line in script.lines() {
        println!("{:<28} {:?}", format!("{:?}", line.prompt), line.response);
    }
    Ok(())
}

fn render_progress(event: &RunProgressEvent) {
    let detail = match &event.stage {
        RunStage::ApplyingEdit { index, total } => format!(" {}/{}", index + 1, total),
        _ => String::new(),
    };
    match &event.message {
        Some(message) => println!(
            "[{:>7.1}s] {} {}{}: {}",
            event.elapsed_wall_s,
            event.variant,
            event.stage.label(),
            detail,
            message.replace('\n', "; ")
        ),
        None => println!(
            "[{:>7.1}s] {} {}{}",
            event.elapsed_wall_s,
            event.variant,
            event.stage.label(),
            detail
        ),
    }
}

fn cmd_run(
    batch_path: &Path,
    variant: Option<&str>,
    append: bool,
    require_results: bool,
) -> AppResult<()> {
    let batch = eb_project::load_batch(batch_path)?;
    debug!(batch = %batch.name, work_dir = %batch.model.work_dir.display(), "loaded batch");
    let options = RunOptions {
        workspace_mode: workspace_mode(append),
        require_results,
    };
    let launcher = SystemLauncher;

    let outcomes = match variant {
        Some(label) => vec![batch_service::run_variant_with_progress(
            &launcher,
            &batch,
            label,
            &options,
            Some(&mut |event| render_progress(&event)),
        )?],
        None => {
            batch_service::run_batch_with_progress(
                &launcher,
                &batch,
                &options,
                Some(&mut |event| render_progress(&event)),
            )?
            .variants
        }
    };

    for outcome in &outcomes {
        println!("✓ {} ({})", outcome.variant, outcome.domain);
        if let Some(cpu_time) = &outcome.simulation.cpu_time {
            println!("  {}", cpu_time.trim());
        }
        println!(
            "  moved {}, archived {}, deleted {}",
            outcome.relocation.moved(),
            outcome.relocation.archived(),
            outcome.relocation.deleted()
        );
        for missing in &outcome.missing {
            println!("  missing {}: {}", missing.kind.description(), missing.file_name);
        }
    }
    Ok(())
}

fn cmd_relocate(work_dir: &Path, variant: &str, append: bool) -> AppResult<()> {
    let mode = workspace_mode(append).unwrap_or_default();
    let report = eb_results::relocate(work_dir, variant, mode)?;
    if report.is_noop() {
        println!("Nothing to relocate for {}", variant);
    } else {
        println!(
            "✓ {}: moved {}, archived {}, deleted {}",
            variant,
            report.moved(),
            report.archived(),
            report.deleted()
        );
    }
    if !report.untouched.is_empty() {
        println!("  left in place: {}", report.untouched.join(", "));
    }
    Ok(())
}

fn cmd_archive_climate(work_dir: &Path, clm: &str) -> AppResult<()> {
    let moved = eb_results::archive_climate_files(work_dir, clm)?;
    println!("✓ Archived {} file(s) into {}_eval", moved, clm);
    Ok(())
}

fn cmd_domains() {
    for domain in Domain::ALL {
        println!("{}", domain);
        println!("{}", eb_script::describe_results(domain, "<variant>"));
    }
}
