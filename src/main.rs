use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};
use text_patcher::builtin::{self, NOT_FOUND_MESSAGE};
use text_patcher::{load_from_path, PatchOutcome, PatchStatus, TextPatch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "text-patcher")]
#[command(
    about = "Replace the About section of the portfolio page (or any single text block)",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// File to patch (defaults to app/page.tsx, or the file named in --patch)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// TOML patch definition to apply instead of the built-in About section
    #[arg(short, long)]
    patch: Option<PathBuf>,

    /// Dry run - show what would be changed without modifying the file
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,

    /// Report whether the patch is pending, applied or missing; never writes
    #[arg(long, conflicts_with_all = ["dry_run", "diff"])]
    check: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// What to patch and how to talk about it.
struct Job {
    patch: TextPatch,
    target: PathBuf,
    not_found: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let job = resolve_job(&cli)?;
    tracing::debug!(target_file = %job.target.display(), patch = %job.patch.name, "resolved job");

    if cli.check {
        cmd_check(&job)
    } else if cli.dry_run || cli.diff {
        cmd_apply_with_preview(&job, cli.dry_run)
    } else {
        cmd_apply(&job)
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (only possible in tests) is harmless.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn resolve_job(cli: &Cli) -> Result<Job> {
    let Some(definition_path) = &cli.patch else {
        return Ok(Job {
            patch: builtin::about_section(),
            target: cli
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from(builtin::ABOUT_TARGET)),
            not_found: NOT_FOUND_MESSAGE.to_string(),
        });
    };

    let definition = load_from_path(definition_path)?;
    let base = definition_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let patch = definition.to_text_patch();
    let not_found = format!("{}: pattern not found", patch.name);

    Ok(Job {
        target: cli.file.clone().unwrap_or_else(|| definition.target(base)),
        patch,
        not_found,
    })
}

fn cmd_apply(job: &Job) -> Result<()> {
    let outcome = job
        .patch
        .apply(&job.target)
        .with_context(|| format!("failed to patch {}", job.target.display()))?;

    report(job, &outcome);
    Ok(())
}

fn cmd_apply_with_preview(job: &Job, dry_run: bool) -> Result<()> {
    let plan = job
        .patch
        .plan(&job.target)
        .with_context(|| format!("failed to read {}", job.target.display()))?;

    let Some(patched) = &plan.patched else {
        println!("{}", job.not_found.yellow());
        return Ok(());
    };

    if dry_run {
        println!("{}", "[DRY RUN - nothing written]".cyan());
        println!(
            "Would replace {} in {}",
            job.patch.name,
            job.target.display()
        );
    } else {
        let outcome = job
            .patch
            .apply(&job.target)
            .with_context(|| format!("failed to patch {}", job.target.display()))?;
        report(job, &outcome);
    }

    display_diff(&job.target, &plan.original, patched);
    Ok(())
}

fn cmd_check(job: &Job) -> Result<()> {
    let status = job
        .patch
        .inspect(&job.target)
        .with_context(|| format!("failed to read {}", job.target.display()))?;

    let label = match status {
        PatchStatus::Pending => status.to_string().yellow(),
        PatchStatus::Applied => status.to_string().green(),
        PatchStatus::Missing => status.to_string().red(),
    };
    println!("{}: {} ({})", job.patch.name, label, job.target.display());

    if status == PatchStatus::Missing {
        std::process::exit(1);
    }
    Ok(())
}

fn report(job: &Job, outcome: &PatchOutcome) {
    match outcome {
        PatchOutcome::Patched { occurrences, .. } => {
            println!(
                "{}",
                format!("Successfully replaced {}", job.patch.name).green()
            );
            if *occurrences > 1 {
                println!(
                    "{}",
                    format!(
                        "  Note: {} occurrences found, only the first was replaced",
                        occurrences
                    )
                    .dimmed()
                );
            }
        }
        PatchOutcome::NotFound { .. } => {
            println!("{}", job.not_found.yellow());
        }
    }
}

/// Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => continue,
        };
        print!("{}", line);
        if change.missing_newline() {
            println!();
        }
    }
}
