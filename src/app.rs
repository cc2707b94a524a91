//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! dispatches the requested mode and renders its report.

use anyhow::{Context, Result, bail};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use blueprint_copy::cli::{Args, Command, sanitize_path};
use blueprint_copy::config::{create_template_config, default_config_path, load_config, CONFIG_ENV};
use blueprint_copy::output as out;
use blueprint_copy::{
    OperationReport, ReplicateError, copy_matching_dirs, read_name_list, replicate_direct,
    replicate_from_index,
};

use crate::logging::init_tracing;

/// Exit status when the run finished but left names unresolved or copies failed.
pub const EXIT_INCOMPLETE: u8 = 1;
/// Exit status for failures outside the replication itself (config, names file, ...).
pub const EXIT_OTHER: u8 = 4;
/// Exit status after Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

/// Run the CLI application; returns the process exit status.
pub fn run(args: Args) -> Result<u8> {
    if args.print_config {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}", explicit.to_string_lossy()));
            return Ok(0);
        }
        let p = default_config_path()?;
        out::print_info(&format!("Default blueprint_copy config path:\n  {}", p.display()));
        if p.exists() {
            out::print_info("A config file exists at that location.");
        } else {
            out::print_info("No config file there yet; run with --init-config to create a template.");
        }
        return Ok(0);
    }

    if args.init_config {
        let p = default_config_path()?;
        if p.exists() {
            out::print_warn(&format!("Config already exists, leaving it untouched: {}", p.display()));
            return Ok(0);
        }
        create_template_config(&p)?;
        out::print_success(&format!("Template config written to: {}", p.display()));
        return Ok(0);
    }

    let Some(command) = args.command.clone() else {
        bail!("no command given; use `replicate` or `collect` (see --help)");
    };

    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)?;

    // Ctrl-C: flush the file appender and stop. The core has no cancellation
    // points, so partial destination writes stay behind.
    let guard_slot = Arc::new(Mutex::new(guard));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            out::print_warn("Interrupted; files already copied are left in place.");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
            std::process::exit(EXIT_INTERRUPTED);
        })
        .context("install Ctrl-C handler")?;
    }

    debug!(?args, ?cfg, "Starting blueprint_copy");
    let opts = cfg.copy_options();

    let result: Result<OperationReport> = match &command {
        Command::Replicate { blueprint, source, dest, direct } => {
            let (blueprint, source, dest) = (sanitize_path(blueprint), sanitize_path(source), sanitize_path(dest));
            info!(blueprint = %blueprint.display(), source = %source.display(), dest = %dest.display(), direct, "Replicating blueprint");
            let res = if *direct {
                replicate_direct(&blueprint, &source, &dest, &opts)
            } else {
                replicate_from_index(&blueprint, &source, &dest, &opts)
            };
            res.map_err(log_fatal)
        }
        Command::Collect { source, dest, names_file, names, no_header } => {
            let (source, dest) = (sanitize_path(source), sanitize_path(dest));
            let mut wanted = Vec::new();
            if let Some(f) = names_file {
                let f = sanitize_path(f);
                wanted = read_name_list(&f, !no_header)
                    .with_context(|| format!("load names from '{}'", f.display()))?;
            }
            wanted.extend(names.iter().cloned());
            info!(source = %source.display(), dest = %dest.display(), names = wanted.len(), "Collecting directories");
            copy_matching_dirs(&wanted, &source, &dest, &opts).map_err(log_fatal)
        }
    };

    let status = result.and_then(|report| {
        if args.json {
            let json = serde_json::to_string_pretty(&report).context("serialize report")?;
            println!("{json}");
        } else {
            out::print_report(&report);
        }
        Ok(if report.is_complete() { 0 } else { EXIT_INCOMPLETE })
    });

    // Flush file logs before exit.
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    status
}

fn log_fatal(e: ReplicateError) -> anyhow::Error {
    let code = e.code();
    match &e {
        ReplicateError::InvalidInput { role, path, reason } => {
            error!(code, kind = e.kind(), role, path = %path.display(), reason = %reason, "Operation refused")
        }
        ReplicateError::Traversal { role, path, source } => {
            error!(code, kind = e.kind(), role, path = %path.display(), error = %source, "Operation aborted")
        }
    }
    anyhow::Error::new(e)
}

/// Exit status for an error returned by [`run`].
pub fn exit_code_for(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<ReplicateError>()
        .and_then(|re| u8::try_from(re.code()).ok())
        .unwrap_or(EXIT_OTHER)
}
