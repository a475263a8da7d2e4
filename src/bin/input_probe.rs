use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use oil_input::app::ProbeApp;
use oil_input::build_info;
use oil_input::config::InputSettings;
use oil_input::diagnostics::{self, RuleStatus};
use oil_input::input::{InputLoader, InputManager, TomlBindingsFile};

/// Lints a bindings file and drives it from live keyboard and mouse input
#[derive(Parser, Debug)]
#[command(name = "input_probe", version)]
struct Args {
    /// Bindings file (defaults to input.bindings_path from the settings)
    #[arg(long)]
    bindings: Option<PathBuf>,

    /// Settings profile (defaults to $OIL_INPUT_PROFILE, then "release")
    #[arg(long)]
    profile: Option<String>,

    /// Lint the bindings, print the report and exit with its status
    #[arg(long)]
    lint_only: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let loaded = match &args.profile {
        Some(profile) => InputSettings::load(profile),
        None => InputSettings::load_from_env(),
    };
    let (settings, load_error) = match loaded {
        Ok(settings) => (settings, None),
        Err(e) => {
            let profile = args.profile.as_deref().unwrap_or("release");
            (InputSettings::fallback(profile), Some(e))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter)),
        )
        .init();

    info!(
        version = %build_info::version_string(),
        built = build_info::BUILD_TIMESTAMP,
        "input_probe"
    );
    debug!("{}", build_info::detailed_info());
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load settings, using defaults");
    }

    let path = args
        .bindings
        .unwrap_or_else(|| settings.input.bindings_path.clone());
    let mut file = TomlBindingsFile::new(&path);
    let mut bindings = file
        .load()
        .with_context(|| format!("Failed to load bindings from {}", path.display()))?;

    let report = diagnostics::lint_bindings(&bindings);
    diagnostics::print_report(&report);

    if args.lint_only {
        std::process::exit(report.exit_code());
    }
    if !report.is_clean() {
        bail!(
            "{} lint rules failed for {}",
            report.count(RuleStatus::Fail),
            path.display()
        );
    }

    let mut input = InputManager::new(&settings.input);
    input
        .load(&mut bindings)
        .context("Failed to apply bindings")?;

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ProbeApp::new(settings, input, file);
    event_loop
        .run_app(&mut app)
        .context("Event loop terminated with an error")?;

    Ok(())
}
