mod cli;
mod config;

use clap::Parser;
use cli::Args;
use config::Settings;
use owo_colors::OwoColorize;
use phase_resolver::adapters::outbound::console::StderrProgressReporter;
use phase_resolver::adapters::outbound::filesystem::FileSystemReader;
use phase_resolver::adapters::outbound::repository::{
    CachingArtifactRepository, InMemoryArtifactRepository,
};
use phase_resolver::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use phase_resolver::application::use_cases::ResolveDependenciesUseCase;
use phase_resolver::ports::outbound::{ProgressReporter, RepositoryManifestReader};
use phase_resolver::shared::error::ExitCode;
use phase_resolver::shared::Result;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // clap exits with 0 for --help/--version and 2 for usage errors
        Err(e) => e.exit(),
    };

    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args) {
        let exit_code = ExitCode::for_error(&e);
        eprintln!("\n{} An error occurred:\n", "❌".red().bold());
        eprintln!("{}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\n{} {}", "Caused by:".yellow(), err);
            source = err.source();
        }

        eprintln!();
        process::exit(exit_code.as_i32());
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level_filter = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(Path::new("."))?,
    };
    let settings = Settings::merge(&args, config)?;
    debug!("Effective settings: {:?}", settings);

    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let repository = load_repository(&settings.repository, &progress_reporter)?;
    let use_case =
        ResolveDependenciesUseCase::new(Arc::new(CachingArtifactRepository::new(repository)), progress_reporter)?;

    let response = use_case.execute(settings.to_request())?;

    if !args.quiet {
        eprintln!("{}", FormatterFactory::progress_message(settings.format));
    }
    let formatted_output = FormatterFactory::create(settings.format).format(&response)?;

    let presenter = PresenterFactory::create(PresenterType::from(settings.output.clone()));
    presenter.present(&formatted_output)?;

    Ok(())
}

fn load_repository(
    manifest: &Path,
    progress_reporter: &StderrProgressReporter,
) -> Result<InMemoryArtifactRepository> {
    progress_reporter.report(&format!(
        "📖 Loading repository manifest: {}",
        manifest.display()
    ));

    let entries = FileSystemReader::new().read_manifest(manifest)?;
    let total = entries.len();

    let mut repository = InMemoryArtifactRepository::new();
    for (index, (coords, descriptor)) in entries.into_iter().enumerate() {
        progress_reporter.report_progress(index + 1, total, Some(&coords.to_string()));
        repository.insert(coords, descriptor);
    }

    progress_reporter.report(&format!("   {} artifact(s) available", repository.len()));
    Ok(repository)
}
