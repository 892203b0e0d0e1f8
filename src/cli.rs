use clap::{ArgAction, Parser};
use phase_resolver::application::dto::OutputFormat;
use phase_resolver::dependency_resolution::domain::DependencyView;
use std::path::PathBuf;

/// Resolve the transitive dependencies of an artifact with nearest-wins conflict resolution
#[derive(Parser, Debug)]
#[command(name = "phase-resolver")]
#[command(version)]
#[command(about = "Resolve the transitive dependencies of an artifact with nearest-wins conflict resolution", long_about = None)]
pub struct Args {
    /// Root artifact: group:artifact[:type[:classifier]]:version
    pub root: String,

    /// Repository manifest (TOML) describing the available artifacts
    #[arg(short, long, value_name = "FILE")]
    pub repository: Option<PathBuf>,

    /// Output format: tree, json or markdown [default: tree]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Dependency view: runtime (compile + runtime) or user (everything) [default: runtime]
    #[arg(long)]
    pub view: Option<DependencyView>,

    /// Replace or add a direct dependency of the root.
    /// Can be specified multiple times: --override org.acme:lib:2.0
    #[arg(long = "override", value_name = "COORDS")]
    pub overrides: Vec<String>,

    /// Pin the version of a transitive artifact: -m org.acme:lib=2.0
    #[arg(short, long = "managed", value_name = "KEY=VERSION")]
    pub managed: Vec<String>,

    /// Path to a config file (defaults to phase-resolver.config.yml in the current directory)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Abort the resolution after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Only print errors on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["phase-resolver", "org.acme:app:1.0"]).unwrap();
        assert_eq!(args.root, "org.acme:app:1.0");
        assert!(args.repository.is_none());
        assert!(args.format.is_none());
        assert!(args.view.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_parse_full() {
        let args = Args::try_parse_from([
            "phase-resolver",
            "org.acme:app:1.0",
            "-r",
            "repo.toml",
            "-f",
            "md",
            "--view",
            "user",
            "--override",
            "org.acme:lib:2.0",
            "--override",
            "org.acme:extra:1.0",
            "-m",
            "org.acme:util=3.0",
            "--timeout",
            "30",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.repository, Some(PathBuf::from("repo.toml")));
        assert_eq!(args.format, Some(OutputFormat::Markdown));
        assert_eq!(args.view, Some(DependencyView::User));
        assert_eq!(args.overrides.len(), 2);
        assert_eq!(args.managed, vec!["org.acme:util=3.0"]);
        assert_eq!(args.timeout, Some(30));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = Args::try_parse_from(["phase-resolver", "org.acme:app:1.0", "-f", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_root_is_required() {
        assert!(Args::try_parse_from(["phase-resolver"]).is_err());
    }
}
