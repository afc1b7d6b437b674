//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's
//! derive macros. It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use watchbench_core::types::SortDir;

/// Watchbench -- benchmark harness for the OpenStack Watcher service.
///
/// Use `watchbench <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "watchbench", version, about, long_about = None)]
pub struct Cli {
    /// Path to the watchbench.toml configuration file.
    #[arg(short, long, default_value = "watchbench.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a benchmark scenario against the Watcher service.
    Run(RunArgs),

    /// List registered scenarios and their preconditions.
    List(ListArgs),

    /// Query audit templates from the Watcher service.
    Templates(TemplatesArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- run ----

/// Run a benchmark scenario.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario name (e.g. `Watcher.create_audit_and_delete`).
    pub scenario: String,

    /// Override the number of iterations.
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Override worker concurrency.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Override the goal name used for templates.
    #[arg(long)]
    pub goal: Option<String>,

    /// Override the strategy name used for templates.
    #[arg(long)]
    pub strategy: Option<String>,
}

// ---- list ----

/// List registered scenarios.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show preconditions for each scenario.
    #[arg(short, long)]
    pub verbose: bool,
}

// ---- templates ----

/// Query audit templates.
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Filter by template name.
    #[arg(long)]
    pub name: Option<String>,

    /// Filter by goal name.
    #[arg(long)]
    pub goal: Option<String>,

    /// Filter by strategy name.
    #[arg(long)]
    pub strategy: Option<String>,

    /// Maximum number of templates (0 = fetch everything).
    #[arg(long)]
    pub limit: Option<u32>,

    /// Sort field (e.g. name, uuid).
    #[arg(long)]
    pub sort_key: Option<String>,

    /// Sort direction.
    #[arg(long)]
    pub sort_dir: Option<SortDirArg>,

    /// Include detail fields in the listing.
    #[arg(long)]
    pub detail: bool,
}

/// Sort direction argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortDirArg {
    Asc,
    Desc,
}

impl From<SortDirArg> for SortDir {
    fn from(arg: SortDirArg) -> Self {
        match arg {
            SortDirArg::Asc => SortDir::Asc,
            SortDirArg::Desc => SortDir::Desc,
        }
    }
}

// ---- config ----

/// Manage watchbench configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, service, audit, runner, context).
        #[arg(long)]
        section: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_run_basic() {
        let cli = Cli::try_parse_from(["watchbench", "run", "Watcher.list_audit_templates"])
            .expect("should parse 'run' subcommand");
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.scenario, "Watcher.list_audit_templates");
                assert!(args.iterations.is_none());
                assert!(args.concurrency.is_none());
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "watchbench",
            "run",
            "Watcher.create_audit_and_delete",
            "-i",
            "50",
            "--concurrency",
            "4",
            "--goal",
            "workload_balancing",
        ])
        .expect("should parse run overrides");
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.iterations, Some(50));
                assert_eq!(args.concurrency, Some(4));
                assert_eq!(args.goal, Some("workload_balancing".to_owned()));
                assert!(args.strategy.is_none());
            }
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_requires_scenario() {
        let args = Cli::try_parse_from(["watchbench", "run"]);
        assert!(args.is_err(), "run without scenario should fail");
    }

    #[test]
    fn test_cli_parse_list_verbose() {
        let cli = Cli::try_parse_from(["watchbench", "list", "-v"])
            .expect("should parse 'list -v' subcommand");
        match cli.command {
            Commands::List(args) => assert!(args.verbose),
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn test_cli_parse_templates_filters() {
        let cli = Cli::try_parse_from([
            "watchbench",
            "templates",
            "--name",
            "bench",
            "--limit",
            "0",
            "--sort-dir",
            "desc",
            "--detail",
        ])
        .expect("should parse templates filters");
        match cli.command {
            Commands::Templates(args) => {
                assert_eq!(args.name, Some("bench".to_owned()));
                assert_eq!(args.limit, Some(0));
                assert!(matches!(args.sort_dir, Some(SortDirArg::Desc)));
                assert!(args.detail);
            }
            _ => panic!("expected Templates command"),
        }
    }

    #[test]
    fn test_cli_parse_config_validate() {
        let cli = Cli::try_parse_from(["watchbench", "config", "validate"])
            .expect("should parse 'config validate'");
        match cli.command {
            Commands::Config(args) => assert!(matches!(args.action, ConfigAction::Validate)),
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show_section() {
        let cli = Cli::try_parse_from(["watchbench", "config", "show", "--section", "service"])
            .expect("should parse config show with section");
        match cli.command {
            Commands::Config(args) => match args.action {
                ConfigAction::Show { section } => {
                    assert_eq!(section, Some("service".to_owned()));
                }
                ConfigAction::Validate => panic!("expected Show action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_custom_config_path() {
        let cli = Cli::try_parse_from(["watchbench", "-c", "/custom/watchbench.toml", "list"])
            .expect("should parse with custom config path");
        assert_eq!(cli.config, PathBuf::from("/custom/watchbench.toml"));
    }

    #[test]
    fn test_cli_parse_output_format_json() {
        let cli = Cli::try_parse_from(["watchbench", "--output", "json", "list"])
            .expect("should parse with json output");
        assert!(matches!(cli.output, OutputFormat::Json));
    }

    #[test]
    fn test_cli_parse_log_level() {
        let cli = Cli::try_parse_from(["watchbench", "--log-level", "debug", "list"])
            .expect("should parse with custom log level");
        assert_eq!(cli.log_level, Some("debug".to_owned()));
    }

    #[test]
    fn test_cli_parse_missing_command_fails() {
        let args = Cli::try_parse_from(["watchbench"]);
        assert!(args.is_err(), "should fail when no command provided");
    }

    #[test]
    fn test_cli_verify_command_structure() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "watchbench");

        let subcommands: Vec<_> = cmd.get_subcommands().map(|s| s.get_name()).collect();
        assert!(subcommands.contains(&"run"), "should have 'run'");
        assert!(subcommands.contains(&"list"), "should have 'list'");
        assert!(subcommands.contains(&"templates"), "should have 'templates'");
        assert!(subcommands.contains(&"config"), "should have 'config'");
    }
}
