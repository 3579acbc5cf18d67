use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::ReportProfile;
use crate::engine::{CompareRequest, Engine, EngineOptions, GenerateRequest};
use crate::ui::UiConfig;

mod interactive;

#[derive(Debug, Parser)]
#[command(
    name = "ddrs",
    version,
    about = "Compare Daily Domicile Report extracts and generate synthetic test reports"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
    #[arg(long, global = true)]
    pub verbose: bool,
    #[arg(long, global = true)]
    pub quiet: bool,
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Compare(CompareArgs),
    Generate(GenerateArgs),
    Config(ConfigArgs),
    Completion(CompletionArgs),
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[arg(long)]
    pub list: Option<PathBuf>,
    #[arg(long)]
    pub log: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[arg(long)]
    pub rows: Option<u64>,
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(long)]
    pub show: bool,
}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    pub shell: String,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let stdin_is_tty = io::stdin().is_terminal();
    let stdout_is_tty = io::stdout().is_terminal();
    let stderr_is_tty = io::stderr().is_terminal();

    let home_dir = crate::platform::effective_home_dir()?;

    let env_config_path = std::env::var_os("DDRS_CONFIG").map(std::path::PathBuf::from);
    let cfg = crate::config::load(
        cli.config.as_deref().or(env_config_path.as_deref()),
        &home_dir,
    )
    .map_err(crate::exit::invalid_args_err)?;

    let color = stdout_is_tty && cfg.ui.color && !cli.no_color;

    let ui_cfg = UiConfig {
        color,
        stdin_is_tty,
        stdout_is_tty,
        stderr_is_tty,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    if ui_cfg.verbose && !ui_cfg.quiet {
        eprintln!("working directory: {}", crate::platform::working_dir());
    }

    let engine = Engine::new(
        ReportProfile::for_cycle(cfg.report.cycle),
        EngineOptions {
            show_progress: stderr_is_tty && !cli.quiet && !cli.json,
        },
    );

    match cli.command {
        Commands::Compare(args) => {
            let list_path = args
                .list
                .unwrap_or_else(|| PathBuf::from(&cfg.compare.list));
            let log_path = args.log.unwrap_or_else(|| PathBuf::from(&cfg.compare.log));
            let report = engine.compare_pairs(&CompareRequest {
                list_path,
                log_path,
            })?;
            if cli.json {
                write_json(&report)?;
            } else {
                crate::ui::print_compare_summary(&report, &ui_cfg);
            }
        }
        Commands::Generate(args) => {
            let rows = match args.rows {
                Some(rows) => rows,
                None => interactive::prompt_row_count().map_err(crate::exit::invalid_args_err)?,
            };
            let dest = match args.out {
                Some(out) => out,
                None => PathBuf::from(
                    interactive::prompt_file_name().map_err(crate::exit::invalid_args_err)?,
                ),
            };
            let report = engine
                .generate(&GenerateRequest {
                    rows,
                    dest,
                    seed: args.seed,
                })
                .map_err(crate::exit::generate_failed_err)?;
            if cli.json {
                write_json(&report)?;
            } else {
                crate::ui::print_generate_summary(&report, &ui_cfg);
            }
        }
        Commands::Completion(args) => {
            let shell = parse_shell(&args.shell)?;
            let mut cmd = Cli::command();
            let mut out = std::io::stdout().lock();
            clap_complete::generate(shell, &mut cmd, "ddrs", &mut out);
        }
        Commands::Config(args) => {
            if args.show {
                if cli.json {
                    let stdout = std::io::stdout();
                    serde_json::to_writer_pretty(stdout.lock(), &cfg)?;
                } else {
                    println!("{}", toml::to_string_pretty(&cfg)?);
                }
            } else if !ui_cfg.quiet {
                eprintln!("config: use `ddrs config --show`");
            }
        }
    }

    Ok(())
}

fn write_json<T: serde::Serialize>(value: &T) -> Result<()> {
    use std::io::Write;

    let buf = serde_json::to_vec_pretty(value)?;

    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(&buf) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => return Ok(()),
        Err(err) => return Err(err.into()),
    }
    match stdout.write_all(b"\n") {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn parse_shell(s: &str) -> Result<clap_complete::Shell> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        "fish" => Ok(clap_complete::Shell::Fish),
        other => Err(crate::exit::invalid_args(format!(
            "unsupported shell: {other} (use bash|zsh|fish)"
        ))),
    }
}
