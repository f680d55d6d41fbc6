#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sortviz_core::algorithms::{self, Algorithm};
use sortviz_core::input::{ArrayLimits, parse_array};
use sortviz_runtime::{
    Control, ConfigError, IntervalTimer, ManualTimer, MemorySessionStore, ReadModel, ReplayConfig,
    ReplayController, RestartPolicy, SessionKey, Status, TimerSource,
};

use crate::error::{CliError, Result};
use crate::render;

#[derive(Debug, Parser)]
#[command(
    name = "sortviz",
    about = "Step-by-step sorting algorithm visualizer",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay one sorting session to completion.
    Run(RunArgs),

    /// Print the full step trace for an array as JSONL.
    Trace(TraceArgs),

    /// Print the supported algorithms.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Jsonl,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Algorithm to visualize (insertion, selection, quick, merge).
    #[arg(long, short)]
    pub algorithm: Algorithm,

    /// Comma or space separated values to sort.
    #[arg(long, conflicts_with = "random")]
    pub array: Option<String>,

    /// Sort a freshly drawn random array (the default without --array).
    #[arg(long)]
    pub random: bool,

    /// TOML or JSON replay config.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Delay between steps, overriding the config.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    #[arg(long)]
    pub restart_policy: Option<RestartPolicy>,

    /// Seed for random arrays, overriding the config.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Apply every step immediately instead of waiting on the timer.
    #[arg(long)]
    pub instant: bool,

    /// Write the diagnostic log as JSONL to this path when done.
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,

    /// Browsing session name the replay is stored under.
    #[arg(long, default_value = "cli")]
    pub session: String,
}

#[derive(Debug, Args)]
pub struct TraceArgs {
    #[arg(long, short)]
    pub algorithm: Algorithm,

    /// Comma or space separated values to sort.
    #[arg(long)]
    pub array: String,

    /// Drop per-step narration text.
    #[arg(long)]
    pub no_narration: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli, &mut std::io::stdout().lock())
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Run(args) => run_replay(args, out),
        Commands::Trace(args) => run_trace(args, out),
        Commands::List => {
            for row in render::algorithm_list() {
                writeln!(out, "{row}")?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// run
// ============================================================================

fn load_config(args: &RunArgs) -> Result<ReplayConfig> {
    let mut config = match &args.config {
        Some(path) => ReplayConfig::from_file(path)?,
        None => ReplayConfig::default(),
    };
    if let Some(ms) = args.interval_ms {
        config.tick_interval_ms = ms;
    }
    if let Some(policy) = args.restart_policy {
        config.restart_policy = policy;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors).into());
    }
    Ok(config)
}

fn run_replay(args: RunArgs, out: &mut dyn Write) -> Result<()> {
    let config = load_config(&args)?;
    let values = args.array.as_deref().map(parse_array).transpose()?;
    let key = SessionKey::new(args.session.clone(), args.algorithm);
    tracing::info!(
        algorithm = %args.algorithm,
        instant = args.instant,
        interval_ms = config.tick_interval_ms,
        "starting replay"
    );

    if args.instant {
        let mut controller = ReplayController::new(MemorySessionStore::new(), ManualTimer::new(), config);
        drive(&mut controller, &key, values, &args, out, Duration::ZERO, |c| {
            c.timer_mut().fire();
            c.poll()
        })
    } else {
        let timeout = config.tick_interval() * 4 + Duration::from_secs(1);
        let mut controller =
            ReplayController::new(MemorySessionStore::new(), IntervalTimer::new(), config);
        drive(&mut controller, &key, values, &args, out, timeout, |c| {
            c.wait_tick(timeout)
        })
    }
}

fn drive<T: TimerSource>(
    controller: &mut ReplayController<MemorySessionStore, T>,
    key: &SessionKey,
    values: Option<Vec<i32>>,
    args: &RunArgs,
    out: &mut dyn Write,
    timeout: Duration,
    mut next: impl FnMut(&mut ReplayController<MemorySessionStore, T>) -> Option<ReadModel>,
) -> Result<()> {
    if args.format == OutputFormat::Text {
        writeln!(out, "{}", render::header(args.algorithm))?;
    }

    let idle = match values {
        Some(values) => controller.submit(key, values)?,
        None => controller.view(key),
    };
    emit(out, args.format, &idle)?;

    let mut model = controller.dispatch(key, Control::Start);
    emit(out, args.format, &model)?;
    while model.status == Status::Running {
        let Some(next_model) = next(controller) else {
            let waited_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::error!(key = %key, cursor = model.cursor, waited_ms, "no tick within timeout");
            return Err(CliError::TimerStalled { waited_ms });
        };
        model = next_model;
        emit(out, args.format, &model)?;
    }

    if let Some(path) = &args.diagnostics {
        std::fs::write(path, controller.diagnostics().to_jsonl()?)?;
        tracing::info!(path = %path.display(), entries = controller.diagnostics().len(), "diagnostics written");
    }
    Ok(())
}

fn emit(out: &mut dyn Write, format: OutputFormat, model: &ReadModel) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", render::render_text(model))?,
        OutputFormat::Jsonl => writeln!(out, "{}", model.to_jsonl()?)?,
    }
    Ok(())
}

// ============================================================================
// trace
// ============================================================================

fn run_trace(args: TraceArgs, out: &mut dyn Write) -> Result<()> {
    let values = parse_array(&args.array)?;
    ArrayLimits::default().validate(&values)?;
    let mut trace = algorithms::generate(args.algorithm, &values);
    if args.no_narration {
        trace = trace.strip_narration();
    }
    for line in render::trace_jsonl(&trace)? {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args).expect("valid arguments");
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn parses_algorithm_aliases() {
        let cli = Cli::try_parse_from(["sortviz", "trace", "-a", "Quick-Sort", "--array", "1"]).unwrap();
        match cli.command {
            Commands::Trace(args) => assert_eq!(args.algorithm, Algorithm::Quick),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn array_conflicts_with_random() {
        assert!(
            Cli::try_parse_from([
                "sortviz", "run", "-a", "quick", "--array", "1,2", "--random"
            ])
            .is_err()
        );
    }

    #[test]
    fn list_prints_all_algorithms() {
        let out = run_args(&["sortviz", "list"]).unwrap();
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("Merge Sort Visualization"));
    }

    #[test]
    fn instant_text_run_ends_sorted() {
        let out = run_args(&[
            "sortviz", "run", "-a", "insertion", "--array", "40,20,10,30,25", "--instant",
        ])
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Insertion Sort Visualization");
        // Header (2), idle, start, one line per step, then the finishing tick.
        assert_eq!(lines.len(), 2 + 2 + 26 + 1);
        assert!(lines[lines.len() - 2].ends_with("Placing 25 in its correct position"));
        let last = lines.last().unwrap();
        assert!(last.contains("finished"));
        assert!(last.contains("10* 20* 25* 30* 40*"));
        assert!(last.ends_with("Sorting completed!"));
    }

    #[test]
    fn instant_jsonl_run_emits_read_models() {
        let out = run_args(&[
            "sortviz", "run", "-a", "selection", "--random", "--seed", "9", "--instant", "--format",
            "jsonl",
        ])
        .unwrap();
        let models: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(models[0]["status"], "idle");
        assert_eq!(models[1]["status"], "running");
        assert_eq!(models.last().unwrap()["status"], "finished");
        assert_eq!(models[1]["snapshot"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn rejects_out_of_range_manual_entry() {
        let err = run_args(&["sortviz", "run", "-a", "quick", "--array", "1,2,3", "--instant"])
            .unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn rejects_zero_interval() {
        let err = run_args(&[
            "sortviz", "run", "-a", "quick", "--interval-ms", "0", "--instant",
        ])
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn writes_diagnostics_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diag.jsonl");
        let path_arg = path.to_str().unwrap();
        run_args(&[
            "sortviz", "run", "-a", "merge", "--array", "15 14 13 12 11", "--instant",
            "--diagnostics", path_arg,
        ])
        .unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let first: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(first["event"], "transition");
        assert_eq!(first["control"], "submit");
    }

    #[test]
    fn interval_run_uses_timer() {
        let out = run_args(&[
            "sortviz", "run", "-a", "quick", "--array", "20,10,30,50,40", "--interval-ms", "1",
            "--format", "jsonl",
        ])
        .unwrap();
        let last: serde_json::Value = serde_json::from_str(out.lines().last().unwrap()).unwrap();
        assert_eq!(last["status"], "finished");
    }

    #[test]
    fn trace_command_prints_steps() {
        let out = run_args(&["sortviz", "trace", "-a", "quick", "--array", "52 41 30 22 11", "--no-narration"])
            .unwrap();
        assert!(out.lines().count() > 0);
        for line in out.lines() {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(v.get("narration").is_none() || v["narration"].is_null());
        }
    }

    #[test]
    fn trace_rejects_arrays_outside_limits() {
        let long = "10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25";
        let err = run_args(&["sortviz", "trace", "-a", "merge", "--array", long]).unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
        assert_eq!(err.exit_code(), 2);

        let err = run_args(&["sortviz", "trace", "-a", "merge", "--array", "10 20 30 40 100"])
            .unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
    }

    #[test]
    fn stalled_timer_ends_run_with_error() {
        let cli = Cli::try_parse_from(["sortviz", "run", "-a", "quick", "--random", "--seed", "3"])
            .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        let key = SessionKey::new("cli", Algorithm::Quick);
        let mut controller = ReplayController::new(
            MemorySessionStore::new(),
            ManualTimer::new(),
            ReplayConfig::default(),
        );
        let mut out = Vec::new();
        let stall = Duration::from_millis(40);
        let err = drive(&mut controller, &key, None, &args, &mut out, stall, |_| None).unwrap_err();
        assert!(matches!(err, CliError::TimerStalled { waited_ms: 40 }));
        assert_eq!(err.exit_code(), 1);
        // Header, idle and start were written before the stall.
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 4);
    }
}
