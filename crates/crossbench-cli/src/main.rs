use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossbench_adapters::CriterionTree;
use crossbench_app::{
    CompareUseCase, ExportFormat, ExportUseCase, Settings, SettingsOverrides, render_markdown,
    render_text, resolve_settings,
};
use crossbench_types::{ConfigFile, ToolInfo};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "crossbench.toml";

#[derive(Debug, Parser)]
#[command(
    name = "crossbench",
    version,
    about = "Pit the best of several candidate implementations against a baseline, from Criterion results"
)]
struct Cli {
    /// Config file (TOML). Defaults to ./crossbench.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print or write the comparison summary.
    Report {
        #[command(flatten)]
        scan: ScanArgs,

        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Output path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },

    /// Write the per-test-case comparison rows as CSV or JSONL.
    Export {
        #[command(flatten)]
        scan: ScanArgs,

        #[arg(long, value_enum)]
        format: ExportArg,

        #[arg(long)]
        out: PathBuf,
    },

    /// Emit every extracted result record as JSON lines.
    Records {
        #[command(flatten)]
        scan: ScanArgs,

        /// Output path (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Criterion output root [default: target/criterion]
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Case-insensitive substring marking baseline implementations [default: cpp]
    #[arg(long)]
    baseline_marker: Option<String>,

    /// Snapshot directory read in each result location [default: base]
    #[arg(long)]
    snapshot: Option<String>,

    /// Deepest directory level searched for results [default: 3]
    #[arg(long)]
    max_depth: Option<usize>,

    /// Only compare this benchmark group
    #[arg(long)]
    group: Option<String>,

    /// Entries in each ranking list [default: 3]
    #[arg(long)]
    top: Option<usize>,

    /// Display name for the baseline side [default: baseline]
    #[arg(long)]
    baseline_label: Option<String>,

    /// Display name for the candidate side [default: candidate]
    #[arg(long)]
    candidate_label: Option<String>,
}

impl From<ScanArgs> for SettingsOverrides {
    fn from(args: ScanArgs) -> Self {
        SettingsOverrides {
            results_dir: args.results_dir,
            baseline_marker: args.baseline_marker,
            snapshot: args.snapshot,
            max_depth: args.max_depth,
            group: args.group,
            top: args.top,
            baseline_label: args.baseline_label,
            candidate_label: args.candidate_label,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportArg {
    Csv,
    Jsonl,
}

impl From<ExportArg> for ExportFormat {
    fn from(arg: ExportArg) -> Self {
        match arg {
            ExportArg::Csv => ExportFormat::Csv,
            ExportArg::Jsonl => ExportFormat::Jsonl,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    if let Err(err) = real_main() {
        eprintln!("{err:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.cmd {
        Command::Report {
            scan,
            format,
            out,
            pretty,
        } => {
            let settings = settings_for(&config, scan)?;
            let report = usecase(&settings).execute(&settings.compare_request())?;

            let text = match format {
                ReportFormat::Text => render_text(&report, &settings.labels),
                ReportFormat::Markdown => render_markdown(&report, &settings.labels),
                ReportFormat::Json => {
                    let mut json = if pretty {
                        serde_json::to_string_pretty(&report)?
                    } else {
                        serde_json::to_string(&report)?
                    };
                    json.push('\n');
                    json
                }
            };

            emit(out.as_deref(), &text)
        }

        Command::Export { scan, format, out } => {
            let settings = settings_for(&config, scan)?;
            let report = usecase(&settings).execute(&settings.compare_request())?;
            let data = ExportUseCase::export(&report.rows, format.into())?;

            write_file(&out, data.as_bytes())?;
            info!(rows = report.rows.len(), out = %out.display(), "exported comparison rows");
            Ok(())
        }

        Command::Records { scan, out } => {
            let settings = settings_for(&config, scan)?;
            let outcome = usecase(&settings).records();
            let data = ExportUseCase::export_records(&outcome.records)?;

            emit(out.as_deref(), &data)
        }
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "crossbench".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn settings_for(config: &ConfigFile, scan: ScanArgs) -> anyhow::Result<Settings> {
    let settings = resolve_settings(config, scan.into()).context("invalid settings")?;
    Ok(settings)
}

fn usecase(settings: &Settings) -> CompareUseCase<CriterionTree> {
    let tree = CriterionTree::new(&settings.results_dir, settings.scan_options());
    CompareUseCase::new(tree, tool_info())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let path = match path {
        Some(p) => p,
        None if Path::new(DEFAULT_CONFIG).is_file() => Path::new(DEFAULT_CONFIG),
        None => return Ok(ConfigFile::default()),
    };

    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config =
        toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
    Ok(config)
}

fn emit(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => write_file(path, text.as_bytes()),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }

    atomic_write(path, bytes)
}

fn atomic_write(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    use std::io::Write;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = parent.join(format!(".{}.tmp", uuid::Uuid::new_v4()));

    {
        let mut f =
            fs::File::create(&tmp).with_context(|| format!("create temp {}", tmp.display()))?;
        f.write_all(bytes)
            .with_context(|| format!("write temp {}", tmp.display()))?;
        f.sync_all().ok();
    }

    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
