use anyhow::Context;
use clap::{Parser, Subcommand};
use schemars::schema_for;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Repo automation for crossbench")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// (Re)generate JSON Schemas for records, reports and config.
    Schema {
        /// Output directory
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,

        /// Fail instead of writing when a schema on disk is stale.
        #[arg(long, default_value_t = false)]
        check: bool,
    },

    /// Run the usual repo checks (fmt, clippy, test) and regenerate schemas.
    Ci,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Schema { out_dir, check } => cmd_schema(&out_dir, check),
        Command::Ci => cmd_ci(),
    }
}

fn cmd_ci() -> anyhow::Result<()> {
    run("cargo", ["fmt", "--all", "--", "--check"])?;
    run(
        "cargo",
        ["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"],
    )?;
    run("cargo", ["test", "--all"])?;
    run("cargo", ["run", "-p", "xtask", "--", "schema"])?;
    Ok(())
}

fn run<const N: usize>(bin: &str, args: [&str; N]) -> anyhow::Result<()> {
    let status = std::process::Command::new(bin)
        .args(args)
        .status()
        .with_context(|| format!("running {bin}"))?;
    if !status.success() {
        anyhow::bail!("{bin} failed: {status}");
    }
    Ok(())
}

fn cmd_schema(out_dir: &Path, check: bool) -> anyhow::Result<()> {
    let schemas = [
        (
            "crossbench.record.v1.schema.json",
            serde_json::to_vec_pretty(&schema_for!(crossbench_types::ResultRecord))?,
        ),
        (
            "crossbench.comparison.v1.schema.json",
            serde_json::to_vec_pretty(&schema_for!(crossbench_types::ComparisonReport))?,
        ),
        (
            "crossbench.config.v1.schema.json",
            serde_json::to_vec_pretty(&schema_for!(crossbench_types::ConfigFile))?,
        ),
    ];

    if check && !out_dir.is_dir() {
        anyhow::bail!(
            "no schemas in {} (generate them with `cargo run -p xtask -- schema`)",
            out_dir.display()
        );
    }
    if !check {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("create dir {}", out_dir.display()))?;
    }

    let mut missing = Vec::new();
    let mut stale = Vec::new();
    for (name, json) in schemas {
        let path = out_dir.join(name);
        if !check {
            fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
            continue;
        }
        match fs::read(&path) {
            Ok(on_disk) if on_disk == json => {}
            Ok(_) => stale.push(path.display().to_string()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                missing.push(path.display().to_string())
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read {}", path.display()));
            }
        }
    }

    if !missing.is_empty() || !stale.is_empty() {
        anyhow::bail!(
            "schemas out of date (run `cargo run -p xtask -- schema`); missing: [{}], stale: [{}]",
            missing.join(", "),
            stale.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn check_passes_right_after_generation() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("schemas");

        cmd_schema(&out, false).unwrap();
        assert!(out.join("crossbench.comparison.v1.schema.json").is_file());
        cmd_schema(&out, true).unwrap();
    }

    #[test]
    fn check_names_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let err = cmd_schema(&tmp.path().join("schemas"), true).unwrap_err();
        assert!(err.to_string().contains("no schemas in"), "{err}");
    }

    #[test]
    fn check_separates_missing_and_stale_files() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().to_path_buf();
        cmd_schema(&out, false).unwrap();
        fs::remove_file(out.join("crossbench.record.v1.schema.json")).unwrap();
        fs::write(out.join("crossbench.config.v1.schema.json"), "{}").unwrap();

        let msg = cmd_schema(&out, true).unwrap_err().to_string();
        let (missing, stale) = msg.split_once("stale: [").unwrap();
        assert!(missing.contains("crossbench.record.v1"), "{msg}");
        assert!(!missing.contains("crossbench.config.v1"), "{msg}");
        assert!(stale.contains("crossbench.config.v1"), "{msg}");
    }
}
