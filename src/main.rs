use anyhow::Context;
use clap::Parser;
use scaleout_config::prelude::*;
use scaleout_config::sources::{EnvSource, FileSource};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "scaleout-check",
    about = "Validate a scale-out plan before an event",
    version
)]
struct Cli {
    /// Path to the plan (.json, .yaml, .yml or .toml)
    #[arg(env = "SCALEOUT_CONFIG_PATH")]
    path: Option<PathBuf>,

    /// Environment variable holding an inline plan; wins over the file when set
    #[arg(long, default_value = "SCALEOUT_CONFIG")]
    env: String,

    /// Override format detection (json, yaml, toml)
    #[arg(short, long)]
    format: Option<Format>,

    /// Print nothing on success
    #[arg(short, long)]
    quiet: bool,
}

fn run(cli: &Cli) -> anyhow::Result<Configuration> {
    let format = cli.format.unwrap_or_default();
    let mut builder = Configuration::builder()
        .with_source(EnvSource::new(cli.env.as_str()).with_format(format));

    if let Some(path) = &cli.path {
        let mut source = FileSource::new(path);
        if let Some(format) = cli.format {
            source = source.with_format(format);
        }
        builder = builder.with_source(source);
    }

    builder
        .build()
        .with_context(|| match &cli.path {
            Some(path) => format!("invalid scale-out plan {}", path.display()),
            None => format!("invalid scale-out plan from ${}", cli.env),
        })
}

fn report(config: &Configuration, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{}: {} group(s), +{} instance(s) across {}",
        config.event_name,
        config.auto_scaling_groups.len(),
        config.total_growth(),
        config.regions().join(", ")
    )?;
    for group in &config.auto_scaling_groups {
        let profile = if group.uses_default_profile() {
            "default"
        } else {
            group.profile.as_str()
        };
        writeln!(
            out,
            "  {:<24} +{:<6} {:<16} profile={}",
            group.name, group.growth, group.region, profile
        )?;
    }
    Ok(())
}

/// Run the check and write the outcome; returns the process exit status.
fn execute(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match run(cli) {
        Ok(config) => {
            if !cli.quiet && report(&config, out).is_err() {
                return 1;
            }
            0
        }
        Err(e) => {
            // Writing to stderr is best effort
            let _ = writeln!(err, "error: {:#}", e);
            1
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scaleout_config=info")),
        )
        .init();

    let cli = Cli::parse();
    let status = execute(&cli, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(status)
}

#[cfg(test)]
#[allow(unsafe_code)] // For env var manipulation in tests
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const VALID: &str = r#"{"EventName": "blackfriday", "AutoScalingGroups": [
        {"Name": "backend-asg", "Growth": 30, "Region": "sa-east-1", "Profile": "ops"},
        {"Name": "frontend-asg", "Growth": 10, "Region": "sa-east-1"}
    ]}"#;

    fn write_plan(dir: &TempDir, file: &str, contents: &str) -> String {
        let path = dir.path().join(file);
        fs::write(&path, contents).unwrap();
        path.display().to_string()
    }

    /// Parse arguments with an env var name no other test touches.
    fn cli(var: &str, args: &[&str]) -> Cli {
        unsafe {
            env::remove_var(var);
        }
        let mut argv = vec!["scaleout-check", "--env", var];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn execute_captured(cli: &Cli) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = execute(cli, &mut out, &mut err);
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_valid_plan_reports_groups() {
        let dir = TempDir::new().unwrap();
        let path = write_plan(&dir, "plan.json", VALID);

        let (status, out, err) = execute_captured(&cli("TEST_SCALEOUT_CLI_VALID", &[path.as_str()]));
        assert_eq!(status, 0);
        assert!(err.is_empty());
        assert!(out.starts_with("blackfriday: 2 group(s), +40 instance(s) across sa-east-1"));
        assert!(out.contains("backend-asg"));
        assert!(out.contains("profile=ops"));
        assert!(out.contains("profile=default"));
    }

    #[test]
    fn test_quiet_prints_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_plan(&dir, "plan.json", VALID);

        let (status, out, err) =
            execute_captured(&cli("TEST_SCALEOUT_CLI_QUIET", &[path.as_str(), "--quiet"]));
        assert_eq!(status, 0);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_parse_failure_exits_non_zero() {
        let dir = TempDir::new().unwrap();
        let path = write_plan(
            &dir,
            "plan.json",
            r#"{"EventName": "xpto" "AutoScalingGroups": []}"#,
        );

        let (status, out, err) = execute_captured(&cli("TEST_SCALEOUT_CLI_PARSE", &[path.as_str()]));
        assert_eq!(status, 1);
        assert!(out.is_empty());
        assert!(err.contains("invalid JSON document"));
        assert_eq!(err.matches("invalid JSON document").count(), 1);
    }

    #[test]
    fn test_validation_failure_exits_non_zero() {
        let dir = TempDir::new().unwrap();
        let path = write_plan(
            &dir,
            "plan.json",
            r#"{"EventName": "blackfriday", "AutoScalingGroups": [{"Name": "api", "Growth": 0}]}"#,
        );

        let (status, out, err) = execute_captured(&cli("TEST_SCALEOUT_CLI_INVALID", &[path.as_str()]));
        assert_eq!(status, 1);
        assert!(out.is_empty());
        assert!(err.contains(&format!("invalid scale-out plan {}", Path::new(&path).display())));
        assert_eq!(err.matches("Growth must be greater than 0").count(), 1);
    }

    #[test]
    fn test_format_override() {
        let dir = TempDir::new().unwrap();
        let path = write_plan(&dir, "plan.txt", VALID);

        let (status, _, err) = execute_captured(&cli("TEST_SCALEOUT_CLI_NOFORMAT", &[path.as_str()]));
        assert_eq!(status, 1);
        assert!(err.contains("Unsupported file extension"));

        let (status, out, _) = execute_captured(&cli(
            "TEST_SCALEOUT_CLI_FORMAT",
            &[path.as_str(), "--format", "json"],
        ));
        assert_eq!(status, 0);
        assert!(out.starts_with("blackfriday"));
    }

    #[test]
    fn test_env_document_wins_over_path() {
        let dir = TempDir::new().unwrap();
        let path = write_plan(&dir, "plan.json", VALID);

        let args = cli("TEST_SCALEOUT_CLI_ENV", &[path.as_str()]);
        unsafe {
            env::set_var(
                "TEST_SCALEOUT_CLI_ENV",
                r#"{"EventName": "flash-sale", "AutoScalingGroups": [{"Name": "api", "Growth": 2, "Region": "us-east-1"}]}"#,
            );
        }

        let (status, out, _) = execute_captured(&args);
        assert_eq!(status, 0);
        assert!(out.starts_with("flash-sale: 1 group(s), +2 instance(s) across us-east-1"));

        unsafe {
            env::remove_var("TEST_SCALEOUT_CLI_ENV");
        }
    }
}
