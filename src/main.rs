use analytics::ReportGenerator;
use anyhow::{Context, Result};
use clap::Parser;
use executor::CommandEngine;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::session::Session;

mod input;
mod session;

/// Replays buy/sell/query commands against a simulated stock portfolio.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File of commands to replay. Commands are read interactively when omitted.
    input: Option<PathBuf>,

    /// Configuration with the starting budget, threshold and stock prices.
    #[arg(long, default_value = configuration::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Where the final portfolio report is written.
    #[arg(long, default_value = "output.txt")]
    output: PathBuf,

    /// Where successfully executed command lines are recorded.
    #[arg(long, default_value = "executed.txt")]
    executed: PathBuf,
}

/// The main entry point for the trading simulator.
fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the report on stdout.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    // Input and output sinks are opened before anything else so that a bad path fails fast.
    let mut source = input::open_source(cli.input.as_deref())?;
    let mut output = create_sink(&cli.output)?;
    let executed = create_sink(&cli.executed)?;

    let settings = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    info!(
        config = %cli.config.display(),
        stocks = settings.stocks.len(),
        budget = %settings.account.budget,
        threshold = %settings.account.threshold,
        "Configuration loaded"
    );
    let (table, account) = settings.into_parts()?;

    let mut session = Session::new(CommandEngine::new(table, account), executed);
    session.run(source.as_mut())?;
    let stats = session.stats();
    info!(
        lines = stats.lines,
        executed = stats.executed,
        logged = stats.logged,
        rejected = stats.rejected,
        ignored = stats.ignored,
        "Input exhausted"
    );

    let engine = session.engine();
    let generator = ReportGenerator::new();
    generator
        .write_to(engine.table(), engine.account(), &mut output)
        .with_context(|| format!("Failed to write report to {}", cli.output.display()))?;
    generator
        .write_to(engine.table(), engine.account(), &mut io::stdout().lock())
        .context("Failed to write report to the console")?;

    Ok(())
}

fn create_sink(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Could not create output file {}", path.display()))?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const PRICES: &str = "[account]\nbudget = 100.0\nthreshold = 12.5\n\n[[stocks]]\nsymbol = \"AAPL\"\nprice = 10.0\n";

    struct Workspace {
        dir: tempfile::TempDir,
    }

    impl Workspace {
        fn new(prices: &str, commands: &str) -> Self {
            let dir = tempdir().unwrap();
            fs::write(dir.path().join("prices.toml"), prices).unwrap();
            fs::write(dir.path().join("commands.txt"), commands).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn cli(&self) -> Cli {
            Cli {
                input: Some(self.path("commands.txt")),
                config: self.path("prices.toml"),
                output: self.path("output.txt"),
                executed: self.path("executed.txt"),
            }
        }

        fn read(&self, name: &str) -> String {
            fs::read_to_string(self.path(name)).unwrap()
        }
    }

    fn summary_value<'a>(report: &'a str, label: &str) -> &'a str {
        report
            .lines()
            .find(|line| line.starts_with(label))
            .map(|line| line[label.len()..].trim())
            .unwrap_or_else(|| panic!("no '{}' line in report:\n{}", label, report))
    }

    #[test]
    fn test_cli_rejects_extra_positionals() {
        assert!(Cli::try_parse_from(["hft", "a.txt", "b.txt"]).is_err());

        let cli = Cli::try_parse_from(["hft"]).unwrap();
        assert!(cli.input.is_none());
        assert_eq!(cli.config, PathBuf::from(configuration::DEFAULT_CONFIG_PATH));
        assert_eq!(cli.output, PathBuf::from("output.txt"));
        assert_eq!(cli.executed, PathBuf::from("executed.txt"));
    }

    #[test]
    fn test_run_writes_log_and_report() {
        let workspace = Workspace::new(
            PRICES,
            "buy AAPL 5\nsell AAPL 10\nsell AAPL 5\nbuy ZZZZ 1\nquery AAPL\nnonsense\n",
        );

        run(workspace.cli()).unwrap();

        assert_eq!(workspace.read("executed.txt"), "buy AAPL 5\nsell AAPL 5\n");
        let report = workspace.read("output.txt");
        assert!(report.contains("AAPL"));
        assert_eq!(summary_value(&report, "Total equity:"), "100.00");
        assert_eq!(summary_value(&report, "Delta:"), "0.00");
        assert_eq!(summary_value(&report, "Current budget:"), "100.00");
    }

    #[test]
    fn test_unwritable_output_is_fatal() {
        let workspace = Workspace::new(PRICES, "buy AAPL 5\n");
        let mut cli = workspace.cli();
        cli.output = workspace.path("missing-dir").join("output.txt");

        let message = format!("{:#}", run(cli).unwrap_err());
        assert!(message.contains("Could not create output file"), "{}", message);
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let workspace = Workspace::new("[account]\nbudget = -5\nthreshold = 1\n", "buy AAPL 5\n");

        let message = format!("{:#}", run(workspace.cli()).unwrap_err());
        assert!(message.contains("Failed to load configuration"), "{}", message);
        // Sinks are opened first, so the log exists but nothing was executed.
        assert_eq!(workspace.read("executed.txt"), "");
    }

    #[test]
    fn test_missing_config_is_fatal() {
        let workspace = Workspace::new(PRICES, "");
        let mut cli = workspace.cli();
        cli.config = workspace.path("absent.toml");

        assert!(run(cli).is_err());
    }

    #[test]
    fn test_missing_input_file_is_fatal() {
        let workspace = Workspace::new(PRICES, "");
        let mut cli = workspace.cli();
        cli.input = Some(workspace.path("absent.txt"));

        assert!(run(cli).is_err());
        assert!(!workspace.path("output.txt").exists());
    }
}
