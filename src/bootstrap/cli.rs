use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "clipkeep")]
#[command(about = "Clipboard history viewer with write-back", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML). Defaults to <config_dir>/clipkeep/config.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the capture poll interval
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Start without polling the system clipboard
    #[arg(long)]
    pub no_capture: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::parse_from([
            "clipkeep",
            "--config",
            "/tmp/ck.toml",
            "--poll-interval-ms",
            "50",
            "--no-capture",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ck.toml")));
        assert_eq!(cli.poll_interval_ms, Some(50));
        assert!(cli.no_capture);
    }

    #[test]
    fn defaults_are_empty() {
        let cli = Cli::parse_from(["clipkeep"]);
        assert!(cli.config.is_none());
        assert!(!cli.no_capture);
    }
}
