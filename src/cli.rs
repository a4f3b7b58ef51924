//! CLI definitions for Keyhold.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use keyhold_protocols::PausedFeature;

/// Keyhold CLI.
#[derive(Parser)]
#[command(name = "keyhold")]
#[command(about = "Browser password manager: native messaging host and vault tools")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.keyhold/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Arguments the browser passes when launching the host. Chrome on
    /// Windows appends `--parent-window=<hwnd>` after the caller origin.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub caller: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Serve the extension over native messaging on stdin/stdout (default)
    Serve,

    /// List saved logins
    List {
        /// Only logins whose site or username contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Only logins with weak passwords
        #[arg(long)]
        weak: bool,

        /// Show passwords
        #[arg(long)]
        reveal: bool,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Add a login
    Add {
        site: String,

        #[arg(short, long, default_value = "")]
        username: String,

        /// Password; generated when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Change a saved login
    Edit {
        id: String,

        #[arg(long)]
        site: Option<String>,

        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Delete a login by id
    Remove { id: String },

    /// Export logins as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import logins from a CSV file
    Import { file: PathBuf },

    /// Generate a password
    Generate {
        #[arg(short, long)]
        length: Option<usize>,

        #[arg(long)]
        no_letters: bool,

        #[arg(long)]
        no_digits: bool,

        #[arg(long)]
        no_symbols: bool,
    },

    /// Pause a feature on a site
    Pause {
        #[arg(value_enum)]
        feature: FeatureArg,
        hostname: String,
    },

    /// Resume a paused feature on a site
    Resume {
        #[arg(value_enum)]
        feature: FeatureArg,
        hostname: String,
    },

    /// Show paused sites
    Paused {
        #[arg(value_enum)]
        feature: Option<FeatureArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum FeatureArg {
    Autofill,
    AutoLogin,
}

impl From<FeatureArg> for PausedFeature {
    fn from(arg: FeatureArg) -> Self {
        match arg {
            FeatureArg::Autofill => PausedFeature::Autofill,
            FeatureArg::AutoLogin => PausedFeature::AutoLogin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chrome_unix_launch() {
        let cli = Cli::try_parse_from(["keyhold", "chrome-extension://abcdef/"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.caller, vec!["chrome-extension://abcdef/"]);
    }

    #[test]
    fn test_chrome_windows_launch() {
        let cli = Cli::try_parse_from([
            "keyhold",
            "chrome-extension://abcdef/",
            "--parent-window=0",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(
            cli.caller,
            vec!["chrome-extension://abcdef/", "--parent-window=0"]
        );
    }

    #[test]
    fn test_firefox_launch() {
        let cli = Cli::try_parse_from([
            "keyhold",
            "/home/alice/.mozilla/native-messaging-hosts/keyhold.json",
            "keyhold@example.org",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.caller.len(), 2);
        assert_eq!(cli.caller[1], "keyhold@example.org");
    }

    #[test]
    fn test_subcommand_still_parses() {
        let cli = Cli::try_parse_from(["keyhold", "list", "--reveal"]).unwrap();
        assert!(cli.caller.is_empty());
        assert!(matches!(
            cli.command,
            Some(Commands::List { reveal: true, .. })
        ));
    }

    #[test]
    fn test_config_before_subcommand() {
        let cli = Cli::try_parse_from(["keyhold", "--config", "x.toml", "paused"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(cli.caller.is_empty());
        assert!(matches!(cli.command, Some(Commands::Paused { feature: None })));
    }
}
