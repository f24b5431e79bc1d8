//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::application::Mode;

/// Anemia differential-diagnosis flowchart: next question or diagnosis as launcher JSON
#[derive(Parser, Debug)]
#[command(name = "anemia")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log to stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Icon path attached to every item
    #[arg(long, global = true)]
    pub icon: Option<String>,

    /// Pretty-print the JSON document
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// The single query argument the launcher passes, e.g. `"{query}"`.
#[derive(Args, Debug, Clone, Default)]
pub struct Query {
    /// Query words; several words are joined with spaces
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

impl Query {
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the flowchart by node identifier (default: root)
    Flow {
        #[command(flatten)]
        query: Query,
    },

    /// Numeric lab values: WBC PLT/Retic Retic/MCV MCV
    Labs {
        #[command(flatten)]
        query: Query,
    },

    /// Sex and lab values: m|f Hb WBC ...
    Screen {
        #[command(flatten)]
        query: Query,
    },

    /// Use the configured mode
    Run {
        /// Override the configured mode
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,
        #[command(flatten)]
        query: Query,
    },

    /// Check the flowchart table for structural defects
    Validate,

    /// Show the flowchart as tree
    Tree,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
    /// Print a commented config template
    Template,
}
