//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::RenderStyle;

/// Organisation chart explorer: print, size, height, membership and level queries
#[derive(Parser, Debug)]
#[command(name = "orgchart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug verbosity, repeat for more (-d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    /// Name of the CEO at the root of the chart
    #[arg(long, global = true)]
    pub ceo: Option<String>,

    /// Settings file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the chart, one line per person (default command)
    Print {
        /// Rendering style (overrides config)
        #[arg(short, long, value_enum)]
        style: Option<StyleArg>,
    },

    /// Check whether someone is in the organisation (exit 1 if not)
    Contains {
        /// Name to search for
        name: String,
    },

    /// Number of people in the organisation
    Size,

    /// Number of levels in the chart
    Height,

    /// Level of a person, the CEO being level 1
    Level {
        /// Name of the person
        name: String,
    },

    /// List everyone without reports
    Leaves,

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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings as TOML
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleArg {
    /// Indented outline
    Indent,
    /// Box-drawing tree
    Tree,
}

impl From<StyleArg> for RenderStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Indent => RenderStyle::Indent,
            StyleArg::Tree => RenderStyle::Tree,
        }
    }
}
