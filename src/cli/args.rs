//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::Address;

/// Outline and kanban board editor: nested nodes addressed by sibling path
#[derive(Parser, Debug)]
#[command(name = "treedo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d, -dd, -ddd
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Board file (default: from config)
    #[arg(short = 'f', long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new board file
    Init {
        /// Seed the board with a starter layout
        #[arg(long)]
        sample: bool,
        /// Overwrite an existing board
        #[arg(long)]
        force: bool,
    },

    /// Print the board as a tree
    Show {
        /// Hide node addresses
        #[arg(long)]
        no_addresses: bool,
    },

    /// Append a child under a node ("/" is the board itself)
    Add {
        /// Address of the parent node
        parent: Address,
        /// Display text of the new node
        text: String,
        /// Terminal color name for the new node
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Insert a node at an address; later siblings shift right
    Insert {
        /// Address the new node will occupy
        address: Address,
        /// Display text of the new node
        text: String,
        /// Terminal color name for the new node
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Remove the node at an address, with its whole subtree
    Remove {
        /// Address of the node to remove
        address: Address,
    },

    /// Move a subtree to a new address
    Move {
        /// Address of the node to move
        source: Address,
        /// Address the node will occupy after the move
        destination: Address,
    },

    /// Edit a node's text or presentation
    Set {
        /// Address of the node to edit
        address: Address,
        /// New display text
        #[arg(long)]
        text: Option<String>,
        /// New terminal color name
        #[arg(long)]
        color: Option<String>,
        /// Collapse the node in `show` output
        #[arg(long, conflicts_with = "unfold")]
        fold: bool,
        /// Expand the node in `show` output
        #[arg(long)]
        unfold: bool,
    },

    /// Show board statistics
    Info,

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
    /// Print the effective configuration as TOML
    Show,
    /// Write a config template to the global location
    Init,
    /// Print the global config file path
    Path,
}
