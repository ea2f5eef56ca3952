//! Command dispatch: one handler per subcommand.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{store, ApplicationError};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, view};
use crate::config::{global_config_path, Settings};
use crate::domain::{Address, Document, EditOutcome, MoveOutcome, Node, NodeData};

/// Color names accepted by `--color`.
const COLOR_NAMES: &[&str] = &[
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
    "bright black", "bright red", "bright green", "bright yellow", "bright blue",
    "bright magenta", "bright cyan", "bright white",
];

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?;
    let board = cli.file.clone().unwrap_or_else(|| settings.document.clone());

    match &cli.command {
        Some(Commands::Init { sample, force }) => _init(&board, *sample, *force),
        Some(Commands::Show { no_addresses }) => {
            _show(&board, settings.show_addresses && !no_addresses)
        }
        Some(Commands::Add {
            parent,
            text,
            color,
        }) => _add(
            &board,
            parent,
            text,
            color.as_deref().or(settings.default_color.as_deref()),
        ),
        Some(Commands::Insert {
            address,
            text,
            color,
        }) => _insert(
            &board,
            address,
            text,
            color.as_deref().or(settings.default_color.as_deref()),
        ),
        Some(Commands::Remove { address }) => _remove(&board, address),
        Some(Commands::Move {
            source,
            destination,
        }) => _move(&board, source, destination),
        Some(Commands::Set {
            address,
            text,
            color,
            fold,
            unfold,
        }) => _set(&board, address, text.as_deref(), color.as_deref(), *fold, *unfold),
        Some(Commands::Info) => _info(&board),
        Some(Commands::Config { command }) => _config(command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

#[instrument]
fn _init(board: &Path, sample: bool, force: bool) -> CliResult<()> {
    if board.exists() && !force {
        return Err(ApplicationError::DocumentExists(board.to_path_buf()).into());
    }
    if let Some(parent) = board.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ApplicationError::WriteDocument {
                path: board.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }
    let document = if sample {
        sample_board()
    } else {
        Document::new()
    };
    store::save(board, &document)?;
    output::success(&format!("created board {}", board.display()));
    Ok(())
}

#[instrument]
fn _show(board: &Path, show_addresses: bool) -> CliResult<()> {
    let document = store::load(board)?;
    if document.root().child_count() == 0 {
        output::detail("empty board; `add / <TEXT>` creates the first node");
        return Ok(());
    }
    let title = board
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| board.display().to_string());
    output::info(&view::render(&document, &title, show_addresses));
    Ok(())
}

#[instrument]
fn _add(board: &Path, parent: &Address, text: &str, color: Option<&str>) -> CliResult<()> {
    let node = new_node(text, color)?;
    let mut document = store::load(board)?;
    match document.append_child(parent, node) {
        EditOutcome::Applied => {
            store::save(board, &document)?;
            output::success(&format!("added under {parent}"));
        }
        EditOutcome::NotFound => output::warning(&format!("no node at {parent}")),
    }
    Ok(())
}

#[instrument]
fn _insert(board: &Path, address: &Address, text: &str, color: Option<&str>) -> CliResult<()> {
    if address.is_root() {
        return Err(CliError::Usage(
            "cannot insert at /; give the address the node should occupy".into(),
        ));
    }
    let node = new_node(text, color)?;
    let mut document = store::load(board)?;
    match document.insert_node(address, node) {
        EditOutcome::Applied => {
            store::save(board, &document)?;
            output::success(&format!("inserted at {address}"));
        }
        EditOutcome::NotFound => output::warning(&format!("no parent for {address}")),
    }
    Ok(())
}

#[instrument]
fn _remove(board: &Path, address: &Address) -> CliResult<()> {
    let mut document = store::load(board)?;
    match document.remove_node(address) {
        Some(removed) => {
            store::save(board, &document)?;
            let count = removed.subtree_size();
            output::success(&format!("removed {address} ({count} node(s))"));
        }
        None => output::warning(&format!("no node at {address}")),
    }
    Ok(())
}

#[instrument]
fn _move(board: &Path, source: &Address, destination: &Address) -> CliResult<()> {
    let mut document = store::load(board)?;
    let outcome = document.move_node(source, destination);
    debug!("move outcome: {:?}", outcome);
    match outcome {
        MoveOutcome::Moved => {
            store::save(board, &document)?;
            output::success(&format!("moved {source} -> {destination}"));
        }
        MoveOutcome::SamePosition => {
            output::detail("source and destination are the same node; nothing to do")
        }
        MoveOutcome::IntoOwnSubtree => {
            output::warning("cannot move a node into its own subtree")
        }
        MoveOutcome::NotFound => {
            output::warning(&format!("{source} or {destination} does not resolve"))
        }
    }
    Ok(())
}

#[instrument]
fn _set(
    board: &Path,
    address: &Address,
    text: Option<&str>,
    color: Option<&str>,
    fold: bool,
    unfold: bool,
) -> CliResult<()> {
    if text.is_none() && color.is_none() && !fold && !unfold {
        return Err(CliError::Usage(
            "nothing to change; pass --text, --color, --fold or --unfold".into(),
        ));
    }
    if let Some(name) = color {
        validate_color(name)?;
    }
    let mut document = store::load(board)?;
    let Some(node) = document.resolve_mut(address) else {
        output::warning(&format!("no node at {address}"));
        return Ok(());
    };
    let data = node.data_mut();
    if let Some(text) = text {
        data.text = text.to_string();
    }
    if let Some(color) = color {
        data.color = Some(color.to_string());
    }
    if fold {
        data.folded = true;
    }
    if unfold {
        data.folded = false;
    }
    store::save(board, &document)?;
    output::success(&format!("updated {address}"));
    Ok(())
}

#[instrument]
fn _info(board: &Path) -> CliResult<()> {
    let document = store::load(board)?;
    output::header(&board.display());
    // The root is a synthetic container; statistics cover visible nodes.
    let nodes = document.node_count() - 1;
    let leaves = document
        .nodes()
        .filter(|(address, node)| !address.is_root() && node.child_count() == 0)
        .count();
    output::detail(&format!("nodes:  {nodes}"));
    output::detail(&format!("leaves: {leaves}"));
    output::detail(&format!("depth:  {}", document.depth().saturating_sub(1)));
    Ok(())
}

#[instrument]
fn _config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init => {
            let Some(path) = global_config_path() else {
                return Err(ApplicationError::Config {
                    message: "cannot determine config directory".into(),
                }
                .into());
            };
            if path.exists() {
                output::warning(&format!("config already exists: {}", path.display()));
                return Ok(());
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir).map_err(|e| ApplicationError::Config {
                    message: format!("create {}: {}", dir.display(), e),
                })?;
            }
            std::fs::write(&path, Settings::template()).map_err(|e| {
                ApplicationError::Config {
                    message: format!("write {}: {}", path.display(), e),
                }
            })?;
            output::success(&format!("wrote {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&path.display()),
                None => output::warning("cannot determine config directory"),
            }
            Ok(())
        }
    }
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn new_node(text: &str, color: Option<&str>) -> CliResult<Node> {
    let data = match color {
        Some(name) => {
            validate_color(name)?;
            NodeData::with_color(text, name)
        }
        None => NodeData::new(text),
    };
    Ok(Node::leaf(data))
}

fn validate_color(name: &str) -> CliResult<()> {
    if COLOR_NAMES.contains(&name.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(CliError::InvalidArgs(format!(
            "unknown color `{name}` (try one of: {})",
            COLOR_NAMES.join(", ")
        )))
    }
}

/// Starter layout written by `init --sample`.
fn sample_board() -> Document {
    let mut document = Document::new();
    let root = Address::root();
    document.append_child(&root, Node::leaf(NodeData::with_color("Backlog", "cyan")));
    document.append_child(&root, Node::leaf(NodeData::with_color("Doing", "yellow")));
    document.append_child(&root, Node::leaf(NodeData::with_color("Done", "green")));
    document.append_child(
        &Address::from([0]),
        Node::leaf(NodeData::new("sketch the board layout")),
    );
    document.append_child(
        &Address::from([0]),
        Node::leaf(NodeData::new("collect loose notes")),
    );
    document.append_child(
        &Address::from([1]),
        Node::leaf(NodeData::new("wire up the first column")),
    );
    document
}
