//! Core implementation of the Termenu command framework
//!
//! Termenu presents a menu of typed commands on a terminal, matches each
//! input line against the active menu, binds raw tokens to typed argument
//! values, and dispatches the matched action through a caller-supplied
//! activation boundary. Navigable commands descend into sub-menus of
//! further commands.
//!
//! A command tree is registered once at startup and owned for the lifetime
//! of the process; menu state only ever borrows into it.

use std::collections::HashSet;

use log::warn;
use thiserror::Error;

use crate::commands::command::{Command, CommandKind};

pub mod binder;
pub mod commands;
pub mod config_file;
pub mod dispatch;
pub mod matcher;
pub mod terminal;
pub mod theme;
pub mod tokenizer;

/// Errors that can occur while registering a command tree
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Duplicate identifier in menu: {0}")]
    DuplicateIdentifier(String),
    #[error("Command in owner group '{0}' has an empty identifier")]
    EmptyIdentifier(String),
    #[error(
        "Command '{identifier}' declares parameter '{parameter}' at position {position}, expected {expected}"
    )]
    ParameterPosition {
        identifier: String,
        parameter: String,
        position: usize,
        expected: usize,
    },
}

/// A validated command tree, the static configuration every menu borrows from
pub struct CommandTree<H> {
    root: Vec<Command<H>>,
}

impl<H> CommandTree<H> {
    /// Validate a root command set and link parent back-references.
    ///
    /// Identifier uniqueness (case-insensitive, per sibling set) is enforced
    /// here so the matcher never has to break a tie between two full matches.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` for duplicate or empty identifiers and for
    /// parameter positions that are not contiguous from 0.
    pub fn register(mut root: Vec<Command<H>>) -> Result<Self, RegistryError> {
        validate_menu(&root)?;
        link_parents(&mut root, None);
        Ok(Self { root })
    }

    /// The root menu, active when a runner starts.
    #[must_use]
    pub fn root(&self) -> &[Command<H>] {
        &self.root
    }
}

fn validate_menu<H>(menu: &[Command<H>]) -> Result<(), RegistryError> {
    let mut seen = HashSet::new();
    for command in menu {
        if command.identifier.is_empty() {
            return Err(RegistryError::EmptyIdentifier(command.owner_group.clone()));
        }
        if !seen.insert(command.identifier.to_ascii_lowercase()) {
            return Err(RegistryError::DuplicateIdentifier(command.identifier.clone()));
        }
        validate_parameters(command)?;
        if let CommandKind::Navigable { children, .. } = &command.kind {
            if children.is_empty() {
                warn!("Navigable command '{}' has no children", command.identifier);
            }
            validate_menu(children)?;
        }
    }
    Ok(())
}

fn validate_parameters<H>(command: &Command<H>) -> Result<(), RegistryError> {
    for (expected, spec) in command.parameters.iter().enumerate() {
        if spec.position != expected {
            return Err(RegistryError::ParameterPosition {
                identifier: command.identifier.clone(),
                parameter: spec.name.clone(),
                position: spec.position,
                expected,
            });
        }
    }
    Ok(())
}

fn link_parents<H>(menu: &mut [Command<H>], parent: Option<&str>) {
    for command in menu {
        let identifier = command.identifier.clone();
        if let CommandKind::Navigable {
            children,
            parent: parent_ref,
        } = &mut command.kind
        {
            *parent_ref = parent.map(String::from);
            link_parents(children, Some(&identifier));
        }
    }
}
