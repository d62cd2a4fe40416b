//! Execution dispatch and the activation boundary
//!
//! Once a command has matched and its arguments are bound, dispatch resolves
//! a handler instance through the caller-supplied [`Activator`], invokes the
//! action, and performs the menu transition for navigable commands. Failures
//! are surfaced synchronously and never retried; a failed invocation leaves
//! the active menu untouched.

use std::collections::HashMap;

use thiserror::Error;

use crate::binder::ArgValue;
use crate::commands::command::Command;
use crate::commands::menu::MenuState;

/// Failure raised by a command action during execution
#[derive(Error, Debug)]
#[error("{message}")]
pub struct InvocationError {
    message: String,
}

impl InvocationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InvocationError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for InvocationError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// The activation boundary failed to supply a handler instance
#[derive(Error, Debug)]
#[error("no handler instance for owner group '{0}'")]
pub struct ActivationError(pub String);

/// Errors that can occur while dispatching a matched command
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Activation(#[from] ActivationError),
    #[error("command '{identifier}' failed: {source}")]
    Invocation {
        identifier: String,
        #[source]
        source: InvocationError,
    },
}

/// Supplies the instance a command's action is invoked against.
///
/// Injected at startup; the instance-management strategy (one shared value,
/// a map per owner group, fresh construction) is entirely the caller's.
/// Dispatch never caches or disposes what `resolve` returns.
pub trait Activator {
    type Handler;

    /// Resolve the handler instance for an owner group.
    ///
    /// # Errors
    ///
    /// Returns `ActivationError` when no instance is available for the
    /// group; this indicates a configuration fault and is not retried.
    fn resolve(&mut self, owner_group: &str) -> Result<&mut Self::Handler, ActivationError>;
}

/// One handler instance per owner group.
impl<H> Activator for HashMap<String, H> {
    type Handler = H;

    fn resolve(&mut self, owner_group: &str) -> Result<&mut H, ActivationError> {
        self.get_mut(owner_group)
            .ok_or_else(|| ActivationError(owner_group.to_string()))
    }
}

/// Resolves every owner group to the same instance.
pub struct SoleHandler<H>(pub H);

impl<H> Activator for SoleHandler<H> {
    type Handler = H;

    fn resolve(&mut self, _owner_group: &str) -> Result<&mut H, ActivationError> {
        Ok(&mut self.0)
    }
}

/// Invoke a matched command with its bound arguments.
///
/// For a navigable command the menu transition happens only after the action
/// returns successfully; on any error the active menu is left as it was.
///
/// # Errors
///
/// Returns `DispatchError::Activation` when the activator cannot supply a
/// handler, or `DispatchError::Invocation` when the action itself fails.
pub fn execute<'tree, A: Activator>(
    command: &'tree Command<A::Handler>,
    args: &[ArgValue],
    activator: &mut A,
    menu: &mut MenuState<'tree, A::Handler>,
) -> Result<(), DispatchError> {
    let handler = activator.resolve(&command.owner_group)?;
    (command.action)(handler, args).map_err(|source| DispatchError::Invocation {
        identifier: command.identifier.clone(),
        source,
    })?;
    menu.enter_submenu(command);
    Ok(())
}
