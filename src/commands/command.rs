use std::fmt;

use crate::binder::ArgValue;
use crate::dispatch::InvocationError;

/// Declared kind of a single command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Boolean,
    Float,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Boolean => "boolean",
            ParamKind::Float => "float",
        };
        f.write_str(name)
    }
}

/// A single positional parameter declaration
///
/// Positions are contiguous from 0 within one command; this is checked when
/// the command tree is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub position: usize,
    pub kind: ParamKind,
}

impl ParameterSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, position: usize, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            position,
            kind,
        }
    }
}

/// Build a contiguous parameter list from `(name, kind)` pairs.
#[must_use]
pub fn params(specs: &[(&str, ParamKind)]) -> Vec<ParameterSpec> {
    specs
        .iter()
        .enumerate()
        .map(|(position, (name, kind))| ParameterSpec::new(*name, position, *kind))
        .collect()
}

/// Handler function invoked when a command is dispatched.
///
/// `H` is the handler instance supplied by the activation boundary; the bound
/// argument values arrive in declaration order.
pub type Action<H> =
    Box<dyn Fn(&mut H, &[ArgValue]) -> Result<(), InvocationError> + Send + Sync>;

/// Variant of a command: a plain action, or an action that opens a sub-menu
pub enum CommandKind<H> {
    Leaf,
    Navigable {
        children: Vec<Command<H>>,
        /// Identifier of the command this menu is reached from, display only.
        /// Filled in during registration.
        parent: Option<String>,
    },
}

impl<H> fmt::Debug for CommandKind<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Leaf => f.write_str("Leaf"),
            CommandKind::Navigable { children, parent } => f
                .debug_struct("Navigable")
                .field("children", children)
                .field("parent", parent)
                .finish(),
        }
    }
}

/// One registered operation: identifier, typed parameters, the action to run,
/// and the owner group used to resolve a handler instance
pub struct Command<H> {
    pub identifier: String,
    pub parameters: Vec<ParameterSpec>,
    pub owner_group: String,
    pub action: Action<H>,
    pub kind: CommandKind<H>,
}

impl<H> Command<H> {
    /// A command that only runs its action.
    pub fn leaf(
        identifier: impl Into<String>,
        owner_group: impl Into<String>,
        parameters: Vec<ParameterSpec>,
        action: impl Fn(&mut H, &[ArgValue]) -> Result<(), InvocationError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            parameters,
            owner_group: owner_group.into(),
            action: Box::new(action),
            kind: CommandKind::Leaf,
        }
    }

    /// A command that runs its action and then makes `children` the active menu.
    pub fn navigable(
        identifier: impl Into<String>,
        owner_group: impl Into<String>,
        parameters: Vec<ParameterSpec>,
        action: impl Fn(&mut H, &[ArgValue]) -> Result<(), InvocationError> + Send + Sync + 'static,
        children: Vec<Command<H>>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            parameters,
            owner_group: owner_group.into(),
            action: Box::new(action),
            kind: CommandKind::Navigable {
                children,
                parent: None,
            },
        }
    }

    #[must_use]
    pub fn is_navigable(&self) -> bool {
        matches!(self.kind, CommandKind::Navigable { .. })
    }

    /// The commands reachable through this one; empty for a leaf.
    #[must_use]
    pub fn children(&self) -> &[Command<H>] {
        match &self.kind {
            CommandKind::Navigable { children, .. } => children,
            CommandKind::Leaf => &[],
        }
    }

    /// One-line signature: the identifier followed by its declared parameters.
    #[must_use]
    pub fn signature(&self) -> String {
        let mut out = self.identifier.clone();
        for spec in &self.parameters {
            out.push_str(&format!(" <{}:{}>", spec.name, spec.kind));
        }
        out
    }
}

impl<H> fmt::Debug for Command<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("identifier", &self.identifier)
            .field("parameters", &self.parameters)
            .field("owner_group", &self.owner_group)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
