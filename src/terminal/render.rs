//! Pure rendering of menu and help listings
//!
//! Everything here produces plain strings so it can be tested without a
//! terminal; coloring is the runner's job.

use crate::commands::command::{Command, CommandKind};

/// The listing printed above the prompt: navigable menus first, then leaf
/// commands, each sorted by identifier.
#[must_use]
pub fn render_menu<H>(commands: &[Command<H>]) -> String {
    let mut lines = Vec::new();
    let mut menus: Vec<&Command<H>> = commands.iter().filter(|c| c.is_navigable()).collect();
    menus.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    if !menus.is_empty() {
        lines.push("Menus (type help <menu> to list sub-commands):".to_string());
        for command in menus {
            lines.push(format!("  {}", command.signature()));
        }
    }
    let mut leaves: Vec<&Command<H>> = commands.iter().filter(|c| !c.is_navigable()).collect();
    leaves.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    if !leaves.is_empty() {
        lines.push("Commands:".to_string());
        for command in leaves {
            lines.push(format!("  {}", command.signature()));
        }
    }
    lines.join("\n")
}

/// Help listing for one command: its signature, and for a navigable command
/// the signatures of its children.
#[must_use]
pub fn render_help<H>(command: &Command<H>) -> String {
    match &command.kind {
        CommandKind::Leaf => command.signature(),
        CommandKind::Navigable { children, parent } => {
            let mut lines = Vec::new();
            let mut heading = format!("MENU: {}", command.signature());
            if let Some(parent) = parent {
                heading.push_str(&format!(" (under {parent})"));
            }
            lines.push(heading);
            for child in children {
                lines.push(format!("  {}", child.signature()));
            }
            lines.join("\n")
        }
    }
}
