use log::debug;

use crate::commands::command::{Command, CommandKind};

/// Tracks which sibling set of commands is currently offered to the user.
///
/// `active` always borrows into the registered command tree; the state never
/// owns commands. A previous menu is kept on `history` so the user can step
/// back out of a sub-menu.
pub struct MenuState<'tree, H> {
    active: &'tree [Command<H>],
    history: Vec<&'tree [Command<H>]>,
}

impl<'tree, H> MenuState<'tree, H> {
    #[must_use]
    pub fn new(root: &'tree [Command<H>]) -> Self {
        Self {
            active: root,
            history: Vec::new(),
        }
    }

    /// The commands currently reachable from the user's navigation position.
    #[must_use]
    pub fn active(&self) -> &'tree [Command<H>] {
        self.active
    }

    /// Replace the active menu with a navigable command's children.
    ///
    /// The previous menu is pushed onto the history stack. Returns `false`
    /// (and changes nothing) when `command` is a leaf.
    pub fn enter_submenu(&mut self, command: &'tree Command<H>) -> bool {
        match &command.kind {
            CommandKind::Navigable { children, .. } => {
                debug!("entering submenu '{}'", command.identifier);
                self.history.push(self.active);
                self.active = children;
                true
            }
            CommandKind::Leaf => false,
        }
    }

    /// Restore the menu that was active before the last transition.
    ///
    /// Returns `false` when already at the root menu.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.active = previous;
                true
            }
            None => false,
        }
    }

    /// Case-insensitive lookup in the active menu. Read-only.
    #[must_use]
    pub fn find_by_identifier(&self, identifier: &str) -> Option<&'tree Command<H>> {
        self.active
            .iter()
            .find(|command| command.identifier.eq_ignore_ascii_case(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::command::Command;

    fn leaf(identifier: &str) -> Command<()> {
        Command::leaf(identifier, "test", vec![], |_, _| Ok(()))
    }

    fn menu_with_submenu() -> Vec<Command<()>> {
        vec![
            leaf("greet"),
            Command::navigable(
                "settings",
                "test",
                vec![],
                |_, _| Ok(()),
                vec![leaf("reset"), leaf("show")],
            ),
        ]
    }

    #[test]
    fn test_enter_submenu_replaces_active() {
        let root = menu_with_submenu();
        let mut state = MenuState::new(&root);
        assert!(state.enter_submenu(&root[1]));
        let identifiers: Vec<_> = state.active().iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(identifiers, ["reset", "show"]);
    }

    #[test]
    fn test_enter_submenu_on_leaf_is_a_no_op() {
        let root = menu_with_submenu();
        let mut state = MenuState::new(&root);
        assert!(!state.enter_submenu(&root[0]));
        assert_eq!(state.active().len(), 2);
    }

    #[test]
    fn test_enter_submenu_twice_is_idempotent() {
        let root = menu_with_submenu();
        let mut state = MenuState::new(&root);
        state.enter_submenu(&root[1]);
        state.enter_submenu(&root[1]);
        let identifiers: Vec<_> = state.active().iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(identifiers, ["reset", "show"]);
    }

    #[test]
    fn test_back_restores_previous_menu() {
        let root = menu_with_submenu();
        let mut state = MenuState::new(&root);
        state.enter_submenu(&root[1]);
        assert!(state.back());
        assert_eq!(state.active().len(), 2);
        assert_eq!(state.active()[0].identifier, "greet");
        assert!(!state.back(), "already at the root menu");
    }

    #[test]
    fn test_find_by_identifier_is_case_insensitive_and_pure() {
        let root = menu_with_submenu();
        let state = MenuState::new(&root);
        let found = state.find_by_identifier("SETTINGS").expect("should find");
        assert_eq!(found.identifier, "settings");
        assert!(state.find_by_identifier("missing").is_none());
        assert_eq!(state.active().len(), 2);
    }
}
