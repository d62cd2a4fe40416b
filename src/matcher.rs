//! Matching input tokens against registered commands

use std::cmp::Ordering;

use crate::binder;
use crate::commands::command::Command;

/// Result of testing one token sequence against one command.
///
/// Exactly one outcome is produced per (command, tokens) pair; the four
/// identifier-hit outcomes are mutually exclusive and exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Miss,
    Matched,
    MissingParameter,
    TooManyParameters,
    WrongTypes,
}

/// Decide how `tokens` relates to `command`.
///
/// The first token is compared case-insensitively against the identifier;
/// the rest are checked for arity and then for bindability against the
/// declared parameter kinds.
#[must_use]
pub fn match_tokens<H>(tokens: &[&str], command: &Command<H>) -> MatchOutcome {
    let Some((identifier, args)) = tokens.split_first() else {
        return MatchOutcome::Miss;
    };
    if !identifier.eq_ignore_ascii_case(&command.identifier) {
        return MatchOutcome::Miss;
    }
    match args.len().cmp(&command.parameters.len()) {
        Ordering::Less => MatchOutcome::MissingParameter,
        Ordering::Greater => MatchOutcome::TooManyParameters,
        Ordering::Equal => {
            if binder::bind(args, &command.parameters).is_ok() {
                MatchOutcome::Matched
            } else {
                MatchOutcome::WrongTypes
            }
        }
    }
}

/// Run the matcher against every command in a menu.
///
/// Returns all non-[`MatchOutcome::Miss`] outcomes so the caller can surface
/// arity and type diagnostics even when nothing fully matched. Identifier
/// uniqueness within a menu is enforced at registration, so at most one
/// entry can be [`MatchOutcome::Matched`].
#[must_use]
pub fn match_menu<'tree, H>(
    tokens: &[&str],
    commands: &'tree [Command<H>],
) -> Vec<(&'tree Command<H>, MatchOutcome)> {
    commands
        .iter()
        .map(|command| (command, match_tokens(tokens, command)))
        .filter(|(_, outcome)| *outcome != MatchOutcome::Miss)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::command::{params, Command, ParamKind};

    fn greet() -> Command<()> {
        Command::leaf(
            "greet",
            "test",
            params(&[("name", ParamKind::String)]),
            |_, _| Ok(()),
        )
    }

    fn wait() -> Command<()> {
        Command::leaf(
            "wait",
            "test",
            params(&[("seconds", ParamKind::Integer)]),
            |_, _| Ok(()),
        )
    }

    #[test]
    fn test_empty_tokens_miss() {
        assert_eq!(match_tokens(&[], &greet()), MatchOutcome::Miss);
    }

    #[test]
    fn test_unknown_identifier_misses() {
        assert_eq!(match_tokens(&["shout", "Ada"], &greet()), MatchOutcome::Miss);
    }

    #[test]
    fn test_identifier_comparison_is_case_insensitive() {
        assert_eq!(match_tokens(&["GREET", "Ada"], &greet()), MatchOutcome::Matched);
    }

    #[test]
    fn test_missing_parameter() {
        assert_eq!(match_tokens(&["greet"], &greet()), MatchOutcome::MissingParameter);
    }

    #[test]
    fn test_too_many_parameters() {
        assert_eq!(
            match_tokens(&["greet", "Ada", "Lovelace"], &greet()),
            MatchOutcome::TooManyParameters
        );
    }

    #[test]
    fn test_wrong_types() {
        assert_eq!(match_tokens(&["wait", "soon"], &wait()), MatchOutcome::WrongTypes);
    }

    #[test]
    fn test_matched() {
        assert_eq!(match_tokens(&["wait", "5"], &wait()), MatchOutcome::Matched);
    }

    #[test]
    fn test_match_menu_filters_misses() {
        let menu = vec![greet(), wait()];
        let outcomes = match_menu(&["wait", "soon"], &menu);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0.identifier, "wait");
        assert_eq!(outcomes[0].1, MatchOutcome::WrongTypes);
    }

    #[test]
    fn test_match_menu_empty_when_nothing_hits() {
        let menu = vec![greet(), wait()];
        assert!(match_menu(&["quit"], &menu).is_empty());
    }
}
