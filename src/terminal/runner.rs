use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::{execute, queue, terminal};
use log::debug;

use crate::binder;
use crate::commands::command::Command;
use crate::commands::menu::MenuState;
use crate::config_file::RunnerConfig;
use crate::dispatch::{self, Activator};
use crate::matcher::{self, MatchOutcome};
use crate::terminal::render;
use crate::tokenizer;
use crate::CommandTree;

/// What the loop should do after one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Exit,
}

/// Interactive runner: renders the active menu, reads input lines, and
/// dispatches matched commands.
///
/// The identifiers `help`, `back` and `exit` are handled by the loop itself
/// and shadow registered commands of the same name.
pub struct Runner<'tree, A: Activator> {
    config: RunnerConfig,
    menu: MenuState<'tree, A::Handler>,
    activator: A,
    color: bool,
}

impl<'tree, A: Activator> Runner<'tree, A> {
    #[must_use]
    pub fn new(tree: &'tree CommandTree<A::Handler>, activator: A, config: RunnerConfig) -> Self {
        Self {
            menu: MenuState::new(tree.root()),
            activator,
            color: io::stdout().is_terminal(),
            config,
        }
    }

    /// Force plain output regardless of terminal detection.
    pub fn disable_color(&mut self) {
        self.color = false;
    }

    /// Navigation state, exposed read-only for inspection.
    #[must_use]
    pub fn menu(&self) -> &MenuState<'tree, A::Handler> {
        &self.menu
    }

    /// Run the read-match-dispatch loop until `exit` or end of input.
    ///
    /// The terminal foreground color is restored on every exit path.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` when the terminal cannot be read or written.
    pub fn run(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        if self.color {
            execute!(out, terminal::SetTitle(self.config.title.as_str()))?;
        }
        let result = self.run_loop(&mut out);
        if self.color {
            let _ = execute!(out, ResetColor);
        }
        result
    }

    fn run_loop(&mut self, out: &mut impl Write) -> io::Result<()> {
        let stdin = io::stdin();
        loop {
            self.draw_menu(out)?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                debug!("end of input");
                return Ok(());
            }
            writeln!(out)?;
            if self.handle_line(out, &line)? == LineOutcome::Exit {
                return Ok(());
            }
        }
    }

    fn draw_menu(&self, out: &mut impl Write) -> io::Result<()> {
        self.set_color(out, self.config.terminal_color)?;
        let width = terminal::size().map_or(80, |(w, _)| usize::from(w));
        writeln!(out, "{}", "-".repeat(width))?;
        writeln!(out, "{}", render::render_menu(self.menu.active()))?;
        write!(out, "{} ", self.config.prompt)?;
        out.flush()
    }

    fn handle_line(&mut self, out: &mut impl Write, line: &str) -> io::Result<LineOutcome> {
        let tokens = tokenizer::tokenize(line);
        let Some(first) = tokens.first().copied() else {
            self.report_error(out, "Please provide a command")?;
            return Ok(LineOutcome::Continue);
        };
        if first.eq_ignore_ascii_case("exit") {
            debug!("exit requested");
            return Ok(LineOutcome::Exit);
        }
        if first.eq_ignore_ascii_case("back") {
            if !self.menu.back() {
                self.report_error(out, "Already at the root menu")?;
            }
            return Ok(LineOutcome::Continue);
        }
        if first.eq_ignore_ascii_case("help") {
            self.show_help(out, tokens.get(1).copied())?;
            return Ok(LineOutcome::Continue);
        }
        self.dispatch_tokens(out, &tokens)?;
        Ok(LineOutcome::Continue)
    }

    /// Match the line against every command in the active menu and report
    /// each non-miss outcome.
    fn dispatch_tokens(&mut self, out: &mut impl Write, tokens: &[&str]) -> io::Result<()> {
        let outcomes = matcher::match_menu(tokens, self.menu.active());
        if outcomes.is_empty() {
            return self.report_error(out, "Please provide a valid command");
        }
        for (command, outcome) in outcomes {
            match outcome {
                MatchOutcome::MissingParameter => self.report_error(
                    out,
                    &format!("Missing arguments, expected: {}", command.signature()),
                )?,
                MatchOutcome::TooManyParameters => self.report_error(
                    out,
                    &format!("Too many arguments, expected: {}", command.signature()),
                )?,
                MatchOutcome::WrongTypes => {
                    if let Err(e) = binder::bind(&tokens[1..], &command.parameters) {
                        self.report_error(out, &e.to_string())?;
                    }
                }
                MatchOutcome::Matched => self.run_command(out, command, &tokens[1..])?,
                MatchOutcome::Miss => {}
            }
        }
        Ok(())
    }

    fn run_command(
        &mut self,
        out: &mut impl Write,
        command: &'tree Command<A::Handler>,
        args: &[&str],
    ) -> io::Result<()> {
        let bound = match binder::bind(args, &command.parameters) {
            Ok(values) => values,
            Err(e) => return self.report_error(out, &e.to_string()),
        };
        self.set_color(out, self.config.command_color)?;
        out.flush()?;
        let result = dispatch::execute(command, &bound, &mut self.activator, &mut self.menu);
        self.set_color(out, self.config.terminal_color)?;
        if let Err(e) = result {
            self.report_error(out, &e.to_string())?;
        }
        Ok(())
    }

    fn show_help(&self, out: &mut impl Write, identifier: Option<&str>) -> io::Result<()> {
        let Some(identifier) = identifier else {
            return self.report_error(out, "Usage: help <menu>");
        };
        match self.menu.find_by_identifier(identifier) {
            Some(command) => writeln!(out, "{}", render::render_help(command)),
            None => self.report_error(out, "Make sure you spelled the menu item correctly"),
        }
    }

    fn report_error(&self, out: &mut impl Write, message: &str) -> io::Result<()> {
        self.set_color(out, self.config.error_color)?;
        writeln!(out, "{message}")?;
        self.set_color(out, self.config.terminal_color)
    }

    fn set_color(&self, out: &mut impl Write, color: Color) -> io::Result<()> {
        if self.color {
            queue!(out, SetForegroundColor(color))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::ArgValue;
    use crate::commands::command::{params, Command, ParamKind};
    use crate::dispatch::SoleHandler;

    #[derive(Default)]
    struct State {
        greeted: Vec<String>,
    }

    fn demo_tree() -> CommandTree<State> {
        CommandTree::register(vec![
            Command::leaf(
                "greet",
                "demo",
                params(&[("name", ParamKind::String)]),
                |state: &mut State, args| match args {
                    [ArgValue::Str(name)] => {
                        state.greeted.push(name.clone());
                        Ok(())
                    }
                    _ => Err("argument mismatch".into()),
                },
            ),
            Command::leaf(
                "wait",
                "demo",
                params(&[("seconds", ParamKind::Integer)]),
                |_, _| Ok(()),
            ),
            Command::navigable(
                "settings",
                "demo",
                vec![],
                |_, _| Ok(()),
                vec![Command::leaf("reset", "demo", vec![], |_, _| Ok(()))],
            ),
        ])
        .unwrap()
    }

    fn runner(tree: &CommandTree<State>) -> Runner<'_, SoleHandler<State>> {
        let mut runner = Runner::new(tree, SoleHandler(State::default()), RunnerConfig::default());
        runner.disable_color();
        runner
    }

    fn feed(runner: &mut Runner<'_, SoleHandler<State>>, line: &str) -> (LineOutcome, String) {
        let mut out = Vec::new();
        let outcome = runner.handle_line(&mut out, line).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_exit_is_case_insensitive() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        assert_eq!(feed(&mut runner, "EXIT").0, LineOutcome::Exit);
        assert_eq!(feed(&mut runner, "exit").0, LineOutcome::Exit);
    }

    #[test]
    fn test_blank_line_is_reported_without_matching() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        let (outcome, output) = feed(&mut runner, "   ");
        assert_eq!(outcome, LineOutcome::Continue);
        assert_eq!(output, "Please provide a command\n");
    }

    #[test]
    fn test_unknown_command_is_reported() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        let (_, output) = feed(&mut runner, "shout Ada");
        assert_eq!(output, "Please provide a valid command\n");
    }

    #[test]
    fn test_matched_command_runs_the_action() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        feed(&mut runner, "greet Ada");
        assert_eq!(runner.activator.0.greeted, ["Ada"]);
    }

    #[test]
    fn test_arity_errors_print_the_signature() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        let (_, output) = feed(&mut runner, "greet");
        assert_eq!(output, "Missing arguments, expected: greet <name:string>\n");
        let (_, output) = feed(&mut runner, "greet Ada Lovelace");
        assert_eq!(output, "Too many arguments, expected: greet <name:string>\n");
    }

    #[test]
    fn test_type_error_names_the_offending_token() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        let (_, output) = feed(&mut runner, "wait soon");
        assert_eq!(
            output,
            "'soon' is not a valid integer for parameter 'seconds' (position 0)\n"
        );
    }

    #[test]
    fn test_navigable_command_changes_the_menu() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        feed(&mut runner, "settings");
        assert!(runner.menu().find_by_identifier("reset").is_some());
        feed(&mut runner, "back");
        assert!(runner.menu().find_by_identifier("greet").is_some());
    }

    #[test]
    fn test_back_at_root_is_reported() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        let (_, output) = feed(&mut runner, "back");
        assert_eq!(output, "Already at the root menu\n");
    }

    #[test]
    fn test_help_lists_submenu_commands() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        let (_, output) = feed(&mut runner, "help settings");
        assert_eq!(output, "MENU: settings\n  reset\n");
    }

    #[test]
    fn test_help_with_unknown_identifier() {
        let tree = demo_tree();
        let mut runner = runner(&tree);
        let (_, output) = feed(&mut runner, "help nothing");
        assert_eq!(output, "Make sure you spelled the menu item correctly\n");
    }
}
