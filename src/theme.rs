use crossterm::style::Color;

/// Default foreground while the runner owns the screen
pub const TERMINAL: Color = Color::Grey;
/// Default foreground while a command action is running
pub const COMMAND: Color = Color::White;
/// Default foreground for user-facing error lines
pub const ERROR: Color = Color::Red;
