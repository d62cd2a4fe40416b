use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;

use termenu::binder::ArgValue;
use termenu::commands::command::{params, Command, ParamKind};
use termenu::config_file;
use termenu::dispatch::{InvocationError, SoleHandler};
use termenu::terminal::Runner;
use termenu::CommandTree;

#[derive(Parser, Debug)]
#[command(name = "termenu", about = "Interactive demo console for the termenu framework")]
struct Cli {
    /// Path to config file (auto-detected if not specified)
    #[arg(short, long)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// State the demo commands operate on.
struct Console {
    verbose: bool,
    scale: f64,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            verbose: false,
            scale: 1.0,
        }
    }
}

fn build_commands() -> Vec<Command<Console>> {
    vec![
        Command::leaf(
            "greet",
            "console",
            params(&[("name", ParamKind::String)]),
            |console: &mut Console, args| match args {
                [ArgValue::Str(name)] => {
                    println!("Hello, {name}!");
                    if console.verbose {
                        println!("(current scale: {})", console.scale);
                    }
                    Ok(())
                }
                _ => Err(InvocationError::new("argument mismatch")),
            },
        ),
        Command::leaf(
            "add",
            "console",
            params(&[("a", ParamKind::Integer), ("b", ParamKind::Integer)]),
            |_, args| match args {
                [ArgValue::Int(a), ArgValue::Int(b)] => {
                    println!("{}", a + b);
                    Ok(())
                }
                _ => Err(InvocationError::new("argument mismatch")),
            },
        ),
        Command::leaf(
            "wait",
            "console",
            params(&[("seconds", ParamKind::Integer)]),
            |_, args| match args {
                [ArgValue::Int(seconds)] => {
                    let seconds = u64::try_from(*seconds)
                        .map_err(|_| InvocationError::new("seconds must not be negative"))?;
                    thread::sleep(Duration::from_secs(seconds));
                    Ok(())
                }
                _ => Err(InvocationError::new("argument mismatch")),
            },
        ),
        Command::navigable(
            "settings",
            "console",
            vec![],
            |_, _| Ok(()),
            vec![
                Command::leaf("show", "console", vec![], |console: &mut Console, _| {
                    println!("verbose = {}", console.verbose);
                    println!("scale   = {}", console.scale);
                    Ok(())
                }),
                Command::leaf(
                    "verbose",
                    "console",
                    params(&[("enabled", ParamKind::Boolean)]),
                    |console: &mut Console, args| match args {
                        [ArgValue::Bool(enabled)] => {
                            console.verbose = *enabled;
                            Ok(())
                        }
                        _ => Err(InvocationError::new("argument mismatch")),
                    },
                ),
                Command::leaf(
                    "scale",
                    "console",
                    params(&[("factor", ParamKind::Float)]),
                    |console: &mut Console, args| match args {
                        [ArgValue::Float(factor)] if *factor > 0.0 => {
                            console.scale = *factor;
                            Ok(())
                        }
                        [ArgValue::Float(factor)] => Err(InvocationError::new(format!(
                            "scale factor must be positive, got {factor}"
                        ))),
                        _ => Err(InvocationError::new("argument mismatch")),
                    },
                ),
                Command::leaf("reset", "console", vec![], |console: &mut Console, _| {
                    *console = Console::default();
                    println!("settings restored to defaults");
                    Ok(())
                }),
            ],
        ),
    ]
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config_file::load_config(cli.config.as_deref())?;
    let tree = CommandTree::register(build_commands())?;
    let mut runner = Runner::new(&tree, SoleHandler(Console::default()), config);
    if cli.no_color {
        runner.disable_color();
    }
    runner.run()?;
    Ok(())
}
