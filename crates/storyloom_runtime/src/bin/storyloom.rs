//! Storyloom CLI entry point.

use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use storyloom_engine::{Engine, LineEditor, Outcome, Session};
use storyloom_host::{LuaHost, NoScript, ScriptHost};
use storyloom_runtime::config::DEFAULT_CONFIG_PATH;
use storyloom_runtime::{
    ConsolePresenter, LoggedAudio, RuntimeConfig, RustylineEditor, StdinEditor, init_logging,
};
use storyloom_storage::{Story, load_story_file};
use tracing::{debug, info};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    config: Option<PathBuf>,
    story: Option<PathBuf>,
    script: Option<PathBuf>,
    batch_mode: bool,
    no_color: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--no-color" => config.no_color = true,
            "-c" | "--config" => config.config = Some(path_value(&arg, args.next())?),
            "--story" => config.story = Some(path_value(&arg, args.next())?),
            "--script" => config.script = Some(path_value(&arg, args.next())?),
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {other}").into());
            }
            path => config.story = Some(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn path_value(flag: &str, value: Option<String>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| format!("{flag} requires a path").into())
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("storyloom {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load_required(path)?,
        None => RuntimeConfig::load(DEFAULT_CONFIG_PATH)?,
    };
    if let Some(story) = cli.story {
        config.story = story;
    }
    let script_required = cli.script.is_some();
    if let Some(script) = cli.script {
        config.script = script;
    }
    if cli.no_color {
        config.color = false;
    }

    init_logging(config.log_filter.as_deref())?;

    let story = load_story_file(&config.story)?;
    let outcome = if script_required || config.script.is_file() {
        let script = LuaHost::from_file(&config.script)?;
        play(story, script, &config, cli.batch_mode)
    } else {
        info!(path = %config.script.display(), "no script file, running without hooks");
        play(story, NoScript, &config, cli.batch_mode)
    };

    match outcome {
        Ok(outcome) => {
            info!(node = %outcome.node(), finished = outcome.is_finished(), "goodbye");
            Ok(())
        }
        Err(err) => {
            debug!(?err, "session aborted");
            Err(err.into())
        }
    }
}

fn play<S: ScriptHost>(
    story: Story,
    script: S,
    config: &RuntimeConfig,
    batch_mode: bool,
) -> storyloom_foundation::Result<Outcome> {
    let mut presenter = ConsolePresenter::new(io::stdout())
        .with_color(config.color)
        .with_divider(config.messages.separator.clone());
    let mut audio = LoggedAudio::new(&config.sound_dir, config.sound_extension.clone());
    let mut input: Box<dyn LineEditor> = if batch_mode {
        Box::new(StdinEditor::stdin())
    } else {
        Box::new(RustylineEditor::new(config.color)?)
    };

    let mut session = Session::new(story, script);
    Engine::new(&mut presenter, &mut audio, input.as_mut())
        .with_config(
            config
                .engine_config()
                .with_pause_at_end(config.pause_at_end && !batch_mode),
        )
        .run(&mut session)
}

fn print_help() {
    println!(
        "\x1b[1mStoryloom\x1b[0m - Scriptable branching-narrative runtime

\x1b[1mUSAGE:\x1b[0m
    storyloom [OPTIONS] [STORY]

\x1b[1mARGUMENTS:\x1b[0m
    [STORY]    Story definition to play (default: data/instance.json)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    -c, --config PATH    Read settings from PATH (default: storyloom.toml)
        --story PATH     Story definition to play
        --script PATH    Lua script with the story's hooks
    -b, --batch          Read choices as plain lines from stdin
        --no-color       Disable ANSI colors

\x1b[1mEXAMPLES:\x1b[0m
    storyloom                              Play data/instance.json with data/script.lua
    storyloom cave.json --script cave.lua  Play a specific story
    printf '1\\n2\\n' | storyloom -b         Play with scripted choices

Diagnostics go to stderr; set RUST_LOG (e.g. RUST_LOG=storyloom=debug) to see more."
    );
}
