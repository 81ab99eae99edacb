// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive demo of the line editor. Every submitted line is echoed back.
//! - Type `menu` to pick a new prompt from a list (up, down, return, escape).
//! - Type `history` to print what has been recorded so far.
//! - Press `ctrl+c` or `ctrl+d`, or type `exit`, to quit.
//!
//! For more information on how to use CLAP, here are some resources:
//! 1. [Tutorial](https://developerlife.com/2023/09/17/tuify-clap/)
//! 2. [Video](https://youtu.be/lzMYDA6St0s)

use clap::{Args, Parser};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use miette::IntoDiagnostic;
use r3bl_readline::{DEFAULT_PROMPT, EOL, InputDevice, OutputDevice, Readline,
                    ReadlineEvent, ReadlineOptions, RenderStrategy,
                    try_initialize_logging_global};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(bin_name = "readline_demo")]
#[command(about = "Try out the line editor: history with up / down, `menu` to change the prompt")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(false))]
pub struct CLIArg {
    #[arg(long, short = 'p', default_value = DEFAULT_PROMPT, help = "Prompt to display")]
    pub prompt: String,

    #[arg(
        long,
        default_value_t = 100,
        help = "How long a `\\n` after a `\\r` still counts as one line ending (min 100)"
    )]
    pub crlf_delay_ms: u64,

    #[arg(long, help = "Repaint on a single row, instead of tracking line wrapping")]
    pub single_row: bool,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `readline_log.txt` for debugging"
    )]
    pub enable_logging: bool,
}

const PROMPT_CHOICES: [&str; 4] = ["> ", "$ ", "λ ", "readline> "];

/// Raw mode is on for as long as this is alive.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> miette::Result<Self> {
        enable_raw_mode().into_diagnostic()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) { disable_raw_mode().ok(); }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    let should_log = cli_arg.global_options.enable_logging;

    should_log.then(|| {
        try_initialize_logging_global(tracing_core::LevelFilter::DEBUG).ok();
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    });

    let render_strategy = if cli_arg.single_row {
        RenderStrategy::SingleRow
    } else {
        RenderStrategy::WrapAware
    };

    let options = ReadlineOptions::default()
        .with_prompt(cli_arg.prompt)
        .with_crlf_delay(Duration::from_millis(cli_arg.crlf_delay_ms))
        .with_render_strategy(render_strategy)
        .with_output_device(OutputDevice::new_stdout());

    let raw_mode_guard = RawModeGuard::new()?;
    let result = run_demo(options).await;
    drop(raw_mode_guard);

    should_log.then(|| {
        tracing::debug!(message = "Stop logging...", result = ?result);
    });

    result
}

async fn run_demo(options: ReadlineOptions) -> miette::Result<()> {
    let (mut readline, mut receiver) = Readline::new(options);
    let mut input_device = InputDevice::new_event_stream();

    readline.prompt().into_diagnostic()?;

    while !readline.is_closed() {
        match input_device.next_input().await {
            Some(input) => readline.apply_input(input).into_diagnostic()?,
            None => readline.close().into_diagnostic()?,
        }

        for event in receiver.drain() {
            handle_event(&mut readline, event)?;
        }
    }

    readline.write(EOL).into_diagnostic()?;

    Ok(())
}

fn handle_event(readline: &mut Readline, event: ReadlineEvent) -> miette::Result<()> {
    match event {
        ReadlineEvent::Line(line) => match line.trim() {
            "exit" => readline.close().into_diagnostic()?,
            "menu" => {
                let choices = PROMPT_CHOICES.iter().map(ToString::to_string).collect();
                readline.show_options(Some(choices)).into_diagnostic()?;
            }
            "history" => {
                for (index, entry) in readline.history().entries.iter().enumerate() {
                    readline.write(format!("{index}: {entry}{EOL}")).into_diagnostic()?;
                }
                readline.prompt().into_diagnostic()?;
            }
            _ => {
                readline.write(format!("echo: {line}{EOL}")).into_diagnostic()?;
                readline.prompt().into_diagnostic()?;
            }
        },
        ReadlineEvent::History(history) => {
            tracing::debug!(message = "History updated", len = history.len());
        }
        ReadlineEvent::OptionSelected(prompt) => {
            readline.set_prompt(prompt).into_diagnostic()?;
        }
    }
    Ok(())
}
