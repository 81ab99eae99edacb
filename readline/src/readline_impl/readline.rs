// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BoxedKeyDecoder, ChoiceOutcome, ChoiceState, EditCommand, History,
            InputDevice, KeyEvent, LineState, OutputDevice, ReadlineEvent, ReadlineInput,
            ReadlineOptions, ReadlineReceiver, RenderStrategy, Size, interpret, ok,
            terminal_io::ansi_escapes::hide_cursor};
use miette::Report as ErrorReport;
use std::{fmt::{Debug, Formatter},
          io,
          time::{Duration, Instant}};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// Error returned by the [`Readline`] operations that write to the output device. Key
/// handling itself never fails; only the output can.
#[derive(Debug, Error)]
pub enum ReadlineError {
    /// An internal I/O error occurred.
    #[error(transparent)]
    IO(#[from] io::Error),
}

/// For convenience, convert [`ErrorReport`] to [`ReadlineError`],
/// so that `into_diagnostic()` works.
impl From<ErrorReport> for ReadlineError {
    fn from(report: ErrorReport) -> Self {
        ReadlineError::IO(io::Error::other(format!("{report}")))
    }
}

/// The line editor. It owns the [`LineState`], the [`History`] and the [`ChoiceState`],
/// and is driven one input at a time:
/// - [`Readline::on_data`] for raw bytes (decoded by the configured
///   [`crate::KeyDecoder`]),
/// - [`Readline::apply_key`] for decoded keys,
/// - [`Readline::on_resize`] when the terminal is resized,
/// - or [`Readline::run`], which does all of the above with an [`InputDevice`].
///
/// Completed lines and other notifications go to the [`ReadlineReceiver`] returned by
/// [`Readline::new`]. After [`Readline::close`] every input is ignored, and the receiver
/// sees the end of output once it has drained the pending events.
pub struct Readline {
    pub line_state: LineState,
    pub history: History,
    pub choice: ChoiceState,
    pub crlf_delay: Duration,
    pub render_strategy: RenderStrategy,
    pub output_device: Option<OutputDevice>,
    pub key_decoder: Option<BoxedKeyDecoder>,
    /// [`None`] once the editor is closed.
    event_sender: Option<UnboundedSender<ReadlineEvent>>,
}

impl Debug for Readline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Readline")
            .field("line_state", &self.line_state)
            .field("history", &self.history)
            .field("choice", &self.choice)
            .field("crlf_delay", &self.crlf_delay)
            .field("render_strategy", &self.render_strategy)
            .field("output_device", &self.output_device)
            .field("key_decoder", &self.key_decoder.is_some())
            .field("is_closed", &self.is_closed())
            .finish()
    }
}

/// Same as [`Readline::new`].
#[must_use]
pub fn create_interface(options: ReadlineOptions) -> (Readline, ReadlineReceiver) {
    Readline::new(options)
}

impl Readline {
    /// The terminal size is read from the output device, falling back to
    /// [`crate::DEFAULT_COLUMNS`] x [`crate::DEFAULT_ROWS`]. Nothing is rendered until
    /// [`Readline::prompt`] is called.
    #[must_use]
    pub fn new(options: ReadlineOptions) -> (Self, ReadlineReceiver) {
        let crlf_delay = options.effective_crlf_delay();
        let ReadlineOptions {
            prompt,
            render_strategy,
            history_size_max,
            output_device,
            key_decoder,
            ..
        } = options;

        let term_size = output_device
            .as_ref()
            .and_then(OutputDevice::size)
            .unwrap_or_default();

        let (event_sender, event_receiver) = tokio::sync::mpsc::unbounded_channel();

        let readline = Self {
            line_state: LineState::new(prompt, term_size),
            history: History::new(history_size_max),
            choice: ChoiceState::default(),
            crlf_delay,
            render_strategy,
            output_device,
            key_decoder,
            event_sender: Some(event_sender),
        };

        (readline, ReadlineReceiver::new(event_receiver))
    }
}

/// Accessors.
impl Readline {
    #[must_use]
    pub fn line(&self) -> &str { &self.line_state.line }

    #[must_use]
    pub fn cursor(&self) -> usize { self.line_state.cursor }

    #[must_use]
    pub fn prompt_text(&self) -> &str { &self.line_state.prompt }

    #[must_use]
    pub fn history(&self) -> &History { &self.history }

    #[must_use]
    pub fn term_size(&self) -> Size { self.line_state.term_size }

    #[must_use]
    pub fn is_closed(&self) -> bool { self.event_sender.is_none() }

    #[must_use]
    pub fn is_choosing(&self) -> bool { self.choice.active }
}

/// Output.
impl Readline {
    /// Repaint the prompt line (or the option menu, while it is shown). The line and
    /// cursor are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn prompt(&mut self) -> Result<(), ReadlineError> {
        if self.choice.active {
            let output = self.choice.render(self.line_state.term_size.columns());
            return self.write(output);
        }
        let output = self.line_state.render_prompt(self.render_strategy);
        self.write(output)
    }

    /// Change the prompt and repaint.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> Result<(), ReadlineError> {
        self.line_state.prompt = prompt.into();
        if self.choice.active {
            return ok!();
        }
        self.prompt()
    }

    /// Pass `data` straight through to the output device, in a single write. Does
    /// nothing when there is no output device.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<(), ReadlineError> {
        let Some(output_device) = &self.output_device else {
            return ok!();
        };
        output_device.write_all_and_flush(data.as_ref())?;
        ok!()
    }

    /// Move below the prompt block and end the row with [`crate::EOL`], then reset the
    /// line and cursor. Returns the line as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn clear_line(&mut self) -> Result<String, ReadlineError> {
        let output = self.line_state.move_below_prompt_block(self.render_strategy);
        let line = self.line_state.take_line();
        self.write(output)?;
        ok!(line)
    }

    /// Stop handling input and signal the end of output to the [`ReadlineReceiver`].
    /// Calling this more than once has no further effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the option menu was shown and erasing it fails.
    pub fn close(&mut self) -> Result<(), ReadlineError> {
        if self.event_sender.take().is_none() {
            return ok!();
        }

        tracing::debug!(message = "Readline closed", line = ?self.line_state.line);

        self.line_state.take_line();
        self.line_state.pending_return = None;
        self.history.cursor = None;

        if self.choice.active {
            let output = self.choice.erase();
            self.choice.deactivate();
            self.write(output)?;
        }

        ok!()
    }

    /// With `Some` non empty list, open a menu below the prompt with the first option
    /// selected, and hide the terminal cursor. Up and down move the selection, return
    /// picks it (sending [`ReadlineEvent::OptionSelected`]), and escape closes the menu
    /// without picking anything. Either way the prompt is repainted afterwards.
    ///
    /// With [`None`] while the menu is open, draw it again with the current selection.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn show_options(&mut self, options: Option<Vec<String>>) -> Result<(), ReadlineError> {
        if self.is_closed() {
            return ok!();
        }

        let columns = self.line_state.term_size.columns();

        let Some(options) = options else {
            if self.choice.active {
                let output = self.choice.render(columns);
                return self.write(output);
            }
            tracing::trace!(message = "No options to show");
            return ok!();
        };

        if options.is_empty() {
            tracing::trace!(message = "Ignoring empty options");
            return ok!();
        }

        let mut acc = String::new();
        let prompt_rows_above = if self.choice.active {
            acc.push_str(&self.choice.erase());
            self.choice.prompt_rows_above
        } else {
            acc.push_str(&self.line_state.move_below_prompt_block(self.render_strategy));
            self.line_state.prompt_block_height(self.render_strategy)
        };

        tracing::debug!(message = "Showing options", options = ?options);

        self.choice.activate(options, prompt_rows_above);
        acc.push_str(&hide_cursor());
        acc.push_str(&self.choice.render(columns));
        self.write(acc)
    }

    fn leave_choice_mode(&mut self) -> Result<(), ReadlineError> {
        let mut acc = self.choice.erase();
        self.line_state.previous_rendered_rows = self.choice.prompt_rows_above;
        self.choice.deactivate();
        acc.push_str(&self.line_state.render_prompt(self.render_strategy));
        self.write(acc)
    }

    fn send(&self, event: ReadlineEvent) {
        let Some(event_sender) = &self.event_sender else {
            return;
        };
        if event_sender.send(event).is_err() {
            tracing::trace!(message = "Readline receiver dropped, event discarded");
        }
    }
}

/// Input.
impl Readline {
    /// Dispatch one item from an [`InputDevice`].
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn apply_input(&mut self, input: ReadlineInput) -> Result<(), ReadlineError> {
        match input {
            ReadlineInput::Data(bytes) => self.on_data(&bytes),
            ReadlineInput::Key(key) => self.apply_key(&key),
            ReadlineInput::Resize => self.on_resize(),
        }
    }

    /// Feed a chunk of raw bytes to the key decoder, and handle every key it produces.
    /// Chunks that don't complete a key change nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn on_data(&mut self, bytes: &[u8]) -> Result<(), ReadlineError> {
        if self.is_closed() {
            return ok!();
        }

        let Some(key_decoder) = self.key_decoder.as_mut() else {
            tracing::trace!(message = "No key decoder, raw input dropped", len = bytes.len());
            return ok!();
        };

        for key in key_decoder.decode(bytes) {
            self.apply_key(&key)?;
        }

        ok!()
    }

    /// Re-read the terminal size from the output device and repaint.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn on_resize(&mut self) -> Result<(), ReadlineError> {
        if self.is_closed() {
            return ok!();
        }

        self.line_state.term_size = self
            .output_device
            .as_ref()
            .and_then(OutputDevice::size)
            .unwrap_or_default();

        tracing::debug!(message = "Terminal resized", size = %self.line_state.term_size);

        self.prompt()
    }

    /// Handle one decoded key.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub fn apply_key(&mut self, key: &KeyEvent) -> Result<(), ReadlineError> {
        if self.is_closed() {
            tracing::trace!(message = "Readline closed, key ignored", key = ?key);
            return ok!();
        }

        if self.choice.active {
            return self.apply_key_to_choice(key);
        }

        let command = interpret(key);

        if !matches!(command, EditCommand::Submit { .. }) {
            self.line_state.pending_return = None;
        }

        if !command.is_history_navigation() {
            self.history.cursor = None;
        }

        match command {
            EditCommand::HistoryPrevious => self.history_previous(),
            EditCommand::HistoryNext => self.history_next(),
            EditCommand::Close => self.close(),
            EditCommand::Backspace => {
                if self.line_state.delete_before_cursor() {
                    self.prompt()?;
                }
                ok!()
            }
            EditCommand::Submit { linefeed } => self.submit(linefeed),
            EditCommand::MoveLeft => self.move_cursor(-1),
            EditCommand::MoveRight => self.move_cursor(1),
            EditCommand::Insert(text) => {
                self.line_state.insert_str(&text);
                self.prompt()
            }
            EditCommand::Ignore => {
                tracing::trace!(message = "Key ignored", key = ?key);
                ok!()
            }
        }
    }

    /// Drive the editor from `input_device` until it is closed. The end of the input
    /// stream closes the editor too.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    pub async fn run(&mut self, mut input_device: InputDevice) -> Result<(), ReadlineError> {
        while !self.is_closed() {
            match input_device.next_input().await {
                Some(input) => self.apply_input(input)?,
                None => {
                    tracing::debug!(message = "Input stream ended");
                    self.close()?;
                }
            }
        }
        ok!()
    }

    fn apply_key_to_choice(&mut self, key: &KeyEvent) -> Result<(), ReadlineError> {
        match self.choice.handle_key(key) {
            ChoiceOutcome::Redraw => {
                let output = self.choice.render(self.line_state.term_size.columns());
                self.write(output)
            }
            ChoiceOutcome::Selected(option) => {
                // A `\n` right behind this `\r` must not submit the line.
                self.line_state.pending_return = Some(Instant::now());
                tracing::debug!(message = "Option selected", option = ?option);
                self.leave_choice_mode()?;
                self.send(ReadlineEvent::OptionSelected(option));
                ok!()
            }
            ChoiceOutcome::Cancelled => {
                tracing::debug!(message = "Option selection cancelled");
                self.leave_choice_mode()
            }
            ChoiceOutcome::Ignored => {
                tracing::trace!(message = "Key ignored while choosing", key = ?key);
                ok!()
            }
        }
    }

    fn move_cursor(&mut self, delta: isize) -> Result<(), ReadlineError> {
        if self.line_state.move_cursor(delta) {
            self.prompt()?;
        }
        ok!()
    }

    /// A `linefeed` that arrives within `crlf_delay` of a `return` is the second half
    /// of a `\r\n` pair and is swallowed. Everything else submits the line, even when
    /// it is empty. Only non blank lines that differ from the most recent entry are
    /// recorded in history.
    fn submit(&mut self, linefeed: bool) -> Result<(), ReadlineError> {
        let now = Instant::now();

        if linefeed {
            let pending_return = self.line_state.pending_return.take();
            if pending_return.is_some_and(|it| now.duration_since(it) <= self.crlf_delay) {
                tracing::trace!(message = "Linefeed after return swallowed");
                return ok!();
            }
        } else {
            self.line_state.pending_return = Some(now);
        }

        let line = self.clear_line()?;

        tracing::debug!(message = "Line submitted", line = ?line);

        let is_new_entry =
            !line.trim().is_empty() && self.history.entries.front() != Some(&line);

        self.send(ReadlineEvent::Line(line.clone()));

        if is_new_entry {
            self.history.unshift(line);
            self.history.cursor = None;
            self.send(ReadlineEvent::History(self.history.to_vec()));
        }

        ok!()
    }

    /// Recall the next older entry. Does nothing when there is unsubmitted input that
    /// isn't from history, or when there is nothing older.
    fn history_previous(&mut self) -> Result<(), ReadlineError> {
        if self.history.cursor.is_none() && !self.line_state.line.is_empty() {
            return ok!();
        }

        let next_index = self.history.cursor.map_or(0, |it| it + 1);
        let Some(entry) = self.history.entries.get(next_index).cloned() else {
            return ok!();
        };

        self.history.cursor = Some(next_index);
        self.line_state.replace_line(entry);
        self.prompt()
    }

    /// Recall the next newer entry, or an empty line after the newest one.
    fn history_next(&mut self) -> Result<(), ReadlineError> {
        let Some(current_index) = self.history.cursor else {
            return ok!();
        };

        let line = match current_index.checked_sub(1) {
            Some(next_index) => {
                self.history.cursor = Some(next_index);
                self.history.entries.get(next_index).cloned().unwrap_or_default()
            }
            None => {
                self.history.cursor = None;
                String::new()
            }
        };

        self.line_state.replace_line(line);
        self.prompt()
    }
}
