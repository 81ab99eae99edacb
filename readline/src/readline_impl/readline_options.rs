// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BoxedKeyDecoder, DEFAULT_CRLF_DELAY, DEFAULT_PROMPT, HISTORY_SIZE_MAX,
            KeyDecoder, MIN_CRLF_DELAY, OutputDevice, RenderStrategy};
use std::{fmt::{Debug, Formatter},
          time::Duration};

/// Everything [`crate::Readline::new`] needs. Start from [`ReadlineOptions::default`]
/// and chain the `with_*` methods.
///
/// Without an output device nothing is rendered, which is handy in tests that only
/// care about the produced [`crate::ReadlineEvent`]s. Without a key decoder raw input
/// ([`crate::ReadlineInput::Data`]) is dropped, and only already decoded keys are
/// handled.
pub struct ReadlineOptions {
    pub prompt: String,
    pub crlf_delay: Duration,
    pub render_strategy: RenderStrategy,
    pub history_size_max: usize,
    pub output_device: Option<OutputDevice>,
    pub key_decoder: Option<BoxedKeyDecoder>,
}

impl Debug for ReadlineOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadlineOptions")
            .field("prompt", &self.prompt)
            .field("crlf_delay", &self.crlf_delay)
            .field("render_strategy", &self.render_strategy)
            .field("history_size_max", &self.history_size_max)
            .field("output_device", &self.output_device)
            .field("key_decoder", &self.key_decoder.is_some())
            .finish()
    }
}

impl Default for ReadlineOptions {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.into(),
            crlf_delay: DEFAULT_CRLF_DELAY,
            render_strategy: RenderStrategy::default(),
            history_size_max: HISTORY_SIZE_MAX,
            output_device: None,
            key_decoder: None,
        }
    }
}

impl ReadlineOptions {
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Delays shorter than [`MIN_CRLF_DELAY`] are raised to it.
    #[must_use]
    pub fn with_crlf_delay(mut self, crlf_delay: Duration) -> Self {
        self.crlf_delay = crlf_delay.max(MIN_CRLF_DELAY);
        self
    }

    #[must_use]
    pub fn with_render_strategy(mut self, render_strategy: RenderStrategy) -> Self {
        self.render_strategy = render_strategy;
        self
    }

    #[must_use]
    pub fn with_history_size_max(mut self, history_size_max: usize) -> Self {
        self.history_size_max = history_size_max;
        self
    }

    #[must_use]
    pub fn with_output_device(mut self, output_device: OutputDevice) -> Self {
        self.output_device = Some(output_device);
        self
    }

    #[must_use]
    pub fn with_key_decoder(mut self, key_decoder: impl KeyDecoder + 'static) -> Self {
        self.key_decoder = Some(Box::new(key_decoder));
        self
    }

    /// The configured delay, clamped. The field is public, so it may have been set
    /// directly to something shorter than [`MIN_CRLF_DELAY`].
    #[must_use]
    pub fn effective_crlf_delay(&self) -> Duration { self.crlf_delay.max(MIN_CRLF_DELAY) }
}
