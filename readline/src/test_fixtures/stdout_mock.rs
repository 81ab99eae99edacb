// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Size, StdMutex, TerminalOutput};
use std::{io::{Error, Result, Write},
          sync::Arc};
use strip_ansi_escapes::strip;

/// You can safely clone this struct, since it only contains [`Arc`]s. The inner `buffer`
/// and `size` are not cloned, so every clone sees the same output, and a size change
/// made through one clone is reported by all of them.
///
/// The main constructors are:
/// - [`StdoutMock::default`], which doesn't know its size (like a pipe)
/// - [`StdoutMock::with_size`]
/// - [`super::OutputDeviceExt::new_mock()`]
#[derive(Debug, Clone, Default)]
pub struct StdoutMock {
    pub buffer: Arc<StdMutex<Vec<u8>>>,
    pub size: Arc<StdMutex<Option<Size>>>,
}

impl StdoutMock {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_size(self, size: Size) -> Self {
        self.set_size(Some(size));
        self
    }

    /// Simulate the terminal being resized.
    pub fn set_size(&self, size: Option<Size>) {
        if let Ok(mut it) = self.size.lock() {
            *it = size;
        }
    }
}

impl StdoutMock {
    #[must_use]
    pub fn get_copy_of_buffer(&self) -> Vec<u8> {
        self.buffer.lock().map(|it| it.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn get_copy_of_buffer_as_string(&self) -> String {
        String::from_utf8_lossy(&self.get_copy_of_buffer()).into_owned()
    }

    #[must_use]
    pub fn get_copy_of_buffer_as_string_strip_ansi(&self) -> String {
        String::from_utf8_lossy(&strip(self.get_copy_of_buffer())).into_owned()
    }

    /// Forget everything written so far.
    pub fn clear(&self) {
        if let Ok(mut it) = self.buffer.lock() {
            it.clear();
        }
    }
}

impl Write for StdoutMock {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| Error::other("stdout mock lock is poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}

impl TerminalOutput for StdoutMock {
    fn size(&self) -> Option<Size> { self.size.lock().ok().and_then(|it| *it) }
}
