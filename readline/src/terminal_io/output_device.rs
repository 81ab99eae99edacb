// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{SafeTerminalOutput, Size, StdMutex};
use std::{fmt::{Debug, Formatter},
          io::{self, Stderr, Stdout, Write},
          sync::Arc};

/// Anything the editor can render into. Besides being a [`Write`] sink, an output may
/// know the dimensions of the terminal it is attached to. Sinks that don't (pipes, files,
/// buffers) use the default implementation, and the editor falls back to
/// [`crate::DEFAULT_COLUMNS`] x [`crate::DEFAULT_ROWS`].
pub trait TerminalOutput: Write + Send {
    fn size(&self) -> Option<Size> { None }
}

impl TerminalOutput for Stdout {
    fn size(&self) -> Option<Size> { crossterm::terminal::size().ok().map(Size::from) }
}

impl TerminalOutput for Stderr {
    fn size(&self) -> Option<Size> { crossterm::terminal::size().ok().map(Size::from) }
}

impl TerminalOutput for Vec<u8> {}

/// Shared handle to the output collaborator. You can safely clone this struct, since it
/// only contains an [`Arc`]; clones write to the same underlying sink.
///
/// The main constructors are:
/// - [`OutputDevice::new_stdout`]
/// - [`OutputDevice::new`]
/// - [`crate::OutputDeviceExt::new_mock`]
#[derive(Clone)]
pub struct OutputDevice {
    pub resource: SafeTerminalOutput,
}

impl Debug for OutputDevice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputDevice").finish_non_exhaustive()
    }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self { Self::new(io::stdout()) }

    pub fn new(resource: impl TerminalOutput + 'static) -> Self {
        Self {
            resource: Arc::new(StdMutex::new(resource)),
        }
    }

    /// Writes all the `bytes` in one write call, then flushes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying sink fails, or if its lock is poisoned.
    pub fn write_all_and_flush(&self, bytes: &[u8]) -> io::Result<()> {
        let mut term = self
            .resource
            .lock()
            .map_err(|_| io::Error::other("output device lock is poisoned"))?;
        term.write_all(bytes)?;
        term.flush()
    }

    /// The size reported by the underlying sink, if it knows it (and its lock is not
    /// poisoned).
    #[must_use]
    pub fn size(&self) -> Option<Size> {
        self.resource.lock().ok().and_then(|term| term.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OutputDeviceExt, StdoutMock};

    #[test]
    fn test_write_all_and_flush_reaches_the_sink() {
        let (device, stdout_mock) = OutputDevice::new_mock();
        device.write_all_and_flush(b"hello").unwrap();
        device.write_all_and_flush(b" world").unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "hello world");
    }

    #[test]
    fn test_size_comes_from_the_sink() {
        let stdout_mock = StdoutMock::default().with_size(Size::new(20, 5));
        let device = OutputDevice::new(stdout_mock);
        assert_eq!(device.size(), Some(Size::new(20, 5)));
    }

    #[test]
    fn test_plain_buffer_has_no_size() {
        let device = OutputDevice::new(Vec::<u8>::new());
        assert_eq!(device.size(), None);
    }
}
