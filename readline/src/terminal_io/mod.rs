// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The collaborators the line editor talks to: where key input comes from, where
//! rendered output goes, and the escape sequences used to move the cursor around.

// Attach.
pub mod ansi_escapes;
pub mod input_device;
pub mod key_decoder;
pub mod output_device;
pub mod term_size;

// Re-export.
pub use input_device::*;
pub use key_decoder::*;
pub use output_device::*;
pub use term_size::*;
