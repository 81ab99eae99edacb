// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod choice;
pub mod history;
pub mod key_event;
pub mod key_interpreter;
pub mod line_state;
pub mod readline;
pub mod readline_constants;
pub mod readline_event;
pub mod readline_options;
pub mod render;

// Re-export.
pub use choice::*;
pub use history::*;
pub use key_event::*;
pub use key_interpreter::*;
pub use line_state::*;
pub use readline::*;
pub use readline_constants::*;
pub use readline_event::*;
pub use readline_options::*;
pub use render::*;
