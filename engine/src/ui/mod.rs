//! UI-facing types for the engine.
//!
//! Input editing types live in `ctf_types::ui`; this module re-exports them
//! next to the engine's scroll and status state.

mod scroll;
mod view_state;

pub use scroll::{ScrollState, TranscriptScroll};
pub use view_state::{StatusKind, ViewState};

pub use ctf_types::ui::{DraftInput, InputHistory, NavOutcome, UiOptions};
