//! View state for rendering.
//!
//! Groups the state the renderer reads (scroll, status line, options) so the
//! `App` keeps it apart from the session it drives.

use super::{TranscriptScroll, UiOptions};

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub scroll: TranscriptScroll,
    pub status: Option<(StatusKind, String)>,
    pub ui_options: UiOptions,
}

impl ViewState {
    #[must_use]
    pub fn new(ui_options: UiOptions) -> Self {
        Self {
            ui_options,
            ..Self::default()
        }
    }
}
