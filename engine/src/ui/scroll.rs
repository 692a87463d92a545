//! Scroll state for the transcript view.

/// Lines moved by a single scroll step.
const SCROLL_STEP: u16 = 3;

/// Scroll position for the transcript view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollState {
    /// Always keep the newest content visible.
    #[default]
    AutoBottom,
    /// Manual scroll offset from the top of the rendered transcript.
    Manual { offset_from_top: u16 },
}

/// Scroll position plus the limits learned from the last frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptScroll {
    state: ScrollState,
    /// Maximum offset (content height - viewport height).
    max: u16,
    viewport: u16,
}

impl TranscriptScroll {
    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Called by the renderer once the wrapped content height is known.
    pub fn update_limits(&mut self, max: u16, viewport: u16) {
        self.max = max;
        self.viewport = viewport;

        if let ScrollState::Manual { offset_from_top } = self.state
            && offset_from_top >= max
        {
            self.state = ScrollState::AutoBottom;
        }
    }

    #[must_use]
    pub fn offset_from_top(&self) -> u16 {
        match self.state {
            ScrollState::AutoBottom => self.max,
            ScrollState::Manual { offset_from_top } => offset_from_top.min(self.max),
        }
    }

    pub fn up(&mut self) {
        self.up_by(SCROLL_STEP);
    }

    pub fn down(&mut self) {
        self.down_by(SCROLL_STEP);
    }

    pub fn page_up(&mut self) {
        self.up_by(self.page());
    }

    pub fn page_down(&mut self) {
        self.down_by(self.page());
    }

    pub fn to_top(&mut self) {
        self.state = ScrollState::Manual { offset_from_top: 0 };
    }

    /// Jump to bottom and re-enable auto-scroll.
    pub fn to_bottom(&mut self) {
        self.state = ScrollState::AutoBottom;
    }

    fn page(&self) -> u16 {
        self.viewport.saturating_sub(1).max(SCROLL_STEP)
    }

    fn up_by(&mut self, lines: u16) {
        let from = self.offset_from_top();
        self.state = ScrollState::Manual {
            offset_from_top: from.saturating_sub(lines),
        };
    }

    fn down_by(&mut self, lines: u16) {
        let ScrollState::Manual { offset_from_top } = self.state else {
            return;
        };

        let new_offset = offset_from_top.saturating_add(lines);
        self.state = if new_offset >= self.max {
            ScrollState::AutoBottom
        } else {
            ScrollState::Manual {
                offset_from_top: new_offset,
            }
        };
    }
}
