use std::time::Duration;

use crate::error::{Error, Result};
use crate::transcript::TranscriptResult;
use crate::validate::FileMetadata;

/// Delay before the scroll-to-result signal fires, giving layout time to
/// settle after the result panels mount.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// The view's current phase. Exactly one is active at a time.
///
/// There is deliberately no `Failed` variant: a failed upload clears to a
/// clean `Idle` and surfaces the error only as a transient notice, so stale
/// data is never left on screen behind an error banner.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing in flight. `staged` holds the selected-but-unsubmitted file.
    Idle { staged: Option<FileMetadata> },

    /// An upload is in flight. `percent` tracks bytes-sent progress.
    Uploading { percent: u8 },

    /// A result arrived and is on display.
    Succeeded { result: TranscriptResult },
}

/// A one-shot request to scroll the result into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// How long the host should wait before scrolling.
    pub settle_delay: Duration,
}

/// Long-lived holder of [`ViewState`] with the transitions the product
/// allows. Every state is re-enterable; the controller lives for the whole
/// session.
#[derive(Debug)]
pub struct ViewController {
    state: ViewState,
    scroll_pending: bool,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle { staged: None },
            scroll_pending: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Stage a newly selected file.
    ///
    /// Allowed from any state: selecting a file while results are on display
    /// implicitly returns to the staged sub-state of `Idle`, clearing the
    /// prior result.
    pub fn stage_file(&mut self, file: FileMetadata) {
        self.state = ViewState::Idle { staged: Some(file) };
        self.scroll_pending = false;
    }

    /// The staged file, if the view is idle with one selected.
    pub fn staged_file(&self) -> Option<&FileMetadata> {
        match &self.state {
            ViewState::Idle { staged } => staged.as_ref(),
            _ => None,
        }
    }

    /// Drop the staged file without touching anything else in flight.
    pub fn clear_staged(&mut self) {
        if let ViewState::Idle { staged } = &mut self.state {
            *staged = None;
        }
    }

    /// Enter `Uploading`, clearing any prior result.
    ///
    /// Rejected while an upload is already in flight: one upload at a time
    /// is an invariant here, not just a disabled button.
    pub fn begin_upload(&mut self) -> Result<()> {
        match &self.state {
            ViewState::Uploading { .. } => Err(Error::UploadInFlight),
            ViewState::Idle { staged: None } => {
                Err(Error::msg("no file is staged for upload"))
            }
            _ => {
                self.state = ViewState::Uploading { percent: 0 };
                self.scroll_pending = false;
                Ok(())
            }
        }
    }

    /// Record transfer progress.
    ///
    /// Values are clamped to 0..=100 and never decrease; callbacks arriving
    /// outside `Uploading` are ignored (the transfer already resolved).
    pub fn set_progress(&mut self, percent: u8) {
        if let ViewState::Uploading { percent: current } = &mut self.state {
            *current = (*current).max(percent.min(100));
        }
    }

    /// Current progress while uploading.
    pub fn progress(&self) -> Option<u8> {
        match &self.state {
            ViewState::Uploading { percent } => Some(*percent),
            _ => None,
        }
    }

    /// Enter `Succeeded` with the received result.
    ///
    /// Progress is forced to completion (the transfer may resolve before the
    /// last callback reaches 100) and a one-shot scroll request is armed.
    pub fn succeed(&mut self, result: TranscriptResult) {
        self.set_progress(100);
        self.state = ViewState::Succeeded { result };
        self.scroll_pending = true;
    }

    /// Clear back to a staged-file-less `Idle` after a failure.
    pub fn fail(&mut self) {
        self.reset();
    }

    /// Explicit reset: new upload or manual clear.
    pub fn reset(&mut self) {
        self.state = ViewState::Idle { staged: None };
        self.scroll_pending = false;
    }

    /// The result on display, if any.
    pub fn result(&self) -> Option<&TranscriptResult> {
        match &self.state {
            ViewState::Succeeded { result } => Some(result),
            _ => None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.state, ViewState::Uploading { .. })
    }

    /// Take the pending scroll request, if one is armed.
    ///
    /// Fires exactly once per transition into `Succeeded`.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        if self.scroll_pending {
            self.scroll_pending = false;
            Some(ScrollRequest {
                settle_delay: SCROLL_SETTLE_DELAY,
            })
        } else {
            None
        }
    }
}
