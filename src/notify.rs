use std::sync::Mutex;

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Loading,
}

/// A transient user-facing notification.
///
/// `replaces` carries an optional slot id so a long-running notice (the
/// upload spinner) can be upgraded in place by a later success or error
/// notice with the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub detail: String,
    pub replaces: Option<&'static str>,
}

impl Notice {
    pub fn success(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            detail: detail.into(),
            replaces: None,
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            detail: detail.into(),
            replaces: None,
        }
    }

    pub fn loading(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Loading,
            title: title.into(),
            detail: detail.into(),
            replaces: None,
        }
    }

    /// Target a notice slot so this notice replaces an earlier one.
    pub fn in_slot(mut self, slot: &'static str) -> Self {
        self.replaces = Some(slot);
        self
    }
}

/// The notification channel the engine emits through.
///
/// Modeled as an injected capability rather than a process-wide singleton so
/// hosts can route notices to their own toast system and tests can capture
/// them.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// A `Notifier` that forwards notices to `tracing`.
///
/// This is the default for headless hosts (the CLI layers its own output on
/// top of the same notices).
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => {
                tracing::info!(title = %notice.title, detail = %notice.detail, "notice")
            }
            NoticeKind::Error => {
                tracing::warn!(title = %notice.title, detail = %notice.detail, "notice")
            }
            NoticeKind::Loading => {
                tracing::info!(title = %notice.title, detail = %notice.detail, "notice (pending)")
            }
        }
    }
}

/// A `Notifier` that records every notice for later assertions.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything notified so far, in emission order.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }

    /// The most recent notice, if any.
    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .last()
            .cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
    }
}
