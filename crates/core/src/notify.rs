//! Transient toast notifications.
//!
//! Every toast walks through its own lifecycle (slide in, stay, slide out,
//! gone) on its own timers. The list kept here is only the on-screen stack in
//! insertion order; there is no cap and no dedup.

use std::time::Duration;

use crate::config::timing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    /// Background colour as `0xRRGGBB`.
    pub fn color(self) -> u32 {
        match self {
            Severity::Success => 0x28a745,
            Severity::Error => 0xdc3545,
            Severity::Warning => 0xffc107,
            Severity::Info => 0x17a2b8,
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        let c = self.color();
        [(c >> 16) as u8, (c >> 8) as u8, c as u8]
    }
}

/// A request to show a toast, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub message: String,
    pub severity: Severity,
}

impl NotificationRequest {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStage {
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub stage: ToastStage,
}

/// What to do after a toast changed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStep {
    /// Advance this toast again after the delay.
    AdvanceAfter(Duration),
    /// The toast was removed.
    Removed,
}

#[derive(Debug, Default)]
pub struct Notifications {
    next_id: u64,
    active: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a toast on screen. Returns its id and when to advance it next.
    pub fn push(&mut self, request: NotificationRequest) -> (u64, Duration) {
        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(id, severity = ?request.severity, message = %request.message, "notify");
        self.active.push(Notification {
            id,
            message: request.message,
            severity: request.severity,
            stage: ToastStage::Entering,
        });
        (id, timing::TOAST_SLIDE)
    }

    /// Move a toast to its next stage. Unknown ids are already gone.
    pub fn advance(&mut self, id: u64) -> StageStep {
        let Some(pos) = self.active.iter().position(|n| n.id == id) else {
            return StageStep::Removed;
        };

        let toast = &mut self.active[pos];
        match toast.stage {
            ToastStage::Entering => {
                toast.stage = ToastStage::Shown;
                StageStep::AdvanceAfter(timing::TOAST_VISIBLE)
            }
            ToastStage::Shown => {
                toast.stage = ToastStage::Leaving;
                StageStep::AdvanceAfter(timing::TOAST_SLIDE)
            }
            ToastStage::Leaving => {
                self.active.remove(pos);
                StageStep::Removed
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_severity() {
        assert_eq!(Severity::Success.rgb(), [0x28, 0xa7, 0x45]);
        assert_eq!(Severity::Error.rgb(), [0xdc, 0x35, 0x45]);
        assert_eq!(Severity::Warning.rgb(), [0xff, 0xc1, 0x07]);
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn toast_lifecycle_removes_itself() {
        let mut toasts = Notifications::new();
        let (id, first) = toasts.push(NotificationRequest::new("hello", Severity::Info));
        assert_eq!(first, timing::TOAST_SLIDE);

        assert_eq!(
            toasts.advance(id),
            StageStep::AdvanceAfter(timing::TOAST_VISIBLE)
        );
        assert_eq!(toasts.iter().next().unwrap().stage, ToastStage::Shown);
        assert_eq!(toasts.advance(id), StageStep::AdvanceAfter(timing::TOAST_SLIDE));
        assert_eq!(toasts.iter().next().unwrap().stage, ToastStage::Leaving);
        assert_eq!(toasts.advance(id), StageStep::Removed);
        assert!(toasts.is_empty());
        assert_eq!(toasts.advance(id), StageStep::Removed);
    }

    #[test]
    fn toasts_stack_without_dedup() {
        let mut toasts = Notifications::new();
        for _ in 0..5 {
            toasts.push(NotificationRequest::new("Copy failed", Severity::Error));
        }
        assert_eq!(toasts.len(), 5);

        let ids: Vec<u64> = toasts.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
