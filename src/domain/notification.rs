use std::fmt;
use std::time::Duration;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
    Confirm,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Confirm => "confirm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionVariant {
    Primary,
    Secondary,
    Danger,
}

impl ActionVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionVariant::Primary => "primary",
            ActionVariant::Secondary => "secondary",
            ActionVariant::Danger => "danger",
        }
    }
}

pub type ActionCallback = Box<dyn FnOnce() + Send + 'static>;

pub struct NotificationAction {
    pub label: String,
    pub variant: ActionVariant,
    pub(crate) callback: Option<ActionCallback>,
}

impl NotificationAction {
    pub fn new(
        label: impl Into<String>,
        variant: ActionVariant,
        callback: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            variant,
            callback: Some(Box::new(callback)),
        }
    }
}

impl fmt::Debug for NotificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationAction")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    /// `None` means the notification stays until removed or acted on.
    pub duration: Option<Duration>,
    pub actions: Vec<NotificationAction>,
}

/// Cloneable snapshot of a queued notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationView {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
    pub duration: Option<Duration>,
    pub actions: Vec<(String, ActionVariant)>,
}

impl From<&Notification> for NotificationView {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id,
            message: n.message.clone(),
            severity: n.severity,
            duration: n.duration,
            actions: n
                .actions
                .iter()
                .map(|a| (a.label.clone(), a.variant))
                .collect(),
        }
    }
}
