use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::notification::{
    ActionVariant, Notification, NotificationAction, NotificationView, Severity,
};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

pub const CONFIRM_LABEL: &str = "Confirm";
pub const CANCEL_LABEL: &str = "Cancel";

/// Ordered queue of transient and action-bearing messages.
///
/// Notifications with a duration and no actions remove themselves once the
/// duration elapses. Notifications carrying actions stay until one of them is
/// invoked or they are removed by id. Timers run on the ambient tokio runtime.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: Arc<Mutex<Vec<Notification>>>,
    default_duration: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl NotificationQueue {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            default_duration,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a notification. A zero duration disables auto-dismiss, and any
    /// attached action disables it as well.
    pub fn enqueue(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
        actions: Vec<NotificationAction>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let duration = if actions.is_empty() && !duration.is_zero() {
            Some(duration)
        } else {
            None
        };
        let message = message.into();
        log::debug!("notification {} [{}] {}", id, severity.as_str(), message);

        self.lock().push(Notification {
            id,
            message,
            severity,
            duration,
            actions,
        });

        if let Some(duration) = duration {
            self.schedule_removal(id, duration);
        }
        id
    }

    fn schedule_removal(&self, id: Uuid, duration: Duration) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            log::warn!("no runtime to auto-dismiss notification {}", id);
            return;
        };
        let queue = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(duration).await;
            queue.remove(id);
        });
    }

    /// Enqueue with the configured default duration.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        self.enqueue(message, severity, self.default_duration, Vec::new())
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::Error)
    }

    pub fn warning(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::Warning)
    }

    pub fn info(&self, message: impl Into<String>) -> Uuid {
        self.notify(message, Severity::Info)
    }

    /// Ask the user to choose. The notification persists until "Cancel" or
    /// "Confirm" is invoked; each runs its callback and removes it.
    pub fn confirm(
        &self,
        message: impl Into<String>,
        on_confirm: impl FnOnce() + Send + 'static,
        on_cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
    ) -> Uuid {
        let actions = vec![
            NotificationAction::new(CANCEL_LABEL, ActionVariant::Secondary, move || {
                if let Some(on_cancel) = on_cancel {
                    on_cancel();
                }
            }),
            NotificationAction::new(CONFIRM_LABEL, ActionVariant::Danger, on_confirm),
        ];
        self.enqueue(message, Severity::Confirm, Duration::ZERO, actions)
    }

    /// Remove by id. Returns whether anything was removed.
    pub fn remove(&self, id: Uuid) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|n| n.id != id);
        before != entries.len()
    }

    /// Run the action labelled `label` on notification `id`, then drop the
    /// notification.
    pub fn invoke(&self, id: Uuid, label: &str) -> Result<(), DomainError> {
        let callback = {
            let mut entries = self.lock();
            let position = entries
                .iter()
                .position(|n| n.id == id)
                .ok_or_else(|| DomainError::NotFound(format!("notification {id}")))?;
            let action_index = entries
                .get(position)
                .and_then(|n| n.actions.iter().position(|a| a.label == label))
                .ok_or_else(|| DomainError::NotFound(format!("action '{label}'")))?;
            let mut notification = entries.remove(position);
            notification
                .actions
                .get_mut(action_index)
                .and_then(|a| a.callback.take())
        };
        if let Some(callback) = callback {
            callback();
        }
        Ok(())
    }

    pub fn list(&self) -> Vec<NotificationView> {
        self.lock().iter().map(NotificationView::from).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
