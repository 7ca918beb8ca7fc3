//! Error events and the sinks that receive them.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

/// Free-form structured context attached to an event.
pub type ErrorContext = BTreeMap<String, serde_json::Value>;

/// Severity of a captured event or breadcrumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Info,
    Warning,
    Error,
}

/// A captured error or message, ready for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    pub event_id: Uuid,
    pub level: Level,
    pub message: String,
    /// `source()` chain of a captured error, outermost first.
    pub causes: Vec<String>,
    pub context: ErrorContext,
    pub environment: Option<String>,
    pub release: Option<String>,
}

/// A trail entry recorded ahead of an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub category: String,
    pub message: String,
    pub level: Level,
    pub data: ErrorContext,
}

impl Breadcrumb {
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
            level: Level::Info,
            data: ErrorContext::new(),
        }
    }
}

/// The user an event is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserContext {
    pub id: String,
    pub email: Option<String>,
    pub username: Option<String>,
}

/// A destination for error events (an error-tracking service, a log, ...).
///
/// Installed by the host application; the tracker works without one.
pub trait ErrorReporter: Send + Sync {
    fn capture_event(&self, event: &ErrorEvent);

    fn add_breadcrumb(&self, _breadcrumb: &Breadcrumb) {}

    fn set_user(&self, _user: Option<&UserContext>) {}
}

/// Reporter that writes events to the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn capture_event(&self, event: &ErrorEvent) {
        let context = serde_json::to_string(&event.context).unwrap_or_default();
        match event.level {
            Level::Error => tracing::error!(
                event_id = %event.event_id,
                causes = ?event.causes,
                context = %context,
                environment = event.environment.as_deref(),
                "{}", event.message
            ),
            Level::Warning => tracing::warn!(
                event_id = %event.event_id,
                context = %context,
                "{}", event.message
            ),
            Level::Info => tracing::info!(
                event_id = %event.event_id,
                context = %context,
                "{}", event.message
            ),
        }
    }

    fn add_breadcrumb(&self, breadcrumb: &Breadcrumb) {
        tracing::debug!(
            category = %breadcrumb.category,
            level = ?breadcrumb.level,
            "breadcrumb: {}", breadcrumb.message
        );
    }

    fn set_user(&self, user: Option<&UserContext>) {
        tracing::debug!(user_id = user.map(|u| u.id.as_str()), "User context set");
    }
}
