//! Error tracker: applies configuration, then forwards to the reporter.

use std::sync::Arc;

use rand::Rng;
use uuid::Uuid;

use crate::config::schema::ErrorTrackingConfig;
use crate::reporting::reporter::{
    Breadcrumb, ErrorContext, ErrorEvent, ErrorReporter, Level, UserContext,
};

/// Entry point for capturing errors in the host application.
///
/// Built once at startup from an explicit config and an optional reporter;
/// clones share the same reporter.
#[derive(Clone)]
pub struct ErrorTracker {
    config: ErrorTrackingConfig,
    reporter: Option<Arc<dyn ErrorReporter>>,
}

impl ErrorTracker {
    pub fn new(config: ErrorTrackingConfig, reporter: Option<Arc<dyn ErrorReporter>>) -> Self {
        if config.enabled {
            tracing::info!(
                environment = config.environment.as_deref(),
                release = config.release.as_deref(),
                sample_rate = config.sample_rate,
                reporter = reporter.is_some(),
                "Error tracking enabled"
            );
        }
        Self { config, reporter }
    }

    /// A tracker that only logs locally.
    pub fn disabled() -> Self {
        Self::new(ErrorTrackingConfig::default(), None)
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &ErrorTrackingConfig {
        &self.config
    }

    fn active_reporter(&self) -> Option<&Arc<dyn ErrorReporter>> {
        if self.config.enabled {
            self.reporter.as_ref()
        } else {
            None
        }
    }

    fn sampled(&self) -> bool {
        let rate = self.config.sample_rate;
        if rate >= 1.0 {
            true
        } else if rate > 0.0 {
            rand::thread_rng().gen_bool(rate)
        } else {
            false
        }
    }

    fn dispatch(&self, event: ErrorEvent) -> Option<Uuid> {
        let reporter = self.active_reporter()?;
        if !self.sampled() {
            tracing::trace!(event_id = %event.event_id, "Event dropped by sampling");
            return None;
        }
        reporter.capture_event(&event);
        Some(event.event_id)
    }

    /// Report an error with its `source()` chain.
    ///
    /// Returns the event id when the event was handed to a reporter.
    pub fn capture_exception(
        &self,
        error: &(dyn std::error::Error + 'static),
        context: ErrorContext,
    ) -> Option<Uuid> {
        if !self.config.enabled {
            tracing::error!(error = %error, context = ?context, "Error (tracking disabled)");
            return None;
        }

        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        self.dispatch(ErrorEvent {
            event_id: Uuid::new_v4(),
            level: Level::Error,
            message: error.to_string(),
            causes,
            context,
            environment: self.config.environment.clone(),
            release: self.config.release.clone(),
        })
    }

    /// Report a non-error message.
    pub fn capture_message(
        &self,
        message: &str,
        level: Level,
        context: ErrorContext,
    ) -> Option<Uuid> {
        if !self.config.enabled {
            tracing::info!(
                level = ?level,
                context = ?context,
                "Message (tracking disabled): {}",
                message
            );
            return None;
        }

        self.dispatch(ErrorEvent {
            event_id: Uuid::new_v4(),
            level,
            message: message.to_string(),
            causes: Vec::new(),
            context,
            environment: self.config.environment.clone(),
            release: self.config.release.clone(),
        })
    }

    pub fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        if let Some(reporter) = self.active_reporter() {
            reporter.add_breadcrumb(&breadcrumb);
        }
    }

    pub fn set_user_context(&self, user: Option<UserContext>) {
        if let Some(reporter) = self.active_reporter() {
            reporter.set_user(user.as_ref());
        }
    }
}

impl std::fmt::Debug for ErrorTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorTracker")
            .field("config", &self.config)
            .field("reporter", &self.reporter.is_some())
            .finish()
    }
}
