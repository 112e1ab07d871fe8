//! Event Hooks
//!
//! Observers notified after a successful user mutation. Hooks are registered
//! once at start-up and called synchronously, in registration order.

mod log_hook;

use std::fmt;
use std::sync::Arc;

use crate::domain::UserEvent;

pub use log_hook::log_user_event;

/// Observer function invoked with every user event
pub type UserEventHook = Arc<dyn Fn(&UserEvent) -> anyhow::Result<()> + Send + Sync>;

/// Ordered, immutable list of named hooks
#[derive(Clone, Default)]
pub struct EventHooks {
    hooks: Vec<(&'static str, UserEventHook)>,
}

impl EventHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook; it runs after every hook registered before it
    pub fn with_hook<F>(mut self, name: &'static str, hook: F) -> Self
    where
        F: Fn(&UserEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.hooks.push((name, Arc::new(hook)));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Registered hook names, in call order
    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|(name, _)| *name).collect()
    }

    /// Hand `event` to every hook.
    ///
    /// A failing hook is logged and skipped; the remaining hooks still run
    /// and nothing is reported back to the caller.
    pub fn dispatch(&self, event: &UserEvent) {
        for (name, hook) in &self.hooks {
            if let Err(e) = hook(event) {
                tracing::warn!(
                    hook = name,
                    event_type = event.event_type(),
                    user_id = %event.user_id(),
                    error = %e,
                    "User event hook failed"
                );
            }
        }
    }
}

impl fmt::Debug for EventHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHooks")
            .field("hooks", &self.names())
            .finish()
    }
}
