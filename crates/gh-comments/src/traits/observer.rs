//! Change notification for thread renderers.

/// Notified whenever the visible comments of a thread change.
///
/// The host renderer implements this to re-render the thread; the model
/// never assumes anything about how re-rendering happens.
pub trait ThreadObserver: Send + Sync {
    /// The comments of `thread_id` changed (added, removed or modified).
    fn comments_changed(&self, thread_id: &str);
}

/// An observer that ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl ThreadObserver for NoOpObserver {
    fn comments_changed(&self, _thread_id: &str) {}
}
