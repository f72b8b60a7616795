use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// What kind of change a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    /// Strips were added, removed or reordered
    Strips,
    /// Region coordinates, widths or orientation changed
    Regions,
    /// The navigation mode changed
    Mode,
    /// The whole strip set was replaced from a serialized string
    Restore,
}

/// Notification emitted once per completed command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextChange {
    pub reason: ChangeReason,
}

impl ContextChange {
    pub fn new(reason: ChangeReason) -> Self {
        Self { reason }
    }
}

/// Receives context changes from a controller
pub trait ContextListener {
    fn context_changed(&self, change: &ContextChange);
}

impl ContextListener for UnboundedSender<ContextChange> {
    fn context_changed(&self, change: &ContextChange) {
        if self.send(*change).is_err() {
            debug!("context listener channel closed");
        }
    }
}

/// Adapter turning a closure into a listener
pub struct FnListener<F>(pub F);

impl<F: Fn(&ContextChange)> ContextListener for FnListener<F> {
    fn context_changed(&self, change: &ContextChange) {
        (self.0)(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_channel_listener() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        tx.context_changed(&ContextChange::new(ChangeReason::Mode));
        assert_eq!(rx.try_recv().unwrap().reason, ChangeReason::Mode);

        drop(rx);
        // A closed channel is ignored
        tx.context_changed(&ContextChange::new(ChangeReason::Strips));
    }

    #[test]
    fn test_fn_listener() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let listener = FnListener(move |_: &ContextChange| seen.set(seen.get() + 1));
        listener.context_changed(&ContextChange::new(ChangeReason::Regions));
        listener.context_changed(&ContextChange::new(ChangeReason::Regions));
        assert_eq!(count.get(), 2);
    }
}
