//! Notification seam between the history manager and the UI.

/// Receives Undo/Redo availability after every history change.
///
/// Implementations typically enable or disable menu items and buttons.
/// They must not call back into the manager.
pub trait HistoryObserver {
    fn availability_changed(&self, can_undo: bool, can_redo: bool);
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl HistoryObserver for NoopObserver {
    fn availability_changed(&self, _can_undo: bool, _can_redo: bool) {}
}

impl<F> HistoryObserver for F
where
    F: Fn(bool, bool),
{
    fn availability_changed(&self, can_undo: bool, can_redo: bool) {
        self(can_undo, can_redo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_closure_observer() {
        let seen = Cell::new((false, false));
        let observer = |u: bool, r: bool| seen.set((u, r));
        observer.availability_changed(true, false);
        assert_eq!(seen.get(), (true, false));
    }

    #[test]
    fn test_noop_observer() {
        NoopObserver.availability_changed(true, true);
    }
}
