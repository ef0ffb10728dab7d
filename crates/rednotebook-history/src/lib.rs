/// Per-date undo/redo history.
///
/// Provides a `HistoryManager` that keeps an independent, bounded pair of
/// undo/redo stacks for every partition key (usually a calendar date) and
/// reports Undo/Redo availability to an injected observer.
pub mod action;
pub mod config;
pub mod manager;
pub mod observer;

pub use action::Action;
pub use config::HistoryConfig;
pub use manager::HistoryManager;
pub use observer::{HistoryObserver, NoopObserver};
