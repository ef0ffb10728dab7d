/// Undo/redo manager with one independent stack pair per key.
///
/// Keys are usually calendar dates: editing one day never touches the
/// history of another. New keys start with empty stacks.
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use anyhow::Result;

use crate::action::Action;
use crate::config::HistoryConfig;
use crate::observer::HistoryObserver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Undo,
    Redo,
}

/// Manages bounded undo/redo histories partitioned by key.
///
/// Every state change is reported to the observer as a pair of
/// `(can_undo, can_redo)` flags for the active key.
pub struct HistoryManager<K> {
    /// Key that `record`, `undo` and `redo` operate on.
    current_key: Option<K>,
    /// Undo stacks, most recent action last.
    undo_stacks: HashMap<K, Vec<Action>>,
    /// Redo stacks, most recently undone action last.
    redo_stacks: HashMap<K, Vec<Action>>,
    /// Truncation bounds.
    config: HistoryConfig,
    observer: Box<dyn HistoryObserver>,
}

impl<K: fmt::Debug> fmt::Debug for HistoryManager<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryManager")
            .field("current_key", &self.current_key)
            .field("keys", &self.undo_stacks.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<K> HistoryManager<K>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    /// Creates a manager with the default bounds.
    pub fn new(observer: impl HistoryObserver + 'static) -> Self {
        Self::with_config(HistoryConfig::default(), observer)
    }

    /// Creates a manager with explicit bounds.
    pub fn with_config(config: HistoryConfig, observer: impl HistoryObserver + 'static) -> Self {
        Self {
            current_key: None,
            undo_stacks: HashMap::new(),
            redo_stacks: HashMap::new(),
            config,
            observer: Box::new(observer),
        }
    }

    /// Returns the bounds in use.
    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Returns the active key, if one has been set.
    pub fn active_key(&self) -> Option<&K> {
        self.current_key.as_ref()
    }

    /// Switches the stack pair that subsequent operations target.
    pub fn set_active_key(&mut self, key: K) {
        tracing::debug!(?key, "Switching history key");
        self.current_key = Some(key);
        self.notify();
    }

    /// Records a freshly committed edit for the active key.
    ///
    /// Drops the oldest `buffer` actions once the undo stack grows past
    /// `size + buffer`, and forgets every redo for the key.
    pub fn record(&mut self, action: Action) {
        let Some(key) = self.current_key.clone() else {
            tracing::warn!("Discarding action recorded without an active history key");
            return;
        };

        let threshold = self.config.threshold();
        let undo = self.undo_stacks.entry(key.clone()).or_default();
        undo.push(action);
        if undo.len() > threshold {
            undo.drain(..self.config.batch());
        }

        self.redo_stacks.entry(key).or_default().clear();
        self.notify();
    }

    /// Reverses the most recent action of the active key.
    ///
    /// Returns the tags of the undone action, or `None` when there was
    /// nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns the error of the action's undo operation unchanged. The
    /// failed action is dropped from the history.
    pub fn undo(&mut self) -> Result<Option<Vec<String>>> {
        self.step(Direction::Undo)
    }

    /// Reapplies the most recently undone action of the active key.
    ///
    /// Returns the tags of the redone action, or `None` when there was
    /// nothing to redo.
    ///
    /// # Errors
    ///
    /// Returns the error of the action's redo operation unchanged. The
    /// failed action is dropped from the history.
    pub fn redo(&mut self) -> Result<Option<Vec<String>>> {
        self.step(Direction::Redo)
    }

    /// Whether the active key has anything to undo.
    pub fn can_undo(&self) -> bool {
        self.undo_depth() > 0
    }

    /// Whether the active key has anything to redo.
    pub fn can_redo(&self) -> bool {
        self.redo_depth() > 0
    }

    /// Number of actions on the active key's undo stack.
    pub fn undo_depth(&self) -> usize {
        Self::depth(&self.undo_stacks, self.current_key.as_ref())
    }

    /// Number of actions on the active key's redo stack.
    pub fn redo_depth(&self) -> usize {
        Self::depth(&self.redo_stacks, self.current_key.as_ref())
    }

    /// Forgets the whole history of the active key.
    pub fn clear_active(&mut self) {
        if let Some(key) = &self.current_key {
            self.undo_stacks.remove(key);
            self.redo_stacks.remove(key);
        }
        self.notify();
    }

    fn depth(stacks: &HashMap<K, Vec<Action>>, key: Option<&K>) -> usize {
        key.and_then(|k| stacks.get(k)).map_or(0, Vec::len)
    }

    fn step(&mut self, direction: Direction) -> Result<Option<Vec<String>>> {
        let Some(key) = self.current_key.clone() else {
            tracing::info!("There is nothing to {}: no active history key", direction.verb());
            return Ok(None);
        };

        let (from, to) = match direction {
            Direction::Undo => (&mut self.undo_stacks, &mut self.redo_stacks),
            Direction::Redo => (&mut self.redo_stacks, &mut self.undo_stacks),
        };

        let Some(mut action) = from.get_mut(&key).and_then(Vec::pop) else {
            tracing::info!("There is nothing to {}", direction.verb());
            return Ok(None);
        };

        tracing::debug!(?key, tags = ?action.tags(), "{direction:?}");
        let outcome = match direction {
            Direction::Undo => action.run_undo(),
            Direction::Redo => action.run_redo(),
        };

        if let Err(e) = outcome {
            self.notify();
            return Err(e);
        }

        let tags = action.tags().to_vec();
        to.entry(key).or_default().push(action);
        self.notify();
        Ok(Some(tags))
    }

    fn notify(&self) {
        self.observer
            .availability_changed(self.can_undo(), self.can_redo());
    }
}

impl Direction {
    fn verb(self) -> &'static str {
        match self {
            Direction::Undo => "undo",
            Direction::Redo => "redo",
        }
    }
}
