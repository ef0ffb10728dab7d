/// Reversible edit actions stored on the history stacks.
use std::fmt;

use anyhow::Result;

/// A deferred, repeatable edit step.
///
/// An action may travel between the undo and redo stacks many times, so the
/// operation must be callable more than once.
pub type Operation = Box<dyn FnMut() -> Result<()>>;

/// A recorded, reversible unit of edit history.
///
/// Holds the operation that reverses the edit, the operation that reapplies
/// it, and an opaque list of tags the caller uses to decide what to refresh.
pub struct Action {
    undo: Operation,
    redo: Operation,
    tags: Vec<String>,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("tags", &self.tags).finish()
    }
}

impl Action {
    /// Creates an action from its undo and redo operations.
    pub fn new<U, R, I, S>(undo: U, redo: R, tags: I) -> Self
    where
        U: FnMut() -> Result<()> + 'static,
        R: FnMut() -> Result<()> + 'static,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            undo: Box::new(undo),
            redo: Box::new(redo),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Tags describing what this action affects.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether the action carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Reverses the edit.
    pub(crate) fn run_undo(&mut self) -> Result<()> {
        (self.undo)()
    }

    /// Reapplies the edit.
    pub(crate) fn run_redo(&mut self) -> Result<()> {
        (self.redo)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_operations_are_repeatable() {
        let value = Rc::new(Cell::new(0));
        let (u, r) = (Rc::clone(&value), Rc::clone(&value));
        let mut action = Action::new(
            move || {
                u.set(u.get() - 1);
                Ok(())
            },
            move || {
                r.set(r.get() + 1);
                Ok(())
            },
            ["day_text"],
        );

        action.run_redo().unwrap();
        action.run_redo().unwrap();
        action.run_undo().unwrap();
        assert_eq!(value.get(), 1);
    }

    #[test]
    fn test_tags() {
        let action = Action::new(|| Ok(()), || Ok(()), vec!["day_text", "tags"]);
        assert_eq!(action.tags(), ["day_text", "tags"]);
        assert!(action.has_tag("tags"));
        assert!(!action.has_tag("categories"));
    }

    #[test]
    fn test_debug_shows_tags_only() {
        let action = Action::new(|| Ok(()), || Ok(()), ["day_text"]);
        assert_eq!(format!("{action:?}"), r#"Action { tags: ["day_text"] }"#);
    }
}
