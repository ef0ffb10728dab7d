/// Editing session: applies edits to the day book and records them in the
/// per-date undo history.
use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rednotebook_config::AppConfig;

use crate::daybook::DayBook;
use crate::history::{
    history_config, Action, HistoryConfig, HistoryManager, HistoryObserver, DAY_TEXT_TAG,
    TAGS_TAG,
};
use crate::templates::TemplateStore;

/// Builds an action whose operations mutate the shared day book.
fn book_action(
    book: &Rc<RefCell<DayBook>>,
    undo: impl Fn(&mut DayBook) + 'static,
    redo: impl Fn(&mut DayBook) + 'static,
    tag: &str,
) -> Action {
    let (undo_book, redo_book) = (Rc::clone(book), Rc::clone(book));
    Action::new(
        move || {
            let mut book = undo_book
                .try_borrow_mut()
                .map_err(|_| anyhow!("Day book is busy, cannot undo"))?;
            undo(&mut *book);
            Ok(())
        },
        move || {
            let mut book = redo_book
                .try_borrow_mut()
                .map_err(|_| anyhow!("Day book is busy, cannot redo"))?;
            redo(&mut *book);
            Ok(())
        },
        [tag],
    )
}

/// The journal being edited, one visible date at a time.
///
/// Every edit method applies the change immediately and records an action
/// for the visible date. Edits that change nothing record nothing.
pub struct Session {
    book: Rc<RefCell<DayBook>>,
    history: HistoryManager<NaiveDate>,
    templates: TemplateStore,
    date: NaiveDate,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("date", &self.date)
            .field("history", &self.history)
            .field("templates", &self.templates)
            .finish()
    }
}

impl Session {
    /// Creates a session showing `date`.
    pub fn new(
        date: NaiveDate,
        templates: TemplateStore,
        config: HistoryConfig,
        observer: impl HistoryObserver + 'static,
    ) -> Self {
        let mut history = HistoryManager::with_config(config, observer);
        history.set_active_key(date);
        Self {
            book: Rc::new(RefCell::new(DayBook::new())),
            history,
            templates,
            date,
        }
    }

    /// Creates a session from the user configuration.
    pub fn from_config(
        config: &AppConfig,
        date: NaiveDate,
        observer: impl HistoryObserver + 'static,
    ) -> Self {
        let templates =
            TemplateStore::new(config.resolve_template_dir(), &config.date_time_format);
        Self::new(date, templates, history_config(config), observer)
    }

    /// The visible date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Shows another date; undo/redo now act on that date's history.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.history.set_active_key(date);
    }

    /// Text of the visible date.
    pub fn text(&self) -> String {
        self.book.borrow().text(self.date).to_string()
    }

    /// Tags of the visible date, sorted.
    pub fn tags(&self) -> Vec<String> {
        self.book.borrow().tags(self.date)
    }

    /// Dates with content, in calendar order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.book.borrow().dates().collect()
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Replaces the text of the visible date. Returns whether it changed.
    pub fn replace_text(&mut self, text: &str) -> bool {
        let date = self.date;
        let before = self.book.borrow().text(date).to_string();
        if before == text {
            return false;
        }

        let after = text.to_string();
        self.book.borrow_mut().set_text(date, after.clone());
        let action = book_action(
            &self.book,
            move |book| book.set_text(date, before.clone()),
            move |book| book.set_text(date, after.clone()),
            DAY_TEXT_TAG,
        );
        self.history.record(action);
        true
    }

    /// Appends `text` to the visible date. Returns whether it changed.
    pub fn append_text(&mut self, text: &str) -> bool {
        let combined = format!("{}{text}", self.text());
        self.replace_text(&combined)
    }

    /// Appends the named template, with `$date$` expanded to `now`.
    /// Returns false for unknown templates.
    pub fn insert_template(&mut self, title: &str, now: NaiveDateTime) -> bool {
        let text = self.templates.text(title, now);
        self.append_text(&text)
    }

    /// Appends the template of the visible date's weekday.
    pub fn insert_weekday_template(&mut self, now: NaiveDateTime) -> bool {
        let text = self.templates.weekday_text(self.date, now);
        self.append_text(&text)
    }

    /// Tags the visible date. Returns false if the tag was already set.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let date = self.date;
        if !self.book.borrow_mut().add_tag(date, tag) {
            return false;
        }

        let (undo_tag, redo_tag) = (tag.to_string(), tag.to_string());
        let action = book_action(
            &self.book,
            move |book| {
                book.remove_tag(date, &undo_tag);
            },
            move |book| {
                book.add_tag(date, &redo_tag);
            },
            TAGS_TAG,
        );
        self.history.record(action);
        true
    }

    /// Untags the visible date. Returns false if the tag was not set.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let date = self.date;
        if !self.book.borrow_mut().remove_tag(date, tag) {
            return false;
        }

        let (undo_tag, redo_tag) = (tag.to_string(), tag.to_string());
        let action = book_action(
            &self.book,
            move |book| {
                book.add_tag(date, &undo_tag);
            },
            move |book| {
                book.remove_tag(date, &redo_tag);
            },
            TAGS_TAG,
        );
        self.history.record(action);
        true
    }

    /// Undoes the last edit of the visible date.
    ///
    /// Returns the tags of the undone action, `None` if there was nothing
    /// to undo.
    ///
    /// # Errors
    ///
    /// Returns an error if the day book could not be updated.
    pub fn undo(&mut self) -> Result<Option<Vec<String>>> {
        self.history.undo()
    }

    /// Redoes the last undone edit of the visible date.
    ///
    /// # Errors
    ///
    /// Returns an error if the day book could not be updated.
    pub fn redo(&mut self) -> Result<Option<Vec<String>>> {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Forgets the undo history of the visible date.
    pub fn clear_history(&mut self) {
        self.history.clear_active();
    }
}
