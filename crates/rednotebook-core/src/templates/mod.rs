//! Journal templates stored as text files in a directory.
//!
//! Weekday templates are named `1.txt` (Monday) to `7.txt` (Sunday); any
//! other `.txt` file is a named template. Inserting a template replaces
//! every `$date$` macro with the current date.
pub mod builtin;

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Macro replaced with the formatted current date.
pub const DATE_MACRO: &str = "$date$";

/// Template file extension.
const EXTENSION: &str = "txt";

/// Strips characters that are unsafe in menu labels.
pub fn escape_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '&' | '<' | '>' | '\'' | '"'))
        .collect()
}

/// Whether `title` names one of the seven weekday templates.
pub fn is_weekday_title(title: &str) -> bool {
    matches!(title, "1" | "2" | "3" | "4" | "5" | "6" | "7")
}

/// Formats `now` with a strftime pattern, falling back to ISO 8601 when
/// the pattern is invalid.
pub fn format_date(now: NaiveDateTime, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", now.format(pattern)).is_err() {
        tracing::warn!("Invalid date format {pattern:?}, using ISO 8601");
        return now.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    out
}

/// Access to the template directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
    date_format: String,
}

impl TemplateStore {
    /// Creates a store over `dir`; `date_format` is used for `$date$`.
    pub fn new(dir: impl Into<PathBuf>, date_format: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            date_format: date_format.into(),
        }
    }

    /// The template directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the template file for `title`.
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{title}.{EXTENSION}"))
    }

    /// Writes missing default templates and returns the files created.
    ///
    /// Weekday and help templates are restored on every call; the named
    /// example templates are only written on the first start. Existing
    /// files are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or a file cannot be created.
    pub fn ensure_defaults(&self, first_start: bool) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create template directory {}", self.dir.display())
        })?;

        let mut files: Vec<(PathBuf, String)> = builtin::WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, weekday)| {
                let heading = format!("=== This is an example template for {weekday} ===");
                (
                    self.path_for(&(i + 1).to_string()),
                    builtin::EXAMPLE.replacen(builtin::EXAMPLE_HEADING, &heading, 1),
                )
            })
            .collect();

        let help = builtin::HELP.replace("{dir}", &self.dir.display().to_string());
        files.push((self.path_for("Help"), help));

        if first_start {
            for (title, text) in builtin::FIRST_START {
                files.push((self.path_for(title), text.to_string()));
            }
        }

        let mut created = Vec::new();
        for (path, text) in files {
            if write_if_missing(&path, &text)? {
                created.push(path);
            }
        }
        tracing::debug!("Created {} default templates", created.len());
        Ok(created)
    }

    /// Maps every template title to its file, sorted by title.
    ///
    /// Directories and backup files ending in `~` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn files(&self) -> Result<BTreeMap<String, PathBuf>> {
        let entries = std::fs::read_dir(&self.dir).with_context(|| {
            format!("Failed to list template directory {}", self.dir.display())
        })?;

        let mut files = BTreeMap::new();
        for entry in entries {
            let path = entry.context("Failed to read template directory entry")?.path();
            if !path.is_file() || path.to_string_lossy().ends_with('~') {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                files.insert(escape_name(&stem.to_string_lossy()), path);
            }
        }
        Ok(files)
    }

    /// All template titles, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn titles(&self) -> Result<Vec<String>> {
        Ok(self.files()?.into_keys().collect())
    }

    /// Titles of the named (non-weekday) templates, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn named_titles(&self) -> Result<Vec<String>> {
        Ok(self
            .titles()?
            .into_iter()
            .filter(|t| !is_weekday_title(t))
            .collect())
    }

    /// Template text for `title` with `$date$` expanded to `now`.
    ///
    /// Unknown titles yield an empty string. Empty or unreadable files
    /// yield a placeholder explaining how to fix the template.
    pub fn text(&self, title: &str, now: NaiveDateTime) -> String {
        let path = match self.files() {
            Ok(mut files) => match files.remove(title) {
                Some(path) => path,
                None => return String::new(),
            },
            Err(e) => {
                tracing::warn!("{e:#}");
                return String::new();
            }
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => builtin::UNREADABLE.to_string(),
            Err(e) => {
                tracing::warn!("Failed to read template {}: {e}", path.display());
                builtin::UNREADABLE.to_string()
            }
        };

        text.replace(DATE_MACRO, &format_date(now, &self.date_format))
    }

    /// Text of the weekday template for `date`.
    pub fn weekday_text(&self, date: NaiveDate, now: NaiveDateTime) -> String {
        let number = date.weekday().number_from_monday();
        self.text(&number.to_string(), now)
    }

    /// Creates a new named template pre-filled with the example text.
    ///
    /// Appends `.txt` unless `title` already ends with it. An existing
    /// file is left untouched. Returns the path and whether the file was
    /// newly written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn create(&self, title: &str) -> Result<(PathBuf, bool)> {
        let has_extension = title
            .to_lowercase()
            .ends_with(&format!(".{EXTENSION}"));
        let path = if has_extension {
            self.dir.join(title)
        } else {
            self.path_for(title)
        };

        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create template directory {}", self.dir.display())
        })?;
        let created = write_if_missing(&path, builtin::EXAMPLE)?;
        Ok((path, created))
    }
}

/// Writes `text` to `path` unless the file exists. Returns whether it wrote.
fn write_if_missing(path: &Path, text: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write template {}", path.display()))?;
    Ok(true)
}
