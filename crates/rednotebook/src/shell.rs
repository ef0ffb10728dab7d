// Line-oriented editing shell over a journal session.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use rednotebook_core::history::HistoryObserver;
use rednotebook_core::Session;

const HELP: &str = "\
Commands:
  date <YYYY-MM-DD>   show another day
  today               show today
  write <text>        replace the day's text
  append <text>       append a line to the day's text
  template <name>     append a named template
  weekday             append this weekday's template
  templates           list named templates
  new-template <name> create a named template
  tag <name>          tag the day
  untag <name>        remove a tag
  undo | redo         step through this day's history
  show                print the day
  days                list days with content
  help                print this text
  quit                leave";

/// Undo/Redo menu state, updated by the history manager.
#[derive(Debug, Clone, Default)]
pub struct EditMenu {
    undo: Rc<Cell<bool>>,
    redo: Rc<Cell<bool>>,
}

impl EditMenu {
    pub fn undo_enabled(&self) -> bool {
        self.undo.get()
    }

    pub fn redo_enabled(&self) -> bool {
        self.redo.get()
    }

    /// Prompt showing which history steps are available.
    fn prompt(&self, date: NaiveDate) -> String {
        let flag = |on: bool, name: &'static str| if on { name } else { "-" };
        format!(
            "{date} [{} {}]> ",
            flag(self.undo_enabled(), "undo"),
            flag(self.redo_enabled(), "redo")
        )
    }
}

impl HistoryObserver for EditMenu {
    fn availability_changed(&self, can_undo: bool, can_redo: bool) {
        tracing::trace!(can_undo, can_redo, "Edit menu updated");
        self.undo.set(can_undo);
        self.redo.set(can_redo);
    }
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Date(NaiveDate),
    Today,
    Write(String),
    Append(String),
    Template(String),
    Weekday,
    Templates,
    NewTemplate(String),
    Tag(String),
    Untag(String),
    Undo,
    Redo,
    Show,
    Days,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let arg = |what: &str| -> Result<String> {
            if rest.is_empty() {
                bail!("`{word}` needs {what}");
            }
            Ok(rest.to_string())
        };

        let command = match word {
            "date" => Command::Date(
                rest.parse()
                    .with_context(|| format!("Invalid date {rest:?}, expected YYYY-MM-DD"))?,
            ),
            "today" => Command::Today,
            "write" => Command::Write(rest.to_string()),
            "append" => Command::Append(arg("some text")?),
            "template" => Command::Template(arg("a template name")?),
            "weekday" => Command::Weekday,
            "templates" => Command::Templates,
            "new-template" => Command::NewTemplate(arg("a template name")?),
            "tag" => Command::Tag(arg("a tag")?),
            "untag" => Command::Untag(arg("a tag")?),
            "undo" => Command::Undo,
            "redo" => Command::Redo,
            "show" => Command::Show,
            "days" => Command::Days,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(anyhow!("Unknown command {other:?}, try `help`")),
        };
        Ok(command)
    }
}

/// Executes one command. Returns false when the shell should stop.
pub fn execute(session: &mut Session, command: Command, out: &mut impl Write) -> Result<bool> {
    let now = Local::now().naive_local();
    match command {
        Command::Date(date) => session.set_date(date),
        Command::Today => session.set_date(now.date()),
        Command::Write(text) => {
            session.replace_text(&text);
        }
        Command::Append(text) => {
            let line = if session.text().is_empty() {
                text
            } else {
                format!("\n{text}")
            };
            session.append_text(&line);
        }
        Command::Template(title) => {
            if !session.insert_template(&title, now) {
                writeln!(out, "No template named {title:?}")?;
            }
        }
        Command::Weekday => {
            if !session.insert_weekday_template(now) {
                writeln!(out, "No template for this weekday")?;
            }
        }
        Command::Templates => {
            for title in session.templates().named_titles()? {
                writeln!(out, "{title}")?;
            }
        }
        Command::NewTemplate(title) => {
            let (path, created) = session.templates().create(&title)?;
            if created {
                writeln!(out, "Template written to {}", path.display())?;
            } else {
                writeln!(out, "Template already exists at {}", path.display())?;
            }
        }
        Command::Tag(tag) => {
            session.add_tag(&tag);
        }
        Command::Untag(tag) => {
            session.remove_tag(&tag);
        }
        Command::Undo => {
            if session.undo()?.is_none() {
                writeln!(out, "Nothing to undo")?;
            }
        }
        Command::Redo => {
            if session.redo()?.is_none() {
                writeln!(out, "Nothing to redo")?;
            }
        }
        Command::Show => {
            let tags = session.tags();
            if !tags.is_empty() {
                writeln!(out, "Tags: {}", tags.join(", "))?;
            }
            writeln!(out, "{}", session.text())?;
        }
        Command::Days => {
            for date in session.dates() {
                writeln!(out, "{date}")?;
            }
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Parse and command errors are reported to `out` and the shell keeps
/// running; only I/O errors on `input`/`out` end it.
pub fn run(
    session: &mut Session,
    menu: &EditMenu,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    write!(out, "{}", menu.prompt(session.date()))?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        if !line.trim().is_empty() {
            let keep_going = match line.parse::<Command>() {
                Ok(command) => execute(session, command, out).or_else(|e| {
                    tracing::debug!("Command failed: {e:#}");
                    writeln!(out, "Error: {e:#}").map(|()| true)
                })?,
                Err(e) => {
                    writeln!(out, "{e:#}")?;
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
        write!(out, "{}", menu.prompt(session.date()))?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rednotebook_core::history::HistoryConfig;
    use rednotebook_core::TemplateStore;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn setup(dir: &TempDir) -> (Session, EditMenu) {
        let menu = EditMenu::default();
        let session = Session::new(
            day(1),
            TemplateStore::new(dir.path(), "%Y"),
            HistoryConfig::default(),
            menu.clone(),
        );
        (session, menu)
    }

    fn run_script(session: &mut Session, menu: &EditMenu, script: &str) -> String {
        let mut out = Vec::new();
        run(session, menu, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("undo".parse::<Command>().unwrap(), Command::Undo);
        assert_eq!(
            "date 2024-02-03".parse::<Command>().unwrap(),
            Command::Date(day(3))
        );
        assert_eq!(
            "append  went for a walk ".parse::<Command>().unwrap(),
            Command::Append("went for a walk".to_string())
        );
        assert_eq!(
            "write".parse::<Command>().unwrap(),
            Command::Write(String::new())
        );
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("date tomorrow".parse::<Command>().is_err());
        assert!("tag".parse::<Command>().is_err());
        assert!("fly away".parse::<Command>().is_err());
    }

    #[test]
    fn test_prompt_reflects_history() {
        let menu = EditMenu::default();
        assert_eq!(menu.prompt(day(1)), "2024-02-01 [- -]> ");
        menu.availability_changed(true, false);
        assert_eq!(menu.prompt(day(1)), "2024-02-01 [undo -]> ");
    }

    #[test]
    fn test_script_edits_and_undoes() {
        let dir = TempDir::new().unwrap();
        let (mut session, menu) = setup(&dir);

        run_script(
            &mut session,
            &menu,
            "append first\nappend second\nundo\ntag rainy\n",
        );
        assert_eq!(session.text(), "first");
        assert_eq!(session.tags(), vec!["rainy"]);
        assert!(menu.undo_enabled());
        assert!(!menu.redo_enabled());
    }

    #[test]
    fn test_script_stops_at_quit() {
        let dir = TempDir::new().unwrap();
        let (mut session, menu) = setup(&dir);

        run_script(&mut session, &menu, "write kept\nquit\nwrite lost\n");
        assert_eq!(session.text(), "kept");
    }

    #[test]
    fn test_script_reports_errors_and_continues() {
        let dir = TempDir::new().unwrap();
        let (mut session, menu) = setup(&dir);

        let output = run_script(&mut session, &menu, "bogus\nundo\nwrite ok\n");
        assert!(output.contains("Unknown command \"bogus\""));
        assert!(output.contains("Nothing to undo"));
        assert_eq!(session.text(), "ok");
    }

    #[test]
    fn test_script_switches_days() {
        let dir = TempDir::new().unwrap();
        let (mut session, menu) = setup(&dir);

        let output = run_script(
            &mut session,
            &menu,
            "write one\ndate 2024-02-02\nundo\nwrite two\ndays\n",
        );
        assert!(output.contains("Nothing to undo"));
        assert!(output.contains("2024-02-01\n2024-02-02\n"));
        assert_eq!(session.date(), day(2));
    }

    #[test]
    fn test_script_templates() {
        let dir = TempDir::new().unwrap();
        let (mut session, menu) = setup(&dir);

        let output = run_script(
            &mut session,
            &menu,
            "new-template Garden\ntemplates\ntemplate Missing\n",
        );
        assert!(output.contains("Garden.txt"));
        assert!(output.contains("Garden\n"));
        assert!(output.contains("No template named \"Missing\""));
    }

    #[test]
    fn test_script_new_template_twice() {
        let dir = TempDir::new().unwrap();
        let (mut session, menu) = setup(&dir);
        std::fs::write(dir.path().join("Garden.txt"), "my garden").unwrap();

        let output = run_script(&mut session, &menu, "new-template Garden\n");
        assert!(output.contains("Template already exists at"));
        assert!(!output.contains("Template written to"));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Garden.txt")).unwrap(),
            "my garden"
        );
    }
}
