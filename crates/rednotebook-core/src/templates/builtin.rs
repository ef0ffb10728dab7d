//! Text bodies written into a fresh template directory.

/// Weekday names, Monday first, matching template files `1.txt`..`7.txt`.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Heading line of [`EXAMPLE`] rewritten per weekday.
pub const EXAMPLE_HEADING: &str = "=== This is an example template ===";

/// Shown instead of an empty or unreadable template.
pub const UNREADABLE: &str = "This template contains no text or has unreadable content. \
To edit it, open the template directory and change the file.";

pub const EXAMPLE: &str = "\
=== This is an example template ===

Templates can hold any formatting or content that a normal entry can.

Text can be:
- **bold**
- //italic//
- __underlined__
- --strikethrough--
- or a **//__mix__//**

Images: [\"\"/path/to/your/picture\"\".jpg]

Links:
- to files: [filename.txt \"\"/path/to/filename.txt\"\"]
- to directories: [directory name \"\"/path/to/directory/\"\"]
- to websites: [RedNotebook \"\"https://rednotebook.app\"\"]

= Title level 1 =
== Title level 2 ==
=== Title level 3 ===
====================

% Lines starting with a percent sign are comments.

**Macros**:
Every \"$date$\" in a template is replaced with the current date when the
template is inserted. The date format can be changed in the configuration.
";

/// Help text; `{dir}` is replaced with the template directory.
pub const HELP: &str = "\
Besides templates for weekdays you can also have arbitrary named templates,
for example \"Meeting\" or \"Journey\".

All templates must reside in the directory \"{dir}\".
";

pub const MEETING: &str = "\
=== Meeting ===

Purpose, date, and place

**Present:**
+
+
+

**Agenda:**
+
+
+

**Discussion, Decisions, Assignments:**
+
+
+
==================================
";

pub const JOURNEY: &str = "\
=== Journey ===
**Date:**

**Location:**

**Participants:**

**The trip:**
First we went to xxxxx then we got to yyyyy ...

**Pictures:** [Image folder \"\"/path/to/the/images/\"\"]
";

pub const CALL: &str = "\
==================================
=== Phone Call ===
- **Person:**
- **Time:**
- **Topic:**
- **Outcome and Follow up:**
==================================
";

pub const PERSONAL: &str = "\
=====================================
=== Personal ===

+
+
+
========================

**How was the Day?**


========================
**What needs to be changed?**
+
+
+
=====================================
";

/// Named example templates written on first start only.
pub const FIRST_START: [(&str, &str); 4] = [
    ("Meeting", MEETING),
    ("Journey", JOURNEY),
    ("Call", CALL),
    ("Personal", PERSONAL),
];
