//! Inbound text classification.
//!
//! Checked in order: command prefixes, exact menu labels, then free text.
//! Matching is case-sensitive.

use crate::menu::{DONE, FIXED_CATEGORIES, SOMETHING_ELSE};

pub const START_COMMAND: &str = "/start";
pub const SHOW_DATA_COMMAND: &str = "/show_data";

/// What a piece of inbound text means to the dialogue engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input<'a> {
    /// `/start`, with anything after it ignored.
    Start,
    /// `/show_data`, with anything after it ignored.
    ShowData,
    Done,
    SomethingElse,
    /// One of the fixed category labels, as given.
    Category(&'static str),
    /// Anything else; meaning depends on the session state.
    Text(&'a str),
}

impl<'a> Input<'a> {
    pub fn classify(text: &'a str) -> Self {
        if text.starts_with(START_COMMAND) {
            return Input::Start;
        }
        if text.starts_with(SHOW_DATA_COMMAND) {
            return Input::ShowData;
        }

        if text == DONE {
            return Input::Done;
        }
        if text == SOMETHING_ELSE {
            return Input::SomethingElse;
        }
        if let Some(label) = FIXED_CATEGORIES.into_iter().find(|label| *label == text) {
            return Input::Category(label);
        }

        Input::Text(text)
    }

    /// Short name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Start => "start",
            Input::ShowData => "show_data",
            Input::Done => "done",
            Input::SomethingElse => "something_else",
            Input::Category(_) => "category",
            Input::Text(_) => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_by_prefix() {
        assert_eq!(Input::classify("/start"), Input::Start);
        assert_eq!(Input::classify("/start again please"), Input::Start);
        assert_eq!(Input::classify("/start@factbot"), Input::Start);
        assert_eq!(Input::classify("/show_data"), Input::ShowData);
        assert_eq!(Input::classify("/show_data all"), Input::ShowData);
    }

    #[test]
    fn test_commands_must_lead() {
        assert_eq!(Input::classify(" /start"), Input::Text(" /start"));
        assert_eq!(Input::classify("please /start"), Input::Text("please /start"));
    }

    #[test]
    fn test_menu_labels_exact() {
        assert_eq!(Input::classify("Done"), Input::Done);
        assert_eq!(Input::classify("Something else..."), Input::SomethingElse);
        assert_eq!(Input::classify("Age"), Input::Category("Age"));
        assert_eq!(
            Input::classify("Favourite colour"),
            Input::Category("Favourite colour")
        );
        assert_eq!(
            Input::classify("Number of siblings"),
            Input::Category("Number of siblings")
        );
    }

    #[test]
    fn test_labels_case_sensitive() {
        assert_eq!(Input::classify("done"), Input::Text("done"));
        assert_eq!(Input::classify("age"), Input::Text("age"));
        assert_eq!(Input::classify("Done "), Input::Text("Done "));
    }

    #[test]
    fn test_free_text() {
        assert_eq!(Input::classify("25"), Input::Text("25"));
        assert_eq!(Input::classify("Golang").kind(), "text");
    }
}
