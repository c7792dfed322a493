//! Dialogue engine — the per-user state machine.
//!
//! `DialogueEngine::handle` takes one inbound text and the sender's session,
//! applies the transition in place, and returns the replies to send. It does
//! no I/O and never fails: the only invalid input (an empty custom category
//! name) is answered with a re-prompt in the same state.
//!
//! | Input                  | State                 | Next state             |
//! |------------------------|-----------------------|------------------------|
//! | `/start…`              | any                   | `Choosing`             |
//! | `/show_data…`          | any                   | unchanged              |
//! | `Done`                 | any                   | `Choosing`             |
//! | `Something else...`    | any                   | `AwaitingCategoryName` |
//! | fixed category label   | any                   | `AwaitingValue`        |
//! | free text              | `AwaitingCategoryName`| `AwaitingValue`*       |
//! | free text              | `AwaitingValue`       | `Choosing`             |
//! | free text              | `Choosing`            | `Choosing`             |
//!
//! \* stays in `AwaitingCategoryName` when the name is blank.

use tracing::debug;

use factbot_core::utils::normalize;
use factbot_core::{DialogueState, ReplyMarkup, Session};

use crate::facts::format_facts;
use crate::input::Input;
use crate::menu::menu;

/// Default name the bot introduces itself with.
pub const DEFAULT_BOT_NAME: &str = "Doctor Botter";

/// One outbound reply produced by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub markup: ReplyMarkup,
}

impl Reply {
    /// Plain text, no markup.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: ReplyMarkup::None,
        }
    }

    /// Text with the quick-reply menu shown.
    pub fn with_menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: menu(),
        }
    }

    /// Text that also clears the quick-reply menu.
    pub fn remove_menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: ReplyMarkup::RemoveMenu,
        }
    }
}

// ─────────────────────────────────────────────
// DialogueEngine
// ─────────────────────────────────────────────

/// The fact-gathering conversation.
#[derive(Clone, Debug)]
pub struct DialogueEngine {
    bot_name: String,
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueEngine {
    pub fn new() -> Self {
        Self {
            bot_name: DEFAULT_BOT_NAME.to_string(),
        }
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Apply one inbound text to `session` and return the replies.
    ///
    /// Always returns exactly one reply.
    pub fn handle(&self, session: &mut Session, text: &str) -> Vec<Reply> {
        let from = session.state;
        let input = Input::classify(text);

        let reply = match input {
            Input::Start => self.start(session),
            Input::ShowData => show_data(session),
            Input::Done => done(session),
            Input::SomethingElse => ask_category_name(session),
            Input::Category(label) => select_category(session, normalize(label)),
            Input::Text(text) => match session.state {
                DialogueState::AwaitingCategoryName => name_custom_category(session, text),
                DialogueState::AwaitingValue => store_pending_value(session, text),
                DialogueState::Choosing => {
                    Reply::text("Please pick an option or use 'Something else...' to add your own.")
                }
            },
        };

        session.touch();
        debug!(
            session_key = %session.key,
            input = input.kind(),
            from = %from,
            to = %session.state,
            facts = session.facts.len(),
            "dialogue transition"
        );

        vec![reply]
    }

    fn start(&self, session: &mut Session) -> Reply {
        session.state = DialogueState::Choosing;
        session.pending_category = None;

        let mut text = format!("Hi! My name is {}.", self.bot_name);
        if session.facts.is_empty() {
            text.push_str(
                " I will hold a more complex conversation with you. \
                 Why don't you tell me something about yourself?",
            );
        } else {
            text.push_str(&format!(
                " You already told me your {}. Why don't you tell me something more \
                 about yourself? Or change anything I already know.",
                session.categories().join(", ")
            ));
        }
        Reply::with_menu(text)
    }
}

// ─────────────────────────────────────────────
// Transitions
// ─────────────────────────────────────────────

fn show_data(session: &Session) -> Reply {
    Reply::text(format!(
        "This is what you already told me: {}",
        format_facts(&session.facts)
    ))
}

fn done(session: &mut Session) -> Reply {
    session.state = DialogueState::Choosing;
    session.pending_category = None;

    Reply::remove_menu(format!(
        "I learned these facts about you: {}Until next time!",
        format_facts(&session.facts)
    ))
}

fn ask_category_name(session: &mut Session) -> Reply {
    session.state = DialogueState::AwaitingCategoryName;
    session.pending_category = None;

    Reply::text(r#"Alright, please send me the category first, for example "Most impressive skill""#)
}

fn name_custom_category(session: &mut Session, text: &str) -> Reply {
    let category = normalize(text);
    if category.is_empty() {
        return Reply::text("Please provide a non-empty category name.");
    }
    select_category(session, category)
}

/// Make `category` pending and either echo what is known about it or
/// invite the user to share it. Shared by the fixed and custom paths.
fn select_category(session: &mut Session, category: String) -> Reply {
    let text = match session.known_value(&category) {
        Some(value) => format!("Your {category}? I already know the following about that: {value}"),
        None => format!("Your {category}? Yes, I would love to hear about that!"),
    };

    session.state = DialogueState::AwaitingValue;
    session.pending_category = Some(category);
    Reply::text(text)
}

/// Store free text as the value of the pending category.
fn store_pending_value(session: &mut Session, text: &str) -> Reply {
    session.state = DialogueState::Choosing;

    let Some(category) = session.pending_category.take().filter(|c| !c.is_empty()) else {
        return Reply::with_menu("Let's start again. Please pick a category.");
    };

    session.facts.insert(category, normalize(text));
    Reply::with_menu(format!(
        "Neat! Just so you know, this is what you already told me:{}\
         You can tell me more, or change your opinion on something.",
        format_facts(&session.facts)
    ))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
