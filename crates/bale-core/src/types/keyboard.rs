use serde::{Deserialize, Serialize};

use crate::object::{is_false, serde_object};

/// A button of a menu (reply) keyboard.
///
/// Request flags are only put on the wire when set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyboardButton {
    text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    request_contact: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    request_location: bool,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: false,
            request_location: false,
        }
    }

    /// Send the user's phone number as a contact when pressed.
    pub fn with_request_contact(mut self) -> Self {
        self.request_contact = true;
        self
    }

    /// Send the user's location when pressed. Private chats only.
    pub fn with_request_location(mut self) -> Self {
        self.request_location = true;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn request_contact(&self) -> bool {
        self.request_contact
    }

    pub fn request_location(&self) -> bool {
        self.request_location
    }
}

/// A button attached to a message.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl InlineKeyboardButton {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: Some(data.into()),
            url: None,
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
            url: Some(url.into()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn callback_data(&self) -> Option<&str> {
        self.callback_data.as_deref()
    }

    pub fn link(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }

    /// One callback button per row; `{prefix}:{index}` as callback data.
    ///
    /// Labels longer than `max_label_len` characters are cut and get `...`.
    pub fn one_per_row(prefix: &str, options: &[String], max_label_len: usize) -> Self {
        let rows = options
            .iter()
            .enumerate()
            .map(|(idx, opt)| {
                let label = if opt.chars().count() > max_label_len {
                    format!("{}...", opt.chars().take(max_label_len).collect::<String>())
                } else {
                    opt.clone()
                };
                vec![InlineKeyboardButton::callback(label, format!("{prefix}:{idx}"))]
            })
            .collect();
        Self::new(rows)
    }

    pub fn rows(&self) -> &[Vec<InlineKeyboardButton>] {
        &self.inline_keyboard
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuKeyboardMarkup {
    keyboard: Vec<Vec<KeyboardButton>>,
}

impl MenuKeyboardMarkup {
    pub fn new(rows: Vec<Vec<KeyboardButton>>) -> Self {
        Self { keyboard: rows }
    }

    pub fn rows(&self) -> &[Vec<KeyboardButton>] {
        &self.keyboard
    }
}

/// Reply markup attached to an outgoing message (`reply_markup` on the wire).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Components {
    Inline(InlineKeyboardMarkup),
    Menu(MenuKeyboardMarkup),
}

impl From<InlineKeyboardMarkup> for Components {
    fn from(m: InlineKeyboardMarkup) -> Self {
        Components::Inline(m)
    }
}

impl From<MenuKeyboardMarkup> for Components {
    fn from(m: MenuKeyboardMarkup) -> Self {
        Components::Menu(m)
    }
}

serde_object!(
    KeyboardButton => "keyboard button",
    InlineKeyboardButton => "inline keyboard button",
    InlineKeyboardMarkup => "inline keyboard markup",
    MenuKeyboardMarkup => "menu keyboard markup",
    Components => "components",
);
