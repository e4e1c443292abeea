use serde::{Deserialize, Serialize};

use crate::{
    object::serde_object,
    types::{Message, User},
};

/// A press on an inline keyboard button.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallbackQuery {
    id: String,
    from: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

serde_object!(CallbackQuery => "callback query");

impl PartialEq for CallbackQuery {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CallbackQuery {}

impl CallbackQuery {
    pub fn new(id: impl Into<String>, from: User) -> Self {
        Self {
            id: id.into(),
            from,
            message: None,
            inline_message_id: None,
            data: None,
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from(&self) -> &User {
        &self.from
    }

    /// The message the pressed button was attached to.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn inline_message_id(&self) -> Option<&str> {
        self.inline_message_id.as_deref()
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}
