use serde::{Deserialize, Serialize};

use crate::{domain::ChatId, object::serde_object};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
    /// Any kind this crate does not know yet.
    #[serde(other)]
    Unknown,
}

/// A private chat, group or channel. Equality uses the chat id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Chat {
    id: ChatId,
    #[serde(rename = "type")]
    kind: ChatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
}

serde_object!(Chat => "chat");

impl PartialEq for Chat {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Chat {}

impl Chat {
    pub fn new(id: ChatId, kind: ChatType) -> Self {
        Self {
            id,
            kind,
            title: None,
            username: None,
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn id(&self) -> ChatId {
        self.id
    }

    pub fn kind(&self) -> ChatType {
        self.kind
    }

    pub fn is_private(&self) -> bool {
        self.kind == ChatType::Private
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }
}
