use serde::{Deserialize, Serialize};

use crate::{
    domain::{MessageId, MessageRef},
    object::serde_object,
    types::{Animation, Audio, Chat, Contact, Document, Location, PhotoSize, User, Video},
};

/// A message in a chat. Equality uses `(chat id, message id)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "message_id")]
    id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<User>,
    chat: Chat,
    /// Unix time (seconds).
    date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    document: Option<Document>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    photo: Vec<PhotoSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reply_to_message: Option<Box<Message>>,
}

serde_object!(Message => "message");

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.reference() == other.reference()
    }
}

impl Eq for Message {}

impl Message {
    pub fn new(id: MessageId, chat: Chat, date: i64) -> Self {
        Self {
            id,
            from: None,
            chat,
            date,
            text: None,
            caption: None,
            document: None,
            photo: Vec::new(),
            video: None,
            audio: None,
            animation: None,
            location: None,
            contact: None,
            reply_to_message: None,
        }
    }

    pub fn with_from(mut self, from: User) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn reference(&self) -> MessageRef {
        MessageRef {
            chat_id: self.chat.id(),
            message_id: self.id,
        }
    }

    /// Sender; absent for channel posts.
    pub fn from(&self) -> Option<&User> {
        self.from.as_ref()
    }

    /// Alias for [`Message::from`].
    pub fn author(&self) -> Option<&User> {
        self.from()
    }

    pub fn chat(&self) -> &Chat {
        &self.chat
    }

    pub fn date(&self) -> i64 {
        self.date
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Text, or the media caption when there is no text.
    pub fn content(&self) -> Option<&str> {
        self.text().or_else(|| self.caption())
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Available sizes of the photo, smallest first.
    pub fn photo(&self) -> &[PhotoSize] {
        &self.photo
    }

    pub fn video(&self) -> Option<&Video> {
        self.video.as_ref()
    }

    pub fn audio(&self) -> Option<&Audio> {
        self.audio.as_ref()
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    pub fn reply_to_message(&self) -> Option<&Message> {
        self.reply_to_message.as_deref()
    }
}
