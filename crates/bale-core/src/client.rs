//! The bot client port and the options of its send operations.
//!
//! The HTTP transport lives outside this crate; it implements [`BotClient`]
//! and serializes these option structs as the request body (`Missing`
//! fields are left out, `delete_after` and `file_name` never leave the
//! process).

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::{
    domain::{ChatId, MessageId},
    file_input::{FileInput, InputMedia},
    maybe::MaybeMissing,
    types::{Components, Contact, LabeledPrice, Location, Message},
    Result,
};

/// Options shared by every send call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SendOptions {
    #[serde(rename = "reply_markup", skip_serializing_if = "MaybeMissing::is_missing")]
    pub components: MaybeMissing<Components>,
    /// Delete the sent message after this long. Handled by the client.
    #[serde(skip)]
    pub delete_after: Option<Duration>,
}

impl SendOptions {
    pub fn with_components(mut self, components: impl Into<Components>) -> Self {
        self.components = MaybeMissing::Value(components.into());
        self
    }

    pub fn with_delete_after(mut self, delay: Duration) -> Self {
        self.delete_after = Some(delay);
        self
    }
}

/// Options for document, photo, video and audio sends.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MediaOptions {
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub caption: MaybeMissing<String>,
    #[serde(flatten)]
    pub send: SendOptions,
    /// Upload name for raw bytes.
    #[serde(skip)]
    pub file_name: Option<String>,
}

impl MediaOptions {
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = MaybeMissing::Value(caption.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_components(mut self, components: impl Into<Components>) -> Self {
        self.send = self.send.with_components(components);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AnimationOptions {
    /// Seconds.
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub duration: MaybeMissing<u32>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub width: MaybeMissing<u32>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub height: MaybeMissing<u32>,
    #[serde(flatten)]
    pub media: MediaOptions,
}

/// An invoice to send to a chat.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Invoice {
    pub title: String,
    pub description: String,
    pub provider_token: String,
    pub prices: Vec<LabeledPrice>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub payload: MaybeMissing<String>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub photo_url: MaybeMissing<String>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub need_name: MaybeMissing<bool>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub need_phone_number: MaybeMissing<bool>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub need_email: MaybeMissing<bool>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub need_shipping_address: MaybeMissing<bool>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub is_flexible: MaybeMissing<bool>,
    #[serde(skip)]
    pub delete_after: Option<Duration>,
}

impl Invoice {
    /// Nothing is requested from the payer; the final price may change.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        provider_token: impl Into<String>,
        prices: Vec<LabeledPrice>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            provider_token: provider_token.into(),
            prices,
            payload: MaybeMissing::Missing,
            photo_url: MaybeMissing::Missing,
            need_name: MaybeMissing::Value(false),
            need_phone_number: MaybeMissing::Value(false),
            need_email: MaybeMissing::Value(false),
            need_shipping_address: MaybeMissing::Value(false),
            is_flexible: MaybeMissing::Value(true),
            delete_after: None,
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = MaybeMissing::Value(payload.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MediaGroupOptions {
    #[serde(rename = "reply_markup", skip_serializing_if = "MaybeMissing::is_missing")]
    pub components: MaybeMissing<Components>,
    #[serde(skip_serializing_if = "MaybeMissing::is_missing")]
    pub reply_to_message_id: MaybeMissing<MessageId>,
}

/// Send operations of a bot client.
///
/// Implementations own the connection, the token and any retry or
/// rate-limit policy.
#[async_trait]
pub trait BotClient: Send + Sync {
    async fn send_message(&self, chat_id: ChatId, text: String, opts: SendOptions)
        -> Result<Message>;

    async fn send_document(
        &self,
        chat_id: ChatId,
        document: FileInput,
        opts: MediaOptions,
    ) -> Result<Message>;

    async fn send_photo(&self, chat_id: ChatId, photo: FileInput, opts: MediaOptions)
        -> Result<Message>;

    async fn send_video(&self, chat_id: ChatId, video: FileInput, opts: MediaOptions)
        -> Result<Message>;

    async fn send_animation(
        &self,
        chat_id: ChatId,
        animation: FileInput,
        opts: AnimationOptions,
    ) -> Result<Message>;

    async fn send_audio(&self, chat_id: ChatId, audio: FileInput, opts: MediaOptions)
        -> Result<Message>;

    async fn send_location(
        &self,
        chat_id: ChatId,
        location: Location,
        opts: SendOptions,
    ) -> Result<Message>;

    async fn send_contact(
        &self,
        chat_id: ChatId,
        contact: Contact,
        opts: SendOptions,
    ) -> Result<Message>;

    async fn send_invoice(&self, chat_id: ChatId, invoice: Invoice) -> Result<Message>;

    async fn send_media_group(
        &self,
        chat_id: ChatId,
        media: Vec<InputMedia>,
        opts: MediaGroupOptions,
    ) -> Result<Vec<Message>>;
}
