use serde::{Deserialize, Serialize};

use crate::{
    client::{AnimationOptions, BotClient, Invoice, MediaGroupOptions, MediaOptions, SendOptions},
    domain::{ChatId, UserId},
    file_input::{FileInput, InputMedia},
    object::serde_object,
    types::{Contact, Location, Message},
    Result,
};

/// A Bale user or bot.
///
/// Equality and hashing use the user id only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "id")]
    user_id: UserId,
    #[serde(default)]
    is_bot: bool,
    first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

serde_object!(User => "user");

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

impl Eq for User {}

impl std::hash::Hash for User {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.user_id.hash(state);
    }
}

impl User {
    pub fn new(user_id: UserId, is_bot: bool, first_name: impl Into<String>) -> Self {
        Self {
            user_id,
            is_bot,
            first_name: first_name.into(),
            last_name: None,
            username: None,
        }
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn id(&self) -> UserId {
        self.user_id
    }

    /// Alias for [`User::id`].
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The private chat with this user has the same id as the user.
    pub fn chat_id(&self) -> ChatId {
        self.user_id.into()
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// `@username`, if the user has one.
    pub fn mention(&self) -> Option<String> {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| format!("@{u}"))
    }

    // Shortcuts: each forwards to the client with this user's chat as the
    // destination and every other argument untouched.

    pub async fn send<C>(
        &self,
        client: &C,
        text: impl Into<String>,
        opts: SendOptions,
    ) -> Result<Message>
    where
        C: BotClient + ?Sized,
    {
        client.send_message(self.chat_id(), text.into(), opts).await
    }

    pub async fn send_document<C>(
        &self,
        client: &C,
        document: impl Into<FileInput>,
        opts: MediaOptions,
    ) -> Result<Message>
    where
        C: BotClient + ?Sized,
    {
        client.send_document(self.chat_id(), document.into(), opts).await
    }

    pub async fn send_photo<C>(
        &self,
        client: &C,
        photo: impl Into<FileInput>,
        opts: MediaOptions,
    ) -> Result<Message>
    where
        C: BotClient + ?Sized,
    {
        client.send_photo(self.chat_id(), photo.into(), opts).await
    }

    pub async fn send_video<C>(
        &self,
        client: &C,
        video: impl Into<FileInput>,
        opts: MediaOptions,
    ) -> Result<Message>
    where
        C: BotClient + ?Sized,
    {
        client.send_video(self.chat_id(), video.into(), opts).await
    }

    pub async fn send_animation<C>(
        &self,
        client: &C,
        animation: impl Into<FileInput>,
        opts: AnimationOptions,
    ) -> Result<Message>
    where
        C: BotClient + ?Sized,
    {
        client
            .send_animation(self.chat_id(), animation.into(), opts)
            .await
    }

    pub async fn send_audio<C>(
        &self,
        client: &C,
        audio: impl Into<FileInput>,
        opts: MediaOptions,
    ) -> Result<Message>
    where
        C: BotClient + ?Sized,
    {
        client.send_audio(self.chat_id(), audio.into(), opts).await
    }

    pub async fn send_location<C>(
        &self,
        client: &C,
        location: Location,
        opts: SendOptions,
    ) -> Result<Message>
    where
        C: BotClient + ?Sized,
    {
        client.send_location(self.chat_id(), location, opts).await
    }

    pub async fn send_contact<C>(
        &self,
        client: &C,
        contact: Contact,
        opts: SendOptions,
    ) -> Result<Message>
    where
        C: BotClient + ?Sized,
    {
        client.send_contact(self.chat_id(), contact, opts).await
    }

    pub async fn send_invoice<C>(&self, client: &C, invoice: Invoice) -> Result<Message>
    where
        C: BotClient + ?Sized,
    {
        client.send_invoice(self.chat_id(), invoice).await
    }

    pub async fn send_media_group<C>(
        &self,
        client: &C,
        media: Vec<InputMedia>,
        opts: MediaGroupOptions,
    ) -> Result<Vec<Message>>
    where
        C: BotClient + ?Sized,
    {
        client.send_media_group(self.chat_id(), media, opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::BaleObject;
    use serde_json::json;

    fn alice() -> User {
        User::new(UserId::new(42).unwrap(), false, "Alice").with_username("alice")
    }

    #[test]
    fn mention_uses_username() {
        assert_eq!(alice().mention().as_deref(), Some("@alice"));
        let anon = User::new(UserId::new(7).unwrap(), false, "Bob");
        assert_eq!(anon.mention(), None);
    }

    #[test]
    fn wire_id_maps_to_user_id() {
        let user = User::from_payload(Some(&json!({
            "id": 42,
            "is_bot": true,
            "first_name": "Alice",
            "username": "alice"
        })))
        .unwrap()
        .unwrap();
        assert_eq!(user.user_id().get(), 42);
        assert_eq!(user.chat_id(), ChatId(42));
        assert!(user.is_bot());
        assert_eq!(user.last_name(), None);
    }

    #[test]
    fn to_dict_omits_absent_names() {
        let dict = alice().to_dict().unwrap();
        assert_eq!(
            serde_json::Value::Object(dict),
            json!({ "id": 42, "is_bot": false, "first_name": "Alice", "username": "alice" })
        );
    }

    #[test]
    fn non_positive_id_is_rejected() {
        let err =
            User::from_payload(Some(&json!({ "id": 0, "first_name": "Zero" }))).unwrap_err();
        assert!(err.to_string().contains("positive"), "{err}");
        assert!(UserId::new(-5).is_err());
    }

    #[test]
    fn equality_is_by_id() {
        let renamed = User::new(UserId::new(42).unwrap(), false, "Alicia");
        assert_eq!(alice(), renamed);
        let round_trip = User::from_dict(&alice().to_dict().unwrap()).unwrap();
        assert_eq!(round_trip.username(), Some("alice"));
        assert_eq!(round_trip.first_name(), "Alice");
    }

    mod dispatch {
        use super::*;
        use crate::{
            domain::MessageId,
            file_input::InputFile,
            maybe::MaybeMissing,
            types::{
                BaseFile, Chat, ChatType, Document, KeyboardButton, LabeledPrice,
                MenuKeyboardMarkup,
            },
        };
        use async_trait::async_trait;
        use std::sync::Mutex;
        use std::time::Duration;

        #[derive(Debug, Clone, PartialEq)]
        enum Call {
            Message(ChatId, String, SendOptions),
            Document(ChatId, FileInput, MediaOptions),
            Photo(ChatId, FileInput, MediaOptions),
            Video(ChatId, FileInput, MediaOptions),
            Animation(ChatId, FileInput, AnimationOptions),
            Audio(ChatId, FileInput, MediaOptions),
            Location(ChatId, Location, SendOptions),
            Contact(ChatId, Contact, SendOptions),
            Invoice(ChatId, Invoice),
            MediaGroup(ChatId, Vec<InputMedia>, MediaGroupOptions),
        }

        #[derive(Default)]
        struct FakeClient {
            calls: Mutex<Vec<Call>>,
        }

        impl FakeClient {
            fn record(&self, chat_id: ChatId, call: Call) -> Result<Message> {
                let mut calls = self.calls.lock().unwrap();
                calls.push(call);
                let id = MessageId(calls.len() as i64);
                Ok(Message::new(id, Chat::new(chat_id, ChatType::Private), 0))
            }

            fn calls(&self) -> Vec<Call> {
                self.calls.lock().unwrap().clone()
            }
        }

        #[async_trait]
        impl BotClient for FakeClient {
            async fn send_message(
                &self,
                chat_id: ChatId,
                text: String,
                opts: SendOptions,
            ) -> Result<Message> {
                self.record(chat_id, Call::Message(chat_id, text, opts))
            }

            async fn send_document(
                &self,
                chat_id: ChatId,
                document: FileInput,
                opts: MediaOptions,
            ) -> Result<Message> {
                self.record(chat_id, Call::Document(chat_id, document, opts))
            }

            async fn send_photo(
                &self,
                chat_id: ChatId,
                photo: FileInput,
                opts: MediaOptions,
            ) -> Result<Message> {
                self.record(chat_id, Call::Photo(chat_id, photo, opts))
            }

            async fn send_video(
                &self,
                chat_id: ChatId,
                video: FileInput,
                opts: MediaOptions,
            ) -> Result<Message> {
                self.record(chat_id, Call::Video(chat_id, video, opts))
            }

            async fn send_animation(
                &self,
                chat_id: ChatId,
                animation: FileInput,
                opts: AnimationOptions,
            ) -> Result<Message> {
                self.record(chat_id, Call::Animation(chat_id, animation, opts))
            }

            async fn send_audio(
                &self,
                chat_id: ChatId,
                audio: FileInput,
                opts: MediaOptions,
            ) -> Result<Message> {
                self.record(chat_id, Call::Audio(chat_id, audio, opts))
            }

            async fn send_location(
                &self,
                chat_id: ChatId,
                location: Location,
                opts: SendOptions,
            ) -> Result<Message> {
                self.record(chat_id, Call::Location(chat_id, location, opts))
            }

            async fn send_contact(
                &self,
                chat_id: ChatId,
                contact: Contact,
                opts: SendOptions,
            ) -> Result<Message> {
                self.record(chat_id, Call::Contact(chat_id, contact, opts))
            }

            async fn send_invoice(&self, chat_id: ChatId, invoice: Invoice) -> Result<Message> {
                self.record(chat_id, Call::Invoice(chat_id, invoice))
            }

            async fn send_media_group(
                &self,
                chat_id: ChatId,
                media: Vec<InputMedia>,
                opts: MediaGroupOptions,
            ) -> Result<Vec<Message>> {
                let n = media.len();
                let first = self.record(chat_id, Call::MediaGroup(chat_id, media, opts))?;
                Ok(vec![first; n])
            }
        }

        #[tokio::test]
        async fn send_injects_user_chat_and_keeps_options() {
            let client = FakeClient::default();
            let opts = SendOptions::default()
                .with_components(MenuKeyboardMarkup::new(vec![vec![
                    KeyboardButton::new("Share phone").with_request_contact(),
                ]]))
                .with_delete_after(Duration::from_secs(3));

            let sent = alice().send(&client, "Hi", opts.clone()).await.unwrap();

            assert_eq!(sent.chat().id(), ChatId(42));
            assert_eq!(
                client.calls(),
                vec![Call::Message(ChatId(42), "Hi".to_string(), opts)]
            );
        }

        #[tokio::test]
        async fn media_shortcuts_pass_arguments_through() {
            let client = FakeClient::default();
            let user = alice();
            let doc = Document::new(BaseFile::new("doc-1", "u-doc-1"));
            let caption = MediaOptions::default().with_caption("report");
            let null_caption = MediaOptions {
                caption: MaybeMissing::Null,
                ..Default::default()
            };

            user.send_document(&client, doc.clone(), caption.clone())
                .await
                .unwrap();
            user.send_photo(&client, b"raw".to_vec(), null_caption.clone())
                .await
                .unwrap();
            user.send_video(&client, InputFile::new(vec![0]), MediaOptions::default())
                .await
                .unwrap();
            user.send_audio(&client, "/music/a.mp3", MediaOptions::default())
                .await
                .unwrap();

            let calls = client.calls();
            assert_eq!(
                calls[0],
                Call::Document(ChatId(42), FileInput::from(doc), caption)
            );
            assert_eq!(
                calls[1],
                Call::Photo(ChatId(42), FileInput::Bytes(b"raw".to_vec()), null_caption)
            );
            assert!(matches!(&calls[2], Call::Video(ChatId(42), FileInput::File(_), _)));
            assert!(matches!(&calls[3], Call::Audio(ChatId(42), FileInput::Path(_), _)));
        }

        #[tokio::test]
        async fn remaining_shortcuts_reach_their_client_operation() {
            let client = FakeClient::default();
            let user = alice();
            let anim = AnimationOptions {
                duration: MaybeMissing::Value(3),
                ..Default::default()
            };
            let invoice = Invoice::new("T", "D", "6037", vec![LabeledPrice::new("x", 1000)]);
            let media = vec![InputMedia::photo("p.jpg"), InputMedia::photo("q.jpg")];

            user.send_animation(&client, b"gif".to_vec(), anim.clone())
                .await
                .unwrap();
            user.send_location(&client, Location::new(51.4, 35.7), SendOptions::default())
                .await
                .unwrap();
            user.send_contact(&client, Contact::new("0912", "Sara"), SendOptions::default())
                .await
                .unwrap();
            user.send_invoice(&client, invoice.clone()).await.unwrap();
            let group = user
                .send_media_group(&client, media.clone(), MediaGroupOptions::default())
                .await
                .unwrap();

            assert_eq!(group.len(), 2);
            let calls = client.calls();
            assert_eq!(
                calls[0],
                Call::Animation(ChatId(42), FileInput::Bytes(b"gif".to_vec()), anim)
            );
            assert!(matches!(&calls[1], Call::Location(ChatId(42), _, _)));
            assert!(matches!(&calls[2], Call::Contact(ChatId(42), _, _)));
            assert_eq!(calls[3], Call::Invoice(ChatId(42), invoice));
            assert_eq!(
                calls[4],
                Call::MediaGroup(ChatId(42), media, MediaGroupOptions::default())
            );
        }

        #[tokio::test]
        async fn shortcuts_work_through_a_trait_object() {
            let client: Box<dyn BotClient> = Box::new(FakeClient::default());
            let sent = alice()
                .send(client.as_ref(), "via dyn", SendOptions::default())
                .await
                .unwrap();
            assert_eq!(sent.id(), MessageId(1));
        }
    }
}
