//! Offline tooling: a [`BotClient`] that records what it would send, and a
//! replayer that feeds recorded updates through classification and a small
//! echo handler.

use std::{
    path::Path,
    sync::{
        atomic::{AtomicI64, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use bale_core::{
    client::{AnimationOptions, BotClient, Invoice, MediaGroupOptions, MediaOptions, SendOptions},
    config::Config,
    domain::{ChatId, MessageId},
    file_input::{parse_file_input, FileInput, InputMedia, ParsedFile, DEFAULT_FILE_NAME},
    object::{encode, JsonDict},
    types::{AttachmentKind, Chat, ChatType, Contact, Location, Message},
    BaleObject, Result, Update, UpdateKind, UpdateType,
};

/// A multipart part a request would have carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedUpload {
    /// Part name, referenced from the payload as `attach://{attach}`.
    pub attach: String,
    pub file_name: String,
}

/// One request the dry-run client would have sent.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    /// Endpoint with the token secret masked.
    pub url: String,
    pub payload: Value,
    pub uploads: Vec<RecordedUpload>,
    pub delete_after: Option<Duration>,
}

impl RecordedRequest {
    pub fn to_json(&self) -> Value {
        let uploads: Vec<Value> = self
            .uploads
            .iter()
            .map(|u| json!({ "attach": u.attach, "file_name": u.file_name }))
            .collect();
        json!({
            "method": self.method,
            "url": self.url,
            "payload": self.payload,
            "uploads": uploads,
            "delete_after_secs": self.delete_after.map(|d| d.as_secs_f64()),
        })
    }
}

/// Uploads of one request. Part names are numbered so they never collide.
#[derive(Default)]
struct Uploads(Vec<RecordedUpload>);

impl Uploads {
    /// What goes in a file field: an id, or a reference to a new part.
    fn reference(&mut self, parsed: &ParsedFile) -> Value {
        let file_name = match parsed {
            ParsedFile::FileId(id) => return Value::String(id.clone()),
            ParsedFile::Upload(f) => f.file_name().unwrap_or(DEFAULT_FILE_NAME).to_string(),
            ParsedFile::Handle { path, .. } => file_name(path),
        };
        let attach = format!("file{}", self.0.len());
        let value = Value::String(format!("attach://{attach}"));
        self.0.push(RecordedUpload { attach, file_name });
        value
    }
}

/// Records wire-shaped requests instead of calling the API.
///
/// Every send answers with a synthesized message so handlers can carry on.
pub struct DryRunClient {
    cfg: Config,
    next_message_id: AtomicI64,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl DryRunClient {
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            next_message_id: AtomicI64::new(1),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log().clone()
    }

    // Entries are pushed whole, so a poisoned log is still consistent.
    fn log(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(
        &self,
        method: &'static str,
        chat_id: ChatId,
        params: JsonDict,
        uploads: Uploads,
        delete_after: Option<Duration>,
    ) -> Message {
        let mut payload = JsonDict::new();
        payload.insert("chat_id".to_string(), Value::from(chat_id.0));
        payload.extend(params);

        let delete_after = delete_after.or(self.cfg.default_delete_after);
        let req = RecordedRequest {
            method,
            url: format!(
                "{}/bot{}/{method}",
                self.cfg.api_base_url,
                self.cfg.masked_token()
            ),
            payload: Value::Object(payload),
            uploads: uploads.0,
            delete_after,
        };
        tracing::info!(method, chat_id = chat_id.0, ?delete_after, "dry-run request");

        self.log().push(req);
        self.reply(chat_id)
    }

    fn reply(&self, chat_id: ChatId) -> Message {
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        let kind = if chat_id.0 > 0 {
            ChatType::Private
        } else {
            ChatType::Group
        };
        Message::new(
            MessageId(id),
            Chat::new(chat_id, kind),
            chrono::Utc::now().timestamp(),
        )
    }

    /// Shared path of every single-file send. `opts` is what goes on the
    /// wire; `media` carries the caption, upload name and delete delay.
    #[allow(clippy::too_many_arguments)]
    fn send_file<O: Serialize>(
        &self,
        method: &'static str,
        field: &str,
        kind: AttachmentKind,
        chat_id: ChatId,
        file: FileInput,
        opts: &O,
        media: &MediaOptions,
    ) -> Result<Message> {
        let parsed = parse_file_input(file, Some(kind), media.file_name.clone())?;
        let mut uploads = Uploads::default();
        let mut params = encode(method, opts)?;
        params.insert(field.to_string(), uploads.reference(&parsed));
        let sent = self.record(method, chat_id, params, uploads, media.send.delete_after);
        Ok(match media.caption.value() {
            Some(c) => sent.with_caption(c.clone()),
            None => sent,
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string()
}

#[async_trait]
impl BotClient for DryRunClient {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: String,
        opts: SendOptions,
    ) -> Result<Message> {
        let mut params = encode("sendMessage", &opts)?;
        params.insert("text".to_string(), Value::String(text.clone()));
        let sent = self.record(
            "sendMessage",
            chat_id,
            params,
            Uploads::default(),
            opts.delete_after,
        );
        Ok(sent.with_text(text))
    }

    async fn send_document(
        &self,
        chat_id: ChatId,
        document: FileInput,
        opts: MediaOptions,
    ) -> Result<Message> {
        self.send_file(
            "sendDocument",
            "document",
            AttachmentKind::Document,
            chat_id,
            document,
            &opts,
            &opts,
        )
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: FileInput,
        opts: MediaOptions,
    ) -> Result<Message> {
        self.send_file("sendPhoto", "photo", AttachmentKind::Photo, chat_id, photo, &opts, &opts)
    }

    async fn send_video(
        &self,
        chat_id: ChatId,
        video: FileInput,
        opts: MediaOptions,
    ) -> Result<Message> {
        self.send_file("sendVideo", "video", AttachmentKind::Video, chat_id, video, &opts, &opts)
    }

    async fn send_animation(
        &self,
        chat_id: ChatId,
        animation: FileInput,
        opts: AnimationOptions,
    ) -> Result<Message> {
        self.send_file(
            "sendAnimation",
            "animation",
            AttachmentKind::Animation,
            chat_id,
            animation,
            &opts,
            &opts.media,
        )
    }

    async fn send_audio(
        &self,
        chat_id: ChatId,
        audio: FileInput,
        opts: MediaOptions,
    ) -> Result<Message> {
        self.send_file("sendAudio", "audio", AttachmentKind::Audio, chat_id, audio, &opts, &opts)
    }

    async fn send_location(
        &self,
        chat_id: ChatId,
        location: Location,
        opts: SendOptions,
    ) -> Result<Message> {
        let mut params = encode("sendLocation", &opts)?;
        params.extend(location.to_dict()?);
        Ok(self.record("sendLocation", chat_id, params, Uploads::default(), opts.delete_after))
    }

    async fn send_contact(
        &self,
        chat_id: ChatId,
        contact: Contact,
        opts: SendOptions,
    ) -> Result<Message> {
        let mut params = encode("sendContact", &opts)?;
        params.extend(contact.to_dict()?);
        Ok(self.record("sendContact", chat_id, params, Uploads::default(), opts.delete_after))
    }

    async fn send_invoice(&self, chat_id: ChatId, invoice: Invoice) -> Result<Message> {
        let params = encode("sendInvoice", &invoice)?;
        Ok(self.record("sendInvoice", chat_id, params, Uploads::default(), invoice.delete_after))
    }

    async fn send_media_group(
        &self,
        chat_id: ChatId,
        media: Vec<InputMedia>,
        opts: MediaGroupOptions,
    ) -> Result<Vec<Message>> {
        let count = media.len();
        let mut uploads = Uploads::default();
        let mut items = Vec::with_capacity(count);
        for item in media {
            let (kind, parsed, caption) = item.parse()?;
            let mut entry = JsonDict::new();
            entry.insert("type".to_string(), Value::from(kind.as_str()));
            entry.insert("media".to_string(), uploads.reference(&parsed));
            if !caption.is_missing() {
                entry.insert("caption".to_string(), serde_json::to_value(&caption)?);
            }
            items.push(Value::Object(entry));
        }

        let mut params = encode("sendMediaGroup", &opts)?;
        params.insert("media".to_string(), Value::Array(items));
        let first = self.record("sendMediaGroup", chat_id, params, uploads, None);

        let mut sent = vec![first];
        sent.extend((1..count).map(|_| self.reply(chat_id)));
        Ok(sent)
    }
}

/// Counts of what a replay saw and did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub messages: usize,
    pub callback_queries: usize,
    pub unknown: usize,
    pub skipped: usize,
    pub replies: usize,
}

/// Read one update payload per line and run the echo handler on each.
///
/// Lines that are not valid updates are logged and skipped.
pub async fn replay<R, C>(reader: R, client: &C) -> Result<ReplaySummary>
where
    R: AsyncBufRead + Unpin,
    C: BotClient + ?Sized,
{
    let mut summary = ReplaySummary::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let update = match parse_update(line) {
            Ok(Some(update)) => update,
            Ok(None) => {
                tracing::warn!(line = line_no, "empty update payload, skipping");
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "invalid update, skipping");
                summary.skipped += 1;
                continue;
            }
        };

        match update.update_type() {
            UpdateType::Message => summary.messages += 1,
            UpdateType::CallbackQuery => summary.callback_queries += 1,
            UpdateType::Unknown => summary.unknown += 1,
        }

        if handle_update(&update, client).await? {
            summary.replies += 1;
        }
    }

    Ok(summary)
}

fn parse_update(line: &str) -> Result<Option<Update>> {
    let payload: Value = serde_json::from_str(line)?;
    Update::from_payload(Some(&payload))
}

/// Echo text back to its author; acknowledge button presses.
///
/// Returns whether a reply was sent.
pub async fn handle_update<C>(update: &Update, client: &C) -> Result<bool>
where
    C: BotClient + ?Sized,
{
    match update.kind() {
        UpdateKind::Message(msg) => {
            let (Some(author), Some(text)) = (msg.author(), msg.content()) else {
                return Ok(false);
            };
            author
                .send(client, format!("echo: {text}"), SendOptions::default())
                .await?;
            Ok(true)
        }
        UpdateKind::CallbackQuery(q) => {
            let data = q.data().unwrap_or("");
            q.from()
                .send(client, format!("pressed: {data}"), SendOptions::default())
                .await?;
            Ok(true)
        }
        UpdateKind::EditedMessage(_) | UpdateKind::Unknown => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bale_core::{
        errors::Error,
        file_input::InputFile,
        types::{BaseFile, Document, InlineKeyboardMarkup, PhotoSize},
        MaybeMissing,
    };

    fn client() -> DryRunClient {
        let cfg =
            Config::from_lookup(|k| (k == "BALE_BOT_TOKEN").then(|| "99:secret".to_string()))
                .unwrap();
        DryRunClient::new(cfg)
    }

    #[tokio::test]
    async fn send_message_records_wire_payload() {
        let client = client();
        let opts = SendOptions::default().with_components(InlineKeyboardMarkup::one_per_row(
            "q",
            &["yes".to_string()],
            10,
        ));
        let sent = client
            .send_message(ChatId(7), "hello".to_string(), opts)
            .await
            .unwrap();

        assert_eq!(sent.text(), Some("hello"));
        assert_eq!(sent.chat().id(), ChatId(7));
        let reqs = client.requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].method, "sendMessage");
        assert_eq!(reqs[0].url, "https://tapi.bale.ai/bot99:***/sendMessage");
        assert_eq!(
            reqs[0].payload,
            json!({
                "chat_id": 7,
                "text": "hello",
                "reply_markup": { "inline_keyboard": [[{ "text": "yes", "callback_data": "q:0" }]] }
            })
        );
    }

    #[tokio::test]
    async fn file_sends_use_ids_or_attach_references() {
        let client = client();
        let doc = Document::new(BaseFile::new("doc-1", "u-doc-1"));
        client
            .send_document(
                ChatId(7),
                doc.into(),
                MediaOptions {
                    caption: MaybeMissing::Null,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let sent = client
            .send_photo(
                ChatId(7),
                InputFile::new(b"png".to_vec()).with_file_name("cat.png").into(),
                MediaOptions::default().with_caption("cat"),
            )
            .await
            .unwrap();
        assert_eq!(sent.caption(), Some("cat"));

        let reqs = client.requests();
        assert_eq!(
            reqs[0].payload,
            json!({ "chat_id": 7, "document": "doc-1", "caption": null })
        );
        assert_eq!(
            reqs[1].payload,
            json!({ "chat_id": 7, "photo": "attach://file0", "caption": "cat" })
        );
        assert_eq!(
            reqs[1].uploads,
            vec![RecordedUpload {
                attach: "file0".to_string(),
                file_name: "cat.png".to_string(),
            }]
        );
        assert!(reqs[0].uploads.is_empty());
    }

    #[tokio::test]
    async fn wrong_attachment_kind_is_rejected_before_recording() {
        let client = client();
        let photo = PhotoSize::new(BaseFile::new("p", "u-p"), 1, 1);
        let err = client
            .send_video(ChatId(7), photo.into(), MediaOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileInput(_)));
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn media_group_returns_one_message_per_item() {
        let client = client();
        let photo = PhotoSize::new(BaseFile::new("p", "u-p"), 1, 1);
        let sent = client
            .send_media_group(
                ChatId(-100),
                vec![
                    InputMedia::photo(photo.clone()).with_caption("one"),
                    InputMedia::photo(photo),
                ],
                MediaGroupOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].chat().kind(), ChatType::Group);
        assert_eq!(
            client.requests()[0].payload["media"],
            json!([
                { "type": "photo", "media": "p", "caption": "one" },
                { "type": "photo", "media": "p" }
            ])
        );
    }

    #[tokio::test]
    async fn unnamed_uploads_get_distinct_parts() {
        let client = client();
        client
            .send_media_group(
                ChatId(7),
                vec![
                    InputMedia::photo(b"aaa".to_vec()),
                    InputMedia::photo(InputFile::new(b"bbb".to_vec())),
                    InputMedia::photo(PhotoSize::new(BaseFile::new("p", "u-p"), 1, 1)),
                ],
                MediaGroupOptions::default(),
            )
            .await
            .unwrap();

        let req = &client.requests()[0];
        assert_eq!(
            req.payload["media"],
            json!([
                { "type": "photo", "media": "attach://file0" },
                { "type": "photo", "media": "attach://file1" },
                { "type": "photo", "media": "p" }
            ])
        );
        let names: Vec<_> = req.uploads.iter().map(|u| u.attach.as_str()).collect();
        assert_eq!(names, ["file0", "file1"]);
        assert!(req.uploads.iter().all(|u| u.file_name == DEFAULT_FILE_NAME));
        assert_eq!(
            req.to_json()["uploads"],
            json!([
                { "attach": "file0", "file_name": "file" },
                { "attach": "file1", "file_name": "file" }
            ])
        );
    }

    #[tokio::test]
    async fn animation_reply_keeps_caption() {
        let client = client();
        let opts = AnimationOptions {
            width: MaybeMissing::Value(320),
            media: MediaOptions::default().with_caption("loop"),
            ..Default::default()
        };
        let sent = client
            .send_animation(ChatId(7), b"gif".to_vec().into(), opts)
            .await
            .unwrap();

        assert_eq!(sent.caption(), Some("loop"));
        assert_eq!(
            client.requests()[0].payload,
            json!({
                "chat_id": 7,
                "animation": "attach://file0",
                "width": 320,
                "caption": "loop"
            })
        );
    }

    #[tokio::test]
    async fn poisoned_log_keeps_recording() {
        let client = std::sync::Arc::new(client());
        let held = client.clone();
        let _ = std::thread::spawn(move || {
            let _guard = held.requests.lock().unwrap();
            panic!("handler crashed mid-record");
        })
        .join();
        assert!(client.requests.is_poisoned());

        client
            .send_message(ChatId(7), "still here".to_string(), SendOptions::default())
            .await
            .unwrap();
        let reqs = client.requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].payload["text"], json!("still here"));
    }

    #[test]
    fn non_object_options_are_rejected() {
        let err = encode("sendMessage", &"plain").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPayload {
                object: "sendMessage",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn replay_echoes_and_skips_bad_lines() {
        let input = [
            r#"{"update_id": 1, "message": {"message_id": 1, "from": {"id": 5, "is_bot": false, "first_name": "Sara"}, "chat": {"id": 5, "type": "private"}, "date": 0, "text": "salam"}}"#,
            "",
            "not json",
            r#"{"message": {}}"#,
            r#"{"update_id": 2, "callback_query": {"id": "c", "from": {"id": 6, "is_bot": false, "first_name": "Reza"}, "data": "pick:1"}}"#,
            r#"{"update_id": 3}"#,
            r#"{}"#,
        ]
        .join("\n");

        let client = client();
        let summary = replay(input.as_bytes(), &client).await.unwrap();

        assert_eq!(
            summary,
            ReplaySummary {
                messages: 1,
                callback_queries: 1,
                unknown: 1,
                skipped: 3,
                replies: 2,
            }
        );
        let reqs = client.requests();
        assert_eq!(reqs[0].payload, json!({ "chat_id": 5, "text": "echo: salam" }));
        assert_eq!(reqs[1].payload, json!({ "chat_id": 6, "text": "pressed: pick:1" }));
    }

    #[tokio::test]
    async fn default_delete_after_fills_in() {
        let cfg = Config::from_lookup(|k| match k {
            "BALE_BOT_TOKEN" => Some("1:x".to_string()),
            "BALE_DEFAULT_DELETE_AFTER_SECS" => Some("60".to_string()),
            _ => None,
        })
        .unwrap();
        let client = DryRunClient::new(cfg);
        client
            .send_location(ChatId(3), Location::new(51.4, 35.7), SendOptions::default())
            .await
            .unwrap();
        let req = &client.requests()[0];
        assert_eq!(req.delete_after, Some(Duration::from_secs(60)));
        assert_eq!(
            req.payload,
            json!({ "chat_id": 3, "longitude": 51.4, "latitude": 35.7 })
        );
        assert_eq!(req.to_json()["delete_after_secs"], json!(60.0));
    }
}
