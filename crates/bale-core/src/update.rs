//! Inbound update envelope and its classification.

use std::fmt;

use serde_json::Value;

use crate::{
    domain::UpdateId,
    errors::Error,
    object::{BaleObject, JsonDict},
    types::{CallbackQuery, Message},
    Result,
};

/// What an update carries. Exactly one variant per update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateKind {
    CallbackQuery(CallbackQuery),
    Message(Message),
    EditedMessage(Message),
    Unknown,
}

/// Coarse update type exposed to handlers.
///
/// Edited messages report [`UpdateType::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateType {
    CallbackQuery,
    Message,
    Unknown,
}

impl UpdateType {
    pub fn as_str(self) -> &'static str {
        match self {
            UpdateType::CallbackQuery => "callback_query",
            UpdateType::Message => "message",
            UpdateType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inbound event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    id: UpdateId,
    kind: UpdateKind,
}

impl Update {
    pub fn new(id: UpdateId, kind: UpdateKind) -> Self {
        Self { id, kind }
    }

    /// Pick the update kind by priority: callback query, then message, then
    /// edited message. Lower-priority sections are dropped.
    pub fn classify(
        id: UpdateId,
        callback_query: Option<CallbackQuery>,
        message: Option<Message>,
        edited_message: Option<Message>,
    ) -> Self {
        let kind = match (callback_query, message, edited_message) {
            (Some(q), _, _) => UpdateKind::CallbackQuery(q),
            (None, Some(m), _) => UpdateKind::Message(m),
            (None, None, Some(m)) => UpdateKind::EditedMessage(m),
            (None, None, None) => UpdateKind::Unknown,
        };
        Self::new(id, kind)
    }

    pub fn id(&self) -> UpdateId {
        self.id
    }

    pub fn kind(&self) -> &UpdateKind {
        &self.kind
    }

    pub fn into_kind(self) -> UpdateKind {
        self.kind
    }

    pub fn update_type(&self) -> UpdateType {
        match self.kind {
            UpdateKind::CallbackQuery(_) => UpdateType::CallbackQuery,
            UpdateKind::Message(_) => UpdateType::Message,
            UpdateKind::EditedMessage(_) | UpdateKind::Unknown => UpdateType::Unknown,
        }
    }

    /// The message of a message update, or the message a pressed callback
    /// button was attached to.
    pub fn message(&self) -> Option<&Message> {
        match &self.kind {
            UpdateKind::CallbackQuery(q) => q.message(),
            UpdateKind::Message(m) => Some(m),
            UpdateKind::EditedMessage(_) | UpdateKind::Unknown => None,
        }
    }

    pub fn callback_query(&self) -> Option<&CallbackQuery> {
        match &self.kind {
            UpdateKind::CallbackQuery(q) => Some(q),
            _ => None,
        }
    }

    pub fn edited_message(&self) -> Option<&Message> {
        match &self.kind {
            UpdateKind::EditedMessage(m) => Some(m),
            _ => None,
        }
    }
}

impl BaleObject for Update {
    const NAME: &'static str = "update";

    fn from_dict(data: &JsonDict) -> Result<Self> {
        let raw_id = data
            .get("update_id")
            .or_else(|| data.get("id"))
            .ok_or(Error::MissingField {
                object: Self::NAME,
                field: "update_id",
            })?;
        let id = raw_id.as_i64().map(UpdateId).ok_or_else(|| {
            Error::invalid(Self::NAME, format!("update_id is not an integer: {raw_id}"))
        })?;

        // First match wins; lower-priority sections are never parsed.
        let kind = if let Some(q) = CallbackQuery::from_payload(data.get("callback_query"))? {
            UpdateKind::CallbackQuery(q)
        } else if let Some(m) = Message::from_payload(data.get("message"))? {
            UpdateKind::Message(m)
        } else if let Some(m) = Message::from_payload(data.get("edited_message"))? {
            UpdateKind::EditedMessage(m)
        } else {
            UpdateKind::Unknown
        };

        let update = Self::new(id, kind);
        tracing::debug!(update_id = id.0, kind = %update.update_type(), "classified update");
        Ok(update)
    }

    fn to_dict(&self) -> Result<JsonDict> {
        let mut data = JsonDict::new();
        data.insert("update_id".to_string(), Value::from(self.id.0));
        match &self.kind {
            UpdateKind::CallbackQuery(q) => {
                data.insert("callback_query".to_string(), q.to_payload()?);
            }
            UpdateKind::Message(m) => {
                data.insert("message".to_string(), m.to_payload()?);
            }
            UpdateKind::EditedMessage(m) => {
                data.insert("edited_message".to_string(), m.to_payload()?);
            }
            UpdateKind::Unknown => {}
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageId;
    use serde_json::json;

    fn message(id: i64, text: &str) -> Value {
        json!({
            "message_id": id,
            "from": { "id": 5, "is_bot": false, "first_name": "Sara" },
            "chat": { "id": 5, "type": "private" },
            "date": 1700000000,
            "text": text
        })
    }

    fn parse(payload: Value) -> Update {
        Update::from_payload(Some(&payload)).unwrap().unwrap()
    }

    #[test]
    fn callback_query_wins_over_plain_message() {
        let update = parse(json!({
            "update_id": 1,
            "callback_query": {
                "id": "cb-1",
                "from": { "id": 5, "is_bot": false, "first_name": "Sara" },
                "message": message(77, "pick one"),
                "data": "pick:0"
            },
            "message": message(78, "unrelated")
        }));

        assert_eq!(update.id(), UpdateId(1));
        assert_eq!(update.update_type(), UpdateType::CallbackQuery);
        assert_eq!(update.update_type().as_str(), "callback_query");
        let embedded = update.callback_query().and_then(|q| q.message()).unwrap();
        assert_eq!(update.message(), Some(embedded));
        assert_eq!(update.message().map(|m| m.id()), Some(MessageId(77)));
    }

    #[test]
    fn message_only_is_a_message_update() {
        let update = parse(json!({ "update_id": 2, "message": message(3, "hi") }));
        assert_eq!(update.update_type(), UpdateType::Message);
        assert_eq!(update.message().and_then(|m| m.text()), Some("hi"));
        assert!(update.callback_query().is_none());
    }

    #[test]
    fn unknown_chat_type_keeps_the_message() {
        let update = parse(json!({
            "update_id": 13,
            "message": {
                "message_id": 1,
                "chat": { "id": 5, "type": "bot" },
                "date": 0,
                "text": "x"
            }
        }));
        assert_eq!(update.update_type(), UpdateType::Message);
        let msg = update.message().unwrap();
        assert_eq!(msg.chat().kind(), crate::types::ChatType::Unknown);
        assert_eq!(msg.text(), Some("x"));
    }

    #[test]
    fn edited_message_is_kept_but_typed_unknown() {
        let update = parse(json!({ "update_id": 3, "edited_message": message(4, "fixed") }));
        assert_eq!(update.update_type(), UpdateType::Unknown);
        assert!(update.message().is_none());
        assert_eq!(update.edited_message().and_then(|m| m.text()), Some("fixed"));
    }

    #[test]
    fn no_content_is_unknown_not_an_error() {
        let update = parse(json!({ "update_id": 4 }));
        assert_eq!(update.update_type(), UpdateType::Unknown);
        assert_eq!(update.kind(), &UpdateKind::Unknown);
        assert!(update.message().is_none());
        assert!(update.callback_query().is_none());

        let nulls = parse(json!({ "update_id": 5, "message": null, "callback_query": null }));
        assert_eq!(nulls.update_type(), UpdateType::Unknown);
    }

    #[test]
    fn missing_update_id_is_a_construction_error() {
        let err = Update::from_payload(Some(&json!({ "message": message(1, "x") }))).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                object: "update",
                field: "update_id"
            }
        ));
    }

    #[test]
    fn plain_id_key_is_accepted() {
        let update = parse(json!({ "id": 9 }));
        assert_eq!(update.id(), UpdateId(9));
    }

    #[test]
    fn lower_priority_sections_are_not_parsed() {
        // A broken `message` next to a valid callback query must not fail.
        let update = parse(json!({
            "update_id": 6,
            "callback_query": {
                "id": "cb-2",
                "from": { "id": 5, "is_bot": false, "first_name": "Sara" }
            },
            "message": { "garbage": true }
        }));
        assert_eq!(update.update_type(), UpdateType::CallbackQuery);
        assert!(update.message().is_none());
    }

    #[test]
    fn classify_applies_the_same_priority() {
        let m1 = Message::from_payload(Some(&message(1, "a"))).unwrap().unwrap();
        let m2 = Message::from_payload(Some(&message(2, "b"))).unwrap().unwrap();
        let update = Update::classify(UpdateId(10), None, Some(m1.clone()), Some(m2));
        assert_eq!(update.kind(), &UpdateKind::Message(m1));

        let empty = Update::classify(UpdateId(11), None, None, None);
        assert_eq!(empty.update_type(), UpdateType::Unknown);
    }

    #[test]
    fn to_dict_round_trips() {
        let update = parse(json!({ "update_id": 12, "edited_message": message(8, "v2") }));
        let dict = update.to_dict().unwrap();
        assert_eq!(dict.get("update_id"), Some(&json!(12)));
        assert!(!dict.contains_key("message"));
        let back = Update::from_dict(&dict).unwrap();
        assert_eq!(back, update);
    }
}
