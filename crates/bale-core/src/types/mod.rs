//! Typed wire objects.

mod callback_query;
mod chat;
mod contact;
mod files;
mod keyboard;
mod location;
mod message;
mod payments;
mod user;

pub use callback_query::CallbackQuery;
pub use chat::{Chat, ChatType};
pub use contact::Contact;
pub use files::{
    Animation, Attachment, AttachmentKind, Audio, BaseFile, Document, PhotoSize, RemoteFile,
    Video,
};
pub use keyboard::{
    Components, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, MenuKeyboardMarkup,
};
pub use location::Location;
pub use message::Message;
pub use payments::LabeledPrice;
pub use user::User;
