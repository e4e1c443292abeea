use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::object::serde_object;

/// Fields shared by every downloadable file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFile {
    file_id: String,
    file_unique_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_size: Option<u64>,
}

impl BaseFile {
    pub fn new(file_id: impl Into<String>, file_unique_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
            file_unique_id: file_unique_id.into(),
            file_size: None,
        }
    }

    pub fn with_file_size(mut self, bytes: u64) -> Self {
        self.file_size = Some(bytes);
        self
    }

    /// Identifier that can be used to download or resend the file.
    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    /// Stable over time and across bots; cannot be used to download.
    pub fn file_unique_id(&self) -> &str {
        &self.file_unique_id
    }

    pub fn file_size(&self) -> Option<u64> {
        self.file_size
    }
}

/// The attachment families a file input can be checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    Document,
    Photo,
    Video,
    Audio,
    Animation,
}

impl AttachmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AttachmentKind::Document => "document",
            AttachmentKind::Photo => "photo",
            AttachmentKind::Video => "video",
            AttachmentKind::Audio => "audio",
            AttachmentKind::Animation => "animation",
        }
    }
}

/// A file already stored on the Bale servers.
pub trait RemoteFile {
    const KIND: AttachmentKind;

    fn base(&self) -> &BaseFile;

    fn file_id(&self) -> &str {
        self.base().file_id()
    }

    fn file_unique_id(&self) -> &str {
        self.base().file_unique_id()
    }

    fn file_size(&self) -> Option<u64> {
        self.base().file_size()
    }
}

// Files compare and hash by `file_id`.
macro_rules! file_identity {
    ($($ty:ty => $kind:expr),+ $(,)?) => {
        $(
            impl RemoteFile for $ty {
                const KIND: AttachmentKind = $kind;

                fn base(&self) -> &BaseFile {
                    &self.base
                }
            }

            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.base.file_id == other.base.file_id
                }
            }

            impl Eq for $ty {}

            impl Hash for $ty {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    self.base.file_id.hash(state);
                }
            }
        )+
    };
}

/// One size of a photo or a file thumbnail.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhotoSize {
    #[serde(flatten)]
    base: BaseFile,
    width: u32,
    height: u32,
}

impl PhotoSize {
    pub fn new(base: BaseFile, width: u32, height: u32) -> Self {
        Self {
            base,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// A general file (as opposed to photos, voice messages and audio files).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    #[serde(flatten)]
    base: BaseFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail: Option<PhotoSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
}

impl Document {
    pub fn new(base: BaseFile) -> Self {
        Self {
            base,
            thumbnail: None,
            file_name: None,
            mime_type: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: PhotoSize) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn thumbnail(&self) -> Option<&PhotoSize> {
        self.thumbnail.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Video {
    #[serde(flatten)]
    base: BaseFile,
    width: u32,
    height: u32,
    duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail: Option<PhotoSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
}

impl Video {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Duration in seconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn thumbnail(&self) -> Option<&PhotoSize> {
        self.thumbnail.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

/// Animation file (GIF or H.264/MPEG-4 AVC video without sound).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Animation {
    #[serde(flatten)]
    base: BaseFile,
    width: u32,
    height: u32,
    duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail: Option<PhotoSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
}

impl Animation {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn thumbnail(&self) -> Option<&PhotoSize> {
        self.thumbnail.as_ref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

/// Audio file to be treated as music.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Audio {
    #[serde(flatten)]
    base: BaseFile,
    duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
}

impl Audio {
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

file_identity!(
    PhotoSize => AttachmentKind::Photo,
    Document => AttachmentKind::Document,
    Video => AttachmentKind::Video,
    Animation => AttachmentKind::Animation,
    Audio => AttachmentKind::Audio,
);

serde_object!(
    PhotoSize => "photo size",
    Document => "document",
    Video => "video",
    Animation => "animation",
    Audio => "audio",
);

/// Any remote file that can be resent by id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Attachment {
    Document(Document),
    Photo(PhotoSize),
    Video(Video),
    Audio(Audio),
    Animation(Animation),
}

impl Attachment {
    pub fn kind(&self) -> AttachmentKind {
        match self {
            Attachment::Document(_) => AttachmentKind::Document,
            Attachment::Photo(_) => AttachmentKind::Photo,
            Attachment::Video(_) => AttachmentKind::Video,
            Attachment::Audio(_) => AttachmentKind::Audio,
            Attachment::Animation(_) => AttachmentKind::Animation,
        }
    }

    pub fn file_id(&self) -> &str {
        match self {
            Attachment::Document(f) => f.file_id(),
            Attachment::Photo(f) => f.file_id(),
            Attachment::Video(f) => f.file_id(),
            Attachment::Audio(f) => f.file_id(),
            Attachment::Animation(f) => f.file_id(),
        }
    }
}

impl From<Document> for Attachment {
    fn from(f: Document) -> Self {
        Attachment::Document(f)
    }
}

impl From<PhotoSize> for Attachment {
    fn from(f: PhotoSize) -> Self {
        Attachment::Photo(f)
    }
}

impl From<Video> for Attachment {
    fn from(f: Video) -> Self {
        Attachment::Video(f)
    }
}

impl From<Audio> for Attachment {
    fn from(f: Audio) -> Self {
        Attachment::Audio(f)
    }
}

impl From<Animation> for Attachment {
    fn from(f: Animation) -> Self {
        Attachment::Animation(f)
    }
}
