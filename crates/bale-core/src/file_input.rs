//! Outgoing file arguments and their normalization.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::{
    errors::Error,
    maybe::MaybeMissing,
    types::{Animation, Attachment, AttachmentKind, Audio, Document, PhotoSize, Video},
    Result,
};

/// File name used for uploads that did not get one.
pub const DEFAULT_FILE_NAME: &str = "file";

/// A named in-memory file ready to be uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputFile {
    data: Vec<u8>,
    file_name: Option<String>,
    mime_type: Option<String>,
}

impl InputFile {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            file_name: None,
            mime_type: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Multipart form part for transports that upload over HTTP.
    pub fn into_part(self) -> Result<reqwest::multipart::Part> {
        let name = self
            .file_name
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
        let part = reqwest::multipart::Part::bytes(self.data).file_name(name);
        match self.mime_type {
            Some(mime) => part
                .mime_str(&mime)
                .map_err(|e| Error::UnsupportedFileInput(format!("bad mime type {mime}: {e}"))),
            None => Ok(part),
        }
    }
}

/// Everything a send call accepts as a file argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileInput {
    /// Raw content; wrapped into an [`InputFile`].
    Bytes(Vec<u8>),
    /// A local path; must point at an existing regular file.
    Path(PathBuf),
    /// A file already on the server; resent by id.
    Attachment(Attachment),
    /// An already wrapped file; passed through.
    File(InputFile),
}

impl From<Vec<u8>> for FileInput {
    fn from(v: Vec<u8>) -> Self {
        FileInput::Bytes(v)
    }
}

impl From<&[u8]> for FileInput {
    fn from(v: &[u8]) -> Self {
        FileInput::Bytes(v.to_vec())
    }
}

impl From<&str> for FileInput {
    fn from(v: &str) -> Self {
        FileInput::Path(PathBuf::from(v))
    }
}

impl From<String> for FileInput {
    fn from(v: String) -> Self {
        FileInput::Path(PathBuf::from(v))
    }
}

impl From<PathBuf> for FileInput {
    fn from(v: PathBuf) -> Self {
        FileInput::Path(v)
    }
}

impl From<&Path> for FileInput {
    fn from(v: &Path) -> Self {
        FileInput::Path(v.to_path_buf())
    }
}

impl From<InputFile> for FileInput {
    fn from(v: InputFile) -> Self {
        FileInput::File(v)
    }
}

impl From<Attachment> for FileInput {
    fn from(v: Attachment) -> Self {
        FileInput::Attachment(v)
    }
}

impl From<Document> for FileInput {
    fn from(v: Document) -> Self {
        FileInput::Attachment(v.into())
    }
}

impl From<PhotoSize> for FileInput {
    fn from(v: PhotoSize) -> Self {
        FileInput::Attachment(v.into())
    }
}

impl From<Video> for FileInput {
    fn from(v: Video) -> Self {
        FileInput::Attachment(v.into())
    }
}

impl From<Audio> for FileInput {
    fn from(v: Audio) -> Self {
        FileInput::Attachment(v.into())
    }
}

impl From<Animation> for FileInput {
    fn from(v: Animation) -> Self {
        FileInput::Attachment(v.into())
    }
}

/// A file argument after normalization.
#[derive(Debug)]
pub enum ParsedFile {
    Upload(InputFile),
    Handle { path: PathBuf, file: File },
    FileId(String),
}

/// Normalize a file argument for sending.
///
/// - bytes become an [`InputFile`] named `file_name`
/// - a path is opened for reading if it is an existing regular file
/// - an attachment yields its `file_id` (its kind must equal
///   `attachment_kind` when one is given)
/// - an [`InputFile`] is returned unchanged
///
/// Anything else is [`Error::UnsupportedFileInput`].
pub fn parse_file_input(
    input: FileInput,
    attachment_kind: Option<AttachmentKind>,
    file_name: Option<String>,
) -> Result<ParsedFile> {
    match input {
        FileInput::Bytes(data) => {
            let mut file = InputFile::new(data);
            if let Some(name) = file_name {
                file = file.with_file_name(name);
            }
            Ok(ParsedFile::Upload(file))
        }
        FileInput::Path(path) => {
            if !path.is_file() {
                return Err(Error::UnsupportedFileInput(format!(
                    "{} is not an existing file; pass bytes, a file path, an attachment or an InputFile",
                    path.display()
                )));
            }
            let file = File::open(&path)?;
            Ok(ParsedFile::Handle { path, file })
        }
        FileInput::Attachment(att) => match attachment_kind {
            Some(expected) if expected != att.kind() => Err(Error::UnsupportedFileInput(format!(
                "expected a {} attachment, got a {}",
                expected.as_str(),
                att.kind().as_str()
            ))),
            _ => Ok(ParsedFile::FileId(att.file_id().to_string())),
        },
        FileInput::File(file) => Ok(ParsedFile::Upload(file)),
    }
}

/// One item of a media group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputMedia {
    kind: AttachmentKind,
    media: FileInput,
    caption: MaybeMissing<String>,
}

impl InputMedia {
    fn new(kind: AttachmentKind, media: FileInput) -> Self {
        Self {
            kind,
            media,
            caption: MaybeMissing::Missing,
        }
    }

    pub fn photo(media: impl Into<FileInput>) -> Self {
        Self::new(AttachmentKind::Photo, media.into())
    }

    pub fn video(media: impl Into<FileInput>) -> Self {
        Self::new(AttachmentKind::Video, media.into())
    }

    pub fn animation(media: impl Into<FileInput>) -> Self {
        Self::new(AttachmentKind::Animation, media.into())
    }

    pub fn audio(media: impl Into<FileInput>) -> Self {
        Self::new(AttachmentKind::Audio, media.into())
    }

    pub fn document(media: impl Into<FileInput>) -> Self {
        Self::new(AttachmentKind::Document, media.into())
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = MaybeMissing::Value(caption.into());
        self
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn media(&self) -> &FileInput {
        &self.media
    }

    pub fn caption(&self) -> &MaybeMissing<String> {
        &self.caption
    }

    /// Normalize the media argument against this item's kind.
    pub fn parse(self) -> Result<(AttachmentKind, ParsedFile, MaybeMissing<String>)> {
        let parsed = parse_file_input(self.media, Some(self.kind), None)?;
        Ok((self.kind, parsed, self.caption))
    }
}
