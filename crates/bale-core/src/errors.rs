/// Core error type for the Bale bindings.
///
/// Client adapters should map their transport failures into `Client` so
/// callers only ever match on this one type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required field `{field}` in {object} payload")]
    MissingField {
        object: &'static str,
        field: &'static str,
    },

    #[error("invalid {object} payload: {reason}")]
    InvalidPayload {
        object: &'static str,
        reason: String,
    },

    #[error("unsupported file input: {0}")]
    UnsupportedFileInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("client error: {0}")]
    Client(String),
}

impl Error {
    pub(crate) fn invalid(object: &'static str, reason: impl ToString) -> Self {
        Error::InvalidPayload {
            object,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
