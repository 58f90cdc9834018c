use crate::model::ValidationError;
use chrono::NaiveDateTime;
use std::path::PathBuf;

/// An operation declined because one of the model's invariants would break. Refusals are
/// expected outcomes the caller branches on; whenever one is returned, nothing was mutated.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Refused {
    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },

    #[error("book '{0}' is not available")]
    BookUnavailable(String),

    #[error("book '{0}' is currently on loan")]
    BookOnLoan(String),

    #[error("book '{0}' is being discussed by a club")]
    BookUnderDiscussion(String),

    #[error("book '{isbn}' was not borrowed by {reader}")]
    NotBorrowedByReader { isbn: String, reader: String },

    #[error("{reader} still has {count} borrowed book(s)")]
    ReaderHasBooks { reader: String, count: usize },

    #[error("{0} is a club member")]
    ReaderInClub(String),

    #[error("{0} holds upcoming seat bookings")]
    ReaderHasBookings(String),

    #[error("room '{0}' has upcoming bookings")]
    RoomHasBookings(String),

    #[error("club still has {0} member(s)")]
    ClubHasMembers(usize),

    #[error("seat {seat} does not exist in a room with {capacity} seats")]
    NoSuchSeat { seat: u32, capacity: u32 },

    #[error("seat {seat} is already booked at {at}")]
    SeatTaken { seat: u32, at: NaiveDateTime },

    #[error("no booking for seat {seat} at {at}")]
    NoBooking { seat: u32, at: NaiveDateTime },

    #[error("{0} is already in a club")]
    AlreadyMember(String),

    #[error("{0} is not a member of this club")]
    NotMember(String),
}

/// Failure to turn a document into a registry or a registry into a document.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("missing required element '{0}'")]
    Missing(String),

    #[error("malformed value for '{field}': '{value}'")]
    Malformed { field: String, value: String },

    #[error("invalid record: {0}")]
    Invalid(#[from] ValidationError),
}

impl CodecError {
    pub(crate) fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Malformed {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[allow(clippy::missing_inline_in_public_items, reason = "Called rarely")]
impl From<quick_xml::Error> for CodecError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Xml(error.to_string())
    }
}

/// Failure of a load or save against the file system.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("failed to encode: {0}")]
    Encode(#[from] CodecError),
}

/// A file format name that is neither `json` nor `xml`.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format '{0}', expected 'json' or 'xml'")]
pub struct UnknownFormat(pub String);
