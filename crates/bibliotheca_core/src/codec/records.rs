//! Flat records shared by both codecs. References to other entities are natural-key strings;
//! owned sub-entities are nested. Timestamps stay textual here and are parsed while restoring,
//! so that a malformed optional timestamp only drops its own record.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LibraryDocument {
    pub librarians: Vec<LibrarianRecord>,
    pub readers: Vec<ReaderRecord>,
    pub books: Vec<BookRecord>,
    pub rooms: Vec<RoomRecord>,
    pub clubs: Vec<ClubRecord>,
}

/// A reference to a reader. Current documents write the full name; older ones wrote an object
/// with both name parts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PersonRef {
    FullName(String),
    Parts {
        first_name: String,
        last_name: String,
    },
}

impl PersonRef {
    #[must_use]
    #[inline]
    pub fn full_name(&self) -> String {
        match self {
            Self::FullName(name) => name.trim().to_owned(),
            Self::Parts {
                first_name,
                last_name,
            } => format!("{} {}", first_name.trim(), last_name.trim()),
        }
    }
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LibrarianRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReaderRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub reader_type: String,
    #[serde(default)]
    pub education_place: String,
    #[serde(default)]
    pub in_club: bool,
    #[serde(default)]
    pub borrowed_books_isbn: Vec<String>,
    pub ticket: TicketRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<u8>,
    #[serde(default, deserialize_with = "review_or_skip")]
    pub review: Option<ReviewRecord>,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TicketRecord {
    pub ticket_id: String,
    pub issue_date: String,
    pub expiry_date: String,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub text: String,
    pub rating: u8,
    pub date: String,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub title: String,
    pub author: AuthorRecord,
    pub isbn: String,
    pub location: LocationRecord,
    pub is_available: bool,
    #[serde(default, alias = "current_borrower_name")]
    pub current_borrower: Option<PersonRef>,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LocationRecord {
    pub rack: String,
    pub shelf: String,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "bookings_or_skip")]
    pub bookings: Vec<BookingRecord>,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookingRecord {
    pub seat_number: u32,
    pub datetime: String,
    #[serde(default, alias = "reader_name")]
    pub reader: Option<PersonRef>,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClubRecord {
    #[serde(default, alias = "members_names", deserialize_with = "one_or_many")]
    pub members: Vec<PersonRef>,
    #[serde(default)]
    pub meetings: Vec<String>,
    #[serde(default)]
    pub current_book_isbn: Option<String>,
}

/// Older documents stored a single member object instead of a list.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<PersonRef>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Members {
        Many(Vec<PersonRef>),
        One(PersonRef),
    }

    Ok(match Option::<Members>::deserialize(deserializer)? {
        Some(Members::Many(members)) => members,
        Some(Members::One(member)) => vec![member],
        None => Vec::new(),
    })
}

/// Reads one optional sub-record on its own; a malformed one is logged and dropped instead of
/// failing the whole document.
fn parse_or_skip<T: DeserializeOwned>(what: &str, value: Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(record) => Some(record),
        Err(error) => {
            log::warn!("Skipping malformed {what}: {error}");
            None
        }
    }
}

fn bookings_or_skip<'de, D>(deserializer: D) -> Result<Vec<BookingRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| parse_or_skip("booking", entry))
        .collect())
}

fn review_or_skip<'de, D>(deserializer: D) -> Result<Option<ReviewRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| parse_or_skip("review", value)))
}
