//! `bibliotheca_core`
//!
//! Core library of Bibliotheca: the in-memory model of a small library (books, readers,
//! librarians, reading rooms and a reading club), the registry holding every live entity, and
//! the JSON and XML codecs that flatten the registry to disk and rebuild it again.
//!
//! The crate performs no console I/O. A shell drives it through the registry operations on
//! [`Library`] and the two persistence entry points in [`storage`].

pub mod codec;
pub mod errors;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod storage;
#[cfg(test)]
mod test_support;

pub use errors::{CodecError, Refused, StorageError, UnknownFormat};
pub use model::{
    ACCESS_CODE, Author, AuthorId, Book, BookId, Club, ClubId, Librarian, LibrarianId, Location,
    Reader, ReaderId, ReaderKind, Review, Room, RoomId, Ticket, ValidationError, verify_code,
};
pub use registry::{Library, Summary};
pub use storage::{Format, LibraryPaths, SaveReport};
