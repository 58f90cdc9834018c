//! Entity model
//!
//! Value and reference types of the library. Entities refer to each other through surrogate
//! ids; natural keys (ISBN, full name, room name) only matter to lookups and to the codecs.
pub mod book;
pub mod club;
pub mod ids;
pub mod reader;
pub mod room;
pub mod staff;
pub mod validation;

pub use book::{Author, Book, Location};
pub use club::Club;
pub use ids::{AuthorId, BookId, ClubId, LibrarianId, ReaderId, RoomId};
pub use reader::{Reader, ReaderKind, Review, Ticket};
pub use room::Room;
pub use staff::{ACCESS_CODE, Librarian, verify_code};
pub use validation::ValidationError;
