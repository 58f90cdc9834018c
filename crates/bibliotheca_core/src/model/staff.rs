use crate::errors::Refused;
use crate::model::book::Book;
use crate::model::ids::LibrarianId;
use crate::model::reader::Reader;
use crate::model::validation::{ValidationError, phone, required};
use core::fmt;

/// The access code every librarian shares. It gates the librarian operations of a shell; it is
/// not a per-librarian secret.
pub const ACCESS_CODE: u32 = 1234;

/// Checks a code entered at the librarian gate.
#[must_use]
#[inline]
pub const fn verify_code(code: u32) -> bool {
    code == ACCESS_CODE
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Librarian {
    pub id: LibrarianId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl Librarian {
    /// # Errors
    /// Fails on an empty name or a phone outside `+7XXXXXXXXXX`
    #[inline]
    pub fn new(
        first_name: &str,
        last_name: &str,
        phone_number: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: LibrarianId::generate(),
            first_name: required("first_name", first_name)?,
            last_name: required("last_name", last_name)?,
            phone: phone(phone_number)?,
        })
    }

    #[must_use]
    #[inline]
    pub fn has_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    /// # Errors
    /// Fails if the new phone does not match `+7XXXXXXXXXX`; the old one is kept then
    #[inline]
    pub fn update_phone(&mut self, phone_number: &str) -> Result<(), ValidationError> {
        self.phone = phone(phone_number)?;
        Ok(())
    }

    /// Hands `book` to `reader`. Passing the access code is the only authorization.
    /// # Errors
    /// Refuses if the book is on loan
    #[inline]
    pub fn lend_book(&self, book: &mut Book, reader: &mut Reader) -> Result<(), Refused> {
        log::debug!("{self} lends {book} to {reader}");
        reader.take_book(book)
    }

    /// Takes `book` back from `reader`.
    /// # Errors
    /// Refuses if the reader did not borrow the book
    #[inline]
    pub fn accept_return(&self, book: &mut Book, reader: &mut Reader) -> Result<(), Refused> {
        log::debug!("{self} accepts {book} from {reader}");
        reader.return_book(book)
    }

    /// # Errors
    /// Fails if `place` is empty after trimming
    #[inline]
    pub fn edit_reader_education(
        &self,
        reader: &mut Reader,
        place: &str,
    ) -> Result<(), ValidationError> {
        reader.update_education_place(place)
    }
}

impl fmt::Display for Librarian {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "librarian {} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use crate::model::book::{Author, Location};
    use crate::model::reader::ReaderKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn access_code() {
        assert!(verify_code(ACCESS_CODE));
        assert!(!verify_code(ACCESS_CODE + 1));
    }

    #[test]
    fn update_phone_validates() {
        let mut librarian = Librarian::new("Olga", "Smirnova", "+78888888888").unwrap();
        librarian.update_phone("+77777777777").unwrap();
        assert_eq!(librarian.phone, "+77777777777");
        assert!(librarian.update_phone("12345").is_err());
        assert_eq!(librarian.phone, "+77777777777");
    }

    #[test]
    fn lend_and_accept_return() {
        let librarian = Librarian::new("Olga", "Smirnova", "+78888888888").unwrap();
        let author = Author::new("Leo", "Tolstoy", "").unwrap();
        let mut book =
            Book::new("War and Peace", author.id, "42", Location::new("B", "2").unwrap()).unwrap();
        let mut reader = Reader::new(
            "Ana",
            "Petrova",
            "+79161234567",
            "ana@example.org",
            ReaderKind::Regular,
        )
        .unwrap();

        librarian.lend_book(&mut book, &mut reader).unwrap();
        assert!(librarian.lend_book(&mut book, &mut reader).is_err());
        librarian.accept_return(&mut book, &mut reader).unwrap();
        assert!(book.is_available());

        librarian.edit_reader_education(&mut reader, "Library school").unwrap();
        assert_eq!(reader.education_place, "Library school");
    }
}
