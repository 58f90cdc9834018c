use crate::model::ids::{AuthorId, BookId, ReaderId};
use crate::model::validation::{ValidationError, required};
use core::fmt;

/// The person who wrote one or more books. Authors are shared: the registry keeps one record
/// per `(first_name, last_name)` and books point at it through an [`AuthorId`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
}

impl Author {
    /// # Errors
    /// Fails if either name is empty after trimming
    #[inline]
    pub fn new(first_name: &str, last_name: &str, bio: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: AuthorId::generate(),
            first_name: required("first_name", first_name)?,
            last_name: required("last_name", last_name)?,
            bio: bio.trim().to_owned(),
        })
    }

    /// Replaces the biography. An empty biography is allowed.
    #[inline]
    pub fn edit(&mut self, bio: &str) {
        bio.trim().clone_into(&mut self.bio);
    }

    #[must_use]
    #[inline]
    pub fn has_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }
}

impl fmt::Display for Author {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}", self.first_name, self.last_name)
    }
}

/// Where a book stands in the library. Owned by exactly one book.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub rack: String,
    pub shelf: String,
}

impl Location {
    /// # Errors
    /// Fails if rack or shelf is empty after trimming
    #[inline]
    pub fn new(rack: &str, shelf: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            rack: required("rack", rack)?,
            shelf: required("shelf", shelf)?,
        })
    }
}

impl fmt::Display for Location {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "rack {}, shelf {}", self.rack, self.shelf)
    }
}

/// A book of the catalogue, identified by its ISBN.
///
/// Availability and borrower only change through [`Reader::take_book`](super::Reader::take_book)
/// and [`Reader::return_book`](super::Reader::return_book), which keep `is_available == false`
/// exactly when a borrower is set.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: AuthorId,
    pub isbn: String,
    pub location: Location,
    is_available: bool,
    current_borrower: Option<ReaderId>,
}

impl Book {
    /// Creates an available book with no borrower.
    /// # Errors
    /// Fails if title or ISBN is empty after trimming
    #[inline]
    pub fn new(
        title: &str,
        author: AuthorId,
        isbn: &str,
        location: Location,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: BookId::generate(),
            title: required("title", title)?,
            author,
            isbn: required("isbn", isbn)?,
            location,
            is_available: true,
            current_borrower: None,
        })
    }

    #[must_use]
    #[inline]
    pub const fn is_available(&self) -> bool {
        self.is_available
    }

    #[must_use]
    #[inline]
    pub const fn current_borrower(&self) -> Option<ReaderId> {
        self.current_borrower
    }

    /// Moves the book; the previous location is dropped.
    #[inline]
    pub fn relocate(&mut self, location: Location) {
        self.location = location;
    }

    pub(crate) fn lend_to(&mut self, reader: ReaderId) {
        self.is_available = false;
        self.current_borrower = Some(reader);
    }

    pub(crate) fn release(&mut self) {
        self.is_available = true;
        self.current_borrower = None;
    }

    /// Restores availability exactly as stored in a document. A stored loan whose borrower
    /// could not be resolved keeps `is_available == false` with no borrower.
    pub(crate) fn restore_loan(&mut self, is_available: bool, borrower: Option<ReaderId>) {
        self.is_available = is_available;
        self.current_borrower = borrower;
    }
}

impl fmt::Display for Book {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "'{}' (ISBN {})", self.title, self.isbn)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn book_fields_are_trimmed() {
        let author = Author::new(" Frank ", "Herbert", "").unwrap();
        let location = Location::new("A", " 3 ").unwrap();
        let book = Book::new(" Dune ", author.id, " 978-0441013593 ", location).unwrap();

        assert_eq!(author.first_name, "Frank");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.isbn, "978-0441013593");
        assert_eq!(book.location.shelf, "3");
        assert_eq!(book.author, author.id);
        assert!(book.is_available());
        assert_eq!(book.current_borrower(), None);
    }

    #[test]
    fn empty_fields_are_rejected() {
        let author = Author::new("Frank", "Herbert", "").unwrap();
        let error = Book::new("Dune", author.id, "  ", Location::new("A", "3").unwrap())
            .unwrap_err();
        assert_eq!(error.field, "isbn");
        assert_eq!(Location::new("", "3").unwrap_err().field, "rack");
        assert_eq!(Author::new("Frank", " ", "").unwrap_err().field, "last_name");
    }

    #[test]
    fn relocate_replaces_location() {
        let author = Author::new("Frank", "Herbert", "").unwrap();
        let mut book = Book::new("Dune", author.id, "1", Location::new("A", "1").unwrap()).unwrap();
        book.relocate(Location::new("B", "2").unwrap());
        assert_eq!(book.location.to_string(), "rack B, shelf 2");
    }

    #[test]
    fn edit_author_bio() {
        let mut author = Author::new("Frank", "Herbert", "").unwrap();
        author.edit(" American novelist ");
        assert_eq!(author.bio, "American novelist");
        assert!(author.has_name("Frank", "Herbert"));
    }
}
