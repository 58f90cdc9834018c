//! Reference resolver
//!
//! Documents reference readers by full name (`"First Last"`) and books by ISBN, never by id.
//! While a document is being loaded, the [`Resolver`] maps those natural keys to the ids of the
//! entities already rebuilt. It is filled in dependency order: readers first, then books, so
//! that books, rooms and clubs can link to readers, and clubs to books.
use crate::model::{BookId, ReaderId};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Resolver {
    readers: HashMap<String, ReaderId>,
    books: HashMap<String, BookId>,
}

impl Resolver {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a reader under its full name. The first reader registered under a name keeps
    /// it, matching what name lookups on the registry return.
    #[inline]
    pub fn add_reader(&mut self, full_name: String, id: ReaderId) {
        self.readers.entry(full_name).or_insert(id);
    }

    #[inline]
    pub fn add_book(&mut self, isbn: String, id: BookId) {
        self.books.entry(isbn).or_insert(id);
    }

    #[must_use]
    #[inline]
    pub fn reader(&self, full_name: &str) -> Option<ReaderId> {
        self.readers.get(full_name.trim()).copied()
    }

    #[must_use]
    #[inline]
    pub fn book(&self, isbn: &str) -> Option<BookId> {
        self.books.get(isbn.trim()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_registration_wins() {
        let mut resolver = Resolver::new();
        let (first, second) = (ReaderId::generate(), ReaderId::generate());
        resolver.add_reader("Ana Petrova".to_owned(), first);
        resolver.add_reader("Ana Petrova".to_owned(), second);
        assert_eq!(resolver.reader("Ana Petrova"), Some(first));
        assert_eq!(resolver.reader(" Ana Petrova "), Some(first));
        assert_eq!(resolver.reader("Maria Ivanova"), None);
    }

    #[test]
    fn books_by_isbn() {
        let mut resolver = Resolver::new();
        let book = BookId::generate();
        resolver.add_book("978-5".to_owned(), book);
        assert_eq!(resolver.book("978-5"), Some(book));
        assert_eq!(resolver.book("978-6"), None);
    }
}
