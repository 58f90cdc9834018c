//! Registry
//!
//! [`Library`] owns the five collections (books, readers, librarians, rooms, clubs) plus the
//! shared author table. It is the single source of truth every lookup resolves against. The
//! store is plain owned data with no interior locking; callers that share it between threads
//! wrap it in a lock of their own.
use crate::errors::Refused;
use crate::model::{
    Author, AuthorId, Book, BookId, Club, ClubId, Librarian, LibrarianId, Reader, ReaderId, Room,
    RoomId, ValidationError,
};
use chrono::NaiveDateTime;
use core::fmt;

/// Number of entities per collection
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub authors: usize,
    pub books: usize,
    pub readers: usize,
    pub librarians: usize,
    pub rooms: usize,
    pub clubs: usize,
}

impl fmt::Display for Summary {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} books by {} authors, {} readers, {} librarians, {} rooms, {} clubs",
            self.books, self.authors, self.readers, self.librarians, self.rooms, self.clubs
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    authors: Vec<Author>,
    books: Vec<Book>,
    readers: Vec<Reader>,
    librarians: Vec<Librarian>,
    rooms: Vec<Room>,
    clubs: Vec<Club>,
}

fn missing(kind: &'static str, key: impl fmt::Display) -> Refused {
    Refused::NotFound {
        kind,
        key: key.to_string(),
    }
}

impl Library {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties every collection.
    #[inline]
    pub fn reset(&mut self) {
        self.authors.clear();
        self.books.clear();
        self.readers.clear();
        self.librarians.clear();
        self.rooms.clear();
        self.clubs.clear();
    }

    #[must_use]
    #[inline]
    pub fn summary(&self) -> Summary {
        Summary {
            authors: self.authors.len(),
            books: self.books.len(),
            readers: self.readers.len(),
            librarians: self.librarians.len(),
            rooms: self.rooms.len(),
            clubs: self.clubs.len(),
        }
    }

    // Authors

    /// Registers `author`, or returns the id of the author already registered under the same
    /// name.
    #[inline]
    pub fn add_author(&mut self, author: Author) -> AuthorId {
        if let Some(existing) = self.find_author_by_name(&author.first_name, &author.last_name) {
            return existing.id;
        }
        let id = author.id;
        self.authors.push(author);
        id
    }

    #[must_use]
    #[inline]
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    #[must_use]
    #[inline]
    pub fn author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == id)
    }

    #[inline]
    pub fn author_mut(&mut self, id: AuthorId) -> Option<&mut Author> {
        self.authors.iter_mut().find(|author| author.id == id)
    }

    #[must_use]
    #[inline]
    pub fn find_author_by_name(&self, first_name: &str, last_name: &str) -> Option<&Author> {
        self.authors
            .iter()
            .find(|author| author.has_name(first_name, last_name))
    }

    // Books

    #[must_use]
    #[inline]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    #[inline]
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    #[inline]
    pub fn book_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    #[must_use]
    #[inline]
    pub fn find_book_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn == isbn)
    }

    /// Creates or updates a book by ISBN. An existing book keeps its id and loan state and takes
    /// over title, author and location.
    /// # Errors
    /// Refuses if the book's author is not registered
    #[inline]
    pub fn save_book(&mut self, book: Book) -> Result<BookId, Refused> {
        if self.author(book.author).is_none() {
            return Err(missing("author", book.author));
        }
        if let Some(existing) = self.books.iter_mut().find(|other| other.isbn == book.isbn) {
            existing.title = book.title;
            existing.author = book.author;
            existing.location = book.location;
            return Ok(existing.id);
        }
        let id = book.id;
        self.books.push(book);
        Ok(id)
    }

    /// Removes an available book that no club is discussing.
    /// # Errors
    /// Refuses if the book is unknown, on loan or a club's current book
    #[inline]
    pub fn delete_book(&mut self, id: BookId) -> Result<Book, Refused> {
        let position = self
            .books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| missing("book", id))?;
        let Some(book) = self.books.get(position) else {
            return Err(missing("book", id));
        };
        if !book.is_available() {
            return Err(Refused::BookOnLoan(book.isbn.clone()));
        }
        if self.clubs.iter().any(|club| club.current_book() == Some(id)) {
            return Err(Refused::BookUnderDiscussion(book.isbn.clone()));
        }
        Ok(self.books.remove(position))
    }

    // Readers

    #[must_use]
    #[inline]
    pub fn readers(&self) -> &[Reader] {
        &self.readers
    }

    #[must_use]
    #[inline]
    pub fn reader(&self, id: ReaderId) -> Option<&Reader> {
        self.readers.iter().find(|reader| reader.id == id)
    }

    #[inline]
    pub fn reader_mut(&mut self, id: ReaderId) -> Option<&mut Reader> {
        self.readers.iter_mut().find(|reader| reader.id == id)
    }

    /// First reader with this name; names are not unique.
    #[must_use]
    #[inline]
    pub fn find_reader_by_name(&self, first_name: &str, last_name: &str) -> Option<&Reader> {
        self.readers
            .iter()
            .find(|reader| reader.has_name(first_name, last_name))
    }

    /// Creates or updates a reader by name. An existing reader keeps id, ticket, loans, review
    /// and club membership and takes over contact and variant data. A new reader whose ticket id
    /// is already taken gets a fresh one.
    #[inline]
    pub fn save_reader(&mut self, mut reader: Reader) -> ReaderId {
        if let Some(existing) = self.existing_reader(&reader) {
            existing.overwrite_details(reader);
            return existing.id;
        }
        while self.ticket_taken(&reader.ticket().ticket_id) {
            log::warn!(
                "Ticket {} already issued, reissuing for {}",
                reader.ticket().ticket_id,
                reader.full_name()
            );
            reader.ticket_mut().reissue_id();
        }
        let id = reader.id;
        self.readers.push(reader);
        id
    }

    /// Like [`Self::save_reader`], but a stored ticket keeps its id even when another reader
    /// already holds it.
    pub(crate) fn restore_reader(&mut self, reader: Reader) -> ReaderId {
        if let Some(existing) = self.existing_reader(&reader) {
            existing.overwrite_details(reader);
            return existing.id;
        }
        if self.ticket_taken(&reader.ticket().ticket_id) {
            log::warn!(
                "Ticket {} of {} is shared with another reader",
                reader.ticket().ticket_id,
                reader.full_name()
            );
        }
        let id = reader.id;
        self.readers.push(reader);
        id
    }

    fn existing_reader(&mut self, reader: &Reader) -> Option<&mut Reader> {
        self.readers
            .iter_mut()
            .find(|other| other.has_name(&reader.first_name, &reader.last_name))
    }

    fn ticket_taken(&self, ticket_id: &str) -> bool {
        self.readers
            .iter()
            .any(|reader| reader.ticket().ticket_id == ticket_id)
    }

    /// Removes a reader without loans, club membership or upcoming bookings. Their past
    /// bookings go with them.
    /// # Errors
    /// Refuses if the reader is unknown or still has dependent state
    #[inline]
    pub fn delete_reader(&mut self, id: ReaderId, now: NaiveDateTime) -> Result<Reader, Refused> {
        let reader = self.reader(id).ok_or_else(|| missing("reader", id))?;
        if !reader.borrowed_books().is_empty() {
            return Err(Refused::ReaderHasBooks {
                reader: reader.full_name(),
                count: reader.borrowed_books().len(),
            });
        }
        if reader.in_club() || self.clubs.iter().any(|club| club.is_member(id)) {
            return Err(Refused::ReaderInClub(reader.full_name()));
        }
        if self
            .rooms
            .iter()
            .any(|room| room.has_reader_bookings_from(id, now))
        {
            return Err(Refused::ReaderHasBookings(reader.full_name()));
        }
        for room in &mut self.rooms {
            room.forget_reader(id);
        }
        let position = self
            .readers
            .iter()
            .position(|reader| reader.id == id)
            .ok_or_else(|| missing("reader", id))?;
        Ok(self.readers.remove(position))
    }

    // Librarians

    #[must_use]
    #[inline]
    pub fn librarians(&self) -> &[Librarian] {
        &self.librarians
    }

    #[must_use]
    #[inline]
    pub fn librarian(&self, id: LibrarianId) -> Option<&Librarian> {
        self.librarians.iter().find(|librarian| librarian.id == id)
    }

    #[inline]
    pub fn librarian_mut(&mut self, id: LibrarianId) -> Option<&mut Librarian> {
        self.librarians
            .iter_mut()
            .find(|librarian| librarian.id == id)
    }

    #[must_use]
    #[inline]
    pub fn find_librarian_by_name(&self, first_name: &str, last_name: &str) -> Option<&Librarian> {
        self.librarians
            .iter()
            .find(|librarian| librarian.has_name(first_name, last_name))
    }

    /// Creates or updates a librarian by name; an existing one takes over the phone.
    #[inline]
    pub fn save_librarian(&mut self, librarian: Librarian) -> LibrarianId {
        if let Some(existing) = self
            .librarians
            .iter_mut()
            .find(|other| other.has_name(&librarian.first_name, &librarian.last_name))
        {
            existing.phone = librarian.phone;
            return existing.id;
        }
        let id = librarian.id;
        self.librarians.push(librarian);
        id
    }

    /// # Errors
    /// Refuses only if the librarian is unknown
    #[inline]
    pub fn delete_librarian(&mut self, id: LibrarianId) -> Result<Librarian, Refused> {
        let position = self
            .librarians
            .iter()
            .position(|librarian| librarian.id == id)
            .ok_or_else(|| missing("librarian", id))?;
        Ok(self.librarians.remove(position))
    }

    // Rooms

    #[must_use]
    #[inline]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[must_use]
    #[inline]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == id)
    }

    #[inline]
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| room.id == id)
    }

    #[must_use]
    #[inline]
    pub fn find_room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name == name)
    }

    /// Creates or updates a room by name; an existing room keeps its bookings and takes over
    /// the capacity.
    /// # Errors
    /// Fails if the new capacity would leave a booked seat outside the room
    #[inline]
    pub fn save_room(&mut self, room: Room) -> Result<RoomId, ValidationError> {
        if let Some(existing) = self.rooms.iter_mut().find(|other| other.name == room.name) {
            existing.set_capacity(room.capacity())?;
            return Ok(existing.id);
        }
        let id = room.id;
        self.rooms.push(room);
        Ok(id)
    }

    /// # Errors
    /// Refuses if the room is unknown or holds a booking at or after `now`
    #[inline]
    pub fn delete_room(&mut self, id: RoomId, now: NaiveDateTime) -> Result<Room, Refused> {
        let position = self
            .rooms
            .iter()
            .position(|room| room.id == id)
            .ok_or_else(|| missing("room", id))?;
        if let Some(room) = self.rooms.get(position) {
            if room.has_bookings_from(now) {
                return Err(Refused::RoomHasBookings(room.name.clone()));
            }
        }
        Ok(self.rooms.remove(position))
    }

    // Clubs

    #[must_use]
    #[inline]
    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    #[must_use]
    #[inline]
    pub fn club(&self, id: ClubId) -> Option<&Club> {
        self.clubs.iter().find(|club| club.id == id)
    }

    #[inline]
    pub fn club_mut(&mut self, id: ClubId) -> Option<&mut Club> {
        self.clubs.iter_mut().find(|club| club.id == id)
    }

    /// Clubs have no natural key: a club already registered under the same id is replaced,
    /// anything else is appended.
    #[inline]
    pub fn save_club(&mut self, club: Club) -> ClubId {
        let id = club.id;
        match self.clubs.iter_mut().find(|other| other.id == id) {
            Some(existing) => *existing = club,
            None => self.clubs.push(club),
        }
        id
    }

    /// # Errors
    /// Refuses if the club is unknown or still has members
    #[inline]
    pub fn delete_club(&mut self, id: ClubId) -> Result<Club, Refused> {
        let position = self
            .clubs
            .iter()
            .position(|club| club.id == id)
            .ok_or_else(|| missing("club", id))?;
        if let Some(club) = self.clubs.get(position) {
            if !club.members().is_empty() {
                return Err(Refused::ClubHasMembers(club.members().len()));
            }
        }
        Ok(self.clubs.remove(position))
    }

    // Relations between collections

    /// # Errors
    /// Refuses if either side is unknown or the book is on loan
    #[inline]
    pub fn take_book(&mut self, reader: ReaderId, book: BookId) -> Result<(), Refused> {
        let (reader, book) = self.reader_and_book(reader, book)?;
        reader.take_book(book)
    }

    /// # Errors
    /// Refuses if either side is unknown or the reader did not borrow the book
    #[inline]
    pub fn return_book(&mut self, reader: ReaderId, book: BookId) -> Result<(), Refused> {
        let (reader, book) = self.reader_and_book(reader, book)?;
        reader.return_book(book)
    }

    /// # Errors
    /// Refuses if any party is unknown or the book is on loan
    #[inline]
    pub fn lend_book(
        &mut self,
        librarian: LibrarianId,
        book: BookId,
        reader: ReaderId,
    ) -> Result<(), Refused> {
        let Self {
            librarians,
            books,
            readers,
            ..
        } = self;
        let librarian = find_in(librarians.as_slice(), "librarian", librarian, |item| item.id)?;
        let reader = find_in_mut(readers.as_mut_slice(), "reader", reader, |item| item.id)?;
        let book = find_in_mut(books.as_mut_slice(), "book", book, |item| item.id)?;
        librarian.lend_book(book, reader)
    }

    /// # Errors
    /// Refuses if any party is unknown or the reader did not borrow the book
    #[inline]
    pub fn accept_return(
        &mut self,
        librarian: LibrarianId,
        book: BookId,
        reader: ReaderId,
    ) -> Result<(), Refused> {
        let Self {
            librarians,
            books,
            readers,
            ..
        } = self;
        let librarian = find_in(librarians.as_slice(), "librarian", librarian, |item| item.id)?;
        let reader = find_in_mut(readers.as_mut_slice(), "reader", reader, |item| item.id)?;
        let book = find_in_mut(books.as_mut_slice(), "book", book, |item| item.id)?;
        librarian.accept_return(book, reader)
    }

    /// # Errors
    /// Refuses if room or reader is unknown, or the seat is missing or taken
    #[inline]
    pub fn reserve_seat(
        &mut self,
        room: RoomId,
        seat: u32,
        at: NaiveDateTime,
        reader: ReaderId,
    ) -> Result<(), Refused> {
        let Self { rooms, readers, .. } = self;
        let reader = find_in(readers.as_slice(), "reader", reader, |item| item.id)?;
        let room = find_in_mut(rooms.as_mut_slice(), "room", room, |item| item.id)?;
        room.reserve_seat(seat, at, reader)
    }

    /// # Errors
    /// Refuses if club or reader is unknown, or the reader is already in a club
    #[inline]
    pub fn join_club(&mut self, club: ClubId, reader: ReaderId) -> Result<(), Refused> {
        let Self { clubs, readers, .. } = self;
        let reader = find_in_mut(readers.as_mut_slice(), "reader", reader, |item| item.id)?;
        let club = find_in_mut(clubs.as_mut_slice(), "club", club, |item| item.id)?;
        club.join(reader)
    }

    /// # Errors
    /// Refuses if club or reader is unknown, or the reader is not a member
    #[inline]
    pub fn leave_club(&mut self, club: ClubId, reader: ReaderId) -> Result<(), Refused> {
        let Self { clubs, readers, .. } = self;
        let reader = find_in_mut(readers.as_mut_slice(), "reader", reader, |item| item.id)?;
        let club = find_in_mut(clubs.as_mut_slice(), "club", club, |item| item.id)?;
        club.leave(reader)
    }

    /// Picks the book a club discusses, or clears it with `None`.
    /// # Errors
    /// Refuses if the club or the book is unknown
    #[inline]
    pub fn set_club_book(&mut self, club: ClubId, book: Option<BookId>) -> Result<(), Refused> {
        let Self { clubs, books, .. } = self;
        let book = match book {
            Some(id) => Some(find_in(books.as_slice(), "book", id, |item| item.id)?),
            None => None,
        };
        let club = find_in_mut(clubs.as_mut_slice(), "club", club, |item| item.id)?;
        club.set_current_book(book);
        Ok(())
    }

    fn reader_and_book(
        &mut self,
        reader: ReaderId,
        book: BookId,
    ) -> Result<(&mut Reader, &mut Book), Refused> {
        let Self { readers, books, .. } = self;
        let reader = find_in_mut(readers.as_mut_slice(), "reader", reader, |item| item.id)?;
        let book = find_in_mut(books.as_mut_slice(), "book", book, |item| item.id)?;
        Ok((reader, book))
    }
}

fn find_in<'items, T, Id>(
    items: &'items [T],
    kind: &'static str,
    id: Id,
    id_of: impl Fn(&T) -> Id,
) -> Result<&'items T, Refused>
where
    Id: PartialEq + fmt::Display,
{
    items
        .iter()
        .find(|item| id_of(item) == id)
        .ok_or_else(|| missing(kind, id))
}

fn find_in_mut<'items, T, Id>(
    items: &'items mut [T],
    kind: &'static str,
    id: Id,
    id_of: impl Fn(&T) -> Id,
) -> Result<&'items mut T, Refused>
where
    Id: PartialEq + fmt::Display,
{
    match items.iter_mut().find(|item| id_of(item) == id) {
        Some(item) => Ok(item),
        None => Err(missing(kind, id)),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use crate::model::{Location, ReaderKind};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn reader(first_name: &str) -> Reader {
        Reader::new(
            first_name,
            "Petrova",
            "+79161234567",
            "reader@example.org",
            ReaderKind::Regular,
        )
        .unwrap()
    }

    fn library_with_book() -> (Library, BookId) {
        let mut library = Library::new();
        let author = library.add_author(Author::new("Frank", "Herbert", "").unwrap());
        let book = Book::new("Dune", author, "111", Location::new("A", "1").unwrap()).unwrap();
        let book = library.save_book(book).unwrap();
        (library, book)
    }

    #[test]
    fn authors_are_deduplicated_by_name() {
        let mut library = Library::new();
        let first = library.add_author(Author::new("Frank", "Herbert", "bio").unwrap());
        let second = library.add_author(Author::new("Frank", "Herbert", "").unwrap());
        assert_eq!(first, second);
        assert_eq!(library.authors().len(), 1);
        library.author_mut(first).unwrap().edit("Wrote Dune");
        assert_eq!(library.author(second).unwrap().bio, "Wrote Dune");
    }

    #[test]
    fn save_book_updates_by_isbn() {
        let (mut library, id) = library_with_book();
        let author = library.authors().first().unwrap().id;
        let replacement =
            Book::new("Dune Messiah", author, "111", Location::new("B", "2").unwrap()).unwrap();
        assert_eq!(library.save_book(replacement).unwrap(), id);
        assert_eq!(library.books().len(), 1);
        let book = library.find_book_by_isbn("111").unwrap();
        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.location.rack, "B");
    }

    #[test]
    fn book_with_unknown_author_is_refused() {
        let mut library = Library::new();
        let stray = Author::new("Nobody", "Known", "").unwrap();
        let book = Book::new("Ghost", stray.id, "9", Location::new("A", "1").unwrap()).unwrap();
        assert!(matches!(
            library.save_book(book),
            Err(Refused::NotFound { kind: "author", .. })
        ));
        assert!(library.books().is_empty());
    }

    #[test]
    fn book_on_loan_cannot_be_deleted() {
        let (mut library, book) = library_with_book();
        let ana = library.save_reader(reader("Ana"));
        library.take_book(ana, book).unwrap();

        let before = library.clone();
        assert_eq!(
            library.delete_book(book).unwrap_err(),
            Refused::BookOnLoan("111".to_owned())
        );
        assert_eq!(library, before);

        library.return_book(ana, book).unwrap();
        library.delete_book(book).unwrap();
        assert!(library.find_book_by_isbn("111").is_none());
    }

    #[test]
    fn book_under_discussion_cannot_be_deleted() {
        let (mut library, book) = library_with_book();
        let club = library.save_club(Club::new());
        library.set_club_book(club, Some(book)).unwrap();
        assert!(matches!(
            library.delete_book(book),
            Err(Refused::BookUnderDiscussion(_))
        ));
        library.set_club_book(club, None).unwrap();
        assert!(library.delete_book(book).is_ok());
    }

    #[test]
    fn save_reader_updates_by_name() {
        let mut library = Library::new();
        let id = library.save_reader(reader("Ana"));
        let ticket = library.reader(id).unwrap().ticket().clone();

        let mut moved = reader("Ana");
        moved.phone = "+70000000000".to_owned();
        assert_eq!(library.save_reader(moved), id);
        assert_eq!(library.readers().len(), 1);

        let stored = library.find_reader_by_name("Ana", "Petrova").unwrap();
        assert_eq!(stored.phone, "+70000000000");
        assert_eq!(stored.ticket(), &ticket);
    }

    #[test]
    fn reader_with_books_cannot_be_deleted() {
        let (mut library, book) = library_with_book();
        let ana = library.save_reader(reader("Ana"));
        library.take_book(ana, book).unwrap();
        assert!(matches!(
            library.delete_reader(ana, at(1, 9)),
            Err(Refused::ReaderHasBooks { count: 1, .. })
        ));
        library.return_book(ana, book).unwrap();
        library.delete_reader(ana, at(1, 9)).unwrap();
        assert!(library.find_reader_by_name("Ana", "Petrova").is_none());
    }

    #[test]
    fn reader_deletion_respects_club_and_bookings() {
        let mut library = Library::new();
        let ana = library.save_reader(reader("Ana"));
        let club = library.save_club(Club::new());
        let room = library.save_room(Room::new("Hall", 5).unwrap()).unwrap();

        library.join_club(club, ana).unwrap();
        assert!(matches!(
            library.delete_reader(ana, at(1, 9)),
            Err(Refused::ReaderInClub(_))
        ));
        library.leave_club(club, ana).unwrap();

        library.reserve_seat(room, 1, at(10, 10), ana).unwrap();
        assert!(matches!(
            library.delete_reader(ana, at(1, 9)),
            Err(Refused::ReaderHasBookings(_))
        ));

        library.delete_reader(ana, at(11, 9)).unwrap();
        assert_eq!(library.room(room).unwrap().bookings().count(), 0);
    }

    #[test]
    fn room_with_upcoming_booking_cannot_be_deleted() {
        let mut library = Library::new();
        let ana = library.save_reader(reader("Ana"));
        let room = library.save_room(Room::new("Hall", 5).unwrap()).unwrap();
        library.reserve_seat(room, 2, at(10, 12), ana).unwrap();

        assert!(matches!(
            library.delete_room(room, at(10, 12)),
            Err(Refused::RoomHasBookings(_))
        ));
        assert!(library.delete_room(room, at(10, 13)).is_ok());
        assert!(library.find_room_by_name("Hall").is_none());
    }

    #[test]
    fn club_with_members_cannot_be_deleted() {
        let mut library = Library::new();
        let ana = library.save_reader(reader("Ana"));
        let club = library.save_club(Club::new());
        library.join_club(club, ana).unwrap();
        assert_eq!(
            library.delete_club(club).unwrap_err(),
            Refused::ClubHasMembers(1)
        );
        library.leave_club(club, ana).unwrap();
        assert!(library.delete_club(club).is_ok());
    }

    #[test]
    fn librarians_are_always_deletable() {
        let (mut library, book) = library_with_book();
        let olga =
            library.save_librarian(Librarian::new("Olga", "Smirnova", "+78888888888").unwrap());
        let ana = library.save_reader(reader("Ana"));

        library.lend_book(olga, book, ana).unwrap();
        assert!(library.lend_book(olga, book, ana).is_err());
        library.accept_return(olga, book, ana).unwrap();

        let updated = Librarian::new("Olga", "Smirnova", "+77777777777").unwrap();
        assert_eq!(library.save_librarian(updated), olga);
        assert_eq!(library.librarian(olga).unwrap().phone, "+77777777777");

        library.delete_librarian(olga).unwrap();
        assert!(library.find_librarian_by_name("Olga", "Smirnova").is_none());
        assert!(matches!(
            library.delete_librarian(olga),
            Err(Refused::NotFound { kind: "librarian", .. })
        ));
    }

    #[test]
    fn reset_clears_everything() {
        let (mut library, _) = library_with_book();
        library.save_reader(reader("Ana"));
        library.save_club(Club::new());
        library.reset();
        assert_eq!(library.summary(), Summary::default());
        assert_eq!(library, Library::new());
    }
}
