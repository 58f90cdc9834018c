//! Flattening of the live registry into a [`LibraryDocument`].
use crate::codec::records::{
    AuthorRecord, BookRecord, BookingRecord, ClubRecord, LibrarianRecord, LibraryDocument,
    LocationRecord, PersonRef, ReaderRecord, ReviewRecord, RoomRecord, TicketRecord,
};
use crate::codec::{format_date, format_datetime};
use crate::errors::CodecError;
use crate::model::{Book, Club, Librarian, Reader, ReaderId, ReaderKind, Room};
use crate::registry::Library;

/// Emits one record per entity, every reference flattened to its natural key.
/// # Errors
/// Fails if a book points at an author missing from the author table
#[inline]
pub fn snapshot(library: &Library) -> Result<LibraryDocument, CodecError> {
    let books = library
        .books()
        .iter()
        .map(|book| book_record(library, book))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LibraryDocument {
        librarians: library.librarians().iter().map(librarian_record).collect(),
        readers: library
            .readers()
            .iter()
            .map(|reader| reader_record(library, reader))
            .collect(),
        books,
        rooms: library
            .rooms()
            .iter()
            .map(|room| room_record(library, room))
            .collect(),
        clubs: library
            .clubs()
            .iter()
            .map(|club| club_record(library, club))
            .collect(),
    })
}

fn person(library: &Library, id: ReaderId) -> Option<PersonRef> {
    let reader = library.reader(id);
    if reader.is_none() {
        log::warn!("Dropping reference to unknown reader {id}");
    }
    reader.map(|reader| PersonRef::FullName(reader.full_name()))
}

fn librarian_record(librarian: &Librarian) -> LibrarianRecord {
    LibrarianRecord {
        first_name: librarian.first_name.clone(),
        last_name: librarian.last_name.clone(),
        phone: librarian.phone.clone(),
    }
}

fn reader_record(library: &Library, reader: &Reader) -> ReaderRecord {
    let (school_name, grade, university, course) = match &reader.kind {
        ReaderKind::Regular => (None, None, None, None),
        ReaderKind::School { school_name, grade } => {
            (Some(school_name.clone()), Some(grade.clone()), None, None)
        }
        ReaderKind::Student { university, course } => {
            (None, None, Some(university.clone()), Some(*course))
        }
    };
    let ticket = reader.ticket();

    ReaderRecord {
        first_name: reader.first_name.clone(),
        last_name: reader.last_name.clone(),
        phone: reader.phone.clone(),
        email: reader.email.clone(),
        reader_type: reader.reader_type().to_owned(),
        education_place: reader.education_place.clone(),
        in_club: reader.in_club(),
        borrowed_books_isbn: reader
            .borrowed_books()
            .iter()
            .filter_map(|id| library.book(*id))
            .map(|book| book.isbn.clone())
            .collect(),
        ticket: TicketRecord {
            ticket_id: ticket.ticket_id.clone(),
            issue_date: format_date(ticket.issue_date),
            expiry_date: format_date(ticket.expiry_date),
        },
        school_name,
        grade,
        university,
        course,
        review: reader.review().map(|review| ReviewRecord {
            text: review.text.clone(),
            rating: review.rating,
            date: format_datetime(review.date),
        }),
    }
}

fn book_record(library: &Library, book: &Book) -> Result<BookRecord, CodecError> {
    let author = library
        .author(book.author)
        .ok_or_else(|| CodecError::Missing(format!("author of book {}", book.isbn)))?;

    Ok(BookRecord {
        title: book.title.clone(),
        author: AuthorRecord {
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            bio: author.bio.clone(),
        },
        isbn: book.isbn.clone(),
        location: LocationRecord {
            rack: book.location.rack.clone(),
            shelf: book.location.shelf.clone(),
        },
        is_available: book.is_available(),
        current_borrower: book
            .current_borrower()
            .and_then(|borrower| person(library, borrower)),
    })
}

fn room_record(library: &Library, room: &Room) -> RoomRecord {
    RoomRecord {
        name: room.name.clone(),
        capacity: Some(room.capacity()),
        bookings: room
            .bookings()
            .filter_map(|(seat, at, reader)| {
                person(library, reader).map(|reader| BookingRecord {
                    seat_number: seat,
                    datetime: format_datetime(at),
                    reader: Some(reader),
                })
            })
            .collect(),
    }
}

fn club_record(library: &Library, club: &Club) -> ClubRecord {
    ClubRecord {
        members: club
            .members()
            .iter()
            .filter_map(|member| person(library, *member))
            .collect(),
        meetings: club.meetings().iter().copied().map(format_datetime).collect(),
        current_book_isbn: club
            .current_book()
            .and_then(|id| library.book(id))
            .map(|book| book.isbn.clone()),
    }
}
