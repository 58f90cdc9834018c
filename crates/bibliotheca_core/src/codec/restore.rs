//! Rebuilding a registry from a [`LibraryDocument`].
//!
//! Records are restored in dependency order: librarians, readers, books, rooms, clubs. Each
//! stage registers its natural keys with the [`Resolver`] before any later stage needs them. A
//! reference that cannot be resolved is dropped with a warning; only a malformed required
//! record aborts the load.
use crate::codec::records::{
    BookRecord, ClubRecord, LibrarianRecord, LibraryDocument, ReaderRecord, RoomRecord,
};
use crate::codec::{parse_date, parse_datetime};
use crate::errors::CodecError;
use crate::model::room::DEFAULT_ROOM_CAPACITY;
use crate::model::{
    Author, Book, BookId, Club, Librarian, Location, Reader, ReaderId, ReaderKind, Review, Room,
    Ticket, ValidationError,
};
use crate::registry::Library;
use crate::resolver::Resolver;

/// Builds a fresh library from `document`.
/// # Errors
/// Fails if a required record is malformed; the partially built library is discarded
#[inline]
pub fn restore(document: &LibraryDocument) -> Result<Library, CodecError> {
    let mut library = Library::new();
    let mut resolver = Resolver::new();

    for record in &document.librarians {
        restore_librarian(&mut library, record)?;
    }

    let mut borrow_orders = Vec::with_capacity(document.readers.len());
    let mut flagged_members = Vec::new();
    for record in &document.readers {
        let id = restore_reader(&mut library, &mut resolver, record)?;
        borrow_orders.push((id, &record.borrowed_books_isbn));
        if record.in_club {
            flagged_members.push(id);
        }
    }

    for record in &document.books {
        restore_book(&mut library, &mut resolver, record)?;
    }
    for (reader, isbns) in borrow_orders {
        let order = isbns
            .iter()
            .filter_map(|isbn| resolver.book(isbn))
            .collect::<Vec<BookId>>();
        if let Some(reader) = library.reader_mut(reader) {
            reader.order_borrowed(&order);
        }
    }

    for record in &document.rooms {
        restore_room(&mut library, &resolver, record)?;
    }
    for record in &document.clubs {
        restore_club(&mut library, &resolver, record);
    }

    for id in flagged_members {
        if let Some(reader) = library.reader(id).filter(|reader| !reader.in_club()) {
            log::debug!(
                "{} was flagged as club member without a membership",
                reader.full_name()
            );
        }
    }

    log::info!("Restored {}", library.summary());
    Ok(library)
}

fn restore_librarian(library: &mut Library, record: &LibrarianRecord) -> Result<(), CodecError> {
    let librarian = Librarian::new(&record.first_name, &record.last_name, &record.phone)?;
    library.save_librarian(librarian);
    Ok(())
}

fn reader_kind(record: &ReaderRecord) -> Result<ReaderKind, CodecError> {
    fn present<'record>(
        value: Option<&'record String>,
        field: &str,
    ) -> Result<&'record str, CodecError> {
        value
            .map(String::as_str)
            .ok_or_else(|| CodecError::Missing(field.to_owned()))
    }

    let kind = match record.reader_type.trim() {
        "regular" => ReaderKind::Regular,
        "school" => ReaderKind::school(
            present(record.school_name.as_ref(), "school_name")?,
            present(record.grade.as_ref(), "grade")?,
        )?,
        "student" => ReaderKind::student(
            present(record.university.as_ref(), "university")?,
            record
                .course
                .ok_or_else(|| CodecError::Missing("course".to_owned()))?,
        )?,
        other => {
            return Err(ValidationError::new(
                "reader_type",
                format!("unknown reader type '{other}'"),
            )
            .into());
        }
    };
    Ok(kind)
}

fn restore_reader(
    library: &mut Library,
    resolver: &mut Resolver,
    record: &ReaderRecord,
) -> Result<ReaderId, CodecError> {
    let ticket = Ticket::restore(
        &record.ticket.ticket_id,
        parse_date("issue_date", &record.ticket.issue_date)?,
        parse_date("expiry_date", &record.ticket.expiry_date)?,
    )?;
    let mut reader = Reader::with_ticket(
        &record.first_name,
        &record.last_name,
        &record.phone,
        &record.email,
        reader_kind(record)?,
        ticket,
    )?;
    if !record.education_place.trim().is_empty() {
        record.education_place.trim().clone_into(&mut reader.education_place);
    }

    if let Some(stored) = &record.review {
        let review = parse_datetime("date", &stored.date).and_then(|date| {
            Review::new(&stored.text, stored.rating, date).map_err(CodecError::from)
        });
        match review {
            Ok(review) => reader.restore_review(review),
            Err(error) => log::warn!("Skipping review of {}: {error}", reader.full_name()),
        }
    }

    let full_name = reader.full_name();
    let id = library.restore_reader(reader);
    resolver.add_reader(full_name, id);
    Ok(id)
}

fn restore_book(
    library: &mut Library,
    resolver: &mut Resolver,
    record: &BookRecord,
) -> Result<(), CodecError> {
    let author = library.add_author(Author::new(
        &record.author.first_name,
        &record.author.last_name,
        &record.author.bio,
    )?);
    let location = Location::new(&record.location.rack, &record.location.shelf)?;
    let book = Book::new(&record.title, author, &record.isbn, location)?;
    let isbn = book.isbn.clone();
    let repeated = resolver.book(&isbn).is_some();
    let id = library
        .save_book(book)
        .map_err(|refused| CodecError::Missing(refused.to_string()))?;
    if repeated {
        log::debug!("Book {isbn} appears twice, keeping the first loan state");
        return Ok(());
    }
    resolver.add_book(isbn.clone(), id);

    let borrower = match (&record.current_borrower, record.is_available) {
        (Some(name), false) => {
            let name = name.full_name();
            let borrower = resolver.reader(&name);
            if borrower.is_none() {
                log::warn!("Book {isbn} names unknown borrower '{name}', loading it without one");
            }
            borrower
        }
        (Some(name), true) => {
            log::debug!("Ignoring borrower '{}' of available book {isbn}", name.full_name());
            None
        }
        (None, _) => None,
    };

    if let Some(book) = library.book_mut(id) {
        book.restore_loan(record.is_available, borrower);
    }
    if let Some(reader) = borrower.and_then(|borrower| library.reader_mut(borrower)) {
        reader.attach_borrowed(id);
    }
    Ok(())
}

fn restore_room(
    library: &mut Library,
    resolver: &Resolver,
    record: &RoomRecord,
) -> Result<(), CodecError> {
    let highest_seat = record
        .bookings
        .iter()
        .map(|booking| booking.seat_number)
        .max()
        .unwrap_or(0);
    let capacity = record
        .capacity
        .unwrap_or_else(|| DEFAULT_ROOM_CAPACITY.max(highest_seat));
    // A repeated room name merges into the first room, which must keep its booked seats.
    let capacity = library
        .find_room_by_name(record.name.trim())
        .map_or(capacity, |existing| existing.capacity().max(capacity));
    let id = library.save_room(Room::new(&record.name, capacity)?)?;

    for booking in &record.bookings {
        let Some(name) = booking.reader.as_ref().map(|reader| reader.full_name()) else {
            log::warn!(
                "Skipping booking of seat {} in {} without a reader",
                booking.seat_number,
                record.name
            );
            continue;
        };
        let at = match parse_datetime("datetime", &booking.datetime) {
            Ok(at) => at,
            Err(error) => {
                log::warn!("Skipping booking in {}: {error}", record.name);
                continue;
            }
        };
        let Some(reader) = resolver.reader(&name) else {
            log::warn!("Skipping booking in {} for unknown reader '{name}'", record.name);
            continue;
        };
        let restored = library
            .room_mut(id)
            .is_some_and(|room| room.restore_booking(booking.seat_number, at, reader));
        if !restored {
            log::warn!(
                "Skipping booking of seat {} at {at} in {}: seat missing or taken",
                booking.seat_number,
                record.name
            );
        }
    }
    Ok(())
}

fn restore_club(library: &mut Library, resolver: &Resolver, record: &ClubRecord) {
    let mut club = Club::new();

    for member in &record.members {
        let name = member.full_name();
        let Some(reader) = resolver
            .reader(&name)
            .and_then(|id| library.reader_mut(id))
        else {
            log::warn!("Skipping unknown club member '{name}'");
            continue;
        };
        if reader.in_club() && !club.is_member(reader.id) {
            log::warn!("Skipping '{name}': already a member of another club");
            continue;
        }
        if club.restore_member(reader.id) {
            reader.set_in_club(true);
        }
    }

    for meeting in &record.meetings {
        match parse_datetime("meeting", meeting) {
            Ok(at) => club.schedule_meeting(at),
            Err(error) => log::warn!("Skipping club meeting: {error}"),
        }
    }

    if let Some(isbn) = &record.current_book_isbn {
        match resolver.book(isbn) {
            Some(book) => club.restore_current_book(book),
            None => log::warn!("Club discusses unknown book {isbn}, leaving it unset"),
        }
    }

    library.save_club(club);
}
