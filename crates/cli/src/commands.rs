//! One function per subcommand. Each works on an [`AppState`] and returns the text to print;
//! commands that change the library write both data files before returning.
use crate::cli::{Command, Loan, ReaderName};
use crate::errors::CommandError;
use crate::state::AppState;
use bibliotheca_core::{BookId, Library, Location, ReaderId, Refused, RoomId, verify_code};
use chrono::NaiveDateTime;
use core::iter;

pub fn execute(state: &mut AppState, command: Command) -> Result<String, CommandError> {
    match command {
        Command::Summary => Ok(summary(&state.library)),
        Command::Convert => {
            state.persist()?;
            Ok(format!(
                "Rewrote {} and {} from {}",
                state.paths.json.display(),
                state.paths.xml.display(),
                state.format
            ))
        }
        Command::VerifyCode { code } => {
            if verify_code(code) {
                Ok("Access granted".to_owned())
            } else {
                Err(CommandError::WrongCode)
            }
        }
        Command::Lend(loan) => mutate(state, |library| lend(library, &loan)),
        Command::Return(loan) => mutate(state, |library| give_back(library, &loan)),
        Command::Relocate { isbn, rack, shelf } => {
            mutate(state, |library| relocate(library, &isbn, &rack, &shelf))
        }
        Command::DeleteBook { isbn } => mutate(state, |library| {
            let book = find_book(library, &isbn)?;
            let removed = library.delete_book(book)?;
            Ok(format!("Deleted '{}'", removed.title))
        }),
        Command::Reserve {
            room,
            seat,
            at,
            reader,
        } => mutate(state, |library| {
            reserve(library, &room, seat, at, &reader)
        }),
        Command::Review {
            reader,
            rating,
            text,
        } => mutate(state, |library| {
            let id = find_reader(library, &reader)?;
            library
                .reader_mut(id)
                .ok_or_else(|| not_found("reader", full_name(&reader)))?
                .set_review(&text, rating)?;
            Ok(format!("Saved review by {}", full_name(&reader)))
        }),
    }
}

/// Applies `change` and saves. A refused change leaves the files untouched.
fn mutate(
    state: &mut AppState,
    change: impl FnOnce(&mut Library) -> Result<String, CommandError>,
) -> Result<String, CommandError> {
    let message = change(&mut state.library)?;
    state.persist()?;
    Ok(message)
}

fn summary(library: &Library) -> String {
    let books = library.books().iter().map(|book| {
        let status = match book.current_borrower().and_then(|id| library.reader(id)) {
            Some(reader) => format!("borrowed by {}", reader.full_name()),
            None if book.is_available() => "available".to_owned(),
            None => "unavailable".to_owned(),
        };
        format!("{} '{}' at {}: {status}", book.isbn, book.title, book.location)
    });
    iter::once(library.summary().to_string())
        .chain(books)
        .collect::<Vec<_>>()
        .join("\n")
}

fn lend(library: &mut Library, loan: &Loan) -> Result<String, CommandError> {
    let book = find_book(library, &loan.isbn)?;
    let reader = find_reader(library, &loan.reader)?;
    library.take_book(reader, book)?;
    Ok(format!("{} took {}", full_name(&loan.reader), loan.isbn))
}

fn give_back(library: &mut Library, loan: &Loan) -> Result<String, CommandError> {
    let book = find_book(library, &loan.isbn)?;
    let reader = find_reader(library, &loan.reader)?;
    library.return_book(reader, book)?;
    Ok(format!("{} returned {}", full_name(&loan.reader), loan.isbn))
}

fn relocate(
    library: &mut Library,
    isbn: &str,
    rack: &str,
    shelf: &str,
) -> Result<String, CommandError> {
    let location = Location::new(rack, shelf)?;
    let id = find_book(library, isbn)?;
    let book = library
        .book_mut(id)
        .ok_or_else(|| not_found("book", isbn))?;
    book.relocate(location);
    Ok(format!("Moved {isbn} to {}", book.location))
}

fn reserve(
    library: &mut Library,
    room: &str,
    seat: u32,
    at: NaiveDateTime,
    reader: &ReaderName,
) -> Result<String, CommandError> {
    let room_id: RoomId = library
        .find_room_by_name(room)
        .map(|found| found.id)
        .ok_or_else(|| not_found("room", room))?;
    let reader_id = find_reader(library, reader)?;
    library.reserve_seat(room_id, seat, at, reader_id)?;
    Ok(format!(
        "Seat {seat} in {room} booked for {} at {at}",
        full_name(reader)
    ))
}

fn full_name(reader: &ReaderName) -> String {
    format!("{} {}", reader.first_name, reader.last_name)
}

fn not_found(kind: &'static str, key: impl Into<String>) -> CommandError {
    CommandError::Refused(Refused::NotFound {
        kind,
        key: key.into(),
    })
}

fn find_book(library: &Library, isbn: &str) -> Result<BookId, CommandError> {
    library
        .find_book_by_isbn(isbn)
        .map(|book| book.id)
        .ok_or_else(|| not_found("book", isbn))
}

fn find_reader(library: &Library, reader: &ReaderName) -> Result<ReaderId, CommandError> {
    library
        .find_reader_by_name(&reader.first_name, &reader.last_name)
        .map(|found| found.id)
        .ok_or_else(|| not_found("reader", full_name(reader)))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use bibliotheca_core::{
        Author, Book, Club, Format, LibraryPaths, Reader, ReaderKind, Room, storage,
    };
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn ana() -> ReaderName {
        ReaderName {
            first_name: "Ana".to_owned(),
            last_name: "Petrova".to_owned(),
        }
    }

    fn seeded() -> (TempDir, AppState) {
        let mut library = Library::new();
        let herbert = library.add_author(Author::new("Frank", "Herbert", "").unwrap());
        library
            .save_book(Book::new("Dune", herbert, "111", Location::new("A", "1").unwrap()).unwrap())
            .unwrap();
        let messiah = library
            .save_book(
                Book::new("Dune Messiah", herbert, "112", Location::new("A", "2").unwrap())
                    .unwrap(),
            )
            .unwrap();
        let reader = library.save_reader(
            Reader::new(
                "Ana",
                "Petrova",
                "+79161234567",
                "ana@example.org",
                ReaderKind::Regular,
            )
            .unwrap(),
        );
        library.save_room(Room::new("Main hall", 10).unwrap()).unwrap();
        let club = library.save_club(Club::new());
        library.join_club(club, reader).unwrap();
        library.set_club_book(club, Some(messiah)).unwrap();

        let dir = tempdir().unwrap();
        let paths = LibraryPaths::in_dir(dir.path());
        assert!(storage::save_all(&library, &paths).is_ok());
        let state = AppState::open(dir.path(), Format::Json).unwrap();
        (dir, state)
    }

    fn reopen(dir: &TempDir, format: Format) -> Library {
        AppState::open(dir.path(), format).unwrap().library
    }

    #[test]
    fn lend_and_return_are_saved_to_both_files() {
        let (dir, mut state) = seeded();
        let loan = Loan {
            isbn: "111".to_owned(),
            reader: ana(),
        };

        execute(&mut state, Command::Lend(loan.clone())).unwrap();
        for format in [Format::Json, Format::Xml] {
            let library = reopen(&dir, format);
            let reader = library.find_reader_by_name("Ana", "Petrova").unwrap();
            let book = library.find_book_by_isbn("111").unwrap();
            assert_eq!(book.current_borrower(), Some(reader.id));
        }

        execute(&mut state, Command::Return(loan)).unwrap();
        assert!(reopen(&dir, Format::Xml).find_book_by_isbn("111").unwrap().is_available());
    }

    #[test]
    fn refusal_leaves_files_untouched() {
        let (dir, mut state) = seeded();
        let before = fs::read_to_string(&state.paths.json).unwrap();

        let error = execute(
            &mut state,
            Command::DeleteBook {
                isbn: "112".to_owned(),
            },
        )
        .unwrap_err();
        assert!(matches!(
            error,
            CommandError::Refused(Refused::BookUnderDiscussion(_))
        ));
        assert_eq!(fs::read_to_string(&state.paths.json).unwrap(), before);
        assert_eq!(reopen(&dir, Format::Json).books().len(), 2);
    }

    #[test]
    fn relocate_reserve_and_review_persist() {
        let (dir, mut state) = seeded();
        let at = NaiveDateTime::parse_from_str("2025-03-14T10:00:00", "%Y-%m-%dT%H:%M:%S").unwrap();

        execute(
            &mut state,
            Command::Relocate {
                isbn: "111".to_owned(),
                rack: "C".to_owned(),
                shelf: "7".to_owned(),
            },
        )
        .unwrap();
        execute(
            &mut state,
            Command::Reserve {
                room: "Main hall".to_owned(),
                seat: 4,
                at,
                reader: ana(),
            },
        )
        .unwrap();
        execute(
            &mut state,
            Command::Review {
                reader: ana(),
                rating: 4,
                text: "Quiet and warm".to_owned(),
            },
        )
        .unwrap();

        let library = reopen(&dir, Format::Xml);
        let reader = library.find_reader_by_name("Ana", "Petrova").unwrap();
        assert_eq!(
            library.find_book_by_isbn("111").unwrap().location,
            Location::new("C", "7").unwrap()
        );
        assert_eq!(
            library.find_room_by_name("Main hall").unwrap().occupant(4, at),
            Some(reader.id)
        );
        assert_eq!(reader.review().unwrap().rating, 4);
    }

    #[test]
    fn unknown_names_and_codes_are_reported() {
        let (_dir, mut state) = seeded();
        let missing = execute(
            &mut state,
            Command::Lend(Loan {
                isbn: "999".to_owned(),
                reader: ana(),
            }),
        );
        assert!(matches!(
            missing,
            Err(CommandError::Refused(Refused::NotFound { kind: "book", .. }))
        ));
        assert!(matches!(
            execute(&mut state, Command::VerifyCode { code: 1111 }),
            Err(CommandError::WrongCode)
        ));
        assert!(execute(&mut state, Command::VerifyCode { code: 1234 }).is_ok());
    }

    #[test]
    fn summary_lists_every_book() {
        let (_dir, mut state) = seeded();
        let output = execute(&mut state, Command::Summary).unwrap();
        assert!(output.starts_with("2 books by 1 authors, 1 readers"));
        assert!(output.contains("111 'Dune' at rack A, shelf 1: available"));
    }
}
