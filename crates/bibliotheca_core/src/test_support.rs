//! Shared fixtures for unit tests.
#![allow(
    clippy::unwrap_used,
    reason = "Fixtures are predefined and guaranteed to be Some/Ok"
)]
use crate::model::{Author, Book, Club, Librarian, Location, Reader, ReaderKind, Room};
use crate::registry::Library;
use chrono::{NaiveDate, NaiveDateTime};

pub(crate) fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// A library exercising every entity kind and every reference between them.
pub(crate) fn sample_library() -> Library {
    let mut library = Library::new();
    let olga =
        library.save_librarian(Librarian::new("Olga", "Smirnova", "+78888888888").unwrap());

    let herbert =
        library.add_author(Author::new("Frank", "Herbert", "American novelist").unwrap());
    let tolstoy = library.add_author(Author::new("Leo", "Tolstoy", "").unwrap());
    let dune = library
        .save_book(Book::new("Dune", herbert, "111", Location::new("A", "1").unwrap()).unwrap())
        .unwrap();
    let messiah = library
        .save_book(
            Book::new("Dune Messiah", herbert, "112", Location::new("A", "2").unwrap()).unwrap(),
        )
        .unwrap();
    let war_and_peace = library
        .save_book(
            Book::new("War & Peace", tolstoy, "200", Location::new("B", "1").unwrap()).unwrap(),
        )
        .unwrap();
    library
        .save_book(
            Book::new("Anna Karenina", tolstoy, "201", Location::new("B", "2").unwrap()).unwrap(),
        )
        .unwrap();

    let ana = library.save_reader(
        Reader::new(
            "Ana",
            "Petrova",
            "+79161234567",
            "ana@example.org",
            ReaderKind::Regular,
        )
        .unwrap(),
    );
    let ivan = library.save_reader(
        Reader::new(
            "Ivan",
            "Ivanov",
            "+71234567890",
            "ivan@test.com",
            ReaderKind::student("MSU", 3).unwrap(),
        )
        .unwrap(),
    );
    let petya = library.save_reader(
        Reader::new(
            "Petya",
            "Sidorov",
            "+70001112233",
            "petya@school.ru",
            ReaderKind::school("School 57", "7B").unwrap(),
        )
        .unwrap(),
    );

    library.take_book(ana, messiah).unwrap();
    library.take_book(ana, dune).unwrap();
    library.lend_book(olga, war_and_peace, ivan).unwrap();
    library
        .reader_mut(ana)
        .unwrap()
        .set_review_at("Great <cosy> library", 5, at(1, 12))
        .unwrap();

    let room = library.save_room(Room::new("Main hall", 10).unwrap()).unwrap();
    library.reserve_seat(room, 3, at(14, 10), ana).unwrap();
    library.reserve_seat(room, 3, at(14, 11), ivan).unwrap();
    library.reserve_seat(room, 5, at(14, 10), petya).unwrap();
    library.save_room(Room::new("Quiet room", 2).unwrap()).unwrap();

    let club = library.save_club(Club::new());
    library.join_club(club, ana).unwrap();
    library.join_club(club, petya).unwrap();
    library.set_club_book(club, Some(war_and_peace)).unwrap();
    let meetings = library.club_mut(club).unwrap();
    meetings.schedule_meeting(at(20, 18));
    meetings.schedule_meeting(at(27, 18));

    library
}
