//! JSON codec
//!
//! A single object with the keys `librarians`, `readers`, `books`, `rooms` and `clubs`,
//! pretty-printed with two-space indentation.
use crate::codec::Codec;
use crate::codec::records::LibraryDocument;
use crate::codec::restore::restore;
use crate::codec::snapshot::snapshot;
use crate::errors::CodecError;
use crate::registry::Library;

#[allow(clippy::exhaustive_structs, reason = "Stateless codec will remain empty")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Codec for Json {
    #[inline]
    fn encode(&self, library: &Library) -> Result<String, CodecError> {
        let document = snapshot(library)?;
        Ok(serde_json::to_string_pretty(&document)?)
    }

    #[inline]
    fn decode(&self, source: &str) -> Result<Library, CodecError> {
        let document: LibraryDocument = serde_json::from_str(source)?;
        restore(&document)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use crate::test_support::{at, sample_library};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    #[test]
    fn round_trip_keeps_fields_and_references() {
        let library = sample_library();
        let encoded = Json.encode(&library).unwrap();
        let decoded = Json.decode(&encoded).unwrap();

        assert_eq!(snapshot(&decoded).unwrap(), snapshot(&library).unwrap());
        assert_eq!(decoded.summary(), library.summary());

        let ana = decoded.find_reader_by_name("Ana", "Petrova").unwrap();
        let dune = decoded.find_book_by_isbn("111").unwrap();
        let messiah = decoded.find_book_by_isbn("112").unwrap();
        assert_eq!(dune.current_borrower(), Some(ana.id));
        assert_eq!(ana.borrowed_books(), &[messiah.id, dune.id]);
        assert_eq!(dune.author, messiah.author);
        assert_eq!(
            ana.ticket(),
            library
                .find_reader_by_name("Ana", "Petrova")
                .unwrap()
                .ticket()
        );
        assert_eq!(ana.review().unwrap().date, at(1, 12));

        let room = decoded.find_room_by_name("Main hall").unwrap();
        assert_eq!(room.occupant(3, at(14, 10)), Some(ana.id));
        let club = decoded.clubs().first().unwrap();
        assert!(club.is_member(ana.id));
        assert!(ana.in_club());
        assert_eq!(
            club.current_book(),
            decoded.find_book_by_isbn("200").map(|book| book.id)
        );
    }

    #[test]
    fn references_are_written_as_natural_keys() {
        let encoded = Json.encode(&sample_library()).unwrap();
        let value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["books"][0]["current_borrower"], "Ana Petrova");
        assert_eq!(value["books"][3]["current_borrower"], Value::Null);
        assert_eq!(value["readers"][0]["borrowed_books_isbn"][0], "112");
        assert_eq!(value["readers"][0]["review"]["date"], "2025-03-01T12:00:00");
        assert_eq!(value["readers"][1]["reader_type"], "student");
        assert_eq!(value["readers"][1]["course"], 3);
        assert_eq!(value["readers"][2]["grade"], "7B");
        assert_eq!(value["readers"][1]["review"], Value::Null);
        assert_eq!(value["rooms"][0]["bookings"][0]["reader"], "Ana Petrova");
        assert_eq!(value["rooms"][0]["bookings"][0]["datetime"], "2025-03-14T10:00:00");
        assert_eq!(value["clubs"][0]["members"][1], "Petya Sidorov");
        assert_eq!(value["clubs"][0]["current_book_isbn"], "200");
    }

    const UNKNOWN_BORROWER: &str = r#"{
        "librarians": [],
        "readers": [],
        "books": [{
            "title": "Dune",
            "author": {"first_name": "Frank", "last_name": "Herbert"},
            "isbn": "111",
            "location": {"rack": "A", "shelf": "1"},
            "is_available": false,
            "current_borrower": "Nobody Known"
        }],
        "rooms": [],
        "clubs": []
    }"#;

    #[test]
    fn unknown_borrower_is_dropped_without_failing() {
        let library = Json.decode(UNKNOWN_BORROWER).unwrap();
        let book = library.find_book_by_isbn("111").unwrap();
        assert!(!book.is_available());
        assert_eq!(book.current_borrower(), None);
    }

    const LEGACY: &str = r#"{
        "librarians": [{"first_name": "Olga", "last_name": "Smirnova", "phone": "+78888888888"}],
        "readers": [{
            "first_name": "Ana", "last_name": "Petrova", "phone": "+79161234567",
            "email": "ana@example.org", "reader_type": "regular", "in_club": true,
            "ticket": {
                "ticket_id": "AB12CD34", "issue_date": "2025-01-01", "expiry_date": "2025-01-15"
            }
        }],
        "books": [{
            "title": "Dune",
            "author": {"first_name": "Frank", "last_name": "Herbert", "bio": ""},
            "isbn": "111",
            "location": {"rack": "A", "shelf": "1"},
            "is_available": false,
            "current_borrower_name": {"first_name": "Ana", "last_name": "Petrova"}
        }],
        "rooms": [{
            "name": "Main hall",
            "bookings": [
                {"seat_number": 25, "datetime": "2025-03-14T10:00:00",
                 "reader_name": {"first_name": "Ana", "last_name": "Petrova"}},
                {"seat_number": 2, "datetime": "yesterday", "reader": "Ana Petrova"},
                {"seat_number": 3, "datetime": "2025-03-14T10:00:00", "reader": "Ghost Reader"}
            ]
        }],
        "clubs": [{
            "members_names": {"first_name": "Ana", "last_name": "Petrova"},
            "meetings": ["2025-03-20T18:00:00", "not a date"],
            "current_book_isbn": "999"
        }]
    }"#;

    #[test]
    fn legacy_field_names_are_understood() {
        let library = Json.decode(LEGACY).unwrap();
        let ana = library.find_reader_by_name("Ana", "Petrova").unwrap();
        let book = library.find_book_by_isbn("111").unwrap();
        assert_eq!(book.current_borrower(), Some(ana.id));
        assert_eq!(ana.ticket().ticket_id, "AB12CD34");

        let room = library.find_room_by_name("Main hall").unwrap();
        assert_eq!(room.capacity(), 25);
        assert_eq!(room.bookings().count(), 1);
        assert_eq!(room.occupant(25, at(14, 10)), Some(ana.id));

        let club = library.clubs().first().unwrap();
        assert_eq!(club.members(), &[ana.id]);
        assert!(ana.in_club());
        assert_eq!(club.meetings(), &[at(20, 18)]);
        assert_eq!(club.current_book(), None);
    }

    #[test]
    fn invalid_required_record_aborts_load() {
        let broken = LEGACY.replace("+79161234567", "12345");
        assert!(matches!(
            Json.decode(&broken),
            Err(CodecError::Invalid(error)) if error.field == "phone"
        ));
        assert!(matches!(Json.decode("{\"books\": ["), Err(CodecError::Json(_))));
    }

    #[test]
    fn duplicate_natural_keys_collapse() {
        let doubled = LEGACY.replace(
            r#""books": [{"#,
            r#""books": [{"title": "Dune (2nd copy)",
                "author": {"first_name": "Frank", "last_name": "Herbert"}, "isbn": "111",
                "location": {"rack": "C", "shelf": "9"}, "is_available": true}, {"#,
        );
        let library = Json.decode(&doubled).unwrap();
        assert_eq!(library.books().len(), 1);
        let book = library.find_book_by_isbn("111").unwrap();
        assert_eq!(book.title, "Dune");
        assert!(book.is_available());
    }

    const BROKEN_OPTIONALS: &str = r#"{
        "librarians": [],
        "readers": [{
            "first_name": "Ana", "last_name": "Petrova", "phone": "+79161234567",
            "email": "ana@example.org", "reader_type": "regular",
            "ticket": {
                "ticket_id": "AB12CD34", "issue_date": "2025-01-01", "expiry_date": "2025-01-15"
            },
            "review": {"text": "Cosy", "rating": "five", "date": "2025-03-01T12:00:00"}
        }],
        "books": [],
        "rooms": [{
            "name": "Main hall",
            "bookings": [
                {"seat_number": 1, "reader": "Ana Petrova"},
                {"seat_number": "three", "datetime": "2025-03-14T10:00:00",
                 "reader": "Ana Petrova"},
                {"seat_number": 2, "datetime": "2025-03-14T10:00:00", "reader": "Ana Petrova"}
            ]
        }],
        "clubs": []
    }"#;

    #[test]
    fn malformed_optional_records_are_skipped() {
        let library = Json.decode(BROKEN_OPTIONALS).unwrap();
        let ana = library.find_reader_by_name("Ana", "Petrova").unwrap();
        assert_eq!(ana.review(), None);

        let room = library.find_room_by_name("Main hall").unwrap();
        assert_eq!(room.bookings().count(), 1);
        assert_eq!(room.occupant(2, at(14, 10)), Some(ana.id));
    }

    #[test]
    fn repeated_room_keeps_every_booked_seat() {
        let doubled = LEGACY.replace(
            r#""rooms": [{"#,
            r#""rooms": [{"name": "Main hall", "capacity": 30, "bookings": [
                {"seat_number": 28, "datetime": "2025-03-14T11:00:00", "reader": "Ana Petrova"}
            ]}, {"#,
        );
        let library = Json.decode(&doubled).unwrap();
        assert_eq!(library.rooms().len(), 1);

        let ana = library.find_reader_by_name("Ana", "Petrova").unwrap();
        let room = library.find_room_by_name("Main hall").unwrap();
        assert_eq!(room.capacity(), 30);
        assert_eq!(room.occupant(28, at(14, 11)), Some(ana.id));
        assert_eq!(room.occupant(25, at(14, 10)), Some(ana.id));
    }

    #[test]
    fn stored_ticket_ids_are_kept_even_when_shared() {
        let shared = LEGACY.replace(
            r#""readers": [{"#,
            r#""readers": [{
                "first_name": "Ivan", "last_name": "Ivanov", "phone": "+71234567890",
                "email": "ivan@test.com", "reader_type": "regular",
                "ticket": {
                    "ticket_id": "AB12CD34", "issue_date": "2025-01-01", "expiry_date": "2025-01-15"
                }
            }, {"#,
        );
        let library = Json.decode(&shared).unwrap();
        for (first, last) in [("Ivan", "Ivanov"), ("Ana", "Petrova")] {
            let reader = library.find_reader_by_name(first, last).unwrap();
            assert_eq!(reader.ticket().ticket_id, "AB12CD34");
        }
    }
}
