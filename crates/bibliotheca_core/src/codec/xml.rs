//! XML codec
//!
//! Root element `Library` with the sections `Librarians`, `Books`, `Readers`, `Rooms` and
//! `Clubs`. Readers carry their kind in a `type` attribute; booleans are written as
//! `True`/`False`. The document is parsed into a small element tree first and then mapped onto
//! the shared records, so section order inside the file does not matter.
use crate::codec::Codec;
use crate::codec::records::{
    AuthorRecord, BookRecord, BookingRecord, ClubRecord, LibrarianRecord, LibraryDocument,
    LocationRecord, PersonRef, ReaderRecord, ReviewRecord, RoomRecord, TicketRecord,
};
use crate::codec::restore::restore;
use crate::codec::snapshot::snapshot;
use crate::errors::CodecError;
use crate::registry::Library;
use core::fmt;
use core::str::FromStr;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const ROOT: &str = "Library";

#[allow(clippy::exhaustive_structs, reason = "Stateless codec will remain empty")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Xml;

impl Codec for Xml {
    #[inline]
    fn encode(&self, library: &Library) -> Result<String, CodecError> {
        let document = snapshot(library)?;
        write_document(&document_element(&document))
    }

    #[inline]
    fn decode(&self, source: &str) -> Result<Library, CodecError> {
        let root = parse_document(source)?;
        restore(&document_from_element(&root)?)
    }
}

fn xml_error(error: impl fmt::Display) -> CodecError {
    CodecError::Xml(error.to_string())
}

/// Minimal element tree: mixed content is not used by the format, so an element keeps its
/// concatenated text next to its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    fn leaf(name: &str, text: impl Into<String>) -> Self {
        Self {
            name: name.to_owned(),
            text: text.into(),
            ..Self::default()
        }
    }

    fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_owned(), value.to_owned()));
        self
    }

    fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    fn children_named<'element>(
        &'element self,
        name: &'element str,
    ) -> impl Iterator<Item = &'element Self> {
        self.children.iter().filter(move |child| child.name == name)
    }

    fn require(&self, name: &str) -> Result<&Self, CodecError> {
        self.child(name)
            .ok_or_else(|| CodecError::Missing(format!("{}/{name}", self.name)))
    }

    /// Trimmed text of a required child; an empty element yields an empty string.
    fn text_of(&self, name: &str) -> Result<String, CodecError> {
        Ok(self.require(name)?.text.trim().to_owned())
    }

    /// Trimmed text of an optional child; absent and empty elements both yield `None`.
    fn optional_text(&self, name: &str) -> Option<String> {
        self.child(name)
            .map(|child| child.text.trim().to_owned())
            .filter(|text| !text.is_empty())
    }

    fn parsed<T: FromStr>(&self, name: &str) -> Result<T, CodecError> {
        let text = self.text_of(name)?;
        text.parse()
            .map_err(|_| CodecError::malformed(format!("{}/{name}", self.name), text))
    }

    fn flag(&self, name: &str) -> Result<bool, CodecError> {
        let text = self.text_of(name)?;
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") || text.is_empty() {
            Ok(false)
        } else {
            Err(CodecError::malformed(format!("{}/{name}", self.name), text))
        }
    }
}

fn flag_text(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

// Parsing

fn open_element(start: &BytesStart<'_>) -> Result<Element, CodecError> {
    let mut element = Element::new(&String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value).into_owned();
        let value = unescape(&raw).map_err(xml_error)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn parse_document(source: &str) -> Result<Element, CodecError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);
    let mut open: Vec<Element> = Vec::new();

    loop {
        let finished = match reader.read_event()? {
            Event::Start(start) => {
                open.push(open_element(&start)?);
                None
            }
            Event::Empty(start) => close_element(&mut open, open_element(&start)?),
            Event::End(_) => {
                let element = open
                    .pop()
                    .ok_or_else(|| CodecError::Xml("unbalanced closing tag".to_owned()))?;
                close_element(&mut open, element)
            }
            Event::Text(text) => {
                let raw = String::from_utf8_lossy(&text).into_owned();
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&unescape(&raw).map_err(xml_error)?);
                }
                None
            }
            Event::CData(data) => {
                if let Some(current) = open.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                }
                None
            }
            Event::Eof => return Err(CodecError::Xml("unexpected end of document".to_owned())),
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => None,
        };
        if let Some(root) = finished {
            return Ok(root);
        }
    }
}

/// Attaches a completed element to its parent, or hands it back if it is the root.
fn close_element(open: &mut [Element], element: Element) -> Option<Element> {
    match open.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            None
        }
        None => Some(element),
    }
}

fn document_from_element(root: &Element) -> Result<LibraryDocument, CodecError> {
    if root.name != ROOT {
        return Err(CodecError::malformed("root element", root.name.clone()));
    }

    Ok(LibraryDocument {
        librarians: root
            .require("Librarians")?
            .children_named("Librarian")
            .map(librarian_from_element)
            .collect::<Result<_, _>>()?,
        readers: root
            .require("Readers")?
            .children_named("Reader")
            .map(reader_from_element)
            .collect::<Result<_, _>>()?,
        books: root
            .require("Books")?
            .children_named("Book")
            .map(book_from_element)
            .collect::<Result<_, _>>()?,
        rooms: root
            .require("Rooms")?
            .children_named("Room")
            .map(room_from_element)
            .collect::<Result<_, _>>()?,
        clubs: root
            .require("Clubs")?
            .children_named("Club")
            .map(club_from_element)
            .collect(),
    })
}

fn librarian_from_element(element: &Element) -> Result<LibrarianRecord, CodecError> {
    Ok(LibrarianRecord {
        first_name: element.text_of("FirstName")?,
        last_name: element.text_of("LastName")?,
        phone: element.text_of("Phone")?,
    })
}

fn reader_from_element(element: &Element) -> Result<ReaderRecord, CodecError> {
    let reader_type = element
        .attribute("type")
        .or_else(|| element.attribute("ReaderType"))
        .unwrap_or("regular")
        .to_owned();
    let course = if reader_type == "student" {
        Some(element.parsed::<u8>("Course")?)
    } else {
        None
    };
    let ticket = element.require("Ticket")?;
    let review = element.child("Review").and_then(|review| {
        match review_from_element(review) {
            Ok(record) => record,
            Err(error) => {
                log::warn!("Skipping malformed review: {error}");
                None
            }
        }
    });

    Ok(ReaderRecord {
        first_name: element.text_of("FirstName")?,
        last_name: element.text_of("LastName")?,
        phone: element.text_of("Phone")?,
        email: element.text_of("Email")?,
        reader_type,
        education_place: element.optional_text("EducationPlace").unwrap_or_default(),
        in_club: element.child("InClub").is_some() && element.flag("InClub")?,
        borrowed_books_isbn: element
            .child("BorrowedBooks")
            .map(|borrowed| {
                borrowed
                    .children_named("ISBN")
                    .map(|isbn| isbn.text.trim().to_owned())
                    .collect()
            })
            .unwrap_or_default(),
        ticket: TicketRecord {
            ticket_id: ticket.text_of("TicketId")?,
            issue_date: ticket.text_of("IssueDate")?,
            expiry_date: ticket.text_of("ExpiryDate")?,
        },
        school_name: element.optional_text("SchoolName"),
        grade: element.optional_text("Grade"),
        university: element.optional_text("University"),
        course,
        review,
    })
}

/// A review element without text is treated as no review at all.
fn review_from_element(element: &Element) -> Result<Option<ReviewRecord>, CodecError> {
    let Some(text) = element.optional_text("Text") else {
        return Ok(None);
    };
    Ok(Some(ReviewRecord {
        text,
        rating: element.parsed("Rating")?,
        date: element.text_of("Date")?,
    }))
}

fn book_from_element(element: &Element) -> Result<BookRecord, CodecError> {
    let author = element.require("Author")?;
    let location = element.require("Location")?;

    Ok(BookRecord {
        title: element.text_of("Title")?,
        author: AuthorRecord {
            first_name: author.text_of("FirstName")?,
            last_name: author.text_of("LastName")?,
            bio: author.optional_text("Bio").unwrap_or_default(),
        },
        isbn: element.text_of("ISBN")?,
        location: LocationRecord {
            rack: location.text_of("Rack")?,
            shelf: location.text_of("Shelf")?,
        },
        is_available: element.flag("IsAvailable")?,
        current_borrower: element
            .optional_text("CurrentBorrower")
            .map(PersonRef::FullName),
    })
}

fn room_from_element(element: &Element) -> Result<RoomRecord, CodecError> {
    let capacity = match element.child("Capacity") {
        Some(_) => Some(element.parsed("Capacity")?),
        None => None,
    };
    let bookings = element
        .child("Bookings")
        .map(|bookings| {
            bookings
                .children_named("Booking")
                .filter_map(|booking| match booking_from_element(booking) {
                    Ok(record) => Some(record),
                    Err(error) => {
                        log::warn!("Skipping malformed booking: {error}");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(RoomRecord {
        name: element.text_of("Name")?,
        capacity,
        bookings,
    })
}

fn booking_from_element(element: &Element) -> Result<BookingRecord, CodecError> {
    let datetime = element
        .optional_text("DateTime")
        .or_else(|| element.optional_text("Datetime"))
        .ok_or_else(|| CodecError::Missing("Booking/DateTime".to_owned()))?;
    Ok(BookingRecord {
        seat_number: element.parsed("SeatNumber")?,
        datetime,
        reader: element.optional_text("Reader").map(PersonRef::FullName),
    })
}

fn club_from_element(element: &Element) -> ClubRecord {
    let texts = |section: &str, item: &'static str| -> Vec<String> {
        element
            .child(section)
            .map(|list| {
                list.children_named(item)
                    .map(|entry| entry.text.trim().to_owned())
                    .collect()
            })
            .unwrap_or_default()
    };

    ClubRecord {
        members: texts("Members", "Member")
            .into_iter()
            .map(PersonRef::FullName)
            .collect(),
        meetings: texts("Meetings", "Meeting"),
        current_book_isbn: element
            .optional_text("CurrentBookISBN")
            .or_else(|| element.optional_text("CurrentBookIsbn")),
    }
}

// Writing

fn person_text(person: Option<&PersonRef>) -> Option<String> {
    person.map(PersonRef::full_name)
}

fn document_element(document: &LibraryDocument) -> Element {
    Element::new(ROOT)
        .with_child(
            Element::new("Librarians")
                .with_children(document.librarians.iter().map(librarian_element)),
        )
        .with_child(Element::new("Books").with_children(document.books.iter().map(book_element)))
        .with_child(
            Element::new("Readers").with_children(document.readers.iter().map(reader_element)),
        )
        .with_child(Element::new("Rooms").with_children(document.rooms.iter().map(room_element)))
        .with_child(Element::new("Clubs").with_children(document.clubs.iter().map(club_element)))
}

fn librarian_element(record: &LibrarianRecord) -> Element {
    Element::new("Librarian")
        .with_child(Element::leaf("FirstName", &record.first_name))
        .with_child(Element::leaf("LastName", &record.last_name))
        .with_child(Element::leaf("Phone", &record.phone))
}

fn book_element(record: &BookRecord) -> Element {
    let book = Element::new("Book")
        .with_child(Element::leaf("Title", &record.title))
        .with_child(
            Element::new("Author")
                .with_child(Element::leaf("FirstName", &record.author.first_name))
                .with_child(Element::leaf("LastName", &record.author.last_name))
                .with_child(Element::leaf("Bio", &record.author.bio)),
        )
        .with_child(Element::leaf("ISBN", &record.isbn))
        .with_child(
            Element::new("Location")
                .with_child(Element::leaf("Rack", &record.location.rack))
                .with_child(Element::leaf("Shelf", &record.location.shelf)),
        )
        .with_child(Element::leaf("IsAvailable", flag_text(record.is_available)));
    match person_text(record.current_borrower.as_ref()) {
        Some(borrower) => book.with_child(Element::leaf("CurrentBorrower", borrower)),
        None => book,
    }
}

fn reader_element(record: &ReaderRecord) -> Element {
    let mut reader = Element::new("Reader")
        .with_attribute("type", &record.reader_type)
        .with_child(Element::leaf("FirstName", &record.first_name))
        .with_child(Element::leaf("LastName", &record.last_name))
        .with_child(Element::leaf("Phone", &record.phone))
        .with_child(Element::leaf("Email", &record.email))
        .with_child(Element::leaf("EducationPlace", &record.education_place))
        .with_child(Element::leaf("InClub", flag_text(record.in_club)));

    if let (Some(school_name), Some(grade)) = (&record.school_name, &record.grade) {
        reader = reader
            .with_child(Element::leaf("SchoolName", school_name))
            .with_child(Element::leaf("Grade", grade));
    }
    if let (Some(university), Some(course)) = (&record.university, record.course) {
        reader = reader
            .with_child(Element::leaf("University", university))
            .with_child(Element::leaf("Course", course.to_string()));
    }

    reader = reader.with_child(
        Element::new("Ticket")
            .with_child(Element::leaf("TicketId", &record.ticket.ticket_id))
            .with_child(Element::leaf("IssueDate", &record.ticket.issue_date))
            .with_child(Element::leaf("ExpiryDate", &record.ticket.expiry_date)),
    );
    if let Some(review) = &record.review {
        reader = reader.with_child(
            Element::new("Review")
                .with_child(Element::leaf("Text", &review.text))
                .with_child(Element::leaf("Rating", review.rating.to_string()))
                .with_child(Element::leaf("Date", &review.date)),
        );
    }
    reader.with_child(
        Element::new("BorrowedBooks").with_children(
            record
                .borrowed_books_isbn
                .iter()
                .map(|isbn| Element::leaf("ISBN", isbn)),
        ),
    )
}

fn room_element(record: &RoomRecord) -> Element {
    let room = Element::new("Room").with_child(Element::leaf("Name", &record.name));
    let room = match record.capacity {
        Some(capacity) => room.with_child(Element::leaf("Capacity", capacity.to_string())),
        None => room,
    };
    room.with_child(
        Element::new("Bookings").with_children(record.bookings.iter().filter_map(|booking| {
            person_text(booking.reader.as_ref()).map(|reader| {
                Element::new("Booking")
                    .with_child(Element::leaf(
                        "SeatNumber",
                        booking.seat_number.to_string(),
                    ))
                    .with_child(Element::leaf("DateTime", &booking.datetime))
                    .with_child(Element::leaf("Reader", reader))
            })
        })),
    )
}

fn club_element(record: &ClubRecord) -> Element {
    let club = Element::new("Club")
        .with_child(
            Element::new("Members").with_children(
                record
                    .members
                    .iter()
                    .map(|member| Element::leaf("Member", member.full_name())),
            ),
        )
        .with_child(
            Element::new("Meetings").with_children(
                record
                    .meetings
                    .iter()
                    .map(|meeting| Element::leaf("Meeting", meeting)),
            ),
        );
    match &record.current_book_isbn {
        Some(isbn) => club.with_child(Element::leaf("CurrentBookISBN", isbn)),
        None => club,
    }
}

fn write_document(root: &Element) -> Result<String, CodecError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), CodecError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() && element.text.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(xml_error);
    }
    writer.write_event(Event::Start(start)).map_err(xml_error)?;
    if !element.text.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&element.text)))
            .map_err(xml_error)?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(xml_error)
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

    #[test]
    fn round_trip_keeps_fields_and_references() {
        let library = sample_library();
        let encoded = Xml.encode(&library).unwrap();
        let decoded = Xml.decode(&encoded).unwrap();

        assert_eq!(snapshot(&decoded).unwrap(), snapshot(&library).unwrap());
        assert_eq!(decoded.summary(), library.summary());

        let ana = decoded.find_reader_by_name("Ana", "Petrova").unwrap();
        let ivan = decoded.find_reader_by_name("Ivan", "Ivanov").unwrap();
        let war_and_peace = decoded.find_book_by_isbn("200").unwrap();
        assert_eq!(war_and_peace.title, "War & Peace");
        assert_eq!(war_and_peace.current_borrower(), Some(ivan.id));
        assert_eq!(ana.review().unwrap().text, "Great <cosy> library");
        assert_eq!(
            decoded
                .find_room_by_name("Main hall")
                .unwrap()
                .occupant(3, at(14, 11)),
            Some(ivan.id)
        );
        assert_eq!(decoded.clubs().first().unwrap().meetings(), &[at(20, 18), at(27, 18)]);
    }

    #[test]
    fn writes_expected_layout() {
        let encoded = Xml.encode(&sample_library()).unwrap();

        assert!(encoded.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(encoded.contains("<Reader type=\"student\">"));
        assert!(encoded.contains("<Title>War &amp; Peace</Title>"));
        assert!(encoded.contains("<Text>Great &lt;cosy&gt; library</Text>"));
        assert!(encoded.contains("<IsAvailable>False</IsAvailable>"));
        assert!(encoded.contains("<CurrentBorrower>Ana Petrova</CurrentBorrower>"));
        assert!(encoded.contains("<DateTime>2025-03-14T10:00:00</DateTime>"));
        assert!(encoded.contains("<CurrentBookISBN>200</CurrentBookISBN>"));
        assert!(encoded.contains("<Capacity>2</Capacity>"));

        let books = encoded.find("<Books>").unwrap();
        let readers = encoded.find("<Readers>").unwrap();
        assert!(books < readers);
    }

    const LEGACY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Library>
  <Librarians>
    <Librarian>
      <FirstName>Olga</FirstName>
      <LastName>Smirnova</LastName>
      <Phone>+78888888888</Phone>
    </Librarian>
  </Librarians>
  <Readers>
    <Reader ReaderType="school">
      <FirstName>Petya</FirstName>
      <LastName>Sidorov</LastName>
      <Phone>+70001112233</Phone>
      <Email>petya@school.ru</Email>
      <InClub>true</InClub>
      <SchoolName>School 57</SchoolName>
      <Grade>7B</Grade>
      <Ticket>
        <TicketId>AB12CD34</TicketId>
        <IssueDate>2025-01-01</IssueDate>
        <ExpiryDate>2025-01-15</ExpiryDate>
      </Ticket>
      <Review>
        <Text>Quiet</Text>
        <Rating>ten</Rating>
        <Date>2025-03-01T12:00:00</Date>
      </Review>
      <BorrowedBooks>
        <ISBN>111</ISBN>
      </BorrowedBooks>
    </Reader>
  </Readers>
  <Books>
    <Book>
      <Title>Dune</Title>
      <Author>
        <FirstName>Frank</FirstName>
        <LastName>Herbert</LastName>
      </Author>
      <ISBN>111</ISBN>
      <Location>
        <Rack>A</Rack>
        <Shelf>1</Shelf>
      </Location>
      <IsAvailable>FALSE</IsAvailable>
      <CurrentBorrower>Petya Sidorov</CurrentBorrower>
    </Book>
    <Book>
      <Title>Solaris</Title>
      <Author>
        <FirstName>Stanislaw</FirstName>
        <LastName>Lem</LastName>
      </Author>
      <ISBN>300</ISBN>
      <Location>
        <Rack>C</Rack>
        <Shelf>3</Shelf>
      </Location>
      <IsAvailable>False</IsAvailable>
      <CurrentBorrower>Nobody Known</CurrentBorrower>
    </Book>
  </Books>
  <Rooms>
    <Room>
      <Name>Main hall</Name>
      <Bookings>
        <Booking>
          <SeatNumber>4</SeatNumber>
          <Datetime>2025-03-14 10:00:00</Datetime>
          <Reader>Petya Sidorov</Reader>
        </Booking>
        <Booking>
          <SeatNumber>many</SeatNumber>
          <DateTime>2025-03-14T10:00:00</DateTime>
          <Reader>Petya Sidorov</Reader>
        </Booking>
      </Bookings>
    </Room>
  </Rooms>
  <Clubs>
    <Club>
      <Members>
        <Member>Petya Sidorov</Member>
      </Members>
      <Meetings>
        <Meeting>2025-03-20T18:00:00</Meeting>
      </Meetings>
      <CurrentBookIsbn>111</CurrentBookIsbn>
    </Club>
  </Clubs>
</Library>"#;

    #[test]
    fn legacy_element_names_are_understood() {
        let library = Xml.decode(LEGACY).unwrap();
        let petya = library.find_reader_by_name("Petya", "Sidorov").unwrap();
        assert_eq!(petya.reader_type(), "school");
        assert_eq!(petya.education_place, "School 57");
        assert_eq!(petya.review(), None);
        assert!(petya.in_club());

        let dune = library.find_book_by_isbn("111").unwrap();
        assert_eq!(dune.current_borrower(), Some(petya.id));
        assert_eq!(petya.borrowed_books(), &[dune.id]);

        let solaris = library.find_book_by_isbn("300").unwrap();
        assert!(!solaris.is_available());
        assert_eq!(solaris.current_borrower(), None);

        let room = library.find_room_by_name("Main hall").unwrap();
        assert_eq!(room.bookings().count(), 1);
        assert_eq!(room.occupant(4, at(14, 10)), Some(petya.id));

        let club = library.clubs().first().unwrap();
        assert_eq!(club.current_book(), Some(dune.id));
    }

    #[test]
    fn rejects_foreign_or_broken_documents() {
        assert!(matches!(
            Xml.decode("<Catalogue></Catalogue>"),
            Err(CodecError::Malformed { .. })
        ));
        assert!(matches!(
            Xml.decode("<Library><Librarians></Library>"),
            Err(CodecError::Xml(_))
        ));
        assert!(matches!(
            Xml.decode("<Library><Librarians/></Library>"),
            Err(CodecError::Missing(_))
        ));
    }
}
