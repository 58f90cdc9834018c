use crate::errors::Refused;
use crate::model::book::Book;
use crate::model::ids::{BookId, ReaderId};
use crate::model::validation::{ValidationError, email, in_range, phone, required};
use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use core::fmt;
use uuid::Uuid;

/// Days between a ticket's issue date and its expiry date
pub const TICKET_VALIDITY_DAYS: u64 = 14;
/// Length of a generated ticket id
pub const TICKET_ID_LENGTH: usize = 8;

/// The three kinds of reader. Variant-specific data lives in the variant; everything else is
/// shared in [`Reader`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderKind {
    Regular,
    School { school_name: String, grade: String },
    Student { university: String, course: u8 },
}

impl ReaderKind {
    /// # Errors
    /// Fails if school name or grade is empty after trimming
    #[inline]
    pub fn school(school_name: &str, grade: &str) -> Result<Self, ValidationError> {
        Ok(Self::School {
            school_name: required("school_name", school_name)?,
            grade: required("grade", grade)?,
        })
    }

    /// # Errors
    /// Fails if the university is empty or the course lies outside `1..=6`
    #[inline]
    pub fn student(university: &str, course: u8) -> Result<Self, ValidationError> {
        Ok(Self::Student {
            university: required("university", university)?,
            course: in_range("course", course, 1, 6)?,
        })
    }

    /// The discriminator written to documents: `regular`, `school` or `student`
    #[must_use]
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        match *self {
            Self::Regular => "regular",
            Self::School { .. } => "school",
            Self::Student { .. } => "student",
        }
    }

    /// Where a reader of this kind studies, empty for regular readers
    #[must_use]
    #[inline]
    pub fn education_place(&self) -> &str {
        match self {
            Self::Regular => "",
            Self::School { school_name, .. } => school_name,
            Self::Student { university, .. } => university,
        }
    }
}

/// A library card. Issued together with its reader and valid for two weeks.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub ticket_id: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

impl Ticket {
    pub(crate) fn issue(on: NaiveDate) -> Self {
        Self {
            ticket_id: generate_ticket_id(),
            issue_date: on,
            expiry_date: on
                .checked_add_days(Days::new(TICKET_VALIDITY_DAYS))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Rebuilds a ticket with its stored dates instead of issuing a new one.
    pub(crate) fn restore(
        ticket_id: &str,
        issue_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            ticket_id: required("ticket_id", ticket_id)?,
            issue_date,
            expiry_date,
        })
    }

    pub(crate) fn reissue_id(&mut self) {
        self.ticket_id = generate_ticket_id();
    }

    #[must_use]
    #[inline]
    pub fn is_expired(&self, on: NaiveDate) -> bool {
        on > self.expiry_date
    }
}

fn generate_ticket_id() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(TICKET_ID_LENGTH)
        .collect::<String>()
        .to_uppercase()
}

/// A reader's opinion of the library, at most one per reader.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub text: String,
    pub rating: u8,
    pub date: NaiveDateTime,
}

impl Review {
    /// # Errors
    /// Fails if the text is empty or the rating lies outside `1..=5`
    #[inline]
    pub fn new(text: &str, rating: u8, date: NaiveDateTime) -> Result<Self, ValidationError> {
        Ok(Self {
            text: required("text", text)?,
            rating: in_range("rating", rating, 1, 5)?,
            date,
        })
    }
}

/// A registered reader. The natural key `(first_name, last_name)` is not unique; lookups
/// resolve to the first match.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reader {
    pub id: ReaderId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub kind: ReaderKind,
    pub education_place: String,
    borrowed_books: Vec<BookId>,
    ticket: Ticket,
    review: Option<Review>,
    in_club: bool,
}

impl Reader {
    /// Creates a reader and issues a ticket dated today.
    /// # Errors
    /// Fails on an empty name, a phone outside `+7XXXXXXXXXX` or an email without `@`
    #[inline]
    pub fn new(
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        email_address: &str,
        kind: ReaderKind,
    ) -> Result<Self, ValidationError> {
        Self::with_ticket(
            first_name,
            last_name,
            phone_number,
            email_address,
            kind,
            Ticket::issue(Local::now().date_naive()),
        )
    }

    pub(crate) fn with_ticket(
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        email_address: &str,
        kind: ReaderKind,
        ticket: Ticket,
    ) -> Result<Self, ValidationError> {
        let education_place = kind.education_place().to_owned();
        Ok(Self {
            id: ReaderId::generate(),
            first_name: required("first_name", first_name)?,
            last_name: required("last_name", last_name)?,
            phone: phone(phone_number)?,
            email: email(email_address)?,
            kind,
            education_place,
            borrowed_books: Vec::new(),
            ticket,
            review: None,
            in_club: false,
        })
    }

    /// `"First Last"`, the form used to reference readers inside documents
    #[must_use]
    #[inline]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[must_use]
    #[inline]
    pub fn has_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name == first_name && self.last_name == last_name
    }

    #[must_use]
    #[inline]
    pub const fn reader_type(&self) -> &'static str {
        self.kind.type_name()
    }

    #[must_use]
    #[inline]
    pub fn borrowed_books(&self) -> &[BookId] {
        &self.borrowed_books
    }

    #[must_use]
    #[inline]
    pub const fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    #[must_use]
    #[inline]
    pub const fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    #[must_use]
    #[inline]
    pub const fn in_club(&self) -> bool {
        self.in_club
    }

    /// Borrows `book` if it is available.
    /// # Errors
    /// Refuses without touching either side if the book is on loan
    #[inline]
    pub fn take_book(&mut self, book: &mut Book) -> Result<(), Refused> {
        if !book.is_available() {
            return Err(Refused::BookUnavailable(book.isbn.clone()));
        }
        book.lend_to(self.id);
        self.borrowed_books.push(book.id);
        Ok(())
    }

    /// Gives `book` back to the library.
    /// # Errors
    /// Refuses if this reader did not borrow the book
    #[inline]
    pub fn return_book(&mut self, book: &mut Book) -> Result<(), Refused> {
        let Some(position) = self.borrowed_books.iter().position(|id| *id == book.id) else {
            return Err(Refused::NotBorrowedByReader {
                isbn: book.isbn.clone(),
                reader: self.full_name(),
            });
        };
        self.borrowed_books.remove(position);
        book.release();
        Ok(())
    }

    /// Writes a review dated now, replacing any previous one in place.
    /// # Errors
    /// Fails on an empty text or a rating outside `1..=5`; the old review is kept then
    #[inline]
    pub fn set_review(&mut self, text: &str, rating: u8) -> Result<(), ValidationError> {
        self.set_review_at(text, rating, Local::now().naive_local())
    }

    /// Like [`Reader::set_review`] with an explicit date.
    /// # Errors
    /// Fails on an empty text or a rating outside `1..=5`
    #[inline]
    pub fn set_review_at(
        &mut self,
        text: &str,
        rating: u8,
        date: NaiveDateTime,
    ) -> Result<(), ValidationError> {
        let fresh = Review::new(text, rating, date)?;
        match self.review.as_mut() {
            Some(review) => {
                review.text = fresh.text;
                review.rating = fresh.rating;
                review.date = fresh.date;
            }
            None => self.review = Some(fresh),
        }
        Ok(())
    }

    /// # Errors
    /// Fails if `place` is empty after trimming
    #[inline]
    pub fn update_education_place(&mut self, place: &str) -> Result<(), ValidationError> {
        self.education_place = required("education_place", place)?;
        Ok(())
    }

    /// Overwrites the contact and variant data with those of `other`, keeping identity,
    /// ticket, loans, review and club membership.
    pub(crate) fn overwrite_details(&mut self, other: Self) {
        self.phone = other.phone;
        self.email = other.email;
        self.kind = other.kind;
        self.education_place = other.education_place;
    }

    pub(crate) fn set_in_club(&mut self, in_club: bool) {
        self.in_club = in_club;
    }

    pub(crate) fn ticket_mut(&mut self) -> &mut Ticket {
        &mut self.ticket
    }

    pub(crate) fn restore_review(&mut self, review: Review) {
        self.review = Some(review);
    }

    /// Records a loan re-linked from the book side while loading.
    pub(crate) fn attach_borrowed(&mut self, book: BookId) {
        if !self.borrowed_books.contains(&book) {
            self.borrowed_books.push(book);
        }
    }

    /// Reorders loans to follow `order`; loans missing from it keep their relative order at the
    /// end.
    pub(crate) fn order_borrowed(&mut self, order: &[BookId]) {
        self.borrowed_books.sort_by_key(|book| {
            order
                .iter()
                .position(|ordered| ordered == book)
                .unwrap_or(usize::MAX)
        });
    }
}

impl fmt::Display for Reader {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} {} ({})",
            self.first_name,
            self.last_name,
            self.reader_type()
        )
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
    use pretty_assertions::assert_eq;

    fn ana() -> Reader {
        Reader::new(
            "Ana",
            "Petrova",
            "+79161234567",
            "ana@example.org",
            ReaderKind::Regular,
        )
        .unwrap()
    }

    fn dune() -> Book {
        let author = Author::new("Frank", "Herbert", "").unwrap();
        Book::new("Dune", author.id, "978-0441013593", Location::new("A", "1").unwrap()).unwrap()
    }

    #[test]
    fn new_reader_gets_a_two_week_ticket() {
        let reader = ana();
        let ticket = reader.ticket();
        assert_eq!(ticket.ticket_id.len(), TICKET_ID_LENGTH);
        assert_eq!(ticket.ticket_id, ticket.ticket_id.to_uppercase());
        assert_eq!((ticket.expiry_date - ticket.issue_date).num_days(), 14);
        assert!(!ticket.is_expired(ticket.expiry_date));
        assert!(ticket.is_expired(ticket.expiry_date.succ_opt().unwrap()));
    }

    #[test]
    fn invalid_input_is_rejected_with_field_name() {
        let cases = [
            ("", "Petrova", "+79161234567", "ana@example.org", "first_name"),
            ("Ana", "Petrova", "+7916123456", "ana@example.org", "phone"),
            ("Ana", "Petrova", "+79161234567", "ana.example.org", "email"),
        ];
        for (first, last, phone_number, email_address, field) in cases {
            let error =
                Reader::new(first, last, phone_number, email_address, ReaderKind::Regular)
                    .unwrap_err();
            assert_eq!(error.field, field);
        }
        assert_eq!(ReaderKind::student("MSU", 7).unwrap_err().field, "course");
        assert_eq!(ReaderKind::student("MSU", 0).unwrap_err().field, "course");
        assert_eq!(ReaderKind::school("School 5", " ").unwrap_err().field, "grade");
    }

    #[test]
    fn variants_set_education_place() {
        let student = Reader::new(
            "Ivan",
            "Ivanov",
            "+71234567890",
            "ivan@test.com",
            ReaderKind::student("MSU", 3).unwrap(),
        )
        .unwrap();
        assert_eq!(student.reader_type(), "student");
        assert_eq!(student.education_place, "MSU");
        assert_eq!(ana().education_place, "");
    }

    #[test]
    fn take_then_return_restores_book() {
        let mut reader = ana();
        let mut book = dune();

        reader.take_book(&mut book).unwrap();
        assert!(!book.is_available());
        assert_eq!(book.current_borrower(), Some(reader.id));
        assert_eq!(reader.borrowed_books(), &[book.id]);

        reader.return_book(&mut book).unwrap();
        assert!(book.is_available());
        assert_eq!(book.current_borrower(), None);
        assert!(reader.borrowed_books().is_empty());
    }

    #[test]
    fn taking_unavailable_book_changes_nothing() {
        let mut first = ana();
        let mut second = ana();
        let mut book = dune();
        first.take_book(&mut book).unwrap();

        let refused = second.take_book(&mut book).unwrap_err();
        assert_eq!(refused, Refused::BookUnavailable(book.isbn.clone()));
        assert_eq!(book.current_borrower(), Some(first.id));
        assert!(second.borrowed_books().is_empty());
    }

    #[test]
    fn returning_foreign_book_is_refused() {
        let mut reader = ana();
        let mut book = dune();
        assert!(matches!(
            reader.return_book(&mut book),
            Err(Refused::NotBorrowedByReader { .. })
        ));
        assert!(book.is_available());
    }

    #[test]
    fn review_is_replaced_in_place() {
        let mut reader = ana();
        reader.set_review("Great book", 5).unwrap();
        reader.set_review("Still great", 4).unwrap();

        let review = reader.review().unwrap();
        assert_eq!(review.text, "Still great");
        assert_eq!(review.rating, 4);
    }

    #[test]
    fn invalid_review_keeps_previous_one() {
        let mut reader = ana();
        reader.set_review("Great book", 5).unwrap();
        assert_eq!(reader.set_review("Too good", 7).unwrap_err().field, "rating");
        assert_eq!(reader.set_review("  ", 3).unwrap_err().field, "text");
        assert_eq!(reader.review().unwrap().text, "Great book");
    }

    #[test]
    fn borrowed_books_follow_stored_order() {
        let mut reader = ana();
        let (first, second, third) = (BookId::generate(), BookId::generate(), BookId::generate());
        reader.attach_borrowed(first);
        reader.attach_borrowed(second);
        reader.attach_borrowed(third);
        reader.attach_borrowed(second);
        reader.order_borrowed(&[third, first]);
        assert_eq!(reader.borrowed_books(), &[third, first, second]);
    }
}
