use crate::errors::Refused;
use crate::model::book::Book;
use crate::model::ids::{BookId, ClubId, ReaderId};
use crate::model::reader::Reader;
use chrono::NaiveDateTime;

/// The reading club. Membership and each member's `in_club` flag change together.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub id: ClubId,
    members: Vec<ReaderId>,
    meetings: Vec<NaiveDateTime>,
    current_book: Option<BookId>,
}

impl Default for Club {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Club {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            id: ClubId::generate(),
            members: Vec::new(),
            meetings: Vec::new(),
            current_book: None,
        }
    }

    #[must_use]
    #[inline]
    pub fn members(&self) -> &[ReaderId] {
        &self.members
    }

    #[must_use]
    #[inline]
    pub fn is_member(&self, reader: ReaderId) -> bool {
        self.members.contains(&reader)
    }

    #[must_use]
    #[inline]
    pub fn meetings(&self) -> &[NaiveDateTime] {
        &self.meetings
    }

    #[must_use]
    #[inline]
    pub const fn current_book(&self) -> Option<BookId> {
        self.current_book
    }

    /// # Errors
    /// Refuses if the reader already belongs to a club
    #[inline]
    pub fn join(&mut self, reader: &mut Reader) -> Result<(), Refused> {
        if reader.in_club() || self.is_member(reader.id) {
            return Err(Refused::AlreadyMember(reader.full_name()));
        }
        self.members.push(reader.id);
        reader.set_in_club(true);
        Ok(())
    }

    /// # Errors
    /// Refuses if the reader is not a member of this club
    #[inline]
    pub fn leave(&mut self, reader: &mut Reader) -> Result<(), Refused> {
        let Some(position) = self.members.iter().position(|id| *id == reader.id) else {
            return Err(Refused::NotMember(reader.full_name()));
        };
        self.members.remove(position);
        reader.set_in_club(false);
        Ok(())
    }

    /// Adds a meeting; meetings keep the order in which they were scheduled.
    #[inline]
    pub fn schedule_meeting(&mut self, at: NaiveDateTime) {
        self.meetings.push(at);
    }

    #[inline]
    pub fn set_current_book(&mut self, book: Option<&Book>) {
        self.current_book = book.map(|book| book.id);
    }

    pub(crate) fn restore_current_book(&mut self, book: BookId) {
        self.current_book = Some(book);
    }

    /// Adds a member while loading; returns `false` for a repeated member.
    pub(crate) fn restore_member(&mut self, reader: ReaderId) -> bool {
        if self.is_member(reader) {
            return false;
        }
        self.members.push(reader);
        true
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
    use crate::model::reader::ReaderKind;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn reader() -> Reader {
        Reader::new(
            "Ana",
            "Petrova",
            "+79161234567",
            "ana@example.org",
            ReaderKind::Regular,
        )
        .unwrap()
    }

    #[test]
    fn membership_keeps_flag_in_sync() {
        let mut club = Club::new();
        let mut other = Club::new();
        let mut ana = reader();

        club.join(&mut ana).unwrap();
        assert!(ana.in_club());
        assert_eq!(club.members(), &[ana.id]);
        assert!(matches!(club.join(&mut ana), Err(Refused::AlreadyMember(_))));
        assert!(matches!(other.join(&mut ana), Err(Refused::AlreadyMember(_))));

        club.leave(&mut ana).unwrap();
        assert!(!ana.in_club());
        assert!(club.members().is_empty());
        assert!(matches!(club.leave(&mut ana), Err(Refused::NotMember(_))));
    }

    #[test]
    fn meetings_and_current_book() {
        let mut club = Club::default();
        let first = NaiveDate::from_ymd_opt(2025, 5, 2)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let second = NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        club.schedule_meeting(first);
        club.schedule_meeting(second);
        assert_eq!(club.meetings(), &[first, second]);

        let author = Author::new("Mikhail", "Bulgakov", "").unwrap();
        let book = Book::new(
            "The Master and Margarita",
            author.id,
            "978-0141180144",
            Location::new("C", "4").unwrap(),
        )
        .unwrap();
        club.set_current_book(Some(&book));
        assert_eq!(club.current_book(), Some(book.id));
        club.set_current_book(None);
        assert_eq!(club.current_book(), None);
    }
}
