use crate::errors::Refused;
use crate::model::ids::{ReaderId, RoomId};
use crate::model::reader::Reader;
use crate::model::validation::{ValidationError, required};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Seats of a room when none is given
pub const DEFAULT_ROOM_CAPACITY: u32 = 20;

/// A reading room with numbered seats `1..=capacity`. A booking is keyed by seat and exact
/// timestamp; at most one reader holds each key.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    capacity: u32,
    seats: BTreeMap<u32, BTreeMap<NaiveDateTime, ReaderId>>,
}

impl Room {
    /// # Errors
    /// Fails if the name is empty after trimming or the room has no seats
    #[inline]
    pub fn new(name: &str, capacity: u32) -> Result<Self, ValidationError> {
        if capacity == 0 {
            return Err(ValidationError::new("capacity", "a room needs at least one seat"));
        }
        Ok(Self {
            id: RoomId::generate(),
            name: required("name", name)?,
            capacity,
            seats: BTreeMap::new(),
        })
    }

    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Books `seat` at `at` for `reader`.
    /// # Errors
    /// Refuses if the seat does not exist or is already booked at exactly that time
    #[inline]
    pub fn reserve_seat(
        &mut self,
        seat: u32,
        at: NaiveDateTime,
        reader: &Reader,
    ) -> Result<(), Refused> {
        self.check_seat(seat)?;
        let bookings = self.seats.entry(seat).or_default();
        if bookings.contains_key(&at) {
            return Err(Refused::SeatTaken { seat, at });
        }
        bookings.insert(at, reader.id);
        Ok(())
    }

    /// # Errors
    /// Refuses if nothing is booked at that seat and time
    #[inline]
    pub fn cancel_reservation(
        &mut self,
        seat: u32,
        at: NaiveDateTime,
    ) -> Result<ReaderId, Refused> {
        let removed = self
            .seats
            .get_mut(&seat)
            .and_then(|bookings| bookings.remove(&at))
            .ok_or(Refused::NoBooking { seat, at })?;
        self.seats.retain(|_, bookings| !bookings.is_empty());
        Ok(removed)
    }

    #[must_use]
    #[inline]
    pub fn occupant(&self, seat: u32, at: NaiveDateTime) -> Option<ReaderId> {
        self.seats.get(&seat)?.get(&at).copied()
    }

    /// Every booking as `(seat, time, reader)`, ordered by seat then time
    #[inline]
    pub fn bookings(&self) -> impl Iterator<Item = (u32, NaiveDateTime, ReaderId)> + '_ {
        self.seats.iter().flat_map(|(seat, bookings)| {
            bookings
                .iter()
                .map(move |(at, reader)| (*seat, *at, *reader))
        })
    }

    /// Whether any booking lies at or after `now`
    #[must_use]
    #[inline]
    pub fn has_bookings_from(&self, now: NaiveDateTime) -> bool {
        self.bookings().any(|(_, at, _)| at >= now)
    }

    #[must_use]
    #[inline]
    pub fn has_reader_bookings_from(&self, reader: ReaderId, now: NaiveDateTime) -> bool {
        self.bookings()
            .any(|(_, at, booked)| booked == reader && at >= now)
    }

    /// # Errors
    /// Fails on zero seats or if a booked seat would fall outside the room
    #[inline]
    pub fn set_capacity(&mut self, capacity: u32) -> Result<(), ValidationError> {
        if capacity == 0 {
            return Err(ValidationError::new("capacity", "a room needs at least one seat"));
        }
        if let Some(highest) = self.seats.keys().next_back().filter(|seat| **seat > capacity) {
            return Err(ValidationError::new(
                "capacity",
                format!("seat {highest} is booked"),
            ));
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Drops every booking held by `reader`.
    pub(crate) fn forget_reader(&mut self, reader: ReaderId) {
        for bookings in self.seats.values_mut() {
            bookings.retain(|_, booked| *booked != reader);
        }
        self.seats.retain(|_, bookings| !bookings.is_empty());
    }

    /// Inserts a stored booking without the availability check; the first booking wins when a
    /// document repeats a seat and time.
    pub(crate) fn restore_booking(
        &mut self,
        seat: u32,
        at: NaiveDateTime,
        reader: ReaderId,
    ) -> bool {
        if self.check_seat(seat).is_err() {
            return false;
        }
        let bookings = self.seats.entry(seat).or_default();
        if bookings.contains_key(&at) {
            return false;
        }
        bookings.insert(at, reader);
        true
    }

    fn check_seat(&self, seat: u32) -> Result<(), Refused> {
        if seat == 0 || seat > self.capacity {
            return Err(Refused::NoSuchSeat {
                seat,
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "Tests are predefined and guaranteed to be Some/Ok"
)]
mod tests {
    use super::*;
    use crate::model::reader::ReaderKind;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

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

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn second_booking_of_same_seat_and_time_fails() {
        let mut room = Room::new("Main hall", 4).unwrap();
        let ana = reader("Ana");
        let maria = reader("Maria");

        room.reserve_seat(2, at(10), &ana).unwrap();
        assert_eq!(
            room.reserve_seat(2, at(10), &maria).unwrap_err(),
            Refused::SeatTaken { seat: 2, at: at(10) }
        );
        assert_eq!(room.occupant(2, at(10)), Some(ana.id));

        room.reserve_seat(2, at(11), &maria).unwrap();
        room.reserve_seat(3, at(10), &maria).unwrap();
        assert_eq!(room.bookings().count(), 3);
    }

    #[test]
    fn seats_outside_capacity_do_not_exist() {
        let mut room = Room::new("Small room", 2).unwrap();
        let ana = reader("Ana");
        assert!(matches!(
            room.reserve_seat(0, at(9), &ana),
            Err(Refused::NoSuchSeat { .. })
        ));
        assert!(matches!(
            room.reserve_seat(3, at(9), &ana),
            Err(Refused::NoSuchSeat { .. })
        ));
        assert_eq!(Room::new("Closet", 0).unwrap_err().field, "capacity");
    }

    #[test]
    fn upcoming_bookings() {
        let mut room = Room::new("Main hall", 4).unwrap();
        let ana = reader("Ana");
        room.reserve_seat(1, at(10), &ana).unwrap();

        assert!(room.has_bookings_from(at(10)));
        assert!(!room.has_bookings_from(at(11)));
        assert!(room.has_reader_bookings_from(ana.id, at(9)));

        assert_eq!(room.cancel_reservation(1, at(10)).unwrap(), ana.id);
        assert!(room.cancel_reservation(1, at(10)).is_err());
        assert_eq!(room.bookings().count(), 0);
    }

    #[test]
    fn capacity_cannot_drop_below_booked_seat() {
        let mut room = Room::new("Main hall", 10).unwrap();
        room.reserve_seat(8, at(10), &reader("Ana")).unwrap();
        assert!(room.set_capacity(5).is_err());
        room.set_capacity(8).unwrap();
        assert_eq!(room.capacity(), 8);
    }
}
