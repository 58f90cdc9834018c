use core::fmt;
use uuid::Uuid;

/// Declares a surrogate id newtype. Ids are generated once, at entity construction, and never
/// change afterwards, so in-memory references survive renaming.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            #[must_use]
            #[inline]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies an [`Author`](super::Author) in the registry's author table
    AuthorId
);
entity_id!(
    /// Identifies a [`Book`](super::Book)
    BookId
);
entity_id!(
    /// Identifies a [`Reader`](super::Reader)
    ReaderId
);
entity_id!(
    /// Identifies a [`Librarian`](super::Librarian)
    LibrarianId
);
entity_id!(
    /// Identifies a [`Room`](super::Room)
    RoomId
);
entity_id!(
    /// Identifies a [`Club`](super::Club)
    ClubId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let first = BookId::generate();
        let second = BookId::generate();
        assert_ne!(first, second);
        assert_eq!(first.to_string().len(), 36);
    }
}
