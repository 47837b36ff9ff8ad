//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Collections in the dashboard (order timelines, cart lines) address their
/// members through this id rather than by position alone.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Position of the first entity with the given id, if any.
pub fn position_of<E: Entity>(entities: &[E], id: E::Id) -> Option<usize> {
    entities.iter().position(|e| e.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(u8);

    impl Entity for Row {
        type Id = u8;

        fn id(&self) -> u8 {
            self.0
        }
    }

    #[test]
    fn position_of_finds_first_match_or_none() {
        let rows = [Row(3), Row(7), Row(9)];
        assert_eq!(position_of(&rows, 7), Some(1));
        assert_eq!(position_of(&rows, 4), None);
        assert_eq!(position_of::<Row>(&[], 4), None);
    }
}
