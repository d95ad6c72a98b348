//! View list reconciliation
//!
//! A page's local list changes only from a successful server response:
//! a fetch replaces it, a create appends the returned entity, an update
//! replaces the entry with the same id, a delete removes it.

use crate::api::Entity;

pub fn append<E: Entity>(items: &mut Vec<E>, created: E) {
    items.push(created);
}

/// Replace the entry with `updated`'s id. Returns false when no entry matched.
pub fn replace<E: Entity>(items: &mut [E], updated: E) -> bool {
    match items.iter_mut().find(|item| item.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

pub fn remove<E: Entity>(items: &mut Vec<E>, id: &str) {
    items.retain(|item| item.id() != id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Review;

    fn review(id: &str, rating: u8) -> Review {
        Review {
            id: id.into(),
            name: "Jo".into(),
            game: "Skyfall".into(),
            comment: "Fun".into(),
            rating,
            date: "01/02/2024".into(),
            avatar: None,
        }
    }

    #[test]
    fn test_replace_touches_only_matching_entry() {
        let mut items = vec![review("r1", 5), review("r2", 3)];
        assert!(replace(&mut items, review("r1", 4)));
        assert_eq!(items[0].rating, 4);
        assert_eq!(items[1], review("r2", 3));
    }

    #[test]
    fn test_replace_missing_id_does_not_append() {
        let mut items = vec![review("r1", 5)];
        assert!(!replace(&mut items, review("r9", 1)));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_append_then_remove() {
        let mut items = vec![review("r1", 5)];
        append(&mut items, review("r2", 2));
        assert_eq!(items.len(), 2);
        remove(&mut items, "r1");
        assert_eq!(items, vec![review("r2", 2)]);
    }
}
