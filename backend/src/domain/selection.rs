//! Randomized reviewer selection.
//!
//! Chooses `k` distinct candidates from an ordered pool without positional
//! bias: a working copy of the pool is permuted with an unbiased
//! Fisher–Yates shuffle, then truncated. Every permutation of the pool is
//! equally likely to seed the selection, so candidates early in the list
//! are not favoured.

use crate::domain::User;
use crate::domain::ports::RandomSource;

/// Select up to `target` distinct reviewer ids from `pool`.
///
/// Walks the working copy from the last index to the first, swapping
/// position `i` with a uniformly drawn `j <= i`, then keeps the first
/// `min(pool.len(), target)` entries. An empty pool or a zero target yields
/// an empty selection — success, not an error.
pub fn choose_reviewers(pool: &[User], target: usize, rng: &dyn RandomSource) -> Vec<String> {
    if pool.is_empty() || target == 0 {
        return Vec::new();
    }

    let mut ids: Vec<String> = pool.iter().map(|user| user.id.clone()).collect();
    for i in (1..ids.len()).rev() {
        let j = rng.pick_index(i + 1);
        ids.swap(i, j);
    }

    ids.truncate(target);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::SequenceRandomSource;
    use chrono::Utc;
    use rstest::rstest;
    use std::collections::HashSet;

    fn member(id: &str) -> User {
        User {
            id: id.to_owned(),
            username: format!("user-{id}"),
            team_name: "backend".to_owned(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pool(ids: &[&str]) -> Vec<User> {
        ids.iter().map(|id| member(id)).collect()
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(5, 2)]
    fn selects_min_of_pool_size_and_target(#[case] pool_size: usize, #[case] expected: usize) {
        let ids: Vec<String> = (0..pool_size).map(|i| format!("u{i}")).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let rng = SequenceRandomSource::default();

        let chosen = choose_reviewers(&pool(&refs), 2, &rng);

        assert_eq!(chosen.len(), expected);
    }

    #[test]
    fn selected_ids_are_distinct_members_of_the_pool() {
        let candidates = pool(&["u1", "u2", "u3", "u4"]);
        let rng = SequenceRandomSource::new([1, 3, 0, 2]);

        let chosen = choose_reviewers(&candidates, 2, &rng);

        let unique: HashSet<&String> = chosen.iter().collect();
        assert_eq!(unique.len(), chosen.len());
        for id in &chosen {
            assert!(candidates.iter().any(|c| c.id == *id));
        }
    }

    #[test]
    fn zero_target_is_success_with_empty_selection() {
        let candidates = pool(&["u1", "u2"]);
        let rng = SequenceRandomSource::default();

        assert!(choose_reviewers(&candidates, 0, &rng).is_empty());
    }

    #[test]
    fn empty_pool_is_success_with_empty_selection() {
        let rng = SequenceRandomSource::default();

        assert!(choose_reviewers(&[], 2, &rng).is_empty());
    }

    #[test]
    fn shuffle_walks_from_the_last_index_down() {
        // Pool [u1, u2, u3]; the shuffle draws j for i = 2, then i = 1.
        // Draws [0, 1] swap u3 to the front: [u3, u2, u1] -> take 2.
        let candidates = pool(&["u1", "u2", "u3"]);
        let rng = SequenceRandomSource::new([0, 1]);

        let chosen = choose_reviewers(&candidates, 2, &rng);

        assert_eq!(chosen, vec!["u3".to_owned(), "u2".to_owned()]);
    }

    #[test]
    fn identity_draws_preserve_pool_order() {
        // Drawing j = i at every step leaves the pool untouched.
        let candidates = pool(&["u1", "u2", "u3"]);
        let rng = SequenceRandomSource::new([2, 1]);

        let chosen = choose_reviewers(&candidates, 2, &rng);

        assert_eq!(chosen, vec!["u1".to_owned(), "u2".to_owned()]);
    }
}
