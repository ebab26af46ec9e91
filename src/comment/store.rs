//! In-memory comment store.
//!
//! # Invariants
//! - Ids are unique across the collection at all times.
//! - `update` and `delete` check existence before touching the collection;
//!   a miss returns [`StoreError::NotFound`] and mutates nothing.
//! - Callers only ever receive clones. The backing `Vec` is never exposed.
//! - One mutex guards every operation, so each lookup-then-mutate sequence
//!   is atomic. The lock is never held across an `.await`.

use std::collections::HashSet;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use super::model::{Comment, CommentId};

/// Failures reported by [`CommentStore`] and [`CommentId`] parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("comment {0} not found")]
    NotFound(CommentId),

    #[error("invalid comment id `{0}`")]
    InvalidId(String),

    #[error("duplicate comment id {0}")]
    DuplicateId(CommentId),
}

/// Owner and sole mutator of the comment collection.
#[derive(Debug, Default)]
pub struct CommentStore {
    comments: Mutex<Vec<Comment>>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding `comments` in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] for the first id seen twice.
    pub fn seeded(comments: impl IntoIterator<Item = Comment>) -> Result<Self, StoreError> {
        let comments: Vec<Comment> = comments.into_iter().collect();
        let mut seen = HashSet::with_capacity(comments.len());
        if let Some(dup) = comments.iter().find(|c| !seen.insert(c.id)) {
            return Err(StoreError::DuplicateId(dup.id));
        }
        Ok(Self { comments: Mutex::new(comments) })
    }

    /// The three comments the service starts with when no seed file is given.
    pub fn with_default_seed() -> Self {
        let seed = [
            (1, "This is the first comment"),
            (2, "This is the second comment"),
            (3, "This is the third comment"),
        ];
        let comments = seed
            .into_iter()
            .filter_map(|(id, text)| CommentId::new(id).map(|id| Comment::new(id, text)))
            .collect();
        Self { comments: Mutex::new(comments) }
    }

    pub fn find(&self, id: CommentId) -> Result<Comment, StoreError> {
        self.comments
            .lock()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Replaces the text of comment `id` verbatim and returns the updated record.
    pub fn update(&self, id: CommentId, text: impl Into<String>) -> Result<Comment, StoreError> {
        let mut comments = self.comments.lock();
        let comment = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;

        comment.text = text.into();
        debug!(%id, "comment updated");
        Ok(comment.clone())
    }

    /// Removes comment `id` and returns it as it was just before removal.
    pub fn delete(&self, id: CommentId) -> Result<Comment, StoreError> {
        let mut comments = self.comments.lock();
        let idx = comments
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = comments.remove(idx);
        debug!(%id, remaining = comments.len(), "comment deleted");
        Ok(removed)
    }

    /// Snapshot of every comment, in insertion order.
    pub fn list(&self) -> Vec<Comment> {
        self.comments.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.comments.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn id(raw: u64) -> CommentId {
        CommentId::new(raw).unwrap()
    }

    fn store(seed: &[(u64, &str)]) -> CommentStore {
        CommentStore::seeded(seed.iter().map(|(i, t)| Comment::new(id(*i), *t))).unwrap()
    }

    #[test]
    fn walkthrough_find_update_delete() {
        let s = store(&[(1, "a"), (2, "b")]);

        assert_eq!(s.find(id(2)), Ok(Comment::new(id(2), "b")));

        assert_eq!(s.update(id(1), "z"), Ok(Comment::new(id(1), "z")));
        assert_eq!(s.list(), vec![Comment::new(id(1), "z"), Comment::new(id(2), "b")]);

        assert_eq!(s.delete(id(1)), Ok(Comment::new(id(1), "z")));
        assert_eq!(s.list(), vec![Comment::new(id(2), "b")]);

        assert_eq!(s.find(id(1)), Err(StoreError::NotFound(id(1))));
    }

    #[test]
    fn second_delete_reports_not_found() {
        let s = store(&[(1, "a"), (2, "b")]);

        assert!(s.delete(id(2)).is_ok());
        assert_eq!(s.delete(id(2)), Err(StoreError::NotFound(id(2))));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn update_stores_text_verbatim() {
        let s = store(&[(1, "a")]);
        let text = "  <b>unsanitised</b> \n ⚠️ ".repeat(100);

        s.update(id(1), text.clone()).unwrap();
        assert_eq!(s.find(id(1)).unwrap().text, text);
    }

    #[test]
    fn deleted_comment_cannot_be_updated() {
        let s = store(&[(1, "a")]);
        s.delete(id(1)).unwrap();

        assert_eq!(s.update(id(1), "back"), Err(StoreError::NotFound(id(1))));
        assert!(s.is_empty());
    }

    #[test]
    fn seeding_rejects_duplicate_ids() {
        let seed = vec![Comment::new(id(1), "a"), Comment::new(id(2), "b"), Comment::new(id(1), "c")];

        assert_eq!(CommentStore::seeded(seed).err(), Some(StoreError::DuplicateId(id(1))));
    }

    #[test]
    fn default_seed_has_three_comments() {
        let s = CommentStore::with_default_seed();

        assert_eq!(s.len(), 3);
        assert_eq!(s.find(id(1)).unwrap().text, "This is the first comment");
    }

    #[test]
    fn concurrent_deletes_of_one_id_succeed_once() {
        let s = store(&[(1, "a"), (2, "b")]);

        let successes = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16).map(|_| scope.spawn(|| s.delete(id(1)).is_ok())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count()
        });

        assert_eq!(successes, 1);
        assert_eq!(s.list(), vec![Comment::new(id(2), "b")]);
    }

    fn seeds() -> impl Strategy<Value = BTreeMap<u64, String>> {
        prop::collection::btree_map(1u64..40, "[a-z ]{0,12}", 0..12)
    }

    fn seeded(map: &BTreeMap<u64, String>) -> CommentStore {
        CommentStore::seeded(map.iter().map(|(i, t)| Comment::new(id(*i), t.clone()))).unwrap()
    }

    proptest! {
        #[test]
        fn present_ids_are_found(map in seeds()) {
            let s = seeded(&map);
            for raw in map.keys() {
                prop_assert_eq!(s.find(id(*raw)).unwrap().id, id(*raw));
            }
        }

        #[test]
        fn absent_ids_change_nothing(map in seeds(), raw in 1u64..60, text in ".*") {
            prop_assume!(!map.contains_key(&raw));
            let s = seeded(&map);
            let before = s.list();

            prop_assert_eq!(s.find(id(raw)), Err(StoreError::NotFound(id(raw))));
            prop_assert_eq!(s.update(id(raw), text), Err(StoreError::NotFound(id(raw))));
            prop_assert_eq!(s.delete(id(raw)), Err(StoreError::NotFound(id(raw))));
            prop_assert_eq!(s.list(), before);
        }

        #[test]
        fn update_touches_only_text(map in seeds(), pick in any::<prop::sample::Index>(), text in ".*") {
            prop_assume!(!map.is_empty());
            let s = seeded(&map);
            let keys: Vec<u64> = map.keys().copied().collect();
            let target = id(*pick.get(&keys));

            s.update(target, text.clone()).unwrap();

            prop_assert_eq!(s.len(), map.len());
            for c in s.list() {
                if c.id == target {
                    prop_assert_eq!(&c.text, &text);
                } else {
                    prop_assert_eq!(&c.text, &map[&c.id.get()]);
                }
            }
        }

        #[test]
        fn delete_shrinks_by_one(map in seeds(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!map.is_empty());
            let s = seeded(&map);
            let keys: Vec<u64> = map.keys().copied().collect();
            let target = id(*pick.get(&keys));

            let removed = s.delete(target).unwrap();

            prop_assert_eq!(removed.text, map[&target.get()].clone());
            prop_assert_eq!(s.len(), map.len() - 1);
            prop_assert_eq!(s.find(target), Err(StoreError::NotFound(target)));
        }
    }
}
