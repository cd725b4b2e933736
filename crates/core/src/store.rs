//! Record store abstractions.
//!
//! The ledger and the pricer never own a concrete collection; they are handed a
//! [`Store`] (keyed records, insertion-ordered, duplicates allowed) and, for the
//! ledger, a [`Journal`] (append-only log). The in-memory implementations here
//! are what the crates use today; a persistent backend only has to implement
//! the same traits.

use std::sync::{Arc, RwLock};

use crate::entity::Entity;

/// Insertion-ordered record store keyed by entity id.
///
/// Ids are not required to be unique. Lookups return the first record added
/// with a matching id.
pub trait Store<T: Entity>: Send + Sync {
    /// Append a record.
    ///
    /// Returns `false` if the backend could not take the write.
    fn add(&self, record: T) -> bool;

    /// First record whose id matches.
    fn find(&self, id: &T::Id) -> Option<T>;

    /// Overwrite the first record whose id matches `record.id()`.
    ///
    /// Returns `false` if no such record exists.
    fn replace(&self, record: T) -> bool;

    /// All records in insertion order.
    fn list(&self) -> Vec<T>;

    fn contains(&self, id: &T::Id) -> bool {
        self.find(id).is_some()
    }
}

/// Append-only, ordered log of immutable entries.
pub trait Journal<T>: Send + Sync {
    /// Returns `false` if the entry was not recorded.
    fn append(&self, entry: T) -> bool;

    /// All entries in append order.
    fn entries(&self) -> Vec<T>;

    fn len(&self) -> usize {
        self.entries().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, S> Store<T> for Arc<S>
where
    T: Entity,
    S: Store<T> + ?Sized,
{
    fn add(&self, record: T) -> bool {
        (**self).add(record)
    }

    fn find(&self, id: &T::Id) -> Option<T> {
        (**self).find(id)
    }

    fn replace(&self, record: T) -> bool {
        (**self).replace(record)
    }

    fn list(&self) -> Vec<T> {
        (**self).list()
    }
}

impl<T, J> Journal<T> for Arc<J>
where
    J: Journal<T> + ?Sized,
{
    fn append(&self, entry: T) -> bool {
        (**self).append(entry)
    }

    fn entries(&self) -> Vec<T> {
        (**self).entries()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// In-memory store backed by a `Vec` (tests/dev, and the default backend).
#[derive(Debug)]
pub struct InMemoryStore<T> {
    inner: RwLock<Vec<T>>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for InMemoryStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: RwLock::new(iter.into_iter().collect()),
        }
    }
}

impl<T> Store<T> for InMemoryStore<T>
where
    T: Entity + Clone + Send + Sync + 'static,
{
    fn add(&self, record: T) -> bool {
        let Ok(mut records) = self.inner.write() else {
            return false;
        };
        records.push(record);
        true
    }

    fn find(&self, id: &T::Id) -> Option<T> {
        let records = self.inner.read().ok()?;
        records.iter().find(|r| r.id() == id).cloned()
    }

    fn replace(&self, record: T) -> bool {
        let Ok(mut records) = self.inner.write() else {
            return false;
        };

        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    fn list(&self) -> Vec<T> {
        match self.inner.read() {
            Ok(records) => records.clone(),
            Err(_) => vec![],
        }
    }
}

/// In-memory append-only journal.
#[derive(Debug)]
pub struct InMemoryJournal<T> {
    inner: RwLock<Vec<T>>,
}

impl<T> InMemoryJournal<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryJournal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Journal<T> for InMemoryJournal<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn append(&self, entry: T) -> bool {
        let Ok(mut entries) = self.inner.write() else {
            return false;
        };
        entries.push(entry);
        true
    }

    fn entries(&self) -> Vec<T> {
        match self.inner.read() {
            Ok(entries) => entries.clone(),
            Err(_) => vec![],
        }
    }

    fn len(&self) -> usize {
        self.inner.read().map(|entries| entries.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Record {
        key: String,
        value: u32,
    }

    impl Entity for Record {
        type Id = String;

        fn id(&self) -> &Self::Id {
            &self.key
        }
    }

    fn record(key: &str, value: u32) -> Record {
        Record {
            key: key.to_string(),
            value,
        }
    }

    #[test]
    fn find_returns_first_match_when_ids_repeat() {
        let store = InMemoryStore::new();
        assert!(store.add(record("a", 1)));
        assert!(store.add(record("a", 2)));

        assert_eq!(store.find(&"a".to_string()), Some(record("a", 1)));
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn replace_overwrites_only_the_first_match() {
        let store: InMemoryStore<Record> =
            [record("a", 1), record("b", 2), record("a", 3)].into_iter().collect();

        assert!(store.replace(record("a", 10)));
        assert_eq!(
            store.list(),
            vec![record("a", 10), record("b", 2), record("a", 3)]
        );
    }

    #[test]
    fn replace_of_unknown_id_is_a_no_op() {
        let store = InMemoryStore::new();
        store.add(record("a", 1));

        assert!(!store.replace(record("z", 9)));
        assert_eq!(store.list(), vec![record("a", 1)]);
    }

    #[test]
    fn list_is_a_copy() {
        let store = InMemoryStore::new();
        store.add(record("a", 1));

        let mut snapshot = store.list();
        snapshot.push(record("b", 2));

        assert_eq!(store.list().len(), 1);
        assert!(store.contains(&"a".to_string()));
        assert!(!store.contains(&"b".to_string()));
    }

    #[test]
    fn journal_preserves_append_order() {
        let journal = InMemoryJournal::new();
        assert!(journal.is_empty());

        assert!(journal.append(3));
        assert!(journal.append(1));
        assert!(journal.append(2));

        assert_eq!(journal.entries(), vec![3, 1, 2]);
        assert_eq!(journal.len(), 3);
    }

    #[test]
    fn shared_store_sees_writes_through_arc() {
        let store = Arc::new(InMemoryStore::new());
        let handle = Arc::clone(&store);

        handle.add(record("a", 1));

        assert_eq!(store.list(), vec![record("a", 1)]);
    }

    #[test]
    fn poisoned_store_refuses_writes_without_panicking() {
        let store: Arc<InMemoryStore<Record>> = Arc::new(InMemoryStore::new());
        store.add(record("a", 1));

        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(!store.add(record("b", 2)));
        assert!(!store.replace(record("a", 5)));
        assert_eq!(store.find(&"a".to_string()), None);
        assert!(store.list().is_empty());
    }

    #[test]
    fn poisoned_journal_refuses_appends() {
        let journal: Arc<InMemoryJournal<u32>> = Arc::new(InMemoryJournal::new());

        let poisoner = Arc::clone(&journal);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(!journal.append(1));
        assert!(journal.is_empty());
    }
}
