use std::collections::HashMap;

use slotmap::{Key, SlotMap};

use crate::entity::{Category, Tag};
use crate::error::RegistryError;

/// A registered item together with the tag it was numbered with.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    pub tag: Tag,
    pub item: T,
}

/// One numbering space of the registry.
///
/// Items are never removed, so slot order is insertion order.
#[derive(Debug)]
pub(crate) struct Table<K: Key, T> {
    category: Category,
    entries: SlotMap<K, Entry<T>>,
    by_tag: HashMap<Tag, K>,
    /// Highest tag handed out by automatic numbering.
    count: Tag,
}

impl<K: Key, T> Table<K, T> {
    pub(crate) fn new(category: Category) -> Self {
        Self {
            category,
            entries: SlotMap::with_key(),
            by_tag: HashMap::new(),
            count: 0,
        }
    }

    /// Returns the tag `requested` resolves to, without reserving it.
    pub(crate) fn next_tag(&self, requested: Option<Tag>) -> Result<Tag, RegistryError> {
        let tag = match requested {
            Some(0) => return Err(RegistryError::InvalidTag(self.category)),
            Some(tag) => tag,
            None => self.count + 1,
        };
        if self.by_tag.contains_key(&tag) {
            return Err(RegistryError::DuplicateTag {
                category: self.category,
                tag,
            });
        }
        Ok(tag)
    }

    /// Numbers and stores `item`.
    ///
    /// Without a requested tag the item gets `count + 1` and the counter
    /// advances; explicit tags leave the counter alone. On error nothing
    /// changes.
    pub(crate) fn insert(&mut self, requested: Option<Tag>, item: T) -> Result<(K, Tag), RegistryError> {
        let tag = self.next_tag(requested)?;
        let key = self.entries.insert(Entry { tag, item });
        self.by_tag.insert(tag, key);
        if requested.is_none() {
            self.count = tag;
        }
        Ok((key, tag))
    }

    pub(crate) fn get(&self, key: K) -> Result<&Entry<T>, RegistryError> {
        self.entries
            .get(key)
            .ok_or(RegistryError::NotFound(self.category))
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Result<&mut Entry<T>, RegistryError> {
        self.entries
            .get_mut(key)
            .ok_or(RegistryError::NotFound(self.category))
    }

    pub(crate) fn tag(&self, key: K) -> Result<Tag, RegistryError> {
        self.get(key).map(|entry| entry.tag)
    }

    pub(crate) fn find(&self, tag: Tag) -> Result<K, RegistryError> {
        self.by_tag
            .get(&tag)
            .copied()
            .ok_or(RegistryError::TagNotFound {
                category: self.category,
                tag,
            })
    }

    /// Resolves `tags` in order, failing on the first unknown tag.
    pub(crate) fn find_all<I>(&self, tags: I) -> Result<Vec<K>, RegistryError>
    where
        I: IntoIterator<Item = Tag>,
    {
        tags.into_iter().map(|tag| self.find(tag)).collect()
    }

    /// Iterates in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (K, &Entry<T>)> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
