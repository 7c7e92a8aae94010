use crate::arena::Handle;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::red_black_tree::cursor::{Cursor, IntoIter, Iter};
use crate::red_black_tree::node::Side;
use crate::red_black_tree::tree::RedBlackTree;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::result;

/// An ordered map implemented using a red black tree.
///
/// Keys are unique: inserting a key that is already present leaves the map unchanged and reports
/// the existing entry. Use `insert_or_assign` to overwrite the value instead.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.first(), Some((&0, &1)));
/// assert_eq!(map.lower_bound(&2).key(), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct RedBlackMap<K, V> {
    tree: RedBlackTree<Entry<K, V>>,
}

impl<K, V> RedBlackMap<K, V> {
    /// Constructs a new, empty `RedBlackMap<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap {
            tree: RedBlackTree::new(),
        }
    }

    fn find_handle<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .first_match_handle_by(|entry| entry.key.borrow().cmp(key))
    }

    fn cursor(&self, handle: Option<Handle>) -> MapCursor<'_, K, V> {
        MapCursor {
            cursor: self.tree.cursor(handle),
        }
    }

    fn insert_entry(&mut self, key: K, value: V) -> Handle
    where
        K: Ord,
    {
        match self.tree.insert_handle(Entry::new(key, value)) {
            Ok(handle) => handle,
            Err(err) => panic!("Error: {}.", err),
        }
    }

    /// Inserts a key-value pair into the map if the key is not already present. Returns a cursor
    /// pointing at the entry for the key and whether the pair was inserted. An existing entry is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(1, 1).1, true);
    /// let (cursor, inserted) = map.insert(1, 2);
    /// assert!(!inserted);
    /// assert_eq!(cursor.get(), Some((&1, &1)));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (MapCursor<'_, K, V>, bool)
    where
        K: Ord,
    {
        if let Some(handle) = self.find_handle(&key) {
            return (self.cursor(Some(handle)), false);
        }
        let handle = self.insert_entry(key, value);
        (self.cursor(Some(handle)), true)
    }

    /// Inserts a key-value pair into the map, overwriting the value if the key is already
    /// present. Returns a cursor pointing at the entry and `true` if a new entry was created.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// let (cursor, inserted) = map.insert_or_assign(1, 2);
    /// assert!(!inserted);
    /// assert_eq!(cursor.value(), Some(&2));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (MapCursor<'_, K, V>, bool)
    where
        K: Ord,
    {
        if let Some(handle) = self.find_handle(&key) {
            self.tree.value_mut(handle).value = value;
            return (self.cursor(Some(handle)), false);
        }
        let handle = self.insert_entry(key, value);
        (self.cursor(Some(handle)), true)
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree
            .remove_by(|entry| entry.key.borrow().cmp(key))
            .map(Entry::into_pair)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_handle(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_handle(key)
            .map(|handle| &self.tree.value(handle).value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let handle = self.find_handle(key)?;
        Some(&mut self.tree.value_mut(handle).value)
    }

    /// Returns an immutable reference to the value associated with a particular key, or
    /// `Error::KeyNotFound` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::Error;
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert("a", 1);
    /// assert_eq!(map.at("a"), Ok(&1));
    /// assert_eq!(map.at("b"), Err(Error::KeyNotFound));
    /// ```
    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular key, or
    /// `Error::KeyNotFound` if the key does not exist.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular key, inserting the
    /// default value first if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert("a", 1);
    /// *map.get_or_insert_default("b") += 2;
    /// assert_eq!(map.get("b"), Some(&2));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        K: Ord,
        V: Default,
    {
        let handle = match self.find_handle(&key) {
            Some(handle) => handle,
            None => self.insert_entry(key, V::default()),
        };
        &mut self.tree.value_mut(handle).value
    }

    /// Returns a cursor pointing at the entry for a particular key, or the end cursor if the key
    /// does not exist.
    pub fn find<Q>(&self, key: &Q) -> MapCursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cursor(self.find_handle(key))
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns an upper bound on the number of entries a map can hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Moves every entry of `other` whose key is absent from this map into this map. Entries
    /// whose keys are already present stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// let mut other = RedBlackMap::new();
    /// other.insert(1, 10);
    /// other.insert(2, 20);
    ///
    /// map.merge(&mut other);
    /// assert_eq!(map.iter().collect::<Vec<(&u32, &u32)>>(), vec![(&1, &1), (&2, &20)]);
    /// assert_eq!(other.iter().collect::<Vec<(&u32, &u32)>>(), vec![(&1, &10)]);
    /// ```
    pub fn merge(&mut self, other: &mut RedBlackMap<K, V>)
    where
        K: Ord,
    {
        let mut curr = other.tree.first_handle();
        while let Some(handle) = curr {
            curr = other.tree.step(handle, Side::Right);
            if self.find_handle(&other.tree.value(handle).key).is_none() {
                let entry = other.tree.remove_handle(handle);
                self.tree.insert(entry);
            }
        }
    }

    /// Returns a cursor pointing at the first entry whose key is not less than a particular key,
    /// or the end cursor if no such entry exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.lower_bound(&0).key(), Some(&1));
    /// assert!(map.lower_bound(&2).is_end());
    /// ```
    pub fn lower_bound<Q>(&self, key: &Q) -> MapCursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cursor(
            self.tree
                .lower_bound_handle_by(|entry| entry.key.borrow().cmp(key)),
        )
    }

    /// Returns a cursor pointing at the first entry whose key is greater than a particular key,
    /// or the end cursor if no such entry exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.upper_bound(&0).key(), Some(&1));
    /// assert!(map.upper_bound(&1).is_end());
    /// ```
    pub fn upper_bound<Q>(&self, key: &Q) -> MapCursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cursor(
            self.tree
                .upper_bound_handle_by(|entry| entry.key.borrow().cmp(key)),
        )
    }

    /// Returns `(lower_bound(key), upper_bound(key))`. The range holds at most one entry.
    pub fn equal_range<Q>(&self, key: &Q) -> (MapCursor<'_, K, V>, MapCursor<'_, K, V>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns the entry with the minimum key. Returns `None` if the map is empty.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the entry with the maximum key. Returns `None` if the map is empty.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|entry| (&entry.key, &entry.value))
    }

    /// Removes and returns the entry with the minimum key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first().map(Entry::into_pair)
    }

    /// Removes and returns the entry with the maximum key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last().map(Entry::into_pair)
    }

    /// Returns a cursor pointing at the entry with the minimum key.
    pub fn begin(&self) -> MapCursor<'_, K, V> {
        MapCursor {
            cursor: self.tree.begin(),
        }
    }

    /// Returns the cursor positioned one past the entry with the maximum key.
    pub fn end(&self) -> MapCursor<'_, K, V> {
        MapCursor {
            cursor: self.tree.end(),
        }
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, K, V> {
        RedBlackMapIter {
            tree_iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the keys of the map in order.
    pub fn keys(&self) -> RedBlackMapKeys<'_, K, V> {
        RedBlackMapKeys {
            tree_iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the values of the map in key order.
    pub fn values(&self) -> RedBlackMapValues<'_, K, V> {
        RedBlackMapValues {
            tree_iter: self.tree.iter(),
        }
    }
}

/// A bidirectional cursor over the entries of a `RedBlackMap<K, V>`.
pub struct MapCursor<'a, K, V> {
    cursor: Cursor<'a, Entry<K, V>>,
}

impl<'a, K, V> MapCursor<'a, K, V> {
    /// Returns the key-value pair at the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.cursor.get().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the key at the cursor, or `None` at the end position.
    pub fn key(&self) -> Option<&'a K> {
        self.cursor.get().map(|entry| &entry.key)
    }

    /// Returns the value at the cursor, or `None` at the end position.
    pub fn value(&self) -> Option<&'a V> {
        self.cursor.get().map(|entry| &entry.value)
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.cursor.is_end()
    }

    /// Moves the cursor to the entry with the next greater key.
    pub fn move_next(&mut self) {
        self.cursor.move_next();
    }

    /// Moves the cursor to the entry with the next smaller key. From the end position the cursor
    /// moves to the entry with the maximum key.
    pub fn move_prev(&mut self) {
        self.cursor.move_prev();
    }

    /// Returns the key-value pair the cursor would point at after `move_next`.
    pub fn peek_next(&self) -> Option<(&'a K, &'a V)> {
        self.cursor.peek_next().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the key-value pair the cursor would point at after `move_prev`.
    pub fn peek_prev(&self) -> Option<(&'a K, &'a V)> {
        self.cursor.peek_prev().map(|entry| (&entry.key, &entry.value))
    }
}

impl<'a, K, V> Clone for MapCursor<'a, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K, V> Copy for MapCursor<'a, K, V> {}

impl<'a, K, V> PartialEq for MapCursor<'a, K, V> {
    fn eq(&self, other: &MapCursor<'a, K, V>) -> bool {
        self.cursor == other.cursor
    }
}

impl<'a, K, V> Eq for MapCursor<'a, K, V> {}

impl<'a, K, V> fmt::Debug for MapCursor<'a, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MapCursor").field(&self.get()).finish()
    }
}

impl<K, V> IntoIterator for RedBlackMap<K, V> {
    type IntoIter = RedBlackMapIntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RedBlackMap<K, V>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = RedBlackMapIter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct RedBlackMapIntoIter<K, V> {
    tree_iter: IntoIter<Entry<K, V>>,
}

impl<K, V> Iterator for RedBlackMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(Entry::into_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for RedBlackMapIntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back().map(Entry::into_pair)
    }
}

impl<K, V> ExactSizeIterator for RedBlackMapIntoIter<K, V> {}

/// An iterator for `RedBlackMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, K, V> {
    tree_iter: Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter
            .next()
            .map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter
            .next_back()
            .map(|entry| (&entry.key, &entry.value))
    }
}

impl<'a, K, V> ExactSizeIterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
}

/// An iterator over the keys of a `RedBlackMap<K, V>`.
pub struct RedBlackMapKeys<'a, K, V> {
    tree_iter: Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for RedBlackMapKeys<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| &entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for RedBlackMapKeys<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back().map(|entry| &entry.key)
    }
}

impl<'a, K, V> ExactSizeIterator for RedBlackMapKeys<'a, K, V>
where
    K: 'a,
    V: 'a,
{
}

/// An iterator over the values of a `RedBlackMap<K, V>`.
pub struct RedBlackMapValues<'a, K, V> {
    tree_iter: Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for RedBlackMapValues<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| &entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for RedBlackMapValues<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back().map(|entry| &entry.value)
    }
}

impl<'a, K, V> ExactSizeIterator for RedBlackMapValues<'a, K, V>
where
    K: 'a,
    V: 'a,
{
}

impl<K, V> Default for RedBlackMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for RedBlackMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    fn clone(&self) -> Self {
        RedBlackMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V> PartialEq for RedBlackMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &RedBlackMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for RedBlackMap<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> fmt::Debug for RedBlackMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for RedBlackMap<K, V>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = RedBlackMap::new();
        map.extend(iter);
        map
    }
}

/// Pairs whose keys are already present are skipped, matching `insert`.
impl<K, V> Extend<(K, V)> for RedBlackMap<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, Q> Index<&'a Q> for RedBlackMap<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V, Q> IndexMut<&'a Q> for RedBlackMap<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &Q) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

impl<K, V> Serialize for RedBlackMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RedBlackMapVisitor<K, V> {
    marker: PhantomData<fn() -> RedBlackMap<K, V>>,
}

impl<'de, K, V> Visitor<'de> for RedBlackMapVisitor<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    type Value = RedBlackMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    // A repeated key keeps its last value.
    fn visit_map<A>(self, mut access: A) -> result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = RedBlackMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert_or_assign(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V> Deserialize<'de> for RedBlackMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RedBlackMapVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackMap;
    use crate::error::Error;
    use crate::red_black_tree::tree::tests::assert_valid;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_len_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_first_last_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = RedBlackMap::new();
        let (cursor, inserted) = map.insert(1, 1);
        assert!(inserted);
        assert_eq!(cursor.get(), Some((&1, &1)));
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_existing_key_keeps_value() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        let (cursor, inserted) = map.insert(1, 3);
        assert!(!inserted);
        assert_eq!(cursor.value(), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_insert_or_assign() {
        let mut map = RedBlackMap::new();
        assert!(map.insert_or_assign(1, 1).1);
        assert!(!map.insert_or_assign(1, 3).1);
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn test_at() {
        let mut map = RedBlackMap::new();
        map.insert(String::from("a"), 1);
        assert_eq!(map.at("a"), Ok(&1));
        assert_eq!(map.at("b"), Err(Error::KeyNotFound));

        *map.at_mut("a").unwrap() = 2;
        assert_eq!(map.at("a"), Ok(&2));
        assert_eq!(map.at_mut("b"), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_get_or_insert_default() {
        let mut map = RedBlackMap::new();
        map.insert(String::from("a"), 1);
        assert_eq!(*map.get_or_insert_default(String::from("b")), 0);
        assert_eq!(map.len(), 2);

        *map.get_or_insert_default(String::from("a")) += 10;
        assert_eq!(map["a"], 11);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_get_mut() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    #[should_panic]
    fn test_index_missing_key() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        let _value: u32 = map[&1];
    }

    #[test]
    fn test_find() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(3, 4);
        assert_eq!(map.find(&3).get(), Some((&3, &4)));
        assert_eq!(map.find(&2), map.end());
    }

    #[test]
    fn test_bounds() {
        let map: RedBlackMap<u32, u32> = vec![(1, 1), (3, 3), (5, 5), (7, 7)]
            .into_iter()
            .collect();

        assert_eq!(map.lower_bound(&4).key(), Some(&5));
        assert_eq!(map.upper_bound(&5).key(), Some(&7));
        assert_eq!(map.lower_bound(&0), map.begin());
        assert!(map.upper_bound(&7).is_end());

        let (lower, upper) = map.equal_range(&3);
        assert_eq!(lower.key(), Some(&3));
        assert_eq!(upper.key(), Some(&5));

        let (lower, upper) = map.equal_range(&4);
        assert_eq!(lower, upper);
        assert_eq!(lower.key(), Some(&5));
    }

    #[test]
    fn test_cursor_walk() {
        let map: RedBlackMap<u32, u32> = vec![(1, 1), (2, 4)].into_iter().collect();
        let mut cursor = map.end();
        cursor.move_prev();
        assert_eq!(cursor.get(), Some((&2, &4)));
        cursor.move_prev();
        assert_eq!(cursor.get(), Some((&1, &1)));
        cursor.move_next();
        cursor.move_next();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_cursor_peek() {
        let map: RedBlackMap<u32, u32> = vec![(1, 1), (2, 4), (3, 9)].into_iter().collect();
        let cursor = map.find(&2);
        assert_eq!(cursor.peek_prev(), Some((&1, &1)));
        assert_eq!(cursor.peek_next(), Some((&3, &9)));
        assert_eq!(map.begin().peek_prev(), None);
        assert_eq!(map.end().peek_prev(), Some((&3, &9)));
        assert_eq!(map.end().peek_next(), None);
    }

    #[test]
    fn test_merge() {
        let mut map: RedBlackMap<u32, u32> = vec![(1, 1), (3, 3)].into_iter().collect();
        let mut other: RedBlackMap<u32, u32> = vec![(2, 20), (3, 30)].into_iter().collect();
        map.merge(&mut other);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 1), (2, 20), (3, 3)],
        );
        assert_eq!(other.into_iter().collect::<Vec<(u32, u32)>>(), vec![(3, 30)]);
    }

    #[test]
    fn test_merge_keeps_conflicting_nodes_in_place() {
        let mut map: RedBlackMap<u32, u32> = (0..100)
            .filter(|key| key % 3 == 0)
            .map(|key| (key, key))
            .collect();
        let mut other: RedBlackMap<u32, u32> = (0..100).map(|key| (key, key + 1000)).collect();
        let kept = other.find(&33).get().map(|(key, value)| (*key, *value));
        let capacity = other.tree.arena.capacity();

        map.merge(&mut other);

        assert_eq!(map.len(), 100);
        assert_eq!(other.len(), 34);
        assert!(other.keys().all(|key| key % 3 == 0));
        assert!(other.values().all(|value| *value >= 1000));
        assert!(map.iter().all(|(key, value)| if key % 3 == 0 {
            key == value
        } else {
            *value == key + 1000
        }));
        assert_eq!(other.find(&33).get().map(|(key, value)| (*key, *value)), kept);
        assert_eq!(other.tree.arena.capacity(), capacity);
        assert_valid(&map.tree);
        assert_valid(&other.tree);
    }

    #[test]
    fn test_pop_first_last() {
        let mut map: RedBlackMap<u32, u32> = vec![(1, 1), (2, 2), (3, 3)].into_iter().collect();
        assert_eq!(map.pop_first(), Some((1, 1)));
        assert_eq!(map.pop_last(), Some((3, 3)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_from_iter_keeps_first_value() {
        let map: RedBlackMap<u32, u32> = vec![(1, 1), (1, 2)].into_iter().collect();
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_eq_compares_values() {
        let left: RedBlackMap<u32, u32> = vec![(1, 1)].into_iter().collect();
        let right: RedBlackMap<u32, u32> = vec![(1, 2)].into_iter().collect();
        assert_ne!(left, right);
        assert_eq!(left, left.clone());
    }

    #[test]
    fn test_into_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
        assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(map.values().collect::<Vec<&u32>>(), vec![&2, &4, &6]);
    }

    #[test]
    fn test_keys_values_double_ended() {
        let map: RedBlackMap<u32, u32> = vec![(1, 2), (3, 4), (5, 6)].into_iter().collect();

        let mut keys = map.keys();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys.next_back(), Some(&5));
        assert_eq!(keys.next(), Some(&1));
        assert_eq!(keys.size_hint(), (1, Some(1)));
        assert_eq!(keys.next_back(), Some(&3));
        assert_eq!(keys.next(), None);

        assert_eq!(map.values().rev().collect::<Vec<&u32>>(), vec![&6, &4, &2]);
        assert_eq!(map.values().len(), 3);
    }

    #[test]
    fn test_debug() {
        let map: RedBlackMap<u32, u32> = vec![(2, 3), (1, 2)].into_iter().collect();
        assert_eq!(format!("{:?}", map), "{1: 2, 2: 3}");
    }

    #[test]
    fn test_serde() {
        let map: RedBlackMap<u32, u32> = vec![(1, 2), (3, 4)].into_iter().collect();
        assert_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(3),
                Token::U32(4),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_deserialize_repeated_key_keeps_last() {
        let map: RedBlackMap<u32, u32> = vec![(1, 4)].into_iter().collect();
        assert_de_tokens(
            &map,
            &[
                Token::Map { len: Some(2) },
                Token::U32(1),
                Token::U32(2),
                Token::U32(1),
                Token::U32(4),
                Token::MapEnd,
            ],
        );
    }
}
