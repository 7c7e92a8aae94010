use crate::red_black_tree::cursor::{Cursor, IntoIter, Iter};
use crate::red_black_tree::tree::RedBlackTree;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::result;

/// An ordered multiset implemented using a red black tree.
///
/// Equal values are kept in insertion order. Removing a value removes its earliest inserted
/// occurrence.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackMultiset;
///
/// let mut multiset = RedBlackMultiset::new();
/// multiset.insert(0);
/// multiset.insert(3);
/// multiset.insert(3);
///
/// assert_eq!(multiset.len(), 3);
/// assert_eq!(multiset.count(&3), 2);
///
/// assert_eq!(multiset.remove(&3), Some(3));
/// assert_eq!(multiset.count(&3), 1);
/// ```
pub struct RedBlackMultiset<T> {
    tree: RedBlackTree<T>,
}

impl<T> RedBlackMultiset<T> {
    /// Constructs a new, empty `RedBlackMultiset<T>`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset: RedBlackMultiset<u32> = RedBlackMultiset::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMultiset {
            tree: RedBlackTree::new(),
        }
    }

    /// Inserts a value into the multiset and returns a cursor pointing at it. The value is placed
    /// after every value equal to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(1);
    /// let cursor = multiset.insert(1);
    /// assert_eq!(cursor.peek_prev(), Some(&1));
    /// ```
    pub fn insert(&mut self, value: T) -> Cursor<'_, T>
    where
        T: Ord,
    {
        self.tree.insert(value)
    }

    /// Removes one occurrence of a value from the multiset and returns it, or `None` if the
    /// value does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(1);
    /// assert_eq!(multiset.remove(&1), Some(1));
    /// assert_eq!(multiset.remove(&1), Some(1));
    /// assert_eq!(multiset.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value)
    }

    /// Returns the number of occurrences of a value in the multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset: RedBlackMultiset<u32> = vec![1, 2, 2, 2, 3].into_iter().collect();
    /// assert_eq!(multiset.count(&2), 3);
    /// assert_eq!(multiset.count(&4), 0);
    /// ```
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (mut curr, upper) = self.tree.equal_range(value);
        let mut count = 0;
        while curr != upper {
            count += 1;
            curr.move_next();
        }
        count
    }

    /// Checks if a value exists in the multiset.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(value)
    }

    /// Returns a cursor pointing at the earliest inserted occurrence of a value, or the end
    /// cursor if the value does not exist.
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let lower = self.tree.lower_bound(value);
        match lower.get() {
            Some(found) if found.borrow().cmp(value) == Ordering::Equal => lower,
            _ => self.tree.end(),
        }
    }

    /// Returns the number of elements in the multiset, counting every occurrence.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multiset is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns an upper bound on the number of values a multiset can hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the multiset, removing all values.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Moves every value of `other` into the multiset, leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset: RedBlackMultiset<u32> = vec![1, 2].into_iter().collect();
    /// let mut other: RedBlackMultiset<u32> = vec![2, 3].into_iter().collect();
    /// multiset.merge(&mut other);
    /// assert_eq!(multiset.iter().collect::<Vec<&u32>>(), vec![&1, &2, &2, &3]);
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut RedBlackMultiset<T>)
    where
        T: Ord,
    {
        self.tree.extend(mem::take(&mut other.tree));
    }

    /// Returns a cursor pointing at the first value that is not less than a particular value.
    pub fn lower_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.lower_bound(value)
    }

    /// Returns a cursor pointing at the first value that is greater than a particular value.
    pub fn upper_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.upper_bound(value)
    }

    /// Returns `(lower_bound(value), upper_bound(value))`, which spans every occurrence of the
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset: RedBlackMultiset<u32> = vec![1, 2, 2, 3].into_iter().collect();
    /// let (mut lower, upper) = multiset.equal_range(&2);
    /// assert_eq!(lower.get(), Some(&2));
    /// lower.move_next();
    /// lower.move_next();
    /// assert_eq!(lower, upper);
    /// assert_eq!(upper.get(), Some(&3));
    /// ```
    pub fn equal_range<Q>(&self, value: &Q) -> (Cursor<'_, T>, Cursor<'_, T>)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.equal_range(value)
    }

    /// Returns the minimum value of the multiset.
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns the maximum value of the multiset.
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Removes and returns the minimum value of the multiset.
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    /// Removes and returns the maximum value of the multiset.
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last()
    }

    /// Returns a cursor pointing at the minimum value.
    pub fn begin(&self) -> Cursor<'_, T> {
        self.tree.begin()
    }

    /// Returns the cursor positioned one past the maximum value.
    pub fn end(&self) -> Cursor<'_, T> {
        self.tree.end()
    }

    /// Returns an iterator over the multiset. Equal values are yielded in insertion order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }
}

impl<T> IntoIterator for RedBlackMultiset<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RedBlackMultiset<T>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for RedBlackMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RedBlackMultiset<T>
where
    T: Clone + Ord,
{
    fn clone(&self) -> Self {
        RedBlackMultiset {
            tree: self.tree.clone(),
        }
    }
}

impl<T> PartialEq for RedBlackMultiset<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackMultiset<T>) -> bool {
        self.tree == other.tree
    }
}

impl<T> Eq for RedBlackMultiset<T> where T: Eq {}

impl<T> fmt::Debug for RedBlackMultiset<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for RedBlackMultiset<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        RedBlackMultiset {
            tree: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for RedBlackMultiset<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.tree.extend(iter);
    }
}

impl<T> Serialize for RedBlackMultiset<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

struct RedBlackMultisetVisitor<T> {
    marker: PhantomData<fn() -> RedBlackMultiset<T>>,
}

impl<'de, T> Visitor<'de> for RedBlackMultisetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = RedBlackMultiset<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut multiset = RedBlackMultiset::new();
        while let Some(value) = access.next_element()? {
            multiset.insert(value);
        }
        Ok(multiset)
    }
}

impl<'de, T> Deserialize<'de> for RedBlackMultiset<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackMultisetVisitor {
            marker: PhantomData,
        })
    }
}
