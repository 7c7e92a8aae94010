use crate::red_black_tree::cursor::{Cursor, IntoIter, Iter};
use crate::red_black_tree::tree::RedBlackTree;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::result;

/// An ordered set implemented using a red black tree.
///
/// Inserting a value equal to one already in the set leaves the set unchanged.
///
/// # Examples
///
/// ```
/// use rbtree_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.first(), Some(&0));
/// assert_eq!(set.lower_bound(&2).get(), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct RedBlackSet<T> {
    tree: RedBlackTree<T>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet {
            tree: RedBlackTree::new(),
        }
    }

    /// Inserts a value into the set if no equal value is present. Returns a cursor pointing at
    /// the value in the set and whether the value was inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1).1);
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1).1);
    /// ```
    pub fn insert(&mut self, value: T) -> (Cursor<'_, T>, bool)
    where
        T: Ord,
    {
        if let Some(handle) = self.tree.first_match_handle_by(|other| other.cmp(&value)) {
            return (self.tree.cursor(Some(handle)), false);
        }
        (self.tree.insert(value), true)
    }

    /// Removes a value from the set. If the value exists in the set, it will return the removed
    /// value. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(value)
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(value)
    }

    /// Returns a reference to the value in the set that is equal to a particular value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(value)
    }

    /// Returns a cursor pointing at the value equal to a particular value, or the end cursor if
    /// no such value exists.
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.search(value)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns an upper bound on the number of values a set can hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Moves every value of `other` into the set, leaving `other` empty. Values already present
    /// in the set are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = vec![1, 2].into_iter().collect();
    /// let mut other: RedBlackSet<u32> = vec![2, 3].into_iter().collect();
    /// set.merge(&mut other);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut RedBlackSet<T>)
    where
        T: Ord,
    {
        for value in mem::take(&mut other.tree) {
            self.insert(value);
        }
    }

    /// Returns a cursor pointing at the first value that is not less than a particular value, or
    /// the end cursor if no such value exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(set.lower_bound(&4).get(), Some(&5));
    /// ```
    pub fn lower_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.lower_bound(value)
    }

    /// Returns a cursor pointing at the first value that is greater than a particular value, or
    /// the end cursor if no such value exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(set.upper_bound(&5).get(), Some(&7));
    /// ```
    pub fn upper_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.upper_bound(value)
    }

    /// Returns `(lower_bound(value), upper_bound(value))`. The range holds at most one value.
    pub fn equal_range<Q>(&self, value: &Q) -> (Cursor<'_, T>, Cursor<'_, T>)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.equal_range(value)
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Removes and returns the minimum value of the set.
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first()
    }

    /// Removes and returns the maximum value of the set.
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

    /// Returns an iterator over the set. The iterator will yield values using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RedBlackSet<T>
where
    T: Clone + Ord,
{
    fn clone(&self) -> Self {
        RedBlackSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T> PartialEq for RedBlackSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackSet<T>) -> bool {
        self.tree == other.tree
    }
}

impl<T> Eq for RedBlackSet<T> where T: Eq {}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> Serialize for RedBlackSet<T>
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

struct RedBlackSetVisitor<T> {
    marker: PhantomData<fn() -> RedBlackSet<T>>,
}

impl<'de, T> Visitor<'de> for RedBlackSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = RedBlackSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = RedBlackSet::new();
        while let Some(value) = access.next_element()? {
            set.insert(value);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for RedBlackSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackSetVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackSet;
    use crate::red_black_tree::tree::tests::assert_valid;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_first_last_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.first(), None);
        assert_eq!(set.last(), None);
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        let (cursor, inserted) = set.insert(1);
        assert!(inserted);
        assert_eq!(cursor.get(), Some(&1));
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(2);
        let (cursor, inserted) = set.insert(1);
        assert!(!inserted);
        assert_eq!(cursor.get(), Some(&1));
        assert_eq!(cursor.peek_next(), Some(&2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
    }

    #[test]
    fn test_from_iter_collapses_duplicates() {
        let set: RedBlackSet<u32> = vec![5, 3, 5, 1, 4].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &4, &5]);
        assert_eq!(set.len(), 4);
        assert_valid(&set.tree);
    }

    #[test]
    fn test_first_last() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.first(), Some(&1));
        assert_eq!(set.last(), Some(&5));
    }

    #[test]
    fn test_bounds() {
        let set: RedBlackSet<u32> = vec![1, 3, 5, 7].into_iter().collect();

        assert_eq!(set.lower_bound(&4).get(), Some(&5));
        assert_eq!(set.upper_bound(&5).get(), Some(&7));

        let (lower, upper) = set.equal_range(&3);
        assert_eq!(lower, set.find(&3));
        assert_eq!(upper, set.find(&5));

        assert_eq!(set.lower_bound(&0), set.begin());
        assert!(set.lower_bound(&8).is_end());
        assert!(set.upper_bound(&7).is_end());
    }

    #[test]
    fn test_merge() {
        let mut set: RedBlackSet<u32> = vec![1, 3].into_iter().collect();
        let mut other: RedBlackSet<u32> = vec![2, 3, 4].into_iter().collect();
        set.merge(&mut other);
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3, &4]);
        assert!(other.is_empty());
        assert_valid(&set.tree);
    }

    #[test]
    fn test_clone_eq() {
        let set: RedBlackSet<u32> = vec![1, 3].into_iter().collect();
        let mut cloned = set.clone();
        assert_eq!(set, cloned);
        cloned.insert(2);
        assert_ne!(set, cloned);
    }

    #[test]
    fn test_into_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_debug() {
        let set: RedBlackSet<u32> = vec![2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", set), "{1, 2}");
    }

    #[test]
    fn test_serde() {
        let set: RedBlackSet<u32> = vec![3, 1].into_iter().collect();
        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(2) },
                Token::U32(1),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );
    }

    #[test]
    fn test_deserialize_collapses_duplicates() {
        let set: RedBlackSet<u32> = vec![1].into_iter().collect();
        assert_de_tokens(
            &set,
            &[
                Token::Seq { len: Some(2) },
                Token::U32(1),
                Token::U32(1),
                Token::SeqEnd,
            ],
        );
    }
}
