use std::cmp::Ordering;

/// A key-value pair stored in a map. Entries are ordered and compared by key alone, so a tree of
/// entries is ordered exactly like a tree of keys.
#[derive(Clone, Debug)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> Ord for Entry<K, V>
where
    K: Ord,
{
    fn cmp(&self, other: &Entry<K, V>) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> PartialOrd for Entry<K, V>
where
    K: Ord,
{
    fn partial_cmp(&self, other: &Entry<K, V>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> PartialEq for Entry<K, V>
where
    K: Ord,
{
    fn eq(&self, other: &Entry<K, V>) -> bool {
        self.key == other.key
    }
}

impl<K, V> Eq for Entry<K, V> where K: Ord {}

#[cfg(test)]
mod tests {
    use super::Entry;

    #[test]
    fn test_ordering_ignores_value() {
        assert!(Entry::new(1, "z") < Entry::new(2, "a"));
        assert_eq!(Entry::new(1, "a"), Entry::new(1, "b"));
    }

    #[test]
    fn test_into_pair() {
        assert_eq!(Entry::new(1, 2).into_pair(), (1, 2));
    }
}
