//! Chunked allocator that backs the nodes of a tree.

use log::debug;
use std::collections::TryReserveError;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A stable reference to an object allocated in a `TypedArena<T>`.
///
/// A handle stays valid until the object it refers to is freed or the arena is cleared. Handles
/// of freed objects are recycled by later allocations.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// All objects inside the arena are destroyed together when the arena is dropped or cleared, so
/// tearing down a linked structure never recurses. Freed blocks are threaded onto a free list and
/// reused before a new chunk is reserved. Chunks are never reallocated once reserved, so growth
/// never moves existing objects.
///
/// # Examples
///
/// ```
/// use rbtree_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(64);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Error: chunk size must be positive.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            len: 0,
            capacity: 0,
        }
    }

    /// Allocates an object in the typed arena and returns its handle. Returns an error without
    /// modifying the arena if a new chunk is required and cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(64);
    /// let x = arena.try_allocate(0).unwrap();
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn try_allocate(&mut self, value: T) -> Result<Handle, TryReserveError> {
        if self.head.is_none() && self.len == self.capacity {
            let mut chunk = Vec::new();
            chunk.try_reserve_exact(self.chunk_size)?;
            self.chunks.push(chunk);
            self.capacity += self.chunk_size;
            debug!(
                "arena grew to {} chunks ({} blocks)",
                self.chunks.len(),
                self.capacity,
            );
        }
        self.len += 1;

        match self.head.take() {
            None => {
                let chunk_index = self.chunks.len() - 1;
                let last_chunk = &mut self.chunks[chunk_index];
                last_chunk.push(Block::Occupied(value));
                Ok(Handle {
                    chunk_index,
                    block_index: last_chunk.len() - 1,
                })
            },
            Some(handle) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[handle.chunk_index][handle.block_index],
                    Block::Occupied(value),
                );
                match vacant_block {
                    Block::Vacant(next) => {
                        self.head = next;
                        Ok(handle)
                    },
                    Block::Occupied(_) => panic!("Expected the free list to hold a vacant block."),
                }
            },
        }
    }

    /// Allocates an object in the typed arena and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if memory for a new chunk cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(64);
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.try_allocate(value)
            .expect("Error: failed to reserve an arena chunk.")
    }

    /// Deallocates an object in the typed arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(64);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(self.head),
        );
        match old_block {
            Block::Vacant(next) => {
                self.chunks[handle.chunk_index][handle.block_index] = Block::Vacant(next);
                panic!("Error: attempting to free vacant block.");
            },
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            },
        }
    }

    /// Returns an immutable reference to an object in the typed arena. Returns `None` if the
    /// handle does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(64);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the typed arena. Returns `None` if the handle
    /// does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(64);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of blocks reserved across all chunks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Destroys every object and releases every chunk. All outstanding handles become invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(64);
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn clear(&mut self) {
        if !self.chunks.is_empty() {
            debug!("arena released {} chunks", self.chunks.len());
        }
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::Handle;
    use super::TypedArena;

    #[test]
    fn test_try_allocate_failure_leaves_arena_untouched() {
        let mut arena: TypedArena<u64> = TypedArena::new(usize::max_value() / 4);
        assert!(arena.try_allocate(0).is_err());
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.capacity(), 0);
        assert!(arena.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.free(Handle {
            chunk_index: 0,
            block_index: 0,
        });
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        arena.free(handle);
        arena.free(handle);
    }

    #[test]
    #[should_panic]
    fn test_zero_chunk_size() {
        let _: TypedArena<u32> = TypedArena::new(0);
    }

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new(1024);
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 0
            },
        );
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 1
            },
        );
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.capacity(), 1024);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        arena.allocate(0);
        arena.allocate(0);
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 1,
                block_index: 0
            },
        );
        assert_eq!(arena.capacity(), 4);
    }

    #[test]
    fn test_free_reuses_block() {
        let mut arena = TypedArena::new(1024);
        let first = arena.allocate(0);
        let second = arena.allocate(1);
        assert_eq!(arena.free(first), 0);
        assert_eq!(arena.free(second), 1);
        assert!(arena.is_empty());

        assert_eq!(arena.allocate(2), second);
        assert_eq!(arena.allocate(3), first);
        assert_eq!(arena.capacity(), 1024);
    }

    #[test]
    fn test_free_full_chunk_does_not_grow() {
        let mut arena = TypedArena::new(2);
        let first = arena.allocate(0);
        arena.allocate(1);
        arena.free(first);
        assert_eq!(arena.allocate(2), first);
        assert_eq!(arena.capacity(), 2);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        *arena.get_mut(handle).unwrap() = 1;
        assert_eq!(arena.get(handle), Some(&1));
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        arena.free(handle);
        assert_eq!(arena.get(handle), None);
    }

    #[test]
    fn test_get_invalid_block() {
        let arena: TypedArena<u32> = TypedArena::new(1024);
        assert_eq!(
            arena.get(Handle {
                chunk_index: 0,
                block_index: 0
            }),
            None,
        );
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2);
        let handle = arena.allocate(0);
        arena.allocate(1);
        arena.allocate(2);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.capacity(), 0);
        assert_eq!(arena.get(handle), None);
        assert_eq!(
            arena.allocate(3),
            Handle {
                chunk_index: 0,
                block_index: 0
            },
        );
    }
}
