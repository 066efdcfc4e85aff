//! Module provide ordered-set implemented by [Set] type.
//!
//! Set is a thin facade over [Rbt], exposing values instead of nodes.
//! Positions within a set are expressed by [Cursor], a bidirectional
//! iterator that can step forward and backward and that may sit one past
//! the maximal value, the *end* position.
//!
//! - Values are kept in sorted order, duplicates are rejected.
//! - insert() and search() return a cursor, which is at end when nothing
//!   was inserted or nothing was found.
//! - Cursors report misuse, like dereferencing the end position, as
//!   [Error::OutOfRange].
//! - [Set::iter] offers the same walk as a std [Iterator].
//!
//! Cursor traversal:
//!
//! ```
//! use rbset::Set;
//!
//! let set: Set<u32> = vec![30, 10, 20].into_iter().collect();
//!
//! let mut cursor = set.begin();
//! let mut values = vec![];
//! while cursor != set.end() {
//!     values.push(*cursor.get().unwrap());
//!     cursor.move_next().unwrap();
//! }
//! assert_eq!(values, vec![10, 20, 30]);
//!
//! // stepping back from end lands on the maximal value.
//! cursor.move_prev().unwrap();
//! assert_eq!(*cursor.get().unwrap(), 30);
//! ```

use std::{borrow::Borrow, fmt, iter::FromIterator};

use crate::{node::NodeId, rbt::Rbt, Error, Result};

/// Set manage a single instance of in-memory ordered-set, backed by a
/// red-black tree.
///
/// Cloning a set performs a deep copy of the tree, the two sets share no
/// storage afterwards.
pub struct Set<T> {
    tree: Rbt<T>,
}

impl<T> Default for Set<T> {
    fn default() -> Set<T> {
        Set::new()
    }
}

impl<T> Clone for Set<T>
where
    T: Clone,
{
    fn clone(&self) -> Set<T> {
        Set {
            tree: self.tree.clone(),
        }
    }
}

impl<T> Set<T> {
    /// Create an empty instance of Set.
    pub fn new() -> Set<T> {
        Set { tree: Rbt::new() }
    }
}

/// Maintenance API.
impl<T> Set<T> {
    /// Return number of values in this set.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Check whether this set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Drop all values from this set.
    pub fn clear(&mut self) {
        self.tree.clear()
    }

    /// Return the underlying tree, for inspection.
    pub fn as_tree(&self) -> &Rbt<T> {
        &self.tree
    }

    /// Validate the underlying tree, refer to [Rbt::validate].
    pub fn validate(&self) -> Result<()>
    where
        T: Ord + fmt::Debug,
    {
        self.tree.validate()
    }
}

impl<T> Set<T> {
    /// Insert `value` into this set. Return a cursor positioned at the
    /// new value, or the end cursor if an equal value is already present.
    pub fn insert(&mut self, value: T) -> Cursor<'_, T>
    where
        T: Ord,
    {
        let node = self.tree.insert(value);
        Cursor {
            node,
            tree: &self.tree,
        }
    }

    /// Search for `value`. Return a cursor positioned at it, or the end
    /// cursor if not present.
    pub fn search<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.cursor_at(self.tree.search(value))
    }

    /// Check whether `value` is present in this set.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.search(value).is_some()
    }

    /// Return the smallest value, if any.
    pub fn first(&self) -> Option<&T> {
        self.tree.minimal().map(|id| self.tree.as_node(id).as_value())
    }

    /// Return the largest value, if any.
    pub fn last(&self) -> Option<&T> {
        self.tree.maximal().map(|id| self.tree.as_node(id).as_value())
    }

    /// Return a cursor at the smallest value. For an empty set this is
    /// the same as [Set::end].
    pub fn begin(&self) -> Cursor<'_, T> {
        self.cursor_at(self.tree.minimal())
    }

    /// Return a cursor one past the largest value.
    pub fn end(&self) -> Cursor<'_, T> {
        self.cursor_at(None)
    }

    /// Rebuild a cursor from [Cursor::position]. Positions stay valid
    /// across later insertions into the same set.
    pub fn cursor_at(&self, position: Option<NodeId>) -> Cursor<'_, T> {
        Cursor {
            node: position,
            tree: &self.tree,
        }
    }

    /// Return an iterator over all values in sorted order.
    ///
    /// ```
    /// use rbset::Set;
    ///
    /// let mut set: Set<String> = Set::new();
    /// set.insert("key2".to_string());
    /// set.insert("key1".to_string());
    ///
    /// for (i, value) in set.iter().enumerate() {
    ///     assert_eq!(*value, format!("key{}", i+1));
    /// }
    /// let last = set.iter().rev().next();
    /// assert_eq!(last, Some(&"key2".to_string()));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: &self.tree,
            front: self.tree.minimal(),
            back: self.tree.maximal(),
            remaining: self.tree.len(),
        }
    }
}

impl<T> FromIterator<T> for Set<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Set<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for Set<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        iter.into_iter().for_each(|value| {
            self.tree.insert(value);
        });
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> fmt::Debug for Set<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Position within a [Set], either at a value or at end.
///
/// Cursor does not own the value it points to. Two cursors compare equal
/// when they point to the same node, or are both at end. Comparing cursors
/// from different sets is meaningless.
pub struct Cursor<'a, T> {
    node: Option<NodeId>, // None for end
    tree: &'a Rbt<T>,
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> fmt::Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.node {
            Some(id) => write!(f, "Cursor<{:?}>", id),
            None => write!(f, "Cursor<end>"),
        }
    }
}

impl<'a, T> Cursor<'a, T> {
    /// Check whether cursor is at end.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// Return the node position of this cursor, None for end.
    #[inline]
    pub fn position(&self) -> Option<NodeId> {
        self.node
    }

    /// Return the value under cursor. Fails with OutOfRange at end.
    pub fn get(&self) -> Result<&'a T> {
        match self.node {
            Some(id) => Ok(self.tree.as_node(id).as_value()),
            None => err_at!(OutOfRange, msg: "dereference of end cursor"),
        }
    }

    /// Step forward to the next larger value, or to end after the maximal
    /// value. Fails with OutOfRange, if cursor is already at end.
    pub fn move_next(&mut self) -> Result<()> {
        match self.node {
            Some(id) => {
                self.node = self.tree.successor(id);
                Ok(())
            }
            None => err_at!(OutOfRange, msg: "increment of end cursor"),
        }
    }

    /// Same as [Cursor::move_next], but return the cursor as it was
    /// before moving.
    pub fn fetch_next(&mut self) -> Result<Cursor<'a, T>> {
        let old = *self;
        self.move_next()?;
        Ok(old)
    }

    /// Step backward to the next smaller value. From end, step to the
    /// maximal value. Fails with OutOfRange, and cursor is left as is,
    /// when there is no smaller value.
    pub fn move_prev(&mut self) -> Result<()> {
        let node = match self.node {
            Some(id) => self.tree.predecessor(id),
            None => self.tree.maximal(),
        };

        match (node, self.node) {
            (Some(_), _) => {
                self.node = node;
                Ok(())
            }
            (None, Some(_)) => err_at!(OutOfRange, msg: "decrement of cursor at minimal value"),
            (None, None) => err_at!(OutOfRange, msg: "decrement of end cursor on empty set"),
        }
    }

    /// Same as [Cursor::move_prev], but return the cursor as it was
    /// before moving.
    pub fn fetch_prev(&mut self) -> Result<Cursor<'a, T>> {
        let old = *self;
        self.move_prev()?;
        Ok(old)
    }
}

/// Iterator over values of a [Set], in sorted order. Also iterates in
/// reverse, refer to [DoubleEndedIterator].
pub struct Iter<'a, T> {
    tree: &'a Rbt<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(id);
        Some(self.tree.as_node(id).as_value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(id);
        Some(self.tree.as_node(id).as_value())
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

#[cfg(test)]
#[path = "set_test.rs"]
mod set_test;
