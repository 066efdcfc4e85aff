use std::fmt;

/// Handle to a node held by a [Rbt](crate::Rbt) instance.
///
/// Handles stay stable for the life of the tree, rotations only relink
/// nodes and never move them. A handle is meaningful only for the tree
/// that returned it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) fn from_index(index: usize) -> NodeId {
        NodeId(index)
    }

    #[inline]
    pub(crate) fn to_index(self) -> usize {
        self.0
    }
}

/// Color tag carried by every node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// Node corresponds to a single value in Rbt instance.
#[derive(Clone)]
pub struct Node<T> {
    pub(crate) value: T,
    pub(crate) black: bool,              // store: black or red
    pub(crate) parent: Option<NodeId>, // link: parent, None for root
    pub(crate) left: Option<NodeId>,   // link: left child
    pub(crate) right: Option<NodeId>,  // link: right child
}

impl<T> Node<T> {
    // newly inserted leaves start red, rebalancing fixes them afterward.
    pub(crate) fn new(value: T, parent: Option<NodeId>) -> Node<T> {
        Node {
            value,
            black: false,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true
    }
}

impl<T> Node<T> {
    /// Return a reference to the value stored in this node.
    #[inline]
    pub fn as_value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn to_color(&self) -> Color {
        if self.black {
            Color::Black
        } else {
            Color::Red
        }
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        !self.black
    }

    #[inline]
    pub fn to_parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn to_left(&self) -> Option<NodeId> {
        self.left
    }

    #[inline]
    pub fn to_right(&self) -> Option<NodeId> {
        self.right
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.black {
            true => write!(f, "(b)<{:?}>", self.value),
            false => write!(f, "(r)<{:?}>", self.value),
        }
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
