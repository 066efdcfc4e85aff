//! Module implement the red-black tree engine, [Rbt].
//!
//! Unlike the left-leaning variant, this is the classic red-black tree
//! with parent links, as described in CLRS. Nodes are held in a pool
//! owned by the tree and linked through [NodeId] handles, so navigation
//! upward (predecessor, successor, rebalancing) needs no stack.
//!
//! Every call to [Rbt::insert] leaves the tree satisfying:
//!
//! * Root is black.
//! * Absent children count as black.
//! * A red node never has a red child.
//! * Every path from a node down to an absent child passes through the
//!   same number of black nodes.
//! * Values in left subtree are less than the node's value, values in
//!   right subtree are greater.
//!
//! Removal is not supported.

use log::{debug, trace};

use std::{
    borrow::Borrow,
    cmp::{self, Ord, Ordering},
    fmt,
};

use crate::{
    node::{Node, NodeId},
    Error, Result,
};

/// Rbt manage a single instance of in-memory red-black tree.
pub struct Rbt<T> {
    nodes: Vec<Node<T>>,  // pool, indexed by NodeId
    root: Option<NodeId>, // None for empty tree
    n_count: usize,       // number of values in the tree.
}

impl<T> Default for Rbt<T> {
    fn default() -> Rbt<T> {
        Rbt::new()
    }
}

// Pool is copied slot by slot, handles are positions in the pool, so the
// copy keeps the same links, colors and shape without sharing storage.
impl<T> Clone for Rbt<T>
where
    T: Clone,
{
    fn clone(&self) -> Rbt<T> {
        if self.n_count > 0 {
            debug!("deep copy of tree with {} nodes", self.n_count);
        }
        Rbt {
            nodes: self.nodes.iter().cloned().collect(),
            root: self.root,
            n_count: self.n_count,
        }
    }
}

impl<T> Rbt<T> {
    /// Create an empty instance of Rbt.
    pub fn new() -> Rbt<T> {
        Rbt {
            nodes: Vec::default(),
            root: None,
            n_count: Default::default(),
        }
    }
}

/// Maintenance API.
impl<T> Rbt<T> {
    /// Return number of values in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this tree is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return the root node, None if tree is empty.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Return the node for handle `id`.
    ///
    /// Panics if `id` was not returned by this instance.
    #[inline]
    pub fn as_node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.to_index()]
    }

    /// Drop all values, leaving an empty tree behind.
    pub fn clear(&mut self) {
        debug!("clear tree with {} nodes", self.n_count);
        self.nodes.clear();
        self.root = None;
        self.n_count = 0;
    }

    /// Return the number of nodes along the longest path from root to
    /// a leaf, zero for an empty tree.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Validate tree with following rules:
    ///
    /// * Root is black and has no parent.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Parent link of every node point back to the node holding it.
    /// * Make sure values are in sorted order.
    /// * Number of reachable nodes match len().
    pub fn validate(&self) -> Result<()>
    where
        T: Ord + fmt::Debug,
    {
        let root = match self.root {
            Some(root) => root,
            None if self.n_count == 0 => return Ok(()),
            None => return err_at!(Fatal, msg: "no root, but count {}", self.n_count),
        };

        let rnode = self.as_node(root);
        if rnode.is_red() {
            return err_at!(Fatal, msg: "red root {:?}", rnode);
        }

        let (n_count, n_blacks) = (0, 0);
        let (n_count, _) = self.validate_tree(Some(root), None, false, n_count, n_blacks)?;
        if n_count != self.n_count {
            return err_at!(Fatal, msg: "mismatch in count {} != {}", n_count, self.n_count);
        }

        // in-order walk, catches ordering faults deeper than one level.
        let mut n_walk = 0;
        let mut node = self.minimal();
        while let Some(id) = node {
            n_walk += 1;
            node = self.successor(id);
            if let Some(next) = node {
                let (a, b) = (self.as_node(id).as_value(), self.as_node(next).as_value());
                if a.ge(b) {
                    return err_at!(Fatal, msg: "sort {:?} before {:?}", a, b);
                }
            }
        }
        if n_walk != self.n_count {
            return err_at!(Fatal, msg: "mismatch in walk {} != {}", n_walk, self.n_count);
        }

        Ok(())
    }

    #[allow(dead_code)]
    #[cfg(test)]
    pub fn pretty_print(&self)
    where
        T: fmt::Debug,
    {
        self.pretty_print_node(self.root, "".to_string())
    }
}

/// Navigation API.
impl<T> Rbt<T> {
    /// Search for `value`, return its node if present.
    pub fn search<Q>(&self, value: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root;
        while let Some(id) = node {
            let nref = self.as_node(id);
            node = match nref.value.borrow().cmp(value) {
                Ordering::Less => nref.right,
                Ordering::Greater => nref.left,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Return node holding the smallest value, None if tree is empty.
    pub fn minimal(&self) -> Option<NodeId> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Return node holding the largest value, None if tree is empty.
    pub fn maximal(&self) -> Option<NodeId> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Return node holding the next smaller value, None if `id` holds
    /// the minimal value.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.as_node(id).left {
            return Some(self.rightmost(left));
        }

        // first ancestor reached from its right side.
        let (mut current, mut parent) = (id, self.as_node(id).parent);
        while let Some(pid) = parent {
            if self.as_node(pid).right == Some(current) {
                return Some(pid);
            }
            current = pid;
            parent = self.as_node(pid).parent;
        }
        None
    }

    /// Return node holding the next larger value, None if `id` holds
    /// the maximal value.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.as_node(id).right {
            return Some(self.leftmost(right));
        }

        // first ancestor reached from its left side.
        let (mut current, mut parent) = (id, self.as_node(id).parent);
        while let Some(pid) = parent {
            if self.as_node(pid).left == Some(current) {
                return Some(pid);
            }
            current = pid;
            parent = self.as_node(pid).parent;
        }
        None
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.as_node(id).left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.as_node(id).right {
            id = right;
        }
        id
    }
}

/// Write API.
impl<T> Rbt<T> {
    /// Insert `value` into the tree and return its new node. If an equal
    /// value is already present, tree is left untouched and None is
    /// returned.
    pub fn insert(&mut self, value: T) -> Option<NodeId>
    where
        T: Ord,
    {
        let (mut parent, mut is_left) = (None, false);

        let mut node = self.root;
        while let Some(id) = node {
            let nref = self.as_node(id);
            node = match value.cmp(&nref.value) {
                Ordering::Less => {
                    is_left = true;
                    nref.left
                }
                Ordering::Greater => {
                    is_left = false;
                    nref.right
                }
                Ordering::Equal => return None,
            };
            parent = Some(id);
        }

        let inserted = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(value, parent));
        match parent {
            None => self.root = Some(inserted),
            Some(pid) if is_left => self.as_mut_node(pid).left = Some(inserted),
            Some(pid) => self.as_mut_node(pid).right = Some(inserted),
        }
        self.n_count += 1;

        self.insert_rebalance(inserted);

        Some(inserted)
    }
}

impl<T> Rbt<T> {
    #[inline]
    fn as_mut_node(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.to_index()]
    }

    #[inline]
    fn is_red(&self, node: Option<NodeId>) -> bool {
        node.map_or(false, |id| self.as_node(id).is_red())
    }

    // Only violation possible on entry to each round is `node` and its
    // parent both being red.
    fn insert_rebalance(&mut self, inserted: NodeId) {
        let mut node = inserted;

        loop {
            let mut parent = match self.as_node(node).parent {
                Some(parent) if self.is_red(Some(parent)) => parent,
                _ => break,
            };
            // root is black, hence a red parent always has a parent.
            let grand = match self.as_node(parent).parent {
                Some(grand) => grand,
                None => break,
            };

            if self.as_node(grand).left == Some(parent) {
                let uncle = self.as_node(grand).right;
                match uncle {
                    Some(uncle) if self.is_red(Some(uncle)) => {
                        trace!("rebalance {:?}: red uncle {:?}", node, uncle);
                        self.as_mut_node(parent).set_black();
                        self.as_mut_node(uncle).set_black();
                        self.as_mut_node(grand).set_red();
                        node = grand;
                    }
                    _ => {
                        if self.as_node(parent).right == Some(node) {
                            trace!("rebalance {:?}: zig-zag under {:?}", node, parent);
                            self.left_rotate(parent);
                            std::mem::swap(&mut node, &mut parent);
                        }
                        trace!("rebalance {:?}: straight under {:?}", node, parent);
                        self.as_mut_node(parent).set_black();
                        self.as_mut_node(grand).set_red();
                        self.right_rotate(grand);
                    }
                }
            } else {
                let uncle = self.as_node(grand).left;
                match uncle {
                    Some(uncle) if self.is_red(Some(uncle)) => {
                        trace!("rebalance {:?}: red uncle {:?}", node, uncle);
                        self.as_mut_node(parent).set_black();
                        self.as_mut_node(uncle).set_black();
                        self.as_mut_node(grand).set_red();
                        node = grand;
                    }
                    _ => {
                        if self.as_node(parent).left == Some(node) {
                            trace!("rebalance {:?}: zag-zig under {:?}", node, parent);
                            self.right_rotate(parent);
                            std::mem::swap(&mut node, &mut parent);
                        }
                        trace!("rebalance {:?}: straight under {:?}", node, parent);
                        self.as_mut_node(parent).set_black();
                        self.as_mut_node(grand).set_red();
                        self.left_rotate(grand);
                    }
                }
            }
        }

        if let Some(root) = self.root {
            self.as_mut_node(root).set_black();
        }
    }

    //              (p)                       (p)
    //               |                         |
    //             upper                     lower
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //          left    lower            upper    lr
    //                  / \              /  \
    //            middle   lr         left   middle
    //
    fn left_rotate(&mut self, upper: NodeId) {
        let lower = match self.as_node(upper).right {
            Some(lower) => lower,
            None => panic!("left_rotate(): no right child to promote ? Call the programmer"),
        };
        trace!("left_rotate upper:{:?} lower:{:?}", upper, lower);

        let parent = self.as_node(upper).parent;
        let middle = self.as_node(lower).left;

        self.replace_child(parent, upper, lower);

        let lnode = self.as_mut_node(lower);
        lnode.parent = parent;
        lnode.left = Some(upper);

        let unode = self.as_mut_node(upper);
        unode.parent = Some(lower);
        unode.right = middle;

        if let Some(middle) = middle {
            self.as_mut_node(middle).parent = Some(upper);
        }
    }

    //              (p)                       (p)
    //               |                         |
    //             upper                     lower
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //         lower    right              ll    upper
    //          / \                              /  \
    //        ll   middle                   middle   right
    //
    fn right_rotate(&mut self, upper: NodeId) {
        let lower = match self.as_node(upper).left {
            Some(lower) => lower,
            None => panic!("right_rotate(): no left child to promote ? Call the programmer"),
        };
        trace!("right_rotate upper:{:?} lower:{:?}", upper, lower);

        let parent = self.as_node(upper).parent;
        let middle = self.as_node(lower).right;

        self.replace_child(parent, upper, lower);

        let lnode = self.as_mut_node(lower);
        lnode.parent = parent;
        lnode.right = Some(upper);

        let unode = self.as_mut_node(upper);
        unode.parent = Some(lower);
        unode.left = middle;

        if let Some(middle) = middle {
            self.as_mut_node(middle).parent = Some(upper);
        }
    }

    // Point `parent`'s link, or root if `parent` is None, from `old` to `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = Some(new),
            Some(pid) => {
                let pnode = self.as_mut_node(pid);
                if pnode.left == Some(old) {
                    pnode.left = Some(new)
                } else {
                    pnode.right = Some(new)
                }
            }
        }
    }

    fn subtree_height(&self, node: Option<NodeId>) -> usize {
        match node {
            Some(id) => {
                let nref = self.as_node(id);
                let (l, r) = (self.subtree_height(nref.left), self.subtree_height(nref.right));
                1 + cmp::max(l, r)
            }
            None => 0,
        }
    }

    fn validate_tree(
        &self,
        node: Option<NodeId>,
        parent: Option<NodeId>,
        fromred: bool,
        mut n_count: usize,
        mut n_blacks: usize,
    ) -> Result<(usize, usize)>
    where
        T: Ord + fmt::Debug,
    {
        let id = match node {
            Some(id) => id,
            None => return Ok((n_count, n_blacks)),
        };
        n_count += 1;

        let nref = self.as_node(id);
        if nref.parent != parent {
            return err_at!(Fatal, msg: "parent link {:?} != {:?}", nref.parent, parent);
        }

        let red = nref.is_red();
        if fromred && red {
            return err_at!(Fatal, msg: "consecutive reds at {:?}", nref);
        }

        if !red {
            n_blacks += 1;
        }

        let (left, rigt) = (nref.left, nref.right);
        let (n_count, lb) = self.validate_tree(left, node, red, n_count, n_blacks)?;
        let (n_count, rb) = self.validate_tree(rigt, node, red, n_count, n_blacks)?;
        if lb != rb {
            return err_at!(Fatal, msg: "unbalanced blacks {} {}", lb, rb);
        }

        if let Some(left) = left.map(|id| self.as_node(id)) {
            if left.value.ge(&nref.value) {
                return err_at!(Fatal, msg: "sort left:{:?} parent:{:?}", left, nref);
            }
        }
        if let Some(rigt) = rigt.map(|id| self.as_node(id)) {
            if rigt.value.le(&nref.value) {
                return err_at!(Fatal, msg: "sort right:{:?} parent:{:?}", rigt, nref);
            }
        }

        Ok((n_count, lb))
    }

    #[allow(dead_code)]
    #[cfg(test)]
    fn pretty_print_node(&self, node: Option<NodeId>, mut prefix: String)
    where
        T: fmt::Debug,
    {
        if let Some(id) = node {
            let nref = self.as_node(id);
            println!("{}{:?}", prefix, nref);
            prefix.push_str("  ");
            self.pretty_print_node(nref.left, prefix.clone());
            self.pretty_print_node(nref.right, prefix);
        }
    }
}

#[cfg(test)]
#[path = "rbt_test.rs"]
mod rbt_test;
