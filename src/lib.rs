//! Package implement an ordered set on top of a classic red-black tree.
//!
//! Quoting from [Wikipedia][wiki-rbt]:
//!
//! > A red-black tree is a self-balancing binary search tree data
//! > structure noted for fast storage and retrieval of ordered information.
//! > The nodes in a red-black tree hold an extra "color" bit, often drawn as
//! > red and black, which help ensure that the tree is always approximately
//! > balanced.
//!
//! Following types are exported:
//!
//! * [Set] implements an ordered-set with bidirectional [Cursor]s.
//! * [Rbt] implements the red-black tree engine, parent-linked, that
//!   [Set] wraps. Nodes are addressed by [NodeId] handles.
//!
//! Simple ordered-set for single threaded use case
//! -----------------------------------------------
//!
//! - Parametrised over `value-type`, which must be totally ordered.
//! - Insert and search, via insert() and search() api, both returning
//!   a [Cursor].
//! - Duplicate values are rejected, insert() then returns the end cursor.
//! - Forward and reverse iteration, via cursors or [Set::iter].
//! - Cloning a set deep-copies the tree, nodes are never shared.
//! - No removal.
//! - Not thread safe.
//!
//! Constructing a new [Set] instance, insert and search:
//!
//! ```
//! use rbset::Set;
//!
//! let mut set: Set<i32> = Set::new();
//! assert_eq!(set.len(), 0);
//! assert_eq!(set.is_empty(), true);
//!
//! assert_eq!(*set.insert(10).get().unwrap(), 10);
//! assert_eq!(*set.insert(5).get().unwrap(), 5);
//! assert!(set.insert(10).is_end()); // duplicate
//! assert_eq!(set.len(), 2);
//!
//! assert!(set.search(&5) != set.end());
//! assert!(set.search(&7) == set.end());
//!
//! let values: Vec<i32> = set.iter().cloned().collect();
//! assert_eq!(values, vec![5, 10]);
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(OutOfRange, msg: format!("bad cursor"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, tree.validate());
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, tree.validate(), format!("after insert {}", n));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod node;
mod rbt;
mod set;

pub use node::{Color, Node, NodeId};
pub use rbt::Rbt;
pub use set::{Cursor, Iter, Set};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    /// Tree failed validation, invariants are broken.
    Fatal(String, String),
    /// Cursor was dereferenced or moved beyond either end of the set.
    OutOfRange(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            OutOfRange(p, msg) => write!(f, "{} OutOfRange: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
