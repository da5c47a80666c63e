//! Dotted identifier paths.
//!
//! `a.b[0].c` parses into three [`Index`] segments. Resolution consumes a
//! path one segment at a time through [`Identifier::next`], which shares the
//! segment storage instead of copying it.

use std::fmt;
use std::rc::Rc;

use crate::{Symbol, Value};

/// One path segment: a name plus an optional subscript expression.
#[derive(Clone, Debug)]
pub struct Index {
    pub sym: Symbol,
    /// Evaluated against the caller's frame, never the frame being searched.
    pub index: Option<Value>,
}

impl Index {
    pub fn new(sym: Symbol) -> Self {
        Index { sym, index: None }
    }

    pub fn subscripted(sym: Symbol, index: Value) -> Self {
        Index {
            sym,
            index: Some(index),
        }
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.sym == other.sym
            && match (&self.index, &other.index) {
                (None, None) => true,
                (Some(a), Some(b)) => a.structural_eq(b),
                _ => false,
            }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sym.as_str())?;
        if let Some(index) = &self.index {
            write!(f, "[{}]", index.to_print_string())?;
        }
        Ok(())
    }
}

/// A view over a shared sequence of path segments.
///
/// The view starts at `offset`; [`Identifier::original`] recovers the full
/// path for diagnostics. A zero-segment identifier is legal (it comes from
/// an empty quoted token) and is exhausted from the start.
#[derive(Clone)]
pub struct Identifier {
    segments: Rc<[Index]>,
    offset: usize,
}

impl Identifier {
    pub fn new(segments: Vec<Index>) -> Self {
        Identifier {
            segments: segments.into(),
            offset: 0,
        }
    }

    /// Current segment, `None` once exhausted.
    #[inline]
    pub fn first(&self) -> Option<&Index> {
        self.segments.get(self.offset)
    }

    /// Final segment of the path.
    #[inline]
    pub fn last(&self) -> Option<&Index> {
        if self.is_exhausted() {
            None
        } else {
            self.segments.last()
        }
    }

    /// True when at least one segment follows the current one.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.offset + 1 < self.segments.len()
    }

    /// Tail view without the current segment.
    ///
    /// `None` for a single remaining segment, so a produced tail is never
    /// empty.
    pub fn next(&self) -> Option<Identifier> {
        self.has_next().then(|| Identifier {
            segments: Rc::clone(&self.segments),
            offset: self.offset + 1,
        })
    }

    /// The full path this view was taken from.
    pub fn original(&self) -> Identifier {
        Identifier {
            segments: Rc::clone(&self.segments),
            offset: 0,
        }
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.segments.len()
    }

    /// Remaining segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len().saturating_sub(self.offset)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_exhausted()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Index> {
        self.segments.iter().skip(self.offset)
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({self})")
    }
}
