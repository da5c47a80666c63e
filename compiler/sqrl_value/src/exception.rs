//! Script errors as values.
//!
//! Nothing in the core unwinds the host stack: a failing operation returns
//! an [`Exception`], and every frame the exception passes through on its way
//! out adds a link naming itself. The links form the only stack trace the
//! language has.

use std::fmt;
use std::rc::Rc;

use crate::FrameId;

/// Error category and message of an exception.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    // Identifier errors
    #[error("No such identifier: {0}")]
    UnknownIdentifier(String),
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Cannot create intermediate path component: {0}")]
    MissingPath(String),
    #[error("No ancestor of type {0}")]
    NoAncestor(&'static str),

    // Type errors
    #[error("Not a context: {0}")]
    NotAContext(String),
    #[error("Expected list type for: {0}")]
    ExpectedList(String),
    #[error("Not a valid function parameter: {0}")]
    InvalidParameter(String),
    #[error("Not a valid function or operator: {0}")]
    NotCallable(String),

    // Bounds errors
    #[error("Index out of bounds: {0}")]
    NegativeIndex(i32),
    #[error("Index too far past the end of the list: {0}")]
    IndexTooLarge(i32),

    // Resource errors
    #[error("Call stack limit exceeded: {0}")]
    StackLimit(String),

    #[error("Illegal null reference")]
    NullReference,

    /// Raised by a native operator.
    #[error("{0}")]
    Operator(String),
}

struct Link {
    kind: ErrorKind,
    frame: FrameId,
    frame_name: Rc<str>,
    /// The link this one wraps; `None` at the raise site.
    inner: Option<Exception>,
}

/// Cheap-clone handle to one link of an exception chain.
#[derive(Clone)]
pub struct Exception(Rc<Link>);

impl Exception {
    /// Raise a new exception attributed to `frame`.
    pub fn new(kind: ErrorKind, frame: FrameId, frame_name: impl Into<Rc<str>>) -> Self {
        Exception(Rc::new(Link {
            kind,
            frame,
            frame_name: frame_name.into(),
            inner: None,
        }))
    }

    /// Attribute this exception to `frame` as it passes outward.
    ///
    /// A frame never wraps an exception it is already the outermost link of.
    #[must_use]
    pub fn wrap(self, frame: FrameId, frame_name: impl Into<Rc<str>>) -> Self {
        if self.0.frame == frame {
            return self;
        }
        Exception(Rc::new(Link {
            kind: self.0.kind.clone(),
            frame,
            frame_name: frame_name.into(),
            inner: Some(self),
        }))
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.0.kind
    }

    /// Frame this link is attributed to.
    #[inline]
    pub fn frame(&self) -> FrameId {
        self.0.frame
    }

    #[inline]
    pub fn frame_name(&self) -> &str {
        &self.0.frame_name
    }

    #[inline]
    pub fn inner(&self) -> Option<&Exception> {
        self.0.inner.as_ref()
    }

    /// The raise-site link.
    pub fn origin(&self) -> &Exception {
        let mut link = self;
        while let Some(inner) = link.inner() {
            link = inner;
        }
        link
    }

    /// Links from the raise site outward.
    pub fn links(&self) -> Vec<&Exception> {
        let mut links = Vec::new();
        let mut link = Some(self);
        while let Some(current) = link {
            links.push(current);
            link = current.inner();
        }
        links.reverse();
        links
    }

    /// Number of links in the chain.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut link = self;
        while let Some(inner) = link.inner() {
            depth += 1;
            link = inner;
        }
        depth
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Exception) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.links().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} from {}", link.kind(), link.frame_name())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exception")
            .field("kind", &self.0.kind)
            .field("frame", &self.0.frame)
            .field("frame_name", &self.0.frame_name)
            .field("inner", &self.0.inner)
            .finish()
    }
}

impl std::error::Error for Exception {}
