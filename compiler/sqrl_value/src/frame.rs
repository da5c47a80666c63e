//! Handles to scope frames.

use std::fmt;

/// Index of a scope frame in the interpreter's arena.
///
/// Frames are never freed individually, so an id stays valid for the
/// lifetime of the interpreter that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u32);

impl FrameId {
    /// The global frame is always the first one allocated.
    pub const GLOBAL: FrameId = FrameId(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        FrameId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a frame was created for. Drives the `global`/`class`/`object`
/// path prefixes and method dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Global,
    Class,
    Object,
    Function,
    Local,
}

impl FrameKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FrameKind::Global => "global",
            FrameKind::Class => "class",
            FrameKind::Object => "object",
            FrameKind::Function => "func",
            FrameKind::Local => "local",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
