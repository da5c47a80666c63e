//! Scope frames.
//!
//! Frames live in one arena per interpreter and refer to each other by
//! [`FrameId`]. A frame's parent is an index, never an owning link, so class
//! and object frames can point back up the tree without reference cycles.
//! Nothing is freed until the interpreter is dropped.

use rustc_hash::FxHashMap;

use sqrl_value::{FrameId, FrameKind, Symbol, Value};

pub(crate) struct Frame {
    parent: Option<FrameId>,
    kind: FrameKind,
    name: Option<Symbol>,
    /// Number of function frames between this frame and the global one.
    depth: u32,
    bindings: FxHashMap<Symbol, Value>,
}

impl Frame {
    #[inline]
    pub fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    #[inline]
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Name used in exception chains.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) => name.as_str(),
            None => self.kind.as_str(),
        }
    }

    #[inline]
    pub fn lookup(&self, sym: &Symbol) -> Option<&Value> {
        self.bindings.get(sym)
    }

    #[inline]
    pub fn contains(&self, sym: &Symbol) -> bool {
        self.bindings.contains_key(sym)
    }

    #[inline]
    pub fn bind(&mut self, sym: Symbol, value: Value) {
        self.bindings.insert(sym, value);
    }
}

pub(crate) struct Frames {
    frames: Vec<Frame>,
}

impl Frames {
    /// Arena holding only the global frame.
    pub fn new() -> Self {
        Frames {
            frames: vec![Frame {
                parent: None,
                kind: FrameKind::Global,
                name: None,
                depth: 0,
                bindings: FxHashMap::default(),
            }],
        }
    }

    pub fn alloc(
        &mut self,
        parent: FrameId,
        kind: FrameKind,
        name: Option<Symbol>,
        depth: u32,
    ) -> FrameId {
        let id = FrameId::new(u32::try_from(self.frames.len()).unwrap_or(u32::MAX));
        self.frames.push(Frame {
            parent: Some(parent),
            kind,
            name,
            depth,
            bindings: FxHashMap::default(),
        });
        tracing::trace!(frame = %id, parent = %parent, %kind, depth, "frame created");
        id
    }

    #[inline]
    pub fn get(&self, id: FrameId) -> &Frame {
        &self.frames[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: FrameId) -> &mut Frame {
        &mut self.frames[id.index()]
    }

    /// Parent of `id`; the global frame is its own parent.
    pub fn parent_or_self(&self, id: FrameId) -> FrameId {
        self.get(id).parent.unwrap_or(id)
    }

    /// Nearest frame of `kind`, starting with `id` itself.
    pub fn find_ancestor(&self, id: FrameId, kind: FrameKind) -> Option<FrameId> {
        let mut current = Some(id);
        while let Some(frame) = current {
            if self.get(frame).kind == kind {
                return Some(frame);
            }
            current = self.get(frame).parent;
        }
        None
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.frames.len()
    }
}
