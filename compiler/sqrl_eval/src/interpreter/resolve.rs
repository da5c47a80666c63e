//! Path resolution: which frame owns a binding.
//!
//! Resolution returns two frames. `exec` is where an assignment binds (and
//! where a method's call frame is parented); `func` is the frame whose table
//! actually holds the value. They differ only when an object reads a name
//! its class defines, which is how instances see class methods without
//! copying them.
//!
//! Reading walks up the parent chain; writing never does, so assigning an
//! unknown name declares it in the frame it was resolved from.
//!
//! Prefixes are recognised only when more segments follow:
//!
//! | prefix   | continue from                         |
//! |----------|---------------------------------------|
//! | `parent` | the parent frame (global: itself)     |
//! | `global` | nearest `global` frame                |
//! | `class`  | nearest `class` frame                 |
//! | `object` | nearest `object` frame                |
//! | `local`  | this frame only, no upward search     |
//!
//! Subscripts in a path are always evaluated in the caller's frame, not in
//! the frame being searched.

use sqrl_value::{
    ErrorKind, EvalResult, FrameId, FrameKind, Identifier, Index, Resolution, Symbol, Value,
};

use super::Interpreter;

enum Prefix {
    Parent,
    Ancestor(FrameKind),
    Local,
}

impl Interpreter {
    /// Resolve `path` starting at `frame`, which is also the caller.
    pub fn find_owner(
        &mut self,
        path: &Identifier,
        frame: FrameId,
        for_writing: bool,
    ) -> EvalResult<Resolution> {
        self.resolve(path, frame, frame, for_writing)
    }

    /// Resolve `path` within `frame` alone.
    pub fn find_owner_local(
        &mut self,
        path: &Identifier,
        frame: FrameId,
        for_writing: bool,
    ) -> EvalResult<Resolution> {
        self.resolve_local(path, frame, frame, for_writing)
    }

    /// Nearest frame of `kind` from `frame` upward, `frame` included.
    pub fn find_ancestor(&self, frame: FrameId, kind: FrameKind) -> EvalResult<FrameId> {
        self.frames
            .find_ancestor(frame, kind)
            .ok_or_else(|| self.raise(ErrorKind::NoAncestor(kind.as_str()), frame))
    }

    fn prefix(&self, sym: &Symbol) -> Option<Prefix> {
        let reserved = self.symbols.reserved();
        if *sym == reserved.parent {
            Some(Prefix::Parent)
        } else if *sym == reserved.global {
            Some(Prefix::Ancestor(FrameKind::Global))
        } else if *sym == reserved.class {
            Some(Prefix::Ancestor(FrameKind::Class))
        } else if *sym == reserved.object {
            Some(Prefix::Ancestor(FrameKind::Object))
        } else if *sym == reserved.local {
            Some(Prefix::Local)
        } else {
            None
        }
    }

    fn resolve(
        &mut self,
        path: &Identifier,
        mut at: FrameId,
        caller: FrameId,
        for_writing: bool,
    ) -> EvalResult<Resolution> {
        let Some(segment) = path.first() else {
            return Err(self.raise(
                ErrorKind::InvalidIdentifier(path.original().to_string()),
                at,
            ));
        };

        if let Some(rest) = path.next() {
            match self.prefix(&segment.sym) {
                Some(Prefix::Parent) => {
                    let parent = self.frames.parent_or_self(at);
                    return self.resolve(&rest, parent, caller, for_writing);
                }
                Some(Prefix::Ancestor(kind)) => {
                    let ancestor = self.find_ancestor(at, kind)?;
                    return self.resolve(&rest, ancestor, caller, for_writing);
                }
                Some(Prefix::Local) => {
                    return self.resolve_local(&rest, at, caller, for_writing);
                }
                None => {}
            }
        }

        // Reads retry in each parent in turn; writes never leave `at`.
        loop {
            tracing::trace!(%path, frame = %at, for_writing, "find_owner");
            let found = self.frames.get(at).lookup(&segment.sym).cloned();
            match found {
                Some(value) => {
                    return match path.next() {
                        None => Ok(Resolution::at(at)),
                        Some(rest) => {
                            let nested = self.descend(value, segment, path, at, caller)?;
                            self.resolve(&rest, nested, caller, for_writing)
                        }
                    };
                }
                None if for_writing => {
                    return if path.has_next() {
                        Err(self.raise(ErrorKind::MissingPath(path.original().to_string()), at))
                    } else {
                        Ok(Resolution::at(at))
                    };
                }
                None => {
                    if !path.has_next() {
                        if let Some(class) = self.inherited_from(at, &segment.sym) {
                            return Ok(Resolution {
                                exec: at,
                                func: class,
                            });
                        }
                    }
                    match self.frames.get(at).parent() {
                        Some(parent) => at = parent,
                        None => {
                            return Err(self.raise(
                                ErrorKind::UnknownIdentifier(path.original().to_string()),
                                caller,
                            ));
                        }
                    }
                }
            }
        }
    }

    fn resolve_local(
        &mut self,
        path: &Identifier,
        at: FrameId,
        caller: FrameId,
        for_writing: bool,
    ) -> EvalResult<Resolution> {
        let Some(segment) = path.first() else {
            return Err(self.raise(
                ErrorKind::InvalidIdentifier(path.original().to_string()),
                at,
            ));
        };
        tracing::trace!(%path, frame = %at, for_writing, "find_owner_local");

        let found = self.frames.get(at).lookup(&segment.sym).cloned();
        match (found, path.next()) {
            (Some(_), None) => Ok(Resolution::at(at)),
            (Some(value), Some(rest)) => {
                let nested = self.descend(value, segment, path, at, caller)?;
                self.resolve_local(&rest, nested, caller, for_writing)
            }
            (None, None) if for_writing => Ok(Resolution::at(at)),
            (None, Some(_)) if for_writing => {
                Err(self.raise(ErrorKind::MissingPath(path.original().to_string()), at))
            }
            (None, _) => Err(self.raise(
                ErrorKind::UnknownIdentifier(path.original().to_string()),
                at,
            )),
        }
    }

    /// Class frame supplying `sym` to the object frame `at`, if any.
    fn inherited_from(&self, at: FrameId, sym: &Symbol) -> Option<FrameId> {
        let frame = self.frames.get(at);
        if frame.kind() != FrameKind::Object {
            return None;
        }
        let class = frame.parent()?;
        let class_frame = self.frames.get(class);
        (class_frame.kind() == FrameKind::Class && class_frame.contains(sym)).then_some(class)
    }

    /// Frame to continue resolving in after `segment` matched `value`.
    ///
    /// A subscripted segment must name a list.
    fn descend(
        &mut self,
        value: Value,
        segment: &Index,
        path: &Identifier,
        at: FrameId,
        caller: FrameId,
    ) -> EvalResult<FrameId> {
        let value = match &segment.index {
            Some(index) => {
                let Some(list) = value.as_list() else {
                    return Err(self.raise(ErrorKind::ExpectedList(path.to_string()), caller));
                };
                let i = self.evaluate(index, caller)?.to_int();
                list.get(i).map_err(|kind| self.raise(kind, caller))?
            }
            None => value,
        };
        value
            .context()
            .ok_or_else(|| self.raise(ErrorKind::NotAContext(path.to_string()), at))
    }

    /// Read the binding `path` resolves to, applying a final subscript.
    pub fn get(&mut self, path: &Identifier, frame: FrameId) -> EvalResult {
        let resolution = self.find_owner(path, frame, false)?;
        self.read_resolved(path, resolution, frame)
    }

    pub(crate) fn read_resolved(
        &mut self,
        path: &Identifier,
        resolution: Resolution,
        caller: FrameId,
    ) -> EvalResult {
        let Some(last) = path.last() else {
            return Err(self.raise(
                ErrorKind::InvalidIdentifier(path.original().to_string()),
                caller,
            ));
        };
        let value = self
            .frames
            .get(resolution.func)
            .lookup(&last.sym)
            .cloned()
            .unwrap_or_default();
        let Some(index) = &last.index else {
            return Ok(value);
        };
        let Some(list) = value.as_list() else {
            return Err(self.raise(ErrorKind::ExpectedList(path.to_string()), caller));
        };
        let i = self.evaluate(index, caller)?.to_int();
        list.get(i).map_err(|kind| self.raise(kind, caller))
    }

    /// Bind `value` at `path`.
    ///
    /// A plain final segment binds in the resolved frame. A subscripted one
    /// stores into the list already bound there.
    pub fn set(&mut self, path: &Identifier, value: Value, frame: FrameId) -> EvalResult<()> {
        let Some(last) = path.last() else {
            return Err(self.raise(
                ErrorKind::InvalidIdentifier(path.original().to_string()),
                frame,
            ));
        };

        if let Some(index) = &last.index {
            let resolution = self.find_owner(path, frame, false)?;
            let current = self.frames.get(resolution.func).lookup(&last.sym).cloned();
            let Some(list) = current.as_ref().and_then(Value::as_list) else {
                return Err(self.raise(ErrorKind::ExpectedList(path.to_string()), frame));
            };
            let i = self.evaluate(index, frame)?.to_int();
            return list.put(i, value).map_err(|kind| self.raise(kind, frame));
        }

        let resolution = self.find_owner(path, frame, true)?;
        tracing::trace!(%path, frame = %resolution.exec, "bind");
        self.frames.get_mut(resolution.exec).bind(last.sym.clone(), value);
        Ok(())
    }
}
