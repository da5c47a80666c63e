//! Reference-counted symbol interning.
//!
//! Every name in a script (path segments, parameters, class and function
//! names) is interned once per [`SymbolTable`]. A [`Symbol`] is a cheap
//! handle; two symbols from the same table are equal iff their codes are.
//!
//! The table keeps one strong reference per live symbol. A symbol whose only
//! remaining reference is the table's own is garbage, but it stays interned
//! (and keeps its code) until the owner calls [`SymbolTable::reclaim`]. Freed
//! codes are handed out again lowest-first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::FxHashMap;

struct SymbolData {
    code: u32,
    text: Box<str>,
}

/// Interned name.
///
/// Equality, ordering and hashing use the code only, so comparing symbols
/// from two different tables is meaningless. A code stays attached to its
/// text for as long as any handle to the symbol is alive.
#[derive(Clone)]
pub struct Symbol(Rc<SymbolData>);

impl Symbol {
    /// The symbol's code within its table.
    #[inline]
    pub fn code(&self) -> u32 {
        self.0.code
    }

    /// The interned text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0.text
    }

    /// True for the zero-length symbol.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.text.is_empty()
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.code == other.0.code
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.code.cmp(&other.0.code)
    }
}

impl Hash for Symbol {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.code.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}, {:?})", self.0.code, self.0.text)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.text)
    }
}

/// Symbols with fixed meaning to the scope engine and evaluator.
///
/// Held by the table for its whole lifetime, so they are never reclaimed.
#[derive(Clone, Debug)]
pub struct Reserved {
    pub empty: Symbol,
    pub parent: Symbol,
    pub global: Symbol,
    pub class: Symbol,
    pub object: Symbol,
    pub local: Symbol,
    pub func: Symbol,
    /// Constructor hook looked up in a class frame when an object is built.
    pub init: Symbol,
}

/// Interning table owned by one interpreter instance.
pub struct SymbolTable {
    /// Slot per code; `None` once reclaimed.
    slots: Vec<Option<Symbol>>,
    by_text: FxHashMap<Box<str>, u32>,
    /// Reclaimed codes, smallest on top.
    free: BinaryHeap<Reverse<u32>>,
    reserved: Reserved,
}

impl SymbolTable {
    /// Create a table with the reserved symbols pre-interned.
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(64);
        let mut by_text = FxHashMap::default();
        let mut fresh = |text: &str| {
            let code = u32::try_from(slots.len()).unwrap_or(u32::MAX);
            let sym = Symbol(Rc::new(SymbolData {
                code,
                text: text.into(),
            }));
            slots.push(Some(sym.clone()));
            by_text.insert(Box::from(text), code);
            sym
        };
        let reserved = Reserved {
            empty: fresh(""),
            parent: fresh("parent"),
            global: fresh("global"),
            class: fresh("class"),
            object: fresh("object"),
            local: fresh("local"),
            func: fresh("func"),
            init: fresh("_init"),
        };
        SymbolTable {
            slots,
            by_text,
            free: BinaryHeap::new(),
            reserved,
        }
    }

    /// Intern `text`, returning the live symbol if there is one.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(sym) = self
            .by_text
            .get(text)
            .and_then(|&code| self.slots.get(code as usize))
            .and_then(Option::as_ref)
        {
            return sym.clone();
        }

        let code = match self.free.pop() {
            Some(Reverse(code)) => code,
            None => u32::try_from(self.slots.len()).unwrap_or(u32::MAX),
        };
        let sym = Symbol(Rc::new(SymbolData {
            code,
            text: text.into(),
        }));
        let idx = code as usize;
        if idx == self.slots.len() {
            self.slots.push(Some(sym.clone()));
        } else {
            self.slots[idx] = Some(sym.clone());
        }
        self.by_text.insert(Box::from(text), code);
        sym
    }

    /// Release every symbol referenced only by this table.
    ///
    /// Returns the number of codes freed.
    pub fn reclaim(&mut self) -> usize {
        let mut freed = 0;
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let unreferenced = slot.as_ref().is_some_and(|sym| Rc::strong_count(&sym.0) == 1);
            if !unreferenced {
                continue;
            }
            if let Some(sym) = slot.take() {
                self.by_text.remove(sym.as_str());
                let code = u32::try_from(idx).unwrap_or(u32::MAX);
                self.free.push(Reverse(code));
                freed += 1;
            }
        }
        if freed > 0 {
            tracing::debug!(freed, live = self.len(), "reclaimed symbols");
        }
        freed
    }

    /// Look up a live symbol by code.
    pub fn lookup(&self, code: u32) -> Option<&Symbol> {
        self.slots.get(code as usize).and_then(Option::as_ref)
    }

    /// Number of live (not yet reclaimed) symbols.
    pub fn len(&self) -> usize {
        self.by_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty()
    }

    #[inline]
    pub fn reserved(&self) -> &Reserved {
        &self.reserved
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("live", &self.len())
            .field("free", &self.free.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
