//! Shared-backing value sequences.
//!
//! Cloning a [`List`] shares its storage. [`List::sub`] produces a window
//! (start offset plus length) over the same storage, so writes through a
//! window are visible through every other view of it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{ErrorKind, Value};

/// Identity of a list view: its backing store plus its window.
pub(crate) type ViewKey = (*const RefCell<Vec<Value>>, Option<(usize, usize)>);

/// Pairs of views under comparison, outermost first.
pub(crate) type Visiting = Vec<(ViewKey, ViewKey)>;

#[derive(Clone, Default)]
pub struct List {
    items: Rc<RefCell<Vec<Value>>>,
    /// `(start, len)` into `items` for a window, `None` for the whole list.
    window: Option<(usize, usize)>,
}

impl List {
    /// Most `none` slots a single `put` may add before the target index.
    pub const MAX_PADDING: usize = 1 << 16;

    pub fn new() -> Self {
        List::default()
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        List {
            items: Rc::new(RefCell::new(items)),
            window: None,
        }
    }

    #[inline]
    pub fn is_window(&self) -> bool {
        self.window.is_some()
    }

    fn start(&self) -> usize {
        self.window.map_or(0, |(start, _)| start)
    }

    /// Number of visible elements.
    ///
    /// A window never reports elements beyond the end of its backing store.
    pub fn len(&self) -> usize {
        let backing = self.items.borrow().len();
        match self.window {
            Some((start, len)) => len.min(backing.saturating_sub(start)),
            None => backing,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`. Reading past the end yields `none`.
    pub fn get(&self, index: i32) -> Result<Value, ErrorKind> {
        let i = usize::try_from(index).map_err(|_| ErrorKind::NegativeIndex(index))?;
        if i >= self.len() {
            return Ok(Value::none());
        }
        Ok(self
            .items
            .borrow()
            .get(self.start() + i)
            .cloned()
            .unwrap_or_default())
    }

    /// Element at a position known to be non-negative.
    pub fn at(&self, index: usize) -> Option<Value> {
        if index >= self.len() {
            return None;
        }
        self.items.borrow().get(self.start() + index).cloned()
    }

    /// Store `value` at `index`, padding the backing store with `none`.
    ///
    /// Through a window the write lands at the window's offset in the backing
    /// store; the window's own length does not change. A write more than
    /// [`List::MAX_PADDING`] slots past the end of the backing store fails.
    pub fn put(&self, index: i32, value: Value) -> Result<(), ErrorKind> {
        let i = usize::try_from(index).map_err(|_| ErrorKind::NegativeIndex(index))?;
        let pos = self.start() + i;
        let mut items = self.items.borrow_mut();
        if pos >= items.len() {
            if pos - items.len() > Self::MAX_PADDING {
                return Err(ErrorKind::IndexTooLarge(index));
            }
            items.resize_with(pos + 1, Value::none);
        }
        items[pos] = value;
        Ok(())
    }

    /// Append after the last visible element.
    pub fn push(&mut self, value: Value) {
        match &mut self.window {
            None => self.items.borrow_mut().push(value),
            Some((start, len)) => {
                let mut items = self.items.borrow_mut();
                let pos = (*start + *len).min(items.len());
                items.insert(pos, value);
                *len = pos - *start + 1;
            }
        }
    }

    /// Window over `len` elements from `start` (to the end when `None`),
    /// clamped to the visible range.
    pub fn sub(&self, start: usize, len: Option<usize>) -> List {
        let visible = self.len();
        let start = start.min(visible);
        let remaining = visible - start;
        let len = len.map_or(remaining, |len| len.min(remaining));
        List {
            items: Rc::clone(&self.items),
            window: Some((self.start() + start, len)),
        }
    }

    /// Snapshot of the visible elements.
    pub fn values(&self) -> Vec<Value> {
        let start = self.start();
        let len = self.len();
        self.items.borrow()[start..start + len].to_vec()
    }

    pub fn first(&self) -> Option<Value> {
        self.at(0)
    }

    /// Shallow copy into fresh storage.
    #[must_use]
    pub fn copy(&self) -> List {
        List::from_vec(self.values())
    }

    /// True when both views share one backing store.
    #[inline]
    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }

    /// Backing store and window, which together identify a view.
    pub(crate) fn view_key(&self) -> ViewKey {
        (Rc::as_ptr(&self.items), self.window)
    }

    /// Element-wise structural equality.
    pub fn structural_eq(&self, other: &List) -> bool {
        self.eq_visiting(other, &mut Vec::new())
    }

    /// A pair of views already being compared further out counts as equal,
    /// so a list that contains itself terminates.
    pub(crate) fn eq_visiting(&self, other: &List, visiting: &mut Visiting) -> bool {
        if self.ptr_eq(other) && self.window == other.window {
            return true;
        }
        let pair = (self.view_key(), other.view_key());
        if visiting.contains(&pair) {
            return true;
        }
        let (a, b) = (self.values(), other.values());
        if a.len() != b.len() {
            return false;
        }
        visiting.push(pair);
        let equal = a.iter().zip(&b).all(|(x, y)| x.eq_visiting(y, visiting));
        visiting.pop();
        equal
    }

    /// Lexicographic ordering under [`Value::less_than`].
    pub fn less_than(&self, other: &List) -> bool {
        self.lt_visiting(other, &mut Vec::new())
    }

    /// A pair of views already being ordered further out is never less.
    pub(crate) fn lt_visiting(&self, other: &List, visiting: &mut Visiting) -> bool {
        let pair = (self.view_key(), other.view_key());
        if visiting.contains(&pair) {
            return false;
        }
        let (a, b) = (self.values(), other.values());
        visiting.push(pair);
        let mut result = None;
        for (x, y) in a.iter().zip(&b) {
            if x.lt_visiting(y, visiting) {
                result = Some(true);
                break;
            }
            if y.lt_visiting(x, visiting) {
                result = Some(false);
                break;
            }
        }
        visiting.pop();
        result.unwrap_or(a.len() < b.len())
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        List::from_vec(items)
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List::from_vec(iter.into_iter().collect())
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Value::list(self.clone()).to_print_string())
    }
}
