use super::*;
use pretty_assertions::assert_eq;

#[test]
fn intern_returns_same_code_for_same_text() {
    let mut table = SymbolTable::new();
    let a = table.intern("counter");
    let b = table.intern("counter");
    assert_eq!(a, b);
    assert_eq!(a.code(), b.code());
    assert_eq!(a.as_str(), "counter");
}

#[test]
fn distinct_text_gets_distinct_codes() {
    let mut table = SymbolTable::new();
    let a = table.intern("x");
    let b = table.intern("y");
    assert_ne!(a, b);
}

#[test]
fn reserved_symbols_are_preinterned() {
    let mut table = SymbolTable::new();
    let parent = table.reserved().parent.clone();
    assert_eq!(table.intern("parent"), parent);
    assert_eq!(table.intern(""), table.reserved().empty.clone());
    assert_eq!(table.intern("_init"), table.reserved().init.clone());
}

#[test]
fn unreferenced_symbol_keeps_code_until_reclaim() {
    let mut table = SymbolTable::new();
    let code = table.intern("temp").code();
    // Dropped immediately, but not reclaimed yet.
    assert_eq!(table.intern("temp").code(), code);
}

#[test]
fn reclaim_frees_only_unreferenced_symbols() {
    let mut table = SymbolTable::new();
    let before = table.len();
    let kept = table.intern("kept");
    let _ = table.intern("dropped");
    assert_eq!(table.len(), before + 2);

    assert_eq!(table.reclaim(), 1);
    assert_eq!(table.len(), before + 1);
    assert_eq!(table.intern("kept"), kept);
}

#[test]
fn reserved_symbols_survive_reclaim() {
    let mut table = SymbolTable::new();
    let global = table.reserved().global.clone();
    drop(global);
    table.reclaim();
    assert_eq!(table.intern("global").code(), table.reserved().global.code());
}

#[test]
fn reclaimed_codes_are_reused_lowest_first() {
    let mut table = SymbolTable::new();
    let a = table.intern("a").code();
    let b = table.intern("b").code();
    let _c = table.intern("c");
    assert!(a < b);
    assert_eq!(table.reclaim(), 2);

    assert_eq!(table.intern("fresh").code(), a);
    assert_eq!(table.intern("fresher").code(), b);
}

#[test]
fn lookup_by_code() {
    let mut table = SymbolTable::new();
    let sym = table.intern("field");
    let code = sym.code();
    assert_eq!(table.lookup(code).map(Symbol::as_str), Some("field"));
    drop(sym);
    table.reclaim();
    assert!(table.lookup(code).is_none());
    assert!(table.lookup(10_000).is_none());
}

#[test]
fn display_is_text() {
    let mut table = SymbolTable::new();
    assert_eq!(table.intern("name").to_string(), "name");
}

mod proptest_interning {
    use super::super::SymbolTable;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn interning_is_identity_while_referenced(words in proptest::collection::vec("[a-z_]{0,6}", 1..32)) {
            let mut table = SymbolTable::new();
            let held: Vec<_> = words.iter().map(|w| table.intern(w)).collect();
            for (word, sym) in words.iter().zip(&held) {
                let again = table.intern(word);
                prop_assert_eq!(again.code(), sym.code());
                prop_assert_eq!(again.as_str(), word.as_str());
            }
            table.reclaim();
            for (word, sym) in words.iter().zip(&held) {
                prop_assert_eq!(table.intern(word).code(), sym.code());
            }
        }
    }
}
