use super::*;

#[test]
fn intern_and_lookup() {
    let alpha = Symbol::intern("alpha");
    let beta = Symbol::intern("beta");
    let alpha2 = Symbol::intern("alpha");

    assert_eq!(alpha, alpha2);
    assert_ne!(alpha, beta);
    assert_eq!(alpha.as_str(), "alpha");
    assert_eq!(beta.as_str(), "beta");
}

#[test]
fn builtins_have_fixed_handles() {
    assert_eq!(Symbol::intern(""), Symbol::EMPTY);
    assert_eq!(Symbol::intern("/"), Symbol::SLASH);
    assert_eq!(Symbol::intern("null"), Symbol::NULL);
    assert_eq!(Symbol::intern("x"), Symbol::X);
    assert_eq!(Symbol::intern("y"), Symbol::Y);
    assert_eq!(Symbol::FALSE.as_str(), "false");
    assert_eq!(Symbol::TRUE.shard(), 0);
}

#[test]
fn spellings_spread_across_shards() {
    let symbols: Vec<Symbol> = (0..64)
        .map(|i| Symbol::intern(&format!("shard-spread-{i}")))
        .collect();

    let mut shards: Vec<usize> = symbols.iter().map(|s| s.shard()).collect();
    shards.sort_unstable();
    shards.dedup();
    assert!(shards.len() > 1, "all symbols landed in shard {shards:?}");

    for (i, symbol) in symbols.iter().enumerate() {
        assert_eq!(symbol.shard(), SymbolTable::shard_for(symbol.as_str()));
        assert_eq!(symbol.as_str(), format!("shard-spread-{i}"));
        assert_eq!(Symbol::intern(symbol.as_str()), *symbol);
    }
}

#[test]
fn concurrent_interning_agrees() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                (0..100)
                    .map(|i| Symbol::intern(&format!("concurrent-{i}")))
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    let results: Vec<Vec<Symbol>> = handles
        .into_iter()
        .map(|h| h.join().expect("interning thread panicked"))
        .collect();
    for other in &results[1..] {
        assert_eq!(&results[0], other);
    }
}

#[test]
fn spellings_are_case_sensitive() {
    assert_ne!(Symbol::intern("Foo"), Symbol::intern("foo"));
}

#[test]
fn display() {
    assert_eq!(Symbol::intern("gamma").to_string(), "gamma");
}
