use super::*;

#[test]
fn immutable_chars_scramble_to_themselves() {
    let pool = ScramblePool::default();
    let mut rng = Rng64::new(9);
    for &c in DEFAULT_IMMUTABLE {
        for _ in 0..8 {
            assert_eq!(pool.scramble(c, &mut rng), c);
        }
    }
    assert_eq!(pool.scramble('\t', &mut rng), '\t');
    assert_eq!(pool.scramble('\u{00A0}', &mut rng), '\u{00A0}');
}

#[test]
fn mutable_chars_come_from_the_pool() {
    let pool = ScramblePool::new(&PoolChoice::Greek, "").unwrap();
    let mut rng = Rng64::new(5);
    for _ in 0..64 {
        let g = pool.scramble('x', &mut rng);
        assert!(GREEK.contains(g));
    }
}

#[test]
fn extra_immutables_are_honoured() {
    let pool = ScramblePool::new(&PoolChoice::Latin, "#x").unwrap();
    assert!(pool.is_immutable('x'));
    assert!(pool.is_immutable('#'));
    assert!(!pool.is_immutable('y'));
}

#[test]
fn empty_custom_pool_is_rejected() {
    let err = ScramblePool::new(&PoolChoice::Custom(String::new()), "").unwrap_err();
    assert!(err.to_string().contains("must not be empty"));
}

#[test]
fn pool_choice_reads_from_json() {
    let c: PoolChoice = serde_json::from_str("\"symbols\"").unwrap();
    assert_eq!(c, PoolChoice::Symbols);
    let c: PoolChoice = serde_json::from_str("{\"custom\":\"01\"}").unwrap();
    assert_eq!(c.glyphs(), "01");
}
