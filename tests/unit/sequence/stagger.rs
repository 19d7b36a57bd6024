use super::*;

#[test]
fn delay_sums_the_three_levels() {
    let s = Stagger::default();
    assert_eq!(s.delay(5, 1, 3), Millis(1800.0));
    assert_eq!(s.delay(0, 0, 0), Millis::ZERO);
    assert_eq!(s.section(4), Millis(1200.0));
    assert_eq!(s.delay(4, 2, 21), Millis(1200.0 + 300.0 + 1050.0));
}

#[test]
fn field_delay_uses_the_field_base() {
    let s = Stagger::default();
    assert_eq!(s.field_delay(1, 0), Millis(300.0));
    assert_eq!(s.field_delay(1, 3), Millis(750.0));
}

#[test]
fn skip_zeroes_every_delay() {
    let s = Stagger::new(StaggerBases::default(), true);
    assert_eq!(s.delay(5, 1, 3), Millis::ZERO);
    assert_eq!(s.field_delay(7, 4), Millis::ZERO);
}

#[test]
fn custom_bases_and_validation() {
    let bases = StaggerBases {
        section_ms: 100.0,
        subsection_ms: 10.0,
        item_ms: 1.0,
        field_ms: 20.0,
    };
    let s = Stagger::new(bases, false);
    assert_eq!(s.delay(2, 3, 4), Millis(234.0));
    assert_eq!(s.field_delay(2, 1), Millis(220.0));

    let bad = StaggerBases {
        item_ms: -1.0,
        ..StaggerBases::default()
    };
    assert!(bad.validate().is_err());
}
