use super::*;

fn plan(text: &str, variant: TimingVariant) -> ScramblePlan {
    build_plan(text, variant, &ScramblePool::default(), &mut Rng64::new(11))
}

#[test]
fn two_char_plan_matches_sweep_and_lag() {
    let p = plan("AB", TimingVariant::default());
    assert_eq!(p.len(), 2);
    assert_eq!(p.states[0].gibberish_at, Millis(0.0));
    assert_eq!(p.states[0].reveal_at, Millis(3800.0));
    assert_eq!(p.states[1].gibberish_at, Millis(200.0));
    assert_eq!(p.states[1].reveal_at, Millis(4000.0));
    assert_eq!(p.total, Millis(4000.0));
}

#[test]
fn empty_text_has_zero_duration() {
    for v in [
        TimingVariant::default(),
        TimingVariant::cycled(),
        TimingVariant::typewriter(),
    ] {
        let p = plan("", v);
        assert!(p.is_empty());
        assert_eq!(p.total, Millis::ZERO);
        assert_eq!(p.frame_at(Millis::ZERO, &ScramblePool::default(), &mut Rng64::new(1)), "");
    }
}

#[test]
fn timelines_are_ordered() {
    for v in [
        TimingVariant::default(),
        TimingVariant::cycled(),
        TimingVariant::typewriter(),
    ] {
        let p = plan("SAIRAMKUMAR M, BACKEND ENGINEER", v);
        assert_eq!(p.len(), "SAIRAMKUMAR M, BACKEND ENGINEER".chars().count());
        for w in p.states.windows(2) {
            assert!(w[0].gibberish_at <= w[1].gibberish_at);
            assert!(w[0].reveal_at <= w[1].reveal_at);
        }
        for s in &p.states {
            assert!(s.gibberish_at < s.reveal_at);
        }
    }
}

#[test]
fn immutable_characters_keep_their_shape() {
    let p = plan("a.b c-d", TimingVariant::default());
    let scrambled: String = p.states.iter().map(|s| s.scrambled).collect();
    let chars: Vec<char> = scrambled.chars().collect();
    assert_eq!(chars[1], '.');
    assert_eq!(chars[3], ' ');
    assert_eq!(chars[5], '-');
}

#[test]
fn frames_move_blank_then_scrambled_then_original() {
    let pool = ScramblePool::default();
    let mut rng = Rng64::new(2);
    let p = build_plan("AB", TimingVariant::default(), &pool, &mut rng);

    let f = p.frame_at(Millis(100.0), &pool, &mut rng);
    let chars: Vec<char> = f.chars().collect();
    assert_eq!(chars[0], p.states[0].scrambled);
    assert_eq!(chars[1], BLANK);

    let f = p.frame_at(Millis(3900.0), &pool, &mut rng);
    let chars: Vec<char> = f.chars().collect();
    assert_eq!(chars[0], 'A');
    assert_eq!(chars[1], p.states[1].scrambled);

    assert_eq!(p.frame_at(Millis(4000.0), &pool, &mut rng), "AB");
}

#[test]
fn final_frame_is_exact_for_awkward_inputs() {
    let pool = ScramblePool::default();
    let mut rng = Rng64::new(8);
    for text in ["", " ", "... --- ...", "ümlaut ✓", "\u{00A0}x"] {
        for v in [
            TimingVariant::default(),
            TimingVariant::cycled(),
            TimingVariant::typewriter(),
        ] {
            let p = build_plan(text, v, &pool, &mut rng);
            assert_eq!(p.frame_at(p.total, &pool, &mut rng), text);
        }
    }
}

#[test]
fn revealed_count_never_regresses() {
    let p = plan("DISTRIBUTED SYSTEMS", TimingVariant::cycled());
    let mut last = 0;
    for step in 0..=100 {
        let n = p.revealed_count(Millis(step as f64 * 10.0));
        assert!(n >= last);
        last = n;
    }
    assert_eq!(last, p.len());
}

#[test]
fn typewriter_omits_pending_characters() {
    let pool = ScramblePool::default();
    let mut rng = Rng64::new(4);
    let p = build_plan("abc", TimingVariant::Typewriter { char_ms: 10.0 }, &pool, &mut rng);
    let f = p.frame_at(Millis(15.0), &pool, &mut rng);
    assert_eq!(f.chars().count(), 2);
    assert!(f.starts_with('a'));
}

#[test]
fn negative_timing_is_rejected() {
    assert!(
        TimingVariant::NonCycled {
            sweep_ms: -1.0,
            lag_ms: 10.0
        }
        .validate()
        .is_err()
    );
    assert!(TimingVariant::Cycled { duration_ms: f64::NAN }.validate().is_err());
    assert!(TimingVariant::default().validate().is_ok());
}

#[test]
fn zero_length_reveal_windows_are_rejected() {
    let zero_lag = TimingVariant::NonCycled {
        sweep_ms: 400.0,
        lag_ms: 0.0,
    };
    assert!(zero_lag.validate().is_err());
    assert!(TimingVariant::Cycled { duration_ms: 0.0 }.validate().is_err());
    assert!(TimingVariant::Typewriter { char_ms: 0.0 }.validate().is_err());

    let instant_sweep = TimingVariant::NonCycled {
        sweep_ms: 0.0,
        lag_ms: 3800.0,
    };
    assert!(instant_sweep.validate().is_ok());
    let p = plan("AB", instant_sweep);
    assert!(p.states.iter().all(|s| s.gibberish_at < s.reveal_at));
}

#[test]
fn non_cycled_glyphs_stay_frozen_inside_the_scramble_window() {
    let pool = ScramblePool::default();
    let mut rng = Rng64::new(21);
    let p = build_plan("KAFKA STREAMS", TimingVariant::default(), &pool, &mut rng);

    // Every character is scrambling between the end of the sweep and the first reveal.
    for ms in [400.0, 900.0, 1700.0, 2500.0, 3700.0] {
        let frame: Vec<char> = p.frame_at(Millis(ms), &pool, &mut rng).chars().collect();
        for (i, s) in p.states.iter().enumerate() {
            assert_eq!(frame[i], s.scrambled, "char {i} at {ms}ms");
        }
    }
}

#[test]
fn cycled_glyphs_are_rerolled_every_frame() {
    let pool = ScramblePool::default();
    let mut rng = Rng64::new(21);
    let text = "KAFKA STREAMS";
    let p = build_plan(text, TimingVariant::Cycled { duration_ms: 10_000.0 }, &pool, &mut rng);
    let last = text.chars().count() - 1;
    assert!(p.states[last].reveal_at > Millis(100.0));

    let mut seen = std::collections::HashSet::new();
    for step in 0..20 {
        let frame: Vec<char> = p
            .frame_at(Millis(step as f64 * 5.0), &pool, &mut rng)
            .chars()
            .collect();
        assert_eq!(frame[5], ' ');
        seen.insert(frame[last]);
    }
    assert!(seen.len() > 1, "{seen:?}");
}

#[test]
fn variant_reads_tagged_json() {
    let v: TimingVariant =
        serde_json::from_str(r#"{"kind":"cycled","duration_ms":500.0}"#).unwrap();
    assert_eq!(v, TimingVariant::Cycled { duration_ms: 500.0 });
}
