use super::*;

fn drive(seq: &mut PhaseSequencer, s: &mut Scheduler, until: Millis) {
    while let Some(batch) = s.step(until) {
        for w in batch {
            seq.wake(&w);
        }
    }
}

#[test]
fn gates_flip_exactly_at_the_configured_offsets() {
    let mut s = Scheduler::default();
    let mut seq = PhaseSequencer::new(OwnerId(0), PhaseTimings::default(), false);
    seq.mount(&mut s);
    assert_eq!(seq.phase(), Phase::Lines);
    assert!(!seq.text_phase_active());

    drive(&mut seq, &mut s, Millis(1999.0));
    assert!(!seq.text_phase_active());

    drive(&mut seq, &mut s, Millis(2000.0));
    assert_eq!(seq.phase(), Phase::Text);
    assert!(seq.text_phase_active());
    assert!(!seq.interactive_phase_active());

    drive(&mut seq, &mut s, Millis(5999.0));
    assert!(!seq.interactive_phase_active());
    drive(&mut seq, &mut s, Millis(6000.0));
    assert_eq!(seq.phase(), Phase::Interactive);
    assert!(seq.interactive_phase_active());
    assert!(s.is_idle());
}

#[test]
fn phase_never_regresses() {
    let mut seq = PhaseSequencer::new(OwnerId(0), PhaseTimings::default(), false);
    assert!(seq.advance(Phase::Interactive));
    assert!(!seq.advance(Phase::Text));
    assert!(!seq.advance(Phase::Lines));
    assert_eq!(seq.phase(), Phase::Interactive);
}

#[test]
fn out_of_order_timers_only_move_forward() {
    let mut s = Scheduler::default();
    let timings = PhaseTimings {
        text_at_ms: 500.0,
        interactive_at_ms: 500.0,
    };
    let mut seq = PhaseSequencer::new(OwnerId(0), timings, false);
    seq.mount(&mut s);
    drive(&mut seq, &mut s, Millis(500.0));
    assert_eq!(seq.phase(), Phase::Interactive);
}

#[test]
fn skip_starts_interactive_without_timers() {
    let mut s = Scheduler::default();
    let mut seq = PhaseSequencer::new(OwnerId(0), PhaseTimings::default(), true);
    seq.mount(&mut s);
    assert_eq!(seq.phase(), Phase::Interactive);
    assert!(seq.text_phase_active());
    assert!(seq.interactive_phase_active());
    assert_eq!(s.stats().timers_set, 0);
}

#[test]
fn mount_twice_arms_once_and_dispose_clears() {
    let mut s = Scheduler::default();
    let mut seq = PhaseSequencer::new(OwnerId(0), PhaseTimings::default(), false);
    seq.mount(&mut s);
    seq.mount(&mut s);
    assert_eq!(s.pending_timers(), 2);
    seq.dispose(&mut s);
    assert!(s.is_idle());
    drive(&mut seq, &mut s, Millis(10_000.0));
    assert_eq!(seq.phase(), Phase::Lines);
}

#[test]
fn timings_reject_inverted_offsets() {
    let bad = PhaseTimings {
        text_at_ms: 3000.0,
        interactive_at_ms: 1000.0,
    };
    assert!(bad.validate().is_err());
    assert!(PhaseTimings::default().validate().is_ok());
}
