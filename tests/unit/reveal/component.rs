use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::foundation::core::Fps;

fn sched() -> Scheduler {
    Scheduler::new(Fps::new(50, 1).unwrap())
}

fn component(text: &str) -> RevealComponent {
    RevealComponent::new(OwnerId(7), text, DriverSettings::default(), Rng64::new(11))
}

fn pump(c: &mut RevealComponent, s: &mut Scheduler, props: &RevealProps, until: Millis) {
    while let Some(batch) = s.step(until) {
        for w in batch {
            c.wake(&w, s);
        }
        c.render(props, s);
    }
}

#[test]
fn closed_gate_renders_hidden_original_without_timers() {
    let mut s = sched();
    let mut c = component("GITHUB");
    let props = RevealProps::new("GITHUB").gate(false);

    let out = c.render(&props, &mut s);
    assert_eq!(out.text, "GITHUB");
    assert_eq!(out.visibility, Visibility::Hidden);
    assert_eq!(out.status, RevealStatus::Idle);
    assert_eq!(s.stats().timers_set, 0);
}

#[test]
fn repeated_renders_register_a_single_timer() {
    let mut s = sched();
    let mut c = component("GITHUB");
    let props = RevealProps::new("GITHUB").delay(Millis(150.0));
    for _ in 0..5 {
        c.render(&props, &mut s);
    }
    assert_eq!(s.stats().timers_set, 1);

    pump(&mut c, &mut s, &props, Millis(10_000.0));
    for _ in 0..5 {
        c.render(&props, &mut s);
    }
    assert_eq!(s.stats().timers_set, 1);
    assert!(s.is_idle());
}

#[test]
fn becomes_visible_once_running_and_stays_visible() {
    let mut s = sched();
    let mut c = component("JAVA");
    let open = RevealProps::new("JAVA").delay(Millis(100.0));
    c.render(&open, &mut s);

    pump(&mut c, &mut s, &open, Millis(99.0));
    assert_eq!(c.output(s.now()).visibility, Visibility::Hidden);

    pump(&mut c, &mut s, &open, Millis(140.0));
    let out = c.output(s.now());
    assert_eq!(out.visibility, Visibility::Visible);
    assert_eq!(out.status, RevealStatus::Running);

    // Closing the gate again never hides or replays it.
    let closed = open.clone().gate(false);
    pump(&mut c, &mut s, &closed, Millis(10_000.0));
    let out = c.render(&closed, &mut s);
    assert_eq!(out.visibility, Visibility::Visible);
    assert_eq!(out.text, "JAVA");
    assert_eq!(s.stats().timers_set, 1);
}

#[test]
fn gate_closing_while_waiting_keeps_the_pending_start() {
    let mut s = sched();
    let mut c = component("GO");
    c.render(&RevealProps::new("GO").delay(Millis(50.0)), &mut s);
    let closed = RevealProps::new("GO").gate(false);
    pump(&mut c, &mut s, &closed, Millis(10_000.0));
    assert!(c.is_complete());
    assert_eq!(s.stats().timers_set, 1);
}

#[test]
fn completion_fires_once_per_text_value() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut s = sched();
    let mut c = component("AB").on_complete(move |t| sink.borrow_mut().push(t.to_string()));

    let props = RevealProps::new("AB");
    c.render(&props, &mut s);
    pump(&mut c, &mut s, &props, Millis(10_000.0));
    c.render(&props, &mut s);
    assert_eq!(*seen.borrow(), vec!["AB".to_string()]);

    let props = RevealProps::new("CD");
    c.render(&props, &mut s);
    pump(&mut c, &mut s, &props, Millis(20_000.0));
    assert_eq!(*seen.borrow(), vec!["AB".to_string(), "CD".to_string()]);
}

#[test]
fn text_change_mid_run_resets_to_hidden() {
    let mut s = sched();
    let mut c = component("REDIS");
    let props = RevealProps::new("REDIS");
    c.render(&props, &mut s);
    pump(&mut c, &mut s, &props, Millis(100.0));
    assert_eq!(c.output(s.now()).status, RevealStatus::Running);

    let out = c.render(&RevealProps::new("KAFKA").gate(false), &mut s);
    assert_eq!(out.text, "KAFKA");
    assert_eq!(out.visibility, Visibility::Hidden);
    assert!(s.is_idle());
}

#[test]
fn skip_mode_shows_final_text_on_first_render() {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let settings = DriverSettings {
        skip: true,
        ..DriverSettings::default()
    };
    let mut s = sched();
    let mut c = RevealComponent::new(OwnerId(1), "DOCKER", settings, Rng64::new(1))
        .on_complete(move |_| *sink.borrow_mut() += 1);

    let out = c.render(&RevealProps::new("DOCKER").gate(false).bracket(true), &mut s);
    assert_eq!(out.display_text(), "[DOCKER]");
    assert!(out.is_visible());
    assert!(!out.flash);
    assert_eq!(s.stats().timers_set, 0);
    c.render(&RevealProps::new("DOCKER"), &mut s);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn empty_text_completes_once_when_the_gate_opens() {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let mut s = sched();
    let mut c = component("").on_complete(move |_| *sink.borrow_mut() += 1);

    c.render(&RevealProps::new("").gate(false), &mut s);
    assert_eq!(*count.borrow(), 0);
    let out = c.render(&RevealProps::new(""), &mut s);
    c.render(&RevealProps::new(""), &mut s);
    assert_eq!(out.status, RevealStatus::Complete);
    assert_eq!(*count.borrow(), 1);
    assert!(s.is_idle());
}

#[test]
fn brackets_wrap_every_visible_state_and_never_scramble() {
    let mut s = sched();
    let mut c = component("GIT");
    let props = RevealProps::new("GIT").bracket(true);
    c.render(&props, &mut s);
    while let Some(batch) = s.step(Millis(10_000.0)) {
        for w in batch {
            c.wake(&w, &mut s);
        }
        let out = c.render(&props, &mut s);
        let shown = out.display_text();
        assert!(shown.starts_with('[') && shown.ends_with(']'), "{shown:?}");
        assert_eq!(shown.chars().count(), 5);
    }
    assert!(c.is_complete());
}

#[test]
fn flash_lasts_for_the_configured_window() {
    let mut s = sched();
    let mut c = component("ACCESSGUARD").with_flash(Millis(400.0));
    let props = RevealProps::new("ACCESSGUARD").delay(Millis(100.0));
    c.render(&props, &mut s);
    pump(&mut c, &mut s, &props, Millis(100.0));
    assert!(c.output(Millis(100.0)).flash);
    assert!(c.output(Millis(499.0)).flash);
    assert!(!c.output(Millis(500.0)).flash);
}

#[test]
fn dispose_cancels_pending_work() {
    let mut s = sched();
    let mut c = component("EUREKA");
    c.render(&RevealProps::new("EUREKA").delay(Millis(300.0)), &mut s);
    c.dispose(&mut s);
    assert!(s.is_idle());
    assert_eq!(c.output(s.now()).status, RevealStatus::Idle);
}
