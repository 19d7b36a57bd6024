use super::*;
use crate::resume::backup::embedded_resume;

fn layout() -> Layout {
    build_layout(
        &embedded_resume(),
        &Stagger::default(),
        &StagedTimings::default(),
        Theme::Dark,
    )
}

#[test]
fn identity_fields_use_field_delays() {
    let l = layout();
    // personal_info renderIndex is 1.
    assert_eq!(l.slot("identity.name").unwrap().delay, Millis(300.0));
    assert_eq!(l.slot("identity.contact").unwrap().delay, Millis(750.0));
    assert_eq!(l.slot("identity.name").unwrap().text(), "ADA OPERATOR");
    assert_eq!(l.slot("identity.contact").unwrap().text(), "ada.operator@example.com");
}

#[test]
fn links_and_skills_are_bracketed_and_staggered() {
    let l = layout();
    let link = l.slot("links.1").unwrap();
    assert!(link.bracket);
    // links renderIndex 2: 2*300 + 1*150 + 1*50.
    assert_eq!(link.delay, Millis(800.0));

    // skills renderIndex 4, category 1, skill 2: 4*300 + 2*150 + (10 + 3)*50.
    let skill = l.slot("skills.1.2").unwrap();
    assert!(skill.bracket);
    assert_eq!(skill.delay, Millis(2150.0));
    assert_eq!(l.slot("skills.1.name").unwrap().text(), "› TOOLS & PLATFORMS");
}

#[test]
fn bio_is_sentence_cased() {
    let l = layout();
    assert_eq!(
        l.slot("bio").unwrap().text(),
        "Designed for failure. Optimized for recovery."
    );
    assert_eq!(l.slot("bio").unwrap().delay, Millis(1200.0));
}

#[test]
fn headings_flatten_their_section_point() {
    let l = layout();
    let h = l.slot("projects.heading").unwrap();
    assert_eq!(h.text(), format!("{SECTION_POINT} PROJECTS"));
    assert_eq!(h.delay, Millis(1500.0));
    assert_eq!(h.content.class(), Some("section-heading"));
}

#[test]
fn project_titles_flatten_name_and_headline() {
    let l = layout();
    let t = l.slot("projects.0.title").unwrap();
    assert_eq!(
        t.text(),
        "ACCESSGUARD — MULTI-TENANT AUTHENTICATION & AUTHORIZATION PLATFORM"
    );
    assert_eq!(t.content.class(), None);
}

#[test]
fn descriptions_are_paragraphs_or_bullets() {
    let l = layout();
    // Project 0 has three points, project 1 has one.
    assert!(l.slot("projects.0.bullet.2").is_some());
    assert_eq!(
        l.slot("projects.0.point.1").unwrap().delay,
        l.slot("projects.0.bullet.1").unwrap().delay
    );
    assert!(l.slot("projects.1.description").is_some());
    assert!(l.slot("projects.1.bullet.0").is_none());
    // 5*300 + 2*150 + 15*50
    assert_eq!(l.slot("projects.1.description").unwrap().delay, Millis(2550.0));
}

#[test]
fn header_actions_live_in_staged_blocks() {
    let l = layout();
    let resume = l.slot("header.resume").unwrap();
    let block = &l.blocks[resume.block.unwrap()];
    assert_eq!(block.key, "action.resume");
    assert_eq!(block.style, Phase::Interactive);
    assert_eq!(block.delay, Millis(6200.0));
    assert_eq!(l.block("action.theme").unwrap().delay, Millis(6600.0));
    assert_eq!(l.block("footer").unwrap().delay, Millis(4500.0));
    assert_eq!(l.block("divider.panes").unwrap().delay, Millis(400.0));
    assert_eq!(l.slot("identity.name").unwrap().block, None);
}

#[test]
fn skip_zeroes_every_delay() {
    let l = build_layout(
        &embedded_resume(),
        &Stagger::new(Default::default(), true),
        &StagedTimings::default(),
        Theme::Light,
    );
    assert!(l.slots.iter().all(|s| s.delay == Millis::ZERO));
    assert!(l.blocks.iter().all(|b| b.delay == Millis::ZERO));
}

#[test]
fn slot_keys_are_unique() {
    let l = layout();
    let mut keys: Vec<&str> = l.slots.iter().map(|s| s.key.as_str()).collect();
    let n = keys.len();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), n);
}
