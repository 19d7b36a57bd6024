//! Static description of the profile page: every reveal slot, every delayed block, and how they
//! are arranged into terminal lines.

use serde::Serialize;

use crate::{
    foundation::core::Millis,
    resume::model::ResumeData,
    resume::text::to_sentence_case,
    reveal::content::Inline,
    sequence::phase::Phase,
    sequence::staged::StagedTimings,
    sequence::stagger::Stagger,
    theme::Theme,
};

pub const SECTION_POINT: &str = "⫻";
pub const DIVIDER_WIDTH: usize = 48;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Header,
    Identity,
    Skills,
    Education,
    Projects,
    Experience,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextCase {
    #[default]
    AsIs,
    Upper,
    Lower,
    Sentence,
}

impl TextCase {
    pub fn apply(self, s: &str) -> String {
        match self {
            Self::AsIs => s.to_string(),
            Self::Upper => s.to_uppercase(),
            Self::Lower => s.to_lowercase(),
            Self::Sentence => to_sentence_case(s),
        }
    }
}

/// One reveal on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotSpec {
    pub key: String,
    pub region: Region,
    pub content: Inline,
    pub case: TextCase,
    pub delay: Millis,
    pub bracket: bool,
    /// Not mounted until this block is visible.
    pub block: Option<usize>,
}

impl SlotSpec {
    /// Flattened, case-adjusted text fed to the reveal.
    pub fn text(&self) -> String {
        self.case.apply(&self.content.plain_text())
    }
}

/// A delayed-mount block.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockSpec {
    pub key: String,
    pub style: Phase,
    pub delay: Millis,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Piece {
    Slot(usize),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    pub piece: Piece,
    pub block: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineSpec {
    pub items: Vec<LineItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub slots: Vec<SlotSpec>,
    pub blocks: Vec<BlockSpec>,
    pub lines: Vec<LineSpec>,
}

impl Layout {
    pub fn slot(&self, key: &str) -> Option<&SlotSpec> {
        self.slots.iter().find(|s| s.key == key)
    }

    pub fn block(&self, key: &str) -> Option<&BlockSpec> {
        self.blocks.iter().find(|b| b.key == key)
    }
}

/// Collects slots, blocks and lines while walking the resume.
struct Builder<'a> {
    stagger: &'a Stagger,
    layout: Layout,
    line: LineSpec,
    current_block: Option<usize>,
}

impl<'a> Builder<'a> {
    fn new(stagger: &'a Stagger) -> Self {
        Self {
            stagger,
            layout: Layout::default(),
            line: LineSpec::default(),
            current_block: None,
        }
    }

    fn block(&mut self, key: &str, style: Phase, delay: Millis) -> usize {
        self.layout.blocks.push(BlockSpec {
            key: key.to_string(),
            style,
            delay,
        });
        self.layout.blocks.len() - 1
    }

    fn slot(
        &mut self,
        key: String,
        region: Region,
        content: Inline,
        case: TextCase,
        delay: Millis,
        bracket: bool,
    ) {
        self.layout.slots.push(SlotSpec {
            key,
            region,
            content,
            case,
            delay,
            bracket,
            block: self.current_block,
        });
        let idx = self.layout.slots.len() - 1;
        self.line.items.push(LineItem {
            piece: Piece::Slot(idx),
            block: self.current_block,
        });
    }

    fn text(&mut self, region: Region, key: String, text: &str, delay: Millis) {
        self.slot(key, region, Inline::text(text), TextCase::AsIs, delay, false);
    }

    fn literal(&mut self, s: impl Into<String>) {
        self.line.items.push(LineItem {
            piece: Piece::Text(s.into()),
            block: self.current_block,
        });
    }

    fn end_line(&mut self) {
        let line = std::mem::take(&mut self.line);
        if !line.items.is_empty() {
            self.layout.lines.push(line);
        }
    }

    fn divider(&mut self, key: &str, delay: Millis) {
        self.end_line();
        let b = self.block(key, Phase::Lines, delay);
        let outer = self.current_block.replace(b);
        self.literal("─".repeat(DIVIDER_WIDTH));
        self.end_line();
        self.current_block = outer;
    }

    fn heading(&mut self, region: Region, key: &str, title: &str, delay: Millis) {
        let content = Inline::span(
            "section-heading",
            vec![
                Inline::span("section-point", vec![Inline::text(SECTION_POINT)]),
                Inline::text(format!(" {title}")),
            ],
        );
        self.slot(key.to_string(), region, content, TextCase::AsIs, delay, false);
        self.end_line();
    }

    /// One paragraph for a single entry, otherwise a bullet per entry.
    fn description(
        &mut self,
        region: Region,
        key: &str,
        points: &[String],
        single: Millis,
        each: impl Fn(u32) -> Millis,
    ) {
        if let [only] = points {
            self.text(region, format!("{key}.description"), only, single);
            self.end_line();
            return;
        }
        for (j, point) in points.iter().enumerate() {
            let delay = each(j as u32);
            self.text(region, format!("{key}.bullet.{j}"), "•", delay);
            self.text(region, format!("{key}.point.{j}"), point, delay);
            self.end_line();
        }
    }
}

/// Lay out the profile for `data`.
pub fn build_layout(
    data: &ResumeData,
    stagger: &Stagger,
    staged: &StagedTimings,
    theme: Theme,
) -> Layout {
    let skip = stagger.skip;
    let at = |ms: f64| if skip { Millis::ZERO } else { Millis(ms) };
    let mut b = Builder::new(stagger);

    // Header.
    let header = b.block("header", Phase::Lines, Millis::ZERO);
    b.current_block = Some(header);
    b.slot(
        "header.name".to_string(),
        Region::Header,
        Inline::text(&data.personal_info.name),
        TextCase::Upper,
        Millis::ZERO,
        true,
    );
    b.slot(
        "header.title".to_string(),
        Region::Header,
        Inline::span(
            "profile-title",
            vec![
                Inline::span("accent", vec![Inline::text(" ⁝⁝⁝")]),
                Inline::text(" "),
                Inline::text("PROFILE"),
            ],
        ),
        TextCase::AsIs,
        Millis::ZERO,
        false,
    );
    b.end_line();

    let actions = [("resume", "RESUME.PDF"), ("contact", "CONTACT")];
    for (i, (key, label)) in actions.iter().enumerate() {
        let delay = at(staged.action(i as u32).0);
        let blk = b.block(&format!("action.{key}"), Phase::Interactive, delay);
        b.current_block = Some(blk);
        b.slot(
            format!("header.{key}"),
            Region::Header,
            Inline::text(*label),
            TextCase::AsIs,
            Millis::ZERO,
            true,
        );
    }
    let toggle = b.block(
        "action.theme",
        Phase::Interactive,
        at(staged.action(actions.len() as u32).0),
    );
    b.current_block = Some(toggle);
    b.literal(format!("[{}]", theme.toggle_label()));
    b.end_line();
    b.current_block = None;

    identity(&mut b, data);
    skills(&mut b, data);
    education(&mut b, data);
    b.divider("divider.panes", at(staged.divider_ms));
    projects(&mut b, data);
    experience(&mut b, data);

    // Footer.
    let footer = b.block("footer", Phase::Interactive, at(staged.footer_ms));
    b.current_block = Some(footer);
    b.literal(format!(
        "[BUILT BY {}] ⁝⁝⁝ [NO COOKIES | NO TRACKERS]",
        data.personal_info.name.to_uppercase()
    ));
    b.end_line();
    b.current_block = None;

    b.layout
}

fn identity(b: &mut Builder<'_>, data: &ResumeData) {
    let st = *b.stagger;
    let p = data.personal_info.render_index;
    let info = &data.personal_info;
    let r = Region::Identity;

    let fields = [
        ("name", &info.name, TextCase::Upper),
        ("role", &info.role, TextCase::Upper),
        ("location", &info.location, TextCase::Upper),
        ("contact", &info.contact, TextCase::Lower),
    ];
    for (f, (key, value, case)) in fields.into_iter().enumerate() {
        b.slot(
            format!("identity.{key}"),
            r,
            Inline::text(value.as_str()),
            case,
            st.field_delay(p, f as u32),
            false,
        );
        b.end_line();
    }

    for (i, link) in data.links.items.iter().enumerate() {
        b.slot(
            format!("links.{i}"),
            r,
            Inline::text(&link.label),
            TextCase::Upper,
            st.delay(data.links.render_index, 1, i as u32),
            true,
        );
    }
    b.end_line();

    b.slot(
        "bio".to_string(),
        r,
        Inline::text(&data.bio.content),
        TextCase::Sentence,
        st.delay(data.bio.render_index, 2, 0),
        false,
    );
    b.end_line();
    b.divider("divider.identity", st.delay(p, 2, 0));
}

fn skills(b: &mut Builder<'_>, data: &ResumeData) {
    let st = *b.stagger;
    let s = data.skills.render_index;
    let r = Region::Skills;

    b.heading(r, "skills.heading", "STACK", st.section(s));
    for (c, cat) in data.skills.categories.iter().enumerate() {
        let base = c as u32 * 10;
        b.slot(
            format!("skills.{c}.name"),
            r,
            Inline::text(format!("› {}", cat.name)),
            TextCase::Upper,
            st.delay(s, 2, base),
            false,
        );
        b.end_line();
        for (k, skill) in cat.skills.iter().enumerate() {
            b.slot(
                format!("skills.{c}.{k}"),
                r,
                Inline::text(skill.as_str()),
                TextCase::Upper,
                st.delay(s, 2, base + k as u32 + 1),
                true,
            );
        }
        b.end_line();
    }
    b.divider("divider.skills", st.delay(s, 2, 0));
}

fn education(b: &mut Builder<'_>, data: &ResumeData) {
    let st = *b.stagger;
    let e = data.sections.education.render_index;
    let r = Region::Education;

    b.heading(r, "education.heading", "EDUCATION", st.section(e));
    for (i, edu) in data.sections.education.items.iter().enumerate() {
        let i = i as u32;
        let head = st.delay(e, 1, i * 2);
        let rest = st.delay(e, 1, i * 2 + 1);
        b.slot(
            format!("education.{i}.degree"),
            r,
            Inline::text(&edu.degree),
            TextCase::Upper,
            head,
            false,
        );
        b.end_line();
        b.slot(
            format!("education.{i}.institution"),
            r,
            Inline::text(&edu.institution),
            TextCase::Upper,
            rest,
            false,
        );
        b.end_line();
        b.slot(
            format!("education.{i}.grade"),
            r,
            Inline::text(format!("GRADE: {}", edu.grade)),
            TextCase::Upper,
            rest,
            false,
        );
        b.slot(
            format!("education.{i}.duration"),
            r,
            Inline::text(&edu.duration),
            TextCase::Upper,
            rest,
            false,
        );
        b.end_line();
    }
    b.divider("divider.education", st.section(e));
}

fn projects(b: &mut Builder<'_>, data: &ResumeData) {
    let st = *b.stagger;
    let pr = data.sections.projects.render_index;
    let r = Region::Projects;

    b.heading(r, "projects.heading", "PROJECTS", st.section(pr));
    for (i, project) in data.sections.projects.items.iter().enumerate() {
        let i = i as u32;
        let key = format!("projects.{i}");
        b.slot(
            format!("{key}.title"),
            r,
            Inline::group(vec![
                Inline::span("project-name", vec![Inline::text(&project.name)]),
                Inline::text(format!(" — {}", project.headline)),
            ]),
            TextCase::Upper,
            st.delay(pr, 1, i * 15),
            false,
        );
        b.end_line();
        for (l, link) in project.links.iter().enumerate() {
            b.slot(
                format!("{key}.link.{l}"),
                r,
                Inline::text(&link.label),
                TextCase::Upper,
                st.delay(pr, 1, i * 15 + l as u32 + 1),
                true,
            );
        }
        b.end_line();
        for (t, tech) in project.stack.iter().enumerate() {
            b.slot(
                format!("{key}.stack.{t}"),
                r,
                Inline::text(tech.as_str()),
                TextCase::Upper,
                st.delay(pr, 1, i * 15 + t as u32 + 3),
                true,
            );
        }
        b.end_line();
        b.description(r, &key, &project.description, st.delay(pr, 2, i * 15), |j| {
            st.delay(pr, 2, i * 10 + j)
        });
        b.divider(&format!("divider.{key}"), st.delay(pr, 3, i));
    }
}

fn experience(b: &mut Builder<'_>, data: &ResumeData) {
    let st = *b.stagger;
    let x = data.sections.experience.render_index;
    let r = Region::Experience;

    b.heading(r, "experience.heading", "EXPERIENCE", st.section(x));
    for (i, exp) in data.sections.experience.items.iter().enumerate() {
        let i = i as u32;
        let key = format!("experience.{i}");
        let base = i * 10;
        b.slot(
            format!("{key}.org"),
            r,
            Inline::text(&exp.org),
            TextCase::Upper,
            st.delay(x, 1, base),
            false,
        );
        b.end_line();
        b.text(r, format!("{key}.role_label"), "ROLE:", st.delay(x, 1, base + 1));
        b.slot(
            format!("{key}.role"),
            r,
            Inline::text(&exp.role),
            TextCase::Upper,
            st.delay(x, 1, base + 2),
            false,
        );
        b.end_line();
        b.text(r, format!("{key}.duration_label"), "DURATION:", st.delay(x, 1, base + 3));
        b.slot(
            format!("{key}.duration"),
            r,
            Inline::text(&exp.duration),
            TextCase::Upper,
            st.delay(x, 1, base + 4),
            false,
        );
        b.end_line();
        b.description(r, &key, &exp.description, st.delay(x, 2, base), |j| {
            st.delay(x, 2, base + j)
        });
        b.divider(&format!("divider.{key}"), st.delay(x, 3, i));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/layout.rs"]
mod tests;
