use serde::{Deserialize, Serialize};

/// Rich inline content handed to a reveal: plain text, classed spans, or a run of siblings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Span { class: String, children: Vec<Inline> },
    Group { children: Vec<Inline> },
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text { text: s.into() }
    }

    pub fn span(class: impl Into<String>, children: Vec<Inline>) -> Self {
        Self::Span {
            class: class.into(),
            children,
        }
    }

    pub fn group(children: Vec<Inline>) -> Self {
        Self::Group { children }
    }

    /// Concatenated text of every leaf, depth first.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { text } => out.push_str(text),
            Self::Span { children, .. } | Self::Group { children } => {
                for c in children {
                    c.collect_text(out);
                }
            }
        }
    }

    /// Put an animated string back into this content's outermost span.
    ///
    /// Inner structure is not preserved: the animation works on the flattened string, so the
    /// outermost class (if any) is the only styling that survives while it runs.
    pub fn rewrap(&self, revealed: &str) -> Inline {
        match self.class() {
            Some(class) => Self::span(class, vec![Self::text(revealed)]),
            None => Self::text(revealed),
        }
    }

    /// Outermost class, when the content is a span.
    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Span { class, .. } => Some(class),
            _ => None,
        }
    }
}

impl From<&str> for Inline {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for Inline {
    fn from(s: String) -> Self {
        Self::text(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/content.rs"]
mod tests;
