//! Resume document schema.
//!
//! Every section carries a `renderIndex`, used only as the section key when staggering reveal
//! start delays. Unknown keys are ignored so the document can grow ahead of this crate.

use serde::{Deserialize, Serialize};

use crate::foundation::error::{GlyphfolioError, GlyphfolioResult};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub links: LinksSection,
    pub bio: BioSection,
    pub skills: SkillsSection,
    pub sections: Sections,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub location: String,
    pub role: String,
    pub contact: String,
    #[serde(rename = "renderIndex")]
    pub render_index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksSection {
    pub items: Vec<Link>,
    #[serde(rename = "renderIndex")]
    pub render_index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioSection {
    pub content: String,
    #[serde(rename = "renderIndex")]
    pub render_index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillsSection {
    pub categories: Vec<SkillCategory>,
    #[serde(rename = "renderIndex")]
    pub render_index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub headline: String,
    pub description: Vec<String>,
    pub stack: Vec<String>,
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectsSection {
    pub items: Vec<Project>,
    #[serde(rename = "renderIndex")]
    pub render_index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub org: String,
    pub role: String,
    pub duration: String,
    pub description: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceSection {
    pub items: Vec<Experience>,
    #[serde(rename = "renderIndex")]
    pub render_index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub duration: String,
    pub grade: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationSection {
    pub items: Vec<Education>,
    #[serde(rename = "renderIndex")]
    pub render_index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    pub projects: ProjectsSection,
    pub experience: ExperienceSection,
    pub education: EducationSection,
}

impl ResumeData {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> GlyphfolioResult<Self> {
        let data: Self = serde_json::from_str(s)
            .map_err(|e| GlyphfolioError::validation(format!("resume json: {e}")))?;
        data.validate()?;
        Ok(data)
    }

    pub fn to_json_pretty(&self) -> GlyphfolioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> GlyphfolioResult<()> {
        if self.personal_info.name.trim().is_empty() {
            return Err(GlyphfolioError::validation(
                "resume personal_info.name must not be blank",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resume/model.rs"]
mod tests;
