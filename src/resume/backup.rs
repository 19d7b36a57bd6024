use crate::resume::model::{
    BioSection, Education, EducationSection, Experience, ExperienceSection, Link, LinksSection,
    PersonalInfo, Project, ProjectsSection, ResumeData, Sections, SkillCategory, SkillsSection,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn link(label: &str, url: &str) -> Link {
    Link {
        label: label.to_string(),
        url: url.to_string(),
    }
}

/// Document served when every remote source fails. Always valid.
pub fn embedded_resume() -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            name: "ada operator".to_string(),
            location: "lisbon, portugal".to_string(),
            role: "backend engineer".to_string(),
            contact: "ada.operator@example.com".to_string(),
            render_index: 1,
        },
        links: LinksSection {
            items: vec![
                link("linkedin", "https://www.linkedin.com/in/ada-operator"),
                link("github", "https://github.com/ada-operator"),
            ],
            render_index: 2,
        },
        bio: BioSection {
            content: "designed for failure. optimized for recovery.".to_string(),
            render_index: 3,
        },
        skills: SkillsSection {
            categories: vec![
                SkillCategory {
                    name: "languages".to_string(),
                    skills: strings(&["rust", "go", "python", "bash"]),
                },
                SkillCategory {
                    name: "tools & platforms".to_string(),
                    skills: strings(&["docker", "redis", "kafka", "postgresql", "git"]),
                },
                SkillCategory {
                    name: "concepts".to_string(),
                    skills: strings(&[
                        "data structures & algorithms",
                        "microservices",
                        "event-driven architecture",
                        "rest apis",
                    ]),
                },
            ],
            render_index: 4,
        },
        sections: Sections {
            projects: ProjectsSection {
                items: vec![
                    Project {
                        name: "accessguard".to_string(),
                        headline: "multi-tenant authentication & authorization platform"
                            .to_string(),
                        description: strings(&[
                            "distributed services with discovery and kafka-powered messaging.",
                            "per-tenant signing keys with a jwks endpoint for rotation.",
                            "token-bucket rate limiting and circuit breaking.",
                        ]),
                        stack: strings(&["kafka", "postgresql", "redis", "docker"]),
                        links: vec![link("github", "https://github.com/ada-operator/accessguard")],
                    },
                    Project {
                        name: "sitemonitor".to_string(),
                        headline: "concurrent site uptime & latency monitor".to_string(),
                        description: strings(&[
                            "worker pool probing many urls in parallel under a global rate limit.",
                        ]),
                        stack: strings(&["go", "concurrency"]),
                        links: vec![link("github", "https://github.com/ada-operator/sitemonitor")],
                    },
                ],
                render_index: 5,
            },
            experience: ExperienceSection {
                items: vec![Experience {
                    org: "wibblit".to_string(),
                    role: "co-founder & developer".to_string(),
                    duration: "sep 2024 - jun 2025".to_string(),
                    description: strings(&[
                        "built a web app for resume rephrasing and job matching.",
                        "implemented client-side pdf parsing and structured extraction.",
                    ]),
                }],
                render_index: 6,
            },
            education: EducationSection {
                items: vec![Education {
                    degree: "b.e. computer science".to_string(),
                    institution: "technological university".to_string(),
                    duration: "dec 2021 - jun 2025".to_string(),
                    grade: "9.24".to_string(),
                }],
                render_index: 7,
            },
        },
    }
}
