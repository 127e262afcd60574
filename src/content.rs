// ─── PAGE CONTENT ───────────────────────────────────────────────
//
// Everything the sections print. Both skins share the tables; only the
// headings in `Copy` differ.

use chrono::{DateTime, Datelike, FixedOffset, Utc};

use crate::supervisor::RenderError;
use crate::theme::Skin;

pub const OWNER: &str = "Vishu";
pub const EMAIL: &str = "vsingh6.23@stu.aud.ac.in";

pub const HERO_EYEBROW: &str = "Portfolio — 2026";
pub const HERO_DESCRIPTION: &str =
    "Building digital tools at the intersection of cognitive science and technology. Based in Delhi, India.";

pub const ROLES: &[&str] = &["Psychology Researcher", "Developer", "Creative Technologist"];

pub const BIO: &str = "I build tools for cognitive research while exploring why humans do what they do, \
bridging the gap between data and design. Currently investigating burnout in clinical psychology \
training and developing PRISM, an automated data processing pipeline for psychometric research. \
My work sits at the intersection of empirical behavioral science and modern software engineering, \
seeking to make research workflows more rigorous and reproducible.";

pub const EASTER_EGG: &str = "You found the secret. Thanks for exploring.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detail {
    pub label: &'static str,
    pub value: &'static str,
}

pub const DETAILS: &[Detail] = &[
    Detail { label: "Location", value: "Delhi, India" },
    Detail { label: "Education", value: "B.A. Hons. Psychology" },
    Detail { label: "Focus", value: "Neuro-Cognitive Science" },
    Detail { label: "Languages", value: "English, Hindi, Code" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Competence {
    pub title: &'static str,
    pub desc: &'static str,
}

pub const COMPETENCES: &[Competence] = &[
    Competence {
        title: "Research Methods",
        desc: "Cognitive psychology, social behavior, and human-technology interaction. Proficient in SPSS, \
survey design, literature review, and psychometric analysis (APA 7th ed.).",
    },
    Competence {
        title: "Software Engineering",
        desc: "Rust for performance-critical systems, Node.js for rapid prototyping, Git for version control. \
LaTeX for academic typesetting and publication-ready manuscripts.",
    },
    Competence {
        title: "Academic Writing",
        desc: "APA 7th formatting, research reports, systematic reviews, technical documentation. Reference \
management with Zotero; experienced with peer-review workflows.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub value: u32,
    pub suffix: &'static str,
    pub label: &'static str,
}

pub const STATS: &[Stat] = &[
    Stat { value: 5, suffix: "", label: "Projects" },
    Stat { value: 3, suffix: "+", label: "Research Papers" },
    Stat { value: 2, suffix: "", label: "Open Source Tools" },
    Stat { value: 1200, suffix: "+", label: "Commits" },
];

// ─── PROJECTS ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Tool,
    Research,
    Study,
}

impl ProjectKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectKind::Tool => "Engineering",
            ProjectKind::Research => "Research",
            ProjectKind::Study => "Academic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Completed,
    InProgress,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "ACTIVE",
            Status::Completed => "COMPLETED",
            Status::InProgress => "IN PROGRESS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub year: &'static str,
    pub description: &'static str,
    pub status: Status,
    pub tags: &'static [&'static str],
    /// External repository, when there is one to visit.
    pub link: Option<&'static str>,
    pub kind: ProjectKind,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "PRISM",
        year: "2024",
        description: "Psychology survey data processing pipeline in Rust. Automates scoring, quality control, \
and psychometric analysis for research workflows.",
        status: Status::Active,
        tags: &["RUST", "PSYCHOLOGY", "OPEN SOURCE"],
        link: Some("https://github.com/artlostintime/prism"),
        kind: ProjectKind::Tool,
    },
    Project {
        title: "PAPER",
        year: "2024",
        description: "Research portfolio & CMS with Node.js, Markdown support, secure authentication, \
and live deployment.",
        status: Status::Active,
        tags: &["NODE.JS", "JAVASCRIPT", "FULL-STACK"],
        link: Some("https://github.com/artlostintime/paper"),
        kind: ProjectKind::Tool,
    },
    Project {
        title: "STRESS & GENDER",
        year: "2023",
        description: "Collaborative study on stress coping strategies and cultural pressures. Significant \
differences found (p < .05, d = 0.62).",
        status: Status::Completed,
        tags: &["SPSS", "STATISTICS"],
        link: None,
        kind: ProjectKind::Research,
    },
    Project {
        title: "COGNITIVE LOAD",
        year: "2023",
        description: "Systematic review of 22 peer-reviewed articles on divided attention, notifications, \
and working memory in digital environments.",
        status: Status::Completed,
        tags: &["LITERATURE REVIEW", "COGNITION"],
        link: None,
        kind: ProjectKind::Study,
    },
    Project {
        title: "BURNOUT STUDY",
        year: "2024",
        description: "Mixed-methods proposal examining burnout predictors in clinical psychology practicum \
students. In development.",
        status: Status::InProgress,
        tags: &["MIXED-METHODS", "CLINICAL"],
        link: None,
        kind: ProjectKind::Research,
    },
];

/// Projects whose title or any tag contains `query`, case-insensitively.
/// An empty query matches everything.
pub fn filter_projects(query: &str) -> Vec<&'static Project> {
    let needle = query.trim().to_lowercase();
    PROJECTS
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.title.to_lowercase().contains(&needle)
                || p.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

// ─── CONTACT ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub value: &'static str,
    pub href: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink { label: "GitHub", value: "@artlostintime", href: "https://github.com/artlostintime" },
    SocialLink { label: "LinkedIn", value: "Connect with me", href: "https://www.linkedin.com/in/artlostintime" },
    SocialLink { label: "ORCID", value: "0000-0002-0628-4361", href: "https://orcid.org/0000-0002-0628-4361" },
];

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Wall-clock time in Delhi, `HH:MM:SS`.
pub fn ist_clock(now: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(ist) => now.with_timezone(&ist).format("%H:%M:%S").to_string(),
        None => "—".to_string(),
    }
}

pub fn copyright(now: DateTime<Utc>) -> String {
    format!("© {} {OWNER}", now.year())
}

// ─── PER-SKIN HEADINGS ──────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Copy {
    pub about_heading: &'static str,
    pub competence_heading: &'static str,
    pub projects_eyebrow: &'static str,
    pub projects_heading: &'static str,
    pub contact_heading: &'static str,
    pub contact_list_heading: &'static str,
    pub contact_note: &'static str,
    pub about_status: &'static str,
    pub availability: &'static str,
}

const DEV_COPY: Copy = Copy {
    about_heading: "About",
    competence_heading: "What I Work On",
    projects_eyebrow: "Work",
    projects_heading: "Selected Projects",
    contact_heading: "Get in Touch",
    contact_list_heading: "Elsewhere",
    contact_note: "Have a research idea, a tool that needs building, or just want to talk about \
why people do what they do? My inbox is open.",
    about_status: "Currently available for research collaborations",
    availability: "Available for remote collaboration · Delhi, India",
};

const PAPER_COPY: Copy = Copy {
    about_heading: "Author Note",
    competence_heading: "Areas of Competence",
    projects_eyebrow: "Work",
    projects_heading: "Selected Projects",
    contact_heading: "Correspondence",
    contact_list_heading: "Contact Information",
    contact_note: "Correspondence concerning this portfolio, research collaborations, and development \
inquiries should be addressed to Vishu Singh, Department of Psychology, Ambedkar University Delhi, \
New Delhi, India.",
    about_status: "Currently available for research collaborations",
    availability: "Available for remote collaboration · Delhi, India",
};

pub fn copy(skin: Skin) -> &'static Copy {
    match skin {
        Skin::Dev => &DEV_COPY,
        Skin::Paper => &PAPER_COPY,
    }
}

// ─── VALIDATION ─────────────────────────────────────────────────

/// Run before every page render. The tables are static, so a failure
/// repeats until the content is fixed.
pub fn validate() -> Result<(), RenderError> {
    if ROLES.is_empty() {
        return Err(RenderError::MissingContent("hero roles"));
    }
    if PROJECTS.is_empty() {
        return Err(RenderError::MissingContent("projects"));
    }
    for p in PROJECTS {
        if p.title.is_empty() || p.tags.is_empty() {
            return Err(RenderError::InvalidContent {
                section: "projects",
                reason: format!("project {:?} needs a title and at least one tag", p.title),
            });
        }
        if let Some(link) = p.link {
            if !link.starts_with("https://") {
                return Err(RenderError::InvalidContent {
                    section: "projects",
                    reason: format!("{} links to a non-https url", p.title),
                });
            }
        }
    }
    if let Some(bad) = SOCIAL_LINKS.iter().find(|l| !l.href.starts_with("https://")) {
        return Err(RenderError::InvalidContent {
            section: "social",
            reason: format!("{} links to a non-https url", bad.label),
        });
    }
    Ok(())
}
