// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Home page content: introduction, skills and archive links.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Self-assessed proficiency, 0 to 100
    pub level: u8,
}

impl Skill {
    pub fn new(name: &str, level: u8) -> Self {
        Self {
            name: name.to_string(),
            level: level.min(100),
        }
    }

    /// Level as a fraction for progress bars.
    pub fn fraction(&self) -> f32 {
        f32::from(self.level) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    pub skills: Vec<Skill>,
}

/// An external place where work is archived (code hosting, blog, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub title: String,
    pub subtitle: String,
    pub url: String,
    pub link_text: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub brand: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub headline: String,
    pub intro: String,
    pub skill_groups: Vec<SkillGroup>,
    pub archives: Vec<ArchiveEntry>,
}

impl Profile {
    pub fn builtin() -> Self {
        Self {
            brand: "Hwijin's Portfolio".to_string(),
            name: "Hwijin Kim".to_string(),
            role: "Frontend Developer".to_string(),
            avatar: "/images/profile.jpeg".to_string(),
            headline: "a developer who puts users first".to_string(),
            intro: "No users, no developers: that is the mindset I work with.".to_string(),
            skill_groups: vec![
                SkillGroup {
                    title: "Frontend".to_string(),
                    skills: vec![
                        Skill::new("HTML/CSS", 100),
                        Skill::new("JavaScript", 100),
                        Skill::new("React", 100),
                        Skill::new("TypeScript", 95),
                        Skill::new("Next.js", 95),
                    ],
                },
                SkillGroup {
                    title: "Backend".to_string(),
                    skills: vec![Skill::new("Supabase", 95)],
                },
            ],
            archives: vec![
                ArchiveEntry {
                    title: "GitHub".to_string(),
                    subtitle: "Source code repositories".to_string(),
                    url: "https://github.com/hwijinkim22".to_string(),
                    link_text: "github.com/hwijinkim22".to_string(),
                    highlights: vec![
                        "20 repositories".to_string(),
                        "Steady commits".to_string(),
                    ],
                },
                ArchiveEntry {
                    title: "Blog".to_string(),
                    subtitle: "Development blog".to_string(),
                    url: "https://velog.io/@hwijinkim22/posts".to_string(),
                    link_text: "velog.io/@hwijinkim22/posts".to_string(),
                    highlights: vec![
                        "Daily TIL notes".to_string(),
                        "Over 100 posts".to_string(),
                    ],
                },
            ],
        }
    }
}
