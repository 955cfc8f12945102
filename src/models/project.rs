// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project records.
//!
//! This module defines the data shown on the project cards and the
//! per-project detail pages.

use serde::{Deserialize, Serialize};

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    /// Free-form period, e.g. "2024.07 ~ 2024.08"
    pub date: String,
    pub description: String,
    /// Display order is significant
    pub technologies: Vec<String>,
    /// Image path relative to the assets directory
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ProjectDetails>,
}

/// Extended content for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub overview: String,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub screenshots: Vec<Screenshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub troubleshooting: Vec<Troubleshooting>,
}

/// One captioned screenshot row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub image: String,
    pub title: String,
    pub description: String,
}

/// A problem met during the project and how it was solved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Troubleshooting {
    pub title: String,
    pub problem: String,
    pub solution: String,
    pub result: String,
}

impl ProjectRecord {
    pub fn screenshots(&self) -> &[Screenshot] {
        self.details
            .as_ref()
            .map(|d| d.screenshots.as_slice())
            .unwrap_or_default()
    }
}
