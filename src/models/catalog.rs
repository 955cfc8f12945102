// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Static project table.
//!
//! The catalog is read-only: it is built once at start-up and only ever
//! looked up by id. An unknown id is an explicit [`CatalogError::NotFound`],
//! which the detail page renders as a message.

use thiserror::Error;

use super::project::{ProjectDetails, ProjectRecord, Screenshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("project '{0}' not found")]
    NotFound(String),
}

/// Projects keyed by id, in display order.
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    records: Vec<ProjectRecord>,
}

impl ProjectCatalog {
    pub fn new(records: Vec<ProjectRecord>) -> Self {
        Self { records }
    }

    /// The projects shipped with the portfolio.
    pub fn builtin() -> Self {
        Self::new(vec![voyage_x()])
    }

    pub fn lookup(&self, id: &str) -> Result<&ProjectRecord, CatalogError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn projects(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn screenshot(image: &str, title: &str, description: &str) -> Screenshot {
    Screenshot {
        image: image.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn voyage_x() -> ProjectRecord {
    ProjectRecord {
        id: "voyagex".to_string(),
        title: "Voyage X".to_string(),
        date: "2024.07 ~ 2024.08".to_string(),
        description: "Information on future space travel, with checkout for trips and merchandise"
            .to_string(),
        technologies: strings(&[
            "React",
            "TypeScript",
            "Tailwind",
            "Next.js",
            "REACT QUERY",
            "ZUSTAND",
        ]),
        image: "/images/VoyageX.png".to_string(),
        details: Some(ProjectDetails {
            overview: "VoyageX is an all-in-one platform for the space travel of the future. \
                It gives travellers information about space trips and lets them buy \
                related products."
                .to_string(),
            features: strings(&[
                "Search and book space travel packages",
                "Live space weather information",
                "Space travel merchandise shop",
                "User community",
            ]),
            github: Some("https://github.com/hwijinkim22/voyageX.git".to_string()),
            demo: Some("https://voyage-x.vercel.app".to_string()),
            screenshots: vec![
                screenshot(
                    "/images/voyageX-main.png",
                    "Main screen",
                    "The first screen visitors meet, built to feel dynamic and to carry \
                     the mystery of space.\nIt is made of five sections; moving on to the \
                     next one slides the new section over the previous one.",
                ),
                screenshot(
                    "/images/voyageX-2section.png",
                    "Choose a planet",
                    "The second section, reached by scrolling down.\nThe left and right \
                     arrows rotate planets in with an animation, and clicking a planet \
                     opens its travel package page.",
                ),
                screenshot(
                    "/images/voyageX-3section.png",
                    "GOODS SHOP",
                    "The third section shows merchandise.\nClicking an item opens its \
                     product detail page.",
                ),
                screenshot(
                    "/images/voyageX-4section.png",
                    "Community posts",
                    "The fourth section loads community posts.\nThe four most liked posts \
                     are shown, and clicking one opens it.",
                ),
                screenshot(
                    "/images/voyageX-5section.png",
                    "News",
                    "The last section loads the latest news.",
                ),
            ],
            troubleshooting: Vec::new(),
        }),
    }
}
