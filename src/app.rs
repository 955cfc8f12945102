// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait. It owns the section navigator and threads it
//! through the nav bar and the home page, routes between the home page and
//! the project detail pages, and drives the smooth scroll animation.

use std::time::Duration;

use anyhow::Result;

use crate::io::config::AppConfig;
use crate::models::{catalog::ProjectCatalog, profile::Profile};
use crate::navigation::navigator::default_sections;
use crate::navigation::{LayoutSnapshot, ScrollCommand, SectionNavigator, SmoothScroll};
use crate::ui::home::{HomeAction, HomeContent, HomePage};
use crate::ui::images::ImageCache;
use crate::ui::nav_bar::{self, NavAction, NAV_BAR_HEIGHT};
use crate::ui::project_detail::{DetailAction, DetailPage};

/// The page currently mounted, with its per-page state.
enum Page {
    Home(HomePage),
    Project(DetailPage),
}

/// Result of interacting with the mounted page.
enum PageAction {
    None,
    OpenProject(String),
    Back,
}

/// Main application state.
pub struct FolioApp {
    config: AppConfig,
    profile: Profile,
    catalog: ProjectCatalog,

    /// Single owner of the active section
    navigator: SectionNavigator,

    page: Page,

    /// Home page scroll animation
    scroll: SmoothScroll,

    /// Section requested from a detail page, scrolled to once the home
    /// page has been laid out
    pending_anchor: Option<String>,

    images: ImageCache,
}

impl FolioApp {
    /// Create a new application instance.
    pub fn new(config: AppConfig) -> Result<Self> {
        let navigator = SectionNavigator::with_options(
            default_sections(),
            config.navigator_options(),
            Duration::ZERO,
        )?;
        let home = HomePage::mount(navigator.sections(), &config, Duration::ZERO);
        let images = ImageCache::new(config.assets_dir.clone());
        let catalog = ProjectCatalog::builtin();
        log::info!("{} project(s) in catalog", catalog.len());

        Ok(Self {
            profile: Profile::builtin(),
            catalog,
            navigator,
            page: Page::Home(home),
            scroll: SmoothScroll::default(),
            pending_anchor: None,
            images,
            config,
        })
    }

    fn go_home(&mut self, now: Duration) {
        if let Page::Project(detail) = &mut self.page {
            detail.leave();
            log::info!("Leaving project '{}'", detail.project_id());
            self.page = Page::Home(HomePage::mount(self.navigator.sections(), &self.config, now));
        }
    }

    fn open_project(&mut self, project_id: &str, now: Duration) {
        if let Page::Home(home) = &mut self.page {
            home.unmount();
        }
        self.scroll.cancel();
        self.page = Page::Project(DetailPage::enter(project_id, &self.catalog, &self.config, now));
    }

    fn handle_nav(&mut self, action: NavAction, now: Duration) {
        match action {
            NavAction::None => {}
            NavAction::Home => {
                self.go_home(now);
                self.scroll.smooth_scroll_to(0.0);
            }
            NavAction::Section(section_id) => match &self.page {
                Page::Home(home) => {
                    self.navigator
                        .navigate_to(&section_id, home.layout(), &mut self.scroll);
                }
                Page::Project(_) => {
                    self.go_home(now);
                    // Highlight right away; scroll once the page has layout
                    self.navigator
                        .navigate_to(&section_id, &LayoutSnapshot::default(), &mut self.scroll);
                    if self.navigator.is_active(&section_id) {
                        self.pending_anchor = Some(section_id);
                    }
                }
            },
        }
    }

    fn handle_page(&mut self, action: PageAction, now: Duration) {
        match action {
            PageAction::None => {}
            PageAction::OpenProject(project_id) => self.open_project(&project_id, now),
            PageAction::Back => self.go_home(now),
        }
    }

    /// Scroll to a section requested before the home page had layout.
    fn resolve_pending_anchor(&mut self) {
        if let Page::Home(home) = &self.page {
            if home.layout().is_empty() {
                return;
            }
            if let Some(section_id) = self.pending_anchor.take() {
                self.navigator
                    .navigate_to(&section_id, home.layout(), &mut self.scroll);
            }
        }
    }

    /// Re-read the config file and switch every live tracker to its
    /// observation settings. Other settings take effect on the next page
    /// mount.
    fn reload_config(&mut self) {
        match crate::io::config::from_env() {
            Ok(config) => self.apply_config(config),
            Err(e) => log::warn!("Config reload failed: {:#}", e),
        }
    }

    fn apply_config(&mut self, config: AppConfig) {
        self.navigator.reconfigure(config.active_section);
        match &mut self.page {
            Page::Home(home) => home.reconfigure(config.sections),
            Page::Project(detail) => detail.reconfigure(config.reveal),
        }
        log::info!("Config reloaded");
        self.config = config;
    }

    /// Let scroll-spy take over again once a nav scroll has come to rest.
    fn settle_navigation(&mut self) {
        if !self.scroll.is_animating() {
            self.navigator.settle();
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        match &self.page {
            Page::Home(home) => home.next_deadline(),
            Page::Project(detail) => detail.next_deadline(),
        }
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0));
        let dt = ctx.input(|i| i.stable_dt);

        // Upload any images that finished decoding
        let images_pending = self.images.poll(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.reload_config();
        }

        // Scrolling by hand takes over from a running animation
        if ctx.input(|i| i.smooth_scroll_delta.y != 0.0) {
            self.scroll.cancel();
        }

        // Observe against last frame's layout; the batch is applied after
        // nav clicks so a click this frame wins over it
        let batch = match &mut self.page {
            Page::Home(home) => {
                home.update(now);
                Some(self.navigator.observe(home.layout()))
            }
            Page::Project(detail) => {
                detail.update(now);
                None
            }
        };

        // Navigation bar
        let nav_action = egui::TopBottomPanel::top("nav_bar")
            .exact_height(NAV_BAR_HEIGHT)
            .show(ctx, |ui| nav_bar::show(ui, &self.profile.brand, &self.navigator))
            .inner;
        self.handle_nav(nav_action, now);

        self.settle_navigation();
        if let Some(batch) = batch {
            self.navigator.apply(batch);
        }

        // Page content
        let scroll_to = self.scroll.step(dt);
        let page_action = egui::CentralPanel::default()
            .show(ctx, |ui| match &mut self.page {
                Page::Home(home) => {
                    let content = HomeContent {
                        sections: self.navigator.sections(),
                        profile: &self.profile,
                        catalog: &self.catalog,
                        images: &mut self.images,
                    };
                    match home.show(ui, content, scroll_to) {
                        HomeAction::None => PageAction::None,
                        HomeAction::OpenProject(project_id) => PageAction::OpenProject(project_id),
                    }
                }
                Page::Project(detail) => match detail.show(ui, &self.catalog, &mut self.images) {
                    DetailAction::None => PageAction::None,
                    DetailAction::Back => PageAction::Back,
                },
            })
            .inner;

        if let Page::Home(home) = &self.page {
            self.scroll
                .sync(home.layout().viewport.scroll_top, home.max_offset());
        }
        self.resolve_pending_anchor();
        self.handle_page(page_action, now);

        // Keep frames coming while something is moving or a timer is due
        if images_pending || self.scroll.is_animating() || self.pending_anchor.is_some() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_sub(now));
        }
    }
}
