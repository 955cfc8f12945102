// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Texture cache for project images.
//!
//! Images are decoded on background threads and uploaded as textures the
//! first frame after they arrive. A missing or broken file is logged once
//! and drawn as a placeholder.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

use crate::io::media::{self, LoadedImage};

enum Slot {
    Loading(Receiver<Result<LoadedImage, String>>),
    Ready(egui::TextureHandle),
    Failed,
}

pub struct ImageCache {
    assets_dir: PathBuf,
    slots: HashMap<String, Slot>,
}

impl ImageCache {
    pub fn new(assets_dir: PathBuf) -> Self {
        Self {
            assets_dir,
            slots: HashMap::new(),
        }
    }

    /// Start loading `image_ref` unless it is already known.
    pub fn request(&mut self, image_ref: &str) {
        if self.slots.contains_key(image_ref) {
            return;
        }

        let (sender, receiver) = channel();
        let path = media::resolve_asset(&self.assets_dir, image_ref);

        // Spawn background thread for decoding
        std::thread::spawn(move || {
            let result = media::load_image(&path).map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });

        self.slots
            .insert(image_ref.to_string(), Slot::Loading(receiver));
    }

    /// Upload finished decodes. Returns true while anything is still loading.
    pub fn poll(&mut self, ctx: &egui::Context) -> bool {
        let mut pending = false;

        for (image_ref, slot) in self.slots.iter_mut() {
            let Slot::Loading(receiver) = slot else {
                continue;
            };

            match receiver.try_recv() {
                Ok(Ok(loaded)) => {
                    let size = [loaded.width as usize, loaded.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                    let texture =
                        ctx.load_texture(image_ref.as_str(), color_image, egui::TextureOptions::LINEAR);
                    log::info!("Loaded image {} ({}x{})", image_ref, loaded.width, loaded.height);
                    *slot = Slot::Ready(texture);
                }
                Ok(Err(e)) => {
                    log::warn!("Image {} unavailable: {}", image_ref, e);
                    *slot = Slot::Failed;
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => pending = true,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    log::warn!("Image loader for {} went away", image_ref);
                    *slot = Slot::Failed;
                }
            }
        }

        pending
    }

    /// Draw `image_ref` scaled to `width`, keeping its aspect ratio, or a
    /// placeholder of `width` x `fallback_height` until it is available.
    pub fn show(&mut self, ui: &mut egui::Ui, image_ref: &str, alt: &str, width: f32, fallback_height: f32) {
        self.request(image_ref);

        if let Some(Slot::Ready(texture)) = self.slots.get(image_ref) {
            let [w, h] = texture.size();
            let height = if w > 0 {
                width * h as f32 / w as f32
            } else {
                fallback_height
            };
            let sized = egui::load::SizedTexture::new(texture.id(), egui::vec2(width, height));
            ui.add(egui::Image::from_texture(sized).rounding(8.0));
            return;
        }

        let loading = matches!(self.slots.get(image_ref), Some(Slot::Loading(_)));
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, fallback_height), egui::Sense::hover());
        let painter = ui.painter();
        painter.rect_filled(rect, 8.0, egui::Color32::from_gray(225));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            if loading { "Loading..." } else { alt },
            egui::FontId::proportional(14.0),
            egui::Color32::from_gray(110),
        );
    }
}
