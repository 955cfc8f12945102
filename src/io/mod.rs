// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration and media files.

pub mod config;
pub mod media;
