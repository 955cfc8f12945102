// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Static portfolio content.

pub mod catalog;
pub mod profile;
pub mod project;
