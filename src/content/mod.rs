// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use serde::{Deserialize, Serialize};

pub mod store;

pub use store::ContentStore;

/// Reference type tag on a slug pointing at a page.
pub const REFERENCE_TYPE_PAGE: &str = "page";
/// Reference type tag on a slug pointing at a post.
pub const REFERENCE_TYPE_POST: &str = "post";
/// Reference type tag on a slug pointing at a profile.
pub const REFERENCE_TYPE_PROFILE: &str = "profile";

/// A URL-path key mapping to a content entity. Looked up by (key, prefix);
/// immutable for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlugRecord {
    pub key: String,
    #[serde(default)]
    pub prefix: String,
    pub reference_id: u64,
    pub reference_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Page {
    pub id: u64,
    pub name: String,
    /// Canonical slug key of the page. A request arriving through a stale
    /// slug record is redirected here.
    pub slug: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Post {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
}

/// External entity matched against a slug's reference_id; read-only within
/// the public flow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug)]
pub enum ContentError {
    LoadError(String),
    IntegrityError(String),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::LoadError(msg) => write!(f, "Content load error: {}", msg),
            ContentError::IntegrityError(msg) => write!(f, "Content integrity error: {}", msg),
        }
    }
}

impl std::error::Error for ContentError {}
