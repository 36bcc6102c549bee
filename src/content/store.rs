// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::{ContentError, Page, Post, Profile, SlugRecord};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

#[derive(Debug, Deserialize, Default)]
struct ContentFile {
    #[serde(default)]
    slugs: Vec<SlugRecord>,
    #[serde(default)]
    pages: Vec<Page>,
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(default)]
    profiles: Vec<Profile>,
}

/// Read-only content database, loaded once at startup. The slug table is the
/// SlugLookup contract; pages, posts and profiles are the entities slugs
/// reference.
pub struct ContentStore {
    slugs: Vec<SlugRecord>,
    slug_index: HashMap<(String, String), usize>,
    pages: HashMap<u64, Page>,
    posts: HashMap<u64, Post>,
    profiles: Vec<Profile>,
    profile_index: HashMap<u64, usize>,
    last_modified: SystemTime,
}

impl ContentStore {
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path).map_err(|error| {
            ContentError::LoadError(format!("cannot read {}: {}", path.display(), error))
        })?;
        let last_modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .unwrap_or_else(|_| SystemTime::now());
        let store = Self::from_toml_str(&text, last_modified)?;
        debug!(
            "Loaded content database {}: {} slugs, {} pages, {} posts, {} profiles",
            path.display(),
            store.slugs.len(),
            store.pages.len(),
            store.posts.len(),
            store.profiles.len()
        );
        Ok(store)
    }

    pub fn from_toml_str(text: &str, last_modified: SystemTime) -> Result<Self, ContentError> {
        let file: ContentFile = toml::from_str(text)
            .map_err(|error| ContentError::LoadError(format!("cannot parse content: {}", error)))?;

        let mut slug_index = HashMap::new();
        for (position, slug) in file.slugs.iter().enumerate() {
            let entry = (slug.key.clone(), slug.prefix.clone());
            if slug_index.insert(entry, position).is_some() {
                return Err(ContentError::IntegrityError(format!(
                    "duplicate slug (key='{}', prefix='{}')",
                    slug.key, slug.prefix
                )));
            }
        }

        let mut pages = HashMap::new();
        for page in file.pages {
            if let Some(existing) = pages.insert(page.id, page) {
                return Err(ContentError::IntegrityError(format!(
                    "duplicate page id {}",
                    existing.id
                )));
            }
        }

        let mut posts = HashMap::new();
        for post in file.posts {
            if let Some(existing) = posts.insert(post.id, post) {
                return Err(ContentError::IntegrityError(format!(
                    "duplicate post id {}",
                    existing.id
                )));
            }
        }

        let mut profile_index = HashMap::new();
        for (position, profile) in file.profiles.iter().enumerate() {
            if profile_index.insert(profile.id, position).is_some() {
                return Err(ContentError::IntegrityError(format!(
                    "duplicate profile id {}",
                    profile.id
                )));
            }
        }

        for slug in &file.slugs {
            let known = match slug.reference_type.as_str() {
                super::REFERENCE_TYPE_PAGE => pages.contains_key(&slug.reference_id),
                super::REFERENCE_TYPE_POST => posts.contains_key(&slug.reference_id),
                super::REFERENCE_TYPE_PROFILE => profile_index.contains_key(&slug.reference_id),
                _ => true, // foreign reference types are resolved by registered filters
            };
            if !known {
                warn!(
                    "Slug '{}' references missing {} {}",
                    slug.key, slug.reference_type, slug.reference_id
                );
            }
        }

        Ok(Self {
            slugs: file.slugs,
            slug_index,
            pages,
            posts,
            profiles: file.profiles,
            profile_index,
            last_modified,
        })
    }

    pub fn find_slug(&self, key: &str, prefix: &str) -> Option<&SlugRecord> {
        self.slug_index
            .get(&(key.to_string(), prefix.to_string()))
            .map(|&position| &self.slugs[position])
    }

    pub fn page_by_id(&self, id: u64) -> Option<&Page> {
        self.pages.get(&id)
    }

    pub fn post_by_id(&self, id: u64) -> Option<&Post> {
        self.posts.get(&id)
    }

    pub fn profile_by_id(&self, id: u64) -> Option<&Profile> {
        self.profile_index
            .get(&id)
            .map(|&position| &self.profiles[position])
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn slugs(&self) -> &[SlugRecord] {
        &self.slugs
    }

    pub fn last_modified(&self) -> SystemTime {
        self.last_modified
    }
}
