// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::dispatch::ViewBinding;
use crate::content::SlugRecord;

/// Intermediate state of single-item resolution as it moves through the
/// filter pipeline: either still the raw slug, or a ready view binding.
#[derive(Debug, Clone, PartialEq)]
pub enum SingleResolution {
    Slug(SlugRecord),
    Binding(ViewBinding),
}

type SingleFilter = Box<dyn Fn(SingleResolution) -> SingleResolution + Send + Sync>;

/// Ordered pipeline of single-item resolution transformers. Collaborators
/// register closures that may turn a slug into a view binding; an empty
/// pipeline is the identity.
pub struct SingleFilterPipeline {
    filters: Vec<SingleFilter>,
}

impl SingleFilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn register<F>(&mut self, filter: F)
    where
        F: Fn(SingleResolution) -> SingleResolution + Send + Sync + 'static,
    {
        self.filters.push(Box::new(filter));
    }

    pub fn apply(&self, input: SingleResolution) -> SingleResolution {
        self.filters
            .iter()
            .fold(input, |resolution, filter| filter(resolution))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for SingleFilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
