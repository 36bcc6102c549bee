// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use log::warn;
use std::sync::Arc;

use crate::access::{MembershipAuthorizer, OpenAccess};
use crate::config::ValidatedConfig;
use crate::content::ContentStore;
use crate::public::dispatch::default_single_pipeline;
use crate::public::error::ErrorRenderer;
use crate::public::events::EventBus;
use crate::public::filters::SingleFilterPipeline;
use crate::public::seo::SeoMeta;
use crate::templates::{MiniJinjaEngine, TemplateEngine};

pub struct AppState {
    pub templates: Arc<dyn TemplateEngine>,
    pub error_renderer: ErrorRenderer,
    pub seo: SeoMeta,
    pub events: EventBus,
    pub filters: SingleFilterPipeline,
    pub authorizer: Arc<dyn MembershipAuthorizer>,
}

impl AppState {
    pub fn new(config: &ValidatedConfig, store: Arc<ContentStore>) -> Self {
        if let Some(homepage_id) = config.site.homepage_id {
            if store.page_by_id(homepage_id).is_none() {
                warn!(
                    "site.homepage_id {} has no matching page; the index view will render instead",
                    homepage_id
                );
            }
        }

        Self {
            templates: Arc::new(MiniJinjaEngine::new()),
            error_renderer: ErrorRenderer::new(config.app.name.clone()),
            seo: SeoMeta::from_site(&config.site),
            events: EventBus::new(),
            filters: default_single_pipeline(store),
            authorizer: Arc::new(OpenAccess),
        }
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn MembershipAuthorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    pub fn with_filters(mut self, filters: SingleFilterPipeline) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }
}
