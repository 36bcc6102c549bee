// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::events::{EventBus, PublicEvent};
use super::filters::{SingleFilterPipeline, SingleResolution};
use crate::config::SiteConfig;
use crate::content::{
    ContentStore, Page, Post, Profile, REFERENCE_TYPE_PAGE, REFERENCE_TYPE_POST, SlugRecord,
};
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Resolved (view, data, canonical key) tuple driving rendering. Constructed
/// per-request and discarded after the response.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewBinding {
    pub view: String,
    pub default_template: Option<String>,
    pub data: Map<String, Value>,
    pub canonical_key: String,
    /// Entity name shown in the breadcrumb trail for single renders.
    pub label: Option<String>,
}

impl ViewBinding {
    pub fn new(view: &str, canonical_key: &str) -> Self {
        Self {
            view: view.to_string(),
            default_template: None,
            data: Map::new(),
            canonical_key: canonical_key.to_string(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_default_template(mut self, template: &str) -> Self {
        self.default_template = Some(template.to_string());
        self
    }

    pub fn with_data(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }
}

/// Outcome of dispatching a public URL key.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Render(ViewBinding),
    Redirect(String),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreadcrumbEntry {
    pub label: String,
    pub url: String,
}

/// Navigation trail built up while resolving a request and injected into
/// every render context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breadcrumb {
    entries: Vec<BreadcrumbEntry>,
}

impl Breadcrumb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &str, url: &str) {
        self.entries.push(BreadcrumbEntry {
            label: label.to_string(),
            url: url.to_string(),
        });
    }

    pub fn entries(&self) -> &[BreadcrumbEntry] {
        &self.entries
    }
}

/// One row of the closed fixed-route table: a literal URL key mapped to a
/// static view binding. Checked before the generic slug lookup.
struct FixedRoute {
    key: &'static str,
    build: fn(&ContentStore, &str) -> ViewBinding,
}

/// Literal keys carried over from the source site. The table is ordered and
/// closed; new public content goes through the slug table instead.
const FIXED_ROUTES: &[FixedRoute] = &[
    FixedRoute {
        key: "/profile/all",
        build: all_profiles_binding,
    },
    FixedRoute {
        key: "/tuyensinh/all",
        build: admissions_binding,
    },
    FixedRoute {
        key: "/ieee-icces",
        build: conference_binding,
    },
    FixedRoute {
        key: "lich-su-phat-trien",
        build: history_binding,
    },
];

/// Literal keys are matched with or without a leading slash, since the table
/// inherited both spellings from the source site.
fn fixed_route_for(key: &str) -> Option<&'static FixedRoute> {
    let requested = key.trim_start_matches('/');
    FIXED_ROUTES
        .iter()
        .find(|route| route.key.trim_start_matches('/') == requested)
}

fn all_profiles_binding(store: &ContentStore, key: &str) -> ViewBinding {
    ViewBinding::new("category", key)
        .with_default_template("defaults/category.html")
        .with_data("profiles", json!(store.profiles()))
}

fn admissions_binding(_store: &ContentStore, key: &str) -> ViewBinding {
    ViewBinding::new("tuyensinh", key)
        .with_default_template("defaults/tuyensinh.html")
        .with_data("items", json!([1]))
}

fn conference_binding(_store: &ContentStore, key: &str) -> ViewBinding {
    ViewBinding::new("icce", key)
        .with_default_template("defaults/icce.html")
        .with_data("items", json!([1]))
}

fn history_binding(_store: &ContentStore, key: &str) -> ViewBinding {
    ViewBinding::new("lichsuphattrien", key)
        .with_default_template("defaults/lichsuphattrien.html")
        .with_data("items", json!([1]))
}

fn index_binding() -> ViewBinding {
    ViewBinding::new("index", "")
}

fn profile_binding(profile: &Profile, slug: &SlugRecord) -> ViewBinding {
    ViewBinding::new("profile", &slug.key)
        .with_default_template("defaults/profile.html")
        .with_label(&profile.name)
        .with_data("profile", json!(profile))
}

fn page_binding(page: &Page, _slug: &SlugRecord) -> ViewBinding {
    // canonical key comes from the entity, so stale slug records redirect
    ViewBinding::new("page", &page.slug)
        .with_label(&page.name)
        .with_data("page", json!(page))
}

fn post_binding(post: &Post, _slug: &SlugRecord) -> ViewBinding {
    ViewBinding::new("post", &post.slug)
        .with_label(&post.name)
        .with_data("post", json!(post))
}

/// The pipeline installed by the server binary: resolves page and post slugs
/// into their view bindings. A bare pipeline (identity) leaves every slug to
/// the profile fallback.
pub fn default_single_pipeline(store: Arc<ContentStore>) -> SingleFilterPipeline {
    let mut pipeline = SingleFilterPipeline::new();

    let pages = store.clone();
    pipeline.register(move |resolution| match resolution {
        SingleResolution::Slug(slug) if slug.reference_type == REFERENCE_TYPE_PAGE => {
            match pages.page_by_id(slug.reference_id) {
                Some(page) => SingleResolution::Binding(page_binding(page, &slug)),
                None => SingleResolution::Slug(slug),
            }
        }
        other => other,
    });

    let posts = store;
    pipeline.register(move |resolution| match resolution {
        SingleResolution::Slug(slug) if slug.reference_type == REFERENCE_TYPE_POST => {
            match posts.post_by_id(slug.reference_id) {
                Some(post) => SingleResolution::Binding(post_binding(post, &slug)),
                None => SingleResolution::Slug(slug),
            }
        }
        other => other,
    });

    pipeline
}

/// Public request dispatcher: decides which view to render for a URL key, or
/// signals a redirect or not-found. Borrows its collaborators; every method
/// is a pure read over the backing data plus fire-and-forget notifications.
pub struct Dispatcher<'a> {
    store: &'a ContentStore,
    site: &'a SiteConfig,
    filters: &'a SingleFilterPipeline,
    events: &'a EventBus,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        store: &'a ContentStore,
        site: &'a SiteConfig,
        filters: &'a SingleFilterPipeline,
        events: &'a EventBus,
    ) -> Self {
        Self {
            store,
            site,
            filters,
            events,
        }
    }

    /// Resolve the site root. A configured homepage delegates to its slug;
    /// otherwise the default index view renders.
    pub fn resolve_home(&self, breadcrumb: &mut Breadcrumb) -> Dispatch {
        if let Some(homepage_id) = self.site.homepage_id {
            // a dangling id is already warned about at startup
            match self.store.page_by_id(homepage_id) {
                Some(page) => return self.resolve_by_key(&page.slug, breadcrumb),
                None => debug!("Configured homepage_id {} has no page", homepage_id),
            }
        }

        breadcrumb.push("Home", "/");
        self.events.emit(&PublicEvent::RenderingHome);
        Dispatch::Render(index_binding())
    }

    pub fn resolve_by_key(&self, key: &str, breadcrumb: &mut Breadcrumb) -> Dispatch {
        if key.is_empty() {
            return self.resolve_home(breadcrumb);
        }

        if let Some(route) = fixed_route_for(key) {
            debug!("Fixed route hit for '{}'", key);
            return Dispatch::Render((route.build)(self.store, key));
        }

        let slug = match self.store.find_slug(key, "") {
            Some(slug) => slug,
            None => return Dispatch::NotFound,
        };

        let resolution = self.filters.apply(SingleResolution::Slug(slug.clone()));

        let binding = match resolution {
            SingleResolution::Binding(binding) => Some(binding),
            SingleResolution::Slug(returned) if returned == *slug => self
                .store
                .profile_by_id(returned.reference_id)
                .map(|profile| profile_binding(profile, &returned)),
            // a filter rewrote the slug without producing a binding
            SingleResolution::Slug(_) => None,
        };

        let binding = match binding {
            Some(binding) => binding,
            // not-found and redirect paths emit no rendering event
            None => return Dispatch::NotFound,
        };

        if binding.canonical_key != key {
            debug!(
                "Redirecting '{}' to canonical key '{}'",
                key, binding.canonical_key
            );
            return Dispatch::Redirect(binding.canonical_key);
        }

        if let Some(label) = &binding.label {
            breadcrumb.push(label, &format!("/{}", binding.canonical_key));
        }
        self.events.emit(&PublicEvent::RenderingSingle { slug: slug.clone() });
        Dispatch::Render(binding)
    }
}
