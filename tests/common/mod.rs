// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use portico::app_state::AppState;
use portico::config::{
    AppConfig, ContentConfig, LoggingConfig, ServerConfig, SiteConfig, ValidatedConfig,
};
use portico::content::ContentStore;
use portico::public;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

pub const APP_NAME: &str = "Portico Test";

const CONTENT: &str = r#"
[[slugs]]
key = "home"
reference_id = 1
reference_type = "page"

[[slugs]]
key = "about-us"
reference_id = 2
reference_type = "page"

[[slugs]]
key = "old-about"
reference_id = 2
reference_type = "page"

[[slugs]]
key = "hello-world"
reference_id = 3
reference_type = "post"

[[slugs]]
key = "an-nguyen"
reference_id = 7
reference_type = "profile"

[[pages]]
id = 1
name = "Home"
slug = "home"
content = "Welcome to the faculty."

[[pages]]
id = 2
name = "About us"
slug = "about-us"
content = "Who we are."

[[posts]]
id = 3
name = "Hello World"
slug = "hello-world"
content = "First post."

[[profiles]]
id = 7
name = "An Nguyen"
title = "Lecturer"
bio = "Teaches systems."

[[profiles]]
id = 8
name = "Binh Tran"
bio = "Researches networks."
"#;

pub struct TestHarness {
    pub tempdir: TempDir,
    pub config: Arc<ValidatedConfig>,
    pub store: Arc<ContentStore>,
    pub app_state: Arc<AppState>,
}

/// Owned snapshot of the shared application data, handed to the app factory
/// by value so the built service is free of harness borrows.
#[derive(Clone)]
pub struct AppBundle {
    pub config: Arc<ValidatedConfig>,
    pub store: Arc<ContentStore>,
    pub app_state: Arc<AppState>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_site(SiteConfig::default())
    }

    pub fn app_bundle(&self) -> AppBundle {
        AppBundle {
            config: self.config.clone(),
            store: self.store.clone(),
            app_state: self.app_state.clone(),
        }
    }

    pub fn with_site(site: SiteConfig) -> Self {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let content_path = tempdir.path().join("content.toml");
        fs::write(&content_path, CONTENT).expect("write content database");

        let config = Arc::new(ValidatedConfig {
            app: AppConfig {
                name: APP_NAME.to_string(),
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                workers: None,
            },
            site,
            content: ContentConfig {
                path: content_path.clone(),
            },
            logging: LoggingConfig::default(),
        });

        let store = Arc::new(ContentStore::load(&content_path).expect("content store"));
        let app_state = Arc::new(AppState::new(&config, store.clone()));

        Self {
            tempdir,
            config,
            store,
            app_state,
        }
    }
}

pub fn build_test_app(
    bundle: AppBundle,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(bundle.config))
        .app_data(web::Data::from(bundle.store))
        .app_data(web::Data::from(bundle.app_state))
        .configure(public::configure)
}
