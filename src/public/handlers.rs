// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::dispatch::{Breadcrumb, Dispatch, Dispatcher};
use super::{error, render};
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::content::ContentStore;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use log::debug;

pub async fn index(
    req: HttpRequest,
    config: web::Data<ValidatedConfig>,
    store: web::Data<ContentStore>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if let Some(denied) = authorize(&req, &app_state)? {
        return Ok(denied);
    }

    let mut breadcrumb = Breadcrumb::new();
    let dispatcher = Dispatcher::new(
        store.as_ref(),
        &config.site,
        &app_state.filters,
        &app_state.events,
    );
    let dispatch = dispatcher.resolve_home(&mut breadcrumb);
    respond(dispatch, &breadcrumb, &config, &app_state)
}

pub async fn handle_route(
    req: HttpRequest,
    config: web::Data<ValidatedConfig>,
    store: web::Data<ContentStore>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if let Some(denied) = authorize(&req, &app_state)? {
        return Ok(denied);
    }

    let key: String = req.match_info().get("key").unwrap_or("").to_string();

    let mut breadcrumb = Breadcrumb::new();
    let dispatcher = Dispatcher::new(
        store.as_ref(),
        &config.site,
        &app_state.filters,
        &app_state.events,
    );
    let dispatch = dispatcher.resolve_by_key(&key, &mut breadcrumb);
    respond(dispatch, &breadcrumb, &config, &app_state)
}

/// Membership gate; returns the prepared 403 response on denial.
fn authorize(req: &HttpRequest, app_state: &AppState) -> Result<Option<HttpResponse>> {
    match app_state.authorizer.authorize(req) {
        Ok(()) => Ok(None),
        Err(denied) => {
            debug!("Request to {} denied: {}", req.path(), denied);
            let response = error::serve_403(
                &app_state.error_renderer,
                Some(app_state.templates.as_ref()),
            )?;
            Ok(Some(response))
        }
    }
}

fn respond(
    dispatch: Dispatch,
    breadcrumb: &Breadcrumb,
    config: &ValidatedConfig,
    app_state: &AppState,
) -> Result<HttpResponse> {
    match dispatch {
        Dispatch::Render(binding) => {
            let html = match render::render_binding(
                app_state.templates.as_ref(),
                &config.app.name,
                &app_state.seo,
                breadcrumb,
                &binding,
            ) {
                Ok(html) => html,
                Err(e) => {
                    log::error!("Failed to render view '{}': {}", binding.view, e);
                    return error::serve_500(
                        &app_state.error_renderer,
                        Some(app_state.templates.as_ref()),
                    );
                }
            };
            Ok(HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(html))
        }
        Dispatch::Redirect(canonical_key) => {
            let location = format!("/{}", canonical_key.trim_start_matches('/'));
            Ok(HttpResponse::Found()
                .insert_header(("Location", location))
                .finish())
        }
        Dispatch::NotFound => error::serve_404(
            &app_state.error_renderer,
            Some(app_state.templates.as_ref()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{AccessDenied, MembershipAuthorizer};
    use crate::config::{
        AppConfig, ContentConfig, LoggingConfig, ServerConfig, SiteConfig, ValidatedConfig,
    };
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use std::sync::Arc;
    use std::time::SystemTime;

    struct DenyAll;

    impl MembershipAuthorizer for DenyAll {
        fn authorize(&self, _req: &HttpRequest) -> Result<(), AccessDenied> {
            Err(AccessDenied {
                reason: "membership required".to_string(),
            })
        }
    }

    fn test_config() -> ValidatedConfig {
        ValidatedConfig {
            app: AppConfig {
                name: "Portico Test".to_string(),
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                workers: None,
            },
            site: SiteConfig::default(),
            content: ContentConfig {
                path: "content.toml".into(),
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn denied_request_gets_a_403_response() {
        let config = test_config();
        let store = Arc::new(
            ContentStore::from_toml_str("", SystemTime::UNIX_EPOCH).expect("empty store"),
        );
        let app_state = AppState::new(&config, store).with_authorizer(Arc::new(DenyAll));

        let req = TestRequest::get().uri("/about-us").to_http_request();
        let denied = authorize(&req, &app_state).expect("authorize").expect("denied");

        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn redirect_response_targets_canonical_key() {
        let config = test_config();
        let store = Arc::new(
            ContentStore::from_toml_str("", SystemTime::UNIX_EPOCH).expect("empty store"),
        );
        let app_state = AppState::new(&config, store);

        let response = respond(
            Dispatch::Redirect("about-us".to_string()),
            &Breadcrumb::new(),
            &config,
            &app_state,
        )
        .expect("response");

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response
                .headers()
                .get("Location")
                .and_then(|v| v.to_str().ok()),
            Some("/about-us")
        );
    }
}
