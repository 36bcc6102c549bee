// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::templates::{ErrorPageContext, TemplateEngine, render_minijinja_template};
use actix_web::{HttpResponse, Result};

#[derive(Clone)]
pub struct ErrorRenderer {
    app_name: String,
}

impl ErrorRenderer {
    pub fn new(app_name: String) -> Self {
        Self { app_name }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

pub fn serve_404(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    let html = render_error_page(
        renderer,
        template_engine,
        "error_404.html",
        fallback_404_html,
    );
    Ok(with_no_cache_headers(HttpResponse::NotFound()).body(html))
}

pub fn serve_403(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    let html = render_error_page(
        renderer,
        template_engine,
        "error_403.html",
        fallback_403_html,
    );
    Ok(with_no_cache_headers(HttpResponse::Forbidden()).body(html))
}

pub fn serve_500(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
) -> Result<HttpResponse> {
    let html = render_error_page(
        renderer,
        template_engine,
        "error_500.html",
        fallback_500_html,
    );
    Ok(with_no_cache_headers(HttpResponse::InternalServerError()).body(html))
}

fn render_error_page(
    renderer: &ErrorRenderer,
    template_engine: Option<&dyn TemplateEngine>,
    template_name: &str,
    fallback: fn(&str) -> String,
) -> String {
    let app_name = renderer.app_name();
    let context = ErrorPageContext::new(app_name).to_value();

    match template_engine {
        Some(engine) => match render_minijinja_template(engine, template_name, context) {
            Ok(html) => html,
            Err(e) => {
                log::error!("Failed to render {} template: {}", template_name, e);
                fallback(app_name)
            }
        },
        None => fallback(app_name),
    }
}

fn with_no_cache_headers(
    mut builder: actix_web::HttpResponseBuilder,
) -> actix_web::HttpResponseBuilder {
    builder
        .content_type("text/html; charset=utf-8")
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .insert_header(("Pragma", "no-cache"))
        .insert_header(("Expires", "0"));
    builder
}

fn fallback_404_html(app_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>404 - Page Not Found | {}</title></head>
<body><h1>404 - Page Not Found</h1></body></html>"#,
        app_name
    )
}

fn fallback_403_html(app_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>403 - Forbidden | {}</title></head>
<body><h1>403 - Forbidden</h1></body></html>"#,
        app_name
    )
}

fn fallback_500_html(app_name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>500 - Internal Server Error | {}</title></head>
<body><h1>500 - Internal Server Error</h1></body></html>"#,
        app_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn serve_404_without_engine_uses_fallback() {
        let renderer = ErrorRenderer::new("Portico".to_string());
        let response = serve_404(&renderer, None).expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response
                .headers()
                .get("Cache-Control")
                .and_then(|v| v.to_str().ok()),
            Some("no-cache, no-store, must-revalidate")
        );
    }

    #[test]
    fn serve_403_is_forbidden() {
        let renderer = ErrorRenderer::new("Portico".to_string());
        let response = serve_403(&renderer, None).expect("response");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
