// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::events::PublicEvent;
use crate::app_state::AppState;
use crate::config::ValidatedConfig;
use crate::content::ContentStore;
use actix_web::{HttpRequest, HttpResponse, Result, web};
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::time::SystemTime;

pub async fn robots_txt(
    req: HttpRequest,
    config: web::Data<ValidatedConfig>,
) -> Result<HttpResponse> {
    let base_url = site_base_url(&req, &config);

    let mut body = String::new();
    body.push_str("User-agent: *\n");
    body.push_str("Allow: /\n\n");
    let _ = writeln!(body, "Sitemap: {}/sitemap.xml", base_url);

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body))
}

pub async fn sitemap_xml(
    req: HttpRequest,
    config: web::Data<ValidatedConfig>,
    store: web::Data<ContentStore>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse> {
    app_state.events.emit(&PublicEvent::RenderingSiteMap);

    let base_url = site_base_url(&req, &config);
    let last_modified = store.last_modified();

    let mut entries = vec![SitemapEntry {
        loc: format!("{}/", base_url),
        last_modified,
    }];
    for slug in store.slugs() {
        let key = slug.key.trim_start_matches('/');
        entries.push(SitemapEntry {
            loc: format!("{}/{}", base_url, key),
            last_modified,
        });
    }

    entries.sort_by(|left, right| left.loc.cmp(&right.loc));
    entries.dedup_by(|left, right| left.loc == right.loc);

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for entry in entries {
        let loc = escape_xml(&entry.loc);
        let lastmod = format_lastmod(entry.last_modified);
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", loc);
        let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod);
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(xml))
}

struct SitemapEntry {
    loc: String,
    last_modified: SystemTime,
}

fn site_base_url(req: &HttpRequest, config: &ValidatedConfig) -> String {
    if let Some(base_url) = &config.site.base_url {
        return base_url.clone();
    }
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn format_lastmod(timestamp: SystemTime) -> String {
    let datetime: DateTime<Utc> = timestamp.into();
    datetime.format("%Y-%m-%d").to_string()
}
