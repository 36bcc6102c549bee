// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::web;

pub mod dispatch;
pub mod error;
pub mod events;
pub mod filters;
pub mod handlers;
pub mod render;
pub mod seo;
pub mod sitemap;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/robots.txt", web::get().to(sitemap::robots_txt))
        .route("/sitemap.xml", web::get().to(sitemap::sitemap_xml))
        .route("/", web::get().to(handlers::index))
        .route("/{key:.*}", web::get().to(handlers::handle_route));
}
