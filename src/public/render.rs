// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::dispatch::{Breadcrumb, ViewBinding};
use super::seo::SeoMeta;
use crate::templates::TemplateEngine;
use minijinja::{Value, context};

/// Render a view binding through the theme scope: the theme template for the
/// view is tried first, then the binding's packaged default template.
pub fn render_binding(
    engine: &dyn TemplateEngine,
    app_name: &str,
    seo: &SeoMeta,
    breadcrumb: &Breadcrumb,
    binding: &ViewBinding,
) -> Result<String, minijinja::Error> {
    let ctx = binding_context(app_name, seo, breadcrumb, binding);
    let theme_template = format!("public/{}.html", binding.view);

    match engine.render(&theme_template, ctx.clone()) {
        Ok(html) => Ok(html),
        Err(error) if error.kind() == minijinja::ErrorKind::TemplateNotFound => {
            match &binding.default_template {
                Some(default_template) => engine.render(default_template, ctx),
                None => Err(error),
            }
        }
        Err(error) => Err(error),
    }
}

fn binding_context(
    app_name: &str,
    seo: &SeoMeta,
    breadcrumb: &Breadcrumb,
    binding: &ViewBinding,
) -> Value {
    context! {
        app_name => app_name,
        seo => Value::from_serialize(seo),
        breadcrumbs => Value::from_serialize(breadcrumb.entries()),
        canonical_key => &binding.canonical_key,
        data => Value::from_serialize(&binding.data),
    }
}
