// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use minijinja::{Environment, Value, default_auto_escape_callback};

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

/// Template loader for minijinja that loads from embedded sources
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        // Error pages
        "error_403.html" => Some(include_str!("../public/templates/error_403.html")),
        "error_404.html" => Some(include_str!("../public/templates/error_404.html")),
        "error_500.html" => Some(include_str!("../public/templates/error_500.html")),

        // Theme views
        "public/index.html" => Some(include_str!("../public/templates/index.html")),
        "public/page.html" => Some(include_str!("../public/templates/page.html")),
        "public/post.html" => Some(include_str!("../public/templates/post.html")),
        "public/profile.html" => Some(include_str!("../public/templates/profile.html")),
        "public/category.html" => Some(include_str!("../public/templates/category.html")),

        // Packaged defaults for views the theme does not override
        "defaults/category.html" => {
            Some(include_str!("../public/templates/defaults/category.html"))
        }
        "defaults/profile.html" => {
            Some(include_str!("../public/templates/defaults/profile.html"))
        }
        "defaults/tuyensinh.html" => {
            Some(include_str!("../public/templates/defaults/tuyensinh.html"))
        }
        "defaults/icce.html" => Some(include_str!("../public/templates/defaults/icce.html")),
        "defaults/lichsuphattrien.html" => Some(include_str!(
            "../public/templates/defaults/lichsuphattrien.html"
        )),

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn renders_embedded_error_template() {
        let engine = MiniJinjaEngine::new();
        let html = engine
            .render("error_404.html", context! { app_name => "Portico" })
            .expect("render 404");
        assert!(html.contains("404"));
        assert!(html.contains("Portico"));
    }

    #[test]
    fn unknown_template_reports_not_found() {
        let engine = MiniJinjaEngine::new();
        let error = engine
            .render("public/no-such-view.html", context! {})
            .expect_err("missing template");
        assert_eq!(error.kind(), minijinja::ErrorKind::TemplateNotFound);
    }
}
