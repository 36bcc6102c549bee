// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::config::SiteConfig;
use serde::Serialize;

/// SEO metadata shared by every public render. Computed once at startup from
/// the site settings and passed into the dispatcher's render context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoMeta {
    pub title: Option<String>,
    pub og_type: String,
}

impl SeoMeta {
    /// When the site name is hidden the page title is the theme's site title,
    /// overridden by the more specific SEO title when present. The Open Graph
    /// type is always "website".
    pub fn from_site(site: &SiteConfig) -> Self {
        let mut title = None;
        if !site.show_site_name {
            title = site.site_title.clone();
            if let Some(seo_title) = &site.seo_title {
                title = Some(seo_title.clone());
            }
        }

        Self {
            title,
            og_type: "website".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(show_site_name: bool, site_title: Option<&str>, seo_title: Option<&str>) -> SiteConfig {
        SiteConfig {
            show_site_name,
            site_title: site_title.map(str::to_string),
            seo_title: seo_title.map(str::to_string),
            homepage_id: None,
            base_url: None,
        }
    }

    #[test]
    fn visible_site_name_leaves_title_unset() {
        let meta = SeoMeta::from_site(&site(true, Some("Faculty"), Some("Faculty of CS")));
        assert_eq!(meta.title, None);
        assert_eq!(meta.og_type, "website");
    }

    #[test]
    fn hidden_site_name_uses_site_title() {
        let meta = SeoMeta::from_site(&site(false, Some("Faculty"), None));
        assert_eq!(meta.title.as_deref(), Some("Faculty"));
    }

    #[test]
    fn seo_title_overrides_site_title() {
        let meta = SeoMeta::from_site(&site(false, Some("Faculty"), Some("Faculty of CS")));
        assert_eq!(meta.title.as_deref(), Some("Faculty of CS"));
    }
}
