// This file is part of the product Portico.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use crate::content::SlugRecord;

/// Notifications emitted while resolving public requests. Fire-and-forget;
/// listener return values are never consulted.
#[derive(Debug, Clone)]
pub enum PublicEvent {
    RenderingHome,
    RenderingSingle { slug: SlugRecord },
    RenderingSiteMap,
}

impl PublicEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PublicEvent::RenderingHome => "rendering-home",
            PublicEvent::RenderingSingle { .. } => "rendering-single",
            PublicEvent::RenderingSiteMap => "rendering-sitemap",
        }
    }
}

type EventListener = Box<dyn Fn(&PublicEvent) + Send + Sync>;

/// Ordered listener list; listeners run synchronously in subscription order.
pub struct EventBus {
    listeners: Vec<EventListener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&PublicEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&self, event: &PublicEvent) {
        log::trace!("Emitting '{}' to {} listeners", event.name(), self.listeners.len());
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn listeners_run_in_subscription_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second"] {
            let seen = seen.clone();
            bus.subscribe(move |event| {
                seen.lock().unwrap().push(format!("{}:{}", tag, event.name()));
            });
        }

        bus.emit(&PublicEvent::RenderingHome);
        bus.emit(&PublicEvent::RenderingSiteMap);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                "first:rendering-home",
                "second:rendering-home",
                "first:rendering-sitemap",
                "second:rendering-sitemap",
            ]
        );
    }

    #[test]
    fn single_event_carries_the_slug() {
        let captured = Arc::new(Mutex::new(None));
        let mut bus = EventBus::new();
        let sink = captured.clone();
        bus.subscribe(move |event| {
            if let PublicEvent::RenderingSingle { slug } = event {
                *sink.lock().unwrap() = Some(slug.key.clone());
            }
        });

        bus.emit(&PublicEvent::RenderingSingle {
            slug: SlugRecord {
                key: "about-us".to_string(),
                prefix: String::new(),
                reference_id: 1,
                reference_type: "page".to_string(),
            },
        });

        assert_eq!(captured.lock().unwrap().as_deref(), Some("about-us"));
    }
}
