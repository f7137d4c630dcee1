//! Translation map with raw-key fallback.
//!
//! The backend serves a flat key-to-string mapping per language. A
//! missing key renders as the key itself, and a failed load degrades to
//! an empty map -- translations never block the dashboard.

use std::collections::HashMap;

use tracing::warn;

use drdash_api::DashboardClient;

#[derive(Debug, Default, Clone)]
pub struct Translations {
    map: HashMap<String, String>,
}

impl Translations {
    pub fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    /// Look up a key, falling back to the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.map.get(key).map_or(key, String::as_str)
    }
}

/// Fetch translations for `lang`, degrading to raw keys on failure.
pub async fn load(client: &DashboardClient, lang: &str) -> Translations {
    match client.fetch_translations(lang).await {
        Ok(map) => Translations::new(map),
        Err(e) => {
            warn!(error = %e, lang, "failed to load translations, falling back to raw keys");
            Translations::default()
        }
    }
}
