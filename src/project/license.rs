use serde::Serialize;

use crate::config::LicenseConfig;

/// Name recorded when the user explicitly opted out of a license header.
pub const NO_LICENSE: &str = "None";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct License {
    pub name: String,
    pub text: String,
}

impl License {
    pub fn none() -> Self {
        Self {
            name: NO_LICENSE.to_string(),
            text: String::new(),
        }
    }

    /// Nothing resolved yet: no text, and not an explicit opt-out.
    pub fn is_unresolved(&self) -> bool {
        self.text.is_empty() && self.name != NO_LICENSE
    }
}

/// Source of the license embedded into generated headers.
pub trait LicenseResolver {
    fn resolve(&self) -> License;
}

/// Resolves from a `--license` override and the config file's `license` section.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLicense {
    requested: Option<String>,
    configured: Option<LicenseConfig>,
}

impl ConfiguredLicense {
    pub fn new(requested: Option<String>, configured: Option<LicenseConfig>) -> Self {
        Self {
            requested: requested
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            configured,
        }
    }
}

impl LicenseResolver for ConfiguredLicense {
    fn resolve(&self) -> License {
        let name = match (&self.requested, &self.configured) {
            (Some(requested), _) => requested.clone(),
            (None, Some(cfg)) => cfg.name.clone(),
            (None, None) => return License::none(),
        };
        if name.eq_ignore_ascii_case(NO_LICENSE) {
            return License::none();
        }

        let text = self
            .configured
            .as_ref()
            .filter(|cfg| cfg.name.eq_ignore_ascii_case(&name))
            .and_then(|cfg| cfg.text.clone())
            .unwrap_or_default();
        License { name, text }
    }
}
