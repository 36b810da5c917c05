//! Admin authorization.
//!
//! Admin rights are granted by a configured email allowlist, not by a
//! role column. The directory is built once from configuration and the
//! membership check is pure, so handlers can test it without storage.

use std::collections::HashSet;

/// Membership test over the configured admin emails.
#[derive(Debug, Clone, Default)]
pub struct AdminDirectory {
    emails: HashSet<String>,
}

impl AdminDirectory {
    /// Parse a comma-separated allowlist. Entries are trimmed and
    /// compared case-insensitively; blanks are dropped.
    pub fn from_allowlist(raw: &str) -> Self {
        let emails = raw
            .split(',')
            .map(|entry| entry.trim().to_lowercase())
            .filter(|entry| !entry.is_empty())
            .collect();
        Self { emails }
    }

    /// Whether any admin emails are configured at all. An empty
    /// directory means admin endpoints are unusable, which callers
    /// report as a server misconfiguration rather than a 403.
    pub fn is_configured(&self) -> bool {
        !self.emails.is_empty()
    }

    pub fn is_admin(&self, email: &str) -> bool {
        self.emails.contains(&email.trim().to_lowercase())
    }
}
