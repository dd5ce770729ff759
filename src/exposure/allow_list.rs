//! Allow-list of sections that may be exposed.

/// Ordered set of section names taken from the `public_config` setting.
///
/// Entries are trimmed once at construction. Empty entries are kept and
/// simply never match a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    sections: Vec<String>,
}

impl AllowList {
    /// Build from a comma-separated list such as `"section1, section3"`.
    pub fn parse(raw: &str) -> Self {
        let mut sections: Vec<String> = Vec::new();
        for entry in raw.split(',').map(str::trim) {
            if !sections.iter().any(|existing| existing == entry) {
                sections.push(entry.to_string());
            }
        }
        Self { sections }
    }

    /// Exact, case-sensitive membership test.
    #[cfg(test)]
    pub fn contains(&self, section: &str) -> bool {
        self.sections.iter().any(|name| name == section)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(String::as_str)
    }
}
