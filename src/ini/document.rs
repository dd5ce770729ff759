//! Parsed configuration document types.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Name of the section whose options every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// An ordered mapping of option names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    options: Vec<(String, String)>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an option by exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Insert an option, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.options.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.options.push((name, value)),
        }
    }

    /// Mutable access to a value by name.
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut String> {
        self.options
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// A copy of this section holding only `name`, if present.
    pub fn only(&self, name: &str) -> Option<Section> {
        self.get(name).map(|value| {
            let mut section = Section::new();
            section.set(name, value);
            section
        })
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.options.len()))?;
        for (key, value) in &self.options {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A resolved configuration document.
///
/// Each section already includes the inherited `[DEFAULT]` options with
/// interpolation applied, so lookups never need to consult the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: Vec<(String, Section)>,
}

impl ConfigDocument {
    pub(crate) fn from_sections(sections: Vec<(String, Section)>) -> Self {
        Self { sections }
    }

    /// Look up a section by exact, case-sensitive name.
    ///
    /// `DEFAULT` is never returned as a section.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(section, _)| section == name)
            .map(|(_, options)| options)
    }

    #[cfg(test)]
    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    #[cfg(test)]
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut section = Section::new();
        section.set("a", "1");
        section.set("b", "2");
        section.set("a", "3");

        let items: Vec<_> = section.iter().collect();
        assert_eq!(items, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_only_narrows_to_one_option() {
        let mut section = Section::new();
        section.set("option1", "value1");
        section.set("option2", "value2");

        let narrowed = section.only("option2").unwrap();
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed.get("option2"), Some("value2"));
        assert!(section.only("missing").is_none());
    }

    #[test]
    fn test_section_serializes_in_insertion_order() {
        let mut section = Section::new();
        section.set("zeta", "1");
        section.set("alpha", "2");

        let json = serde_json::to_string(&section).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }
}
