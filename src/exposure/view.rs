//! Allow-list filtering and scope narrowing.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::exposure::allow_list::AllowList;
use crate::exposure::error::ExposureError;
use crate::exposure::selector::PathSelector;
use crate::ini::{ConfigDocument, Section};

/// The document restricted to allow-listed sections.
///
/// Allow-listed sections missing from the document are kept with a `None`
/// value and serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    entries: Vec<(String, Option<Section>)>,
}

impl FilteredView {
    pub fn build(document: &ConfigDocument, allow_list: &AllowList) -> Self {
        let entries = allow_list
            .iter()
            .map(|name| (name.to_string(), document.section(name).cloned()))
            .collect();
        Self { entries }
    }

    /// `None` if the name is not allow-listed; `Some(None)` if allow-listed
    /// but absent from the document.
    pub fn get(&self, section: &str) -> Option<Option<&Section>> {
        self.entries
            .iter()
            .find(|(name, _)| name == section)
            .map(|(_, options)| options.as_ref())
    }

    /// Narrow the view to what `selector` asks for.
    ///
    /// Drill-down into an allow-listed section that is absent from the file
    /// is `NotFound`, even though the whole view reports it as `null`.
    pub fn select(self, selector: &PathSelector) -> Result<FilteredView, ExposureError> {
        match selector {
            PathSelector::All => Ok(self),
            PathSelector::Section(section) => {
                let options = self.present_section(section)?;
                Ok(Self::single(section, options.clone()))
            }
            PathSelector::Option { section, option } => {
                let narrowed = self
                    .present_section(section)?
                    .only(option)
                    .ok_or(ExposureError::NotFound)?;
                Ok(Self::single(section, narrowed))
            }
        }
    }

    fn present_section(&self, section: &str) -> Result<&Section, ExposureError> {
        self.get(section).flatten().ok_or(ExposureError::NotFound)
    }

    fn single(section: &str, options: Section) -> Self {
        Self {
            entries: vec![(section.to_string(), Some(options))],
        }
    }
}

impl Serialize for FilteredView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, options) in &self.entries {
            map.serialize_entry(name, options)?;
        }
        map.end()
    }
}
