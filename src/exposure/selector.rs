//! Request path → selection scope.
//!
//! # Responsibilities
//! - Decide whether a path belongs to the endpoint at all
//! - Split the remainder into at most two percent-decoded segments
//!
//! # Design Decisions
//! - Prefix match is segment-aware: `/configinfo` matches `/configinfo` and
//!   `/configinfo/...`, never `/configinfoX`
//! - One trailing slash is tolerated; empty inner segments are rejected
//! - Segments must decode to valid UTF-8

use percent_encoding::percent_decode_str;

use crate::exposure::error::ExposureError;

/// The part of the filtered view a request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSelector {
    All,
    Section(String),
    Option { section: String, option: String },
}

const MAX_SEGMENTS: usize = 2;

/// True if `path` addresses the endpoint mounted at `prefix`.
pub fn matches_prefix(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

impl PathSelector {
    /// Parse the segments that follow `prefix` in `path`.
    ///
    /// `path` must already satisfy [`matches_prefix`].
    pub fn from_path(prefix: &str, path: &str) -> Result<Self, ExposureError> {
        let rest = path.strip_prefix(prefix).ok_or(ExposureError::MalformedPath)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        if rest.is_empty() {
            return Ok(PathSelector::All);
        }

        let rest = rest.strip_prefix('/').ok_or(ExposureError::MalformedPath)?;
        let raw: Vec<&str> = rest.split('/').collect();
        if raw.len() > MAX_SEGMENTS || raw.iter().any(|segment| segment.is_empty()) {
            return Err(ExposureError::MalformedPath);
        }

        let mut segments = raw
            .into_iter()
            .map(decode_segment)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter();

        match (segments.next(), segments.next()) {
            (Some(section), None) => Ok(PathSelector::Section(section)),
            (Some(section), Some(option)) => Ok(PathSelector::Option { section, option }),
            _ => Ok(PathSelector::All),
        }
    }
}

/// Decode `%XX` escapes. Invalid escapes are kept literally.
fn decode_segment(segment: &str) -> Result<String, ExposureError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ExposureError::MalformedPath)
}
