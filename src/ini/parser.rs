//! Line-oriented INI parser.
//!
//! # Responsibilities
//! - Recognize section headers, `key = value` / `key: value` options,
//!   comments and indented continuation lines
//! - Merge repeated section headers into one section
//! - Resolve `[DEFAULT]` inheritance and interpolation into a `ConfigDocument`

use thiserror::Error;

use crate::ini::document::{ConfigDocument, Section, DEFAULT_SECTION};
use crate::ini::interpolate::{interpolate, InterpolationError};

/// Errors produced while parsing a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option appeared before any `[section]` header.
    #[error("line {line}: option outside of any section")]
    MissingSectionHeader { line: usize },

    /// A line that is neither a header, an option, nor a comment.
    #[error("line {line}: cannot parse '{content}'")]
    Syntax { line: usize, content: String },

    #[error("section [{section}]: {source}")]
    Interpolation {
        section: String,
        #[source]
        source: InterpolationError,
    },
}

/// Which section the scanner is currently filling.
enum Cursor {
    None,
    Defaults,
    Section(usize),
}

/// Parse INI text into a resolved document.
pub fn parse(input: &str) -> Result<ConfigDocument, ParseError> {
    let mut defaults = Section::new();
    let mut sections: Vec<(String, Section)> = Vec::new();
    let mut cursor = Cursor::None;
    let mut current_option: Option<String> = None;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;

        if is_ignorable(line) {
            continue;
        }

        // Indented lines extend the value of the option above them.
        if line.starts_with(char::is_whitespace) {
            if let Some(name) = current_option.as_deref() {
                let continuation = line.trim();
                if let Some(value) = cursor_section(&cursor, &mut defaults, &mut sections)
                    .and_then(|section| section.get_mut(name))
                {
                    if !continuation.is_empty() {
                        value.push('\n');
                        value.push_str(continuation);
                    }
                    continue;
                }
            }
        }

        if let Some(name) = section_header(line) {
            cursor = if name == DEFAULT_SECTION {
                Cursor::Defaults
            } else {
                match sections.iter().position(|(existing, _)| existing == name) {
                    Some(position) => Cursor::Section(position),
                    None => {
                        sections.push((name.to_string(), Section::new()));
                        Cursor::Section(sections.len() - 1)
                    }
                }
            };
            current_option = None;
            continue;
        }

        if matches!(cursor, Cursor::None) {
            return Err(ParseError::MissingSectionHeader { line: line_no });
        }

        let Some((name, value)) = option_line(line) else {
            return Err(ParseError::Syntax {
                line: line_no,
                content: line.to_string(),
            });
        };

        if let Some(section) = cursor_section(&cursor, &mut defaults, &mut sections) {
            section.set(name.clone(), value);
        }
        current_option = Some(name);
    }

    resolve(defaults, sections)
}

fn cursor_section<'a>(
    cursor: &Cursor,
    defaults: &'a mut Section,
    sections: &'a mut [(String, Section)],
) -> Option<&'a mut Section> {
    match cursor {
        Cursor::None => None,
        Cursor::Defaults => Some(defaults),
        Cursor::Section(position) => sections.get_mut(*position).map(|(_, section)| section),
    }
}

/// Blank lines, `#`/`;` comments and `rem` comments.
fn is_ignorable(line: &str) -> bool {
    if line.trim().is_empty() || line.starts_with('#') || line.starts_with(';') {
        return true;
    }
    line.split_whitespace()
        .next()
        .is_some_and(|word| word.eq_ignore_ascii_case("rem") && line.starts_with(['r', 'R']))
}

/// `[name]` at the start of the line; anything after `]` is ignored.
fn section_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find(']')?;
    let name = &rest[..end];
    (!name.is_empty()).then_some(name)
}

/// Split an option line at the first `=` or `:`.
fn option_line(line: &str) -> Option<(String, String)> {
    let split = line.find(['=', ':'])?;
    let name = line[..split].trim_end();
    if name.is_empty() || name.starts_with(char::is_whitespace) {
        return None;
    }

    let mut value = line[split + 1..].trim();
    if let Some(comment) = value.find(';') {
        if comment > 0 && value[..comment].ends_with(char::is_whitespace) {
            value = value[..comment].trim_end();
        }
    }
    if value == "\"\"" {
        value = "";
    }

    Some((name.to_lowercase(), value.to_string()))
}

/// Merge defaults into each section and expand references.
fn resolve(defaults: Section, sections: Vec<(String, Section)>) -> Result<ConfigDocument, ParseError> {
    let mut resolved = Vec::with_capacity(sections.len());

    for (name, own) in sections {
        let mut merged = defaults.clone();
        for (key, value) in own.iter() {
            merged.set(key, value);
        }

        let mut expanded = Section::new();
        for (key, value) in merged.iter() {
            let value = interpolate(key, value, &merged).map_err(|source| ParseError::Interpolation {
                section: name.clone(),
                source,
            })?;
            expanded.set(key, value);
        }
        resolved.push((name, expanded));
    }

    Ok(ConfigDocument::from_sections(resolved))
}
