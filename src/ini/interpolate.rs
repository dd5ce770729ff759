//! `%(name)s` value interpolation.
//!
//! # Responsibilities
//! - Expand `%(name)s` references against the section's own options and the
//!   `[DEFAULT]` options
//! - Bound recursive expansion depth
//!
//! # Design Decisions
//! - Reference names are lowercased before lookup, matching stored keys
//! - A `%` not followed by `(` is literal text
//! - Expansion is repeated until no reference remains, up to `MAX_DEPTH` passes

use thiserror::Error;

use crate::ini::document::Section;

/// Maximum number of expansion passes over a single value.
pub const MAX_DEPTH: usize = 10;

/// Errors raised while expanding a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    #[error("option '{option}' references unknown option '{reference}'")]
    MissingReference { option: String, reference: String },

    #[error("option '{option}' exceeds the maximum interpolation depth")]
    TooDeep { option: String },

    #[error("option '{option}' contains a malformed reference")]
    Malformed { option: String },
}

/// Expand every reference in `value`, looking names up in `vars`.
pub fn interpolate(option: &str, value: &str, vars: &Section) -> Result<String, InterpolationError> {
    let mut current = value.to_string();

    for _ in 0..MAX_DEPTH {
        if !current.contains("%(") {
            return Ok(current);
        }
        let (expanded, replaced) = expand_once(option, &current, vars)?;
        if !replaced {
            return Err(InterpolationError::Malformed {
                option: option.to_string(),
            });
        }
        current = expanded;
    }

    if current.contains("%(") {
        return Err(InterpolationError::TooDeep {
            option: option.to_string(),
        });
    }
    Ok(current)
}

/// One left-to-right pass. Returns the new text and whether anything changed.
fn expand_once(option: &str, value: &str, vars: &Section) -> Result<(String, bool), InterpolationError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    let mut replaced = false;

    while let Some(start) = rest.find("%(") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(close) = after.find(")s") else {
            out.push_str(&rest[start..]);
            return Ok((out, replaced));
        };

        let reference = after[..close].to_lowercase();
        let Some(substitute) = vars.get(&reference) else {
            return Err(InterpolationError::MissingReference {
                option: option.to_string(),
                reference,
            });
        };

        out.push_str(substitute);
        replaced = true;
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    Ok((out, replaced))
}
