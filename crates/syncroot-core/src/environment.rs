//! Environment-name stripping

use regex::Regex;

use crate::{Error, Result};

/// Remove `component` from an environment name.
///
/// A component written as `/pattern/` is a regular expression and every match
/// is removed. Anything else is removed only as a leading literal prefix.
pub fn strip_component(component: &str, environment: &str) -> Result<String> {
    match regex_body(component) {
        Some(pattern) => {
            let regex = Regex::new(pattern).map_err(|source| Error::InvalidStripPattern {
                pattern: component.to_string(),
                source,
            })?;
            Ok(regex.replace_all(environment, "").into_owned())
        }
        None => Ok(environment
            .strip_prefix(component)
            .unwrap_or(environment)
            .to_string()),
    }
}

fn regex_body(component: &str) -> Option<&str> {
    component
        .strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
}
