//! `${VAR}` references in course settings.
//!
//! A course title such as `Android Architecture ${EDITION}` or an output path
//! such as `${OUT_DIR:-dist}/course.html` is resolved once, while the config is
//! loaded. A bare `$VAR` is left as written, since course titles may contain
//! prices and shell snippets.

use std::borrow::Cow;

use crate::ConfigError;

/// Name of the variable that could not be resolved.
struct UnsetVar(String);

fn lookup(name: &str) -> Result<Option<String>, UnsetVar> {
    std::env::var(name)
        .map(Some)
        .map_err(|_| UnsetVar(name.to_owned()))
}

/// Resolve the `${...}` references in `value`, the setting named `field`.
///
/// An unset variable without a `:-` fallback is an error naming both the
/// setting and the variable.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, lookup)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} is not set and has no default", e.cause.0),
        })
}
