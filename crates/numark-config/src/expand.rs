//! `${VAR}` references in `[render]` string settings.

use std::env::{self, VarError};

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` in `value` in place.
///
/// Values without a `${` reference are left alone, so a target such as
/// `frame$1` survives verbatim.
pub(crate) fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    if !value.contains("${") {
        return Ok(());
    }
    let expanded = shellexpand::env_with_context(value.as_str(), |name| {
        env::var(name).map(Some)
    })
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: match err.cause {
            VarError::NotPresent => format!("${{{}}} is not set", err.var_name),
            VarError::NotUnicode(_) => format!("${{{}}} is not valid unicode", err.var_name),
        },
    })?;
    *value = expanded.into_owned();
    Ok(())
}
