//! Relative-name (RN) template helpers
//!
//! RN templates name one object under its container, e.g. `tn-{name}` or
//! `from-[{fromPort}]-to-[{toPort}]`. The extraction tool emits them with
//! `%(name)s` placeholders; the model stores the `{name}` form.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;
use thiserror::Error;

/// A placeholder had no value during rendering
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no value for RN placeholder {0}")]
pub struct MissingValue(pub String);

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"))
}

fn printf_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%\((\w+)\)s").expect("printf pattern is valid"))
}

/// Rewrite `%(name)s` placeholders as `{name}`
///
/// # Examples
/// ```
/// use mimgen_common::rn::normalize_rn_format;
///
/// assert_eq!(normalize_rn_format("tn-%(name)s"), "tn-{name}");
/// assert_eq!(normalize_rn_format("uni"), "uni");
/// ```
pub fn normalize_rn_format(raw: &str) -> Cow<'_, str> {
    printf_re().replace_all(raw, "{${1}}")
}

/// Placeholder names in template order
///
/// # Examples
/// ```
/// use mimgen_common::rn::placeholders;
///
/// assert_eq!(
///     placeholders("from-[{fromPort}]-to-[{toPort}]"),
///     vec!["fromPort", "toPort"]
/// );
/// ```
pub fn placeholders(rn_format: &str) -> Vec<&str> {
    placeholder_re()
        .captures_iter(rn_format)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Text before the first `-`, or the whole template when there is none
pub fn rn_prefix(rn_format: &str) -> &str {
    rn_format
        .split_once('-')
        .map(|(prefix, _)| prefix)
        .unwrap_or(rn_format)
}

/// Substitute every placeholder with the value returned by `lookup`
pub fn render_rn<F>(rn_format: &str, lookup: F) -> Result<String, MissingValue>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = None;
    let rendered = placeholder_re().replace_all(rn_format, |caps: &Captures<'_>| {
        let name = &caps[1];
        match lookup(name) {
            Some(value) => value,
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(MissingValue(name)),
        None => Ok(rendered.into_owned()),
    }
}
