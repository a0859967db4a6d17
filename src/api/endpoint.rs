//! Endpoint resolution for record and metadata requests
//!
//! Turns a base URL, API version, record type and optional identifier into a
//! fully-qualified request URL. Callers may pass relative fragments with or
//! without a leading separator; duplicate separators are collapsed after
//! concatenation.

use once_cell::sync::Lazy;
use regex::Regex;

use super::constants::{self, DATA_ROOT, METADATA_SOAP_ROOT, SOBJECTS_SEGMENT};

static REPEATED_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/{2,}").expect("separator pattern is valid"));

const SCHEME_DELIMITER: &str = "://";

/// Resolve the URL for a record type, optionally addressing one record.
///
/// If `record_type` already contains the versioned data root it is treated as
/// a complete path and `id` is ignored.
pub fn resolve(base_url: &str, api_version: &str, record_type: &str, id: Option<&str>) -> String {
    if is_complete_path(record_type) {
        if is_absolute(record_type) {
            return normalize_separators(record_type);
        }
        return resolve_relative(base_url, record_type);
    }

    let mut path = format!(
        "{}/{}/{}",
        constants::api_path(api_version),
        SOBJECTS_SEGMENT,
        urlencoding::encode(record_type)
    );
    if let Some(id) = id {
        path.push('/');
        path.push_str(&urlencoding::encode(id));
    }

    resolve_relative(base_url, &path)
}

/// Join a relative path onto the base URL with separator normalisation
pub fn resolve_relative(base_url: &str, path: &str) -> String {
    normalize_separators(&format!("{}/{}", base_url, path))
}

/// Metadata API SOAP endpoint for an instance
pub fn metadata_server_url(base_url: &str, api_version: &str) -> String {
    resolve_relative(base_url, &format!("{}/{}", METADATA_SOAP_ROOT, api_version))
}

/// Collapse runs of `/` in the path into one, leaving the scheme's `://`
/// and any query or fragment untouched
pub fn normalize_separators(url: &str) -> String {
    let (path, suffix) = url.split_at(url.find(['?', '#']).unwrap_or(url.len()));
    let collapsed = match path.find(SCHEME_DELIMITER) {
        Some(idx) => {
            let (scheme, rest) = path.split_at(idx + SCHEME_DELIMITER.len());
            format!("{}{}", scheme, REPEATED_SEPARATORS.replace_all(rest, "/"))
        }
        None => REPEATED_SEPARATORS.replace_all(path, "/").into_owned(),
    };
    format!("{}{}", collapsed, suffix)
}

/// Whether `candidate` starts with a URL scheme such as `https://`
pub fn is_absolute(candidate: &str) -> bool {
    candidate.split_once(SCHEME_DELIMITER).is_some_and(|(scheme, _)| {
        let mut chars = scheme.chars();
        chars.next().is_some_and(|first| first.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

fn is_complete_path(candidate: &str) -> bool {
    candidate.contains(DATA_ROOT.trim_start_matches('/'))
}
