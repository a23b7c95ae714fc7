use std::collections::BTreeMap;
use std::path::Path;

/// Loads a `publish.properties` file (Java-properties style `key=value`).
///
/// Property files hold publishing secrets (repository credentials, signing
/// key id and passphrase). Lines starting with `#` or `!` are comments.
/// A missing file yields an empty map.
pub fn load_properties(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }
    let content =
        std::fs::read_to_string(path).map_err(mvnpub_util::errors::MvnpubError::Io)?;
    Ok(parse_properties(&content))
}

/// Parse property-file content. Later keys override earlier ones.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

/// Parse a `-P key=value` command-line override.
pub fn parse_override(input: &str) -> Option<(String, String)> {
    let (key, value) = input.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Merge property layers. Earlier layers win over later ones.
pub fn merge_layers(layers: Vec<BTreeMap<String, String>>) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for layer in layers.into_iter().rev() {
        merged.extend(layer);
    }
    merged
}

/// Interpolate `${env:VAR}` references in a string.
///
/// Looks up values first from the provided `overrides` map (property store),
/// then falls back to actual process environment variables.
pub fn interpolate(input: &str, overrides: &BTreeMap<String, String>) -> String {
    let mut result = input.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${env:") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let key = &result[start + 6..end];
        let value = overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .unwrap_or_default();
        result.replace_range(start..=end, &value);
        from = start + value.len();
    }
    result
}
