//! Definition file parsing (YAML/JSON/JSONC) and discovery.

use crate::config::error::ConfigError;
use crate::types::{collection::Collection, route::Route};
use glob::glob;
use serde::de::DeserializeOwned;
use std::{fs, path::Path};
use tracing::debug;

/// Definition file type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileType {
    Yaml,
    Json,
    Jsonc,
    Unknown,
}

/// Get definition file type from path extension.
pub fn get_file_type(path: &str) -> ConfigFileType {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => ConfigFileType::Yaml,
        "json" => ConfigFileType::Json,
        "jsonc" => ConfigFileType::Jsonc,
        _ => ConfigFileType::Unknown,
    }
}

/// Check if file is a supported definition file
fn is_supported_file(path: &str) -> bool {
    !matches!(get_file_type(path), ConfigFileType::Unknown)
}

/// Strip `//` and `/* */` comments from JSONC content.
///
/// String literals are copied verbatim, including escaped quotes and
/// comment markers inside them.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                result.push(c);
            }
            '/' => match chars.peek().copied() {
                Some('/') => {
                    // Skip to end of line, keeping the line break.
                    for nc in chars.by_ref() {
                        if nc == '\n' || nc == '\r' {
                            result.push(nc);
                            break;
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for nc in chars.by_ref() {
                        if prev == '*' && nc == '/' {
                            break;
                        }
                        prev = nc;
                    }
                }
                _ => result.push(c),
            },
            _ => result.push(c),
        }
    }

    result
}

/// Parse JSON content
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_json::from_str(content).map_err(ConfigError::from)
}

/// Parse JSONC content (JSON with comments)
pub fn parse_jsonc<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let stripped = strip_json_comments(content);
    serde_json::from_str(&stripped).map_err(ConfigError::from)
}

/// Parse YAML content
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    serde_yaml::from_str(content).map_err(ConfigError::from)
}

/// Parse definition content based on file type
pub fn parse_config<T: DeserializeOwned>(content: &str, path: &str) -> Result<T, ConfigError> {
    match get_file_type(path) {
        ConfigFileType::Yaml => parse_yaml(content),
        ConfigFileType::Json => parse_json(content),
        ConfigFileType::Jsonc => parse_jsonc(content),
        ConfigFileType::Unknown => Err(ConfigError::UnknownFileType(path.to_string())),
    }
}

/// Parse content holding either a single definition or an array of them.
fn parse_one_or_many<T: DeserializeOwned>(content: &str, path: &str) -> Result<Vec<T>, ConfigError> {
    let value: serde_json::Value = parse_config(content, path)?;
    let parsed: Result<Vec<T>, serde_json::Error> = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value::<T>(value).map(|one| vec![one])
    };

    parsed.map_err(|source| ConfigError::Definition {
        source,
        path: path.to_string(),
    })
}

fn read_file(path: &str) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        source,
        path: path.to_string(),
    })
}

fn expand_glob(pattern: &str) -> Result<Vec<String>, ConfigError> {
    let entries = glob(pattern).map_err(|e| ConfigError::GlobPattern(e.to_string()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ConfigError::GlobPattern(e.to_string()))?;
        if let Some(s) = path.to_str() {
            paths.push(s.to_owned());
        }
    }

    Ok(paths)
}

/// Load routes from a file or glob pattern.
///
/// Each matched file may hold a single route or an array of routes. Files
/// with unsupported extensions are skipped, and a pattern matching no files
/// yields an empty list.
pub fn load_routes(pattern: &str) -> Result<Vec<Route>, ConfigError> {
    let paths = expand_glob(pattern)?;
    let mut routes = Vec::new();

    for path in paths {
        if !is_supported_file(&path) {
            debug!(path = %path, "skipping unsupported definition file");
            continue;
        }
        let content = read_file(&path)?;
        routes.extend(parse_one_or_many::<Route>(&content, &path)?);
    }

    Ok(routes)
}

/// Load collections from a file.
///
/// Supports both a single collection and an array of collections. An empty
/// array is rejected with [`ConfigError::EmptyCollections`].
pub fn load_collections(path: &str) -> Result<Vec<Collection>, ConfigError> {
    let content = read_file(path)?;
    let collections = parse_one_or_many::<Collection>(&content, path)?;

    if collections.is_empty() {
        return Err(ConfigError::EmptyCollections(path.to_string()));
    }

    Ok(collections)
}
