//! Leading/trailing slash helpers for path-like strings.

pub fn remove_slash_end(s: &str) -> String {
    s.strip_suffix('/').unwrap_or(s).to_string()
}

pub fn remove_slash_first(s: &str) -> String {
    s.strip_prefix('/').unwrap_or(s).to_string()
}

/// Append `/` unless already present; `""` becomes `"/"`.
pub fn add_slash_end(s: &str) -> String {
    if s.ends_with('/') {
        s.to_string()
    } else {
        format!("{s}/")
    }
}

/// Prepend `/` unless already present; `""` becomes `"/"`.
pub fn add_slash_first(s: &str) -> String {
    if s.starts_with('/') {
        s.to_string()
    } else {
        format!("/{s}")
    }
}
