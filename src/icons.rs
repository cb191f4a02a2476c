//! Icon Resolver
//!
//! Maps a stored category icon path to a URL the browser can load.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside one path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq)]
pub struct IconResolver {
    base_url: String,
}

impl IconResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// `None` for missing/blank icons; absolute URLs pass through untouched
    pub fn resolve(&self, icon_url: Option<&str>) -> Option<String> {
        let icon = icon_url?.trim();
        if icon.is_empty() {
            return None;
        }
        let is_absolute = ["http://", "https://", "data:", "blob:", "//"]
            .iter()
            .any(|prefix| icon.starts_with(prefix));
        if is_absolute {
            return Some(icon.to_string());
        }

        let path = icon
            .trim_start_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        Some(format!("{}/{}", self.base_url.trim_end_matches('/'), path))
    }
}
