use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    pub prefix: String,
    pub suffix: String,
    /// Total length of the code. Zero or less means no padding.
    pub length: i32,
}

impl SeriesOptions {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>, length: i32) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            length,
        }
    }
}

/// Builds `prefix + counter + suffix`, zero-padding the counter so that the
/// whole code is `options.length` bytes long.
///
/// There is no truncation: a counter wider than the room left between prefix
/// and suffix makes the code longer than `length`. When prefix and suffix alone
/// exceed `length` the counter is not padded at all, so no trailing spaces are
/// added the way a negative printf width would left-justify it.
pub fn build_series(counter: i64, options: &SeriesOptions) -> String {
    let SeriesOptions { prefix, suffix, length } = options;
    if *length > 0 {
        let room = i64::from(*length) - (prefix.len() + suffix.len()) as i64;
        let width = usize::try_from(room).unwrap_or(0);
        return format!("{prefix}{counter:0width$}{suffix}");
    }
    format!("{prefix}{counter}{suffix}")
}
