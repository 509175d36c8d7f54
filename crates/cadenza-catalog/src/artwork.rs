// SPDX-License-Identifier: GPL-3.0-or-later

//! Artwork URL templating and size selection.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Screen-size category used to pick an artwork edge length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSize {
    Xl,
    Lg,
    Md,
    Sm,
    Default,
}

impl ScreenSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xl => "xl",
            Self::Lg => "lg",
            Self::Md => "md",
            Self::Sm => "sm",
            Self::Default => "default",
        }
    }

    /// Labels are matched exactly; anything unrecognised is `Default`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "xl" => Self::Xl,
            "lg" => Self::Lg,
            "md" => Self::Md,
            "sm" => Self::Sm,
            _ => Self::Default,
        }
    }

    /// Square artwork edge length in pixels.
    pub fn artwork_size(&self) -> u32 {
        match self {
            Self::Xl => 300,
            Self::Lg => 270,
            Self::Md => 240,
            Self::Sm => 210,
            Self::Default => 180,
        }
    }
}

/// Artwork edge length for a screen-size label (`xl`, `lg`, `md`, `sm`, or anything else).
pub fn artwork_size(screen_size: &str) -> u32 {
    ScreenSize::from_label(screen_size).artwork_size()
}

/// Substitute the `{w}` and `{h}` placeholders of an artwork URL template.
///
/// Placeholders match case-insensitively, so `{W}` and `{H}` are replaced too.
/// Any other text, including unknown `{..}` tokens, is left untouched. An empty
/// template yields an empty string.
///
/// ```
/// use cadenza_catalog::artwork_url;
///
/// assert_eq!(
///     artwork_url("https://is1.example/img/{w}x{h}bb.jpg", 300, 300),
///     "https://is1.example/img/300x300bb.jpg"
/// );
/// ```
pub fn artwork_url(template: &str, width: u32, height: u32) -> String {
    lazy_static! {
        static ref PLACEHOLDER_REGEX: Regex =
            Regex::new(r"(?i)\{(?P<axis>[wh])\}").expect("valid placeholder regex");
    }

    if template.is_empty() {
        return String::new();
    }

    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| {
            if caps["axis"].eq_ignore_ascii_case("w") {
                width.to_string()
            } else {
                height.to_string()
            }
        })
        .into_owned()
}

/// Replace the last path segment of an artwork URL with `{width}x{height}bb.jpg`.
///
/// Everything up to and including the final `/` is kept. A URL without any `/`
/// is replaced entirely; an empty URL yields an empty string.
pub fn format_artwork_url(url: &str, width: u32, height: u32) -> String {
    if url.is_empty() {
        return String::new();
    }

    let prefix = url.rfind('/').map_or("", |idx| &url[..=idx]);
    format!("{prefix}{width}x{height}bb.jpg")
}
