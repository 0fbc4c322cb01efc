//! Shared helpers for the integration tests: stripping ANSI escapes back to
//! the plain projection (spec §8 properties 1/2/4) and building colorizers
//! against a fixed theme so assertions can compare styled output directly
//! against `Style::paint` rather than hardcoding escape bytes.

#![allow(dead_code)]

use std::sync::LazyLock;

use regex::Regex;

use lumolog::style::{PaintCtx, Theme};
use lumolog::Colorizer;

static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new("\u{1b}\\[[0-9;]*m").unwrap());

/// Remove every ANSI CSI color/style sequence, yielding the plain projection
/// a styled line is required to preserve (spec §8).
pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

pub fn colorizer(theme: Theme, colors_enabled: bool) -> Colorizer {
    Colorizer::new(theme, PaintCtx::new(colors_enabled, true))
}

pub fn dark_colorizer() -> Colorizer {
    colorizer(Theme::dark(), true)
}

pub fn plain_colorizer() -> Colorizer {
    colorizer(Theme::light(), false)
}
