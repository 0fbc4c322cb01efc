//! The styling primitive (spec §6.2) and the `Theme` value (spec §3).
//!
//! This is deliberately the only module that touches `crossterm::style` —
//! everywhere else in the crate talks about `Style`/`Role`/`Theme` values,
//! never ANSI bytes directly, so that the "no ANSI inside JSON key names"
//! invariant can be enforced structurally (see `colorize::json`).

use crossterm::style::{Color as CColor, Stylize};

use crate::severity::Severity;

/// A terminal color. Thin wrapper so the rest of the crate never names
/// `crossterm` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    fn to_crossterm(self) -> CColor {
        match self {
            Color::Indexed(i) => CColor::AnsiValue(i),
            Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
        }
    }
}

/// A color that may depend on the terminal's light/dark background.
///
/// Resolution happens only inside `Style::paint`, never in the colorizer —
/// the colorizer treats every `Style` as opaque, per the design note that
/// adaptive selection belongs to the styling primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorValue {
    Fixed(Color),
    Adaptive { light: Color, dark: Color },
}

impl ColorValue {
    fn resolve(self, ctx: &PaintCtx) -> Color {
        match self {
            ColorValue::Fixed(c) => c,
            ColorValue::Adaptive { light, dark } => {
                if ctx.dark_background {
                    dark
                } else {
                    light
                }
            }
        }
    }
}

/// An ANSI styling intent: foreground, optional background, bold, underline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<ColorValue>,
    pub bg: Option<ColorValue>,
    pub bold: bool,
    pub underline: bool,
}

impl Style {
    pub fn fg(color: Color) -> Self {
        Style {
            fg: Some(ColorValue::Fixed(color)),
            ..Default::default()
        }
    }

    pub fn adaptive_fg(light: Color, dark: Color) -> Self {
        Style {
            fg: Some(ColorValue::Adaptive { light, dark }),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(ColorValue::Fixed(color));
        self
    }

    /// Overlay `other` on top of `self`: `other`'s fields win when set,
    /// `self`'s otherwise. Used to compose a field's base style with
    /// `SearchHighlight` without losing the field's foreground color.
    pub fn compose(self, other: Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: self.bold || other.bold,
            underline: self.underline || other.underline,
        }
    }

    /// Render `text` through this style, producing an ANSI-escaped string
    /// whose plain-text projection equals `text`. Returns `text` unchanged
    /// when nothing is set, or when `ctx.enabled` is false (`--no-color`).
    pub fn paint(&self, text: &str, ctx: &PaintCtx) -> String {
        if !ctx.enabled || (self.fg.is_none() && self.bg.is_none() && !self.bold && !self.underline)
        {
            return text.to_string();
        }

        let mut styled = text.stylize();
        if let Some(fg) = self.fg {
            styled = styled.with(fg.resolve(ctx).to_crossterm());
        }
        if let Some(bg) = self.bg {
            styled = styled.on(bg.resolve(ctx).to_crossterm());
        }
        if self.bold {
            styled = styled.bold();
        }
        if self.underline {
            styled = styled.underlined();
        }
        styled.to_string()
    }
}

/// Every semantic role a `Theme` assigns a `Style` to (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Error,
    Warning,
    Info,
    Debug,
    StatusOk,
    StatusWarn,
    StatusError,
    Timestamp,
    Ip,
    Url,
    Method,
    Hostname,
    Pid,
    Service,
    Filename,
    LineNum,
    JsonKey,
    JsonString,
    JsonNumber,
    JsonValue,
    LogfmtKey,
    LogfmtValue,
    Bracket,
    Quote,
    Equals,
    SearchHighlight,
    /// Unstyled structural/plain content — always the default `Style`.
    Plain,
}

/// A fixed mapping from semantic role to `Style`.
///
/// Three instances exist (`light`, `dark`, `adaptive`); the active instance
/// is chosen once at startup by the CLI and never mutates per line.
#[derive(Debug, Clone)]
pub struct Theme {
    roles: [Style; 27],
}

fn role_index(role: Role) -> usize {
    role as usize
}

impl Theme {
    pub fn style(&self, role: Role) -> Style {
        self.roles[role_index(role)]
    }

    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Error => self.style(Role::Error),
            Severity::Warning => self.style(Role::Warning),
            Severity::Info => self.style(Role::Info),
            Severity::Debug => self.style(Role::Debug),
        }
    }

    pub fn status_style(&self, status: u16) -> Style {
        match status / 100 {
            2 => self.style(Role::StatusOk),
            3 => self.style(Role::Info),
            4 => self.style(Role::StatusWarn),
            5 => self.style(Role::StatusError),
            _ => self.style(Role::Plain),
        }
    }

    /// Dark-foreground-biased palette for light terminal backgrounds, using
    /// the ANSI basic 16-color palette.
    pub fn light() -> Self {
        build(|fg| Style::fg(Color::Indexed(fg)), false)
    }

    /// Bright truecolor palette for dark terminal backgrounds.
    pub fn dark() -> Self {
        build(
            |fg| {
                let (r, g, b) = indexed_to_truecolor(fg);
                Style::fg(Color::Rgb(r, g, b))
            },
            true,
        )
    }

    /// Light/dark pair resolved per-style by the paint primitive at render
    /// time, based on the terminal's detected background.
    pub fn adaptive() -> Self {
        let light = Theme::light();
        let dark = Theme::dark();
        let mut roles = [Style::default(); 27];
        for i in 0..27 {
            roles[i] = merge_adaptive(light.roles[i], dark.roles[i]);
        }
        Theme { roles }
    }
}

fn merge_adaptive(light: Style, dark: Style) -> Style {
    Style {
        fg: adaptive_value(light.fg, dark.fg),
        bg: adaptive_value(light.bg, dark.bg),
        bold: light.bold || dark.bold,
        underline: light.underline || dark.underline,
    }
}

fn adaptive_value(light: Option<ColorValue>, dark: Option<ColorValue>) -> Option<ColorValue> {
    match (light, dark) {
        (Some(ColorValue::Fixed(l)), Some(ColorValue::Fixed(d))) => {
            Some(ColorValue::Adaptive { light: l, dark: d })
        }
        (Some(l), _) => Some(l),
        (None, Some(d)) => Some(d),
        (None, None) => None,
    }
}

/// ANSI basic-16 index -> an approximate truecolor RGB, for the Dark theme's
/// brighter palette.
fn indexed_to_truecolor(idx: u8) -> (u8, u8, u8) {
    match idx {
        1 => (255, 85, 85),    // bright red
        2 => (80, 250, 123),   // bright green
        3 => (241, 250, 140),  // bright yellow
        4 => (139, 233, 253),  // bright cyan (used for IP/service)
        5 => (189, 147, 249),  // bright magenta
        6 => (255, 184, 108),  // bright orange (status/pid)
        7 => (248, 248, 242),  // near-white
        8 => (98, 114, 164),   // comment gray (timestamps)
        _ => (200, 200, 200),
    }
}

/// Shared role->base-color table, parameterized by how an ANSI index turns
/// into a concrete `Style` (the Light theme uses the index directly, the
/// Dark theme upgrades it to a brighter truecolor value).
fn build(make: impl Fn(u8) -> Style, dark_background: bool) -> Theme {
    let mut roles = [Style::default(); 27];
    let mut set = |role: Role, style: Style| roles[role_index(role)] = style;

    set(Role::Error, make(1).bold());
    set(Role::Warning, make(3));
    set(Role::Info, make(2));
    set(Role::Debug, make(8));
    set(Role::StatusOk, make(2));
    set(Role::StatusWarn, make(3));
    set(Role::StatusError, make(1).bold());
    set(Role::Timestamp, make(8));
    set(Role::Ip, make(4));
    set(Role::Url, make(4).underline());
    set(Role::Method, make(5));
    set(Role::Hostname, make(6));
    set(Role::Pid, make(6));
    set(Role::Service, make(5));
    set(Role::Filename, make(4));
    set(Role::LineNum, make(6));
    set(Role::JsonKey, make(4));
    set(Role::JsonString, make(2));
    set(Role::JsonNumber, make(6));
    set(Role::JsonValue, Style::default());
    set(Role::LogfmtKey, make(4));
    set(Role::LogfmtValue, Style::default());
    set(Role::Bracket, make(7));
    set(Role::Quote, make(7));
    set(Role::Equals, make(7));
    set(
        Role::SearchHighlight,
        Style::default().with_bg(search_bg(dark_background)).bold(),
    );
    set(Role::Plain, Style::default());

    Theme { roles }
}

fn search_bg(dark_background: bool) -> Color {
    if dark_background {
        Color::Rgb(68, 71, 90)
    } else {
        Color::Indexed(3)
    }
}

/// Decides whether styling is emitted at all, and which half of an
/// `Adaptive` color pair to use. Constructed once at startup.
#[derive(Debug, Clone, Copy)]
pub struct PaintCtx {
    pub enabled: bool,
    pub dark_background: bool,
}

impl PaintCtx {
    pub fn new(enabled: bool, dark_background: bool) -> Self {
        PaintCtx {
            enabled,
            dark_background,
        }
    }
}

/// Best-effort guess at whether the terminal has a dark background, via the
/// `COLORFGBG` convention (`fg;bg`, background >= 10 means dark). Defaults
/// to dark when unset, the common case for modern terminal emulators.
pub fn detect_dark_background() -> bool {
    match std::env::var("COLORFGBG") {
        Ok(v) => v
            .rsplit(';')
            .next()
            .and_then(|bg| bg.parse::<u8>().ok())
            .map(|bg| bg >= 10)
            .unwrap_or(true),
        Err(_) => true,
    }
}
