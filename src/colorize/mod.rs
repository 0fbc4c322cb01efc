//! The format-aware colorizer (spec §4.2, §6.2).
//!
//! `Colorizer` owns the active `Theme`, the `SearchConfig` overlay and the
//! `PaintCtx`, and every per-format renderer below goes through it rather
//! than touching `Style::paint` directly. That keeps the "search is an
//! overlay on the plain field text, applied once, at the innermost
//! primitive" rule structural instead of a convention someone can forget.

mod access;
mod appframework;
mod json;
mod logfmt;
mod stacktrace;

use std::ops::Range;

use crate::format::LogFormat;
use crate::search::SearchConfig;
use crate::severity::parse_severity;
use crate::style::{PaintCtx, Role, Style, Theme};

pub struct Colorizer {
    theme: Theme,
    search: SearchConfig,
    ctx: PaintCtx,
}

impl Colorizer {
    pub fn new(theme: Theme, ctx: PaintCtx) -> Self {
        Colorizer {
            theme,
            search: SearchConfig::None,
            ctx,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_search(&mut self, search: SearchConfig) {
        self.search = search;
    }

    pub(crate) fn theme(&self) -> &Theme {
        &self.theme
    }

    pub(crate) fn ctx(&self) -> &PaintCtx {
        &self.ctx
    }

    pub(crate) fn search(&self) -> &SearchConfig {
        &self.search
    }

    /// Render one already-classified line. Never fails — an unrecognized or
    /// malformed line falls back to the generic message post-process.
    pub fn render(&self, line: &str, format: LogFormat) -> String {
        match format {
            LogFormat::Json => json::render(self, line).unwrap_or_else(|| {
                log::debug!("line tagged Json failed to re-parse, falling back to generic render");
                self.render_message(line)
            }),
            LogFormat::Logfmt => logfmt::render(self, line),
            LogFormat::ApacheCommon | LogFormat::Nginx => access::render(self, line, format),
            LogFormat::Syslog | LogFormat::Rsyslog => appframework::render_syslog(self, line),
            LogFormat::GoStandard => appframework::render_go_standard(self, line),
            LogFormat::Rails => appframework::render_rails(self, line),
            LogFormat::Docker => appframework::render_docker(self, line),
            LogFormat::Kubernetes => appframework::render_kubernetes(self, line),
            LogFormat::Heroku => appframework::render_heroku(self, line),
            LogFormat::GoTest => stacktrace::render_go_test(self, line),
            LogFormat::JavaException => stacktrace::render_java_exception(self, line),
            LogFormat::JavaScriptException => stacktrace::render_js_exception(self, line),
            LogFormat::PythonException => stacktrace::render_python_exception(self, line),
            LogFormat::GoroutineStackTrace => stacktrace::render_goroutine(self, line),
            LogFormat::Unknown => self.render_message(line),
        }
    }

    /// The field-emitting primitive (spec §6.2). Computes search matches on
    /// this field's own plain text and paints alternating plain/highlighted
    /// segments — search and base color are composed in one pass, never
    /// rewritten after the fact.
    pub(crate) fn emit_style(&self, out: &mut String, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        let matches = self.search.matches(text);
        if matches.is_empty() {
            out.push_str(&style.paint(text, &self.ctx));
            return;
        }
        let highlight = style.compose(self.theme.style(Role::SearchHighlight));
        let mut pos = 0;
        for (start, end) in matches {
            if start > pos {
                out.push_str(&style.paint(&text[pos..start], &self.ctx));
            }
            out.push_str(&highlight.paint(&text[start..end], &self.ctx));
            pos = end;
        }
        if pos < text.len() {
            out.push_str(&style.paint(&text[pos..], &self.ctx));
        }
    }

    pub(crate) fn emit(&self, out: &mut String, text: &str, role: Role) {
        self.emit_style(out, text, self.theme.style(role));
    }

    /// Walk `spans` in order over `text`, painting each with its style and
    /// filling any gap (including before the first and after the last span)
    /// with the default style. Every byte of `text` passes through exactly
    /// one `emit_style` call, so the plain-text projection is always `text`
    /// itself — this is how the single-line renderers stay byte-preserving
    /// without having to reconstruct punctuation by hand.
    pub(crate) fn render_spans(&self, out: &mut String, text: &str, spans: &[(Range<usize>, Style)]) {
        let mut pos = 0;
        for (range, style) in spans {
            if range.start > pos {
                self.emit_style(out, &text[pos..range.start], Style::default());
            }
            self.emit_style(out, &text[range.clone()], *style);
            pos = range.end;
        }
        if pos < text.len() {
            self.emit_style(out, &text[pos..], Style::default());
        }
    }

    /// Generic / Unknown / message post-process (spec §4.2): tokenize on
    /// whitespace runs, color any token that is (or has a single trailing
    /// `:` stripped down to) a recognized level word, pass everything else
    /// through unchanged. Shared by the Unknown fallback and by the trailing
    /// free-text message of Syslog/Kubernetes/Heroku/GoStandard.
    pub(crate) fn render_message(&self, text: &str) -> String {
        log::trace!("generic message render ({} bytes)", text.len());
        let mut out = String::new();
        self.append_message(&mut out, text);
        out
    }

    pub(crate) fn append_message(&self, out: &mut String, text: &str) {
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            let start = i;
            let is_ws = bytes[i].is_ascii_whitespace();
            while i < bytes.len() && bytes[i].is_ascii_whitespace() == is_ws {
                i += 1;
            }
            let chunk = &text[start..i];
            if is_ws {
                self.emit_style(out, chunk, Style::default());
            } else {
                self.render_token(out, chunk);
            }
        }
    }

    fn render_token(&self, out: &mut String, token: &str) {
        if let Some(word) = token.strip_suffix(':') {
            if let Some(sev) = parse_severity(word) {
                self.emit_style(out, word, self.theme.severity_style(sev));
                self.emit_style(out, ":", Style::default());
                return;
            }
        }
        if let Some(sev) = parse_severity(token) {
            self.emit_style(out, token, self.theme.severity_style(sev));
            return;
        }
        self.emit_style(out, token, Style::default());
    }
}
