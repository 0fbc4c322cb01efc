//! Logfmt line renderer (spec §4.2).
//!
//! Unlike the single-line regex formats, a logfmt value can itself contain
//! whitespace when quoted (`msg="hello world"`), so this can't be tokenized
//! on whitespace the way the generic message post-process is. Instead it's
//! a small hand-rolled scanner that walks the line once, recognizing
//! `key=value` / `key="quoted value"` pairs and falling back to bare tokens
//! (including bare level words) for anything else.

use crate::colorize::Colorizer;
use crate::severity::parse_severity;
use crate::style::Role;

const LEVEL_KEYS: &[&str] = &["level", "severity", "loglevel", "log.level"];
const TIMESTAMP_KEYS: &[&str] = &["ts", "time", "timestamp", "@timestamp"];
const SERVICE_KEYS: &[&str] = &["service", "component", "module", "app", "uid", "uuid", "request_id"];

fn key_in(key: &str, set: &[&str]) -> bool {
    let lower = key.to_ascii_lowercase();
    set.contains(&lower.as_str())
}

fn is_key_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'-'
}

pub(super) fn render(c: &Colorizer, line: &str) -> String {
    let mut out = String::new();
    let bytes = line.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            c.emit(&mut out, &line[start..i], Role::Plain);
            continue;
        }

        let start = i;
        while i < bytes.len() && is_key_char(bytes[i]) {
            i += 1;
        }
        let key_end = i;

        if key_end > start && i < bytes.len() && bytes[i] == b'=' {
            let key = &line[start..key_end];
            let eq_pos = i;
            let value_start = eq_pos + 1;

            if value_start < bytes.len() && bytes[value_start] == b'"' {
                let mut j = value_start + 1;
                while j < bytes.len() {
                    if bytes[j] == b'\\' && j + 1 < bytes.len() {
                        j += 2;
                        continue;
                    }
                    if bytes[j] == b'"' {
                        j += 1;
                        break;
                    }
                    j += 1;
                }
                let quoted_end = j;
                // require a real closing quote, not end-of-line truncation
                if quoted_end > value_start + 1 && bytes[quoted_end - 1] == b'"' {
                    let inner = &line[value_start + 1..quoted_end - 1];
                    render_pair(c, key, inner, true, &mut out);
                    i = quoted_end;
                    continue;
                }
            } else {
                let mut j = value_start;
                while j < bytes.len() && !bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j > value_start {
                    let value = &line[value_start..j];
                    render_pair(c, key, value, false, &mut out);
                    i = j;
                    continue;
                }
            }
        }

        // not a recognized pair: emit the run up to the next whitespace as a
        // bare token.
        let mut j = start;
        while j < bytes.len() && !bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let token = &line[start..j];
        render_bare_token(c, token, &mut out);
        i = j;
    }

    out
}

fn render_pair(c: &Colorizer, key: &str, value: &str, quoted: bool, out: &mut String) {
    let is_level = key_in(key, LEVEL_KEYS);
    let severity = parse_severity(value);

    let key_style = if is_level {
        severity
            .map(|s| c.theme().severity_style(s))
            .unwrap_or_else(|| c.theme().style(Role::LogfmtKey))
    } else {
        c.theme().style(Role::LogfmtKey)
    };
    c.emit_style(out, key, key_style);
    c.emit_style(out, "=", c.theme().style(Role::Equals));

    let value_style = if is_level {
        severity
            .map(|s| c.theme().severity_style(s))
            .unwrap_or_else(|| c.theme().style(Role::LogfmtValue))
    } else if key_in(key, TIMESTAMP_KEYS) {
        c.theme().style(Role::Timestamp)
    } else if key_in(key, SERVICE_KEYS) {
        c.theme().style(Role::Service)
    } else if key.eq_ignore_ascii_case("status") {
        value
            .parse::<u16>()
            .map(|s| c.theme().status_style(s))
            .unwrap_or_else(|| c.theme().style(Role::LogfmtValue))
    } else {
        c.theme().style(Role::LogfmtValue)
    };

    if quoted {
        let quote_style = c.theme().style(Role::Quote);
        c.emit_style(out, "\"", quote_style);
        c.emit_style(out, value, value_style);
        c.emit_style(out, "\"", quote_style);
    } else {
        c.emit_style(out, value, value_style);
    }
}

fn render_bare_token(c: &Colorizer, token: &str, out: &mut String) {
    if let Some(sev) = parse_severity(token) {
        c.emit_style(out, token, c.theme().severity_style(sev));
    } else {
        c.emit(out, token, Role::Plain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{PaintCtx, Theme};
    use crate::search::SearchConfig;

    fn colorizer() -> Colorizer {
        Colorizer::new(Theme::light(), PaintCtx::new(false, false))
    }

    #[test]
    fn preserves_plain_text_round_trip_with_colors_disabled() {
        let c = colorizer();
        let line = r#"time=2025-01-19T10:30:00Z level=info msg="hello world" status=200"#;
        assert_eq!(render(&c, line), line);
    }

    #[test]
    fn bare_level_token_is_recognized() {
        let c = colorizer();
        let line = "WARN disk usage high";
        assert_eq!(render(&c, line), line);
    }

    #[test]
    fn search_overlay_does_not_change_plain_projection() {
        let mut c = colorizer();
        c.set_search(SearchConfig::literal("hello"));
        let line = r#"msg="hello world""#;
        assert_eq!(render(&c, line), line);
    }
}
