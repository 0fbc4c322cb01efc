//! JSON line renderer (spec §4.2).
//!
//! The structural invariant this module exists to protect: a JSON key is
//! always emitted as a single, indivisible painted unit (quotes included).
//! Splitting a key into sub-spans — one styled run for a search match, one
//! for the rest — would land an escape sequence between the delimiting
//! quotes, which is exactly the "ANSI inside a JSON key" corruption this
//! crate's design deliberately avoids. String *values* have no such
//! restriction and go through the normal field-emitting primitive, so a
//! search match inside a value is highlighted precisely, span by span.

use serde_json::{Map, Value};

use crate::colorize::Colorizer;
use crate::severity::{parse_numeric_severity, parse_severity};
use crate::style::{Role, Style};

const LEVEL_KEYS: &[&str] = &["level", "severity", "loglevel", "log.level"];
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "time", "ts", "@timestamp"];
const SERVICE_KEYS: &[&str] = &["service", "component", "module", "app"];

fn key_in(key: &str, set: &[&str]) -> bool {
    let lower = key.to_ascii_lowercase();
    set.contains(&lower.as_str())
}

/// Render a line already confirmed to parse as a JSON object. Returns `None`
/// if, against the detector's own judgment, it turns out not to parse —
/// callers fall back to the generic message renderer in that case.
pub(super) fn render(c: &Colorizer, line: &str) -> Option<String> {
    let value: Value = serde_json::from_str(line.trim()).ok()?;
    let map = value.as_object()?;
    let mut out = String::new();
    render_object(c, map, &mut out);
    Some(out)
}

fn render_object(c: &Colorizer, map: &Map<String, Value>, out: &mut String) {
    out.push_str(&c.theme().style(Role::Bracket).paint("{", c.ctx()));
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(&c.theme().style(Role::Bracket).paint(",", c.ctx()));
        }
        render_key(c, key, value, out);
        out.push_str(&c.theme().style(Role::Bracket).paint(":", c.ctx()));
        render_value(c, key, value, out);
    }
    out.push_str(&c.theme().style(Role::Bracket).paint("}", c.ctx()));
}

fn render_array(c: &Colorizer, items: &[Value], out: &mut String) {
    out.push_str(&c.theme().style(Role::Bracket).paint("[", c.ctx()));
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(&c.theme().style(Role::Bracket).paint(",", c.ctx()));
        }
        render_bare_value(c, item, out);
    }
    out.push_str(&c.theme().style(Role::Bracket).paint("]", c.ctx()));
}

fn level_style_for(c: &Colorizer, value: &Value) -> Option<Style> {
    let severity = value
        .as_str()
        .and_then(parse_severity)
        .or_else(|| value.as_u64().and_then(parse_numeric_severity))?;
    Some(c.theme().severity_style(severity))
}

fn render_key(c: &Colorizer, key: &str, value: &Value, out: &mut String) {
    let style = if key_in(key, LEVEL_KEYS) {
        level_style_for(c, value).unwrap_or_else(|| c.theme().style(Role::JsonKey))
    } else {
        c.theme().style(Role::JsonKey)
    };
    paint_atomic_quoted(c, key, style, out);
}

/// Paint a whole quoted key as one unit: fully highlighted if any search
/// match falls inside it, plain otherwise. Never split internally.
fn paint_atomic_quoted(c: &Colorizer, text: &str, style: Style, out: &mut String) {
    let quoted = serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""));
    let effective = if c.search().matches(text).is_empty() {
        style
    } else {
        style.compose(c.theme().style(Role::SearchHighlight))
    };
    out.push_str(&effective.paint(&quoted, c.ctx()));
}

fn render_value(c: &Colorizer, key: &str, value: &Value, out: &mut String) {
    match value {
        Value::String(s) => {
            let role_style = if key_in(key, TIMESTAMP_KEYS) {
                c.theme().style(Role::Timestamp)
            } else if key_in(key, SERVICE_KEYS) {
                c.theme().style(Role::Service)
            } else if key_in(key, LEVEL_KEYS) {
                level_style_for(c, value).unwrap_or_else(|| c.theme().style(Role::JsonString))
            } else {
                c.theme().style(Role::JsonString)
            };
            render_quoted_string(c, s, role_style, out);
        }
        _ => render_bare_value(c, value, out),
    }
}

fn render_bare_value(c: &Colorizer, value: &Value, out: &mut String) {
    match value {
        Value::String(s) => render_quoted_string(c, s, c.theme().style(Role::JsonString), out),
        Value::Number(n) => c.emit(out, &n.to_string(), Role::JsonNumber),
        Value::Bool(true) => c.emit(out, "true", Role::StatusOk),
        Value::Bool(false) => c.emit(out, "false", Role::StatusWarn),
        Value::Null => c.emit(out, "null", Role::JsonValue),
        Value::Object(map) => render_object(c, map, out),
        Value::Array(items) => render_array(c, items, out),
    }
}

/// String values have no "no ANSI inside" restriction, so unlike keys they
/// go through the normal per-span search overlay: quotes themed separately,
/// content painted with `emit_style`.
fn render_quoted_string(c: &Colorizer, s: &str, style: Style, out: &mut String) {
    let quoted = serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""));
    let inner = &quoted[1..quoted.len() - 1];
    let quote_style = c.theme().style(Role::Quote);
    c.emit_style(out, "\"", quote_style);
    c.emit_style(out, inner, style);
    c.emit_style(out, "\"", quote_style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{PaintCtx, Theme};

    fn plain_colorizer() -> Colorizer {
        Colorizer::new(Theme::light(), PaintCtx::new(false, false))
    }

    #[test]
    fn reorders_and_reserializes_but_preserves_keys_and_values() {
        let c = plain_colorizer();
        let out = render(&c, r#"{"b":1,"a":"x"}"#).unwrap();
        assert!(out.contains("\"a\":\"x\""));
        assert!(out.contains("\"b\":1"));
    }

    #[test]
    fn non_object_json_renders_nothing() {
        let c = plain_colorizer();
        assert!(render(&c, "[1,2,3]").is_none());
    }

    #[test]
    fn level_key_colors_itself_and_its_value() {
        let c = plain_colorizer();
        let out = render(&c, r#"{"level":"error","msg":"boom"}"#).unwrap();
        assert!(out.contains(r#""level":"error""#));
    }
}
