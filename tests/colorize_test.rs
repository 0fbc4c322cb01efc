mod support;

use lumolog::style::{PaintCtx, Role, Theme};
use lumolog::{Colorizer, FormatDetector, LogFormat, SearchConfig};
use support::{dark_colorizer, plain_colorizer, strip_ansi};

fn classify_and_render(c: &Colorizer, line: &str) -> String {
    let format = FormatDetector::new().classify(line);
    c.render(line, format)
}

// ---------------------------------------------------------------------
// Plain-text preservation (spec §8 property 1) across every single-line
// format.
// ---------------------------------------------------------------------

#[test]
fn apache_common_round_trips_through_colors_enabled() {
    let c = dark_colorizer();
    let line = r#"127.0.0.1 - - [19/Jan/2025:10:30:00 +0000] "GET /api/users HTTP/1.1" 200 1234"#;
    let out = classify_and_render(&c, line);
    assert_ne!(out, line, "a styled dark-theme render should add escapes");
    assert_eq!(strip_ansi(&out), line);
}

#[test]
fn logfmt_round_trips_through_colors_enabled() {
    let c = dark_colorizer();
    let line = r#"timestamp=2025-01-19T10:30:00Z level=info status=500 request_id=req-abc"#;
    let out = classify_and_render(&c, line);
    assert_eq!(strip_ansi(&out), line);
}

#[test]
fn syslog_round_trips_through_colors_enabled() {
    let c = dark_colorizer();
    let line = "Jan 19 10:30:00 host sshd[123]: login accepted";
    let out = classify_and_render(&c, line);
    assert_eq!(strip_ansi(&out), line);
}

#[test]
fn go_standard_round_trips_through_colors_enabled() {
    let c = dark_colorizer();
    let line = "2025/01/19 08:30:00 INFO: Application started";
    let out = classify_and_render(&c, line);
    assert_eq!(strip_ansi(&out), line);
}

#[test]
fn unknown_plain_text_round_trips() {
    let c = dark_colorizer();
    let line = "just some plain text with no structure";
    let out = classify_and_render(&c, line);
    assert_eq!(strip_ansi(&out), line);
}

// ---------------------------------------------------------------------
// JSON structure preservation (spec §8 property 2) and the "no ANSI inside
// a JSON key" invariant (property 3).
// ---------------------------------------------------------------------

#[test]
fn json_reparses_to_an_equal_map_modulo_key_order() {
    let c = dark_colorizer();
    let line = r#"{"b":1,"a":"x","nested":{"z":true}}"#;
    let out = c.render(line, LogFormat::Json);
    let original: serde_json::Value = serde_json::from_str(line).unwrap();
    let roundtrip: serde_json::Value = serde_json::from_str(&strip_ansi(&out)).unwrap();
    assert_eq!(original, roundtrip);
}

#[test]
fn json_key_has_no_escape_byte_between_its_quotes() {
    let mut c = dark_colorizer();
    c.set_search(SearchConfig::literal("slide"));
    let line = r#"{"slideshow":"slide presentation","data":"normal"}"#;
    let out = c.render(line, LogFormat::Json);

    assert!(out.contains("slideshow"));
    assert_eq!(strip_ansi(&out).contains("slide presentation"), true);
    let roundtrip: serde_json::Value = serde_json::from_str(&strip_ansi(&out)).unwrap();
    assert_eq!(roundtrip["slideshow"], "slide presentation");

    // The match "slide" and the unmatched remainder " presentation" are
    // painted by two separate `Style::paint` calls, so the raw output never
    // contains the literal contiguous substring "slide presentation" — check
    // each segment's styling on its own instead.
    let string_style = Theme::dark().style(Role::JsonString);
    let highlight_style = string_style.compose(Theme::dark().style(Role::SearchHighlight));
    let ctx = PaintCtx::new(true, true);
    assert!(out.contains(&highlight_style.paint("slide", &ctx)));
    assert!(out.contains(&string_style.paint(" presentation", &ctx)));

    // Locate the quoted key "slideshow" in the rendered output and assert no
    // ESC byte appears between its delimiting quotes.
    let key_start = out.find("slideshow").unwrap();
    let before_quote = out[..key_start].rfind('"').unwrap();
    let after_quote = key_start + out[key_start..].find('"').unwrap();
    assert!(!out[before_quote + 1..after_quote].contains('\u{1b}'));
}

#[test]
fn json_level_key_colors_itself_by_the_values_severity() {
    let c = dark_colorizer();
    let line = r#"{"level":"error","message":"boom"}"#;
    let out = c.render(line, LogFormat::Json);
    let error_style = Theme::dark().severity_style(lumolog::Severity::Error);
    let expected_key = error_style.paint(r#""level""#, &PaintCtx::new(true, true));
    assert!(out.contains(&expected_key));
}

// ---------------------------------------------------------------------
// Apache status-class coloring end-to-end scenario (spec §8).
// ---------------------------------------------------------------------

#[test]
fn apache_2xx_status_uses_status_ok_style() {
    let c = dark_colorizer();
    let line = r#"127.0.0.1 - - [19/Jan/2025:10:30:00 +0000] "GET /api/users HTTP/1.1" 200 1234"#;
    let out = classify_and_render(&c, line);
    let expected = Theme::dark().style(Role::StatusOk).paint("200", &PaintCtx::new(true, true));
    assert!(out.contains(&expected));
}

#[test]
fn apache_5xx_status_uses_status_error_style() {
    let c = dark_colorizer();
    let line = r#"127.0.0.1 - - [19/Jan/2025:10:30:00 +0000] "GET /boom HTTP/1.1" 503 0"#;
    let out = classify_and_render(&c, line);
    let expected = Theme::dark().style(Role::StatusError).paint("503", &PaintCtx::new(true, true));
    assert!(out.contains(&expected));
}

// ---------------------------------------------------------------------
// Kubernetes beating Docker on an ambiguous timestamp, end to end through
// render (not just detect).
// ---------------------------------------------------------------------

#[test]
fn kubernetes_beats_docker_end_to_end() {
    let c = dark_colorizer();
    let line = "2025-01-19T10:30:00.123Z 1 main.go:42] ERROR Database connection failed";
    let mut d = FormatDetector::new();
    let format = d.classify(line);
    assert_eq!(format, LogFormat::Kubernetes);
    let out = c.render(line, format);
    assert_eq!(strip_ansi(&out), line);
}

// ---------------------------------------------------------------------
// Idempotence (spec §8 property 8).
// ---------------------------------------------------------------------

#[test]
fn render_is_idempotent_for_the_same_theme_and_input() {
    let c = dark_colorizer();
    let line = r#"{"level":"warn","msg":"disk usage high"}"#;
    let a = c.render(line, LogFormat::Json);
    let b = c.render(line, LogFormat::Json);
    assert_eq!(a, b);
}

#[test]
fn empty_input_yields_empty_output() {
    let c = plain_colorizer();
    assert_eq!(c.render("", LogFormat::Unknown), "");
}

#[test]
fn no_color_context_yields_plain_text_for_every_format() {
    let c = plain_colorizer();
    let line = r#"{"level":"error","msg":"boom"}"#;
    assert_eq!(c.render(line, LogFormat::Json), line);
}
