mod support;

use lumolog::style::{PaintCtx, Role, Theme};
use lumolog::{Colorizer, FormatDetector, LogFormat, SearchConfig};
use support::strip_ansi;

// ---------------------------------------------------------------------
// Search is a visual overlay, never a rewrite (spec §8 property 4).
// ---------------------------------------------------------------------

#[test]
fn search_overlay_does_not_change_the_plain_projection() {
    let mut c = Colorizer::new(Theme::dark(), PaintCtx::new(true, true));
    let line = "2025/01/19 08:30:00 INFO: Application started";

    let unsearched = c.render(line, LogFormat::GoStandard);
    c.set_search(SearchConfig::literal("Application"));
    let searched = c.render(line, LogFormat::GoStandard);

    assert_eq!(strip_ansi(&unsearched), line);
    assert_eq!(strip_ansi(&searched), line);
    assert_ne!(unsearched, searched, "a match should add highlight escapes");
}

#[test]
fn regex_highlight_preserves_the_timestamp_foreground() {
    let mut c = Colorizer::new(Theme::dark(), PaintCtx::new(true, true));
    c.set_search(SearchConfig::regex(r"\d{4}/\d{2}/\d{2}").unwrap());
    let line = "2025/01/19 08:30:00 INFO: Application started";

    let mut d = FormatDetector::new();
    let format = d.classify(line);
    assert_eq!(format, LogFormat::GoStandard);
    let out = c.render(line, format);

    assert_eq!(strip_ansi(&out), line);

    // The remainder of the timestamp after the matched date still carries
    // the plain Timestamp foreground, composed with no highlight.
    let ts_style = Theme::dark().style(Role::Timestamp);
    let remainder = ts_style.paint(" 08:30:00", &PaintCtx::new(true, true));
    assert!(out.contains(&remainder));

    // The matched date segment carries the highlight background composed
    // on top of the Timestamp foreground, not a plain highlight-only style.
    let highlight_on_timestamp = ts_style
        .compose(Theme::dark().style(Role::SearchHighlight))
        .paint("2025/01/19", &PaintCtx::new(true, true));
    assert!(out.contains(&highlight_on_timestamp));
}

#[test]
fn literal_search_is_byte_exact_and_case_sensitive() {
    let cfg = SearchConfig::literal("Error");
    assert_eq!(cfg.matches("error Error ERROR"), vec![(6, 11)]);
}

#[test]
fn literal_search_matches_are_non_overlapping_left_to_right() {
    let cfg = SearchConfig::literal("aa");
    assert_eq!(cfg.matches("aaaaa"), vec![(0, 2), (2, 4)]);
}

#[test]
fn regex_search_never_loops_on_an_empty_match() {
    let cfg = SearchConfig::regex(r"x*").unwrap();
    let matches = cfg.matches("xxabxxx");
    // Every match has positive width or advances; the call terminates and
    // every byte of "ab" is covered by some zero-width match boundary.
    assert!(matches.len() < 100);
    for (start, end) in &matches {
        assert!(end >= start);
    }
}

#[test]
fn setting_one_search_mode_clears_the_other() {
    let mut c = Colorizer::new(Theme::dark(), PaintCtx::new(true, true));
    c.set_search(SearchConfig::literal("foo"));
    c.set_search(SearchConfig::regex("bar").unwrap());

    let only_foo = c.render("foo", LogFormat::Unknown);
    let only_bar = c.render("bar", LogFormat::Unknown);

    // The literal "foo" search was overwritten by the regex "bar" search,
    // so a line matching only the old pattern is unstyled...
    assert_eq!(strip_ansi(&only_foo), "foo");
    assert_eq!(only_foo, "foo");
    // ...while a line matching the active regex is highlighted.
    assert_ne!(only_bar, "bar");
    assert_eq!(strip_ansi(&only_bar), "bar");
}

#[test]
fn invalid_search_regex_is_rejected_with_an_error() {
    let err = SearchConfig::regex("(unclosed").unwrap_err();
    assert!(err.to_string().contains("invalid search pattern"));
}

#[test]
fn json_key_and_value_co_highlight_without_corrupting_structure() {
    let mut c = Colorizer::new(Theme::dark(), PaintCtx::new(true, true));
    c.set_search(SearchConfig::literal("slide"));
    let line = r#"{"slideshow":"slide presentation","data":"normal"}"#;
    let out = c.render(line, LogFormat::Json);

    assert!(out.contains("slideshow"));
    assert!(strip_ansi(&out).contains("slide presentation"));
    let reparsed: serde_json::Value = serde_json::from_str(&strip_ansi(&out)).unwrap();
    let original: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(reparsed, original);

    // "slide" (matched) and " presentation" (unmatched) are painted by two
    // separate `Style::paint` calls, so check each segment's styling rather
    // than a literal substring spanning the highlight boundary.
    let string_style = Theme::dark().style(Role::JsonString);
    let highlight_style = string_style.compose(Theme::dark().style(Role::SearchHighlight));
    let ctx = PaintCtx::new(true, true);
    assert!(out.contains(&highlight_style.paint("slide", &ctx)));
    assert!(out.contains(&string_style.paint(" presentation", &ctx)));
}
