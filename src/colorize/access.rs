//! Apache Common Log Format / Nginx combined-format renderer (spec §4.2).

use std::sync::LazyLock;

use regex::Regex;

use crate::colorize::Colorizer;
use crate::format::LogFormat;
use crate::style::Role;

static ACCESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?P<ip>(?:\d{1,3}\.){3}\d{1,3}) (?P<ident>\S+) (?P<user>\S+) \[(?P<ts>[^\]]+)\] "(?P<method>\S+) (?P<path>\S+) (?P<proto>HTTP/\d\.\d)" (?P<status>\d{3}) (?P<bytes>\d+|-)(?: "(?P<referer>[^"]*)" "(?P<agent>[^"]*)")?"#,
    )
    .unwrap()
});

pub(super) fn render(c: &Colorizer, line: &str, format: LogFormat) -> String {
    let Some(caps) = ACCESS_RE.captures(line) else {
        return c.render_message(line);
    };

    let mut spans = Vec::new();
    spans.push((caps.name("ip").unwrap().range(), c.theme().style(Role::Ip)));
    spans.push((caps.name("ts").unwrap().range(), c.theme().style(Role::Timestamp)));
    spans.push((caps.name("method").unwrap().range(), c.theme().style(Role::Method)));
    spans.push((caps.name("path").unwrap().range(), c.theme().style(Role::Url)));

    let status: u16 = caps.name("status").unwrap().as_str().parse().unwrap_or(0);
    spans.push((caps.name("status").unwrap().range(), c.theme().status_style(status)));

    if format == LogFormat::Nginx {
        if let Some(agent) = caps.name("agent") {
            spans.push((agent.range(), c.theme().style(Role::Plain)));
        }
    }

    spans.sort_by_key(|(range, _)| range.start);

    let mut out = String::new();
    c.render_spans(&mut out, line, &spans);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{PaintCtx, Theme};

    fn colorizer() -> Colorizer {
        Colorizer::new(Theme::light(), PaintCtx::new(false, false))
    }

    #[test]
    fn preserves_plain_text_with_colors_disabled() {
        let c = colorizer();
        let line = r#"127.0.0.1 - - [19/Jan/2025:10:30:00 +0000] "GET /api/users HTTP/1.1" 200 1234"#;
        assert_eq!(render(&c, line, LogFormat::ApacheCommon), line);
    }

    #[test]
    fn nginx_trailing_quoted_fields_preserved() {
        let c = colorizer();
        let line = r#"127.0.0.1 - - [19/Jan/2025:10:30:00 +0000] "GET / HTTP/1.1" 404 0 "-" "curl/8.0""#;
        assert_eq!(render(&c, line, LogFormat::Nginx), line);
    }
}
