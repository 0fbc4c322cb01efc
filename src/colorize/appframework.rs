//! Syslog/Rsyslog, GoStandard, Rails, Docker, Kubernetes and Heroku
//! renderers (spec §4.2). All share the same shape: a fixed structured
//! prefix rendered with `render_spans`, followed by either a plain
//! remainder (Rails, Docker) or a message that itself goes through the
//! generic token-level post-process (Syslog, Kubernetes, Heroku,
//! GoStandard — the last isn't named explicitly as "message
//! post-processed" in the format table, but its body is free text of the
//! same shape, so it's treated the same way here).

use std::sync::LazyLock;

use regex::Regex;

use crate::colorize::Colorizer;
use crate::style::Role;

static SYSLOG_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<ts>[A-Z][a-z]{2}\s+\d{1,2}\s+\d{2}:\d{2}:\d{2})\s+(?P<host>\S+)\s+(?P<svc>\S+?)(?:\[(?P<pid>\d+)\])?:\s?",
    )
    .unwrap()
});

pub(super) fn render_syslog(c: &Colorizer, line: &str) -> String {
    let Some(caps) = SYSLOG_PREFIX_RE.captures(line) else {
        return c.render_message(line);
    };
    let prefix_end = caps.get(0).unwrap().end();

    let mut spans = vec![
        (caps.name("ts").unwrap().range(), c.theme().style(Role::Timestamp)),
        (caps.name("host").unwrap().range(), c.theme().style(Role::Hostname)),
        (caps.name("svc").unwrap().range(), c.theme().style(Role::Service)),
    ];
    if let Some(pid) = caps.name("pid") {
        spans.push((pid.range(), c.theme().style(Role::Pid)));
    }
    spans.sort_by_key(|(range, _)| range.start);

    let mut out = String::new();
    c.render_spans(&mut out, &line[..prefix_end], &spans);
    c.append_message(&mut out, &line[prefix_end..]);
    out
}

static GO_STANDARD_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<ts>\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}) ").unwrap());

pub(super) fn render_go_standard(c: &Colorizer, line: &str) -> String {
    let Some(caps) = GO_STANDARD_PREFIX_RE.captures(line) else {
        return c.render_message(line);
    };
    let prefix_end = caps.get(0).unwrap().end();
    let ts_range = caps.name("ts").unwrap().range();

    let mut out = String::new();
    c.render_spans(
        &mut out,
        &line[..prefix_end],
        &[(ts_range, c.theme().style(Role::Timestamp))],
    );
    c.append_message(&mut out, &line[prefix_end..]);
    out
}

static RAILS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<ts>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(?:[.,]\d+)?)\] (?P<level>\w+)(?: -- | {2}| )")
        .unwrap()
});

pub(super) fn render_rails(c: &Colorizer, line: &str) -> String {
    let Some(caps) = RAILS_RE.captures(line) else {
        return c.render_message(line);
    };
    let ts_range = caps.name("ts").unwrap().range();
    let level_match = caps.name("level").unwrap();
    let level_style = crate::severity::parse_severity(level_match.as_str())
        .map(|s| c.theme().severity_style(s))
        .unwrap_or_else(|| c.theme().style(Role::Plain));

    let mut spans = vec![
        (ts_range, c.theme().style(Role::Timestamp)),
        (level_match.range(), level_style),
    ];
    spans.sort_by_key(|(range, _)| range.start);

    let mut out = String::new();
    c.render_spans(&mut out, line, &spans);
    out
}

static DOCKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<ts>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z)  (?P<level>[A-Z]+) ").unwrap()
});

pub(super) fn render_docker(c: &Colorizer, line: &str) -> String {
    let Some(caps) = DOCKER_RE.captures(line) else {
        return c.render_message(line);
    };
    let ts_range = caps.name("ts").unwrap().range();
    let level_match = caps.name("level").unwrap();
    let level_style = crate::severity::parse_severity(level_match.as_str())
        .map(|s| c.theme().severity_style(s))
        .unwrap_or_else(|| c.theme().style(Role::Plain));

    let mut spans = vec![
        (ts_range, c.theme().style(Role::Timestamp)),
        (level_match.range(), level_style),
    ];
    spans.sort_by_key(|(range, _)| range.start);

    let mut out = String::new();
    c.render_spans(&mut out, line, &spans);
    out
}

static KUBERNETES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<ts>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z) (?P<sev>\d+) (?P<file>\S+):(?P<line>\d+)\] ")
        .unwrap()
});

/// Kubernetes's leading integer is a glog severity digit, but this renderer
/// preserves the upstream tool's visual quirk of painting it with the `Pid`
/// role rather than mapping it through `Severity` (see DESIGN.md, open
/// question b) — it reads, at a glance, like a worker/process id.
pub(super) fn render_kubernetes(c: &Colorizer, line: &str) -> String {
    let Some(caps) = KUBERNETES_RE.captures(line) else {
        return c.render_message(line);
    };
    let prefix_end = caps.get(0).unwrap().end();

    let mut spans = vec![
        (caps.name("ts").unwrap().range(), c.theme().style(Role::Timestamp)),
        (caps.name("sev").unwrap().range(), c.theme().style(Role::Pid)),
        (caps.name("file").unwrap().range(), c.theme().style(Role::Filename)),
        (caps.name("line").unwrap().range(), c.theme().style(Role::LineNum)),
    ];
    spans.sort_by_key(|(range, _)| range.start);

    let mut out = String::new();
    c.render_spans(&mut out, &line[..prefix_end], &spans);
    c.append_message(&mut out, &line[prefix_end..]);
    out
}

static HEROKU_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<ts>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?[+-]\d{2}:\d{2}) (?P<svc>\S+)\[(?P<pid>[^\]]+)\]: ",
    )
    .unwrap()
});

pub(super) fn render_heroku(c: &Colorizer, line: &str) -> String {
    let Some(caps) = HEROKU_RE.captures(line) else {
        return c.render_message(line);
    };
    let prefix_end = caps.get(0).unwrap().end();

    let mut spans = vec![
        (caps.name("ts").unwrap().range(), c.theme().style(Role::Timestamp)),
        (caps.name("pid").unwrap().range(), c.theme().style(Role::Service)),
    ];
    spans.sort_by_key(|(range, _)| range.start);

    let mut out = String::new();
    c.render_spans(&mut out, &line[..prefix_end], &spans);
    c.append_message(&mut out, &line[prefix_end..]);
    out
}
