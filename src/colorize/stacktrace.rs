//! GoTest, JavaException, JavaScriptException, PythonException and
//! GoroutineStackTrace renderers.
//!
//! Each renderer recognizes the handful of line shapes its format is
//! actually made of (header/start line, `at`-style frame line, `File "..."`
//! -style frame line) and falls back to the generic message post-process for
//! anything that doesn't match one of those shapes — multi-line formats are
//! still made of ordinary lines, and an unrecognized one inside an active
//! trace shouldn't go fully unstyled.

use std::sync::LazyLock;

use regex::Regex;

use crate::colorize::Colorizer;
use crate::style::Role;

// --------------------------------------------------------------------
// GoTest
// --------------------------------------------------------------------

static GOTEST_RESULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--- (PASS|FAIL|SKIP): (\S+)").unwrap());
static GOTEST_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(=== RUN|=== NAME|=== CONT)\s+(\S+)").unwrap());
static GOTEST_SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(ok|FAIL)\s+(\S+)").unwrap());

pub(super) fn render_go_test(c: &Colorizer, line: &str) -> String {
    if let Some(caps) = GOTEST_RESULT_RE.captures(line) {
        let kw = caps.get(1).unwrap();
        let status = match kw.as_str() {
            "PASS" => Role::StatusOk,
            "FAIL" => Role::StatusError,
            _ => Role::StatusWarn,
        };
        let mut spans = vec![(kw.range(), c.theme().style(status))];
        if let Some(name) = caps.get(2) {
            spans.push((name.range(), c.theme().style(Role::Method)));
        }
        spans.sort_by_key(|(r, _)| r.start);
        let mut out = String::new();
        c.render_spans(&mut out, line, &spans);
        return out;
    }
    if let Some(caps) = GOTEST_RUN_RE.captures(line) {
        let mut spans = vec![(caps.get(1).unwrap().range(), c.theme().style(Role::Info))];
        if let Some(name) = caps.get(2) {
            spans.push((name.range(), c.theme().style(Role::Method)));
        }
        spans.sort_by_key(|(r, _)| r.start);
        let mut out = String::new();
        c.render_spans(&mut out, line, &spans);
        return out;
    }
    if let Some(caps) = GOTEST_SUMMARY_RE.captures(line) {
        let kw = caps.get(1).unwrap();
        let status = if kw.as_str() == "ok" { Role::StatusOk } else { Role::StatusError };
        let mut spans = vec![(kw.range(), c.theme().style(status))];
        if let Some(pkg) = caps.get(2) {
            spans.push((pkg.range(), c.theme().style(Role::Service)));
        }
        spans.sort_by_key(|(r, _)| r.start);
        let mut out = String::new();
        c.render_spans(&mut out, line, &spans);
        return out;
    }
    if line.trim() == "PASS" {
        return paint_whole_line(c, line, Role::StatusOk);
    }
    if line.trim() == "FAIL" {
        return paint_whole_line(c, line, Role::StatusError);
    }
    c.render_message(line)
}

fn paint_whole_line(c: &Colorizer, line: &str, role: Role) -> String {
    let mut out = String::new();
    c.emit(&mut out, line, role);
    out
}

// --------------------------------------------------------------------
// JavaException
// --------------------------------------------------------------------

static JAVA_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(Exception in thread "(?P<thread>[^"]*)" |Caused by: )(?P<class>[\w.$]+)(: (?P<msg>.*))?$"#)
        .unwrap()
});
static JAVA_FRAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<ws>\s*)at (?P<method>[\w.$<>]+)\((?P<file>[^():]+):(?P<line>\d+)\)").unwrap());

pub(super) fn render_java_exception(c: &Colorizer, line: &str) -> String {
    if let Some(caps) = JAVA_START_RE.captures(line) {
        let mut spans = Vec::new();
        if let Some(thread) = caps.name("thread") {
            spans.push((thread.range(), c.theme().style(Role::Service)));
        }
        spans.push((caps.name("class").unwrap().range(), c.theme().style(Role::Error)));
        spans.sort_by_key(|(r, _)| r.start);
        let mut out = String::new();
        c.render_spans(&mut out, line, &spans);
        return out;
    }
    if let Some(caps) = JAVA_FRAME_RE.captures(line) {
        let mut spans = vec![
            (caps.name("method").unwrap().range(), c.theme().style(Role::Method)),
            (caps.name("file").unwrap().range(), c.theme().style(Role::Filename)),
            (caps.name("line").unwrap().range(), c.theme().style(Role::LineNum)),
        ];
        spans.sort_by_key(|(r, _)| r.start);
        let mut out = String::new();
        c.render_spans(&mut out, line, &spans);
        return out;
    }
    c.render_message(line)
}

// --------------------------------------------------------------------
// JavaScriptException
// --------------------------------------------------------------------

static JS_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<class>\w*(?:Error|Exception))(: (?P<msg>.*))?$").unwrap());
static JS_FRAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+at\s+(?P<fn>[\w.$<>\[\] ]+?)\s*\((?P<file>[^():]+):(?P<line>\d+):(?P<col>\d+)\)").unwrap()
});

pub(super) fn render_js_exception(c: &Colorizer, line: &str) -> String {
    if let Some(caps) = JS_START_RE.captures(line) {
        let class = caps.name("class").unwrap();
        let mut out = String::new();
        c.render_spans(
            &mut out,
            line,
            &[(class.range(), c.theme().style(Role::Error))],
        );
        return out;
    }
    if let Some(caps) = JS_FRAME_RE.captures(line) {
        let mut spans = vec![
            (caps.name("fn").unwrap().range(), c.theme().style(Role::Method)),
            (caps.name("file").unwrap().range(), c.theme().style(Role::Filename)),
            (caps.name("line").unwrap().range(), c.theme().style(Role::LineNum)),
            (caps.name("col").unwrap().range(), c.theme().style(Role::LineNum)),
        ];
        spans.sort_by_key(|(r, _)| r.start);
        let mut out = String::new();
        c.render_spans(&mut out, line, &spans);
        return out;
    }
    c.render_message(line)
}

// --------------------------------------------------------------------
// PythonException
// --------------------------------------------------------------------

static PYTHON_FRAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s+File "(?P<file>[^"]+)", line (?P<line>\d+), in (?P<fn>\S+)"#).unwrap()
});
static PYTHON_FINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<class>\w*Error)(: (?P<msg>.*))?$").unwrap());

pub(super) fn render_python_exception(c: &Colorizer, line: &str) -> String {
    if line.trim() == "Traceback (most recent call last):" {
        return paint_whole_line(c, line, Role::Info);
    }
    if let Some(caps) = PYTHON_FRAME_RE.captures(line) {
        let mut spans = vec![
            (caps.name("file").unwrap().range(), c.theme().style(Role::Filename)),
            (caps.name("line").unwrap().range(), c.theme().style(Role::LineNum)),
            (caps.name("fn").unwrap().range(), c.theme().style(Role::Method)),
        ];
        spans.sort_by_key(|(r, _)| r.start);
        let mut out = String::new();
        c.render_spans(&mut out, line, &spans);
        return out;
    }
    if let Some(caps) = PYTHON_FINAL_RE.captures(line) {
        let class = caps.name("class").unwrap();
        let mut out = String::new();
        c.render_spans(&mut out, line, &[(class.range(), c.theme().style(Role::Error))]);
        return out;
    }
    c.render_message(line)
}

// --------------------------------------------------------------------
// GoroutineStackTrace
// --------------------------------------------------------------------

static GOROUTINE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<kw>goroutine) (?P<id>\d+) \[(?P<state>[^\]]*)\]:").unwrap());
static GOROUTINE_FRAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<fn>[\w./*()]+)\(").unwrap());
static GOROUTINE_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?P<file>\S+\.go):(?P<line>\d+)").unwrap());

pub(super) fn render_goroutine(c: &Colorizer, line: &str) -> String {
    if let Some(caps) = GOROUTINE_START_RE.captures(line) {
        let mut spans = vec![
            (caps.name("id").unwrap().range(), c.theme().style(Role::Pid)),
            (caps.name("state").unwrap().range(), c.theme().style(Role::Info)),
        ];
        spans.sort_by_key(|(r, _)| r.start);
        let mut out = String::new();
        c.render_spans(&mut out, line, &spans);
        return out;
    }
    if let Some(caps) = GOROUTINE_LOCATION_RE.captures(line) {
        let mut spans = vec![
            (caps.name("file").unwrap().range(), c.theme().style(Role::Filename)),
            (caps.name("line").unwrap().range(), c.theme().style(Role::LineNum)),
        ];
        spans.sort_by_key(|(r, _)| r.start);
        let mut out = String::new();
        c.render_spans(&mut out, line, &spans);
        return out;
    }
    if let Some(caps) = GOROUTINE_FRAME_RE.captures(line) {
        let mut out = String::new();
        c.render_spans(
            &mut out,
            line,
            &[(caps.name("fn").unwrap().range(), c.theme().style(Role::Method))],
        );
        return out;
    }
    c.render_message(line)
}
