//! The stateful, priority-ranked format detector (spec §4.1).

use std::sync::LazyLock;

use regex::Regex;

use crate::format::LogFormat;

/// Polymorphism over three predicates, per the design note: a single trait
/// with defaulted multi-line methods rather than a class hierarchy.
pub trait Detector: Send + Sync {
    fn format(&self) -> LogFormat;
    fn specificity(&self) -> u32;
    fn pattern_length(&self) -> usize;
    fn detect(&self, line: &str) -> bool;

    fn is_multiline(&self) -> bool {
        false
    }
    /// Does `line` begin a new instance of this multi-line format?
    fn detect_start(&self, line: &str) -> bool {
        self.detect(line)
    }
    /// Is `line` a continuation of an already-active instance?
    fn detect_continuation(&self, _line: &str) -> bool {
        false
    }
    /// Does `line` explicitly terminate an active instance? None of this
    /// crate's multi-line formats define one (spec §4.1) — ending is always
    /// implicit (a non-continuation, non-restart line falls through to a
    /// fresh full scan).
    fn detect_end(&self, _line: &str) -> bool {
        false
    }
}

fn is_continuation_line(line: &str) -> bool {
    matches!(line.as_bytes().first(), Some(b' ') | Some(b'\t'))
}

// --------------------------------------------------------------------
// Structured grammars — specificity 100
// --------------------------------------------------------------------

struct JsonDetector;
impl Detector for JsonDetector {
    fn format(&self) -> LogFormat {
        LogFormat::Json
    }
    fn specificity(&self) -> u32 {
        100
    }
    fn pattern_length(&self) -> usize {
        "{\"key\":\"value\"}".len()
    }
    fn detect(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.starts_with('{')
            && serde_json::from_str::<serde_json::Value>(trimmed)
                .map(|v| v.is_object())
                .unwrap_or(false)
    }
}

/// Matches a single logfmt-style `key=value` token, key non-empty,
/// value either double-quoted (with escapes) or a bare non-space run.
static LOGFMT_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[\w.\-]+=(?:"(?:[^"\\]|\\.)*"|\S+)$"#).unwrap());

struct LogfmtDetector;
impl Detector for LogfmtDetector {
    fn format(&self) -> LogFormat {
        LogFormat::Logfmt
    }
    fn specificity(&self) -> u32 {
        100
    }
    fn pattern_length(&self) -> usize {
        LOGFMT_TOKEN_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return false;
        }
        let pairs = tokens
            .iter()
            .filter(|t| LOGFMT_TOKEN_RE.is_match(t))
            .count();
        pairs >= 1 && pairs * 2 > tokens.len()
    }
}

// --------------------------------------------------------------------
// Single-line regex-based formats — specificity 50
// --------------------------------------------------------------------

static APACHE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:\d{1,3}\.){3}\d{1,3} \S+ \S+ \[[^\]]+\] "\S+ \S+ HTTP/\d\.\d" \d{3} (?:\d+|-)$"#,
    )
    .unwrap()
});

struct ApacheCommonDetector;
impl Detector for ApacheCommonDetector {
    fn format(&self) -> LogFormat {
        LogFormat::ApacheCommon
    }
    fn specificity(&self) -> u32 {
        50
    }
    fn pattern_length(&self) -> usize {
        APACHE_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        APACHE_RE.is_match(line.trim_end())
    }
}

static NGINX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:\d{1,3}\.){3}\d{1,3} \S+ \S+ \[[^\]]+\] "\S+ \S+ HTTP/\d\.\d" \d{3} (?:\d+|-) "[^"]*" "[^"]*"$"#,
    )
    .unwrap()
});

struct NginxDetector;
impl Detector for NginxDetector {
    fn format(&self) -> LogFormat {
        LogFormat::Nginx
    }
    fn specificity(&self) -> u32 {
        50
    }
    fn pattern_length(&self) -> usize {
        NGINX_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        NGINX_RE.is_match(line.trim_end())
    }
}

static SYSLOG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]{2}\s+\d{1,2}\s+\d{2}:\d{2}:\d{2}\s+\S+\s+(\S+?)(\[\d+\])?:").unwrap()
});

struct SyslogDetector;
impl Detector for SyslogDetector {
    fn format(&self) -> LogFormat {
        LogFormat::Syslog
    }
    fn specificity(&self) -> u32 {
        50
    }
    fn pattern_length(&self) -> usize {
        SYSLOG_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        SYSLOG_RE.is_match(line)
    }
}

// --------------------------------------------------------------------
// Rsyslog — multi-line, specificity 55 (must beat plain Syslog)
// --------------------------------------------------------------------

static RSYSLOG_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]{2}\s+\d{1,2}\s+\d{2}:\d{2}:\d{2}\s+\S+\s+(rsyslogd|syslogd)(\[\d+\])?:")
        .unwrap()
});

struct RsyslogDetector;
impl Detector for RsyslogDetector {
    fn format(&self) -> LogFormat {
        LogFormat::Rsyslog
    }
    fn specificity(&self) -> u32 {
        55
    }
    fn pattern_length(&self) -> usize {
        RSYSLOG_START_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        self.detect_start(line)
    }
    fn is_multiline(&self) -> bool {
        true
    }
    fn detect_start(&self, line: &str) -> bool {
        RSYSLOG_START_RE.is_match(line)
    }
    fn detect_continuation(&self, line: &str) -> bool {
        is_continuation_line(line)
    }
}

static GO_STANDARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2} ").unwrap());

struct GoStandardDetector;
impl Detector for GoStandardDetector {
    fn format(&self) -> LogFormat {
        LogFormat::GoStandard
    }
    fn specificity(&self) -> u32 {
        50
    }
    fn pattern_length(&self) -> usize {
        GO_STANDARD_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        GO_STANDARD_RE.is_match(line)
    }
}

static RAILS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(?:[.,]\d+)?\] (\w+)(?: -- | {2})")
        .unwrap()
});

/// WEBrick variant: `[ts] LEVEL message` without the `--`/double-space
/// separator convention.
static RAILS_WEBRICK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(?:[.,]\d+)?\] (\w+) ").unwrap()
});

struct RailsDetector;
impl Detector for RailsDetector {
    fn format(&self) -> LogFormat {
        LogFormat::Rails
    }
    fn specificity(&self) -> u32 {
        50
    }
    fn pattern_length(&self) -> usize {
        RAILS_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        RAILS_RE.is_match(line) || RAILS_WEBRICK_RE.is_match(line)
    }
}

static DOCKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z {2}([A-Z]+) ").unwrap()
});

struct DockerDetector;
impl Detector for DockerDetector {
    fn format(&self) -> LogFormat {
        LogFormat::Docker
    }
    fn specificity(&self) -> u32 {
        50
    }
    fn pattern_length(&self) -> usize {
        DOCKER_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        DOCKER_RE.is_match(line)
    }
}

static KUBERNETES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z \d+ (\S+):(\d+)\] ").unwrap()
});

struct KubernetesDetector;
impl Detector for KubernetesDetector {
    fn format(&self) -> LogFormat {
        LogFormat::Kubernetes
    }
    fn specificity(&self) -> u32 {
        50
    }
    fn pattern_length(&self) -> usize {
        KUBERNETES_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        KUBERNETES_RE.is_match(line)
    }
}

static HEROKU_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?[+-]\d{2}:\d{2} (\S+)\[([^\]]+)\]: ")
        .unwrap()
});

struct HerokuDetector;
impl Detector for HerokuDetector {
    fn format(&self) -> LogFormat {
        LogFormat::Heroku
    }
    fn specificity(&self) -> u32 {
        50
    }
    fn pattern_length(&self) -> usize {
        HEROKU_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        HEROKU_RE.is_match(line)
    }
}

// --------------------------------------------------------------------
// Application-specific / multi-line formats — specificity 70
// --------------------------------------------------------------------

static GOTEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(=== RUN|=== NAME|=== CONT|--- PASS:|--- FAIL:|--- SKIP:|\? .*\[no test files\]|PASS$|FAIL$|ok \S+|FAIL\s+\S+)",
    )
    .unwrap()
});

struct GoTestDetector;
impl Detector for GoTestDetector {
    fn format(&self) -> LogFormat {
        LogFormat::GoTest
    }
    fn specificity(&self) -> u32 {
        70
    }
    fn pattern_length(&self) -> usize {
        GOTEST_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        GOTEST_RE.is_match(line)
    }
}

static JAVA_EXCEPTION_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Exception in thread |Caused by: )").unwrap());

struct JavaExceptionDetector;
impl Detector for JavaExceptionDetector {
    fn format(&self) -> LogFormat {
        LogFormat::JavaException
    }
    fn specificity(&self) -> u32 {
        70
    }
    fn pattern_length(&self) -> usize {
        JAVA_EXCEPTION_START_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        self.detect_start(line)
    }
    fn is_multiline(&self) -> bool {
        true
    }
    fn detect_start(&self, line: &str) -> bool {
        JAVA_EXCEPTION_START_RE.is_match(line)
    }
    fn detect_continuation(&self, line: &str) -> bool {
        is_continuation_line(line)
    }
}

static JS_EXCEPTION_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w*(?:Error|Exception): .*|Error$|Trace: )").unwrap());
static JS_EXCEPTION_CONTINUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+at\s+").unwrap());

struct JavaScriptExceptionDetector;
impl Detector for JavaScriptExceptionDetector {
    fn format(&self) -> LogFormat {
        LogFormat::JavaScriptException
    }
    fn specificity(&self) -> u32 {
        70
    }
    fn pattern_length(&self) -> usize {
        JS_EXCEPTION_START_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        self.detect_start(line)
    }
    fn is_multiline(&self) -> bool {
        true
    }
    fn detect_start(&self, line: &str) -> bool {
        JS_EXCEPTION_START_RE.is_match(line)
    }
    fn detect_continuation(&self, line: &str) -> bool {
        JS_EXCEPTION_CONTINUATION_RE.is_match(line)
    }
}

static PYTHON_EXCEPTION_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Traceback \(most recent call last\):|\w*Error: )").unwrap()
});

struct PythonExceptionDetector;
impl Detector for PythonExceptionDetector {
    fn format(&self) -> LogFormat {
        LogFormat::PythonException
    }
    fn specificity(&self) -> u32 {
        70
    }
    fn pattern_length(&self) -> usize {
        PYTHON_EXCEPTION_START_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        self.detect_start(line)
    }
    fn is_multiline(&self) -> bool {
        true
    }
    fn detect_start(&self, line: &str) -> bool {
        PYTHON_EXCEPTION_START_RE.is_match(line)
    }
    fn detect_continuation(&self, line: &str) -> bool {
        is_continuation_line(line)
    }
}

static GOROUTINE_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^goroutine \d+ \[[^\]]*\]:").unwrap());

struct GoroutineStackTraceDetector;
impl Detector for GoroutineStackTraceDetector {
    fn format(&self) -> LogFormat {
        LogFormat::GoroutineStackTrace
    }
    fn specificity(&self) -> u32 {
        70
    }
    fn pattern_length(&self) -> usize {
        GOROUTINE_START_RE.as_str().len()
    }
    fn detect(&self, line: &str) -> bool {
        self.detect_start(line)
    }
    fn is_multiline(&self) -> bool {
        true
    }
    fn detect_start(&self, line: &str) -> bool {
        GOROUTINE_START_RE.is_match(line)
    }
    fn detect_continuation(&self, line: &str) -> bool {
        // Unlike Java/Python, a goroutine dump's function-call frame line
        // (`main.divide(...)`) carries no leading whitespace — only the
        // following file:line carries a tab. Treat anything non-blank that
        // isn't itself a fresh goroutine header as part of the trace.
        !line.trim().is_empty() && !GOROUTINE_START_RE.is_match(line)
    }
}

// --------------------------------------------------------------------
// Registry + stateful classifier
// --------------------------------------------------------------------

static REGISTRY: LazyLock<Vec<Box<dyn Detector>>> = LazyLock::new(|| {
    vec![
        Box::new(JsonDetector),
        Box::new(LogfmtDetector),
        Box::new(ApacheCommonDetector),
        Box::new(NginxDetector),
        Box::new(SyslogDetector),
        Box::new(RsyslogDetector),
        Box::new(GoStandardDetector),
        Box::new(RailsDetector),
        Box::new(DockerDetector),
        Box::new(KubernetesDetector),
        Box::new(HerokuDetector),
        Box::new(GoTestDetector),
        Box::new(JavaExceptionDetector),
        Box::new(JavaScriptExceptionDetector),
        Box::new(PythonExceptionDetector),
        Box::new(GoroutineStackTraceDetector),
    ]
});

fn registry() -> &'static [Box<dyn Detector>] {
    &REGISTRY
}

/// Stateful per-reader format detector (spec §4.1).
///
/// `previous`/`active` are indices into the fixed registry above, which is
/// why `FormatDetector` needs no lifetime parameter even though it always
/// refers back to the same detector instances.
#[derive(Debug, Default)]
pub struct FormatDetector {
    previous: Option<usize>,
    active: Option<usize>,
}

impl FormatDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line, mutating detector state as needed. Never fails —
    /// returns `LogFormat::Unknown` when nothing matches.
    pub fn classify(&mut self, line: &str) -> LogFormat {
        let reg = registry();

        // 1. Multi-line continuation fast path.
        if let Some(idx) = self.active {
            let d = &reg[idx];
            if d.detect_continuation(line) {
                log::trace!("{:?} continuation", d.format());
                return d.format();
            } else if d.detect_end(line) {
                let format = d.format();
                log::debug!("{format:?} multi-line block ended explicitly");
                self.active = None;
                return format;
            } else {
                log::debug!("{:?} multi-line block ended implicitly", d.format());
                self.active = None;
                // fall through to the full scan below
            }
        }

        // 2. Previous-detector fast path (skipped for a just-deactivated
        // multi-line detector, which step 1 already gave a chance to).
        if let Some(idx) = self.previous {
            let d = &reg[idx];
            if !d.is_multiline() && d.detect(line) {
                return d.format();
            }
        }

        // 3. Full scan: collect every match, rank by specificity, then
        // pattern length, then LogFormat ordinal (all ties broken
        // deterministically, independent of registry order).
        let mut winner: Option<usize> = None;
        for (idx, d) in reg.iter().enumerate() {
            if !d.detect(line) {
                continue;
            }
            winner = match winner {
                None => Some(idx),
                Some(best_idx) => {
                    let best = &reg[best_idx];
                    if is_better(d.as_ref(), best) {
                        log::trace!("{:?} outranks {:?}", d.format(), best.format());
                        Some(idx)
                    } else {
                        Some(best_idx)
                    }
                }
            };
        }

        let Some(idx) = winner else {
            log::trace!("no detector matched, falling back to Unknown");
            self.previous = None;
            return LogFormat::Unknown;
        };

        // 4. Activation.
        let d = &reg[idx];
        if d.is_multiline() && d.detect_start(line) {
            log::debug!("{:?} multi-line block started", d.format());
            self.active = Some(idx);
        }
        self.previous = Some(idx);
        d.format()
    }
}

/// True if `candidate` outranks `incumbent` under the tie-break rules.
fn is_better(candidate: &dyn Detector, incumbent: &dyn Detector) -> bool {
    match candidate.specificity().cmp(&incumbent.specificity()) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => {
            match candidate.pattern_length().cmp(&incumbent.pattern_length()) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Less => false,
                std::cmp::Ordering::Equal => candidate.format() < incumbent.format(),
            }
        }
    }
}
