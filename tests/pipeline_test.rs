mod support;

use lumolog::style::{PaintCtx, Theme};
use lumolog::{Colorizer, FormatDetector, LogFormat};
use support::strip_ansi;

/// Run a full `classify -> render` sequence the way `main.rs`'s stdin loop
/// does, one fresh `FormatDetector` per sequence, one shared `Colorizer`.
fn run_pipeline(c: &Colorizer, lines: &[&str]) -> (Vec<LogFormat>, Vec<String>) {
    let mut d = FormatDetector::new();
    let mut formats = Vec::new();
    let mut rendered = Vec::new();
    for line in lines {
        let format = d.classify(line);
        formats.push(format);
        rendered.push(c.render(line, format));
    }
    (formats, rendered)
}

#[test]
fn java_exception_sequence_tags_and_recovers() {
    let c = Colorizer::new(Theme::dark(), PaintCtx::new(true, true));
    let lines = [
        r#"{"level":"INFO","message":"start"}"#,
        r#"Exception in thread "main" java.lang.ArithmeticException: / by zero"#,
        "\tat com.example.MyClass.divide(MyClass.java:10)",
        "INFO: Application restarted",
    ];
    let (formats, rendered) = run_pipeline(&c, &lines);
    assert_eq!(
        formats,
        vec![
            LogFormat::Json,
            LogFormat::JavaException,
            LogFormat::JavaException,
            LogFormat::Unknown,
        ]
    );
    for (out, line) in rendered.iter().zip(lines.iter()) {
        assert_eq!(&strip_ansi(out), line);
    }
}

#[test]
fn java_to_python_transition_preempts_the_active_multiline() {
    let c = Colorizer::new(Theme::dark(), PaintCtx::new(true, true));
    let lines = [
        r#"Exception in thread "main" java.lang.Exception: boom"#,
        "Traceback (most recent call last):",
        "  File \"x.py\", line 1, in <module>",
        "ValueError: bad value",
    ];
    let (formats, _) = run_pipeline(&c, &lines);
    assert_eq!(
        formats,
        vec![
            LogFormat::JavaException,
            LogFormat::PythonException,
            LogFormat::PythonException,
            LogFormat::PythonException,
        ]
    );
}

#[test]
fn rsyslog_continuation_runs_until_an_unrelated_line_breaks_it() {
    let c = Colorizer::new(Theme::dark(), PaintCtx::new(true, true));
    let lines = [
        "Jan 19 10:30:00 host rsyslogd: [origin] start",
        "    continued detail line",
        "Jan 19 10:30:05 host sshd[123]: login accepted",
    ];
    let (formats, rendered) = run_pipeline(&c, &lines);
    assert_eq!(
        formats,
        vec![LogFormat::Rsyslog, LogFormat::Rsyslog, LogFormat::Syslog]
    );
    for (out, line) in rendered.iter().zip(lines.iter()) {
        assert_eq!(&strip_ansi(out), line);
    }
}

#[test]
fn goroutine_stack_trace_sequence_is_byte_preserved() {
    let c = Colorizer::new(Theme::dark(), PaintCtx::new(true, true));
    let lines = [
        "goroutine 1 [running]:",
        "main.divide(...)",
        "\t/app/main.go:42 +0x1a",
        "exit status 2",
    ];
    let (formats, rendered) = run_pipeline(&c, &lines);
    assert_eq!(formats[0], LogFormat::GoroutineStackTrace);
    assert_eq!(formats[1], LogFormat::GoroutineStackTrace);
    assert_eq!(formats[2], LogFormat::GoroutineStackTrace);
    for (out, line) in rendered.iter().zip(lines.iter()) {
        assert_eq!(&strip_ansi(out), line);
    }
}

#[test]
fn determinism_holds_across_two_independent_detector_instances() {
    let lines = [
        r#"{"level":"info","msg":"x"}"#,
        "2025/01/19 08:30:00 INFO: ready",
        "plain text line",
    ];
    let mut a = FormatDetector::new();
    let mut b = FormatDetector::new();
    let tags_a: Vec<_> = lines.iter().map(|l| a.classify(l)).collect();
    let tags_b: Vec<_> = lines.iter().map(|l| b.classify(l)).collect();
    assert_eq!(tags_a, tags_b);
}

#[test]
fn mixed_stream_every_non_json_line_is_byte_preserved() {
    // JSON is explicitly exempt from byte-for-byte preservation (spec §8
    // property 2 allows key reordering on re-serialization); every other
    // format must round-trip exactly, even interleaved in the same stream
    // as a JSON line.
    let c = Colorizer::new(Theme::dark(), PaintCtx::new(true, true));
    let lines = [
        r#"{"service":"api","level":"warn","msg":"slow query"}"#,
        "timestamp=2025-01-19T10:30:00Z level=info status=200",
        r#"127.0.0.1 - - [19/Jan/2025:10:30:00 +0000] "GET / HTTP/1.1" 404 0"#,
        "[2025-01-19 10:30:00] ERROR -- : Connection refused",
        "2025-01-19T10:30:00.123456Z  INFO Starting container",
        "2025-01-19T10:30:00.123+00:00 app[web.1]: Request completed",
        "--- FAIL: TestDivide (0.00s)",
    ];
    let (formats, rendered) = run_pipeline(&c, &lines);
    assert_eq!(formats[0], LogFormat::Json);
    for ((out, line), format) in rendered.iter().zip(lines.iter()).zip(formats.iter()).skip(1) {
        assert_eq!(&strip_ansi(out), line, "format {format:?} must be byte-preserved");
    }
}
