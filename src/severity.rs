/// The four severity roles a Theme styles a log level with.
///
/// `FATAL`/`CRIT`/`CRITICAL` alias to `Error` and `TRACE` aliases to `Debug`:
/// logging frameworks spell their highest level inconsistently, so every
/// variant folds into `Error` here rather than forcing callers to normalize
/// level words themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Debug,
}

/// Parse a bare level word (case-insensitive) into a `Severity`.
pub fn parse_severity(word: &str) -> Option<Severity> {
    match word.to_ascii_uppercase().as_str() {
        "ERROR" | "FATAL" | "CRIT" | "CRITICAL" | "SEVERE" | "EMERGENCY" | "EMERG" | "ALERT"
        | "PANIC" => Some(Severity::Error),
        "WARN" | "WARNING" => Some(Severity::Warning),
        "INFO" | "NOTICE" => Some(Severity::Info),
        "DEBUG" | "TRACE" => Some(Severity::Debug),
        _ => None,
    }
}

/// Parse numeric log levels used by Bunyan, Pino, and similar JSON loggers.
/// Convention: 10=trace, 20=debug, 30=info, 40=warn, 50=error, 60=fatal.
/// Ranges tolerate custom intermediate levels.
pub fn parse_numeric_severity(n: u64) -> Option<Severity> {
    match n {
        1..=20 => Some(Severity::Debug),
        21..=30 => Some(Severity::Info),
        31..=40 => Some(Severity::Warning),
        41..=u64::MAX => Some(Severity::Error),
        _ => None,
    }
}
