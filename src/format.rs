/// The closed set of log formats the detector can tag a line with.
///
/// Declaration order is significant: when two detectors match the same line
/// with equal specificity and equal pattern length, the winner is the one
/// declared earlier here (see `detect::FormatDetector::classify`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogFormat {
    Unknown,
    Json,
    Logfmt,
    ApacheCommon,
    Nginx,
    Syslog,
    Rsyslog,
    GoStandard,
    Rails,
    Docker,
    Kubernetes,
    Heroku,
    GoTest,
    JavaException,
    JavaScriptException,
    PythonException,
    GoroutineStackTrace,
}

impl LogFormat {
    /// True for formats that can span more than one input line.
    pub fn is_multiline(self) -> bool {
        matches!(
            self,
            LogFormat::Rsyslog
                | LogFormat::JavaException
                | LogFormat::JavaScriptException
                | LogFormat::PythonException
                | LogFormat::GoroutineStackTrace
        )
    }
}
