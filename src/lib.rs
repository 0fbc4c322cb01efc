//! A streaming log colorizer: a stateful format detector paired with a
//! stateless-per-line, format-aware colorizer (spec §1–§6).

pub mod colorize;
pub mod detect;
pub mod error;
pub mod format;
pub mod search;
pub mod severity;
pub mod style;

pub use colorize::Colorizer;
pub use detect::FormatDetector;
pub use error::SearchError;
pub use format::LogFormat;
pub use search::SearchConfig;
pub use severity::Severity;
pub use style::{PaintCtx, Theme};
