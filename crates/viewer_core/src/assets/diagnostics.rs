//! Non-fatal parse anomalies
//!
//! Malformed content never fails a load. Each anomaly is instead recorded
//! as a [`ParseDiagnostic`] with its file and line, and logged at `debug`
//! level, so default behaviour stays silent while every dropped line is
//! still observable.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// What went wrong on a line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    /// Line was longer than the line buffer
    #[error("line longer than {kept} characters, {dropped} dropped")]
    TruncatedLine {
        /// Characters kept
        kept: usize,
        /// Characters discarded
        dropped: usize,
    },

    /// A numeric field did not parse
    #[error("`{keyword}`: cannot parse `{field}`")]
    MalformedNumericField {
        /// Line keyword
        keyword: String,
        /// Offending field
        field: String,
    },

    /// Too few fields for the keyword
    #[error("`{keyword}` expects {expected} field(s), found {found}")]
    MissingField {
        /// Line keyword
        keyword: String,
        /// Fields required
        expected: usize,
        /// Fields present
        found: usize,
    },

    /// Face vertices disagree on which index components they carry
    #[error("face mixes index patterns: {patterns}")]
    AmbiguousFaceFormat {
        /// Patterns found, in vertex order
        patterns: String,
    },

    /// Face pattern differs from the faces already in the model
    #[error("face uses `{found}` but earlier faces use `{expected}`")]
    FaceLayoutMismatch {
        /// Layout of the faces already stored
        expected: &'static str,
        /// Layout of this face
        found: &'static str,
    },

    /// Face line with too few vertices
    #[error("face needs at least 3 vertices, found {found}")]
    MalformedFace {
        /// Vertices present
        found: usize,
    },

    /// Face line with more than three vertices while triangulation is off
    #[error("face has {ignored} vertex reference(s) beyond the first three, ignored")]
    ExtraFaceVertices {
        /// Vertex references dropped
        ignored: usize,
    },

    /// Material attribute before any `newmtl`
    #[error("`{keyword}` outside of any material")]
    NoCurrentMaterial {
        /// Line keyword
        keyword: String,
    },

    /// Material name longer than the registry allows
    #[error("material name truncated to `{name}`")]
    TruncatedMaterialName {
        /// Name as stored
        name: String,
    },

    /// `mtllib` target could not be opened
    #[error("material library {} unavailable: {reason}", .path.display())]
    MaterialLibraryUnavailable {
        /// Resolved library path
        path: PathBuf,
        /// Open error
        reason: String,
    },

    /// `mtllib` nesting limit reached
    #[error("material library {} skipped, include depth {limit} reached", .path.display())]
    IncludeDepthExceeded {
        /// Resolved library path
        path: PathBuf,
        /// Configured limit
        limit: usize,
    },

    /// Reading stopped part-way through the file
    #[error("read interrupted: {reason}")]
    ReadInterrupted {
        /// I/O error
        reason: String,
    },
}

/// A [`ParseIssue`] located in its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// File the line came from; `None` for in-memory input
    pub source: Option<PathBuf>,
    /// 1-based line number
    pub line: usize,
    /// The anomaly
    pub issue: ParseIssue,
}

impl ParseDiagnostic {
    pub(crate) fn new(source: Option<&Path>, line: usize, issue: ParseIssue) -> Self {
        Self {
            source: source.map(Path::to_path_buf),
            line,
            issue,
        }
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(path) => write!(f, "{}:{}: {}", path.display(), self.line, self.issue),
            None => write!(f, "<memory>:{}: {}", self.line, self.issue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_location() {
        let diagnostic = ParseDiagnostic::new(
            Some(Path::new("models/box.obj")),
            12,
            ParseIssue::MalformedFace { found: 2 },
        );
        assert_eq!(
            diagnostic.to_string(),
            "models/box.obj:12: face needs at least 3 vertices, found 2"
        );

        let in_memory = ParseDiagnostic::new(None, 3, ParseIssue::ExtraFaceVertices { ignored: 1 });
        assert!(in_memory.to_string().starts_with("<memory>:3: "));
    }
}
