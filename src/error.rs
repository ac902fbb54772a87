use thiserror::Error;

/// Errors raised at the document boundary.
///
/// Flattening, sanitizing and rendering are total, so the only failures come
/// from turning raw text into a JSON value.
#[derive(Debug, Error)]
pub enum Error {
    /// The input text is not syntactically valid JSON
    #[error("Invalid JSON input: {source}")]
    Parse {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The input contained nothing but whitespace
    #[error("no JSON input supplied")]
    EmptyInput,
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Parse {
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
