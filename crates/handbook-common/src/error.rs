/// Error types shared across the handbook crates.
///
/// These cover infrastructure failures (reading a file, talking to an HTTP
/// host) that any catalog consumer can hit. Application-specific errors are
/// defined in each crate and wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },
}
