use std::path::PathBuf;

use frameseq_pattern::TokenizeError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot list directory {}: {source}", .path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("empty pattern")]
    EmptyPattern,

    #[error("invalid pattern: {0}")]
    Pattern(#[from] TokenizeError),
}
