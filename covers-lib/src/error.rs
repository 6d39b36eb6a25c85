use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoverError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
