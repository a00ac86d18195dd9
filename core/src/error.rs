use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a program image could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to open program {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to read program")]
    Read {
        #[from]
        source: io::Error,
    },
}
