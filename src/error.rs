use thiserror::Error;

/** errors reported outside of the simulation core (files, arguments, strict builder) */
#[derive(Debug, Error)]
pub enum SimError {
    /// a file cannot be read or written
    #[error("unable to access {path}: {source}")]
    Io {
        /// file name
        path: String,
        /// underlying error
        #[source]
        source: std::io::Error,
    },

    /// the results cannot be converted to JSON
    #[error("unable to serialize the results: {0}")]
    Json(#[from] serde_json::Error),

    /// malformed input file
    #[error("unable to parse {0}")]
    Parse(String),

    /// command line argument rejected
    #[error("invalid argument {name}: {reason}")]
    InvalidArgument {
        /// argument name
        name: String,
        /// why it was rejected
        reason: String,
    },

    /// node or edge list rejected by the strict builder
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
}

impl SimError {
    /// builds an InvalidArgument error
    pub fn argument(name:&str, reason:impl Into<String>) -> Self {
        SimError::InvalidArgument { name: name.to_string(), reason: reason.into() }
    }
}
