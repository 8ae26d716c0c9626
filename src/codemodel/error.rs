use thiserror::Error;

/// Error type returned by resolution capabilities and filesystem ports.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures while flattening a codemodel. Every variant aborts the read.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The root document has no usable configuration or target list.
    #[error("malformed codemodel: {reason}")]
    MalformedCodemodel {
        /// What was wrong with the root document.
        reason: String,
    },

    /// A target entry lacks its `name` or `jsonFile`.
    #[error("target entry {index} is missing `name` or `jsonFile`")]
    MalformedTargetEntry {
        /// Position of the entry in the configuration's target list.
        index: usize,
    },

    /// The resolver could not produce the detail document.
    #[error("failed to resolve target document {path}: {source}")]
    SecondaryResolutionFailed {
        /// The `jsonFile` value handed to the resolver.
        path: String,
        /// Underlying resolver error.
        #[source]
        source: BoxError,
    },

    /// The detail document is missing `type` or has malformed path lists.
    #[error("malformed target document {json_file}: {reason}")]
    MalformedTargetDetail {
        /// The `jsonFile` the document was resolved from.
        json_file: String,
        /// What was wrong with the document.
        reason: String,
    },
}

impl ReadError {
    pub(crate) fn codemodel(reason: impl Into<String>) -> Self {
        Self::MalformedCodemodel { reason: reason.into() }
    }

    pub(crate) fn detail(json_file: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTargetDetail { json_file: json_file.to_string(), reason: reason.into() }
    }
}
