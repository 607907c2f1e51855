//! Error classification used to route retry and reporting decisions.

/// Broad error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Timeout,
    Server,
    Api,
    Configuration,
    Serialization,
    Unknown,
}

impl ErrorCategory {
    /// Short hint shown to operators next to a failure.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Authentication => "check the inference token",
            Self::RateLimit | Self::Network | Self::Server => "retry later",
            Self::Timeout => "increase the request timeout",
            Self::Configuration => "check the configuration file and environment",
            Self::Api | Self::Serialization | Self::Unknown => "see logs for details",
        }
    }
}
