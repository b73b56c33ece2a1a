use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ManifestUnreadable,
    ConfigUnreadable,
    GraphFileUnreadable,
    GraphInvalid,
    InvalidArgument,
    CentralityNotAdmitted,
    PluginLoadFailure,
    VersionMismatch,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::ManifestUnreadable => "E1002",
            Self::ConfigUnreadable => "E1003",
            Self::GraphFileUnreadable => "E2001",
            Self::GraphInvalid => "E2002",
            Self::InvalidArgument => "E3001",
            Self::CentralityNotAdmitted => "E3002",
            Self::PluginLoadFailure => "E4001",
            Self::VersionMismatch => "E4002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ManifestUnreadable => "Centrality manifest unreadable",
            Self::ConfigUnreadable => "Config file unreadable",
            Self::GraphFileUnreadable => "Graph file unreadable",
            Self::GraphInvalid => "Graph violates structural invariants",
            Self::InvalidArgument => "Invalid argument to centrality computation",
            Self::CentralityNotAdmitted => "Centrality not admitted by the registry",
            Self::PluginLoadFailure => "Centrality plugin could not be loaded",
            Self::VersionMismatch => "Centrality requires a newer host API",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in the centra config.toml and retry."),
            Self::ManifestUnreadable => {
                Some("Check the manifest path in [registry] or pass --manifest.")
            }
            Self::ConfigUnreadable => {
                Some("Check the path given by --config or CENTRA_CONFIG.")
            }
            Self::GraphFileUnreadable => Some("Check the path and that the file is valid JSON."),
            Self::GraphInvalid => Some(
                "Every edge endpoint must be a listed node; set \"implicit_nodes\": true to add them.",
            ),
            Self::InvalidArgument => None,
            Self::CentralityNotAdmitted => Some("Run `centra list` to see admitted centralities."),
            Self::PluginLoadFailure => {
                Some("Check the identifier spelling in the manifest and the plugin's factory.")
            }
            Self::VersionMismatch => {
                Some("Upgrade centra or pin an older plugin version in the manifest.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
