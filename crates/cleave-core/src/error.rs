use std::fmt;
use std::path::PathBuf;

/// Broad failure category used by callers that only care about the class of
/// problem, not the precise variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied argument violates a precondition (unknown node,
    /// `k` or `n` too large).
    InvalidArgument,
    /// The input is structurally unable to produce a finite answer (empty
    /// prediction list, zero volume, too few components).
    DegenerateInput,
    /// A configured wall-clock deadline elapsed between edge removals.
    Timeout,
    /// The edge list could not be read or parsed.
    Input,
}

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NodeNotFound,
    NotEnoughNeighbors,
    NotEnoughCandidates,
    InvalidBeta,
    EmptyNeighborhoods,
    EmptyPrediction,
    ZeroVolume,
    TooFewComponents,
    DeadlineExceeded,
    MalformedEdgeList,
    EdgeListUnreadable,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NodeNotFound => "E1001",
            Self::NotEnoughNeighbors => "E1002",
            Self::NotEnoughCandidates => "E1003",
            Self::InvalidBeta => "E1004",
            Self::EmptyNeighborhoods => "E2001",
            Self::EmptyPrediction => "E2002",
            Self::ZeroVolume => "E2003",
            Self::TooFewComponents => "E2004",
            Self::DeadlineExceeded => "E3001",
            Self::MalformedEdgeList => "E5001",
            Self::EdgeListUnreadable => "E5002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NodeNotFound => "Node not found",
            Self::NotEnoughNeighbors => "Node has too few neighbors",
            Self::NotEnoughCandidates => "Too few link candidates",
            Self::InvalidBeta => "Decay factor out of range",
            Self::EmptyNeighborhoods => "Both neighborhoods are empty",
            Self::EmptyPrediction => "Empty prediction list",
            Self::ZeroVolume => "Zero-volume side in normalized cut",
            Self::TooFewComponents => "Partition produced too few components",
            Self::DeadlineExceeded => "Partition deadline exceeded",
            Self::MalformedEdgeList => "Malformed edge list",
            Self::EdgeListUnreadable => "Edge list unreadable",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NodeNotFound => Some("Check the node name against `cleave stats` output."),
            Self::NotEnoughNeighbors => Some("Lower --held-out or pick a better-connected node."),
            Self::NotEnoughCandidates => Some("Lower -k to at most the number of non-neighbors."),
            Self::InvalidBeta => Some("Pass --beta between 0 and 1."),
            Self::EmptyNeighborhoods => Some("Skip isolated nodes before scoring them."),
            Self::EmptyPrediction => None,
            Self::ZeroVolume => Some("Filter isolated nodes (e.g. --min-degree 1) and retry."),
            Self::TooFewComponents => Some("Use larger depths (sweep --depths, partition --max-depth)."),
            Self::DeadlineExceeded => Some("Raise execution.deadline_secs or enable parallel mode."),
            Self::MalformedEdgeList => Some("Each line must hold two whitespace-separated nodes."),
            Self::EdgeListUnreadable => Some("Check the path and read permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Every failure produced by the graph store and the analyses built on it.
///
/// All variants are scoped to a single call; nothing here is retried or
/// downgraded to a default value.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node not found in graph: {node}")]
    NodeNotFound { node: String },

    #[error("node {node} has {available} neighbors, cannot remove {requested}")]
    NotEnoughNeighbors {
        node: String,
        requested: usize,
        available: usize,
    },

    #[error("requested top {requested} links but only {available} candidates exist")]
    NotEnoughCandidates { requested: usize, available: usize },

    #[error("beta must lie in [0, 1], got {beta}")]
    InvalidBeta { beta: f64 },

    #[error("jaccard undefined: {root} and {candidate} both have no neighbors")]
    EmptyNeighborhoods { root: String, candidate: String },

    #[error("cannot evaluate an empty prediction list")]
    EmptyPrediction,

    #[error("normalized cut undefined: one side has zero volume")]
    ZeroVolume,

    #[error("expected at least {required} components, found {found}")]
    TooFewComponents { required: usize, found: usize },

    #[error("partition deadline exceeded after removing {removed} edges")]
    DeadlineExceeded { removed: usize },

    #[error("malformed edge list at line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("failed to read edge list {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    /// Convenience constructor for the most common precondition failure.
    pub fn node_not_found(node: impl Into<String>) -> Self {
        Self::NodeNotFound { node: node.into() }
    }

    /// The broad category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NodeNotFound { .. }
            | Self::NotEnoughNeighbors { .. }
            | Self::NotEnoughCandidates { .. }
            | Self::InvalidBeta { .. } => ErrorKind::InvalidArgument,
            Self::EmptyNeighborhoods { .. }
            | Self::EmptyPrediction
            | Self::ZeroVolume
            | Self::TooFewComponents { .. } => ErrorKind::DegenerateInput,
            Self::DeadlineExceeded { .. } => ErrorKind::Timeout,
            Self::MalformedLine { .. } | Self::Io { .. } => ErrorKind::Input,
        }
    }

    /// The stable machine code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NodeNotFound { .. } => ErrorCode::NodeNotFound,
            Self::NotEnoughNeighbors { .. } => ErrorCode::NotEnoughNeighbors,
            Self::NotEnoughCandidates { .. } => ErrorCode::NotEnoughCandidates,
            Self::InvalidBeta { .. } => ErrorCode::InvalidBeta,
            Self::EmptyNeighborhoods { .. } => ErrorCode::EmptyNeighborhoods,
            Self::EmptyPrediction => ErrorCode::EmptyPrediction,
            Self::ZeroVolume => ErrorCode::ZeroVolume,
            Self::TooFewComponents { .. } => ErrorCode::TooFewComponents,
            Self::DeadlineExceeded { .. } => ErrorCode::DeadlineExceeded,
            Self::MalformedLine { .. } => ErrorCode::MalformedEdgeList,
            Self::Io { .. } => ErrorCode::EdgeListUnreadable,
        }
    }
}
