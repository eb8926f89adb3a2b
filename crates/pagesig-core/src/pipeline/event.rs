//! Events sent from dispatcher and workers to the reporter.

use std::fmt;

use crate::fetch::TransportKind;
use crate::fingerprint::{ContentKind, ExtractError};

/// Why a URL was not reported. Every per-URL failure ends up here; none of
/// them stop the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    InvalidUrl,
    Transport(TransportKind),
    Status(u32),
    UnsupportedContent,
    Unparseable,
    /// Another URL already claimed the same fingerprint.
    Duplicate,
}

impl From<&ExtractError> for DropReason {
    fn from(e: &ExtractError) -> Self {
        match e {
            ExtractError::Status(code) => DropReason::Status(*code),
            ExtractError::UnsupportedContent(_) => DropReason::UnsupportedContent,
            ExtractError::Unparseable => DropReason::Unparseable,
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::InvalidUrl => write!(f, "invalid URL"),
            DropReason::Transport(kind) => write!(f, "transport error ({:?})", kind),
            DropReason::Status(code) => write!(f, "HTTP {}", code),
            DropReason::UnsupportedContent => write!(f, "unsupported content type"),
            DropReason::Unparseable => write!(f, "unparseable body"),
            DropReason::Duplicate => write!(f, "duplicate fingerprint"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// The URL won the registry claim for its fingerprint.
    Claimed { url: String, kind: ContentKind },
    Dropped { url: String, reason: DropReason },
}
