//! Transport failure type and its classification for diagnostics.

use thiserror::Error;

/// Error returned by a single fetch. Every variant means "no response to look at".
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Body grew past the configured cap; the transfer was aborted.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },
}

/// Coarse transport failure category, carried in drop diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransportKind {
    Timeout,
    Connection,
    Tls,
    Other,
}

impl FetchError {
    pub fn transport_kind(&self) -> TransportKind {
        match self {
            FetchError::Curl(e) => classify_curl_error(e),
            FetchError::BodyTooLarge { .. } => TransportKind::Other,
        }
    }
}

/// Classify a curl error into a transport category.
pub fn classify_curl_error(e: &curl::Error) -> TransportKind {
    if e.is_operation_timedout() {
        return TransportKind::Timeout;
    }
    if e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_ssl_certproblem()
        || e.is_ssl_cipher()
        || e.is_ssl_cacert()
    {
        return TransportKind::Tls;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportKind::Connection;
    }
    TransportKind::Other
}
