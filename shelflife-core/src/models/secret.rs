use serde::{Deserialize, Serialize};

/// The plaintext credential envelope stored (encrypted) per namespace.
///
/// Serialized to JSON before encryption; the `endpoint_url` is also kept
/// as a cleartext column for indexing, and the store writes both in the
/// same upsert so they always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamCredentials {
    /// Base URL of the upstream media server.
    pub endpoint_url: String,
    /// API token used by the external fetch collaborator.
    pub token: String,
}
