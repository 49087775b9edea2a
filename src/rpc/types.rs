//! Response envelope shared by every procedure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing procedure response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Whether the call succeeded.
    pub success: bool,
    /// Result payload (present when `success == true`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error payload (present when `success == false`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorBody>,
}

/// Structured error body inside an [`RpcResponse`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorBody {
    /// Machine-readable error code, for example `NOT_FOUND`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl RpcResponse {
    /// Builds a success response.
    #[must_use]
    pub const fn success(result: Value) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Builds an error response.
    #[must_use]
    pub const fn failure(error: RpcErrorBody) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(error),
        }
    }
}
