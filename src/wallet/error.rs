//! Wallet Errors
//!
//! Failures reported by the signing agent, the node behind it, or the
//! transport in between.

/// EIP-1193 "User Rejected Request"
pub const USER_REJECTED_CODE: i64 = 4001;

/// JSON-RPC "Method not found"
pub const METHOD_NOT_FOUND_CODE: i64 = -32601;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("Request rejected by user: {0}")]
    UserRejected(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Signing agent reported no accounts")]
    NoAccounts,

    #[error("Function not found in contract interface: {0}")]
    UnknownFunction(String),

    #[error("Invalid contract interface: {0}")]
    InvalidInterface(String),
}

impl WalletError {
    /// Map a JSON-RPC error object
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        if code == USER_REJECTED_CODE {
            Self::UserRejected(message)
        } else {
            Self::Rpc { code, message }
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::UserRejected(_))
    }

    pub fn is_method_not_found(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == METHOD_NOT_FOUND_CODE)
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_rejection_code() {
        let err = WalletError::from_rpc(4001, "MetaMask Tx Signature: User denied");
        assert!(err.is_user_rejection());
        assert!(err.to_string().contains("User denied"));
    }

    #[test]
    fn test_other_codes_stay_rpc_errors() {
        let err = WalletError::from_rpc(-32000, "insufficient funds for gas * price + value");
        assert!(!err.is_user_rejection());
        assert_eq!(
            err,
            WalletError::Rpc {
                code: -32000,
                message: "insufficient funds for gas * price + value".to_string()
            }
        );
    }

    #[test]
    fn test_method_not_found() {
        assert!(WalletError::from_rpc(-32601, "method not found").is_method_not_found());
        assert!(!WalletError::NoAccounts.is_method_not_found());
    }
}
