use thiserror::Error;

/// Failure from the wallet or the chain RPC, classified so the page can show
/// a short message instead of raw provider text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("user rejected the request: {0}")]
    UserRejected(String),
    #[error("wallet is not connected")]
    NotConnected,
    #[error("no injected wallet provider found")]
    ProviderUnavailable,
    #[error("wallet is on chain {actual}, transaction targets chain {expected}")]
    ChainMismatch { expected: u64, actual: u64 },
    #[error("chain has not been added to the wallet")]
    UnrecognizedChain,
    #[error("execution reverted: {0}")]
    Reverted(String),
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl ChainError {
    /// Classify an EIP-1193 / JSON-RPC error object.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            4001 => Self::UserRejected(message),
            4100 | 4900 | 4901 => Self::NotConnected,
            4902 => Self::UnrecognizedChain,
            3 => Self::Reverted(message),
            _ if message.to_lowercase().contains("insufficient funds") => {
                Self::InsufficientFunds(message)
            }
            _ if message.to_lowercase().contains("execution reverted") => Self::Reverted(message),
            _ => Self::Rpc { code, message },
        }
    }

    pub fn short_message(&self) -> Option<String> {
        match self {
            Self::UserRejected(_) => Some("User rejected the request.".to_owned()),
            Self::NotConnected => Some("Connector not connected.".to_owned()),
            Self::ProviderUnavailable => Some("Provider not found.".to_owned()),
            Self::ChainMismatch { expected, actual } => Some(format!(
                "The current chain of the wallet (id: {actual}) does not match the target chain for the transaction (id: {expected})."
            )),
            Self::UnrecognizedChain => Some("Unrecognized chain.".to_owned()),
            Self::Reverted(reason) => {
                let reason = reason
                    .trim_start_matches("execution reverted")
                    .trim_start_matches(':')
                    .trim();
                if reason.is_empty() {
                    Some("Execution reverted.".to_owned())
                } else {
                    Some(format!("Execution reverted with reason: {reason}."))
                }
            }
            Self::InsufficientFunds(_) => Some(
                "The total cost (gas * gas fee + value) of executing this transaction exceeds the balance of the account."
                    .to_owned(),
            ),
            Self::Transport(_) => Some("HTTP request failed.".to_owned()),
            Self::Rpc { .. } | Self::Decode(_) => None,
        }
    }

    /// What the page shows: the short message when classified, raw text otherwise.
    pub fn user_message(&self) -> String {
        self.short_message().unwrap_or_else(|| self.to_string())
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<alloy_sol_types::Error> for ChainError {
    fn from(err: alloy_sol_types::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
