//! Wallet-connection configuration.
//!
//! Built once at startup and handed to `WrapperApp` through `Providers`;
//! nothing reads it from global state.

use std::time::Duration;
use tracing::warn;
use wg_api_types::{ChainDescriptor, LENS_CHAIN, TokenDescriptor, WGHO};

pub const WALLETCONNECT_PROJECT_ID_ENV: &str = "WALLETCONNECT_PROJECT_ID";

/// Wait after a confirmation before re-reading balances, for RPC indexing lag.
pub const DEFAULT_REFETCH_DELAY: Duration = Duration::from_millis(1_500);

pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    Injected,
    WalletConnect,
    CoinbaseWallet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    pub app_name: &'static str,
    pub app_description: &'static str,
    pub chain: ChainDescriptor,
    pub token: TokenDescriptor,
    pub relay_project_id: Option<String>,
    pub refetch_delay: Duration,
    pub receipt_poll_interval: Duration,
}

impl WalletConfig {
    pub fn new(relay_project_id: Option<String>) -> Self {
        let relay_project_id = relay_project_id
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty());

        if relay_project_id.is_none() {
            warn!(
                "{} is not set; WalletConnect is disabled and only browser wallets are offered",
                WALLETCONNECT_PROJECT_ID_ENV
            );
        }

        Self {
            app_name: "WGHO Wrapper",
            app_description: "A simple app to wrap and unwrap GHO on Lens Chain.",
            chain: LENS_CHAIN,
            token: WGHO,
            relay_project_id,
            refetch_delay: DEFAULT_REFETCH_DELAY,
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(WALLETCONNECT_PROJECT_ID_ENV).ok())
    }

    pub fn with_refetch_delay(mut self, delay: Duration) -> Self {
        self.refetch_delay = delay;
        self
    }

    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval = interval;
        self
    }

    /// Connectors offered in the connect modal. WalletConnect needs a relay project ID.
    pub fn connectors(&self) -> Vec<ConnectorKind> {
        let mut connectors = vec![ConnectorKind::Injected];
        if self.relay_project_id.is_some() {
            connectors.push(ConnectorKind::WalletConnect);
        }
        connectors.push(ConnectorKind::CoinbaseWallet);
        connectors
    }
}
