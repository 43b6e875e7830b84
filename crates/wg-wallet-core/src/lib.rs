//! Wallet-side logic for the WGHO wrapper page.
//!
//! Nothing here touches the DOM or the network directly: the wallet, the
//! chain reader and the timer come in through [`Providers`], which keeps the
//! whole flow drivable from plain async tests.

pub mod amount;
pub mod app;
pub mod balance;
pub mod config;
pub mod display;
pub mod lifecycle;

pub use amount::{AmountError, parse_amount};
pub use app::{AppState, Providers, SkipReason, SubmitOutcome, TxForm, WrapperApp};
pub use balance::{BalanceModel, BalanceSnapshot};
pub use config::{ConnectorKind, WalletConfig};
pub use display::{DisplayMode, StatusLine};
pub use lifecycle::{TxKind, TxLifecycle};
