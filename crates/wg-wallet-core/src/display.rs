//! Pure render policy: which panel is shown and the strings inside it.

use alloy_primitives::{TxHash, U256};
use wg_api_types::{ChainDescriptor, ConnectionState};

use crate::amount;
use crate::balance::BalanceSnapshot;
use crate::config::WalletConfig;
use crate::lifecycle::{TxKind, TxLifecycle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Before hydration nothing conditional is rendered.
    Pending,
    ConnectWallet,
    SwitchNetwork { required_chain_id: u64 },
    Interface,
}

impl DisplayMode {
    pub fn resolve(hydrated: bool, connection: &ConnectionState, target_chain_id: u64) -> Self {
        if !hydrated {
            Self::Pending
        } else if !connection.connected {
            Self::ConnectWallet
        } else if connection.chain_id != Some(target_chain_id) {
            Self::SwitchNetwork {
                required_chain_id: target_chain_id,
            }
        } else {
            Self::Interface
        }
    }
}

pub fn connect_prompt() -> &'static str {
    "Please connect your wallet to continue."
}

pub fn switch_network_prompt(chain: &ChainDescriptor) -> String {
    format!("Please switch to the {} (ID: {}) in your wallet.", chain.name, chain.id)
}

pub fn connect_button_label(connection: &ConnectionState) -> String {
    match connection.short_account() {
        Some(short) if connection.connected => short,
        _ => "Connect Wallet".to_owned(),
    }
}

/// A write can be handed to the wallet: connector ready, account known, on the target chain.
pub fn wallet_available(wallet_ready: bool, connection: &ConnectionState, target_chain_id: u64) -> bool {
    wallet_ready && connection.account.is_some() && connection.is_on_chain(target_chain_id)
}

pub fn submit_enabled(lifecycle: &TxLifecycle, amount: &str, decimals: u8, wallet_available: bool) -> bool {
    !lifecycle.is_in_flight() && wallet_available && amount::is_submittable(amount, decimals)
}

/// `value` scaled down by `decimals`, rounded half-up to `places` digits.
pub fn format_fixed(value: U256, decimals: u8, places: usize) -> String {
    let ten = U256::from(10u64);
    let unit = ten.pow(U256::from(decimals));
    let scale = ten.pow(U256::from(places));
    let (mut whole, rem) = (value / unit, value % unit);

    // Scale the remainder alone so `value` itself is never multiplied.
    let mut frac = if places >= usize::from(decimals) {
        rem * ten.pow(U256::from(places - usize::from(decimals)))
    } else {
        let divisor = ten.pow(U256::from(usize::from(decimals) - places));
        (rem + divisor / U256::from(2u64)) / divisor
    };
    if frac == scale {
        whole = whole.saturating_add(U256::from(1u64));
        frac = U256::ZERO;
    }

    if places == 0 {
        return whole.to_string();
    }
    format!("{whole}.{:0>places$}", frac.to_string())
}

pub fn format_balance(snapshot: &BalanceSnapshot, default_symbol: &str) -> String {
    let symbol = if snapshot.symbol.is_empty() {
        default_symbol
    } else {
        snapshot.symbol.as_str()
    };
    match snapshot.value {
        Some(value) => format!("{} {symbol}", format_fixed(value, snapshot.decimals, 4)),
        None => format!("0.0000 {default_symbol}"),
    }
}

fn operand_symbol(kind: TxKind, config: &WalletConfig) -> &'static str {
    match kind {
        TxKind::Wrap => config.chain.native_currency.symbol,
        TxKind::Unwrap => config.token.symbol,
    }
}

pub fn form_title(kind: TxKind, config: &WalletConfig) -> String {
    match kind {
        TxKind::Wrap => format!("Wrap {}", operand_symbol(kind, config)),
        TxKind::Unwrap => format!("Unwrap {}", operand_symbol(kind, config)),
    }
}

pub fn amount_placeholder(kind: TxKind, config: &WalletConfig) -> String {
    format!("Amount of {} to {}", operand_symbol(kind, config), kind.as_str())
}

pub fn submit_label(kind: TxKind, lifecycle: &TxLifecycle, config: &WalletConfig) -> String {
    if lifecycle.is_awaiting_signature() {
        "Check Wallet...".to_owned()
    } else if lifecycle.is_confirming() {
        match kind {
            TxKind::Wrap => "Wrapping...".to_owned(),
            TxKind::Unwrap => "Unwrapping...".to_owned(),
        }
    } else {
        form_title(kind, config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    TxHash {
        hash: TxHash,
        explorer_name: &'static str,
        explorer_url: String,
    },
    Waiting,
    Success(String),
    Error(String),
}

impl StatusLine {
    pub fn text(&self) -> String {
        match self {
            Self::TxHash { hash, .. } => format!("Tx Hash: {hash}"),
            Self::Waiting => "Waiting for confirmation...".to_owned(),
            Self::Success(text) => text.clone(),
            Self::Error(message) => format!("Error: {message}"),
        }
    }
}

pub fn status_lines(kind: TxKind, lifecycle: &TxLifecycle, chain: &ChainDescriptor) -> Vec<StatusLine> {
    let mut lines = Vec::new();
    if let Some(hash) = lifecycle.hash() {
        lines.push(StatusLine::TxHash {
            hash,
            explorer_name: chain.explorer_name,
            explorer_url: chain.explorer_tx_url(&hash),
        });
    }
    if lifecycle.is_confirming() {
        lines.push(StatusLine::Waiting);
    }
    if lifecycle.is_confirmed() {
        let text = match kind {
            TxKind::Wrap => "Wrap successful!",
            TxKind::Unwrap => "Unwrap successful!",
        };
        lines.push(StatusLine::Success(text.to_owned()));
    }
    if let Some(message) = lifecycle.error_message() {
        lines.push(StatusLine::Error(message.to_owned()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use wg_api_types::{LENS_CHAIN, LENS_CHAIN_ID};

    fn account() -> Address {
        Address::repeat_byte(0x34)
    }

    #[test]
    fn display_mode_is_function_of_inputs() {
        let on_lens = ConnectionState::connected(account(), LENS_CHAIN_ID);
        let on_mainnet = ConnectionState::connected(account(), 1);
        let off = ConnectionState::disconnected();

        assert_eq!(DisplayMode::resolve(false, &on_lens, LENS_CHAIN_ID), DisplayMode::Pending);
        assert_eq!(DisplayMode::resolve(false, &off, LENS_CHAIN_ID), DisplayMode::Pending);
        assert_eq!(DisplayMode::resolve(true, &off, LENS_CHAIN_ID), DisplayMode::ConnectWallet);
        assert_eq!(
            DisplayMode::resolve(true, &on_mainnet, LENS_CHAIN_ID),
            DisplayMode::SwitchNetwork {
                required_chain_id: LENS_CHAIN_ID
            }
        );
        assert_eq!(DisplayMode::resolve(true, &on_lens, LENS_CHAIN_ID), DisplayMode::Interface);
    }

    #[test]
    fn disconnected_ignores_stale_chain() {
        let stale = ConnectionState {
            account: None,
            connected: false,
            chain_id: Some(LENS_CHAIN_ID),
        };
        assert_eq!(DisplayMode::resolve(true, &stale, LENS_CHAIN_ID), DisplayMode::ConnectWallet);
    }

    #[test]
    fn switch_prompt_names_target_chain() {
        assert_eq!(
            switch_network_prompt(&LENS_CHAIN),
            "Please switch to the Lens Chain (ID: 232) in your wallet."
        );
    }

    #[test]
    fn fixed_formatting_rounds_half_up() {
        let wei = U256::from(1_000_000_000_000_000_000u128);
        assert_eq!(format_fixed(wei, 18, 4), "1.0000");
        assert_eq!(format_fixed(U256::from(1_234_550_000_000_000_000u128), 18, 4), "1.2346");
        assert_eq!(format_fixed(U256::from(1_234_449_999_999_999_999u128), 18, 4), "1.2344");
        assert_eq!(format_fixed(U256::ZERO, 18, 4), "0.0000");
        assert_eq!(format_fixed(U256::from(5u64), 0, 4), "5.0000");
        assert_eq!(format_fixed(U256::from(123_456u64), 6, 0), "0");
        assert_eq!(format_fixed(U256::from(999_960_000_000_000_000u128), 18, 4), "1.0000");
    }

    #[test]
    fn fixed_formatting_survives_the_largest_balance() {
        assert_eq!(
            format_fixed(U256::MAX, 18, 4),
            "115792089237316195423570985008687907853269984665640564039457.5840"
        );
    }

    #[test]
    fn balance_without_value_shows_zero_with_default_symbol() {
        let snapshot = BalanceSnapshot {
            value: None,
            symbol: "WGHO".to_owned(),
            decimals: 18,
            is_loading: false,
            is_fetching: false,
            error: None,
        };
        assert_eq!(format_balance(&snapshot, "WGHO"), "0.0000 WGHO");

        let loaded = BalanceSnapshot {
            value: Some(U256::from(2_500_000_000_000_000_000u128)),
            symbol: String::new(),
            ..snapshot
        };
        assert_eq!(format_balance(&loaded, "GHO"), "2.5000 GHO");
    }

    #[test]
    fn labels_follow_lifecycle() {
        let config = WalletConfig::new(None);
        let hash = TxHash::repeat_byte(0x09);

        assert_eq!(submit_label(TxKind::Wrap, &TxLifecycle::Idle, &config), "Wrap GHO");
        assert_eq!(submit_label(TxKind::Unwrap, &TxLifecycle::Idle, &config), "Unwrap WGHO");
        assert_eq!(
            submit_label(TxKind::Wrap, &TxLifecycle::AwaitingSignature, &config),
            "Check Wallet..."
        );
        assert_eq!(
            submit_label(TxKind::Unwrap, &TxLifecycle::Confirming { hash }, &config),
            "Unwrapping..."
        );
        assert_eq!(amount_placeholder(TxKind::Wrap, &config), "Amount of GHO to wrap");
    }

    #[test]
    fn status_lines_for_confirmed_and_failed() {
        let hash = TxHash::repeat_byte(0x0c);
        let confirmed = status_lines(TxKind::Wrap, &TxLifecycle::Confirmed { hash }, &LENS_CHAIN);
        assert_eq!(confirmed.len(), 2);
        assert!(matches!(
            &confirmed[0],
            StatusLine::TxHash { explorer_name: "Lens Explorer", explorer_url, .. }
                if explorer_url.contains("/tx/0x0c0c")
        ));
        assert_eq!(confirmed[1].text(), "Wrap successful!");

        let failed = TxLifecycle::Failed {
            hash: None,
            message: "User rejected the request.".to_owned(),
        };
        assert_eq!(
            status_lines(TxKind::Unwrap, &failed, &LENS_CHAIN),
            vec![StatusLine::Error("User rejected the request.".to_owned())]
        );
        assert_eq!(
            status_lines(TxKind::Unwrap, &failed, &LENS_CHAIN)[0].text(),
            "Error: User rejected the request."
        );
    }

    #[test]
    fn submit_gate_needs_wallet_amount_and_idle_lifecycle() {
        let on_lens = ConnectionState::connected(account(), LENS_CHAIN_ID);
        assert!(wallet_available(true, &on_lens, LENS_CHAIN_ID));
        assert!(!wallet_available(false, &on_lens, LENS_CHAIN_ID));
        assert!(!wallet_available(true, &ConnectionState::connected(account(), 1), LENS_CHAIN_ID));

        assert!(submit_enabled(&TxLifecycle::Idle, "1", 18, true));
        assert!(!submit_enabled(&TxLifecycle::Idle, "1", 18, false));
        assert!(!submit_enabled(&TxLifecycle::Idle, "0", 18, true));
        assert!(!submit_enabled(&TxLifecycle::AwaitingSignature, "1", 18, true));
        let hash = TxHash::repeat_byte(0x0d);
        assert!(!submit_enabled(&TxLifecycle::Submitted { hash }, "1", 18, true));
        assert!(!submit_enabled(&TxLifecycle::Confirming { hash }, "1", 18, true));
        assert!(submit_enabled(&TxLifecycle::Confirmed { hash }, "1", 18, true));
    }

    #[test]
    fn connect_button_shows_short_account() {
        assert_eq!(connect_button_label(&ConnectionState::disconnected()), "Connect Wallet");
        assert_eq!(
            connect_button_label(&ConnectionState::connected(account(), 1)),
            "0x3434...3434"
        );
    }
}
