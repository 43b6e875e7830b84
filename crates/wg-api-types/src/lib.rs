use alloy_primitives::{Address, TxHash, address};
use serde::{Deserialize, Serialize};

pub const LENS_CHAIN_ID: u64 = 232;

pub const WGHO_ADDRESS: Address = address!("0x6bDc36E20D267Ff0dd6097799f82e78907105e2F");

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Static description of the network the app is pinned to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ChainDescriptor {
    pub id: u64,
    pub name: &'static str,
    pub native_currency: NativeCurrency,
    pub rpc_url: &'static str,
    pub explorer_name: &'static str,
    pub explorer_url: &'static str,
}

impl ChainDescriptor {
    pub fn explorer_tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{hash}", self.explorer_url.trim_end_matches('/'))
    }
}

pub const LENS_CHAIN: ChainDescriptor = ChainDescriptor {
    id: LENS_CHAIN_ID,
    name: "Lens Chain",
    native_currency: NativeCurrency {
        name: "GHO",
        symbol: "GHO",
        decimals: 18,
    },
    rpc_url: "https://rpc.lens.xyz",
    explorer_name: "Lens Explorer",
    explorer_url: "https://explorer.lens.xyz/",
};

/// Wrapped-token contract. The ABI lives in `wg_chain_client::abi`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub address: Address,
    pub symbol: &'static str,
    pub decimals: u8,
}

pub const WGHO: TokenDescriptor = TokenDescriptor {
    address: WGHO_ADDRESS,
    symbol: "WGHO",
    decimals: 18,
};

/// What the wallet connector currently reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionState {
    pub account: Option<Address>,
    pub connected: bool,
    pub chain_id: Option<u64>,
}

impl ConnectionState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(account: Address, chain_id: u64) -> Self {
        Self {
            account: Some(account),
            connected: true,
            chain_id: Some(chain_id),
        }
    }

    pub fn is_on_chain(&self, chain_id: u64) -> bool {
        self.connected && self.chain_id == Some(chain_id)
    }

    /// `0x1234...abcd`, or `None` without an account.
    pub fn short_account(&self) -> Option<String> {
        let full = self.account?.to_string();
        Some(format!("{}...{}", &full[..6], &full[full.len() - 4..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explorer_url_has_single_slash() {
        let hash = TxHash::repeat_byte(0xab);
        let url = LENS_CHAIN.explorer_tx_url(&hash);
        assert!(url.starts_with("https://explorer.lens.xyz/tx/0xabab"));
        assert!(!url.contains("xyz//tx"));
    }

    #[test]
    fn connection_requires_flag_and_chain() {
        let account = Address::repeat_byte(0x11);
        assert!(ConnectionState::connected(account, LENS_CHAIN_ID).is_on_chain(LENS_CHAIN_ID));
        assert!(!ConnectionState::connected(account, 1).is_on_chain(LENS_CHAIN_ID));

        let stale = ConnectionState {
            account: Some(account),
            connected: false,
            chain_id: Some(LENS_CHAIN_ID),
        };
        assert!(!stale.is_on_chain(LENS_CHAIN_ID));
    }

    #[test]
    fn short_account_keeps_prefix_and_suffix() {
        let state = ConnectionState::connected(Address::repeat_byte(0x12), 1);
        assert_eq!(state.short_account().as_deref(), Some("0x1212...1212"));
        assert_eq!(ConnectionState::disconnected().short_account(), None);
    }

    #[test]
    fn wgho_descriptor_points_at_lens_contract() {
        assert_eq!(
            WGHO.address.to_string().to_lowercase(),
            "0x6bdc36e20d267ff0dd6097799f82e78907105e2f"
        );
        assert_eq!(LENS_CHAIN.native_currency.decimals, WGHO.decimals);
    }
}
