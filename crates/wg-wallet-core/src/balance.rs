//! Balance view-model.
//!
//! Each model is scoped to `(account, chain)`. `begin` hands out a request
//! tagged with a generation; `complete` only applies results for the latest
//! generation, so an answer for a previous account never lands on the new one.

use alloy_primitives::{Address, U256};
use wg_api_types::{ChainDescriptor, ConnectionState, TokenDescriptor};
use wg_chain_client::{ChainError, ChainReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSlot {
    Native,
    Wrapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceSource {
    Native { symbol: &'static str, decimals: u8 },
    Token(TokenDescriptor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceScope {
    pub account: Address,
    pub chain_id: u64,
}

impl BalanceScope {
    /// Disabled (`None`) without an account or off the target chain.
    pub fn from_connection(connection: &ConnectionState, target_chain_id: u64) -> Option<Self> {
        if !connection.is_on_chain(target_chain_id) {
            return None;
        }
        Some(Self {
            account: connection.account?,
            chain_id: target_chain_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub value: Option<U256>,
    pub symbol: String,
    pub decimals: u8,
    /// No value yet for the current scope.
    pub is_loading: bool,
    /// A read is outstanding, possibly with a cached value shown.
    pub is_fetching: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRequest {
    pub slot: BalanceSlot,
    pub source: BalanceSource,
    pub scope: BalanceScope,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBalance {
    pub value: U256,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone)]
pub struct BalanceModel {
    slot: BalanceSlot,
    source: BalanceSource,
    scope: Option<BalanceScope>,
    generation: u64,
    snapshot: BalanceSnapshot,
}

impl BalanceModel {
    pub fn native(chain: &ChainDescriptor) -> Self {
        let currency = chain.native_currency;
        Self::with_source(
            BalanceSlot::Native,
            BalanceSource::Native {
                symbol: currency.symbol,
                decimals: currency.decimals,
            },
        )
    }

    pub fn wrapped(token: &TokenDescriptor) -> Self {
        Self::with_source(BalanceSlot::Wrapped, BalanceSource::Token(*token))
    }

    fn with_source(slot: BalanceSlot, source: BalanceSource) -> Self {
        let (symbol, decimals) = match source {
            BalanceSource::Native { symbol, decimals } => (symbol, decimals),
            BalanceSource::Token(token) => (token.symbol, token.decimals),
        };
        Self {
            slot,
            source,
            scope: None,
            generation: 0,
            snapshot: BalanceSnapshot {
                value: None,
                symbol: symbol.to_owned(),
                decimals,
                is_loading: false,
                is_fetching: false,
                error: None,
            },
        }
    }

    pub fn snapshot(&self) -> &BalanceSnapshot {
        &self.snapshot
    }

    /// Start a read for `scope`, or disable the model when `scope` is `None`.
    pub fn begin(&mut self, scope: Option<BalanceScope>) -> Option<BalanceRequest> {
        self.generation += 1;

        if self.scope != scope {
            self.snapshot.value = None;
            self.snapshot.error = None;
            self.scope = scope;
        }

        let Some(scope) = scope else {
            self.snapshot.is_loading = false;
            self.snapshot.is_fetching = false;
            return None;
        };

        self.snapshot.is_loading = self.snapshot.value.is_none();
        self.snapshot.is_fetching = true;
        Some(BalanceRequest {
            slot: self.slot,
            source: self.source,
            scope,
            generation: self.generation,
        })
    }

    /// Apply a read result. Returns `false` when the request is stale.
    pub fn complete(
        &mut self,
        request: &BalanceRequest,
        result: Result<FetchedBalance, ChainError>,
    ) -> bool {
        if request.generation != self.generation || Some(request.scope) != self.scope {
            return false;
        }

        self.snapshot.is_loading = false;
        self.snapshot.is_fetching = false;
        match result {
            Ok(fetched) => {
                self.snapshot.value = Some(fetched.value);
                self.snapshot.symbol = fetched.symbol;
                self.snapshot.decimals = fetched.decimals;
                self.snapshot.error = None;
            }
            Err(err) => {
                self.snapshot.error = Some(err.user_message());
            }
        }
        true
    }
}

pub async fn fetch(
    reader: &dyn ChainReader,
    request: &BalanceRequest,
) -> Result<FetchedBalance, ChainError> {
    let account = request.scope.account;
    match request.source {
        BalanceSource::Native { symbol, decimals } => {
            let value = reader.native_balance(account).await?;
            Ok(FetchedBalance {
                value,
                symbol: symbol.to_owned(),
                decimals,
            })
        }
        BalanceSource::Token(token) => {
            let balance = reader.token_balance(token.address, account).await?;
            Ok(FetchedBalance {
                value: balance.value,
                symbol: balance.symbol,
                decimals: balance.decimals,
            })
        }
    }
}
