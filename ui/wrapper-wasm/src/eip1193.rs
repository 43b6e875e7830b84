//! EIP-1193 wallet connector over the injected `window.ethereum` provider.

use alloy_primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wg_api_types::{ChainDescriptor, ConnectionState, NativeCurrency};
use wg_chain_client::{ChainError, ContractCall, WalletConnector};

const NO_PARAMS: [(); 0] = [];

#[derive(Serialize)]
struct ProviderRequest<'a, P> {
    method: &'a str,
    params: P,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRequest {
    from: Address,
    to: Address,
    value: U256,
    data: Bytes,
    chain_id: String,
}

impl From<&ContractCall> for TransactionRequest {
    fn from(call: &ContractCall) -> Self {
        Self {
            from: call.from,
            to: call.to,
            value: call.value,
            data: call.input.clone(),
            chain_id: hex_chain_id(call.chain_id),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwitchChainParams {
    chain_id: String,
}

/// EIP-3085 `wallet_addEthereumChain` parameters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddChainParams {
    chain_id: String,
    chain_name: &'static str,
    native_currency: NativeCurrency,
    rpc_urls: [&'static str; 1],
    block_explorer_urls: [&'static str; 1],
}

impl From<&ChainDescriptor> for AddChainParams {
    fn from(chain: &ChainDescriptor) -> Self {
        Self {
            chain_id: hex_chain_id(chain.id),
            chain_name: chain.name,
            native_currency: chain.native_currency,
            rpc_urls: [chain.rpc_url],
            block_explorer_urls: [chain.explorer_url],
        }
    }
}

pub struct Eip1193Wallet {
    provider: Option<JsValue>,
    chain: ChainDescriptor,
    connection: RefCell<ConnectionState>,
    listeners: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
}

impl Eip1193Wallet {
    pub fn detect(chain: ChainDescriptor) -> Self {
        let provider = injected_provider();
        if provider.is_none() {
            warn!("no injected wallet at window.ethereum; connecting is unavailable");
        }
        Self {
            provider,
            chain,
            connection: RefCell::new(ConnectionState::disconnected()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Pick up accounts already authorised for this origin without prompting.
    pub async fn restore(&self) -> Result<ConnectionState, ChainError> {
        self.read_connection("eth_accounts").await
    }

    /// Call `on_change` whenever the wallet reports new accounts or a new chain.
    pub fn listen(&self, on_change: impl Fn() + 'static) -> Result<(), ChainError> {
        let provider = self.provider()?;
        let on = provider_fn(provider, "on").ok_or(ChainError::ProviderUnavailable)?;
        let on_change: Rc<dyn Fn()> = Rc::new(on_change);

        let mut listeners = self.listeners.borrow_mut();
        for event in ["accountsChanged", "chainChanged"] {
            let notify = on_change.clone();
            let callback = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
                debug!(event, "wallet event");
                notify();
            });
            on.call2(
                provider,
                &JsValue::from_str(event),
                callback.as_ref().unchecked_ref(),
            )
            .map_err(error_from_js)?;
            listeners.push(callback);
        }
        Ok(())
    }

    fn provider(&self) -> Result<&JsValue, ChainError> {
        self.provider.as_ref().ok_or(ChainError::ProviderUnavailable)
    }

    async fn read_connection(&self, accounts_method: &str) -> Result<ConnectionState, ChainError> {
        let accounts = self.request(accounts_method, NO_PARAMS).await?;
        let connection = match first_account(&accounts)? {
            Some(account) => {
                let chain_id = parse_chain_id(&self.request("eth_chainId", NO_PARAMS).await?)?;
                ConnectionState::connected(account, chain_id)
            }
            None => ConnectionState::disconnected(),
        };
        *self.connection.borrow_mut() = connection.clone();
        Ok(connection)
    }

    async fn request<P: Serialize>(&self, method: &str, params: P) -> Result<Value, ChainError> {
        let provider = self.provider()?;
        let request = provider_fn(provider, "request").ok_or(ChainError::ProviderUnavailable)?;

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let args = ProviderRequest { method, params }
            .serialize(&serializer)
            .map_err(|err| ChainError::Decode(err.to_string()))?;

        let promise = request
            .call1(provider, &args)
            .map_err(error_from_js)?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| ChainError::Transport(format!("{method} did not return a promise")))?;
        let result = JsFuture::from(promise).await.map_err(error_from_js)?;

        serde_wasm_bindgen::from_value(result).map_err(|err| ChainError::Decode(err.to_string()))
    }
}

#[async_trait(?Send)]
impl WalletConnector for Eip1193Wallet {
    fn connection(&self) -> ConnectionState {
        self.connection.borrow().clone()
    }

    fn is_ready(&self) -> bool {
        self.provider.is_some() && self.connection.borrow().connected
    }

    async fn connect(&self) -> Result<ConnectionState, ChainError> {
        let connection = self.read_connection("eth_requestAccounts").await?;
        info!(account = ?connection.account, chain_id = ?connection.chain_id, "wallet connected");
        Ok(connection)
    }

    async fn disconnect(&self) -> Result<ConnectionState, ChainError> {
        // Not every wallet supports revoking; the local session is dropped either way.
        let revoke = [serde_json::json!({ "eth_accounts": {} })];
        if let Err(err) = self.request("wallet_revokePermissions", revoke).await {
            debug!(error = %err, "wallet_revokePermissions unsupported");
        }
        let connection = ConnectionState::disconnected();
        *self.connection.borrow_mut() = connection.clone();
        Ok(connection)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ChainError> {
        let params = [SwitchChainParams {
            chain_id: hex_chain_id(chain_id),
        }];
        match self.request("wallet_switchEthereumChain", params).await {
            Ok(_) => {}
            Err(ChainError::UnrecognizedChain) if chain_id == self.chain.id => {
                info!(chain_id, "wallet does not know the chain, adding it");
                self.request("wallet_addEthereumChain", [AddChainParams::from(&self.chain)])
                    .await?;
            }
            Err(err) => return Err(err),
        }
        self.restore().await.map(|_| ())
    }

    async fn write_contract(&self, call: ContractCall) -> Result<TxHash, ChainError> {
        if !self.is_ready() {
            return Err(ChainError::NotConnected);
        }
        let actual = parse_chain_id(&self.request("eth_chainId", NO_PARAMS).await?)?;
        if actual != call.chain_id {
            return Err(ChainError::ChainMismatch {
                expected: call.chain_id,
                actual,
            });
        }

        info!(function = call.function, to = %call.to, value = %call.value, "requesting wallet signature");
        let result = self
            .request("eth_sendTransaction", [TransactionRequest::from(&call)])
            .await?;
        result
            .as_str()
            .ok_or_else(|| ChainError::Decode(format!("expected a transaction hash, got {result}")))?
            .parse::<TxHash>()
            .map_err(|err| ChainError::Decode(err.to_string()))
    }
}

fn injected_provider() -> Option<JsValue> {
    let window = web_sys::window()?;
    let provider = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
    (!provider.is_null() && !provider.is_undefined()).then_some(provider)
}

fn provider_fn(provider: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(provider, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}

/// Provider rejections carry `{ code, message }`; anything else is a transport failure.
fn error_from_js(err: JsValue) -> ChainError {
    let field = |name: &str| js_sys::Reflect::get(&err, &JsValue::from_str(name)).ok();
    let message = field("message")
        .and_then(|value| value.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    match field("code").and_then(|value| value.as_f64()) {
        Some(code) => ChainError::from_rpc(code as i64, message),
        None => ChainError::Transport(message),
    }
}

fn hex_chain_id(chain_id: u64) -> String {
    format!("{chain_id:#x}")
}

fn first_account(accounts: &Value) -> Result<Option<Address>, ChainError> {
    let Some(first) = accounts.as_array().and_then(|list| list.first()) else {
        return Ok(None);
    };
    first
        .as_str()
        .ok_or_else(|| ChainError::Decode(format!("account is not a string: {first}")))?
        .parse::<Address>()
        .map(Some)
        .map_err(|err| ChainError::Decode(err.to_string()))
}

fn parse_chain_id(value: &Value) -> Result<u64, ChainError> {
    match value {
        Value::String(raw) => {
            let parsed = match raw.strip_prefix("0x") {
                Some(hex) => u64::from_str_radix(hex, 16),
                None => raw.parse(),
            };
            parsed.map_err(|err| ChainError::Decode(format!("invalid chain id {raw:?}: {err}")))
        }
        Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| ChainError::Decode(format!("invalid chain id {number}"))),
        other => Err(ChainError::Decode(format!("invalid chain id {other}"))),
    }
}
