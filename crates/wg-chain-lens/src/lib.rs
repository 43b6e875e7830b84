use alloy_primitives::{Address, Bytes, TxHash, U64, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};
use wg_api_types::LENS_CHAIN;
use wg_chain_client::abi::IWrappedNative;
use wg_chain_client::{ChainError, ChainReader, ReceiptStatus, TokenBalance};

pub const LENS_RPC_URL_ENV: &str = "LENS_RPC_URL";

/// JSON-RPC reader for Lens Chain.
///
/// Reads `LENS_RPC_URL` from environment at construction time
/// (default: the RPC URL of `LENS_CHAIN`). In the browser the environment
/// lookup always misses and the default is used.
pub struct LensRpcReader {
    endpoint: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl Default for LensRpcReader {
    fn default() -> Self {
        Self::new(None)
    }
}

impl LensRpcReader {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var(LENS_RPC_URL_ENV).ok())
            .unwrap_or_else(|| LENS_CHAIN.rpc_url.to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `eth_chainId` of the node behind the endpoint.
    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        let id: U64 = self.request("eth_chainId", json!([])).await?;
        Ok(id.to::<u64>())
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        debug!(method, id, "lens rpc request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| ChainError::Transport(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ChainError::Transport(err.to_string()))?;

        if !status.is_success() {
            warn!(method, %status, "lens rpc HTTP failure");
            return Err(ChainError::Transport(format!("HTTP {status}: {text}")));
        }

        decode_response(&text)
    }

    async fn call_contract<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, ChainError> {
        let data = Bytes::from(call.abi_encode());
        let params = json!([{ "to": to, "data": data }, "latest"]);
        let output: Bytes = self.request("eth_call", params).await?;
        Ok(C::abi_decode_returns(&output)?)
    }
}

// ── JSON-RPC wire types ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    block_number: Option<U64>,
    // Absent on pre-Byzantium receipts.
    #[serde(default)]
    status: Option<U64>,
}

impl RpcReceipt {
    fn into_status(self) -> Option<ReceiptStatus> {
        let block_number = self.block_number?;
        Some(ReceiptStatus {
            block_number: block_number.to::<u64>(),
            success: self.status.is_none_or(|status| status == U64::from(1)),
        })
    }
}

fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T, ChainError> {
    let response: JsonRpcResponse = serde_json::from_str(body)?;
    if let Some(err) = response.error {
        return Err(ChainError::from_rpc(err.code, err.message));
    }
    Ok(serde_json::from_value(response.result)?)
}

#[async_trait(?Send)]
impl ChainReader for LensRpcReader {
    async fn native_balance(&self, account: Address) -> Result<U256, ChainError> {
        self.request("eth_getBalance", json!([account, "latest"]))
            .await
    }

    async fn token_balance(&self, token: Address, account: Address) -> Result<TokenBalance, ChainError> {
        let value = self
            .call_contract(token, IWrappedNative::balanceOfCall { account })
            .await?;
        let decimals = self
            .call_contract(token, IWrappedNative::decimalsCall {})
            .await?;
        let symbol = self
            .call_contract(token, IWrappedNative::symbolCall {})
            .await?;

        Ok(TokenBalance {
            value,
            symbol,
            decimals,
        })
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<ReceiptStatus>, ChainError> {
        let receipt: Option<RpcReceipt> = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        Ok(receipt.and_then(RpcReceipt::into_status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_endpoint_wins_and_is_trimmed() {
        let reader = LensRpcReader::new(Some("http://localhost:8545/".to_owned()));
        assert_eq!(reader.endpoint(), "http://localhost:8545");
    }

    #[test]
    fn decodes_hex_quantity_result() -> anyhow::Result<()> {
        let balance: U256 =
            decode_response(r#"{"jsonrpc":"2.0","id":1,"result":"0xde0b6b3a7640000"}"#)?;
        assert_eq!(balance, U256::from(1_000_000_000_000_000_000u128));
        Ok(())
    }

    #[test]
    fn error_object_becomes_chain_error() {
        let result: Result<U256, ChainError> = decode_response(
            r#"{"jsonrpc":"2.0","id":7,"error":{"code":-32005,"message":"rate limited"}}"#,
        );
        assert_eq!(
            result,
            Err(ChainError::Rpc {
                code: -32005,
                message: "rate limited".to_owned()
            })
        );

        let reverted: Result<Bytes, ChainError> = decode_response(
            r#"{"jsonrpc":"2.0","id":8,"error":{"code":3,"message":"execution reverted","data":"0x"}}"#,
        );
        assert!(matches!(reverted, Err(ChainError::Reverted(_))));
    }

    #[test]
    fn null_receipt_means_pending() -> anyhow::Result<()> {
        let receipt: Option<RpcReceipt> =
            decode_response(r#"{"jsonrpc":"2.0","id":2,"result":null}"#)?;
        assert!(receipt.is_none());
        Ok(())
    }

    #[test]
    fn receipt_status_maps_success_and_revert() -> anyhow::Result<()> {
        let hash = TxHash::repeat_byte(0x01);
        let body = |status: &str| {
            format!(
                r#"{{"jsonrpc":"2.0","id":3,"result":{{"transactionHash":"{hash}","blockNumber":"0x10","status":"{status}"}}}}"#
            )
        };

        let ok: Option<RpcReceipt> = decode_response(&body("0x1"))?;
        assert_eq!(
            ok.and_then(RpcReceipt::into_status),
            Some(ReceiptStatus {
                block_number: 16,
                success: true
            })
        );

        let reverted: Option<RpcReceipt> = decode_response(&body("0x0"))?;
        assert_eq!(
            reverted.and_then(RpcReceipt::into_status).map(|r| r.success),
            Some(false)
        );
        Ok(())
    }

    #[test]
    fn balance_of_return_word_decodes() -> anyhow::Result<()> {
        let mut word = [0u8; 32];
        word[31] = 0x2a;
        let value = IWrappedNative::balanceOfCall::abi_decode_returns(&word)?;
        assert_eq!(value, U256::from(42));
        Ok(())
    }
}
