//! Wrap / unwrap transaction lifecycle.
//!
//! ```text
//! Idle ─Submit→ AwaitingSignature ─HashReceived→ Submitted ─PollingStarted→ Confirming
//!                                                                             ├─Included(ok)→ Confirmed
//!                                                                             └─Included(reverted)→ Failed
//! any in-flight state ─Fail→ Failed
//! Confirmed | Failed ─Submit→ AwaitingSignature
//! ```

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_sol_types::SolCall;
use tracing::warn;
use wg_api_types::TokenDescriptor;
use wg_chain_client::ContractCall;
use wg_chain_client::abi::IWrappedNative;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    Wrap,
    Unwrap,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wrap => "wrap",
            Self::Unwrap => "unwrap",
        }
    }

    /// Wrap sends `deposit()` carrying the amount as value; unwrap sends
    /// `withdraw(amount)` with no value.
    pub fn contract_call(
        self,
        amount: U256,
        token: &TokenDescriptor,
        chain_id: u64,
        from: Address,
    ) -> ContractCall {
        let (value, input, function) = match self {
            Self::Wrap => (
                amount,
                IWrappedNative::depositCall {}.abi_encode(),
                "deposit",
            ),
            Self::Unwrap => (
                U256::ZERO,
                IWrappedNative::withdrawCall { amount }.abi_encode(),
                "withdraw",
            ),
        };
        ContractCall {
            chain_id,
            from,
            to: token.address,
            value,
            input: Bytes::from(input),
            function,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TxLifecycle {
    #[default]
    Idle,
    AwaitingSignature,
    Submitted {
        hash: TxHash,
    },
    Confirming {
        hash: TxHash,
    },
    Confirmed {
        hash: TxHash,
    },
    Failed {
        hash: Option<TxHash>,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxEvent {
    Submit,
    HashReceived(TxHash),
    PollingStarted,
    Included { success: bool },
    Fail(String),
}

impl TxLifecycle {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::AwaitingSignature | Self::Submitted { .. } | Self::Confirming { .. }
        )
    }

    pub fn is_awaiting_signature(&self) -> bool {
        matches!(self, Self::AwaitingSignature)
    }

    /// Hash known but not yet included.
    pub fn is_confirming(&self) -> bool {
        matches!(self, Self::Submitted { .. } | Self::Confirming { .. })
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }

    pub fn hash(&self) -> Option<TxHash> {
        match self {
            Self::Submitted { hash } | Self::Confirming { hash } | Self::Confirmed { hash } => {
                Some(*hash)
            }
            Self::Failed { hash, .. } => *hash,
            Self::Idle | Self::AwaitingSignature => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Apply `event`. Pairs outside the table leave the state unchanged.
    pub fn apply(&mut self, event: TxEvent) -> bool {
        let next = match (&*self, event) {
            (Self::Idle | Self::Confirmed { .. } | Self::Failed { .. }, TxEvent::Submit) => {
                Self::AwaitingSignature
            }
            (Self::AwaitingSignature, TxEvent::HashReceived(hash)) => Self::Submitted { hash },
            (Self::Submitted { hash }, TxEvent::PollingStarted) => Self::Confirming { hash: *hash },
            (Self::Confirming { hash }, TxEvent::Included { success: true }) => {
                Self::Confirmed { hash: *hash }
            }
            (Self::Confirming { hash }, TxEvent::Included { success: false }) => Self::Failed {
                hash: Some(*hash),
                message: "Transaction reverted.".to_owned(),
            },
            (state, TxEvent::Fail(message)) if state.is_in_flight() => Self::Failed {
                hash: state.hash(),
                message,
            },
            (state, event) => {
                warn!(?state, ?event, "ignored lifecycle event");
                return false;
            }
        };
        *self = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wg_api_types::{LENS_CHAIN_ID, WGHO};

    fn hash() -> TxHash {
        TxHash::repeat_byte(0xaa)
    }

    #[test]
    fn happy_path_reaches_confirmed() {
        let mut tx = TxLifecycle::Idle;
        assert!(tx.apply(TxEvent::Submit));
        assert!(tx.is_awaiting_signature());
        assert!(tx.apply(TxEvent::HashReceived(hash())));
        assert!(tx.apply(TxEvent::PollingStarted));
        assert!(tx.is_confirming());
        assert!(tx.apply(TxEvent::Included { success: true }));
        assert_eq!(tx, TxLifecycle::Confirmed { hash: hash() });
        assert!(!tx.is_in_flight());
    }

    #[test]
    fn rejection_during_signature_fails_without_hash() {
        let mut tx = TxLifecycle::Idle;
        tx.apply(TxEvent::Submit);
        tx.apply(TxEvent::Fail("User rejected the request.".to_owned()));
        assert_eq!(
            tx,
            TxLifecycle::Failed {
                hash: None,
                message: "User rejected the request.".to_owned()
            }
        );
    }

    #[test]
    fn revert_fails_with_hash() {
        let mut tx = TxLifecycle::Idle;
        tx.apply(TxEvent::Submit);
        tx.apply(TxEvent::HashReceived(hash()));
        tx.apply(TxEvent::PollingStarted);
        tx.apply(TxEvent::Included { success: false });
        assert_eq!(tx.hash(), Some(hash()));
        assert_eq!(tx.error_message(), Some("Transaction reverted."));
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut tx = TxLifecycle::Idle;
        tx.apply(TxEvent::Submit);
        assert!(!tx.apply(TxEvent::Submit));
        assert!(tx.is_awaiting_signature());
    }

    #[test]
    fn out_of_order_events_are_ignored() {
        let mut tx = TxLifecycle::Idle;
        assert!(!tx.apply(TxEvent::Included { success: true }));
        assert!(!tx.apply(TxEvent::Fail("late".to_owned())));
        assert_eq!(tx, TxLifecycle::Idle);
    }

    #[test]
    fn terminal_states_accept_new_submit() {
        let mut tx = TxLifecycle::Failed {
            hash: None,
            message: "boom".to_owned(),
        };
        assert!(tx.apply(TxEvent::Submit));
        assert!(tx.is_awaiting_signature());
    }

    #[test]
    fn wrap_is_payable_deposit_without_arguments() {
        let from = Address::repeat_byte(0x05);
        let amount = U256::from(1_500_000_000_000_000_000u128);
        let call = TxKind::Wrap.contract_call(amount, &WGHO, LENS_CHAIN_ID, from);

        assert_eq!(call.to, WGHO.address);
        assert_eq!(call.value, amount);
        assert_eq!(call.function, "deposit");
        assert_eq!(call.input.as_ref(), IWrappedNative::depositCall::SELECTOR.as_slice());
        assert_eq!(call.chain_id, LENS_CHAIN_ID);
        assert_eq!(call.from, from);
    }

    #[test]
    fn unwrap_is_withdraw_with_amount_argument() -> anyhow::Result<()> {
        let amount = U256::from(2_000_000_000_000_000_000u128);
        let call = TxKind::Unwrap.contract_call(amount, &WGHO, LENS_CHAIN_ID, Address::ZERO);

        assert_eq!(call.value, U256::ZERO);
        assert_eq!(call.function, "withdraw");
        let decoded = IWrappedNative::withdrawCall::abi_decode(&call.input)?;
        assert_eq!(decoded.amount, amount);
        Ok(())
    }
}
