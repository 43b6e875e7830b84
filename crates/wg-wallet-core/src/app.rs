//! The page controller.
//!
//! `WrapperApp` owns the page state and the injected collaborators. Every
//! mutation notifies subscribers with a fresh `AppState` snapshot; the state
//! is never borrowed across an `.await`, so wrap and unwrap can run as
//! independent futures on a single thread.

use alloy_primitives::TxHash;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wg_api_types::ConnectionState;
use wg_chain_client::{ChainError, ChainReader, ReceiptStatus, Timer, WalletConnector};

use crate::amount::{self, AmountError};
use crate::balance::{self, BalanceModel, BalanceScope, BalanceSlot};
use crate::config::WalletConfig;
use crate::display::{self, DisplayMode};
use crate::lifecycle::{TxEvent, TxKind, TxLifecycle};

/// Everything the page needs from the outside, constructed once at startup.
pub struct Providers {
    pub config: WalletConfig,
    pub wallet: Rc<dyn WalletConnector>,
    pub reader: Rc<dyn ChainReader>,
    pub timer: Rc<dyn Timer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxForm {
    pub kind: TxKind,
    pub amount: String,
    pub lifecycle: TxLifecycle,
    /// Set when the amount could not be converted.
    pub input_error: Option<String>,
}

impl TxForm {
    fn new(kind: TxKind) -> Self {
        Self {
            kind,
            amount: String::new(),
            lifecycle: TxLifecycle::Idle,
            input_error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub hydrated: bool,
    pub connection: ConnectionState,
    pub native: BalanceModel,
    pub wrapped: BalanceModel,
    pub wrap: TxForm,
    pub unwrap: TxForm,
}

impl AppState {
    pub fn form(&self, kind: TxKind) -> &TxForm {
        match kind {
            TxKind::Wrap => &self.wrap,
            TxKind::Unwrap => &self.unwrap,
        }
    }

    fn form_mut(&mut self, kind: TxKind) -> &mut TxForm {
        match kind {
            TxKind::Wrap => &mut self.wrap,
            TxKind::Unwrap => &mut self.unwrap,
        }
    }

    fn balance_mut(&mut self, slot: BalanceSlot) -> &mut BalanceModel {
        match slot {
            BalanceSlot::Native => &mut self.native,
            BalanceSlot::Wrapped => &mut self.wrapped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InFlight,
    WalletUnavailable,
    EmptyAmount,
    NotPositive,
    InvalidAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Skipped(SkipReason),
    Confirmed(TxHash),
    Failed(String),
}

type Listener = Rc<dyn Fn(&AppState)>;

struct Inner {
    config: WalletConfig,
    wallet: Rc<dyn WalletConnector>,
    reader: Rc<dyn ChainReader>,
    timer: Rc<dyn Timer>,
    state: RefCell<AppState>,
    listeners: RefCell<Vec<Listener>>,
}

#[derive(Clone)]
pub struct WrapperApp {
    inner: Rc<Inner>,
}

impl WrapperApp {
    pub fn new(providers: Providers) -> Self {
        let Providers {
            config,
            wallet,
            reader,
            timer,
        } = providers;

        let state = AppState {
            hydrated: false,
            connection: wallet.connection(),
            native: BalanceModel::native(&config.chain),
            wrapped: BalanceModel::wrapped(&config.token),
            wrap: TxForm::new(TxKind::Wrap),
            unwrap: TxForm::new(TxKind::Unwrap),
        };

        Self {
            inner: Rc::new(Inner {
                config,
                wallet,
                reader,
                timer,
                state: RefCell::new(state),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &WalletConfig {
        &self.inner.config
    }

    pub fn state(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&AppState) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn display_mode(&self) -> DisplayMode {
        let state = self.inner.state.borrow();
        DisplayMode::resolve(state.hydrated, &state.connection, self.inner.config.chain.id)
    }

    /// Whether the submit control for `kind` is enabled.
    pub fn can_submit(&self, kind: TxKind) -> bool {
        let state = self.inner.state.borrow();
        let form = state.form(kind);
        display::submit_enabled(
            &form.lifecycle,
            &form.amount,
            self.inner.config.token.decimals,
            self.wallet_available(&state.connection),
        )
    }

    /// Mark the page as mounted client-side.
    pub fn hydrate(&self) {
        self.update(|state| state.hydrated = true);
    }

    pub fn set_amount(&self, kind: TxKind, value: &str) {
        self.update(|state| {
            let form = state.form_mut(kind);
            form.amount = value.to_owned();
            form.input_error = None;
        });
    }

    pub async fn connect(&self) -> Result<(), ChainError> {
        let connection = self.inner.wallet.connect().await.inspect_err(|err| {
            warn!(error = %err, "wallet connect failed");
        })?;
        self.on_connection_changed(connection).await;
        Ok(())
    }

    pub async fn disconnect(&self) -> Result<(), ChainError> {
        let connection = self.inner.wallet.disconnect().await?;
        self.on_connection_changed(connection).await;
        Ok(())
    }

    pub async fn switch_network(&self) -> Result<(), ChainError> {
        let target = self.inner.config.chain.id;
        self.inner.wallet.switch_chain(target).await.inspect_err(|err| {
            warn!(error = %err, target, "chain switch failed");
        })?;
        self.sync_connection().await;
        Ok(())
    }

    /// Re-read the connector, e.g. after an `accountsChanged` event.
    pub async fn sync_connection(&self) {
        let connection = self.inner.wallet.connection();
        self.on_connection_changed(connection).await;
    }

    pub async fn on_connection_changed(&self, connection: ConnectionState) {
        let changed = self.update(|state| {
            if state.connection == connection {
                return false;
            }
            state.connection = connection.clone();
            true
        });
        if changed {
            info!(
                account = ?connection.account,
                chain_id = ?connection.chain_id,
                "wallet connection changed"
            );
            self.refresh_balances().await;
        }
    }

    /// Re-read both balances for the current scope.
    pub async fn refresh_balances(&self) {
        let target = self.inner.config.chain.id;
        let requests = self.update(|state| {
            let scope = BalanceScope::from_connection(&state.connection, target);
            [state.native.begin(scope), state.wrapped.begin(scope)]
        });

        for request in requests.into_iter().flatten() {
            let result = balance::fetch(self.inner.reader.as_ref(), &request).await;
            if let Err(err) = &result {
                warn!(slot = ?request.slot, error = %err, "balance read failed");
            }
            self.update(|state| {
                if !state.balance_mut(request.slot).complete(&request, result) {
                    debug!(slot = ?request.slot, "dropped stale balance result");
                }
            });
        }
    }

    pub async fn submit(&self, kind: TxKind) -> SubmitOutcome {
        let config = &self.inner.config;
        let (amount_text, connection, in_flight) = {
            let state = self.inner.state.borrow();
            let form = state.form(kind);
            (
                form.amount.clone(),
                state.connection.clone(),
                form.lifecycle.is_in_flight(),
            )
        };

        if in_flight {
            return SubmitOutcome::Skipped(SkipReason::InFlight);
        }
        let Some(from) = connection.account.filter(|_| self.wallet_available(&connection)) else {
            return SubmitOutcome::Skipped(SkipReason::WalletUnavailable);
        };

        let amount = match amount::parse_amount(&amount_text, config.token.decimals) {
            Ok(amount) => amount,
            Err(AmountError::Empty) => return SubmitOutcome::Skipped(SkipReason::EmptyAmount),
            Err(AmountError::NotPositive) => {
                return SubmitOutcome::Skipped(SkipReason::NotPositive);
            }
            Err(err @ AmountError::Invalid { .. }) => {
                warn!(kind = kind.as_str(), error = %err, "amount conversion failed");
                self.update(|state| {
                    state.form_mut(kind).input_error = Some("Enter a valid amount.".to_owned())
                });
                return SubmitOutcome::Skipped(SkipReason::InvalidAmount);
            }
        };

        let call = kind.contract_call(amount, &config.token, config.chain.id, from);
        info!(kind = kind.as_str(), %amount, function = call.function, "submitting transaction");
        self.transition(kind, TxEvent::Submit);
        self.update(|state| state.form_mut(kind).input_error = None);

        let hash = match self.inner.wallet.write_contract(call).await {
            Ok(hash) => hash,
            Err(err) => return self.fail(kind, err),
        };
        info!(kind = kind.as_str(), %hash, "transaction submitted");
        self.transition(kind, TxEvent::HashReceived(hash));
        self.transition(kind, TxEvent::PollingStarted);

        let receipt = match self.wait_for_receipt(hash).await {
            Ok(receipt) => receipt,
            Err(err) => return self.fail(kind, err),
        };
        self.transition(kind, TxEvent::Included {
            success: receipt.success,
        });
        if !receipt.success {
            warn!(kind = kind.as_str(), %hash, block = receipt.block_number, "transaction reverted");
            return SubmitOutcome::Failed("Transaction reverted.".to_owned());
        }

        info!(kind = kind.as_str(), %hash, block = receipt.block_number, "transaction confirmed, refetching balances");
        self.update(|state| state.form_mut(kind).amount.clear());
        self.inner.timer.sleep(config.refetch_delay).await;
        self.refresh_balances().await;
        SubmitOutcome::Confirmed(hash)
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<ReceiptStatus, ChainError> {
        loop {
            if let Some(receipt) = self.inner.reader.transaction_receipt(hash).await? {
                return Ok(receipt);
            }
            debug!(%hash, "receipt not available yet");
            self.inner
                .timer
                .sleep(self.inner.config.receipt_poll_interval)
                .await;
        }
    }

    fn fail(&self, kind: TxKind, err: ChainError) -> SubmitOutcome {
        warn!(kind = kind.as_str(), error = %err, "transaction failed");
        let message = err.user_message();
        self.transition(kind, TxEvent::Fail(message.clone()));
        SubmitOutcome::Failed(message)
    }

    fn wallet_available(&self, connection: &ConnectionState) -> bool {
        display::wallet_available(
            self.inner.wallet.is_ready(),
            connection,
            self.inner.config.chain.id,
        )
    }

    fn transition(&self, kind: TxKind, event: TxEvent) {
        self.update(|state| {
            state.form_mut(kind).lifecycle.apply(event);
        });
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let result = f(&mut self.inner.state.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        let listeners = self.inner.listeners.borrow().clone();
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.state();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
