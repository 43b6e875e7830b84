//! Event binding.
//!
//! Handlers that talk to the wallet or the chain are spawned with
//! `wasm_bindgen_futures::spawn_local`; wrap and unwrap run as independent tasks.

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wg_wallet_core::{SubmitOutcome, TxKind, WrapperApp};

use crate::dom::{Elements, FormElements};

/// Helper: attach an async click handler taking the app.
macro_rules! on_click_async {
    ($el:expr, $app:expr, $handler:expr) => {{
        let app = $app.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&app).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements, app: &WrapperApp) -> Result<(), JsValue> {
    on_click_async!(els.connect_button, app, on_connect_toggle);
    on_click_async!(els.switch_button, app, on_switch_network);

    bind_form(&els.wrap, app, TxKind::Wrap)?;
    bind_form(&els.unwrap, app, TxKind::Unwrap)?;
    Ok(())
}

fn bind_form(els: &FormElements, app: &WrapperApp, kind: TxKind) -> Result<(), JsValue> {
    {
        let app = app.clone();
        let input = els.amount.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            app.set_amount(kind, &input.value());
        }) as Box<dyn FnMut(_)>);
        els.amount
            .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    {
        let app = app.clone();
        let cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
            event.prevent_default();
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                on_submit(&app, kind).await;
            });
        }) as Box<dyn FnMut(_)>);
        els.form
            .add_event_listener_with_callback("submit", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }
    Ok(())
}

async fn on_connect_toggle(app: &WrapperApp) {
    let result = if app.state().connection.connected {
        app.disconnect().await
    } else {
        app.connect().await
    };
    if let Err(err) = result {
        warn!(error = %err, "connect button action failed");
    }
}

async fn on_switch_network(app: &WrapperApp) {
    if let Err(err) = app.switch_network().await {
        warn!(error = %err, "network switch failed");
    }
}

async fn on_submit(app: &WrapperApp, kind: TxKind) {
    match app.submit(kind).await {
        SubmitOutcome::Skipped(reason) => debug!(kind = kind.as_str(), ?reason, "submit skipped"),
        SubmitOutcome::Confirmed(hash) => debug!(kind = kind.as_str(), %hash, "submit finished"),
        SubmitOutcome::Failed(message) => debug!(kind = kind.as_str(), error = %message, "submit failed"),
    }
}
