//! Projects an `AppState` snapshot onto the bound elements.

use wasm_bindgen::prelude::*;
use web_sys::Element;
use wg_wallet_core::balance::BalanceSnapshot;
use wg_wallet_core::display::{self, DisplayMode, StatusLine};
use wg_wallet_core::{AppState, TxForm, TxKind, WalletConfig};

use crate::dom::{self, Elements, FormElements};

/// Text that never changes after startup.
pub fn render_static(els: &Elements, config: &WalletConfig) {
    dom::set_text(&els.app_title, config.app_name);
    dom::set_text(&els.app_description, config.app_description);
    dom::set_text(&els.connect_prompt, display::connect_prompt());
    dom::set_text(&els.switch_prompt, &display::switch_network_prompt(&config.chain));
    for (form, kind) in [(&els.wrap, TxKind::Wrap), (&els.unwrap, TxKind::Unwrap)] {
        dom::set_text(&form.title, &display::form_title(kind, config));
        form.amount.set_placeholder(&display::amount_placeholder(kind, config));
    }
}

pub fn render(els: &Elements, state: &AppState, config: &WalletConfig, wallet_ready: bool) {
    let mode = DisplayMode::resolve(state.hydrated, &state.connection, config.chain.id);

    els.connect_button
        .set_text_content(Some(&display::connect_button_label(&state.connection)));
    dom::set_visible(&els.connect_button, mode != DisplayMode::Pending);
    dom::set_visible(&els.connect_section, mode == DisplayMode::ConnectWallet);
    dom::set_visible(
        &els.switch_section,
        matches!(mode, DisplayMode::SwitchNetwork { .. }),
    );
    dom::set_visible(&els.interface_section, mode == DisplayMode::Interface);
    if mode != DisplayMode::Interface {
        return;
    }

    render_balance(
        &els.native_balance,
        state.native.snapshot(),
        config.chain.native_currency.symbol,
    );
    render_balance(&els.wrapped_balance, state.wrapped.snapshot(), config.token.symbol);

    let available = display::wallet_available(wallet_ready, &state.connection, config.chain.id);
    render_form(&els.wrap, &state.wrap, config, available);
    render_form(&els.unwrap, &state.unwrap, config, available);
}

fn render_balance(el: &Element, snapshot: &BalanceSnapshot, default_symbol: &str) {
    dom::set_text(el, &balance_text(snapshot, default_symbol));
    // A refetch behind a cached value dims it instead of replacing it.
    dom::toggle_class(el, "fetching", snapshot.is_fetching && !snapshot.is_loading);
}

fn balance_text(snapshot: &BalanceSnapshot, default_symbol: &str) -> String {
    let mut text = if snapshot.is_loading {
        "...".to_owned()
    } else {
        display::format_balance(snapshot, default_symbol)
    };
    if snapshot.error.is_some() {
        text.push_str(" (Error)");
    }
    text
}

fn render_form(els: &FormElements, form: &TxForm, config: &WalletConfig, wallet_available: bool) {
    // Only write back when they differ, otherwise the caret jumps while typing.
    if els.amount.value() != form.amount {
        els.amount.set_value(&form.amount);
    }
    els.amount.set_disabled(form.lifecycle.is_in_flight());

    els.submit
        .set_text_content(Some(&display::submit_label(form.kind, &form.lifecycle, config)));
    els.submit.set_disabled(!display::submit_enabled(
        &form.lifecycle,
        &form.amount,
        config.token.decimals,
        wallet_available,
    ));

    match &form.input_error {
        Some(message) => dom::set_text(&els.input_error, message),
        None => dom::set_text(&els.input_error, ""),
    }
    dom::set_visible(&els.input_error, form.input_error.is_some());

    dom::clear_children(&els.status);
    for line in display::status_lines(form.kind, &form.lifecycle, &config.chain) {
        let appended = status_node(&line).and_then(|node| els.status.append_child(&node));
        if let Err(err) = appended {
            tracing::warn!(?err, "could not render status line");
        }
    }
}

fn status_node(line: &StatusLine) -> Result<Element, JsValue> {
    let node = dom::create_element("p")?;
    match line {
        StatusLine::TxHash {
            hash,
            explorer_name,
            explorer_url,
        } => {
            node.append_with_str_1("Tx Hash: ")?;
            let link = dom::create_element("a")?;
            link.set_attribute("href", explorer_url)?;
            link.set_attribute("target", "_blank")?;
            link.set_attribute("rel", "noopener noreferrer")?;
            link.set_attribute("title", &format!("View on {explorer_name}"))?;
            link.set_text_content(Some(&hash.to_string()));
            node.append_with_node_1(&link)?;
        }
        StatusLine::Waiting => node.set_text_content(Some(&line.text())),
        StatusLine::Success(_) => {
            node.set_class_name("success");
            node.set_text_content(Some(&line.text()));
        }
        StatusLine::Error(_) => {
            node.set_class_name("error");
            node.set_text_content(Some(&line.text()));
        }
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn snapshot(value: Option<U256>, is_loading: bool, error: Option<&str>) -> BalanceSnapshot {
        BalanceSnapshot {
            value,
            symbol: "GHO".to_owned(),
            decimals: 18,
            is_loading,
            is_fetching: is_loading,
            error: error.map(str::to_owned),
        }
    }

    #[test]
    fn balance_shows_ellipsis_while_loading() {
        assert_eq!(balance_text(&snapshot(None, true, None), "GHO"), "...");
    }

    #[test]
    fn loading_keeps_an_earlier_error_visible() {
        assert_eq!(
            balance_text(&snapshot(None, true, Some("HTTP request failed.")), "GHO"),
            "... (Error)"
        );
    }

    #[test]
    fn balance_error_is_marked_next_to_value() {
        let value = Some(U256::from(1_250_000_000_000_000_000u128));
        assert_eq!(balance_text(&snapshot(value, false, None), "GHO"), "1.2500 GHO");
        assert_eq!(
            balance_text(&snapshot(value, false, Some("HTTP request failed.")), "GHO"),
            "1.2500 GHO (Error)"
        );
        assert_eq!(
            balance_text(&snapshot(None, false, Some("HTTP request failed.")), "GHO"),
            "0.0000 GHO (Error)"
        );
    }
}
