//! WGHO Wrapper WASM front end.
//!
//! Binds the static page, wires the injected wallet and the Lens JSON-RPC
//! reader into a `WrapperApp`, and re-renders on every state change.

pub mod dom;
pub mod eip1193;
pub mod events;
pub mod logging;
pub mod render;
pub mod timer;

use std::rc::Rc;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wg_chain_client::WalletConnector;
use wg_chain_lens::LensRpcReader;
use wg_wallet_core::{Providers, WalletConfig, WrapperApp};

use crate::eip1193::Eip1193Wallet;
use crate::timer::GlooTimer;

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    // No process environment in the browser: both settings are baked in at build time.
    let config = WalletConfig::new(option_env!("WALLETCONNECT_PROJECT_ID").map(str::to_owned));
    let reader = Rc::new(LensRpcReader::new(
        option_env!("LENS_RPC_URL").map(str::to_owned),
    ));
    let wallet = Rc::new(Eip1193Wallet::detect(config.chain));
    if let Err(err) = wallet.restore().await {
        debug!(error = %err, "no existing wallet session");
    }
    info!(
        app = config.app_name,
        rpc = reader.endpoint(),
        connectors = ?config.connectors(),
        "starting"
    );

    let app = WrapperApp::new(Providers {
        config: config.clone(),
        wallet: wallet.clone(),
        reader: reader.clone(),
        timer: Rc::new(GlooTimer),
    });

    render::render_static(&els, &config);
    {
        let els = els.clone();
        let wallet = wallet.clone();
        app.subscribe(move |state| render::render(&els, state, &config, wallet.is_ready()));
    }
    events::bind_events(&els, &app)?;

    {
        let app = app.clone();
        let wallet_for_events = wallet.clone();
        let listening = wallet.listen(move || {
            let app = app.clone();
            let wallet = wallet_for_events.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = wallet.restore().await {
                    warn!(error = %err, "could not re-read wallet after provider event");
                }
                app.sync_connection().await;
            });
        });
        if let Err(err) = listening {
            warn!(error = %err, "wallet events unavailable; connection changes need a reload");
        }
    }

    wasm_bindgen_futures::spawn_local(verify_rpc_chain(reader));

    app.hydrate();
    app.refresh_balances().await;
    Ok(())
}

/// Log a mismatch between the configured RPC and the pinned chain.
async fn verify_rpc_chain(reader: Rc<LensRpcReader>) {
    let expected = wg_api_types::LENS_CHAIN_ID;
    match reader.chain_id().await {
        Ok(id) if id == expected => debug!(chain_id = id, "rpc chain verified"),
        Ok(id) => warn!(expected, actual = id, "rpc endpoint serves a different chain"),
        Err(err) => warn!(error = %err, "rpc chain check failed"),
    }
}
