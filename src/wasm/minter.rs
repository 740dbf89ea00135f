//! Exported minter namespace.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::endpoint::JsChainEndpoint;
use super::uploader::{JsImageStore, JsSleeper};
use super::wallet::JsWalletProvider;
use crate::config::MinterConfig;
use crate::fee::ServiceFee;
use crate::flow::TokenCreator;
use crate::progress::{Progress, ProgressSink};
use crate::request::{RevokeFlags, TokenForm};
use crate::upload::ImageFile;

/// Forwards progress events to a host callback and mirrors them to the
/// console.
struct CallbackSink {
    callback: Option<js_sys::Function>,
}

impl ProgressSink for CallbackSink {
    fn progress(&self, stage: Progress) {
        web_sys::console::log_1(&JsValue::from_str(stage.as_str()));
        if let Some(callback) = &self.callback {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(stage.as_str()));
        }
    }
}

/// Token-creation entry point for the host application.
///
/// ```javascript
/// const minter = new WasmMinter(wallet, connection, uploader, {}, (stage) => toast(stage));
/// const outcome = await minter.createToken(form, imageBytes, "image/png");
/// // outcome.token.mintAddress, outcome.token.signature, outcome.validation…
/// ```
#[wasm_bindgen]
pub struct WasmMinter {
    creator: Rc<TokenCreator>,
}

#[wasm_bindgen]
impl WasmMinter {
    /// Build a minter over the injected collaborators.
    ///
    /// `config` may be undefined or `{ feeWallet, cluster }`; `on_progress`
    /// receives stage strings for the host's notification layer.
    #[wasm_bindgen(constructor)]
    pub fn new(
        wallet: JsWalletProvider,
        endpoint: JsChainEndpoint,
        uploader: JsImageStore,
        config: JsValue,
        on_progress: Option<js_sys::Function>,
    ) -> Result<WasmMinter, JsValue> {
        let config: MinterConfig = if config.is_undefined() || config.is_null() {
            MinterConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let creator = TokenCreator::new(
            Box::new(wallet),
            Box::new(endpoint),
            Box::new(uploader),
            Box::new(JsSleeper),
            config,
        )
        .with_progress(Box::new(CallbackSink {
            callback: on_progress,
        }));

        Ok(WasmMinter {
            creator: Rc::new(creator),
        })
    }

    /// Service fee in SOL for a revoke selection (`{ freeze, mint, update }`).
    #[wasm_bindgen(js_name = quoteFee)]
    pub fn quote_fee(&self, revoke: JsValue) -> Result<f64, JsValue> {
        let revoke: RevokeFlags = serde_wasm_bindgen::from_value(revoke)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse revoke flags: {}", e)))?;
        Ok(ServiceFee::quote(&revoke).sol())
    }

    /// Two-decimal fee figure for display, e.g. `"0.15"`.
    #[wasm_bindgen(js_name = quoteFeeDisplay)]
    pub fn quote_fee_display(&self, revoke: JsValue) -> Result<String, JsValue> {
        let revoke: RevokeFlags = serde_wasm_bindgen::from_value(revoke)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse revoke flags: {}", e)))?;
        Ok(ServiceFee::quote(&revoke).display_sol())
    }

    /// Validate the form without touching the wallet or the network. Throws
    /// the first violation as a JS `Error`.
    #[wasm_bindgen(js_name = validateForm)]
    pub fn validate_form(&self, form: JsValue) -> Result<(), JsValue> {
        let form: TokenForm = serde_wasm_bindgen::from_value(form)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse token form: {}", e)))?;
        form.validate()?;
        Ok(())
    }

    /// Whether a creation is currently in flight.
    #[wasm_bindgen(js_name = isInFlight)]
    pub fn is_in_flight(&self) -> bool {
        self.creator.is_in_flight()
    }

    /// Run the full creation flow. Resolves with
    /// `{ token, validation }` (camelCase fields) or rejects with an `Error`.
    #[wasm_bindgen(js_name = createToken)]
    pub fn create_token(
        &self,
        form: JsValue,
        image: js_sys::Uint8Array,
        image_content_type: Option<String>,
    ) -> js_sys::Promise {
        let creator = Rc::clone(&self.creator);
        let bytes = image.to_vec();

        future_to_promise(async move {
            let form: TokenForm = serde_wasm_bindgen::from_value(form)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse token form: {}", e)))?;
            let image = ImageFile {
                bytes,
                content_type: image_content_type.unwrap_or_else(|| "image/png".to_string()),
            };

            let outcome = creator.create(&form, image).await?;

            serde_wasm_bindgen::to_value(&outcome)
                .map_err(|e| JsValue::from_str(&format!("Failed to serialize outcome: {}", e)))
        })
    }
}
