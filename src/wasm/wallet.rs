//! Binding for the injected wallet provider.
//!
//! The host supplies a small adapter over its wallet extension:
//!
//! ```javascript
//! {
//!   isConnected(): boolean,
//!   publicKey(): string | null,          // base58
//!   signTransaction(tx: Uint8Array): Promise<Uint8Array>,
//! }
//! ```

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::js_error_message;
use crate::error::WalletError;
use crate::wallet::WalletProvider;

#[wasm_bindgen]
extern "C" {
    /// Duck-typed wallet adapter supplied by the host application.
    pub type JsWalletProvider;

    #[wasm_bindgen(method, js_name = isConnected)]
    fn js_is_connected(this: &JsWalletProvider) -> bool;

    #[wasm_bindgen(method, js_name = publicKey)]
    fn js_public_key(this: &JsWalletProvider) -> Option<String>;

    #[wasm_bindgen(method, catch, js_name = signTransaction)]
    fn js_sign_transaction(
        this: &JsWalletProvider,
        transaction: &[u8],
    ) -> Result<js_sys::Promise, JsValue>;
}

/// Classify a wallet exception. Extensions signal explicit user rejection
/// with code 4001 or a "User rejected" message; a "blocked" message means the
/// extension itself refused and the user must override it there.
fn classify_wallet_error(err: JsValue) -> WalletError {
    let code = js_sys::Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64());
    let message = js_error_message(&err);

    if code == Some(4001.0) || message.contains("User rejected") || message.contains("denied") {
        WalletError::Rejected
    } else if message.contains("blocked") {
        WalletError::Blocked
    } else if message.contains("disconnected") {
        WalletError::Disconnected
    } else {
        WalletError::Other(message)
    }
}

#[async_trait(?Send)]
impl WalletProvider for JsWalletProvider {
    fn is_connected(&self) -> bool {
        self.js_is_connected()
    }

    fn public_key(&self) -> Option<String> {
        self.js_public_key()
    }

    async fn sign_transaction(&self, transaction: &[u8]) -> Result<Vec<u8>, WalletError> {
        let promise = self
            .js_sign_transaction(transaction)
            .map_err(classify_wallet_error)?;
        let value = JsFuture::from(promise)
            .await
            .map_err(classify_wallet_error)?;
        let bytes = js_sys::Uint8Array::new(&value).to_vec();
        if bytes.is_empty() {
            return Err(WalletError::Other(
                "wallet returned an empty transaction".to_string(),
            ));
        }
        Ok(bytes)
    }
}
