//! Binding for the injected RPC connection.
//!
//! The interface matches a web3.js `Connection` closely enough that the host
//! can pass one straight through, or wrap its own transport:
//!
//! ```javascript
//! {
//!   getMinimumBalanceForRentExemption(space: number): Promise<number>,
//!   getLatestBlockhash(): Promise<string | { blockhash: string }>,
//!   sendRawTransaction(tx: Uint8Array, options): Promise<string>,
//!   confirmTransaction(signature: string, commitment: string):
//!     Promise<{ value: { err: any } } | { err: any }>,
//! }
//! ```

use async_trait::async_trait;
use solana_sdk::hash::Hash;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::js_error_message;
use crate::error::EndpointError;
use crate::network::{ChainEndpoint, TransactionStatus};

#[wasm_bindgen]
extern "C" {
    /// Duck-typed RPC connection supplied by the host application.
    pub type JsChainEndpoint;

    #[wasm_bindgen(method, catch, js_name = getMinimumBalanceForRentExemption)]
    fn js_minimum_balance(this: &JsChainEndpoint, space: f64) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getLatestBlockhash)]
    fn js_latest_blockhash(this: &JsChainEndpoint) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = sendRawTransaction)]
    fn js_send_raw_transaction(
        this: &JsChainEndpoint,
        transaction: &[u8],
        options: &JsValue,
    ) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = confirmTransaction)]
    fn js_confirm_transaction(
        this: &JsChainEndpoint,
        signature: &str,
        commitment: &str,
    ) -> Result<js_sys::Promise, JsValue>;
}

fn get_field(value: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(value, &JsValue::from_str(key)).ok()
}

#[async_trait(?Send)]
impl ChainEndpoint for JsChainEndpoint {
    async fn minimum_balance_for_rent_exemption(&self, space: u64) -> Result<u64, EndpointError> {
        let promise = self
            .js_minimum_balance(space as f64)
            .map_err(|e| EndpointError::RentLookup(js_error_message(&e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| EndpointError::RentLookup(js_error_message(&e)))?;
        let lamports = value
            .as_f64()
            .ok_or_else(|| EndpointError::RentLookup("non-numeric rent balance".to_string()))?;
        Ok(lamports as u64)
    }

    async fn latest_blockhash(&self) -> Result<Hash, EndpointError> {
        let promise = self
            .js_latest_blockhash()
            .map_err(|e| EndpointError::Blockhash(js_error_message(&e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| EndpointError::Blockhash(js_error_message(&e)))?;

        // Either a bare base58 string or web3.js' { blockhash, … } object.
        let blockhash_str = value
            .as_string()
            .or_else(|| get_field(&value, "blockhash").and_then(|v| v.as_string()))
            .ok_or_else(|| EndpointError::Blockhash("missing blockhash".to_string()))?;

        blockhash_str
            .parse()
            .map_err(|_| EndpointError::Blockhash(format!("invalid blockhash: {}", blockhash_str)))
    }

    async fn send_transaction(&self, transaction: &[u8]) -> Result<String, EndpointError> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(
            &options,
            &JsValue::from_str("skipPreflight"),
            &JsValue::FALSE,
        )
        .map_err(|_| EndpointError::Send("failed to set skipPreflight".to_string()))?;
        js_sys::Reflect::set(
            &options,
            &JsValue::from_str("preflightCommitment"),
            &JsValue::from_str("confirmed"),
        )
        .map_err(|_| EndpointError::Send("failed to set preflightCommitment".to_string()))?;

        let promise = self
            .js_send_raw_transaction(transaction, &options)
            .map_err(|e| EndpointError::Send(js_error_message(&e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| EndpointError::Send(js_error_message(&e)))?;
        value
            .as_string()
            .ok_or_else(|| EndpointError::Send("non-string signature".to_string()))
    }

    async fn confirm_transaction(
        &self,
        signature: &str,
    ) -> Result<TransactionStatus, EndpointError> {
        let promise = self
            .js_confirm_transaction(signature, "confirmed")
            .map_err(|e| EndpointError::Confirm(js_error_message(&e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| EndpointError::Confirm(js_error_message(&e)))?;

        // web3.js nests the status under `value`; accept a flat object too.
        let status = get_field(&value, "value").filter(|v| !v.is_undefined() && !v.is_null());
        let status = status.as_ref().unwrap_or(&value);

        let err = match get_field(status, "err") {
            Some(err) if !err.is_null() && !err.is_undefined() => Some(js_error_message(&err)),
            _ => None,
        };
        Ok(TransactionStatus { err })
    }
}
