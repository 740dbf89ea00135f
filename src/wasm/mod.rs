//! WASM bindings: duck-typed adapters for the injected JavaScript
//! collaborators and the exported `WasmMinter` namespace.

mod endpoint;
mod minter;
mod uploader;
mod wallet;

pub use endpoint::JsChainEndpoint;
pub use minter::WasmMinter;
pub use uploader::JsImageStore;
pub use wallet::JsWalletProvider;

use wasm_bindgen::prelude::*;

/// Best-effort message extraction from a JavaScript exception.
pub(crate) fn js_error_message(err: &JsValue) -> String {
    use wasm_bindgen::JsCast;
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    js_sys::JSON::stringify(err)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}
