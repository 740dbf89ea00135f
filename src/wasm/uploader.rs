//! Bindings for the injected image-storage collaborator and the
//! `setTimeout`-backed retry delay.
//!
//! Uploader shape:
//!
//! ```javascript
//! { upload(bytes: Uint8Array, contentType: string): Promise<string> }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::js_error_message;
use crate::error::UploadError;
use crate::upload::{ImageFile, ImageStore, Sleeper};

#[wasm_bindgen]
extern "C" {
    /// Duck-typed image storage supplied by the host application.
    pub type JsImageStore;

    #[wasm_bindgen(method, catch, js_name = upload)]
    fn js_upload(
        this: &JsImageStore,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<js_sys::Promise, JsValue>;
}

#[async_trait(?Send)]
impl ImageStore for JsImageStore {
    async fn upload(&self, image: &ImageFile) -> Result<String, UploadError> {
        let promise = self
            .js_upload(&image.bytes, &image.content_type)
            .map_err(|e| UploadError(js_error_message(&e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| UploadError(js_error_message(&e)))?;
        value
            .as_string()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| UploadError("storage returned no URL".to_string()))
    }
}

/// Delay source backed by `window.setTimeout`.
pub(crate) struct JsSleeper;

#[async_trait(?Send)]
impl Sleeper for JsSleeper {
    async fn sleep(&self, delay: Duration) {
        let ms = delay.as_millis() as i32;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().and_then(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                    .ok()
            });
            if scheduled.is_none() {
                // No window to schedule on; resolve immediately rather than
                // hang the retry loop.
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}
