use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::ClientError;
use crate::types::HttpReply;

/// Posts a JSON body and hands back the raw reply. Status interpretation is
/// left to the caller.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, ClientError>;
}

/// `window.fetch` backed transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, ClientError> {
        let headers = web_sys::Headers::new()?;
        headers.set("Content-Type", "application/json")?;

        let opts = web_sys::RequestInit::new();
        opts.set_method("POST");
        opts.set_headers(&headers);
        opts.set_body(&JsValue::from_str(&body));

        let request = web_sys::Request::new_with_str_and_init(url, &opts)?;
        let window = web_sys::window()
            .ok_or_else(|| ClientError::Transport("window not available".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: web_sys::Response = resp_value.dyn_into()?;
        let status = resp.status();
        let text = JsFuture::from(resp.text()?).await?;
        let body = text.as_string().unwrap_or_else(|| format!("{:?}", text));

        Ok(HttpReply { status, body })
    }
}
