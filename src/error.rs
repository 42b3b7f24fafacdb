use thiserror::Error;

/// Faults raised while wiring the enhancements onto a page.
///
/// Queries that simply match nothing are not errors; each behavior is a
/// no-op for an empty element set.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("failed to create intersection observer: {0}")]
    Observer(String),
    #[error("invalid enhancement config: {0}")]
    Config(String),
}

impl From<EnhanceError> for wasm_bindgen::JsValue {
    fn from(err: EnhanceError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Failure of an API call. Network errors and unparseable response bodies
/// both surface as `Request`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Request(#[from] gloo_net::Error),
}

/// Hands the failure back to JS as an `Error`. A JS-side failure such as the
/// fetch `TypeError` keeps its original name and message.
impl From<ApiError> for wasm_bindgen::JsValue {
    fn from(err: ApiError) -> Self {
        let js_error = match &err {
            ApiError::Request(gloo_net::Error::JsError(js)) => {
                let js_error = web_sys::js_sys::Error::new(&js.message);
                js_error.set_name(&js.name);
                js_error
            }
            _ => web_sys::js_sys::Error::new(&err.to_string()),
        };
        js_error.into()
    }
}
