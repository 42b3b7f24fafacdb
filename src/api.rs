use std::fmt;
use std::str::FromStr;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::error::ApiError;

pub const CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("unsupported method {}", other)),
        }
    }
}

/// Everything needed to issue one API request, computed before any I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPlan {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: Option<String>,
}

impl RequestPlan {
    /// A body is attached only for non-GET methods with data that is present
    /// and not falsy (`null`, `false`, `0`, `""`).
    pub fn new<B: Serialize + ?Sized>(
        endpoint: &str,
        method: Method,
        data: Option<&B>,
    ) -> Result<Self, ApiError> {
        let body = match data {
            Some(data) if method != Method::Get => {
                let value = serde_json::to_value(data)?;
                if is_falsy(&value) {
                    None
                } else {
                    Some(serde_json::to_string(&value)?)
                }
            }
            _ => None,
        };

        Ok(Self {
            url: endpoint.to_string(),
            method,
            headers: vec![CONTENT_TYPE],
            body,
        })
    }

    fn into_request(self) -> Request {
        let mut request = match self.method {
            Method::Get => Request::get(&self.url),
            Method::Post => Request::post(&self.url),
            Method::Put => Request::put(&self.url),
            Method::Patch => Request::patch(&self.url),
            Method::Delete => Request::delete(&self.url),
        };
        for (name, value) in self.headers {
            request = request.header(name, value);
        }
        if let Some(body) = self.body {
            request = request.body(body);
        }
        request
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Sends a JSON request and parses the JSON response.
///
/// Failures are logged and handed back unchanged; there is no retry.
pub async fn make_api_call<T, B>(endpoint: &str, method: Method, data: Option<&B>) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let result = send_plan(RequestPlan::new(endpoint, method, data)).await;
    if let Err(e) = &result {
        log::error!("API call failed: {} {}: {}", method, endpoint, e);
    }
    result
}

async fn send_plan<T: DeserializeOwned>(plan: Result<RequestPlan, ApiError>) -> Result<T, ApiError> {
    let response = plan?.into_request().send().await?;
    Ok(response.json::<T>().await?)
}

/// `makeAPICall(endpoint, method = "GET", data = null)` for other page scripts.
#[wasm_bindgen(js_name = makeAPICall)]
pub async fn make_api_call_js(endpoint: String, method: Option<String>, data: JsValue) -> Result<JsValue, JsValue> {
    let method = match method {
        Some(m) => m.parse::<Method>().map_err(|e| {
            log::error!("API call failed: {} {}: {}", m, endpoint, e);
            JsValue::from(web_sys::js_sys::Error::new(&e))
        })?,
        None => Method::default(),
    };
    let data: Option<Value> = if data.is_null() || data.is_undefined() {
        None
    } else {
        let value = serde_wasm_bindgen::from_value(data).map_err(|e| {
            log::error!("API call failed: {} {}: {}", method, endpoint, e);
            JsValue::from(e)
        })?;
        Some(value)
    };

    let value: Value = make_api_call(&endpoint, method, data.as_ref()).await?;
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_with_payload_sends_json_body() {
        let payload = json!({ "conversation": "Do you support SSO?" });
        let plan = RequestPlan::new("https://api.example.com/analyze", Method::Post, Some(&payload)).unwrap();

        assert_eq!(plan.method, Method::Post);
        assert_eq!(plan.headers, vec![("Content-Type", "application/json")]);
        let body: Value = serde_json::from_str(plan.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, payload);
    }

    #[test]
    fn default_get_sends_no_body() {
        let plan = RequestPlan::new::<Value>("https://api.example.com/faqs", Method::default(), None).unwrap();

        assert_eq!(plan.method, Method::Get);
        assert_eq!(plan.body, None);
        assert_eq!(plan.headers, vec![CONTENT_TYPE]);
    }

    #[test]
    fn get_ignores_payload() {
        let plan = RequestPlan::new("https://api.example.com/faqs", Method::Get, Some(&json!({"q": 1}))).unwrap();
        assert_eq!(plan.body, None);
    }

    #[test]
    fn null_payload_is_no_payload() {
        let plan = RequestPlan::new("https://api.example.com/x", Method::Delete, Some(&Value::Null)).unwrap();
        assert_eq!(plan.body, None);
    }

    #[test]
    fn typed_payloads_serialize() {
        #[derive(Serialize)]
        struct Search<'a> {
            query: &'a str,
        }
        let plan = RequestPlan::new(
            "https://api.example.com/search",
            Method::Put,
            Some(&Search { query: "pricing" }),
        )
        .unwrap();
        assert_eq!(plan.body.as_deref(), Some(r#"{"query":"pricing"}"#));
    }

    #[test]
    fn endpoint_is_used_as_given() {
        let plan = RequestPlan::new::<Value>("/api/knowledge", Method::Get, None).unwrap();
        assert_eq!(plan.url, "/api/knowledge");
    }

    #[test]
    fn falsy_payloads_send_no_body() {
        for data in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            let plan = RequestPlan::new("/api/analyze", Method::Post, Some(&data)).unwrap();
            assert_eq!(plan.body, None, "payload {}", data);
        }
    }

    #[test]
    fn truthy_scalars_and_empty_containers_send_a_body() {
        for (data, body) in [
            (json!(true), "true"),
            (json!(1), "1"),
            (json!(-0.5), "-0.5"),
            (json!("hi"), r#""hi""#),
            (json!([]), "[]"),
            (json!({}), "{}"),
        ] {
            let plan = RequestPlan::new("/api/analyze", Method::Post, Some(&data)).unwrap();
            assert_eq!(plan.body.as_deref(), Some(body));
        }
    }

    #[test]
    fn method_parsing() {
        assert_eq!("post".parse::<Method>(), Ok(Method::Post));
        assert_eq!("GET".parse::<Method>(), Ok(Method::Get));
        assert!("BREW".parse::<Method>().is_err());
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
