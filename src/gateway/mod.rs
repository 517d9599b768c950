pub mod http;

use crate::error::Result;
use reqwest::Method;
use serde_json::Value;

pub use http::HttpGateway;

/// Issues a request and hands back the decoded JSON body.
///
/// Any non-2xx response is an error. A successful response without a body is
/// returned as `Value::Null` so callers can tell it apart from an empty
/// collection.
pub trait Gateway {
    fn request(&self, verb: Method, url: &str, params: &[(&str, String)]) -> Result<Value>;

    fn get(&self, url: &str) -> Result<Value> {
        self.request(Method::GET, url, &[])
    }
}
