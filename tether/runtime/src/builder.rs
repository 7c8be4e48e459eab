//! The request-builder capability helpers fill.

use serde::Serialize;
use tether_define::{HttpMethod, RequestVariant};

use crate::body::ActionBody;

/// A mutable request under construction.
///
/// Helpers call these in a fixed order: method, variant and path first, then
/// path params, parts, headers, form fields, query params and the body.
pub trait RequestBuilder {
    fn set_method(&mut self, method: HttpMethod);

    fn set_request_variant(&mut self, variant: RequestVariant);

    fn set_path(&mut self, path: &str);

    /// Substitutes `{name}` in the path template.
    fn add_path_param(&mut self, name: &str, value: String, encode: bool);

    fn add_query_param(&mut self, name: &str, value: String, encode_name: bool, encode_value: bool);

    /// Adds a url-encoded form field.
    fn add_field(&mut self, name: &str, value: String);

    fn add_header(&mut self, name: &str, value: String);

    /// Adds a multipart part.
    fn add_part(&mut self, name: &str, body: ActionBody, encoding: &str);

    /// Sets the request body; `None` is passed through as-is.
    fn set_body<T: Serialize + ?Sized>(&mut self, body: Option<&T>);

    /// Sets a body that is already encoded; its bytes go out unchanged.
    fn set_raw_body(&mut self, body: Option<ActionBody>);
}

/// One call received by a [`RecordingBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderCall {
    SetMethod(HttpMethod),
    SetRequestVariant(RequestVariant),
    SetPath(String),
    AddPathParam {
        name: String,
        value: String,
        encode: bool,
    },
    AddQueryParam {
        name: String,
        value: String,
        encode_name: bool,
        encode_value: bool,
    },
    AddField {
        name: String,
        value: String,
    },
    AddHeader {
        name: String,
        value: String,
    },
    AddPart {
        name: String,
        body: ActionBody,
        encoding: String,
    },
    /// The body, serialised to JSON for comparison; `None` when absent.
    SetBody(Option<serde_json::Value>),
    SetRawBody(Option<ActionBody>),
}

/// A [`RequestBuilder`] that records every call in order.
///
/// ## Examples
///
/// ```
/// use tether_runtime::{BuilderCall, HttpMethod, RecordingBuilder, RequestBuilder};
///
/// let mut builder = RecordingBuilder::default();
/// builder.set_method(HttpMethod::Get);
/// builder.set_path("/users/{user}");
/// assert_eq!(builder.calls()[0], BuilderCall::SetMethod(HttpMethod::Get));
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingBuilder {
    calls: Vec<BuilderCall>,
}

impl RecordingBuilder {
    pub fn calls(&self) -> &[BuilderCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<BuilderCall> {
        self.calls
    }
}

impl RequestBuilder for RecordingBuilder {
    fn set_method(&mut self, method: HttpMethod) {
        self.calls.push(BuilderCall::SetMethod(method));
    }

    fn set_request_variant(&mut self, variant: RequestVariant) {
        self.calls.push(BuilderCall::SetRequestVariant(variant));
    }

    fn set_path(&mut self, path: &str) {
        self.calls.push(BuilderCall::SetPath(path.to_string()));
    }

    fn add_path_param(&mut self, name: &str, value: String, encode: bool) {
        self.calls.push(BuilderCall::AddPathParam {
            name: name.to_string(),
            value,
            encode,
        });
    }

    fn add_query_param(&mut self, name: &str, value: String, encode_name: bool, encode_value: bool) {
        self.calls.push(BuilderCall::AddQueryParam {
            name: name.to_string(),
            value,
            encode_name,
            encode_value,
        });
    }

    fn add_field(&mut self, name: &str, value: String) {
        self.calls.push(BuilderCall::AddField {
            name: name.to_string(),
            value,
        });
    }

    fn add_header(&mut self, name: &str, value: String) {
        self.calls.push(BuilderCall::AddHeader {
            name: name.to_string(),
            value,
        });
    }

    fn add_part(&mut self, name: &str, body: ActionBody, encoding: &str) {
        self.calls.push(BuilderCall::AddPart {
            name: name.to_string(),
            body,
            encoding: encoding.to_string(),
        });
    }

    fn set_body<T: Serialize + ?Sized>(&mut self, body: Option<&T>) {
        let value = body.and_then(|body| serde_json::to_value(body).ok());
        self.calls.push(BuilderCall::SetBody(value));
    }

    fn set_raw_body(&mut self, body: Option<ActionBody>) {
        self.calls.push(BuilderCall::SetRawBody(body));
    }
}
