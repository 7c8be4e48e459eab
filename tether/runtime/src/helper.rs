//! The capability every generated helper implements.

use crate::builder::RequestBuilder;
use crate::converter::Converter;
use crate::response::Response;

/// Bridges one action type and the request/response runtime.
///
/// Implementations are produced by `tether-gen` as `<Action>Helper` in a
/// child module of the action's module.
pub trait ActionHelper<A> {
    /// Populates `request_builder` from `action` and returns it.
    fn fill_request<'b, B: RequestBuilder>(&self, request_builder: &'b mut B, action: &A) -> &'b mut B;

    /// Hydrates `action` from `response` and returns it.
    ///
    /// ## Errors
    ///
    /// Returns the converter's error when a response body fails to decode.
    fn on_response<C: Converter>(&self, action: A, response: &Response, converter: &C) -> Result<A, C::Error>;
}
