//! Renders request steps into the body of `fill_request`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::codegen::{read_expr, type_tokens};
use crate::errors::GeneratorError;
use crate::planner::{BindingPlan, FieldRef, PartBody, RequestStep};

/// Generates the `fill_request` method of a helper impl.
///
/// `rt` is the runtime crate path the emitted code names its types through.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` when a field name or type in the
/// plan cannot be rendered as Rust.
pub fn generate_fill_request(plan: &BindingPlan, rt: &TokenStream) -> Result<TokenStream, GeneratorError> {
    let target = type_tokens(&plan.target_type)?;
    let statements = plan
        .request
        .iter()
        .map(|step| render_step(step, None, rt))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(quote! {
        #[allow(unused_variables)]
        fn fill_request<'b, B: #rt::RequestBuilder>(
            &self,
            request_builder: &'b mut B,
            action: &#target,
        ) -> &'b mut B {
            #(#statements)*
        }
    })
}

/// Renders one step. `bound` is the name of the unwrapped value when the
/// step runs inside a presence check.
fn render_step(
    step: &RequestStep,
    bound: Option<&TokenStream>,
    rt: &TokenStream,
) -> Result<TokenStream, GeneratorError> {
    let value = |field: &FieldRef| match bound {
        Some(bound) => Ok(bound.clone()),
        None => read_expr(field),
    };

    let tokens = match step {
        RequestStep::SetMethod(method) => {
            let variant = format_ident!("{}", method.variant_name());
            quote! { request_builder.set_method(#rt::HttpMethod::#variant); }
        }
        RequestStep::SetRequestVariant(variant) => {
            let variant = format_ident!("{}", variant.variant_name());
            quote! { request_builder.set_request_variant(#rt::RequestVariant::#variant); }
        }
        RequestStep::SetPath(path) => quote! { request_builder.set_path(#path); },
        RequestStep::IfPresent { field, step } => {
            let read = read_expr(field)?;
            let inner = render_step(step, Some(&quote! { value }), rt)?;
            quote! {
                if let Some(value) = &#read {
                    #inner
                }
            }
        }
        RequestStep::AddPathParam {
            field,
            name,
            encode,
        } => {
            let value = value(field)?;
            quote! { request_builder.add_path_param(#name, #value.to_string(), #encode); }
        }
        RequestStep::AddPart {
            field,
            name,
            body,
            encoding,
        } => {
            let value = value(field)?;
            let body = match body {
                PartBody::File => quote! { #rt::ActionBody::file(#encoding, #value.clone()) },
                PartBody::Bytes => quote! { #rt::ActionBody::bytes(#encoding, #value.clone()) },
                PartBody::StringBytes => {
                    quote! { #rt::ActionBody::bytes(#encoding, #value.as_bytes().to_vec()) }
                }
                PartBody::AsIs => {
                    quote! { ::core::convert::Into::<#rt::ActionBody>::into(#value.clone()) }
                }
            };
            quote! {
                let http_body = #body;
                request_builder.add_part(#name, http_body, #encoding);
            }
        }
        RequestStep::AddHeader { field, name } => {
            let value = value(field)?;
            quote! { request_builder.add_header(#name, #value.to_string()); }
        }
        RequestStep::AddField { field, name } => {
            let value = value(field)?;
            quote! { request_builder.add_field(#name, #value.to_string()); }
        }
        RequestStep::AddQueryParam {
            field,
            name,
            encode_name,
            encode_value,
        } => {
            let value = value(field)?;
            quote! {
                request_builder.add_query_param(#name, #value.to_string(), #encode_name, #encode_value);
            }
        }
        RequestStep::SetBody { field, optional } => {
            let read = read_expr(field)?;
            if *optional {
                quote! { request_builder.set_body(#read.as_ref()); }
            } else {
                quote! { request_builder.set_body(Some(&#read)); }
            }
        }
        RequestStep::SetRawBody { field, optional } => {
            let read = read_expr(field)?;
            if *optional {
                quote! { request_builder.set_raw_body(#read.clone()); }
            } else {
                quote! { request_builder.set_raw_body(Some(#read.clone())); }
            }
        }
        RequestStep::ReturnBuilder => quote! { request_builder },
    };
    Ok(tokens)
}
