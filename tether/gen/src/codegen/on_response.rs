//! Renders response steps into the body of `on_response`.

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::codegen::{type_tokens, write_expr};
use crate::errors::GeneratorError;
use crate::planner::{BindingPlan, BodyConversion, ResponseStep, StatusProjection};

/// Generates the `on_response` method of a helper impl.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` when a field name or type in the
/// plan cannot be rendered as Rust.
pub fn generate_on_response(plan: &BindingPlan, rt: &TokenStream) -> Result<TokenStream, GeneratorError> {
    let target = type_tokens(&plan.target_type)?;
    let statements = render_steps(&plan.response, rt)?;

    Ok(quote! {
        #[allow(unused_variables, unused_mut)]
        fn on_response<C: #rt::Converter>(
            &self,
            mut action: #target,
            response: &#rt::Response,
            converter: &C,
        ) -> ::core::result::Result<#target, C::Error> {
            #(#statements)*
        }
    })
}

fn render_steps(steps: &[ResponseStep], rt: &TokenStream) -> Result<Vec<TokenStream>, GeneratorError> {
    steps.iter().map(|step| render_step(step, rt)).collect()
}

fn render_step(step: &ResponseStep, rt: &TokenStream) -> Result<TokenStream, GeneratorError> {
    let tokens = match step {
        ResponseStep::AssignStatus {
            target,
            projection,
            optional,
        } => {
            let place = write_expr(target)?;
            let value = match projection {
                StatusProjection::Successful => quote! { response.is_successful() },
                StatusProjection::Integral(ty) => {
                    let ty = type_tokens(ty)?;
                    quote! { response.status as #ty }
                }
                StatusProjection::Long(ty) => {
                    let ty = type_tokens(ty)?;
                    quote! { <#ty>::from(response.status) }
                }
                StatusProjection::Decimal => quote! { response.status.to_string() },
            };
            let value = wrap_optional(value, *optional);
            quote! { #place = #value; }
        }
        ResponseStep::DispatchBody { branches, fallback } => {
            let fallback = render_steps(fallback, rt)?;
            let mut chain = (!fallback.is_empty()).then(|| quote! { { #(#fallback)* } });
            for branch in branches.iter().rev() {
                let status = Literal::u16_unsuffixed(branch.status);
                let steps = render_steps(&branch.steps, rt)?;
                chain = Some(match chain {
                    Some(rest) => quote! {
                        if response.status == #status { #(#steps)* } else #rest
                    },
                    None => quote! {
                        if response.status == #status { #(#steps)* }
                    },
                });
            }
            chain.unwrap_or_default()
        }
        ResponseStep::AssignBody {
            target,
            conversion,
            optional,
        } => {
            let place = write_expr(target)?;
            let value = match conversion {
                BodyConversion::Raw => quote! { response.body.clone() },
                BodyConversion::Text => quote! { response.body.to_string() },
                BodyConversion::Convert(ty) => {
                    let ty = type_tokens(ty)?;
                    quote! { converter.from_body::<#ty>(&response.body)? }
                }
            };
            let value = wrap_optional(value, *optional);
            quote! { #place = #value; }
        }
        ResponseStep::BuildHeaderMap => quote! {
            let mut headers = #rt::HeaderMap::new();
            for header in &response.headers {
                headers.insert(&header.name, &header.value);
            }
        },
        ResponseStep::AssignHeader { target, name } => {
            let place = write_expr(target)?;
            quote! { #place = headers.make(#name); }
        }
        ResponseStep::ReturnAction => quote! { Ok(action) },
    };
    Ok(tokens)
}

fn wrap_optional(value: TokenStream, optional: bool) -> TokenStream {
    if optional {
        quote! { Some(#value) }
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;
    use crate::test_utils::{
        assert_code_contains, child_action, etag_action, format_generated_code, squash,
        status_bodies_action,
    };
    use tether_define::{ActionDescriptor, FieldType, HttpMethod, Marker};

    fn render(action: &ActionDescriptor) -> String {
        let plan = plan(action).unwrap();
        let tokens = generate_on_response(&plan, &quote! { ::tether_runtime }).unwrap();
        format_generated_code(&quote! { impl X { #tokens } }).unwrap()
    }

    #[test]
    fn catch_all_body_only_runs_when_no_status_matched() {
        let code = squash(&render(&status_bodies_action()));
        let expected = squash(
            "if response.status == 200 {
                action.ok = Some(converter.from_body::<User>(&response.body)?);
            } else {
                action.err = Some(converter.from_body::<ApiError>(&response.body)?);
            }",
        );
        assert!(code.contains(&expected), "unexpected dispatch in:\n{code}");
        assert_eq!(code.matches("ifresponse.status").count(), 1);
    }

    #[test]
    fn several_statuses_chain_without_fallback() {
        let action = ActionDescriptor::new("crate::A", HttpMethod::Get, "/a")
            .with_field("ok", FieldType::optional("User"), Marker::response_status(200))
            .with_field("gone", FieldType::optional("String"), Marker::response_status(410));
        let code = squash(&render(&action));
        let expected = squash(
            "if response.status == 200 {
                action.ok = Some(converter.from_body::<User>(&response.body)?);
            } else if response.status == 410 {
                action.gone = Some(response.body.to_string());
            }",
        );
        assert!(code.contains(&expected), "unexpected dispatch in:\n{code}");
        assert!(!code.contains("else{"));
    }

    #[test]
    fn header_map_built_before_extraction() {
        let code = squash(&render(&etag_action()));
        let map = code.find(&squash("let mut headers = ::tether_runtime::HeaderMap::new();")).unwrap();
        let insert = code.find(&squash("headers.insert(&header.name, &header.value);")).unwrap();
        let etag = code.find(&squash(r#"action.etag = headers.make("ETag");"#)).unwrap();
        assert!(map < insert && insert < etag);
    }

    #[test]
    fn no_header_map_without_response_headers() {
        let code = render(&status_bodies_action());
        assert!(!code.contains("HeaderMap"));
    }

    #[test]
    fn inherited_status_is_written_through_as_mut() {
        let code = render(&child_action());
        assert_code_contains(&code, "::core::convert::AsMut::<crate::ParentAction>::as_mut(&mut action");
        assert_code_contains(&code, ".code = response.status as i32;");
    }

    #[test]
    fn status_projections() {
        let action = ActionDescriptor::new("crate::A", HttpMethod::Get, "/a")
            .with_field("ok", FieldType::required("bool"), Marker::Status)
            .with_field("wide", FieldType::optional("i64"), Marker::Status)
            .with_field("text", FieldType::required("String"), Marker::Status);
        let code = render(&action);
        assert_code_contains(&code, "action.ok = response.is_successful();");
        assert_code_contains(&code, "action.wide = Some(<i64>::from(response.status));");
        assert_code_contains(&code, "action.text = response.status.to_string();");
    }

    #[test]
    fn raw_and_text_bodies_skip_the_converter() {
        let action = ActionDescriptor::new("crate::A", HttpMethod::Get, "/a")
            .with_field("raw", FieldType::required("ActionBody"), Marker::response())
            .with_field("text", FieldType::optional("String"), Marker::response());
        let code = render(&action);
        assert_code_contains(&code, "action.raw = response.body.clone();");
        assert_code_contains(&code, "action.text = Some(response.body.to_string());");
        assert!(!code.contains("from_body"));
    }

    #[test]
    fn nested_generics_are_preserved_in_reification() {
        let action = ActionDescriptor::new("crate::A", HttpMethod::Get, "/a").with_field(
            "items",
            FieldType::parse("Option<HashMap<String, Vec<Item>>>"),
            Marker::response(),
        );
        let code = render(&action);
        assert_code_contains(&code, "converter.from_body::<HashMap<String, Vec<Item>>>(&response.body)?");
    }
}
