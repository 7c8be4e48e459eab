//! Assembles a helper: the unit struct plus its `ActionHelper` impl.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::codegen::{EmitterConfig, generate_fill_request, generate_on_response, type_tokens};
use crate::errors::GeneratorError;
use crate::planner::BindingPlan;

/// Generates the complete helper item for one plan.
///
/// The helper is named `<SimpleName><suffix>` and implements the runtime's
/// `ActionHelper` for the action type.
///
/// The emitted file is mounted as a child module of the action's module and
/// glob-imports its parent, so field types written unqualified next to the
/// action, and private fields, resolve the same way they do there.
///
/// ## Errors
///
/// Returns `GeneratorError::ConfigError` for an unusable runtime path and
/// `GeneratorError::CodeGenError` when the plan cannot be rendered.
pub fn generate_helper(plan: &BindingPlan, config: &EmitterConfig) -> Result<TokenStream, GeneratorError> {
    let rt = config.runtime_tokens()?;
    let target = type_tokens(&plan.target_type)?;
    let helper = format_ident!("{}{}", plan.simple_name, config.helper_suffix);
    let doc = format!(
        " Tether compile time, autogenerated helper which fills `{}`.",
        plan.simple_name
    );

    let fill_request = generate_fill_request(plan, &rt)?;
    let on_response = generate_on_response(plan, &rt)?;

    Ok(quote! {
        #[allow(unused_imports)]
        use super::*;

        #[doc = #doc]
        pub struct #helper;

        impl #rt::ActionHelper<#target> for #helper {
            #fill_request

            #on_response
        }
    })
}
