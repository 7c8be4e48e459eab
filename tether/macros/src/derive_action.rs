//! Shared implementation of the `HttpAction` and `ActionBase` derives.

use proc_macro2::TokenStream;
use syn::{Data, DeriveInput, Error, Result, parse2};
use tether_gen::attrs::{ACTION_ATTR, BASE_ATTR, StructRole, parse_marked_struct};
use tether_gen::plan;

/// Which role attribute the derive requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Action,
    Base,
}

pub fn derive_impl(input: TokenStream, expected: Expected) -> TokenStream {
    match derive_inner(input, expected) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn derive_inner(input: TokenStream, expected: Expected) -> Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            name,
            "http markers can only be derived on structs with named fields",
        ));
    };

    let marked = parse_marked_struct(&input.attrs, name, &input.generics, &data.fields)?;
    let Some(marked) = marked else {
        let attr = match expected {
            Expected::Action => ACTION_ATTR,
            Expected::Base => BASE_ATTR,
        };
        return Err(Error::new_spanned(name, format!("missing #[{attr}(...)] on `{name}`")));
    };

    match (&marked.role, expected) {
        (StructRole::Action(_), Expected::Action) | (StructRole::Base { .. }, Expected::Base) => {}
        (StructRole::Action(_), Expected::Base) => {
            return Err(Error::new_spanned(
                name,
                format!("`{name}` is an action; derive HttpAction instead"),
            ));
        }
        (StructRole::Base { .. }, Expected::Action) => {
            return Err(Error::new_spanned(
                name,
                format!("`{name}` is an action base; derive ActionBase instead"),
            ));
        }
    }

    // Inherited fields live in other items and are checked by the generator.
    if let Some(action) = marked.own_descriptor("") {
        plan(&action).map_err(|err| Error::new_spanned(name, err.to_string()))?;
    }

    Ok(TokenStream::new())
}
