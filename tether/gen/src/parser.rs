//! Path template handling.
//!
//! Templates use `{name}` placeholders. A template is readable when every
//! `{` is closed by a `}` before the next `{`, and no `}` appears unopened.

/// Extracts placeholder names from a path template.
///
/// ## Examples
///
/// ```
/// use tether_gen::parser::extract_path_params;
///
/// assert_eq!(extract_path_params("/users"), vec![] as Vec<&str>);
/// assert_eq!(extract_path_params("/users/{user}/repos"), vec!["user"]);
/// assert_eq!(
///     extract_path_params("/repos/{owner}/{repo}/issues"),
///     vec!["owner", "repo"]
/// );
/// ```
pub fn extract_path_params(path: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = None;

    for (idx, c) in path.char_indices() {
        if c == '{' {
            start = Some(idx + 1);
        } else if c == '}' {
            if let Some(from) = start.take() {
                let param = &path[from..idx];
                if !param.is_empty() {
                    params.push(param);
                }
            }
        }
    }

    params
}

/// Checks that braces in a path template are balanced and not nested.
///
/// ## Errors
///
/// Returns a description of the first problem found.
///
/// ```
/// use tether_gen::parser::check_path_template;
///
/// assert!(check_path_template("/users/{user}").is_ok());
/// assert!(check_path_template("/users/{user").is_err());
/// assert!(check_path_template("/users/user}").is_err());
/// assert!(check_path_template("/a/{b{c}}").is_err());
/// ```
pub fn check_path_template(path: &str) -> Result<(), String> {
    let mut open: Option<usize> = None;

    for (idx, c) in path.char_indices() {
        match c {
            '{' if open.is_some() => {
                return Err(format!("nested '{{' at offset {idx} in path template '{path}'"));
            }
            '{' => open = Some(idx),
            '}' if open.is_none() => {
                return Err(format!("unopened '}}' at offset {idx} in path template '{path}'"));
            }
            '}' => open = None,
            _ => {}
        }
    }

    match open {
        Some(idx) => Err(format!("unclosed '{{' at offset {idx} in path template '{path}'")),
        None => Ok(()),
    }
}

/// Whether the template contains a `{name}` placeholder.
pub fn has_placeholder(path: &str, name: &str) -> bool {
    extract_path_params(path).contains(&name)
}
