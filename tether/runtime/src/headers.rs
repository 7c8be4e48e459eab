//! The header mapping response-header extraction reads from.
//!
//! Repeated header names collapse to a single entry: the last value observed
//! wins, and the entry keeps the position of the first occurrence. Names are
//! matched exactly (case-sensitive).

use crate::response::Header;

/// Ordered, single-valued view of response headers.
///
/// ## Examples
///
/// ```
/// use tether_runtime::{Header, HeaderMap};
///
/// let headers = HeaderMap::from_headers(&[
///     Header::new("X-Count", "1"),
///     Header::new("X-Count", "2"),
/// ]);
/// let count: u32 = headers.make("X-Count");
/// assert_eq!(count, 2);
/// let missing: Option<String> = headers.make("ETag");
/// assert_eq!(missing, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_headers(headers: &[Header]) -> Self {
        let mut map = Self::new();
        for header in headers {
            map.insert(&header.name, &header.value);
        }
        map
    }

    /// Inserts or replaces the value for `name`.
    pub fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Projects the value for `name` into `T`.
    pub fn make<T: FromHeader>(&self, name: &str) -> T {
        T::from_header(self.get(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Conversion from an (optional) header value.
///
/// Non-optional targets fall back to their default when the header is absent
/// or does not parse; `Option<T>` targets yield `None` instead.
pub trait FromHeader: Sized {
    fn from_header(value: Option<&str>) -> Self;
}

impl FromHeader for String {
    fn from_header(value: Option<&str>) -> Self {
        value.map(str::to_string).unwrap_or_default()
    }
}

macro_rules! parsed_from_header {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromHeader for $ty {
                fn from_header(value: Option<&str>) -> Self {
                    value
                        .and_then(|value| value.trim().parse().ok())
                        .unwrap_or_default()
                }
            }
        )*
    };
}

parsed_from_header!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl<T: std::str::FromStr> FromHeader for Option<T> {
    fn from_header(value: Option<&str>) -> Self {
        value.and_then(|value| value.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_names_collapse_to_last_value() {
        let map = HeaderMap::from_headers(&[
            Header::new("Set-Cookie", "a=1"),
            Header::new("Vary", "Accept"),
            Header::new("Set-Cookie", "b=2"),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("Set-Cookie"), Some("b=2"));
        let order: Vec<_> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["Set-Cookie", "Vary"]);
    }

    #[test]
    fn names_match_exactly() {
        let map = HeaderMap::from_headers(&[Header::new("ETag", "v1")]);
        assert_eq!(map.get("etag"), None);
        assert_eq!(map.get("ETag"), Some("v1"));
    }

    #[test]
    fn make_projects_into_target_type() {
        let map = HeaderMap::from_headers(&[
            Header::new("X-Total", " 42 "),
            Header::new("X-Flag", "true"),
            Header::new("X-Bad", "nope"),
        ]);
        assert_eq!(map.make::<i64>("X-Total"), 42);
        assert!(map.make::<bool>("X-Flag"));
        assert_eq!(map.make::<u32>("X-Bad"), 0);
        assert_eq!(map.make::<Option<u32>>("X-Bad"), None);
        assert_eq!(map.make::<Option<u32>>("X-Total"), Some(42));
        assert_eq!(map.make::<String>("Missing"), "");
    }

    #[test]
    fn empty_map() {
        let map = HeaderMap::new();
        assert!(map.is_empty());
        assert_eq!(map.make::<Option<String>>("Anything"), None);
    }
}
