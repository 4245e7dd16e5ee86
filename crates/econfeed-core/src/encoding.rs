//! Percent-encoding for path segments and query values.
//!
//! Colons survive encoding untouched because tickers embed `symbol:exchange`.
//! Commas are only ever emitted as the list separator and are never escaped.

use std::borrow::Cow;

/// A scalar or list parameter, as accepted by resource call-sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    One(String),
    Many(Vec<String>),
}

impl Param {
    /// Percent-encode the parameter. Lists are encoded element-wise and comma-joined.
    pub fn encode(&self) -> String {
        match self {
            Self::One(value) => encode_value(value),
            Self::Many(values) => encode_list(values),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(value) => value.is_empty(),
            Self::Many(values) => values.is_empty(),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&String> for Param {
    fn from(value: &String) -> Self {
        Self::One(value.clone())
    }
}

impl<T: Into<String>> From<Vec<T>> for Param {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

impl<T: AsRef<str>> From<&[T]> for Param {
    fn from(values: &[T]) -> Self {
        Self::Many(values.iter().map(|v| v.as_ref().to_owned()).collect())
    }
}

impl<T: AsRef<str>, const N: usize> From<[T; N]> for Param {
    fn from(values: [T; N]) -> Self {
        Self::Many(values.iter().map(|v| v.as_ref().to_owned()).collect())
    }
}

/// Percent-encode a single value, leaving `:` unescaped.
pub fn encode_value(value: &str) -> String {
    match urlencoding::encode(value) {
        Cow::Borrowed(unchanged) => unchanged.to_owned(),
        Cow::Owned(encoded) => encoded.replace("%3A", ":"),
    }
}

/// Encode each element and join with a literal comma.
pub fn encode_list<T: AsRef<str>>(values: &[T]) -> String {
    values
        .iter()
        .map(|value| encode_value(value.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Cartesian `symbol:category` encoding used by resources addressed by pairs.
///
/// Every element is percent-encoded; the `:` joining a pair and the `,`
/// joining pairs are left as-is.
pub fn encode_pairs(symbols: impl Into<Param>, categories: impl Into<Param>) -> String {
    let symbols = symbols.into().into_vec();
    let categories = categories.into().into_vec();

    let mut pairs = Vec::with_capacity(symbols.len() * categories.len());
    for symbol in &symbols {
        for category in &categories {
            pairs.push(format!(
                "{}:{}",
                encode_value(symbol),
                encode_value(category)
            ));
        }
    }
    pairs.join(",")
}
