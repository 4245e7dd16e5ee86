//! Path and query-string composition.
//!
//! The separator for each appended pair is derived from the string built so
//! far: `?` when it has no query yet, `&` otherwise.

use crate::credential::Credential;
use crate::dates::{detect_format, validate_range, DateRange};
use crate::encoding::{encode_value, Param};
use crate::ValidationError;

pub const START_DATE_KEY: &str = "d1";
pub const END_DATE_KEY: &str = "d2";
pub const CREDENTIAL_KEY: &str = "c";

pub fn separator_for(path: &str) -> char {
    if path.contains('?') {
        '&'
    } else {
        '?'
    }
}

/// Append an already-encoded `key=value` pair.
pub fn append_raw_param(path: &str, key: &str, encoded_value: &str) -> String {
    format!("{path}{}{key}={encoded_value}", separator_for(path))
}

/// Append `key=<encoded value>`.
pub fn append_param(path: &str, key: &str, value: impl Into<Param>) -> String {
    append_raw_param(path, key, &value.into().encode())
}

/// Append `d1`/`d2` date boundaries, validating them first.
///
/// Only `end` without `start` is rejected; both absent leaves `path` unchanged.
pub fn append_date_range(
    path: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<String, ValidationError> {
    match (start, end) {
        (None, None) => Ok(path.to_owned()),
        (None, Some(_)) => Err(ValidationError::EndWithoutStart),
        (Some(start), None) => {
            detect_format(start)?;
            Ok(append_raw_param(path, START_DATE_KEY, &encode_value(start)))
        }
        (Some(start), Some(end)) => {
            let start_format = detect_format(start)?;
            let end_format = detect_format(end)?;
            validate_range(start, start_format, end, end_format)?;
            let with_start = append_raw_param(path, START_DATE_KEY, &encode_value(start));
            Ok(append_raw_param(&with_start, END_DATE_KEY, &encode_value(end)))
        }
    }
}

/// Append the credential as a trailing `c=` pair.
pub fn append_credential(path: &str, credential: &Credential) -> String {
    append_raw_param(path, CREDENTIAL_KEY, &encode_value(credential.as_str()))
}

/// Builder for `/<resource>[/<segment>...][?<query>]` paths.
///
/// ```
/// use econfeed_core::RequestPath;
///
/// let path = RequestPath::new("calendar")
///     .segment("country")
///     .segment(vec!["united states", "china"])
///     .param("importance", "3")
///     .date_range(Some("2016-01-01"), Some("2016-01-03"))
///     .expect("valid range")
///     .render();
///
/// assert_eq!(
///     path,
///     "/calendar/country/united%20states,china?importance=3&d1=2016-01-01&d2=2016-01-03"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
    query: Vec<(String, String)>,
    credential: Option<Credential>,
}

impl RequestPath {
    pub fn new(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self {
            segments: vec![resource.trim_matches('/').to_owned()],
            ..Self::default()
        }
    }

    /// Add an encoded qualifier segment. Scalars encode whole, lists element-wise.
    pub fn segment(mut self, value: impl Into<Param>) -> Self {
        self.segments.push(value.into().encode());
        self
    }

    /// Add a pre-encoded segment, e.g. the output of `encode_pairs`.
    pub fn encoded_segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.query.push((key.into(), value.into().encode()));
        self
    }

    /// Add the parameter only when a value is present.
    pub fn optional_param<V: Into<Param>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Add `d1`/`d2` after validating the range.
    pub fn date_range(
        mut self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let range = DateRange::new(start, end)?;
        if let Some(start) = range.start() {
            self.query
                .push((START_DATE_KEY.to_owned(), encode_value(start)));
        }
        if let Some(end) = range.end() {
            self.query.push((END_DATE_KEY.to_owned(), encode_value(end)));
        }
        Ok(self)
    }

    /// Send the credential in the query string instead of the header.
    pub fn credential_in_query(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn render(&self) -> String {
        let mut path = format!("/{}", self.segments.join("/"));
        for (key, value) in &self.query {
            path = append_raw_param(&path, key, value);
        }
        if let Some(credential) = &self.credential {
            path = append_credential(&path, credential);
        }
        path
    }
}
