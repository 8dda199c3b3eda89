//! Captured path parameters.
//!
//! Parameters are keyed by the order in which they were consumed during
//! dispatch (0, 1, 2, ...), not by name: patterns declare them positionally.
//! The dispatcher stores them in the request extensions; handlers read them
//! back with [`path_params`] or [`RequestParamsExt`].

use axum::http::Request;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::routing::converter::ParamValue;

/// Ordered index → value map of converted path parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PathParams(BTreeMap<usize, ParamValue>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the next parameter in consumption order.
    pub(crate) fn push(&mut self, value: ParamValue) {
        let index = self.0.len();
        self.0.insert(index, value);
    }

    pub fn get(&self, index: usize) -> Option<&ParamValue> {
        self.0.get(&index)
    }

    /// The parameter at `index`, if it was converted to an integer.
    pub fn int(&self, index: usize) -> Option<i64> {
        self.get(index).and_then(ParamValue::as_int)
    }

    /// The parameter at `index`, if it was converted to a string.
    pub fn str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(ParamValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ParamValue)> {
        self.0.iter().map(|(i, v)| (*i, v))
    }
}

/// Parameters captured for `req`, or an empty map if none were attached.
pub fn path_params<B>(req: &Request<B>) -> PathParams {
    req.extensions().get::<PathParams>().cloned().unwrap_or_default()
}

/// Extension trait for reading captured parameters off a request.
pub trait RequestParamsExt {
    fn path_params(&self) -> Option<&PathParams>;
}

impl<B> RequestParamsExt for Request<B> {
    fn path_params(&self) -> Option<&PathParams> {
        self.extensions().get::<PathParams>()
    }
}
