//! Parameter sources: where raw string values come from.
//!
//! A [`ParamSource`] is the binder's view of a request: a lazily materialized
//! key-value store with query-string values taking precedence over
//! form-encoded body values. [`FormRequest`] is the bundled implementation
//! over [`http::Request`]; a plain `HashMap<String, String>` also implements
//! the trait for callers that already hold decoded parameters.

use std::collections::HashMap;

use http::Request;
use tracing::debug;

use crate::coerce::decode_component;
use crate::errors::MaterializeError;

/// Lookup of raw string values by parameter name.
///
/// Materialization happens at most once per binding call, and only when the
/// store has not been built yet. `value` must check query-string values
/// first and form-body values second.
pub trait ParamSource {
    /// Whether the key-value store has been built.
    fn is_materialized(&self) -> bool;

    /// Build the key-value store from the underlying request.
    ///
    /// Must be idempotent; a second call on a materialized source is a no-op.
    fn materialize(&mut self) -> Result<(), MaterializeError>;

    /// Raw (undecoded) value for `name`, query string before form body.
    ///
    /// Returns `None` before materialization and for unknown names.
    fn value(&self, name: &str) -> Option<&str>;
}

/// Parameter source over an [`http::Request`].
///
/// The query string and, for `application/x-www-form-urlencoded` requests,
/// the buffered body are split into a key-value store on first use. Keys are
/// percent-decoded for lookup; values are kept raw, since decoding them is
/// the coercer's job.
#[derive(Debug)]
pub struct FormRequest<B> {
    request: Request<B>,
    store: Option<ParamStore>,
}

#[derive(Debug, Default)]
struct ParamStore {
    query: HashMap<String, String>,
    form: HashMap<String, String>,
}

impl<B: AsRef<[u8]>> FormRequest<B> {
    /// Wrap a request. No parsing happens until the first binding call.
    pub fn new(request: Request<B>) -> Self {
        Self {
            request,
            store: None,
        }
    }

    /// The wrapped request.
    pub fn request(&self) -> &Request<B> {
        &self.request
    }

    /// Unwrap, discarding the materialized store if any.
    pub fn into_inner(self) -> Request<B> {
        self.request
    }

    fn is_form_encoded(&self) -> bool {
        self.request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| {
                value
                    .trim()
                    .to_ascii_lowercase()
                    .starts_with("application/x-www-form-urlencoded")
            })
            .unwrap_or(false)
    }
}

impl<B: AsRef<[u8]>> ParamSource for FormRequest<B> {
    fn is_materialized(&self) -> bool {
        self.store.is_some()
    }

    fn materialize(&mut self) -> Result<(), MaterializeError> {
        if self.store.is_some() {
            return Ok(());
        }
        let mut store = ParamStore::default();
        if let Some(query) = self.request.uri().query() {
            parse_pairs(query, &mut store.query)?;
        }
        if self.is_form_encoded() {
            let body = std::str::from_utf8(self.request.body().as_ref())
                .map_err(|source| MaterializeError::InvalidBodyEncoding { source })?;
            parse_pairs(body, &mut store.form)?;
        }
        debug!(
            query_params = store.query.len(),
            form_params = store.form.len(),
            "parameter store materialized"
        );
        self.store = Some(store);
        Ok(())
    }

    fn value(&self, name: &str) -> Option<&str> {
        let store = self.store.as_ref()?;
        store
            .query
            .get(name)
            .or_else(|| store.form.get(name))
            .map(String::as_str)
    }
}

/// A pre-materialized source for callers that already hold their parameters.
///
/// Values are still run through percent-decoding by the binder, so they
/// should be stored raw.
impl ParamSource for HashMap<String, String> {
    fn is_materialized(&self) -> bool {
        true
    }

    fn materialize(&mut self) -> Result<(), MaterializeError> {
        Ok(())
    }

    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Split `key=value&key=value` pairs into `into`.
///
/// Keys are decoded so lookups match the annotation names; values stay raw.
/// Empty segments are skipped; a segment without `=` yields an empty value.
fn parse_pairs(raw: &str, into: &mut HashMap<String, String>) -> Result<(), MaterializeError> {
    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(key).map_err(|source| MaterializeError::InvalidKey {
            key: key.to_string(),
            source,
        })?;
        into.insert(key, value.to_string());
    }
    Ok(())
}
