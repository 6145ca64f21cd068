//! # formbind
//!
//! **formbind** binds HTTP request parameters (query string or
//! `application/x-www-form-urlencoded` body) into the fields of an annotated
//! Rust struct, giving web-service handlers typed access to request inputs
//! without manual parsing.
//!
//! ## Overview
//!
//! Derive [`FormBind`] on a struct and annotate each field with the external
//! parameter name. [`bind`] then walks the fields, fetches each parameter's
//! raw string value (query string first, form body second), percent-decodes
//! it, converts it to the field's declared type, and writes it in place.
//! Missing or empty values leave fields at their prior values.
//!
//! There is no reflection: the derive emits a static descriptor table per
//! struct, and each binding call builds its parameter map from that table.
//! No state survives between calls, and independent calls on independent
//! targets are safe to run concurrently.
//!
//! ## Architecture
//!
//! - **[`bindings`]** - The [`FormBind`] trait, field descriptors, and the
//!   per-call field map
//! - **[`source`]** - The [`ParamSource`] trait and the [`FormRequest`]
//!   implementation over [`http::Request`]
//! - **[`coerce`]** - Percent-decoding, the boolean-literal parser, and the
//!   timestamp-format ladder
//! - **[`errors`]** - [`BindError`] and [`MaterializeError`]
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{DateTime, Utc};
//! use formbind::{bind, FormBind, FormRequest};
//!
//! #[derive(Default, FormBind)]
//! struct Signup {
//!     #[param("name")]
//!     name: String,
//!     #[param("is_cool")]
//!     is_cool: bool,
//!     #[param("counter")]
//!     counter: i64,
//!     #[param("start")]
//!     start: DateTime<Utc>,
//! }
//!
//! # fn main() -> Result<(), formbind::BindError> {
//! let request = http::Request::builder()
//!     .uri("http://example.com/signup?name=Joe&is_cool=true&counter=1&start=2023-01-02T15:04:05Z")
//!     .body(Vec::new())
//!     .unwrap();
//! let mut source = FormRequest::new(request);
//! let mut signup = Signup::default();
//! bind(&mut source, &mut signup)?;
//! assert_eq!(signup.name, "Joe");
//! assert_eq!(signup.counter, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Supported field types
//!
//! `String`, signed integers (`i8` through `i64`, `isize`), `bool`,
//! `f32`/`f64`, and `chrono::DateTime<Utc>`. A parameter value that fails to
//! parse as an integer, boolean, or float is swallowed and the field keeps
//! its prior value; an unparseable timestamp or an unsupported field type is
//! an error. See [`bind`] for the full contract.

pub mod bindings;
pub mod coerce;
pub mod errors;
pub mod source;

mod binder;

pub use binder::bind;
pub use bindings::{FieldBinding, FieldKind, FieldOption, FormBind};
pub use errors::{BindError, MaterializeError};
pub use source::{FormRequest, ParamSource};

pub use formbind_macros::FormBind;
