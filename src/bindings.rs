//! Compile-time field descriptors and the per-call field map.
//!
//! `#[derive(FormBind)]` replaces runtime type inspection with a static
//! descriptor table: one [`FieldBinding`] per struct field, in declaration
//! order. The binder walks a map built from that table on every call; nothing
//! is cached between calls.

use std::collections::HashMap;
use std::fmt;

use crate::errors::BindError;
use crate::source::ParamSource;

/// A struct whose fields can be populated from request parameters.
///
/// Implemented via `#[derive(FormBind)]`; hand-written implementations are
/// possible when a field needs a custom `apply` routine. The derive rejects
/// enums, unions, and tuple structs at compile time, so every implementor is
/// guaranteed to be a named-field struct.
///
/// The `'static` bound lets `BINDINGS` hold a `&'static` table; binding
/// targets are plain data structs, so it excludes nothing in practice.
pub trait FormBind: Sized + 'static {
    /// Field descriptors in declaration order, one per field.
    const BINDINGS: &'static [FieldBinding<Self>];

    /// Bind this value in place from `source`.
    ///
    /// Convenience wrapper around [`bind`](crate::bind).
    fn bind_from<S>(&mut self, source: &mut S) -> Result<(), BindError>
    where
        S: ParamSource + ?Sized,
    {
        crate::bind(source, self)
    }
}

/// Descriptor for a single bindable field.
///
/// Carries the external parameter name, the field identifier (for error
/// messages), the coercion kind, the typed option list, and the `apply`
/// routine that converts a decoded string and writes it in place.
pub struct FieldBinding<T: ?Sized> {
    /// External parameter name; empty for fields without a `#[param]` attribute
    pub param: &'static str,
    /// Field identifier as declared on the struct
    pub field: &'static str,
    /// Coercion strategy for the field's declared type
    pub kind: FieldKind,
    /// Options from the annotation's trailing comma segments
    pub options: &'static [FieldOption],
    /// Convert a decoded value and write it into the target field.
    ///
    /// Called only with a non-empty, percent-decoded value. Integer, boolean,
    /// and float parse failures leave the field untouched and return `Ok`;
    /// time-format exhaustion and unsupported types return an error.
    pub apply: fn(&mut T, &str) -> Result<(), BindError>,
}

impl<T: ?Sized> FieldBinding<T> {
    /// Whether the annotation carries the given option.
    pub fn has_option(&self, option: FieldOption) -> bool {
        self.options.contains(&option)
    }

    /// The `default:` option value, when present.
    pub fn default_value(&self) -> Option<&'static str> {
        self.options.iter().find_map(|option| match option {
            FieldOption::Default(value) => Some(*value),
            _ => None,
        })
    }
}

impl<T: ?Sized> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("param", &self.param)
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("options", &self.options)
            .finish()
    }
}

/// Coercion strategy derived from a field's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `String`, assigned verbatim post-decode
    Str,
    /// Signed integer (`i8` through `i64`, `isize`), base-10
    Int,
    /// `bool`, via the boolean-literal parser
    Bool,
    /// `f32`
    Float32,
    /// `f64`
    Float64,
    /// `chrono::DateTime<Utc>`, via the timestamp-format ladder
    Time,
    /// Any other declared type; errors when a value is present
    Unsupported,
}

/// Typed option from the annotation's trailing comma segments.
///
/// The original tag syntax reserved everything after the first comma; here
/// the segments are recognized at derive time and unknown ones are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOption {
    /// Never write this field
    Skip,
    /// A missing or empty parameter value is an error for this field
    Required,
    /// Literal to run through the decode-and-coerce path when the parameter
    /// is missing or empty
    Default(&'static str),
}

/// Build the parameter-name-to-descriptor map for one binding call.
///
/// Walks `BINDINGS` in declaration order; a duplicate parameter name shadows
/// the earlier field (last-declared-wins), which also collapses multiple
/// unannotated fields under the empty key. Infallible, O(field count).
pub(crate) fn field_map<T: FormBind>() -> HashMap<&'static str, usize> {
    let mut map = HashMap::with_capacity(T::BINDINGS.len());
    for (index, binding) in T::BINDINGS.iter().enumerate() {
        map.insert(binding.param, index);
    }
    map
}
