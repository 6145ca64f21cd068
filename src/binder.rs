//! The bind pipeline: materialize, map, coerce, write.

use tracing::{debug, trace};

use crate::bindings::{field_map, FieldBinding, FieldOption, FormBind};
use crate::coerce::decode_component;
use crate::errors::BindError;
use crate::source::ParamSource;

/// Populate `target`'s fields from the parameters in `source`.
///
/// The source is materialized first if it has not been already. Each mapped
/// parameter is then fetched, percent-decoded, converted to the field's
/// declared type, and written in place. A missing or empty value leaves the
/// field at its prior value (unless the field carries a `required` or
/// `default:` option); integer, boolean, and float parse failures are
/// swallowed the same way.
///
/// # Arguments
///
/// * `source` - Parameter lookup, query string before form body
/// * `target` - Struct to populate in place
///
/// # Returns
///
/// `Ok(())` on full success, or the first error encountered. Fields written
/// before a failure keep their new values; there is no rollback.
pub fn bind<S, T>(source: &mut S, target: &mut T) -> Result<(), BindError>
where
    S: ParamSource + ?Sized,
    T: FormBind,
{
    if !source.is_materialized() {
        source
            .materialize()
            .map_err(|source| BindError::Materialize { source })?;
    }
    let map = field_map::<T>();
    debug!(
        fields = T::BINDINGS.len(),
        mapped = map.len(),
        "binding request parameters"
    );
    for (param, index) in map {
        let binding = &T::BINDINGS[index];
        if binding.has_option(FieldOption::Skip) {
            trace!(field = binding.field, "field marked skip");
            continue;
        }
        match source.value(param).filter(|value| !value.is_empty()) {
            Some(raw) => apply_decoded(binding, target, raw)?,
            None => {
                if let Some(default) = binding.default_value() {
                    trace!(field = binding.field, default, "applying default value");
                    apply_decoded(binding, target, default)?;
                } else if binding.has_option(FieldOption::Required) {
                    return Err(BindError::MissingParameter {
                        param: param.to_string(),
                        field: binding.field,
                    });
                } else {
                    trace!(field = binding.field, param, "parameter absent, field unchanged");
                }
            }
        }
    }
    Ok(())
}

fn apply_decoded<T: FormBind>(
    binding: &FieldBinding<T>,
    target: &mut T,
    raw: &str,
) -> Result<(), BindError> {
    let decoded = decode_component(raw).map_err(|source| BindError::Decode {
        param: binding.param.to_string(),
        source,
    })?;
    trace!(
        field = binding.field,
        kind = ?binding.kind,
        "applying parameter value"
    );
    (binding.apply)(target, &decoded)
}
