//! Pre-flight checks for write operations.
//!
//! Validation always runs before the network call: a failed check
//! guarantees no request was issued and no local state changed.

use crate::error::{Error, MarshalError, ValidationError};
use crate::model::{Property, Value};

/// Checks that a value may be stored under the given property.
///
/// The property must carry a declared data type (properties built with
/// [`Property::reference`] need [`Property::with_data_type`] or a fetch
/// first), the declared type must have an encoder, and the value's concrete
/// type must match the declaration.
pub fn check_value_type(value: &Value, property: &Property) -> Result<(), Error> {
    let declared = property
        .data_type
        .ok_or(ValidationError::MissingDataType {
            property: property.id,
        })?;

    if !declared.is_supported() {
        return Err(MarshalError::UnsupportedValueType {
            data_type: declared.discriminator(),
        }
        .into());
    }

    let actual = value.data_type();
    if !declared.accepts(actual) {
        return Err(ValidationError::TypeMismatch {
            property: property.id,
            expected: declared,
            actual,
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{DataType, EntityId, Quantity};

    fn prop(data_type: Option<DataType>) -> Property {
        let mut property = Property::reference(EntityId::property(1)).unwrap();
        property.data_type = data_type;
        property
    }

    #[test]
    fn test_matching_type_passes() {
        let property = prop(Some(DataType::Quantity));
        assert!(check_value_type(&Value::from(Quantity::new(1)), &property).is_ok());
    }

    #[test]
    fn test_mismatch_is_rejected() {
        let property = prop(Some(DataType::Quantity));
        let err = check_value_type(&Value::from("text"), &property).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::TypeMismatch {
                expected: DataType::Quantity,
                actual: DataType::String,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_declaration_is_rejected() {
        let property = prop(None);
        let err = check_value_type(&Value::from("text"), &property).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingDataType { .. })
        ));
    }

    #[test]
    fn test_unsupported_declared_type_is_rejected() {
        let property = prop(Some(DataType::Time));
        let err = check_value_type(&Value::from("text"), &property).unwrap_err();
        assert!(matches!(
            err,
            Error::Marshal(MarshalError::UnsupportedValueType { data_type: "time" })
        ));
    }
}
