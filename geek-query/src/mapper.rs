//! Building partially-populated entities from raw rows.

use crate::error::{FieldError, RowMappingError};
use crate::metadata::EntityDecl;
use crate::plan::ProjectedField;
use crate::value::{coerce, FieldValue, RawRow, Value};

/// A type the engine can search for and materialize.
pub trait Entity: Sized {
    /// Static metadata declaration of this type.
    fn decl() -> &'static EntityDecl;

    /// A fresh instance with every field at its default.
    fn instantiate() -> Result<Self, RowMappingError>;

    /// Assign one coerced value by logical field name.
    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError>;
}

/// Map `row` onto a new `E`, positionally against `projection`.
///
/// Missing trailing columns count as null. Fields whose value is null,
/// cannot be coerced, or is refused by [`Entity::set_field`] keep their
/// default; only instantiation failure is an error.
pub fn map_row<E: Entity>(projection: &[ProjectedField], row: &RawRow) -> Result<E, RowMappingError> {
    let mut entity = E::instantiate()?;
    let values = row.values();
    for (i, field) in projection.iter().enumerate() {
        let raw = values.get(i).unwrap_or(&Value::Null);
        let Some(value) = coerce(raw, field.ty) else {
            if !raw.is_null() {
                log::trace!(
                    "{}.{}: dropping {} value",
                    E::decl().type_name,
                    field.name,
                    raw.type_name()
                );
            }
            continue;
        };
        if let Err(e) = entity.set_field(&field.name, value) {
            log::trace!("{}: {}", E::decl().type_name, e);
        }
    }
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{FieldDecl, FieldType};

    static WIDGET: EntityDecl = EntityDecl {
        type_name: "Widget",
        table: None,
        parent: None,
        fields: &[
            FieldDecl::new("id", FieldType::Int).id(),
            FieldDecl::new("label", FieldType::Text),
            FieldDecl::new("weight", FieldType::Double),
        ],
    };

    #[derive(Debug, Default, PartialEq)]
    struct Widget {
        id: Option<i32>,
        label: Option<String>,
        weight: Option<f64>,
    }

    impl Entity for Widget {
        fn decl() -> &'static EntityDecl {
            &WIDGET
        }

        fn instantiate() -> Result<Self, RowMappingError> {
            Ok(Self::default())
        }

        fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
            match (field, value) {
                ("id", FieldValue::Int(v)) => self.id = Some(v),
                ("label", FieldValue::Text(v)) => self.label = Some(v),
                ("weight", FieldValue::Double(v)) => self.weight = Some(v),
                (f, v) => return Err(FieldError::mismatch(f, &v)),
            }
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl Entity for Broken {
        fn decl() -> &'static EntityDecl {
            &WIDGET
        }

        fn instantiate() -> Result<Self, RowMappingError> {
            Err(RowMappingError::Instantiation {
                entity: "Broken",
                reason: "no default".into(),
            })
        }

        fn set_field(&mut self, field: &str, _: FieldValue) -> Result<(), FieldError> {
            Err(FieldError::UnknownField(field.into()))
        }
    }

    fn projection(names: &[(&str, FieldType)]) -> Vec<ProjectedField> {
        names
            .iter()
            .map(|(n, ty)| ProjectedField {
                name: n.to_string(),
                column: n.to_string(),
                ty: *ty,
            })
            .collect()
    }

    #[test]
    fn bad_field_degrades_alone() {
        let proj = projection(&[
            ("id", FieldType::Int),
            ("label", FieldType::Text),
            ("weight", FieldType::Double),
        ]);
        let row = RawRow::Columns(vec![
            Value::Text("42".into()),
            Value::Integer(7),
            Value::Text("heavy".into()),
        ]);
        let w: Widget = map_row(&proj, &row).unwrap();
        assert_eq!(
            w,
            Widget {
                id: Some(42),
                label: Some("7".into()),
                weight: None,
            }
        );
    }

    #[test]
    fn single_scalar_row_maps_first_field() {
        let proj = projection(&[("id", FieldType::Int)]);
        let w: Widget = map_row(&proj, &RawRow::Single(Value::Integer(3))).unwrap();
        assert_eq!(w.id, Some(3));
        assert_eq!(w.label, None);
    }

    #[test]
    fn short_rows_leave_defaults() {
        let proj = projection(&[("id", FieldType::Int), ("label", FieldType::Text)]);
        let w: Widget = map_row(&proj, &RawRow::Single(Value::Integer(1))).unwrap();
        assert_eq!(w.label, None);
    }

    #[test]
    fn refused_assignment_is_swallowed() {
        // Declared type disagrees with what the entity accepts.
        let proj = projection(&[("id", FieldType::Long)]);
        let w: Widget = map_row(&proj, &RawRow::Single(Value::Integer(9))).unwrap();
        assert_eq!(w.id, None);
    }

    #[test]
    fn instantiation_failure_is_an_error() {
        let proj = projection(&[("id", FieldType::Int)]);
        let err = map_row::<Broken>(&proj, &RawRow::Single(Value::Integer(1))).unwrap_err();
        assert!(err.to_string().contains("Broken"));
    }
}
