//! Structural validation of package records.
//!
//! A record is an untyped field map; validation only checks the key set
//! against the schema of the record kind. Values are passed through as-is:
//! no type coercion, no range checks, no cross-field rules.

use serde_json::Value;
use thiserror::Error;

use crate::enums::EntityKind;
use crate::shared::schema::schema_for;

/// Запись пакета: имя поля -> скаляр или вложенный список записей.
///
/// Порядок вставки полей значим: он определяет порядок атрибутов
/// в XML-документе.
pub type Record = serde_json::Map<String, Value>;

/// Ошибка валидации записи по схеме её вида
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required attributes for {kind}: {missing:?}")]
    MissingRequired {
        kind: EntityKind,
        missing: Vec<String>,
    },

    #[error(
        "These attributes are not valid for {kind}: {unknown:?}. \
         Please use only the following ones if necessary: {allowed:?}"
    )]
    UnknownAttributes {
        kind: EntityKind,
        unknown: Vec<String>,
        allowed: Vec<String>,
    },
}

/// Check the key set of `record` against the schema of `kind`.
///
/// Reports every missing required field at once, then every unknown field
/// together with the allowed optional set. Returns the record unchanged on
/// success, so the check is idempotent.
pub fn validate(kind: EntityKind, record: Record) -> Result<Record, ValidationError> {
    let schema = schema_for(kind);

    let mut missing: Vec<String> = schema
        .required
        .iter()
        .filter(|field| !record.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(ValidationError::MissingRequired { kind, missing });
    }

    let mut unknown: Vec<String> = record
        .keys()
        .filter(|key| {
            !schema.required.contains(&key.as_str()) && !schema.optional.contains(&key.as_str())
        })
        .cloned()
        .collect();
    if !unknown.is_empty() {
        unknown.sort();
        let mut allowed: Vec<String> = schema.optional.iter().map(|f| f.to_string()).collect();
        allowed.sort();
        return Err(ValidationError::UnknownAttributes {
            kind,
            unknown,
            allowed,
        });
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().expect("test fixture is an object")
    }

    fn minimal_offer() -> Record {
        record(json!({
            "ProductEan": "9153262149367",
            "SellerProductId": "MY_SKU1",
        }))
    }

    #[test]
    fn test_accepts_required_only() {
        let offer = minimal_offer();
        assert_eq!(validate(EntityKind::Offer, offer.clone()), Ok(offer));
    }

    #[test]
    fn test_accepts_required_plus_optional() {
        let offer = record(json!({
            "ProductEan": "9153262149367",
            "SellerProductId": "MY_SKU1",
            "Price": 10,
            "Stock": 1,
        }));
        assert_eq!(validate(EntityKind::Offer, offer.clone()), Ok(offer));
    }

    #[test]
    fn test_reports_every_missing_field() {
        let result = validate(EntityKind::Offer, record(json!({"SellerProductId": "X"})));
        match result {
            Err(ValidationError::MissingRequired { kind, missing }) => {
                assert_eq!(kind, EntityKind::Offer);
                assert!(missing.contains(&"ProductEan".to_string()));
                assert!(!missing.contains(&"SellerProductId".to_string()));
            }
            other => panic!("expected MissingRequired, got {:?}", other),
        }
    }

    #[test]
    fn test_reports_unknown_field_with_allowed_set() {
        let mut offer = minimal_offer();
        offer.insert("InvalidKey".to_string(), json!("Unknown"));
        match validate(EntityKind::Offer, offer) {
            Err(ValidationError::UnknownAttributes {
                kind,
                unknown,
                allowed,
            }) => {
                assert_eq!(kind, EntityKind::Offer);
                assert_eq!(unknown, vec!["InvalidKey".to_string()]);
                assert!(allowed.contains(&"Price".to_string()));
                assert!(allowed.contains(&"DiscountList".to_string()));
            }
            other => panic!("expected UnknownAttributes, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_takes_precedence_over_unknown() {
        // Запись одновременно без обязательного поля и с лишним ключом
        let result = validate(
            EntityKind::Offer,
            record(json!({"SellerProductId": "X", "InvalidKey": "Unknown"})),
        );
        assert!(matches!(
            result,
            Err(ValidationError::MissingRequired { .. })
        ));
    }

    #[test]
    fn test_shape_only_no_type_checks() {
        // Поле с верным именем, но "не тем" типом значения принимается
        let offer = record(json!({
            "ProductEan": 9153262149367u64,
            "SellerProductId": ["not", "a", "string"],
            "Price": "ten",
        }));
        assert!(validate(EntityKind::Offer, offer).is_ok());
    }

    #[test]
    fn test_idempotent() {
        let offer = record(json!({
            "ProductEan": "9153262149367",
            "SellerProductId": "MY_SKU1",
            "Price": 10,
        }));
        let once = validate(EntityKind::Offer, offer).expect("first pass");
        let twice = validate(EntityKind::Offer, once.clone()).expect("second pass");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sub_record_schemas() {
        let discount = record(json!({
            "DiscountValue": 5,
            "Type": 1,
            "StartDate": "2019-04-15T00:00:00",
            "EndDate": "2019-05-15T00:00:00",
        }));
        assert!(validate(EntityKind::DiscountComponent, discount).is_ok());

        let image = record(json!({"Uri": "http://www.example.com/picture.jpg"}));
        assert!(validate(EntityKind::ProductImage, image).is_ok());

        let ean = record(json!({"Ean": "3600550964004", "Label": "x"}));
        assert!(matches!(
            validate(EntityKind::ProductEan, ean),
            Err(ValidationError::UnknownAttributes { .. })
        ));
    }
}
