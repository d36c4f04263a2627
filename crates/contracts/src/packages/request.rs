//! Запрос на формирование пакета импорта.
//!
//! Вид пакета определяется формой словаря верхнего уровня: ключ
//! `OfferCollection` задаёт пакет офферов, `Products` или
//! `ProductCollection` — пакет товаров. Любая другая форма отклоняется.

use serde_json::Value;
use thiserror::Error;

use crate::enums::PackageType;
use crate::shared::validation::Record;

/// Имя пакета по умолчанию
pub const DEFAULT_PACKAGE_NAME: &str = "A package";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error(
        "Unrecognized package shape: expected a dictionary with OfferCollection, \
         Products or ProductCollection"
    )]
    UnrecognizedPackageShape,

    #[error(
        "The value OfferPublicationList should be a list of integers \
         representing the ids of the marketplaces"
    )]
    InvalidPublicationList,
}

/// Запрос на пакет офферов: коллекция записей + опции уровня пакета
#[derive(Debug, Clone, PartialEq)]
pub struct OfferPackageRequest {
    pub name: String,
    pub purge_and_replace: bool,
    pub package_type: PackageType,
    pub offer_publication_list: Vec<i64>,
    pub offers: Vec<Record>,
}

/// Запрос на пакет товаров
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPackageRequest {
    pub name: String,
    pub products: Vec<Record>,
}

/// Запрос на формирование пакета, уже отнесённый к одному из двух видов
#[derive(Debug, Clone, PartialEq)]
pub enum PackageRequest {
    Offer(OfferPackageRequest),
    Product(ProductPackageRequest),
}

impl PackageRequest {
    /// Классифицировать словарь верхнего уровня по его форме.
    ///
    /// Форма, не содержащая ни одного из ключей-дискриминаторов,
    /// отклоняется, а не пропускается дальше.
    pub fn classify(data: &Value) -> Result<PackageRequest, RequestError> {
        let map = data
            .as_object()
            .ok_or(RequestError::UnrecognizedPackageShape)?;
        if map.contains_key("OfferCollection") {
            return OfferPackageRequest::from_value(data).map(PackageRequest::Offer);
        }
        if map.contains_key("Products") || map.contains_key("ProductCollection") {
            return ProductPackageRequest::from_value(data).map(PackageRequest::Product);
        }
        Err(RequestError::UnrecognizedPackageShape)
    }
}

impl OfferPackageRequest {
    pub fn from_value(data: &Value) -> Result<Self, RequestError> {
        let map = data
            .as_object()
            .ok_or(RequestError::UnrecognizedPackageShape)?;
        let offers = collection(map.get("OfferCollection"), "Offer")?;

        Ok(OfferPackageRequest {
            name: package_name(map),
            purge_and_replace: map
                .get("PurgeAndReplace")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            package_type: map
                .get("PackageType")
                .and_then(Value::as_str)
                .and_then(PackageType::from_name)
                .unwrap_or_default(),
            offer_publication_list: publication_list(map.get("OfferPublicationList"))?,
            offers,
        })
    }
}

impl ProductPackageRequest {
    pub fn from_value(data: &Value) -> Result<Self, RequestError> {
        let map = data
            .as_object()
            .ok_or(RequestError::UnrecognizedPackageShape)?;
        let source = map
            .get("Products")
            .or_else(|| map.get("ProductCollection"));
        let products = collection(source, "Product")?;

        Ok(ProductPackageRequest {
            name: package_name(map),
            products,
        })
    }
}

fn package_name(map: &Record) -> String {
    map.get("Name")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PACKAGE_NAME)
        .to_string()
}

/// Список записей коллекции.
///
/// Каждый элемент — либо сама запись, либо обёртка с единственным ключом
/// вида записи (`{"Offer": {...}}`), как в примерах загрузки Cdiscount.
fn collection(value: Option<&Value>, element: &str) -> Result<Vec<Record>, RequestError> {
    let items = value
        .and_then(Value::as_array)
        .ok_or(RequestError::UnrecognizedPackageShape)?;

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let map = item
            .as_object()
            .ok_or(RequestError::UnrecognizedPackageShape)?;
        let unwrapped = match map.get(element) {
            Some(Value::Object(inner)) if map.len() == 1 => inner,
            _ => map,
        };
        records.push(unwrapped.clone());
    }
    Ok(records)
}

/// OfferPublicationList должен быть списком целых идентификаторов площадок
fn publication_list(value: Option<&Value>) -> Result<Vec<i64>, RequestError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    if value.is_null() {
        return Ok(Vec::new());
    }
    let items = value
        .as_array()
        .ok_or(RequestError::InvalidPublicationList)?;
    items
        .iter()
        .map(|item| item.as_i64().ok_or(RequestError::InvalidPublicationList))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_offer_shape() {
        let data = json!({
            "OfferCollection": [
                {"ProductEan": "9153262149367", "SellerProductId": "MY_SKU1"},
            ],
            "PurgeAndReplace": true,
            "PackageType": "StockAndPrice",
            "OfferPublicationList": [1, 16],
        });
        match PackageRequest::classify(&data) {
            Ok(PackageRequest::Offer(request)) => {
                assert_eq!(request.name, DEFAULT_PACKAGE_NAME);
                assert!(request.purge_and_replace);
                assert_eq!(request.package_type, PackageType::StockAndPrice);
                assert_eq!(request.offer_publication_list, vec![1, 16]);
                assert_eq!(request.offers.len(), 1);
            }
            other => panic!("expected offer request, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_product_shape() {
        let data = json!({"Products": [], "Name": "Catalogue"});
        match PackageRequest::classify(&data) {
            Ok(PackageRequest::Product(request)) => {
                assert_eq!(request.name, "Catalogue");
                assert!(request.products.is_empty());
            }
            other => panic!("expected product request, got {:?}", other),
        }
    }

    #[test]
    fn test_product_collection_alias() {
        let data = json!({"ProductCollection": []});
        assert!(matches!(
            PackageRequest::classify(&data),
            Ok(PackageRequest::Product(_))
        ));
    }

    #[test]
    fn test_classify_fails_closed() {
        for data in [json!({}), json!({"Offers": []}), json!([1, 2]), json!(null)] {
            assert_eq!(
                PackageRequest::classify(&data),
                Err(RequestError::UnrecognizedPackageShape)
            );
        }
    }

    #[test]
    fn test_wrapped_collection_elements_are_unwrapped() {
        let data = json!({
            "OfferCollection": [
                {"Offer": {"ProductEan": "9153262149367", "SellerProductId": "MY_SKU1"}},
            ],
        });
        let request = OfferPackageRequest::from_value(&data).expect("valid shape");
        assert_eq!(
            request.offers[0].get("SellerProductId"),
            Some(&json!("MY_SKU1"))
        );
        assert!(request.offers[0].get("Offer").is_none());
    }

    #[test]
    fn test_publication_list_must_hold_integers() {
        let data = json!({
            "OfferCollection": [],
            "OfferPublicationList": [1, "16"],
        });
        assert_eq!(
            OfferPackageRequest::from_value(&data),
            Err(RequestError::InvalidPublicationList)
        );

        let data = json!({"OfferCollection": [], "OfferPublicationList": 1});
        assert_eq!(
            OfferPackageRequest::from_value(&data),
            Err(RequestError::InvalidPublicationList)
        );
    }

    #[test]
    fn test_defaults() {
        let data = json!({"OfferCollection": []});
        let request = OfferPackageRequest::from_value(&data).expect("valid shape");
        assert_eq!(request.name, DEFAULT_PACKAGE_NAME);
        assert!(!request.purge_and_replace);
        assert_eq!(request.package_type, PackageType::Full);
        assert!(request.offer_publication_list.is_empty());
    }
}
