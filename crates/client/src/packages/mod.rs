//! Формирование пакетов импорта Offers.xml / Products.xml.
//!
//! Конвейер: классификация запроса по форме → валидация и дедупликация
//! записей → рендеринг XML-документа → сборка zip-архива фиксированной
//! структуры. Все шаги синхронные; единственный разделяемый ресурс —
//! целевой путь на диске, и он никак не блокируется.

pub mod archive;
pub mod offer_package;
pub mod product_package;
pub mod renderer;

pub use archive::build_package_archive;
pub use offer_package::OfferPackage;
pub use product_package::ProductPackage;

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use contracts::packages::request::{
    OfferPackageRequest, PackageRequest, ProductPackageRequest, RequestError,
};
use contracts::shared::schema::nested_relations;
use contracts::shared::validation::{validate, Record, ValidationError};
use contracts::EntityKind;

/// Имя промежуточного каталога пакета внутри целевой директории
const PACKAGE_DIR_NAME: &str = "uploading_package";

/// Вид пакета импорта
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Offer,
    Product,
}

impl PackageKind {
    /// Имя файла содержимого внутри пакета
    pub fn content_file_name(&self) -> &'static str {
        match self {
            PackageKind::Offer => "Offers.xml",
            PackageKind::Product => "Products.xml",
        }
    }
}

/// Ошибки конвейера формирования пакетов
#[derive(Debug, Error)]
pub enum PackageError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Сформировать zip-пакет офферов в каталоге `dir`.
///
/// Возвращает путь к `<dir>/uploading_package.zip`.
pub fn generate_offer_package(
    dir: &Path,
    data: &Value,
    overwrite: bool,
) -> Result<PathBuf, PackageError> {
    let request = OfferPackageRequest::from_value(data)?;
    let package = OfferPackage::from_request(request)?;
    let document = renderer::render_offers(&package)?;
    build_package_archive(
        PackageKind::Offer,
        &dir.join(PACKAGE_DIR_NAME),
        &document,
        overwrite,
    )
}

/// Сформировать zip-пакет товаров в каталоге `dir`.
///
/// Возвращает путь к `<dir>/uploading_package.zip`.
pub fn generate_product_package(
    dir: &Path,
    data: &Value,
    overwrite: bool,
) -> Result<PathBuf, PackageError> {
    let request = ProductPackageRequest::from_value(data)?;
    let package = ProductPackage::from_request(request)?;
    let document = renderer::render_products(&package)?;
    build_package_archive(
        PackageKind::Product,
        &dir.join(PACKAGE_DIR_NAME),
        &document,
        overwrite,
    )
}

/// Сформировать пакет, определив его вид по форме запроса
pub fn generate_package(
    dir: &Path,
    data: &Value,
    overwrite: bool,
) -> Result<PathBuf, PackageError> {
    match PackageRequest::classify(data)? {
        PackageRequest::Offer(_) => generate_offer_package(dir, data, overwrite),
        PackageRequest::Product(_) => generate_product_package(dir, data, overwrite),
    }
}

/// Валидация записи вместе с вложенными коллекциями.
///
/// Каждое известное поле-список заменяется поэлементно провалидированным
/// списком с сохранением порядка элементов, затем запись верхнего уровня
/// проверяется по схеме своего вида. ModelProperties не входит в известные
/// коллекции и передаётся как есть.
pub(crate) fn normalize_entity(
    kind: EntityKind,
    mut record: Record,
) -> Result<Record, ValidationError> {
    for relation in nested_relations(kind) {
        let Some(Value::Array(elements)) = record.get_mut(relation.field) else {
            continue;
        };
        for element in elements.iter_mut() {
            if let Value::Object(map) = element {
                let validated = validate(relation.kind, std::mem::take(map))?;
                *element = Value::Object(validated);
            }
        }
    }
    validate(kind, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs::File;

    fn offer_data() -> Value {
        json!({
            "OfferCollection": [
                {"SellerProductId": "MY_SKU1", "ProductEan": "9153262149367", "Price": 10},
                {"SellerProductId": "MY_SKU2", "ProductEan": "9153262149368", "Price": 20},
            ],
        })
    }

    #[test]
    fn test_generate_offer_package_end_to_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let zip_path = generate_offer_package(dir.path(), &offer_data(), false)
            .expect("package generation succeeds");

        assert_eq!(zip_path, dir.path().join("uploading_package.zip"));
        assert!(zip_path.is_file());
        // Промежуточный каталог убран после архивации
        assert!(!dir.path().join("uploading_package").exists());

        let mut archive =
            zip::ZipArchive::new(File::open(&zip_path).expect("open zip")).expect("read zip");
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "Content/Offers.xml".to_string(),
                "[Content_Types].xml".to_string(),
                "_rels/.rels".to_string(),
            ]
        );

        use std::io::Read;
        let mut content = String::new();
        archive
            .by_name("Content/Offers.xml")
            .expect("content member")
            .read_to_string(&mut content)
            .expect("utf-8 content");
        assert!(content.contains("MY_SKU1"));
        assert!(content.contains("MY_SKU2"));
    }

    #[test]
    fn test_generate_package_dispatches_by_shape() {
        let dir = tempfile::tempdir().expect("tempdir");
        let zip_path =
            generate_package(dir.path(), &offer_data(), false).expect("offer shape accepted");
        assert!(zip_path.is_file());

        let unknown = json!({"Records": []});
        match generate_package(dir.path(), &unknown, true) {
            Err(PackageError::Request(RequestError::UnrecognizedPackageShape)) => {}
            other => panic!("expected UnrecognizedPackageShape, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_record_surfaces_validation_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = json!({
            "OfferCollection": [
                {"SellerProductId": "MY_SKU1"},
            ],
        });
        match generate_offer_package(dir.path(), &data, false) {
            Err(PackageError::Validation(ValidationError::MissingRequired { .. })) => {}
            other => panic!("expected MissingRequired, got {:?}", other),
        }
        // Ничего не создано: ошибка случилась до работы с диском
        assert!(!dir.path().join("uploading_package.zip").exists());
    }

    #[test]
    fn test_normalize_entity_keeps_element_order() {
        let record = json!({
            "SellerProductId": "MY_SKU1",
            "ProductEan": "9153262149367",
            "DiscountList": [
                {"DiscountValue": 5, "Type": 1, "StartDate": "a", "EndDate": "b"},
                {"DiscountValue": 9, "Type": 2, "StartDate": "c", "EndDate": "d"},
            ],
        })
        .as_object()
        .cloned()
        .unwrap();

        let normalized = normalize_entity(EntityKind::Offer, record).expect("valid offer");
        let discounts = normalized["DiscountList"].as_array().unwrap();
        assert_eq!(discounts[0]["DiscountValue"], json!(5));
        assert_eq!(discounts[1]["DiscountValue"], json!(9));
    }

    #[test]
    fn test_normalize_entity_rejects_invalid_nested_element() {
        let record = json!({
            "SellerProductId": "MY_SKU1",
            "ProductEan": "9153262149367",
            "ShippingInformationList": [
                {"ShippingCharges": 2.95, "DeliveryMode": "Tracked"},
            ],
        })
        .as_object()
        .cloned()
        .unwrap();

        match normalize_entity(EntityKind::Offer, record) {
            Err(ValidationError::MissingRequired { kind, missing }) => {
                assert_eq!(kind, EntityKind::ShippingInformation);
                assert_eq!(missing, vec!["AdditionalShippingCharges".to_string()]);
            }
            other => panic!("expected nested MissingRequired, got {:?}", other),
        }
    }
}
