//! Рендеринг Offers.xml / Products.xml.
//!
//! Шаблоны документов — внешний формат площадки, они поставляются как есть
//! в assets/templates и не генерируются. Задача рендерера — подготовить
//! данные: разбить каждую запись на строку скалярных атрибутов и вложенные
//! секции, посчитать производные величины уровня документа.

use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use contracts::shared::schema::nested_relations;
use contracts::shared::validation::Record;
use contracts::EntityKind;

use super::{OfferPackage, PackageError, ProductPackage};

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    handlebars
        .register_template_string(
            "Offers.xml",
            include_str!("../../assets/templates/Offers.xml"),
        )
        .expect("embedded Offers.xml template compiles");
    handlebars
        .register_template_string(
            "Products.xml",
            include_str!("../../assets/templates/Products.xml"),
        )
        .expect("embedded Products.xml template compiles");
    handlebars
});

/// Отрендерить документ пакета офферов
pub fn render_offers(package: &OfferPackage) -> Result<String, PackageError> {
    let offers: Vec<Value> = package.data().iter().map(offer_datum).collect();

    let context = json!({
        "name": package.name,
        "purge_and_replace": package.purge_and_replace,
        "package_type": package.package_type.as_str(),
        "capacity": package.data().len(),
        "offers": offers,
        "offer_publication_list": package.offer_publication_list,
        "publication_capacity": package.offer_publication_list.len(),
    });

    Ok(TEMPLATES.render("Offers.xml", &context)?)
}

/// Отрендерить документ пакета товаров
pub fn render_products(package: &ProductPackage) -> Result<String, PackageError> {
    let products: Vec<Value> = package.data().iter().map(product_datum).collect();

    let context = json!({
        "name": package.name,
        // Capacity коллекции товаров: сумма картинок по всему документу
        "capacity": package.picture_capacity(),
        "products": products,
    });

    Ok(TEMPLATES.render("Products.xml", &context)?)
}

fn offer_datum(offer: &Record) -> Value {
    json!({
        "attributes": scalar_attributes(offer, &extracted_fields(EntityKind::Offer)),
        "discount_list": element_attributes(offer, "DiscountList"),
        "shipping_information_list": element_attributes(offer, "ShippingInformationList"),
    })
}

fn product_datum(product: &Record) -> Value {
    json!({
        "attributes": scalar_attributes(product, &extracted_fields(EntityKind::Product)),
        "ean_list": element_attributes(product, "EanList"),
        "pictures": element_attributes(product, "Pictures"),
        "model_properties": model_properties(product),
    })
}

/// Поля, извлекаемые из записи в отдельные секции документа
fn extracted_fields(kind: EntityKind) -> Vec<&'static str> {
    let mut fields: Vec<&'static str> = nested_relations(kind)
        .iter()
        .map(|relation| relation.field)
        .collect();
    if kind == EntityKind::Product {
        // Свободный список свойств модели тоже уходит в свою секцию
        fields.push("ModelProperties");
    }
    fields
}

/// Строка атрибутов `name="value"` в порядке вставки полей.
///
/// Поля со значением null опускаются целиком, а не сериализуются как
/// пустая строка.
fn scalar_attributes(record: &Record, excluded: &[&str]) -> String {
    record
        .iter()
        .filter(|(key, _)| !excluded.contains(&key.as_str()))
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| format!("{}=\"{}\"", key, scalar_text(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Элементы вложенной секции как готовые строки атрибутов
fn element_attributes(record: &Record, field: &str) -> Vec<String> {
    record
        .get(field)
        .and_then(Value::as_array)
        .map(|elements| {
            elements
                .iter()
                .filter_map(Value::as_object)
                .map(|element| scalar_attributes(element, &[]))
                .collect()
        })
        .unwrap_or_default()
}

/// Свойства модели: пары ключ/значение без какой-либо проверки состава
fn model_properties(record: &Record) -> Vec<Value> {
    match record.get("ModelProperties") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| json!({"key": key, "value": scalar_text(value)}))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_object)
            .flat_map(|map| {
                map.iter()
                    .map(|(key, value)| json!({"key": key, "value": scalar_text(value)}))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
