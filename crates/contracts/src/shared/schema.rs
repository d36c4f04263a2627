//! Статические схемы полей для записей пакета импорта.
//!
//! Схемы фиксированы внешним форматом Cdiscount и описывают только состав
//! полей: обязательные и допустимые опциональные имена. Типы значений
//! схемой не задаются.

use crate::enums::EntityKind;

/// Схема записи: обязательные и опциональные поля одного вида
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

const OFFER: EntitySchema = EntitySchema {
    kind: EntityKind::Offer,
    // Параметры, общие для PackageType "Full" и "StockAndPrice"
    required: &["ProductEan", "SellerProductId"],
    optional: &[
        "Comment",
        "StrikedPrice",
        "PriceMustBeAligned",
        "MinimumPriceForPriceAlignment",
        "ProductPackagingUnit",
        "ProductPackagingValue",
        "BluffDeliveryMax",
        "DiscountList",
        "ShippingInformationList",
        // Эти параметры имеют смысл только при PackageType "Full"
        "ProductCondition",
        "Price",
        "EcoPart",
        "Vat",
        "DeaTax",
        "Stock",
        "PreparationTime",
    ],
};

const PRODUCT: EntitySchema = EntitySchema {
    kind: EntityKind::Product,
    required: &[
        "ShortLabel",
        "SellerProductId",
        "CategoryCode",
        "ProductKind",
        "Model",
        "LongLabel",
        "Description",
        "BrandName",
        "EanList",
        "Pictures",
    ],
    optional: &[
        "Width",
        "Weight",
        "Size",
        "SellerProductFamily",
        "SellerProductColorName",
        "ManufacturerPartNumber",
        "Length",
        "ISBN",
        "Height",
        "EncodedMarketingDescription",
        "ModelProperties",
        "Navigation",
    ],
};

const DISCOUNT_COMPONENT: EntitySchema = EntitySchema {
    kind: EntityKind::DiscountComponent,
    required: &["DiscountValue", "Type", "StartDate", "EndDate"],
    optional: &[],
};

const SHIPPING_INFORMATION: EntitySchema = EntitySchema {
    kind: EntityKind::ShippingInformation,
    required: &["ShippingCharges", "AdditionalShippingCharges", "DeliveryMode"],
    optional: &[],
};

const PRODUCT_EAN: EntitySchema = EntitySchema {
    kind: EntityKind::ProductEan,
    required: &["Ean"],
    optional: &[],
};

const PRODUCT_IMAGE: EntitySchema = EntitySchema {
    kind: EntityKind::ProductImage,
    required: &["Uri"],
    optional: &[],
};

/// Получить схему по виду записи
pub fn schema_for(kind: EntityKind) -> &'static EntitySchema {
    match kind {
        EntityKind::Offer => &OFFER,
        EntityKind::Product => &PRODUCT,
        EntityKind::DiscountComponent => &DISCOUNT_COMPONENT,
        EntityKind::ShippingInformation => &SHIPPING_INFORMATION,
        EntityKind::ProductEan => &PRODUCT_EAN,
        EntityKind::ProductImage => &PRODUCT_IMAGE,
    }
}

/// Связь поля-списка верхнего уровня с видом вложенной записи
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedRelation {
    /// Имя поля-списка в записи верхнего уровня
    pub field: &'static str,
    /// Имя элемента списка в XML-документе
    pub element: &'static str,
    /// Вид вложенной записи
    pub kind: EntityKind,
}

/// Вложенные коллекции, проходящие поэлементную валидацию.
///
/// ModelProperties сюда намеренно не входит: это свободный список
/// произвольных свойств модели, он передаётся как есть.
pub fn nested_relations(kind: EntityKind) -> &'static [NestedRelation] {
    match kind {
        EntityKind::Offer => &[
            NestedRelation {
                field: "DiscountList",
                element: "DiscountComponent",
                kind: EntityKind::DiscountComponent,
            },
            NestedRelation {
                field: "ShippingInformationList",
                element: "ShippingInformation",
                kind: EntityKind::ShippingInformation,
            },
        ],
        EntityKind::Product => &[
            NestedRelation {
                field: "EanList",
                element: "ProductEan",
                kind: EntityKind::ProductEan,
            },
            NestedRelation {
                field: "Pictures",
                element: "ProductImage",
                kind: EntityKind::ProductImage,
            },
        ],
        _ => &[],
    }
}
