use serde::{Deserialize, Serialize};

/// Виды структурных записей пакета импорта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Offer,
    Product,
    DiscountComponent,
    ShippingInformation,
    ProductEan,
    ProductImage,
}

impl EntityKind {
    /// Имя вида, как оно фигурирует в XML-документе пакета
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Offer => "Offer",
            EntityKind::Product => "Product",
            EntityKind::DiscountComponent => "DiscountComponent",
            EntityKind::ShippingInformation => "ShippingInformation",
            EntityKind::ProductEan => "ProductEan",
            EntityKind::ProductImage => "ProductImage",
        }
    }

    /// Парсинг из строки
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Offer" => Some(EntityKind::Offer),
            "Product" => Some(EntityKind::Product),
            "DiscountComponent" => Some(EntityKind::DiscountComponent),
            "ShippingInformation" => Some(EntityKind::ShippingInformation),
            "ProductEan" => Some(EntityKind::ProductEan),
            "ProductImage" => Some(EntityKind::ProductImage),
            _ => None,
        }
    }

    /// Получить все виды записей
    pub fn all() -> Vec<EntityKind> {
        vec![
            EntityKind::Offer,
            EntityKind::Product,
            EntityKind::DiscountComponent,
            EntityKind::ShippingInformation,
            EntityKind::ProductEan,
            EntityKind::ProductImage,
        ]
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
