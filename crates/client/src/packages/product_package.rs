use serde_json::Value;

use contracts::packages::request::ProductPackageRequest;
use contracts::shared::validation::{Record, ValidationError};
use contracts::EntityKind;

use super::normalize_entity;

/// Пакет товаров: имя + коллекция валидных записей в порядке добавления
#[derive(Debug, Clone)]
pub struct ProductPackage {
    pub name: String,
    data: Vec<Record>,
}

impl ProductPackage {
    pub fn from_request(request: ProductPackageRequest) -> Result<Self, ValidationError> {
        let mut package = ProductPackage {
            name: request.name,
            data: Vec::new(),
        };
        package.add(request.products)?;
        Ok(package)
    }

    /// Добавить записи в пакет, по одной, в порядке следования.
    ///
    /// Дубликаты не добавляются; партия не атомарна (см. [`OfferPackage::add`]).
    ///
    /// [`OfferPackage::add`]: super::OfferPackage::add
    pub fn add(&mut self, products: Vec<Record>) -> Result<(), ValidationError> {
        for product in products {
            let valid_product = normalize_entity(EntityKind::Product, product)?;
            if !self.data.contains(&valid_product) {
                self.data.push(valid_product);
            } else {
                tracing::debug!("Skipping duplicate product");
            }
        }
        Ok(())
    }

    pub fn data(&self) -> &[Record] {
        &self.data
    }

    /// Суммарное число картинок по всем товарам пакета.
    ///
    /// Внешний формат требует это число как Capacity коллекции товаров:
    /// сумма по документу в целом, а не по отдельному товару.
    pub fn picture_capacity(&self) -> usize {
        self.data
            .iter()
            .map(|product| {
                product
                    .get("Pictures")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len)
            })
            .sum()
    }
}
