use contracts::enums::PackageType;
use contracts::packages::request::OfferPackageRequest;
use contracts::shared::validation::{Record, ValidationError};
use contracts::EntityKind;

use super::normalize_entity;

/// Пакет офферов: опции уровня пакета + коллекция валидных записей.
///
/// Порядок записей — порядок добавления, он же порядок в документе.
#[derive(Debug, Clone)]
pub struct OfferPackage {
    pub name: String,
    pub purge_and_replace: bool,
    pub package_type: PackageType,
    pub offer_publication_list: Vec<i64>,
    data: Vec<Record>,
}

impl OfferPackage {
    pub fn from_request(request: OfferPackageRequest) -> Result<Self, ValidationError> {
        let mut package = OfferPackage {
            name: request.name,
            purge_and_replace: request.purge_and_replace,
            package_type: request.package_type,
            offer_publication_list: request.offer_publication_list,
            data: Vec::new(),
        };
        package.add(request.offers)?;
        Ok(package)
    }

    /// Добавить записи в пакет, по одной, в порядке следования.
    ///
    /// Дубликаты (полное структурное равенство, включая вложенные списки)
    /// не добавляются. Партия не атомарна: ошибка валидации на середине
    /// списка оставляет ранее добавленные записи в пакете.
    pub fn add(&mut self, offers: Vec<Record>) -> Result<(), ValidationError> {
        for offer in offers {
            let valid_offer = normalize_entity(EntityKind::Offer, offer)?;
            if !self.data.contains(&valid_offer) {
                self.data.push(valid_offer);
            } else {
                tracing::debug!("Skipping duplicate offer");
            }
        }
        Ok(())
    }

    pub fn data(&self) -> &[Record] {
        &self.data
    }
}
