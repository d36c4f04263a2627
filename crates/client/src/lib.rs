//! Клиент Cdiscount Marketplace API.
//!
//! Библиотека состоит из двух частей: обёртки удалённых операций API
//! (`api`) и конвейера формирования пакетов импорта Offers.xml /
//! Products.xml (`packages`): валидация записей, рендеринг документа и
//! сборка zip-архива в формате, который площадка принимает как файл
//! массовой загрузки. Сам архив библиотека никуда не выгружает: операциям
//! `SubmitOfferPackage` / `SubmitProductPackage` передаётся URL уже
//! размещённого файла.

pub mod api;
pub mod packages;
pub mod shared;

pub use packages::{
    generate_offer_package, generate_package, generate_product_package, PackageError,
};
