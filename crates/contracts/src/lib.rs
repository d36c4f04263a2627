//! Контракты данных Cdiscount Marketplace API: виды сущностей, схемы полей,
//! структурная валидация записей и запросы на формирование пакетов импорта.
//!
//! Крейт не содержит I/O и сетевого кода, только типы и чистые функции,
//! разделяемые между библиотекой клиента и её потребителями.

pub mod enums;
pub mod packages;
pub mod shared;

pub use enums::{EntityKind, PackageType};
pub use shared::validation::{validate, Record, ValidationError};
