//! Сборка zip-пакета импорта на диске.
//!
//! Пакет имеет фиксированную структуру из трёх членов: файл содержимого
//! `Content/Offers.xml` или `Content/Products.xml` и два служебных члена,
//! `_rels/.rels` и `[Content_Types].xml`. Содержимое служебных членов
//! задано внешним форматом и поставляется как есть в assets/package.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{PackageError, PackageKind};

const RELS: &str = include_str!("../../assets/package/_rels/.rels");
const CONTENT_TYPES: &str = include_str!("../../assets/package/[Content_Types].xml");

/// Собрать zip-пакет по пути `target.zip`.
///
/// Шаги: проверка предусловий, каркас каталога `target`, запись документа,
/// архивация трёх членов, удаление промежуточного каталога. При
/// `overwrite` существующие `target` и `target.zip` предварительно
/// удаляются; без него любой из них — ошибка. Ошибки файловой системы
/// после проверок предусловий пробрасываются как есть, промежуточное
/// состояние при этом может остаться на диске.
pub fn build_package_archive(
    kind: PackageKind,
    target: &Path,
    document: &str,
    overwrite: bool,
) -> Result<PathBuf, PackageError> {
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => return Err(PackageError::DirectoryNotFound(target.to_path_buf())),
    };
    if !parent.is_dir() {
        return Err(PackageError::DirectoryNotFound(parent));
    }

    let zip_path = zip_sibling(target);
    if overwrite {
        if target.exists() {
            fs::remove_dir_all(target)?;
        }
        if zip_path.exists() {
            fs::remove_file(&zip_path)?;
        }
    } else {
        if target.exists() {
            return Err(PackageError::AlreadyExists(target.to_path_buf()));
        }
        if zip_path.exists() {
            return Err(PackageError::AlreadyExists(zip_path));
        }
    }

    // Каркас пакета
    fs::create_dir_all(target.join("Content"))?;
    fs::create_dir_all(target.join("_rels"))?;
    fs::write(target.join("_rels").join(".rels"), RELS)?;
    fs::write(target.join("[Content_Types].xml"), CONTENT_TYPES)?;
    fs::write(
        target.join("Content").join(kind.content_file_name()),
        document,
    )?;

    // Архив: ровно три члена, deflate
    let file = fs::File::create(&zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    writer.start_file(format!("Content/{}", kind.content_file_name()), options)?;
    writer.write_all(document.as_bytes())?;
    writer.start_file("_rels/.rels", options)?;
    writer.write_all(RELS.as_bytes())?;
    writer.start_file("[Content_Types].xml", options)?;
    writer.write_all(CONTENT_TYPES.as_bytes())?;
    writer.finish()?;

    // Неархивированный каталог больше не нужен
    fs::remove_dir_all(target)?;

    tracing::debug!("Package archive written to {}", zip_path.display());
    Ok(zip_path)
}

/// Путь архива: имя целевого каталога с суффиксом ".zip"
fn zip_sibling(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".zip");
    PathBuf::from(name)
}
