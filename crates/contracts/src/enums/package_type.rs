use serde::{Deserialize, Serialize};

/// Тип пакета офферов.
///
/// "Full" — полный пакет, "StockAndPrice" — обновление только остатков и цен.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PackageType {
    #[default]
    Full,
    StockAndPrice,
}

impl PackageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Full => "Full",
            PackageType::StockAndPrice => "StockAndPrice",
        }
    }

    /// Парсинг из строки
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Full" => Some(PackageType::Full),
            "StockAndPrice" => Some(PackageType::StockAndPrice),
            _ => None,
        }
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
