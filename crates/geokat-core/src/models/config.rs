//! Communication-type catalog configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::record::CommTypeEntry;

/// Ordered catalog of communication types the classifier may return.
///
/// Order is significant: both the synonym scan and the whole-document
/// sweep resolve ties in favor of earlier entries. Disabled entries stay
/// listed but are never returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeCatalog {
    pub types: Vec<CommTypeEntry>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self {
            types: default_types(),
        }
    }
}

/// The built-in type catalog, mirroring the archive folder layout.
pub fn default_types() -> Vec<CommTypeEntry> {
    [
        // Communications
        "Кабель связи",
        "Тел канализация",
        "Кабельная канализация",
        "ВОЛС",
        "КТВ",
        // Power
        "Эл кабель",
        "Кабель техн. и очаг. заземл",
        "Контур заземл",
        "Кабель но",
        // Water supply and drainage
        "Водосток",
        "Вод-д",
        "Трубопровод",
        "Канализация хоз-быт",
        "ЛОС",
        "Дренаж",
        // Heating and ventilation
        "Воздухопровод",
        "Вент. ветки",
        "Теплотрасса",
        // Infrastructure
        "Коллектор",
        // Pipelines
        "Газопровод",
        "Нефтепровод",
        "Продуктопровод",
        // Special systems
        "СОУЭ",
        "СКУД",
        // Sewer variants and remaining folder names
        "Канализация",
        "Нап канализация",
        "Сам канализация",
        "Водовыпуск",
        "Кабель защ",
        "Газ",
    ]
    .into_iter()
    .map(CommTypeEntry::new)
    .collect()
}

impl TypeCatalog {
    /// Load a catalog from a JSON file of the form
    /// `{"types": [{"name": "...", "enabled": true}, ...]}`.
    ///
    /// Blank and duplicate names are dropped. A file that lists no usable
    /// types falls back to the defaults so the classifier always has an
    /// allow-list to work with.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        let parsed: Self = serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(parsed.cleaned())
    }

    fn cleaned(self) -> Self {
        let mut seen: Vec<String> = Vec::new();
        let mut types = Vec::new();
        for entry in self.types {
            let name = entry.name.trim().to_string();
            if name.is_empty() || seen.contains(&name) {
                continue;
            }
            seen.push(name.clone());
            types.push(CommTypeEntry {
                name,
                enabled: entry.enabled,
            });
        }
        if types.is_empty() {
            return Self::default();
        }
        Self { types }
    }

    /// Names the classifier may return, in catalog order.
    pub fn allowed(&self) -> Vec<String> {
        self.types
            .iter()
            .filter(|t| t.enabled)
            .map(|t| t.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_catalog_is_ordered_and_unique() {
        let catalog = TypeCatalog::default();
        assert_eq!(catalog.types.len(), 30);
        assert_eq!(catalog.types[0].name, "Кабель связи");
        assert_eq!(catalog.types[29].name, "Газ");

        let mut names: Vec<&str> = catalog.types.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 30);
    }

    #[test]
    fn allowed_skips_disabled_entries() {
        let mut catalog = TypeCatalog::default();
        catalog.types[0].enabled = false;
        let allowed = catalog.allowed();
        assert_eq!(allowed.len(), 29);
        assert!(!allowed.contains(&"Кабель связи".to_string()));
        assert_eq!(allowed[0], "Тел канализация");
    }

    #[test]
    fn from_file_dedups_and_skips_blank_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.json");
        std::fs::write(
            &path,
            r#"{"types": [
                {"name": "Газ"},
                {"name": "  "},
                {"name": "Газ", "enabled": false},
                {"name": "Дренаж", "enabled": false}
            ]}"#,
        )
        .unwrap();

        let catalog = TypeCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.types.len(), 2);
        assert_eq!(catalog.types[0].name, "Газ");
        assert!(catalog.types[0].enabled);
        assert_eq!(catalog.allowed(), vec!["Газ".to_string()]);
    }

    #[test]
    fn from_file_falls_back_to_defaults_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.json");
        std::fs::write(&path, r#"{"types": []}"#).unwrap();

        let catalog = TypeCatalog::from_file(&path).unwrap();
        assert_eq!(catalog, TypeCatalog::default());
    }

    #[test]
    fn from_file_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = TypeCatalog::from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
