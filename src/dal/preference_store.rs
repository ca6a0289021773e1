use std::{fs, io, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::prospect::SortOrder;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(rename = "results-sort-order", default)]
    results_sort_order: SortOrder,
}

/// Tiny file-backed key-value store for view preferences. Only the results
/// sort order lives here; it survives across results views while the
/// record sets themselves do not.
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PreferenceStore { path: path.into() }
    }

    /// A missing or unreadable file reads as the default order.
    pub fn sort_order(&self) -> SortOrder {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str::<Preferences>(&raw)
                .map(|p| p.results_sort_order)
                .unwrap_or_default(),
            Err(_) => SortOrder::default(),
        }
    }

    pub fn set_sort_order(&self, order: SortOrder) -> io::Result<()> {
        let preferences = Preferences {
            results_sort_order: order,
        };
        let raw = serde_json::to_string_pretty(&preferences).map_err(io::Error::other)?;
        fs::write(&self.path, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> PreferenceStore {
        let path = std::env::temp_dir().join(format!("linkreach-prefs-{}.json", Uuid::new_v4()));
        PreferenceStore::new(path)
    }

    #[test]
    fn missing_file_reads_as_the_default_order() {
        let store = temp_store();
        assert_eq!(store.sort_order(), SortOrder::EndFirst);
    }

    #[test]
    fn sort_order_round_trips_through_the_file() {
        let store = temp_store();

        store.set_sort_order(SortOrder::StartFirst).unwrap();
        assert_eq!(store.sort_order(), SortOrder::StartFirst);

        store.set_sort_order(SortOrder::EndFirst).unwrap();
        assert_eq!(store.sort_order(), SortOrder::EndFirst);

        let _ = fs::remove_file(&store.path);
    }

    #[test]
    fn garbage_contents_read_as_the_default_order() {
        let store = temp_store();
        fs::write(&store.path, "not json").unwrap();
        assert_eq!(store.sort_order(), SortOrder::EndFirst);
        let _ = fs::remove_file(&store.path);
    }
}
