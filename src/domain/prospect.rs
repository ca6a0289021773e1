use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One generated prospect, as produced by the sheet adapter. Field names on
/// the wire match the sheet automation's column labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Linked_url")]
    pub linkedin_url: String,
    #[serde(rename = "About")]
    pub about: String,
    #[serde(rename = "Image")]
    pub image_url: String,
}

impl ProspectRecord {
    /// Dedup key for this record: the linkedin url when present, the name
    /// as a fallback, and a synthetic positional key for fully blank rows.
    /// Must stay stable across repeated fetches of the same sheet row.
    pub fn identity_key(&self, position: usize) -> String {
        if !self.linkedin_url.is_empty() {
            self.linkedin_url.clone()
        } else if !self.name.is_empty() {
            self.name.clone()
        } else {
            format!("row-{}", position)
        }
    }

    /// Image to render: the sheet value when present, otherwise a generated
    /// avatar keyed by name.
    pub fn display_image(&self) -> String {
        if self.image_url.is_empty() {
            avatar_url(&self.name)
        } else {
            self.image_url.clone()
        }
    }
}

pub fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=217d91&color=fff&size=64",
        name.trim().replace(' ', "+")
    )
}

/// Append the records of `incoming` whose identity key is not already
/// present in `existing`, in fetch order. Previously accumulated records
/// are never reordered or replaced.
pub fn merge_unseen(existing: &mut Vec<ProspectRecord>, incoming: Vec<ProspectRecord>) {
    let mut seen: HashSet<String> = existing
        .iter()
        .enumerate()
        .map(|(i, p)| p.identity_key(i))
        .collect();

    for (i, prospect) in incoming.into_iter().enumerate() {
        if seen.insert(prospect.identity_key(i)) {
            existing.push(prospect);
        }
    }
}

/// Display order of the results view. `EndFirst` shows the most recently
/// appended records first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "endFirst")]
    EndFirst,
    #[serde(rename = "startFirst")]
    StartFirst,
}

pub fn apply_sort(mut records: Vec<ProspectRecord>, order: SortOrder) -> Vec<ProspectRecord> {
    if order == SortOrder::EndFirst {
        records.reverse();
    }
    records
}

#[cfg(test)]
pub(crate) fn record(name: &str, linkedin_url: &str) -> ProspectRecord {
    ProspectRecord {
        name: name.to_string(),
        title: String::new(),
        linkedin_url: linkedin_url.to_string(),
        about: String::new(),
        image_url: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_key_prefers_linkedin_url() {
        let p = record("Sarah Johnson", "https://linkedin.com/in/sarah-johnson");
        assert_eq!(p.identity_key(0), "https://linkedin.com/in/sarah-johnson");
    }

    #[test]
    fn identity_key_falls_back_to_name_then_position() {
        let p = record("Sarah Johnson", "");
        assert_eq!(p.identity_key(3), "Sarah Johnson");

        let blank = record("", "");
        assert_eq!(blank.identity_key(3), "row-3");
    }

    #[test]
    fn display_image_substitutes_generated_avatar() {
        let p = record("Sarah Johnson", "https://linkedin.com/in/sarah-johnson");
        assert_eq!(
            p.display_image(),
            "https://ui-avatars.com/api/?name=Sarah+Johnson&background=217d91&color=fff&size=64"
        );

        let mut with_image = record("Sarah Johnson", "");
        with_image.image_url = "https://example.com/sarah.png".to_string();
        assert_eq!(with_image.display_image(), "https://example.com/sarah.png");
    }

    #[test]
    fn merge_keeps_existing_order_and_appends_unseen() {
        let mut existing = vec![
            record("A", "https://linkedin.com/in/a"),
            record("B", "https://linkedin.com/in/b"),
            record("C", "https://linkedin.com/in/c"),
        ];
        let incoming = vec![
            record("A", "https://linkedin.com/in/a"),
            record("D", "https://linkedin.com/in/d"),
            record("B", "https://linkedin.com/in/b"),
            record("E", "https://linkedin.com/in/e"),
            record("F", "https://linkedin.com/in/f"),
        ];

        merge_unseen(&mut existing, incoming);

        let names: Vec<&str> = existing.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn merge_never_duplicates_a_non_empty_key() {
        let mut existing = vec![record("A", "https://linkedin.com/in/a")];
        let incoming = vec![
            record("A", "https://linkedin.com/in/a"),
            record("A", "https://linkedin.com/in/a"),
        ];

        merge_unseen(&mut existing, incoming);

        let keys: Vec<String> = existing
            .iter()
            .enumerate()
            .map(|(i, p)| p.identity_key(i))
            .collect();
        let unique: std::collections::HashSet<&String> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
        assert_eq!(existing.len(), 1);
    }

    #[test]
    fn end_first_sort_reverses_fetch_order() {
        let records = vec![record("A", ""), record("B", ""), record("C", "")];

        let newest_first = apply_sort(records.clone(), SortOrder::EndFirst);
        let names: Vec<&str> = newest_first.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);

        let oldest_first = apply_sort(records, SortOrder::StartFirst);
        let names: Vec<&str> = oldest_first.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
