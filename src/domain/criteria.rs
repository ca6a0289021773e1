use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

/// Target-audience criteria submitted from the outreach form. `start_index`
/// is the identifying parameter of a search: a change to it restarts the
/// result poller's fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "organizationType")]
    pub organization_type: String,
    #[serde(
        default,
        rename = "startIndex",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub start_index: usize,
}

#[cfg(test)]
mod tests {
    use super::SearchCriteria;

    #[test]
    fn start_index_accepts_string_and_number_forms() {
        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"designation":"CEO","startIndex":"10"}"#).unwrap();
        assert_eq!(criteria.start_index, 10);
        assert_eq!(criteria.designation, "CEO");

        let criteria: SearchCriteria = serde_json::from_str(r#"{"startIndex":20}"#).unwrap();
        assert_eq!(criteria.start_index, 20);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let criteria: SearchCriteria = serde_json::from_str("{}").unwrap();
        assert_eq!(criteria, SearchCriteria::default());
    }
}
