use itertools::Itertools;

use crate::domain::prospect::ProspectRecord;

/// CSV artifact offered from the results view. Commas inside the free-text
/// about column are replaced with semicolons instead of full CSV escaping;
/// embedded quotes are left as-is.
pub fn to_csv(records: &[ProspectRecord]) -> String {
    let rows = records
        .iter()
        .map(|p| {
            format!(
                r#""{}","{}","{}","{}""#,
                p.name,
                p.title,
                p.linkedin_url,
                p.about.replace(',', ";")
            )
        })
        .join("\n");

    format!("Name,Title,LinkedIn,About\n{}", rows)
}

#[cfg(test)]
mod tests {
    use super::to_csv;
    use crate::domain::prospect::ProspectRecord;

    #[test]
    fn csv_has_header_and_one_quoted_row_per_record() {
        let records = vec![
            ProspectRecord {
                name: "Sarah Johnson".to_string(),
                title: "Senior Event Manager".to_string(),
                linkedin_url: "https://linkedin.com/in/sarah-johnson".to_string(),
                about: "Experienced planner, 8+ years, FMCG".to_string(),
                image_url: String::new(),
            },
            ProspectRecord {
                name: "Rahul Sharma".to_string(),
                title: "Event Coordinator".to_string(),
                linkedin_url: "https://linkedin.com/in/rahul-sharma".to_string(),
                about: String::new(),
                image_url: String::new(),
            },
        ];

        let csv = to_csv(&records);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Name,Title,LinkedIn,About");
        assert_eq!(
            lines[1],
            r#""Sarah Johnson","Senior Event Manager","https://linkedin.com/in/sarah-johnson","Experienced planner; 8+ years; FMCG""#
        );
        assert_eq!(
            lines[2],
            r#""Rahul Sharma","Event Coordinator","https://linkedin.com/in/rahul-sharma","""#
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn csv_of_no_records_is_just_the_header() {
        assert_eq!(to_csv(&[]), "Name,Title,LinkedIn,About\n");
    }
}
