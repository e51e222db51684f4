use crate::models::CourseRecord;

/// Records whose title contains `term`, ignoring case, in their original order.
/// An empty term matches every titled record.
pub fn search<'a>(records: &'a [CourseRecord], term: &str) -> Vec<&'a CourseRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record.title_contains(&needle))
        .collect()
}
