use std::collections::HashMap;

use crate::models::CourseRecord;

/// Concatenate per-source batches and collapse records sharing a title.
///
/// A title keeps the position where it was first seen, but the record stored
/// there is the last one carrying that title. Untitled records share a single
/// slot, like any other key.
pub fn aggregate(batches: &[Vec<CourseRecord>]) -> Vec<CourseRecord> {
    let mut positions: HashMap<Option<&str>, usize> = HashMap::new();
    let mut merged: Vec<CourseRecord> = Vec::new();

    for record in batches.iter().flatten() {
        let key = record.title.as_deref();
        match positions.get(&key) {
            Some(&index) => merged[index] = record.clone(),
            None => {
                positions.insert(key, merged.len());
                merged.push(record.clone());
            }
        }
    }

    merged
}
