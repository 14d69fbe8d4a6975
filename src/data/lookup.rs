use super::model::{Dataset, FeatureVector, Row};
use super::project::to_number;

/// Result of matching a feature vector against the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VectorMatch<'a> {
    Found(&'a Row),
    NotFound,
    /// The query held no values; the dataset was not consulted.
    NoValuesSupplied,
}

/// First row whose identifier equals `key` exactly (case-sensitive, untrimmed).
pub fn lookup_by_id<'a>(dataset: &'a Dataset, key: &str) -> Option<&'a Row> {
    dataset
        .position_of(key)
        .and_then(|i| dataset.rows().get(i))
}

/// First row, in dataset order, whose projected features equal `query`
/// position by position under `f64 ==`.
pub fn lookup_by_vector<'a>(dataset: &'a Dataset, query: &FeatureVector) -> VectorMatch<'a> {
    if query.is_empty() {
        return VectorMatch::NoValuesSupplied;
    }
    dataset
        .rows()
        .iter()
        .find(|row| matches_vector(row, query))
        .map_or(VectorMatch::NotFound, VectorMatch::Found)
}

fn matches_vector(row: &Row, query: &FeatureVector) -> bool {
    row.features.len() == query.len()
        && row
            .features
            .iter()
            .zip(query.values())
            .all(|(f, &q)| to_number(&f.value) == q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Feature, FieldValue, FEATURE_COUNT};
    use crate::data::project::project;

    fn row(id: &str, seed: f64, label: i64) -> Row {
        Row {
            id: id.to_string(),
            features: (1..=FEATURE_COUNT)
                .map(|n| Feature {
                    name: format!("X{n}"),
                    value: FieldValue::Number(seed + n as f64),
                })
                .collect(),
            label,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_rows(vec![
            row("X21.V1.79", 0.0, 1),
            row("X15.V1.924", 10.0, 2),
            row("X8.V1.1", 20.0, 5),
        ])
    }

    #[test]
    fn test_lookup_by_id_finds_every_row() {
        let ds = dataset();
        for r in ds.rows() {
            assert_eq!(lookup_by_id(&ds, &r.id), Some(r));
        }
    }

    #[test]
    fn test_lookup_by_id_is_exact() {
        let ds = dataset();
        assert!(lookup_by_id(&ds, "x21.v1.79").is_none());
        assert!(lookup_by_id(&ds, " X21.V1.79").is_none());
        assert!(lookup_by_id(&ds, "").is_none());
        assert!(lookup_by_id(&Dataset::default(), "anything").is_none());
    }

    #[test]
    fn test_lookup_by_vector_round_trips_projection() {
        let ds = dataset();
        for r in ds.rows() {
            match lookup_by_vector(&ds, &project(r)) {
                VectorMatch::Found(found) => assert_eq!(found.label, r.label),
                other => panic!("expected a match for {}, got {other:?}", r.id),
            }
        }
    }

    #[test]
    fn test_lookup_by_vector_prefers_first_duplicate() {
        let ds = Dataset::from_rows(vec![row("first", 0.0, 3), row("second", 0.0, 4)]);
        let query = project(&ds.rows()[1]);
        match lookup_by_vector(&ds, &query) {
            VectorMatch::Found(found) => assert_eq!(found.id, "first"),
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_query_is_distinct_from_miss() {
        let ds = dataset();
        assert_eq!(
            lookup_by_vector(&ds, &FeatureVector::default()),
            VectorMatch::NoValuesSupplied
        );
        assert_eq!(
            lookup_by_vector(&Dataset::default(), &FeatureVector::default()),
            VectorMatch::NoValuesSupplied
        );

        let mut query = project(&ds.rows()[0]);
        query.0[10] += 0.5;
        assert_eq!(lookup_by_vector(&ds, &query), VectorMatch::NotFound);
    }

    #[test]
    fn test_length_mismatch_never_matches() {
        let ds = dataset();
        let mut query = project(&ds.rows()[0]);
        query.0.pop();
        assert_eq!(lookup_by_vector(&ds, &query), VectorMatch::NotFound);
        query.0.extend([177.0, 178.0]);
        assert_eq!(lookup_by_vector(&ds, &query), VectorMatch::NotFound);
    }

    #[test]
    fn test_non_numeric_cell_never_matches() {
        let mut r = row("bad", 0.0, 1);
        r.features[3].value = FieldValue::Text("abc".into());
        let ds = Dataset::from_rows(vec![r]);

        let query = project(&ds.rows()[0]);
        assert!(query.values()[3].is_nan());
        assert_eq!(lookup_by_vector(&ds, &query), VectorMatch::NotFound);
    }
}
