use super::error::QueryError;
use super::model::{PayloadRange, RecordStore, ScatterPoint, SiteSelector};

/// Scatter points for the given selector and payload window.
///
/// The range only applies to a single-site view: `AllSites` always returns
/// the whole table, even for an invalid range.
/// For `Site(name)` the site is checked before the range.
pub fn filter(
    store: &RecordStore,
    selector: &SiteSelector,
    range: PayloadRange,
) -> Result<Vec<ScatterPoint>, QueryError> {
    match selector {
        SiteSelector::AllSites => Ok(store.records().iter().map(ScatterPoint::from).collect()),
        SiteSelector::Site(name) => {
            store.require_site(name)?;
            range.validate()?;
            Ok(store
                .records()
                .iter()
                .filter(|r| r.site == *name && range.contains(r.payload_mass_kg))
                .map(ScatterPoint::from)
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{record, sample_store};

    fn payloads(points: &[ScatterPoint]) -> Vec<f64> {
        points.iter().map(|p| p.payload_mass_kg).collect()
    }

    #[test]
    fn test_all_sites_ignores_range() {
        let store = sample_store();
        let all = SiteSelector::AllSites;
        let full = filter(&store, &all, PayloadRange::new(0.0, 10_000.0)).unwrap();
        let narrow = filter(&store, &all, PayloadRange::new(600.0, 700.0)).unwrap();
        let inverted = filter(&store, &all, PayloadRange::new(5.0, 1.0)).unwrap();

        assert_eq!(full, narrow);
        assert_eq!(full, inverted);
        assert_eq!(full.len(), store.len());
        let expected: Vec<ScatterPoint> = store.records().iter().map(ScatterPoint::from).collect();
        assert_eq!(full, expected);
    }

    #[test]
    fn test_single_site_inclusive_range() {
        let store = RecordStore::from_records(vec![
            record("A", true, 500.0, "FT"),
            record("A", false, 1500.0, "v1.1"),
            record("A", true, 3000.0, "FT"),
            record("B", true, 1500.0, "B4"),
        ])
        .unwrap();

        let site = SiteSelector::Site("A".into());
        let points = filter(&store, &site, PayloadRange::new(1000.0, 2000.0)).unwrap();
        assert_eq!(payloads(&points), vec![1500.0]);
        assert_eq!(points[0].booster_version_category, "v1.1");
        assert!(!points[0].outcome);

        let edges = filter(&store, &site, PayloadRange::new(500.0, 3000.0)).unwrap();
        assert_eq!(payloads(&edges), vec![500.0, 1500.0, 3000.0]);
    }

    #[test]
    fn test_single_site_filter_is_idempotent_and_monotonic() {
        let store = sample_store();
        let site = SiteSelector::Site("A".into());
        let narrow = PayloadRange::new(900.0, 2000.0);
        let wide = PayloadRange::new(400.0, 5000.0);

        let first = filter(&store, &site, narrow).unwrap();
        let refiltered: Vec<ScatterPoint> = first
            .iter()
            .filter(|p| narrow.contains(p.payload_mass_kg))
            .cloned()
            .collect();
        assert_eq!(first, refiltered);

        let widened = filter(&store, &site, wide).unwrap();
        assert!(first.iter().all(|p| widened.contains(p)));
        assert!(widened.len() >= first.len());
    }

    #[test]
    fn test_unknown_site_checked_before_range() {
        let store = sample_store();
        assert_eq!(
            filter(&store, &SiteSelector::Site("Z".into()), PayloadRange::new(2.0, 1.0)),
            Err(QueryError::UnknownSite("Z".into()))
        );
    }

    #[test]
    fn test_inverted_range_rejected_for_single_site() {
        let store = sample_store();
        assert_eq!(
            filter(&store, &SiteSelector::Site("A".into()), PayloadRange::new(2000.0, 1000.0)),
            Err(QueryError::InvalidRange { low: 2000.0, high: 1000.0 })
        );
    }
}
