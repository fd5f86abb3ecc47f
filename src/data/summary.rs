use super::error::QueryError;
use super::model::{CategoryBreakdown, CategorySlice, RecordStore, SiteSelector};

pub const FAILURE_LABEL: &str = "Failure";
pub const SUCCESS_LABEL: &str = "Success";

/// Pie-chart breakdown for the given selector.
///
/// * `AllSites` – successful launches per site, in order of each site's first
///   success. Sites without a success do not appear.
/// * `Site(name)` – exactly `[Failure, Success]` counts for that site, zeros
///   included.
pub fn summarize(
    store: &RecordStore,
    selector: &SiteSelector,
) -> Result<CategoryBreakdown, QueryError> {
    match selector {
        SiteSelector::AllSites => Ok(successes_by_site(store)),
        SiteSelector::Site(name) => {
            store.require_site(name)?;
            Ok(outcomes_for_site(store, name))
        }
    }
}

fn successes_by_site(store: &RecordStore) -> CategoryBreakdown {
    let mut slices: CategoryBreakdown = Vec::new();
    for rec in store.records().iter().filter(|r| r.outcome) {
        match slices.iter_mut().find(|s| s.label == rec.site) {
            Some(slice) => slice.count += 1,
            None => slices.push(CategorySlice {
                label: rec.site.clone(),
                count: 1,
            }),
        }
    }
    slices
}

fn outcomes_for_site(store: &RecordStore, name: &str) -> CategoryBreakdown {
    let (successes, failures) = store
        .records()
        .iter()
        .filter(|r| r.site == name)
        .fold((0usize, 0usize), |(ok, fail), r| {
            if r.outcome {
                (ok + 1, fail)
            } else {
                (ok, fail + 1)
            }
        });

    vec![
        CategorySlice {
            label: FAILURE_LABEL.to_string(),
            count: failures,
        },
        CategorySlice {
            label: SUCCESS_LABEL.to_string(),
            count: successes,
        },
    ]
}
