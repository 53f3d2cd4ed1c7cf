use crate::constants::{MAX_FACTOR, MIN_FACTOR};
use crate::types::TourRecord;
use serde::Serialize;

/// A tour whose shared or private factor is outside the plausible range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorIssue {
    pub id: String,
    pub name: String,
    pub factor_shared: f64,
    pub factor_private: f64,
}

pub fn factor_in_range(factor: f64) -> bool {
    (MIN_FACTOR..=MAX_FACTOR).contains(&factor)
}

pub fn audit_factors<'a, I>(records: I) -> Vec<FactorIssue>
where
    I: IntoIterator<Item = &'a TourRecord>,
{
    records
        .into_iter()
        .filter(|r| !factor_in_range(r.factor_shared) || !factor_in_range(r.factor_private))
        .map(|r| FactorIssue {
            id: r.id.clone(),
            name: r.name.clone(),
            factor_shared: r.factor_shared,
            factor_private: r.factor_private,
        })
        .collect()
}
