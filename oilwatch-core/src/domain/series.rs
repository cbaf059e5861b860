//! PriceSeries — ascending, date-unique daily observations.

use super::observation::Observation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered daily series for one ticker.
///
/// Dates are strictly increasing. The only constructors are
/// [`PriceSeries::from_unordered`] and [`PriceSeries::empty`], so the
/// ordering invariant cannot be bypassed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    observations: Vec<Observation>,
}

impl PriceSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sort ascending by date and drop duplicate dates, keeping the last
    /// occurrence in input order.
    pub fn from_unordered(mut observations: Vec<Observation>) -> Self {
        // stable: equal dates keep input order, so the last one is pushed last
        observations.sort_by_key(|o| o.date);

        let mut deduped: Vec<Observation> = Vec::with_capacity(observations.len());
        for obs in observations {
            match deduped.last_mut() {
                Some(prev) if prev.date == obs.date => *prev = obs,
                _ => deduped.push(obs),
            }
        }

        Self {
            observations: deduped,
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Close prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Close on an exact date, if that date is present.
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.observations
            .binary_search_by_key(&date, |o| o.date)
            .ok()
            .map(|i| self.observations[i].close)
    }

    /// Trailing `n` rows (all rows if the series is shorter).
    ///
    /// This is row-count slicing: "last 14 days" means the last 14
    /// observations, which spans more calendar days across weekends and
    /// exchange holidays.
    pub fn tail(&self, n: usize) -> PriceSeries {
        let start = self.observations.len().saturating_sub(n);
        Self {
            observations: self.observations[start..].to_vec(),
        }
    }
}
