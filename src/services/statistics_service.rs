// src/services/statistics_service.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{Cartoon, Gender};
use crate::error::AppResult;
use crate::repositories::DemographicRepository;

/// One labeled share of a breakdown, ready for a chart segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticSlice {
    pub label: String,
    pub proportion: f64,
}

impl StatisticSlice {
    fn new(label: &str, count: i64, total: i64) -> Self {
        Self {
            label: label.to_string(),
            proportion: proportion(count, total),
        }
    }
}

/// Round count/total half-up to two decimal places. Integer arithmetic
/// keeps the half-up boundary exact.
fn proportion(count: i64, total: i64) -> f64 {
    let scaled = 100 * count;
    let mut quotient = scaled / total;
    if 2 * (scaled % total) >= total {
        quotient += 1;
    }
    quotient as f64 / 100.0
}

pub struct StatisticsService {
    demographics: Arc<dyn DemographicRepository>,
}

impl StatisticsService {
    pub fn new(demographics: Arc<dyn DemographicRepository>) -> Self {
        Self { demographics }
    }

    /// Share of each gender code among catalogued demographics.
    ///
    /// The counts run over every demographic record in the store, not just
    /// the given cartoon's. Scoping them to the cartoon is a pending
    /// product decision; the cartoon parameter names the chart the caller
    /// renders.
    ///
    /// With no demographic records at all the breakdown is empty.
    pub fn gender_breakdown(&self, cartoon: &Cartoon) -> AppResult<Vec<StatisticSlice>> {
        log::debug!("computing gender breakdown (selected cartoon '{}')", cartoon.title);

        let total = self.demographics.count_all()?;
        if total == 0 {
            return Ok(Vec::new());
        }

        let mut slices = Vec::with_capacity(4);
        for (label, gender) in [
            ("male", Gender::Male),
            ("female", Gender::Female),
            ("unknown", Gender::Unknown),
            ("not applicable", Gender::NotApplicable),
        ] {
            let count = self.demographics.count_by_gender(gender)?;
            slices.push(StatisticSlice::new(label, count, total));
        }

        Ok(slices)
    }

    /// Share of evil, good and unknown characters by the villain
    /// tri-state. Same store-wide scope and empty-store behavior as
    /// `gender_breakdown`.
    pub fn good_vs_evil_breakdown(&self, cartoon: &Cartoon) -> AppResult<Vec<StatisticSlice>> {
        log::debug!(
            "computing good-vs-evil breakdown (selected cartoon '{}')",
            cartoon.title
        );

        let total = self.demographics.count_all()?;
        if total == 0 {
            return Ok(Vec::new());
        }

        let mut slices = Vec::with_capacity(3);
        for (label, villain) in [
            ("evil", Some(true)),
            ("good", Some(false)),
            ("unknown", None),
        ] {
            let count = self.demographics.count_by_villain(villain)?;
            slices.push(StatisticSlice::new(label, count, total));
        }

        Ok(slices)
    }
}
