//! Descriptive statistics over joined rows.

use crate::mobility::counts::{
    COL_BICYCLE_IN, COL_BICYCLE_OUT, COL_PEDESTRIAN_IN, COL_PEDESTRIAN_OUT,
};
use crate::mobility::join::JoinedRow;
use crate::weather_data::extractor::{COL_HUMIDITY, COL_RAIN_1H, COL_TEMP, COL_WIND_SPEED};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

type Measure = (&'static str, fn(&JoinedRow) -> Option<f64>);

/// Numeric columns of a joined row, named as in the joined CSV.
static MEASURES: [Measure; 8] = [
    (COL_TEMP, |r| r.temperature),
    (COL_HUMIDITY, |r| r.humidity),
    (COL_WIND_SPEED, |r| r.wind_speed),
    (COL_RAIN_1H, |r| r.precipitation),
    (COL_BICYCLE_IN, |r| r.count.bicycle_in),
    (COL_BICYCLE_OUT, |r| r.count.bicycle_out),
    (COL_PEDESTRIAN_IN, |r| r.count.pedestrian_in),
    (COL_PEDESTRIAN_OUT, |r| r.count.pedestrian_out),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMean {
    pub date: NaiveDate,
    pub temperature: Option<f64>,
    pub bicycle_in: Option<f64>,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    n: usize,
}

impl Accumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.n += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

/// Per-date means of temperature and incoming bicycles, ordered by date.
/// Empty values are skipped; a date with no values at all yields `None`.
pub fn daily_means(rows: &[JoinedRow]) -> Vec<DailyMean> {
    let mut days: BTreeMap<NaiveDate, (Accumulator, Accumulator)> = BTreeMap::new();
    for row in rows {
        let (temperature, bicycles) = days.entry(row.count.timestamp.date_naive()).or_default();
        temperature.push(row.temperature);
        bicycles.push(row.count.bicycle_in);
    }
    days.into_iter()
        .map(|(date, (temperature, bicycles))| DailyMean {
            date,
            temperature: temperature.mean(),
            bicycle_in: bicycles.mean(),
        })
        .collect()
}

/// Pearson correlation coefficient of two equally long samples.
///
/// `None` with fewer than two pairs or when either side is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Correlation between hourly temperature and incoming bicycles, over rows
/// where both are present.
pub fn temperature_bicycle_correlation(rows: &[JoinedRow]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = rows
        .iter()
        .filter_map(|r| Some((r.temperature?, r.count.bicycle_in?)))
        .unzip();
    pearson(&xs, &ys)
}

/// One cell of [`correlation_matrix`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub left: &'static str,
    pub right: &'static str,
    /// Number of rows where both columns are present.
    pub pairs: usize,
    pub r: Option<f64>,
}

/// Pairwise correlations between every two numeric columns of the joined
/// rows, each computed over the rows where both values are present.
pub fn correlation_matrix(rows: &[JoinedRow]) -> Vec<Correlation> {
    let mut cells = Vec::with_capacity(MEASURES.len() * (MEASURES.len() - 1) / 2);
    for (i, (left, left_value)) in MEASURES.iter().enumerate() {
        for (right, right_value) in &MEASURES[i + 1..] {
            let (xs, ys): (Vec<f64>, Vec<f64>) = rows
                .iter()
                .filter_map(|row| Some((left_value(row)?, right_value(row)?)))
                .unzip();
            cells.push(Correlation {
                left: *left,
                right: *right,
                pairs: xs.len(),
                r: pearson(&xs, &ys),
            });
        }
    }
    cells
}

/// Occurrences of each distinct value, most frequent first. Ties keep the
/// order in which the values first appeared.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Hash + Eq + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match index.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Number of joined rows per counting site.
pub fn site_counts(rows: &[JoinedRow]) -> Vec<(String, usize)> {
    value_counts(rows.iter().map(|r| r.count.site_id.clone()))
}
