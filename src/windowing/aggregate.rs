use crate::types::weather_record::WeatherRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Most frequent value of `values`.
///
/// When several values share the highest count, the one whose first
/// occurrence comes earliest in the input wins. Returns `None` for an empty
/// input.
pub fn modal_value<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut tally: HashMap<T, (usize, usize)> = HashMap::new();
    for (index, value) in values.into_iter().enumerate() {
        tally
            .entry(value)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, index));
    }
    tally
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Collapses hourly records into one record per UTC calendar date.
///
/// Per date: mean temperature, humidity and wind speed over the rows that are
/// present, total precipitation, modal icon and description, and the earliest
/// timestamp of that date. Output is ordered by date.
pub fn aggregate_daily(records: &[WeatherRecord]) -> Vec<WeatherRecord> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&WeatherRecord>> = BTreeMap::new();
    for record in records {
        by_date
            .entry(record.timestamp.date_naive())
            .or_default()
            .push(record);
    }

    by_date
        .into_values()
        .filter_map(|group| aggregate_group(&group))
        .collect()
}

fn aggregate_group(group: &[&WeatherRecord]) -> Option<WeatherRecord> {
    let timestamp = group.iter().map(|r| r.timestamp).min()?;
    let icon = modal_value(group.iter().map(|r| r.icon.as_str()))?;
    let description = modal_value(group.iter().map(|r| r.description.as_str()))?;

    Some(WeatherRecord {
        timestamp,
        temperature: mean(group.iter().map(|r| r.temperature)),
        humidity: mean(group.iter().map(|r| r.humidity)),
        wind_speed: mean(group.iter().map(|r| r.wind_speed)),
        precipitation: group.iter().map(|r| r.precipitation).sum(),
        icon: icon.to_string(),
        description: description.to_string(),
    })
}
