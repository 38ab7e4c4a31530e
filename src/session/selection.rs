use crate::session::error::SelectionError;
use crate::types::city::{City, CitySelection};
use crate::types::time_unit::TimeUnit;
use crate::types::time_window::TimeWindow;
use crate::windowing::error::WindowError;
use bon::{bon, Builder};
use chrono::{DateTime, TimeZone, Utc};

/// Which parts of a weather card and of the page are shown.
///
/// The rain, temperature and wind parts only apply while `show_detail` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct DisplayToggles {
    #[builder(default)]
    pub show_table: bool,
    /// Emoji and description per card.
    #[builder(default)]
    pub show_summary: bool,
    #[builder(default = true)]
    pub show_detail: bool,
    #[builder(default)]
    pub show_rain: bool,
    #[builder(default)]
    pub show_temperature: bool,
    #[builder(default)]
    pub show_wind: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        DisplayToggles::builder().build()
    }
}

impl DisplayToggles {
    pub fn rain(&self) -> bool {
        self.show_detail && self.show_rain
    }

    pub fn temperature(&self) -> bool {
        self.show_detail && self.show_temperature
    }

    pub fn wind(&self) -> bool {
        self.show_detail && self.show_wind
    }
}

/// Everything a user picked on the control panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub cities: CitySelection,
    pub start: DateTime<Utc>,
    pub duration: u32,
    pub unit: TimeUnit,
    pub toggles: DisplayToggles,
}

#[bon]
impl Selection {
    /// Builds a selection. The duration defaults per unit (12 hours, 10 days
    /// or months) and is clamped to `1..=unit.max_duration()`.
    ///
    /// ```
    /// use swiss_mobility_weather::session::selection::Selection;
    /// use swiss_mobility_weather::{CitySelection, TimeUnit};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let selection = Selection::builder()
    ///     .start(Selection::start_from_parts(2023, 1, 1, 1)?)
    ///     .unit(TimeUnit::Hours)
    ///     .duration(48)
    ///     .cities(CitySelection::Both)
    ///     .build();
    /// assert_eq!(selection.duration, 24);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn new(
        start: DateTime<Utc>,
        #[builder(default = CitySelection::Single(City::Zurich))] cities: CitySelection,
        #[builder(default = TimeUnit::Hours)] unit: TimeUnit,
        duration: Option<u32>,
        #[builder(default)] toggles: DisplayToggles,
    ) -> Self {
        let duration = duration
            .unwrap_or_else(|| unit.default_duration())
            .clamp(1, unit.max_duration());
        Self {
            cities,
            start,
            duration,
            unit,
            toggles,
        }
    }

    /// The UTC instant for a date picked on the control panel.
    ///
    /// # Errors
    ///
    /// [`SelectionError::InvalidDate`] for dates that do not exist, such as
    /// February 30th, or hours above 23.
    pub fn start_from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    ) -> Result<DateTime<Utc>, SelectionError> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .ok_or(SelectionError::InvalidDate {
                year,
                month,
                day,
                hour,
            })
    }

    pub fn window(&self) -> Result<TimeWindow, WindowError> {
        TimeWindow::new(self.start, self.duration, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_year() -> DateTime<Utc> {
        Selection::start_from_parts(2023, 1, 1, 1).unwrap()
    }

    #[test]
    fn invalid_dates_are_rejected() {
        assert_eq!(
            Selection::start_from_parts(2023, 2, 30, 1),
            Err(SelectionError::InvalidDate {
                year: 2023,
                month: 2,
                day: 30,
                hour: 1
            })
        );
        assert!(Selection::start_from_parts(2023, 1, 1, 24).is_err());
        assert_eq!(new_year().timestamp(), 1_672_534_800);
    }

    #[test]
    fn duration_defaults_follow_the_unit() {
        let hours = Selection::builder().start(new_year()).build();
        assert_eq!(hours.duration, 12);
        assert_eq!(hours.cities, CitySelection::Single(City::Zurich));

        let days = Selection::builder()
            .start(new_year())
            .unit(TimeUnit::Days)
            .build();
        assert_eq!(days.duration, 10);
    }

    #[test]
    fn duration_is_clamped_to_slider_bounds() {
        let zero = Selection::builder()
            .start(new_year())
            .unit(TimeUnit::Months)
            .duration(0)
            .build();
        assert_eq!(zero.duration, 1);

        let large = Selection::builder()
            .start(new_year())
            .unit(TimeUnit::Days)
            .duration(90)
            .build();
        assert_eq!(large.duration, 31);
    }

    #[test]
    fn detail_toggles_need_the_detail_switch() {
        let toggles = DisplayToggles::builder()
            .show_detail(false)
            .show_rain(true)
            .build();
        assert!(!toggles.rain());

        let toggles = DisplayToggles::builder().show_rain(true).build();
        assert!(toggles.rain());
        assert!(!toggles.wind());
    }
}
