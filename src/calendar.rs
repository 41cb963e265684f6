//! Month axis for day-of-year charts.
//!
//! Everything here is computed against a 365-day reference year. In a leap
//! year every boundary after February sits one day early relative to the
//! data; the axis is not adjusted for it.

use time::Month;

/// Length of each month of a non-leap year, January first.
pub const MONTH_LENGTHS: [u16; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Number of days in the reference year.
pub const REFERENCE_YEAR_DAYS: u16 = 365;

/// A single tick on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: Option<String>,
    /// Whether a tick mark is drawn. Month ends get a mark and no text,
    /// month centres get text and no mark.
    pub tick_visible: bool,
}

impl AxisTick {
    fn boundary(position: f64) -> Self {
        Self {
            position,
            label: None,
            tick_visible: true,
        }
    }

    fn midpoint(position: f64, label: String) -> Self {
        Self {
            position,
            label: Some(label),
            tick_visible: false,
        }
    }

    /// The label text, empty for unlabeled ticks.
    pub fn text(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthAxis {
    // day-of-year of the end of every month but December
    boundaries: Vec<u16>,
    midpoints: Vec<f64>,
    labels: Vec<String>,
    // boundaries and midpoints merged, sorted by position
    ticks: Vec<AxisTick>,
}

impl Default for MonthAxis {
    fn default() -> Self {
        Self::new()
    }
}

impl MonthAxis {
    pub fn new() -> Self {
        let mut boundaries = Vec::with_capacity(MONTH_LENGTHS.len() - 1);
        let mut midpoints = Vec::with_capacity(MONTH_LENGTHS.len());
        let mut labels = Vec::with_capacity(MONTH_LENGTHS.len());

        let mut start = 0;
        let mut month = Month::January;
        for (index, &length) in MONTH_LENGTHS.iter().enumerate() {
            midpoints.push(f64::from(start) + f64::from(length) / 2.0);
            labels.push(initial(month));

            start += length;
            if index + 1 < MONTH_LENGTHS.len() {
                boundaries.push(start);
            }
            month = month.next();
        }

        let mut ticks: Vec<AxisTick> = boundaries
            .iter()
            .map(|&boundary| AxisTick::boundary(f64::from(boundary)))
            .chain(
                midpoints
                    .iter()
                    .zip(&labels)
                    .map(|(&midpoint, label)| AxisTick::midpoint(midpoint, label.clone())),
            )
            .collect();
        ticks.sort_by(|left, right| left.position.total_cmp(&right.position));

        Self {
            boundaries,
            midpoints,
            labels,
            ticks,
        }
    }

    pub fn boundaries(&self) -> &[u16] {
        &self.boundaries
    }

    pub fn midpoints(&self) -> &[f64] {
        &self.midpoints
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn ticks(&self) -> &[AxisTick] {
        &self.ticks
    }

    /// Positions of the vertical month separators.
    pub fn separators(&self) -> impl Iterator<Item = f64> + '_ {
        self.boundaries.iter().map(|&boundary| f64::from(boundary))
    }

    /// Label of the tick at exactly `position`, if there is one.
    pub fn label_at(&self, position: f64) -> Option<&str> {
        self.ticks
            .iter()
            .find(|tick| (tick.position - position).abs() < 1e-9)
            .map(AxisTick::text)
    }
}

fn initial(month: Month) -> String {
    month.to_string().chars().take(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_lengths_make_a_common_year() {
        let total: u16 = MONTH_LENGTHS.iter().sum();
        assert_eq!(total, REFERENCE_YEAR_DAYS);

        let mut month = Month::January;
        for &length in &MONTH_LENGTHS {
            assert_eq!(time::util::days_in_year_month(2023, month), length as u8);
            month = month.next();
        }
    }

    #[test]
    fn shape() {
        let axis = MonthAxis::new();
        assert_eq!(axis.boundaries().len(), 11);
        assert_eq!(axis.midpoints().len(), 12);
        assert_eq!(axis.labels().len(), 12);
        assert_eq!(axis.ticks().len(), 23);
        assert_eq!(
            axis.labels(),
            ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"]
        );
    }

    #[test]
    fn boundaries_are_cumulative_month_ends() {
        let axis = MonthAxis::new();
        assert_eq!(
            axis.boundaries(),
            [31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334]
        );
        assert_eq!(axis.boundaries().last(), Some(&334));
    }

    #[test]
    fn midpoints_sit_in_the_middle_of_each_month() {
        let axis = MonthAxis::new();
        assert_eq!(axis.midpoints()[0], 15.5);
        assert_eq!(axis.midpoints()[1], 45.0);
        assert_eq!(axis.midpoints()[11], 349.5);
    }

    #[test]
    fn ticks_alternate_and_increase() {
        let axis = MonthAxis::new();
        for (index, &boundary) in axis.boundaries().iter().enumerate() {
            let boundary = f64::from(boundary);
            assert!(axis.midpoints()[index] < boundary);
            assert!(boundary < axis.midpoints()[index + 1]);
        }

        let ticks = axis.ticks();
        assert!(ticks.windows(2).all(|pair| pair[0].position < pair[1].position));
        for (index, tick) in ticks.iter().enumerate() {
            // even slots hold month centres, odd slots month ends
            assert_eq!(tick.tick_visible, index % 2 == 1);
            assert_eq!(tick.label.is_none(), tick.tick_visible);
        }
    }

    #[test]
    fn january_ticks() {
        let axis = MonthAxis::new();
        let end = &axis.ticks()[1];
        assert_eq!(end.position, 31.0);
        assert_eq!(end.text(), "");
        assert!(end.tick_visible);

        let centre = &axis.ticks()[0];
        assert_eq!(centre.position, 15.5);
        assert_eq!(centre.label.as_deref(), Some("J"));
        assert!(!centre.tick_visible);

        assert_eq!(axis.label_at(15.5), Some("J"));
        assert_eq!(axis.label_at(31.0), Some(""));
        assert_eq!(axis.label_at(100.0), None);
    }

    #[test]
    fn construction_is_pure() {
        assert_eq!(MonthAxis::new(), MonthAxis::new());
        assert_eq!(MonthAxis::default(), MonthAxis::new());
    }
}
