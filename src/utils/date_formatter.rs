use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFormat {
    Year,      // 2024
    MonthYear, // Mar 2024
    DayMonth,  // 1 Mar
    Long,      // 1 March 2024
}

/// Picks the axis label format from the number of visible days.
pub fn determine_day_format(visible_days: usize) -> DayFormat {
    const MONTH: usize = 30;
    const YEAR: usize = 365;

    if visible_days > YEAR * 2 {
        DayFormat::Year
    } else if visible_days > MONTH * 6 {
        DayFormat::MonthYear
    } else {
        DayFormat::DayMonth
    }
}

pub fn format_day(date: NaiveDate, format: DayFormat) -> String {
    match format {
        DayFormat::Year => date.format("%Y").to_string(),
        DayFormat::MonthYear => date.format("%b %Y").to_string(),
        DayFormat::DayMonth => date.format("%-d %b").to_string(),
        DayFormat::Long => date.format("%-d %B %Y").to_string(),
    }
}
