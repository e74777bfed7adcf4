//! Semester progress of a class relative to today.

use chrono::{Datelike, NaiveDate};

/// Percentage of the class's semester that has elapsed on `today`.
///
/// Semester 1 runs September through January, semester 2 February through
/// June. Classes from a past year are complete and classes from a future
/// year have not started. Unrecognised semesters report 50.
pub fn class_progress(year: i32, semester: u8, today: NaiveDate) -> u8 {
    let current_year = today.year();
    if year < current_year {
        return 100;
    }
    if year > current_year {
        return 0;
    }

    let month = today.month();
    match semester {
        1 => {
            if month >= 9 {
                elapsed(month - 9 + 1)
            } else if month == 1 {
                100
            } else {
                0
            }
        }
        2 => match month {
            2..=6 => elapsed(month - 2 + 1),
            m if m > 6 => 100,
            _ => 0,
        },
        _ => 50,
    }
}

fn elapsed(months: u32) -> u8 {
    let pct = (f64::from(months) / 5.0 * 100.0).round();
    pct.min(100.0) as u8
}
