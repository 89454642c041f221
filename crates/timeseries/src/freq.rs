//! Sampling frequency inference and future-index generation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDateTime, TimeDelta};

/// Regular spacing of a time index.
///
/// Fixed-width steps cover sub-daily, daily and weekly data. Calendar
/// months cannot be expressed as a fixed [`TimeDelta`], so they get their
/// own variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frequency {
    /// A constant step, e.g. one hour or one day.
    Fixed(TimeDelta),
    /// `n` calendar months, keeping the day of month.
    Months(u32),
    /// `n` calendar months, pinned to the last day of each month.
    MonthEnd(u32),
}

impl Frequency {
    /// Infers the frequency of a strictly increasing time index.
    ///
    /// Rules, tried in order:
    /// 1. all consecutive differences equal → [`Frequency::Fixed`]
    /// 2. every timestamp is the last day of its month, same time of day,
    ///    constant month step → [`Frequency::MonthEnd`]
    /// 3. same day of month and time of day, constant month step →
    ///    [`Frequency::Months`]
    ///
    /// Returns `None` for fewer than two timestamps or irregular spacing.
    pub fn infer(time: &[NaiveDateTime]) -> Option<Self> {
        if time.len() < 2 {
            return None;
        }

        let step = time[1] - time[0];
        if step > TimeDelta::zero() && time.windows(2).all(|w| w[1] - w[0] == step) {
            return Some(Self::Fixed(step));
        }

        let month_step = month_index(&time[1]) - month_index(&time[0]);
        if month_step <= 0 {
            return None;
        }
        let constant_months = time
            .windows(2)
            .all(|w| month_index(&w[1]) - month_index(&w[0]) == month_step);
        let same_clock = time.iter().all(|t| t.time() == time[0].time());
        if !constant_months || !same_clock {
            return None;
        }

        let n = month_step as u32;
        if time.iter().all(is_month_end) {
            Some(Self::MonthEnd(n))
        } else if time.iter().all(|t| t.day() == time[0].day()) {
            Some(Self::Months(n))
        } else {
            None
        }
    }

    /// Returns `t` advanced by `k` steps, or `None` on calendar overflow.
    pub fn advance(&self, t: NaiveDateTime, k: u32) -> Option<NaiveDateTime> {
        match *self {
            Self::Fixed(step) => {
                let k = i32::try_from(k).ok()?;
                t.checked_add_signed(step.checked_mul(k)?)
            }
            Self::Months(n) => t.checked_add_months(Months::new(n.checked_mul(k)?)),
            Self::MonthEnd(n) => {
                let first = t.with_day(1)?;
                let months = n.checked_mul(k)?.checked_add(1)?;
                first
                    .checked_add_months(Months::new(months))?
                    .checked_sub_signed(TimeDelta::days(1))
            }
        }
    }

    /// Returns the `steps` timestamps strictly after `last`.
    pub fn future_times(&self, last: NaiveDateTime, steps: usize) -> Option<Vec<NaiveDateTime>> {
        (1..=steps)
            .map(|k| self.advance(last, u32::try_from(k).ok()?))
            .collect()
    }
}

fn month_index(t: &NaiveDateTime) -> i64 {
    i64::from(t.year()) * 12 + i64::from(t.month0())
}

fn is_month_end(t: &NaiveDateTime) -> bool {
    t.date().succ_opt().is_some_and(|next| next.month() != t.month())
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(step) => {
                let secs = step.num_seconds();
                if secs % 86_400 == 0 {
                    write!(f, "{}d", secs / 86_400)
                } else if secs % 3_600 == 0 {
                    write!(f, "{}h", secs / 3_600)
                } else if secs % 60 == 0 {
                    write!(f, "{}min", secs / 60)
                } else {
                    write!(f, "{secs}s")
                }
            }
            Self::Months(n) => write!(f, "{n}M"),
            Self::MonthEnd(n) => write!(f, "{n}ME"),
        }
    }
}

/// Parses `"<n><unit>"`, e.g. `"1d"`, `"6h"`, `"15min"`, `"2w"`, `"3M"`, `"1ME"`.
///
/// A missing count means 1.
impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (count, unit) = s.split_at(split);
        let n: u32 = if count.is_empty() {
            1
        } else {
            count
                .parse()
                .map_err(|_| format!("invalid frequency count in '{s}'"))?
        };
        if n == 0 {
            return Err(format!("frequency count must be >= 1 in '{s}'"));
        }
        let fixed = |secs: i64| Ok(Self::Fixed(TimeDelta::seconds(secs * i64::from(n))));
        match unit {
            "s" => fixed(1),
            "min" => fixed(60),
            "h" => fixed(3_600),
            "d" => fixed(86_400),
            "w" => fixed(7 * 86_400),
            "M" | "MS" => Ok(Self::Months(n)),
            "ME" => Ok(Self::MonthEnd(n)),
            _ => Err(format!("unknown frequency unit '{unit}' in '{s}'")),
        }
    }
}
