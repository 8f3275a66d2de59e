/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! Julian day ("yyyyddd") arithmetic. Analysis times are represented as `f64` values of
//! the form `yyyyddd.fraction_of_day`, which is monotonic within a year and is what all
//! history lookups compare against.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use crate::errors::{Result, date_error};

pub const MONTHS: [&str;12] = ["JAN","FEB","MAR","APR","MAY","JUN","JUL","AUG","SEP","OCT","NOV","DEC"];

/// cumulative day count at the start of each month (non leap year)
const MONTH_START_DAY: [i32;13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

pub const ONE_HOUR: f64 = 1.0 / 24.0;

lazy_static! {
    static ref CMONTH_RE: Regex = Regex::new(r"^(\d{2,4})([A-Z]{3})(\d{1,2})$").unwrap();
}

#[inline]
fn expand_year (year: i32)->i32 {
    if year < 1900 {
        if year > 70 { year + 1900 } else { year + 2000 }
    } else {
        year
    }
}

#[inline]
fn is_leap (year: i32)->bool { year % 4 == 0 }

/// continuous analysis time for a julian date (yyyyddd) and a HHMMSS time.
/// Invalid dates (day 0) or negative times map to 0.0
pub fn calc_time (julian_date: i32, hhmmss: i32)->f64 {
    if julian_date % 1000 == 0 || hhmmss < 0 {
        return 0.0
    }

    let year = julian_date / 1000;
    let julian_date = if year < 1900 { expand_year(year) * 1000 + julian_date % 1000 } else { julian_date };

    let secs = (hhmmss % 100) as f64 / 3600.0;
    let mins = ((hhmmss / 100) % 100) as f64 / 60.0;
    let hours = (hhmmss / 10000) as f64;

    julian_date as f64 + (hours + mins + secs) / 24.0
}

/// split a continuous analysis time back into (yyyyddd, HHMMSS), rounding to the nearest second
pub fn split_time (t: f64)->(i32,i32) {
    let date = t.floor() as i32;
    let secs = ((t - t.floor()) * 86400.0).round() as i32;
    let (date, secs) = if secs >= 86400 { (date + 1, secs - 86400) } else { (date, secs) };
    let hhmmss = (secs / 3600) * 10000 + ((secs % 3600) / 60) * 100 + secs % 60;
    (date, hhmmss)
}

/// julian date (yyyyddd) from day/month/year. Two digit years are expanded.
/// Returns `None` for out of range day or month values
pub fn julian_date (day: i32, month: i32, year: i32)->Option<i32> {
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return None
    }

    let year = expand_year(year);
    let mut doy = day + MONTH_START_DAY[(month-1) as usize];
    if is_leap(year) && month > 2 {
        doy += 1;
    }
    Some(year * 1000 + doy)
}

/// (day, month, year) for a julian date (yyyyddd)
pub fn julian_to_dmy (julian_date: i32)->(i32,i32,i32) {
    let year = expand_year(julian_date / 1000);
    let doy = julian_date % 1000;
    let leap = if is_leap(year) { 1 } else { 0 };

    let mut month = 1;
    while month < 12 {
        let month_end = MONTH_START_DAY[month] + if month >= 2 { leap } else { 0 };
        if doy <= month_end { break }
        month += 1;
    }
    let month_start = MONTH_START_DAY[month-1] + if month > 2 { leap } else { 0 };
    (doy - month_start, month as i32, year)
}

/// parse a "2024JAN05" style date into a julian date
pub fn cmonth_to_julian (s: &str)->Result<i32> {
    let caps = CMONTH_RE.captures(s.trim()).ok_or_else(|| date_error(format!("not a yyyyMMMdd date: '{s}'")))?;

    let year: i32 = caps[1].parse().map_err(|_| date_error(format!("invalid year in '{s}'")))?;
    let day: i32 = caps[3].parse().map_err(|_| date_error(format!("invalid day in '{s}'")))?;
    let month = MONTHS.iter().position(|m| *m == &caps[2]).ok_or_else(|| date_error(format!("invalid month in '{s}'")))?;

    julian_date(day, month as i32 + 1, year).ok_or_else(|| date_error(format!("day/month out of range: '{s}'")))
}

/// "yyyyMMMdd" representation of a julian date
pub fn julian_to_cmonth (julian_date: i32)->String {
    let (day,month,year) = julian_to_dmy(julian_date);
    let m = MONTHS.get((month-1) as usize).copied().unwrap_or("???");
    format!("{year:04}{m}{day:02}")
}

pub fn julian_to_naive_date (julian_date: i32)->Option<NaiveDate> {
    NaiveDate::from_yo_opt(expand_year(julian_date / 1000), (julian_date % 1000) as u32)
}

pub fn naive_date_to_julian (date: &NaiveDate)->i32 {
    date.year() * 1000 + date.ordinal() as i32
}

/// (yyyyddd, HHMMSS) pair for a chrono date time
pub fn julian_hhmmss (dt: &NaiveDateTime)->(i32,i32) {
    let t = dt.time();
    (naive_date_to_julian(&dt.date()), (t.hour() * 10000 + t.minute() * 100 + t.second()) as i32)
}
