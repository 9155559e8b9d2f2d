//! ETSI EN 300 468 Annex C: MJD / UTC conversion
use chrono::prelude::*;

use crate::cursor::ByteCursor;
use crate::result::Result;

/// simple binary-coded decimal converter
///
/// Nibbles above 9 are not rejected: `0xFF` gives 165.
#[inline(always)]
pub fn bcd(hex: u8) -> u8 {
    let digit1 = (hex & 0xF0) >> 4;
    let digit2 = hex & 0x0F;

    digit1 * 10 + digit2
}

/// three consecutive BCD bytes: (hh, mm, ss)
pub fn bcd_triple(buf: &[u8]) -> Result<(u8, u8, u8)> {
    let c = ByteCursor::new(buf);

    Ok((bcd(c.u8_at(0)?), bcd(c.u8_at(1)?), bcd(c.u8_at(2)?)))
}

/// Modified Julian Date to YMD
///
/// Reference arithmetic of the annex, evaluated in `f64` with `floor`.
/// No calendar library is involved, so dates before 1900 or out of the
/// 16-bit range come out exactly as the formula gives them.
pub fn mjd_to_ymd(mjd: u16) -> (i32, i32, i32) {
    let mjd = f64::from(mjd);

    let y_y = ((mjd - 15_078.2) / 365.25).floor();
    let y_y_days = (y_y * 365.25).floor();
    let m_m = ((mjd - 14_956.1 - y_y_days) / 30.6001).floor();
    let d = mjd - 14_956.0 - y_y_days - (m_m * 30.6001).floor();

    let k = if m_m == 14.0 || m_m == 15.0 { 1 } else { 0 };

    let (y_y, m_m, d) = (y_y as i32, m_m as i32, d as i32);

    (1900 + y_y + k, m_m - 1 - k * 12, d)
}

/// Start timestamp at minute precision; the seconds byte of the event
/// header is not part of it.
///
/// `None` when any piece fails calendar validation (month 13, day 32,
/// minute 61, ...)
pub fn to_date_time(date: (i32, i32, i32), time: (u8, u8)) -> Option<DateTime<Utc>> {
    let (y, m, d) = date;
    let (hh, mm) = time;

    if m < 1 || d < 1 {
        return None;
    }

    NaiveDate::from_ymd_opt(y, m as u32, d as u32)
        .and_then(|date| date.and_hms_opt(u32::from(hh), u32::from(mm), 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[inline(always)]
pub fn duration_secs(hms: (u8, u8, u8)) -> u32 {
    let (hh, mm, ss) = hms;

    u32::from(hh) * 3600 + u32::from(mm) * 60 + u32::from(ss)
}
