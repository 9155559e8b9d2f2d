use std::fmt;

use crate::annex_c;
use crate::cursor::Cursor;
use crate::descriptor::RawDescriptor;
use crate::error::{Error, Kind as ErrorKind};
use crate::result::Result;
use crate::running_status::RunningStatus;

/// ETSI EN 300 468 V1.16.1
///
/// One event of the Event Information Table as enigma2 stores it in
/// `.eit` files: the fixed 12-byte event header followed by the
/// descriptor loop.
pub struct Event<'buf> {
    buf: &'buf [u8],
}

impl<'buf> Event<'buf> {
    pub const HEADER_SZ: usize = 12;

    #[inline(always)]
    pub fn new(buf: &'buf [u8]) -> Event<'buf> {
        Event { buf }
    }

    #[inline(always)]
    pub fn try_new(buf: &'buf [u8]) -> Result<Event<'buf>> {
        let e = Event::new(buf);
        e.validate()?;
        Ok(e)
    }

    #[inline(always)]
    pub fn validate(&self) -> Result<()> {
        if self.buf.len() < Self::HEADER_SZ {
            Err(Error::new(ErrorKind::TooShort(self.buf.len())))
        } else {
            Ok(())
        }
    }

    #[inline(always)]
    pub fn event_id(&self) -> u16 {
        (u16::from(self.buf[0]) << 8) | u16::from(self.buf[1])
    }

    #[inline(always)]
    pub fn mjd(&self) -> u16 {
        (u16::from(self.buf[2]) << 8) | u16::from(self.buf[3])
    }

    /// (y, m, d)
    #[inline(always)]
    pub fn start_date(&self) -> (i32, i32, i32) {
        annex_c::mjd_to_ymd(self.mjd())
    }

    /// (hh, mm, ss)
    #[inline(always)]
    pub fn start_time(&self) -> (u8, u8, u8) {
        let b = &self.buf[4..7];
        (annex_c::bcd(b[0]), annex_c::bcd(b[1]), annex_c::bcd(b[2]))
    }

    /// (hh, mm, ss)
    #[inline(always)]
    pub fn duration(&self) -> (u8, u8, u8) {
        let b = &self.buf[7..10];
        (annex_c::bcd(b[0]), annex_c::bcd(b[1]), annex_c::bcd(b[2]))
    }

    #[inline(always)]
    pub fn running_status(&self) -> RunningStatus {
        RunningStatus::from((self.buf[10] & 0b1110_0000) >> 5)
    }

    #[inline(always)]
    pub fn free_ca_mode(&self) -> bool {
        (self.buf[10] & 0b0001_0000) != 0
    }

    #[inline(always)]
    pub fn descriptors_loop_length(&self) -> u16 {
        (u16::from(self.buf[10] & 0b0000_1111) << 8) | u16::from(self.buf[11])
    }

    /// seek
    ///
    /// Everything after the header up to the end of the buffer; recorded
    /// files do not always agree with `descriptors_loop_length`.
    #[inline(always)]
    fn buf_descriptors(&self) -> &'buf [u8] {
        &self.buf[Self::HEADER_SZ..]
    }

    #[inline(always)]
    pub fn descriptors(&self) -> Cursor<'buf, RawDescriptor<'buf>> {
        Cursor::new(self.buf_descriptors())
    }
}

impl<'buf> fmt::Debug for Event<'buf> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.start_date();
        let (hh, mm, ss) = self.start_time();
        let (dh, dm, ds) = self.duration();

        write!(
            f,
            ":event (:id {} :start {:04}-{:02}-{:02}T{:02}:{:02}:{:02} :duration {:02}:{:02}:{:02} :running-status {:?} :free-ca {} :descriptors-loop-length {})",
            self.event_id(),
            y, m, d, hh, mm, ss, dh, dm, ds,
            self.running_status(),
            self.free_ca_mode(),
            self.descriptors_loop_length(),
        )?;

        write!(f, "\n  :descriptors")?;
        for resd in self.descriptors() {
            write!(f, "\n    ")?;
            match resd.and_then(|d| d.decode()) {
                Ok(d) => d.fmt(f)?,
                Err(err) => write!(f, "error parse descriptor: {}", err)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Event;
    use crate::error::{Error, Kind as ErrorKind};
    use crate::running_status::RunningStatus;
    use hex_literal::hex;

    #[test]
    fn parse_header() {
        let buf = hex!("12 34 E1 71 15 00 00 01 30 00 90 0F");
        let e = Event::try_new(&buf).unwrap();

        assert_eq!(e.event_id(), 0x1234);
        assert_eq!(e.start_date(), (2016, 11, 21));
        assert_eq!(e.start_time(), (15, 0, 0));
        assert_eq!(e.duration(), (1, 30, 0));
        assert_eq!(e.running_status(), RunningStatus::Running);
        assert!(e.free_ca_mode());
        assert_eq!(e.descriptors_loop_length(), 0x00F);
        assert_eq!(e.descriptors().count(), 0);
    }

    #[test]
    fn err_too_short() {
        let buf = hex!("12 34 E1 71 15 00 00 01 30 00 90");

        assert_eq!(
            Event::try_new(&buf).err(),
            Some(Error::new(ErrorKind::TooShort(11)))
        );
    }
}
