use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;

#[derive(Debug)]
pub enum Kind {
    /// (end-offset, buffer-length)
    OutOfRange(usize, usize),
    /// fixed EIT header is 12 bytes
    TooShort(usize),

    /// decoder name
    AnnexA2Decode(&'static str),
    /// table-a3 selector without native support
    AnnexA2Unresolved(u8),

    Io(IoError),
}

pub struct Error(Kind);

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error(kind)
    }

    pub fn kind(&self) -> &Kind {
        &self.0
    }

    fn txt(&self) -> &str {
        match self.0 {
            Kind::OutOfRange(..) => "read past the end of buffer",
            Kind::TooShort(..) => "(eit) buffer is shorter than the fixed event header",

            Kind::AnnexA2Decode(..) => "(annex-a2) invalid byte sequence for codepage",
            Kind::AnnexA2Unresolved(..) => "(annex-a2 table-a3) codepage decoded best-effort",

            Kind::Io(..) => "i/o error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"(:error (:txt "{}""#, self.txt())?;

        match self.0 {
            Kind::OutOfRange(end, len) => write!(f, " (:end {} :sz {})", end, len)?,
            Kind::TooShort(len) => write!(f, " (:sz-actual {} :sz-expected 12)", len)?,

            Kind::AnnexA2Decode(name) => write!(f, r#" (:codepage "{}")"#, name)?,
            Kind::AnnexA2Unresolved(b) => write!(f, " (:got 0x{:02X})", b)?,

            Kind::Io(ref err) => write!(f, r#" (:io "{}")"#, err)?,
        }

        write!(f, "))")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.0 {
            Kind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        match (&self.0, &other.0) {
            (Kind::OutOfRange(a1, b1), Kind::OutOfRange(a2, b2)) => a1 == a2 && b1 == b2,
            (Kind::TooShort(a1), Kind::TooShort(a2)) => a1 == a2,
            (Kind::AnnexA2Decode(a1), Kind::AnnexA2Decode(a2)) => a1 == a2,
            (Kind::AnnexA2Unresolved(a1), Kind::AnnexA2Unresolved(a2)) => a1 == a2,
            (Kind::Io(..), Kind::Io(..)) => true,
            _ => false,
        }
    }
}
impl Eq for Error {}

impl From<IoError> for Error {
    fn from(err: IoError) -> Error {
        Error::new(Kind::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Kind};

    #[test]
    fn fmt_out_of_range() {
        let err = Error::new(Kind::OutOfRange(14, 12));
        assert_eq!(
            format!("{}", err),
            r#"(:error (:txt "read past the end of buffer" (:end 14 :sz 12)))"#
        );
    }

    #[test]
    fn eq_by_kind() {
        assert_eq!(
            Error::new(Kind::AnnexA2Unresolved(0x11)),
            Error::new(Kind::AnnexA2Unresolved(0x11))
        );
        assert_ne!(
            Error::new(Kind::TooShort(3)),
            Error::new(Kind::OutOfRange(3, 12))
        );
    }
}
