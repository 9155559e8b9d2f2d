use std::borrow::Cow;
use std::convert::Into;
use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;
use std::result::Result as StdResult;

pub type Result<T> = StdResult<T, Error>;

macro_rules! from {
    ($src:path, $dst:path) => {
        impl From<$src> for Error {
            fn from(err: $src) -> Error {
                Error::new($dst(err))
            }
        }
    };
}

#[derive(Debug)]
pub enum Kind {
    NotADirectory,
    Io(IoError),
}

pub struct Error {
    pub kind: Kind,
    pub details: Option<Cow<'static, str>>,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            kind,
            details: None,
        }
    }

    pub fn new_with_details<I>(kind: Kind, details: I) -> Error
    where
        I: Into<Cow<'static, str>>,
    {
        Error {
            kind,
            details: Some(details.into()),
        }
    }

    /// Attach (or replace) details, usually the path being worked on.
    pub fn with_details<I>(mut self, details: I) -> Error
    where
        I: Into<Cow<'static, str>>,
    {
        self.details = Some(details.into());
        self
    }

    fn txt(&self) -> &str {
        match self.kind {
            Kind::NotADirectory => "input is not a directory",
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
        write!(f, r#"(:error {:?} ("{}""#, self.kind, self.txt())?;

        if let Some(details) = self.details.as_ref() {
            write!(f, r#" "{}""#, details)?;
        }

        write!(f, "))")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.kind {
            Kind::NotADirectory => None,
            Kind::Io(ref err) => Some(err),
        }
    }
}

from!(IoError, Kind::Io);
