use std::fmt;

/// ETSI EN 300 468 V1.16.1 table 6
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RunningStatus {
    Undefined,
    NotRunning,
    StartsInAFewSeconds,
    Pausing,
    Running,
    ServiceOffAir,

    Reserved(u8),
}

impl From<u8> for RunningStatus {
    fn from(d: u8) -> Self {
        match d {
            0 => RunningStatus::Undefined,
            1 => RunningStatus::NotRunning,
            2 => RunningStatus::StartsInAFewSeconds,
            3 => RunningStatus::Pausing,
            4 => RunningStatus::Running,
            5 => RunningStatus::ServiceOffAir,

            _ => RunningStatus::Reserved(d),
        }
    }
}

impl RunningStatus {
    /// enigma2 scheduling slot: codes 1,2 are "NEXT", codes 3,4 are "NOW"
    pub fn when(self) -> Option<When> {
        match self {
            RunningStatus::NotRunning | RunningStatus::StartsInAFewSeconds => Some(When::Next),
            RunningStatus::Pausing | RunningStatus::Running => Some(When::Now),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum When {
    Now,
    Next,
}

impl When {
    pub fn as_str(self) -> &'static str {
        match self {
            When::Now => "NOW",
            When::Next => "NEXT",
        }
    }
}

impl fmt::Display for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{RunningStatus, When};

    #[test]
    fn when_by_code() {
        let expected = [
            None,
            Some(When::Next),
            Some(When::Next),
            Some(When::Now),
            Some(When::Now),
            None,
            None,
            None,
        ];

        for (code, when) in expected.iter().enumerate() {
            assert_eq!(RunningStatus::from(code as u8).when(), *when, "code {}", code);
        }
    }

    #[test]
    fn fmt_when() {
        assert_eq!(format!("{}", When::Now), "NOW");
        assert_eq!(When::Next.as_str(), "NEXT");
    }
}
