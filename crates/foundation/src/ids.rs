use std::fmt;

/// Two-letter uppercase region code ("CA", "NY", ...).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionCode([u8; 2]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionCodeError {
    Length(usize),
    NotAlphabetic(char),
}

impl fmt::Display for RegionCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionCodeError::Length(n) => {
                write!(f, "region code must be 2 characters, got {n}")
            }
            RegionCodeError::NotAlphabetic(c) => {
                write!(f, "region code must be ASCII alphabetic, got {c:?}")
            }
        }
    }
}

impl std::error::Error for RegionCodeError {}

impl RegionCode {
    pub const fn new(bytes: [u8; 2]) -> Self {
        RegionCode(bytes)
    }

    /// Parses a 2-letter ASCII code, uppercasing as needed.
    pub fn parse(s: &str) -> Result<Self, RegionCodeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(RegionCodeError::Length(bytes.len()));
        }
        let mut out = [0u8; 2];
        for (i, b) in bytes.iter().enumerate() {
            if !b.is_ascii_alphabetic() {
                return Err(RegionCodeError::NotAlphabetic(*b as char));
            }
            out[i] = b.to_ascii_uppercase();
        }
        Ok(RegionCode(out))
    }

    pub fn as_str(&self) -> &str {
        // Always ASCII alphabetic by construction.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionCode({})", self.as_str())
    }
}

/// Numeric geographic identifier carried by topology features (FIPS).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeoId(pub u32);

impl GeoId {
    pub const fn new(n: u32) -> Self {
        GeoId(n)
    }

    /// Parses the identifier as topology documents carry it: either a JSON
    /// number or a zero-padded digit string ("06").
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<u32>().ok().map(GeoId)
    }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}
