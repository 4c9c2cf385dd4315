use std::fmt;

/// Key of a configuration section entry
///
/// Numeric keys mean "no explicit identifier": for definitions they request
/// auto-indexing only, for beans they are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Name(String),
    Numeric(String),
}

impl ConfigKey {
    /// Classify a raw key by its text
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if is_numeric(&raw) {
            ConfigKey::Numeric(raw)
        } else {
            ConfigKey::Name(raw)
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ConfigKey::Numeric(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConfigKey::Name(key) | ConfigKey::Numeric(key) => key,
        }
    }

    /// Identifier carried by a name key
    pub fn name(&self) -> Option<&str> {
        match self {
            ConfigKey::Name(key) => Some(key),
            ConfigKey::Numeric(_) => None,
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ConfigKey {
    fn from(raw: &str) -> Self {
        ConfigKey::parse(raw)
    }
}

impl From<String> for ConfigKey {
    fn from(raw: String) -> Self {
        ConfigKey::parse(raw)
    }
}

impl From<usize> for ConfigKey {
    fn from(index: usize) -> Self {
        ConfigKey::Numeric(index.to_string())
    }
}

impl From<i64> for ConfigKey {
    fn from(index: i64) -> Self {
        ConfigKey::Numeric(index.to_string())
    }
}

/// Decimal number with optional sign, fraction and exponent, surrounding
/// whitespace allowed
fn is_numeric(text: &str) -> bool {
    let bytes = text.trim().as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        digits += pos - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start {
            return false;
        }
    }

    pos == bytes.len()
}
