//! Strict release-version parsing and ordering.
//!
//! Versions are dot-separated non-negative integers with an optional
//! pre-release tag (`a`, `b`, `rc`). Input that does not match is rejected
//! rather than ordered by some fallback scheme.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors produced while parsing a version or version spec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VersionError {
    /// The input was empty or whitespace only.
    #[error("version string is empty")]
    Empty,

    /// A release component was not a non-negative integer.
    #[error("invalid release component '{component}' in version '{input}'")]
    InvalidComponent { input: String, component: String },

    /// Trailing text was not a recognised pre-release tag.
    #[error("invalid pre-release suffix '{suffix}' in version '{input}'")]
    InvalidPreRelease { input: String, suffix: String },
}

/// Pre-release phase, ordered `a < b < rc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreReleaseKind {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl PreReleaseKind {
    const fn tag(self) -> &'static str {
        match self {
            Self::Alpha => "a",
            Self::Beta => "b",
            Self::ReleaseCandidate => "rc",
        }
    }
}

/// A pre-release marker such as `rc1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreRelease {
    pub kind: PreReleaseKind,
    pub number: u64,
}

/// A parsed release version.
///
/// Equality and ordering ignore trailing zero release segments, so `2.0`
/// and `2.0.0` compare equal. The original text is kept for display so
/// requirement strings reproduce exactly what the user asked for.
#[derive(Debug, Clone)]
pub struct Version {
    release: Vec<u64>,
    pre: Option<PreRelease>,
    text: String,
}

impl Version {
    /// Build a final release from its numeric segments.
    ///
    /// # Panics
    ///
    /// Panics if `release` is empty.
    pub fn from_release(release: &[u64]) -> Self {
        assert!(!release.is_empty(), "a version needs at least one segment");
        let text = release
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        Self {
            release: release.to_vec(),
            pre: None,
            text,
        }
    }

    /// Parse a version string.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(VersionError::Empty);
        }

        let split = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        let (release_part, suffix) = text.split_at(split);

        // A separator before the pre-release tag leaves a trailing dot on
        // the release part ("2.4.0.rc1").
        let release_part = if suffix.is_empty() {
            release_part
        } else {
            release_part.strip_suffix('.').unwrap_or(release_part)
        };

        let release = release_part
            .split('.')
            .map(|component| {
                if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::InvalidComponent {
                        input: text.to_string(),
                        component: component.to_string(),
                    });
                }
                component
                    .parse::<u64>()
                    .map_err(|_| VersionError::InvalidComponent {
                        input: text.to_string(),
                        component: component.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pre = if suffix.is_empty() {
            None
        } else {
            Some(parse_pre_release(text, suffix)?)
        };

        Ok(Self {
            release,
            pre,
            text: text.to_string(),
        })
    }

    /// Lenient parse keeping only the leading numeric release segments.
    ///
    /// `3.28.1-dirty` and `3.29.20240301-g1a2b3c4` yield `3.28.1` and
    /// `3.29.20240301`. Returns `None` when the input does not start with a
    /// number.
    pub fn leading_release(input: &str) -> Option<Self> {
        let text = input.trim();
        let end = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        let release = text[..end]
            .split('.')
            .map_while(|component| component.parse::<u64>().ok())
            .collect::<Vec<_>>();
        if release.is_empty() {
            None
        } else {
            Some(Self::from_release(&release))
        }
    }

    /// The version exactly as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Numeric release segments.
    pub fn release(&self) -> &[u64] {
        &self.release
    }

    /// Pre-release marker, if any.
    pub const fn pre_release(&self) -> Option<PreRelease> {
        self.pre
    }

    /// Whether this is a pre-release.
    pub const fn is_pre_release(&self) -> bool {
        self.pre.is_some()
    }

    /// Canonical form: release segments joined by dots plus the pre-release tag.
    pub fn normalized(&self) -> String {
        let mut out = self
            .release
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        if let Some(pre) = self.pre {
            out.push_str(pre.kind.tag());
            out.push_str(&pre.number.to_string());
        }
        out
    }

    fn cmp_release(&self, other: &Self) -> Ordering {
        let len = self.release.len().max(other.release.len());
        for i in 0..len {
            let a = self.release.get(i).copied().unwrap_or(0);
            let b = other.release.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => {}
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

fn parse_pre_release(input: &str, suffix: &str) -> Result<PreRelease, VersionError> {
    let invalid = || VersionError::InvalidPreRelease {
        input: input.to_string(),
        suffix: suffix.to_string(),
    };

    let tag = suffix.trim_start_matches(['-', '_', '.']);
    // At most one separator.
    if suffix.len() - tag.len() > 1 {
        return Err(invalid());
    }

    let lowered = tag.to_ascii_lowercase();
    let (kind, rest) = if let Some(rest) = lowered.strip_prefix("rc") {
        (PreReleaseKind::ReleaseCandidate, rest)
    } else if let Some(rest) = lowered.strip_prefix('a') {
        (PreReleaseKind::Alpha, rest)
    } else if let Some(rest) = lowered.strip_prefix('b') {
        (PreReleaseKind::Beta, rest)
    } else {
        return Err(invalid());
    };

    let number = if rest.is_empty() {
        0
    } else if rest.bytes().all(|b| b.is_ascii_digit()) {
        rest.parse::<u64>().map_err(|_| invalid())?
    } else {
        return Err(invalid());
    };

    Ok(PreRelease { kind, number })
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_release(other).then_with(|| match (self.pre, other.pre) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        })
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// Comparison qualifier in front of a requested version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Comparator {
    #[default]
    #[serde(rename = "==")]
    Exact,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "~=")]
    Compatible,
}

impl Comparator {
    /// Operator text as used in requirement strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "==",
            Self::NotEqual => "!=",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::Compatible => "~=",
        }
    }

    /// Whether the named version itself satisfies the comparator.
    ///
    /// Only then can it stand in for the release a setup-time install will
    /// fetch.
    pub const fn admits_named_version(self) -> bool {
        matches!(
            self,
            Self::Exact | Self::GreaterOrEqual | Self::LessOrEqual | Self::Compatible
        )
    }

    /// Split a leading operator off `input`. Two-character operators are tried first.
    fn split_prefix(input: &str) -> (Self, &str) {
        const OPERATORS: [(&str, Comparator); 7] = [
            ("==", Comparator::Exact),
            ("!=", Comparator::NotEqual),
            (">=", Comparator::GreaterOrEqual),
            ("<=", Comparator::LessOrEqual),
            ("~=", Comparator::Compatible),
            (">", Comparator::Greater),
            ("<", Comparator::Less),
        ];

        OPERATORS
            .iter()
            .find_map(|&(op, cmp)| input.strip_prefix(op).map(|rest| (cmp, rest)))
            .unwrap_or((Self::Exact, input))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested framework version, e.g. `2.3` or `>=2.4`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSpec {
    pub comparator: Comparator,
    pub version: Version,
}

impl VersionSpec {
    /// Parse a spec. A bare version means `==`.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }
        let (comparator, rest) = Comparator::split_prefix(trimmed);
        let version = Version::parse(rest)?;
        Ok(Self {
            comparator,
            version,
        })
    }

    /// Requirement string for `package`, e.g. `tensorflow==2.3`.
    pub fn requirement(&self, package: &str) -> String {
        format!("{package}{}{}", self.comparator, self.version)
    }
}

impl FromStr for VersionSpec {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_release_segments() {
        assert_eq!(v("2.3").release(), &[2, 3]);
        assert_eq!(v("1.15.0").release(), &[1, 15, 0]);
        assert_eq!(v(" 3 ").release(), &[3]);
    }

    #[test]
    fn test_trailing_zeros_compare_equal() {
        assert_eq!(v("2.0"), v("2.0.0"));
        assert!(v("2.0.1") > v("2.0"));
    }

    #[test]
    fn test_numeric_not_lexical_ordering() {
        assert!(v("1.9") < v("1.15"));
        assert!(v("3.10") > v("3.7"));
    }

    #[test]
    fn test_pre_release_sorts_before_final() {
        assert!(v("2.1rc0") < v("2.1"));
        assert!(v("2.1a1") < v("2.1b1"));
        assert!(v("2.1b2") < v("2.1rc1"));
        assert!(v("3.29.0-rc2") < v("3.29.0"));
        assert_eq!(
            v("2.4.0.rc1").pre_release(),
            Some(PreRelease {
                kind: PreReleaseKind::ReleaseCandidate,
                number: 1
            })
        );
    }

    #[test]
    fn test_display_keeps_original_text() {
        assert_eq!(v("2.4.0rc1").to_string(), "2.4.0rc1");
        assert_eq!(v("2.4.0-RC1").normalized(), "2.4.0rc1");
    }

    #[test]
    fn test_rejects_malformed_versions() {
        assert_eq!(Version::parse(""), Err(VersionError::Empty));
        assert!(matches!(
            Version::parse("2..3"),
            Err(VersionError::InvalidComponent { .. })
        ));
        assert!(matches!(
            Version::parse("latest"),
            Err(VersionError::InvalidComponent { .. })
        ));
        assert!(matches!(
            Version::parse("2.3-beta.x"),
            Err(VersionError::InvalidPreRelease { .. })
        ));
        assert!(matches!(
            Version::parse("2.3--rc1"),
            Err(VersionError::InvalidPreRelease { .. })
        ));
    }

    #[test]
    fn test_leading_release_ignores_build_suffixes() {
        assert_eq!(Version::leading_release("3.28.1-dirty"), Some(v("3.28.1")));
        assert_eq!(
            Version::leading_release("3.29.20240301-g1a2b3c4"),
            Some(v("3.29.20240301"))
        );
        assert_eq!(Version::leading_release("3.17.5"), Some(v("3.17.5")));
        assert_eq!(Version::leading_release("dirty-3.28"), None);
        assert_eq!(Version::leading_release(""), None);
    }

    #[test]
    fn test_spec_defaults_to_exact() {
        let spec = VersionSpec::parse("2.3").unwrap();
        assert_eq!(spec.comparator, Comparator::Exact);
        assert_eq!(spec.requirement("tensorflow"), "tensorflow==2.3");
    }

    #[test]
    fn test_spec_with_qualifier() {
        let spec = VersionSpec::parse(">= 2.4").unwrap();
        assert_eq!(spec.comparator, Comparator::GreaterOrEqual);
        assert_eq!(spec.version, v("2.4"));
        assert_eq!(spec.to_string(), ">=2.4");

        let spec = VersionSpec::parse("<1.15").unwrap();
        assert_eq!(spec.comparator, Comparator::Less);
    }

    #[test]
    fn test_exclusive_comparators_do_not_admit_named_version() {
        assert!(Comparator::Exact.admits_named_version());
        assert!(Comparator::Compatible.admits_named_version());
        assert!(!Comparator::NotEqual.admits_named_version());
        assert!(!Comparator::Greater.admits_named_version());
        assert!(!Comparator::Less.admits_named_version());
    }

    #[test]
    fn test_spec_rejects_bare_operator() {
        assert!(VersionSpec::parse("==").is_err());
        assert_eq!(VersionSpec::parse("  "), Err(VersionError::Empty));
    }
}
