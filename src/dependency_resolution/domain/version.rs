use crate::shared::error::ResolutionError;
use crate::shared::Result;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One token of a version string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Number(u64),
    Qualifier(String),
}

/// Rank of well-known qualifiers; a release (no qualifier) sits at 5.
fn qualifier_rank(qualifier: &str) -> (u8, &str) {
    match qualifier {
        "alpha" | "a" => (0, ""),
        "beta" | "b" => (1, ""),
        "milestone" | "m" => (2, ""),
        "rc" | "cr" => (3, ""),
        "snapshot" => (4, ""),
        "" | "ga" | "final" | "release" => (5, ""),
        "sp" => (6, ""),
        other => (7, other),
    }
}

const RELEASE_RANK: u8 = 5;

fn compare_items(left: Option<&Item>, right: Option<&Item>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (Some(Item::Number(n)), None) => n.cmp(&0),
        (None, Some(Item::Number(n))) => 0.cmp(n),
        (Some(Item::Qualifier(q)), None) => qualifier_rank(q).0.cmp(&RELEASE_RANK),
        (None, Some(Item::Qualifier(q))) => RELEASE_RANK.cmp(&qualifier_rank(q).0),
        (Some(Item::Number(a)), Some(Item::Number(b))) => a.cmp(b),
        (Some(Item::Number(_)), Some(Item::Qualifier(_))) => Ordering::Greater,
        (Some(Item::Qualifier(_)), Some(Item::Number(_))) => Ordering::Less,
        (Some(Item::Qualifier(a)), Some(Item::Qualifier(b))) => {
            qualifier_rank(a).cmp(&qualifier_rank(b))
        }
    }
}

/// A concrete, comparable version following Maven ordering rules:
/// numeric segments compare numerically, `1.0` equals `1`, and pre-release
/// qualifiers (`alpha`, `beta`, `rc`, `SNAPSHOT`) sort before the release.
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    items: Vec<Item>,
}

impl Version {
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ResolutionError::InvalidCoordinates {
                value: value.to_string(),
                reason: "version cannot be empty".to_string(),
            }
            .into());
        }

        let mut items = Vec::new();
        let mut current = String::new();
        let mut current_is_digit: Option<bool> = None;

        let flush = |current: &mut String, items: &mut Vec<Item>| {
            if current.is_empty() {
                return;
            }
            let item = match current.parse::<u64>() {
                Ok(n) => Item::Number(n),
                Err(_) => {
                    // Zeros ahead of a qualifier are padding: `1.0-rc1` == `1-rc1`
                    while matches!(items.last(), Some(Item::Number(0))) {
                        items.pop();
                    }
                    Item::Qualifier(current.to_lowercase())
                }
            };
            items.push(item);
            current.clear();
        };

        for c in trimmed.chars() {
            if c == '.' || c == '-' || c == '_' || c == '+' {
                flush(&mut current, &mut items);
                current_is_digit = None;
                continue;
            }
            let is_digit = c.is_ascii_digit();
            if current_is_digit.is_some_and(|d| d != is_digit) {
                flush(&mut current, &mut items);
            }
            current_is_digit = Some(is_digit);
            current.push(c);
        }
        flush(&mut current, &mut items);

        // Trailing zeros and release markers carry no ordering information
        while let Some(last) = items.last() {
            let is_null = match last {
                Item::Number(0) => true,
                Item::Qualifier(q) => qualifier_rank(q).0 == RELEASE_RANK,
                _ => false,
            };
            if !is_null {
                break;
            }
            items.pop();
        }

        Ok(Self {
            original: trimmed.to_string(),
            items,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.items.len().max(other.items.len());
        for i in 0..len {
            let ordering = compare_items(self.items.get(i), other.items.get(i));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    version: Version,
    inclusive: bool,
}

/// A single interval such as `[1.0,2.0)`; `None` bounds are unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Restriction {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl Restriction {
    fn contains(&self, version: &Version) -> bool {
        if let Some(lower) = &self.lower {
            match version.cmp(&lower.version) {
                Ordering::Less => return false,
                Ordering::Equal if !lower.inclusive => return false,
                _ => {}
            }
        }
        if let Some(upper) = &self.upper {
            match version.cmp(&upper.version) {
                Ordering::Greater => return false,
                Ordering::Equal if !upper.inclusive => return false,
                _ => {}
            }
        }
        true
    }
}

/// A union of version intervals, e.g. `[1.0,2.0),[3.0,)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    raw: String,
    restrictions: Vec<Restriction>,
}

impl VersionRange {
    pub fn parse(value: &str) -> Result<Self> {
        let raw = value.trim();
        let fail = |reason: &str| -> anyhow::Error {
            ResolutionError::InvalidVersionRange {
                value: value.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let mut restrictions = Vec::new();
        let mut rest = raw;
        while !rest.is_empty() {
            let lower_inclusive = match rest.chars().next() {
                Some('[') => true,
                Some('(') => false,
                _ => return Err(fail("expected '[' or '('")),
            };
            let close = rest
                .find([']', ')'])
                .ok_or_else(|| fail("missing closing ']' or ')'"))?;
            let upper_inclusive = rest[close..].starts_with(']');
            let inner = &rest[1..close];

            let restriction = match inner.split(',').collect::<Vec<_>>().as_slice() {
                [exact] => {
                    if !(lower_inclusive && upper_inclusive) {
                        return Err(fail("a single version must be written as [x]"));
                    }
                    let version = Version::parse(exact).map_err(|_| fail("empty version"))?;
                    Restriction {
                        lower: Some(Bound {
                            version: version.clone(),
                            inclusive: true,
                        }),
                        upper: Some(Bound {
                            version,
                            inclusive: true,
                        }),
                    }
                }
                [lower, upper] => {
                    let lower = Self::bound(lower, lower_inclusive)?;
                    let upper = Self::bound(upper, upper_inclusive)?;
                    if let (Some(l), Some(u)) = (&lower, &upper) {
                        if l.version > u.version {
                            return Err(fail("lower bound is greater than upper bound"));
                        }
                    }
                    Restriction { lower, upper }
                }
                _ => return Err(fail("too many bounds in one interval")),
            };
            restrictions.push(restriction);

            rest = rest[close + 1..].trim_start();
            if let Some(stripped) = rest.strip_prefix(',') {
                rest = stripped.trim_start();
                if rest.is_empty() {
                    return Err(fail("trailing ','"));
                }
            } else if !rest.is_empty() {
                return Err(fail("intervals must be separated by ','"));
            }
        }

        if restrictions.is_empty() {
            return Err(fail("empty range"));
        }

        Ok(Self {
            raw: raw.to_string(),
            restrictions,
        })
    }

    fn bound(value: &str, inclusive: bool) -> Result<Option<Bound>> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(Bound {
            version: Version::parse(value)?,
            inclusive,
        }))
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.restrictions.iter().any(|r| r.contains(version))
    }

    /// Picks the highest of `candidates` that falls inside the range.
    pub fn select_highest<'a>(&self, candidates: &'a [Version]) -> Option<&'a Version> {
        candidates.iter().filter(|v| self.contains(v)).max()
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// The version part of a declared dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequirement {
    /// A plain version, used as-is.
    Soft(Version),
    /// A range that has to be matched against the repository's versions.
    Range(VersionRange),
}

impl VersionRequirement {
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.starts_with('[') || trimmed.starts_with('(') {
            Ok(Self::Range(VersionRange::parse(trimmed)?))
        } else {
            Ok(Self::Soft(Version::parse(trimmed)?))
        }
    }
}
