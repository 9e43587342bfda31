//! Version rule matching.
//!
//! A rule is one of:
//! - `1.2.0`: exact match
//! - `>=1.2`: at least
//! - `<=2.0`: at most
//! - `1.0-2.0`: inclusive range
//!
//! Versions follow the public PEP 440 scheme: an optional `N!` epoch, a dotted
//! numeric release, then optional pre (`a`, `b`, `rc`), post (`.postN`) and
//! dev (`.devN`) segments, with the usual alternate spellings and separators.
//! A leading `v` is accepted. Trailing zero release components do not matter,
//! so `1.0 == 1.0.0`. Anything that fails to parse never matches.

use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid version: {0:?}")]
pub struct InvalidVersion(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreRelease {
    Alpha,
    Beta,
    Rc,
}

/// A parsed version; release trailing zeros are stripped.
#[derive(Debug, Clone)]
pub struct Version {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreRelease, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
}

/// Position of the pre-release segment in the total order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    /// `1.0.dev1` sorts before every `1.0` pre-release.
    DevOnly,
    Pre(PreRelease, u64),
    Final,
}

impl Version {
    fn key(&self) -> (u64, &[u64], PreKey, Option<u64>, (u8, u64)) {
        let pre = match (self.pre, self.post, self.dev) {
            (Some((kind, n)), _, _) => PreKey::Pre(kind, n),
            (None, None, Some(_)) => PreKey::DevOnly,
            (None, _, _) => PreKey::Final,
        };
        let dev = self.dev.map_or((1, 0), |n| (0, n));
        (self.epoch, &self.release, pre, self.post, dev)
    }
}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let body = lowered.strip_prefix('v').unwrap_or(&lowered);
        Scanner { rest: body }.version().ok_or_else(|| InvalidVersion(s.to_owned()))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
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

// =============================================================================
// PARSER
// =============================================================================

const PRE_WORDS: [(&str, PreRelease); 8] = [
    ("preview", PreRelease::Rc),
    ("alpha", PreRelease::Alpha),
    ("beta", PreRelease::Beta),
    ("pre", PreRelease::Rc),
    ("rc", PreRelease::Rc),
    ("a", PreRelease::Alpha),
    ("b", PreRelease::Beta),
    ("c", PreRelease::Rc),
];

const POST_WORDS: [&str; 3] = ["post", "rev", "r"];

struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn version(mut self) -> Option<Version> {
        let epoch = match self.rest.split_once('!') {
            Some((epoch, rest)) => {
                self.rest = rest;
                number(epoch)?
            }
            None => 0,
        };

        let mut release = vec![number(self.digits())?];
        while self.rest.strip_prefix('.').is_some_and(|r| r.starts_with(|c: char| c.is_ascii_digit())) {
            self.rest = &self.rest[1..];
            release.push(number(self.digits())?);
        }
        while release.len() > 1 && release.last() == Some(&0) {
            release.pop();
        }

        let pre = self.pre()?;
        let post = self.post()?;
        let dev = self.labelled(&["dev"])?.map(|(_, n)| n);
        if !self.rest.is_empty() {
            return None;
        }
        Some(Version { epoch, release, pre, post, dev })
    }

    fn pre(&mut self) -> Option<Option<(PreRelease, u64)>> {
        let words: Vec<&str> = PRE_WORDS.iter().map(|(word, _)| *word).collect();
        let Some((word, n)) = self.labelled(&words)? else {
            return Some(None);
        };
        let kind = PRE_WORDS.iter().find(|(w, _)| *w == word).map(|(_, kind)| *kind)?;
        Some(Some((kind, n)))
    }

    fn post(&mut self) -> Option<Option<u64>> {
        // `1.0-1` is an implicit post-release.
        if let Some(rest) = self.rest.strip_prefix('-') {
            if rest.starts_with(|c: char| c.is_ascii_digit()) {
                self.rest = rest;
                return Some(Some(number(self.digits())?));
            }
        }
        Some(self.labelled(&POST_WORDS)?.map(|(_, n)| n))
    }

    /// `[sep]<word>[sep][N]`; the number defaults to 0. Outer `None` means a
    /// malformed number, inner `None` means the segment is absent.
    fn labelled(&mut self, words: &[&'a str]) -> Option<Option<(&'a str, u64)>> {
        let start = self.rest;
        self.separator();
        let Some(word) = words.iter().find(|w| self.rest.starts_with(**w)).copied() else {
            self.rest = start;
            return Some(None);
        };
        self.rest = &self.rest[word.len()..];

        let before_sep = self.rest;
        self.separator();
        let digits = self.digits();
        if digits.is_empty() {
            self.rest = before_sep;
            return Some(Some((word, 0)));
        }
        Some(Some((word, number(digits)?)))
    }

    fn separator(&mut self) {
        if let Some(rest) = self.rest.strip_prefix(['.', '-', '_']) {
            self.rest = rest;
        }
    }

    fn digits(&mut self) -> &'a str {
        let end = self.rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(self.rest.len());
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        digits
    }
}

fn number(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Whether `current` satisfies `rule`. Unparseable input never matches.
#[must_use]
pub fn check_version(current: &str, rule: &str) -> bool {
    evaluate(current, rule.trim()).unwrap_or(false)
}

fn evaluate(current: &str, rule: &str) -> Option<bool> {
    let current: Version = current.parse().ok()?;

    if rule.contains('-') {
        let mut bounds = rule.split('-');
        let (Some(min), Some(max), None) = (bounds.next(), bounds.next(), bounds.next()) else {
            return None;
        };
        let min: Version = min.parse().ok()?;
        let max: Version = max.parse().ok()?;
        return Some(min <= current && current <= max);
    }

    if let Some(min) = rule.strip_prefix(">=") {
        return Some(current >= min.parse().ok()?);
    }

    if let Some(max) = rule.strip_prefix("<=") {
        return Some(current <= max.parse().ok()?);
    }

    Some(current == rule.parse().ok()?)
}

#[cfg(test)]
#[path = "version_rule_test.rs"]
mod tests;
