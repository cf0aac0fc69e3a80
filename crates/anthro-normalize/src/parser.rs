//! Rule-based parsing of raw measurement text.
//!
//! Measurement fields were collected inconsistently: a height can be `"180"`,
//! `" 72.5"`, a hyphen range `"87-90"` or a comma pair `"67, 72"`. The
//! [`ValueParser`] holds an ordered list of [`ParseRule`]s and returns the
//! result of the first rule whose pattern matches the trimmed value.
//!
//! # Precedence
//!
//! 1. [`RuleKind::Blank`]: empty or whitespace-only text is missing
//! 2. [`RuleKind::HyphenRange`]: `NUMBER - NUMBER`, the midpoint
//! 3. [`RuleKind::CommaPair`]: `NUMBER , NUMBER`, the midpoint
//! 4. [`RuleKind::Single`]: a plain `NUMBER`
//!
//! Text no rule accepts is [`Measurement::Unrecognized`] and yields no value.
//! `NUMBER` is one or more ASCII digits with an optional fractional part;
//! signs, exponents and thousands separators are not accepted.

use std::fmt;

use regex::{Captures, Regex};

use crate::error::Result;

/// Numeric grammar shared by all rules: digits with an optional fraction.
pub const NUMBER: &str = r"[0-9]+(?:\.[0-9]+)?";

/// Separator of a two-number range expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Hyphen,
    Comma,
}

/// Classification of one raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Null, empty or whitespace-only input.
    Missing,
    /// Two bounds of a single unknown value.
    Range {
        low: f64,
        high: f64,
        separator: Separator,
    },
    /// A plain number.
    Single(f64),
    /// Text matching none of the rules.
    Unrecognized,
}

impl Measurement {
    /// The representative value: the number itself or the range midpoint.
    ///
    /// Always finite when present.
    pub fn value(self) -> Option<f64> {
        let value = match self {
            Self::Missing | Self::Unrecognized => return None,
            Self::Single(value) => value,
            Self::Range { low, high, .. } => (low + high) / 2.0,
        };
        value.is_finite().then_some(value)
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

/// The extractor a rule applies once its pattern matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Blank,
    HyphenRange,
    CommaPair,
    Single,
}

impl RuleKind {
    /// Anchored pattern of this rule, matched against trimmed text.
    pub fn pattern(self) -> String {
        match self {
            Self::Blank => "^$".to_string(),
            Self::HyphenRange => format!(r"^({NUMBER})\s*-\s*({NUMBER})$"),
            Self::CommaPair => format!(r"^({NUMBER})\s*,\s*({NUMBER})$"),
            Self::Single => format!(r"^({NUMBER})$"),
        }
    }

    fn extract(self, captures: &Captures<'_>) -> Measurement {
        match self {
            Self::Blank => Measurement::Missing,
            Self::HyphenRange => range(captures, Separator::Hyphen),
            Self::CommaPair => range(captures, Separator::Comma),
            Self::Single => match number(captures, 1) {
                Some(value) => Measurement::Single(value),
                None => Measurement::Unrecognized,
            },
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blank => "blank",
            Self::HyphenRange => "hyphen-range",
            Self::CommaPair => "comma-pair",
            Self::Single => "single",
        };
        f.write_str(name)
    }
}

fn range(captures: &Captures<'_>, separator: Separator) -> Measurement {
    match (number(captures, 1), number(captures, 2)) {
        (Some(low), Some(high)) => Measurement::Range {
            low,
            high,
            separator,
        },
        _ => Measurement::Unrecognized,
    }
}

/// Parses capture group `index`; digit strings too long for a finite f64
/// are rejected.
fn number(captures: &Captures<'_>, index: usize) -> Option<f64> {
    let value: f64 = captures.get(index)?.as_str().parse().ok()?;
    value.is_finite().then_some(value)
}

/// A compiled `(pattern, extractor)` pair.
#[derive(Debug, Clone)]
pub struct ParseRule {
    kind: RuleKind,
    pattern: Regex,
}

impl ParseRule {
    pub fn new(kind: RuleKind) -> Result<Self> {
        Ok(Self {
            kind,
            pattern: Regex::new(&kind.pattern())?,
        })
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Apply the rule to already-trimmed text; `None` when it does not match.
    pub fn apply(&self, trimmed: &str) -> Option<Measurement> {
        self.pattern
            .captures(trimmed)
            .map(|captures| self.kind.extract(&captures))
    }
}

/// Ordered rule list evaluated first-match-wins.
#[derive(Debug, Clone)]
pub struct ValueParser {
    rules: Vec<ParseRule>,
}

impl ValueParser {
    /// Default precedence: blank, hyphen range, comma pair, single number.
    pub const DEFAULT_ORDER: [RuleKind; 4] = [
        RuleKind::Blank,
        RuleKind::HyphenRange,
        RuleKind::CommaPair,
        RuleKind::Single,
    ];

    /// Parser with the default rule order.
    pub fn new() -> Result<Self> {
        Self::with_order(&Self::DEFAULT_ORDER)
    }

    /// Parser evaluating the given rules in the given order.
    pub fn with_order(order: &[RuleKind]) -> Result<Self> {
        let rules = order
            .iter()
            .map(|kind| ParseRule::new(*kind))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[ParseRule] {
        &self.rules
    }

    /// Classify one raw value.
    pub fn classify(&self, raw: &str) -> Measurement {
        self.classify_with_rule(raw)
            .map_or(Measurement::Unrecognized, |(_, measurement)| measurement)
    }

    /// Classify one raw value and report the rule that matched.
    pub fn classify_with_rule(&self, raw: &str) -> Option<(RuleKind, Measurement)> {
        let trimmed = raw.trim();
        self.rules
            .iter()
            .find_map(|rule| rule.apply(trimmed).map(|m| (rule.kind(), m)))
    }

    /// Convert a possibly absent raw value into its representative number.
    pub fn parse(&self, raw: Option<&str>) -> Option<f64> {
        raw.and_then(|value| self.classify(value).value())
    }
}
