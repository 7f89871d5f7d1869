//! Rule tables for Wolfram-style elementary automata.
//!
//! An elementary rule maps the states of a cell and its two neighbours
//! in the previous generation to the state of the cell in the next one.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An 8-entry lookup table from a 3-cell neighbourhood to an output bit.
///
/// Entries are ordered from the pattern `111` down to `000`, i.e.
/// `(1,1,1), (1,1,0), (1,0,1), (1,0,0), (0,1,1), (0,1,0), (0,0,1), (0,0,0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleTable([bool; 8]);

impl RuleTable {
    /// Creates a table from its entries, `111` first.
    pub const fn new(entries: [bool; 8]) -> Self {
        RuleTable(entries)
    }

    /// The output for a neighbourhood.
    #[inline]
    pub fn lookup(&self, left: bool, center: bool, right: bool) -> bool {
        let pattern = (left as usize) << 2 | (center as usize) << 1 | right as usize;
        self.0[7 - pattern]
    }

    /// The entries, `111` first.
    pub fn entries(&self) -> [bool; 8] {
        self.0
    }
}

const O: bool = false;
const I: bool = true;

/// Rule 30.
pub static RULE_30: RuleTable = RuleTable::new([O, O, O, I, I, I, I, O]);
/// Rule 90.
pub static RULE_90: RuleTable = RuleTable::new([O, I, O, I, I, O, I, O]);
/// Rule 110.
pub static RULE_110: RuleTable = RuleTable::new([O, I, I, O, I, I, I, O]);
/// The table selected as rule 190.
///
/// Read as a Wolfram code it is 125, the bit-reversal of 190.
pub static RULE_190: RuleTable = RuleTable::new([O, I, I, I, I, I, O, I]);
/// The table selected as rule 222.
///
/// Like [`RULE_190`], this is the bit-reversal of the Wolfram code (123).
pub static RULE_222: RuleTable = RuleTable::new([O, I, I, I, I, O, I, I]);

/// The selectable rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "RuleName", into = "String")
)]
pub enum Rule {
    /// Rule 30: chaotic.
    Rule30,
    /// Rule 90: Sierpiński-like fractal.
    Rule90,
    /// Rule 110: complex, localized structures.
    Rule110,
    /// Rule 190: repetition.
    Rule190,
    /// Rule 222: uniformity.
    Rule222,
}

impl Rule {
    /// All selectable rules.
    pub const ALL: [Rule; 5] = [
        Rule::Rule30,
        Rule::Rule90,
        Rule::Rule110,
        Rule::Rule190,
        Rule::Rule222,
    ];

    /// The rule table.
    pub fn table(self) -> &'static RuleTable {
        match self {
            Rule::Rule30 => &RULE_30,
            Rule::Rule90 => &RULE_90,
            Rule::Rule110 => &RULE_110,
            Rule::Rule190 => &RULE_190,
            Rule::Rule222 => &RULE_222,
        }
    }

    /// The rule number.
    pub fn number(self) -> u8 {
        match self {
            Rule::Rule30 => 30,
            Rule::Rule90 => 90,
            Rule::Rule110 => 110,
            Rule::Rule190 => 190,
            Rule::Rule222 => 222,
        }
    }

    /// Selects a rule by name. Unknown names select rule 222.
    ///
    /// Use [`FromStr`] to reject unknown names instead.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("Unknown rule {:?}, falling back to rule 222", name);
            Rule::Rule222
        })
    }
}

/// Accepts `30`, `rule30`, `Rule 30` and so on, case-insensitively.
impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let number = s.strip_prefix("rule").unwrap_or(&s).trim_start();
        match number {
            "30" => Ok(Rule::Rule30),
            "90" => Ok(Rule::Rule90),
            "110" => Ok(Rule::Rule110),
            "190" => Ok(Rule::Rule190),
            "222" => Ok(Rule::Rule222),
            _ => Err(String::from("invalid rule")),
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.number())
    }
}

impl From<String> for Rule {
    fn from(name: String) -> Self {
        Rule::from_name(&name)
    }
}

/// A rule as written in a configuration file: `"rule30"` or `30`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleName {
    Number(i64),
    Name(String),
}

#[cfg(feature = "serde")]
impl From<RuleName> for Rule {
    fn from(name: RuleName) -> Self {
        match name {
            RuleName::Number(number) => Rule::from_name(&number.to_string()),
            RuleName::Name(name) => Rule::from_name(&name),
        }
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}
