//! Tokenizer for the semicolon separated eligibility rule text.
//!
//! Rules look like `income<250000;category=sc,st;gender=female`. Every clause
//! is trimmed and lower-cased, then checked against each subject keyword on
//! its own: a clause that mentions two keywords yields two comparisons.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Profile attribute a comparison constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Income,
    Turnover,
    Category,
    Gender,
    State,
    StartupStage,
    Industry,
    Age,
}

impl Subject {
    /// Keyword tests in the order they are applied to each clause.
    pub const EVALUATION_ORDER: [Subject; 8] = [
        Subject::Income,
        Subject::Turnover,
        Subject::Category,
        Subject::Gender,
        Subject::State,
        Subject::StartupStage,
        Subject::Industry,
        Subject::Age,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            Subject::Income => "income",
            Subject::Turnover => "turnover",
            Subject::Category => "category",
            Subject::Gender => "gender",
            Subject::State => "state",
            Subject::StartupStage => "startup_stage",
            Subject::Industry => "industry",
            Subject::Age => "age",
        }
    }

    pub const fn operator(self) -> Operator {
        match self {
            Subject::Income | Subject::Turnover | Subject::Age => Operator::LessThan,
            Subject::Category
            | Subject::Gender
            | Subject::State
            | Subject::StartupStage
            | Subject::Industry => Operator::Equals,
        }
    }

    /// How an `=` comparison matches the profile value against the allowed value.
    pub const fn text_match(self) -> TextMatch {
        match self {
            Subject::Category | Subject::Industry => TextMatch::ContainedIn,
            _ => TextMatch::Exact,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Numeric upper bound, applied inclusively.
    LessThan,
    /// Text equality or membership, depending on the subject.
    Equals,
}

impl Operator {
    pub const fn symbol(self) -> char {
        match self {
            Operator::LessThan => '<',
            Operator::Equals => '=',
        }
    }
}

/// Equality flavour used by text subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Profile value must equal the allowed value.
    Exact,
    /// Profile value must appear somewhere inside the allowed value.
    ContainedIn,
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Limit(i128),
    Text(String),
    /// Numeric operand that did not parse; raised only when evaluated.
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub subject: Subject,
    pub operator: Operator,
    pub operand: Operand,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.operator.symbol();
        match &self.operand {
            Operand::Limit(limit) => write!(f, "{}{}{}", self.subject, symbol, limit),
            Operand::Text(value) | Operand::Malformed(value) => {
                write!(f, "{}{}{}", self.subject, symbol, value)
            }
        }
    }
}

/// One normalized clause with every comparison its keywords produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub text: String,
    pub comparisons: Vec<Comparison>,
}

/// Ordered clauses of a scheme's eligibility text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    clauses: Vec<Clause>,
}

impl RuleSet {
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// No clauses means the scheme is open to everyone in its target group.
    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }
}

pub fn parse_rules(raw: &str) -> RuleSet {
    if raw.trim().is_empty() {
        return RuleSet::default();
    }

    let clauses = raw
        .split(';')
        .map(|fragment| parse_clause(fragment.trim().to_lowercase()))
        .collect();

    RuleSet { clauses }
}

fn parse_clause(text: String) -> Clause {
    let comparisons = Subject::EVALUATION_ORDER
        .iter()
        .filter_map(|subject| tokenize(&text, *subject))
        .collect();

    Clause { text, comparisons }
}

fn tokenize(clause: &str, subject: Subject) -> Option<Comparison> {
    let operator = subject.operator();
    let symbol = operator.symbol();
    if !clause.contains(subject.keyword()) || !clause.contains(symbol) {
        return None;
    }

    // Only the segment between the first and second operator counts.
    let raw = clause.split(symbol).nth(1).unwrap_or_default().trim();
    let operand = match operator {
        Operator::LessThan => match parse_limit(raw) {
            Some(limit) => Operand::Limit(limit),
            None => Operand::Malformed(raw.to_string()),
        },
        Operator::Equals => Operand::Text(raw.to_string()),
    };

    Some(Comparison {
        subject,
        operator,
        operand,
    })
}

/// Integer literal with an optional sign; single underscores may separate digits.
///
/// Any Unicode decimal digit is accepted. Values beyond the `i128` range
/// saturate, which keeps every comparison against a `u64` attribute intact.
fn parse_limit(raw: &str) -> Option<i128> {
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return None;
    }

    let mut magnitude: u128 = 0;
    for ch in digits.chars().filter(|ch| *ch != '_') {
        let digit = decimal_digit(ch)?;
        magnitude = magnitude
            .saturating_mul(10)
            .saturating_add(u128::from(digit));
    }

    Some(if negative {
        if magnitude > i128::MAX as u128 {
            i128::MIN
        } else {
            -(magnitude as i128)
        }
    } else {
        i128::try_from(magnitude).unwrap_or(i128::MAX)
    })
}

/// Code points of digit zero for every Unicode decimal digit run.
const DIGIT_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

fn decimal_digit(ch: char) -> Option<u32> {
    if let Some(digit) = ch.to_digit(10) {
        return Some(digit);
    }
    if !ch.is_numeric() {
        return None;
    }

    let code = u32::from(ch);
    DIGIT_ZEROS
        .iter()
        .find(|zero| (**zero..**zero + 10).contains(&code))
        .map(|zero| code - zero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(clause: &Clause) -> Vec<Subject> {
        clause
            .comparisons
            .iter()
            .map(|comparison| comparison.subject)
            .collect()
    }

    #[test]
    fn blank_text_has_no_clauses() {
        assert!(parse_rules("").is_unconstrained());
        assert!(parse_rules("   \t ").is_unconstrained());
    }

    #[test]
    fn clauses_are_trimmed_and_lowercased() {
        let rules = parse_rules(" Income < 50000 ; STATE = Maharashtra ");
        let clauses = rules.clauses();

        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].text, "income < 50000");
        assert_eq!(
            clauses[0].comparisons,
            vec![Comparison {
                subject: Subject::Income,
                operator: Operator::LessThan,
                operand: Operand::Limit(50000),
            }]
        );
        assert_eq!(
            clauses[1].comparisons[0].operand,
            Operand::Text("maharashtra".to_string())
        );
    }

    #[test]
    fn unknown_clauses_produce_no_comparisons() {
        let rules = parse_rules("must be enrolled;;income>5");
        assert_eq!(rules.clauses().len(), 3);
        assert!(rules
            .clauses()
            .iter()
            .all(|clause| clause.comparisons.is_empty()));
    }

    #[test]
    fn overlapping_keywords_yield_multiple_comparisons() {
        let rules = parse_rules("state gender=female");
        assert_eq!(
            subjects(&rules.clauses()[0]),
            vec![Subject::Gender, Subject::State]
        );

        let rules = parse_rules("average income<5000");
        assert_eq!(
            subjects(&rules.clauses()[0]),
            vec![Subject::Income, Subject::Age]
        );
    }

    #[test]
    fn startup_stage_does_not_trigger_numeric_age_test_without_operator() {
        let rules = parse_rules("startup_stage=seed");
        assert_eq!(subjects(&rules.clauses()[0]), vec![Subject::StartupStage]);
    }

    #[test]
    fn operand_is_second_segment_only() {
        let rules = parse_rules("category=sc=st;income<100<200");
        assert_eq!(
            rules.clauses()[0].comparisons[0].operand,
            Operand::Text("sc".to_string())
        );
        assert_eq!(
            rules.clauses()[1].comparisons[0].operand,
            Operand::Limit(100)
        );
    }

    #[test]
    fn non_numeric_limits_are_kept_as_malformed() {
        let rules = parse_rules("income<5 lakh;age<");
        assert_eq!(
            rules.clauses()[0].comparisons[0].operand,
            Operand::Malformed("5 lakh".to_string())
        );
        assert_eq!(
            rules.clauses()[1].comparisons[0].operand,
            Operand::Malformed(String::new())
        );
    }

    #[test]
    fn limits_accept_sign_and_digit_separators() {
        assert_eq!(parse_limit("+42"), Some(42));
        assert_eq!(parse_limit("-7"), Some(-7));
        assert_eq!(parse_limit("2_50_000"), Some(250000));
        assert_eq!(parse_limit("2__5"), None);
        assert_eq!(parse_limit("_25"), None);
        assert_eq!(parse_limit("- 5"), None);
        assert_eq!(parse_limit("50,000"), None);
        assert_eq!(parse_limit("-"), None);
    }

    #[test]
    fn limits_accept_unicode_decimal_digits() {
        assert_eq!(parse_limit("५०००"), Some(5000));
        assert_eq!(parse_limit("٢٥٠"), Some(250));
        assert_eq!(parse_limit("１２"), Some(12));
        assert_eq!(parse_limit("½"), None);
        assert_eq!(parse_limit("Ⅻ"), None);
    }

    #[test]
    fn oversized_limits_saturate() {
        let huge = format!("1{}", "0".repeat(42));
        assert_eq!(parse_limit(&huge), Some(i128::MAX));
        assert_eq!(parse_limit(&format!("-{huge}")), Some(i128::MIN));
        assert_eq!(
            parse_limit("170141183460469231731687303715884105727"),
            Some(i128::MAX)
        );
    }

    #[test]
    fn comparisons_render_back_to_rule_text() {
        let rules = parse_rules("Income<20000;Gender=Female");
        let rendered: Vec<String> = rules
            .clauses()
            .iter()
            .flat_map(|clause| clause.comparisons.iter().map(ToString::to_string))
            .collect();
        assert_eq!(rendered, vec!["income<20000", "gender=female"]);
    }
}
