use regex::Regex;

use crate::weights::WeightMap;

/// A successfully recovered `(term, weight)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
    pub term: String,
    pub weight: f64,
}

/// Why a single line was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseIssue {
    #[error("no term/weight separator found")]
    Unrecognized,

    #[error("term is empty")]
    EmptyTerm,

    #[error("`{0}` is not a number")]
    InvalidNumber(String),

    #[error("`{0}` is not a valid ratio")]
    MalformedRatio(String),

    #[error("`{0}` is not a finite number")]
    NonFinite(String),

    #[error("weight {0} is not positive")]
    NonPositive(f64),
}

/// Everything `parse` would return, plus the lines it dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub weights: WeightMap,
    /// 1-based line number and the reason that line was dropped.
    pub issues: Vec<(usize, ParseIssue)>,
}

impl ParseReport {
    pub fn dropped(&self) -> usize {
        self.issues.len()
    }
}

/// Best-effort parser for "term weight" lines.
pub struct LineParser {
    //描述文字 + 空白 + 结尾数字(可带%)
    pattern: Regex,
}

impl Default for LineParser {
    fn default() -> Self {
        let pattern = Regex::new(r"^(.+?)\s+([-+]?\d*\.?\d+\s*%?)$")
            .expect("Unable to compile line regex");

        LineParser { pattern }
    }
}

impl LineParser {
    /// Parses one line. Returns `None` for blank lines.
    pub fn parse_line(&self, line: &str) -> Option<Result<WeightEntry, ParseIssue>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        Some(self.split(line).and_then(|(term, raw)| {
            let weight = parse_weight(raw)?;
            Ok(WeightEntry {
                term: term.to_string(),
                weight,
            })
        }))
    }

    fn split<'a>(&self, line: &'a str) -> Result<(&'a str, &'a str), ParseIssue> {
        let (term, raw) = match self.pattern.captures(line) {
            Some(caps) => {
                let term = caps.get(1).map_or("", |m| m.as_str());
                let raw = caps.get(2).map_or("", |m| m.as_str());
                (term, raw)
            }
            None => split_fallback(line).ok_or(ParseIssue::Unrecognized)?,
        };

        let term = term.trim();
        if term.is_empty() {
            return Err(ParseIssue::EmptyTerm);
        }

        Ok((term, raw.trim()))
    }

    /// Parses every line, keeping track of the ones that were dropped.
    #[tracing::instrument(skip_all, fields(bytes = text.len()))]
    pub fn parse_report(&self, text: &str) -> ParseReport {
        let mut report = ParseReport::default();

        for (index, line) in text.lines().enumerate() {
            match self.parse_line(line) {
                None => {}
                Some(Ok(entry)) => {
                    report.weights.insert(entry.term, entry.weight);
                }
                Some(Err(issue)) => {
                    tracing::debug!(line = index + 1, %issue, "skipping line");
                    report.issues.push((index + 1, issue));
                }
            }
        }

        tracing::debug!(
            recognized = report.weights.len(),
            dropped = report.dropped(),
            "parsed frequency list"
        );
        report
    }

    pub fn parse(&self, text: &str) -> WeightMap {
        self.parse_report(text).weights
    }
}

/// Tab, then colon, then the first run of whitespace.
fn split_fallback(line: &str) -> Option<(&str, &str)> {
    if line.contains('\t') {
        line.split_once('\t')
    } else if line.contains(':') {
        line.split_once(':')
    } else {
        let at = line.find(char::is_whitespace)?;
        let (term, rest) = line.split_at(at);
        Some((term, rest.trim_start()))
    }
}

/// Converts a raw weight token into a strictly positive number.
///
/// `50%` becomes `0.5`, but a percentage that is already at most 1 (`0.5%`)
/// is kept as is. `1/4` is read as a ratio.
pub fn parse_weight(raw: &str) -> Result<f64, ParseIssue> {
    let raw = raw.trim();

    let weight = if raw.contains('%') {
        let stripped = raw.replace('%', "");
        let value = parse_number(stripped.trim())?;
        if value > 1.0 {
            value / 100.0
        } else {
            value
        }
    } else if let Some((numerator, denominator)) = raw.split_once('/') {
        if denominator.contains('/') {
            return Err(ParseIssue::MalformedRatio(raw.to_string()));
        }

        let malformed = |_| ParseIssue::MalformedRatio(raw.to_string());
        let numerator = parse_number(numerator.trim()).map_err(malformed)?;
        let denominator = parse_number(denominator.trim()).map_err(malformed)?;
        let ratio = numerator / denominator;
        if !ratio.is_finite() {
            return Err(ParseIssue::MalformedRatio(raw.to_string()));
        }
        ratio
    } else {
        parse_number(raw)?
    };

    if weight <= 0.0 {
        return Err(ParseIssue::NonPositive(weight));
    }

    Ok(weight)
}

fn parse_number(token: &str) -> Result<f64, ParseIssue> {
    let value: f64 = token
        .parse()
        .map_err(|_| ParseIssue::InvalidNumber(token.to_string()))?;

    if !value.is_finite() {
        return Err(ParseIssue::NonFinite(token.to_string()));
    }

    Ok(value)
}

/// Parses a multi-line frequency list. Lines that cannot be read are skipped.
pub fn parse(text: &str) -> WeightMap {
    LineParser::default().parse(text)
}
