use crate::{Formula, Literal};
use anyhow::{anyhow, Context, Result};
use logging_timer::time;
use std::{fmt::Write, fs, path::Path};

/// Reads a formula in the fixed-clause-length DIMACS dialect from `path`.
#[time]
pub fn read_dimacs<P: AsRef<Path>>(path: P) -> Result<Formula> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read formula file: {}", path.display()))?;
    let formula = parse_dimacs(&text)
        .with_context(|| format!("Failed to parse formula file: {}", path.display()))?;
    log::debug!(
        "Read {} clauses over {} letters from {}",
        formula.num_clauses(),
        formula.num_letters(),
        path.display()
    );
    Ok(formula)
}

/// Parses the DIMACS dialect where a `c ... clause length = K` comment fixes
/// the number of literals on every clause line.
///
/// Lines starting with `%` or `0` are terminators and are skipped, as are
/// blank lines. Tokens after the first `K` on a clause line (usually the
/// closing `0`) are ignored.
pub fn parse_dimacs(text: &str) -> Result<Formula> {
    let mut clause_length: Option<usize> = None;
    let mut header: Option<(usize, usize)> = None;
    let mut clauses: Vec<Vec<Literal>> = Vec::new();

    for (line_idx, raw_line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = raw_line.trim();

        if line.contains("clause length") {
            let value = line
                .split('=')
                .nth(1)
                .and_then(|rest| rest.split_whitespace().next())
                .ok_or_else(|| anyhow!("Line {}: missing value after 'clause length'", line_no))?;
            clause_length = Some(
                value
                    .parse()
                    .map_err(|_| anyhow!("Line {}: invalid clause length '{}'", line_no, value))?,
            );
            continue;
        }
        if line.is_empty() || line.starts_with(&['c', '%', '0'][..]) {
            continue;
        }
        if line.starts_with('p') {
            header = Some(parse_header(line).map_err(|e| anyhow!("Line {}: {}", line_no, e))?);
            clauses.clear();
            continue;
        }

        let (_, num_clauses) =
            header.ok_or_else(|| anyhow!("Line {}: clause before the 'p cnf' header", line_no))?;
        if clauses.len() == num_clauses {
            break;
        }
        let clause_length = clause_length
            .ok_or_else(|| anyhow!("Line {}: clause before the 'clause length' comment", line_no))?;

        let mut clause = Vec::with_capacity(clause_length);
        for token in line.split_whitespace().take(clause_length) {
            let literal: Literal = token
                .parse()
                .map_err(|_| anyhow!("Line {}: invalid literal '{}'", line_no, token))?;
            if literal == 0 {
                return Err(anyhow!(
                    "Line {}: clause ends after {} literals, expected {}",
                    line_no,
                    clause.len(),
                    clause_length
                ));
            }
            clause.push(literal);
        }
        if clause.len() < clause_length {
            return Err(anyhow!(
                "Line {}: clause holds {} literals, expected {}",
                line_no,
                clause.len(),
                clause_length
            ));
        }
        clauses.push(clause);
    }

    let (num_letters, num_clauses) = header.ok_or_else(|| anyhow!("Missing 'p cnf' header"))?;
    if clauses.len() < num_clauses {
        return Err(anyhow!(
            "Invalid number of clauses. Expected: {}, Actual: {}",
            num_clauses,
            clauses.len()
        ));
    }
    Formula::new(num_letters, clauses)
}

fn parse_header(line: &str) -> Result<(usize, usize)> {
    let values = line
        .split("cnf")
        .nth(1)
        .ok_or_else(|| anyhow!("expected 'p cnf <letters> <clauses>'"))?;
    let mut numbers = values.split_whitespace().map(|token| {
        token
            .parse::<usize>()
            .map_err(|_| anyhow!("invalid header value '{}'", token))
    });
    let num_letters = numbers
        .next()
        .ok_or_else(|| anyhow!("missing number of letters"))??;
    let num_clauses = numbers
        .next()
        .ok_or_else(|| anyhow!("missing number of clauses"))??;
    Ok((num_letters, num_clauses))
}

/// Renders `formula` in the dialect read by [`parse_dimacs`], each clause closed by `0`.
pub fn write_dimacs(formula: &Formula) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "c clause length = {}", formula.clause_length());
    let _ = writeln!(out, "p cnf {} {}", formula.num_letters(), formula.num_clauses());
    for clause in formula.clauses() {
        for literal in clause {
            let _ = write!(out, "{} ", literal);
        }
        out.push_str("0\n");
    }
    out
}
