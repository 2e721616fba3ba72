//! Chemical formula parsing: `Fe2O3`, `Fe2 O3`, `Ca3(PO4)2`, `Li0.5CoO2`.

use crate::error::AugmentError;
use std::collections::BTreeMap;

/// Element symbol -> amount. Keys iterate in ascending symbol order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composition {
    amounts: BTreeMap<String, f64>,
}

impl Composition {
    pub fn parse(formula: &str) -> Result<Self, AugmentError> {
        let chars: Vec<char> = formula.chars().collect();
        let mut p = Parser { formula, chars: &chars, pos: 0 };
        let amounts = p.group(None)?;
        let amounts: BTreeMap<String, f64> = amounts.into_iter().filter(|(_, n)| *n > 0.0).collect();
        if amounts.is_empty() {
            return Err(p.err("no elements"));
        }
        Ok(Self { amounts })
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> + '_ {
        self.amounts.keys().map(String::as_str)
    }

    pub fn amount(&self, symbol: &str) -> f64 {
        self.amounts.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn num_atoms(&self) -> f64 {
        self.amounts.values().sum()
    }
}

struct Parser<'a> {
    formula: &'a str,
    chars: &'a [char],
    pos: usize,
}

impl Parser<'_> {
    fn err(&self, reason: &str) -> AugmentError {
        AugmentError::InvalidFormula { formula: self.formula.to_string(), reason: reason.to_string() }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Parse until `close` (or end of input when `None`).
    fn group(&mut self, close: Option<char>) -> Result<BTreeMap<String, f64>, AugmentError> {
        let mut acc = BTreeMap::<String, f64>::new();
        loop {
            self.skip_ws();
            let Some(c) = self.peek() else {
                return match close {
                    None => Ok(acc),
                    Some(_) => Err(self.err("unbalanced group")),
                };
            };
            if Some(c) == close {
                self.pos += 1;
                return Ok(acc);
            }
            match c {
                '(' | '[' => {
                    self.pos += 1;
                    let inner = self.group(Some(if c == '(' { ')' } else { ']' }))?;
                    let mult = self.amount()?.unwrap_or(1.0);
                    for (sym, n) in inner {
                        *acc.entry(sym).or_insert(0.0) += n * mult;
                    }
                }
                'A'..='Z' => {
                    let mut sym = String::from(c);
                    self.pos += 1;
                    if let Some(l) = self.peek().filter(char::is_ascii_lowercase) {
                        sym.push(l);
                        self.pos += 1;
                    }
                    let n = self.amount()?.unwrap_or(1.0);
                    *acc.entry(sym).or_insert(0.0) += n;
                }
                _ => return Err(self.err(&format!("unexpected character `{c}`"))),
            }
        }
    }

    fn amount(&mut self) -> Result<Option<f64>, AugmentError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }
        let tok: String = self.chars[start..self.pos].iter().collect();
        tok.parse::<f64>()
            .map(Some)
            .map_err(|_| self.err(&format!("bad amount `{tok}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_and_spaced_formulas() {
        let c = Composition::parse("Fe2O3").unwrap();
        assert_eq!(c.elements().collect::<Vec<_>>(), vec!["Fe", "O"]);
        assert_eq!(c.amount("Fe"), 2.0);
        assert_eq!(c.amount("O"), 3.0);
        assert_eq!(Composition::parse("Fe2 O3").unwrap(), c);
    }

    #[test]
    fn groups_and_fractions() {
        let c = Composition::parse("Ca3(PO4)2").unwrap();
        assert_eq!(c.amount("P"), 2.0);
        assert_eq!(c.amount("O"), 8.0);
        let c = Composition::parse("Li0.5CoO2").unwrap();
        assert_eq!(c.amount("Li"), 0.5);
        assert_eq!(c.num_atoms(), 3.5);
    }

    #[test]
    fn repeated_symbols_are_summed_and_sorted() {
        let c = Composition::parse("OHO").unwrap();
        assert_eq!(c.elements().collect::<Vec<_>>(), vec!["H", "O"]);
        assert_eq!(c.amount("O"), 2.0);
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "   ", "fe2", "Fe2(O3", "Fe2O3)", "Fe-2"] {
            assert!(
                matches!(Composition::parse(bad), Err(AugmentError::InvalidFormula { .. })),
                "expected failure for {bad:?}"
            );
        }
    }
}
