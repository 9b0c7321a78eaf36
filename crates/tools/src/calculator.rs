//! Calculator tool — evaluates arithmetic expressions.
//!
//! Supports `+`, `-`, `*`, `/`, parentheses, unary negation, and
//! decimal numbers. Parse or evaluation failures come back as
//! descriptive strings, never as errors.

use async_trait::async_trait;
use hearth_core::tool::Tool;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "Calculator"
    }

    fn description(&self) -> &str {
        "Evaluates an arithmetic expression. Usage: Calculator((2 + 3) * 4)"
    }

    async fn invoke(&self, arg: Option<&str>) -> String {
        let Some(expr) = arg else {
            return "Calculator error: no expression given".into();
        };

        match evaluate(expr) {
            Ok(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", value as i64)
                } else {
                    format!("{value}")
                }
            }
            Err(e) => format!("Calculator error: {e}"),
        }
    }
}

/// Evaluate an arithmetic expression string.
pub fn evaluate(input: &str) -> Result<f64, String> {
    let chars: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return Err("empty expression".into());
    }
    let mut cursor = Cursor { chars, pos: 0 };
    let value = cursor.sum()?;
    if cursor.pos < cursor.chars.len() {
        return Err(format!(
            "unexpected '{}' at position {}",
            cursor.chars[cursor.pos], cursor.pos
        ));
    }
    Ok(value)
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    // sum := product (('+' | '-') product)*
    fn sum(&mut self) -> Result<f64, String> {
        let mut acc = self.product()?;
        while let Some(op) = self.peek() {
            match op {
                '+' => {
                    self.pos += 1;
                    acc += self.product()?;
                }
                '-' => {
                    self.pos += 1;
                    acc -= self.product()?;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    // product := atom (('*' | '/') atom)*
    fn product(&mut self) -> Result<f64, String> {
        let mut acc = self.atom()?;
        while let Some(op) = self.peek() {
            match op {
                '*' => {
                    self.pos += 1;
                    acc *= self.atom()?;
                }
                '/' => {
                    self.pos += 1;
                    let divisor = self.atom()?;
                    if divisor == 0.0 {
                        return Err("division by zero".into());
                    }
                    acc /= divisor;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    // atom := '-' atom | '(' sum ')' | number
    fn atom(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.atom()?)
            }
            Some('(') => {
                self.pos += 1;
                let value = self.sum()?;
                if self.peek() != Some(')') {
                    return Err("missing closing parenthesis".into());
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(format!("unexpected '{c}' at position {}", self.pos)),
            None => Err("unexpected end of expression".into()),
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
        {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse().map_err(|_| format!("invalid number: {text}"))
    }
}
