use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unknown character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },
    #[error("Invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },
}

/// Grammar violation. `position` is the index of the offending token.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Syntax error at token {position}: expected {expected}")]
pub struct SyntaxError {
    pub position: usize,
    pub expected: String,
}

impl SyntaxError {
    pub fn new(position: usize, expected: impl Into<String>) -> Self {
        SyntaxError {
            position,
            expected: expected.into(),
        }
    }
}

/// Arithmetic never fails here: NaN and infinities flow through as values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Unknown function: '{0}'")]
    UnknownFunction(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("Invalid domain: x_min ({x_min}) must be finite and less than x_max ({x_max})")]
    InvalidDomain { x_min: f64, x_max: f64 },
    #[error("At least 2 samples are required, got {0}")]
    TooFewSamples(usize),
    #[error("Too many samples: {0} (at most {})", crate::config::MAX_SAMPLES)]
    TooManySamples(usize),
    #[error("Function is undefined over the whole domain")]
    NoValidSamples,
    #[error("Display ceiling must be finite and positive, got {0}")]
    InvalidCeiling(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Viewport {width}x{height} has no area")]
    EmptyViewport { width: u32, height: u32 },
    #[error("Degenerate {axis} span [{min}, {max}]")]
    Degenerate { axis: char, min: f64, max: f64 },
}

/// Pipeline stage that produced a [`PlotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Evaluate,
    Range,
    Map,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Lex => "lex",
            Phase::Parse => "parse",
            Phase::Evaluate => "evaluate",
            Phase::Range => "range",
            Phase::Map => "map",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("lex: {0}")]
    Lex(#[from] LexError),
    #[error("parse: {0}")]
    Parse(#[from] SyntaxError),
    #[error("evaluate: {0}")]
    Evaluate(#[from] EvalError),
    #[error("range: {0}")]
    Range(#[from] RangeError),
    #[error("map: {0}")]
    Map(#[from] MapError),
}

impl PlotError {
    pub fn phase(&self) -> Phase {
        match self {
            PlotError::Lex(_) => Phase::Lex,
            PlotError::Parse(_) => Phase::Parse,
            PlotError::Evaluate(_) => Phase::Evaluate,
            PlotError::Range(_) => Phase::Range,
            PlotError::Map(_) => Phase::Map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_variant() {
        let err: PlotError = EvalError::UnknownFunction("foo".to_string()).into();
        assert_eq!(err.phase(), Phase::Evaluate);
        assert_eq!(err.to_string(), "evaluate: Unknown function: 'foo'");

        let err: PlotError = RangeError::NoValidSamples.into();
        assert_eq!(err.phase(), Phase::Range);
    }

    #[test]
    fn syntax_error_message() {
        let err = SyntaxError::new(3, "')'");
        assert_eq!(err.to_string(), "Syntax error at token 3: expected ')'");
    }
}
