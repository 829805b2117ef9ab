//! Branch trace reader.
//!
//! A trace is a text stream with one resolved branch per line:
//! `<pc> <outcome>`, where `pc` is hexadecimal (an `0x` prefix is optional)
//! and `outcome` is `1` for taken or `0` for not taken. Blank lines are
//! skipped.

use std::io::BufRead;

use thiserror::Error;

/// Errors raised while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not hold a `<pc> <outcome>` pair.
    #[error("malformed trace line {line}: {text:?}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
}

/// One resolved branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Branch {
    pub pc: u32,
    pub taken: bool,
}

/// Iterator over the branches of a trace.
pub struct TraceReader<R> {
    input: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Branch, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.input.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }
            return Some(parse_line(text).ok_or_else(|| TraceError::Malformed {
                line: self.line,
                text: text.to_string(),
            }));
        }
    }
}

fn parse_line(text: &str) -> Option<Branch> {
    let mut fields = text.split_whitespace();
    let pc = fields.next()?;
    let outcome = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let digits = pc
        .strip_prefix("0x")
        .or_else(|| pc.strip_prefix("0X"))
        .unwrap_or(pc);
    let pc = u32::from_str_radix(digits, 16).ok()?;
    let taken = match outcome {
        "0" => false,
        "1" => true,
        _ => return None,
    };
    Some(Branch { pc, taken })
}
