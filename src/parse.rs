//! Tolerant line-oriented parsing of disassembly text into decoded instructions.
//!
//! This is a thin driver around [`crate::instruction::decode`]: it recognizes the
//! `address: encoding \tmnemonic\toperands` shape and silently skips anything else
//! (blank lines, `#` comments, section headers, symbol labels). Unrecognized lines
//! are not an error — the input format is produced by an external disassembler and
//! routinely carries noise this tool doesn't need to understand.

use crate::instruction::{decode, Instruction};
use regex::Regex;

/// Compiles the instruction-line pattern once; cheap to construct, but a single
/// shared [`Regex`] avoids recompiling it per line.
pub struct LineParser {
    pattern: Regex,
}

impl LineParser {
    pub fn new() -> LineParser {
        LineParser {
            pattern: Regex::new(r"^([0-9a-fA-F]+):\s+([0-9a-fA-F]{8})\s+(.+)$").unwrap(),
        }
    }

    /// Parses one line, returning `None` if it isn't an instruction line.
    pub fn parse_line(&self, line: &str) -> Option<Instruction> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("Disassembly") {
            return None;
        }

        let captures = self.pattern.captures(line)?;
        let address = u32::from_str_radix(&captures[1], 16).ok()?;
        let encoding = captures[2].to_string();
        let rest = captures[3].trim();

        let mut parts = rest.splitn(2, char::is_whitespace);
        let mnemonic = parts.next()?.trim();
        if mnemonic.is_empty() {
            return None;
        }
        let operands = parts.next().unwrap_or("").trim();

        Some(decode(address, &encoding, mnemonic, operands))
    }

    /// Parses every line of `source`, in order, skipping anything that isn't an
    /// instruction line. The bundle boundary rule is applied afterward by the caller
    /// via [`crate::bundle::Bundle::bundle_all`].
    pub fn parse_source(&self, source: &str) -> Vec<Instruction> {
        source.lines().filter_map(|line| self.parse_line(line)).collect()
    }
}

impl Default for LineParser {
    fn default() -> LineParser {
        LineParser::new()
    }
}
