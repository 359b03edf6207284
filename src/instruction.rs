//! The decoded instruction model and the pure `decode` entry point.

use crate::registers::{self, normalize_register};
use crate::tables;
use matches::debug_assert_matches;

/// Classification of a decoded instruction, used to dispatch operand parsing and
/// to drive the category histogram in the statistics report.
#[derive(Clone, Copy, PartialEq, Eq, Debug, PartialOrd, Ord, Hash)]
pub enum Category {
    Alu,
    Load,
    Store,
    MulDiv,
    Fpu,
    Branch,
    Nop,
    Other,
}

impl Category {
    /// All eight categories, in the fixed order used for the histogram in the report.
    pub const ALL: [Category; 8] = [
        Category::Alu,
        Category::Load,
        Category::Store,
        Category::MulDiv,
        Category::Fpu,
        Category::Branch,
        Category::Nop,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Alu => "ALU",
            Category::Load => "LOAD",
            Category::Store => "STORE",
            Category::MulDiv => "MULDIV",
            Category::Fpu => "FPU",
            Category::Branch => "BRANCH",
            Category::Nop => "NOP",
            Category::Other => "OTHER",
        }
    }
}

/// A single decoded instruction.
///
/// Constructed once by [`decode`] and never mutated afterwards; the original bundle
/// list and the valid-instruction list may both hold references into the same backing
/// `Vec<Instruction>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub address: u32,
    pub encoding: String,
    pub mnemonic: String,
    pub operand_text: String,
    pub rd: Option<String>,
    pub rs1: Option<String>,
    pub rs2: Option<String>,
    pub rs3: Option<String>,
    pub category: Category,
    pub is_single_cycle: bool,
    pub is_padding: bool,
}

impl Instruction {
    /// The sources read by this instruction, in `rs1, rs2, rs3` order, skipping unset slots.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.rs1
            .as_deref()
            .into_iter()
            .chain(self.rs2.as_deref())
            .chain(self.rs3.as_deref())
    }

    /// True iff this instruction writes a register that dependency analysis can see
    /// (defined, and not the hardwired-zero register).
    pub fn is_producer_eligible(&self) -> bool {
        match &self.rd {
            Some(rd) => !registers::is_zero(rd),
            None => false,
        }
    }

    /// True iff a consumer of this category can participate in one-level forwarding,
    /// per the eligibility rule in the dependency analyzer: single-cycle ALU ops and
    /// all branch/jump ops.
    pub fn is_forward_eligible_consumer(&self) -> bool {
        self.is_single_cycle || self.category == Category::Branch
    }
}

fn is_decimal_literal(token: &str) -> bool {
    let token = token.strip_prefix('-').unwrap_or(token);
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn is_hex_literal(token: &str) -> bool {
    token.starts_with("0x") || token.starts_with("0X")
}

fn split_operands(operand_text: &str) -> Vec<&str> {
    if operand_text.is_empty() {
        Vec::new()
    } else {
        operand_text.split(',').map(str::trim).collect()
    }
}

fn base_register_from_memory_operand(token: &str) -> Option<String> {
    let open = token.find('(')?;
    let close = token.find(')')?;
    if open < close {
        Some(normalize_register(&token[open + 1..close]))
    } else {
        None
    }
}

fn determine_category(mnemonic: &str) -> Category {
    if tables::is_single_cycle_alu(mnemonic) {
        Category::Alu
    } else if tables::is_multi_cycle(mnemonic) {
        if mnemonic.starts_with('l') || mnemonic.starts_with("fl") {
            Category::Load
        } else if mnemonic.starts_with('s') || mnemonic.starts_with("fs") {
            Category::Store
        } else if tables::is_muldiv(mnemonic) {
            Category::MulDiv
        } else {
            Category::Fpu
        }
    } else if tables::is_branch_or_jump(mnemonic) {
        Category::Branch
    } else {
        Category::Other
    }
}

fn detect_padding(encoding: &str, mnemonic: &str, operand_text: &str) -> bool {
    let encoding = encoding.to_ascii_lowercase();
    if encoding == tables::NOP_ENCODING || encoding == tables::FEQ_ZERO_ENCODING {
        return true;
    }
    if mnemonic == "nop" {
        return true;
    }
    if mnemonic == "feq.s" {
        let first_operand = split_operands(operand_text).into_iter().next().unwrap_or("");
        if first_operand == "zero" || normalize_register(first_operand) == registers::ZERO {
            return true;
        }
    }
    false
}

struct AluOperands {
    rd: Option<String>,
    rs1: Option<String>,
    rs2: Option<String>,
}

fn parse_alu_operands(parts: &[&str]) -> AluOperands {
    let rd = parts.first().map(|p| normalize_register(p));
    let rs1 = parts.get(1).map(|p| normalize_register(p));
    let rs2 = parts.get(2).and_then(|p| {
        if is_decimal_literal(p) || is_hex_literal(p) {
            None
        } else {
            Some(normalize_register(p))
        }
    });
    AluOperands { rd, rs1, rs2 }
}

fn parse_load_operands(parts: &[&str]) -> (Option<String>, Option<String>) {
    let rd = parts.first().map(|p| normalize_register(p));
    let rs1 = parts.get(1).and_then(|p| base_register_from_memory_operand(p));
    (rd, rs1)
}

fn parse_store_operands(parts: &[&str]) -> (Option<String>, Option<String>) {
    let rs2 = parts.first().map(|p| normalize_register(p));
    let rs1 = parts.get(1).and_then(|p| base_register_from_memory_operand(p));
    (rs1, rs2)
}

struct BranchOperands {
    rd: Option<String>,
    rs1: Option<String>,
    rs2: Option<String>,
}

fn parse_branch_operands(mnemonic: &str, parts: &[&str]) -> BranchOperands {
    match mnemonic {
        "jal" | "call" => BranchOperands {
            rd: parts.first().map(|p| normalize_register(p)),
            rs1: None,
            rs2: None,
        },
        "jalr" => {
            let rd = parts.first().map(|p| normalize_register(p));
            let rs1 = parts.get(1).and_then(|p| {
                base_register_from_memory_operand(p).or_else(|| Some(normalize_register(p)))
            });
            BranchOperands { rd, rs1, rs2: None }
        }
        "ret" => BranchOperands {
            rd: None,
            rs1: Some(registers::RA.to_string()),
            rs2: None,
        },
        "jr" | "j" => BranchOperands {
            rd: None,
            rs1: parts.first().map(|p| normalize_register(p)),
            rs2: None,
        },
        _ => BranchOperands {
            rd: None,
            rs1: parts.first().map(|p| normalize_register(p)),
            rs2: parts.get(1).map(|p| normalize_register(p)),
        },
    }
}

struct WideOperands {
    rd: Option<String>,
    rs1: Option<String>,
    rs2: Option<String>,
    rs3: Option<String>,
}

fn parse_wide_operands(parts: &[&str]) -> WideOperands {
    WideOperands {
        rd: parts.first().map(|p| normalize_register(p)),
        rs1: parts.get(1).map(|p| normalize_register(p)),
        rs2: parts.get(2).map(|p| normalize_register(p)),
        rs3: parts.get(3).map(|p| normalize_register(p)),
    }
}

/// Decodes one instruction from its parsed textual fields.
///
/// Total and pure: every mnemonic, including unknown ones, produces an `Instruction`
/// (unknown mnemonics fall into [`Category::Other`] with no register extraction).
pub fn decode(address: u32, encoding: &str, mnemonic: &str, operand_text: &str) -> Instruction {
    let mnemonic = mnemonic.to_ascii_lowercase();
    let is_padding = detect_padding(encoding, &mnemonic, operand_text);

    if is_padding {
        return Instruction {
            address,
            encoding: encoding.to_string(),
            mnemonic,
            operand_text: operand_text.to_string(),
            rd: None,
            rs1: None,
            rs2: None,
            rs3: None,
            category: Category::Nop,
            is_single_cycle: false,
            is_padding: true,
        };
    }

    let category = determine_category(&mnemonic);
    let parts = split_operands(operand_text);

    let (rd, rs1, rs2, rs3) = match category {
        Category::Alu => {
            let ops = parse_alu_operands(&parts);
            (ops.rd, ops.rs1, ops.rs2, None)
        }
        Category::Load => {
            let (rd, rs1) = parse_load_operands(&parts);
            (rd, rs1, None, None)
        }
        Category::Store => {
            let (rs1, rs2) = parse_store_operands(&parts);
            (None, rs1, rs2, None)
        }
        Category::Branch => {
            let ops = parse_branch_operands(&mnemonic, &parts);
            (ops.rd, ops.rs1, ops.rs2, None)
        }
        Category::MulDiv | Category::Fpu => {
            let ops = parse_wide_operands(&parts);
            (ops.rd, ops.rs1, ops.rs2, ops.rs3)
        }
        Category::Nop | Category::Other => (None, None, None, None),
    };

    debug_assert_matches!(
        category,
        Category::Alu
            | Category::Load
            | Category::Store
            | Category::MulDiv
            | Category::Fpu
            | Category::Branch
            | Category::Other
    );

    Instruction {
        address,
        encoding: encoding.to_string(),
        mnemonic,
        operand_text: operand_text.to_string(),
        rd,
        rs1,
        rs2,
        rs3,
        is_single_cycle: category == Category::Alu,
        category,
        is_padding: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nop_encoding_is_padding() {
        let inst = decode(0x1000, "00000013", "nop", "");
        assert!(inst.is_padding);
        assert_eq!(inst.category, Category::Nop);
        assert!(inst.rd.is_none());
    }

    #[test]
    fn feq_zero_encoding_is_padding() {
        let inst = decode(0x1000, "a0002053", "feq.s", "zero, ft0, ft0");
        assert!(inst.is_padding);
    }

    #[test]
    fn feq_zero_by_mnemonic_is_padding() {
        let inst = decode(0x1000, "deadbeef", "feq.s", "zero, ft0, ft0");
        assert!(inst.is_padding);
    }

    #[test]
    fn feq_s_non_zero_destination_is_not_padding() {
        let inst = decode(0x1000, "deadbeef", "feq.s", "a0, ft0, ft1");
        assert!(!inst.is_padding);
        assert_eq!(inst.category, Category::Fpu);
    }

    #[test]
    fn decodes_alu_with_register_operand() {
        let inst = decode(0x0, "00000000", "add", "a0, a1, a2");
        assert_eq!(inst.category, Category::Alu);
        assert!(inst.is_single_cycle);
        assert_eq!(inst.rd.as_deref(), Some("x10"));
        assert_eq!(inst.rs1.as_deref(), Some("x11"));
        assert_eq!(inst.rs2.as_deref(), Some("x12"));
    }

    #[test]
    fn decodes_alu_with_immediate_operand() {
        let inst = decode(0x0, "00000000", "addi", "a0, a1, -5");
        assert_eq!(inst.rs2, None);
        let inst_hex = decode(0x0, "00000000", "addi", "a0, a1, 0xFF");
        assert_eq!(inst_hex.rs2, None);
    }

    #[test]
    fn decodes_load_operands() {
        let inst = decode(0x0, "00000000", "lw", "a0, 0(sp)");
        assert_eq!(inst.category, Category::Load);
        assert_eq!(inst.rd.as_deref(), Some("x10"));
        assert_eq!(inst.rs1.as_deref(), Some("x2"));
        assert!(inst.rs2.is_none());
    }

    #[test]
    fn decodes_store_operands() {
        let inst = decode(0x0, "00000000", "sw", "a0, 4(sp)");
        assert_eq!(inst.category, Category::Store);
        assert_eq!(inst.rs2.as_deref(), Some("x10"));
        assert_eq!(inst.rs1.as_deref(), Some("x2"));
        assert!(inst.rd.is_none());
    }

    #[test]
    fn decodes_conditional_branch() {
        let inst = decode(0x0, "00000000", "beq", "a0, a1, label");
        assert_eq!(inst.category, Category::Branch);
        assert_eq!(inst.rs1.as_deref(), Some("x10"));
        assert_eq!(inst.rs2.as_deref(), Some("x11"));
    }

    #[test]
    fn decodes_jal_rd_only() {
        let inst = decode(0x0, "00000000", "jal", "ra, label");
        assert_eq!(inst.rd.as_deref(), Some("x1"));
        assert!(inst.rs1.is_none());
    }

    #[test]
    fn decodes_jalr_with_offset() {
        let inst = decode(0x0, "00000000", "jalr", "ra, 0(a0)");
        assert_eq!(inst.rd.as_deref(), Some("x1"));
        assert_eq!(inst.rs1.as_deref(), Some("x10"));
    }

    #[test]
    fn decodes_jalr_without_offset() {
        let inst = decode(0x0, "00000000", "jalr", "ra, a0");
        assert_eq!(inst.rs1.as_deref(), Some("x10"));
    }

    #[test]
    fn decodes_ret_implicit_ra() {
        let inst = decode(0x0, "00000000", "ret", "");
        assert_eq!(inst.rs1.as_deref(), Some("x1"));
        assert!(inst.rd.is_none());
    }

    #[test]
    fn decodes_jr() {
        let inst = decode(0x0, "00000000", "jr", "ra");
        assert_eq!(inst.rs1.as_deref(), Some("x1"));
        assert!(inst.rd.is_none());
    }

    #[test]
    fn decodes_fpu_with_three_sources() {
        let inst = decode(0x0, "00000000", "fmadd.s", "fa0, fa1, fa2, fa3");
        assert_eq!(inst.category, Category::Fpu);
        assert_eq!(inst.rs3.as_deref(), Some("f13"));
    }

    #[test]
    fn unknown_mnemonic_is_other_with_no_operands() {
        let inst = decode(0x0, "00000000", "csrrw", "a0, mscratch, a1");
        assert_eq!(inst.category, Category::Other);
        assert!(inst.rd.is_none() && inst.rs1.is_none());
    }

    #[test]
    fn malformed_operands_leave_slots_unset_rather_than_erroring() {
        let inst = decode(0x0, "00000000", "add", "a0");
        assert_eq!(inst.rd.as_deref(), Some("x10"));
        assert!(inst.rs1.is_none() && inst.rs2.is_none());
    }
}
