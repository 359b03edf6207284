//! Mnemonic classification tables and padding-encoding constants.
//!
//! These are the process-wide, read-only sets the rest of the crate classifies
//! instructions against. They are expressed as closed `match` arms rather than
//! runtime hash sets: the mnemonic sets are small and fixed at compile time, so a
//! match compiles straight to a comparison table with nothing to initialize.

/// Canonical encoding of `nop` (`addi x0, x0, 0`).
pub const NOP_ENCODING: &str = "00000013";

/// Canonical encoding of `feq.s zero, ft0, ft0`, the float padding idiom.
pub const FEQ_ZERO_ENCODING: &str = "a0002053";

/// Number of instruction slots in a VLIW bundle.
pub const BUNDLE_SIZE: usize = 8;

/// True iff `mnemonic` is a single-cycle ALU operation: its result is available for
/// one-level forwarding to a consumer issued in the same bundle.
pub fn is_single_cycle_alu(mnemonic: &str) -> bool {
    matches!(
        mnemonic,
        "add"
            | "addi"
            | "sub"
            | "and"
            | "andi"
            | "or"
            | "ori"
            | "xor"
            | "xori"
            | "sll"
            | "slli"
            | "srl"
            | "srli"
            | "sra"
            | "srai"
            | "slt"
            | "slti"
            | "sltu"
            | "sltiu"
            | "lui"
            | "auipc"
            | "mv"
            | "li"
            | "not"
            | "neg"
            | "seqz"
            | "snez"
            | "sltz"
            | "sgtz"
    )
}

/// True iff `mnemonic` requires more than one cycle: multiply/divide, memory access,
/// or single-precision float arithmetic. Never a forwarding producer.
pub fn is_multi_cycle(mnemonic: &str) -> bool {
    matches!(
        mnemonic,
        "mul"
            | "mulh"
            | "mulhsu"
            | "mulhu"
            | "div"
            | "divu"
            | "rem"
            | "remu"
            | "lw"
            | "lh"
            | "lb"
            | "lhu"
            | "lbu"
            | "flw"
            | "sw"
            | "sh"
            | "sb"
            | "fsw"
            | "fadd.s"
            | "fsub.s"
            | "fmul.s"
            | "fdiv.s"
            | "fsqrt.s"
            | "fmadd.s"
            | "fmsub.s"
            | "fnmadd.s"
            | "fnmsub.s"
            | "fcvt.w.s"
            | "fcvt.wu.s"
            | "fcvt.s.w"
            | "fcvt.s.wu"
            | "fmv.x.w"
            | "fmv.w.x"
            | "feq.s"
            | "flt.s"
            | "fle.s"
            | "fmin.s"
            | "fmax.s"
            | "fsgnj.s"
            | "fsgnjn.s"
            | "fsgnjx.s"
            | "fclass.s"
    )
}

/// True iff `mnemonic` is a multiply/divide operation (a subset of [`is_multi_cycle`]
/// used to distinguish `MULDIV` from `FPU` once load/store have been split off).
pub fn is_muldiv(mnemonic: &str) -> bool {
    matches!(
        mnemonic,
        "mul" | "mulh" | "mulhsu" | "mulhu" | "div" | "divu" | "rem" | "remu"
    )
}

/// True iff `mnemonic` is a branch or jump (including the `ret`/`j`/`call` pseudos).
pub fn is_branch_or_jump(mnemonic: &str) -> bool {
    matches!(
        mnemonic,
        "beq" | "bne" | "blt" | "bge" | "bltu" | "bgeu" | "jal" | "jalr" | "ret" | "j" | "jr" | "call"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_single_cycle_alu() {
        assert!(is_single_cycle_alu("addi"));
        assert!(is_single_cycle_alu("lui"));
        assert!(is_single_cycle_alu("li"));
        assert!(!is_single_cycle_alu("lw"));
    }

    #[test]
    fn classifies_multi_cycle() {
        assert!(is_multi_cycle("lw"));
        assert!(is_multi_cycle("fadd.s"));
        assert!(is_multi_cycle("mul"));
        assert!(!is_multi_cycle("addi"));
    }

    #[test]
    fn distinguishes_muldiv_from_other_multicycle() {
        assert!(is_muldiv("div"));
        assert!(!is_muldiv("lw"));
        assert!(!is_muldiv("fadd.s"));
    }

    #[test]
    fn classifies_branch_or_jump() {
        assert!(is_branch_or_jump("beq"));
        assert!(is_branch_or_jump("ret"));
        assert!(is_branch_or_jump("call"));
        assert!(!is_branch_or_jump("addi"));
    }

    #[test]
    fn sets_are_disjoint() {
        let mnemonics = [
            "add", "addi", "lw", "sw", "mul", "div", "fadd.s", "beq", "jal", "ret", "nop", "unknown",
        ];
        for m in mnemonics {
            let hits = [is_single_cycle_alu(m), is_multi_cycle(m), is_branch_or_jump(m)]
                .iter()
                .filter(|b| **b)
                .count();
            assert!(hits <= 1, "mnemonic {} classified as more than one category", m);
        }
    }
}
