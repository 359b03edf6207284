//! Register-alias normalization.
//!
//! Maps the symbolic ABI names emitted by a RISC-V disassembler (`a0`, `sp`, `fa3`, ...)
//! onto the canonical `xN`/`fN` form used everywhere else in this crate.

/// Canonical name for the zero register, used throughout the dependency analyzer.
pub const ZERO: &str = "x0";

/// Canonical name for the return-address register, implicitly read by `ret`.
pub const RA: &str = "x1";

/// Resolves an integer ABI register alias (`a0`, `sp`, `fp`, ...) to its canonical `xN` name.
///
/// Returns `None` for anything that isn't a recognized integer alias, including names
/// that are already in canonical form (those pass through [`normalize_register`] unchanged).
fn int_alias(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "zero" => "x0",
        "ra" => "x1",
        "sp" => "x2",
        "gp" => "x3",
        "tp" => "x4",
        "t0" => "x5",
        "t1" => "x6",
        "t2" => "x7",
        "s0" | "fp" => "x8",
        "s1" => "x9",
        "a0" => "x10",
        "a1" => "x11",
        "a2" => "x12",
        "a3" => "x13",
        "a4" => "x14",
        "a5" => "x15",
        "a6" => "x16",
        "a7" => "x17",
        "s2" => "x18",
        "s3" => "x19",
        "s4" => "x20",
        "s5" => "x21",
        "s6" => "x22",
        "s7" => "x23",
        "s8" => "x24",
        "s9" => "x25",
        "s10" => "x26",
        "s11" => "x27",
        "t3" => "x28",
        "t4" => "x29",
        "t5" => "x30",
        "t6" => "x31",
        _ => return None,
    };
    Some(canonical)
}

/// Resolves a float ABI register alias (`ft0`, `fa3`, `fs11`, ...) to its canonical `fN` name.
fn float_alias(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "ft0" => "f0",
        "ft1" => "f1",
        "ft2" => "f2",
        "ft3" => "f3",
        "ft4" => "f4",
        "ft5" => "f5",
        "ft6" => "f6",
        "ft7" => "f7",
        "fs0" => "f8",
        "fs1" => "f9",
        "fa0" => "f10",
        "fa1" => "f11",
        "fa2" => "f12",
        "fa3" => "f13",
        "fa4" => "f14",
        "fa5" => "f15",
        "fa6" => "f16",
        "fa7" => "f17",
        "fs2" => "f18",
        "fs3" => "f19",
        "fs4" => "f20",
        "fs5" => "f21",
        "fs6" => "f22",
        "fs7" => "f23",
        "fs8" => "f24",
        "fs9" => "f25",
        "fs10" => "f26",
        "fs11" => "f27",
        "ft8" => "f28",
        "ft9" => "f29",
        "ft10" => "f30",
        "ft11" => "f31",
        _ => return None,
    };
    Some(canonical)
}

/// Normalizes a raw operand token into a canonical register name.
///
/// Strips surrounding whitespace, unwraps a memory-operand base register (`0(sp)` -> `sp`),
/// then resolves ABI aliases in turn (integer, then float). A token that is already
/// canonical (`x10`, `f3`) or otherwise unrecognized is returned as-is.
pub fn normalize_register(token: &str) -> String {
    let token = token.trim();
    let token = match (token.find('('), token.find(')')) {
        (Some(open), Some(close)) if open < close => &token[open + 1..close],
        _ => token,
    };
    if let Some(canonical) = int_alias(token) {
        canonical.to_string()
    } else if let Some(canonical) = float_alias(token) {
        canonical.to_string()
    } else {
        token.to_string()
    }
}

/// True iff `name` is the canonical zero register. Writes to it are never producers.
pub fn is_zero(name: &str) -> bool {
    name == ZERO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_integer_aliases() {
        assert_eq!(normalize_register("a0"), "x10");
        assert_eq!(normalize_register("sp"), "x2");
        assert_eq!(normalize_register("fp"), "x8");
        assert_eq!(normalize_register("s0"), "x8");
    }

    #[test]
    fn resolves_float_aliases() {
        assert_eq!(normalize_register("fa3"), "f13");
        assert_eq!(normalize_register("ft0"), "f0");
    }

    #[test]
    fn passes_through_canonical_names() {
        assert_eq!(normalize_register("x17"), "x17");
        assert_eq!(normalize_register("f9"), "f9");
    }

    #[test]
    fn extracts_base_register_from_memory_operand() {
        assert_eq!(normalize_register("0(sp)"), "x2");
        assert_eq!(normalize_register("-16(s0)"), "x8");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(normalize_register("  a1  "), "x11");
    }

    #[test]
    fn recognizes_zero_register() {
        assert!(is_zero("x0"));
        assert!(!is_zero("x1"));
    }
}
