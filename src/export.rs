//! Re-emits the optimized bundle stream as disassembly text.

use crate::bundle::Bundle;
use crate::tables::{BUNDLE_SIZE, NOP_ENCODING};
use std::fmt::Write;

/// Preserves original addresses: each optimized bundle occupies an 8-slot window
/// starting at its origin address, with unfilled slots printed as `nop`.
pub fn export_aligned(bundles: &[Bundle]) -> String {
    let mut out = String::new();
    writeln!(out, "# VLIW repacked disassembly (aligned)").unwrap();
    writeln!(out, "# addresses preserved; optimized into {} bundle(s)", bundles.len()).unwrap();
    writeln!(out).unwrap();

    for (index, bundle) in bundles.iter().enumerate() {
        writeln!(out, "# === Bundle {} (valid: {}) ===", index, bundle.valid_count()).unwrap();
        for slot in 0..BUNDLE_SIZE {
            let address = bundle.origin_address + (slot as u32) * 4;
            match bundle.instructions.get(slot) {
                Some(inst) => writeln!(
                    out,
                    "{:08x}: {}     \t{}\t{}",
                    address, inst.encoding, inst.mnemonic, inst.operand_text
                )
                .unwrap(),
                None => writeln!(out, "{:08x}: {}     \tnop", address, NOP_ENCODING).unwrap(),
            }
        }
    }

    out
}

/// Omits padding entirely: addresses are recomputed from `base_address` with a
/// 4-byte stride per instruction, plus an additional `(BUNDLE_SIZE - valid_count) * 4`
/// at each bundle boundary so the gap between bundles still reflects the unfilled slots.
pub fn export_compact(bundles: &[Bundle], base_address: u32) -> String {
    let mut out = String::new();
    writeln!(out, "# VLIW repacked disassembly (compact, valid instructions only)").unwrap();
    writeln!(out, "# optimized into {} bundle(s)", bundles.len()).unwrap();
    writeln!(out).unwrap();

    let mut address = base_address;
    for (index, bundle) in bundles.iter().enumerate() {
        writeln!(out, "# === Bundle {} (valid: {}) ===", index, bundle.valid_count()).unwrap();
        for inst in &bundle.instructions {
            if inst.is_padding {
                continue;
            }
            writeln!(
                out,
                "{:08x}: {}     \t{}\t{}",
                address, inst.encoding, inst.mnemonic, inst.operand_text
            )
            .unwrap();
            address += 4;
        }
        let unfilled = BUNDLE_SIZE - bundle.instructions.len();
        address += (unfilled as u32) * 4;
    }

    out
}
