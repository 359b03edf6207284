//! Renders a [`Statistics`] value as the UTF-8 text report described by the crate.

use crate::stats::Statistics;
use std::fmt::Write;

/// Renders the full report. `verbose` additionally includes the category histogram,
/// sorted by category name for determinism.
pub fn render(stats: &Statistics, verbose: bool) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    writeln!(out, "{}", rule).unwrap();
    writeln!(out, "VLIW Disassembly Analysis Report").unwrap();
    writeln!(out, "{}", rule).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "--- Original Bundle Statistics ---").unwrap();
    writeln!(out, "Total bundles: {}", stats.total_bundles).unwrap();
    writeln!(
        out,
        "Total instructions: {} ({} x 8)",
        stats.total_instructions, stats.total_bundles
    )
    .unwrap();
    writeln!(
        out,
        "Valid instructions: {} ({:.1}%)",
        stats.valid_instructions,
        stats.valid_percentage()
    )
    .unwrap();
    writeln!(
        out,
        "Padding instructions: {} ({:.1}%)",
        stats.padding.total(),
        100.0 - stats.valid_percentage()
    )
    .unwrap();
    writeln!(out, "  - nop (0x00000013): {}", stats.padding.nop_count).unwrap();
    writeln!(out, "  - feq.s zero (0xa0002053): {}", stats.padding.feq_zero_count).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "--- Padding Placement ---").unwrap();
    let total_padding = stats.padding.total();
    for (label, count) in [
        ("Leading padding", stats.padding.leading),
        ("Trailing padding", stats.padding.trailing),
        ("Middle padding", stats.padding.middle),
    ] {
        if total_padding > 0 {
            writeln!(
                out,
                "{}: {} ({:.1}%)",
                label,
                count,
                count as f64 / total_padding as f64 * 100.0
            )
            .unwrap();
        } else {
            writeln!(out, "{}: 0", label).unwrap();
        }
    }
    writeln!(
        out,
        "Removable padding: {} (leading + trailing)",
        stats.padding.removable()
    )
    .unwrap();
    writeln!(
        out,
        "Program size: {} bytes ({} x 4)",
        stats.original_size_bytes(),
        stats.total_instructions
    )
    .unwrap();
    writeln!(out, "Optimized size: {} bytes", stats.optimized_size_bytes()).unwrap();
    writeln!(
        out,
        "Size reduction: {} bytes ({:.1}%)",
        stats.size_reduction_bytes(),
        stats.size_reduction_percentage()
    )
    .unwrap();
    writeln!(out).unwrap();

    if verbose {
        writeln!(out, "--- Category Distribution ---").unwrap();
        for (category, count) in &stats.category_histogram {
            let percentage = if stats.valid_instructions > 0 {
                *count as f64 / stats.valid_instructions as f64 * 100.0
            } else {
                0.0
            };
            writeln!(out, "{}: {} ({:.1}%)", category.name(), count, percentage).unwrap();
        }
        writeln!(out).unwrap();
    }

    writeln!(out, "--- One-Level-Forwarding Repack Analysis ---").unwrap();
    writeln!(out, "Optimized bundle count: {}", stats.optimized_bundle_count).unwrap();
    writeln!(
        out,
        "Bundle reduction: {} ({:.1}%)",
        stats.bundle_reduction(),
        stats.bundle_reduction_percentage()
    )
    .unwrap();
    writeln!(out, "Valid instructions: {} (unchanged)", stats.valid_instructions).unwrap();
    writeln!(out, "Original density: {:.2} valid/bundle", stats.original_density()).unwrap();
    writeln!(out, "Optimized density: {:.2} valid/bundle", stats.optimized_density()).unwrap();
    writeln!(out, "Density improvement: {:.1}%", stats.density_improvement_percentage()).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "Single-cycle ALU instructions: {}", stats.single_cycle_count).unwrap();
    writeln!(out, "Independent instructions: {}", stats.independent_count).unwrap();
    writeln!(out, "Dependent instructions: {}", stats.dependent_count).unwrap();
    writeln!(out, "One-level candidate pairs: {}", stats.one_level_candidate_pairs).unwrap();
    writeln!(out, "Merged pairs: {}", stats.merged_pairs).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "{}", rule).unwrap();
    write!(out, "Analysis complete").unwrap();

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::Bundle;
    use crate::dependency::DependencyGraph;
    use crate::instruction::decode;

    fn sample_stats() -> Statistics {
        let instructions = vec![
            decode(0x0, "00000000", "addi", "x5, x0, 1"),
            decode(0x4, "00000013", "nop", ""),
            decode(0x8, "00000000", "addi", "x6, x5, 1"),
        ];
        let valid: Vec<_> = instructions.iter().filter(|i| !i.is_padding).cloned().collect();
        let bundles = Bundle::bundle_all(instructions);
        let graph = DependencyGraph::build(&valid);
        crate::stats::collect(&bundles, &valid, &graph, 1, 1)
    }

    #[test]
    fn report_contains_key_metrics() {
        let stats = sample_stats();
        let text = render(&stats, false);
        assert!(text.contains("Total bundles: 1"));
        assert!(text.contains("Valid instructions: 2"));
        assert!(text.contains("Merged pairs: 1"));
        assert!(!text.contains("Category Distribution"));
    }

    #[test]
    fn verbose_report_includes_histogram() {
        let stats = sample_stats();
        let text = render(&stats, true);
        assert!(text.contains("Category Distribution"));
        assert!(text.contains("ALU: 2"));
    }

    #[test]
    fn empty_program_renders_without_panicking() {
        let bundles: Vec<Bundle> = Vec::new();
        let valid: Vec<_> = Vec::new();
        let graph = DependencyGraph::build(&valid);
        let stats = crate::stats::collect(&bundles, &valid, &graph, 0, 0);
        let text = render(&stats, true);
        assert!(text.contains("Total bundles: 0"));
    }
}
