//! Dependency-aware VLIW bundle repacking for RISC-V disassembly streams.
//!
//! Parses disassembly text into decoded instructions, regroups it into its original
//! 8-slot bundles, builds a RAW dependency graph over the valid (non-padding)
//! instructions, and greedily repacks them exploiting one-level forwarding. The
//! [`analyze`] function ties the whole pipeline together; the individual stages are
//! exposed as public modules for anything that wants to drive them directly.

pub mod bundle;
pub mod dependency;
pub mod error;
pub mod export;
pub mod instruction;
pub mod parse;
pub mod registers;
pub mod report;
pub mod repack;
pub mod stats;
pub mod tables;

use bundle::Bundle;
use instruction::Instruction;
use parse::LineParser;
use stats::Statistics;

/// The full result of one analysis run: the original bundle stream (retained for
/// callers that want to inspect or re-render the unpacked input), the optimized
/// bundle stream, and the combined statistics.
pub struct AnalysisResult {
    pub original_bundles: Vec<Bundle>,
    pub optimized_bundles: Vec<Bundle>,
    pub statistics: Statistics,
}

/// Runs the full pipeline over disassembly text: parse, bundle, build the dependency
/// graph over the valid instructions, repack, and collect statistics.
pub fn analyze(source: &str) -> AnalysisResult {
    let parser = LineParser::new();
    let instructions: Vec<Instruction> = parser.parse_source(source);
    let original_bundles = Bundle::bundle_all(instructions);

    let valid: Vec<Instruction> = original_bundles
        .iter()
        .flat_map(|b| b.instructions.iter().cloned())
        .filter(|i| !i.is_padding)
        .collect();

    let graph = dependency::DependencyGraph::build(&valid);
    let repacked = repack::repack(&valid);

    let statistics = stats::collect(
        &original_bundles,
        &valid,
        &graph,
        repacked.bundles.len(),
        repacked.merged_pairs,
    );

    AnalysisResult {
        original_bundles,
        optimized_bundles: repacked.bundles,
        statistics,
    }
}
