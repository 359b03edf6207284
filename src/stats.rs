//! Aggregates occupancy and repacking metrics from a parsed-and-repacked program.

use crate::bundle::Bundle;
use crate::dependency::DependencyGraph;
use crate::instruction::{Category, Instruction};
use crate::tables;
use std::collections::BTreeMap;

/// Byte width of one instruction slot, used to translate bundle/instruction counts
/// into program-size figures.
const SLOT_BYTES: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaddingBreakdown {
    pub nop_count: usize,
    pub feq_zero_count: usize,
    pub leading: usize,
    pub trailing: usize,
    pub middle: usize,
}

impl PaddingBreakdown {
    pub fn total(&self) -> usize {
        self.nop_count + self.feq_zero_count
    }

    pub fn removable(&self) -> usize {
        self.leading + self.trailing
    }
}

/// Full statistics for one analysis run: original-bundle occupancy, padding
/// placement, the category histogram, and the original-vs-optimized comparison.
#[derive(Debug)]
pub struct Statistics {
    pub total_bundles: usize,
    pub total_instructions: usize,
    pub valid_instructions: usize,
    pub padding: PaddingBreakdown,
    pub category_histogram: BTreeMap<Category, usize>,

    pub single_cycle_count: usize,
    pub independent_count: usize,
    pub dependent_count: usize,
    pub one_level_candidate_pairs: usize,
    pub merged_pairs: usize,

    pub optimized_bundle_count: usize,
}

impl Statistics {
    pub fn valid_percentage(&self) -> f64 {
        percentage(self.valid_instructions, self.total_instructions)
    }

    pub fn original_size_bytes(&self) -> usize {
        self.total_instructions * SLOT_BYTES
    }

    pub fn optimized_size_bytes(&self) -> usize {
        (self.total_instructions - self.padding.removable()) * SLOT_BYTES
    }

    pub fn size_reduction_bytes(&self) -> usize {
        self.original_size_bytes() - self.optimized_size_bytes()
    }

    pub fn size_reduction_percentage(&self) -> f64 {
        percentage(self.size_reduction_bytes(), self.original_size_bytes())
    }

    pub fn bundle_reduction(&self) -> usize {
        self.total_bundles.saturating_sub(self.optimized_bundle_count)
    }

    pub fn bundle_reduction_percentage(&self) -> f64 {
        percentage(self.bundle_reduction(), self.total_bundles)
    }

    pub fn original_density(&self) -> f64 {
        ratio(self.valid_instructions, self.total_bundles)
    }

    pub fn optimized_density(&self) -> f64 {
        ratio(self.valid_instructions, self.optimized_bundle_count)
    }

    pub fn density_improvement_percentage(&self) -> f64 {
        let original = self.original_density();
        if original == 0.0 {
            0.0
        } else {
            (self.optimized_density() - original) / original * 100.0
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn padding_breakdown(bundles: &[Bundle]) -> PaddingBreakdown {
    let mut breakdown = PaddingBreakdown::default();
    for bundle in bundles {
        let stats = bundle.padding_stats();
        breakdown.leading += stats.leading;
        breakdown.trailing += stats.trailing;
        breakdown.middle += stats.middle;
        for inst in &bundle.instructions {
            if !inst.is_padding {
                continue;
            }
            let encoding = inst.encoding.to_ascii_lowercase();
            if encoding == tables::NOP_ENCODING || inst.mnemonic == "nop" {
                breakdown.nop_count += 1;
            } else {
                breakdown.feq_zero_count += 1;
            }
        }
    }
    breakdown
}

fn category_histogram(valid: &[Instruction]) -> BTreeMap<Category, usize> {
    let mut histogram = BTreeMap::new();
    for category in Category::ALL {
        if category != Category::Nop {
            histogram.insert(category, 0);
        }
    }
    for inst in valid {
        *histogram.entry(inst.category).or_insert(0) += 1;
    }
    histogram
}

/// Computes the full statistics for a run: the original bundle stream, the extracted
/// valid-instruction list, its dependency graph, and the repacking result.
pub fn collect(
    original: &[Bundle],
    valid: &[Instruction],
    graph: &DependencyGraph,
    optimized_bundle_count: usize,
    merged_pairs: usize,
) -> Statistics {
    let total_instructions = original.iter().map(|b| b.instructions.len()).sum();
    let valid_instructions = valid.len();

    let single_cycle_count = valid.iter().filter(|i| i.is_single_cycle).count();
    let independent_count = (0..graph.len()).filter(|&i| !graph.has_any_producer(i)).count();
    let dependent_count = graph.len() - independent_count;
    let one_level_candidate_pairs = graph.forwarding_candidates(valid).len();

    Statistics {
        total_bundles: original.len(),
        total_instructions,
        valid_instructions,
        padding: padding_breakdown(original),
        category_histogram: category_histogram(valid),
        single_cycle_count,
        independent_count,
        dependent_count,
        one_level_candidate_pairs,
        merged_pairs,
        optimized_bundle_count,
    }
}
