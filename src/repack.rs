//! The greedy, dependency-aware bundle repacker.

use crate::bundle::Bundle;
use crate::dependency::{can_forward, DependencyGraph};
use crate::instruction::Instruction;
use crate::tables::BUNDLE_SIZE;
use std::collections::HashSet;

/// Result of a repacking pass: the optimized bundle stream plus the merge count.
pub struct RepackResult {
    pub bundles: Vec<Bundle>,
    /// Number of consumers admitted into the same bundle as at least one forwardable
    /// producer. Counted once per consumer, regardless of how many of its producers
    /// are forwardable.
    pub merged_pairs: usize,
}

struct PackState<'a> {
    valid: &'a [Instruction],
    graph: &'a DependencyGraph,
    packed_before: HashSet<usize>,
    current_indices: Vec<usize>,
}

impl<'a> PackState<'a> {
    fn can_add(&self, i: usize) -> bool {
        self.graph.producers_of(i).all(|j| {
            if self.packed_before.contains(&j) {
                true
            } else if self.current_indices.contains(&j) {
                can_forward(&self.valid[j], &self.valid[i])
            } else {
                false
            }
        })
    }

    fn forms_new_merge(&self, i: usize) -> bool {
        self.graph
            .producers_of(i)
            .filter(|j| self.current_indices.contains(j))
            .any(|j| can_forward(&self.valid[j], &self.valid[i]))
    }
}

/// Walks `valid` in order and greedily packs instructions into bundles of at most
/// [`BUNDLE_SIZE`], admitting a consumer into the bundle under construction only when
/// every one of its RAW producers is either already closed out in a prior bundle, or
/// present in the current bundle with a one-level-forwardable relationship to it.
pub fn repack(valid: &[Instruction]) -> RepackResult {
    if valid.is_empty() {
        return RepackResult {
            bundles: Vec::new(),
            merged_pairs: 0,
        };
    }

    let graph = DependencyGraph::build(valid);
    let mut state = PackState {
        valid,
        graph: &graph,
        packed_before: HashSet::new(),
        current_indices: Vec::new(),
    };

    let mut bundles = Vec::new();
    let mut current = Bundle::new_for_repack(valid[0].address);
    let mut merged_pairs = 0;

    for i in 0..valid.len() {
        let admit = !current.is_full() && state.can_add(i);

        if admit {
            if state.forms_new_merge(i) {
                merged_pairs += 1;
            }
            current.push(valid[i].clone());
            state.current_indices.push(i);
        } else {
            state.packed_before.extend(state.current_indices.drain(..));
            bundles.push(current);
            current = Bundle::new_for_repack(valid[i].address);
            current.push(valid[i].clone());
            state.current_indices.push(i);
        }
    }

    if !current.instructions.is_empty() {
        bundles.push(current);
    }

    debug_assert!(bundles.iter().all(|b| b.instructions.len() <= BUNDLE_SIZE));

    RepackResult { bundles, merged_pairs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::decode;

    fn instructions_of(bundles: &[Bundle]) -> Vec<Instruction> {
        bundles.iter().flat_map(|b| b.instructions.clone()).collect()
    }

    #[test]
    fn empty_input_yields_no_bundles() {
        let result = repack(&[]);
        assert!(result.bundles.is_empty());
        assert_eq!(result.merged_pairs, 0);
    }

    #[test]
    fn scenario_pure_independent_alu() {
        let valid = vec![
            decode(0x0, "00000000", "addi", "x5, x0, 1"),
            decode(0x4, "00000000", "addi", "x6, x0, 2"),
            decode(0x8, "00000000", "addi", "x7, x0, 3"),
            decode(0xc, "00000000", "addi", "x8, x0, 4"),
        ];
        let result = repack(&valid);
        assert_eq!(result.bundles.len(), 1);
        assert_eq!(result.bundles[0].instructions.len(), 4);
        assert_eq!(result.merged_pairs, 0);
    }

    #[test]
    fn scenario_chain_of_forwardable_alu() {
        let valid = vec![
            decode(0x0, "00000000", "addi", "x5, x0, 1"),
            decode(0x4, "00000000", "addi", "x6, x5, 1"),
            decode(0x8, "00000000", "addi", "x7, x6, 1"),
            decode(0xc, "00000000", "addi", "x8, x7, 1"),
        ];
        let result = repack(&valid);
        assert_eq!(result.bundles.len(), 1);
        assert_eq!(result.merged_pairs, 3);
    }

    #[test]
    fn scenario_load_then_use() {
        let valid = vec![
            decode(0x0, "00000000", "lw", "x5, 0(x2)"),
            decode(0x4, "00000000", "addi", "x6, x5, 1"),
        ];
        let result = repack(&valid);
        assert_eq!(result.bundles.len(), 2);
        assert_eq!(result.merged_pairs, 0);
    }

    #[test]
    fn scenario_alu_feeds_branch() {
        let valid = vec![
            decode(0x0, "00000000", "addi", "x5, x0, 7"),
            decode(0x4, "00000000", "beq", "x5, x6, label"),
        ];
        let result = repack(&valid);
        assert_eq!(result.bundles.len(), 1);
        assert_eq!(result.merged_pairs, 1);
    }

    #[test]
    fn scenario_writes_to_x0_ignored() {
        let valid = vec![
            decode(0x0, "00000000", "addi", "x0, x1, 5"),
            decode(0x4, "00000000", "addi", "x7, x0, 5"),
        ];
        let result = repack(&valid);
        assert_eq!(result.bundles.len(), 1);
        assert_eq!(result.merged_pairs, 0);
    }

    #[test]
    fn scenario_shadowed_producer() {
        let valid = vec![
            decode(0x0, "00000000", "addi", "x5, x0, 1"),
            decode(0x4, "00000000", "addi", "x5, x0, 2"),
            decode(0x8, "00000000", "addi", "x6, x5, 3"),
        ];
        let graph = DependencyGraph::build(&valid);
        assert_eq!(graph.producers_of(2).collect::<Vec<_>>(), vec![1]);

        let result = repack(&valid);
        assert_eq!(result.bundles.len(), 1);
        assert_eq!(result.merged_pairs, 1);
    }

    #[test]
    fn never_exceeds_bundle_capacity() {
        let valid: Vec<_> = (0..20)
            .map(|i| decode(i * 4, "00000000", "addi", &format!("x{}, x0, 1", (i % 30) + 1)))
            .collect();
        let result = repack(&valid);
        assert!(result.bundles.iter().all(|b| b.instructions.len() <= BUNDLE_SIZE));
    }

    #[test]
    fn preserves_program_order() {
        let valid = vec![
            decode(0x0, "00000000", "addi", "x5, x0, 1"),
            decode(0x4, "00000000", "lw", "x6, 0(x2)"),
            decode(0x8, "00000000", "addi", "x7, x6, 1"),
            decode(0xc, "00000000", "addi", "x8, x0, 2"),
        ];
        let result = repack(&valid);
        assert_eq!(instructions_of(&result.bundles), valid);
    }

    #[test]
    fn is_a_fixed_point_on_its_own_output() {
        let valid = vec![
            decode(0x0, "00000000", "addi", "x5, x0, 1"),
            decode(0x4, "00000000", "addi", "x6, x5, 1"),
            decode(0x8, "00000000", "lw", "x7, 0(x2)"),
            decode(0xc, "00000000", "addi", "x8, x7, 1"),
        ];
        let first = repack(&valid);
        let first_flat = instructions_of(&first.bundles);
        let second = repack(&first_flat);
        assert_eq!(instructions_of(&second.bundles), first_flat);
        assert_eq!(second.merged_pairs, first.merged_pairs);
    }
}
