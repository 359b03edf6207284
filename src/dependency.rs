//! RAW dependency analysis over a linear valid-instruction stream.

use crate::instruction::Instruction;

/// At most one producer per source register (rs1, rs2, rs3), so at most three entries.
type Producers = [Option<usize>; 3];

/// `deps[i]` holds the indices of `i`'s immediate RAW producers, one slot per source
/// register that resolved to a writer. Indices are always `< i`.
pub struct DependencyGraph {
    deps: Vec<Producers>,
}

/// True iff `producer` writes a register that `consumer` reads: the raw RAW test,
/// independent of either instruction's latency.
pub fn has_raw(producer: &Instruction, consumer: &Instruction) -> bool {
    match &producer.rd {
        Some(rd) if producer.is_producer_eligible() => consumer.sources().any(|s| s == rd),
        _ => false,
    }
}

/// True iff `producer`'s result can be forwarded within the same bundle to `consumer`:
/// there must be a RAW dependency, the producer must be single-cycle, and the consumer
/// must be forwarding-eligible (single-cycle ALU or any branch/jump).
pub fn can_forward(producer: &Instruction, consumer: &Instruction) -> bool {
    has_raw(producer, consumer) && producer.is_single_cycle && consumer.is_forward_eligible_consumer()
}

impl DependencyGraph {
    /// Builds the dependency graph for `valid`, a list of non-padding instructions in
    /// original program order. For each consumer, scans backwards and records, for each
    /// of its defined source registers, the nearest preceding writer — the first `j`
    /// (in descending order) whose `rd` equals that source and is not `x0`. Earlier
    /// writes to an already-satisfied register are shadowed and do not appear.
    pub fn build(valid: &[Instruction]) -> DependencyGraph {
        let mut deps = Vec::with_capacity(valid.len());

        for (i, consumer) in valid.iter().enumerate() {
            let mut satisfied = [consumer.rs1.is_none(), consumer.rs2.is_none(), consumer.rs3.is_none()];
            let sources = [consumer.rs1.as_deref(), consumer.rs2.as_deref(), consumer.rs3.as_deref()];
            let mut producers: Producers = [None, None, None];

            let mut j = i;
            while j > 0 && !satisfied.iter().all(|s| *s) {
                j -= 1;
                let candidate = &valid[j];
                if !candidate.is_producer_eligible() {
                    continue;
                }
                let rd = candidate.rd.as_deref().unwrap();
                for slot in 0..3 {
                    if !satisfied[slot] && sources[slot] == Some(rd) {
                        producers[slot] = Some(j);
                        satisfied[slot] = true;
                    }
                }
            }

            deps.push(producers);
        }

        DependencyGraph { deps }
    }

    /// The set of immediate producer indices for consumer `i`, each `< i`. Deduplicated:
    /// a consumer reading the same register from two source slots (`add x6, x5, x5`)
    /// resolves both slots to the same nearest writer, which must count once.
    pub fn producers_of(&self, i: usize) -> impl Iterator<Item = usize> {
        let mut producers: Vec<usize> = self.deps[i].iter().filter_map(|p| *p).collect();
        producers.sort_unstable();
        producers.dedup();
        producers.into_iter()
    }

    pub fn has_any_producer(&self, i: usize) -> bool {
        self.deps[i].iter().any(|p| p.is_some())
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    /// All `(producer_idx, consumer_idx)` pairs in `valid` that qualify for one-level
    /// forwarding, used for the "one-level candidate pairs" statistic.
    pub fn forwarding_candidates(&self, valid: &[Instruction]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, consumer) in valid.iter().enumerate() {
            for j in self.producers_of(i) {
                if can_forward(&valid[j], consumer) {
                    pairs.push((j, i));
                }
            }
        }
        pairs
    }
}
