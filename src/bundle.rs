//! The bundle model and original-stream bundling.

use crate::instruction::Instruction;
use crate::tables::BUNDLE_SIZE;

/// Padding placement within a single bundle, as scanned by [`Bundle::padding_stats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PaddingStats {
    pub leading: usize,
    pub trailing: usize,
    pub middle: usize,
}

impl PaddingStats {
    pub fn total(&self) -> usize {
        self.leading + self.trailing + self.middle
    }

    /// Padding that can be dropped without disturbing slot alignment of interior
    /// valid instructions: the leading and trailing runs, never the interleaved middle.
    pub fn removable(&self) -> usize {
        self.leading + self.trailing
    }
}

/// A group of up to [`BUNDLE_SIZE`] instructions issued together.
#[derive(Clone, Debug)]
pub struct Bundle {
    pub origin_address: u32,
    pub instructions: Vec<Instruction>,
}

impl Bundle {
    /// Starts a new, empty bundle anchored at `origin_address`. Used both by
    /// [`Bundle::bundle_all`] and by the repacker when it closes off a bundle and
    /// opens the next one.
    pub(crate) fn new_for_repack(origin_address: u32) -> Bundle {
        Bundle::new(origin_address)
    }

    fn new(origin_address: u32) -> Bundle {
        Bundle {
            origin_address,
            instructions: Vec::with_capacity(BUNDLE_SIZE),
        }
    }

    pub fn is_full(&self) -> bool {
        self.instructions.len() >= BUNDLE_SIZE
    }

    pub fn push(&mut self, instruction: Instruction) {
        debug_assert!(!self.is_full());
        self.instructions.push(instruction);
    }

    pub fn valid_count(&self) -> usize {
        self.instructions.iter().filter(|i| !i.is_padding).count()
    }

    pub fn padding_stats(&self) -> PaddingStats {
        if self.instructions.is_empty() {
            return PaddingStats::default();
        }

        let leading = self
            .instructions
            .iter()
            .take_while(|i| i.is_padding)
            .count();
        let trailing = self
            .instructions
            .iter()
            .rev()
            .take_while(|i| i.is_padding)
            .count();
        let total_padding = self.instructions.iter().filter(|i| i.is_padding).count();
        let middle = total_padding - leading - trailing;

        PaddingStats {
            leading,
            trailing,
            middle,
        }
    }

    /// Groups a flat instruction stream into bundles of [`BUNDLE_SIZE`], in input order.
    /// Every group of exactly `BUNDLE_SIZE` consecutive instructions forms one bundle;
    /// a final short group (fewer than `BUNDLE_SIZE` instructions) still forms a bundle.
    pub fn bundle_all(instructions: Vec<Instruction>) -> Vec<Bundle> {
        let mut bundles = Vec::new();
        let mut iter = instructions.into_iter().peekable();

        while let Some(first) = iter.next() {
            let mut bundle = Bundle::new(first.address);
            bundle.push(first);
            while bundle.instructions.len() < BUNDLE_SIZE {
                match iter.peek() {
                    Some(_) => bundle.push(iter.next().unwrap()),
                    None => break,
                }
            }
            bundles.push(bundle);
        }

        bundles
    }
}
