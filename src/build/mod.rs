pub mod ipoint;
pub mod sorter;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;
use crate::progress::ProgressSink;
use crate::text::Text;
use ipoint::{Bytes, IndexPointStrategy};
use sorter::Sorter;

/// Assigns index points over a text and writes a sorted array file,
/// mirroring the reference `SaryBuilder`'s `index` + `sort` pipeline.
pub struct Builder<S: IndexPointStrategy = Bytes> {
    strategy: S,
}

impl Default for Builder<Bytes> {
    fn default() -> Self {
        Builder { strategy: Bytes }
    }
}

impl Builder<Bytes> {
    /// A builder using the default strategy (every byte is an index
    /// point), matching `sary_ipoint_bytestream`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: IndexPointStrategy> Builder<S> {
    /// A builder using a custom index-point strategy, matching
    /// `sary_builder_set_ipoint_func`'s pluggability.
    pub fn with_strategy(strategy: S) -> Self {
        Builder { strategy }
    }

    /// Assigns index points over `text`, in text order.
    pub fn assign(&self, text: &[u8]) -> Vec<u32> {
        self.strategy.scan(text)
    }

    /// Assigns and sorts index points over `text`, reporting progress
    /// through `progress` as assignment completes (sort is not itself
    /// incremental, so progress jumps from ~50% to 100% around it).
    pub fn build(&self, text: &[u8], progress: &mut dyn ProgressSink) -> Vec<u32> {
        let total = text.len() as u64 + 1;
        progress.report(0, total);
        let offsets = self.assign(text);
        progress.report(total / 2, total);
        let sorted = Sorter::sort(text, &offsets);
        progress.report(total, total);
        sorted
    }

    /// Runs [`Builder::build`] and writes the big-endian array file to
    /// `array_path`.
    pub fn build_to_file<P: AsRef<Path>>(
        &self,
        text: &[u8],
        array_path: P,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        let sorted = self.build(text, progress);
        let array_path = array_path.as_ref();
        let file = File::create(array_path).map_err(|source| crate::error::SaryError::Io {
            path: array_path.to_path_buf(),
            source,
        })?;
        Sorter::write(&sorted, BufWriter::new(file)).map_err(|source| crate::error::SaryError::Io {
            path: array_path.to_path_buf(),
            source,
        })
    }

    /// Convenience wrapper over [`Builder::build_to_file`] that also
    /// maps the text file, matching the common `sary FILE` invocation
    /// that writes `FILE.ary`.
    pub fn build_file_to_array<P: AsRef<Path>>(
        &self,
        text_path: P,
        array_path: P,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        let text = Text::open(text_path)?;
        self.build_to_file(text.as_bytes(), array_path, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayView;
    use crate::progress::QuietProgress;

    #[test]
    fn build_produces_a_valid_suffix_array() {
        let text = b"abracadabra";
        let builder = Builder::new();
        let mut progress = QuietProgress;
        let sorted = builder.build(text, &mut progress);

        assert_eq!(sorted.len(), text.len());
        for w in sorted.windows(2) {
            let a = &text[w[0] as usize..];
            let b = &text[w[1] as usize..];
            assert!(a <= b);
        }
    }

    #[test]
    fn build_to_file_round_trips_through_array_view() {
        let text = b"mississippi";
        let builder = Builder::new();
        let mut progress = QuietProgress;
        let dir = tempfile::tempdir().unwrap();
        let array_path = dir.path().join("a.ary");

        builder
            .build_to_file(text, &array_path, &mut progress)
            .unwrap();

        let view = ArrayView::open(&array_path).unwrap();
        assert_eq!(view.len(), text.len());
    }

    #[test]
    fn custom_strategy_assigns_only_its_own_offsets() {
        use ipoint::Lines;
        let text = b"one\ntwo\nthree\n";
        let builder = Builder::with_strategy(Lines);
        let offsets = builder.assign(text);
        assert_eq!(offsets, vec![0, 4, 8]);
    }
}
