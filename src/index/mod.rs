/// Volume-partitioned lookup structure over the corpus.
mod volume_index;

pub use volume_index::VolumeIndex;
