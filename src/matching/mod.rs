pub mod team_normalizer;

pub use team_normalizer::{TeamNameNormalizer, TeamPair};
