pub mod dimension;
pub mod placement;
pub mod split;

pub use dimension::{label_for, label_for_length};
pub use placement::WallPlacement;
pub use split::{AddWallWithSplitting, SplitOutcome};
