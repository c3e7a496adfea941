//! Tracking module: head offset to rig position.

mod head_offset;

pub use head_offset::{HeadOffsetMapper, PassThrough, Smoother};
