pub mod band_scale;
pub mod hierarchy;
pub mod pack;
pub mod scale;
pub mod treemap;
pub mod types;

pub use band_scale::BandScale;
pub use hierarchy::{Hierarchy, HierarchyEntry, HierarchyNode, NodeId};
pub use pack::{Lcg, PackLayout, PackedCircle, enclose, pack_siblings};
pub use scale::LinearScale;
pub use treemap::{GOLDEN_RATIO, TreemapCell, TreemapLayout};
pub use types::{CategoryRecord, Margins, Viewport};
