mod load;
mod model;

pub use load::load_network;
pub use model::{GraphLink, GraphNode, NetworkData, NetworkKind, NetworkMeta};
