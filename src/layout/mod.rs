//! Pure layout code shared by the canvas components.

pub mod collide;
pub mod quadtree;
pub mod scale;
pub mod segment;
pub mod simulation;

pub use collide::{Collider, Node, separate};
pub use scale::{BandScale, LinearScale};
pub use segment::{Segment, TopicId, TopicOrder, TopicWeights, by_weight_desc, focal_first, segment};
pub use simulation::{RunState, Simulation};
