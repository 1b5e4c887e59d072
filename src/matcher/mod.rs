mod params;
pub mod resolver;

pub use params::Params;
pub use resolver::{MatchInput, find_route};
