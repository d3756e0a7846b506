pub mod ids;
pub mod page;
pub mod pet;

pub use ids::*;
pub use page::*;
pub use pet::*;
