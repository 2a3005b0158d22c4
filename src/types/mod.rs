//! Type definitions

pub mod coordinates;
pub mod job;
pub mod messages;
pub mod route;
pub mod vehicle;

pub use coordinates::*;
pub use job::*;
pub use messages::*;
pub use route::*;
pub use vehicle::*;
