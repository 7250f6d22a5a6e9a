pub mod database;
pub mod metric;
pub mod policy;
pub mod resolver;

pub use database::*;
pub use metric::*;
pub use policy::*;
pub use resolver::*;
