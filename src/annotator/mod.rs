pub mod conductor;
pub mod extract;
pub mod host;
pub mod reactor;
pub mod render;

pub use conductor::*;
pub use extract::*;
pub use host::*;
pub use reactor::*;
pub use render::*;

#[cfg(test)]
mod tests;
