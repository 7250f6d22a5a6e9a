//! Browser adapter: everything that needs a real page and the WebExtension APIs.

pub mod content;
pub mod dom;
pub mod extension;
pub mod settings;

pub use content::*;
pub use dom::*;
pub use settings::*;
