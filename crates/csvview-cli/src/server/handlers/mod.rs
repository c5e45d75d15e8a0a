//! API request handlers.

mod export;
mod report;
mod state;
mod upload;

pub use export::*;
pub use report::*;
pub use state::*;
pub use upload::*;
