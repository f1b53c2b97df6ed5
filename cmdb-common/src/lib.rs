//! common

mod convert;
mod defaults;
mod report;

pub use convert::*;
pub use defaults::*;
pub use report::*;
