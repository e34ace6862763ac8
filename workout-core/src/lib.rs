pub mod models;
pub mod validation;
pub mod storage;
pub mod errors;

pub use models::*;
pub use validation::*;
pub use storage::*;
pub use errors::*;
