pub mod lookup;
pub mod merge;
pub mod validate;

pub use lookup::{LookupOutcome, LookupService, resolve};
pub use merge::merge;
pub use validate::normalize_term;
