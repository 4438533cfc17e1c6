mod context;
mod error;
mod outcome;
mod paths;
mod runner;

pub use context::{ExecutionMode, GateContext};
pub use error::GateError;
pub use outcome::GateOutcome;
pub use paths::{PathRefs, ResolvedPaths};
pub use runner::GateRunner;
