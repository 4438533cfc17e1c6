mod against;
mod buf;
mod output;
mod spawner;
mod traits;

pub use against::AgainstRef;
pub use buf::BufChecker;
pub use output::{CheckerOutput, OutputChunk, Stream};
pub use spawner::ProcessSpawner;
pub use traits::{CheckRequest, Checker, CheckerError};
