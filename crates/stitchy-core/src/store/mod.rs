//! Pure state transitions over the project tree.
//!
//! All mutation funnels through [`reduce`]: a command either resolves
//! every id it names and applies, or leaves the tree untouched. The
//! clock is an explicit argument so transitions are reproducible.

mod command;
mod reducer;

pub use command::Command;
pub use reducer::reduce;
