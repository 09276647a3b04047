//! Command handlers, one module per subcommand.

pub mod completion;
pub mod head;
pub mod insert;
pub mod lookup;
pub mod remote;
pub mod version;
