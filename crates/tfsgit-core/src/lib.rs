//! Core types for the tfsgit bridge.
//!
//! This crate holds the value types shared by the other crates (object ids,
//! remote descriptors, changeset links, object references) and the pure
//! grammars that read them out of git's text output. It never runs git.

pub mod changeset;
pub mod lines;
pub mod object;
pub mod object_id;
pub mod remote;

pub use changeset::{ChangesetInfo, HeadOutcome, HeadScan};
pub use object::{ObjectRef, ObjectType};
pub use object_id::{ObjectId, ObjectIdError};
pub use remote::{RemoteDescriptor, RemoteRegistry};
