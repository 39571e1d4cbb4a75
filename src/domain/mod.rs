//! Domain logic - pure business rules independent of git and the filesystem

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::CommitClass;
pub use tag::TagBlock;
pub use version::{Version, VersionBump};
