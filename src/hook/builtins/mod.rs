// Builtin hooks: authorization and audit stamping for resource mutations

pub mod create_stamp;
pub mod update_stamp;

pub use create_stamp::CreateStamp;
pub use update_stamp::UpdateStamp;

/// Wire names of the server-managed audit fields
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";
pub const CREATOR_ID: &str = "creatorId";
