// Export all instruction modules

pub mod initialize_community;
pub mod join_community;
pub mod approve_membership;
pub mod create_poll;
pub mod cast_vote;
pub mod close_poll;

// Re-export the instruction structs for easy access
pub use initialize_community::*;
pub use join_community::*;
pub use approve_membership::*;
pub use create_poll::*;
pub use cast_vote::*;
pub use close_poll::*;
