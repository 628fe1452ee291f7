// PDA Seeds for deterministic address generation

/// Seed for Community PDAs: ["community", name]
/// The name doubles as the uniqueness key, so two communities can never share one
pub const COMMUNITY_SEED: &[u8] = b"community";

/// Seed for Membership PDAs: ["membership", community.key(), member.key()]
/// One membership per member per community
pub const MEMBERSHIP_SEED: &[u8] = b"membership";

/// Seed for Poll PDAs: ["poll", community.key(), total_polls]
/// total_polls is encoded as 8 little-endian bytes and becomes the poll's index
pub const POLL_SEED: &[u8] = b"poll";

/// Seed for Vote PDAs: ["vote", poll.key(), voter.key()]
/// One vote per voter per poll
pub const VOTE_SEED: &[u8] = b"vote";

// Account layout

/// Anchor discriminator size (8 bytes)
pub const DISCRIMINATOR_SIZE: usize = 8;

/// Offset of the parent back-reference (community for memberships and polls,
/// poll for votes) inside a serialized account. Used for memcmp scans.
pub const PARENT_FIELD_OFFSET: usize = DISCRIMINATOR_SIZE;

// Text limits

/// A single PDA seed may not exceed 32 bytes, and the name is used as one
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;
pub const MAX_QUESTION_LENGTH: usize = 200;
pub const MAX_OPTION_LENGTH: usize = 50;

// Poll limits

pub const MIN_OPTIONS_COUNT: usize = 2;
pub const MAX_OPTIONS_COUNT: usize = 4;

/// Check if a community name can be used as a seed
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_NAME_LENGTH
}

pub fn is_valid_description(description: &str) -> bool {
    description.len() <= MAX_DESCRIPTION_LENGTH
}

pub fn is_valid_question(question: &str) -> bool {
    !question.is_empty() && question.len() <= MAX_QUESTION_LENGTH
}

/// Check if the number of poll options is within bounds
pub fn is_valid_option_count(count: usize) -> bool {
    (MIN_OPTIONS_COUNT..=MAX_OPTIONS_COUNT).contains(&count)
}

pub fn is_valid_option(option: &str) -> bool {
    !option.is_empty() && option.len() <= MAX_OPTION_LENGTH
}
