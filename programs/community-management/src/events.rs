use anchor_lang::prelude::*;

#[event]
pub struct CommunityInitialized {
    pub community: Pubkey,
    pub admin: Pubkey,
    pub name: String,
}

#[event]
pub struct MembershipRequested {
    pub community: Pubkey,
    pub member: Pubkey,
    pub joined_at: i64,
}

#[event]
pub struct MembershipApproved {
    pub community: Pubkey,
    pub member: Pubkey,
    /// Approved members after this approval
    pub member_count: u64,
}

#[event]
pub struct PollCreated {
    pub community: Pubkey,
    pub poll: Pubkey,
    pub creator: Pubkey,
    /// Ordinal used in the poll's address
    pub index: u64,
    pub end_time: i64,
}

#[event]
pub struct VoteCast {
    pub poll: Pubkey,
    pub voter: Pubkey,
    pub option_index: u8,
    pub timestamp: i64,
}

#[event]
pub struct PollClosed {
    pub poll: Pubkey,
    pub closed_by: Pubkey,
    pub total_votes: u64,
}
