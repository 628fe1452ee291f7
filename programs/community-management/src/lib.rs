use anchor_lang::prelude::*;

// Import our modules
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;

#[cfg(not(target_os = "solana"))]
pub mod client;

// Import instruction handlers
use instructions::*;

declare_id!("CgEPCH2sZKj5Zi7Ms2pJsvi4KKVde76GYbSRnfePGHtn");

#[program]
pub mod community_management {
    use super::*;

    /// Create a community; the signer becomes its admin
    pub fn initialize_community(
        ctx: Context<InitializeCommunity>,
        name: String,
        description: String,
    ) -> Result<()> {
        ctx.accounts.initialize_community(name, description, &ctx.bumps)
    }

    /// Ask to join a community, pending admin approval
    pub fn join_community(ctx: Context<JoinCommunity>) -> Result<()> {
        ctx.accounts.join_community(&ctx.bumps)
    }

    /// Approve a pending membership (admin only)
    pub fn approve_membership(ctx: Context<ApproveMembership>) -> Result<()> {
        ctx.accounts.approve_membership()
    }

    /// Create a poll with 2-4 options ending at `end_time` (unix seconds)
    pub fn create_poll(
        ctx: Context<CreatePoll>,
        question: String,
        options: Vec<String>,
        end_time: i64,
    ) -> Result<()> {
        ctx.accounts.create_poll(question, options, end_time, &ctx.bumps)
    }

    /// Cast a vote on an active poll
    pub fn cast_vote(ctx: Context<CastVote>, option_index: u8) -> Result<()> {
        ctx.accounts.cast_vote(option_index, &ctx.bumps)
    }

    /// Close a poll (creator or community admin)
    pub fn close_poll(ctx: Context<ClosePoll>) -> Result<()> {
        ctx.accounts.close_poll()
    }
}
