use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::VoteCast,
    state::{Membership, Poll, Vote},
};

// Accounts needed for casting a vote
#[derive(Accounts)]
pub struct CastVote<'info> {
    // Vote PDA - proves this member voted
    // Creation fails with "already in use" on a second vote, which is the
    // only double-vote guard
    #[account(
        init,
        payer = voter,
        space = DISCRIMINATOR_SIZE + Vote::INIT_SPACE,
        seeds = [VOTE_SEED, poll.key().as_ref(), voter.key().as_ref()],
        bump
    )]
    pub vote: Account<'info, Vote>,

    // The poll being voted on (owner and discriminator checked by Anchor)
    #[account(mut)]
    pub poll: Account<'info, Poll>,

    /// CHECK: Address is re-derived from the poll's own community and the
    /// voter; contents are checked by Membership::load_approved
    #[account(
        seeds = [MEMBERSHIP_SEED, poll.community.as_ref(), voter.key().as_ref()],
        bump
    )]
    pub membership: UncheckedAccount<'info>,

    #[account(mut)]
    pub voter: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> CastVote<'info> {
    pub fn cast_vote(&mut self, option_index: u8, bumps: &CastVoteBumps) -> Result<()> {
        let current_time = Clock::get()?.unix_timestamp;

        let poll_key = self.poll.key();
        let voter = self.voter.key();
        let membership = self.membership.to_account_info();

        let vote = apply_vote(
            &mut self.poll,
            poll_key,
            &membership,
            &voter,
            option_index,
            current_time,
            bumps.vote,
        )?;
        self.vote.set_inner(vote);

        msg!("Vote cast successfully!");
        msg!("Voter: {}", self.voter.key());
        msg!("Poll: {}", self.poll.key());
        msg!("Option: {}", self.poll.options[option_index as usize]);
        msg!("New vote count for this option: {}", self.poll.vote_counts[option_index as usize]);
        msg!("Total votes in poll: {}", self.poll.total_votes);

        emit!(VoteCast {
            poll: self.poll.key(),
            voter: self.voter.key(),
            option_index,
            timestamp: current_time,
        });

        Ok(())
    }
}

/// Count one vote and build its receipt
///
/// Expiry is checked first, so a late vote fails with PollExpired whatever
/// the state of the voter's membership.
pub fn apply_vote(
    poll: &mut Poll,
    poll_key: Pubkey,
    membership: &AccountInfo,
    voter: &Pubkey,
    option_index: u8,
    now: i64,
    bump: u8,
) -> Result<Vote> {
    // Lazy expiry: a vote after end_time deactivates the poll and fails
    poll.ensure_open(now)?;

    Membership::load_approved(membership, &poll.community, voter)?;

    poll.record_vote(option_index)?;

    Ok(Vote::new(poll_key, *voter, option_index, now, bump))
}
