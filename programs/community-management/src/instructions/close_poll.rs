use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::CommunityError,
    events::PollClosed,
    state::{Community, Poll},
};

// Accounts needed for closing a poll
#[derive(Accounts)]
pub struct ClosePoll<'info> {
    #[account(
        mut,
        has_one = community @ CommunityError::CommunityMismatch
    )]
    pub poll: Account<'info, Poll>,

    // Read only, supplies the admin key
    #[account(
        seeds = [COMMUNITY_SEED, community.name.as_bytes()],
        bump = community.bump
    )]
    pub community: Account<'info, Community>,

    // Poll creator or community admin
    pub authority: Signer<'info>,
}

impl<'info> ClosePoll<'info> {
    pub fn close_poll(&mut self) -> Result<()> {
        let authority = self.authority.key();
        self.poll.close_by(&self.community, &authority)?;

        let current_time = Clock::get()?.unix_timestamp;

        msg!("Poll closed successfully!");
        msg!("Total votes: {}", self.poll.total_votes);
        msg!("Closed by: {}", authority);
        msg!("Was expired: {}", current_time >= self.poll.end_time);

        for (index, (option, votes)) in self
            .poll
            .options
            .iter()
            .zip(self.poll.vote_counts.iter())
            .enumerate()
        {
            msg!("Option {}: '{}' - {} votes", index, option, votes);
        }

        match self.poll.leading_option() {
            Some((winner_index, winner_votes)) => msg!(
                "Leading option: '{}' with {} votes",
                self.poll.options[winner_index],
                winner_votes
            ),
            None => msg!("No votes were cast on this poll."),
        }

        emit!(PollClosed {
            poll: self.poll.key(),
            closed_by: authority,
            total_votes: self.poll.total_votes,
        });

        Ok(())
    }
}
