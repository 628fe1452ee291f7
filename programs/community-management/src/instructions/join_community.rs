use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::MembershipRequested,
    state::{Community, Membership},
};

/// Request membership in a community
#[derive(Accounts)]
pub struct JoinCommunity<'info> {
    /// Membership PDA, ["membership", community, member]
    /// A second request from the same member fails with "already in use",
    /// whether or not the first one was approved
    #[account(
        init,
        payer = member,
        space = DISCRIMINATOR_SIZE + Membership::INIT_SPACE,
        seeds = [MEMBERSHIP_SEED, community.key().as_ref(), member.key().as_ref()],
        bump
    )]
    pub membership: Account<'info, Membership>,

    #[account(
        seeds = [COMMUNITY_SEED, community.name.as_bytes()],
        bump = community.bump
    )]
    pub community: Account<'info, Community>,

    #[account(mut)]
    pub member: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> JoinCommunity<'info> {
    pub fn join_community(&mut self, bumps: &JoinCommunityBumps) -> Result<()> {
        let joined_at = Clock::get()?.unix_timestamp;

        self.membership.set_inner(Membership::new(
            self.community.key(),
            self.member.key(),
            joined_at,
            bumps.membership,
        ));

        msg!("Membership requested");
        msg!("Community: {}", self.community.name);
        msg!("Member: {}", self.member.key());

        emit!(MembershipRequested {
            community: self.community.key(),
            member: self.member.key(),
            joined_at,
        });

        Ok(())
    }
}
