use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::CommunityError,
    events::MembershipApproved,
    state::{Community, Membership},
};

/// Approve a pending membership (community admin only)
#[derive(Accounts)]
pub struct ApproveMembership<'info> {
    #[account(
        mut,
        seeds = [COMMUNITY_SEED, community.name.as_bytes()],
        bump = community.bump
    )]
    pub community: Account<'info, Community>,

    #[account(
        mut,
        has_one = community @ CommunityError::CommunityMismatch,
        seeds = [MEMBERSHIP_SEED, community.key().as_ref(), membership.member.as_ref()],
        bump = membership.bump
    )]
    pub membership: Account<'info, Membership>,

    /// Checked against community.admin in the handler
    pub admin: Signer<'info>,
}

impl<'info> ApproveMembership<'info> {
    pub fn approve_membership(&mut self) -> Result<()> {
        let admin = self.admin.key();
        self.community.approve(&mut self.membership, &admin)?;

        msg!("Membership approved");
        msg!("Member: {}", self.membership.member);
        msg!("Member count: {}", self.community.member_count);

        emit!(MembershipApproved {
            community: self.community.key(),
            member: self.membership.member,
            member_count: self.community.member_count,
        });

        Ok(())
    }
}
