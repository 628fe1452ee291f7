use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::CommunityError,
    events::CommunityInitialized,
    log_error,
    state::Community,
};

/// Create a community named `name`; the signer becomes its admin
#[derive(Accounts)]
#[instruction(name: String)]
pub struct InitializeCommunity<'info> {
    /// The community PDA, ["community", name]
    /// `init` fails with "already in use" when the name is taken
    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_SIZE + Community::INIT_SPACE,
        seeds = [COMMUNITY_SEED, name.as_bytes()],
        bump
    )]
    pub community: Account<'info, Community>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializeCommunity<'info> {
    pub fn initialize_community(
        &mut self,
        name: String,
        description: String,
        bumps: &InitializeCommunityBumps,
    ) -> Result<()> {
        let community = build_community(self.admin.key(), name, description, bumps.community)?;
        self.community.set_inner(community);

        msg!("Community initialized: {}", self.community.name);
        msg!("Admin: {}", self.admin.key());
        msg!("Address: {}", self.community.key());

        emit!(CommunityInitialized {
            community: self.community.key(),
            admin: self.admin.key(),
            name: self.community.name.clone(),
        });

        Ok(())
    }
}

/// Validate the input and build the record the handler stores
pub fn build_community(
    admin: Pubkey,
    name: String,
    description: String,
    bump: u8,
) -> Result<Community> {
    validate_community_params(&name, &description)?;
    Ok(Community::new(admin, name, description, bump))
}

/// Validate community text before the account is written
/// Frontends can call this before building the transaction
pub fn validate_community_params(name: &str, description: &str) -> Result<()> {
    if !is_valid_name(name) {
        log_error!(CommunityError::InvalidName, "initialize_community");
        msg!("Name is {} bytes, limit is {}", name.len(), MAX_NAME_LENGTH);
        return err!(CommunityError::InvalidName);
    }

    if !is_valid_description(description) {
        log_error!(CommunityError::DescriptionTooLong, "initialize_community");
        return err!(CommunityError::DescriptionTooLong);
    }

    Ok(())
}
