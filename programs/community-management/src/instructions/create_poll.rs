use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::CommunityError,
    events::PollCreated,
    log_error,
    state::{Community, Membership, Poll},
};

/// Create a poll in a community (approved members only)
#[derive(Accounts)]
pub struct CreatePoll<'info> {
    /// Poll PDA, ["poll", community, community.total_polls]
    /// If total_polls moved since the client read it, this address is stale
    /// and the transaction fails; the client re-reads and retries
    #[account(
        init,
        payer = creator,
        space = DISCRIMINATOR_SIZE + Poll::INIT_SPACE,
        seeds = [POLL_SEED, community.key().as_ref(), community.total_polls.to_le_bytes().as_ref()],
        bump
    )]
    pub poll: Account<'info, Poll>,

    #[account(
        mut,
        seeds = [COMMUNITY_SEED, community.name.as_bytes()],
        bump = community.bump
    )]
    pub community: Account<'info, Community>,

    /// CHECK: Address is pinned by the seeds below; contents are read with
    /// Membership::load_approved so a missing account reports NotApprovedMember
    #[account(
        seeds = [MEMBERSHIP_SEED, community.key().as_ref(), creator.key().as_ref()],
        bump
    )]
    pub membership: UncheckedAccount<'info>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreatePoll<'info> {
    pub fn create_poll(
        &mut self,
        question: String,
        options: Vec<String>,
        end_time: i64,
        bumps: &CreatePollBumps,
    ) -> Result<()> {
        let current_time = Clock::get()?.unix_timestamp;
        let community_key = self.community.key();
        let creator = self.creator.key();
        let membership = self.membership.to_account_info();

        let (index, poll) = open_poll(
            &mut self.community,
            &community_key,
            &membership,
            &creator,
            PollParams {
                question,
                options,
                end_time,
            },
            current_time,
            bumps.poll,
        )?;
        self.poll.set_inner(poll);

        msg!("Poll created successfully!");
        msg!("Poll index: {}", index);
        msg!("Creator: {}", self.creator.key());
        msg!("Options: {}", self.poll.options.len());
        msg!("End time: {}", end_time);

        emit!(PollCreated {
            community: self.community.key(),
            poll: self.poll.key(),
            creator: self.creator.key(),
            index,
            end_time,
        });

        Ok(())
    }
}

/// Caller-supplied poll content
#[derive(Debug, Clone, PartialEq)]
pub struct PollParams {
    pub question: String,
    pub options: Vec<String>,
    pub end_time: i64,
}

/// Check the creator and the input, then reserve the next ordinal
///
/// Returns the ordinal and the poll to store at its address. Nothing in
/// `community` changes unless every check passes.
pub fn open_poll(
    community: &mut Community,
    community_key: &Pubkey,
    membership: &AccountInfo,
    creator: &Pubkey,
    params: PollParams,
    now: i64,
    bump: u8,
) -> Result<(u64, Poll)> {
    Membership::load_approved(membership, community_key, creator)?;

    let PollParams {
        question,
        options,
        end_time,
    } = params;
    validate_poll_params(&question, &options, end_time, now)?;

    let poll = Poll::new(*community_key, *creator, question, options, end_time, bump);
    let index = community.register_poll()?;

    Ok((index, poll))
}

/// Validate poll input against the clock reading `now`
/// Checked in the same order the program reports errors
pub fn validate_poll_params(
    question: &str,
    options: &[String],
    end_time: i64,
    now: i64,
) -> Result<()> {
    if !is_valid_option_count(options.len()) {
        log_error!(CommunityError::InvalidOptionCount, "create_poll");
        msg!(
            "Got {} options, expected between {} and {}",
            options.len(),
            MIN_OPTIONS_COUNT,
            MAX_OPTIONS_COUNT
        );
        return err!(CommunityError::InvalidOptionCount);
    }

    if end_time <= now {
        log_error!(CommunityError::InvalidEndTime, "create_poll");
        msg!("End time {} is not after {}", end_time, now);
        return err!(CommunityError::InvalidEndTime);
    }

    if !is_valid_question(question) {
        log_error!(CommunityError::InvalidQuestion, "create_poll");
        return err!(CommunityError::InvalidQuestion);
    }

    for option in options {
        if !is_valid_option(option) {
            log_error!(CommunityError::InvalidOption, "create_poll");
            msg!("Option '{}' is empty or longer than {}", option, MAX_OPTION_LENGTH);
            return err!(CommunityError::InvalidOption);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_error;
    use crate::state::RawAccount;

    const NOW: i64 = 1_700_000_000;

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn test_validate_poll_params() {
        let now = 1_000;
        assert!(validate_poll_params("Pick one", &options(&["A", "B"]), now + 3600, now).is_ok());

        assert_error(
            validate_poll_params("Pick one", &options(&["A"]), now + 3600, now),
            CommunityError::InvalidOptionCount,
        );
        assert_error(
            validate_poll_params("Pick one", &options(&["A", "B", "C", "D", "E"]), now + 3600, now),
            CommunityError::InvalidOptionCount,
        );
        assert_error(
            validate_poll_params("Pick one", &options(&["A", "B"]), now, now),
            CommunityError::InvalidEndTime,
        );
        assert_error(
            validate_poll_params("", &options(&["A", "B"]), now + 1, now),
            CommunityError::InvalidQuestion,
        );
        let long_option = "b".repeat(MAX_OPTION_LENGTH + 1);
        assert_error(
            validate_poll_params("Pick one", &options(&["A", long_option.as_str()]), now + 1, now),
            CommunityError::InvalidOption,
        );
    }

    #[test]
    fn test_poll_space_fits_limits() {
        let poll = Poll::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            "q".repeat(MAX_QUESTION_LENGTH),
            vec!["o".repeat(MAX_OPTION_LENGTH); MAX_OPTIONS_COUNT],
            2,
            255,
        );

        let mut data = Vec::new();
        poll.try_serialize(&mut data).unwrap();
        assert!(data.len() <= DISCRIMINATOR_SIZE + Poll::INIT_SPACE);
    }

    fn params() -> PollParams {
        PollParams {
            question: "Pick one".to_string(),
            options: options(&["A", "B"]),
            end_time: NOW + 3600,
        }
    }

    fn approved_membership(community_key: Pubkey, member: Pubkey) -> RawAccount {
        let mut membership = Membership::new(community_key, member, NOW, 1);
        membership.is_approved = true;
        RawAccount::owned_by_program(&membership)
    }

    #[test]
    fn test_open_poll_reserves_sequential_ordinals() {
        let community_key = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let mut community = Community::new(Pubkey::new_unique(), "main".into(), "D".into(), 255);
        let mut membership = approved_membership(community_key, creator);

        let (first, poll) = open_poll(
            &mut community,
            &community_key,
            &membership.info(),
            &creator,
            params(),
            NOW,
            9,
        )
        .unwrap();
        assert_eq!(first, 0);
        assert_eq!(poll.community, community_key);
        assert_eq!(poll.creator, creator);
        assert_eq!(poll.vote_counts, vec![0, 0]);
        assert_eq!(poll.bump, 9);

        let (second, _) = open_poll(
            &mut community,
            &community_key,
            &membership.info(),
            &creator,
            params(),
            NOW,
            9,
        )
        .unwrap();
        assert_eq!(second, 1);
        assert_eq!(community.total_polls, 2);
    }

    #[test]
    fn test_open_poll_requires_approved_membership() {
        let community_key = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let mut community = Community::new(Pubkey::new_unique(), "main".into(), "D".into(), 255);

        let mut missing = RawAccount::empty();
        assert_error(
            open_poll(
                &mut community,
                &community_key,
                &missing.info(),
                &creator,
                params(),
                NOW,
                9,
            ),
            CommunityError::NotApprovedMember,
        );

        let mut pending =
            RawAccount::owned_by_program(&Membership::new(community_key, creator, NOW, 1));
        assert_error(
            open_poll(
                &mut community,
                &community_key,
                &pending.info(),
                &creator,
                params(),
                NOW,
                9,
            ),
            CommunityError::NotApprovedMember,
        );

        // Approved, but in another community
        let mut elsewhere = approved_membership(Pubkey::new_unique(), creator);
        assert_error(
            open_poll(
                &mut community,
                &community_key,
                &elsewhere.info(),
                &creator,
                params(),
                NOW,
                9,
            ),
            CommunityError::NotApprovedMember,
        );

        assert_eq!(community.total_polls, 0);
    }

    #[test]
    fn test_open_poll_checks_membership_before_input() {
        let community_key = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let mut community = Community::new(Pubkey::new_unique(), "main".into(), "D".into(), 255);
        let bad_input = PollParams {
            options: options(&["A"]),
            ..params()
        };

        let mut missing = RawAccount::empty();
        assert_error(
            open_poll(
                &mut community,
                &community_key,
                &missing.info(),
                &creator,
                bad_input.clone(),
                NOW,
                9,
            ),
            CommunityError::NotApprovedMember,
        );

        let mut membership = approved_membership(community_key, creator);
        assert_error(
            open_poll(
                &mut community,
                &community_key,
                &membership.info(),
                &creator,
                bad_input,
                NOW,
                9,
            ),
            CommunityError::InvalidOptionCount,
        );
        assert_eq!(community.total_polls, 0);
    }
}
