use anchor_lang::prelude::*;

use crate::error::{safe_increment, CommunityError};

/// A community created by its admin
/// PDA: ["community", name], so the name is unique per program
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Community {
    /// Creator of the community, the only key allowed to approve members
    pub admin: Pubkey,

    #[max_len(32)]
    pub name: String,

    #[max_len(200)]
    pub description: String,

    /// Number of approved memberships
    pub member_count: u64,

    /// Number of polls ever created (active or closed)
    /// Used as the ordinal seed of the next poll
    pub total_polls: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

/// A member's request to join a community
/// PDA: ["membership", community.key(), member.key()]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Membership {
    pub community: Pubkey,
    pub member: Pubkey,
    /// false until the admin approves; never reverts
    pub is_approved: bool,
    pub joined_at: i64,
    pub bump: u8,
}

/// A poll inside a community
/// PDA: ["poll", community.key(), total_polls at creation]
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Poll {
    pub community: Pubkey,

    pub creator: Pubkey,

    #[max_len(200)]
    pub question: String,

    // Between 2 and 4 options, each up to 50 characters
    #[max_len(4, 50)]
    pub options: Vec<String>,

    // Index-aligned with options
    #[max_len(4)]
    pub vote_counts: Vec<u64>,

    /// Unix timestamp (seconds) after which no vote is accepted
    pub end_time: i64,

    /// Always equal to the sum of vote_counts
    pub total_votes: u64,

    /// Goes true -> false exactly once
    pub is_active: bool,

    pub bump: u8,
}

/// Receipt of a single vote
/// PDA: ["vote", poll.key(), voter.key()]; its existence is what stops double voting
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Vote {
    pub poll: Pubkey,
    pub voter: Pubkey,
    pub option_index: u8,
    pub voted_at: i64,
    pub bump: u8,
}

impl Community {
    /// Text is expected to be validated already (see `validate_community_params`)
    pub fn new(admin: Pubkey, name: String, description: String, bump: u8) -> Self {
        Self {
            admin,
            name,
            description,
            member_count: 0,
            total_polls: 0,
            bump,
        }
    }

    /// Approve a pending membership on behalf of `signer`
    pub fn approve(&mut self, membership: &mut Membership, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.admin, CommunityError::Unauthorized);
        require!(!membership.is_approved, CommunityError::AlreadyApproved);

        let member_count = safe_increment(self.member_count)?;

        membership.is_approved = true;
        self.member_count = member_count;

        Ok(())
    }

    /// Reserve the next poll ordinal and return it
    pub fn register_poll(&mut self) -> Result<u64> {
        let ordinal = self.total_polls;
        self.total_polls = safe_increment(ordinal)?;
        Ok(ordinal)
    }
}

impl Membership {
    pub fn new(community: Pubkey, member: Pubkey, joined_at: i64, bump: u8) -> Self {
        Self {
            community,
            member,
            is_approved: false,
            joined_at,
            bump,
        }
    }

    /// Fail unless this is an approved membership of `member` in `community`
    pub fn ensure_approved(&self, community: &Pubkey, member: &Pubkey) -> Result<()> {
        require!(
            self.community == *community && self.member == *member && self.is_approved,
            CommunityError::NotApprovedMember
        );
        Ok(())
    }

    /// Read a membership from an account that may not exist yet
    ///
    /// Anything other than an approved membership of `member` in `community`,
    /// owned by this program, is reported as `NotApprovedMember`.
    pub fn load_approved(info: &AccountInfo, community: &Pubkey, member: &Pubkey) -> Result<Self> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return err!(CommunityError::NotApprovedMember);
        }

        let data = info.try_borrow_data()?;
        let membership = Membership::try_deserialize(&mut &data[..])
            .map_err(|_| error!(CommunityError::NotApprovedMember))?;

        membership.ensure_approved(community, member)?;
        Ok(membership)
    }
}

impl Poll {
    /// Input is expected to be validated already (see `validate_poll_params`)
    pub fn new(
        community: Pubkey,
        creator: Pubkey,
        question: String,
        options: Vec<String>,
        end_time: i64,
        bump: u8,
    ) -> Self {
        let vote_counts = vec![0u64; options.len()];

        Self {
            community,
            creator,
            question,
            options,
            vote_counts,
            end_time,
            total_votes: 0,
            is_active: true,
            bump,
        }
    }

    /// Whether a vote at `now` would be accepted
    pub fn is_voting_open(&self, now: i64) -> bool {
        self.is_active && now < self.end_time
    }

    /// Lazy expiry check performed whenever a vote touches the poll
    pub fn ensure_open(&mut self, now: i64) -> Result<()> {
        require!(self.is_active, CommunityError::PollNotActive);

        if now >= self.end_time {
            self.is_active = false;
            return err!(CommunityError::PollExpired);
        }

        Ok(())
    }

    pub fn is_valid_option(&self, option_index: u8) -> bool {
        (option_index as usize) < self.options.len()
    }

    /// Count one vote for `option_index`
    pub fn record_vote(&mut self, option_index: u8) -> Result<()> {
        require!(
            self.is_valid_option(option_index),
            CommunityError::InvalidOptionIndex
        );

        let index = option_index as usize;
        let option_votes = safe_increment(self.vote_counts[index])?;
        let total_votes = safe_increment(self.total_votes)?;

        self.vote_counts[index] = option_votes;
        self.total_votes = total_votes;

        Ok(())
    }

    /// Deactivate the poll on behalf of `authority`, which must be its
    /// creator or the community admin
    pub fn close_by(&mut self, community: &Community, authority: &Pubkey) -> Result<()> {
        require!(
            *authority == self.creator || *authority == community.admin,
            CommunityError::UnauthorizedToClose
        );
        require!(self.is_active, CommunityError::PollNotActive);

        self.is_active = false;
        Ok(())
    }

    /// Option with the most votes (earliest wins ties), None when nobody voted
    pub fn leading_option(&self) -> Option<(usize, u64)> {
        if self.total_votes == 0 {
            return None;
        }

        let mut winner = (0, 0);
        for (index, &votes) in self.vote_counts.iter().enumerate() {
            if votes > winner.1 {
                winner = (index, votes);
            }
        }

        Some(winner)
    }

    pub fn tally_is_consistent(&self) -> bool {
        self.options.len() == self.vote_counts.len()
            && self.vote_counts.iter().sum::<u64>() == self.total_votes
    }
}

impl Vote {
    pub fn new(poll: Pubkey, voter: Pubkey, option_index: u8, voted_at: i64, bump: u8) -> Self {
        Self {
            poll,
            voter,
            option_index,
            voted_at,
            bump,
        }
    }
}

/// Owned stand-in for an account passed to the program, for building
/// `AccountInfo`s in tests
#[cfg(test)]
pub(crate) struct RawAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

#[cfg(test)]
impl RawAccount {
    /// Nothing stored at the address yet
    pub fn empty() -> Self {
        Self {
            key: Pubkey::new_unique(),
            owner: anchor_lang::system_program::ID,
            lamports: 0,
            data: Vec::new(),
        }
    }

    pub fn owned_by_program<T: AccountSerialize>(account: &T) -> Self {
        let mut data = Vec::new();
        account.try_serialize(&mut data).unwrap();
        Self {
            key: Pubkey::new_unique(),
            owner: crate::ID,
            lamports: 1,
            data,
        }
    }

    pub fn info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            false,
            false,
            &mut self.lamports,
            &mut self.data,
            &self.owner,
            false,
            0,
        )
    }
}
