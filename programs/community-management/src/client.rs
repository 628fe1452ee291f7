//! Off-chain helpers for frontends and scripts.
//!
//! Builds instructions with every address derived locally, decodes raw
//! account data and filters the program's accounts by their parent
//! back-reference the same way a `memcmp` RPC filter at offset 8 would.

use std::collections::{BTreeSet, HashMap};

use anchor_lang::{
    prelude::*,
    solana_program::instruction::Instruction,
    Discriminator, InstructionData,
};

use crate::{
    accounts, instruction,
    constants::{is_valid_name, PARENT_FIELD_OFFSET},
    error::CommunityError,
    pda::{membership_address, poll_address, try_community_address, vote_address},
    state::{Community, Membership, Poll, Vote},
};

const PUBKEY_BYTES: usize = 32;

/// A decoded account together with the address it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramAccount<T> {
    pub address: Pubkey,
    pub account: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MembershipStatus {
    pub is_member: bool,
    pub is_approved: bool,
}

// Instruction builders
//
// Each one fails with InvalidName, instead of panicking, when the community
// name could never be a seed.

fn community_key(name: &str) -> Result<Pubkey> {
    if !is_valid_name(name) {
        return err!(CommunityError::InvalidName);
    }

    try_community_address(name)
        .map(|(address, _)| address)
        .ok_or_else(|| error!(CommunityError::InvalidName))
}

pub fn initialize_community(admin: &Pubkey, name: &str, description: &str) -> Result<Instruction> {
    let community = community_key(name)?;

    Ok(Instruction {
        program_id: crate::ID,
        accounts: accounts::InitializeCommunity {
            community,
            admin: *admin,
            system_program: anchor_lang::system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::InitializeCommunity {
            name: name.to_string(),
            description: description.to_string(),
        }
        .data(),
    })
}

pub fn join_community(member: &Pubkey, community_name: &str) -> Result<Instruction> {
    let community = community_key(community_name)?;
    let (membership, _) = membership_address(&community, member);

    Ok(Instruction {
        program_id: crate::ID,
        accounts: accounts::JoinCommunity {
            membership,
            community,
            member: *member,
            system_program: anchor_lang::system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::JoinCommunity {}.data(),
    })
}

pub fn approve_membership(
    admin: &Pubkey,
    community_name: &str,
    member: &Pubkey,
) -> Result<Instruction> {
    let community = community_key(community_name)?;
    let (membership, _) = membership_address(&community, member);

    Ok(Instruction {
        program_id: crate::ID,
        accounts: accounts::ApproveMembership {
            community,
            membership,
            admin: *admin,
        }
        .to_account_metas(None),
        data: instruction::ApproveMembership {}.data(),
    })
}

/// `next_poll_index` must be the community's current `total_polls`; if another
/// poll lands first the transaction fails and must be rebuilt
/// (see [`is_stale_poll_address`]).
pub fn create_poll(
    creator: &Pubkey,
    community_name: &str,
    next_poll_index: u64,
    question: &str,
    options: &[String],
    end_time: i64,
) -> Result<Instruction> {
    let community = community_key(community_name)?;
    let (poll, _) = poll_address(&community, next_poll_index);
    let (membership, _) = membership_address(&community, creator);

    Ok(Instruction {
        program_id: crate::ID,
        accounts: accounts::CreatePoll {
            poll,
            community,
            membership,
            creator: *creator,
            system_program: anchor_lang::system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::CreatePoll {
            question: question.to_string(),
            options: options.to_vec(),
            end_time,
        }
        .data(),
    })
}

pub fn cast_vote(
    voter: &Pubkey,
    community_name: &str,
    poll_index: u64,
    option_index: u8,
) -> Result<Instruction> {
    let community = community_key(community_name)?;
    let (poll, _) = poll_address(&community, poll_index);
    let (membership, _) = membership_address(&community, voter);
    let (vote, _) = vote_address(&poll, voter);

    Ok(Instruction {
        program_id: crate::ID,
        accounts: accounts::CastVote {
            vote,
            poll,
            membership,
            voter: *voter,
            system_program: anchor_lang::system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::CastVote { option_index }.data(),
    })
}

pub fn close_poll(authority: &Pubkey, community_name: &str, poll_index: u64) -> Result<Instruction> {
    let community = community_key(community_name)?;
    let (poll, _) = poll_address(&community, poll_index);

    Ok(Instruction {
        program_id: crate::ID,
        accounts: accounts::ClosePoll {
            poll,
            community,
            authority: *authority,
        }
        .to_account_metas(None),
        data: instruction::ClosePoll {}.data(),
    })
}

/// True when `target` no longer matches the community's next poll slot,
/// meaning the caller must re-read `total_polls` and rebuild the instruction
pub fn is_stale_poll_address(
    target: &Pubkey,
    community_address: &Pubkey,
    community: &Community,
) -> bool {
    poll_address(community_address, community.total_polls).0 != *target
}

// Account decoding

/// Decode a raw account, checking its discriminator
pub fn decode<T: AccountDeserialize>(data: &[u8]) -> Result<T> {
    T::try_deserialize(&mut &data[..])
}

fn has_discriminator<T: Discriminator>(data: &[u8]) -> bool {
    data.starts_with(&T::DISCRIMINATOR[..])
}

fn parent_of(data: &[u8]) -> Option<Pubkey> {
    data.get(PARENT_FIELD_OFFSET..PARENT_FIELD_OFFSET + PUBKEY_BYTES)
        .and_then(|bytes| Pubkey::try_from(bytes).ok())
}

/// All accounts of type `T` whose back-reference at offset 8 equals `parent`
///
/// `accounts` is the raw `(address, data)` list a program-accounts query
/// returns. Accounts that fail to decode are skipped.
pub fn scan_by_parent<T>(accounts: &[(Pubkey, Vec<u8>)], parent: &Pubkey) -> Vec<ProgramAccount<T>>
where
    T: AccountDeserialize + Discriminator,
{
    accounts
        .iter()
        .filter(|(_, data)| has_discriminator::<T>(data) && parent_of(data) == Some(*parent))
        .filter_map(|(address, data)| {
            decode::<T>(data).ok().map(|account| ProgramAccount {
                address: *address,
                account,
            })
        })
        .collect()
}

pub fn memberships_for(
    accounts: &[(Pubkey, Vec<u8>)],
    community: &Pubkey,
) -> Vec<ProgramAccount<Membership>> {
    scan_by_parent(accounts, community)
}

pub fn polls_for(accounts: &[(Pubkey, Vec<u8>)], community: &Pubkey) -> Vec<ProgramAccount<Poll>> {
    scan_by_parent(accounts, community)
}

pub fn votes_for_poll(accounts: &[(Pubkey, Vec<u8>)], poll: &Pubkey) -> Vec<ProgramAccount<Vote>> {
    scan_by_parent(accounts, poll)
}

/// Memberships still waiting for the admin
pub fn pending_members(
    accounts: &[(Pubkey, Vec<u8>)],
    community: &Pubkey,
) -> Vec<ProgramAccount<Membership>> {
    memberships_for(accounts, community)
        .into_iter()
        .filter(|membership| !membership.account.is_approved)
        .collect()
}

/// Status of `member` in `community`, given the data found at the
/// membership address (`None` when nothing is stored there)
///
/// A record that belongs to another community or wallet counts as no
/// membership at all.
pub fn membership_status(
    data: Option<&[u8]>,
    community: &Pubkey,
    member: &Pubkey,
) -> MembershipStatus {
    match data.map(decode::<Membership>) {
        Some(Ok(membership))
            if membership.community == *community && membership.member == *member =>
        {
            MembershipStatus {
                is_member: true,
                is_approved: membership.is_approved,
            }
        }
        _ => MembershipStatus::default(),
    }
}

/// Community address -> child record addresses, so lookups don't rescan
/// every program account
#[derive(Debug, Default)]
pub struct CommunityIndex {
    memberships: HashMap<Pubkey, BTreeSet<Pubkey>>,
    polls: HashMap<Pubkey, BTreeSet<Pubkey>>,
}

impl CommunityIndex {
    pub fn build(accounts: &[(Pubkey, Vec<u8>)]) -> Self {
        let mut index = Self::default();
        for (address, data) in accounts {
            index.insert(*address, data);
        }
        index
    }

    /// Index one raw account; anything that isn't a membership or poll is ignored
    pub fn insert(&mut self, address: Pubkey, data: &[u8]) {
        let Some(community) = parent_of(data) else {
            return;
        };

        let bucket = if has_discriminator::<Membership>(data) {
            &mut self.memberships
        } else if has_discriminator::<Poll>(data) {
            &mut self.polls
        } else {
            return;
        };

        bucket.entry(community).or_default().insert(address);
    }

    pub fn memberships(&self, community: &Pubkey) -> impl Iterator<Item = &Pubkey> {
        self.memberships.get(community).into_iter().flatten()
    }

    pub fn polls(&self, community: &Pubkey) -> impl Iterator<Item = &Pubkey> {
        self.polls.get(community).into_iter().flatten()
    }
}

// Time conversion. On-chain timestamps are unix seconds, browsers use millis.

pub fn unix_seconds_to_millis(seconds: i64) -> i64 {
    seconds.saturating_mul(1000)
}

pub fn millis_to_unix_seconds(millis: i64) -> i64 {
    millis.div_euclid(1000)
}
