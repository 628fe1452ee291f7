//! Program-derived addresses for every record the program owns.
//!
//! The on-chain account constraints and these helpers use the same seed
//! constants, so a client that derives an address here gets exactly the
//! account the program will accept.

use anchor_lang::prelude::*;

use crate::constants::*;

/// Find the canonical address and bump for `seed_tag` followed by `components`.
///
/// Panics when the seeds are invalid (for example a component longer than
/// 32 bytes); use [`try_derive`] for caller-supplied input.
pub fn derive(seed_tag: &[u8], components: &[&[u8]]) -> (Pubkey, u8) {
    let seeds = seed_list(seed_tag, components);
    Pubkey::find_program_address(&seeds, &crate::ID)
}

pub fn try_derive(seed_tag: &[u8], components: &[&[u8]]) -> Option<(Pubkey, u8)> {
    let seeds = seed_list(seed_tag, components);
    Pubkey::try_find_program_address(&seeds, &crate::ID)
}

/// Check that a stored bump reproduces `address` from the given seeds
pub fn verify_bump(address: &Pubkey, seed_tag: &[u8], components: &[&[u8]], bump: u8) -> bool {
    let bump_seed = [bump];
    let mut seeds = seed_list(seed_tag, components);
    seeds.push(&bump_seed);
    Pubkey::create_program_address(&seeds, &crate::ID)
        .map(|derived| derived == *address)
        .unwrap_or(false)
}

fn seed_list<'a>(seed_tag: &'a [u8], components: &[&'a [u8]]) -> Vec<&'a [u8]> {
    let mut seeds = Vec::with_capacity(components.len() + 2);
    seeds.push(seed_tag);
    seeds.extend_from_slice(components);
    seeds
}

/// Community address: ["community", name]
pub fn community_address(name: &str) -> (Pubkey, u8) {
    derive(COMMUNITY_SEED, &[name.as_bytes()])
}

/// Same as [`community_address`] but returns `None` for names that cannot be seeds
pub fn try_community_address(name: &str) -> Option<(Pubkey, u8)> {
    try_derive(COMMUNITY_SEED, &[name.as_bytes()])
}

/// Membership address: ["membership", community, member]
pub fn membership_address(community: &Pubkey, member: &Pubkey) -> (Pubkey, u8) {
    derive(MEMBERSHIP_SEED, &[community.as_ref(), member.as_ref()])
}

/// Poll address: ["poll", community, ordinal as u64 LE]
pub fn poll_address(community: &Pubkey, ordinal: u64) -> (Pubkey, u8) {
    derive(POLL_SEED, &[community.as_ref(), &ordinal.to_le_bytes()])
}

/// Vote address: ["vote", poll, voter]
pub fn vote_address(poll: &Pubkey, voter: &Pubkey) -> (Pubkey, u8) {
    derive(VOTE_SEED, &[poll.as_ref(), voter.as_ref()])
}
