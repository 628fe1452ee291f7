use anchor_lang::prelude::*;

/// Custom error types for the community program
/// The first eight variants keep their historical codes (6000-6007)
#[error_code]
pub enum CommunityError {
    #[msg("You are not authorized for this action")]
    Unauthorized,

    #[msg("Invalid number of options (must be between 2 and 4)")]
    InvalidOptionCount,

    #[msg("Invalid end date")]
    InvalidEndTime,

    #[msg("You are not an approved member of this community")]
    NotApprovedMember,

    #[msg("The poll is not active")]
    PollNotActive,

    #[msg("The poll has expired")]
    PollExpired,

    #[msg("Invalid option index")]
    InvalidOptionIndex,

    #[msg("You are not authorized to close this poll")]
    UnauthorizedToClose,

    #[msg("Membership has already been approved")]
    AlreadyApproved,

    // Input validation
    #[msg("Community name must be between 1 and 32 bytes")]
    InvalidName,

    #[msg("Description is too long (maximum 200 bytes)")]
    DescriptionTooLong,

    #[msg("Question must be between 1 and 200 bytes")]
    InvalidQuestion,

    #[msg("Each option must be between 1 and 50 bytes")]
    InvalidOption,

    // Account relationships
    #[msg("Account does not belong to this community")]
    CommunityMismatch,

    #[msg("Mathematical overflow in counter update")]
    MathOverflow,
}

impl CommunityError {
    /// Get error code as u32 for logging
    pub fn error_code(&self) -> u32 {
        match self {
            // Authorization errors: 1000-1099
            CommunityError::Unauthorized => 1001,
            CommunityError::UnauthorizedToClose => 1002,

            // Input errors: 1100-1199
            CommunityError::InvalidOptionCount => 1101,
            CommunityError::InvalidEndTime => 1102,
            CommunityError::InvalidOptionIndex => 1103,
            CommunityError::InvalidName => 1104,
            CommunityError::DescriptionTooLong => 1105,
            CommunityError::InvalidQuestion => 1106,
            CommunityError::InvalidOption => 1107,

            // Membership errors: 1200-1299
            CommunityError::NotApprovedMember => 1201,
            CommunityError::AlreadyApproved => 1202,

            // Poll lifecycle errors: 1300-1399
            CommunityError::PollNotActive => 1301,
            CommunityError::PollExpired => 1302,

            // Account errors: 1400-1499
            CommunityError::CommunityMismatch => 1401,
            CommunityError::MathOverflow => 1402,
        }
    }

    /// Get human-readable error category
    pub fn category(&self) -> &'static str {
        match self.error_code() {
            1000..=1099 => "Authorization",
            1100..=1199 => "Invalid Input",
            1200..=1299 => "Membership",
            1300..=1399 => "Poll Lifecycle",
            1400..=1499 => "Account Validation",
            _ => "Unknown",
        }
    }
}

/// Helper macro for logging errors with context
#[macro_export]
macro_rules! log_error {
    ($error:expr, $context:expr) => {
        msg!(
            "Error {}: {} in context: {}",
            $error.error_code(),
            $error.category(),
            $context
        );
    };
}

/// Helper function to safely increment a counter
pub fn safe_increment(value: u64) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or(CommunityError::MathOverflow.into())
}

/// Anchor error number carried by `error`, if it is a program error of ours
#[cfg(test)]
pub(crate) fn error_number(error: &Error) -> Option<u32> {
    match error {
        Error::AnchorError(anchor_error) => Some(anchor_error.error_code_number),
        Error::ProgramError(_) => None,
    }
}

#[cfg(test)]
pub(crate) fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: CommunityError) {
    let expected_number = error_number(&expected.into());
    match result {
        Ok(value) => panic!("expected {:?}, got Ok({:?})", expected, value),
        Err(error) => assert_eq!(error_number(&error), expected_number, "got {:?}", error),
    }
}
