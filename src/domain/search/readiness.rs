//! Readiness policy - when results may be offered.

/// Number of user turns after which results are offered regardless of criteria.
pub const MIN_USER_TURNS_FOR_RESULTS: usize = 2;

/// Decides whether the "show results" affordance is available.
///
/// True when the last dialogue turn signalled readiness, or once the user has
/// answered enough questions.
pub fn can_offer_results(last_turn_signalled: bool, user_turns: usize) -> bool {
    last_turn_signalled || user_turns >= MIN_USER_TURNS_FOR_RESULTS
}
