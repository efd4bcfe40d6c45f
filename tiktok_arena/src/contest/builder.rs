//! Bracket builders for single elimination and king of the hill contests.
//!
//! Builders are pure: they pair entries strictly by position, so any seeding
//! has to happen before the entries are handed over (see [`super::Seeder`]).

use super::errors::{ContestError, ContestResult, MIN_CONTEST_ENTRIES};
use super::models::{Bracket, ContestOption, ContestType, Match, Round};

/// Build a bracket of the requested type from already seeded entries.
///
/// # Errors
///
/// * `ContestError::NotEnoughEntries` - fewer than two entries
pub fn build<E: AsRef<str>>(contest_type: ContestType, entries: &[E]) -> ContestResult<Bracket> {
    let bracket = match contest_type {
        ContestType::SingleElimination => single_elimination(entries)?,
        ContestType::KingOfTheHill => king_of_the_hill(entries)?,
    };

    log::debug!(
        "Built {} bracket: {} entries, {} rounds, {} matches",
        contest_type,
        entries.len(),
        bracket.total_rounds(),
        bracket.count_matches
    );

    Ok(bracket)
}

/// Build a single elimination ladder.
///
/// Entrants beyond the largest power of two below the entry count play a
/// first round; everybody else gets a bye into round 2. From round 2 on the
/// field is a power of two and halves every round until the final.
///
/// # Arguments
///
/// * `entries` - Seeded entries, paired by position
///
/// # Returns
///
/// * `ContestResult<Bracket>` - `ceil(log2(N))` rounds holding `N - 1` matches
pub fn single_elimination<E: AsRef<str>>(entries: &[E]) -> ContestResult<Bracket> {
    let entry_count = ensure_enough_entries(entries)?;

    // Bit length of N - 1 is ceil(log2(N)) for N >= 2
    let rounds_total = (usize::BITS - (entry_count - 1).leading_zeros()) as usize;
    let bracket_size = 1usize << rounds_total;
    let first_round_match_count = entry_count - bracket_size / 2;
    let first_round_entry_count = first_round_match_count * 2;

    let mut rounds = Vec::with_capacity(rounds_total);

    let first_round: Vec<Match> = entries[..first_round_entry_count]
        .chunks_exact(2)
        .map(|pair| Match::new(tiktok(&pair[0]), tiktok(&pair[1])))
        .collect();

    // Round 1 winners first, then the entries that skipped round 1
    let mut advancing: Vec<ContestOption> = first_round
        .iter()
        .map(|m| ContestOption::winner_of(m.match_id.as_str()))
        .chain(entries[first_round_entry_count..].iter().map(tiktok))
        .collect();
    debug_assert_eq!(advancing.len(), bracket_size / 2);

    rounds.push(Round {
        round: 1,
        matches: first_round,
    });

    while advancing.len() > 1 {
        let matches = pair_options(advancing);
        advancing = matches
            .iter()
            .map(|m| ContestOption::winner_of(m.match_id.as_str()))
            .collect();

        rounds.push(Round {
            round: rounds.len() as u32 + 1,
            matches,
        });
    }

    debug_assert_eq!(rounds.len(), rounds_total);
    Ok(finish(entry_count, rounds))
}

/// Build a king of the hill gauntlet.
///
/// Entries 0 and 1 meet in round 1; from then on the winner of the previous
/// round meets `entries[r]` in round `r`, one match per round.
///
/// # Arguments
///
/// * `entries` - Seeded entries, challengers in order
///
/// # Returns
///
/// * `ContestResult<Bracket>` - `N - 1` rounds with one match each
pub fn king_of_the_hill<E: AsRef<str>>(entries: &[E]) -> ContestResult<Bracket> {
    let entry_count = ensure_enough_entries(entries)?;

    let mut rounds = Vec::with_capacity(entry_count - 1);
    let opening = Match::new(tiktok(&entries[0]), tiktok(&entries[1]));
    let mut previous_match_id = opening.match_id.clone();
    rounds.push(Round {
        round: 1,
        matches: vec![opening],
    });

    for (index, challenger) in entries.iter().enumerate().skip(2) {
        let next = Match::new(
            ContestOption::winner_of(previous_match_id),
            tiktok(challenger),
        );
        previous_match_id = next.match_id.clone();
        rounds.push(Round {
            round: index as u32,
            matches: vec![next],
        });
    }

    Ok(finish(entry_count, rounds))
}

fn ensure_enough_entries<E>(entries: &[E]) -> ContestResult<usize> {
    if entries.len() < MIN_CONTEST_ENTRIES {
        return Err(ContestError::NotEnoughEntries {
            needed: MIN_CONTEST_ENTRIES,
            actual: entries.len(),
        });
    }
    Ok(entries.len())
}

fn tiktok<E: AsRef<str>>(entry: &E) -> ContestOption {
    ContestOption::tiktok(entry.as_ref())
}

/// Pair options by position: `2k` and `2k + 1` form match `k`.
fn pair_options(options: Vec<ContestOption>) -> Vec<Match> {
    debug_assert!(options.len() % 2 == 0, "odd field size {}", options.len());

    let mut matches = Vec::with_capacity(options.len() / 2);
    let mut options = options.into_iter();
    while let (Some(first), Some(second)) = (options.next(), options.next()) {
        matches.push(Match::new(first, second));
    }
    matches
}

fn finish(entry_count: usize, rounds: Vec<Round>) -> Bracket {
    let bracket = Bracket {
        count_matches: entry_count - 1,
        rounds,
    };
    debug_assert_eq!(bracket.matches().count(), bracket.count_matches);
    bracket
}
