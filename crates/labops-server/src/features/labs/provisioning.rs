//! Seat provisioning for laboratories
//!
//! Pure functions that turn a laboratory's name and a target machine count
//! into the computer rows to insert. Nothing here touches the database; the
//! commands in this feature call these functions inside their own
//! transaction and persist the results.
//!
//! Computer names are derived from the lab name *at the time the machine is
//! created*: renaming a lab never renames its existing computers, only
//! machines added afterwards pick up the new name.

use thiserror::Error;

use crate::models::ComputerStatus;

/// Hard upper bound on machines per laboratory, on create and update alike.
pub const MAX_COMPUTERS_PER_LAB: i64 = 200;

/// Warning type surfaced to clients when a capacity change shrinks a lab.
pub const COMPUTER_COUNT_REDUCTION: &str = "COMPUTER_COUNT_REDUCTION";

/// Errors from the provisioning functions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    /// Laboratory name was empty or whitespace-only
    #[error("Laboratory name must contain at least one word")]
    InvalidInput,

    /// Requested machine count was outside 1..=MAX_COMPUTERS_PER_LAB
    #[error("Computer count must be between 1 and {MAX_COMPUTERS_PER_LAB}, got {requested}")]
    InvalidCapacity { requested: i64 },
}

/// A computer row waiting to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerDraft {
    pub name: String,
    pub seat_number: i32,
    pub status: ComputerStatus,
    pub is_locked: bool,
}

/// Decision for a requested capacity change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Requested count equals the current count; nothing to do
    NoChange,

    /// Requested count is larger; insert these drafts, seats continue
    /// where the existing machines stop
    Grow { drafts: Vec<ComputerDraft> },

    /// Requested count is smaller; no rows are generated and none may be
    /// deleted — the caller must surface this warning and a human removes
    /// the excess machines through the explicit computer-delete path
    ShrinkWarning {
        current_count: i64,
        new_count: i64,
        message: String,
    },
}

/// Derive a lab's short prefix: the uppercased first character of each
/// whitespace-separated word.
///
/// "Computer Lab A" -> "CLA", "EdTech Laboratory" -> "EL", "Sandbox" -> "S".
pub fn derive_prefix(lab_name: &str) -> Result<String, ProvisionError> {
    let prefix: String = lab_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect();

    if prefix.is_empty() {
        return Err(ProvisionError::InvalidInput);
    }

    Ok(prefix)
}

/// Build a computer name from a lab prefix and seat number.
///
/// Seat numbers are zero-padded to a minimum width of 2 and never
/// truncated: seat 1 -> "EL-PC01", seat 123 -> "EL-PC123".
pub fn computer_name(prefix: &str, seat_number: i32) -> String {
    format!("{}-PC{:02}", prefix, seat_number)
}

/// Validate a requested machine count against the per-lab bounds.
pub fn validate_computer_count(requested: i64) -> Result<(), ProvisionError> {
    if requested < 1 || requested > MAX_COMPUTERS_PER_LAB {
        return Err(ProvisionError::InvalidCapacity { requested });
    }
    Ok(())
}

/// Generate `count` drafts for seats `start_seat..start_seat + count`,
/// in ascending seat order, named from the lab's current name.
///
/// New machines start OFFLINE and unlocked, with no network identifiers;
/// those are filled in later when an agent first reports.
pub fn generate_computers(
    lab_name: &str,
    start_seat: i32,
    count: i64,
) -> Result<Vec<ComputerDraft>, ProvisionError> {
    if start_seat < 1 {
        return Err(ProvisionError::InvalidInput);
    }
    validate_computer_count(count)?;

    let prefix = derive_prefix(lab_name)?;

    let drafts = (0..count as i32)
        .map(|offset| {
            let seat_number = start_seat + offset;
            ComputerDraft {
                name: computer_name(&prefix, seat_number),
                seat_number,
                status: ComputerStatus::Offline,
                is_locked: false,
            }
        })
        .collect();

    Ok(drafts)
}

/// Compare the requested machine count against the current one and decide
/// what to do about it.
///
/// Deterministic over its inputs. Rejects out-of-range counts before the
/// caller mutates anything. Growth appends seats after `current_count`;
/// shrinking never deletes, existing seats and names stay untouched.
pub fn reconcile(
    current_count: i64,
    requested_count: i64,
    lab_name: &str,
) -> Result<ReconcileOutcome, ProvisionError> {
    validate_computer_count(requested_count)?;

    if requested_count == current_count {
        return Ok(ReconcileOutcome::NoChange);
    }

    if requested_count > current_count {
        let drafts = generate_computers(
            lab_name,
            current_count as i32 + 1,
            requested_count - current_count,
        )?;
        return Ok(ReconcileOutcome::Grow { drafts });
    }

    Ok(ReconcileOutcome::ShrinkWarning {
        current_count,
        new_count: requested_count,
        message: format!(
            "Computer count reduced from {} to {}. No computers were deleted; \
             remove the extra machines individually from the computers page.",
            current_count, requested_count
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_takes_word_initials() {
        assert_eq!(derive_prefix("Computer Lab A").unwrap(), "CLA");
        assert_eq!(derive_prefix("EdTech Laboratory").unwrap(), "EL");
        assert_eq!(derive_prefix("Sandbox").unwrap(), "S");
    }

    #[test]
    fn test_prefix_uppercases_and_keeps_digits() {
        assert_eq!(derive_prefix("physics lab 2").unwrap(), "PL2");
        assert_eq!(derive_prefix("room 101 annex").unwrap(), "R1A");
    }

    #[test]
    fn test_prefix_ignores_extra_whitespace() {
        assert_eq!(derive_prefix("  Computer   Lab\tA  ").unwrap(), "CLA");
    }

    #[test]
    fn test_prefix_length_matches_word_count() {
        for name in ["One", "One Two", "One Two Three", "a b c d e"] {
            let words = name.split_whitespace().count();
            assert_eq!(derive_prefix(name).unwrap().chars().count(), words);
        }
    }

    #[test]
    fn test_prefix_rejects_blank_names() {
        assert_eq!(derive_prefix(""), Err(ProvisionError::InvalidInput));
        assert_eq!(derive_prefix("   "), Err(ProvisionError::InvalidInput));
        assert_eq!(derive_prefix("\t\n"), Err(ProvisionError::InvalidInput));
    }

    #[test]
    fn test_computer_name_zero_pads_to_two_digits() {
        assert_eq!(computer_name("EL", 1), "EL-PC01");
        assert_eq!(computer_name("EL", 9), "EL-PC09");
        assert_eq!(computer_name("EL", 10), "EL-PC10");
        assert_eq!(computer_name("EL", 99), "EL-PC99");
    }

    #[test]
    fn test_computer_name_never_truncates() {
        assert_eq!(computer_name("EL", 100), "EL-PC100");
        assert_eq!(computer_name("EL", 123), "EL-PC123");
    }

    #[test]
    fn test_two_digit_seats_have_two_digit_suffix() {
        for seat in 1..=99 {
            let name = computer_name("CLA", seat);
            let suffix = name.rsplit("PC").next().unwrap();
            assert_eq!(suffix.len(), 2, "seat {} produced {}", seat, name);
        }
    }

    #[test]
    fn test_generate_produces_exact_count_in_seat_order() {
        let drafts = generate_computers("EdTech Laboratory", 1, 5).unwrap();
        assert_eq!(drafts.len(), 5);
        let seats: Vec<i32> = drafts.iter().map(|d| d.seat_number).collect();
        assert_eq!(seats, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_generate_names_are_reproducible() {
        let drafts = generate_computers("Computer Lab A", 3, 4).unwrap();
        let prefix = derive_prefix("Computer Lab A").unwrap();
        for draft in &drafts {
            assert_eq!(draft.name, computer_name(&prefix, draft.seat_number));
        }
    }

    #[test]
    fn test_generate_defaults() {
        let drafts = generate_computers("Sandbox", 1, 2).unwrap();
        for draft in &drafts {
            assert_eq!(draft.status, ComputerStatus::Offline);
            assert!(!draft.is_locked);
        }
    }

    #[test]
    fn test_generate_continues_from_start_seat() {
        let drafts = generate_computers("EdTech Laboratory", 6, 3).unwrap();
        let names: Vec<&str> = drafts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["EL-PC06", "EL-PC07", "EL-PC08"]);
    }

    #[test]
    fn test_generate_rejects_bad_inputs() {
        assert!(matches!(
            generate_computers("Lab", 0, 5),
            Err(ProvisionError::InvalidInput)
        ));
        assert!(matches!(
            generate_computers("Lab", 1, 0),
            Err(ProvisionError::InvalidCapacity { .. })
        ));
        assert!(matches!(
            generate_computers("", 1, 5),
            Err(ProvisionError::InvalidInput)
        ));
    }

    #[test]
    fn test_reconcile_equal_is_no_change() {
        for count in [1, 2, 50, 199, 200] {
            assert_eq!(
                reconcile(count, count, "Lab").unwrap(),
                ReconcileOutcome::NoChange
            );
        }
    }

    #[test]
    fn test_reconcile_growth_appends_delta() {
        let outcome = reconcile(5, 8, "EdTech Laboratory").unwrap();
        match outcome {
            ReconcileOutcome::Grow { drafts } => {
                assert_eq!(drafts.len(), 3);
                let seats: Vec<i32> = drafts.iter().map(|d| d.seat_number).collect();
                assert_eq!(seats, vec![6, 7, 8]);
                assert_eq!(drafts[0].name, "EL-PC06");
                assert_eq!(drafts[2].name, "EL-PC08");
            },
            other => panic!("expected Grow, got {:?}", other),
        }
    }

    #[test]
    fn test_reconcile_growth_from_empty_lab() {
        let outcome = reconcile(0, 3, "Sandbox").unwrap();
        match outcome {
            ReconcileOutcome::Grow { drafts } => {
                let seats: Vec<i32> = drafts.iter().map(|d| d.seat_number).collect();
                assert_eq!(seats, vec![1, 2, 3]);
            },
            other => panic!("expected Grow, got {:?}", other),
        }
    }

    #[test]
    fn test_reconcile_shrink_generates_nothing_and_warns() {
        let outcome = reconcile(8, 3, "EdTech Laboratory").unwrap();
        match outcome {
            ReconcileOutcome::ShrinkWarning {
                current_count,
                new_count,
                message,
            } => {
                assert_eq!(current_count, 8);
                assert_eq!(new_count, 3);
                assert!(message.contains("8"));
                assert!(message.contains("3"));
            },
            other => panic!("expected ShrinkWarning, got {:?}", other),
        }
    }

    #[test]
    fn test_reconcile_rejects_out_of_range_counts() {
        for requested in [0, -1, 201, 500] {
            assert_eq!(
                reconcile(5, requested, "Lab"),
                Err(ProvisionError::InvalidCapacity { requested })
            );
        }
    }

    #[test]
    fn test_reconcile_is_deterministic() {
        let a = reconcile(5, 8, "Computer Lab A").unwrap();
        let b = reconcile(5, 8, "Computer Lab A").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reconcile_at_the_upper_bound() {
        let outcome = reconcile(199, 200, "Lab").unwrap();
        assert!(matches!(outcome, ReconcileOutcome::Grow { ref drafts } if drafts.len() == 1));
    }
}
