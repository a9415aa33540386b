use crate::{Bell, InvalidRowError, Stage};

/// Given some [`Bell`]s and a [`Stage`], simultaneously check for duplicate [`Bell`]s and any
/// [`Bell`]s which are too big for the given [`Stage`].
pub(crate) fn check_duplicate_or_out_of_stage(
    bells: impl IntoIterator<Item = Bell>,
    stage: Stage,
) -> Result<(), InvalidRowError> {
    // We check validity by keeping a checklist of which `Bell`s we've seen, and checking off
    // each bell as we go.  We do not need to check for empty spaces in the checklist once we've
    // done because (by the Pigeon Hole Principle), fitting `n` bells into `n` slots with some gaps
    // will always require that a bell is either out of range or two bells share a slot.
    let mut checklist = vec![false; stage.num_bells()];
    for b in bells {
        match checklist.get_mut(b.index()) {
            None => return Err(InvalidRowError::BellOutOfStage(b, stage)),
            Some(&mut true) => return Err(InvalidRowError::DuplicateBell(b)),
            Some(x) => *x = true,
        }
    }
    Ok(())
}

/// Removes every whitespace [`char`] from a string.  Place notation, touches and method
/// definitions are all whitespace-insensitive.
pub(crate) fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip() {
        assert_eq!(strip_whitespace(" &x1 4.x\t12\n"), "&x14.x12");
        assert_eq!(strip_whitespace(""), "");
    }

    #[test]
    fn checklist() {
        let bells = |s: &str| s.chars().filter_map(Bell::from_name).collect::<Vec<_>>();
        assert!(check_duplicate_or_out_of_stage(bells("13254"), Stage::DOUBLES).is_ok());
        assert_eq!(
            check_duplicate_or_out_of_stage(bells("13354"), Stage::DOUBLES),
            Err(InvalidRowError::DuplicateBell(Bell::from_number(3).unwrap()))
        );
        assert_eq!(
            check_duplicate_or_out_of_stage(bells("13264"), Stage::DOUBLES),
            Err(InvalidRowError::BellOutOfStage(
                Bell::from_number(6).unwrap(),
                Stage::DOUBLES
            ))
        );
    }
}
