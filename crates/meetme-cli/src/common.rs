//! Free time shared by every calendar.

use meetme_engine::Interval;

/// Intersect two sorted, disjoint interval lists.
fn intersect(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let start = a[i].start().max(b[j].start());
        let end = a[i].end().min(b[j].end());
        if start < end {
            out.extend(Interval::new(start, end).ok());
        }
        // Advance whichever interval finishes first.
        if a[i].end() < b[j].end() {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// The slots free in all of `calendars`. No calendars means no common time.
pub fn common_free(calendars: &[Vec<Interval>]) -> Vec<Interval> {
    match calendars.split_first() {
        Some((first, rest)) => rest
            .iter()
            .fold(first.clone(), |acc, slots| intersect(&acc, slots)),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Tz;

    fn slot(sh: u32, eh: u32) -> Interval {
        Interval::new(
            Tz::UTC.with_ymd_and_hms(2026, 3, 2, sh, 0, 0).unwrap(),
            Tz::UTC.with_ymd_and_hms(2026, 3, 2, eh, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn overlapping_slots_intersect() {
        let alice = vec![slot(9, 12), slot(14, 17)];
        let bob = vec![slot(10, 15)];
        assert_eq!(
            common_free(&[alice, bob]),
            vec![slot(10, 12), slot(14, 15)]
        );
    }

    #[test]
    fn touching_slots_share_nothing() {
        assert!(common_free(&[vec![slot(9, 10)], vec![slot(10, 11)]]).is_empty());
    }

    #[test]
    fn single_calendar_is_its_own_common_time() {
        let alice = vec![slot(9, 12)];
        assert_eq!(common_free(std::slice::from_ref(&alice)), alice);
    }

    #[test]
    fn no_calendars_no_common_time() {
        assert!(common_free(&[]).is_empty());
    }
}
