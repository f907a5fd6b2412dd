use std::collections::BTreeSet;

use crate::date::{days_in_month, Date};
use crate::error::RecurrenceError;
use crate::rule::{MonthDay, RecurrenceRule, MAX_DAILY_INTERVAL};

/// How many calendar months a monthly rule searches before giving up.
pub const MONTHLY_SEARCH_MONTHS: u32 = 24;

/// Computes the next occurrence of `rule` strictly after `now`, starting from `anchor`.
///
/// # Behavior
/// - Daily and yearly rules step from the anchor by their period, always at
///   least once, until the date is after `now`.
/// - Weekly and monthly rules first find the floor (the first day after both
///   the anchor and `now`), then search forward from it. Weekly rules accept
///   the floor itself; monthly rules require a day strictly after the floor.
pub fn next_occurrence(
    anchor: Date,
    now: Date,
    rule: &RecurrenceRule,
) -> Result<Date, RecurrenceError> {
    match rule {
        RecurrenceRule::Daily(interval) => next_daily(anchor, now, *interval),
        RecurrenceRule::Yearly => next_yearly(anchor, now),
        RecurrenceRule::Weekly(days) => next_weekly(anchor, now, days),
        RecurrenceRule::Monthly { days, months } => next_monthly(anchor, now, days, months),
    }
}

impl RecurrenceRule {
    /// See [`next_occurrence`].
    pub fn next_occurrence(&self, anchor: Date, now: Date) -> Result<Date, RecurrenceError> {
        next_occurrence(anchor, now, self)
    }
}

/// First date reached by stepping one day at a time from `anchor` (at least
/// one step) that is strictly after `now`.
pub fn floor_after(anchor: Date, now: Date) -> Result<Date, RecurrenceError> {
    let next = anchor.add_days(1)?;
    if next.is_strictly_after(now) {
        Ok(next)
    } else {
        now.add_days(1)
    }
}

fn next_daily(anchor: Date, now: Date, interval: u32) -> Result<Date, RecurrenceError> {
    if interval == 0 || interval > MAX_DAILY_INTERVAL {
        return Err(RecurrenceError::InvalidInterval(interval.to_string()));
    }
    let interval = u64::from(interval);
    // Smallest k >= 1 with anchor + k * interval > now.
    let elapsed = now.days_since(anchor);
    let steps = if elapsed < 0 {
        1
    } else {
        elapsed as u64 / interval + 1
    };
    anchor.add_days(steps * interval)
}

fn next_yearly(anchor: Date, now: Date) -> Result<Date, RecurrenceError> {
    let mut date = anchor.add_one_year()?;
    while !date.is_strictly_after(now) {
        date = date.add_one_year()?;
    }
    Ok(date)
}

fn next_weekly(anchor: Date, now: Date, days: &BTreeSet<u32>) -> Result<Date, RecurrenceError> {
    if days.is_empty() {
        return Err(RecurrenceError::NoMatchingWeekday);
    }
    let floor = floor_after(anchor, now)?;
    for offset in 0..7 {
        let candidate = floor.add_days(offset)?;
        let weekday = candidate.weekday_from_sunday();
        if days.iter().any(|day| day % 7 == weekday) {
            return Ok(candidate);
        }
    }
    Err(RecurrenceError::NoMatchingWeekday)
}

fn next_monthly(
    anchor: Date,
    now: Date,
    days: &[MonthDay],
    months: &BTreeSet<u32>,
) -> Result<Date, RecurrenceError> {
    let floor = floor_after(anchor, now)?;
    let (mut year, mut month) = (floor.year(), floor.month());

    for _ in 0..MONTHLY_SEARCH_MONTHS {
        if months.is_empty() || months.contains(&month) {
            let last_day = days_in_month(year, month);
            let mut candidates: Vec<u32> = days.iter().filter_map(|d| d.resolve(last_day)).collect();
            candidates.sort_unstable();

            for day in candidates {
                let date = Date::from_ymd(year, month, day)
                    .ok_or_else(|| RecurrenceError::DateOutOfRange(floor.to_string()))?;
                if date.is_strictly_after(floor) {
                    return Ok(date);
                }
            }
        }

        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    Err(RecurrenceError::NoSuitableDate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::parse;
    use proptest::prelude::*;
    use rstest::rstest;

    fn d(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn next(anchor: &str, now: &str, rule: &str) -> Result<String, RecurrenceError> {
        next_occurrence(d(anchor), d(now), &parse(rule).unwrap()).map(|date| date.to_string())
    }

    mod scenarios {
        use super::*;

        #[rstest]
        #[case("20240113", "20240126", "d 7", "20240127")]
        #[case("20240129", "20240131", "y", "20250129")]
        #[case("20240126", "20240126", "w 5", "20240202")]
        #[case("20240131", "20240201", "m -1", "20240229")]
        fn test_reference_scenarios(
            #[case] anchor: &str,
            #[case] now: &str,
            #[case] rule: &str,
            #[case] expected: &str,
        ) {
            assert_eq!(next(anchor, now, rule), Ok(expected.to_string()));
        }

        #[rstest]
        #[case("20240126", "20240126", "d 1", "20240127")]
        #[case("20240126", "20240101", "d 1", "20240127")]
        #[case("20240126", "20240126", "d 20", "20240215")]
        #[case("20231231", "20240101", "d 1", "20240102")]
        #[case("20240301", "20240101", "d 5", "20240306")]
        #[case("20230101", "20240126", "d 399", "20240204")]
        fn test_daily(
            #[case] anchor: &str,
            #[case] now: &str,
            #[case] rule: &str,
            #[case] expected: &str,
        ) {
            assert_eq!(next(anchor, now, rule), Ok(expected.to_string()));
        }

        #[rstest]
        #[case("20240229", "20240301", "y", "20250301")]
        #[case("20240229", "20260101", "y", "20260301")]
        #[case("20200229", "20200101", "y", "20210301")]
        #[case("20250701", "20240101", "y", "20260701")]
        #[case("19990101", "20240126", "y", "20250101")]
        fn test_yearly(
            #[case] anchor: &str,
            #[case] now: &str,
            #[case] rule: &str,
            #[case] expected: &str,
        ) {
            assert_eq!(next(anchor, now, rule), Ok(expected.to_string()));
        }

        #[rstest]
        // 2024-01-27 is a Saturday.
        #[case("20240126", "20240126", "w 6", "20240127")]
        #[case("20240126", "20240126", "w 7", "20240128")]
        #[case("20240126", "20240126", "w 1,4,5", "20240129")]
        #[case("20240101", "20240126", "w 3", "20240131")]
        #[case("20240301", "20240126", "w 5", "20240308")]
        fn test_weekly(
            #[case] anchor: &str,
            #[case] now: &str,
            #[case] rule: &str,
            #[case] expected: &str,
        ) {
            assert_eq!(next(anchor, now, rule), Ok(expected.to_string()));
        }

        #[rstest]
        #[case("20240126", "20240126", "m 1", "20240201")]
        #[case("20240126", "20240126", "m 27", "20240227")]
        #[case("20240126", "20240126", "m 28", "20240128")]
        #[case("20240126", "20240126", "m -1,1 2,8", "20240201")]
        #[case("20240202", "20240126", "m 1,-1 2,8", "20240229")]
        #[case("20230126", "20230126", "m -2 2", "20230227")]
        #[case("20240215", "20240215", "m 31 1,4", "20250131")]
        #[case("20240126", "20240126", "m 31 2,3", "20240331")]
        #[case("20241215", "20241220", "m 5", "20250105")]
        #[case("20240101", "20240101", "m 25,3,10", "20240103")]
        fn test_monthly(
            #[case] anchor: &str,
            #[case] now: &str,
            #[case] rule: &str,
            #[case] expected: &str,
        ) {
            assert_eq!(next(anchor, now, rule), Ok(expected.to_string()));
        }

        #[test]
        fn test_monthly_skips_the_floor_itself() {
            // The floor is 2024-01-27; a rule for the 27th must wait a month.
            assert_eq!(next("20240126", "20240126", "m 27"), Ok("20240227".to_string()));
        }

        #[test]
        fn test_monthly_without_suitable_date() {
            assert_eq!(
                next("20240126", "20240126", "m 31 2"),
                Err(RecurrenceError::NoSuitableDate)
            );
            assert_eq!(
                next("20240126", "20240126", "m 30,31 2,4,6,9,11"),
                Ok("20240430".to_string())
            );
        }

        #[rstest]
        #[case("99991231", "99991231", "d 1")]
        #[case("99991231", "99991231", "y")]
        #[case("99991231", "99991231", "m -1")]
        #[case("99991231", "99991231", "w 5")]
        #[case("99991215", "99991215", "m 1")]
        #[case("99990101", "99991231", "d 7")]
        fn test_results_past_year_9999_are_out_of_range(
            #[case] anchor: &str,
            #[case] now: &str,
            #[case] rule: &str,
        ) {
            assert!(matches!(
                next(anchor, now, rule),
                Err(RecurrenceError::DateOutOfRange(_))
            ));
        }

        #[test]
        fn test_last_representable_day_is_reachable() {
            assert_eq!(next("99991130", "99991130", "m -1"), Ok("99991231".to_string()));
            assert_eq!(next("99991201", "99991230", "d 1"), Ok("99991231".to_string()));
        }

        #[test]
        fn test_weekly_with_empty_days() {
            let rule = RecurrenceRule::Weekly(BTreeSet::new());
            assert_eq!(
                next_occurrence(d("20240126"), d("20240126"), &rule),
                Err(RecurrenceError::NoMatchingWeekday)
            );
        }

        #[test]
        fn test_daily_rejects_hand_built_interval() {
            assert_eq!(
                next_occurrence(d("20240126"), d("20240126"), &RecurrenceRule::Daily(0)),
                Err(RecurrenceError::InvalidInterval("0".to_string()))
            );
        }

        #[test]
        fn test_floor_after() {
            assert_eq!(floor_after(d("20240126"), d("20240126")).unwrap(), d("20240127"));
            assert_eq!(floor_after(d("20240101"), d("20240126")).unwrap(), d("20240127"));
            assert_eq!(floor_after(d("20240301"), d("20240126")).unwrap(), d("20240302"));
            assert_eq!(floor_after(d("20241231"), d("20241230")).unwrap(), d("20250101"));
        }
    }

    mod properties {
        use super::*;

        const SPAN_DAYS: u64 = 3_000;

        fn base() -> Date {
            d("20200101")
        }

        fn date_strategy() -> impl Strategy<Value = Date> {
            (0..SPAN_DAYS).prop_map(|offset| base().add_days(offset).unwrap())
        }

        fn month_day_strategy() -> impl Strategy<Value = MonthDay> {
            prop_oneof![
                (1u32..=31).prop_map(MonthDay::Day),
                Just(MonthDay::Last),
                Just(MonthDay::SecondToLast),
            ]
        }

        /// Steps one day at a time, the literal reading of the floor rule.
        fn walk_floor(anchor: Date, now: Date) -> Date {
            let mut date = anchor.add_days(1).unwrap();
            while !date.is_strictly_after(now) {
                date = date.add_days(1).unwrap();
            }
            date
        }

        fn months_between(from: Date, to: Date) -> i32 {
            (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32
        }

        proptest! {
            #[test]
            fn prop_daily_is_smallest_step_after_now(
                anchor in date_strategy(),
                now in date_strategy(),
                interval in 1u32..=MAX_DAILY_INTERVAL,
            ) {
                let result = next_occurrence(anchor, now, &RecurrenceRule::Daily(interval)).unwrap();
                prop_assert!(result.is_strictly_after(now));
                let distance = result.days_since(anchor);
                prop_assert!(distance > 0);
                prop_assert_eq!(distance % interval as i64, 0);
                let k = distance / interval as i64;
                if k > 1 {
                    let previous = anchor.add_days(((k - 1) * interval as i64) as u64).unwrap();
                    prop_assert!(!previous.is_strictly_after(now));
                }
            }

            #[test]
            fn prop_floor_matches_day_by_day_walk(anchor in date_strategy(), now in date_strategy()) {
                prop_assert_eq!(floor_after(anchor, now).unwrap(), walk_floor(anchor, now));
            }

            #[test]
            fn prop_weekly_is_earliest_matching_day_from_floor(
                anchor in date_strategy(),
                now in date_strategy(),
                days in prop::collection::btree_set(1u32..=7, 1..=7),
            ) {
                let result = next_occurrence(anchor, now, &RecurrenceRule::Weekly(days.clone())).unwrap();
                let floor = walk_floor(anchor, now);
                let matches = |date: Date| days.iter().any(|day| day % 7 == date.weekday_from_sunday());

                prop_assert!(matches(result));
                prop_assert!(!floor.is_strictly_after(result));
                let mut date = floor;
                while result.is_strictly_after(date) {
                    prop_assert!(!matches(date));
                    date = date.add_days(1).unwrap();
                }
            }

            #[test]
            fn prop_monthly_matches_brute_force_search(
                anchor in date_strategy(),
                now in date_strategy(),
                days in prop::collection::vec(month_day_strategy(), 1..4),
                months in prop::collection::btree_set(1u32..=12, 0..4),
            ) {
                let rule = RecurrenceRule::Monthly { days: days.clone(), months: months.clone() };
                let floor = walk_floor(anchor, now);

                let qualifies = |date: Date| {
                    let last_day = days_in_month(date.year(), date.month());
                    (months.is_empty() || months.contains(&date.month()))
                        && days.iter().any(|sel| sel.resolve(last_day) == Some(date.day()))
                };
                let mut expected = None;
                let mut date = floor.add_days(1).unwrap();
                while months_between(floor, date) < MONTHLY_SEARCH_MONTHS as i32 {
                    if qualifies(date) {
                        expected = Some(date);
                        break;
                    }
                    date = date.add_days(1).unwrap();
                }

                match (next_occurrence(anchor, now, &rule), expected) {
                    (Ok(result), Some(expected)) => {
                        prop_assert_eq!(result, expected);
                        prop_assert!(result.is_strictly_after(floor));
                    }
                    (Err(err), None) => prop_assert_eq!(err, RecurrenceError::NoSuitableDate),
                    (got, want) => prop_assert!(false, "got {:?}, expected {:?}", got, want),
                }
            }

            #[test]
            fn prop_yearly_is_after_now_and_keeps_month(anchor in date_strategy(), now in date_strategy()) {
                let result = next_occurrence(anchor, now, &RecurrenceRule::Yearly).unwrap();
                prop_assert!(result.is_strictly_after(now));
                prop_assert!(result.year() > anchor.year());
                if !(anchor.month() == 2 && anchor.day() == 29) {
                    prop_assert_eq!((result.month(), result.day()), (anchor.month(), anchor.day()));
                }
            }
        }
    }
}
