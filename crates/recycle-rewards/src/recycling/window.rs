use chrono::{DateTime, Duration, LocalResult, NaiveDate, TimeZone, Utc};
use serde::Serialize;

/// Half-open `[start, end)` span covering one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyWindow {
    pub day: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DailyWindow {
    /// Window of the local day that `instant` falls on, in the instant's own zone.
    pub fn containing<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let zone = instant.timezone();
        let day = instant.date_naive();
        let next = day.succ_opt().unwrap_or(day);

        Self {
            day,
            start: local_midnight(&zone, day),
            end: local_midnight(&zone, next),
        }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

fn local_midnight<Tz: TimeZone>(zone: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    match zone.from_local_datetime(&midnight) {
        LocalResult::Single(at) => at.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // Midnight skipped by a DST jump: the day starts at the first instant after the gap.
        LocalResult::None => {
            let mut candidate = midnight;
            for _ in 0..24 * 4 {
                candidate += Duration::minutes(15);
                if let Some(at) = zone.from_local_datetime(&candidate).earliest() {
                    return at.with_timezone(&Utc);
                }
            }
            zone.from_utc_datetime(&midnight).with_timezone(&Utc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDateTime, NaiveTime, Offset};

    fn brasilia() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).expect("valid offset")
    }

    #[test]
    fn window_spans_local_midnight_to_midnight() {
        let now = brasilia()
            .with_ymd_and_hms(2025, 3, 14, 15, 30, 0)
            .single()
            .expect("valid instant");
        let window = DailyWindow::containing(&now);

        assert_eq!(window.day, NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid"));
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2025, 3, 14, 3, 0, 0).single().expect("valid")
        );
        assert_eq!(window.end - window.start, Duration::hours(24));
    }

    #[test]
    fn last_second_and_first_second_land_in_different_windows() {
        let zone = brasilia();
        let late = zone
            .with_ymd_and_hms(2025, 3, 14, 23, 59, 59)
            .single()
            .expect("valid");
        let early = zone
            .with_ymd_and_hms(2025, 3, 15, 0, 0, 1)
            .single()
            .expect("valid");

        let window = DailyWindow::containing(&early);

        assert!(window.contains(&early.with_timezone(&Utc)));
        assert!(!window.contains(&late.with_timezone(&Utc)));
        assert_ne!(window, DailyWindow::containing(&late));
    }

    /// Zone that switches from one fixed offset to another at `switch_at` (UTC).
    #[derive(Debug, Clone, Copy)]
    struct TransitionZone {
        switch_at: NaiveDateTime,
        before: FixedOffset,
        after: FixedOffset,
    }

    #[derive(Debug, Clone, Copy)]
    struct TransitionOffset {
        zone: TransitionZone,
        fixed: FixedOffset,
    }

    impl Offset for TransitionOffset {
        fn fix(&self) -> FixedOffset {
            self.fixed
        }
    }

    impl TransitionZone {
        fn offset(&self, fixed: FixedOffset) -> TransitionOffset {
            TransitionOffset { zone: *self, fixed }
        }
    }

    impl TimeZone for TransitionZone {
        type Offset = TransitionOffset;

        fn from_offset(offset: &TransitionOffset) -> Self {
            offset.zone
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<TransitionOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(
            &self,
            local: &NaiveDateTime,
        ) -> LocalResult<TransitionOffset> {
            let as_before = *local - Duration::seconds(i64::from(self.before.local_minus_utc()));
            let as_after = *local - Duration::seconds(i64::from(self.after.local_minus_utc()));
            let before_valid = as_before < self.switch_at;
            let after_valid = as_after >= self.switch_at;

            match (before_valid, after_valid) {
                (true, true) if as_before <= as_after => {
                    LocalResult::Ambiguous(self.offset(self.before), self.offset(self.after))
                }
                (true, true) => {
                    LocalResult::Ambiguous(self.offset(self.after), self.offset(self.before))
                }
                (true, false) => LocalResult::Single(self.offset(self.before)),
                (false, true) => LocalResult::Single(self.offset(self.after)),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> TransitionOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> TransitionOffset {
            if *utc < self.switch_at {
                self.offset(self.before)
            } else {
                self.offset(self.after)
            }
        }
    }

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn offset_hours(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).expect("valid offset")
    }

    #[test]
    fn day_starting_in_a_dst_gap_begins_after_the_gap() {
        // Clocks jump from 00:00 at UTC-3 straight to 01:00 at UTC-2.
        let zone = TransitionZone {
            switch_at: utc(2018, 11, 4, 3).naive_utc(),
            before: offset_hours(-3),
            after: offset_hours(-2),
        };
        let afternoon = zone.from_utc_datetime(&utc(2018, 11, 4, 17).naive_utc());

        let window = DailyWindow::containing(&afternoon);

        assert_eq!(window.day, NaiveDate::from_ymd_opt(2018, 11, 4).expect("valid"));
        assert_eq!(window.start, utc(2018, 11, 4, 3));
        assert_eq!(window.end, utc(2018, 11, 5, 2));
        assert_eq!(window.end - window.start, Duration::hours(23));
        assert!(!window.contains(&(window.start - Duration::seconds(1))));
    }

    #[test]
    fn day_with_a_repeated_midnight_starts_at_the_earliest_midnight() {
        // Clocks fall back from 01:00 at UTC-2 to 00:00 at UTC-3.
        let zone = TransitionZone {
            switch_at: utc(2019, 2, 17, 3).naive_utc(),
            before: offset_hours(-2),
            after: offset_hours(-3),
        };
        let afternoon = zone.from_utc_datetime(&utc(2019, 2, 17, 18).naive_utc());

        let window = DailyWindow::containing(&afternoon);

        assert_eq!(window.day, NaiveDate::from_ymd_opt(2019, 2, 17).expect("valid"));
        assert_eq!(window.start, utc(2019, 2, 17, 2));
        assert_eq!(window.end, utc(2019, 2, 18, 3));
        assert_eq!(window.end - window.start, Duration::hours(25));
    }

    #[test]
    fn start_is_inclusive_and_end_is_exclusive() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid");
        let window = DailyWindow::containing(&now);

        assert!(window.contains(&window.start));
        assert!(!window.contains(&window.end));
    }
}
