use crate::prelude::*;

mod unixmoment;
pub use unixmoment::*;

/// One elapsed-time class. `limit` is an exclusive upper bound on the
/// elapsed seconds this bucket covers; `divisor` turns elapsed seconds
/// into the displayed magnitude; `refresh` is how often a label in this
/// bucket needs re-checking.
#[derive(Debug, Clone, Copy)]
pub struct AgeBucket {
    pub class: &'static str,
    pub suffix: &'static str,
    pub divisor: i64,
    pub limit: i64,
    pub refresh: Duration,
}

/// Ordered finest to coarsest. The last two limits are the same value,
/// far enough out to be unreachable for anything under two years old.
pub const AGE_BUCKETS: [AgeBucket; 6] = [
    AgeBucket { class: "age-mins",   suffix: "min.",   divisor: 60,              limit: 7200,            refresh: Duration::from_secs(10) },
    AgeBucket { class: "age-hours",  suffix: "hours",  divisor: 3600,            limit: 24 * 7200,       refresh: Duration::from_secs(5 * 60) },
    AgeBucket { class: "age-days",   suffix: "days",   divisor: 24 * 3600,       limit: 7 * 24 * 7200,   refresh: Duration::from_secs(1800) },
    AgeBucket { class: "age-weeks",  suffix: "weeks",  divisor: 7 * 24 * 3600,   limit: 30 * 24 * 7200,  refresh: Duration::from_secs(24 * 3600) },
    AgeBucket { class: "age-months", suffix: "months", divisor: 30 * 24 * 3600,  limit: 365 * 25 * 7200, refresh: Duration::from_secs(24 * 3600) },
    AgeBucket { class: "age-years",  suffix: "years",  divisor: 365 * 24 * 3600, limit: 365 * 25 * 7200, refresh: Duration::from_secs(24 * 3600) },
];

/// Ceiling on the wait between sweeps.
pub const MAX_REFRESH: Duration = Duration::from_secs(24 * 3600);

/// First bucket whose limit exceeds the elapsed seconds. Anything beyond
/// every limit stays in the last bucket rather than running off the table.
pub fn classify(elapsed_seconds: i64) -> usize {
    AGE_BUCKETS
        .iter()
        .position(|b| elapsed_seconds < b.limit)
        .unwrap_or(AGE_BUCKETS.len() - 1)
}

/// Displayed magnitude, rounded half away from zero.
fn magnitude(elapsed_seconds: i64, divisor: i64) -> i64 {
    (elapsed_seconds as f64 / divisor as f64).round() as i64
}

#[derive(Debug, Clone)]
pub struct AgeEntry {
    pub name: String,
    pub stamp: UnixMoment,
    pub creation_t: UnixMoment,
    pub bucket: usize,
    pub label: String,
}

impl AgeEntry {
    pub fn new(name: impl Into<String>, stamp: UnixMoment) -> Self {
        let creation_t = UnixMoment::now();
        let mut entry = Self {
            name: name.into(),
            stamp,
            creation_t,
            bucket: 0,
            label: String::new(),
        };
        // an entry is never served blank; it carries an age from the start
        entry.render(stamp.seconds_until(creation_t));
        entry
    }
    pub fn class(&self) -> &'static str {
        AGE_BUCKETS[self.bucket].class
    }
    /// Reformats the label for the given elapsed seconds.
    /// Returns true if the label or the bucket tag changed. The two
    /// equality guards are independent: a tag change is never suppressed
    /// by an unchanged label, or the other way around.
    pub fn render(&mut self, elapsed_seconds: i64) -> bool {
        let bucket = classify(elapsed_seconds);
        let b = &AGE_BUCKETS[bucket];
        let label = format!("{} {}", magnitude(elapsed_seconds, b.divisor), b.suffix);
        let mut changed = false;
        if self.label != label {
            self.label = label;
            changed = true;
        }
        if self.bucket != bucket {
            self.bucket = bucket;
            changed = true;
        }
        changed
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SweepOutcome {
    /// smallest refresh interval among populated buckets, else MAX_REFRESH
    pub next_interval: Duration,
    /// entries whose label or tag changed this pass
    pub relabeled: usize,
}

pub struct EntryList(Vec<AgeEntry>);
impl EntryList {
    pub fn new() -> Self {
        Self(Vec::new())
    }
    pub fn add(&mut self, e: AgeEntry) {
        self.0.push(e);
    }
    pub fn remove(&mut self, name: &str) {
        self.0.retain(|e| e.name != name);
    }
    pub fn clear(&mut self) {
        self.0.clear();
    }
    pub fn entries(&self) -> impl Iterator<Item = &AgeEntry> {
        self.0.iter()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// One full formatting pass. Buckets are visited finest first, and
    /// entries are grouped by the tag they carry when their bucket comes
    /// up, not by a fresh classification. Tags therefore lag a sweep
    /// behind: an entry grouped under one bucket may re-tag out of it
    /// during this pass, and an entry re-tagged into a later bucket is
    /// rendered again from its new group (a no-op the second time).
    pub fn sweep(&mut self, now: UnixMoment) -> SweepOutcome {
        let mut next_interval = MAX_REFRESH;
        let mut relabeled = 0;
        for (b, bucket) in AGE_BUCKETS.iter().enumerate() {
            let group: Vec<usize> = self
                .0
                .iter()
                .enumerate()
                .filter(|(_, e)| e.bucket == b)
                .map(|(i, _)| i)
                .collect();
            if !group.is_empty() && bucket.refresh < next_interval {
                next_interval = bucket.refresh;
            }
            for i in group {
                let elapsed = self.0[i].stamp.seconds_until(now);
                if self.0[i].render(elapsed) {
                    relabeled += 1;
                }
            }
        }
        SweepOutcome {
            next_interval,
            relabeled,
        }
    }
}

#[cfg(test)]
mod checks {
    use super::*;

    fn entry_with(elapsed: i64) -> AgeEntry {
        let mut e = AgeEntry::new("x", UnixMoment::new(0));
        e.render(elapsed);
        e
    }

    #[test]
    fn classify_scans_limits_in_order() {
        assert_eq!(0, classify(0));
        assert_eq!(0, classify(7199));
        // limits are exclusive upper bounds
        assert_eq!(1, classify(7200));
        assert_eq!(1, classify(172799));
        assert_eq!(2, classify(172800));
        assert_eq!(3, classify(1209600));
        assert_eq!(4, classify(5184000));
    }

    #[test]
    fn classify_clamps_past_the_last_limit() {
        assert_eq!(5, classify(65700000));
        assert_eq!(5, classify(i64::MAX / 2));
    }

    #[test]
    fn minutes_label() {
        let e = entry_with(125);
        assert_eq!("2 min.", e.label);
        assert_eq!("age-mins", e.class());
    }

    #[test]
    fn halves_round_away_from_zero() {
        // 9000 / 3600 = 2.5
        let e = entry_with(9000);
        assert_eq!("3 hours", e.label);
        assert_eq!(1, e.bucket);
    }

    #[test]
    fn render_is_idempotent() {
        let mut e = entry_with(125);
        assert!(!e.render(125));
        assert_eq!("2 min.", e.label);
    }

    #[test]
    fn unchanged_label_is_not_rewritten() {
        let mut e = entry_with(60);
        assert_eq!("1 min.", e.label);
        // 80 / 60 still rounds to 1
        assert!(!e.render(80));
    }

    #[test]
    fn new_entries_are_rendered_immediately() {
        let now = UnixMoment::now();
        let e = AgeEntry::new("release", now - Duration::from_secs(125));
        assert_eq!("2 min.", e.label);
        assert_eq!("age-mins", e.class());
    }

    #[test]
    fn empty_sweep_waits_the_ceiling() {
        let mut list = EntryList::new();
        let out = list.sweep(UnixMoment::now());
        assert_eq!(MAX_REFRESH, out.next_interval);
        assert_eq!(0, out.relabeled);
    }

    #[test]
    fn sweep_picks_the_smallest_populated_refresh() {
        let now = UnixMoment::now();
        let mut list = EntryList::new();
        list.add(AgeEntry::new("fresh", now - Duration::from_secs(50)));
        list.add(AgeEntry::new("ancient", now - Duration::from_secs(80_000_000)));
        let out = list.sweep(now);
        assert_eq!(Duration::from_secs(10), out.next_interval);
    }

    #[test]
    fn tags_lag_one_sweep_behind() {
        let now = UnixMoment::now();
        let mut list = EntryList::new();
        list.add(AgeEntry::new("x", now - Duration::from_secs(125)));
        // by the next sweep the entry has aged into hours, but it still
        // carries the mins tag, so the 10s refresh drives this interval
        let later = now + Duration::from_secs(9000 - 125);
        let out = list.sweep(later);
        assert_eq!(Duration::from_secs(10), out.next_interval);
        assert_eq!(1, out.relabeled);
        let e = list.entries().next().unwrap();
        assert_eq!(1, e.bucket);
        assert_eq!("3 hours", e.label);
        // the sweep after that sees the hours tag and relaxes
        let out = list.sweep(later);
        assert_eq!(Duration::from_secs(300), out.next_interval);
        assert_eq!(0, out.relabeled);
    }

    #[test]
    fn remove_and_clear() {
        let now = UnixMoment::now();
        let mut list = EntryList::new();
        list.add(AgeEntry::new("a", now));
        list.add(AgeEntry::new("b", now));
        list.add(AgeEntry::new("a", now));
        list.remove("a");
        assert_eq!(1, list.len());
        list.clear();
        assert!(list.is_empty());
    }
}
