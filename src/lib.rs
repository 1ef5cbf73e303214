#![allow(unused)]
mod prelude;
use prelude::*;
use serde::{Serialize, Deserialize};
mod age;
pub use age::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppCommand {
    Add(EntrySpec),
    Remove(String),
    Clear,
}

/// Struct used by external processes to pass a new entry to the daemon
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EntrySpec {
    name: String,
    stamp: UnixMoment,
}

impl EntrySpec {
    pub fn new(name: String, stamp: UnixMoment) -> Self {
        Self { name, stamp }
    }
}

impl TryFrom<EntrySpec> for AgeEntry {
    type Error = EntrySpecError;

    fn try_from(value: EntrySpec) -> Result<Self, Self::Error> {
        if value.name.is_empty() {
            return Err(EntrySpecError::NameEmpty);
        }
        Ok(AgeEntry::new(value.name, value.stamp))
    }
}

#[derive(Debug)]
pub enum EntrySpecError {
    NameEmpty,
}
impl std::error::Error for EntrySpecError {}
impl std::fmt::Display for EntrySpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    LabelsChanged,
    EntryListUpdate,
}

#[cfg(test)]
mod checks {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        let spec = EntrySpec::new(String::new(), UnixMoment::now());
        assert!(matches!(
            AgeEntry::try_from(spec),
            Err(EntrySpecError::NameEmpty)
        ));
    }

    #[test]
    fn conversion_renders_the_initial_label() {
        let stamp = UnixMoment::now() - Duration::from_secs(125);
        let spec = EntrySpec::new(String::from("release"), stamp);
        let e = AgeEntry::try_from(spec).unwrap();
        assert_eq!("release", e.name);
        assert_eq!("2 min.", e.label);
        assert_eq!("age-mins", e.class());
    }
}
