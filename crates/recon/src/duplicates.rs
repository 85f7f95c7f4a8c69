use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    New,
    Old,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::New => "new",
            Side::Old => "old",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    Identity,
    Common,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Identity => "identity",
            KeyKind::Common => "common",
        }
    }
}

/// A key that occurs more than once within one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    pub side: Side,
    pub kind: KeyKind,
    /// `Debug` rendering of the key.
    pub key: String,
    pub count: usize,
}

/// Identities present more than once on either side. Records without an
/// identity are ignored.
pub fn identity_duplicates<T, I, G>(new: &[T], old: &[T], get_id: G) -> Vec<DuplicateKey>
where
    I: Ord + Debug,
    G: Fn(&T) -> Option<I>,
{
    let mut out = Vec::new();
    check_duplicates(new.iter().filter_map(&get_id), Side::New, KeyKind::Identity, &mut out);
    check_duplicates(old.iter().filter_map(&get_id), Side::Old, KeyKind::Identity, &mut out);
    out
}

/// Secondary keys present more than once among the records that get keyed by
/// them: id-less new records, and old records whose identity no new record
/// claims.
pub fn common_key_duplicates<T, I, K, G, C>(
    new: &[T],
    old: &[T],
    get_id: G,
    get_common: C,
) -> Vec<DuplicateKey>
where
    I: Ord,
    K: Ord + Debug,
    G: Fn(&T) -> Option<I>,
    C: Fn(&T) -> K,
{
    let claimed: BTreeSet<I> = new.iter().filter_map(&get_id).collect();

    let mut out = Vec::new();
    check_duplicates(
        new.iter().filter(|r| get_id(*r).is_none()).map(&get_common),
        Side::New,
        KeyKind::Common,
        &mut out,
    );
    check_duplicates(
        old.iter()
            .filter(|r| get_id(*r).map_or(true, |id| !claimed.contains(&id)))
            .map(&get_common),
        Side::Old,
        KeyKind::Common,
        &mut out,
    );
    out
}

fn check_duplicates<K: Ord + Debug>(
    keys: impl Iterator<Item = K>,
    side: Side,
    kind: KeyKind,
    out: &mut Vec<DuplicateKey>,
) {
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    for (key, count) in counts {
        if count > 1 {
            out.push(DuplicateKey {
                side,
                kind,
                key: format!("{key:?}"),
                count,
            });
        }
    }
}
