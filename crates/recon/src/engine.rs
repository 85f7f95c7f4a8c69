use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::config::{DuplicatePolicy, ReconcileOptions};
use crate::duplicates::{common_key_duplicates, identity_duplicates};
use crate::entity::{CommonKey, Identified};
use crate::error::ReconcileError;
use crate::model::Buckets;

// ---------------------------------------------------------------------------
// Identity only
// ---------------------------------------------------------------------------

/// Classify records by identity alone.
///
/// - New records without an identity go to `add`, in input order.
/// - New records with an identity go to `update`, ordered by identity. If
///   two share an identity the later one wins.
/// - Old records whose identity a new record carries go to `update_before`,
///   ordered by identity. If two share an identity the later one wins, so
///   each updated identity has at most one before-image. All other old
///   records (including id-less ones) go to `delete`, in input order.
pub fn compare<T, I, G>(new: Vec<T>, old: Vec<T>, get_id: G) -> Buckets<T>
where
    I: Ord,
    G: Fn(&T) -> Option<I>,
{
    let mut buckets = Buckets::new();

    let mut update: BTreeMap<I, T> = BTreeMap::new();
    for item in new {
        match get_id(&item) {
            Some(id) => {
                update.insert(id, item);
            }
            None => buckets.add.push(item),
        }
    }

    let mut update_before: BTreeMap<I, T> = BTreeMap::new();
    for item in old {
        match get_id(&item) {
            Some(id) if update.contains_key(&id) => {
                update_before.insert(id, item);
            }
            _ => buckets.delete.push(item),
        }
    }

    buckets.update = update.into_values().collect();
    buckets.update_before = update_before.into_values().collect();
    buckets
}

// ---------------------------------------------------------------------------
// Identity + secondary key
// ---------------------------------------------------------------------------

/// Classify records by identity, then recover fake adds by secondary key.
///
/// A fake add is an id-less new record whose secondary key matches an old
/// record that would otherwise be deleted: the user removed a row and typed
/// it back in. Such a pair becomes an update. The new record is given the old
/// identity through `set_id` and travels in `update`; the old record travels
/// in `update_before`.
///
/// Secondary keys must be unique among the id-less new records and among the
/// delete candidates, and identities must be unique per side. Collisions are
/// not reported: later records silently replace earlier ones and the
/// replaced records appear in no bucket. Use [`run`] with
/// [`DuplicatePolicy::Reject`] to catch them.
///
/// An old record without an identity still pairs with its key counterpart,
/// but has nothing to carry forward: `set_id` is not called and both records
/// keep no identity.
///
/// Ordering: `add` and `delete` by secondary key. `update` and
/// `update_before` start with the id-less pairs (by secondary key), followed
/// by everything else by identity.
pub fn compare_with_common<T, I, K, G, S, C>(
    new: Vec<T>,
    old: Vec<T>,
    get_id: G,
    mut set_id: S,
    get_common: C,
) -> Buckets<T>
where
    I: Ord + Clone,
    K: Ord,
    G: Fn(&T) -> Option<I>,
    S: FnMut(&mut T, I),
    C: Fn(&T) -> K,
{
    let mut add_candidates: BTreeMap<K, T> = BTreeMap::new();
    let mut update: BTreeMap<I, T> = BTreeMap::new();
    for item in new {
        match get_id(&item) {
            Some(id) => {
                update.insert(id, item);
            }
            None => {
                add_candidates.insert(get_common(&item), item);
            }
        }
    }

    let mut update_before: BTreeMap<I, T> = BTreeMap::new();
    let mut delete_candidates: BTreeMap<K, T> = BTreeMap::new();
    for item in old {
        match get_id(&item) {
            Some(id) if update.contains_key(&id) => {
                update_before.insert(id, item);
            }
            _ => {
                delete_candidates.insert(get_common(&item), item);
            }
        }
    }

    // add_candidates is consumed here, so removals from delete_candidates
    // never touch the map being walked.
    let mut add = Vec::new();
    let mut unidentified: Vec<(T, T)> = Vec::new();
    let mut reclassified = 0usize;
    for (key, mut up) in add_candidates {
        let Some(matched) = delete_candidates.remove(&key) else {
            add.push(up);
            continue;
        };
        match get_id(&matched) {
            Some(id) => {
                set_id(&mut up, id.clone());
                update.insert(id.clone(), up);
                update_before.insert(id, matched);
            }
            None => unidentified.push((matched, up)),
        }
        reclassified += 1;
    }
    if reclassified > 0 {
        log::debug!("reclassified {reclassified} fake add(s) as updates");
    }

    // Id-less pairs first: `None` orders before any identity.
    let (mut before, mut after): (Vec<T>, Vec<T>) = unidentified.into_iter().unzip();
    before.extend(update_before.into_values());
    after.extend(update.into_values());

    Buckets {
        add,
        update: after,
        update_before: before,
        delete: delete_candidates.into_values().collect(),
    }
}

// ---------------------------------------------------------------------------
// Trait entry points
// ---------------------------------------------------------------------------

/// [`compare`] using the record's own [`Identified`] impl.
pub fn reconcile<T: Identified>(new: Vec<T>, old: Vec<T>) -> Buckets<T> {
    compare(new, old, T::id)
}

/// [`compare_with_common`] using the record's own [`Identified`] and
/// [`CommonKey`] impls.
pub fn reconcile_entities<T>(new: Vec<T>, old: Vec<T>) -> Buckets<T>
where
    T: Identified + CommonKey,
{
    compare_with_common(new, old, T::id, T::set_id, T::common_key)
}

/// Reconcile per `options`, checking the uniqueness preconditions first.
///
/// Duplicates are logged under [`DuplicatePolicy::LastWriteWins`] and fail
/// the run under [`DuplicatePolicy::Reject`]. Secondary keys are only checked
/// when `options.reclassify` is set.
pub fn run<T>(new: Vec<T>, old: Vec<T>, options: &ReconcileOptions) -> Result<Buckets<T>, ReconcileError>
where
    T: Identified + CommonKey,
    T::Id: Debug,
    T::Key: Debug,
{
    let mut duplicates = identity_duplicates(&new, &old, T::id);
    if options.reclassify {
        duplicates.extend(common_key_duplicates(&new, &old, T::id, T::common_key));
    }
    duplicates.sort_by_key(|d| (d.side, d.kind));

    if !duplicates.is_empty() {
        match options.on_duplicate {
            DuplicatePolicy::Reject => return Err(ReconcileError::DuplicateKeys(duplicates)),
            DuplicatePolicy::LastWriteWins => {
                for dup in &duplicates {
                    log::warn!(
                        "duplicate {} {} appears {} times on the {} side",
                        dup.kind.as_str(),
                        dup.key,
                        dup.count,
                        dup.side.as_str()
                    );
                }
            }
        }
    }

    let buckets = if options.reclassify {
        reconcile_entities(new, old)
    } else {
        reconcile(new, old)
    };
    log::debug!("reconciled {}", buckets.summary());
    Ok(buckets)
}
