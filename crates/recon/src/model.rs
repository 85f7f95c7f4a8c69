use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// The closed set of buckets a record can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    Add,
    Update,
    UpdateBefore,
    Delete,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Tag::Add, Tag::Update, Tag::UpdateBefore, Tag::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Add => "ADD",
            Tag::Update => "UPDATE",
            Tag::UpdateBefore => "UPDATE_BEFORE",
            Tag::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Classified output of one reconciliation.
///
/// `update` and `update_before` are both ordered by identity, id-less
/// entries first. They are not index-parallel: an update whose identity the
/// old side never carried has no before-image. Use [`Buckets::pairs`] to
/// line them up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Buckets<T> {
    pub add: Vec<T>,
    pub update: Vec<T>,
    pub update_before: Vec<T>,
    pub delete: Vec<T>,
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Buckets<T> {
    pub fn new() -> Self {
        Self {
            add: Vec::new(),
            update: Vec::new(),
            update_before: Vec::new(),
            delete: Vec::new(),
        }
    }

    pub fn get(&self, tag: Tag) -> &[T] {
        match tag {
            Tag::Add => &self.add,
            Tag::Update => &self.update,
            Tag::UpdateBefore => &self.update_before,
            Tag::Delete => &self.delete,
        }
    }

    /// Buckets in `Tag::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &[T])> + '_ {
        Tag::ALL.into_iter().map(move |tag| (tag, self.get(tag)))
    }

    /// `(before, after)` for every updated record that has a before-image,
    /// joined by identity. Id-less entries pair up in order.
    pub fn pairs<I, G>(&self, get_id: G) -> Vec<(&T, &T)>
    where
        I: Ord,
        G: Fn(&T) -> Option<I>,
    {
        let mut out = Vec::new();
        let mut before = self.update_before.iter().peekable();
        for after in &self.update {
            let id = get_id(after);
            while before.next_if(|b| get_id(*b) < id).is_some() {}
            if let Some(b) = before.next_if(|b| get_id(*b) == id) {
                out.push((b, after));
            }
        }
        out
    }

    /// Tagged form. Always holds all four tags, empty buckets included.
    pub fn into_map(self) -> BTreeMap<Tag, Vec<T>> {
        BTreeMap::from([
            (Tag::Add, self.add),
            (Tag::Update, self.update),
            (Tag::UpdateBefore, self.update_before),
            (Tag::Delete, self.delete),
        ])
    }

    /// Total records across all four buckets.
    pub fn len(&self) -> usize {
        self.add.len() + self.update.len() + self.update_before.len() + self.delete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> BucketSummary {
        BucketSummary {
            add: self.add.len(),
            update: self.update.len(),
            update_before: self.update_before.len(),
            delete: self.delete.len(),
            total: self.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketSummary {
    pub add: usize,
    pub update: usize,
    pub update_before: usize,
    pub delete: usize,
    pub total: usize,
}

impl std::fmt::Display for BucketSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "add={} update={} update_before={} delete={}",
            self.add, self.update, self.update_before, self.delete
        )
    }
}
