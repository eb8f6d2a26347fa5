//! In-process record stores backed by `DashMap`.
//!
//! Each row lives in its own shard-locked slot, so counter bumps and
//! patches are atomic per record, matching the single-statement updates
//! the PostgreSQL repositories use.

mod blog;
mod contact;
mod leader;
mod news;
mod resource;
mod user;

use dashmap::DashMap;
use uuid::Uuid;

pub use blog::MemoryBlogStore;
pub use contact::MemoryContactStore;
pub use leader::MemoryLeaderStore;
pub use news::MemoryNewsStore;
pub use resource::MemoryResourceStore;
pub use user::MemoryUserStore;

#[derive(Debug)]
pub(crate) struct Table<T> {
    rows: DashMap<Uuid, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: DashMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    pub(crate) fn insert(&self, id: Uuid, row: T) -> T {
        self.rows.insert(id, row.clone());
        row
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<T> {
        self.rows.get(&id).map(|r| r.value().clone())
    }

    /// Mutate a row in place if `guard` accepts it, returning the new value.
    pub(crate) fn modify_if(
        &self,
        id: Uuid,
        guard: impl FnOnce(&T) -> bool,
        f: impl FnOnce(&mut T),
    ) -> Option<T> {
        let mut row = self.rows.get_mut(&id)?;
        if !guard(row.value()) {
            return None;
        }
        f(row.value_mut());
        Some(row.value().clone())
    }

    pub(crate) fn modify(&self, id: Uuid, f: impl FnOnce(&mut T)) -> Option<T> {
        self.modify_if(id, |_| true, f)
    }

    pub(crate) fn remove(&self, id: Uuid) -> Option<T> {
        self.rows.remove(&id).map(|(_, row)| row)
    }

    pub(crate) fn rows(&self) -> Vec<T> {
        self.rows.iter().map(|r| r.value().clone()).collect()
    }
}
