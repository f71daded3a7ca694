//! One menu and its locking discipline.
//!
//! [`MenuStore`] keeps the item mapping behind a single reader-writer lock.
//! Reads take the lock shared and proceed in parallel. Every update takes it
//! exclusive for validation, mutation, and construction of the returned
//! snapshot, so no reader ever observes an item whose `count` and
//! `owner_count` disagree.
//!
//! Subscribers receive the post-mutation snapshot of every update that
//! changed the menu, in the order the updates were applied.

use tally_types::{Menu, MenuItem};
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::action::Action;
use crate::error::MenuError;

/// Capacity of the per-menu update channel.
///
/// A subscriber that falls further behind than this receives
/// [`broadcast::error::RecvError::Lagged`] and resumes from the newest
/// snapshot.
const UPDATE_CAPACITY: usize = 64;

/// A menu shared between concurrent request handlers.
#[derive(Debug)]
pub struct MenuStore {
    items: RwLock<Menu>,
    updates: broadcast::Sender<Menu>,
}

impl MenuStore {
    /// Create an empty menu.
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CAPACITY);
        Self {
            items: RwLock::new(Menu::new()),
            updates,
        }
    }

    /// Copy of the current item mapping.
    pub async fn snapshot(&self) -> Menu {
        self.items.read().await.clone()
    }

    /// Apply `action` to `item` and return the resulting item mapping.
    ///
    /// The whole call is one exclusive critical section. On error the menu
    /// is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`MenuError::AlreadyExists`] when adding an item that exists
    /// - [`MenuError::NotFound`] when incrementing or decrementing a
    ///   missing item
    pub async fn apply(&self, item: &str, action: Action) -> Result<Menu, MenuError> {
        let action_name = action.name();
        let mut items = self.items.write().await;
        let changed = transition(&mut items, item, action)?;
        let snapshot = items.clone();

        if changed {
            // Sent under the write lock so subscribers see updates in order.
            // Zero receivers is the normal case and not an error.
            let _ = self.updates.send(snapshot.clone());
        }
        drop(items);

        debug!(item, action = action_name, changed, "menu update applied");
        Ok(snapshot)
    }

    /// Subscribe to post-mutation snapshots.
    pub fn subscribe(&self) -> broadcast::Receiver<Menu> {
        self.updates.subscribe()
    }
}

impl Default for MenuStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one transition in place. Returns whether the menu changed.
///
/// Validation happens before any write, which keeps every rejection free
/// of side effects.
fn transition(items: &mut Menu, item: &str, action: Action) -> Result<bool, MenuError> {
    match action {
        Action::Add { .. } => {
            if items.contains_key(item) {
                return Err(MenuError::AlreadyExists(item.to_owned()));
            }
            items.insert(item.to_owned(), MenuItem::new(item.to_owned()));
            Ok(true)
        }
        Action::Remove => Ok(items.remove(item).is_some()),
        Action::Increment { owner } => {
            let entry = items
                .get_mut(item)
                .ok_or_else(|| MenuError::NotFound(item.to_owned()))?;
            let contribution = entry.owner_count.entry(owner).or_insert(0);
            *contribution = contribution.saturating_add(1);
            entry.count = entry.count.saturating_add(1);
            Ok(true)
        }
        Action::Decrement { owner } => {
            let entry = items
                .get_mut(item)
                .ok_or_else(|| MenuError::NotFound(item.to_owned()))?;
            // Floor at zero. An owner without a contribution has nothing to
            // take back, which keeps `count` equal to the owner total.
            let current = entry.owner_count.get(&owner).copied().unwrap_or(0);
            if entry.count == 0 || current == 0 {
                return Ok(false);
            }
            if current == 1 {
                entry.owner_count.remove(&owner);
            } else {
                entry.owner_count.insert(owner, current.saturating_sub(1));
            }
            entry.count = entry.count.saturating_sub(1);
            Ok(true)
        }
    }
}
