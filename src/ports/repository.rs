//! Repository port for trained-table persistence.

use std::path::Path;

use crate::{Result, learning::SavedTables};

/// Port for persisting and loading trained tables.
///
/// # Examples
///
/// ```no_run
/// use blackjack_rl::learning::SavedTables;
/// use blackjack_rl::ports::TableRepository;
/// use std::path::Path;
///
/// fn save_tables<R: TableRepository>(
///     repo: &R,
///     tables: &SavedTables,
///     path: &Path,
/// ) -> blackjack_rl::Result<()> {
///     repo.save(tables, path)
/// }
/// ```
pub trait TableRepository {
    /// Save tables to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or serialization fails.
    fn save(&self, tables: &SavedTables, path: &Path) -> Result<()>;

    /// Load tables from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed.
    fn load(&self, path: &Path) -> Result<SavedTables>;
}
