use super::domain::{RecyclingRecord, UserId};
use super::window::DailyWindow;

/// Storage abstraction for accepted recycling records.
///
/// Reading today's records and appending a new one are separate calls, so two
/// submissions for the same user can both validate against the same snapshot.
/// `RecyclingService` serializes those steps per user inside one process; a
/// store shared between processes must offer its own transactional
/// check-and-insert to keep the daily caps intact.
pub trait RecordStore: Send + Sync {
    /// Records of `user_id` created inside `window`, oldest first.
    fn records_between(
        &self,
        user_id: &UserId,
        window: &DailyWindow,
    ) -> Result<Vec<RecyclingRecord>, RepositoryError>;

    /// Every record of `user_id`, newest first.
    fn history(&self, user_id: &UserId) -> Result<Vec<RecyclingRecord>, RepositoryError>;

    fn all_records(&self) -> Result<Vec<RecyclingRecord>, RepositoryError>;

    fn append(&self, record: RecyclingRecord) -> Result<RecyclingRecord, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
