pub mod chess_clock;
pub mod draft;
pub mod draft_pick;
pub mod event_log;
pub mod operation_record;
pub mod player;
pub mod queue;
pub mod roster;
pub mod transactions;

pub use chess_clock::ChessClockRepository;
pub use draft::{DraftOrderRepository, DraftRepository};
pub use draft_pick::{DraftPickRepository, PickAssetRepository, VetPickSelectionRepository};
pub use event_log::DraftEventRepository;
pub use operation_record::OperationRecordRepository;
pub use player::PlayerRepository;
pub use queue::QueueRepository;
pub use roster::RosterRepository;
pub use transactions::{DraftTransactions, LifecycleOutcome, PickOutcome, UndoOutcome};

#[cfg(test)]
pub use draft::{MockDraftOrderRepository, MockDraftRepository};
#[cfg(test)]
pub use draft_pick::{MockDraftPickRepository, MockPickAssetRepository};
#[cfg(test)]
pub use player::MockPlayerRepository;
#[cfg(test)]
pub use queue::MockQueueRepository;
#[cfg(test)]
pub use roster::MockRosterRepository;
#[cfg(test)]
pub use transactions::MockDraftTransactions;
