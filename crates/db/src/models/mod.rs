pub mod chess_clock;
pub mod draft;
pub mod draft_event;
pub mod draft_pick;
pub mod operation_record;
pub mod pick_asset;
pub mod player;
pub mod queue_entry;
pub mod roster;

pub use chess_clock::ChessClockEntryDb;
pub use draft::{DraftDb, DraftOrderEntryDb};
pub use draft_event::DraftEventDb;
pub use draft_pick::DraftPickDb;
pub use operation_record::OperationRecordDb;
pub use pick_asset::{PickAssetDb, VetDraftPickAssetSelectionDb};
pub use player::PlayerDb;
pub use queue_entry::QueueEntryDb;
pub use roster::RosterDb;
