pub mod chess_clock;
pub mod draft;
pub mod draft_event;
pub mod draft_order;
pub mod draft_pick;
pub mod operation_record;
pub mod pick_asset;
pub mod player;
pub mod queue_entry;
pub mod roster;

pub use chess_clock::ChessClockEntry;
pub use draft::{Draft, DraftSettings, DraftStatus, DraftType, OvernightPause, PlayerPool, TimerMode};
pub use draft_event::{DraftEvent, EventType};
pub use draft_order::{validate_positions, DraftOrderEntry};
pub use draft_pick::{DraftPick, PickMetadata};
pub use operation_record::{OperationRecord, OperationType, DEFAULT_OPERATION_TTL_HOURS};
pub use pick_asset::{PickAsset, VetDraftPickAssetSelection};
pub use player::Player;
pub use queue_entry::{QueueEntry, QueueTarget};
pub use roster::Roster;
