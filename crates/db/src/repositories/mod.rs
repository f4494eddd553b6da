pub mod chess_clock;
pub mod draft;
pub mod draft_event;
pub mod draft_pick;
pub mod operation_record;
pub mod player;
pub mod queue;
pub mod roster;

pub use chess_clock::SqlxChessClockRepository;
pub use draft::{SqlxDraftOrderRepository, SqlxDraftRepository};
pub use draft_event::SqlxDraftEventRepository;
pub use draft_pick::{SqlxDraftPickRepository, SqlxPickAssetRepository, SqlxVetPickSelectionRepository};
pub use operation_record::SqlxOperationRecordRepository;
pub use player::SqlxPlayerRepository;
pub use queue::SqlxQueueRepository;
pub use roster::SqlxRosterRepository;
