pub mod engine;
pub mod events;
pub mod order_policy;
pub mod pick_state;
pub mod ranking;
pub mod schedule;
pub mod state_service;
pub mod tick_scheduler;
pub mod validators;

pub use engine::{resolve_autopick_reason, select_autopick_target, AutopickReason};
pub use events::DraftEventSink;
pub use schedule::{NoopScheduleGenerator, ScheduleGenerator};
pub use state_service::DraftStateService;
pub use tick_scheduler::TickScheduler;
