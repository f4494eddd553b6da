use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;

/// Collaborator hook invoked once a draft completes: generating the league's
/// regular-season schedule from the rosters just filled. A real implementation
/// lives outside this crate (or calls out to one); this crate only needs the
/// seam and a safe default to wire in the meantime.
#[async_trait]
pub trait ScheduleGenerator: Send + Sync {
    async fn generate_schedule(&self, draft_id: Uuid, league_id: Uuid) -> DomainResult<()>;
}

/// Default collaborator: does nothing. Scheduling is entirely out of scope
/// for this crate; this exists so completion can call the seam unconditionally.
pub struct NoopScheduleGenerator;

#[async_trait]
impl ScheduleGenerator for NoopScheduleGenerator {
    async fn generate_schedule(&self, _draft_id: Uuid, _league_id: Uuid) -> DomainResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_schedule_generator_is_ok() {
        let generator = NoopScheduleGenerator;
        assert!(generator
            .generate_schedule(Uuid::new_v4(), Uuid::new_v4())
            .await
            .is_ok());
    }
}
