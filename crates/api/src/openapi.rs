use utoipa::OpenApi;

use crate::handlers::{drafts, health, players};
use domain::models::DraftStatus;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Draft Engine API",
        version = "0.1.0",
        description = "API for running fantasy-football drafts with real-time updates, autopick, and commissioner controls",
        contact(
            name = "Draft Engine Team",
            email = "team@draft-engine.example.com"
        )
    ),
    paths(
        // Health
        health::health_check,

        // Players
        players::get_player,

        // Drafts
        drafts::create_draft,
        drafts::list_drafts,
        drafts::get_draft,
        drafts::get_draft_picks,
        drafts::get_available_players,
        drafts::pick,
        drafts::pick_asset,
        drafts::pick_matchup,
        drafts::start_draft,
        drafts::pause_draft,
        drafts::resume_draft,
        drafts::complete_draft,
        drafts::undo_pick,
        drafts::delete_draft,
        drafts::toggle_autodraft,
        drafts::set_order,
        drafts::randomize_order,
        drafts::confirm_order,
        drafts::set_order_from_pick_ownership,
        drafts::get_queue,
        drafts::add_to_queue,
        drafts::remove_from_queue,
        drafts::reorder_queue,
    ),
    components(
        schemas(
            // Domain models
            DraftStatus,

            // Player types
            players::PlayerResponse,

            // Draft types
            drafts::DraftResponse,
            drafts::CreateDraftRequest,
            drafts::DraftPickResponse,
            drafts::MakePickRequest,
            drafts::MakePickAssetRequest,
            drafts::MakeMatchupPickRequest,
            drafts::ToggleAutodraftRequest,
            drafts::DraftOrderEntryRequest,
            drafts::SetOrderRequest,
            drafts::RandomizeOrderRequest,
            drafts::SetOrderFromPickOwnershipRequest,
            drafts::IdempotentActionRequest,
            drafts::QueueEntryResponse,
            drafts::AddToQueueRequest,
            drafts::ReorderQueueRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "players", description = "Player lookup"),
        (name = "drafts", description = "Draft management and lifecycle"),
        (name = "queue", description = "Per-roster autopick preference queue"),
    )
)]
pub struct ApiDoc;
