use utoipa::OpenApi;

use crate::{
    api::models::{
        AddItemRequest, AddParticipantRequest, AuthResponse, CreateGroupRequest, ErrorResponse, LoginRequest,
        RegisterRequest, RemoveItemRequest, RemoveParticipantRequest, UpdateGroupRequest, UpdateItemRequest,
    },
    core::{
        models::{
            audit::{AppLog, GroupAudit},
            group::Group,
            item::Item,
            participant::Participant,
            user::User,
        },
        services::{GroupSummaryResponse, ParticipantTotal},
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::register,
        super::handlers::login,
        super::handlers::get_user,
        super::handlers::create_group,
        super::handlers::list_groups,
        super::handlers::get_group,
        super::handlers::update_group,
        super::handlers::delete_group,
        super::handlers::add_participant,
        super::handlers::remove_participant,
        super::handlers::add_item,
        super::handlers::update_item,
        super::handlers::remove_item,
        super::handlers::get_group_summary,
        super::handlers::get_summary_chart,
        super::handlers::get_app_logs,
        super::handlers::get_group_audits,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        CreateGroupRequest,
        UpdateGroupRequest,
        AddParticipantRequest,
        RemoveParticipantRequest,
        AddItemRequest,
        UpdateItemRequest,
        RemoveItemRequest,
        ErrorResponse,
        User,
        Participant,
        Item,
        Group,
        GroupSummaryResponse,
        ParticipantTotal,
        AppLog,
        GroupAudit,
    )),
    info(
        title = "fimdefesta API",
        description = "Bill splitting for groups: who ate what, who owes what.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
