use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use roster_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    address::{
        create_address, delete_address, get_address, list_addresses, partial_update_address,
        update_address,
    },
    health::{healthz, readyz},
    intern::{
        all_intern_roles, create_intern, delete_intern, get_intern, get_intern_role,
        interns_by_mentor, interns_without_mentor, list_interns, partial_update_intern,
        update_intern,
    },
    manager::{
        all_manager_roles, create_manager, delete_manager, get_manager, get_manager_role,
        list_managers, managers_by_department, partial_update_manager, update_manager,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Addresses
        .route("/addresses", get(list_addresses).post(create_address))
        .route(
            "/addresses/{id}",
            get(get_address)
                .put(update_address)
                .patch(partial_update_address)
                .delete(delete_address),
        )
        // Managers
        .route("/managers", get(list_managers).post(create_manager))
        .route("/managers/by_department", get(managers_by_department))
        .route("/managers/all_roles", get(all_manager_roles))
        .route(
            "/managers/{id}",
            get(get_manager)
                .put(update_manager)
                .patch(partial_update_manager)
                .delete(delete_manager),
        )
        .route("/managers/{id}/role", get(get_manager_role))
        // Interns
        .route("/interns", get(list_interns).post(create_intern))
        .route("/interns/by_mentor", get(interns_by_mentor))
        .route("/interns/without_mentor", get(interns_without_mentor))
        .route("/interns/all_roles", get(all_intern_roles))
        .route(
            "/interns/{id}",
            get(get_intern)
                .put(update_intern)
                .patch(partial_update_intern)
                .delete(delete_intern),
        )
        .route("/interns/{id}/role", get(get_intern_role))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
