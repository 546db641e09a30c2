use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/cases", case_routes())
        .nest("/socs", soc_routes())
        .nest("/admin", admin_routes())
}

fn case_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::case::list_cases,
            handlers::case::create_case
        ))
        .routes(routes!(handlers::case::get_case, handlers::case::upsert_case))
        .routes(routes!(handlers::soc::list_socs, handlers::soc::create_soc))
        .routes(routes!(handlers::soc::ensure_default_soc))
}

fn soc_routes() -> OpenApiRouter<AppState> {
    let photo_upload = OpenApiRouter::new()
        .routes(routes!(handlers::photo::upload_photo))
        .layer(handlers::photo::photo_upload_body_limit());

    OpenApiRouter::new()
        .routes(routes!(handlers::soc::get_soc, handlers::soc::update_soc))
        .routes(routes!(handlers::platform::list_platforms))
        .routes(routes!(
            handlers::platform::get_platform,
            handlers::platform::upsert_platform
        ))
        .routes(routes!(
            handlers::photo::get_photo,
            handlers::photo::update_photo,
            handlers::photo::delete_photo
        ))
        .merge(photo_upload)
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::admin::reset_all))
}
