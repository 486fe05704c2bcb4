use actix_web::{web, HttpResponse};

use crate::models::models::HealthResponse;
use crate::{auth, posts, users};

/// # GET /
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        message: "OK".to_string(),
    })
}

/// Route table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health))
        .route("/registerUser", web::post().to(users::register_user))
        .route("/userLogin", web::post().to(auth::login_user))
        .route("/newPost", web::post().to(posts::create_post))
        .route("/getMyPosts", web::get().to(posts::list_posts))
        .route("/postById", web::get().to(posts::get_post))
        .route("/post/{id}", web::delete().to(posts::delete_post));
}
