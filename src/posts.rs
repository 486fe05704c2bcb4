use actix_web::{web, HttpRequest, HttpResponse};

use crate::core::db::{Database, Param};
use crate::core::errors::ApiError;
use crate::core::helpers::{parse_id, RequestFields};
use crate::core::query_params::{get_string, parse_query_params};
use crate::models::models::Post;

const POST_COLUMNS: &str = "ID, UserID, postTitle, postDescription";

fn plain(text: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(text)
}

/// # POST /newPost
pub async fn create_post(
    db: web::Data<Database>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let fields = RequestFields::from_body(&req, &body)?;
    let (user_id, title, description) = match (
        fields.get("userID"),
        fields.get("postTitle"),
        fields.get("postDescription"),
    ) {
        (Some(user_id), Some(title), Some(description)) => (user_id, title, description),
        _ => {
            return Err(ApiError::BadRequest(
                "userID, postTitle and postDescription are required".to_string(),
            ))
        }
    };
    let user_id = parse_id(&user_id, "userID")?;

    db.execute(
        "INSERT INTO Posts (UserID, postTitle, postDescription) VALUES (?, ?, ?)",
        &[
            Param::Int(user_id),
            Param::Text(title),
            Param::Text(description),
        ],
    )
    .await
    .map_err(ApiError::internal("Failed to create post"))?;

    tracing::debug!(user_id, "post created");
    Ok(plain("Post created"))
}

/// # GET /getMyPosts?userID=
///
/// Newest first, by id.
pub async fn list_posts(
    db: web::Data<Database>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let params = parse_query_params(req.query_string());
    let user_id = get_string(&params, "userID")
        .ok_or_else(|| ApiError::BadRequest("userID is required".to_string()))?;
    let user_id = parse_id(&user_id, "userID")?;

    let sql = format!(
        "SELECT {} FROM Posts WHERE UserID = ? ORDER BY ID DESC",
        POST_COLUMNS
    );
    let posts: Vec<Post> = db
        .fetch_all(&sql, &[Param::Int(user_id)])
        .await
        .map_err(ApiError::internal("Failed to fetch posts"))?;

    Ok(HttpResponse::Ok().json(posts))
}

/// # GET /postById?id=
pub async fn get_post(
    db: web::Data<Database>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let params = parse_query_params(req.query_string());
    let id = get_string(&params, "id")
        .ok_or_else(|| ApiError::BadRequest("id is required".to_string()))?;
    let id = parse_id(&id, "id")?;

    let sql = format!("SELECT {} FROM Posts WHERE ID = ? LIMIT 1", POST_COLUMNS);
    let post: Post = db
        .fetch_optional(&sql, &[Param::Int(id)])
        .await
        .map_err(ApiError::internal("Failed to fetch post"))?
        .ok_or_else(|| ApiError::NotFound("Not found".to_string()))?;

    Ok(HttpResponse::Ok().json(post))
}

/// # DELETE /post/{id}?userID=
///
/// The owner check lives in the statement itself: a post that does not
/// exist and a post owned by someone else both affect zero rows and both
/// answer 404.
pub async fn delete_post(
    db: web::Data<Database>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let params = parse_query_params(req.query_string());
    let id = Some(path.into_inner()).filter(|id| !id.is_empty());
    let (id, user_id) = match (id, get_string(&params, "userID")) {
        (Some(id), Some(user_id)) => (id, user_id),
        _ => {
            return Err(ApiError::BadRequest(
                "id and userID are required".to_string(),
            ))
        }
    };
    let id = parse_id(&id, "id")?;
    let user_id = parse_id(&user_id, "userID")?;

    let affected = db
        .execute(
            "DELETE FROM Posts WHERE ID = ? AND UserID = ?",
            &[Param::Int(id), Param::Int(user_id)],
        )
        .await
        .map_err(ApiError::internal("Failed to delete post"))?;

    if affected == 0 {
        return Err(ApiError::NotFound("Post not found".to_string()));
    }

    tracing::debug!(post_id = id, user_id, "post deleted");
    Ok(plain("Deleted"))
}
