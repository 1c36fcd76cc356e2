//! Blog post handlers.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use quill_core::domain::{BlogPost, ResolvedPost};
use quill_core::ports::{PostFilter, PostPatch};
use quill_shared::dto::{
    BlogPostDetailResponse, BlogPostResponse, CommentView, CreateBlogPostRequest,
    UpdateBlogPostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters accepted by the list route. Anything else is ignored.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
    created: Option<String>,
}

fn missing_field(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing `{}` in request body", field))
}

fn id_mismatch(path_id: &str, body_id: Option<&str>) -> AppError {
    AppError::BadRequest(format!(
        "Request path id ({}) and request body id ({}) must match",
        path_id,
        body_id.unwrap_or("")
    ))
}

fn wrong_author_ref() -> AppError {
    AppError::BadRequest("Wrong `authorId` in request body".to_string())
}

/// Parse and existence-check an author reference from a request body. The
/// check is best-effort: it is not atomic with the subsequent write.
async fn resolve_author_ref(state: &AppState, raw: &str) -> AppResult<Uuid> {
    let author_id = Uuid::parse_str(raw).map_err(|_| wrong_author_ref())?;
    if state.authors.find_by_id(author_id).await?.is_none() {
        return Err(wrong_author_ref());
    }
    Ok(author_id)
}

fn list_view(resolved: ResolvedPost) -> BlogPostResponse {
    let author = resolved.author_name();
    BlogPostResponse {
        id: resolved.post.id,
        title: resolved.post.title,
        content: resolved.post.content,
        author,
        publish_date: resolved.post.publish_date,
    }
}

fn detail_view(resolved: ResolvedPost) -> BlogPostDetailResponse {
    let author = resolved.author_name();
    BlogPostDetailResponse {
        id: resolved.post.id,
        title: resolved.post.title,
        content: resolved.post.content,
        author,
        publish_date: resolved.post.publish_date,
        comments: resolved
            .post
            .comments
            .into_iter()
            .map(|c| CommentView { content: c.content })
            .collect(),
    }
}

/// GET /blog-posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();

    let author_id = query
        .author
        .map(|raw| {
            Uuid::parse_str(&raw)
                .map_err(|_| AppError::BadRequest("Invalid `author` filter".to_string()))
        })
        .transpose()?;
    let created = query
        .created
        .map(|raw| {
            raw.parse::<DateTime<Utc>>()
                .map_err(|_| AppError::BadRequest("Invalid `created` filter".to_string()))
        })
        .transpose()?;

    let filter = PostFilter {
        title: query.title,
        content: query.content,
        author_id,
        created,
    };

    let posts = state.posts.list(filter).await?;

    Ok(HttpResponse::Ok().json(posts.into_iter().map(list_view).collect::<Vec<_>>()))
}

/// GET /blog-posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    // A malformed identifier cannot name a record; it reads as not found.
    let id = Uuid::parse_str(&path.into_inner()).map_err(|_| AppError::NotFound)?;

    let resolved = state.posts.find_by_id(id).await?.ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(detail_view(resolved)))
}

/// POST /blog-posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreateBlogPostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let title = req.title.ok_or_else(|| missing_field("title"))?;
    let content = req.content.ok_or_else(|| missing_field("content"))?;
    let author_ref = req.author_id.ok_or_else(|| missing_field("authorId"))?;

    let author_id = resolve_author_ref(&state, &author_ref).await?;

    let post = BlogPost::new(author_id, title, content, req.publish_date);
    let resolved = state.posts.create(post).await?;

    Ok(HttpResponse::Created().json(detail_view(resolved)))
}

/// PUT /blog-posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateBlogPostRequest>,
) -> AppResult<HttpResponse> {
    let path_id = path.into_inner();
    let req = body.into_inner();

    // The id in the request path and the one in the request body must match.
    if req.id.as_deref() != Some(path_id.as_str()) {
        return Err(id_mismatch(&path_id, req.id.as_deref()));
    }

    let id = Uuid::parse_str(&path_id).map_err(|_| AppError::NotFound)?;

    // Only the allow-listed fields are copied; everything else in the body is
    // silently ignored.
    let mut patch = PostPatch {
        title: req.title,
        content: req.content,
        author_id: None,
    };
    if let Some(author_ref) = req.author_id {
        patch.author_id = Some(resolve_author_ref(&state, &author_ref).await?);
    }

    let resolved = state
        .posts
        .update(id, patch)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(list_view(resolved)))
}

/// DELETE /blog-posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    // Idempotent: a malformed or unknown id means there is nothing to delete.
    if let Ok(id) = Uuid::parse_str(&path.into_inner()) {
        state.posts.delete(id).await?;
    }

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test, web};
    use sea_orm::{DatabaseBackend, DbConn, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use quill_infra::database::entity::{author, blog_post};
    use quill_infra::{PostgresAuthorRepository, PostgresBlogPostRepository};

    use crate::handlers;
    use crate::state::AppState;

    fn empty_db() -> DbConn {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    fn state_with(posts_db: DbConn, authors_db: DbConn) -> AppState {
        AppState {
            authors: Arc::new(PostgresAuthorRepository::new(authors_db)),
            posts: Arc::new(PostgresBlogPostRepository::new(posts_db)),
        }
    }

    async fn init(
        state: AppState,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(handlers::configure_routes)
                .default_service(web::route().to(handlers::not_found)),
        )
        .await
    }

    fn author_model() -> author::Model {
        author::Model {
            id: Uuid::new_v4(),
            first_name: "Andy".to_owned(),
            last_name: "Nguyen".to_owned(),
            user_name: None,
        }
    }

    fn post_model(author_id: Uuid, title: &str) -> blog_post::Model {
        blog_post::Model {
            id: Uuid::new_v4(),
            author_id,
            title: title.to_owned(),
            content: "Today's meeting is successful.".to_owned(),
            publish_date: chrono::Utc::now().into(),
            comments: blog_post::Comments(Vec::new()),
        }
    }

    #[actix_web::test]
    async fn list_posts_returns_serialized_posts() {
        let author = author_model();
        let post = post_model(author.id, "meeting");

        let posts_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![(post, author)]])
            .into_connection();

        let app = init(state_with(posts_db, empty_db())).await;

        let req = test::TestRequest::get().uri("/blog-posts").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let items = body.as_array().expect("array body");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "meeting");
        assert_eq!(items[0]["author"], "Andy Nguyen");
        assert!(items[0]["id"].is_string());
        assert!(items[0]["publishDate"].is_string());
    }

    #[actix_web::test]
    async fn list_posts_rejects_malformed_author_filter() {
        let app = init(state_with(empty_db(), empty_db())).await;

        let req = test::TestRequest::get()
            .uri("/blog-posts?author=not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn get_post_with_malformed_id_is_not_found() {
        let app = init(state_with(empty_db(), empty_db())).await;

        let req = test::TestRequest::get()
            .uri("/blog-posts/not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Not Found");
    }

    #[actix_web::test]
    async fn create_post_names_the_missing_field() {
        let app = init(state_with(empty_db(), empty_db())).await;

        let req = test::TestRequest::post()
            .uri("/blog-posts")
            .set_json(serde_json::json!({"title": "meeting", "authorId": Uuid::new_v4()}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Missing `content` in request body");
    }

    #[actix_web::test]
    async fn create_post_rejects_unknown_author_reference() {
        let authors_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<author::Model>::new()])
            .into_connection();

        let app = init(state_with(empty_db(), authors_db)).await;

        let req = test::TestRequest::post()
            .uri("/blog-posts")
            .set_json(serde_json::json!({
                "title": "meeting",
                "content": "Today's meeting is successful.",
                "authorId": Uuid::new_v4(),
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Wrong `authorId` in request body");
    }

    #[actix_web::test]
    async fn create_post_answers_201_with_a_generated_id() {
        let author = author_model();
        let inserted = post_model(author.id, "meeting");

        let authors_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![author.clone()]])
            .into_connection();
        let posts_db = MockDatabase::new(DatabaseBackend::Postgres)
            // insert .. returning
            .append_query_results(vec![vec![inserted.clone()]])
            // follow-up resolved read
            .append_query_results(vec![vec![(inserted, author)]])
            .into_connection();

        let app = init(state_with(posts_db, authors_db)).await;

        let req = test::TestRequest::post()
            .uri("/blog-posts")
            .set_json(serde_json::json!({
                "title": "meeting",
                "content": "Today's meeting is successful.",
                "authorId": Uuid::new_v4(),
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 201);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "meeting");
        assert_eq!(body["author"], "Andy Nguyen");
        assert!(body["id"].is_string());
        assert!(body["publishDate"].is_string());
        assert!(body["comments"].is_array());
    }

    #[actix_web::test]
    async fn update_post_rejects_mismatched_ids() {
        let app = init(state_with(empty_db(), empty_db())).await;

        let path_id = Uuid::new_v4();
        let body_id = Uuid::new_v4();
        let req = test::TestRequest::put()
            .uri(&format!("/blog-posts/{}", path_id))
            .set_json(serde_json::json!({"id": body_id, "title": "class"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("must match"));
    }

    #[actix_web::test]
    async fn update_post_returns_the_updated_record() {
        let author = author_model();
        let updated = blog_post::Model {
            title: "class".to_owned(),
            content: "web development".to_owned(),
            ..post_model(author.id, "meeting")
        };
        let post_id = updated.id;

        let posts_db = MockDatabase::new(DatabaseBackend::Postgres)
            // update .. returning
            .append_query_results(vec![vec![updated.clone()]])
            // resolved re-read
            .append_query_results(vec![vec![(updated, author)]])
            .into_connection();

        let app = init(state_with(posts_db, empty_db())).await;

        let req = test::TestRequest::put()
            .uri(&format!("/blog-posts/{}", post_id))
            .set_json(serde_json::json!({
                "id": post_id,
                "title": "class",
                "content": "web development",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "class");
        assert_eq!(body["content"], "web development");
    }

    #[actix_web::test]
    async fn delete_post_is_idempotent() {
        let posts_db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let app = init(state_with(posts_db, empty_db())).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/blog-posts/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 204);
    }

    #[actix_web::test]
    async fn unmatched_route_answers_not_found() {
        let app = init(state_with(empty_db(), empty_db())).await;

        let req = test::TestRequest::get().uri("/no-such-route").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Not Found");
    }
}
