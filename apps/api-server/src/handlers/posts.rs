//! Post handlers.

use actix_web::{HttpResponse, web};

use bulletin_core::domain::{PostDraft, parse_post_id};
use bulletin_shared::dto::{PostPayload, PostsQuery, ResetResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn draft(payload: PostPayload) -> PostDraft {
    PostDraft {
        poster: payload.poster,
        title: payload.title,
        body: payload.body,
    }
}

/// GET /posts/all
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(query.into_inner().poster).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /posts/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(parse_post_id(&path)).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(draft(body.into_inner())).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// PUT /posts/{post_id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(parse_post_id(&path), draft(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .delete(parse_post_id(&path), draft(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /posts/reset/{username}/{password}
pub async fn reset_posts(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (username, password) = path.into_inner();
    let deleted = state.posts.reset(&username, &password).await?;

    Ok(HttpResponse::Ok().json(ResetResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{Method, StatusCode, header};
    use actix_web::{App, test};
    use bulletin_core::ResetCredentials;
    use bulletin_core::domain::Post;
    use bulletin_infra::{Argon2PasswordService, InMemoryPostRepository};
    use serde_json::{Value, json};

    use super::*;
    use crate::handlers::configure_routes;

    fn state() -> AppState {
        let passwords = Arc::new(Argon2PasswordService::new());
        let reset = ResetCredentials::hash(passwords.as_ref(), "admin", "hunter2").unwrap();

        AppState::with_repository(
            Arc::new(InMemoryPostRepository::new()),
            passwords,
            Some(reset),
        )
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    macro_rules! create {
        ($app:expr, $poster:expr, $title:expr, $body:expr) => {{
            let req = test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "poster": $poster, "title": $title, "body": $body }))
                .to_request();
            let resp = test::call_service(&$app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let post: Post = test::read_body_json(resp).await;
            post
        }};
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let app = app!();
        let created = create!(app, "alice", "Hi", "Hello");

        assert_eq!(created.poster, "alice");
        assert_eq!(created.title, "Hi");
        assert_eq!(created.body, "Hello");

        let req = test::TestRequest::get()
            .uri(&format!("/posts/{}", created.id))
            .to_request();
        let fetched: Post = test::call_and_read_body_json(&app, req).await;

        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    async fn test_create_with_missing_field_is_422() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({ "poster": "alice", "body": "Hello" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Requires poster, body, and title");
    }

    #[actix_web::test]
    async fn test_undecodable_payload_is_415() {
        let app = app!();
        let post = create!(app, "alice", "Hi", "Hello");
        let item = format!("/posts/{}", post.id);

        for (method, uri) in [
            (Method::POST, "/posts"),
            (Method::PUT, item.as_str()),
            (Method::DELETE, item.as_str()),
        ] {
            let not_json = test::TestRequest::default()
                .method(method.clone())
                .uri(uri)
                .insert_header((header::CONTENT_TYPE, "text/plain"))
                .set_payload("poster=alice")
                .to_request();
            let wrong_shape = test::TestRequest::default()
                .method(method.clone())
                .uri(uri)
                .set_json(json!({ "poster": 42, "title": "Hi", "body": "Hello" }))
                .to_request();
            let missing = test::TestRequest::default()
                .method(method.clone())
                .uri(uri)
                .to_request();

            for req in [not_json, wrong_shape, missing] {
                let resp = test::call_service(&app, req).await;
                assert_eq!(
                    resp.status(),
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "{method} {uri}"
                );
            }
        }

        let req = test::TestRequest::get().uri(&item).to_request();
        let unchanged: Post = test::call_and_read_body_json(&app, req).await;
        assert_eq!(unchanged, post);
    }

    #[actix_web::test]
    async fn test_get_unknown_post_is_404() {
        let app = app!();

        for uri in [
            format!("/posts/{}", uuid::Uuid::new_v4()),
            "/posts/not-a-uuid".to_string(),
        ] {
            let req = test::TestRequest::get().uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }
    }

    #[actix_web::test]
    async fn test_list_filters_by_poster() {
        let app = app!();
        create!(app, "alice", "a1", "x");
        create!(app, "bob", "b1", "y");
        create!(app, "alice", "a2", "z");

        let req = test::TestRequest::get()
            .uri("/posts/all?poster=alice")
            .to_request();
        let alice: Vec<Post> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|p| p.poster == "alice"));

        let req = test::TestRequest::get().uri("/posts/all").to_request();
        let all: Vec<Post> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 3);
    }

    #[actix_web::test]
    async fn test_update_flow() {
        let app = app!();
        let post = create!(app, "alice", "Hi", "Hello");
        let uri = format!("/posts/{}", post.id);

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "poster": "bob", "body": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "poster": "alice" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "poster": "alice", "title": "New title", "body": "Updated" }))
            .to_request();
        let updated: Post = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.body, "Updated");
        assert_eq!(updated.title, "Hi");
        assert_eq!(updated.poster, "alice");
    }

    #[actix_web::test]
    async fn test_update_with_malformed_id_is_422() {
        let app = app!();

        let req = test::TestRequest::put()
            .uri("/posts/not-a-uuid")
            .set_json(json!({ "poster": "alice", "body": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_delete_with_malformed_id_is_422() {
        let app = app!();

        let req = test::TestRequest::delete()
            .uri("/posts/not-a-uuid")
            .set_json(json!({ "poster": "alice" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Requires poster: <String>");
    }

    #[actix_web::test]
    async fn test_delete_flow() {
        let app = app!();
        let post = create!(app, "alice", "Hi", "Hello");
        let uri = format!("/posts/{}", post.id);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .set_json(json!({ "poster": "bob" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::delete()
            .uri(&uri)
            .set_json(json!({ "poster": "alice" }))
            .to_request();
        let deleted: Post = test::call_and_read_body_json(&app, req).await;
        assert_eq!(deleted, post);

        let req = test::TestRequest::get().uri(&uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_reset() {
        let app = app!();
        create!(app, "alice", "a", "x");
        create!(app, "bob", "b", "y");

        let req = test::TestRequest::delete()
            .uri("/posts/reset/admin/wrong")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get().uri("/posts/all").to_request();
        let all: Vec<Post> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 2);

        let req = test::TestRequest::delete()
            .uri("/posts/reset/admin/hunter2")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: ResetResponse = test::read_body_json(resp).await;
        assert_eq!(body.deleted, 2);

        let req = test::TestRequest::get().uri("/posts/all").to_request();
        let all: Vec<Post> = test::call_and_read_body_json(&app, req).await;
        assert!(all.is_empty());
    }

    #[actix_web::test]
    async fn test_health() {
        let app = app!();

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
    }
}
