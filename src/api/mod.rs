//! HTTP handlers and routing

pub mod books;
pub mod health;
pub mod home;
pub mod openapi;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books))
        .route("/books", post(books::create_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id", put(books::update_book))
        .route("/books/:id", delete(books::delete_book))
        .with_state(state.clone());

    // Client script for the home page
    let assets = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(home::index))
        .with_state(state)
        .nest("/api", api)
        .nest_service("/static", assets)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{config::AppConfig, repository::Repository, services::Services};

    fn app_with(repository: Repository) -> Router {
        router(AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(repository)),
        })
    }

    async fn seeded() -> (Router, Repository) {
        let repository = Repository::in_memory();
        let services = Services::new(repository.clone());
        services.seed.load_if_empty().await.unwrap();
        (app_with(repository.clone()), repository)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_books() {
        let (app, _) = seeded().await;

        let response = send(&app, Method::GET, "/api/books", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let books = body.as_array().unwrap();
        assert_eq!(books.len(), 10);
        assert!(books[0]["id"].is_number());
        assert!(books[0]["author"]["name"].is_string());
        assert!(books[0]["author"].get("id").is_none());
    }

    #[tokio::test]
    async fn test_get_book() {
        let (app, _) = seeded().await;

        let response = send(&app, Method::GET, "/api/books/4", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["id"], 4);
        assert_eq!(body["title"], "Тютюн");
        assert_eq!(body["author"]["name"], "Димитър Димов");
    }

    #[tokio::test]
    async fn test_get_missing_book() {
        let (app, _) = seeded().await;

        let response = send(&app, Method::GET, "/api/books/999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_body(response).await;
        assert_eq!(body["error"], "NoSuchBook");
    }

    #[tokio::test]
    async fn test_create_book_with_new_author() {
        let (app, repository) = seeded().await;
        let authors_before = repository.authors.count().await.unwrap();

        let response = send(
            &app,
            Method::POST,
            "/api/books",
            Some(json!({ "title": "X", "isbn": "1", "author": { "name": "New" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        assert!(body["id"].is_number());
        assert_eq!(body["author"]["name"], "New");
        assert_eq!(repository.authors.count().await.unwrap(), authors_before + 1);
    }

    #[tokio::test]
    async fn test_create_book_with_known_author() {
        let (app, repository) = seeded().await;

        let response = send(
            &app,
            Method::POST,
            "/api/books",
            Some(json!({ "id": null, "title": "Немили-недраги", "isbn": "2", "author": { "name": "Иван Вазов" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(repository.authors.count().await.unwrap(), 5);
        assert_eq!(repository.books.count().await.unwrap(), 11);
    }

    #[tokio::test]
    async fn test_update_book() {
        let (app, _) = seeded().await;

        let response = send(
            &app,
            Method::PUT,
            "/api/books/1",
            Some(json!({ "title": "Last Christmas", "isbn": "42", "author": { "name": "Иван Вазов" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["title"], "Last Christmas");
        assert_eq!(body["isbn"], "42");
        assert_eq!(body["author"]["name"], "Иван Вазов");

        let body = json_body(send(&app, Method::GET, "/api/books/1", None).await).await;
        assert_eq!(body["title"], "Last Christmas");
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let (app, repository) = seeded().await;

        let response = send(
            &app,
            Method::PUT,
            "/api/books/999",
            Some(json!({ "title": "X", "isbn": "1", "author": { "name": "Nobody" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(repository.books.count().await.unwrap(), 10);
        assert_eq!(repository.authors.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_delete_book_is_idempotent() {
        let (app, repository) = seeded().await;

        let response = send(&app, Method::DELETE, "/api/books/2", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(repository.books.count().await.unwrap(), 9);

        let response = send(&app, Method::DELETE, "/api/books/2", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, "/api/books/2", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_home_page_lists_books() {
        let (app, _) = seeded().await;

        let response = send(&app, Method::GET, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("Под Игото"));
        assert!(page.contains("Елин Пелин"));
        assert!(page.contains(r#"<form id="bookForm">"#));
        assert!(page.contains(r#"data-action="delete" data-id="1""#));
    }

    #[tokio::test]
    async fn test_client_script_is_served() {
        let app = app_with(Repository::in_memory());

        let response = send(&app, Method::GET, "/static/js/app.js", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let script = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(script.contains("/api/books"));
        assert!(script.contains("bookForm"));
    }

    #[tokio::test]
    async fn test_static_dir_comes_from_config() {
        let mut config = AppConfig::default();
        config.server.static_dir = "does-not-exist".to_string();
        let app = router(AppState {
            config: Arc::new(config),
            services: Arc::new(Services::new(Repository::in_memory())),
        });

        let response = send(&app, Method::GET, "/static/js/app.js", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_and_readiness() {
        let app = app_with(Repository::in_memory());

        let body = json_body(send(&app, Method::GET, "/api/health", None).await).await;
        assert_eq!(body["status"], "healthy");

        let body = json_body(send(&app, Method::GET, "/api/ready", None).await).await;
        assert_eq!(body["status"], "ready");
    }
}
