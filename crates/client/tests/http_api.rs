//! Black-box tests: the real `ApiClient` against an in-process stub backend.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};

use myfit_auth::{Role, Session};
use myfit_client::{
    AdminApi, ApiClient, ApiError, AuthApi, ClientConfig, LoginRequest, MemberApi, TrainerApi,
};
use myfit_core::{BookingId, ClassSessionId, UserId};

const SECRET: &str = "stub-secret";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    authorization: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl Recorder {
    fn all(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }

    fn last(&self) -> Recorded {
        self.all().pop().expect("no request recorded")
    }
}

struct StubServer {
    base_url: String,
    recorder: Recorder,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    async fn spawn() -> Self {
        let recorder = Recorder::default();
        let app = Router::new().fallback(stub).with_state(recorder.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            recorder,
            handle,
        }
    }

    fn client(&self, session: Session) -> ApiClient {
        let config = ClientConfig::new(&self.base_url).unwrap();
        ApiClient::new(&config, session).unwrap()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(username: &str, role: Role) -> String {
    let claims = json!({
        "sub": username,
        "role": format!("ROLE_{role}"),
        "iat": 1_700_000_000u64,
        "exp": 4_100_000_000u64,
    });
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

async fn stub(
    State(recorder): State<Recorder>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    recorder.0.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.clone(),
    });

    match (method, path.as_str()) {
        (Method::POST, "/api/auth/login") => {
            let creds: Value = serde_json::from_str(&body).unwrap_or_default();
            if creds["username"] == "ann" && creds["password"] == "secret" {
                axum::Json(json!({ "token": mint_jwt("ann", Role::Member) })).into_response()
            } else {
                (StatusCode::UNAUTHORIZED, "Invalid username or password").into_response()
            }
        }
        (Method::GET, "/api/member/classes/available") => axum::Json(json!([{
            "id": 1,
            "className": "Spin",
            "description": "Cardio",
            "scheduledAt": "2030-01-01T07:00:00",
            "maxCapacity": 12,
            "trainerId": 4,
            "trainerName": "Tom"
        }]))
        .into_response(),
        (Method::POST, "/api/member/classes/book") => {
            let req: Value = serde_json::from_str(&body).unwrap_or_default();
            if req["classSessionId"] == 99 {
                (
                    StatusCode::BAD_REQUEST,
                    axum::Json(json!({ "message": "Class is full" })),
                )
                    .into_response()
            } else {
                StatusCode::OK.into_response()
            }
        }
        (Method::DELETE, p) if p.starts_with("/api/member/classes/bookings/") => {
            StatusCode::NO_CONTENT.into_response()
        }
        (Method::GET, "/api/admin/users") => axum::Json(json!([{
            "id": 3,
            "username": "tom",
            "fullName": "Tom T",
            "email": "tom@example.com",
            "role": "TRAINER",
            "active": true
        }]))
        .into_response(),
        (Method::PATCH, p) if p.starts_with("/api/admin/users/") => StatusCode::OK.into_response(),
        (Method::POST, "/api/admin/trainer-salaries") => StatusCode::OK.into_response(),
        (Method::PATCH, p) if p.starts_with("/api/trainer/classes/bookings/") => {
            StatusCode::OK.into_response()
        }
        (Method::GET, "/api/admin/plans") => (StatusCode::OK, "definitely not json").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

#[tokio::test]
async fn login_returns_token_without_touching_session() {
    let server = StubServer::spawn().await;
    let session = Session::in_memory();
    let client = server.client(session.clone());

    let token = client
        .login(&LoginRequest {
            username: "ann".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(session.get(), None);
    let login = server.recorder.last();
    assert_eq!(login.authorization, None);
    assert_eq!(
        serde_json::from_str::<Value>(&login.body).unwrap(),
        json!({ "username": "ann", "password": "secret" })
    );

    session.set(token);
    assert_eq!(session.role_claim().role(), Some(Role::Member));
    assert_eq!(session.subject().as_deref(), Some("ann"));
}

#[tokio::test]
async fn bad_credentials_surface_server_text() {
    let server = StubServer::spawn().await;
    let client = server.client(Session::in_memory());

    let err = client
        .login(&LoginRequest {
            username: "ann".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status {
            status: 401,
            message: "Invalid username or password".to_string()
        }
    );
}

#[tokio::test]
async fn bearer_header_follows_the_session() {
    let server = StubServer::spawn().await;
    let session = Session::in_memory();
    let client = server.client(session.clone());

    let classes = client.available_classes().await.unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].trainer_name.as_deref(), Some("Tom"));
    assert_eq!(server.recorder.last().authorization, None);

    let token = mint_jwt("ann", Role::Member);
    session.set(token.clone());
    client.available_classes().await.unwrap();
    assert_eq!(
        server.recorder.last().authorization,
        Some(format!("Bearer {token}"))
    );

    session.clear();
    client.available_classes().await.unwrap();
    assert_eq!(server.recorder.last().authorization, None);
}

#[tokio::test]
async fn rejected_mutation_carries_server_message() {
    let server = StubServer::spawn().await;
    let client = server.client(Session::in_memory());

    client.book_class(ClassSessionId::new(1)).await.unwrap();
    let err = client.book_class(ClassSessionId::new(99)).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("Booking failed."), "Class is full");
    assert_eq!(
        serde_json::from_str::<Value>(&server.recorder.last().body).unwrap(),
        json!({ "classSessionId": 99 })
    );
}

#[tokio::test]
async fn query_parameters_are_encoded() {
    let server = StubServer::spawn().await;
    let client = server.client(Session::in_memory());

    let users = client.users(Some(Role::Trainer)).await.unwrap();
    assert_eq!(users[0].role, Some(Role::Trainer));
    assert_eq!(server.recorder.last().query.as_deref(), Some("role=TRAINER"));

    client.users(None).await.unwrap();
    assert_eq!(server.recorder.last().query, None);

    client.set_user_active(UserId::new(3), false).await.unwrap();
    let patch = server.recorder.last();
    assert_eq!(patch.method, Method::PATCH);
    assert_eq!(patch.path, "/api/admin/users/3/active");
    assert_eq!(patch.query.as_deref(), Some("active=false"));

    client.set_trainer_salary(UserId::new(5), 1200.5).await.unwrap();
    assert_eq!(
        server.recorder.last().query.as_deref(),
        Some("trainerId=5&salary=1200.5")
    );

    client.set_attendance(BookingId::new(8), true).await.unwrap();
    let attendance = server.recorder.last();
    assert_eq!(attendance.path, "/api/trainer/classes/bookings/8/attendance");
    assert_eq!(attendance.query.as_deref(), Some("present=true"));
}

#[tokio::test]
async fn duplicate_submissions_are_not_deduplicated() {
    let server = StubServer::spawn().await;
    let client = server.client(Session::in_memory());

    let (a, b) = tokio::join!(
        client.cancel_class_booking(BookingId::new(7)),
        client.cancel_class_booking(BookingId::new(7)),
    );
    a.unwrap();
    b.unwrap();

    let deletes: Vec<_> = server
        .recorder
        .all()
        .into_iter()
        .filter(|r| r.method == Method::DELETE)
        .collect();
    assert_eq!(deletes.len(), 2);
    assert!(deletes.iter().all(|r| r.path == "/api/member/classes/bookings/7"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = StubServer::spawn().await;
    let client = server.client(Session::in_memory());

    let err = AdminApi::plans(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unknown_endpoint_is_a_status_error() {
    let server = StubServer::spawn().await;
    let client = server.client(Session::in_memory());

    let err = client.trainer_salaries().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.server_message(), None);
    assert_eq!(err.user_message("Failed to load salaries."), "Failed to load salaries.");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(&format!("http://{addr}")).unwrap();
    let client = ApiClient::new(&config, Session::in_memory()).unwrap();

    let err = client.available_classes().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}
