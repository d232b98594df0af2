use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde_json::{json, Value as JsonValue};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

#[derive(Clone)]
struct MockState {
    notifications: Arc<Mutex<Vec<JsonValue>>>,
    response_status: Arc<Mutex<StatusCode>>,
}

pub struct MockNotifier {
    pub base_url: String,
    notifications: Arc<Mutex<Vec<JsonValue>>>,
    response_status: Arc<Mutex<StatusCode>>,
    _server_handle: tokio::task::JoinHandle<()>,
}

impl MockNotifier {
    pub async fn start() -> anyhow::Result<Self> {
        let notifications = Arc::new(Mutex::new(Vec::new()));
        let response_status = Arc::new(Mutex::new(StatusCode::OK));

        let state = MockState {
            notifications: notifications.clone(),
            response_status: response_status.clone(),
        };

        let app = Router::new()
            .route("/sendNotification", post(send_notification))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        sleep(Duration::from_millis(50)).await;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            notifications,
            response_status,
            _server_handle: server_handle,
        })
    }

    pub fn set_response(&self, status: StatusCode) {
        *self.response_status.lock().unwrap() = status;
    }

    pub fn get_notifications(&self) -> Vec<JsonValue> {
        self.notifications.lock().unwrap().clone()
    }
}

async fn send_notification(
    State(state): State<MockState>,
    Json(body): Json<JsonValue>,
) -> (StatusCode, Json<JsonValue>) {
    state.notifications.lock().unwrap().push(body);
    let status = *state.response_status.lock().unwrap();
    (status, Json(json!({"status": "sent"})))
}
