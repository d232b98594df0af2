use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

#[derive(Debug, Clone)]
pub struct RecordedAvailabilityPatch {
    pub donation_id: String,
    pub body: JsonValue,
}

#[derive(Clone)]
struct MockState {
    donations: Arc<Mutex<HashMap<String, JsonValue>>>,
    availability_patches: Arc<Mutex<Vec<RecordedAvailabilityPatch>>>,
    patch_response_status: Arc<Mutex<StatusCode>>,
}

/// Stand-in for the donations service, serving `/api/donations/{id}` from
/// an in-memory map.
pub struct MockDonationsService {
    pub base_url: String,
    donations: Arc<Mutex<HashMap<String, JsonValue>>>,
    availability_patches: Arc<Mutex<Vec<RecordedAvailabilityPatch>>>,
    patch_response_status: Arc<Mutex<StatusCode>>,
    _server_handle: tokio::task::JoinHandle<()>,
}

impl MockDonationsService {
    pub async fn start() -> anyhow::Result<Self> {
        let donations = Arc::new(Mutex::new(HashMap::new()));
        let availability_patches = Arc::new(Mutex::new(Vec::new()));
        let patch_response_status = Arc::new(Mutex::new(StatusCode::OK));

        let state = MockState {
            donations: donations.clone(),
            availability_patches: availability_patches.clone(),
            patch_response_status: patch_response_status.clone(),
        };

        let app = Router::new()
            .route("/api/donations/:id", get(get_donation))
            .route("/api/donations/:id/availability", patch(patch_availability))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        sleep(Duration::from_millis(50)).await;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            donations,
            availability_patches,
            patch_response_status,
            _server_handle: server_handle,
        })
    }

    pub fn add_donation(&self, id: &str, available: bool) {
        let donation = json!({
            "id": id,
            "email": "donor@example.com",
            "available": available,
            "title": format!("Donation {}", id),
            "description": format!("Description of {}", id),
            "category": "furniture",
            "condition": "good",
            "image_url": format!("https://img.example.com/{}.jpg", id),
            "city": "Porto",
            "created_by": "donor-1"
        });
        self.donations.lock().unwrap().insert(id.to_string(), donation);
    }

    pub fn set_available(&self, id: &str, available: bool) {
        if let Some(donation) = self.donations.lock().unwrap().get_mut(id) {
            donation["available"] = json!(available);
        }
    }

    /// Overwrites a single field of a stored donation with an arbitrary value.
    pub fn set_field(&self, id: &str, field: &str, value: JsonValue) {
        if let Some(donation) = self.donations.lock().unwrap().get_mut(id) {
            donation[field] = value;
        }
    }

    /// Serves `body` as-is for `id`, whatever its shape.
    pub fn set_raw_donation(&self, id: &str, body: JsonValue) {
        self.donations.lock().unwrap().insert(id.to_string(), body);
    }

    pub fn remove_donation(&self, id: &str) {
        self.donations.lock().unwrap().remove(id);
    }

    pub fn set_patch_response(&self, status: StatusCode) {
        *self.patch_response_status.lock().unwrap() = status;
    }

    pub fn get_availability_patches(&self) -> Vec<RecordedAvailabilityPatch> {
        self.availability_patches.lock().unwrap().clone()
    }
}

async fn get_donation(
    State(state): State<MockState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<JsonValue>) {
    match state.donations.lock().unwrap().get(&id) {
        Some(donation) => (StatusCode::OK, Json(donation.clone())),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Donation not found"})),
        ),
    }
}

async fn patch_availability(
    State(state): State<MockState>,
    Path(id): Path<String>,
    Json(body): Json<JsonValue>,
) -> (StatusCode, Json<JsonValue>) {
    state
        .availability_patches
        .lock()
        .unwrap()
        .push(RecordedAvailabilityPatch {
            donation_id: id.clone(),
            body: body.clone(),
        });

    let status = *state.patch_response_status.lock().unwrap();
    if status == StatusCode::OK {
        // Store the value verbatim, like the real service does
        if let Some(donation) = state.donations.lock().unwrap().get_mut(&id) {
            donation["available"] = body["available"].clone();
        }
    }

    (status, Json(json!({"id": id})))
}
