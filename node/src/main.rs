//! MKRM storefront daemon.
//!
//! Serves the product range, the cart/checkout session, batch traceability
//! lookups and AI-backed price estimation and chat over HTTP. All state is in
//! memory for the lifetime of the process; the trace catalog is synthesized
//! once at startup from a newline-delimited batch identifier list.

mod ai;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mkrm_common::catalog;
use mkrm_common::chat::{ChatChunk, Transcript};
use mkrm_common::order::{Order, ShippingDetails};
use mkrm_common::pricing::{self, EstimateRequest, PriceEstimate};
use mkrm_common::product::{self, Product, ProductId};
use mkrm_common::session::{CartView, SessionState};
use mkrm_common::trace::TraceRecord;

#[derive(Parser)]
#[command(name = "mkrm-node", about = "MKRM storefront daemon")]
struct Cli {
    /// HTTP port to listen on.
    #[arg(long, default_value_t = 3100)]
    port: u16,

    /// Newline-delimited batch identifier list for the trace catalog.
    #[arg(long, default_value = "batches.txt")]
    batches: PathBuf,

    /// OpenAI-compatible endpoint for estimates and chat.
    #[arg(long, default_value = "https://api.openai.com/v1")]
    ai_base_url: String,

    /// Model name for the AI endpoint.
    #[arg(long, default_value = "gpt-4o-mini")]
    ai_model: String,
}

struct AppState {
    session: Mutex<SessionState>,
    products: Vec<Product>,
    ai: Option<ai::AiClient>,
}

// ─── API types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    batches: usize,
    ai_enabled: bool,
}

#[derive(Deserialize)]
struct AddToCartRequest {
    product_id: ProductId,
    quantity: u32,
}

#[derive(Deserialize)]
struct UpdateQuantityRequest {
    product_id: ProductId,
    quantity: i64,
}

#[derive(Deserialize)]
struct PlaceOrderRequest {
    shipping: ShippingDetails,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn not_found(message: String) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message }))
}

// ─── Handlers ────────────────────────────────────────────────────────────────

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let session = state.session.lock().await;
    Json(HealthResponse {
        status: "ok",
        batches: session.catalog().len(),
        ai_enabled: state.ai.is_some(),
    })
}

async fn products_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Product>> {
    Json(state.products.clone())
}

async fn trace_handler(
    State(state): State<Arc<AppState>>,
    Path(batch_id): Path<String>,
) -> Result<Json<TraceRecord>, ApiError> {
    let session = state.session.lock().await;
    session
        .trace(&batch_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(format!("No trace record found for batch '{}'", batch_id.trim())))
}

async fn cart_handler(State(state): State<Arc<AppState>>) -> Json<CartView> {
    Json(state.session.lock().await.cart_view())
}

async fn cart_add_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartView>, ApiError> {
    let product = product::find(&state.products, &req.product_id)
        .ok_or_else(|| not_found(format!("Unknown product '{}'", req.product_id.0)))?;
    let mut session = state.session.lock().await;
    session.add_to_cart(product, req.quantity);
    Ok(Json(session.cart_view()))
}

async fn cart_update_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Json<CartView> {
    let mut session = state.session.lock().await;
    session.update_quantity(&req.product_id, req.quantity);
    Json(session.cart_view())
}

async fn orders_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Order>> {
    Json(state.session.lock().await.orders().to_vec())
}

async fn place_order_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Json<Order>, ApiError> {
    let mut session = state.session.lock().await;
    session.place_order(req.shipping).map(Json).map_err(|err| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
    })
}

/// Pricing never fails: any problem with the AI path degrades to the offline
/// estimator.
async fn estimate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateRequest>,
) -> Json<PriceEstimate> {
    if let Some(client) = &state.ai {
        match client.estimate(&req).await {
            Ok(estimate) => return Json(estimate),
            Err(err) => warn!(error = %err, "AI estimate failed, using offline fallback"),
        }
    }
    Json(pricing::estimate(&req))
}

/// Chat never errors out either: failures become the generic apologetic reply.
async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(mut transcript): Json<Transcript>,
) -> Json<Transcript> {
    match &state.ai {
        Some(client) => match client.chat(&transcript).await {
            Ok(reply) => transcript.apply_chunk(ChatChunk {
                text: Some(reply),
                citation: None,
            }),
            Err(err) => {
                warn!(error = %err, "chat request failed");
                transcript.fail_reply();
            }
        },
        None => transcript.fail_reply(),
    }
    Json(transcript)
}

// ─── Startup ─────────────────────────────────────────────────────────────────

fn load_catalog(path: &PathBuf) -> catalog::BatchCatalog {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "batch list unreadable, starting with an empty catalog");
            return catalog::BatchCatalog::default();
        }
    };
    let mut rng = StdRng::from_entropy();
    catalog::build(&text, &mut rng)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let cli = Cli::parse();

    let catalog = load_catalog(&cli.batches);
    info!(
        batches = catalog.len(),
        skipped = catalog.skipped_lines(),
        "trace catalog built"
    );

    let ai = match std::env::var("MKRM_AI_API_KEY") {
        Ok(key) if !key.is_empty() => Some(ai::AiClient::new(ai::AiConfig {
            base_url: cli.ai_base_url.clone(),
            model: cli.ai_model.clone(),
            api_key: key,
        })),
        _ => {
            warn!("MKRM_AI_API_KEY not set; estimates and chat use offline fallbacks");
            None
        }
    };

    let state = Arc::new(AppState {
        session: Mutex::new(SessionState::with_catalog(catalog)),
        products: product::default_products(),
        ai,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/products", get(products_handler))
        .route("/api/trace/{batch_id}", get(trace_handler))
        .route("/api/cart", get(cart_handler))
        .route("/api/cart/add", post(cart_add_handler))
        .route("/api/cart/update", post(cart_update_handler))
        .route("/api/orders", get(orders_handler).post(place_order_handler))
        .route("/api/estimate", post(estimate_handler))
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .with_state(state);

    let addr = format!("0.0.0.0:{}", cli.port);
    info!(%addr, "mkrm-node listening");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
