use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use axum_extra::{headers, TypedHeader};
use futures::{sink::SinkExt, stream::StreamExt};
use serde_json::json;
use sketch_core::sketch::{
    ConstraintKind, PickConfig, PrimitiveId, SketchController, SketchError,
};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod echo;
use echo::EchoSolver;

/// One editing session: the sketch state machine plus the solver instance,
/// which lives for the whole application and is reset per solve call.
struct Session {
    controller: SketchController,
    solver: EchoSolver,
    pick_config: PickConfig,
}

struct AppState {
    session: Arc<RwLock<Session>>,
}

/// Format a sketch error as a JSON message for the frontend
fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!(
        "ERROR_UPDATE:{}",
        json!({
            "code": code,
            "message": message,
            "severity": severity
        })
    )
}

fn error_code(err: &SketchError) -> &'static str {
    match err {
        SketchError::InsufficientSelection { .. } => "INSUFFICIENT_SELECTION",
        SketchError::ArityMismatch { .. } => "ARITY_MISMATCH",
        SketchError::DuplicateConstraint(_) => "DUPLICATE_CONSTRAINT",
        SketchError::PrimitiveNotFound(_) => "PRIMITIVE_NOT_FOUND",
        SketchError::DuplicateId(_) => "DUPLICATE_ID",
        SketchError::NotAPoint(_) => "NOT_A_POINT",
        SketchError::Solver(_) => "SOLVER_FAILED",
    }
}

/// User-input errors are blocking notices; everything else is an error.
fn error_severity(err: &SketchError) -> &'static str {
    match err {
        SketchError::InsufficientSelection { .. }
        | SketchError::ArityMismatch { .. }
        | SketchError::DuplicateConstraint(_) => "warning",
        _ => "error",
    }
}

/// Seed geometry: an anchored origin, a free point with a line between
/// them, and two circles for equal-radius play.
fn seed_sketch() -> SketchController {
    let mut controller = SketchController::new();
    let origin = controller.add_point(0.0, 0.0, true);
    let free = controller.add_point(1.0, 1.0, false);
    let far = controller.add_point(3.0, 0.0, false);
    // Fresh ids over just-created points; these pushes cannot fail
    if let Err(e) = controller.add_line(origin.clone(), free) {
        warn!("Seed sketch incomplete: {}", e);
    }
    if let Err(e) = controller.add_circle(origin, 1.0, false) {
        warn!("Seed sketch incomplete: {}", e);
    }
    if let Err(e) = controller.add_circle(far, 0.5, false) {
        warn!("Seed sketch incomplete: {}", e);
    }
    controller
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let shared_state = Arc::new(AppState {
        session: Arc::new(RwLock::new(Session {
            controller: seed_sketch(),
            solver: EchoSolver::new(),
            pick_config: PickConfig::default(),
        })),
    });

    // build our application with a route
    let app = Router::new()
        .route("/", get(root))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn root() -> &'static str {
    "Hello from Sketch Backend!"
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    user_agent: Option<TypedHeader<headers::UserAgent>>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    if let Some(TypedHeader(agent)) = user_agent {
        info!("Client connecting: {}", agent);
    }
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    info!("Client connected");
    let (mut sender, mut receiver) = socket.split();

    // Initial snapshot so the frontend can draw immediately
    {
        let json = {
            let session = state.session.read().unwrap();
            serde_json::to_string(&session.controller.snapshot()).unwrap_or("{}".to_string())
        };
        if sender
            .send(Message::Text(format!("SKETCH_UPDATE:{}", json)))
            .await
            .is_err()
        {
            return;
        }
    }

    while let Some(msg) = receiver.next().await {
        let msg = if let Ok(msg) = msg {
            msg
        } else {
            return;
        };

        if let Message::Text(text) = msg {
            info!("Received message: {}", text);

            match apply_command(&text, &state) {
                Ok(()) => {
                    let json = {
                        let session = state.session.read().unwrap();
                        serde_json::to_string(&session.controller.snapshot())
                            .unwrap_or("{}".to_string())
                    };
                    if sender
                        .send(Message::Text(format!("SKETCH_UPDATE:{}", json)))
                        .await
                        .is_err()
                    {
                        return;
                    }
                }
                Err(CommandError::Sketch(e)) => {
                    warn!("Command failed: {}", e);
                    let msg = format_error(error_code(&e), &e.to_string(), error_severity(&e));
                    if sender.send(Message::Text(msg)).await.is_err() {
                        return;
                    }
                }
                Err(CommandError::Malformed(reason)) => {
                    warn!("Malformed command: {}", reason);
                    let msg = format_error("BAD_COMMAND", &reason, "warning");
                    if sender.send(Message::Text(msg)).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
    info!("Client disconnected");
}

enum CommandError {
    Sketch(SketchError),
    Malformed(String),
}

impl From<SketchError> for CommandError {
    fn from(e: SketchError) -> Self {
        CommandError::Sketch(e)
    }
}

/// Dispatch one text command against the session. Commands:
///   PICK:<x>:<y>         hit-test, toggle whatever is under the cursor
///   CLICK:<id>           toggle selection of a primitive
///   DRAG:<id>:<x>:<y>    move a point and re-solve synchronously
///   CONSTRAINT:<kind>    author a constraint from the current selection
///   SOLVE                explicit solve
///   CLEAR_SELECTION      explicit deselection
fn apply_command(text: &str, state: &Arc<AppState>) -> Result<(), CommandError> {
    let mut session = state.session.write().unwrap();
    let session = &mut *session;

    if let Some(rest) = text.strip_prefix("PICK:") {
        let (x, y) = parse_xy(rest)?;
        match session.controller.click_at([x, y], &session.pick_config)? {
            Some(id) => info!("Picked {}", id),
            None => info!("Pick at ({}, {}) hit nothing", x, y),
        }
        Ok(())
    } else if let Some(id) = text.strip_prefix("CLICK:") {
        let selected = session.controller.click(&PrimitiveId::named(id))?;
        info!("Clicked {} (selected: {})", id, selected);
        Ok(())
    } else if let Some(rest) = text.strip_prefix("DRAG:") {
        let mut parts = rest.splitn(2, ':');
        let id = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CommandError::Malformed("DRAG needs an id".into()))?;
        let coords = parts
            .next()
            .ok_or_else(|| CommandError::Malformed("DRAG needs coordinates".into()))?;
        let (x, y) = parse_xy(coords)?;
        session
            .controller
            .drag(&mut session.solver, &PrimitiveId::named(id), x, y)?;
        info!("Dragged {} to ({}, {})", id, x, y);
        Ok(())
    } else if let Some(kind_str) = text.strip_prefix("CONSTRAINT:") {
        let kind = ConstraintKind::from_str(kind_str).map_err(CommandError::Malformed)?;
        let constraint = session.controller.add_constraint(kind)?;
        info!("Added constraint {}", constraint.label());
        Ok(())
    } else if text == "SOLVE" {
        session.controller.solve(&mut session.solver)?;
        info!("Solved sketch");
        Ok(())
    } else if text == "CLEAR_SELECTION" {
        session.controller.clear_selection();
        info!("Cleared all selections");
        Ok(())
    } else {
        Err(CommandError::Malformed(format!("Unknown command: {}", text)))
    }
}

fn parse_xy(s: &str) -> Result<(f64, f64), CommandError> {
    let mut parts = s.split(':');
    let x = parts
        .next()
        .and_then(|v| v.parse::<f64>().ok())
        .ok_or_else(|| CommandError::Malformed(format!("Bad coordinates: {}", s)))?;
    let y = parts
        .next()
        .and_then(|v| v.parse::<f64>().ok())
        .ok_or_else(|| CommandError::Malformed(format!("Bad coordinates: {}", s)))?;
    Ok((x, y))
}
