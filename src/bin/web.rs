//! Single binary web server: JSON REST API over the club state.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT. Set DATA_FILE to persist the club as a JSON snapshot.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use padel_challenge_web::config::Settings;
use padel_challenge_web::logic::{available_players, max_points};
use padel_challenge_web::models::today;
use padel_challenge_web::store::{SnapshotStore, StoreError};
use padel_challenge_web::{
    calendar_dates, missing_players, playable_dates, points_history, ranking_csv, CalendarView,
    Club, ClubError, NewResult, NewTiebreak, Player, PlayerId,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;

/// Session key holding the selected "who am I" player.
const SESSION_PLAYER_KEY: &str = "player_id";

/// Progress charts never scale below this many points.
const CHART_MIN_POINTS: f64 = 10.0;

/// Shared state: the club snapshot and where it is saved.
struct AppData {
    club: RwLock<Club>,
    store: SnapshotStore,
}

type AppState = Data<AppData>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct PlayerBody {
    name: String,
    #[serde(default)]
    photo_url: Option<String>,
}

#[derive(Deserialize)]
struct SelectPlayerBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct ToggleAvailabilityBody {
    date: NaiveDate,
}

#[derive(Deserialize)]
struct CalendarQuery {
    #[serde(default)]
    view: CalendarView,
}

#[derive(Serialize)]
struct CalendarDay {
    date: NaiveDate,
    available: Vec<PlayerId>,
}

#[derive(Serialize)]
struct CalendarResponse<'a> {
    view: CalendarView,
    days: Vec<CalendarDay>,
    playable_dates: Vec<NaiveDate>,
    missing_players: Vec<&'a Player>,
}

#[derive(Serialize)]
struct ToggleResponse {
    date: NaiveDate,
    available: bool,
}

/// Path segment: entity id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

fn error_response(e: &ClubError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ClubError::PlayerNotFound(_) | ClubError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Save the current club if a snapshot file is configured. Failures are logged, not returned:
/// the in-memory state stays authoritative.
async fn persist(state: &AppState) {
    let result = state
        .store
        .save(|| match state.club.read() {
            Ok(g) => SnapshotStore::encode(&g),
            Err(_) => Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "club lock poisoned",
            ))),
        })
        .await;
    if let Err(e) = result {
        log::warn!("Failed to save snapshot: {}", e);
    }
}

/// Id of the player selected in this session, if any.
fn session_player_id(session: &Session) -> Option<PlayerId> {
    session.get::<PlayerId>(SESSION_PLAYER_KEY).ok().flatten()
}

/// Name of the session's player, if still on the roster.
fn recorder_name(club: &Club, session: &Session) -> Option<String> {
    session_player_id(session)
        .and_then(|id| club.get_player(id))
        .map(|p| p.name.clone())
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-challenge-web",
    })
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    match state.club.read() {
        Ok(g) => HttpResponse::Ok().json(&g.players),
        Err(_) => lock_error(),
    }
}

/// Register a new player.
#[post("/api/players")]
async fn api_register_player(state: AppState, body: Json<PlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    let response = {
        let mut g = match state.club.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.register_player(&body.name, body.photo_url) {
            Ok(p) => {
                log::info!("Registered player {}", p.name);
                HttpResponse::Ok().json(p)
            }
            Err(e) => return error_response(&e),
        }
    };
    persist(&state).await;
    response
}

/// Rename a player and optionally replace the avatar.
#[put("/api/players/{id}")]
async fn api_update_player(
    state: AppState,
    path: Path<IdPath>,
    body: Json<PlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let response = {
        let mut g = match state.club.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.update_player(path.id, &body.name, body.photo_url) {
            Ok(p) => HttpResponse::Ok().json(p),
            Err(e) => return error_response(&e),
        }
    };
    persist(&state).await;
    response
}

/// Delete a player. Their matches stay; if it was the session's player, the selection is cleared.
#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<IdPath>, session: Session) -> HttpResponse {
    let response = {
        let mut g = match state.club.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.delete_player(path.id) {
            Ok(p) => {
                log::info!("Deleted player {}", p.name);
                HttpResponse::Ok().json(&g.players)
            }
            Err(e) => return error_response(&e),
        }
    };
    if session_player_id(&session) == Some(path.id) {
        session.remove(SESSION_PLAYER_KEY);
    }
    persist(&state).await;
    response
}

#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    match state.club.read() {
        Ok(g) => HttpResponse::Ok().json(&g.matches),
        Err(_) => lock_error(),
    }
}

#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let g = match state.club.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_match(path.id) {
        Some(m) => HttpResponse::Ok().json(m),
        None => error_response(&ClubError::MatchNotFound(path.id)),
    }
}

/// Record a played match; winner and points are derived from the score.
#[post("/api/matches")]
async fn api_record_result(
    state: AppState,
    body: Json<NewResult>,
    session: Session,
) -> HttpResponse {
    let response = {
        let mut g = match state.club.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let recorder = recorder_name(&g, &session);
        match g.record_result(body.into_inner(), today(), recorder.as_deref()) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => return error_response(&e),
        }
    };
    persist(&state).await;
    response
}

/// Edit a match result (also how scheduled calendar matches get their score).
#[put("/api/matches/{id}")]
async fn api_edit_result(
    state: AppState,
    path: Path<IdPath>,
    body: Json<NewResult>,
    session: Session,
) -> HttpResponse {
    let response = {
        let mut g = match state.club.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let recorder = recorder_name(&g, &session);
        match g.edit_result(path.id, body.into_inner(), today(), recorder.as_deref()) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => return error_response(&e),
        }
    };
    persist(&state).await;
    response
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let response = {
        let mut g = match state.club.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.delete_match(path.id) {
            Ok(_) => HttpResponse::Ok().json(&g.matches),
            Err(e) => return error_response(&e),
        }
    };
    persist(&state).await;
    response
}

/// Record a tie-break (flat 2 points to the winner).
#[post("/api/tiebreaks")]
async fn api_record_tiebreak(
    state: AppState,
    body: Json<NewTiebreak>,
    session: Session,
) -> HttpResponse {
    let response = {
        let mut g = match state.club.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let recorder = recorder_name(&g, &session);
        match g.record_tiebreak(body.into_inner(), today(), recorder.as_deref()) {
            Ok(m) => HttpResponse::Ok().json(m),
            Err(e) => return error_response(&e),
        }
    };
    persist(&state).await;
    response
}

/// Generate the 4-player round-robin calendar.
#[post("/api/tournament/generate")]
async fn api_generate_tournament(state: AppState) -> HttpResponse {
    let response = {
        let mut g = match state.club.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.generate_tournament(today()) {
            Ok(generated) => HttpResponse::Ok().json(generated),
            Err(e) => return error_response(&e),
        }
    };
    persist(&state).await;
    response
}

#[get("/api/ranking")]
async fn api_ranking(state: AppState) -> HttpResponse {
    match state.club.read() {
        Ok(g) => HttpResponse::Ok().json(g.ranking()),
        Err(_) => lock_error(),
    }
}

#[get("/api/ranking.csv")]
async fn api_ranking_csv(state: AppState) -> HttpResponse {
    let rows = match state.club.read() {
        Ok(g) => g.ranking(),
        Err(_) => return lock_error(),
    };
    match ranking_csv(&rows) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"ranking.csv\""))
            .body(csv),
        Err(e) => {
            log::warn!("Failed to render ranking CSV: {}", e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

/// Cumulative points per player after each completed match.
#[get("/api/progress")]
async fn api_progress(state: AppState) -> HttpResponse {
    let g = match state.club.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let history = points_history(&g.players, &g.matches);
    let max = max_points(&history, CHART_MIN_POINTS);
    HttpResponse::Ok().json(serde_json::json!({ "history": history, "max_points": max }))
}

#[get("/api/summary")]
async fn api_summary(state: AppState) -> HttpResponse {
    match state.club.read() {
        Ok(g) => HttpResponse::Ok().json(g.summary()),
        Err(_) => lock_error(),
    }
}

/// Days of the current or next month with who is available, playable days and missing players.
#[get("/api/calendar")]
async fn api_calendar(state: AppState, query: Query<CalendarQuery>) -> HttpResponse {
    let g = match state.club.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let dates = calendar_dates(query.view, today());
    let days = dates
        .iter()
        .map(|d| CalendarDay {
            date: *d,
            available: available_players(*d, &g.availabilities),
        })
        .collect();
    HttpResponse::Ok().json(CalendarResponse {
        view: query.view,
        days,
        playable_dates: playable_dates(&dates, &g.availabilities),
        missing_players: missing_players(&g.players, &g.availabilities, &dates),
    })
}

/// Toggle the session player's availability on a date.
#[post("/api/availability/toggle")]
async fn api_toggle_availability(
    state: AppState,
    body: Json<ToggleAvailabilityBody>,
    session: Session,
) -> HttpResponse {
    let Some(player_id) = session_player_id(&session) else {
        return error_response(&ClubError::NoCurrentPlayer);
    };
    let response = {
        let mut g = match state.club.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match g.toggle_availability(body.date, player_id) {
            Ok(available) => HttpResponse::Ok().json(ToggleResponse {
                date: body.date,
                available,
            }),
            Err(e) => return error_response(&e),
        }
    };
    persist(&state).await;
    response
}

/// Who this session is playing as.
#[get("/api/session")]
async fn api_get_session(state: AppState, session: Session) -> HttpResponse {
    let g = match state.club.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let player = session_player_id(&session).and_then(|id| g.get_player(id));
    HttpResponse::Ok().json(serde_json::json!({ "player": player }))
}

/// Select the current player for this session.
#[post("/api/session")]
async fn api_select_player(
    state: AppState,
    body: Json<SelectPlayerBody>,
    session: Session,
) -> HttpResponse {
    let player = match state.club.read() {
        Ok(g) => g.get_player(body.player_id).cloned(),
        Err(_) => return lock_error(),
    };
    let Some(player) = player else {
        return error_response(&ClubError::PlayerNotFound(body.player_id));
    };
    if let Err(e) = session.insert(SESSION_PLAYER_KEY, player.id) {
        log::warn!("Failed to store session: {}", e);
        return HttpResponse::InternalServerError().body("session error");
    }
    HttpResponse::Ok().json(serde_json::json!({ "player": player }))
}

#[delete("/api/session")]
async fn api_clear_session(session: Session) -> HttpResponse {
    session.remove(SESSION_PLAYER_KEY);
    HttpResponse::NoContent().finish()
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env();
    let store = SnapshotStore::new(settings.data_file.clone());
    let club = store.load().map_err(|e| {
        log::error!("Cannot load snapshot: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    let bind = (settings.host.as_str(), settings.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppData {
        club: RwLock::new(club),
        store,
    });
    // Sessions only remember the selected player; a fresh key per run is enough.
    let key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_list_players)
            .service(api_register_player)
            .service(api_update_player)
            .service(api_delete_player)
            .service(api_list_matches)
            .service(api_get_match)
            .service(api_record_result)
            .service(api_edit_result)
            .service(api_delete_match)
            .service(api_record_tiebreak)
            .service(api_generate_tournament)
            .service(api_ranking)
            .service(api_ranking_csv)
            .service(api_progress)
            .service(api_summary)
            .service(api_calendar)
            .service(api_toggle_availability)
            .service(api_get_session)
            .service(api_select_player)
            .service(api_clear_session)
    })
    .bind(bind)?
    .run()
    .await
}
