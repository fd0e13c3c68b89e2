// WebSocket test utilities

use std::net::TcpListener;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use chess_backend::middleware::request_trace::RequestTrace;
use chess_backend::middleware::structured_logger::StructuredLogger;
use chess_backend::middleware::trace_span::TraceSpan;
use chess_backend::routes;
use chess_backend::services::games::LiveGame;
use chess_backend::state::app_state::AppState;

pub struct TestServer {
    pub handle: actix_web::dev::ServerHandle,
    pub addr: std::net::SocketAddr,
    pub join: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn game_url(&self, game_id: &str, token: Option<&str>) -> String {
        match token {
            Some(token) => format!("ws://{}/api/v1/game/{game_id}?token={token}", self.addr),
            None => format!("ws://{}/api/v1/game/{game_id}", self.addr),
        }
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
        let _ = self.join.await;
    }
}

/// Start a real HTTP server on an ephemeral port so tests can connect
/// with tokio-tungstenite.
pub async fn start_test_server(state: AppState) -> Result<TestServer, Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .configure(routes::configure)
    })
    .workers(1)
    .listen(listener)?
    .run();

    let handle = server.handle();
    let join = tokio::spawn(server);

    Ok(TestServer { handle, addr, join })
}

/// Poll until the game's hub holds `expected` connections.
pub async fn wait_for_connections(
    game: &LiveGame,
    expected: usize,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = tokio::time::Instant::now();
    loop {
        if game.connection_count() == expected {
            return Ok(());
        }
        if start.elapsed() >= timeout {
            return Err(format!(
                "timeout waiting for connection_count == {expected} (got {})",
                game.connection_count()
            )
            .into());
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
