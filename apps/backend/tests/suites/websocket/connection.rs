use std::time::Duration;

use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Error as WsError;

use super::fixtures::{new_game, started_game, CONNECT_TIMEOUT};
use crate::support::test_state;
use crate::support::websocket::{start_test_server, wait_for_connections};
use crate::support::websocket_client::WebSocketClient;

#[tokio::test]
async fn unknown_game_is_rejected_before_upgrade() -> Result<(), Box<dyn std::error::Error>> {
    let server = start_test_server(test_state()).await?;

    match connect_async(server.game_url("AAAAAAAAAA", None)).await {
        Err(WsError::Http(resp)) => assert_eq!(resp.status().as_u16(), 400),
        Err(other) => panic!("expected an HTTP rejection, got {other:?}"),
        Ok(_) => panic!("handshake must fail for an unknown game"),
    }

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn no_frame_is_sent_on_connect() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = started_game().await;
    let (mut white, _black) = fixture.connect_players().await;

    white.expect_silence(Duration::from_millis(200)).await?;

    fixture.server.stop().await;
    Ok(())
}

#[tokio::test]
async fn closing_detaches_from_the_hub() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = started_game().await;
    let (mut white, mut black) = fixture.connect_players().await;

    white.close().await?;
    wait_for_connections(&fixture.game, 1, CONNECT_TIMEOUT).await?;
    black.close().await?;
    wait_for_connections(&fixture.game, 0, CONNECT_TIMEOUT).await?;

    fixture.server.stop().await;
    Ok(())
}

#[tokio::test]
async fn spectators_may_connect_without_a_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let game = new_game(&state);
    let server = start_test_server(state).await?;

    let _viewer =
        WebSocketClient::connect_retry(&server.game_url(game.id(), None), CONNECT_TIMEOUT).await?;
    wait_for_connections(&game, 1, CONNECT_TIMEOUT).await?;

    server.stop().await;
    Ok(())
}

#[tokio::test]
async fn binary_frames_get_an_error_frame() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = started_game().await;
    let (mut white, _black) = fixture.connect_players().await;

    white.send_binary(vec![1, 2, 3]).await?;
    let frame = white.recv_frame().await?;
    assert_eq!(frame["success"], false);
    assert_eq!(frame["status"], 400);
    assert_eq!(frame["message"], "binary frames are not supported");

    fixture.server.stop().await;
    Ok(())
}
