//! Tests against a scripted mock controller on a loopback WebSocket server.

use std::future::Future;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

use tny_remote::drivers::{TnyDriver, TnyDriverConfig};
use tny_remote::packets::Response;
use tny_remote::{Tny360Remote, TnyError};

/// Spawns a one-connection mock controller and returns a config pointing at it.
async fn start_controller<F, Fut>(handler: F) -> TnyDriverConfig
where
    F: FnOnce(WebSocketStream<TcpStream>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = accept_async(stream).await.unwrap();
        handler(ws).await;
    });
    TnyDriverConfig::new("127.0.0.1".to_string(), port, 1_000)
}

/// Next binary frame from the client, skipping WebSocket control frames.
async fn next_request(ws: &mut WebSocketStream<TcpStream>) -> Vec<u8> {
    loop {
        match ws.next().await.expect("client hung up").expect("read failed") {
            Message::Binary(data) => return data,
            _ => {}
        }
    }
}

fn request_id(frame: &[u8]) -> u16 {
    u16::from_be_bytes([frame[0], frame[1]])
}

async fn reply(ws: &mut WebSocketStream<TcpStream>, id: u16, ok: bool, payload: Vec<u8>) {
    let frame = Response::new(id, ok, payload).encode();
    ws.send(Message::Binary(frame)).await.unwrap();
}

#[tokio::test]
async fn ping_resolves_on_bare_ack() {
    let config = start_controller(|mut ws| async move {
        let frame = next_request(&mut ws).await;
        assert_eq!(frame[2], 0x00);
        assert_eq!(frame.len(), 3, "ping carries no arguments");
        let id = request_id(&frame);
        reply(&mut ws, id, true, vec![]).await;
    })
    .await;

    let remote = Tny360Remote::new(TnyDriver::connect(config).await.unwrap());
    assert!(remote.ping().await.unwrap());
}

#[tokio::test]
async fn joint_target_roundtrips_through_degrees() {
    let config = start_controller(|mut ws| async move {
        // setJointTarget(3, 90°) must put pi/2 radians on the wire.
        let frame = next_request(&mut ws).await;
        assert_eq!(frame[2], 0x61);
        assert_eq!(frame[3], 3);
        let rad = f32::from_le_bytes([frame[4], frame[5], frame[6], frame[7]]);
        assert!((rad - std::f32::consts::FRAC_PI_2).abs() < 1e-6, "got {} rad", rad);
        reply(&mut ws, request_id(&frame), true, vec![]).await;

        // getJointTarget(3) answers in radians.
        let frame = next_request(&mut ws).await;
        assert_eq!(frame[2], 0x21);
        assert_eq!(frame[3], 3);
        let payload = rad.to_le_bytes().to_vec();
        reply(&mut ws, request_id(&frame), true, payload).await;
    })
    .await;

    let remote = Tny360Remote::new(TnyDriver::connect(config).await.unwrap());
    remote.set_joint_target(3, 90.0).await.unwrap();
    let deg = remote.get_joint_target(3).await.unwrap();
    assert!((deg - 90.0).abs() < 1e-4, "got {} deg", deg);
}

#[tokio::test]
async fn body_posture_goes_out_in_millimeters_then_radians() {
    let config = start_controller(|mut ws| async move {
        let frame = next_request(&mut ws).await;
        assert_eq!(frame[2], 0x65);
        let floats: Vec<f32> = frame[3..]
            .chunks(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(floats, vec![10.0, 20.0, 30.0, 0.0, 0.0, 0.0]);
        reply(&mut ws, request_id(&frame), true, vec![]).await;
    })
    .await;

    let remote = Tny360Remote::new(TnyDriver::connect(config).await.unwrap());
    remote.set_body_posture(0.0, 0.0, 0.0, 1.0, 2.0, 3.0).await.unwrap();
}

#[tokio::test]
async fn same_command_replies_match_by_request_id_even_out_of_order() {
    let config = start_controller(|mut ws| async move {
        let first = next_request(&mut ws).await;
        let second = next_request(&mut ws).await;
        assert_eq!(first[2], 0x21);
        assert_eq!(second[2], 0x21);

        // Answer in reverse arrival order; the angle depends on the joint
        // byte so a swap would be visible to the callers.
        for frame in [second, first] {
            let joint = frame[3];
            let rad = (joint as f32 + 1.0) * 0.5;
            reply(&mut ws, request_id(&frame), true, rad.to_le_bytes().to_vec()).await;
        }
    })
    .await;

    let remote = Tny360Remote::new(TnyDriver::connect(config).await.unwrap());
    let (a, b) = tokio::join!(remote.get_joint_target(0), remote.get_joint_target(1));
    let expected_a = 0.5f32.to_degrees();
    let expected_b = 1.0f32.to_degrees();
    assert!((a.unwrap() - expected_a).abs() < 1e-3);
    assert!((b.unwrap() - expected_b).abs() < 1e-3);
}

#[tokio::test]
async fn dropping_the_connection_rejects_every_pending_request() {
    let config = start_controller(|mut ws| async move {
        for _ in 0..3 {
            next_request(&mut ws).await;
        }
        // Hang up with all three still unanswered.
        drop(ws);
    })
    .await;
    let mut config = config;
    config.timeout_ms = 5_000;

    let remote = Tny360Remote::new(TnyDriver::connect(config).await.unwrap());
    let (a, b, c) = tokio::join!(
        remote.get_joint_target(0),
        remote.get_joint_target(1),
        remote.get_joint_position(2),
    );
    assert_eq!(a.unwrap_err(), TnyError::ConnectionLost);
    assert_eq!(b.unwrap_err(), TnyError::ConnectionLost);
    assert_eq!(c.unwrap_err(), TnyError::ConnectionLost);
}

#[tokio::test]
async fn silent_controller_times_out() {
    let config = start_controller(|mut ws| async move {
        next_request(&mut ws).await;
        tokio::time::sleep(Duration::from_secs(5)).await;
    })
    .await;
    let mut config = config;
    config.timeout_ms = 100;

    let remote = Tny360Remote::new(TnyDriver::connect(config).await.unwrap());
    match remote.ping().await.unwrap_err() {
        TnyError::Timeout(cmd) => assert_eq!(cmd, "ping"),
        other => panic!("expected Timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn failure_status_surfaces_as_command_rejected() {
    let config = start_controller(|mut ws| async move {
        let frame = next_request(&mut ws).await;
        assert_eq!(frame[2], 0x02);
        reply(&mut ws, request_id(&frame), false, vec![]).await;
    })
    .await;

    let remote = Tny360Remote::new(TnyDriver::connect(config).await.unwrap());
    // Joint 99 does not exist; the firmware, not the client, rejects it.
    match remote.calibrate_joint(99).await.unwrap_err() {
        TnyError::CommandRejected(cmd) => assert_eq!(cmd, "calibrateJoint"),
        other => panic!("expected CommandRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_calibration_state_is_never_defaulted() {
    let config = start_controller(|mut ws| async move {
        let frame = next_request(&mut ws).await;
        assert_eq!(frame[2], 0x25);
        reply(&mut ws, request_id(&frame), true, vec![3]).await;
    })
    .await;

    let remote = Tny360Remote::new(TnyDriver::connect(config).await.unwrap());
    assert_eq!(
        remote.get_calibration_state(0).await.unwrap_err(),
        TnyError::UnknownEnumValue(3)
    );
}

#[tokio::test]
async fn undersized_reply_is_a_frame_mismatch() {
    let config = start_controller(|mut ws| async move {
        let frame = next_request(&mut ws).await;
        // Two payload bytes where getJointTarget declares one FLOAT.
        reply(&mut ws, request_id(&frame), true, vec![0xAA, 0xBB]).await;
    })
    .await;

    let remote = Tny360Remote::new(TnyDriver::connect(config).await.unwrap());
    let err = remote.get_joint_target(0).await.unwrap_err();
    assert!(matches!(err, TnyError::FrameMismatch(_)));
}

#[tokio::test]
async fn invoking_after_disconnect_fails_fast() {
    let config = start_controller(|mut ws| async move {
        while ws.next().await.is_some() {}
    })
    .await;

    let driver = TnyDriver::connect(config).await.unwrap();
    let remote = Tny360Remote::new(driver.clone());
    driver.disconnect().await;
    assert!(!driver.is_connected().await);
    assert_eq!(remote.ping().await.unwrap_err(), TnyError::NotConnected);
}
