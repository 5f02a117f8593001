//! Integration tests for room-scoped relaying over real WebSocket connections.

mod common;

use common::{TestServer, assert_silent, join_envelope, leave_envelope, recv_text, send_text};
use futures_util::SinkExt;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

const DRAW_START: &str = r#"{"back_type":"send_message","room":"alpha","type":"draw_start","strokeId":1,"point":{"x":5,"y":5}}"#;

#[tokio::test]
async fn test_same_room_members_receive_exact_envelope() {
    // テスト項目: A と B が alpha に参加し、A の送信が A と B の両方にそのまま届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    send_text(&mut bob, &join_envelope("alpha")).await;
    server.wait_for_members("alpha", 2).await;

    // when (操作):
    send_text(&mut alice, DRAW_START).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut alice).await, DRAW_START);
    assert_eq!(recv_text(&mut bob).await, DRAW_START);
}

#[tokio::test]
async fn test_other_room_receives_nothing() {
    // テスト項目: A が alpha、B が beta に参加し、A の alpha への送信は B に届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    send_text(&mut bob, &join_envelope("beta")).await;
    server.wait_for_members("alpha", 1).await;
    server.wait_for_members("beta", 1).await;

    // when (操作):
    send_text(&mut alice, DRAW_START).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut alice).await, DRAW_START);
    assert_silent(&mut bob).await;
}

#[tokio::test]
async fn test_left_member_receives_nothing() {
    // テスト項目: B が alpha から退出した後、A の送信は A にだけ届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    send_text(&mut bob, &join_envelope("alpha")).await;
    server.wait_for_members("alpha", 2).await;
    send_text(&mut bob, &leave_envelope("alpha")).await;
    server.wait_for_members("alpha", 1).await;

    // when (操作):
    send_text(&mut alice, DRAW_START).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut alice).await, DRAW_START);
    assert_silent(&mut bob).await;
}

#[tokio::test]
async fn test_abrupt_disconnect_is_purged_and_does_not_break_broadcast() {
    // テスト項目: leave せずに切断した A は purge され、以降のブロードキャストも失敗しない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    send_text(&mut bob, &join_envelope("alpha")).await;
    server.wait_for_members("alpha", 2).await;

    // when (操作): close フレームを送らずに接続を破棄
    drop(alice);
    server.wait_for_members("alpha", 1).await;
    let message = r#"{"back_type":"send_message","room":"alpha","type":"erase","stroke":7}"#;
    send_text(&mut bob, message).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut bob).await, message);
    assert_eq!(server.member_count("alpha").await, 1);
}

#[tokio::test]
async fn test_malformed_envelopes_do_not_disconnect_sender() {
    // テスト項目: 不正なエンベロープは無視され、送信者の接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    server.wait_for_members("alpha", 1).await;

    // when (操作):
    for garbage in [
        "not json",
        "[]",
        r#"{"back_type":"send_message"}"#,
        r#"{"back_type":"teleport","room":"alpha"}"#,
        r#"{"back_type":"join","room":{"nested":true}}"#,
    ] {
        send_text(&mut alice, garbage).await;
    }
    send_text(&mut alice, DRAW_START).await;

    // then (期待する結果): 不正な入力の後でも正常なブロードキャストが届く
    assert_eq!(recv_text(&mut alice).await, DRAW_START);
    assert_eq!(server.member_count("alpha").await, 1);
}

#[tokio::test]
async fn test_member_of_multiple_rooms_receives_from_each() {
    // テスト項目: 複数のルームに参加した接続は各ルームのブロードキャストを受け取る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    send_text(&mut alice, &join_envelope("beta")).await;
    send_text(&mut bob, &join_envelope("beta")).await;
    server.wait_for_members("alpha", 1).await;
    server.wait_for_members("beta", 2).await;

    // when (操作):
    let to_beta = r#"{"back_type":"send_message","room":"beta","type":"draw_end"}"#;
    send_text(&mut bob, to_beta).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut alice).await, to_beta);
    assert_eq!(recv_text(&mut bob).await, to_beta);
}

#[tokio::test]
async fn test_join_twice_delivers_once() {
    // テスト項目: 同じルームに 2 回参加しても配信は 1 回だけ
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    server.wait_for_members("alpha", 1).await;

    // when (操作):
    send_text(&mut alice, DRAW_START).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut alice).await, DRAW_START);
    assert_silent(&mut alice).await;
}

#[tokio::test]
async fn test_broadcast_to_empty_room_is_silent() {
    // テスト項目: 誰もいないルームへの送信は誰にも届かず、接続も維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;

    // when (操作):
    send_text(
        &mut alice,
        r#"{"back_type":"send_message","room":"nobody","type":"draw_start"}"#,
    )
    .await;

    // then (期待する結果):
    assert_silent(&mut alice).await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    server.wait_for_members("alpha", 1).await;
}

#[tokio::test]
async fn test_binary_utf8_frame_is_routed_as_text() {
    // テスト項目: UTF-8 の JSON を含むバイナリフレームもテキストとして中継される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    server.wait_for_members("alpha", 1).await;

    // when (操作):
    alice
        .send(Message::binary(DRAW_START.as_bytes().to_vec()))
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(recv_text(&mut alice).await, DRAW_START);
}

#[tokio::test]
async fn test_ws_path_is_accepted() {
    // テスト項目: /ws パスでも接続・中継できる
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = connect_async(server.ws_url("/ws")).await.unwrap();
    send_text(&mut alice, &join_envelope("alpha")).await;
    server.wait_for_members("alpha", 1).await;

    // when (操作):
    send_text(&mut alice, DRAW_START).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut alice).await, DRAW_START);
}

#[tokio::test]
async fn test_slow_peer_does_not_stall_fan_out() {
    // テスト項目: 受信しない相手がいても、送信者自身への配信は止まらず接続も維持される
    // given (前提条件): キュー容量 1、B は一切読み取らない
    let server = TestServer::start_with_capacity(1).await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    send_text(&mut alice, &join_envelope("alpha")).await;
    send_text(&mut bob, &join_envelope("alpha")).await;
    server.wait_for_members("alpha", 2).await;
    let blob = "x".repeat(200 * 1024);

    // when (操作): 200 KB のエンベロープを 60 回送る
    for seq in 0..60 {
        let message = serde_json::json!({
            "back_type": "send_message",
            "room": "alpha",
            "type": "draw_move",
            "seq": seq,
            "blob": blob,
        })
        .to_string();
        send_text(&mut alice, &message).await;

        // then (期待する結果): 毎回、送信者には自分のエンベロープが届く
        assert_eq!(recv_text(&mut alice).await, message);
    }

    // B は切断されずメンバーのまま
    assert_eq!(server.member_count("alpha").await, 2);
    drop(bob);
}
