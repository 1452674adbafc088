// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Connected loopback socket pair: (server side, client side).
async fn socket_pair() -> (TcpStream, TcpStream) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (accepted, connected) = tokio::join!(listener.accept(), TcpStream::connect(addr));
    (accepted.expect("accept").0, connected.expect("connect"))
}

async fn handle_for(name: &str) -> (ClientHandle, TcpStream) {
    let (server, client) = socket_pair().await;
    let (_read, write) = server.into_split();
    (ClientHandle::new(name.to_owned(), write), client)
}

#[tokio::test]
async fn send_line_appends_newline() {
    let (handle, client) = handle_for("Alice").await;

    handle.send_line("Server Reply: noted").await.expect("send");

    let mut lines = BufReader::new(client).lines();
    let line = lines.next_line().await.expect("read").expect("line");
    assert_eq!(line, "Server Reply: noted");
}

#[tokio::test]
async fn insert_get_remove() {
    let registry = ClientRegistry::new();
    let (handle, _client) = handle_for("Alice").await;

    registry.insert("10.0.0.5:4411", handle).await;
    assert_eq!(registry.len().await, 1);

    let found = registry.get("10.0.0.5:4411").await.expect("present");
    assert_eq!(found.name, "Alice");

    registry.remove("10.0.0.5:4411").await;
    assert!(registry.get("10.0.0.5:4411").await.is_none());
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn remove_absent_key_is_noop() {
    let registry = ClientRegistry::new();
    registry.remove("never-registered").await;
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn get_absent_key_returns_none() {
    let registry = ClientRegistry::new();
    assert!(registry.get("10.0.0.5:4411").await.is_none());
}

#[tokio::test]
async fn insert_overwrites_same_key() {
    let registry = ClientRegistry::new();
    let (first, _c1) = handle_for("Old").await;
    let (second, _c2) = handle_for("New").await;

    registry.insert("k", first).await;
    registry.insert("k", second).await;

    assert_eq!(registry.len().await, 1);
    assert_eq!(registry.get("k").await.expect("present").name, "New");
}

#[tokio::test]
async fn keys_lists_registered_clients() {
    let registry = ClientRegistry::new();
    let (a, _ca) = handle_for("A").await;
    let (b, _cb) = handle_for("B").await;
    registry.insert("1.1.1.1:1", a).await;
    registry.insert("2.2.2.2:2", b).await;

    let mut keys = registry.keys().await;
    keys.sort();
    assert_eq!(keys, vec!["1.1.1.1:1".to_owned(), "2.2.2.2:2".to_owned()]);
}

#[tokio::test]
async fn concurrent_insert_and_remove_leaves_registry_empty() {
    let registry = ClientRegistry::new();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move {
            let key = format!("127.0.0.1:{}", 40000 + i);
            let (handle, _client) = handle_for(&format!("client-{i}")).await;
            registry.insert(key.clone(), handle).await;
            assert!(registry.get(&key).await.is_some());
            registry.remove(&key).await;
        }));
    }
    for task in tasks {
        task.await.expect("task");
    }

    assert!(registry.is_empty().await);
}
