mod common;

use std::collections::HashSet;
use std::time::Duration;

use common::{TestServer, get_state, wait_for_run_complete};
use serde_json::json;

#[tokio::test]
async fn default_state_has_minimum_roster_and_full_pool() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let state = get_state(&client, &server).await;
    assert_eq!(state["mode"], "single");
    assert_eq!(state["phase"], "idle");
    assert_eq!(state["allow_duplicate"], true);
    assert_eq!(state["players"].as_array().unwrap().len(), 2);
    assert_eq!(state["active_weapons"].as_array().unwrap().len(), 14);
    for p in state["players"].as_array().unwrap() {
        assert_eq!(p["revealed"], true);
        assert!(p["weapon"].is_null());
        assert_eq!(p["rerolls_left"], 1);
    }
}

#[tokio::test]
async fn catalog_is_served() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let catalog: serde_json::Value = client
        .get(server.url("/catalog"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(catalog["weapons"].as_array().unwrap().len(), 14);
    assert_eq!(catalog["challenges"].as_array().unwrap().len(), 46);
    assert_eq!(catalog["weapons"][0]["name"], "大剑");
}

#[tokio::test]
async fn roster_bounds_are_enforced_over_http() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    // Grow to four players.
    for name in ["玩家3", "玩家4"] {
        let resp = client
            .post(server.url("/players"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }
    // A fifth is rejected.
    let resp = client
        .post(server.url("/players"))
        .json(&json!({ "name": "玩家5" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    // Shrink back to two.
    let state = get_state(&client, &server).await;
    let ids: Vec<u64> = state["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect();
    for id in &ids[2..] {
        let resp = client
            .delete(server.url(&format!("/players/{id}")))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
    }
    // Dropping below two is rejected.
    let resp = client
        .delete(server.url(&format!("/players/{}", ids[0])))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    // Unknown player is a 404.
    let resp = client
        .delete(server.url("/players/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn rename_player_roundtrip() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let state = get_state(&client, &server).await;
    let id = state["players"][0]["id"].as_u64().unwrap();

    let resp = client
        .patch(server.url(&format!("/players/{id}")))
        .json(&json!({ "name": "队长" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let state = get_state(&client, &server).await;
    assert_eq!(state["players"][0]["name"], "队长");

    // Empty names are rejected, unknown players are 404.
    let resp = client
        .patch(server.url(&format!("/players/{id}")))
        .json(&json!({ "name": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let resp = client
        .patch(server.url("/players/9999"))
        .json(&json!({ "name": "鬼" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn assignment_rejected_when_pool_too_small() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(server.url("/policy"))
        .json(&json!({ "allow_duplicate": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    let resp = client
        .put(server.url("/pool"))
        .json(&json!({ "weapons": ["大剑"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .post(server.url("/assignment"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains('2'));

    // Nothing was assigned.
    let state = get_state(&client, &server).await;
    assert_eq!(state["phase"], "idle");
    for p in state["players"].as_array().unwrap() {
        assert!(p["weapon"].is_null());
    }
}

#[tokio::test]
async fn full_assignment_run_assigns_distinct_weapons() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    client
        .put(server.url("/policy"))
        .json(&json!({ "allow_duplicate": false }))
        .send()
        .await
        .unwrap();
    client
        .post(server.url("/players"))
        .json(&json!({ "name": "玩家3" }))
        .send()
        .await
        .unwrap();

    let resp = client
        .post(server.url("/assignment"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 202);

    let state = wait_for_run_complete(&client, &server, 200).await;
    let players = state["players"].as_array().unwrap();
    assert_eq!(players.len(), 3);
    let names: HashSet<&str> = players
        .iter()
        .map(|p| p["weapon"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 3, "distinct policy holds over HTTP");
    for p in players {
        assert!(p["challenge"].is_string());
        assert_eq!(p["rerolls_left"], 1);
    }
}

#[tokio::test]
async fn reroll_consumes_credit_then_noops() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    client
        .post(server.url("/assignment"))
        .send()
        .await
        .unwrap();
    let state = wait_for_run_complete(&client, &server, 200).await;
    let id = state["players"][0]["id"].as_u64().unwrap();

    let resp = client
        .post(server.url(&format!("/players/{id}/reroll")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    let state = get_state(&client, &server).await;
    assert_eq!(state["players"][0]["rerolls_left"], 0);
    let weapon_after_first = state["players"][0]["weapon"]["name"].clone();

    // Exhausted credits: accepted but a no-op.
    let resp = client
        .post(server.url(&format!("/players/{id}/reroll")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    let state = get_state(&client, &server).await;
    assert_eq!(state["players"][0]["rerolls_left"], 0);
    assert_eq!(state["players"][0]["weapon"]["name"], weapon_after_first);
}

#[tokio::test]
async fn second_assignment_rejected_while_running() {
    let server = TestServer::with_reveal_delay(10_000).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(server.url("/assignment"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 202);

    // Wait until the run has actually entered the Assigning phase.
    let mut saw_assigning = false;
    for _ in 0..100 {
        if get_state(&client, &server).await["phase"] == "assigning" {
            saw_assigning = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(saw_assigning);

    let resp = client
        .post(server.url("/assignment"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn spin_resolves_from_active_pool() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    client
        .put(server.url("/pool"))
        .json(&json!({ "weapons": ["大剑", "太刀", "片手剑"] }))
        .send()
        .await
        .unwrap();

    let resp = client.post(server.url("/spin")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let outcome: serde_json::Value = resp.json().await.unwrap();
    let name = outcome["weapon"]["name"].as_str().unwrap();
    assert!(["大剑", "太刀", "片手剑"].contains(&name));

    // One active weapon is not enough to spin.
    client
        .put(server.url("/pool"))
        .json(&json!({ "weapons": ["大剑"] }))
        .send()
        .await
        .unwrap();
    let resp = client.post(server.url("/spin")).send().await.unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn sse_stream_reports_mutations() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let mut resp = client
        .get(server.url("/state/stream"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let state = get_state(&client, &server).await;
    let id = state["players"][0]["id"].as_u64().unwrap();
    client
        .patch(server.url(&format!("/players/{id}")))
        .json(&json!({ "name": "观察者" }))
        .send()
        .await
        .unwrap();

    let mut seen = String::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    loop {
        let chunk = tokio::time::timeout_at(deadline, resp.chunk())
            .await
            .expect("timed out waiting for SSE data")
            .unwrap();
        let Some(chunk) = chunk else {
            panic!("SSE stream closed early");
        };
        seen.push_str(&String::from_utf8_lossy(&chunk));
        if seen.contains("player_renamed") {
            break;
        }
    }
}
