//! Location ownership, invitations, and membership over HTTP.

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_invite_join_lifecycle() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let guest = app.user("guest").await;
    let location = app.location(&owner, "Living Room").await;
    let location_uri = format!("/api/locations/{location}");

    let before = app
        .api(Method::GET, &location_uri, Some(&guest.access_token), None)
        .await;
    assert_eq!(before.status, StatusCode::FORBIDDEN);

    let invited = app
        .api(
            Method::POST,
            &format!("{location_uri}/invites"),
            Some(&owner.access_token),
            Some(json!({ "user_id": guest.id })),
        )
        .await;
    assert_eq!(invited.status, StatusCode::CREATED, "{}", invited.text);

    let pending = app
        .api(
            Method::GET,
            &format!("/api/users/{}/invites", guest.id),
            Some(&guest.access_token),
            None,
        )
        .await;
    assert_eq!(pending.json().as_array().unwrap().len(), 1);
    assert_eq!(pending.json()[0]["location_id"], location);

    let still_locked = app
        .api(Method::GET, &location_uri, Some(&guest.access_token), None)
        .await;
    assert_eq!(still_locked.status, StatusCode::FORBIDDEN);

    let joined = app
        .api(
            Method::POST,
            &format!("{location_uri}/members"),
            Some(&guest.access_token),
            None,
        )
        .await;
    assert_eq!(joined.status, StatusCode::CREATED, "{}", joined.text);
    assert_eq!(joined.json()["user_id"], guest.id);

    let after = app
        .api(Method::GET, &location_uri, Some(&guest.access_token), None)
        .await;
    assert_eq!(after.status, StatusCode::OK);

    let invites = app
        .api(
            Method::GET,
            &format!("{location_uri}/invites"),
            Some(&owner.access_token),
            None,
        )
        .await;
    assert_eq!(invites.json(), json!([]));

    let members = app
        .api(
            Method::GET,
            &format!("{location_uri}/members"),
            Some(&owner.access_token),
            None,
        )
        .await;
    assert_eq!(members.json().as_array().unwrap().len(), 2);

    let rejoin = app
        .api(
            Method::POST,
            &format!("{location_uri}/members"),
            Some(&guest.access_token),
            None,
        )
        .await;
    assert_eq!(rejoin.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_member_lists_are_owner_only() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let member = app.user("member").await;
    let location = app.location(&owner, "Office").await;

    let added = app
        .api(
            Method::POST,
            &format!("/api/locations/{location}/members"),
            Some(&owner.access_token),
            Some(json!({ "user_id": member.id })),
        )
        .await;
    assert_eq!(added.status, StatusCode::CREATED);

    for path in ["members", "invites"] {
        let response = app
            .api(
                Method::GET,
                &format!("/api/locations/{location}/{path}"),
                Some(&member.access_token),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{path}");
    }
}

#[tokio::test]
async fn test_removing_members() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let first = app.user("first").await;
    let second = app.user("second").await;
    let location = app.location(&owner, "Basement").await;

    for user in [&first, &second] {
        app.api(
            Method::POST,
            &format!("/api/locations/{location}/members"),
            Some(&owner.access_token),
            Some(json!({ "user_id": user.id })),
        )
        .await;
    }

    let not_allowed = app
        .api(
            Method::DELETE,
            &format!("/api/locations/{location}/members/{}", second.id),
            Some(&first.access_token),
            None,
        )
        .await;
    assert_eq!(not_allowed.status, StatusCode::FORBIDDEN);

    let leave = app
        .api(
            Method::DELETE,
            &format!("/api/locations/{location}/members/{}", first.id),
            Some(&first.access_token),
            None,
        )
        .await;
    assert_eq!(leave.status, StatusCode::NO_CONTENT);

    let kicked = app
        .api(
            Method::DELETE,
            &format!("/api/locations/{location}/members/{}", second.id),
            Some(&owner.access_token),
            None,
        )
        .await;
    assert_eq!(kicked.status, StatusCode::NO_CONTENT);

    let gone = app
        .api(
            Method::DELETE,
            &format!("/api/locations/{location}/members/{}", second.id),
            Some(&owner.access_token),
            None,
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invited_user_can_decline() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let guest = app.user("guest").await;
    let location = app.location(&owner, "Garage").await;

    app.api(
        Method::POST,
        &format!("/api/locations/{location}/invites"),
        Some(&owner.access_token),
        Some(json!({ "user_id": guest.id })),
    )
    .await;

    let declined = app
        .api(
            Method::DELETE,
            &format!("/api/locations/{location}/invites/{}", guest.id),
            Some(&guest.access_token),
            None,
        )
        .await;
    assert_eq!(declined.status, StatusCode::NO_CONTENT);

    let join = app
        .api(
            Method::POST,
            &format!("/api/locations/{location}/members"),
            Some(&guest.access_token),
            None,
        )
        .await;
    assert_eq!(join.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_location_and_user() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let location = app.location(&owner, "Attic").await;

    let no_location = app
        .api(
            Method::GET,
            &format!("/api/locations/{}/members", Uuid::new_v4()),
            Some(&owner.access_token),
            None,
        )
        .await;
    assert_eq!(no_location.status, StatusCode::NOT_FOUND);

    let no_user = app
        .api(
            Method::POST,
            &format!("/api/locations/{location}/invites"),
            Some(&owner.access_token),
            Some(json!({ "user_id": Uuid::new_v4() })),
        )
        .await;
    assert_eq!(no_user.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owned_location_search_is_self_only() {
    let app = TestApp::new();
    let owner = app.user("owner").await;
    let other = app.user("other").await;
    app.location(&owner, "Study").await;

    let own = app
        .api(
            Method::GET,
            &format!("/api/search/locations?owner_id={}", owner.id),
            Some(&owner.access_token),
            None,
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.json()[0]["name"], "Study");

    let foreign = app
        .api(
            Method::GET,
            &format!("/api/search/locations?owner_id={}", owner.id),
            Some(&other.access_token),
            None,
        )
        .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);

    let joined = app
        .api(Method::GET, "/api/locations", Some(&owner.access_token), None)
        .await;
    assert_eq!(joined.json()[0]["location_name"], "Study");
}
