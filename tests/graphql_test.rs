//! GraphQL schema tests
//!
//! Runs queries, mutations and subscriptions directly against the schema

use std::time::Duration;

use anyhow::Result;
use async_graphql::{Request, Response, Value as GqlValue};
use futures_util::StreamExt;
use hackernews::auth::{AuthSettings, BearerToken};
use hackernews::database::{establish_connection, setup_database};
use hackernews::events::{EventBus, Topic};
use hackernews::graphql::{build_schema, GraphQLContext, HackernewsSchema};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

const TEST_SECRET: &str = "graphql-test-secret";

struct TestApi {
    schema: HackernewsSchema,
    events: EventBus,
    _temp_file: NamedTempFile,
}

async fn setup_schema() -> Result<TestApi> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = establish_connection(&db_url).await?;
    setup_database(&db).await?;

    let settings = AuthSettings::new(TEST_SECRET).with_bcrypt_cost(4);
    let events = EventBus::default();
    let schema = build_schema(GraphQLContext::new(db, settings, events.clone()));

    Ok(TestApi {
        schema,
        events,
        _temp_file: temp_file,
    })
}

async fn execute(api: &TestApi, query: &str, token: Option<&str>) -> Response {
    let mut request = Request::new(query);
    if let Some(token) = token {
        request = request.data(BearerToken(token.to_string()));
    }
    api.schema.execute(request).await
}

fn data(response: Response) -> Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

fn error_code(response: &Response) -> Option<String> {
    let extensions = response.errors.first()?.extensions.as_ref()?;
    match extensions.get("code")? {
        GqlValue::String(code) => Some(code.clone()),
        _ => None,
    }
}

/// Sign up a user and return their token and id
async fn signup(api: &TestApi, name: &str, email: &str) -> (String, String) {
    let query = format!(
        r#"mutation {{ signup(email: "{}", password: "hunter2", name: "{}") {{ token user {{ id }} }} }}"#,
        email, name
    );
    let body = data(execute(api, &query, None).await);
    (
        body["signup"]["token"].as_str().unwrap().to_string(),
        body["signup"]["user"]["id"].as_str().unwrap().to_string(),
    )
}

async fn post_link(api: &TestApi, token: &str, url: &str, description: &str) -> String {
    let query = format!(
        r#"mutation {{ post(url: "{}", description: "{}") {{ id }} }}"#,
        url, description
    );
    let body = data(execute(api, &query, Some(token)).await);
    body["post"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_info() -> Result<()> {
    let api = setup_schema().await?;

    let body = data(execute(&api, "{ info }", None).await);
    assert_eq!(body, json!({ "info": "This is the API of a Hackernews Clone" }));

    Ok(())
}

#[tokio::test]
async fn test_signup_and_login() -> Result<()> {
    let api = setup_schema().await?;
    let (token, user_id) = signup(&api, "Alice", "alice@example.com").await;
    assert!(!token.is_empty());

    let body = data(
        execute(
            &api,
            r#"mutation { login(email: "alice@example.com", password: "hunter2") { token user { id name email } } }"#,
            None,
        )
        .await,
    );
    assert_eq!(body["login"]["user"]["id"], user_id);
    assert_eq!(body["login"]["user"]["name"], "Alice");
    assert!(body["login"]["token"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_login_errors() -> Result<()> {
    let api = setup_schema().await?;
    signup(&api, "Alice", "alice@example.com").await;

    let response = execute(
        &api,
        r#"mutation { login(email: "nobody@example.com", password: "hunter2") { token } }"#,
        None,
    )
    .await;
    assert_eq!(
        response.errors[0].message,
        "No user found for email nobody@example.com"
    );

    let response = execute(
        &api,
        r#"mutation { login(email: "alice@example.com", password: "wrong") { token } }"#,
        None,
    )
    .await;
    assert_eq!(response.errors[0].message, "Invalid password");
    assert_eq!(error_code(&response).as_deref(), Some("INVALID_PASSWORD"));

    Ok(())
}

#[tokio::test]
async fn test_duplicate_signup_is_a_conflict() -> Result<()> {
    let api = setup_schema().await?;
    signup(&api, "Alice", "alice@example.com").await;

    let response = execute(
        &api,
        r#"mutation { signup(email: "alice@example.com", password: "other", name: "Eve") { token } }"#,
        None,
    )
    .await;
    assert_eq!(error_code(&response).as_deref(), Some("CONFLICT"));

    Ok(())
}

#[tokio::test]
async fn test_post_requires_authentication() -> Result<()> {
    let api = setup_schema().await?;

    let query = r#"mutation { post(url: "https://example.com", description: "Example") { id } }"#;

    let response = execute(&api, query, None).await;
    assert_eq!(response.errors[0].message, "Not authenticated");
    assert_eq!(error_code(&response).as_deref(), Some("UNAUTHENTICATED"));

    let response = execute(&api, query, Some("not-a-token")).await;
    assert_eq!(error_code(&response).as_deref(), Some("INVALID_TOKEN"));

    Ok(())
}

#[tokio::test]
async fn test_post_and_resolve_relations() -> Result<()> {
    let api = setup_schema().await?;
    let (token, user_id) = signup(&api, "Alice", "alice@example.com").await;
    let link_id = post_link(&api, &token, "https://example.com", "Example").await;

    let query = format!(
        r#"{{ link(id: "{}") {{ id url description createdAt postedBy {{ id name links {{ id }} }} votes {{ id }} }} }}"#,
        link_id
    );
    let body = data(execute(&api, &query, None).await);
    let link = &body["link"];

    assert_eq!(link["url"], "https://example.com");
    assert_eq!(link["description"], "Example");
    assert!(link["createdAt"].is_string());
    assert_eq!(link["postedBy"]["id"], user_id);
    assert_eq!(link["postedBy"]["links"], json!([{ "id": link_id }]));
    assert_eq!(link["votes"], json!([]));

    Ok(())
}

#[tokio::test]
async fn test_create_link_is_an_alias_of_post() -> Result<()> {
    let api = setup_schema().await?;
    let (token, _) = signup(&api, "Alice", "alice@example.com").await;

    let body = data(
        execute(
            &api,
            r#"mutation { createLink(url: "https://example.com", description: "Example") { url postedBy { name } } }"#,
            Some(&token),
        )
        .await,
    );
    assert_eq!(body["createLink"]["postedBy"]["name"], "Alice");

    Ok(())
}

#[tokio::test]
async fn test_link_lookup() -> Result<()> {
    let api = setup_schema().await?;

    let body = data(execute(&api, r#"{ link(id: "999") { id } }"#, None).await);
    assert_eq!(body["link"], Value::Null);

    let response = execute(&api, r#"{ link(id: "abc") { id } }"#, None).await;
    assert_eq!(error_code(&response).as_deref(), Some("BAD_REQUEST"));

    Ok(())
}

#[tokio::test]
async fn test_feed_filter_order_and_paging() -> Result<()> {
    let api = setup_schema().await?;
    let (token, _) = signup(&api, "Alice", "alice@example.com").await;
    post_link(&api, &token, "https://rust-lang.org", "Rust language").await;
    post_link(&api, &token, "https://graphql.org", "GraphQL spec").await;
    post_link(&api, &token, "https://tokio.rs", "Async runtime for Rust").await;

    let body = data(execute(&api, "{ feed { count links { url } } }", None).await);
    assert_eq!(body["feed"]["count"], 3);
    assert_eq!(body["feed"]["links"][0]["url"], "https://rust-lang.org");

    let body = data(
        execute(
            &api,
            r#"{ feed(filter: "rust") { count links { description } } }"#,
            None,
        )
        .await,
    );
    // The filter narrows the links but count stays the total
    assert_eq!(body["feed"]["count"], 3);
    assert_eq!(body["feed"]["links"].as_array().map(Vec::len), Some(2));

    let body = data(
        execute(
            &api,
            "{ feed(orderBy: description_DESC, skip: 1, first: 1) { count links { description } } }",
            None,
        )
        .await,
    );
    assert_eq!(body["feed"]["count"], 3);
    assert_eq!(
        body["feed"]["links"],
        json!([{ "description": "GraphQL spec" }])
    );

    let response = execute(&api, "{ feed(first: -1) { count } }", None).await;
    assert_eq!(error_code(&response).as_deref(), Some("VALIDATION_FAILED"));

    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_link() -> Result<()> {
    let api = setup_schema().await?;
    let (token, _) = signup(&api, "Alice", "alice@example.com").await;
    let link_id = post_link(&api, &token, "https://example.com", "Example").await;

    let query = format!(
        r#"mutation {{ updateLink(id: "{}", description: "Updated") {{ url description }} }}"#,
        link_id
    );
    let body = data(execute(&api, &query, None).await);
    assert_eq!(
        body["updateLink"],
        json!({ "url": "https://example.com", "description": "Updated" })
    );

    let query = format!(r#"mutation {{ deleteLink(id: "{}") {{ id }} }}"#, link_id);
    let body = data(execute(&api, &query, None).await);
    assert_eq!(body["deleteLink"]["id"], link_id);

    let response = execute(&api, &query, None).await;
    assert_eq!(error_code(&response).as_deref(), Some("NOT_FOUND"));

    Ok(())
}

#[tokio::test]
async fn test_vote_once_per_link() -> Result<()> {
    let api = setup_schema().await?;
    let (token, user_id) = signup(&api, "Alice", "alice@example.com").await;
    let link_id = post_link(&api, &token, "https://example.com", "Example").await;

    let query = format!(
        r#"mutation {{ vote(linkId: "{}") {{ id link {{ id }} user {{ id }} }} }}"#,
        link_id
    );

    let body = data(execute(&api, &query, Some(&token)).await);
    assert_eq!(body["vote"]["link"]["id"], link_id);
    assert_eq!(body["vote"]["user"]["id"], user_id);

    let response = execute(&api, &query, Some(&token)).await;
    assert_eq!(
        response.errors[0].message,
        format!("Already voted for link: {}", link_id)
    );
    assert_eq!(error_code(&response).as_deref(), Some("ALREADY_VOTED"));

    // A different user can still vote
    let (other_token, _) = signup(&api, "Bob", "bob@example.com").await;
    data(execute(&api, &query, Some(&other_token)).await);

    let query = format!(r#"{{ link(id: "{}") {{ votes {{ user {{ name }} }} }} }}"#, link_id);
    let body = data(execute(&api, &query, None).await);
    assert_eq!(body["link"]["votes"].as_array().map(Vec::len), Some(2));

    Ok(())
}

#[tokio::test]
async fn test_vote_on_missing_link() -> Result<()> {
    let api = setup_schema().await?;
    let (token, _) = signup(&api, "Alice", "alice@example.com").await;

    let response = execute(&api, r#"mutation { vote(linkId: "42") { id } }"#, Some(&token)).await;
    assert_eq!(error_code(&response).as_deref(), Some("NOT_FOUND"));

    Ok(())
}

async fn wait_for_subscriber(events: &EventBus, topic: Topic) {
    for _ in 0..100 {
        if events.subscriber_count(topic).await > 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("subscription to {:?} never started", topic);
}

#[tokio::test]
async fn test_new_link_subscription() -> Result<()> {
    let api = setup_schema().await?;
    let (token, _) = signup(&api, "Alice", "alice@example.com").await;

    let mut stream = api
        .schema
        .execute_stream("subscription { newLink { url postedBy { name } } }");
    let next = tokio::spawn(async move { stream.next().await });

    wait_for_subscriber(&api.events, Topic::NewLink).await;
    post_link(&api, &token, "https://example.com", "Example").await;

    let response = tokio::time::timeout(Duration::from_secs(5), next).await??;
    let body = data(response.expect("subscription ended"));
    assert_eq!(
        body["newLink"],
        json!({ "url": "https://example.com", "postedBy": { "name": "Alice" } })
    );

    Ok(())
}

#[tokio::test]
async fn test_new_vote_subscription() -> Result<()> {
    let api = setup_schema().await?;
    let (token, _) = signup(&api, "Alice", "alice@example.com").await;
    let link_id = post_link(&api, &token, "https://example.com", "Example").await;

    let mut stream = api
        .schema
        .execute_stream("subscription { newVote { link { id } user { name } } }");
    let next = tokio::spawn(async move { stream.next().await });

    wait_for_subscriber(&api.events, Topic::NewVote).await;
    let query = format!(r#"mutation {{ vote(linkId: "{}") {{ id }} }}"#, link_id);
    data(execute(&api, &query, Some(&token)).await);

    let response = tokio::time::timeout(Duration::from_secs(5), next).await??;
    let body = data(response.expect("subscription ended"));
    assert_eq!(body["newVote"]["link"]["id"], link_id);
    assert_eq!(body["newVote"]["user"]["name"], "Alice");

    Ok(())
}
