//! End-to-end pipeline tests: a mock page server on one side, a mock
//! OpenAI-compatible endpoint on the other, and the real pipeline between.

use recipe_import::config::{AppConfig, ProviderConfig};
use recipe_import::model::RecipeSource;
use recipe_import::pipelines;
use recipe_import::providers::OpenAIProvider;
use recipe_import::ImportError;

fn provider_for(server: &mockito::ServerGuard) -> OpenAIProvider {
    OpenAIProvider::new(&ProviderConfig {
        enabled: true,
        model: "gpt-4o-mini".to_string(),
        temperature: 0.7,
        max_tokens: 4096,
        api_key: Some("fake_api_key".to_string()),
        base_url: Some(server.url()),
    })
    .unwrap()
}

/// Chat-completions body whose content field carries the given recipe JSON
fn chat_response(recipe_json: &str) -> String {
    serde_json::to_string(&serde_json::json!({
        "choices": [{"message": {"content": recipe_json}}]
    }))
    .unwrap()
}

const PLAIN_PAGE: &str = r#"
<html><body>
<main>
    <h1>Grandma's Goulash</h1>
    <p>2 lbs beef, 1 onion, paprika.</p>
    <p>Brown the beef. Add onion and paprika. Simmer.</p>
</main>
</body></html>
"#;

#[tokio::test]
async fn test_fallback_path_end_to_end() {
    let mut page_server = mockito::Server::new_async().await;
    let page_mock = page_server
        .mock("GET", "/goulash")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;

    let mut llm_server = mockito::Server::new_async().await;
    // Fenced and trailing-comma'd output exercises the repair path too
    let llm_mock = llm_server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_response(
            "```json\n{\"title\": \"Grandma's Goulash\", \"servings\": 6, \"ingredients\": [{\"quantity\": 2, \"unit\": \"lbs\", \"item_name\": \"beef\"}], \"instructions\": [\"Brown the beef.\", \"Simmer.\"],}\n```",
        ))
        .create_async()
        .await;

    let provider = provider_for(&llm_server);
    let config = AppConfig::default();
    let url = format!("{}/goulash", page_server.url());

    let recipe = pipelines::url::process(&url, None, None, &provider, &config)
        .await
        .unwrap();

    assert_eq!(recipe.title, "Grandma's Goulash");
    assert_eq!(recipe.source, RecipeSource::UrlScrapeFallback);
    assert_eq!(recipe.original_import_url, Some(url));
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].unit, Some("lbs".to_string()));
    assert!(!recipe.recipe_id.is_empty());

    page_mock.assert_async().await;
    llm_mock.assert_async().await;
}

#[tokio::test]
async fn test_idempotent_resolution_modulo_recipe_id() {
    let mut page_server = mockito::Server::new_async().await;
    page_server
        .mock("GET", "/static")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(
            r#"<html><head><script type="application/ld+json">
            {"@type": "Recipe", "name": "Static Salad", "recipeIngredient": ["lettuce"]}
            </script></head><body></body></html>"#,
        )
        .expect(2)
        .create_async()
        .await;

    let mut llm_server = mockito::Server::new_async().await;
    let llm_mock = llm_server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let provider = provider_for(&llm_server);
    let config = AppConfig::default();
    let url = format!("{}/static", page_server.url());

    let first = pipelines::url::process(&url, None, None, &provider, &config)
        .await
        .unwrap();
    let second = pipelines::url::process(&url, None, None, &provider, &config)
        .await
        .unwrap();

    // Fresh id each resolution, everything else identical
    assert_ne!(first.recipe_id, second.recipe_id);
    let mut second_with_first_id = second.clone();
    second_with_first_id.recipe_id = first.recipe_id.clone();
    assert_eq!(first, second_with_first_id);

    llm_mock.assert_async().await;
}

#[tokio::test]
async fn test_ai_service_failure_propagates() {
    let mut page_server = mockito::Server::new_async().await;
    page_server
        .mock("GET", "/goulash")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;

    let mut llm_server = mockito::Server::new_async().await;
    llm_server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let provider = provider_for(&llm_server);
    let config = AppConfig::default();
    let url = format!("{}/goulash", page_server.url());

    let err = pipelines::url::process(&url, None, None, &provider, &config)
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::AiServiceFailed(_)));
}

#[tokio::test]
async fn test_user_instructions_reach_the_model_and_the_record() {
    let mut page_server = mockito::Server::new_async().await;
    page_server
        .mock("GET", "/goulash")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(PLAIN_PAGE)
        .create_async()
        .await;

    let mut llm_server = mockito::Server::new_async().await;
    let llm_mock = llm_server
        .mock("POST", "/v1/chat/completions")
        .match_body(mockito::Matcher::Regex("make it vegetarian".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_response(r#"{"title": "Veggie Goulash", "instructions": ["Simmer."]}"#))
        .create_async()
        .await;

    let provider = provider_for(&llm_server);
    let config = AppConfig::default();
    let url = format!("{}/goulash", page_server.url());

    let recipe = pipelines::url::process(
        &url,
        Some("make it vegetarian"),
        None,
        &provider,
        &config,
    )
    .await
    .unwrap();

    assert_eq!(
        recipe.user_modification_instructions,
        Some("make it vegetarian".to_string())
    );
    llm_mock.assert_async().await;
}

#[tokio::test]
async fn test_text_prompt_pipeline() {
    let mut llm_server = mockito::Server::new_async().await;
    llm_server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(chat_response(
            r#"{"title": "Weeknight Dal", "servings": "4 people", "instructions": ["Simmer lentils."]}"#,
        ))
        .create_async()
        .await;

    let provider = provider_for(&llm_server);
    let config = AppConfig::default();

    let recipe = pipelines::text::process("an easy dal for weeknights", &provider, &config)
        .await
        .unwrap();

    assert_eq!(recipe.title, "Weeknight Dal");
    assert_eq!(recipe.source, RecipeSource::TextPrompt);
}
