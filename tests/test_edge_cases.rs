//! Edge cases collected from real model output and real pages.

use recipe_import::config::RecipeDefaults;
use recipe_import::json_repair::{extract_json_from_text, scrub_and_parse};
use recipe_import::model::{Recipe, RecipeSource};
use recipe_import::{extractors, schema_convert, ImportError};
use scraper::Html;
use serde_json::json;

#[test]
fn test_fenced_output_with_prose_preamble() {
    let raw = "Of course! Here is the recipe in the requested format:\n\n```json\n{\n  \"title\": \"Miso Soup\",\n  \"servings\": 2\n}\n```\n\nLet me know if you need anything else.";
    let value = extract_json_from_text(raw).unwrap();
    assert_eq!(value["title"], "Miso Soup");
}

#[test]
fn test_python_repl_style_output() {
    let raw = r#"{"title": "Leftover Surprise", "calories": None, "isPublic": False, "tipsAndVariations": None}"#;
    let value = scrub_and_parse(raw).unwrap();
    assert_eq!(value["calories"], serde_json::Value::Null);
    assert_eq!(value["isPublic"], json!(false));
}

#[test]
fn test_commented_output_with_trailing_commas() {
    let raw = r#"{
        "title": "Annotated Stew", // the model likes to explain itself
        "ingredients": [
            {"quantity": 1, "unit": null, "item_name": "carrot"},
        ],
    }"#;
    let value = scrub_and_parse(raw).unwrap();
    assert_eq!(value["title"], "Annotated Stew");
    assert_eq!(value["ingredients"][0]["item_name"], "carrot");
}

#[test]
fn test_refusal_text_is_no_json_found() {
    let raw = "I'm sorry, but the page you provided does not appear to contain a recipe.";
    let err = extract_json_from_text(raw).unwrap_err();
    assert!(matches!(err, ImportError::NoJsonFound));
}

#[test]
fn test_truncated_output_is_malformed_not_a_panic() {
    // Model hit its token limit mid-object
    let raw = r#"{"title": "Cut Short", "ingredients": [{"quantity": 1, "unit""#;
    let err = extract_json_from_text(raw).unwrap_err();
    assert!(matches!(err, ImportError::MalformedOutput { .. } | ImportError::NoJsonFound));
}

#[test]
fn test_llm_record_with_string_quantities() {
    let value = json!({
        "title": "Loose Types",
        "ingredients": [
            {"quantity": "2", "unit": "cups", "item_name": "flour"},
            {"quantity": "a splash", "unit": "", "item_name": "milk"}
        ]
    });
    let recipe = Recipe::from_llm_value(
        &value,
        RecipeSource::UrlScrapeFallback,
        &RecipeDefaults::default(),
    );

    assert_eq!(recipe.ingredients[0].quantity, Some(2.0));
    // Unparseable quantity degrades to null, empty unit to null
    assert_eq!(recipe.ingredients[1].quantity, None);
    assert_eq!(recipe.ingredients[1].unit, None);
    assert_eq!(recipe.ingredients[1].item_name, "milk");
}

#[test]
fn test_schema_candidate_with_wrong_shapes() {
    // Everything is the wrong type; conversion must still produce a record
    let data = json!({
        "@type": "Recipe",
        "name": 42,
        "recipeYield": {"weird": true},
        "recipeIngredient": [1, 2, 3],
        "recipeInstructions": 9000,
        "image": {"nested": "object"},
        "nutrition": "not an object"
    });
    let recipe = schema_convert::convert(
        data.as_object().unwrap(),
        "https://example.com",
        &RecipeDefaults::default(),
    );

    assert_eq!(recipe.title, "Untitled Recipe");
    assert!(recipe.ingredients.is_empty());
    assert!(recipe.instructions.is_empty());
    assert_eq!(recipe.image_url, None);
    assert_eq!(recipe.calories, None);
}

#[test]
fn test_empty_json_ld_script_blocks() {
    let page = r#"
    <html><head>
    <script type="application/ld+json"></script>
    <script type="application/ld+json">   </script>
    </head><body></body></html>
    "#;
    let document = Html::parse_document(page);
    assert!(extractors::locate(&document).is_none());
}

#[test]
fn test_unicode_heavy_page() {
    let page = r#"
    <html><head>
    <script type="application/ld+json">
    {
        "@type": "Recipe",
        "name": "Crème Brûlée",
        "recipeIngredient": ["500 ml crème fraîche", "6 œufs"]
    }
    </script>
    </head><body></body></html>
    "#;
    let document = Html::parse_document(page);
    let candidate = extractors::locate(&document).unwrap();
    let recipe = schema_convert::convert(
        &candidate,
        "https://example.com",
        &RecipeDefaults::default(),
    );
    assert_eq!(recipe.title, "Crème Brûlée");
    assert_eq!(recipe.ingredients[1].item_name, "6 œufs");
}
