use mockito::Matcher;
use quickbite::{
    fetch_detail, fetch_list, spawn_session, AppConfig, DetailView, DietaryType, FilterDimension,
    MealDbClient, QueryDescriptor, QuickBiteError, RecipeApi, RequestState,
    FETCH_FAILED_MESSAGE,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

const ARRABIATA_LOOKUP: &str = r#"{
    "meals": [{
        "idMeal": "52771",
        "strMeal": "Spicy Arrabiata Penne",
        "strDrinkAlternate": null,
        "strCategory": "Vegetarian",
        "strArea": "Italian",
        "strInstructions": "Bring a large pot of water to a boil.\r\nAdd the pasta.",
        "strMealThumb": "https://www.themealdb.com/images/media/meals/ustsqw1468250014.jpg",
        "strTags": "Pasta,Curry",
        "strIngredient1": "penne rigate",
        "strIngredient2": "olive oil",
        "strIngredient3": "garlic",
        "strIngredient4": "",
        "strMeasure1": "1 pound",
        "strMeasure2": "1/4 cup",
        "strMeasure3": "3 cloves",
        "strMeasure4": ""
    }]
}"#;

fn config_for(server: &mockito::Server) -> AppConfig {
    AppConfig {
        api_base_url: server.url(),
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_list_excludes_kuurdak() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"meals": [
                {"idMeal": "53069", "strMeal": "Kuurdak", "strMealThumb": "https://x/broken.jpg"},
                {"idMeal": "52768", "strMeal": "Apple Frangipan Tart", "strMealThumb": "https://x/tart.jpg"}
            ]}"#,
        )
        .create_async()
        .await;

    let config = config_for(&server);
    let api = MealDbClient::new(&config).unwrap();
    let state = fetch_list(&api, &config, QueryDescriptor::EmptySearch).await;

    match state {
        RequestState::Success(recipes) => {
            assert_eq!(recipes.len(), 1);
            assert_eq!(recipes[0].name, "Apple Frangipan Tart");
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_list_only_kuurdak_is_empty_success() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("a".into(), "Kyrgyz".into()))
        .with_status(200)
        .with_body(r#"{"meals": [{"idMeal": "53069", "strMeal": "Kuurdak", "strMealThumb": ""}]}"#)
        .create_async()
        .await;

    let config = config_for(&server);
    let api = MealDbClient::new(&config).unwrap();
    let state = fetch_list(&api, &config, QueryDescriptor::Cuisine("Kyrgyz".to_string())).await;

    assert_eq!(state, RequestState::Success(Vec::new()));
}

#[tokio::test]
async fn test_fetch_list_server_error_is_failed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "Dessert".into()))
        .with_status(503)
        .create_async()
        .await;

    let config = config_for(&server);
    let api = MealDbClient::new(&config).unwrap();
    let state = fetch_list(&api, &config, QueryDescriptor::Category("Dessert".to_string())).await;

    assert_eq!(state, RequestState::Failed(FETCH_FAILED_MESSAGE.to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_list_summary_missing_id_is_failed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "x".into()))
        .with_status(200)
        .with_body(r#"{"meals": [{"strMeal": "Nameless"}]}"#)
        .create_async()
        .await;

    let config = config_for(&server);
    let api = MealDbClient::new(&config).unwrap();
    let state = fetch_list(&api, &config, QueryDescriptor::Search("x".to_string())).await;

    assert_eq!(state, RequestState::Failed(FETCH_FAILED_MESSAGE.to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_missing_id_is_malformed_payload() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "x".into()))
        .with_status(200)
        .with_body(r#"{"meals": [{"strMeal": "Nameless"}]}"#)
        .create_async()
        .await;

    let api = MealDbClient::with_base_url(server.url()).unwrap();
    let result = api.list(&QueryDescriptor::Search("x".to_string())).await;
    assert!(
        matches!(result, Err(QuickBiteError::MalformedPayload(_))),
        "{:?}",
        result
    );
}

#[tokio::test]
async fn test_fetch_detail_loaded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "52771".into()))
        .with_status(200)
        .with_body(ARRABIATA_LOOKUP)
        .create_async()
        .await;

    let api = MealDbClient::with_base_url(server.url()).unwrap();
    let view = fetch_detail(&api, "52771").await;

    let detail = match view {
        DetailView::Loaded(detail) => detail,
        other => panic!("Expected loaded detail, got {:?}", other),
    };
    assert_eq!(detail.name, "Spicy Arrabiata Penne");
    assert_eq!(detail.dietary_type(), DietaryType::Veg);
    assert_eq!(
        detail.ingredient_lines(),
        vec!["1 pound penne rigate", "1/4 cup olive oil", "3 cloves garlic"]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_detail_unknown_id_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "0".into()))
        .with_status(200)
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;

    let api = MealDbClient::with_base_url(server.url()).unwrap();
    assert_eq!(fetch_detail(&api, "0").await, DetailView::NotFound);
}

#[tokio::test]
async fn test_fetch_detail_unreachable_is_not_found() {
    // Reserve a free port, then release it so connections are refused
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = MealDbClient::with_base_url(format!("http://{}", addr)).unwrap();
    assert_eq!(fetch_detail(&api, "52771").await, DetailView::NotFound);
}

#[tokio::test]
async fn test_session_filter_over_http() {
    let mut server = mockito::Server::new_async().await;
    let _default = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "".into()))
        .with_status(200)
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;
    let _seafood = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("c".into(), "Seafood".into()))
        .with_status(200)
        .with_body(
            r#"{"meals": [{"idMeal": "52959", "strMeal": "Baked salmon with fennel & tomatoes", "strMealThumb": "https://x/s.jpg"}]}"#,
        )
        .create_async()
        .await;

    let config = config_for(&server);
    let session = spawn_session(&config, Arc::new(MealDbClient::new(&config).unwrap()));
    let mut views = session.subscribe();

    timeout(
        Duration::from_secs(5),
        views.wait_for(|view| view.list == RequestState::Success(Vec::new())),
    )
    .await
    .expect("default listing timed out")
    .unwrap();

    session.toggle_filter(FilterDimension::Category, "Seafood");
    timeout(
        Duration::from_secs(5),
        views.wait_for(|view| view.list.recipes().len() == 1),
    )
    .await
    .expect("filtered listing timed out")
    .unwrap();

    assert_eq!(session.view().list.recipes()[0].id, "52959");
    session.shutdown().await;
}
