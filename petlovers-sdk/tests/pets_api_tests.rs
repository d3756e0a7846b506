use petlovers_core::domain::{PetCategory, PetId, PetUpdate};
use petlovers_core::error::FetchError;
use petlovers_core::listing::{Completion, ListingPhase};
use petlovers_sdk::{AvailablePetsQuery, PetLoversClient, SdkConfig, SdkError};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pet_json(n: u32) -> Value {
    json!({
        "_id": format!("pet{}", n),
        "petName": format!("Pet {}", n),
        "petAge": n,
        "petCategory": "Cat",
        "petLocation": "Dhaka",
        "petImage": format!("https://i.ibb.co/{}.jpg", n),
        "shortDescription": "Sweet",
        "longDescription": "<p>Sweet</p>"
    })
}

fn pets_json(range: std::ops::RangeInclusive<u32>) -> Vec<Value> {
    range.map(pet_json).collect()
}

fn client_for(server: &MockServer) -> PetLoversClient {
    PetLoversClient::new(SdkConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn test_infinite_scroll_against_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/available-pets"))
        .and(query_param("search", ""))
        .and(query_param("category", ""))
        .and(query_param("page", "0"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pets": pets_json(1..=10),
            "nextPage": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/available-pets"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pets": pets_json(11..=14),
            "nextPage": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let listing = client_for(&server).listing();

    listing.load_initial().await;
    let snapshot = listing.snapshot();
    assert_eq!(snapshot.pets.len(), 10);
    assert_eq!(snapshot.phase, ListingPhase::Loaded);
    assert!(!snapshot.end_of_results);

    listing.sentinel_visible().await;
    let snapshot = listing.snapshot();
    assert_eq!(snapshot.pets.len(), 14);
    assert!(snapshot.end_of_results);
    assert_eq!(snapshot.pets[13].pet_name, "Pet 14");

    assert_eq!(listing.sentinel_visible().await, None);
    assert_eq!(listing.sentinel_visible().await, None);
}

#[tokio::test]
async fn test_filters_are_sent_as_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/available-pets"))
        .and(query_param("search", "whisk"))
        .and(query_param("category", "Cat"))
        .and(query_param("page", "3"))
        .and(query_param("limit", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pets": pets_json(1..=1)
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = AvailablePetsQuery::new()
        .with_search("whisk")
        .with_category(Some(PetCategory::Cat))
        .with_page(3)
        .with_limit(4);
    let page = client_for(&server).pets().available_pets(&query).await.unwrap();

    assert_eq!(page.pets.len(), 1);
    assert_eq!(page.next_page, None);
}

#[tokio::test]
async fn test_odd_record_does_not_fail_its_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/available-pets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pets": [
                pet_json(1),
                { "_id": "pet2", "petName": "Kiwi", "petAge": 2.5, "petCategory": "cat" },
                { "_id": "pet3", "petName": "Rex", "petAge": "4", "petCategory": "Hamster", "petLocation": null }
            ],
            "nextPage": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let listing = client_for(&server).listing();
    let completion = listing.load_initial().await;

    assert!(matches!(completion, Some(Completion::Appended { items: 3, .. })));
    let snapshot = listing.snapshot();
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.pets[1].pet_category, PetCategory::Cat);
    assert_eq!(snapshot.pets[1].pet_age, 3);
    assert_eq!(snapshot.pets[2].pet_category, PetCategory::Other);
    assert_eq!(snapshot.pets[2].pet_location, "");
}

#[tokio::test]
async fn test_server_error_becomes_failed_completion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/available-pets"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "database offline" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let listing = client_for(&server).listing();
    let completion = listing.load_initial().await;

    match completion {
        Some(Completion::Failed(FetchError::Server { status, message })) => {
            assert_eq!(status, 500);
            assert!(message.contains("database offline"));
        }
        other => panic!("Expected server failure, got {:?}", other),
    }
    assert!(listing.snapshot().pets.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/available-pets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let listing = client_for(&server).listing();
    let completion = listing.load_initial().await;

    assert!(matches!(
        completion,
        Some(Completion::Failed(FetchError::Transport(_)))
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = PetLoversClient::new(SdkConfig::new(uri)).unwrap();
    let listing = client.listing();

    let completion = listing.load_initial().await;
    assert!(matches!(
        completion,
        Some(Completion::Failed(FetchError::Transport(_)))
    ));
    assert!(!listing.inspect(|state| state.is_fetching()));
}

#[tokio::test]
async fn test_retries_server_errors_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/available-pets"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/available-pets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pets": pets_json(1..=2),
            "nextPage": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PetLoversClient::builder(server.uri())
        .with_max_retries(1)
        .build()
        .unwrap();
    let page = client
        .pets()
        .available_pets(&AvailablePetsQuery::new())
        .await
        .unwrap();

    assert_eq!(page.pets.len(), 2);
}

#[tokio::test]
async fn test_get_pet_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pets/pet7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pet_json(7)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pets/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Pet not found" })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let pet = client.pets().get(&PetId::parse("pet7").unwrap()).await.unwrap();
    assert_eq!(pet.pet_name, "Pet 7");
    assert_eq!(pet.pet_age, 7);
    assert_eq!(pet.pet_category, PetCategory::Cat);

    let missing = client.pets().get(&PetId::parse("missing").unwrap()).await;
    assert!(matches!(missing, Err(SdkError::NotFound(ref m)) if m == "Pet not found"));
}

#[tokio::test]
async fn test_update_pet_sends_payload_and_token() {
    let server = MockServer::start().await;

    let update = PetUpdate {
        pet_name: "Milo".to_string(),
        pet_age: 15,
        pet_category: PetCategory::Cat,
        pet_location: "Dhaka".to_string(),
        short_description: "Sweet".to_string(),
        long_description: "<p>Sweet</p>".to_string(),
        pet_image: Some("https://i.ibb.co/new.jpg".to_string()),
    };

    Mock::given(method("PUT"))
        .and(path("/pets/pet1"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({
            "petName": "Milo",
            "petAge": 15,
            "petCategory": "Cat",
            "petLocation": "Dhaka",
            "shortDescription": "Sweet",
            "longDescription": "<p>Sweet</p>",
            "petImage": "https://i.ibb.co/new.jpg"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "acknowledged": true,
            "matchedCount": 1,
            "modifiedCount": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = PetLoversClient::new(SdkConfig::new(server.uri()).with_bearer_token("secret"))
        .unwrap();
    let outcome = client
        .pets()
        .update(&PetId::parse("pet1").unwrap(), &update)
        .await
        .unwrap();

    assert!(outcome.matched());
    assert_eq!(outcome.modified_count, 1);
}
