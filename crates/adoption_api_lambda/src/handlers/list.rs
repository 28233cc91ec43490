use adoption_api_core::error::HandlerError;
use adoption_api_core::record::CollectionSchema;
use adoption_api_core::response::{
    error_response, listed_response, AllowedMethods, ApiGatewayResponse,
};
use adoption_api_core::store::{scan_all, RecordStore};

/// Returns every record in the table, following scan pages to the end.
///
/// Request parameters are not consulted; list endpoints have no filters.
pub fn handle_list_event(
    schema: &CollectionSchema,
    table: &str,
    store: &impl RecordStore,
) -> ApiGatewayResponse {
    match scan_all(store, table) {
        Ok(items) => {
            tracing::info!(
                collection = schema.kind.as_str(),
                table,
                count = items.len(),
                "records listed"
            );
            listed_response(schema, items)
        }
        Err(error) => {
            let error = HandlerError::from(error);
            tracing::error!(
                collection = schema.kind.as_str(),
                table,
                error = %error,
                "list failed"
            );
            error_response(AllowedMethods::Read, &error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use adoption_api_core::memory::InMemoryRecordStore;
    use adoption_api_core::record::{APPLICATIONS, PETS};
    use adoption_api_core::stamp::RecordStamp;
    use adoption_api_core::store::StoreError;
    use serde_json::{json, Value};

    use crate::handlers::create::handle_create_event;

    use super::*;

    fn seeded_pets(page_size: usize, count: usize) -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new(page_size).with_collection("Pets", "id");
        for index in 0..count {
            let response = handle_create_event(
                json!({"body": {"name": format!("pet-{index}"), "species": "Cat", "age": index}}),
                &PETS,
                "Pets",
                &store,
                RecordStamp::fresh(),
            );
            assert_eq!(response.status_code, 201);
        }
        store
    }

    fn listed_ids(body: &Value) -> Vec<String> {
        body["pets"]
            .as_array()
            .expect("pets should be an array")
            .iter()
            .map(|pet| pet["id"].as_str().expect("id").to_string())
            .collect()
    }

    #[test]
    fn lists_every_page_without_loss_or_duplication() {
        let store = seeded_pets(3, 10);

        let response = handle_list_event(&PETS, "Pets", &store);

        assert_eq!(response.status_code, 200);
        let body = response.body_json().expect("body should parse");
        assert_eq!(body["message"], "Successfully got pets");
        assert_eq!(body["count"], 10);
        let ids = listed_ids(&body);
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(unique.len(), 10);
        assert_eq!(store.scan_calls(), 4);
    }

    #[test]
    fn page_boundary_placement_does_not_change_the_result() {
        let mut expected: Option<HashSet<String>> = None;
        for page_size in [1, 4, 7, 50] {
            let store = InMemoryRecordStore::new(page_size).with_collection("Pets", "id");
            for index in 0..7 {
                let id = format!("pet-{index}");
                let record = match json!({"id": id, "name": "x"}) {
                    Value::Object(map) => map,
                    _ => unreachable!(),
                };
                store.put_record("Pets", &record).expect("seed");
            }

            let body = handle_list_event(&PETS, "Pets", &store)
                .body_json()
                .expect("body should parse");
            let ids: HashSet<String> = listed_ids(&body).into_iter().collect();
            match &expected {
                Some(previous) => assert_eq!(previous, &ids),
                None => expected = Some(ids),
            }
        }
    }

    #[test]
    fn empty_collection_lists_zero_items() {
        let store = InMemoryRecordStore::new(5).with_collection("Applications", "applicationId");

        let response = handle_list_event(&APPLICATIONS, "Applications", &store);

        let body = response.body_json().expect("body should parse");
        assert_eq!(body["applications"], json!([]));
        assert_eq!(body["count"], 0);
    }

    #[test]
    fn created_record_lists_back_unchanged() {
        let store = InMemoryRecordStore::new(2).with_collection("Applications", "applicationId");
        let created = handle_create_event(
            json!({"body": "{\"pet_id\":7,\"pet_name\":\"Charlie\",\"species\":\"Dog\",\"applicant_name\":\"A. Lee\",\"email\":\"a@example.com\",\"phone\":\"555-0100\",\"pet_image\":\"charlie.jpeg\"}"}),
            &APPLICATIONS,
            "Applications",
            &store,
            RecordStamp::fresh(),
        )
        .body_json()
        .expect("body should parse");

        let listed = handle_list_event(&APPLICATIONS, "Applications", &store)
            .body_json()
            .expect("body should parse");

        assert_eq!(listed["applications"][0], created["application"]);
    }

    #[test]
    fn repeated_lists_return_the_same_records() {
        let store = seeded_pets(4, 9);

        let first = handle_list_event(&PETS, "Pets", &store)
            .body_json()
            .expect("body should parse");
        let second = handle_list_event(&PETS, "Pets", &store)
            .body_json()
            .expect("body should parse");

        let first_ids: HashSet<String> = listed_ids(&first).into_iter().collect();
        let second_ids: HashSet<String> = listed_ids(&second).into_iter().collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn store_failure_returns_server_error_with_read_headers() {
        let store = seeded_pets(2, 3);
        store.fail_next(StoreError::service(
            "AccessDeniedException",
            "User is not authorized to perform: dynamodb:Scan",
        ));

        let response = handle_list_event(&PETS, "Pets", &store);

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.headers.get("Access-Control-Allow-Methods"),
            Some(&"GET,HEAD,OPTIONS".to_string())
        );
        let body = response.body_json().expect("body should parse");
        assert_eq!(
            body["error"],
            "AccessDeniedException: User is not authorized to perform: dynamodb:Scan"
        );
    }

    #[test]
    fn missing_table_reports_resource_not_found() {
        let store = InMemoryRecordStore::new(2);

        let response = handle_list_event(&PETS, "Pets", &store);

        assert_eq!(response.status_code, 500);
        let body = response.body_json().expect("body should parse");
        assert_eq!(
            body["error"],
            "ResourceNotFoundException: Requested resource not found"
        );
    }
}
