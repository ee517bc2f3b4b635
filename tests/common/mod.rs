use record_export_rs::core::template::{Template, TemplateBuilder};
use serde_json::{Value, json};

/// Initializes test logging once; repeated calls are no-ops.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Template for the `case` record type used across the export tests.
pub fn case_template() -> Template {
    TemplateBuilder::new("case")
        .scalar("id")
        .scalar("type")
        .scalar("title")
        .scalar("body")
        .object(
            "location",
            &["label", "country", "latitude", "longitude"],
        )
        .scalar_list("tags")
        .object_list("links", &["url", "caption"])
        .object_list("authors", &["user_id", "timestamp", "name"])
        .build()
        .unwrap()
}

/// A fully populated case record.
pub fn budgeting_case() -> Value {
    json!({
        "id": 1,
        "type": "case",
        "title": "Participatory Budgeting in Porto Alegre",
        "body": "Residents decide, together, how to spend the city budget.",
        "location": {
            "label": "Porto Alegre, Brazil",
            "country": "Brazil",
            "latitude": -30.03,
            "longitude": -51.23
        },
        "tags": ["budget", "participation", "city government"],
        "links": [
            { "url": "https://example.org/pb", "caption": "Overview, history" },
            { "url": "https://example.org/pb2", "caption": "Follow-up" }
        ],
        "authors": [
            { "user_id": 17, "timestamp": "2019-01-04", "name": "Ann Author" },
            { "user_id": 23, "timestamp": "2019-02-11", "name": "Ben Writer" }
        ]
    })
}

/// A record with almost every optional field absent.
pub fn minimal_case() -> Value {
    json!({ "id": 99, "type": "case" })
}
