use serde_json::Value;

use crate::core::template::{AUTHOR_FIELDS, AUTHORS_FIELD, FieldKind, Template};

use super::escape::{escape_text, prepare_value};
use super::flatten::{format_list_structure, format_object_columns};

/// Assembles one CSV row for `record` against `template`.
///
/// The walk mirrors [`derive_header`](super::header::derive_header) field
/// for field, so the row always has exactly one cell per column: missing
/// or null fields still emit their (empty) cells and the row width never
/// shrinks. Shape mismatches degrade to best-effort stringification, never
/// an error. The result carries no header line and no trailing line
/// terminator; document framing is the writer's job.
pub fn assemble_row(record: &Value, template: &Template) -> String {
    assemble_cells(record, template).join(",")
}

/// One escaped cell per derived column, in header order.
pub fn assemble_cells(record: &Value, template: &Template) -> Vec<String> {
    let mut cells = Vec::new();

    for field in template.fields() {
        let value = record.get(field.name.as_str());
        match &field.kind {
            FieldKind::Scalar => cells.push(prepare_value(value)),
            FieldKind::Object { fields } => {
                for sub in fields {
                    cells.push(prepare_value(value.and_then(|v| v.get(sub.as_str()))));
                }
            }
            FieldKind::ScalarList => cells.push(scalar_list_cell(value)),
            FieldKind::ObjectList { fields } => {
                if field.name == AUTHORS_FIELD {
                    object_list_cells(&mut cells, value, &AUTHOR_FIELDS);
                } else {
                    object_list_cells(&mut cells, value, fields);
                }
            }
        }
    }

    cells
}

fn scalar_list_cell(value: Option<&Value>) -> String {
    match value {
        // Second escaping pass: the joined string itself becomes a cell.
        Some(Value::Array(items)) => escape_text(&format_list_structure(items)),
        // A bare scalar in a list slot reads as a one-element list.
        other => prepare_value(other),
    }
}

fn object_list_cells<S: AsRef<str>>(cells: &mut Vec<String>, value: Option<&Value>, fields: &[S]) {
    match value {
        Some(Value::Array(items)) => {
            for column in format_object_columns(items, fields) {
                cells.push(escape_text(&column));
            }
        }
        // Width never shrinks: the declared sub-field cells stay, empty.
        _ => {
            for _ in fields {
                cells.push(String::new());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::core::template::{Template, TemplateBuilder};
    use crate::export::csv::header::derive_header;

    use super::*;

    fn thing_template() -> Template {
        TemplateBuilder::new("thing")
            .scalar("foo")
            .scalar_list("bar")
            .object("bat", &["bat1", "bat2"])
            .object_list("baz", &["baz1", "baz2"])
            .build()
            .unwrap()
    }

    fn thing_record() -> Value {
        json!({
            "foo": "single Value",
            "bar": ["list ele 1", "list ele 2", "list ele 3"],
            "bat": {
                "bat1": "Value inside object 1",
                "bat2": "Value inside object 2"
            },
            "baz": [
                { "baz1": "list obj 1 ele 1", "baz2": "list obj 1 ele 2" },
                { "baz1": "list obj 2 ele 1", "baz2": "list obj 2 ele 2" }
            ]
        })
    }

    #[test]
    fn assembles_one_row_for_a_full_record() {
        assert_eq!(
            assemble_row(&thing_record(), &thing_template()),
            "single Value,\
             \"list ele 1|list ele 2|list ele 3\",\
             Value inside object 1,\
             Value inside object 2,\
             \"list obj 1 ele 1|list obj 2 ele 1\",\
             \"list obj 1 ele 2|list obj 2 ele 2\""
        );
    }

    #[test]
    fn escapes_both_delimiter_layers_without_double_escaping() {
        let template = TemplateBuilder::new("thing")
            .scalar("foo")
            .scalar_list("bar")
            .object("bat", &["bat1", "bat2"])
            .scalar("nullVal")
            .scalar_list("emptyList")
            .build()
            .unwrap();
        let record = json!({
            "foo": "single Value",
            "bar": ["list, ele 1", "list ele 2", "list| ele 3"],
            "bat": {
                "bat1": "Value inside, object 1",
                "bat2": "Value| inside object 2"
            },
            "nullVal": null,
            "emptyList": []
        });

        assert_eq!(
            assemble_row(&record, &template),
            "single Value,\
             \"\"\"list, ele 1\"\"|list ele 2|\"\"list| ele 3\"\"\",\
             \"Value inside, object 1\",\
             \"Value| inside object 2\",\
             ,"
        );
    }

    #[test]
    fn all_empty_record_yields_all_empty_cells() {
        assert_eq!(assemble_row(&json!({}), &thing_template()), ",,,,,");
    }

    #[test]
    fn cell_count_always_matches_header_count() {
        let template = thing_template();
        let header_len = derive_header(&template).len();

        let records = [
            thing_record(),
            json!({}),
            json!({ "foo": null, "bar": null, "bat": null, "baz": null }),
            // Shape mismatches everywhere.
            json!({ "foo": ["a", "b"], "bar": "scalar", "bat": 12, "baz": "junk" }),
            json!("not even an object"),
        ];
        for record in &records {
            assert_eq!(assemble_cells(record, &template).len(), header_len);
        }
    }

    #[test]
    fn empty_authors_list_still_emits_three_cells() {
        let template = TemplateBuilder::new("thing")
            .scalar("foo")
            .object_list("authors", &["whatever"])
            .build()
            .unwrap();
        let record = json!({ "foo": "single Value", "authors": [] });

        assert_eq!(assemble_row(&record, &template), "single Value,,,");
    }

    #[test]
    fn authors_cells_use_the_fixed_sub_field_order() {
        let template = TemplateBuilder::new("thing")
            .object_list("authors", &["name"])
            .build()
            .unwrap();
        let record = json!({
            "authors": [
                { "user_id": 17, "timestamp": "2019-01-04", "name": "Ann" },
                { "user_id": 23, "timestamp": "2019-02-11", "name": "Ben" }
            ]
        });

        assert_eq!(
            assemble_row(&record, &template),
            "17|23,2019-01-04|2019-02-11,Ann|Ben"
        );
    }

    #[test]
    fn scalar_slot_holding_a_list_degrades_to_json_text() {
        let template = TemplateBuilder::new("thing").scalar("foo").build().unwrap();
        let record = json!({ "foo": ["a", "b"] });

        assert_eq!(
            assemble_row(&record, &template),
            "\"[\"\"a\"\",\"\"b\"\"]\""
        );
    }

    #[test]
    fn list_slot_holding_a_scalar_reads_as_one_element_list() {
        let template = TemplateBuilder::new("thing")
            .scalar_list("bar")
            .build()
            .unwrap();
        let record = json!({ "bar": "only one" });

        assert_eq!(assemble_row(&record, &template), "only one");
    }
}
