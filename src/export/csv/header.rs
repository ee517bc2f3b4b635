use crate::core::template::{AUTHOR_FIELDS, AUTHORS_FIELD, FieldKind, Template};

/// Derives the ordered CSV column names for a record type.
///
/// The walk is depth-first in template field order, one column per leaf
/// path:
///
/// - scalar `k` → `k`
/// - object `k` with sub-fields `s1, s2, …` → `k_s1`, `k_s2`, …
/// - scalar list `k` → `k_list`
/// - object list `k` with sub-fields `s1, s2, …` → `k_s1_list`, `k_s2_list`, …
///
/// An object list named `authors` always yields the three fixed columns
/// `authors_user_id_list`, `authors_timestamp_list`, `authors_name_list`,
/// whatever the template declares, so every record of a type shares one
/// schema. The row assembler walks the same order; column count equals
/// cell count for every record of the type.
pub fn derive_header(template: &Template) -> Vec<String> {
    let mut columns = Vec::new();

    for field in template.fields() {
        match &field.kind {
            FieldKind::Scalar => columns.push(field.name.clone()),
            FieldKind::Object { fields } => {
                for sub in fields {
                    columns.push(format!("{}_{}", field.name, sub));
                }
            }
            FieldKind::ScalarList => columns.push(format!("{}_list", field.name)),
            FieldKind::ObjectList { fields } => {
                if field.name == AUTHORS_FIELD {
                    for sub in AUTHOR_FIELDS {
                        columns.push(format!("{}_{}_list", AUTHORS_FIELD, sub));
                    }
                } else {
                    for sub in fields {
                        columns.push(format!("{}_{}_list", field.name, sub));
                    }
                }
            }
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use crate::core::template::TemplateBuilder;

    use super::*;

    #[test]
    fn derives_one_column_per_leaf_path() {
        let template = TemplateBuilder::new("thing")
            .scalar("foo")
            .scalar_list("bar")
            .object("bat", &["bat1", "bat2"])
            .object_list("baz", &["baz1", "baz2"])
            .build()
            .unwrap();

        assert_eq!(
            derive_header(&template),
            vec![
                "foo",
                "bar_list",
                "bat_bat1",
                "bat_bat2",
                "baz_baz1_list",
                "baz_baz2_list"
            ]
        );
    }

    #[test]
    fn authors_always_expands_to_the_three_fixed_columns() {
        let template = TemplateBuilder::new("thing")
            .scalar("foo")
            .object_list("authors", &["whatever"])
            .build()
            .unwrap();

        assert_eq!(
            derive_header(&template),
            vec![
                "foo",
                "authors_user_id_list",
                "authors_timestamp_list",
                "authors_name_list"
            ]
        );
    }

    #[test]
    fn header_is_a_property_of_the_type_alone() {
        let template = TemplateBuilder::new("thing")
            .scalar("nullVal")
            .scalar_list("emptyList")
            .build()
            .unwrap();

        // No record in sight: the header exists before any data does.
        assert_eq!(derive_header(&template), vec!["nullVal", "emptyList_list"]);
    }
}
