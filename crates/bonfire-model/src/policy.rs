//! Presence-union validation and list projection.
//!
//! A create payload passes when at least one candidate field holds a
//! truthy value, and, for titles that extend a category, at least one of
//! the title's own fields does too. Update payloads are deliberately not
//! validated; the asymmetry is part of the inherited contract.

use serde_json::Value;

use crate::category::Category;
use crate::item::{Document, ValidationError};
use crate::schema::{item_schema, GAME_FIELD, ID_FIELD};
use crate::title::Title;

/// Truthiness of a JSON value under the catalog's presence rule.
///
/// `false`, numeric zero, and the empty string do not count as present;
/// arrays and objects always do, even empty ones. A document whose only
/// populated stat is `0` therefore still fails validation.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reads a dotted path (`base_damage.physical`) out of a document. Any
/// missing or non-object link along the way yields `None`, never an error.
#[must_use]
pub fn read_path<'a>(document: &'a Document, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// True when at least one of `fields` resolves to a truthy value.
#[must_use]
pub fn any_field_truthy(document: &Document, fields: &[&str]) -> bool {
    fields
        .iter()
        .any(|field| read_path(document, field).is_some_and(is_truthy))
}

/// Create-time validation for one `(title, category)` pair. Both the base
/// vocabulary and the title extension report the same fixed message, which
/// is part of the wire contract.
pub fn validate_create(
    title: Title,
    category: Category,
    payload: &Document,
) -> Result<(), ValidationError> {
    let schema = item_schema(title, category);
    let reject = || {
        ValidationError(format!(
            "must provide required data for {} {}",
            title.as_str(),
            category.singular()
        ))
    };
    if !any_field_truthy(payload, schema.candidate_fields) {
        return Err(reject());
    }
    if !schema.title_fields.is_empty() && !any_field_truthy(payload, schema.title_fields) {
        return Err(reject());
    }
    Ok(())
}

/// Keeps only the listed top-level fields, in schema order. Nested objects
/// are kept whole; fields absent from the document are omitted.
#[must_use]
pub fn project_document(document: &Document, fields: &[&str]) -> Document {
    let mut projected = Document::new();
    for field in fields {
        if let Some(value) = document.get(*field) {
            projected.insert((*field).to_string(), value.clone());
        }
    }
    projected
}

/// Drops the server-managed fields from a client payload. Applied to both
/// create and update bodies before anything is stored.
pub fn strip_server_fields(payload: &mut Document) {
    payload.remove(ID_FIELD);
    payload.remove(GAME_FIELD);
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::{
        any_field_truthy, is_truthy, project_document, read_path, strip_server_fields,
        validate_create,
    };
    use crate::item::Document;
    use crate::{Category, Title};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn falsy_scalars_do_not_count_as_present() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
    }

    #[test]
    fn containers_and_non_zero_scalars_count_as_present() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(12)));
        assert!(is_truthy(&json!(-0.5)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([0])));
    }

    #[test]
    fn nested_reads_never_error_on_missing_parents() {
        let document = doc(json!({"base_damage": {"physical": 40}}));
        assert_eq!(
            read_path(&document, "base_damage.physical"),
            Some(&json!(40))
        );
        assert_eq!(read_path(&document, "base_damage.dark"), None);
        assert_eq!(read_path(&document, "requirements.strength"), None);
        assert_eq!(read_path(&document, "base_damage.physical.deeper"), None);
        assert_eq!(read_path(&document, ""), None);
    }

    #[test]
    fn union_is_satisfied_by_any_single_truthy_field() {
        let document = doc(json!({"image_url": "http://example/ring.png"}));
        assert!(any_field_truthy(&document, &["name", "image_url"]));
        assert!(!any_field_truthy(&document, &["name", "weight"]));
        assert!(validate_create(Title::Ds1, Category::Rings, &document).is_ok());
    }

    #[test]
    fn empty_and_all_falsy_payloads_are_rejected() {
        let empty = Document::new();
        let err = validate_create(Title::Ds1, Category::Rings, &empty)
            .expect_err("empty payload must fail");
        assert_eq!(err.to_string(), "must provide required data for ds1 ring");

        let falsy = doc(json!({"name": "", "weight": 0, "description": false}));
        assert!(validate_create(Title::Ds1, Category::Rings, &falsy).is_err());
    }

    #[test]
    fn weapon_with_only_zero_stats_is_rejected() {
        let zeroed = doc(json!({
            "base_damage": {"physical": 0, "magic": 0, "lightning": 0, "fire": 0},
            "requirements": {"strength": 0, "dexterity": 0},
            "weight": 0.0
        }));
        assert!(validate_create(Title::Ds1, Category::Weapons, &zeroed).is_err());

        let one_stat = doc(json!({
            "base_damage": {"physical": 0, "magic": 7}
        }));
        assert!(validate_create(Title::Ds1, Category::Weapons, &one_stat).is_ok());
    }

    #[test]
    fn later_titles_also_require_one_of_their_own_fields() {
        let base_only = doc(json!({"name": "Estoc"}));
        assert!(validate_create(Title::Ds1, Category::Weapons, &base_only).is_ok());
        let err = validate_create(Title::Ds2, Category::Weapons, &base_only)
            .expect_err("base fields alone must not satisfy a ds2 weapon");
        assert_eq!(err.to_string(), "must provide required data for ds2 weapon");

        let with_dark = doc(json!({"name": "Estoc", "base_damage": {"dark": 30}}));
        assert!(validate_create(Title::Ds2, Category::Weapons, &with_dark).is_ok());

        let skill_only = doc(json!({"name": "Estoc", "skill": {"name": "Stance"}}));
        assert!(validate_create(Title::Ds3, Category::Weapons, &skill_only).is_ok());
        assert!(validate_create(Title::Ds2, Category::Weapons, &skill_only).is_err());
    }

    #[test]
    fn title_fields_alone_do_not_satisfy_the_base_union() {
        // The extension pool is additional, not an alternative: a ds3
        // armor made of nothing but frost resistance still fails the base
        // vocabulary... unless a field happens to sit in both pools.
        let frost_only = doc(json!({"resistances": {"frost": 100}}));
        assert!(validate_create(Title::Ds3, Category::Armors, &frost_only).is_err());

        let frost_and_name = doc(json!({"name": "Havel", "resistances": {"frost": 100}}));
        assert!(validate_create(Title::Ds3, Category::Armors, &frost_and_name).is_ok());
    }

    #[test]
    fn spell_charges_follow_the_title() {
        let uses_only = doc(json!({"uses": 12}));
        assert!(validate_create(Title::Ds1, Category::Spells, &uses_only).is_ok());
        assert!(validate_create(Title::Ds2, Category::Spells, &uses_only).is_ok());
        assert!(validate_create(Title::Ds3, Category::Spells, &uses_only).is_err());

        let named_with_uses = doc(json!({"name": "Soul Arrow", "uses": 30}));
        assert!(validate_create(Title::Ds2, Category::Spells, &named_with_uses).is_ok());
        let named_only = doc(json!({"name": "Soul Arrow"}));
        assert!(validate_create(Title::Ds2, Category::Spells, &named_only).is_err());

        let focus = doc(json!({"name": "Soul Arrow", "focus_points": 11}));
        assert!(validate_create(Title::Ds3, Category::Spells, &focus).is_ok());
    }

    #[test]
    fn projection_keeps_whole_nested_objects_and_skips_absent_fields() {
        let document = doc(json!({
            "_id": "00000000000000000000000000000000",
            "game": "1",
            "name": "Zweihander",
            "weight": 10,
            "base_damage": {"physical": 130, "magic": 0},
            "description": "ultra greatsword"
        }));
        let projected = project_document(
            &document,
            &["_id", "name", "image_url", "weight", "base_damage"],
        );
        assert_eq!(
            Value::Object(projected),
            json!({
                "_id": "00000000000000000000000000000000",
                "name": "Zweihander",
                "weight": 10,
                "base_damage": {"physical": 130, "magic": 0}
            })
        );
    }

    #[test]
    fn strip_removes_only_the_server_managed_fields() {
        let mut payload = doc(json!({"_id": "spoofed", "game": "3", "name": "Lifegem"}));
        strip_server_fields(&mut payload);
        assert_eq!(Value::Object(payload), json!({"name": "Lifegem"}));
    }
}
