use crate::category::Category;
use crate::title::Title;

/// Name of the server-assigned identity field on stored documents.
pub const ID_FIELD: &str = "_id";
/// Name of the server-assigned title tag on stored documents.
pub const GAME_FIELD: &str = "game";

/// Field vocabulary for one `(title, category)` pair.
///
/// `candidate_fields` is the presence-union pool a create payload must hit
/// at least once; `title_fields` is the additional pool for titles that
/// extend the base vocabulary (empty when the title adds nothing);
/// `projection` is the top-level field list returned by list endpoints.
/// Dotted names are nested paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSchema {
    pub candidate_fields: &'static [&'static str],
    pub title_fields: &'static [&'static str],
    pub projection: &'static [&'static str],
}

const WEAPON_FIELDS: &[&str] = &[
    "name",
    "weapon_type",
    "weight",
    "description",
    "image_url",
    "locations",
    "stability",
    "attack_type",
    "critical",
    "base_damage.physical",
    "base_damage.magic",
    "base_damage.lightning",
    "base_damage.fire",
    "requirements.strength",
    "requirements.dexterity",
    "requirements.intelligence",
    "requirements.faith",
    "bonuses.strength",
    "bonuses.dexterity",
    "bonuses.intelligence",
    "bonuses.faith",
    "defenses.physical",
    "defenses.magic",
    "defenses.lightning",
    "defenses.fire",
];

const WEAPON_DS2_FIELDS: &[&str] = &["effect", "base_damage.dark", "defenses.dark"];

// `aditional_damage` is the stored-document spelling and part of the wire
// contract; do not correct it.
const WEAPON_DS3_FIELDS: &[&str] = &[
    "skill.name",
    "skill.description",
    "base_damage.dark",
    "aditional_damage.bleed",
    "aditional_damage.poison",
    "aditional_damage.frost",
    "defenses.dark",
];

const RING_FIELDS: &[&str] = &[
    "name",
    "image_url",
    "location",
    "weight",
    "description",
    "effect",
];

const ARMOR_FIELDS: &[&str] = &[
    "name",
    "weight",
    "description",
    "image_url",
    "locations",
    "poise",
    "effect",
    "type",
    "resistances.bleed",
    "resistances.poison",
    "resistances.curse",
    "defenses.physical",
    "defenses.magic",
    "defenses.lightning",
    "defenses.fire",
    "physical_defenses.slash",
    "physical_defenses.strike",
    "physical_defenses.thrust",
];

const ARMOR_DS2_FIELDS: &[&str] = &["defenses.dark"];
const ARMOR_DS3_FIELDS: &[&str] = &["resistances.frost", "defenses.dark"];

const SPELL_USES_FIELDS: &[&str] = &[
    "name",
    "spell_type",
    "description",
    "image_url",
    "locations",
    "slots",
    "requirements.strength",
    "requirements.dexterity",
    "requirements.intelligence",
    "requirements.faith",
    "uses",
];

const SPELL_FOCUS_FIELDS: &[&str] = &[
    "name",
    "spell_type",
    "description",
    "image_url",
    "locations",
    "slots",
    "requirements.strength",
    "requirements.dexterity",
    "requirements.intelligence",
    "requirements.faith",
    "focus_points",
];

const SPELL_DS2_FIELDS: &[&str] = &["uses"];
const SPELL_DS3_FIELDS: &[&str] = &["focus_points"];

const MISC_FIELDS: &[&str] = &["name", "description", "image_url", "locations", "effects"];

const NO_TITLE_FIELDS: &[&str] = &[];

const WEAPON_PROJECTION: &[&str] = &[
    "_id",
    "name",
    "image_url",
    "weight",
    "base_damage",
    "requirements",
];
const RING_PROJECTION: &[&str] = &["_id", "name", "image_url", "weight"];
const ARMOR_PROJECTION: &[&str] = &["_id", "name", "image_url", "weight", "defenses"];
const SPELL_USES_PROJECTION: &[&str] = &[
    "_id",
    "name",
    "image_url",
    "spell_type",
    "slots",
    "uses",
    "requirements",
];
const SPELL_FOCUS_PROJECTION: &[&str] = &[
    "_id",
    "name",
    "image_url",
    "spell_type",
    "slots",
    "focus_points",
    "requirements",
];
const MISC_PROJECTION: &[&str] = &["_id", "name", "image_url"];

/// Looks up the field schema for a `(title, category)` pair. Every pair is
/// routable, so the table is total.
#[must_use]
pub const fn item_schema(title: Title, category: Category) -> &'static ItemSchema {
    match (title, category) {
        (Title::Ds1, Category::Weapons) => &ItemSchema {
            candidate_fields: WEAPON_FIELDS,
            title_fields: NO_TITLE_FIELDS,
            projection: WEAPON_PROJECTION,
        },
        (Title::Ds2, Category::Weapons) => &ItemSchema {
            candidate_fields: WEAPON_FIELDS,
            title_fields: WEAPON_DS2_FIELDS,
            projection: WEAPON_PROJECTION,
        },
        (Title::Ds3, Category::Weapons) => &ItemSchema {
            candidate_fields: WEAPON_FIELDS,
            title_fields: WEAPON_DS3_FIELDS,
            projection: WEAPON_PROJECTION,
        },
        (_, Category::Rings) => &ItemSchema {
            candidate_fields: RING_FIELDS,
            title_fields: NO_TITLE_FIELDS,
            projection: RING_PROJECTION,
        },
        (Title::Ds1, Category::Armors) => &ItemSchema {
            candidate_fields: ARMOR_FIELDS,
            title_fields: NO_TITLE_FIELDS,
            projection: ARMOR_PROJECTION,
        },
        (Title::Ds2, Category::Armors) => &ItemSchema {
            candidate_fields: ARMOR_FIELDS,
            title_fields: ARMOR_DS2_FIELDS,
            projection: ARMOR_PROJECTION,
        },
        (Title::Ds3, Category::Armors) => &ItemSchema {
            candidate_fields: ARMOR_FIELDS,
            title_fields: ARMOR_DS3_FIELDS,
            projection: ARMOR_PROJECTION,
        },
        (Title::Ds1, Category::Spells) => &ItemSchema {
            candidate_fields: SPELL_USES_FIELDS,
            title_fields: NO_TITLE_FIELDS,
            projection: SPELL_USES_PROJECTION,
        },
        (Title::Ds2, Category::Spells) => &ItemSchema {
            candidate_fields: SPELL_USES_FIELDS,
            title_fields: SPELL_DS2_FIELDS,
            projection: SPELL_USES_PROJECTION,
        },
        (Title::Ds3, Category::Spells) => &ItemSchema {
            candidate_fields: SPELL_FOCUS_FIELDS,
            title_fields: SPELL_DS3_FIELDS,
            projection: SPELL_FOCUS_PROJECTION,
        },
        (_, Category::Miscs) => &ItemSchema {
            candidate_fields: MISC_FIELDS,
            title_fields: NO_TITLE_FIELDS,
            projection: MISC_PROJECTION,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{item_schema, GAME_FIELD, ID_FIELD};
    use crate::{Category, Title};

    #[test]
    fn table_is_total_and_projections_always_carry_the_id() {
        for title in Title::ALL {
            for category in Category::ALL {
                let schema = item_schema(title, category);
                assert!(!schema.candidate_fields.is_empty());
                assert!(schema.projection.contains(&ID_FIELD));
                assert!(!schema.projection.contains(&GAME_FIELD));
            }
        }
    }

    #[test]
    fn only_later_titles_extend_the_base_vocabulary() {
        for category in Category::ALL {
            assert!(item_schema(Title::Ds1, category).title_fields.is_empty());
        }
        for category in [Category::Rings, Category::Miscs] {
            for title in Title::ALL {
                assert!(item_schema(title, category).title_fields.is_empty());
            }
        }
        assert_eq!(
            item_schema(Title::Ds2, Category::Weapons).title_fields,
            &["effect", "base_damage.dark", "defenses.dark"]
        );
        assert_eq!(
            item_schema(Title::Ds3, Category::Armors).title_fields,
            &["resistances.frost", "defenses.dark"]
        );
    }

    #[test]
    fn spell_charge_field_tracks_the_title() {
        assert!(item_schema(Title::Ds1, Category::Spells)
            .candidate_fields
            .contains(&"uses"));
        assert!(item_schema(Title::Ds2, Category::Spells)
            .projection
            .contains(&"uses"));
        let ds3 = item_schema(Title::Ds3, Category::Spells);
        assert!(ds3.candidate_fields.contains(&"focus_points"));
        assert!(!ds3.candidate_fields.contains(&"uses"));
        assert!(ds3.projection.contains(&"focus_points"));
    }

    #[test]
    fn weapon_vocabulary_covers_the_nested_damage_groups() {
        let schema = item_schema(Title::Ds1, Category::Weapons);
        assert_eq!(schema.candidate_fields.len(), 25);
        for field in [
            "base_damage.fire",
            "requirements.faith",
            "bonuses.dexterity",
            "defenses.lightning",
        ] {
            assert!(schema.candidate_fields.contains(&field));
        }
        assert!(!schema.candidate_fields.contains(&"base_damage.dark"));
    }
}
