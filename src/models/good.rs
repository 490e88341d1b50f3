use diesel::prelude::*;
use jiff_diesel::Timestamp;

use super::Category;

/// Good row. Category membership lives in `good_category`.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::good)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Good {
    pub id: i32,
    pub good_name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::good)]
pub struct NewGood {
    pub good_name: String,
}

/// Junction row linking a good to one of its categories.
#[derive(Debug, Queryable, Selectable, Insertable, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[diesel(table_name = crate::schema::good_category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GoodCategory {
    pub good_id: i32,
    pub category_id: i32,
}

/// Result of a committed good creation: the new good and the category it was filed under.
#[derive(Debug, Clone)]
pub struct CreatedGood {
    pub good: Good,
    pub category: Category,
}

/// Changes applied by a single good update.
///
/// Both parts are optional and independent. An update carrying neither
/// still reports the current state of the good.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoodUpdate {
    pub good_id: i32,
    pub new_name: Option<String>,
    pub category_to_add: Option<i32>,
}

impl GoodUpdate {
    /// Builds an update from wire values where an empty name or a zero id means "unchanged".
    pub fn from_wire(good_id: i32, new_name: Option<String>, category_to_add: Option<i32>) -> Self {
        Self {
            good_id,
            new_name: new_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            category_to_add: category_to_add.filter(|id| *id != 0),
        }
    }
}

/// Denormalised view of a good after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedGood {
    pub good_id: i32,
    pub good_name: String,
    pub category_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire_drops_empty_name_and_zero_category() {
        let update = GoodUpdate::from_wire(7, Some("   ".to_string()), Some(0));
        assert_eq!(update.good_id, 7);
        assert!(update.new_name.is_none());
        assert!(update.category_to_add.is_none());
    }

    #[test]
    fn test_from_wire_keeps_real_values() {
        let update = GoodUpdate::from_wire(1, Some(" Gadget ".to_string()), Some(2));
        assert_eq!(update.new_name.as_deref(), Some("Gadget"));
        assert_eq!(update.category_to_add, Some(2));
    }
}
