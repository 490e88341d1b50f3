use diesel::prelude::*;
use jiff_diesel::Timestamp;

/// Category row. Names are not unique.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i32,
    pub category_name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::category)]
pub struct NewCategory {
    pub category_name: String,
}
