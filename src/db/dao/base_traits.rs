/// Primary key column used for the default listing order.
pub trait HasIdColumn: sea_orm::EntityTrait {
    fn id_column() -> Self::Column;
}

/// Lets the DAO hand id assignment back to the database on insert.
pub trait HasIdActiveModel {
    fn clear_id(&mut self);
}
