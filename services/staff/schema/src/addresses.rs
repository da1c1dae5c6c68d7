use sea_orm::entity::prelude::*;

/// Postal address that staff records may reference.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::managers::Entity")]
    Managers,
    #[sea_orm(has_many = "super::interns::Entity")]
    Interns,
}

impl Related<super::managers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Managers.def()
    }
}

impl Related<super::interns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Interns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
