use sea_orm::entity::prelude::*;

/// QPR record header. Section data lives in the eleven one-to-one child
/// tables. Duplicates per (owner, quarter, year) are permitted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "qpr_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub office_name: String,
    pub office_code: String,
    pub region: String,
    pub quarter: String,
    pub year: String,
    pub status: String,
    pub phone: String,
    pub email: String,
    /// Freeze flag; kept equal to `status == "Submitted"`.
    pub submitted: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl ActiveModelBehavior for ActiveModel {}
