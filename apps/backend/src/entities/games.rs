use sea_orm::entity::prelude::*;

/// Row in `games`. Hand, state and outcome columns hold their canonical
/// names as plain VARCHAR; the repo layer parses them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "String(StringLen::N(32))")]
    pub code: String,
    #[sea_orm(column_name = "player_1", column_type = "String(StringLen::N(16))", nullable)]
    pub player1: Option<String>,
    #[sea_orm(column_name = "player_2", column_type = "String(StringLen::N(16))", nullable)]
    pub player2: Option<String>,
    #[sea_orm(column_type = "String(StringLen::N(16))")]
    pub state: String,
    #[sea_orm(column_type = "String(StringLen::N(16))", nullable)]
    pub outcome: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
