//! Blog post entity for SeaORM.
//!
//! `status` is stored as text and `seo_keywords` as a JSONB array of strings.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::BlogPost;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub status: String,
    pub topic: String,
    pub target_audience: String,
    pub tone: String,
    pub word_count: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub seo_keywords: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            content: model.content,
            status: model.status.parse().unwrap_or_default(),
            topic: model.topic,
            target_audience: model.target_audience,
            tone: model.tone,
            word_count: u32::try_from(model.word_count).unwrap_or(0),
            seo_keywords: serde_json::from_value(model.seo_keywords).unwrap_or_default(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<BlogPost> for ActiveModel {
    fn from(post: BlogPost) -> Self {
        Self {
            id: Set(post.id),
            user_id: Set(post.user_id),
            title: Set(post.title),
            content: Set(post.content),
            status: Set(post.status.as_str().to_string()),
            topic: Set(post.topic),
            target_audience: Set(post.target_audience),
            tone: Set(post.tone),
            word_count: Set(i32::try_from(post.word_count).unwrap_or(i32::MAX)),
            seo_keywords: Set(Json::from(post.seo_keywords)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
