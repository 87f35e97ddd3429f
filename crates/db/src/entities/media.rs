//! Media entity (attachments of a post).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of media attached to a post.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "video")]
    Video,
}

impl MediaType {
    /// Wire representation of the media type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: MediaType,

    #[sea_orm(column_type = "String(StringLen::N(250))")]
    pub url: String,

    pub post_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_string_values() {
        assert_eq!(MediaType::Image.to_value(), "image");
        assert_eq!(MediaType::Video.to_value(), "video");
        assert_eq!(MediaType::Video.to_string(), "video");
    }

    #[test]
    fn test_media_type_rejects_unknown_value() {
        assert!(MediaType::try_from_value(&"image".to_string()).is_ok());
        assert!(MediaType::try_from_value(&"gif".to_string()).is_err());
        assert!(MediaType::try_from_value(&"IMAGE".to_string()).is_err());
    }

    #[test]
    fn test_media_type_serde() {
        assert_eq!(
            serde_json::to_string(&MediaType::Image).ok().as_deref(),
            Some("\"image\"")
        );
        assert!(serde_json::from_str::<MediaType>("\"audio\"").is_err());
    }
}
