use chrono::Utc;
use contracts::domain::a001_commerce::{
    Commerce, CommerceId, GistPublication, PaymentMethod, WeekSchedule,
};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_commerce")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub owner_user_id: String,
    pub category: String,
    pub address: String,
    pub phone: String,
    pub whatsapp: String,
    /// WeekSchedule serialized as JSON
    pub hours: String,
    /// Vec<PaymentMethod> serialized as JSON
    pub payment_methods: String,
    pub assistant_greeting: String,
    pub gist_id: Option<String>,
    pub gist_raw_url: Option<String>,
    pub gist_web_url: Option<String>,
    pub exported_at: Option<chrono::DateTime<chrono::Utc>>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Commerce {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        // Malformed JSON columns degrade to defaults rather than failing reads
        let hours: WeekSchedule = serde_json::from_str(&m.hours).unwrap_or_default();
        let payment_methods: Vec<PaymentMethod> =
            serde_json::from_str(&m.payment_methods).unwrap_or_default();

        Commerce {
            base: BaseAggregate::with_metadata(
                CommerceId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            owner_user_id: m.owner_user_id,
            category: m.category,
            address: m.address,
            phone: m.phone,
            whatsapp: m.whatsapp,
            hours,
            payment_methods,
            assistant_greeting: m.assistant_greeting,
            publication: GistPublication {
                gist_id: m.gist_id,
                raw_url: m.gist_raw_url,
                web_url: m.gist_web_url,
                exported_at: m.exported_at,
            },
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Commerce) -> anyhow::Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        owner_user_id: Set(aggregate.owner_user_id.clone()),
        category: Set(aggregate.category.clone()),
        address: Set(aggregate.address.clone()),
        phone: Set(aggregate.phone.clone()),
        whatsapp: Set(aggregate.whatsapp.clone()),
        hours: Set(serde_json::to_string(&aggregate.hours)?),
        payment_methods: Set(serde_json::to_string(&aggregate.payment_methods)?),
        assistant_greeting: Set(aggregate.assistant_greeting.clone()),
        gist_id: Set(aggregate.publication.gist_id.clone()),
        gist_raw_url: Set(aggregate.publication.raw_url.clone()),
        gist_web_url: Set(aggregate.publication.web_url.clone()),
        exported_at: Set(aggregate.publication.exported_at),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    })
}

pub async fn list_by_owner(owner_user_id: &str) -> anyhow::Result<Vec<Commerce>> {
    let items: Vec<Commerce> = Entity::find()
        .filter(Column::OwnerUserId.eq(owner_user_id))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Description)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Commerce>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Commerce) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate)?.insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Commerce) -> anyhow::Result<()> {
    let mut active = to_active(aggregate)?;
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Count a user's live commerces (used to derive the next business code)
pub async fn count_by_owner(owner_user_id: &str) -> anyhow::Result<u64> {
    use sea_orm::PaginatorTrait;
    let count = Entity::find()
        .filter(Column::OwnerUserId.eq(owner_user_id))
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count)
}
