use chrono::Utc;
use contracts::domain::a001_commerce::CommerceId;
use contracts::domain::a002_product::{Product, ProductId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub commerce_id: String,
    pub category: String,
    pub price: f64,
    pub stock: Option<i64>,
    pub detail: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());
        let commerce_uuid = Uuid::parse_str(&m.commerce_id).unwrap_or_else(|_| Uuid::new_v4());

        Product {
            base: BaseAggregate::with_metadata(
                ProductId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            commerce_id: CommerceId(commerce_uuid),
            category: m.category,
            price: m.price,
            stock: m.stock,
            detail: m.detail,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

fn to_active(aggregate: &Product) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        commerce_id: Set(aggregate.commerce_id.value().to_string()),
        category: Set(aggregate.category.clone()),
        price: Set(aggregate.price),
        stock: Set(aggregate.stock),
        detail: Set(aggregate.detail.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

/// Products of one commerce, in insertion order.
/// The stable order matters: the import reconciler resolves ambiguous name
/// matches by taking the first record in this order.
pub async fn list_by_commerce(commerce_id: Uuid) -> anyhow::Result<Vec<Product>> {
    let items: Vec<Product> = Entity::find()
        .filter(Column::CommerceId.eq(commerce_id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &Product) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    to_active(aggregate).insert(conn()).await?;
    Ok(uuid)
}

pub async fn update(aggregate: &Product) -> anyhow::Result<()> {
    let mut active = to_active(aggregate);
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

// ============================================================================
// Batched writes (import reconciliation)
// ============================================================================

/// One pending reconciliation write
#[derive(Debug, Clone)]
pub enum WriteOp {
    Insert(Product),
    Update(Product),
    Delete(Uuid),
}

/// Commit one chunk of reconciliation writes atomically.
/// Either the whole chunk lands or none of it does.
pub async fn apply_batch(ops: Vec<WriteOp>) -> anyhow::Result<usize> {
    use sea_orm::sea_query::Expr;

    let applied = ops.len();
    let txn = conn().begin().await?;

    for op in ops {
        match op {
            WriteOp::Insert(product) => {
                to_active(&product).insert(&txn).await?;
            }
            WriteOp::Update(product) => {
                let mut active = to_active(&product);
                active.created_at = sea_orm::ActiveValue::NotSet;
                active.update(&txn).await?;
            }
            WriteOp::Delete(id) => {
                Entity::update_many()
                    .col_expr(Column::IsDeleted, Expr::value(true))
                    .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
                    .filter(Column::Id.eq(id.to_string()))
                    .exec(&txn)
                    .await?;
            }
        }
    }

    txn.commit().await?;
    Ok(applied)
}
