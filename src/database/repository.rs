//! 游戏数据仓库
//!
//! games 表的 CRUD 操作。按照当前契约只支持插入、查询和删除，
//! 不提供字段级更新。

use crate::database::dto::InsertGameData;
use crate::entity::games;
use crate::entity::prelude::*;
use sea_orm::*;

/// 游戏数据仓库
pub struct GamesRepository;

impl GamesRepository {
    /// 插入游戏数据
    ///
    /// 未提供 id 时生成 UUID（手动录入的场景）
    pub async fn insert(
        db: &DatabaseConnection,
        game: InsertGameData,
    ) -> Result<games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp() as i32;

        let id = game
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let game_active = games::ActiveModel {
            id: Set(id),
            name: Set(game.name),
            image: Set(game.image),
            banner_image: Set(game.banner_image),
            genre: Set(game.genre),
            rating: Set(game.rating),
            date_finished: Set(game.date_finished),
            created_at: Set(Some(now)),
        };

        game_active.insert(db).await
    }

    /// 查询所有游戏（按存储顺序返回）
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<games::Model>, DbErr> {
        Games::find().all(db).await
    }

    /// 根据 ID 查询游戏
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: &str,
    ) -> Result<Option<games::Model>, DbErr> {
        Games::find_by_id(id).one(db).await
    }

    /// 删除游戏
    pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<DeleteResult, DbErr> {
        Games::delete_by_id(id).exec(db).await
    }

    /// 获取游戏总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Games::find().count(db).await
    }

    /// 检查指定 ID 是否已存在（用于重复添加拦截）
    pub async fn exists(db: &DatabaseConnection, id: &str) -> Result<bool, DbErr> {
        Ok(Games::find_by_id(id).one(db).await?.is_some())
    }
}
