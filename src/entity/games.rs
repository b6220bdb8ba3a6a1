//! 游戏数据实体
//!
//! games 表是唯一的核心表，一行对应一个已通关的游戏。
//! id 为不透明字符串：来自 Steam 的记录使用 appid，
//! 手动添加的记录由仓库层生成 UUID。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    // === 基础信息 ===
    #[sea_orm(column_type = "Text")]
    pub name: String,
    /// 竖版封面（URL 或本地路径）
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
    /// 横版背景图（URL 或本地路径）
    #[sea_orm(column_type = "Text", nullable)]
    pub banner_image: Option<String>,
    /// 逗号分隔的自由文本类型标签，例如 "Action, Adventure"
    #[sea_orm(column_type = "Text", nullable)]
    pub genre: Option<String>,

    // === 用户评价 ===
    /// 评分，约定范围 [0,10]，由前端保证，存储层不做强制
    pub rating: f64,
    /// 通关日期，DD/MM/YYYY 文本形式
    #[sea_orm(column_type = "Text", nullable)]
    pub date_finished: Option<String>,

    // === 时间戳 ===
    pub created_at: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
