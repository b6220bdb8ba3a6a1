//! 数据传输对象 (DTO)
//!
//! 用于前后端数据交互的结构定义。

use serde::{Deserialize, Serialize};

/// 用于插入游戏的数据结构
///
/// `id` 可选：来自 Steam 的记录传入 appid，
/// 手动录入的记录留空，由仓库层生成 UUID。
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InsertGameData {
    pub id: Option<String>,
    pub name: String,
    pub image: Option<String>,
    pub banner_image: Option<String>,
    pub genre: Option<String>,
    pub rating: f64,
    pub date_finished: Option<String>,
}
