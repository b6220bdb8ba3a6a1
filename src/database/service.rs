use sea_orm::DatabaseConnection;
use tauri::State;

use crate::database::dto::InsertGameData;
use crate::database::repository::GamesRepository;
use crate::entity::games;
use crate::stats::{self, GameStats};

// ==================== 游戏数据相关 ====================

/// 插入游戏数据
#[tauri::command]
pub async fn insert_game(
    db: State<'_, DatabaseConnection>,
    game: InsertGameData,
) -> Result<games::Model, String> {
    GamesRepository::insert(&db, game)
        .await
        .map_err(|e| format!("插入游戏数据失败: {}", e))
}

/// 获取所有游戏
#[tauri::command]
pub async fn find_all_games(
    db: State<'_, DatabaseConnection>,
) -> Result<Vec<games::Model>, String> {
    GamesRepository::find_all(&db)
        .await
        .map_err(|e| format!("获取游戏列表失败: {}", e))
}

/// 删除游戏
#[tauri::command]
pub async fn delete_game(db: State<'_, DatabaseConnection>, id: String) -> Result<u64, String> {
    GamesRepository::delete(&db, &id)
        .await
        .map(|result| result.rows_affected)
        .map_err(|e| format!("删除游戏失败: {}", e))
}

/// 获取游戏总数
#[tauri::command]
pub async fn count_games(db: State<'_, DatabaseConnection>) -> Result<u64, String> {
    GamesRepository::count(&db)
        .await
        .map_err(|e| format!("获取游戏总数失败: {}", e))
}

/// 检查游戏 ID 是否已存在
#[tauri::command]
pub async fn game_exists(db: State<'_, DatabaseConnection>, id: String) -> Result<bool, String> {
    GamesRepository::exists(&db, &id)
        .await
        .map_err(|e| format!("检查游戏是否存在失败: {}", e))
}

// ==================== 游戏统计相关 ====================

/// 计算当前收藏的统计数据（卡片 + 三组图表数据）
///
/// 统计本身是纯计算，集合快照从数据库一次性读出。
#[tauri::command]
pub async fn get_game_stats(db: State<'_, DatabaseConnection>) -> Result<GameStats, String> {
    let games = GamesRepository::find_all(&db)
        .await
        .map_err(|e| format!("获取游戏列表失败: {}", e))?;

    Ok(stats::compute_stats(&games))
}
