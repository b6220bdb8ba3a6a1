use tauri::State;

use crate::steam::client::{GameDetail, SearchResult, SteamClient};

// ==================== Steam 商店相关 ====================

/// 按名称搜索 Steam 游戏
#[tauri::command]
pub async fn search_steam_games(
    client: State<'_, SteamClient>,
    query: String,
) -> Result<Vec<SearchResult>, String> {
    client
        .search(&query)
        .await
        .map_err(|e| format!("搜索 Steam 游戏失败: {}", e))
}

/// 获取 Steam 游戏详情（图片已验证）
#[tauri::command]
pub async fn get_steam_game_details(
    client: State<'_, SteamClient>,
    app_id: String,
    search_image: Option<String>,
) -> Result<Option<GameDetail>, String> {
    client
        .get_details(&app_id, search_image)
        .await
        .map_err(|e| format!("获取 Steam 游戏详情失败: {}", e))
}

/// 检查图片 URL 是否存在（HEAD 探测，永不报错）
#[tauri::command]
pub async fn check_image_exists(
    client: State<'_, SteamClient>,
    url: String,
) -> Result<bool, String> {
    Ok(client.image_exists(&url).await)
}
