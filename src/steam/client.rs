//! Steam 商店 API 客户端
//!
//! 后端代替前端发起请求（webview 里直接 fetch 会被 CORS 拦截）。
//! 两个端点：storesearch 按名称搜索，appdetails 拉取详情。
//! 详情返回前会先在 CDN 上验证封面和横幅的候选链（见 image 模块）。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::steam::image::{find_valid_image, HttpProber, ImageProber};

const STORE_API_BASE: &str = "https://store.steampowered.com/api";
const CDN_BASE: &str = "https://cdn.akamai.steamstatic.com/steam/apps";
/// storesearch 的地区参数
const SEARCH_COUNTRY: &str = "BR";

// ==================== 对前端暴露的结构 ====================

/// 搜索结果条目（缩略图由 API 直接给出，无需验证）
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// 游戏详情（图片已经过 CDN 存在性验证）
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameDetail {
    pub id: String,
    pub name: String,
    /// 竖版封面；候选链全部落空时为搜索缩略图或空字符串
    pub image: String,
    pub banner_image: Option<String>,
    /// 逗号分隔的类型标签，例如 "Action, Adventure"
    pub genre: Option<String>,
    pub description: Option<String>,
    pub released_date: Option<String>,
    pub metacritic_score: Option<i64>,
}

// ==================== API 响应结构 ====================

#[derive(Debug, Deserialize)]
struct StoreSearchResponse {
    #[serde(default)]
    items: Vec<StoreSearchItem>,
}

#[derive(Debug, Deserialize)]
struct StoreSearchItem {
    id: u64,
    name: String,
    #[serde(default)]
    tiny_image: String,
}

#[derive(Debug, Deserialize)]
struct AppDetailsEntry {
    success: bool,
    data: Option<AppDetails>,
}

#[derive(Debug, Deserialize)]
struct AppDetails {
    steam_appid: u64,
    name: String,
    #[serde(default)]
    header_image: Option<String>,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    genres: Option<Vec<GenreEntry>>,
    #[serde(default)]
    release_date: Option<ReleaseDate>,
    #[serde(default)]
    metacritic: Option<Metacritic>,
}

#[derive(Debug, Deserialize)]
struct GenreEntry {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleaseDate {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Metacritic {
    score: Option<i64>,
}

// ==================== 候选链构造 ====================

/// 竖版封面的候选链，按优先级排列：
/// 1. library_600x900.jpg（竖版，最理想）
/// 2. library_600x900_2x.jpg（高分辨率）
/// 3. capsule_616x353.jpg（横版，覆盖面很广）
/// 4. API 返回的 header_image（横幅，几乎总是存在）
fn cover_candidates(app_id: &str, header_image: Option<&str>) -> Vec<String> {
    let mut candidates = vec![
        format!("{}/{}/library_600x900.jpg", CDN_BASE, app_id),
        format!("{}/{}/library_600x900_2x.jpg", CDN_BASE, app_id),
        format!("{}/{}/capsule_616x353.jpg", CDN_BASE, app_id),
    ];
    if let Some(url) = header_image {
        candidates.push(url.to_string());
    }
    candidates
}

/// 横版背景图的候选链：header.jpg 几乎是通用的，但也验证一下
fn banner_candidates(app_id: &str, header_image: Option<&str>) -> Vec<String> {
    let mut candidates = vec![format!("{}/{}/header.jpg", CDN_BASE, app_id)];
    if let Some(url) = header_image {
        candidates.push(url.to_string());
    }
    candidates
}

// ==================== 客户端 ====================

pub struct SteamClient {
    client: reqwest::Client,
    prober: HttpProber,
}

impl Default for SteamClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SteamClient {
    pub fn new() -> Self {
        let client = reqwest::Client::new();
        let prober = HttpProber::new(client.clone());
        Self { client, prober }
    }

    /// 按名称搜索游戏
    ///
    /// 非成功状态码不视为错误，按原始行为退化为空列表。
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, reqwest::Error> {
        let url = format!("{}/storesearch/", STORE_API_BASE);
        let resp = self
            .client
            .get(url)
            .query(&[("term", term), ("cc", SEARCH_COUNTRY)])
            .send()
            .await?;

        if !resp.status().is_success() {
            log::error!("Steam 搜索返回 HTTP {}", resp.status());
            return Ok(Vec::new());
        }

        let data: StoreSearchResponse = resp.json().await?;
        Ok(data
            .items
            .into_iter()
            .map(|item| SearchResult {
                id: item.id.to_string(),
                name: item.name,
                image: item.tiny_image,
            })
            .collect())
    }

    /// 拉取游戏详情并验证图片候选链
    ///
    /// `search_image` 是搜索结果里的缩略图，作为封面的最后后备。
    /// 条目缺失或 success=false 时返回 None。
    pub async fn get_details(
        &self,
        app_id: &str,
        search_image: Option<String>,
    ) -> Result<Option<GameDetail>, reqwest::Error> {
        let url = format!("{}/appdetails", STORE_API_BASE);
        let resp = self
            .client
            .get(url)
            .query(&[("appids", app_id)])
            .send()
            .await?;

        if !resp.status().is_success() {
            log::error!("Steam 详情返回 HTTP {}", resp.status());
            return Ok(None);
        }

        let data: HashMap<String, AppDetailsEntry> = resp.json().await?;
        let Some(details) = data
            .get(app_id)
            .filter(|entry| entry.success)
            .and_then(|entry| entry.data.as_ref())
        else {
            return Ok(None);
        };

        let covers = cover_candidates(app_id, details.header_image.as_deref());
        let banners = banner_candidates(app_id, details.header_image.as_deref());
        let cover_fallback = search_image.unwrap_or_default();

        // 两条候选链互不依赖，可以并发验证；每条链内部保持顺序短路
        let (image, banner_image) = tokio::join!(
            find_valid_image(&self.prober, &covers, &cover_fallback),
            find_valid_image(&self.prober, &banners, ""),
        );

        let genre = details.genres.as_ref().map(|genres| {
            genres
                .iter()
                .filter_map(|g| g.description.as_deref())
                .collect::<Vec<_>>()
                .join(", ")
        });

        Ok(Some(GameDetail {
            id: details.steam_appid.to_string(),
            name: details.name.clone(),
            image,
            banner_image: Some(banner_image).filter(|b| !b.is_empty()),
            genre: genre.filter(|g| !g.is_empty()),
            description: details.short_description.clone(),
            released_date: details
                .release_date
                .as_ref()
                .and_then(|r| r.date.clone()),
            metacritic_score: details.metacritic.as_ref().and_then(|m| m.score),
        }))
    }

    /// 单次图片存在性探测（提供给前端的原始桥接口）
    pub async fn image_exists(&self, url: &str) -> bool {
        self.prober.exists(url).await
    }
}
