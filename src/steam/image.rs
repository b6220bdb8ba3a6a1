//! CDN 图片候选链解析
//!
//! Steam CDN 上同一个游戏的各种封面资源不保证都存在，
//! 所以按优先级逐个探测（HEAD 请求，不取响应体），
//! 命中即停，全部落空时返回固定的后备值。
//!
//! 探测必须严格按顺序短路进行：优先级高的候选一旦存在就必须胜出，
//! 因此同一条候选链内不做并行竞速。封面和横幅是两条独立的候选链，
//! 彼此之间可以并发执行。

use std::time::Duration;

/// 单次探测的超时上限，避免慢速 CDN 拖垮整个解析
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// 图片存在性探测器
///
/// `exists` 永不报错：任何网络错误或非成功状态码一律视为"不存在"。
pub trait ImageProber {
    async fn exists(&self, url: &str) -> bool;
}

/// 基于 reqwest 的 HEAD 探测实现
#[derive(Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl ImageProber for HttpProber {
    async fn exists(&self, url: &str) -> bool {
        match self
            .client
            .head(url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

/// 按顺序探测候选 URL，返回第一个存在的；全部不存在（或列表为空）
/// 时原样返回后备值。后备值允许为空字符串，表示"没有可用图片"。
pub async fn find_valid_image<P: ImageProber>(
    prober: &P,
    candidates: &[String],
    fallback: &str,
) -> String {
    for url in candidates {
        if prober.exists(url).await {
            return url.clone();
        }
    }
    fallback.to_string()
}
