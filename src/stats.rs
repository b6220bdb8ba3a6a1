//! 游戏统计聚合
//!
//! 对游戏收藏的一次性纯计算：汇总卡片（总数、平均分、最佳游戏、
//! 最常见类型）和三组图表数据（按年份、按类型、按评分区间）。
//!
//! 输入集合视为不可变快照，同一输入（含顺序）必然产生同一输出：
//! 最佳游戏按第一次出现者胜出，类型排行使用稳定排序，
//! 计数相同的类型保持首次出现的先后顺序。
//! 脏数据不报错：日期解析失败进入 "N/A" 年份桶，缺失的类型字段
//! 直接跳过，超出 [0,10] 的评分按原值落入首尾区间。

use serde::{Deserialize, Serialize};

use crate::entity::games;

/// 没有任何类型数据时 top_genre 的占位值
const NO_GENRE_SENTINEL: &str = "—";
/// 日期无法解析出年份时的桶标签
const UNKNOWN_YEAR: &str = "N/A";
/// 类型排行保留的名额，其余合并进 "Other"
const TOP_GENRE_LIMIT: usize = 5;

/// 某一年份通关的游戏数量
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: String,
    pub count: u32,
}

/// 某个类型标签的出现次数及占比
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreShare {
    pub name: String,
    pub value: u32,
    /// round(100 * value / 全部标签出现次数)
    pub percent: u32,
}

/// 固定评分区间的计数
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub range: String,
    pub count: u32,
}

/// 最佳游戏卡片数据
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestGame {
    pub name: String,
    pub rating: f64,
}

/// 统计结果
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    // === 汇总卡片 ===
    pub total_games: u32,
    /// 平均分，四舍五入到一位小数；空集合为 0
    pub average_rating: f64,
    pub best_game: Option<BestGame>,
    pub top_genre: String,

    // === 图表数据 ===
    pub games_per_year: Vec<YearCount>,
    pub genre_breakdown: Vec<GenreShare>,
    pub rating_distribution: Vec<RatingBucket>,
}

/// 计算整个收藏的统计数据
pub fn compute_stats(games: &[games::Model]) -> GameStats {
    let total_games = games.len() as u32;

    // ==================== 平均分 ====================
    let average_rating = if games.is_empty() {
        0.0
    } else {
        let sum: f64 = games.iter().map(|g| g.rating).sum();
        (sum / games.len() as f64 * 10.0).round() / 10.0
    };

    // ==================== 最佳游戏 ====================
    // 严格大于才替换，评分并列时保留先出现的记录
    let best_game = games
        .iter()
        .fold(None::<&games::Model>, |best, g| match best {
            Some(b) if g.rating > b.rating => Some(g),
            Some(b) => Some(b),
            None => Some(g),
        })
        .map(|g| BestGame {
            name: g.name.clone(),
            rating: g.rating,
        });

    // ==================== 按年份 ====================
    let games_per_year = count_per_year(games);

    // ==================== 按类型 ====================
    let (genre_breakdown, top_genre) = rank_genres(games);

    // ==================== 评分分布 ====================
    let rating_distribution = bucket_ratings(games);

    GameStats {
        total_games,
        average_rating,
        best_game,
        top_genre,
        games_per_year,
        genre_breakdown,
        rating_distribution,
    }
}

/// 从 DD/MM/YYYY 文本中取出年份；取不出来就归入 "N/A"
fn extract_year(date_finished: Option<&str>) -> String {
    date_finished
        .and_then(|d| d.split('/').nth(2))
        .map(str::trim)
        .filter(|y| !y.is_empty())
        .unwrap_or(UNKNOWN_YEAR)
        .to_string()
}

fn count_per_year(games: &[games::Model]) -> Vec<YearCount> {
    // BTreeMap 直接给出年份标签的字典序升序
    let mut year_map = std::collections::BTreeMap::<String, u32>::new();
    for game in games {
        let year = extract_year(game.date_finished.as_deref());
        *year_map.entry(year).or_insert(0) += 1;
    }

    year_map
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// 统计类型标签出现次数，返回（排行榜, 最常见类型）
///
/// 分母是"标签出现总次数"而不是记录数：一条记录带两个类型
/// 就为分母贡献 2。
fn rank_genres(games: &[games::Model]) -> (Vec<GenreShare>, String) {
    // Vec 保序计数：保证并列时维持首次出现的顺序
    let mut counts: Vec<(String, u32)> = Vec::new();
    let mut total_tags: u32 = 0;

    for game in games {
        let Some(genre) = &game.genre else { continue };
        for tag in genre.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match counts.iter_mut().find(|(name, _)| name == tag) {
                Some((_, count)) => *count += 1,
                None => counts.push((tag.to_string(), 1)),
            }
            total_tags += 1;
        }
    }

    // sort_by 是稳定排序，计数相同保持先后
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let top_genre = counts
        .first()
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| NO_GENRE_SENTINEL.to_string());

    let percent_of = |value: u32| -> u32 {
        if total_tags == 0 {
            0
        } else {
            (f64::from(value) / f64::from(total_tags) * 100.0).round() as u32
        }
    };

    let mut breakdown: Vec<GenreShare> = counts
        .iter()
        .take(TOP_GENRE_LIMIT)
        .map(|(name, value)| GenreShare {
            name: name.clone(),
            value: *value,
            percent: percent_of(*value),
        })
        .collect();

    let others: u32 = counts.iter().skip(TOP_GENRE_LIMIT).map(|(_, v)| v).sum();
    if others > 0 {
        breakdown.push(GenreShare {
            name: "Other".to_string(),
            value: others,
            percent: percent_of(others),
        });
    }

    (breakdown, top_genre)
}

/// 五个固定的半开区间：[0,2) [2,4) [4,6) [6,8) [8,10]
///
/// 边界值 2/4/6/8 落入更高的区间；越界评分不拒绝，
/// 小于 2 的一律进第一个桶，大于等于 8 的一律进最后一个桶。
fn bucket_ratings(games: &[games::Model]) -> Vec<RatingBucket> {
    let mut buckets: Vec<RatingBucket> = ["0-2", "2-4", "4-6", "6-8", "8-10"]
        .iter()
        .map(|range| RatingBucket {
            range: range.to_string(),
            count: 0,
        })
        .collect();

    for game in games {
        let r = game.rating;
        let idx = if r < 2.0 {
            0
        } else if r < 4.0 {
            1
        } else if r < 6.0 {
            2
        } else if r < 8.0 {
            3
        } else {
            4
        };
        buckets[idx].count += 1;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, rating: f64, date: Option<&str>, genre: Option<&str>) -> games::Model {
        games::Model {
            id: name.to_string(),
            name: name.to_string(),
            image: None,
            banner_image: None,
            genre: genre.map(String::from),
            rating,
            date_finished: date.map(String::from),
            created_at: None,
        }
    }

    #[test]
    fn empty_collection_yields_sentinels() {
        let stats = compute_stats(&[]);

        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert!(stats.best_game.is_none());
        assert_eq!(stats.top_genre, "—");
        assert!(stats.games_per_year.is_empty());
        assert!(stats.genre_breakdown.is_empty());
        // 评分分布始终给出全部五个区间
        assert_eq!(stats.rating_distribution.len(), 5);
        assert!(stats.rating_distribution.iter().all(|b| b.count == 0));
    }

    #[test]
    fn spec_example_two_games_2023() {
        let games = vec![
            game("A", 9.0, Some("01/03/2023"), Some("Action")),
            game("B", 7.0, Some("02/05/2023"), Some("Action, Adventure")),
        ];
        let stats = compute_stats(&games);

        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.average_rating, 8.0);
        assert_eq!(stats.best_game.as_ref().unwrap().rating, 9.0);
        assert_eq!(stats.top_genre, "Action");
        assert_eq!(
            stats.games_per_year,
            vec![YearCount {
                year: "2023".to_string(),
                count: 2
            }]
        );
        assert_eq!(
            stats.genre_breakdown,
            vec![
                GenreShare {
                    name: "Action".to_string(),
                    value: 2,
                    percent: 67
                },
                GenreShare {
                    name: "Adventure".to_string(),
                    value: 1,
                    percent: 33
                },
            ]
        );
        assert_eq!(stats.rating_distribution[4].count, 1); // [8,10]
        assert_eq!(stats.rating_distribution[3].count, 1); // [6,8)
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let games = vec![
            game("A", 7.0, None, None),
            game("B", 8.0, None, None),
            game("C", 8.0, None, None),
        ];
        // 23/3 = 7.666... → 7.7
        assert_eq!(compute_stats(&games).average_rating, 7.7);
    }

    #[test]
    fn best_game_tie_keeps_first_in_input_order() {
        let games = vec![
            game("First", 9.0, None, None),
            game("Second", 9.0, None, None),
            game("Lower", 5.0, None, None),
        ];
        let stats = compute_stats(&games);
        assert_eq!(stats.best_game.unwrap().name, "First");
    }

    #[test]
    fn unparsable_dates_fall_into_na_bucket() {
        let games = vec![
            game("A", 5.0, Some("01/03/2021"), None),
            game("B", 5.0, Some("2022"), None), // 没有第三段
            game("C", 5.0, None, None),
            game("D", 5.0, Some("01/02/"), None), // 第三段为空
        ];
        let stats = compute_stats(&games);

        // 记录一个不丢：各年份计数之和等于总数
        let total: u32 = stats.games_per_year.iter().map(|y| y.count).sum();
        assert_eq!(total, stats.total_games);

        let na = stats
            .games_per_year
            .iter()
            .find(|y| y.year == "N/A")
            .unwrap();
        assert_eq!(na.count, 3);
    }

    #[test]
    fn years_sorted_ascending_by_label() {
        let games = vec![
            game("A", 5.0, Some("01/01/2023"), None),
            game("B", 5.0, Some("01/01/2019"), None),
            game("C", 5.0, Some("01/01/2021"), None),
        ];
        let years: Vec<String> = compute_stats(&games)
            .games_per_year
            .into_iter()
            .map(|y| y.year)
            .collect();
        assert_eq!(years, vec!["2019", "2021", "2023"]);
    }

    #[test]
    fn genre_tags_are_trimmed_and_empties_dropped() {
        let games = vec![game("A", 5.0, None, Some(" RPG ,, Action ,"))];
        let stats = compute_stats(&games);

        assert_eq!(stats.genre_breakdown.len(), 2);
        assert_eq!(stats.genre_breakdown[0].name, "RPG");
        assert_eq!(stats.genre_breakdown[1].name, "Action");
    }

    #[test]
    fn genre_ranking_is_stable_for_equal_counts() {
        let games = vec![
            game("A", 5.0, None, Some("Puzzle")),
            game("B", 5.0, None, Some("Racing")),
        ];
        let stats = compute_stats(&games);

        // 同为 1 次，保持首次出现顺序
        assert_eq!(stats.genre_breakdown[0].name, "Puzzle");
        assert_eq!(stats.genre_breakdown[1].name, "Racing");
        assert_eq!(stats.top_genre, "Puzzle");
    }

    #[test]
    fn more_than_five_genres_aggregate_into_other() {
        let games = vec![
            game("A", 5.0, None, Some("G1, G1, G1")),
            game("B", 5.0, None, Some("G2, G2")),
            game("C", 5.0, None, Some("G3, G4, G5, G6, G7")),
        ];
        let stats = compute_stats(&games);

        assert_eq!(stats.genre_breakdown.len(), 6);
        let last = stats.genre_breakdown.last().unwrap();
        assert_eq!(last.name, "Other");
        // G6、G7 被合并（稳定排序下 G3..G5 占据剩余名额）
        assert_eq!(last.value, 2);

        // 全部占比之和不超过 100（允许舍入漂移）
        let percent_sum: u32 = stats.genre_breakdown.iter().map(|g| g.percent).sum();
        assert!(percent_sum <= 100 + stats.genre_breakdown.len() as u32);
    }

    #[test]
    fn no_genre_data_yields_empty_breakdown() {
        let games = vec![game("A", 5.0, None, None), game("B", 5.0, None, Some("  "))];
        let stats = compute_stats(&games);

        assert!(stats.genre_breakdown.is_empty());
        assert_eq!(stats.top_genre, "—");
    }

    #[test]
    fn rating_boundaries_belong_to_higher_bucket() {
        let games = vec![
            game("A", 2.0, None, None),
            game("B", 4.0, None, None),
            game("C", 6.0, None, None),
            game("D", 8.0, None, None),
            game("E", 10.0, None, None),
        ];
        let counts: Vec<u32> = compute_stats(&games)
            .rating_distribution
            .into_iter()
            .map(|b| b.count)
            .collect();
        // 2→[2,4), 4→[4,6), 6→[6,8), 8 和 10→[8,10]
        assert_eq!(counts, vec![0, 1, 1, 1, 2]);
    }

    #[test]
    fn bucket_counts_sum_to_total_even_for_out_of_range_ratings() {
        let games = vec![
            game("A", -1.0, None, None),
            game("B", 11.0, None, None),
            game("C", 5.0, None, None),
        ];
        let stats = compute_stats(&games);

        let sum: u32 = stats.rating_distribution.iter().map(|b| b.count).sum();
        assert_eq!(sum, stats.total_games);
        // 越界值按原样处理：-1 进第一个桶，11 进最后一个桶
        assert_eq!(stats.rating_distribution[0].count, 1);
        assert_eq!(stats.rating_distribution[4].count, 1);
    }

    #[test]
    fn same_input_produces_identical_output() {
        let games = vec![
            game("A", 9.0, Some("01/03/2023"), Some("Action")),
            game("B", 9.0, Some("02/05/2022"), Some("RPG, Action")),
        ];
        assert_eq!(compute_stats(&games), compute_stats(&games));
    }
}
