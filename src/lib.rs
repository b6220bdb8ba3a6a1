mod database;
mod entity;
mod stats;
mod steam;
mod utils;

use database::*;
use steam::client::SteamClient;
use steam::*;
use tauri::Manager;
use tauri_plugin_log::{Target, TargetKind, TimezoneStrategy};
use utils::logs::{get_tracker_log_level, set_tracker_log_level};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_window_state::Builder::new().build())
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            let window = app.get_webview_window("main").expect("no main window");
            let _ = window.show();
            let _ = window.unminimize();
            let _ = window.set_focus();
        }))
        .invoke_handler(tauri::generate_handler![
            // 游戏数据相关 commands
            insert_game,
            find_all_games,
            delete_game,
            count_games,
            game_exists,
            // 游戏统计相关 commands
            get_game_stats,
            // Steam 商店相关 commands
            search_steam_games,
            get_steam_game_details,
            check_image_exists,
            // 日志相关 commands（运行时动态调整）
            set_tracker_log_level,
            get_tracker_log_level,
        ])
        .setup(|app| {
            // 建立 SQLite 连接、初始化表结构并注册到状态管理
            let app_handle = app.handle().clone();
            tauri::async_runtime::block_on(async move {
                match connection::establish_connection(&app_handle).await {
                    Ok(conn) => {
                        log::info!("数据库连接建立成功");

                        match connection::init_schema(&conn).await {
                            Ok(_) => log::info!("表结构初始化完成"),
                            Err(e) => log::error!("表结构初始化失败: {}", e),
                        }

                        app_handle.manage(conn);
                    }
                    Err(e) => {
                        log::error!("无法建立数据库连接: {}", e);
                        panic!("数据库初始化失败: {}", e);
                    }
                }
            });

            // Steam 客户端无状态，整个应用共享一个实例
            app.manage(SteamClient::new());

            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .timezone_strategy(TimezoneStrategy::UseLocal)
                        .level(log::LevelFilter::Debug) // 允许运行时动态调整到任意级别
                        .targets([
                            Target::new(TargetKind::LogDir {
                                file_name: Some("debug".into()),
                            }),
                            Target::new(TargetKind::Stdout),
                        ])
                        .build(),
                )?;
            } else {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .timezone_strategy(TimezoneStrategy::UseLocal)
                        .level(log::LevelFilter::Debug) // 允许运行时动态调整到任意级别
                        .build(),
                )?;
            }
            log::set_max_level(log::LevelFilter::Error);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            // 监听应用退出事件
            if let tauri::RunEvent::Exit = event {
                if let Some(conn_state) = app_handle.try_state::<sea_orm::DatabaseConnection>() {
                    let conn = conn_state.inner().clone();

                    // 使用 block_on 确保数据库连接在应用退出前完全关闭
                    tauri::async_runtime::block_on(async {
                        match connection::close_connection(conn).await {
                            Ok(_) => log::info!("数据库连接已成功关闭"),
                            Err(e) => log::error!("关闭数据库连接时出错: {}", e),
                        }
                    });
                }
            }
        });
}
