//! Startup wiring without a database: settings select the in-memory store.

use std::ffi::OsString;
use std::net::SocketAddr;

use env_lock::lock_env;
use groundwork::domain::ports::{ArticlesCommand, ArticlesQuery};
use groundwork::domain::{Article, Visibility};
use groundwork::settings::Settings;
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};

#[expect(
    dead_code,
    reason = "server config include exposes members unused in this integration test"
)]
#[path = "../src/server/config.rs"]
mod server_config;
pub use server_config::ServerConfig;

#[path = "../src/server/state_builders.rs"]
mod state_builders;

const DATABASE_KEYS: [&str; 4] = [
    "APP_DATABASE_URL",
    "APP_DB_ENGINE",
    "APP_DB_NAME",
    "APP_IN_PRODUCTION",
];

fn load_settings(in_production: Option<&str>) -> Settings {
    let vars = DATABASE_KEYS.map(|key| {
        let value = (key == "APP_IN_PRODUCTION")
            .then(|| in_production.map(str::to_owned))
            .flatten();
        (key, value)
    });
    let _guard = lock_env(vars);
    Settings::load_from_iter([OsString::from("groundwork")]).expect("settings load")
}

#[fixture]
fn bind_addr() -> SocketAddr {
    "127.0.0.1:0".parse().expect("socket addr")
}

#[rstest]
#[case(None, false)]
#[case(Some("false"), true)]
#[case(Some("true"), false)]
fn debug_observers_follow_production_flag(
    bind_addr: SocketAddr,
    #[case] in_production: Option<&str>,
    #[case] debug: bool,
) {
    let settings = load_settings(in_production);
    let config = ServerConfig::new(&settings, bind_addr);
    assert_eq!(config.debug(), debug);
    assert_eq!(config.bind_addr(), bind_addr);
}

#[rstest]
#[tokio::test]
async fn without_database_settings_articles_live_in_memory(bind_addr: SocketAddr) {
    let settings = load_settings(None);
    assert_eq!(settings.database_url(), Ok(None));
    let config = ServerConfig::new(&settings, bind_addr);

    let state = state_builders::build_http_state(&config);
    let article = Article::try_new("startup", "").expect("valid article");
    let created = state
        .articles_command
        .create(article)
        .await
        .expect("create in memory");
    let listed = state
        .articles
        .list(Visibility::Active)
        .await
        .expect("list in memory");
    assert_eq!(listed, vec![created]);
}
