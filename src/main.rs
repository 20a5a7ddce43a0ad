use portfolio_likes::{
    application::like::{dto::ActivationOutcome, use_case::LikeController},
    config::{Config, StoreBackend},
    domain::{like::repository::LikeStore, notification::notifier::Notifier},
    infrastructure::{
        database::pool::create_pool,
        identity::id_token_provider::{IdTokenIdentityProvider, PresetCredential},
        notification::{emailjs_notifier::EmailJsNotifier, tracing_notifier::TracingNotifier},
        repositories::{
            memory_like_store::MemoryLikeStore, redis_like_store::RedisLikeStore,
            sqlx_like_store::SqlxLikeStore,
        },
    },
    presentation::{
        console::{ConsoleContactForm, ConsoleToaster, ConsoleView},
        view::{LikeButtonView, ViewSet},
    },
};
use std::sync::Arc;
use tracing::info;

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn LikeStore>> {
    let store: Arc<dyn LikeStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryLikeStore::new()),
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
            let db = create_pool(
                url,
                config.database_max_connections,
                config.external_call_timeout(),
            )
            .await?;
            sqlx::migrate!("./migrations").run(&db).await?;
            Arc::new(SqlxLikeStore::new(db))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("REDIS_URL is not set"))?;
            let client = redis::Client::open(url)?;
            Arc::new(
                RedisLikeStore::connect(
                    client,
                    config.likes_collection.clone(),
                    config.external_call_timeout(),
                )
                .await?,
            )
        }
    };
    Ok(store)
}

fn build_notifier(config: &Config) -> anyhow::Result<Arc<dyn Notifier>> {
    match config.emailjs_settings() {
        Some(settings) => Ok(Arc::new(EmailJsNotifier::new(
            settings,
            config.external_call_timeout(),
        )?)),
        None => Ok(Arc::new(TracingNotifier)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,portfolio_likes=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    info!(backend = ?config.store_backend, "starting like controller");

    let store = build_store(&config).await?;
    let notifier = build_notifier(&config)?;
    let identity = Arc::new(
        IdTokenIdentityProvider::new(
            &config.id_token_settings(),
            Arc::new(PresetCredential::new(config.like_id_token.clone())),
        )
        .with_session(config.like_session_token.clone()),
    );

    let buttons: Vec<Arc<dyn LikeButtonView>> = ["header", "sidebar", "footer"]
        .into_iter()
        .map(|placement| Arc::new(ConsoleView::new(placement)) as Arc<dyn LikeButtonView>)
        .collect();

    let controller = LikeController::new(
        identity,
        store,
        notifier,
        ViewSet::new(buttons),
        Arc::new(ConsoleToaster),
        config.like_settings(),
    )
    .with_contact_form(Arc::new(ConsoleContactForm));

    controller.initialize().await;

    if config.like_id_token.is_some() {
        let outcome = controller.on_activate().await;
        info!(?outcome, "like button activated");
        if outcome == ActivationOutcome::Liked {
            // Leave room for the count animation and the detached email task.
            tokio::time::sleep(config.like_settings().count_animation).await;
        }
    }

    println!("{}", serde_json::to_string_pretty(&controller.snapshot())?);
    Ok(())
}
