use std::sync::Arc;

use teloxide::{
    dispatching::{Dispatcher, UpdateHandler},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    update_listeners::{webhooks, Polling, UpdateListener},
};

use scb_core::{
    bot::ShotCookBot,
    config::{Config, DeliveryMode},
    engine::TriggerEngine,
    messaging::port::MessagingPort,
};

use crate::{handlers, health, TelegramMessenger};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub bot: Arc<ShotCookBot>,
}

pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message))
}

/// Build the bot from config and run it in the configured delivery mode.
pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        tracing::info!(username = %me.username(), "shot-cook bot started");
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let engine = TriggerEngine::from_config(&cfg)?;
    tracing::info!(
        history_limit = engine.ledger().limit(),
        tally = engine.tally().is_some(),
        "trigger engine ready"
    );

    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        bot: Arc::new(ShotCookBot::new(engine, messenger)),
    });

    match &cfg.delivery {
        DeliveryMode::Polling => run_polling(bot, state).await,
        DeliveryMode::PollingWithHealth { port } => {
            let port = *port;
            tokio::spawn(async move {
                if let Err(e) = health::serve_health(port).await {
                    tracing::error!(error = %e, "health endpoint failed");
                }
            });
            run_polling(bot, state).await
        }
        DeliveryMode::Webhook { public_url, port } => {
            run_webhook(bot, state, public_url, *port).await
        }
    }
}

pub async fn run_polling(bot: Bot, state: Arc<AppState>) -> anyhow::Result<()> {
    tracing::info!("receiving updates by long polling");

    let mut polling = Polling::builder(bot.clone());
    if state.cfg.drop_pending_updates {
        polling = polling.drop_pending_updates();
    }
    // A webhook left over from another deployment blocks getUpdates.
    let listener = polling.delete_webhook().await.build();

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|_upd| async {})
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    Ok(())
}

/// Secret route derived from the bot token.
///
/// axum reads `:` and `*` as route parameters, so a raw `123:ABC` token would
/// match `/123:<anything>`. Everything outside `[A-Za-z0-9_-]` becomes `_` so
/// the route is a single literal segment.
pub fn webhook_path(token: &str) -> String {
    let segment: String = token
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("/{segment}")
}

/// Telegram calls `{public_url}{webhook_path(token)}`; the listener serves the same path.
pub fn webhook_url(public_url: &str, token: &str) -> anyhow::Result<url::Url> {
    let raw = format!("{}{}", public_url.trim_end_matches('/'), webhook_path(token));
    url::Url::parse(&raw).map_err(|e| anyhow::anyhow!("invalid public URL {public_url}: {e}"))
}

pub async fn run_webhook(
    bot: Bot,
    state: Arc<AppState>,
    public_url: &str,
    port: u16,
) -> anyhow::Result<()> {
    let addr = health::listen_addr(port);
    let url = webhook_url(public_url, &state.cfg.bot_token)?;

    let mut options = webhooks::Options::new(addr, url);
    if state.cfg.drop_pending_updates {
        options = options.drop_pending_updates();
    }

    let (mut listener, stop_flag, webhook_router) =
        webhooks::axum_to_router(bot.clone(), options).await?;
    let app = webhook_router.merge(health::health_router());

    let server = axum::Server::try_bind(&addr)?;
    tracing::info!(%addr, public_url, "receiving updates by webhook");

    let stop_token = listener.stop_token();
    tokio::spawn(async move {
        let served = server
            .serve(app.into_make_service())
            .with_graceful_shutdown(stop_flag)
            .await;
        if let Err(e) = served {
            tracing::error!(error = %e, "webhook server failed");
            stop_token.stop();
        }
    });

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|_upd| async {})
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        routing::post,
        Router,
    };
    use tower::ServiceExt;

    const TOKEN: &str = "123456:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

    async fn status(app: &Router, method: Method, path: &str) -> StatusCode {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        app.clone().oneshot(req).await.unwrap().status()
    }

    #[test]
    fn webhook_url_appends_token_path() {
        let url = webhook_url("https://bot.example.com/", "123:abc").unwrap();
        assert_eq!(url.as_str(), "https://bot.example.com/123_abc");
        assert_eq!(url.path(), "/123_abc");
    }

    #[test]
    fn webhook_path_is_a_literal_segment() {
        let path = webhook_path(TOKEN);
        assert_eq!(path, "/123456_AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw");
        assert!(!path[1..].contains(&[':', '*', '/'][..]));
        assert_eq!(webhook_path("a*b/c"), "/a_b_c");
    }

    #[tokio::test]
    async fn webhook_route_rejects_other_token_suffixes() {
        let url = webhook_url("https://bot.example.com", TOKEN).unwrap();
        let app = Router::new()
            .route(url.path(), post(|| async { "update" }))
            .merge(health::health_router());

        assert_eq!(status(&app, Method::POST, url.path()).await, StatusCode::OK);
        assert_eq!(
            status(&app, Method::POST, "/123456:WRONG").await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(&app, Method::POST, "/123456_WRONG").await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(&app, Method::GET, "/").await, StatusCode::OK);
    }

    #[test]
    fn webhook_url_rejects_garbage() {
        assert!(webhook_url("not a url", "t").is_err());
    }
}
