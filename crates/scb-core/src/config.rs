use std::{env, fs, path::Path};

use crate::{
    errors::Error, ledger::DEFAULT_HISTORY_LIMIT, replies::DEFAULT_REBUKE,
    triggers::sticker::StickerSet, Result,
};

pub const DEFAULT_PORT: u16 = 10_000;

/// How Telegram updates reach the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Long polling, no HTTP listener.
    Polling,
    /// Long polling plus a `GET /` health endpoint for hosts that probe a port.
    PollingWithHealth { port: u16 },
    /// Telegram pushes updates to a secret path under `public_url` derived from the
    /// token; `GET /` answers health checks.
    Webhook { public_url: String, port: u16 },
}

impl DeliveryMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Polling => "polling",
            Self::PollingWithHealth { .. } => "polling-health",
            Self::Webhook { .. } => "webhook",
        }
    }
}

/// Typed configuration, read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub delivery: DeliveryMode,
    pub drop_pending_updates: bool,

    // Ledger
    pub typist_history_limit: usize,

    // Sticker triggers
    pub shoot_stickers: StickerSet,
    pub rebuke_stickers: StickerSet,
    pub rebuke_text: String,

    // Optional behavior
    pub tally_keyword: Option<String>,
    pub reply_seed: Option<u64>,
}

impl Config {
    /// Read `.env` (without overriding existing variables), then the process environment.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. `load` passes the process environment.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_str = |key: &str| get(key).and_then(non_empty);

        let bot_token = env_str("BOT_TOKEN")
            .or_else(|| env_str("TELEGRAM_BOT_TOKEN"))
            .ok_or_else(|| {
                Error::Config("BOT_TOKEN environment variable is required".to_string())
            })?;

        let port = match env_str("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::Config(format!("PORT must be a port number ({raw}): {e}")))?,
            None => DEFAULT_PORT,
        };

        // Render exposes the public URL as RENDER_EXTERNAL_URL.
        let public_url = env_str("PUBLIC_URL")
            .or_else(|| env_str("RENDER_EXTERNAL_URL"))
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .and_then(non_empty);

        let delivery = match env_str("BOT_MODE").map(|m| m.trim().to_lowercase()) {
            None if public_url.is_some() => webhook_mode(public_url, port)?,
            None => DeliveryMode::Polling,
            Some(mode) => match mode.as_str() {
                "polling" => DeliveryMode::Polling,
                "polling-health" | "polling_health" | "health" => {
                    DeliveryMode::PollingWithHealth { port }
                }
                "webhook" => webhook_mode(public_url, port)?,
                other => {
                    return Err(Error::Config(format!(
                        "BOT_MODE must be polling, polling-health or webhook (got {other})"
                    )))
                }
            },
        };

        let drop_pending_updates = parse_bool(get("DROP_PENDING_UPDATES")).unwrap_or(true);
        let typist_history_limit = get("TYPIST_HISTORY_LIMIT")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .max(1);

        let defaults = StickerSet::shooting_default();
        let shoot_stickers = StickerSet {
            file_ids: parse_csv(get("SHOOT_STICKER_FILE_IDS")).unwrap_or(defaults.file_ids),
            unique_ids: parse_csv(get("SHOOT_STICKER_UNIQUE_IDS")).unwrap_or(defaults.unique_ids),
        };
        let rebuke_stickers = StickerSet {
            file_ids: parse_csv(get("REBUKE_STICKER_FILE_IDS")).unwrap_or_default(),
            unique_ids: parse_csv(get("REBUKE_STICKER_UNIQUE_IDS")).unwrap_or_default(),
        };
        let rebuke_text = env_str("REBUKE_TEXT").unwrap_or_else(|| DEFAULT_REBUKE.to_string());

        let tally_keyword = env_str("TALLY_KEYWORD").map(|k| k.trim().to_string());
        let reply_seed = get("REPLY_SEED").and_then(|s| s.trim().parse::<u64>().ok());

        Ok(Self {
            bot_token,
            delivery,
            drop_pending_updates,
            typist_history_limit,
            shoot_stickers,
            rebuke_stickers,
            rebuke_text,
            tally_keyword,
            reply_seed,
        })
    }
}

fn webhook_mode(public_url: Option<String>, port: u16) -> Result<DeliveryMode> {
    let public_url = public_url.ok_or_else(|| {
        Error::Config(
            "webhook mode needs PUBLIC_URL or RENDER_EXTERNAL_URL (e.g. https://your-app.onrender.com)"
                .to_string(),
        )
    })?;
    Ok(DeliveryMode::Webhook { public_url, port })
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim().trim_start_matches("export ").trim();
        if key.is_empty() || env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        env::set_var(key, unquote(v.trim()));
    }
}

fn unquote(val: &str) -> &str {
    let quoted = val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')));
    if quoted {
        &val[1..val.len() - 1]
    } else {
        val
    }
}

fn parse_bool(v: Option<String>) -> Option<bool> {
    v.map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

/// `None` when the variable is unset; an empty set when it is set but blank.
fn parse_csv<C>(v: Option<String>) -> Option<C>
where
    C: FromIterator<String>,
{
    let v = v?;
    Some(
        v.split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn token_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(load(&[("BOT_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn accepts_teloxide_style_token_name() {
        let cfg = load(&[("TELEGRAM_BOT_TOKEN", "t")]).unwrap();
        assert_eq!(cfg.bot_token, "t");
    }

    #[test]
    fn defaults_to_polling_without_public_url() {
        let cfg = load(&[("BOT_TOKEN", "t")]).unwrap();
        assert_eq!(cfg.delivery, DeliveryMode::Polling);
        assert!(cfg.drop_pending_updates);
        assert_eq!(cfg.typist_history_limit, 50);
        assert_eq!(cfg.rebuke_text, DEFAULT_REBUKE);
        assert!(cfg.rebuke_stickers.is_empty());
        assert_eq!(cfg.shoot_stickers, StickerSet::shooting_default());
        assert_eq!(cfg.tally_keyword, None);
        assert_eq!(cfg.reply_seed, None);
    }

    #[test]
    fn public_url_selects_webhook_and_strips_slash() {
        let cfg = load(&[
            ("BOT_TOKEN", "t"),
            ("RENDER_EXTERNAL_URL", "https://bot.example.com/"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(
            cfg.delivery,
            DeliveryMode::Webhook {
                public_url: "https://bot.example.com".to_string(),
                port: 8080,
            }
        );
    }

    #[test]
    fn explicit_mode_wins_over_public_url() {
        let cfg = load(&[
            ("BOT_TOKEN", "t"),
            ("PUBLIC_URL", "https://bot.example.com"),
            ("BOT_MODE", "Polling-Health"),
        ])
        .unwrap();
        assert_eq!(
            cfg.delivery,
            DeliveryMode::PollingWithHealth { port: DEFAULT_PORT }
        );
        assert_eq!(cfg.delivery.label(), "polling-health");
    }

    #[test]
    fn webhook_without_url_is_an_error() {
        assert!(load(&[("BOT_TOKEN", "t"), ("BOT_MODE", "webhook")]).is_err());
        assert!(load(&[("BOT_TOKEN", "t"), ("BOT_MODE", "carrier-pigeon")]).is_err());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(load(&[("BOT_TOKEN", "t"), ("PORT", "http")]).is_err());
    }

    #[test]
    fn sticker_ids_come_from_csv() {
        let cfg = load(&[
            ("BOT_TOKEN", "t"),
            ("SHOOT_STICKER_UNIQUE_IDS", "a, b,,"),
            ("REBUKE_STICKER_FILE_IDS", "bleach"),
            ("REBUKE_TEXT", "no"),
        ])
        .unwrap();
        assert_eq!(
            cfg.shoot_stickers.unique_ids,
            HashSet::from(["a".to_string(), "b".to_string()])
        );
        // File ids keep their default when only unique ids are overridden.
        assert_eq!(
            cfg.shoot_stickers.file_ids,
            StickerSet::shooting_default().file_ids
        );
        assert!(cfg.rebuke_stickers.file_ids.contains("bleach"));
        assert_eq!(cfg.rebuke_text, "no");
    }

    #[test]
    fn optional_settings_parse() {
        let cfg = load(&[
            ("BOT_TOKEN", "t"),
            ("DROP_PENDING_UPDATES", "off"),
            ("TYPIST_HISTORY_LIMIT", "0"),
            ("TALLY_KEYWORD", " sus "),
            ("REPLY_SEED", "42"),
        ])
        .unwrap();
        assert!(!cfg.drop_pending_updates);
        assert_eq!(cfg.typist_history_limit, 1);
        assert_eq!(cfg.tally_keyword.as_deref(), Some("sus"));
        assert_eq!(cfg.reply_seed, Some(42));
    }

    #[test]
    fn unquote_strips_matching_quotes() {
        assert_eq!(unquote("\"abc\""), "abc");
        assert_eq!(unquote("'abc'"), "abc");
        assert_eq!(unquote("\"abc"), "\"abc");
        assert_eq!(unquote("\""), "\"");
    }
}
