//! Bot command parsing.

/// Watchlist subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchlistAction {
    Show,
    Add(String),
    Remove(String),
}

/// Parsed chat command.
///
/// Command keywords are the Indonesian retail-trading terms users
/// actually type (`/analisis`, `/bpjs`, `/bsjp`); ticker arguments are
/// passed through raw and normalized later by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Help,
    Price { code: String },
    Analyze { code: String },
    Trending,
    TopGainers,
    Losers,
    Bpjs,
    Bsjp,
    Watchlist(WatchlistAction),
    Subscribe,
    Unsubscribe,
    /// A slash command with a missing required argument
    MissingArg { usage: &'static str },
    Unknown,
}

impl BotCommand {
    /// Parse a message text into a command.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if !text.starts_with('/') {
            return BotCommand::Unknown;
        }

        let parts: Vec<&str> = text[1..].split_whitespace().collect();
        // Strip the @botname suffix groups append to commands.
        let keyword = parts
            .first()
            .map(|s| s.split('@').next().unwrap_or(s).to_lowercase());

        match keyword.as_deref() {
            Some("start") | Some("help") => BotCommand::Help,
            Some("price") => match parts.get(1) {
                Some(code) => BotCommand::Price {
                    code: code.to_string(),
                },
                None => BotCommand::MissingArg {
                    usage: "/price <KODE> - contoh: /price BBCA",
                },
            },
            Some("analisis") => match parts.get(1) {
                Some(code) => BotCommand::Analyze {
                    code: code.to_string(),
                },
                None => BotCommand::MissingArg {
                    usage: "/analisis <KODE> - contoh: /analisis BBCA",
                },
            },
            Some("trending") => BotCommand::Trending,
            Some("topgainers") => BotCommand::TopGainers,
            Some("losers") => BotCommand::Losers,
            Some("bpjs") => BotCommand::Bpjs,
            Some("bsjp") => BotCommand::Bsjp,
            Some("watchlist") => {
                let action = parts.get(1).map(|s| s.to_lowercase());
                match (action.as_deref(), parts.get(2)) {
                    (Some("add"), Some(code)) => {
                        BotCommand::Watchlist(WatchlistAction::Add(code.to_uppercase()))
                    }
                    (Some("remove"), Some(code)) => {
                        BotCommand::Watchlist(WatchlistAction::Remove(code.to_uppercase()))
                    }
                    (Some("add"), None) | (Some("remove"), None) => BotCommand::MissingArg {
                        usage: "/watchlist add <KODE> | /watchlist remove <KODE>",
                    },
                    _ => BotCommand::Watchlist(WatchlistAction::Show),
                }
            }
            Some("subscribe") => BotCommand::Subscribe,
            Some("unsubscribe") => BotCommand::Unsubscribe,
            _ => BotCommand::Unknown,
        }
    }
}
