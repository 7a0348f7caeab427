pub const SOLANA_EXPLORER_URL: &str = "https://explorer.solana.com/tx/";

pub const LOGS_DIR: &str = "logs";

pub const LOG_FILE_PREFIX: &str = "campaign-airdrop.log";

pub const AUTH_FILE_PATH: &str = "data/auth.json";
