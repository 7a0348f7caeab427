pub const LOGIN: &str = "/login";

pub const REGISTER: &str = "/register";

pub const MERCHANTS_BY_ID: &str = "/merchants-id";

pub const SHOPS: &str = "/shops";

pub const MERCHANT_SHOPS: &str = "/shops/merchant";

pub const CAMPAIGN_PARTICIPANTS: &str = "/shops/campaigns/participants";

pub const CAMPAIGNS: &str = "/shops/campaigns";

pub const WITHDRAWALS: &str = "/withdrawals";
