#![allow(dead_code)]

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

/// Backend row ids arrive as numbers from some handlers and strings from others.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Participant {
    pub account_id: String,
    pub token_balance: f64,
    pub user_id: String,
    pub user_topic_id: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Campaign {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub shop_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub token_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "target")]
    pub target_tokens: f64,
    #[serde(default)]
    pub distributed: f64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub banner_image_url: String,
    /// 0 = active, 1 = ended
    #[serde(default)]
    pub ended: u8,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Campaign {
    pub fn is_ended(&self) -> bool {
        self.ended != 0
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParticipantsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub participants: Vec<Participant>,
    pub campaign: Campaign,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Shop {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub merchant_id: String,
    pub name: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub payment_id: String,
    #[serde(default)]
    pub profile_image_url: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub campaigns: Vec<Campaign>,
}

#[derive(Deserialize, Debug)]
pub struct ShopsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub shops: Vec<Shop>,
}

#[derive(Deserialize, Debug)]
pub struct ShopResponse {
    #[serde(default)]
    pub shop: Option<Shop>,
}

#[derive(Serialize, Debug)]
pub struct CreateShopBody<'a> {
    pub name: &'a str,
    pub profile_image_url: &'a str,
    pub theme: &'a str,
    pub campaigns: Vec<NewCampaign>,
}

/// Campaign entry as the shop update endpoint expects it. The backend issues
/// the campaign token and fills in `token_id` when it is left empty.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewCampaign {
    pub name: String,
    pub token_id: String,
    pub description: String,
    pub target: u64,
    pub distributed: u64,
    pub ended: u8,
    pub icon: String,
    pub banner_image_url: String,
}

#[derive(Serialize, Debug)]
pub struct CreateCampaignBody {
    pub campaigns: Vec<NewCampaign>,
}

#[derive(Deserialize, Debug)]
pub struct ShopUpdateEnvelope {
    pub response: ShopUpdate,
}

#[derive(Deserialize, Debug)]
pub struct ShopUpdate {
    #[serde(default)]
    pub shop: Option<Shop>,
    #[serde(default)]
    pub transaction_response: serde_json::Value,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Merchant {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub profile_image_url: String,
    #[serde(default)]
    pub account_banner_image_url: String,
    #[serde(default)]
    pub auto_offramp: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Deserialize, Debug)]
pub struct MerchantResponse {
    pub merchant: Merchant,
}

#[derive(Serialize, Debug)]
pub struct RegisterBody<'a> {
    pub username: &'a str,
    pub mobile_number: &'a str,
    pub password: &'a str,
    pub account_id: &'a str,
    pub profile_image_url: &'a str,
    pub account_banner_image_url: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct RegisterResponse {
    #[serde(default)]
    pub merchant: Option<Merchant>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Withdrawal {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub merchant_id: String,
    pub amount: f64,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub receiver: String,
    pub status: WithdrawalStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct WithdrawalsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub withdrawals: Vec<Withdrawal>,
}

pub fn total_withdrawn(withdrawals: &[Withdrawal]) -> f64 {
    withdrawals.iter().map(|w| w.amount).sum()
}

#[derive(Serialize)]
pub struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participants_response_parses_backend_payload() {
        let payload = r#"{
            "participants": [
                {"account_id": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin", "token_balance": 500, "user_id": "u1", "user_topic_id": "0.0.1"},
                {"account_id": "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T", "token_balance": 1500.5, "user_id": "u2", "user_topic_id": "0.0.2"}
            ],
            "campaign": {"id": "c1", "name": "Launch", "target_tokens": 10000, "distributed": 6000, "ended": 0}
        }"#;

        let response: ParticipantsResponse = serde_json::from_str(payload).unwrap();

        assert_eq!(response.participants.len(), 2);
        assert_eq!(response.participants[1].token_balance, 1500.5);
        assert_eq!(response.campaign.distributed, 6000.0);
        assert!(!response.campaign.is_ended());
    }

    #[test]
    fn null_or_missing_participants_is_an_empty_list() {
        for payload in [
            r#"{"participants": null, "campaign": {"id": "c1", "distributed": 10}}"#,
            r#"{"campaign": {"id": "c1", "distributed": 10}}"#,
        ] {
            let response: ParticipantsResponse = serde_json::from_str(payload).unwrap();

            assert!(response.participants.is_empty());
        }
    }

    #[test]
    fn shops_envelope_accepts_numeric_ids_and_null_list() {
        let payload = r#"{"shops": [
            {"id": 3, "name": "Corner", "payment_id": "pay-3", "profile_image_url": "",
             "campaigns": [{"id": 9, "name": "Launch", "token_id": "", "target": 5000, "distributed": 0, "ended": 0}]}
        ]}"#;

        let response: ShopsResponse = serde_json::from_str(payload).unwrap();

        assert_eq!(response.shops[0].id, "3");
        assert_eq!(response.shops[0].campaigns[0].id, "9");
        assert_eq!(response.shops[0].campaigns[0].target_tokens, 5000.0);

        let empty: ShopsResponse = serde_json::from_str(r#"{"shops": null}"#).unwrap();
        assert!(empty.shops.is_empty());
    }

    #[test]
    fn withdrawals_sum_and_unknown_status() {
        let payload = r#"{"withdrawals": [
            {"id": "w1", "merchant_id": "m1", "amount": 150, "fee": 2, "receiver": "r", "status": "completed", "deleted_at": null},
            {"id": 2, "merchant_id": 1, "amount": 50, "status": "on_hold"}
        ]}"#;

        let response: WithdrawalsResponse = serde_json::from_str(payload).unwrap();

        assert_eq!(response.withdrawals[0].status, WithdrawalStatus::Completed);
        assert_eq!(response.withdrawals[1].status, WithdrawalStatus::Unknown);
        assert_eq!(total_withdrawn(&response.withdrawals), 200.0);
    }

    #[test]
    fn new_campaign_uses_backend_field_names() {
        let body = CreateCampaignBody {
            campaigns: vec![NewCampaign {
                name: "Launch".to_string(),
                token_id: String::new(),
                description: "first".to_string(),
                target: 10_000,
                distributed: 0,
                ended: 0,
                icon: String::new(),
                banner_image_url: String::new(),
            }],
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["campaigns"][0]["target"], 10_000);
        assert_eq!(json["campaigns"][0]["ended"], 0);
    }
}
