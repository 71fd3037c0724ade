//! 跨服务共享的数据模型
//!
//! 这些结构体就是服务之间 HTTP 调用的 JSON 载荷，字段统一使用 camelCase。

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};

/// 用户资料（由身份目录持有）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserProfile {
    pub fn new(
        user_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// 转发给供应商的奖励分配
///
/// 由选择编排服务创建，供应商网关只追加保存，从不修改。
/// 反序列化只接受 JSON 对象，缺失的字段取空字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRewardAssignment {
    pub reward_id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AssignmentFields {
    reward_id: String,
    user_id: String,
    first_name: String,
    last_name: String,
    email: String,
}

impl<'de> Deserialize<'de> for VendorRewardAssignment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // 先按对象读取，数组形式的载荷在这里被拒绝
        let object = Map::<String, Value>::deserialize(deserializer)?;
        let fields: AssignmentFields =
            serde_json::from_value(Value::Object(object)).map_err(D::Error::custom)?;

        Ok(Self {
            reward_id: fields.reward_id,
            user_id: fields.user_id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
        })
    }
}

impl VendorRewardAssignment {
    /// 用身份目录返回的资料组装分配记录
    ///
    /// user_id 取请求中的值，不取资料中的值
    pub fn from_profile(reward_id: &str, user_id: &str, profile: &UserProfile) -> Self {
        Self {
            reward_id: reward_id.to_string(),
            user_id: user_id.to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
        }
    }
}

/// 奖励确认回调载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardConfirmation {
    /// 16 位数字确认号
    pub reward_confirmation_number: String,
    pub user_id: String,
    pub reward_id: String,
}

/// 奖励商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardOffer {
    pub id: String,
    pub name: String,
    pub value: f32,
    pub total_points: i32,
    pub description: String,
    pub logo_url: String,
}

/// 用户已选择的奖励
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReward {
    pub user_id: String,
    pub selected_reward_deal_id: String,
    pub timestamp: String,
    #[serde(rename = "acceptedTnC")]
    pub accepted_tnc: bool,
}
