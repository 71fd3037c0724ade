//! 种子目录
//!
//! 奖励商品、已有选择记录和用户资料的固定数据，mock 服务启动时写入内存存储。

use reward_shared::models::{RewardOffer, UserProfile, UserReward};

const SEED_TIMESTAMP: &str = "2023-09-04T14:32:21Z";

fn offer(
    id: &str,
    name: &str,
    value: f32,
    total_points: i32,
    description: &str,
    logo_url: &str,
) -> RewardOffer {
    RewardOffer {
        id: id.to_string(),
        name: name.to_string(),
        value,
        total_points,
        description: description.to_string(),
        logo_url: logo_url.to_string(),
    }
}

/// 四个奖励商品 RWD34589 ~ RWD34592
pub fn seed_offers() -> Vec<RewardOffer> {
    vec![
        offer(
            "RWD34589",
            "Target",
            25.0,
            500,
            "A Target GiftCard is your opportunity to shop for thousands of items at more than 1,900 Target stores in the U.S., as well as Target.com. From home décor, small appliances and electronics to fashion, accessories and music, find exactly what you’re looking for at Target. No fees. No expiration. No kidding.™",
            "https://drive.google.com/file/d/1FEOGLEG99HsttPBXliXUi8aWYqnNmPH2/view?usp=drive_link",
        ),
        offer(
            "RWD34590",
            "Starbucks Coffee",
            15.0,
            200,
            "Enjoy a PM pick-me-up with a lunch sandwich, protein box or a bag of coffee—including Starbucks VIA Instant",
            "https://drive.google.com/file/d/1nku2n63zXBfrA3Bf0eAVWqu45mFLnaRE/view?usp=drive_link",
        ),
        offer(
            "RWD34591",
            "Jumba Juice",
            6.0,
            600,
            "Let Jamba come to you – wherever you are. Get our Whirld Famous smoothies, juices, and bowls delivered in just a few clicks. My Jamba rewards members can also apply rewards & earn points on delivery orders when you order on jamba.com or the jamba app!",
            "https://drive.google.com/file/d/1khJX-N7N8xHrV5o9GvqsH7wApDoY8ej0/view?usp=drive_link",
        ),
        offer(
            "RWD34592",
            "Grubhub",
            10.0,
            500,
            "Grubhub offers quick, easy food delivery, either online or through a mobile app. Customers can select from any local participating restaurant. They can add whatever they like to their order and have it delivered right to their home or office by one of Grubhub's delivery drivers. You can save even more by using a Grubhub promo code on your order",
            "https://drive.google.com/file/d/14S6olzLfOQJatEr4FkXyB_m1l31H2XyJ/view?usp=drive_link",
        ),
    ]
}

pub fn seed_user_rewards() -> Vec<UserReward> {
    [("U451298", "RWD34589"), ("U451299", "RWD34590")]
        .into_iter()
        .map(|(user_id, reward_id)| UserReward {
            user_id: user_id.to_string(),
            selected_reward_deal_id: reward_id.to_string(),
            timestamp: SEED_TIMESTAMP.to_string(),
            accepted_tnc: true,
        })
        .collect()
}

pub fn seed_users() -> Vec<UserProfile> {
    vec![
        UserProfile::new("U451298", "John", "Doe", "john@example.com"),
        UserProfile::new("U451299", "Katie", "Smith", "katie@example.com"),
        UserProfile::new("U451300", "Peter", "Parker", "peter@example.com"),
    ]
}
