//! 领域模型 (Domain Models)
//!
//! 全部是远端拥有的记录，本地只保存拉取到的快照。

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::access::Role;

// =========================================================
// 会话 (Session)
// =========================================================

/// 用户资料，登录成功后由服务端返回
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

/// 当前标签页的会话
///
/// 令牌存在即视为已认证，本地不校验有效期。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// 会话邮箱，空字符串视为缺失
    pub fn email(&self) -> Option<&str> {
        let email = self.user.email.trim();
        (!email.is_empty()).then_some(email)
    }
}

// =========================================================
// 预约 (Booking)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BookingOwner {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// 服务端的预约记录，客户端只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub slot: Option<String>,
    /// 预约日期（`YYYY-MM-DD`），旧记录可能没有
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// 未展开的用户引用（只有 id 字符串）按缺失处理
    #[serde(default, deserialize_with = "owner_or_none")]
    pub user: Option<BookingOwner>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// 列表里展示的时段，空值和 "Invalid Date" 显示为 N/A
    pub fn slot_label(&self) -> &str {
        match self.slot.as_deref() {
            Some(slot) if !slot.is_empty() && slot != "Invalid Date" => slot,
            _ => "N/A",
        }
    }

    pub fn owner_email(&self) -> &str {
        match self.user.as_ref() {
            Some(owner) if !owner.email.is_empty() => &owner.email,
            _ => "N/A",
        }
    }

    pub fn owner_name(&self) -> &str {
        match self.user.as_ref() {
            Some(owner) if !owner.name.trim().is_empty() => &owner.name,
            _ => "N/A",
        }
    }
}

fn owner_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<BookingOwner>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OwnerField {
        Populated(BookingOwner),
        Other(IgnoredAny),
    }

    Ok(match OwnerField::deserialize(deserializer)? {
        OwnerField::Populated(owner) => Some(owner),
        OwnerField::Other(_) => None,
    })
}

// =========================================================
// 时段 (Slots)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SlotStatus {
    #[serde(rename = "isFull", default)]
    pub is_full: bool,
}

/// 时段表：展示用时间字符串 -> 状态
///
/// 服务端返回 JSON 对象，这里按原始键顺序保存。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotMap {
    entries: Vec<(String, SlotStatus)>,
}

impl SlotMap {
    pub fn new(entries: Vec<(String, SlotStatus)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, SlotStatus)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 未约满的时段标签，保持原始顺序
    pub fn available_labels(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, status)| !status.is_full)
            .map(|(label, _)| label.clone())
            .collect()
    }
}

impl<'de> Deserialize<'de> for SlotMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SlotMapVisitor;

        impl<'de> Visitor<'de> for SlotMapVisitor {
            type Value = SlotMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of slot label to slot status")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SlotMap, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, status)) = access.next_entry::<String, SlotStatus>()? {
                    entries.push((label, status));
                }
                Ok(SlotMap { entries })
            }
        }

        deserializer.deserialize_map(SlotMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_map_keeps_source_order_and_drops_full_slots() {
        let json = r#"{
            "10:00 AM": {"isFull": false},
            "08:00 AM": {"isFull": false},
            "09:00 AM": {"isFull": true, "count": 4}
        }"#;
        let slots: SlotMap = serde_json::from_str(json).unwrap();
        assert_eq!(slots.entries().len(), 3);
        assert_eq!(slots.available_labels(), vec!["10:00 AM", "08:00 AM"]);
    }

    #[test]
    fn only_free_slot_is_selectable() {
        let json = r#"{"08:00 AM":{"isFull":false},"09:00 AM":{"isFull":true}}"#;
        let slots: SlotMap = serde_json::from_str(json).unwrap();
        assert_eq!(slots.available_labels(), vec!["08:00 AM".to_string()]);
    }

    #[test]
    fn empty_slot_map_has_no_options() {
        let slots: SlotMap = serde_json::from_str("{}").unwrap();
        assert!(slots.is_empty());
        assert!(slots.available_labels().is_empty());
    }

    #[test]
    fn booking_reads_server_field_names() {
        let json = r#"{
            "_id": "b1",
            "name": "Ann",
            "mobile": "1111111111",
            "slot": "08:00 AM",
            "date": "2025-03-04",
            "user": {"email": "ann@example.com", "name": "Ann"},
            "createdAt": "2025-03-01T09:30:00.000Z",
            "__v": 0
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, "b1");
        assert_eq!(booking.owner_email(), "ann@example.com");
        assert_eq!(booking.date.as_deref(), Some("2025-03-04"));
        assert!(booking.created_at.is_some());
        assert_eq!(booking.message, None);
    }

    #[test]
    fn slot_label_hides_invalid_values() {
        let mut booking = Booking {
            slot: Some("Invalid Date".into()),
            ..Default::default()
        };
        assert_eq!(booking.slot_label(), "N/A");
        booking.slot = None;
        assert_eq!(booking.slot_label(), "N/A");
        booking.slot = Some("11:00 AM".into());
        assert_eq!(booking.slot_label(), "11:00 AM");
        assert_eq!(booking.owner_email(), "N/A");
        assert_eq!(booking.owner_name(), "N/A");
    }

    #[test]
    fn owner_name_falls_back_when_blank() {
        let booking: Booking =
            serde_json::from_str(r#"{"_id":"b1","user":{"email":"a@x.io","name":"Ann"}}"#).unwrap();
        assert_eq!(booking.owner_name(), "Ann");
        assert_eq!(booking.id, "b1");

        let blank: Booking =
            serde_json::from_str(r#"{"_id":"b2","user":{"email":"a@x.io","name":" "}}"#).unwrap();
        assert_eq!(blank.owner_name(), "N/A");
        assert_eq!(blank.owner_email(), "a@x.io");
    }

    #[test]
    fn unpopulated_owner_reference_decodes_as_missing() {
        let json = r#"[
            {"_id":"b1","name":"Ann","user":"64f0c0ffee"},
            {"_id":"b2","name":"Bob","user":null},
            {"_id":"b3","name":"Cy","user":{"email":"cy@x.io","name":"Cy"}}
        ]"#;
        let list: Vec<Booking> = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].user, None);
        assert_eq!(list[0].owner_email(), "N/A");
        assert_eq!(list[1].user, None);
        assert_eq!(list[2].owner_email(), "cy@x.io");
    }

    #[test]
    fn login_user_defaults_unknown_role_to_user() {
        let user: UserProfile =
            serde_json::from_str(r#"{"email":"a@b.co","name":"A","role":"doctor"}"#).unwrap();
        assert_eq!(user.role, Role::User);

        let admin: UserProfile =
            serde_json::from_str(r#"{"_id":"u9","email":"a@b.co","name":"A","role":"admin"}"#)
                .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.id.as_deref(), Some("u9"));
    }

    #[test]
    fn session_email_treats_blank_as_missing() {
        let session = Session {
            token: "t".into(),
            user: UserProfile {
                email: "  ".into(),
                ..Default::default()
            },
        };
        assert_eq!(session.email(), None);
    }
}
