//! 预约列表的投影与筛选
//!
//! - `AppointmentView`: "我的预约" 页面的展示结构
//! - `BookingFilter`: 管理员列表的客户端筛选

use chrono::{NaiveDate, TimeZone};

use crate::date::{DateRange, parse_form_date, split_timestamp};
use crate::model::Booking;

// =========================================================
// 我的预约
// =========================================================

/// 展示状态
///
/// 服务端不下发状态字段，拉取到的记录一律是 `Confirmed`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppointmentStatus {
    #[default]
    Confirmed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentView {
    pub id: String,
    pub date: String,
    pub time: String,
    pub slot: String,
    pub mobile: String,
    pub message: String,
    pub status: AppointmentStatus,
}

impl AppointmentView {
    pub fn from_booking<Tz: TimeZone>(booking: &Booking, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let (date, time) = booking
            .created_at
            .as_ref()
            .map(|ts| split_timestamp(ts, tz))
            .unwrap_or_else(|| ("N/A".to_string(), "N/A".to_string()));

        Self {
            id: booking.id.clone(),
            date,
            time,
            slot: booking.slot_label().to_string(),
            mobile: booking.mobile.clone(),
            message: booking.message.clone().unwrap_or_default(),
            status: AppointmentStatus::Confirmed,
        }
    }

    /// 是否显示取消按钮
    pub fn can_cancel(&self) -> bool {
        !self.status.is_cancelled()
    }
}

pub fn project_appointments<Tz: TimeZone>(bookings: &[Booking], tz: &Tz) -> Vec<AppointmentView>
where
    Tz::Offset: std::fmt::Display,
{
    bookings
        .iter()
        .map(|b| AppointmentView::from_booking(b, tz))
        .collect()
}

/// 仅修改本地展示状态，不会通知服务端
///
/// 返回是否有记录被改动。
pub fn cancel_appointment(list: &mut [AppointmentView], id: &str) -> bool {
    match list
        .iter_mut()
        .find(|a| a.id == id && !a.status.is_cancelled())
    {
        Some(appt) => {
            appt.status = AppointmentStatus::Cancelled;
            true
        }
        None => false,
    }
}

// =========================================================
// 管理员列表
// =========================================================

/// 记录所属日期：优先 `date` 字段，其次 `createdAt` 的日期部分
pub fn booking_date(booking: &Booking) -> Option<NaiveDate> {
    booking
        .date
        .as_deref()
        .and_then(parse_form_date)
        .or_else(|| booking.created_at.map(|ts| ts.date_naive()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub search: String,
    pub range: DateRange,
}

impl BookingFilter {
    pub fn new(search: impl Into<String>, range: DateRange) -> Self {
        Self {
            search: search.into(),
            range,
        }
    }

    /// 姓名不区分大小写包含，或手机号字面包含；同时落在日期范围内
    pub fn matches(&self, booking: &Booking) -> bool {
        let needle = self.search.to_lowercase();
        let text_hit = booking.name.to_lowercase().contains(&needle)
            || booking.mobile.contains(self.search.as_str());
        if !text_hit {
            return false;
        }

        if self.range.is_unbounded() {
            return true;
        }
        booking_date(booking).is_some_and(|date| self.range.contains(date))
    }

    pub fn apply<'a>(&self, bookings: &'a [Booking]) -> Vec<&'a Booking> {
        bookings.iter().filter(|b| self.matches(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn booking(id: &str, name: &str, mobile: &str) -> Booking {
        Booking {
            id: id.into(),
            name: name.into(),
            mobile: mobile.into(),
            slot: Some("08:00 AM".into()),
            ..Default::default()
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn search_matches_name_case_insensitively_or_mobile_literally() {
        let list = vec![
            booking("1", "Ann", "1111111111"),
            booking("2", "Bob", "2222222222"),
        ];

        let hits = BookingFilter::new("an", DateRange::default()).apply(&list);
        assert_eq!(hits.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(), vec!["1"]);

        let hits = BookingFilter::new("222", DateRange::default()).apply(&list);
        assert_eq!(hits.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(), vec!["2"]);

        assert_eq!(BookingFilter::default().apply(&list).len(), 2);
        assert!(BookingFilter::new("zzz", DateRange::default()).apply(&list).is_empty());
    }

    #[test]
    fn date_range_uses_booking_date_then_created_at() {
        let mut with_date = booking("1", "Ann", "1111111111");
        with_date.date = Some("2025-01-10".into());

        let mut created_only = booking("2", "Anna", "3333333333");
        let ts: DateTime<Utc> = "2025-01-20T08:00:00Z".parse().unwrap();
        created_only.created_at = Some(ts);

        let undated = booking("3", "Annie", "4444444444");

        let list = vec![with_date, created_only, undated];
        let range = DateRange::new(Some(d(2025, 1, 1)), Some(d(2025, 1, 15)));
        let hits = BookingFilter::new("ann", range).apply(&list);
        assert_eq!(hits.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(), vec!["1"]);

        let range = DateRange::new(Some(d(2025, 1, 15)), None);
        let hits = BookingFilter::new("", range).apply(&list);
        assert_eq!(hits.iter().map(|b| b.id.as_str()).collect::<Vec<_>>(), vec!["2"]);

        // 没有日期条件时，无日期的记录照常保留
        assert_eq!(BookingFilter::new("ann", DateRange::default()).apply(&list).len(), 3);
    }

    #[test]
    fn projection_defaults_to_confirmed_and_splits_timestamp() {
        let mut b = booking("1", "Ann", "1111111111");
        b.created_at = Some("2025-03-01T09:05:00Z".parse().unwrap());
        b.message = Some("Back pain".into());

        let view = AppointmentView::from_booking(&b, &Utc);
        assert_eq!(view.status, AppointmentStatus::Confirmed);
        assert_eq!(view.date, "01/03/2025");
        assert_eq!(view.time, "09:05:00 AM");
        assert_eq!(view.message, "Back pain");
        assert_eq!(view.slot, "08:00 AM");
        assert!(view.can_cancel());

        let bare = AppointmentView::from_booking(&booking("2", "Bob", "2"), &Utc);
        assert_eq!(bare.date, "N/A");
        assert_eq!(bare.message, "");
    }

    #[test]
    fn cancel_touches_only_the_target_and_never_persists() {
        let fetched = vec![
            booking("1", "Ann", "1111111111"),
            booking("2", "Ann", "1111111111"),
            booking("3", "Ann", "1111111111"),
        ];
        let mut list = project_appointments(&fetched, &Utc);

        assert!(cancel_appointment(&mut list, "2"));
        assert_eq!(list[1].status, AppointmentStatus::Cancelled);
        assert!(!list[1].can_cancel());
        assert_eq!(list[0].status, AppointmentStatus::Confirmed);
        assert_eq!(list[2].status, AppointmentStatus::Confirmed);

        // 重复取消和未知 id 都不改动
        assert!(!cancel_appointment(&mut list, "2"));
        assert!(!cancel_appointment(&mut list, "missing"));

        // 重新拉取同一份数据，取消状态不存在
        let refetched = project_appointments(&fetched, &Utc);
        assert!(refetched.iter().all(|a| a.status == AppointmentStatus::Confirmed));
    }
}
