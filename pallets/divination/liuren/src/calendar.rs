//! # 历法换算
//!
//! 将公历时间换算为年、月、日、时四柱干支，并按节气推定月将。
//!
//! ## 数据来源
//!
//! - 农历数据源可通过 [`CalendarSource`] 注入（如链下农历库）
//! - 未注入或数据源不可用时，使用公历近似算法（[`SolarApproximation`]）
//!
//! ## 公历近似算法
//!
//! - 年干 = (年 - 4) % 10，年支 = (年 - 4) % 12
//! - 月干 = (年干 × 2 + 月 - 1) % 10，月支 = (月 + 1) % 12
//! - 日干支 = 距 1900-01-01 的天数分别对 10、12 取模
//! - 时干 = (日干 × 2 + 时辰) % 10（五鼠遁），时支 = 时辰
//!
//! 以上为简化算法，不追踪真实的农历月界与节气时刻。

use crate::types::{ChartInput, DiZhi, GanZhi, TianGan};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// 日干支起算日（公历）
pub const EPOCH: (i64, u32, u32) = (1900, 1, 1);

// ============================================================================
// 节气
// ============================================================================

/// 月令节气（十二节）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub enum JieQi {
    LiChun,
    JingZhe,
    QingMing,
    LiXia,
    MangZhong,
    XiaoShu,
    LiQiu,
    BaiLu,
    HanLu,
    LiDong,
    DaXue,
    XiaoHan,
}

impl JieQi {
    /// 农历月份对应的节气，下标为月份 - 1
    const BY_LUNAR_MONTH: [JieQi; 12] = [
        JieQi::LiChun,
        JieQi::JingZhe,
        JieQi::QingMing,
        JieQi::LiXia,
        JieQi::MangZhong,
        JieQi::XiaoShu,
        JieQi::LiQiu,
        JieQi::BaiLu,
        JieQi::HanLu,
        JieQi::LiDong,
        JieQi::DaXue,
        JieQi::XiaoHan,
    ];

    /// 公历月份对应的节气（近似），下标为月份 - 1
    const BY_SOLAR_MONTH: [JieQi; 12] = [
        JieQi::XiaoHan,
        JieQi::LiChun,
        JieQi::JingZhe,
        JieQi::QingMing,
        JieQi::LiXia,
        JieQi::MangZhong,
        JieQi::XiaoShu,
        JieQi::LiQiu,
        JieQi::BaiLu,
        JieQi::HanLu,
        JieQi::LiDong,
        JieQi::DaXue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            JieQi::LiChun => "立春",
            JieQi::JingZhe => "惊蛰",
            JieQi::QingMing => "清明",
            JieQi::LiXia => "立夏",
            JieQi::MangZhong => "芒种",
            JieQi::XiaoShu => "小暑",
            JieQi::LiQiu => "立秋",
            JieQi::BaiLu => "白露",
            JieQi::HanLu => "寒露",
            JieQi::LiDong => "立冬",
            JieQi::DaXue => "大雪",
            JieQi::XiaoHan => "小寒",
        }
    }

    /// 按月份查节气，月份越界返回 None
    pub fn for_month(mode: CalendarMode, month: u8) -> Option<Self> {
        let table = match mode {
            CalendarMode::Lunar => &Self::BY_LUNAR_MONTH,
            CalendarMode::Solar => &Self::BY_SOLAR_MONTH,
        };
        table.get((month as usize).checked_sub(1)?).copied()
    }

    /// 节气所对应的月将
    pub fn yue_jiang(self) -> DiZhi {
        match self {
            JieQi::LiChun => DiZhi::Yin,
            JieQi::JingZhe => DiZhi::Mao,
            JieQi::QingMing => DiZhi::Chen,
            JieQi::LiXia => DiZhi::Si,
            JieQi::MangZhong => DiZhi::Wu,
            JieQi::XiaoShu => DiZhi::Wei,
            JieQi::LiQiu => DiZhi::Shen,
            JieQi::BaiLu => DiZhi::You,
            JieQi::HanLu => DiZhi::Xu,
            JieQi::LiDong => DiZhi::Hai,
            JieQi::DaXue => DiZhi::Zi,
            JieQi::XiaoHan => DiZhi::Chou,
        }
    }
}

crate::types::serialize_as_name!(JieQi);

// ============================================================================
// 数据源
// ============================================================================

/// 历法模式
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum CalendarMode {
    /// 农历数据源
    Lunar,
    /// 公历近似
    Solar,
}

/// 数据源给出的年、月、日干支及月份序号
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CalendarFields {
    pub year: GanZhi,
    pub month: GanZhi,
    pub day: GanZhi,
    /// 用于查节气的月份（农历模式为农历月，公历模式为公历月）
    pub month_number: u8,
    pub mode: CalendarMode,
}

/// 历法数据源
///
/// 返回 None 表示数据源不可用，换算会静默回退到公历近似算法。
pub trait CalendarSource {
    fn to_calendar_fields(input: &ChartInput) -> Option<CalendarFields>;
}

/// 无数据源
impl CalendarSource for () {
    fn to_calendar_fields(_input: &ChartInput) -> Option<CalendarFields> {
        None
    }
}

/// 公历近似算法
pub struct SolarApproximation;

impl CalendarSource for SolarApproximation {
    fn to_calendar_fields(input: &ChartInput) -> Option<CalendarFields> {
        Some(solar_fields(input))
    }
}

// ============================================================================
// 换算结果
// ============================================================================

/// 四柱与月将
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SiZhu {
    pub year: GanZhi,
    pub month: GanZhi,
    pub day: GanZhi,
    pub hour: GanZhi,
    pub jie_qi: JieQi,
    pub yue_jiang: DiZhi,
    pub mode: CalendarMode,
}

/// 换算四柱与月将
///
/// 调用方需先完成输入校验。
pub fn convert<C: CalendarSource>(input: &ChartInput) -> SiZhu {
    let fields = match C::to_calendar_fields(input) {
        Some(fields) if (1..=12).contains(&fields.month_number) => fields,
        Some(fields) => {
            log::debug!(
                target: "liuren",
                "农历数据源返回的月份 {} 越界，改用公历近似算法",
                fields.month_number
            );
            solar_fields(input)
        },
        None => {
            log::debug!(target: "liuren", "农历数据源不可用，改用公历近似算法");
            solar_fields(input)
        },
    };

    // for_month 只在月份越界时返回 None，上面已排除
    let jie_qi = JieQi::for_month(fields.mode, fields.month_number).unwrap_or(JieQi::XiaoHan);

    SiZhu {
        year: fields.year,
        month: fields.month,
        day: fields.day,
        hour: hour_ganzhi(fields.day.gan, input.hour),
        jie_qi,
        yue_jiang: jie_qi.yue_jiang(),
        mode: fields.mode,
    }
}

/// 公历近似算法的年、月、日干支
pub fn solar_fields(input: &ChartInput) -> CalendarFields {
    let year = solar_year_ganzhi(input.year);
    CalendarFields {
        year,
        month: solar_month_ganzhi(year.gan, input.month),
        day: solar_day_ganzhi(input.year, input.month, input.day),
        month_number: input.month,
        mode: CalendarMode::Solar,
    }
}

/// 年干支
pub fn solar_year_ganzhi(year: u16) -> GanZhi {
    let offset = year as i64 - 4;
    GanZhi::from_offsets(offset, offset)
}

/// 月干支（以年干起月干）
pub fn solar_month_ganzhi(year_gan: TianGan, month: u8) -> GanZhi {
    GanZhi::from_offsets(year_gan.index() as i64 * 2 + month as i64 - 1, month as i64 + 1)
}

/// 日干支
pub fn solar_day_ganzhi(year: u16, month: u8, day: u8) -> GanZhi {
    let days = days_since_epoch(year, month, day);
    GanZhi::from_offsets(days, days)
}

/// 时干支（五鼠遁）
pub fn hour_ganzhi(day_gan: TianGan, hour: u8) -> GanZhi {
    let slot = hour_slot(hour) as i64;
    GanZhi::from_offsets(day_gan.index() as i64 * 2 + slot, slot)
}

/// 时辰序号：子时（23-1 点）为 0
pub fn hour_slot(hour: u8) -> u8 {
    ((hour as u16 + 1) / 2 % 12) as u8
}

/// 距 1900-01-01 的天数
///
/// 日期超出当月天数时顺延到下月（如 2 月 31 日按 3 月 2/3 日计）。
pub fn days_since_epoch(year: u16, month: u8, day: u8) -> i64 {
    days_from_civil(year as i64, month as u32, day as u32) - days_from_civil(EPOCH.0, EPOCH.1, EPOCH.2)
}

/// 公历日期转连续日数（1970-01-01 为 0）
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month as i64 + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

// ============================================================================
// 单元测试
// ============================================================================
