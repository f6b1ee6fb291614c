//! # 年命与行年
//!
//! 求测者出生信息的附加推算，未给出生信息时以起课时刻代之：
//!
//! - 年命：以出生年（甲子 = 公元 4 年）定年序，月、日、时干支由年序线性推出
//! - 行年：起课年份减出生年份为周岁，加一为虚岁

use crate::types::{ChartInput, GanZhi, ValidationError};
use alloc::{format, string::String};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// 出生信息
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub struct BirthInfo {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
}

/// 以起课时刻为出生时刻
impl From<&ChartInput> for BirthInfo {
    fn from(input: &ChartInput) -> Self {
        Self { year: input.year, month: input.month, day: input.day, hour: input.hour }
    }
}

impl BirthInfo {
    /// 构造并校验，范围与起课时间相同
    pub fn new(year: u16, month: u8, day: u8, hour: u8) -> Result<Self, ValidationError> {
        ChartInput { year, month, day, hour, minute: 0 }.validate()?;
        Ok(Self { year, month, day, hour })
    }

    /// 出生年在六十甲子中的序号
    fn year_index(&self) -> u32 {
        (self.year as u32 + 56) % 60
    }
}

/// 年命四柱
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NianMing {
    pub year: GanZhi,
    pub month: GanZhi,
    pub day: GanZhi,
    pub hour: GanZhi,
}

/// 推年命
pub fn calculate_nian_ming(birth: &BirthInfo) -> NianMing {
    let year_idx = birth.year_index();
    // 减一写作加五十九，模 60 后相同
    let at = |n: u32| GanZhi::from_index((n % 60) as u8);
    NianMing {
        year: at(year_idx),
        month: at(year_idx * 12 + birth.month as u32 + 59),
        day: at(year_idx * 365 + birth.month as u32 * 30 + birth.day as u32 + 59),
        hour: at(year_idx * 24 + birth.hour as u32 / 2),
    }
}

/// 行年
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct XingNian {
    /// 周岁（出生年晚于起课年时为 0）
    pub age: u16,
    /// 虚岁
    pub xing_nian: u16,
}

/// 推行年
pub fn calculate_xing_nian(birth_year: u16, current_year: u16) -> XingNian {
    let age = current_year.saturating_sub(birth_year);
    XingNian { age, xing_nian: age.saturating_add(1) }
}

/// 求测者信息
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UserInfo {
    pub birth: BirthInfo,
    pub nian_ming: NianMing,
    pub xing_nian: XingNian,
}

impl UserInfo {
    /// 如 "年命：庚午年 庚辰月 癸未日 乙未时"
    pub fn nian_ming_description(&self) -> String {
        let m = &self.nian_ming;
        format!("年命：{}年 {}月 {}日 {}时", m.year, m.month, m.day, m.hour)
    }

    /// 如 "行年：35岁（虚岁）"
    pub fn xing_nian_description(&self) -> String {
        format!("行年：{}岁（虚岁）", self.xing_nian.xing_nian)
    }
}

/// 汇总年命与行年
pub fn calculate_user_info(birth: BirthInfo, current_year: u16) -> UserInfo {
    UserInfo {
        birth,
        nian_ming: calculate_nian_ming(&birth),
        xing_nian: calculate_xing_nian(birth.year, current_year),
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for UserInfo {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        #[derive(serde::Serialize)]
        struct NianMingOut {
            year_gz: GanZhi,
            month_gz: GanZhi,
            day_gz: GanZhi,
            hour_gz: GanZhi,
            description: String,
        }

        #[derive(serde::Serialize)]
        struct XingNianOut {
            age: u16,
            xing_nian: u16,
            description: String,
        }

        let nian_ming = NianMingOut {
            year_gz: self.nian_ming.year,
            month_gz: self.nian_ming.month,
            day_gz: self.nian_ming.day,
            hour_gz: self.nian_ming.hour,
            description: self.nian_ming_description(),
        };
        let xing_nian = XingNianOut {
            age: self.xing_nian.age,
            xing_nian: self.xing_nian.xing_nian,
            description: self.xing_nian_description(),
        };

        let mut state = serializer.serialize_struct("UserInfo", 6)?;
        state.serialize_field("birth_year", &self.birth.year)?;
        state.serialize_field("birth_month", &self.birth.month)?;
        state.serialize_field("birth_day", &self.birth.day)?;
        state.serialize_field("birth_hour", &self.birth.hour)?;
        state.serialize_field("nian_ming", &nian_ming)?;
        state.serialize_field("xing_nian", &xing_nian)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiZhi, InputField, TianGan};

    #[test]
    fn test_birth_validation() {
        assert!(BirthInfo::new(1990, 5, 20, 14).is_ok());
        assert_eq!(BirthInfo::new(1899, 5, 20, 14).unwrap_err().field, InputField::Year);
        assert_eq!(BirthInfo::new(1990, 13, 20, 14).unwrap_err().field, InputField::Month);
        assert_eq!(BirthInfo::new(1990, 5, 20, 24).unwrap_err().field, InputField::Hour);
    }

    #[test]
    fn test_birth_defaults_to_chart_moment() {
        let input = ChartInput::new(2024, 6, 15, 10, 30).unwrap();
        assert_eq!(BirthInfo::from(&input), BirthInfo::new(2024, 6, 15, 10).unwrap());
    }

    #[test]
    fn test_nian_ming() {
        // 1984 为甲子年
        let birth = BirthInfo::new(1984, 1, 1, 0).unwrap();
        let nian_ming = calculate_nian_ming(&birth);
        assert_eq!(nian_ming.year, GanZhi::new(TianGan::Jia, DiZhi::Zi));
        assert_eq!(nian_ming.month, GanZhi::new(TianGan::Jia, DiZhi::Zi));
        // 0 * 365 + 30 + 0 = 30 → 甲午
        assert_eq!(nian_ming.day, GanZhi::new(TianGan::Jia, DiZhi::Wu));
        assert_eq!(nian_ming.hour, GanZhi::new(TianGan::Jia, DiZhi::Zi));

        // 1990 庚午：年序 6
        let birth = BirthInfo::new(1990, 5, 20, 14).unwrap();
        let nian_ming = calculate_nian_ming(&birth);
        assert_eq!(nian_ming.year, GanZhi::new(TianGan::Geng, DiZhi::Wu));
        // (72 + 4) % 60 = 16 → 庚辰
        assert_eq!(nian_ming.month, GanZhi::new(TianGan::Geng, DiZhi::Chen));
        // (2190 + 150 + 19) % 60 = 19 → 癸未
        assert_eq!(nian_ming.day, GanZhi::new(TianGan::Gui, DiZhi::Wei));
        // (144 + 7) % 60 = 31 → 乙未
        assert_eq!(nian_ming.hour, GanZhi::new(TianGan::Yi, DiZhi::Wei));
    }

    #[test]
    fn test_xing_nian() {
        assert_eq!(calculate_xing_nian(1990, 2024), XingNian { age: 34, xing_nian: 35 });
        assert_eq!(calculate_xing_nian(2024, 2024), XingNian { age: 0, xing_nian: 1 });
        // 出生年晚于起课年
        assert_eq!(calculate_xing_nian(2030, 2024), XingNian { age: 0, xing_nian: 1 });
    }

    #[test]
    fn test_descriptions() {
        let birth = BirthInfo::new(1990, 5, 20, 14).unwrap();
        let info = calculate_user_info(birth, 2024);
        assert_eq!(info.nian_ming_description(), "年命：庚午年 庚辰月 癸未日 乙未时");
        assert_eq!(info.xing_nian_description(), "行年：35岁（虚岁）");
    }
}
