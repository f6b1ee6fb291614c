//! # 大六壬基础类型
//!
//! 天干、地支、五行、干支组合，以及起课输入与校验错误。
//!
//! ## 索引约定
//!
//! - 天干: 甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9)
//! - 地支: 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)
//! - 五行: 木(0) 火(1) 土(2) 金(3) 水(4)

use alloc::{format, string::String};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use core::fmt;
use scale_info::TypeInfo;

/// 查表未命中时返回的占位文本
pub const UNKNOWN: &str = "未知";

/// 起课年份下限
pub const MIN_YEAR: u16 = 1900;
/// 起课年份上限
pub const MAX_YEAR: u16 = 2100;

/// 为按名称序列化的枚举实现 `serde::Serialize`
///
/// 天干地支等符号在 JSON 中以汉字出现（如 `"子"`），与前端约定保持一致。
macro_rules! serialize_as_name {
    ($($ty:ty),* $(,)?) => {
        $(
            #[cfg(feature = "std")]
            impl serde::Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(self.name())
                }
            }
        )*
    };
}
pub(crate) use serialize_as_name;

// ============================================================================
// 五行
// ============================================================================

/// 五行
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug, Default,
)]
pub enum WuXing {
    /// 木
    #[default]
    Mu = 0,
    /// 火
    Huo = 1,
    /// 土
    Tu = 2,
    /// 金
    Jin = 3,
    /// 水
    Shui = 4,
}

impl WuXing {
    /// 全部五行（相生顺序）
    pub const ALL: [WuXing; 5] = [WuXing::Mu, WuXing::Huo, WuXing::Tu, WuXing::Jin, WuXing::Shui];

    pub fn name(self) -> &'static str {
        match self {
            WuXing::Mu => "木",
            WuXing::Huo => "火",
            WuXing::Tu => "土",
            WuXing::Jin => "金",
            WuXing::Shui => "水",
        }
    }

    /// 我生者：木生火，火生土，土生金，金生水，水生木
    pub fn sheng(self) -> WuXing {
        match self {
            WuXing::Mu => WuXing::Huo,
            WuXing::Huo => WuXing::Tu,
            WuXing::Tu => WuXing::Jin,
            WuXing::Jin => WuXing::Shui,
            WuXing::Shui => WuXing::Mu,
        }
    }

    /// 我克者：木克土，土克水，水克火，火克金，金克木
    pub fn ke(self) -> WuXing {
        match self {
            WuXing::Mu => WuXing::Tu,
            WuXing::Tu => WuXing::Shui,
            WuXing::Shui => WuXing::Huo,
            WuXing::Huo => WuXing::Jin,
            WuXing::Jin => WuXing::Mu,
        }
    }

    /// 是否克制对方
    pub fn controls(self, other: WuXing) -> bool {
        self.ke() == other
    }

    /// 与对方的生克关系
    pub fn relation_to(self, other: WuXing) -> WuXingRelation {
        WuXingRelation::between(self, other)
    }
}

serialize_as_name!(WuXing);

/// 两个五行之间的生克关系（以第一个五行为主体）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum WuXingRelation {
    /// 同五行
    Same,
    /// 我生彼
    Produces,
    /// 彼生我
    ProducedBy,
    /// 我克彼
    Controls,
    /// 彼克我
    ControlledBy,
    /// 无直接生克
    Unrelated,
}

impl WuXingRelation {
    pub fn between(a: WuXing, b: WuXing) -> Self {
        if a == b {
            WuXingRelation::Same
        } else if a.sheng() == b {
            WuXingRelation::Produces
        } else if b.sheng() == a {
            WuXingRelation::ProducedBy
        } else if a.ke() == b {
            WuXingRelation::Controls
        } else if b.ke() == a {
            WuXingRelation::ControlledBy
        } else {
            WuXingRelation::Unrelated
        }
    }

    /// 主客互换后的关系
    pub fn inverse(self) -> Self {
        match self {
            WuXingRelation::Produces => WuXingRelation::ProducedBy,
            WuXingRelation::ProducedBy => WuXingRelation::Produces,
            WuXingRelation::Controls => WuXingRelation::ControlledBy,
            WuXingRelation::ControlledBy => WuXingRelation::Controls,
            other => other,
        }
    }

    /// 生成关系说明文字，如 "木生火，相互促进"
    pub fn describe(self, a: WuXing, b: WuXing) -> String {
        let (a, b) = (a.name(), b.name());
        match self {
            WuXingRelation::Same => format!("{}与{}同五行，相互支持", a, b),
            WuXingRelation::Produces => format!("{}生{}，相互促进", a, b),
            WuXingRelation::ProducedBy => format!("{}生{}，得到支持", b, a),
            WuXingRelation::Controls => format!("{}克{}，有所压制", a, b),
            WuXingRelation::ControlledBy => format!("{}克{}，受到压制", b, a),
            WuXingRelation::Unrelated => format!("{}与{}关系复杂", a, b),
        }
    }
}

// ============================================================================
// 天干
// ============================================================================

/// 十天干
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug, Default,
)]
pub enum TianGan {
    #[default]
    Jia = 0,
    Yi = 1,
    Bing = 2,
    Ding = 3,
    Wu = 4,
    Ji = 5,
    Geng = 6,
    Xin = 7,
    Ren = 8,
    Gui = 9,
}

impl TianGan {
    pub const ALL: [TianGan; 10] = [
        TianGan::Jia,
        TianGan::Yi,
        TianGan::Bing,
        TianGan::Ding,
        TianGan::Wu,
        TianGan::Ji,
        TianGan::Geng,
        TianGan::Xin,
        TianGan::Ren,
        TianGan::Gui,
    ];

    const NAMES: [&'static str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

    /// 从索引构造（按 10 取模）
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 10) as usize]
    }

    /// 从汉字构造，未知文字返回 None
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES.iter().position(|n| *n == name).map(|i| Self::ALL[i])
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// 天干五行：甲乙木，丙丁火，戊己土，庚辛金，壬癸水
    pub fn wuxing(self) -> WuXing {
        WuXing::ALL[(self as usize) / 2]
    }

    pub fn is_yang(self) -> bool {
        (self as u8) % 2 == 0
    }

    /// 天干寄宫
    ///
    /// 甲寄寅，乙寄卯，丙戊寄巳，丁己寄午，庚寄申，辛寄酉，壬寄亥，癸寄子
    pub fn ji_gong(self) -> DiZhi {
        match self {
            TianGan::Jia => DiZhi::Yin,
            TianGan::Yi => DiZhi::Mao,
            TianGan::Bing | TianGan::Wu => DiZhi::Si,
            TianGan::Ding | TianGan::Ji => DiZhi::Wu,
            TianGan::Geng => DiZhi::Shen,
            TianGan::Xin => DiZhi::You,
            TianGan::Ren => DiZhi::Hai,
            TianGan::Gui => DiZhi::Zi,
        }
    }
}

serialize_as_name!(TianGan);

// ============================================================================
// 地支
// ============================================================================

/// 十二地支
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug, Default,
)]
pub enum DiZhi {
    #[default]
    Zi = 0,
    Chou = 1,
    Yin = 2,
    Mao = 3,
    Chen = 4,
    Si = 5,
    Wu = 6,
    Wei = 7,
    Shen = 8,
    You = 9,
    Xu = 10,
    Hai = 11,
}

impl DiZhi {
    /// 地盘固定顺序
    pub const ALL: [DiZhi; 12] = [
        DiZhi::Zi,
        DiZhi::Chou,
        DiZhi::Yin,
        DiZhi::Mao,
        DiZhi::Chen,
        DiZhi::Si,
        DiZhi::Wu,
        DiZhi::Wei,
        DiZhi::Shen,
        DiZhi::You,
        DiZhi::Xu,
        DiZhi::Hai,
    ];

    const NAMES: [&'static str; 12] =
        ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"];

    /// 从索引构造（按 12 取模）
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % 12) as usize]
    }

    /// 从汉字构造，未知文字返回 None
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES.iter().position(|n| *n == name).map(|i| Self::ALL[i])
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// 地支五行：寅卯木，巳午火，申酉金，亥子水，辰戌丑未土
    pub fn wuxing(self) -> WuXing {
        match self {
            DiZhi::Yin | DiZhi::Mao => WuXing::Mu,
            DiZhi::Si | DiZhi::Wu => WuXing::Huo,
            DiZhi::Shen | DiZhi::You => WuXing::Jin,
            DiZhi::Hai | DiZhi::Zi => WuXing::Shui,
            DiZhi::Chou | DiZhi::Chen | DiZhi::Wei | DiZhi::Xu => WuXing::Tu,
        }
    }

    /// 顺行 n 位
    pub fn offset(self, n: u8) -> Self {
        Self::from_index(((self as u16 + n as u16) % 12) as u8)
    }

    /// 六冲（相隔六位）
    pub fn opposite(self) -> Self {
        self.offset(6)
    }

    /// 地支本气藏干
    pub fn ben_qi(self) -> TianGan {
        match self {
            DiZhi::Zi => TianGan::Gui,
            DiZhi::Chou => TianGan::Ji,
            DiZhi::Yin => TianGan::Jia,
            DiZhi::Mao => TianGan::Yi,
            DiZhi::Chen => TianGan::Wu,
            DiZhi::Si => TianGan::Bing,
            DiZhi::Wu => TianGan::Ding,
            DiZhi::Wei => TianGan::Ji,
            DiZhi::Shen => TianGan::Geng,
            DiZhi::You => TianGan::Xin,
            DiZhi::Xu => TianGan::Wu,
            DiZhi::Hai => TianGan::Ren,
        }
    }

    /// 配对地支：本气藏干的寄宫
    pub fn paired_zhi(self) -> DiZhi {
        self.ben_qi().ji_gong()
    }
}

serialize_as_name!(DiZhi);

// ============================================================================
// 干支
// ============================================================================

/// 干支组合
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug, Default,
)]
pub struct GanZhi {
    pub gan: TianGan,
    pub zhi: DiZhi,
}

impl GanZhi {
    pub fn new(gan: TianGan, zhi: DiZhi) -> Self {
        Self { gan, zhi }
    }

    /// 从天干、地支偏移量构造（分别按 10、12 取模）
    pub fn from_offsets(gan: i64, zhi: i64) -> Self {
        Self {
            gan: TianGan::from_index(gan.rem_euclid(10) as u8),
            zhi: DiZhi::from_index(zhi.rem_euclid(12) as u8),
        }
    }

    /// 从六十甲子序号构造（按 60 取模，0 = 甲子）
    pub fn from_index(index: u8) -> Self {
        let index = (index % 60) as i64;
        Self::from_offsets(index, index)
    }

    /// 六十甲子序号；阴阳不配的组合返回 None
    pub fn index(self) -> Option<u8> {
        let (g, z) = (self.gan as u8, self.zhi as u8);
        if g % 2 != z % 2 {
            return None;
        }
        (0u8..60).find(|i| i % 10 == g && i % 12 == z)
    }
}

impl fmt::Display for GanZhi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.gan.name(), self.zhi.name())
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for GanZhi {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// 起课输入
// ============================================================================

/// 起课输入字段
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl InputField {
    pub fn name(self) -> &'static str {
        match self {
            InputField::Year => "year",
            InputField::Month => "month",
            InputField::Day => "day",
            InputField::Hour => "hour",
            InputField::Minute => "minute",
        }
    }
}

/// 起课参数校验错误
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ValidationError {
    /// 越界字段
    pub field: InputField,
    /// 可读原因
    pub reason: &'static str,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.name(), self.reason)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

/// 起课时间（公历）
///
/// 日期只做 1-31 的范围校验，不按月份核对天数。
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ChartInput {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl ChartInput {
    /// 构造并校验
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Result<Self, ValidationError> {
        let input = Self { year, month, day, hour, minute };
        input.validate()?;
        Ok(input)
    }

    /// 逐字段范围校验，遇到第一个越界字段即返回
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(ValidationError { field: InputField::Year, reason: "年份必须在1900-2100之间" });
        }
        if !(1..=12).contains(&self.month) {
            return Err(ValidationError { field: InputField::Month, reason: "月份必须在1-12之间" });
        }
        if !(1..=31).contains(&self.day) {
            return Err(ValidationError { field: InputField::Day, reason: "日期必须在1-31之间" });
        }
        if self.hour > 23 {
            return Err(ValidationError { field: InputField::Hour, reason: "小时必须在0-23之间" });
        }
        if self.minute > 59 {
            return Err(ValidationError { field: InputField::Minute, reason: "分钟必须在0-59之间" });
        }
        Ok(())
    }

    /// 时辰序号（子时 = 0），23 点归入次日子时
    pub fn hour_slot(&self) -> u8 {
        crate::calendar::hour_slot(self.hour)
    }
}

// ============================================================================
// 链上记录
// ============================================================================

/// 链上课盘记录
///
/// 只保存起课时间与三传摘要，完整课盘由 `Pallet::chart` 按起课时间与历法模式重新推算。
#[derive(
    Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub struct ChartRecord<AccountId, BlockNumber> {
    pub id: u64,
    pub creator: AccountId,
    pub created_at: BlockNumber,
    pub input: ChartInput,
    /// 起课时实际采用的历法
    pub mode: crate::calendar::CalendarMode,
    /// 日干支
    pub day: GanZhi,
    pub yue_jiang: DiZhi,
    pub method: crate::san_chuan::SanChuanMethod,
    /// 初、中、末三传
    pub san_chuan: [DiZhi; 3],
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wuxing_relation_is_antisymmetric() {
        for a in WuXing::ALL {
            assert_eq!(WuXingRelation::between(a, a), WuXingRelation::Same);
            for b in WuXing::ALL {
                let ab = WuXingRelation::between(a, b);
                let ba = WuXingRelation::between(b, a);
                assert_eq!(ab == WuXingRelation::Produces, ba == WuXingRelation::ProducedBy);
                assert_eq!(ab == WuXingRelation::Controls, ba == WuXingRelation::ControlledBy);
                assert_eq!(ab.inverse(), ba);
            }
        }
    }

    #[test]
    fn test_distinct_elements_always_related() {
        // 五行两两之间非生即克
        for a in WuXing::ALL {
            for b in WuXing::ALL {
                assert_ne!(WuXingRelation::between(a, b), WuXingRelation::Unrelated);
            }
        }
    }

    #[test]
    fn test_relation_text() {
        assert_eq!(WuXingRelation::between(WuXing::Mu, WuXing::Huo).describe(WuXing::Mu, WuXing::Huo), "木生火，相互促进");
        assert_eq!(WuXingRelation::between(WuXing::Huo, WuXing::Mu).describe(WuXing::Huo, WuXing::Mu), "木生火，得到支持");
        assert_eq!(WuXingRelation::between(WuXing::Jin, WuXing::Mu).describe(WuXing::Jin, WuXing::Mu), "金克木，有所压制");
        assert_eq!(WuXingRelation::between(WuXing::Tu, WuXing::Tu).describe(WuXing::Tu, WuXing::Tu), "土与土同五行，相互支持");
    }

    #[test]
    fn test_element_tables() {
        assert_eq!(TianGan::Jia.wuxing(), WuXing::Mu);
        assert_eq!(TianGan::Ding.wuxing(), WuXing::Huo);
        assert_eq!(TianGan::Ji.wuxing(), WuXing::Tu);
        assert_eq!(TianGan::Xin.wuxing(), WuXing::Jin);
        assert_eq!(TianGan::Gui.wuxing(), WuXing::Shui);
        assert_eq!(DiZhi::Zi.wuxing(), WuXing::Shui);
        assert_eq!(DiZhi::Xu.wuxing(), WuXing::Tu);
        assert_eq!(DiZhi::Si.wuxing(), WuXing::Huo);
    }

    #[test]
    fn test_names_round_trip_through_parser() {
        for gan in TianGan::ALL {
            assert_eq!(TianGan::from_name(gan.name()), Some(gan));
        }
        for zhi in DiZhi::ALL {
            assert_eq!(DiZhi::from_name(zhi.name()), Some(zhi));
        }
        assert_eq!(TianGan::from_name("子"), None);
        assert_eq!(DiZhi::from_name("甲"), None);
    }

    #[test]
    fn test_opposite_and_paired_zhi() {
        assert_eq!(DiZhi::Zi.opposite(), DiZhi::Wu);
        assert_eq!(DiZhi::Hai.opposite(), DiZhi::Si);
        assert_eq!(DiZhi::Zi.paired_zhi(), DiZhi::Zi);
        assert_eq!(DiZhi::Chen.paired_zhi(), DiZhi::Si);
        assert_eq!(DiZhi::Chou.paired_zhi(), DiZhi::Wu);
        assert_eq!(DiZhi::Shen.paired_zhi(), DiZhi::Shen);
    }

    #[test]
    fn test_ganzhi_sexagenary_index() {
        assert_eq!(GanZhi::from_index(0), GanZhi::new(TianGan::Jia, DiZhi::Zi));
        assert_eq!(GanZhi::from_index(59), GanZhi::new(TianGan::Gui, DiZhi::Hai));
        assert_eq!(GanZhi::from_index(60), GanZhi::from_index(0));
        for i in 0..60u8 {
            assert_eq!(GanZhi::from_index(i).index(), Some(i));
        }
        assert_eq!(GanZhi::new(TianGan::Jia, DiZhi::Chou).index(), None);
        assert_eq!(format!("{}", GanZhi::from_index(40)), "甲辰");
    }

    #[test]
    fn test_input_validation() {
        assert!(ChartInput::new(2024, 6, 15, 10, 30).is_ok());
        assert!(ChartInput::new(1900, 1, 1, 0, 0).is_ok());
        assert!(ChartInput::new(2100, 12, 31, 23, 59).is_ok());

        let err = ChartInput::new(2024, 13, 1, 0, 0).unwrap_err();
        assert_eq!(err.field, InputField::Month);
        assert_eq!(ChartInput::new(1899, 1, 1, 0, 0).unwrap_err().field, InputField::Year);
        assert_eq!(ChartInput::new(2101, 1, 1, 0, 0).unwrap_err().field, InputField::Year);
        assert_eq!(ChartInput::new(2024, 1, 0, 0, 0).unwrap_err().field, InputField::Day);
        assert_eq!(ChartInput::new(2024, 1, 32, 0, 0).unwrap_err().field, InputField::Day);
        assert_eq!(ChartInput::new(2024, 1, 1, 24, 0).unwrap_err().field, InputField::Hour);
        assert_eq!(ChartInput::new(2024, 1, 1, 0, 60).unwrap_err().field, InputField::Minute);
        // 不按月份核对天数
        assert!(ChartInput::new(2024, 2, 31, 0, 0).is_ok());
    }

    #[test]
    fn test_hour_slot() {
        let slot = |h| ChartInput { year: 2024, month: 1, day: 1, hour: h, minute: 0 }.hour_slot();
        assert_eq!(slot(0), 0);
        assert_eq!(slot(1), 1);
        assert_eq!(slot(10), 5);
        assert_eq!(slot(22), 11);
        assert_eq!(slot(23), 0);
    }
}
