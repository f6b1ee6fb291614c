//! # 四课
//!
//! | 课 | 上神 | 下神 | 角色 |
//! |----|------|------|------|
//! | 第一课 | 日干 | 日支 | 主体 |
//! | 第二课 | 日支 | 日支配对地支 | 环境 |
//! | 第三课 | 时干 | 时支 | 时间 |
//! | 第四课 | 月将 | 月将配对地支 | 空间 |
//!
//! 每课的五行标记取上神五行，三传的知一法、遥克法按此比较。

use crate::types::{DiZhi, TianGan, WuXing, WuXingRelation};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use core::fmt;
use scale_info::TypeInfo;

/// 课序中文数字
const KE_NUMERALS: [&str; 4] = ["一", "二", "三", "四"];

/// 上神（天干或地支）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub enum KeSymbol {
    Gan(TianGan),
    Zhi(DiZhi),
}

impl KeSymbol {
    pub fn name(self) -> &'static str {
        match self {
            KeSymbol::Gan(gan) => gan.name(),
            KeSymbol::Zhi(zhi) => zhi.name(),
        }
    }

    pub fn wuxing(self) -> WuXing {
        match self {
            KeSymbol::Gan(gan) => gan.wuxing(),
            KeSymbol::Zhi(zhi) => zhi.wuxing(),
        }
    }
}

crate::types::serialize_as_name!(KeSymbol);

/// 课的角色
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub enum KeRole {
    /// 主体
    ZhuTi,
    /// 环境
    HuanJing,
    /// 时间
    ShiJian,
    /// 空间
    KongJian,
}

impl KeRole {
    pub fn name(self) -> &'static str {
        match self {
            KeRole::ZhuTi => "主体",
            KeRole::HuanJing => "环境",
            KeRole::ShiJian => "时间",
            KeRole::KongJian => "空间",
        }
    }

    pub fn meaning(self) -> &'static str {
        match self {
            KeRole::ZhuTi => "第一课：日干支，代表求问者本人",
            KeRole::HuanJing => "第二课：日支，代表求问者的环境",
            KeRole::ShiJian => "第三课：时干支，代表事情发生的时间",
            KeRole::KongJian => "第四课：月将，代表事情发生的空间",
        }
    }
}

crate::types::serialize_as_name!(KeRole);

/// 单课
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub struct KeEntry {
    /// 上神
    pub shang: KeSymbol,
    /// 下神
    pub xia: DiZhi,
    pub role: KeRole,
}

impl KeEntry {
    pub fn new(shang: KeSymbol, xia: DiZhi, role: KeRole) -> Self {
        Self { shang, xia, role }
    }

    /// 课的五行标记（上神五行）
    pub fn wuxing(&self) -> WuXing {
        self.shang.wuxing()
    }

    /// 下神五行
    pub fn xia_wuxing(&self) -> WuXing {
        self.xia.wuxing()
    }

    /// 上神是否克下神
    pub fn is_shang_ke_xia(&self) -> bool {
        self.shang.wuxing().controls(self.xia.wuxing())
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for KeEntry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("KeEntry", 6)?;
        state.serialize_field("gan", &self.shang)?;
        state.serialize_field("zhi", &self.xia)?;
        state.serialize_field("meaning", self.role.meaning())?;
        state.serialize_field("wuxing", &self.wuxing())?;
        state.serialize_field("xia_wuxing", &self.xia_wuxing())?;
        state.serialize_field("relation", &self.role)?;
        state.end()
    }
}

/// 两课之间的五行关系
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub struct SiKeRelation {
    /// 课序（0 起算）
    pub from: u8,
    pub to: u8,
    pub from_wuxing: WuXing,
    pub to_wuxing: WuXing,
    pub relation: WuXingRelation,
}

impl SiKeRelation {
    fn between(from: u8, a: &KeEntry, to: u8, b: &KeEntry) -> Self {
        let (from_wuxing, to_wuxing) = (a.wuxing(), b.wuxing());
        Self { from, to, from_wuxing, to_wuxing, relation: from_wuxing.relation_to(to_wuxing) }
    }
}

/// 如 "第一课与第二课：金生水，相互促进"
impl fmt::Display for SiKeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeral = |i: u8| KE_NUMERALS.get(i as usize).copied().unwrap_or(crate::types::UNKNOWN);
        write!(
            f,
            "第{}课与第{}课：{}",
            numeral(self.from),
            numeral(self.to),
            self.relation.describe(self.from_wuxing, self.to_wuxing)
        )
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for SiKeRelation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 四课
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct SiKe {
    pub yi_ke: KeEntry,
    pub er_ke: KeEntry,
    pub san_ke: KeEntry,
    pub si_ke: KeEntry,
    /// 一二、二三、三四、一四课的关系
    pub relations: [SiKeRelation; 4],
}

impl SiKe {
    /// 按课序排列的四课
    pub fn entries(&self) -> [KeEntry; 4] {
        [self.yi_ke, self.er_ke, self.san_ke, self.si_ke]
    }
}

/// 起四课
pub fn calculate_si_ke(
    ri_gan: TianGan,
    ri_zhi: DiZhi,
    shi_gan: TianGan,
    shi_zhi: DiZhi,
    yue_jiang: DiZhi,
) -> SiKe {
    let yi_ke = KeEntry::new(KeSymbol::Gan(ri_gan), ri_zhi, KeRole::ZhuTi);
    let er_ke = KeEntry::new(KeSymbol::Zhi(ri_zhi), ri_zhi.paired_zhi(), KeRole::HuanJing);
    let san_ke = KeEntry::new(KeSymbol::Gan(shi_gan), shi_zhi, KeRole::ShiJian);
    let si_ke = KeEntry::new(KeSymbol::Zhi(yue_jiang), yue_jiang.paired_zhi(), KeRole::KongJian);

    let relations = [
        SiKeRelation::between(0, &yi_ke, 1, &er_ke),
        SiKeRelation::between(1, &er_ke, 2, &san_ke),
        SiKeRelation::between(2, &san_ke, 3, &si_ke),
        SiKeRelation::between(0, &yi_ke, 3, &si_ke),
    ];

    SiKe { yi_ke, er_ke, san_ke, si_ke, relations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec::Vec};

    /// 2024-06-15 10 时：庚子日、辛巳时、午将
    fn golden() -> SiKe {
        calculate_si_ke(TianGan::Geng, DiZhi::Zi, TianGan::Xin, DiZhi::Si, DiZhi::Wu)
    }

    #[test]
    fn test_slots() {
        let si_ke = golden();
        assert_eq!(si_ke.yi_ke.shang, KeSymbol::Gan(TianGan::Geng));
        assert_eq!(si_ke.yi_ke.xia, DiZhi::Zi);
        assert_eq!(si_ke.er_ke.shang, KeSymbol::Zhi(DiZhi::Zi));
        assert_eq!(si_ke.er_ke.xia, DiZhi::Zi);
        assert_eq!(si_ke.san_ke.xia, DiZhi::Si);
        assert_eq!(si_ke.si_ke.shang, KeSymbol::Zhi(DiZhi::Wu));
        assert_eq!(si_ke.si_ke.xia, DiZhi::Wu);

        let tags: [WuXing; 4] = si_ke.entries().map(|e| e.wuxing());
        assert_eq!(tags, [WuXing::Jin, WuXing::Shui, WuXing::Jin, WuXing::Huo]);
    }

    #[test]
    fn test_paired_lower_follows_branch() {
        // 二课、四课下神随上神变化，不落入固定地支
        let lowers: Vec<DiZhi> = DiZhi::ALL
            .iter()
            .map(|&zhi| calculate_si_ke(TianGan::Jia, zhi, TianGan::Jia, DiZhi::Zi, zhi).er_ke.xia)
            .collect();
        assert!(lowers.iter().any(|&xia| xia != DiZhi::Yin));
        assert_eq!(lowers[DiZhi::Chen.index() as usize], DiZhi::Si);
        assert_eq!(lowers[DiZhi::Wu.index() as usize], DiZhi::Wu);

        let si_ke = calculate_si_ke(TianGan::Jia, DiZhi::Zi, TianGan::Jia, DiZhi::Zi, DiZhi::Chen);
        assert_eq!(si_ke.si_ke.xia, DiZhi::Si);
    }

    #[test]
    fn test_roles() {
        let roles = golden().entries().map(|e| e.role.name());
        assert_eq!(roles, ["主体", "环境", "时间", "空间"]);
        assert_eq!(golden().yi_ke.role.meaning(), "第一课：日干支，代表求问者本人");
    }

    #[test]
    fn test_relation_text() {
        let si_ke = golden();
        assert_eq!(si_ke.relations[0].to_string(), "第一课与第二课：金生水，相互促进");
        assert_eq!(si_ke.relations[1].to_string(), "第二课与第三课：金生水，得到支持");
        assert_eq!(si_ke.relations[2].to_string(), "第三课与第四课：火克金，受到压制");
        assert_eq!(si_ke.relations[3].to_string(), "第一课与第四课：火克金，受到压制");
    }

    #[test]
    fn test_shang_ke_xia() {
        // 甲木临辰土
        let entry = KeEntry::new(KeSymbol::Gan(TianGan::Jia), DiZhi::Chen, KeRole::ZhuTi);
        assert!(entry.is_shang_ke_xia());
        // 辛金临巳火为下克上
        let entry = KeEntry::new(KeSymbol::Gan(TianGan::Xin), DiZhi::Si, KeRole::ShiJian);
        assert!(!entry.is_shang_ke_xia());
    }
}
