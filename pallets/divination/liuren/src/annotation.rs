//! # 六亲、六神、十二神将与神煞
//!
//! 以日干为主查表（六神另取时辰），结果均为静态数据加日干索引，不会失败。
//!
//! - 六亲：比劫 食神 偏财 正财 七杀 正官 偏印 正印
//! - 六神：甲己起青龙，乙庚起朱雀，丙辛起勾陈，丁壬起螣蛇，戊癸起白虎，按时辰顺推
//! - 十二神将：固定参考表
//! - 神煞：天乙、天德、月德、天喜、天马、天刑、天罗、地网、孤辰、寡宿
//! - 空亡、驿马、长生十二宫
//!
//! 按名称查含义时，未知名称返回 [`UNKNOWN`]。

use crate::types::{DiZhi, TianGan, WuXing, UNKNOWN};
use alloc::{format, string::String};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use core::fmt;
use scale_info::TypeInfo;

// ============================================================================
// 地支对
// ============================================================================

/// 两个地支组成的对（天乙贵人、空亡等），显示为 "丑未"
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub struct ZhiPair(pub DiZhi, pub DiZhi);

impl ZhiPair {
    pub fn contains(&self, zhi: DiZhi) -> bool {
        self.0 == zhi || self.1 == zhi
    }
}

impl fmt::Display for ZhiPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.name(), self.1.name())
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for ZhiPair {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// 六亲
// ============================================================================

/// 六亲关系
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub enum LiuQinKind {
    BiJie,
    ShiShen,
    PianCai,
    ZhengCai,
    QiSha,
    ZhengGuan,
    PianYin,
    ZhengYin,
}

impl LiuQinKind {
    pub const ALL: [LiuQinKind; 8] = [
        LiuQinKind::BiJie,
        LiuQinKind::ShiShen,
        LiuQinKind::PianCai,
        LiuQinKind::ZhengCai,
        LiuQinKind::QiSha,
        LiuQinKind::ZhengGuan,
        LiuQinKind::PianYin,
        LiuQinKind::ZhengYin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LiuQinKind::BiJie => "比劫",
            LiuQinKind::ShiShen => "食神",
            LiuQinKind::PianCai => "偏财",
            LiuQinKind::ZhengCai => "正财",
            LiuQinKind::QiSha => "七杀",
            LiuQinKind::ZhengGuan => "正官",
            LiuQinKind::PianYin => "偏印",
            LiuQinKind::ZhengYin => "正印",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn meaning(self) -> &'static str {
        match self {
            LiuQinKind::BiJie => "同辈、朋友、竞争关系，代表助力或阻力",
            LiuQinKind::ShiShen => "智慧、才华、表达能力，代表创造力和智慧",
            LiuQinKind::PianCai => "意外之财、投资机会，代表偏门收入",
            LiuQinKind::ZhengCai => "正当收入、稳定财富，代表正当收入",
            LiuQinKind::QiSha => "挑战、压力、竞争，代表困难和挑战",
            LiuQinKind::ZhengGuan => "权威、地位、名誉，代表官方和权威",
            LiuQinKind::PianYin => "学习、知识、文化，代表学习和知识",
            LiuQinKind::ZhengYin => "贵人、长辈、保护，代表贵人和保护",
        }
    }

    pub fn influence(self) -> &'static str {
        match self {
            LiuQinKind::BiJie => "助力时有利合作，阻力时易有竞争",
            LiuQinKind::ShiShen => "旺相时智慧开启，衰弱时思维混乱",
            LiuQinKind::PianCai => "旺相时财运亨通，衰弱时破财损财",
            LiuQinKind::ZhengCai => "旺相时收入稳定，衰弱时收入减少",
            LiuQinKind::QiSha => "旺相时勇敢面对，衰弱时畏缩不前",
            LiuQinKind::ZhengGuan => "旺相时地位提升，衰弱时地位下降",
            LiuQinKind::PianYin => "旺相时学习进步，衰弱时学习困难",
            LiuQinKind::ZhengYin => "旺相时贵人相助，衰弱时孤立无援",
        }
    }

    /// 按名称查含义
    pub fn meaning_of(name: &str) -> &'static str {
        Self::from_name(name).map(Self::meaning).unwrap_or(UNKNOWN)
    }
}

/// 六亲表：行为日干，列按 [`LiuQinKind::ALL`] 顺序
const LIU_QIN_TABLE: [[TianGan; 8]; 10] = {
    use TianGan::*;
    [
        [Yi, Bing, Ding, Wu, Geng, Xin, Ren, Gui],
        [Jia, Ding, Wu, Ji, Xin, Geng, Gui, Ren],
        [Ding, Wu, Ji, Geng, Ren, Gui, Jia, Yi],
        [Bing, Ji, Geng, Xin, Gui, Ren, Yi, Jia],
        [Ji, Geng, Xin, Ren, Jia, Yi, Bing, Ding],
        [Wu, Xin, Ren, Gui, Yi, Jia, Ding, Bing],
        [Xin, Ren, Gui, Jia, Bing, Ding, Wu, Ji],
        [Geng, Gui, Jia, Yi, Ding, Bing, Ji, Wu],
        [Gui, Jia, Yi, Bing, Wu, Ji, Geng, Xin],
        [Ren, Yi, Bing, Ding, Ji, Wu, Xin, Geng],
    ]
};

/// 六亲条目
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LiuQinEntry {
    pub relation: LiuQinKind,
    pub gan: TianGan,
}

/// 六亲
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LiuQin {
    pub entries: [LiuQinEntry; 8],
}

impl LiuQin {
    /// 六亲关系对应的天干
    pub fn gan_of(&self, relation: LiuQinKind) -> TianGan {
        self.entries[relation as usize].gan
    }
}

/// 排六亲
pub fn calculate_liu_qin(ri_gan: TianGan) -> LiuQin {
    let row = LIU_QIN_TABLE[ri_gan.index() as usize];
    LiuQin { entries: LiuQinKind::ALL.map(|relation| LiuQinEntry { relation, gan: row[relation as usize] }) }
}

#[cfg(feature = "std")]
impl serde::Serialize for LiuQin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        #[derive(serde::Serialize)]
        struct Detail {
            gan: TianGan,
            meaning: &'static str,
            influence: &'static str,
        }

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            let detail = Detail {
                gan: entry.gan,
                meaning: entry.relation.meaning(),
                influence: entry.relation.influence(),
            };
            map.serialize_entry(entry.relation.name(), &detail)?;
        }
        map.end()
    }
}

// ============================================================================
// 六神
// ============================================================================

/// 六神
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub enum LiuShenKind {
    QingLong,
    ZhuQue,
    GouChen,
    TengShe,
    BaiHu,
    XuanWu,
}

impl LiuShenKind {
    /// 六神循环顺序
    pub const ALL: [LiuShenKind; 6] = [
        LiuShenKind::QingLong,
        LiuShenKind::ZhuQue,
        LiuShenKind::GouChen,
        LiuShenKind::TengShe,
        LiuShenKind::BaiHu,
        LiuShenKind::XuanWu,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LiuShenKind::QingLong => "青龙",
            LiuShenKind::ZhuQue => "朱雀",
            LiuShenKind::GouChen => "勾陈",
            LiuShenKind::TengShe => "螣蛇",
            LiuShenKind::BaiHu => "白虎",
            LiuShenKind::XuanWu => "玄武",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn meaning(self) -> &'static str {
        match self {
            LiuShenKind::QingLong => "东方之神，属木，代表贵人相助、事业有成、升迁机会",
            LiuShenKind::ZhuQue => "南方之神，属火，代表文书、考试、学习、文化事业",
            LiuShenKind::GouChen => "中央之神，属土，代表土地、房产、稳定、积累",
            LiuShenKind::TengShe => "南方之神，属火，代表口舌、是非、变动、突发事件",
            LiuShenKind::BaiHu => "西方之神，属金，代表刀兵、竞争、压力、挑战",
            LiuShenKind::XuanWu => "北方之神，属水，代表智慧、谋略、暗中行动、秘密",
        }
    }

    pub fn influence(self) -> &'static str {
        match self {
            LiuShenKind::QingLong => "旺相时贵人相助，衰弱时孤立无援",
            LiuShenKind::ZhuQue => "旺相时文书顺利，衰弱时文书受阻",
            LiuShenKind::GouChen => "旺相时稳定发展，衰弱时变动不安",
            LiuShenKind::TengShe => "旺相时变动有利，衰弱时变动不利",
            LiuShenKind::BaiHu => "旺相时勇敢面对，衰弱时畏缩不前",
            LiuShenKind::XuanWu => "旺相时智慧开启，衰弱时智慧受阻",
        }
    }

    pub fn meaning_of(name: &str) -> &'static str {
        Self::from_name(name).map(Self::meaning).unwrap_or(UNKNOWN)
    }

    /// 日干起六神
    pub fn start_for(ri_gan: TianGan) -> Self {
        match ri_gan {
            TianGan::Jia | TianGan::Ji => LiuShenKind::QingLong,
            TianGan::Yi | TianGan::Geng => LiuShenKind::ZhuQue,
            TianGan::Bing | TianGan::Xin => LiuShenKind::GouChen,
            TianGan::Ding | TianGan::Ren => LiuShenKind::TengShe,
            TianGan::Wu | TianGan::Gui => LiuShenKind::BaiHu,
        }
    }
}

/// 当值六神
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LiuShen {
    pub shen: LiuShenKind,
    pub start_shen: LiuShenKind,
    /// 时辰序号（子时 = 0）
    pub hour_slot: u8,
}

impl LiuShen {
    /// 如 "第6位"
    pub fn position(&self) -> String {
        format!("第{}位", self.hour_slot + 1)
    }

    pub fn calculation_method(&self) -> String {
        format!("以{}为起始，按时辰推算", self.start_shen.name())
    }
}

/// 排六神：起始六神按时辰顺推
pub fn calculate_liu_shen(ri_gan: TianGan, hour_slot: u8) -> LiuShen {
    let start_shen = LiuShenKind::start_for(ri_gan);
    let index = (start_shen as usize + hour_slot as usize) % LiuShenKind::ALL.len();
    LiuShen { shen: LiuShenKind::ALL[index], start_shen, hour_slot }
}

#[cfg(feature = "std")]
impl serde::Serialize for LiuShen {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("LiuShen", 6)?;
        state.serialize_field("shen", self.shen.name())?;
        state.serialize_field("meaning", self.shen.meaning())?;
        state.serialize_field("influence", self.shen.influence())?;
        state.serialize_field("position", &self.position())?;
        state.serialize_field("start_shen", self.start_shen.name())?;
        state.serialize_field("calculation_method", &self.calculation_method())?;
        state.end()
    }
}

// ============================================================================
// 十二神将
// ============================================================================

/// 十二神将
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub enum ShiErShenKind {
    GuiRen,
    TengShe,
    ZhuQue,
    LiuHe,
    GouChen,
    QingLong,
    TianKong,
    BaiHu,
    TaiChang,
    XuanWu,
    TaiYin,
    TianHou,
}

impl ShiErShenKind {
    pub const ALL: [ShiErShenKind; 12] = [
        ShiErShenKind::GuiRen,
        ShiErShenKind::TengShe,
        ShiErShenKind::ZhuQue,
        ShiErShenKind::LiuHe,
        ShiErShenKind::GouChen,
        ShiErShenKind::QingLong,
        ShiErShenKind::TianKong,
        ShiErShenKind::BaiHu,
        ShiErShenKind::TaiChang,
        ShiErShenKind::XuanWu,
        ShiErShenKind::TaiYin,
        ShiErShenKind::TianHou,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShiErShenKind::GuiRen => "贵人",
            ShiErShenKind::TengShe => "螣蛇",
            ShiErShenKind::ZhuQue => "朱雀",
            ShiErShenKind::LiuHe => "六合",
            ShiErShenKind::GouChen => "勾陈",
            ShiErShenKind::QingLong => "青龙",
            ShiErShenKind::TianKong => "天空",
            ShiErShenKind::BaiHu => "白虎",
            ShiErShenKind::TaiChang => "太常",
            ShiErShenKind::XuanWu => "玄武",
            ShiErShenKind::TaiYin => "太阴",
            ShiErShenKind::TianHou => "天后",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn meaning(self) -> &'static str {
        match self {
            ShiErShenKind::GuiRen => "贵人相助，代表有贵人出现",
            ShiErShenKind::TengShe => "口舌是非，代表有口舌是非",
            ShiErShenKind::ZhuQue => "文书考试，代表有文书考试",
            ShiErShenKind::LiuHe => "合作和谐，代表有合作和谐",
            ShiErShenKind::GouChen => "土地房产，代表有土地房产",
            ShiErShenKind::QingLong => "贵人相助，代表有贵人相助",
            ShiErShenKind::TianKong => "天空之神，代表有空中的事情",
            ShiErShenKind::BaiHu => "刀兵竞争，代表有刀兵竞争",
            ShiErShenKind::TaiChang => "太常之神，代表有太常的事情",
            ShiErShenKind::XuanWu => "智慧谋略，代表有智慧谋略",
            ShiErShenKind::TaiYin => "太阴之神，代表有太阴的事情",
            ShiErShenKind::TianHou => "天后之神，代表有天后的事情",
        }
    }

    pub fn influence(self) -> &'static str {
        match self {
            ShiErShenKind::GuiRen => "旺相时贵人相助，衰弱时孤立无援",
            ShiErShenKind::TengShe => "旺相时变动有利，衰弱时变动不利",
            ShiErShenKind::ZhuQue => "旺相时文书顺利，衰弱时文书受阻",
            ShiErShenKind::LiuHe => "旺相时合作顺利，衰弱时合作受阻",
            ShiErShenKind::GouChen => "旺相时稳定发展，衰弱时变动不安",
            ShiErShenKind::QingLong => "旺相时贵人相助，衰弱时孤立无援",
            ShiErShenKind::TianKong => "旺相时空中有利，衰弱时空中有害",
            ShiErShenKind::BaiHu => "旺相时勇敢面对，衰弱时畏缩不前",
            ShiErShenKind::TaiChang => "旺相时常事顺利，衰弱时常事受阻",
            ShiErShenKind::XuanWu => "旺相时智慧开启，衰弱时智慧受阻",
            ShiErShenKind::TaiYin => "旺相时阴事顺利，衰弱时阴事受阻",
            ShiErShenKind::TianHou => "旺相时天后相助，衰弱时天后不助",
        }
    }

    pub fn wuxing(self) -> WuXing {
        match self {
            ShiErShenKind::GuiRen | ShiErShenKind::GouChen | ShiErShenKind::TaiChang => WuXing::Tu,
            ShiErShenKind::TengShe | ShiErShenKind::ZhuQue => WuXing::Huo,
            ShiErShenKind::LiuHe | ShiErShenKind::QingLong => WuXing::Mu,
            ShiErShenKind::TianKong | ShiErShenKind::BaiHu => WuXing::Jin,
            ShiErShenKind::XuanWu | ShiErShenKind::TaiYin | ShiErShenKind::TianHou => WuXing::Shui,
        }
    }

    pub fn meaning_of(name: &str) -> &'static str {
        Self::from_name(name).map(Self::meaning).unwrap_or(UNKNOWN)
    }
}

/// 十二神将参考表
///
/// 固定顺序排列，不随日干、时辰变化。
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ShiErShen {
    pub generals: [ShiErShenKind; 12],
}

impl Default for ShiErShen {
    fn default() -> Self {
        Self { generals: ShiErShenKind::ALL }
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for ShiErShen {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        #[derive(serde::Serialize)]
        struct Detail {
            position: String,
            meaning: &'static str,
            influence: &'static str,
            wuxing: WuXing,
        }

        let mut map = serializer.serialize_map(Some(self.generals.len()))?;
        for (i, shen) in self.generals.iter().enumerate() {
            let detail = Detail {
                position: format!("第{}位", i + 1),
                meaning: shen.meaning(),
                influence: shen.influence(),
                wuxing: shen.wuxing(),
            };
            map.serialize_entry(shen.name(), &detail)?;
        }
        map.end()
    }
}

// ============================================================================
// 神煞与贵人
// ============================================================================

/// 天乙贵人
const TIAN_YI: [ZhiPair; 10] = {
    use DiZhi::*;
    [
        ZhiPair(Chou, Wei),
        ZhiPair(Zi, Shen),
        ZhiPair(Hai, You),
        ZhiPair(Yin, Wu),
        ZhiPair(Chou, Wei),
        ZhiPair(Zi, Shen),
        ZhiPair(Hai, You),
        ZhiPair(Yin, Wu),
        ZhiPair(Si, Mao),
        ZhiPair(Si, Mao),
    ]
};

/// 天德贵人，与天刑同表
const TIAN_DE: [DiZhi; 10] = {
    use DiZhi::*;
    [Si, Wu, Wei, Shen, You, Xu, Hai, Zi, Chou, Yin]
};

/// 天喜
const TIAN_XI: [DiZhi; 10] = {
    use DiZhi::*;
    [You, Shen, Wei, Wu, Si, Chen, Mao, Yin, Chou, Zi]
};

/// 天罗
const TIAN_LUO: [DiZhi; 10] = {
    use DiZhi::*;
    [Chen, Si, Wu, Wei, Shen, You, Xu, Hai, Zi, Chou]
};

/// 地网
const DI_WANG: [DiZhi; 10] = {
    use DiZhi::*;
    [Xu, Hai, Zi, Chou, Yin, Mao, Chen, Si, Wu, Wei]
};

/// 寡宿
const GUA_SU: [DiZhi; 10] = {
    use DiZhi::*;
    [Shen, You, Hai, Zi, Hai, Zi, Yin, Mao, Si, Wu]
};

/// 神煞
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub struct ShenSha {
    pub tian_yi_gui_ren: ZhiPair,
    pub tian_de_gui_ren: DiZhi,
    pub yue_de_gui_ren: DiZhi,
    pub tian_xi: DiZhi,
    pub tian_ma: DiZhi,
    pub tian_xing: DiZhi,
    pub tian_luo: DiZhi,
    pub di_wang: DiZhi,
    pub gu_chen: DiZhi,
    pub gua_su: DiZhi,
}

/// 查神煞
///
/// 月德、天马、孤辰与日干寄宫相同。
pub fn calculate_shen_sha(ri_gan: TianGan) -> ShenSha {
    let i = ri_gan.index() as usize;
    ShenSha {
        tian_yi_gui_ren: TIAN_YI[i],
        tian_de_gui_ren: TIAN_DE[i],
        yue_de_gui_ren: ri_gan.ji_gong(),
        tian_xi: TIAN_XI[i],
        tian_ma: ri_gan.ji_gong(),
        tian_xing: TIAN_DE[i],
        tian_luo: TIAN_LUO[i],
        di_wang: DI_WANG[i],
        gu_chen: ri_gan.ji_gong(),
        gua_su: GUA_SU[i],
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for ShenSha {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(10))?;
        map.serialize_entry("天乙贵人", &self.tian_yi_gui_ren)?;
        map.serialize_entry("天德贵人", &self.tian_de_gui_ren)?;
        map.serialize_entry("月德贵人", &self.yue_de_gui_ren)?;
        map.serialize_entry("天喜", &self.tian_xi)?;
        map.serialize_entry("天马", &self.tian_ma)?;
        map.serialize_entry("天刑", &self.tian_xing)?;
        map.serialize_entry("天罗", &self.tian_luo)?;
        map.serialize_entry("地网", &self.di_wang)?;
        map.serialize_entry("孤辰", &self.gu_chen)?;
        map.serialize_entry("寡宿", &self.gua_su)?;
        map.end()
    }
}

/// 贵人
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GuiRen {
    pub tian_yi: ZhiPair,
    pub tian_de: DiZhi,
    pub yue_de: DiZhi,
    /// 方位说明
    pub fang_wei: String,
}

/// 查贵人
pub fn calculate_gui_ren(ri_gan: TianGan, yue_jiang: DiZhi) -> GuiRen {
    let shen_sha = calculate_shen_sha(ri_gan);
    GuiRen {
        tian_yi: shen_sha.tian_yi_gui_ren,
        tian_de: shen_sha.tian_de_gui_ren,
        yue_de: shen_sha.yue_de_gui_ren,
        fang_wei: format!("以{}为基准，{}为月将的贵人方位", ri_gan.name(), yue_jiang.name()),
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for GuiRen {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("天乙贵人", &self.tian_yi)?;
        map.serialize_entry("天德贵人", &self.tian_de)?;
        map.serialize_entry("月德贵人", &self.yue_de)?;
        map.serialize_entry("方位", &self.fang_wei)?;
        map.end()
    }
}

// ============================================================================
// 空亡、驿马
// ============================================================================

/// 空亡
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct KongWang {
    pub kong_wang: ZhiPair,
    pub meaning: &'static str,
    pub influence: &'static str,
}

/// 查空亡：甲庚戌亥，乙辛申酉，丙壬午未，丁癸辰巳，戊寅卯，己子丑
pub fn calculate_kong_wang(ri_gan: TianGan) -> KongWang {
    // 自甲起六干一循环，每干后退两位
    let first = DiZhi::from_index((22 - 2 * (ri_gan.index() % 6)) % 12);
    KongWang {
        kong_wang: ZhiPair(first, first.offset(1)),
        meaning: "空亡代表虚无、不实、无结果",
        influence: "空亡当值，事情容易落空或没有结果",
    }
}

/// 驿马
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct YiMa {
    pub yi_ma: DiZhi,
    pub meaning: &'static str,
    pub influence: &'static str,
}

/// 查驿马（取日干寄宫）
pub fn calculate_yi_ma(ri_gan: TianGan) -> YiMa {
    YiMa {
        yi_ma: ri_gan.ji_gong(),
        meaning: "驿马代表变动、迁移、旅行",
        influence: "驿马当值，事情容易变动或迁移",
    }
}

// ============================================================================
// 长生十二宫
// ============================================================================

/// 长生十二宫
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub enum ChangShengStage {
    ChangSheng,
    MuYu,
    GuanDai,
    LinGuan,
    DiWang,
    Shuai,
    Bing,
    Si,
    Mu,
    Jue,
    Tai,
    Yang,
}

impl ChangShengStage {
    pub const ALL: [ChangShengStage; 12] = [
        ChangShengStage::ChangSheng,
        ChangShengStage::MuYu,
        ChangShengStage::GuanDai,
        ChangShengStage::LinGuan,
        ChangShengStage::DiWang,
        ChangShengStage::Shuai,
        ChangShengStage::Bing,
        ChangShengStage::Si,
        ChangShengStage::Mu,
        ChangShengStage::Jue,
        ChangShengStage::Tai,
        ChangShengStage::Yang,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChangShengStage::ChangSheng => "长生",
            ChangShengStage::MuYu => "沐浴",
            ChangShengStage::GuanDai => "冠带",
            ChangShengStage::LinGuan => "临官",
            ChangShengStage::DiWang => "帝旺",
            ChangShengStage::Shuai => "衰",
            ChangShengStage::Bing => "病",
            ChangShengStage::Si => "死",
            ChangShengStage::Mu => "墓",
            ChangShengStage::Jue => "绝",
            ChangShengStage::Tai => "胎",
            ChangShengStage::Yang => "养",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn meaning(self) -> &'static str {
        match self {
            ChangShengStage::ChangSheng => "万物开始生长，代表开始、新生",
            ChangShengStage::MuYu => "万物开始清洁，代表清洁、净化",
            ChangShengStage::GuanDai => "万物开始装饰，代表装饰、美化",
            ChangShengStage::LinGuan => "万物开始当官，代表当官、掌权",
            ChangShengStage::DiWang => "万物达到极盛，代表极盛、顶峰",
            ChangShengStage::Shuai => "万物开始衰落，代表衰落、衰退",
            ChangShengStage::Bing => "万物开始生病，代表生病、疾病",
            ChangShengStage::Si => "万物开始死亡，代表死亡、结束",
            ChangShengStage::Mu => "万物开始埋葬，代表埋葬、隐藏",
            ChangShengStage::Jue => "万物开始断绝，代表断绝、分离",
            ChangShengStage::Tai => "万物开始孕育，代表孕育、孕育",
            ChangShengStage::Yang => "万物开始养育，代表养育、培养",
        }
    }

    /// 如 "旺相时开始顺利，衰弱时开始困难"
    pub fn influence(self) -> String {
        let verb = match self {
            ChangShengStage::ChangSheng => "开始",
            ChangShengStage::MuYu => "清洁",
            ChangShengStage::GuanDai => "装饰",
            ChangShengStage::LinGuan => "当官",
            ChangShengStage::DiWang => "极盛",
            ChangShengStage::Shuai => "衰落",
            ChangShengStage::Bing => "生病",
            ChangShengStage::Si => "死亡",
            ChangShengStage::Mu => "埋葬",
            ChangShengStage::Jue => "断绝",
            ChangShengStage::Tai => "孕育",
            ChangShengStage::Yang => "养育",
        };
        format!("旺相时{}顺利，衰弱时{}困难", verb, verb)
    }

    pub fn meaning_of(name: &str) -> &'static str {
        Self::from_name(name).map(Self::meaning).unwrap_or(UNKNOWN)
    }
}

/// 长生起点及行进方向：阳干顺行，阴干逆行
///
/// 戊随丙、己随丁。
fn chang_sheng_start(ri_gan: TianGan) -> DiZhi {
    match ri_gan {
        TianGan::Jia => DiZhi::Hai,
        TianGan::Yi => DiZhi::Wu,
        TianGan::Bing | TianGan::Wu => DiZhi::Yin,
        TianGan::Ding | TianGan::Ji => DiZhi::You,
        TianGan::Geng => DiZhi::Si,
        TianGan::Xin => DiZhi::Zi,
        TianGan::Ren => DiZhi::Shen,
        TianGan::Gui => DiZhi::Mao,
    }
}

/// 长生十二宫
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ChangSheng {
    pub stages: [(ChangShengStage, DiZhi); 12],
}

impl ChangSheng {
    /// 某宫所临地支
    pub fn zhi_of(&self, stage: ChangShengStage) -> DiZhi {
        self.stages[stage as usize].1
    }
}

/// 排长生十二宫
pub fn calculate_chang_sheng(ri_gan: TianGan) -> ChangSheng {
    let start = chang_sheng_start(ri_gan).index();
    let stages = ChangShengStage::ALL.map(|stage| {
        let step = stage as u8;
        let zhi = if ri_gan.is_yang() {
            DiZhi::from_index(start + step)
        } else {
            DiZhi::from_index(start + 12 - step)
        };
        (stage, zhi)
    });
    ChangSheng { stages }
}

#[cfg(feature = "std")]
impl serde::Serialize for ChangSheng {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        #[derive(serde::Serialize)]
        struct Detail {
            zhi: DiZhi,
            meaning: &'static str,
            influence: String,
        }

        let mut map = serializer.serialize_map(Some(self.stages.len()))?;
        for (stage, zhi) in &self.stages {
            let detail = Detail { zhi: *zhi, meaning: stage.meaning(), influence: stage.influence() };
            map.serialize_entry(stage.name(), &detail)?;
        }
        map.end()
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_liu_qin_table() {
        let jia = calculate_liu_qin(TianGan::Jia);
        assert_eq!(jia.gan_of(LiuQinKind::BiJie), TianGan::Yi);
        assert_eq!(jia.gan_of(LiuQinKind::ZhengCai), TianGan::Wu);
        assert_eq!(jia.gan_of(LiuQinKind::ZhengYin), TianGan::Gui);

        let geng = calculate_liu_qin(TianGan::Geng);
        assert_eq!(geng.gan_of(LiuQinKind::ShiShen), TianGan::Ren);
        assert_eq!(geng.gan_of(LiuQinKind::QiSha), TianGan::Bing);
        assert_eq!(geng.gan_of(LiuQinKind::ZhengGuan), TianGan::Ding);

        // 比劫与日干同五行
        for gan in TianGan::ALL {
            let liu_qin = calculate_liu_qin(gan);
            assert_eq!(liu_qin.gan_of(LiuQinKind::BiJie).wuxing(), gan.wuxing());
            assert_eq!(liu_qin.gan_of(LiuQinKind::ZhengCai).wuxing(), gan.wuxing().ke());
        }
    }

    #[test]
    fn test_liu_shen_rotation() {
        let liu_shen = calculate_liu_shen(TianGan::Geng, 5);
        assert_eq!(liu_shen.start_shen, LiuShenKind::ZhuQue);
        // 朱雀(1) + 5 = 玄武(5)
        assert_eq!(liu_shen.shen, LiuShenKind::XuanWu);
        assert_eq!(liu_shen.position(), "第6位");
        assert_eq!(liu_shen.calculation_method(), "以朱雀为起始，按时辰推算");

        // 时辰超过六位后循环
        assert_eq!(calculate_liu_shen(TianGan::Jia, 6).shen, LiuShenKind::QingLong);
        assert_eq!(calculate_liu_shen(TianGan::Gui, 11).shen, LiuShenKind::TengShe);
    }

    #[test]
    fn test_shi_er_shen_is_static() {
        let table = ShiErShen::default();
        assert_eq!(table.generals[0], ShiErShenKind::GuiRen);
        assert_eq!(table.generals[11], ShiErShenKind::TianHou);
        assert_eq!(ShiErShenKind::LiuHe.wuxing(), WuXing::Mu);
        assert_eq!(ShiErShenKind::TianKong.wuxing(), WuXing::Jin);
    }

    #[test]
    fn test_shen_sha() {
        let shen_sha = calculate_shen_sha(TianGan::Geng);
        assert_eq!(shen_sha.tian_yi_gui_ren.to_string(), "亥酉");
        assert_eq!(shen_sha.tian_de_gui_ren, DiZhi::Hai);
        assert_eq!(shen_sha.yue_de_gui_ren, DiZhi::Shen);
        assert_eq!(shen_sha.tian_xi, DiZhi::Mao);
        assert_eq!(shen_sha.tian_luo, DiZhi::Xu);
        assert_eq!(shen_sha.di_wang, DiZhi::Chen);
        assert_eq!(shen_sha.gua_su, DiZhi::Yin);

        let ren = calculate_shen_sha(TianGan::Ren);
        assert_eq!(ren.tian_yi_gui_ren, ZhiPair(DiZhi::Si, DiZhi::Mao));
        assert!(ren.tian_yi_gui_ren.contains(DiZhi::Mao));
    }

    #[test]
    fn test_gui_ren_direction() {
        let gui_ren = calculate_gui_ren(TianGan::Geng, DiZhi::Wu);
        assert_eq!(gui_ren.fang_wei, "以庚为基准，午为月将的贵人方位");
        assert_eq!(gui_ren.tian_yi, ZhiPair(DiZhi::Hai, DiZhi::You));
    }

    #[test]
    fn test_kong_wang_and_yi_ma() {
        let expected = [
            "戌亥", "申酉", "午未", "辰巳", "寅卯", "子丑", "戌亥", "申酉", "午未", "辰巳",
        ];
        for (gan, text) in TianGan::ALL.into_iter().zip(expected) {
            assert_eq!(calculate_kong_wang(gan).kong_wang.to_string(), text);
        }
        assert_eq!(calculate_yi_ma(TianGan::Geng).yi_ma, DiZhi::Shen);
        assert_eq!(calculate_yi_ma(TianGan::Gui).yi_ma, DiZhi::Zi);
    }

    #[test]
    fn test_chang_sheng() {
        let jia = calculate_chang_sheng(TianGan::Jia);
        assert_eq!(jia.zhi_of(ChangShengStage::ChangSheng), DiZhi::Hai);
        assert_eq!(jia.zhi_of(ChangShengStage::DiWang), DiZhi::Mao);
        assert_eq!(jia.zhi_of(ChangShengStage::Yang), DiZhi::Xu);

        let yi = calculate_chang_sheng(TianGan::Yi);
        assert_eq!(yi.zhi_of(ChangShengStage::ChangSheng), DiZhi::Wu);
        assert_eq!(yi.zhi_of(ChangShengStage::MuYu), DiZhi::Si);
        assert_eq!(yi.zhi_of(ChangShengStage::Yang), DiZhi::Wei);

        let gui = calculate_chang_sheng(TianGan::Gui);
        assert_eq!(gui.zhi_of(ChangShengStage::ChangSheng), DiZhi::Mao);
        assert_eq!(gui.zhi_of(ChangShengStage::Yang), DiZhi::Chen);

        assert_eq!(ChangShengStage::Mu.influence(), "旺相时埋葬顺利，衰弱时埋葬困难");
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(LiuQinKind::meaning_of("正财"), "正当收入、稳定财富，代表正当收入");
        assert_eq!(LiuQinKind::meaning_of("财神"), UNKNOWN);
        assert_eq!(LiuShenKind::meaning_of("玄武"), "北方之神，属水，代表智慧、谋略、暗中行动、秘密");
        assert_eq!(ShiErShenKind::meaning_of("天后"), "天后之神，代表有天后的事情");
        assert_eq!(ChangShengStage::meaning_of("长生"), "万物开始生长，代表开始、新生");
        assert_eq!(ChangShengStage::meaning_of(""), UNKNOWN);
    }
}
