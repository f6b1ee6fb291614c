//! # 三传
//!
//! 按九宗门法的先后顺序逐一尝试，第一个成立的课法即定三传，其后课法不再尝试；
//! 九法均不成立时强制取传。
//!
//! | 序 | 课法 | 条件 | 初传 | 中传 | 末传 |
//! |----|------|------|------|------|------|
//! | 1 | 贼克法 | 某课上神克下神 | 被克之下神 | 生初传者 | 生中传者 |
//! | 2 | 知一法 | 两课五行相同 | 前课下神 | 后课下神 | 六合（无合取初传所生） |
//! | 3 | 涉害法 | 某课上下相害 | 下神 | 初传对冲 | 中传所生 |
//! | 4 | 遥克法 | 两课五行相克 | 被克课下神 | 两下神之间 | 克课下神 |
//! | 5 | 昴星法 | 下神为辰戌丑未 | 该下神 | 下一魁罡 | 中传对冲 |
//! | 6-9 | 别责、八专、伏吟、反吟 | 暂不成立 | | | |
//!
//! 课法条件可以重叠，先成立者优先，不做互斥检查。

use crate::si_ke::{KeEntry, KeSymbol, SiKe};
use crate::types::{DiZhi, TianGan};
use alloc::{format, string::String};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

// ============================================================================
// 课法
// ============================================================================

/// 取传课法
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub enum SanChuanMethod {
    /// 贼克法：上神克下神
    ZeiKe,
    /// 知一法（比用）：同类相比
    ZhiYi,
    /// 涉害法：上下相害
    SheHai,
    /// 遥克法：隔课相克
    YaoKe,
    /// 昴星法：取魁罡
    MaoXing,
    /// 别责法：取德合
    BieZe,
    /// 八专法：干支同类
    BaZhuan,
    /// 伏吟法：课传相同
    FuYin,
    /// 反吟法：课传相冲
    FanYin,
    /// 强制取传
    QiangZhi,
}

/// 九宗门法，按优先级排列
pub const NINE_METHODS: [SanChuanMethod; 9] = [
    SanChuanMethod::ZeiKe,
    SanChuanMethod::ZhiYi,
    SanChuanMethod::SheHai,
    SanChuanMethod::YaoKe,
    SanChuanMethod::MaoXing,
    SanChuanMethod::BieZe,
    SanChuanMethod::BaZhuan,
    SanChuanMethod::FuYin,
    SanChuanMethod::FanYin,
];

impl SanChuanMethod {
    pub fn name(self) -> &'static str {
        match self {
            SanChuanMethod::ZeiKe => "贼克法",
            SanChuanMethod::ZhiYi => "知一法",
            SanChuanMethod::SheHai => "涉害法",
            SanChuanMethod::YaoKe => "遥克法",
            SanChuanMethod::MaoXing => "昴星法",
            SanChuanMethod::BieZe => "别责法",
            SanChuanMethod::BaZhuan => "八专法",
            SanChuanMethod::FuYin => "伏吟法",
            SanChuanMethod::FanYin => "反吟法",
            SanChuanMethod::QiangZhi => "强制取传",
        }
    }

    /// 按课法取三传，条件不成立返回 None
    ///
    /// 强制取传以第一课下神（日支）为初传，总是成立。
    pub fn try_derive(self, si_ke: &SiKe) -> Option<SanChuan> {
        match self {
            SanChuanMethod::ZeiKe => zei_ke_fa(si_ke),
            SanChuanMethod::ZhiYi => zhi_yi_fa(si_ke),
            SanChuanMethod::SheHai => she_hai_fa(si_ke),
            SanChuanMethod::YaoKe => yao_ke_fa(si_ke),
            SanChuanMethod::MaoXing => mao_xing_fa(si_ke),
            // 别责、八专、伏吟、反吟尚未实现取传条件
            SanChuanMethod::BieZe |
            SanChuanMethod::BaZhuan |
            SanChuanMethod::FuYin |
            SanChuanMethod::FanYin => None,
            SanChuanMethod::QiangZhi => Some(qiang_zhi_qu_chuan(si_ke.yi_ke.xia)),
        }
    }
}

crate::types::serialize_as_name!(SanChuanMethod);

// ============================================================================
// 三传结构
// ============================================================================

/// 单传
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ChuanEntry {
    pub zhi: DiZhi,
    pub meaning: &'static str,
    pub method: SanChuanMethod,
    /// 推导依据
    pub calculation: String,
}

impl ChuanEntry {
    fn new(zhi: DiZhi, meaning: &'static str, method: SanChuanMethod, calculation: String) -> Self {
        Self { zhi, meaning, method, calculation }
    }
}

/// 三传
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct SanChuan {
    pub method_used: SanChuanMethod,
    pub chu_chuan: ChuanEntry,
    pub zhong_chuan: ChuanEntry,
    pub mo_chuan: ChuanEntry,
}

impl SanChuan {
    /// 初、中、末三传地支
    pub fn zhi(&self) -> [DiZhi; 3] {
        [self.chu_chuan.zhi, self.zhong_chuan.zhi, self.mo_chuan.zhi]
    }
}

// ============================================================================
// 取传入口
// ============================================================================

/// 按九宗门法取三传
pub fn calculate_san_chuan(si_ke: &SiKe, ri_zhi: DiZhi) -> SanChuan {
    resolve_with(&NINE_METHODS, si_ke, ri_zhi)
}

/// 按给定顺序尝试课法，全部不成立时强制取传
pub fn resolve_with(methods: &[SanChuanMethod], si_ke: &SiKe, ri_zhi: DiZhi) -> SanChuan {
    let san_chuan = methods
        .iter()
        .find_map(|method| method.try_derive(si_ke))
        .unwrap_or_else(|| qiang_zhi_qu_chuan(ri_zhi));

    log::debug!(
        target: "liuren",
        "三传取法: {}，{}{}{}",
        san_chuan.method_used.name(),
        san_chuan.chu_chuan.zhi.name(),
        san_chuan.zhong_chuan.zhi.name(),
        san_chuan.mo_chuan.zhi.name()
    );

    san_chuan
}

// ============================================================================
// 各课法
// ============================================================================

/// 贼克法：取第一个上神克下神之课
pub fn zei_ke_fa(si_ke: &SiKe) -> Option<SanChuan> {
    let method = SanChuanMethod::ZeiKe;
    let ke = si_ke.entries().into_iter().find(KeEntry::is_shang_ke_xia)?;

    let chu = ke.xia;
    let zhong = sheng_wo_zhi(chu);
    let mo = sheng_wo_zhi(zhong);

    Some(SanChuan {
        method_used: method,
        chu_chuan: ChuanEntry::new(
            chu,
            "初传：被克之神，代表事情的受害者或阻力",
            method,
            format!("{}克{}，取{}为初传", ke.shang.name(), chu.name(), chu.name()),
        ),
        zhong_chuan: ChuanEntry::new(
            zhong,
            "中传：生初传之神，代表解决问题的力量",
            method,
            format!("{}生{}", zhong.name(), chu.name()),
        ),
        mo_chuan: ChuanEntry::new(
            mo,
            "末传：生中传之神，代表最终的结果",
            method,
            format!("{}生{}", mo.name(), zhong.name()),
        ),
    })
}

/// 知一法：取第一对五行相同的课
pub fn zhi_yi_fa(si_ke: &SiKe) -> Option<SanChuan> {
    let method = SanChuanMethod::ZhiYi;
    let entries = si_ke.entries();
    let (first, second) = (0..4)
        .flat_map(|i| (i + 1..4).map(move |j| (i, j)))
        .find(|&(i, j)| entries[i].wuxing() == entries[j].wuxing())?;

    let chu = entries[first].xia;
    let zhong = entries[second].xia;
    let mo = he_zhi(chu, zhong);

    Some(SanChuan {
        method_used: method,
        chu_chuan: ChuanEntry::new(
            chu,
            "初传：同类之神，代表事情的助力",
            method,
            format!("取同五行神{}为初传", chu.name()),
        ),
        zhong_chuan: ChuanEntry::new(
            zhong,
            "中传：同类之神，代表合作力量",
            method,
            format!("取同五行神{}为中传", zhong.name()),
        ),
        mo_chuan: ChuanEntry::new(
            mo,
            "末传：合化之神，代表合作结果",
            method,
            format!("{}与{}合化为{}", chu.name(), zhong.name(), mo.name()),
        ),
    })
}

/// 涉害法：取第一个上下相害之课
pub fn she_hai_fa(si_ke: &SiKe) -> Option<SanChuan> {
    let method = SanChuanMethod::SheHai;
    let ke = si_ke.entries().into_iter().find(|ke| is_harm(ke.shang, ke.xia))?;

    let chu = ke.xia;
    let zhong = chu.opposite();
    let mo = sheng_zhi(zhong);

    Some(SanChuan {
        method_used: method,
        chu_chuan: ChuanEntry::new(
            chu,
            "初传：涉害之神，代表矛盾冲突",
            method,
            format!("{}与{}相害，取{}为初传", ke.shang.name(), chu.name(), chu.name()),
        ),
        zhong_chuan: ChuanEntry::new(
            zhong,
            "中传：对冲之神，代表化解之道",
            method,
            format!("{}的对冲{}为中传", chu.name(), zhong.name()),
        ),
        mo_chuan: ChuanEntry::new(
            mo,
            "末传：生助之神，代表最终和解",
            method,
            format!("{}所生的{}为末传", zhong.name(), mo.name()),
        ),
    })
}

/// 遥克法：取第一对（i 课克 j 课）五行相克的课，i ≠ j
pub fn yao_ke_fa(si_ke: &SiKe) -> Option<SanChuan> {
    let method = SanChuanMethod::YaoKe;
    let entries = si_ke.entries();
    let (i, j) = (0..4)
        .flat_map(|i| (0..4).map(move |j| (i, j)))
        .find(|&(i, j)| i != j && entries[i].wuxing().controls(entries[j].wuxing()))?;

    let chu = entries[j].xia;
    let zhong = middle_zhi(entries[i].xia, entries[j].xia);
    let mo = entries[i].xia;

    Some(SanChuan {
        method_used: method,
        chu_chuan: ChuanEntry::new(
            chu,
            "初传：被遥克之神，代表远程影响",
            method,
            format!("隔位相克，取{}为初传", chu.name()),
        ),
        zhong_chuan: ChuanEntry::new(
            zhong,
            "中传：中间之神，代表传递媒介",
            method,
            format!("两神中间的{}为中传", zhong.name()),
        ),
        mo_chuan: ChuanEntry::new(
            mo,
            "末传：遥克之神，代表克制力量",
            method,
            format!("遥克的{}为末传", mo.name()),
        ),
    })
}

/// 昴星法：取第一个下神为魁罡（辰戌丑未）之课
pub fn mao_xing_fa(si_ke: &SiKe) -> Option<SanChuan> {
    let method = SanChuanMethod::MaoXing;
    let chu = si_ke.entries().into_iter().map(|ke| ke.xia).find(|zhi| next_kui_gang(*zhi).is_some())?;
    let zhong = next_kui_gang(chu)?;
    let mo = zhong.opposite();

    Some(SanChuan {
        method_used: method,
        chu_chuan: ChuanEntry::new(
            chu,
            "初传：魁罡之神，代表权威力量",
            method,
            format!("取魁罡神{}为初传", chu.name()),
        ),
        zhong_chuan: ChuanEntry::new(
            zhong,
            "中传：下一魁罡，代表权威传递",
            method,
            format!("下一魁罡{}为中传", zhong.name()),
        ),
        mo_chuan: ChuanEntry::new(
            mo,
            "末传：对冲之神，代表权威制衡",
            method,
            format!("{}的对冲{}为末传", zhong.name(), mo.name()),
        ),
    })
}

/// 强制取传：以日支为初传
pub fn qiang_zhi_qu_chuan(ri_zhi: DiZhi) -> SanChuan {
    let method = SanChuanMethod::QiangZhi;
    let chu = ri_zhi;
    let zhong = sheng_zhi(chu);
    let mo = sheng_zhi(zhong);

    SanChuan {
        method_used: method,
        chu_chuan: ChuanEntry::new(
            chu,
            "初传：日支，代表求问者自身",
            method,
            format!("强制取日支{}为初传", chu.name()),
        ),
        zhong_chuan: ChuanEntry::new(
            zhong,
            "中传：初传所生之神，代表助力",
            method,
            format!("{}所生的{}为中传", chu.name(), zhong.name()),
        ),
        mo_chuan: ChuanEntry::new(
            mo,
            "末传：中传所生之神，代表结果",
            method,
            format!("{}所生的{}为末传", zhong.name(), mo.name()),
        ),
    }
}

// ============================================================================
// 辅助查表
// ============================================================================

/// 地支六害（无序）
const HARM_PAIRS: [(DiZhi, DiZhi); 6] = [
    (DiZhi::Zi, DiZhi::Wei),
    (DiZhi::Chou, DiZhi::Wu),
    (DiZhi::Yin, DiZhi::Si),
    (DiZhi::Mao, DiZhi::Chen),
    (DiZhi::Shen, DiZhi::Hai),
    (DiZhi::You, DiZhi::Xu),
];

/// 干支相害
const GAN_ZHI_HARM: [(TianGan, DiZhi); 10] = [
    (TianGan::Jia, DiZhi::Wei),
    (TianGan::Yi, DiZhi::Wu),
    (TianGan::Bing, DiZhi::Si),
    (TianGan::Ding, DiZhi::Chen),
    (TianGan::Wu, DiZhi::Mao),
    (TianGan::Ji, DiZhi::Yin),
    (TianGan::Geng, DiZhi::Chou),
    (TianGan::Xin, DiZhi::Zi),
    (TianGan::Ren, DiZhi::Hai),
    (TianGan::Gui, DiZhi::Xu),
];

/// 地支六合（无序），值为合化所取地支
const HE_TABLE: [(DiZhi, DiZhi, DiZhi); 6] = [
    (DiZhi::Zi, DiZhi::Chou, DiZhi::Yin),
    (DiZhi::Yin, DiZhi::Hai, DiZhi::Mao),
    (DiZhi::Mao, DiZhi::Xu, DiZhi::Chen),
    (DiZhi::Chen, DiZhi::You, DiZhi::Si),
    (DiZhi::Si, DiZhi::Shen, DiZhi::Wu),
    (DiZhi::Wu, DiZhi::Wei, DiZhi::Wei),
];

/// 魁罡循环顺序
const KUI_GANG: [DiZhi; 4] = [DiZhi::Chen, DiZhi::Xu, DiZhi::Chou, DiZhi::Wei];

/// 上下神是否相害
pub fn is_harm(shang: KeSymbol, xia: DiZhi) -> bool {
    match shang {
        KeSymbol::Zhi(zhi) => HARM_PAIRS
            .iter()
            .any(|&(a, b)| (zhi == a && xia == b) || (zhi == b && xia == a)),
        KeSymbol::Gan(gan) => GAN_ZHI_HARM.contains(&(gan, xia)),
    }
}

/// 生支：所生五行的代表地支
pub fn sheng_zhi(zhi: DiZhi) -> DiZhi {
    match zhi {
        DiZhi::Yin | DiZhi::Mao => DiZhi::Si,
        DiZhi::Si | DiZhi::Wu => DiZhi::Wei,
        DiZhi::Chou | DiZhi::Chen | DiZhi::Wei | DiZhi::Xu => DiZhi::Shen,
        DiZhi::Shen | DiZhi::You => DiZhi::Zi,
        DiZhi::Zi | DiZhi::Hai => DiZhi::Yin,
    }
}

/// 生我支：生本支五行者的代表地支
pub fn sheng_wo_zhi(zhi: DiZhi) -> DiZhi {
    match zhi {
        DiZhi::Yin | DiZhi::Mao => DiZhi::Zi,
        DiZhi::Si | DiZhi::Wu => DiZhi::Yin,
        DiZhi::Chou | DiZhi::Chen | DiZhi::Wei | DiZhi::Xu => DiZhi::Si,
        DiZhi::Shen | DiZhi::You => DiZhi::Wei,
        DiZhi::Zi | DiZhi::Hai => DiZhi::Shen,
    }
}

/// 克支：所克五行的代表地支
pub fn ke_zhi(zhi: DiZhi) -> DiZhi {
    match zhi {
        DiZhi::Yin | DiZhi::Mao => DiZhi::Chen,
        DiZhi::Chou | DiZhi::Chen | DiZhi::Wei | DiZhi::Xu => DiZhi::Zi,
        DiZhi::Zi | DiZhi::Hai => DiZhi::Wu,
        DiZhi::Si | DiZhi::Wu => DiZhi::You,
        DiZhi::Shen | DiZhi::You => DiZhi::Yin,
    }
}

/// 六合合化，不成六合时取 a 的生支
pub fn he_zhi(a: DiZhi, b: DiZhi) -> DiZhi {
    HE_TABLE
        .iter()
        .find(|&&(x, y, _)| (a == x && b == y) || (a == y && b == x))
        .map(|&(_, _, he)| he)
        .unwrap_or_else(|| sheng_zhi(a))
}

/// 两地支序号的中点（向下取整）
pub fn middle_zhi(a: DiZhi, b: DiZhi) -> DiZhi {
    DiZhi::from_index((a.index() + b.index()) / 2)
}

/// 魁罡循环中的下一位，非魁罡返回 None
pub fn next_kui_gang(zhi: DiZhi) -> Option<DiZhi> {
    let i = KUI_GANG.iter().position(|k| *k == zhi)?;
    Some(KUI_GANG[(i + 1) % KUI_GANG.len()])
}

// ============================================================================
// 单元测试
// ============================================================================
