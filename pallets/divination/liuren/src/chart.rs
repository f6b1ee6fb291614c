//! # 课盘组装
//!
//! 起课流程：
//!
//! 1. 校验输入
//! 2. 换算四柱与月将
//! 3. 起天地盘
//! 4. 起四课
//! 5. 取三传
//! 6. 排六亲、六神、十二神将，查神煞、贵人、空亡、驿马、长生
//! 7. （可选）附加年命与行年
//!
//! 全部为纯函数，同一输入总得到完全相同的课盘。

use crate::annotation::{
    calculate_chang_sheng, calculate_gui_ren, calculate_kong_wang, calculate_liu_qin,
    calculate_liu_shen, calculate_shen_sha, calculate_yi_ma, ChangSheng, GuiRen, KongWang, LiuQin,
    LiuShen, ShenSha, ShiErShen, YiMa,
};
use crate::calendar::{self, CalendarMode, CalendarSource, JieQi, SiZhu, SolarApproximation};
use crate::ming::{calculate_user_info, BirthInfo, UserInfo};
use crate::plate::{calculate_tian_di_pan, DiPan, TianPan};
use crate::san_chuan::{calculate_san_chuan, SanChuan};
use crate::si_ke::{calculate_si_ke, SiKe};
use crate::types::{ChartInput, DiZhi, GanZhi, ValidationError};

/// 大六壬课盘
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct LiuRenChart {
    /// 起课时间
    #[cfg_attr(feature = "std", serde(skip))]
    pub input: ChartInput,
    /// 历法来源
    #[cfg_attr(feature = "std", serde(skip))]
    pub mode: CalendarMode,
    pub yue_jiang: DiZhi,
    pub jie_qi: JieQi,
    pub nian_gan_zhi: GanZhi,
    pub yue_gan_zhi: GanZhi,
    pub ri_gan_zhi: GanZhi,
    pub shi_gan_zhi: GanZhi,
    pub tian_pan: TianPan,
    pub di_pan: DiPan,
    pub si_ke: SiKe,
    pub san_chuan: SanChuan,
    pub liu_qin: LiuQin,
    pub liu_shen: LiuShen,
    pub shi_er_shen: ShiErShen,
    pub shen_sha: ShenSha,
    pub gui_ren: GuiRen,
    pub kong_wang: KongWang,
    pub yi_ma: YiMa,
    pub chang_sheng: ChangSheng,
    pub user_info: UserInfo,
}

/// 按公历时间起课（公历近似历法）
pub fn compute_chart(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
) -> Result<LiuRenChart, ValidationError> {
    let input = ChartInput::new(year, month, day, hour, minute)?;
    compute_chart_with::<SolarApproximation>(&input)
}

/// 按指定历法数据源起课
///
/// 未给出生信息时以起课时刻为出生时刻。
pub fn compute_chart_with<C: CalendarSource>(input: &ChartInput) -> Result<LiuRenChart, ValidationError> {
    compute_chart_with_birth::<C>(input, BirthInfo::from(input))
}

/// 起课并附加求测者的年命、行年
///
/// 行年以起课年份为当前年。
pub fn compute_chart_with_birth<C: CalendarSource>(
    input: &ChartInput,
    birth: BirthInfo,
) -> Result<LiuRenChart, ValidationError> {
    input.validate()?;
    let user_info = calculate_user_info(birth, input.year);
    Ok(assemble(input, calendar::convert::<C>(input), user_info))
}

/// 按已保存的历法模式重新起课
///
/// 公历模式的课盘始终按公历近似算法重算，不随数据源更换而改变。
pub fn recompute_chart<C: CalendarSource>(
    input: &ChartInput,
    mode: CalendarMode,
) -> Result<LiuRenChart, ValidationError> {
    match mode {
        CalendarMode::Solar => compute_chart_with::<SolarApproximation>(input),
        CalendarMode::Lunar => compute_chart_with::<C>(input),
    }
}

fn assemble(input: &ChartInput, si_zhu: SiZhu, user_info: UserInfo) -> LiuRenChart {
    let SiZhu { year, month, day, hour, jie_qi, yue_jiang, mode } = si_zhu;
    let ri_gan = day.gan;

    let (tian_pan, di_pan) = calculate_tian_di_pan(yue_jiang);
    let si_ke = calculate_si_ke(ri_gan, day.zhi, hour.gan, hour.zhi, yue_jiang);
    let san_chuan = calculate_san_chuan(&si_ke, day.zhi);

    LiuRenChart {
        input: *input,
        mode,
        yue_jiang,
        jie_qi,
        nian_gan_zhi: year,
        yue_gan_zhi: month,
        ri_gan_zhi: day,
        shi_gan_zhi: hour,
        tian_pan,
        di_pan,
        si_ke,
        san_chuan,
        liu_qin: calculate_liu_qin(ri_gan),
        liu_shen: calculate_liu_shen(ri_gan, input.hour_slot()),
        shi_er_shen: ShiErShen::default(),
        shen_sha: calculate_shen_sha(ri_gan),
        gui_ren: calculate_gui_ren(ri_gan, yue_jiang),
        kong_wang: calculate_kong_wang(ri_gan),
        yi_ma: calculate_yi_ma(ri_gan),
        chang_sheng: calculate_chang_sheng(ri_gan),
        user_info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{LiuShenKind, ZhiPair};
    use crate::san_chuan::SanChuanMethod;
    use crate::calendar::CalendarFields;
    use crate::types::{InputField, TianGan};

    struct FixedLunar;

    impl CalendarSource for FixedLunar {
        fn to_calendar_fields(_input: &ChartInput) -> Option<CalendarFields> {
            Some(CalendarFields {
                year: GanZhi::new(TianGan::Jia, DiZhi::Zi),
                month: GanZhi::new(TianGan::Bing, DiZhi::Yin),
                day: GanZhi::new(TianGan::Wu, DiZhi::Wu),
                month_number: 3,
                mode: CalendarMode::Lunar,
            })
        }
    }

    fn golden() -> LiuRenChart {
        compute_chart(2024, 6, 15, 10, 30).unwrap()
    }

    #[test]
    fn test_golden_chart() {
        let chart = golden();
        assert_eq!(chart.nian_gan_zhi, GanZhi::new(TianGan::Jia, DiZhi::Chen));
        assert_eq!(chart.yue_gan_zhi, GanZhi::new(TianGan::Ji, DiZhi::Wei));
        assert_eq!(chart.ri_gan_zhi, GanZhi::new(TianGan::Geng, DiZhi::Zi));
        assert_eq!(chart.shi_gan_zhi, GanZhi::new(TianGan::Xin, DiZhi::Si));
        assert_eq!(chart.yue_jiang, DiZhi::Wu);
        assert_eq!(chart.jie_qi, JieQi::MangZhong);
        assert_eq!(chart.mode, CalendarMode::Solar);
        assert_eq!(chart.tian_pan.at(1), Some(DiZhi::Wu));

        assert_eq!(chart.san_chuan.method_used, SanChuanMethod::ZhiYi);
        assert_eq!(chart.san_chuan.zhi(), [DiZhi::Zi, DiZhi::Si, DiZhi::Yin]);

        assert_eq!(chart.liu_shen.shen, LiuShenKind::XuanWu);
        assert_eq!(chart.kong_wang.kong_wang, ZhiPair(DiZhi::Xu, DiZhi::Hai));
        assert_eq!(chart.yi_ma.yi_ma, DiZhi::Shen);
        // 默认以起课时刻为出生时刻
        assert_eq!(chart.user_info.birth, BirthInfo::new(2024, 6, 15, 10).unwrap());
        assert_eq!(chart.user_info.xing_nian.xing_nian, 1);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        assert_eq!(compute_chart(2024, 13, 1, 0, 0).unwrap_err().field, InputField::Month);
        assert_eq!(compute_chart(2024, 6, 15, 24, 0).unwrap_err().field, InputField::Hour);
        assert_eq!(compute_chart(1899, 6, 15, 10, 0).unwrap_err().field, InputField::Year);
        assert_eq!(compute_chart(2024, 6, 0, 10, 0).unwrap_err().field, InputField::Day);
        assert_eq!(compute_chart(2024, 6, 15, 10, 60).unwrap_err().field, InputField::Minute);

        let bad = ChartInput { year: 2024, month: 0, day: 1, hour: 0, minute: 0 };
        assert!(compute_chart_with::<SolarApproximation>(&bad).is_err());
    }

    #[test]
    fn test_chart_is_deterministic() {
        assert_eq!(golden(), golden());
    }

    #[test]
    fn test_day_pair_repeats_after_sixty_days() {
        // 2024 闰年：1 月 1 日后 60 天为 3 月 1 日
        let a = compute_chart(2024, 1, 1, 12, 0).unwrap();
        let b = compute_chart(2024, 3, 1, 12, 0).unwrap();
        assert_eq!(a.ri_gan_zhi, b.ri_gan_zhi);
        assert_ne!(a.ri_gan_zhi, compute_chart(2024, 1, 2, 12, 0).unwrap().ri_gan_zhi);
    }

    #[test]
    fn test_unavailable_source_matches_solar() {
        let input = ChartInput::new(2024, 6, 15, 10, 30).unwrap();
        let fallback = compute_chart_with::<()>(&input).unwrap();
        assert_eq!(fallback, golden());
    }

    #[test]
    fn test_recompute_keeps_stored_mode() {
        let input = ChartInput::new(2024, 6, 15, 10, 30).unwrap();

        // 公历记录在数据源更换后仍按公历重算
        let solar = recompute_chart::<FixedLunar>(&input, CalendarMode::Solar).unwrap();
        assert_eq!(solar, golden());

        let lunar = recompute_chart::<FixedLunar>(&input, CalendarMode::Lunar).unwrap();
        assert_eq!(lunar.mode, CalendarMode::Lunar);
        assert_eq!(lunar.ri_gan_zhi, GanZhi::new(TianGan::Wu, DiZhi::Wu));
        assert_eq!(lunar, compute_chart_with::<FixedLunar>(&input).unwrap());
    }

    #[test]
    fn test_every_hour_yields_one_method() {
        for hour in 0..24 {
            let chart = compute_chart(2024, 6, 15, hour, 0).unwrap();
            assert_eq!(chart.shi_gan_zhi.zhi.index(), crate::calendar::hour_slot(hour));
            assert_ne!(chart.san_chuan.method_used, SanChuanMethod::QiangZhi);
        }
    }

    #[test]
    fn test_birth_info_attached() {
        let input = ChartInput::new(2024, 6, 15, 10, 30).unwrap();
        let birth = BirthInfo::new(1990, 5, 20, 14).unwrap();
        let chart = compute_chart_with_birth::<SolarApproximation>(&input, birth).unwrap();
        let user_info = chart.user_info;
        assert_eq!(user_info.xing_nian.xing_nian, 35);
        assert_eq!(user_info.birth, birth);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_json_keys() {
        let value = serde_json::to_value(golden()).unwrap();
        let keys = [
            "yue_jiang", "jie_qi", "nian_gan_zhi", "yue_gan_zhi", "ri_gan_zhi", "shi_gan_zhi",
            "tian_pan", "di_pan", "si_ke", "san_chuan", "liu_qin", "liu_shen", "shi_er_shen",
            "shen_sha", "gui_ren", "kong_wang", "yi_ma", "chang_sheng", "user_info",
        ];
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), keys.len());
        for key in keys {
            assert!(object.contains_key(key), "missing key {key}");
        }

        assert_eq!(value["yue_jiang"], "午");
        assert_eq!(value["jie_qi"], "芒种");
        assert_eq!(value["ri_gan_zhi"], "庚子");
        assert_eq!(value["tian_pan"]["第1位"], "午");
        assert_eq!(value["di_pan"]["第1位"], "子");
        assert_eq!(value["san_chuan"]["method_used"], "知一法");
        assert_eq!(value["san_chuan"]["chu_chuan"]["zhi"], "子");
        assert_eq!(value["si_ke"]["yi_ke"]["gan"], "庚");
        assert_eq!(value["liu_qin"]["正财"]["gan"], "甲");
        assert_eq!(value["liu_shen"]["shen"], "玄武");
        assert_eq!(value["shen_sha"]["天乙贵人"], "亥酉");
        assert_eq!(value["gui_ren"]["方位"], "以庚为基准，午为月将的贵人方位");
        assert_eq!(value["kong_wang"]["kong_wang"], "戌亥");
        assert_eq!(value["chang_sheng"]["长生"]["zhi"], "巳");
        assert_eq!(value["user_info"]["birth_year"], 2024);
        assert_eq!(value["user_info"]["birth_hour"], 10);
        assert_eq!(value["user_info"]["xing_nian"]["xing_nian"], 1);
    }
}
