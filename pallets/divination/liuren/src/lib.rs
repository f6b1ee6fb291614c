//! # 大六壬起课模块 (Liu Ren Chart Pallet)
//!
//! 按公历时间起大六壬课盘，并提供链上起课记录。
//!
//! ## 概述
//!
//! 起课核心为纯函数，不依赖链上状态，可在运行时和链下同样调用：
//!
//! - **历法换算**: 年、月、日、时四柱干支，节气与月将
//! - **天地盘**: 月将加第一位，天盘随月将旋转
//! - **四课**: 日干支、日支配对、时干支、月将配对
//! - **三传**: 九宗门法按优先级取传，均不成立时强制取传
//! - **附注**: 六亲、六神、十二神将、神煞、贵人、空亡、驿马、长生
//! - **年命行年**: 求测者出生信息，缺省取起课时刻
//!
//! ## 模块结构
//!
//! - `types`: 天干地支五行、起课输入与校验错误
//! - `calendar`: 历法换算与农历数据源接口
//! - `plate`: 天地盘
//! - `si_ke`: 四课
//! - `san_chuan`: 三传
//! - `annotation`: 六亲六神神煞等查表
//! - `ming`: 年命与行年
//! - `chart`: 课盘组装
//!
//! ## 使用示例
//!
//! ```ignore
//! // 链下直接起课
//! let chart = pallet_liuren_chart::compute_chart(2024, 6, 15, 10, 30)?;
//!
//! // 链上起课
//! LiuRen::divine_by_solar_time(origin, 2024, 6, 15, 10, 30)?;
//!
//! // 按记录重新推算完整课盘
//! let chart = LiuRen::chart(chart_id);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod weights;
pub use weights::WeightInfo;

pub mod annotation;
pub mod calendar;
pub mod chart;
pub mod ming;
pub mod plate;
pub mod san_chuan;
pub mod si_ke;
pub mod types;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

#[cfg(test)]
mod mock;


pub use chart::*;
pub use types::*;

#[frame_support::pallet]
pub mod pallet {
    use super::*;
    use frame_support::pallet_prelude::*;
    use frame_system::pallet_prelude::*;
    use sp_runtime::traits::UniqueSaturatedInto;

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    /// 配置 trait
    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// 农历数据源，`()` 表示不可用（回退公历近似算法）
        type CalendarSource: calendar::CalendarSource;

        /// 每日每用户最大起课次数
        #[pallet::constant]
        type MaxDailyCharts: Get<u32>;

        /// 权重信息
        type WeightInfo: WeightInfo;
    }

    // ========================================================================
    // 存储项
    // ========================================================================

    /// 下一个课盘 ID
    #[pallet::storage]
    pub type NextChartId<T: Config> = StorageValue<_, u64, ValueQuery>;

    /// 课盘记录
    /// 键: 课盘 ID
    #[pallet::storage]
    pub type Charts<T: Config> =
        StorageMap<_, Blake2_128Concat, u64, ChartRecord<T::AccountId, BlockNumberFor<T>>>;

    /// 用户课盘索引
    /// 键: (用户账户, 课盘 ID)
    #[pallet::storage]
    pub type UserCharts<T: Config> =
        StorageDoubleMap<_, Blake2_128Concat, T::AccountId, Blake2_128Concat, u64, bool, ValueQuery>;

    /// 每日起课计数
    /// 键: (用户账户, 日期戳)
    #[pallet::storage]
    pub type DailyChartCount<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        u32,
        u32,
        ValueQuery,
    >;

    // ========================================================================
    // 事件
    // ========================================================================

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// 课盘已创建
        ChartCreated {
            chart_id: u64,
            creator: T::AccountId,
            method: san_chuan::SanChuanMethod,
        },

        /// 课盘已删除
        ChartDeleted {
            chart_id: u64,
            owner: T::AccountId,
        },
    }

    // ========================================================================
    // 错误
    // ========================================================================

    #[pallet::error]
    pub enum Error<T> {
        /// 年份越界
        InvalidYear,
        /// 月份越界
        InvalidMonth,
        /// 日期越界
        InvalidDay,
        /// 小时越界
        InvalidHour,
        /// 分钟越界
        InvalidMinute,
        /// 超出每日限额
        DailyLimitExceeded,
        /// 课盘不存在
        ChartNotFound,
        /// 无权操作
        NotAuthorized,
    }

    impl<T> From<ValidationError> for Error<T> {
        fn from(err: ValidationError) -> Self {
            match err.field {
                InputField::Year => Error::<T>::InvalidYear,
                InputField::Month => Error::<T>::InvalidMonth,
                InputField::Day => Error::<T>::InvalidDay,
                InputField::Hour => Error::<T>::InvalidHour,
                InputField::Minute => Error::<T>::InvalidMinute,
            }
        }
    }

    // ========================================================================
    // 调用
    // ========================================================================

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// 公历时间起课
        ///
        /// # 参数
        /// - `origin`: 调用者
        /// - `year`: 公历年（1900-2100）
        /// - `month`: 月（1-12）
        /// - `day`: 日（1-31）
        /// - `hour`: 时（0-23）
        /// - `minute`: 分（0-59）
        #[pallet::call_index(0)]
        #[pallet::weight(<T as Config>::WeightInfo::divine_by_solar_time())]
        pub fn divine_by_solar_time(
            origin: OriginFor<T>,
            year: u16,
            month: u8,
            day: u8,
            hour: u8,
            minute: u8,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            // 参数校验
            let input = ChartInput::new(year, month, day, hour, minute).map_err(Error::<T>::from)?;

            // 检查每日限额
            Self::check_daily_limit(&who)?;

            Self::do_divine(who, input)
        }

        /// 删除课盘
        ///
        /// 仅创建者可删除，同时移除用户索引。
        #[pallet::call_index(1)]
        #[pallet::weight(<T as Config>::WeightInfo::delete_chart())]
        pub fn delete_chart(origin: OriginFor<T>, chart_id: u64) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let record = Charts::<T>::get(chart_id).ok_or(Error::<T>::ChartNotFound)?;
            ensure!(record.creator == who, Error::<T>::NotAuthorized);

            UserCharts::<T>::remove(&who, chart_id);
            Charts::<T>::remove(chart_id);

            Self::deposit_event(Event::ChartDeleted { chart_id, owner: who });

            Ok(())
        }
    }

    // ========================================================================
    // 内部函数
    // ========================================================================

    impl<T: Config> Pallet<T> {
        /// 执行起课并保存记录
        fn do_divine(who: T::AccountId, input: ChartInput) -> DispatchResult {
            let chart = compute_chart_with::<T::CalendarSource>(&input).map_err(Error::<T>::from)?;
            let current_block = <frame_system::Pallet<T>>::block_number();

            let chart_id = NextChartId::<T>::get();
            NextChartId::<T>::put(chart_id.saturating_add(1));

            let method = chart.san_chuan.method_used;
            let record = ChartRecord {
                id: chart_id,
                creator: who.clone(),
                created_at: current_block,
                input,
                mode: chart.mode,
                day: chart.ri_gan_zhi,
                yue_jiang: chart.yue_jiang,
                method,
                san_chuan: chart.san_chuan.zhi(),
            };

            Charts::<T>::insert(chart_id, record);
            UserCharts::<T>::insert(&who, chart_id, true);

            // 更新每日计数
            DailyChartCount::<T>::mutate(&who, Self::get_day_stamp(), |count| {
                *count = count.saturating_add(1);
            });

            log::info!(
                target: "liuren",
                "起课成功: chart_id={}, 日干支={}, 月将={}, 取法={}",
                chart_id,
                chart.ri_gan_zhi,
                chart.yue_jiang.name(),
                method.name()
            );

            Self::deposit_event(Event::ChartCreated { chart_id, creator: who, method });

            Ok(())
        }

        /// 检查每日限额
        fn check_daily_limit(who: &T::AccountId) -> DispatchResult {
            let count = DailyChartCount::<T>::get(who, Self::get_day_stamp());

            ensure!(count < T::MaxDailyCharts::get(), Error::<T>::DailyLimitExceeded);

            Ok(())
        }

        /// 获取日期戳（区块号除以一天的区块数）
        fn get_day_stamp() -> u32 {
            let current_block: u32 = <frame_system::Pallet<T>>::block_number().unique_saturated_into();
            // 6 秒一个区块，一天 14400 个区块
            current_block / 14400
        }
    }

    // ========================================================================
    // 查询接口
    // ========================================================================

    impl<T: Config> Pallet<T> {
        /// 按记录重新推算完整课盘
        ///
        /// 公历模式的记录不受 `CalendarSource` 升级影响。
        pub fn chart(chart_id: u64) -> Option<LiuRenChart> {
            let record = Charts::<T>::get(chart_id)?;
            recompute_chart::<T::CalendarSource>(&record.input, record.mode).ok()
        }

        /// 获取课盘记录
        pub fn get_chart_record(chart_id: u64) -> Option<ChartRecord<T::AccountId, BlockNumberFor<T>>> {
            Charts::<T>::get(chart_id)
        }

        /// 课盘是否属于该用户
        pub fn is_user_chart(who: &T::AccountId, chart_id: u64) -> bool {
            UserCharts::<T>::get(who, chart_id)
        }

        /// 用户当日已起课次数
        pub fn daily_count(who: &T::AccountId) -> u32 {
            DailyChartCount::<T>::get(who, Self::get_day_stamp())
        }
    }
}
